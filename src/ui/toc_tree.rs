use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    prelude::*,
    tree::{Tree, TreeItem, TreeItemReselectMode, TreeReason, TreeSelect},
};

use crate::app::domain::messages::Message;
use crate::app::domain::toc::TocTree;

pub const TOC_PANEL_WIDTH: i32 = 200;

/// Side panel listing the active document's headings.
/// Selecting a heading sends `TocJump` with its 0-based source line.
pub struct TocPanel {
    pub tree: Tree,
    items: Rc<RefCell<Vec<(TreeItem, usize)>>>,
}

impl TocPanel {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut tree = Tree::default();
        tree.set_show_root(false);
        tree.set_select_mode(TreeSelect::Single);
        tree.set_item_reselect_mode(TreeItemReselectMode::Always);

        let items: Rc<RefCell<Vec<(TreeItem, usize)>>> = Rc::new(RefCell::new(Vec::new()));
        tree.set_callback({
            let s = *sender;
            let items = items.clone();
            move |t| {
                if !matches!(t.callback_reason(), TreeReason::Selected | TreeReason::Reselected) {
                    return;
                }
                let Some(selected) = t.callback_item() else {
                    return;
                };
                let line = items
                    .borrow()
                    .iter()
                    .find(|(item, _)| *item == selected)
                    .map(|(_, line)| *line);
                if let Some(line) = line {
                    s.send(Message::TocJump(line));
                }
            }
        });

        Self { tree, items }
    }

    /// Replace the tree contents with `toc`.
    pub fn rebuild(&mut self, toc: &TocTree) {
        let Some(root) = self.tree.root() else {
            return;
        };
        self.tree.clear_children(&root);

        let mut items = Vec::with_capacity(toc.len());
        for &index in toc.roots() {
            insert_node(&mut self.tree, &root, toc, index, &mut items);
        }
        *self.items.borrow_mut() = items;
        self.tree.redraw();
    }
}

fn insert_node(
    tree: &mut Tree,
    parent: &TreeItem,
    toc: &TocTree,
    index: usize,
    items: &mut Vec<(TreeItem, usize)>,
) {
    let Some(node) = toc.node(index) else {
        return;
    };
    let Some(mut item) = tree.insert(parent, &node.heading.title, parent.children()) else {
        return;
    };
    item.open();
    items.push((item.clone(), node.heading.source_line));

    for &child in &node.children {
        insert_node(tree, &item, toc, child, items);
    }
}

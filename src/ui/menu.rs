use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::services::snippets::MarkdownComponent;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, preview_enabled: bool, toc_visible: bool) {
    let s = sender;

    // File
    menu.add("File/New Notebook...", Shortcut::Ctrl | Shortcut::Shift | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::NotebookNew) });
    menu.add("File/Open Notebook...", Shortcut::Ctrl | Shortcut::Shift | 'o', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::NotebookOpen) });
    menu.add("File/New Document...", Shortcut::Ctrl | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::DocumentNew) });
    menu.add("File/Open Document...", Shortcut::Ctrl | 'o', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::DocumentOpen) });
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSave) });
    menu.add("File/Save As...", Shortcut::Ctrl | Shortcut::Shift | 's', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::FileSaveAs) });
    menu.add("File/Close Tab", Shortcut::Ctrl | 'w', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TabCloseActive) });
    menu.add("File/Next Tab", Shortcut::Ctrl | Key::Tab, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TabNext) });
    menu.add("File/Previous Tab", Shortcut::Ctrl | Shortcut::Shift | Key::Tab, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::TabPrevious) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Edit
    menu.add("Edit/Undo", Shortcut::Ctrl | 'z', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditUndo) });
    menu.add("Edit/Redo", Shortcut::Ctrl | Shortcut::Shift | 'z', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::EditRedo) });
    menu.add("Edit/Cut", Shortcut::Ctrl | 'x', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditCut) });
    menu.add("Edit/Copy", Shortcut::Ctrl | 'c', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditCopy) });
    menu.add("Edit/Paste", Shortcut::Ctrl | 'v', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditPaste) });
    for component in MarkdownComponent::ALL {
        let path = format!("Edit/Insert/{}", component.display_name());
        menu.add(&path, Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::InsertMarkdown(component)) });
    }

    // View
    let pv_flag = if preview_enabled { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Preview", Shortcut::Ctrl | 'p', pv_flag, { let s = *s; move |_| s.send(Message::TogglePreview) });
    let toc_flag = if toc_visible { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Table of Contents", Shortcut::Ctrl | 'l', toc_flag, { let s = *s; move |_| s.send(Message::ToggleToc) });

    // Help
    menu.add("Help/Website", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenWebsite) });
    menu.add("Help/Source Repository", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenRepository) });
    menu.add("Help/Community Group", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::OpenCommunity) });
    menu.add("Help/About NemoMark", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}

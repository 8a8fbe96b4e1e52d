use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    browser::HoldBrowser,
    button::Button,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::Flex,
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::recent::RecentList;
use crate::app::{APP_NAME, APP_VERSION};

/// Notebooks listed on the Home page.
pub const HOME_RECENT_COUNT: usize = 5;

/// The Home page: app title, the four entry actions, recent notebooks and
/// a footer with version and links.
pub struct HomePanel {
    pub group: Flex,
    recent_browser: HoldBrowser,
    recent_paths: Rc<RefCell<Vec<PathBuf>>>,
}

impl HomePanel {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut group = Flex::default().column();
        group.set_margin(30);
        group.set_spacing(12);

        let mut title = Frame::default().with_label(APP_NAME);
        title.set_label_size(28);
        title.set_label_font(Font::HelveticaBold);
        group.fixed(&title, 50);

        let mut subtitle = Frame::default().with_label("Markdown notebooks with live preview");
        subtitle.set_label_size(14);
        subtitle.set_label_color(Color::from_rgb(100, 100, 100));
        group.fixed(&subtitle, 24);

        let mut actions = Flex::default().row();
        actions.set_spacing(10);
        for (label, msg) in [
            ("New Notebook", Message::NotebookNew),
            ("New Document", Message::DocumentNew),
            ("Open Notebook", Message::NotebookOpen),
            ("Open Document", Message::DocumentOpen),
        ] {
            let mut btn = Button::default().with_label(label);
            btn.set_label_size(14);
            btn.set_callback({
                let s = *sender;
                move |_| s.send(msg.clone())
            });
        }
        actions.end();
        group.fixed(&actions, 60);

        let mut recent_label = Frame::default().with_label("Recent Notebooks");
        recent_label.set_label_font(Font::HelveticaBold);
        recent_label.set_label_size(16);
        recent_label.set_align(Align::Left | Align::Inside);
        group.fixed(&recent_label, 28);

        let mut recent_browser = HoldBrowser::default();
        recent_browser.set_text_size(14);
        recent_browser.set_tooltip("Double click to open");
        let recent_paths: Rc<RefCell<Vec<PathBuf>>> = Rc::new(RefCell::new(Vec::new()));
        recent_browser.set_callback({
            let s = *sender;
            let paths = recent_paths.clone();
            move |b| {
                if !app::event_clicks() {
                    return;
                }
                // Browser lines are 1-based; 0 means no selection.
                let line = b.value();
                if line < 1 {
                    return;
                }
                if let Some(path) = paths.borrow().get(line as usize - 1) {
                    s.send(Message::NotebookOpenPath(path.clone()));
                }
            }
        });

        let mut footer = Flex::default().row();
        let mut version = Frame::default().with_label(&format!("{APP_NAME} {APP_VERSION}"));
        version.set_label_size(12);
        version.set_label_color(Color::from_rgb(127, 140, 141));
        version.set_align(Align::Left | Align::Inside);
        for (label, msg, width) in [
            ("Website", Message::OpenWebsite, 80),
            ("Repository", Message::OpenRepository, 90),
            ("Community", Message::OpenCommunity, 90),
        ] {
            let mut link = Button::default().with_label(label);
            link.set_frame(FrameType::NoBox);
            link.set_label_size(12);
            link.set_label_color(Color::from_rgb(74, 144, 226));
            link.set_callback({
                let s = *sender;
                move |_| s.send(msg.clone())
            });
            footer.fixed(&link, width);
        }
        footer.end();
        group.fixed(&footer, 24);

        group.end();

        Self {
            group,
            recent_browser,
            recent_paths,
        }
    }

    /// Show the first few entries of the recent list.
    pub fn refresh(&mut self, recent: &RecentList) {
        let shown: Vec<PathBuf> = recent.iter().take(HOME_RECENT_COUNT).cloned().collect();
        self.recent_browser.clear();
        for path in &shown {
            // "@." turns off format characters for the rest of the line.
            self.recent_browser.add(&format!("@.{}", path.display()));
        }
        if shown.is_empty() {
            self.recent_browser.add("@.No recent notebooks");
        }
        *self.recent_paths.borrow_mut() = shown;
        self.recent_browser.redraw();
    }
}

use fltk::{
    app::Sender,
    button::Button,
    enums::FrameType,
    frame::Frame,
    group::Flex,
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::services::snippets::MarkdownComponent;

pub const TOOLBAR_HEIGHT: i32 = 28;

const BUTTON_WIDTH: i32 = 44;
const SEPARATOR_WIDTH: i32 = 8;

/// Row of Markdown insertion buttons, one per component.
pub fn build_toolbar(sender: &Sender<Message>) -> Flex {
    let mut row = Flex::default().row();
    row.set_margin(2);
    row.set_spacing(2);

    for component in MarkdownComponent::ALL {
        let mut btn = Button::default().with_label(component.button_label());
        btn.set_frame(FrameType::FlatBox);
        btn.set_label_size(12);
        btn.set_tooltip(component.display_name());
        btn.set_callback({
            let s = *sender;
            move |_| s.send(Message::InsertMarkdown(component))
        });
        row.fixed(&btn, BUTTON_WIDTH);

        if component.ends_toolbar_group() {
            let sep = Frame::default();
            row.fixed(&sep, SEPARATOR_WIDTH);
        }
    }

    // Remaining space
    Frame::default();
    row.end();
    row
}

use fltk::{
    app::Sender,
    button::Button,
    enums::{Color, Font, FrameType},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

use super::run_dialog;
use crate::app::domain::messages::Message;
use crate::app::{APP_NAME, APP_VERSION, RELEASE_DATE};

/// Show About dialog
pub fn show_about_dialog(sender: &Sender<Message>) {
    let mut dialog = Window::default()
        .with_size(380, 360)
        .with_label(&format!("About {APP_NAME}"))
        .center_screen();
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 360, 340, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(8);

    let mut title = Frame::default();
    title.set_label(APP_NAME);
    title.set_label_size(24);
    title.set_label_font(Font::HelveticaBold);
    flex.fixed(&title, 40);

    let mut version_frame = Frame::default();
    version_frame.set_label(&format!("Version {APP_VERSION}"));
    version_frame.set_label_size(14);
    flex.fixed(&version_frame, 22);

    let mut date_frame = Frame::default();
    date_frame.set_label(&format!("Released {RELEASE_DATE}"));
    date_frame.set_label_size(12);
    flex.fixed(&date_frame, 20);

    let mut desc_frame = Frame::default();
    desc_frame.set_label("A Markdown notebook with live preview");
    desc_frame.set_label_size(12);
    desc_frame.set_label_color(Color::from_rgb(100, 100, 100));
    flex.fixed(&desc_frame, 40);

    for (label, msg) in [
        ("Website", Message::OpenWebsite),
        ("Source Repository", Message::OpenRepository),
        ("Community Group", Message::OpenCommunity),
    ] {
        let mut link = Button::default().with_label(label);
        link.set_frame(FrameType::NoBox);
        link.set_label_color(Color::from_rgb(74, 144, 226));
        link.set_callback({
            let s = *sender;
            move |_| s.send(msg.clone())
        });
        flex.fixed(&link, 24);
    }

    // Spacing
    Frame::default();

    let mut close_btn = Button::default().with_label("Close");
    flex.fixed(&close_btn, 32);

    flex.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    run_dialog(&dialog);
}

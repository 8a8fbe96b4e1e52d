use fltk::{
    app::Sender,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use super::home::HomePanel;
use super::tab_bar::{TabBar, TAB_BAR_HEIGHT};
use super::toc_tree::{TocPanel, TOC_PANEL_WIDTH};
use super::toolbar::{build_toolbar, TOOLBAR_HEIGHT};
use crate::app::domain::messages::Message;
use crate::app::APP_NAME;

pub const MENU_HEIGHT: i32 = 30;
pub const STATUS_HEIGHT: i32 = 22;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub tab_bar: TabBar,
    pub toolbar: Flex,
    pub home: HomePanel,
    /// ToC, editor and preview side by side.
    pub workspace: Flex,
    pub toc: TocPanel,
    pub text_editor: TextEditor,
    pub preview: HelpView,
    pub status: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1200, 800, APP_NAME);
    wind.set_xclass(APP_NAME);

    let mut flex = Flex::new(0, 0, 1200, 800, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let tab_bar = TabBar::new(0, MENU_HEIGHT, 1200, *sender);
    flex.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    let toolbar = build_toolbar(sender);
    flex.fixed(&toolbar, TOOLBAR_HEIGHT);

    let home = HomePanel::new(sender);

    let mut workspace = Flex::default().row();
    let toc = TocPanel::new(sender);
    workspace.fixed(&toc.tree, TOC_PANEL_WIDTH);

    let mut text_editor = TextEditor::default();
    text_editor.set_buffer(TextBuffer::default());
    text_editor.set_text_font(Font::Courier);
    text_editor.set_text_size(14);
    text_editor.wrap_mode(WrapMode::AtBounds, 0);
    text_editor.set_linenumber_width(40);
    text_editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
    text_editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));

    let mut preview = HelpView::default();
    preview.set_text_size(14);
    workspace.end();

    let mut status = Frame::default().with_label("Ready");
    status.set_frame(FrameType::FlatBox);
    status.set_color(Color::from_rgb(235, 235, 235));
    status.set_label_size(12);
    status.set_align(Align::Left | Align::Inside);
    flex.fixed(&status, STATUS_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        flex,
        menu,
        tab_bar,
        toolbar,
        home,
        workspace,
        toc,
        text_editor,
        preview,
        status,
    }
}

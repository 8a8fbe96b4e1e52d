use fltk::{app, enums::Event, prelude::*};

use nemo_mark::app::domain::messages::Message;
use nemo_mark::app::domain::settings::AppSettings;
use nemo_mark::app::state::AppState;
use nemo_mark::ui::main_window::build_main_window;
use nemo_mark::ui::menu::build_menu;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    log::info!(
        "Loaded {} recent notebooks from {}",
        settings.recent_notebooks.len(),
        AppSettings::get_config_path().display()
    );

    let mut widgets = build_main_window(&sender);

    // Route the window close button through the same path as File/Quit.
    widgets.wind.set_callback({
        let s = sender;
        move |_| {
            if app::event() == Event::Close {
                s.send(Message::WindowClose);
            }
        }
    });

    let mut state = AppState::new(widgets, sender, settings);
    let preview_enabled = state.preview_enabled();
    let toc_visible = state.toc_visible();
    build_menu(&mut state.ui.menu, &sender, preview_enabled, toc_visible);

    state.ui.wind.show();

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            Message::NotebookNew => state.notebook_new(),
            Message::NotebookOpen => state.notebook_open(),
            Message::NotebookOpenPath(path) => state.notebook_open_path(path),
            Message::DocumentNew => state.document_new(),
            Message::DocumentOpen => state.document_open(),
            Message::FileSave => state.file_save(),
            Message::FileSaveAs => state.file_save_as(),
            Message::FileQuit | Message::WindowClose => {
                if state.file_quit() {
                    app.quit();
                }
            }

            Message::EditUndo => state.edit_undo(),
            Message::EditRedo => state.edit_redo(),
            Message::EditCut => state.edit_cut(),
            Message::EditCopy => state.edit_copy(),
            Message::EditPaste => state.edit_paste(),
            Message::InsertMarkdown(component) => state.insert_markdown(component),

            Message::TogglePreview => state.toggle_preview(),
            Message::ToggleToc => state.toggle_toc(),

            Message::TabSwitch(tab) => state.switch_to_tab(tab),
            Message::TabClose(id) => state.close_tab(id),
            Message::TabCloseActive => state.close_active_tab(),
            Message::TabNext => state.switch_to_next_tab(),
            Message::TabPrevious => state.switch_to_previous_tab(),

            Message::BufferModified(id) => state.on_buffer_modified(id),
            Message::TocJump(line) => state.toc_jump(line),

            Message::OpenWebsite => state.open_website(),
            Message::OpenRepository => state.open_repository(),
            Message::OpenCommunity => state.open_community(),
            Message::ShowAbout => state.show_about(),
        }
    }

    log::info!("Exiting");
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fltk::{app::Sender, dialog, prelude::*, text::TextBuffer};

use super::controllers::preview::PreviewController;
use super::controllers::tabs::{CloseCheck, TabId, TabManager};
use super::domain::document::DocumentId;
use super::domain::messages::Message;
use super::domain::notebook;
use super::domain::settings::AppSettings;
use super::domain::toc::TocTree;
use super::infrastructure::buffer::{DocumentBuffer, buffer_text_no_leak};
use super::services::snippets::{MarkdownComponent, plan_insertion};
use super::services::text_ops::line_number_to_byte_position;
use super::{APP_COMMUNITY, APP_NAME, APP_REPOSITORY, APP_WEBSITE};
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::file_dialogs::{native_folder_dialog, native_open_dialog, native_save_dialog};
use crate::ui::main_window::MainWidgets;

pub struct AppState {
    pub tab_manager: TabManager,
    pub preview: PreviewController,
    pub settings: AppSettings,
    pub ui: MainWidgets,
    pub sender: Sender<Message>,
    buffers: HashMap<DocumentId, DocumentBuffer>,
    /// Bound to the (hidden) editor while the Home tab is active.
    idle_buffer: TextBuffer,
    toc_visible: bool,
    /// Last directory used in a file open/save dialog.
    last_open_directory: Option<PathBuf>,
}

impl AppState {
    pub fn new(ui: MainWidgets, sender: Sender<Message>, settings: AppSettings) -> Self {
        let mut state = Self {
            tab_manager: TabManager::new(),
            preview: PreviewController::new(true),
            settings,
            ui,
            sender,
            buffers: HashMap::new(),
            idle_buffer: TextBuffer::default(),
            toc_visible: true,
            last_open_directory: None,
        };
        state.ui.home.refresh(&state.settings.recent_notebooks);
        state.show_active_tab();
        state.rebuild_tab_bar();
        state
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview.enabled
    }

    pub fn toc_visible(&self) -> bool {
        self.toc_visible
    }

    // --- Tabs ---

    /// Store the editor cursor in the active document before switching away.
    fn remember_cursor(&mut self) {
        let cursor = self.ui.text_editor.insert_position();
        if let Some(doc) = self.tab_manager.active_doc_mut() {
            doc.cursor_position = cursor;
        }
    }

    /// Show the widgets for the active tab and bind its buffer to the editor.
    fn show_active_tab(&mut self) {
        match self.tab_manager.active() {
            TabId::Home => {
                self.ui.text_editor.set_buffer(self.idle_buffer.clone());
                self.ui.toolbar.hide();
                self.ui.workspace.hide();
                self.ui.home.group.show();
                self.ui.home.refresh(&self.settings.recent_notebooks);
            }
            TabId::Document(id) => {
                let cursor = self.tab_manager.doc_by_id(id).map_or(0, |d| d.cursor_position);
                if let Some(buf) = self.buffers.get(&id) {
                    self.ui.text_editor.set_buffer(buf.buffer().clone());
                }
                self.ui.text_editor.set_insert_position(cursor);
                self.ui.text_editor.show_insert_position();

                self.ui.home.group.hide();
                self.ui.toolbar.show();
                self.ui.workspace.show();
                self.apply_pane_visibility();
                self.refresh_views(id);
            }
        }
        self.ui.flex.layout();
        self.ui.wind.redraw();
        self.update_window_title();
    }

    fn apply_pane_visibility(&mut self) {
        if self.toc_visible {
            self.ui.toc.tree.show();
        } else {
            self.ui.toc.tree.hide();
        }
        if self.preview.enabled {
            self.ui.preview.show();
        } else {
            self.ui.preview.hide();
        }
        self.ui.workspace.layout();
    }

    pub fn switch_to_tab(&mut self, tab: TabId) {
        if tab == self.tab_manager.active() {
            return;
        }
        self.remember_cursor();
        if !self.tab_manager.set_active(tab) {
            return;
        }
        self.show_active_tab();
        self.rebuild_tab_bar();
    }

    pub fn switch_to_next_tab(&mut self) {
        let next = self.tab_manager.next_tab();
        self.switch_to_tab(next);
    }

    pub fn switch_to_previous_tab(&mut self) {
        let prev = self.tab_manager.prev_tab();
        self.switch_to_tab(prev);
    }

    /// Rebuild the tab bar UI from current documents
    pub fn rebuild_tab_bar(&mut self) {
        let views = self.tab_manager.tab_views();
        self.ui.tab_bar.rebuild(views);
    }

    /// Update the window title based on the active tab
    pub fn update_window_title(&mut self) {
        let title = self.tab_manager.active_title();
        self.ui.wind.set_label(&format!("{title} - {APP_NAME}"));
    }

    fn set_status(&mut self, text: &str) {
        self.ui.status.set_label(text);
        self.ui.status.redraw();
    }

    /// Close a document tab, prompting first when it has unsaved changes.
    pub fn close_tab(&mut self, id: DocumentId) {
        match self.tab_manager.close_check(TabId::Document(id)) {
            CloseCheck::Refuse => return,
            CloseCheck::Prompt => {
                let name = self
                    .tab_manager
                    .doc_by_id(id)
                    .map(|d| d.display_name.clone())
                    .unwrap_or_default();
                let choice = dialog::choice2_default(
                    &format!("\"{}\" has unsaved changes.", name),
                    "Save",
                    "Discard",
                    "Cancel",
                );
                match choice {
                    Some(0) => {
                        if !self.save_document(id) {
                            return;
                        }
                    }
                    Some(1) => {}
                    _ => return,
                }
            }
            CloseCheck::Close => {}
        }

        self.remember_cursor();
        if let Some(doc) = self.tab_manager.remove(id) {
            log::info!("Closed {}", doc.file_path.display());
        }
        // Rebind the editor before the closed buffer is released.
        let closed_buffer = self.buffers.remove(&id);
        self.show_active_tab();
        drop(closed_buffer);
        self.rebuild_tab_bar();
    }

    pub fn close_active_tab(&mut self) {
        if let TabId::Document(id) = self.tab_manager.active() {
            self.close_tab(id);
        }
    }

    // --- Editing ---

    /// Copy the buffer into its document and refresh the derived views.
    pub fn on_buffer_modified(&mut self, id: DocumentId) {
        let Some(buf) = self.buffers.get(&id) else {
            return;
        };
        let text = buf.text();
        let Some(doc) = self.tab_manager.doc_by_id_mut(id) else {
            return;
        };
        let was_dirty = doc.is_dirty();
        if !doc.replace_text(text) {
            return;
        }

        if self.tab_manager.active() == TabId::Document(id) {
            self.refresh_views(id);
        }
        if !was_dirty {
            self.rebuild_tab_bar();
            self.update_window_title();
        }
    }

    /// Rebuild the ToC and preview for a document.
    fn refresh_views(&mut self, id: DocumentId) {
        let Some(doc) = self.tab_manager.doc_by_id(id) else {
            return;
        };
        if self.toc_visible {
            self.ui.toc.rebuild(&TocTree::build(doc.text()));
        }
        if self.preview.enabled {
            let html = PreviewController::render_for_helpview(doc.text(), doc.file_path.parent());
            self.ui.preview.set_value(&html);
        }
    }

    fn active_buffer(&self) -> Option<TextBuffer> {
        match self.tab_manager.active() {
            TabId::Home => None,
            TabId::Document(id) => self.buffers.get(&id).map(|b| b.buffer().clone()),
        }
    }

    pub fn edit_undo(&mut self) {
        if self.active_buffer().is_some() {
            let _ = self.ui.text_editor.undo();
        }
    }

    pub fn edit_redo(&mut self) {
        if self.active_buffer().is_some() {
            let _ = self.ui.text_editor.redo();
        }
    }

    pub fn edit_cut(&mut self) {
        if self.active_buffer().is_some() {
            self.ui.text_editor.cut();
        }
    }

    pub fn edit_copy(&mut self) {
        if self.active_buffer().is_some() {
            self.ui.text_editor.copy();
        }
    }

    pub fn edit_paste(&mut self) {
        if self.active_buffer().is_some() {
            self.ui.text_editor.paste();
        }
    }

    pub fn insert_markdown(&mut self, component: MarkdownComponent) {
        let Some(mut buf) = self.active_buffer() else {
            return;
        };

        let selection = buf.selection_position().filter(|(start, end)| end > start);
        let selected_text = selection.and_then(|(start, end)| {
            buffer_text_no_leak(&buf)
                .get(start as usize..end as usize)
                .map(str::to_string)
        });
        let insertion = plan_insertion(component, selected_text.as_deref());

        let start = match selection {
            Some((start, _)) => {
                buf.replace_selection(&insertion.text);
                start
            }
            None => {
                let pos = self.ui.text_editor.insert_position();
                buf.insert(pos, &insertion.text);
                pos
            }
        };
        buf.unselect();

        self.ui.text_editor.set_insert_position(start + insertion.cursor as i32);
        self.ui.text_editor.show_insert_position();
        let _ = self.ui.text_editor.take_focus();
    }

    /// Move the editor cursor to the start of a 0-based source line.
    pub fn toc_jump(&mut self, source_line: usize) {
        let Some(doc) = self.tab_manager.active_doc() else {
            return;
        };
        let Some(pos) = line_number_to_byte_position(doc.text(), source_line + 1) else {
            return;
        };
        if let Some(mut buf) = self.active_buffer() {
            buf.unselect();
        }
        self.ui.text_editor.set_insert_position(pos as i32);
        self.ui.text_editor.show_insert_position();
        let _ = self.ui.text_editor.take_focus();
    }

    // --- View toggles ---

    pub fn toggle_preview(&mut self) {
        let enabled = self.preview.toggle();
        self.update_menu_checkbox("View/Preview", enabled);
        self.after_pane_toggle();
    }

    pub fn toggle_toc(&mut self) {
        self.toc_visible = !self.toc_visible;
        self.update_menu_checkbox("View/Table of Contents", self.toc_visible);
        self.after_pane_toggle();
    }

    fn after_pane_toggle(&mut self) {
        if let TabId::Document(id) = self.tab_manager.active() {
            self.apply_pane_visibility();
            self.refresh_views(id);
            self.ui.wind.redraw();
        }
    }

    fn update_menu_checkbox(&self, path: &str, checked: bool) {
        if let Some(mut item) = self.ui.menu.find_item(path) {
            if checked {
                item.set();
            } else {
                item.clear();
            }
        }
    }

    // --- Documents ---

    fn remember_directory(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.last_open_directory = Some(parent.to_path_buf());
        }
    }

    /// Open a document in a tab, or activate the tab already showing it.
    /// Without an explicit notebook, the notebook is inferred from the
    /// recent list.
    pub fn open_document_path(&mut self, path: PathBuf, notebook: Option<PathBuf>) {
        let notebook = notebook.or_else(|| {
            self.settings
                .recent_notebooks
                .notebook_for(&path)
                .map(Path::to_path_buf)
        });

        self.remember_cursor();
        match self.tab_manager.open_file(&path, notebook) {
            Ok(id) => {
                if !self.buffers.contains_key(&id) {
                    let text = self
                        .tab_manager
                        .doc_by_id(id)
                        .map(|d| d.text().to_string())
                        .unwrap_or_default();
                    self.buffers.insert(id, DocumentBuffer::new(id, &text, self.sender));
                }
                self.remember_directory(&path);
                self.show_active_tab();
                self.rebuild_tab_bar();
                let name = self.tab_manager.active_title();
                self.set_status(&format!("Opened document: {name}"));
            }
            Err(e) => {
                log::warn!("Failed to open {}: {}", path.display(), e);
                dialog::alert_default(&format!("Error opening file: {}", e));
            }
        }
    }

    pub fn document_open(&mut self) {
        let start_dir = self
            .tab_manager
            .current_notebook()
            .map(Path::to_path_buf)
            .or_else(|| self.last_open_directory.clone());
        if let Some(path) = native_open_dialog("Open Document", start_dir.as_deref()) {
            self.open_document_path(path, None);
        }
    }

    /// New document inside the current notebook, if there is one.
    pub fn document_new(&mut self) {
        let notebook = self.tab_manager.current_notebook().map(Path::to_path_buf);
        self.document_new_in(notebook);
    }

    fn document_new_in(&mut self, notebook: Option<PathBuf>) {
        let Some(name) = dialog::input_default("Document name:", "") else {
            return;
        };
        if name.trim().is_empty() {
            return;
        }

        let path = match &notebook {
            Some(nb) => match notebook::document_path_in(nb, &name) {
                Ok(path) => path,
                Err(e) => {
                    dialog::alert_default(&format!("Cannot create document: {}", e));
                    return;
                }
            },
            None => {
                let preset = self
                    .last_open_directory
                    .clone()
                    .unwrap_or_default()
                    .join(notebook::document_file_name(&name));
                match native_save_dialog("New Document", &preset) {
                    Some(path) => path,
                    None => return,
                }
            }
        };

        if let Err(e) = notebook::create_document(&path) {
            dialog::alert_default(&format!("Cannot create document: {}", e));
            return;
        }
        self.open_document_path(path, notebook);
    }

    /// Save a document to its own path. A failed write falls back to
    /// Save As. Returns true once the document is clean.
    pub fn save_document(&mut self, id: DocumentId) -> bool {
        self.sync_from_buffer(id);
        let Some(doc) = self.tab_manager.doc_by_id_mut(id) else {
            return false;
        };
        match doc.save() {
            Ok(()) => {
                let name = doc.display_name.clone();
                self.after_save(&format!("Saved {name}"));
                true
            }
            Err(e) => {
                log::warn!("Save failed for {}: {}", doc.file_path.display(), e);
                dialog::alert_default(&format!("Error saving file: {}", e));
                self.save_document_as(id)
            }
        }
    }

    /// Ask for a new path and save there. Returns true once the document is clean.
    pub fn save_document_as(&mut self, id: DocumentId) -> bool {
        self.sync_from_buffer(id);
        let Some(preset) = self.tab_manager.doc_by_id(id).map(|d| d.file_path.clone()) else {
            return false;
        };
        let Some(path) = native_save_dialog("Save As", &preset) else {
            return false;
        };
        self.remember_directory(&path);

        let Some(doc) = self.tab_manager.doc_by_id_mut(id) else {
            return false;
        };
        match doc.save_as(path) {
            Ok(()) => {
                let name = doc.display_name.clone();
                self.after_save(&format!("Saved {name}"));
                true
            }
            Err(e) => {
                dialog::alert_default(&format!("Error saving file: {}", e));
                false
            }
        }
    }

    fn after_save(&mut self, status: &str) {
        self.rebuild_tab_bar();
        self.update_window_title();
        self.set_status(status);
    }

    /// Pull pending edits from the buffer in case their messages have not
    /// been dispatched yet.
    fn sync_from_buffer(&mut self, id: DocumentId) {
        if let Some(buf) = self.buffers.get(&id) {
            let text = buf.text();
            if let Some(doc) = self.tab_manager.doc_by_id_mut(id) {
                doc.replace_text(text);
            }
        }
    }

    pub fn file_save(&mut self) {
        if let TabId::Document(id) = self.tab_manager.active() {
            self.save_document(id);
        }
    }

    pub fn file_save_as(&mut self) {
        if let TabId::Document(id) = self.tab_manager.active() {
            self.save_document_as(id);
        }
    }

    // --- Notebooks ---

    pub fn notebook_new(&mut self) {
        let Some(name) = dialog::input_default("Notebook name:", "") else {
            return;
        };
        if name.trim().is_empty() {
            return;
        }
        let Some(parent) = native_folder_dialog("Choose where to create the notebook") else {
            return;
        };
        match notebook::create_notebook(&parent, &name) {
            Ok(path) => self.notebook_open_path(path),
            Err(e) => dialog::alert_default(&format!("Cannot create notebook: {}", e)),
        }
    }

    pub fn notebook_open(&mut self) {
        if let Some(path) = native_folder_dialog("Open Notebook") {
            self.notebook_open_path(path);
        }
    }

    /// Record the notebook as recent and show its entry document.
    pub fn notebook_open_path(&mut self, path: PathBuf) {
        if !path.is_dir() {
            dialog::alert_default(&format!("Notebook folder not found: {}", path.display()));
            return;
        }

        self.settings.remember_notebook(&path);
        self.persist_settings();
        self.ui.home.refresh(&self.settings.recent_notebooks);
        self.set_status(&format!("Opened notebook: {}", path.display()));

        if let Some(id) = self.tab_manager.find_by_notebook(&path) {
            self.switch_to_tab(TabId::Document(id));
            return;
        }

        match notebook::entry_document(&path) {
            Ok(Some(doc_path)) => self.open_document_path(doc_path, Some(path)),
            Ok(None) => self.document_new_in(Some(path)),
            Err(e) => dialog::alert_default(&format!("Cannot open notebook: {}", e)),
        }
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    // --- Help ---

    pub fn open_website(&self) {
        open_link(APP_WEBSITE);
    }

    pub fn open_repository(&self) {
        open_link(APP_REPOSITORY);
    }

    pub fn open_community(&self) {
        open_link(APP_COMMUNITY);
    }

    pub fn show_about(&self) {
        show_about_dialog(&self.sender);
    }

    // --- Quit ---

    /// Handle quit request. Returns `true` if the app should exit.
    pub fn file_quit(&mut self) -> bool {
        self.remember_cursor();
        let dirty_docs = self.tab_manager.dirty_documents();

        if !dirty_docs.is_empty() {
            let choice = dialog::choice2_default(
                "You have unsaved changes in one or more documents.",
                "Save All",
                "Quit Without Saving",
                "Cancel",
            );
            match choice {
                Some(0) => {
                    for id in dirty_docs {
                        if !self.save_document(id) {
                            return false;
                        }
                    }
                }
                Some(1) => {}
                _ => return false,
            }
        }

        self.persist_settings();
        true
    }
}

fn open_link(url: &str) {
    if let Err(e) = open::that(url) {
        log::warn!("Failed to open {}: {}", url, e);
        dialog::alert_default(&format!("Could not open {}: {}", url, e));
    }
}

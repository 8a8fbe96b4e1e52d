use std::path::{Path, PathBuf};

use crate::app::domain::document::{Document, DocumentId};
use crate::app::infrastructure::error::Result;

/// Title of the permanent first tab.
pub const HOME_TAB_TITLE: &str = "Home";

/// A tab is either the Home page or an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Home,
    Document(DocumentId),
}

/// What closing a tab requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseCheck {
    /// The tab cannot be closed (Home, or an unknown id).
    Refuse,
    /// Unsaved changes: ask Save / Discard / Cancel first.
    Prompt,
    Close,
}

/// Everything the tab bar needs to draw one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub id: TabId,
    pub title: String,
    pub closable: bool,
    pub is_active: bool,
    pub is_dirty: bool,
}

/// Ordered set of open documents behind the permanent Home tab.
///
/// Tab order is Home first, then documents in the order they were opened.
pub struct TabManager {
    documents: Vec<Document>,
    active: TabId,
    next_id: u64,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            active: TabId::Home,
            next_id: 1,
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a document tab and make it active.
    pub fn add_from_file(
        &mut self,
        path: PathBuf,
        content: String,
        notebook: Option<PathBuf>,
    ) -> DocumentId {
        let id = self.next_document_id();
        let mut doc = Document::new_from_file(id, path, content);
        doc.notebook = notebook;
        self.documents.push(doc);
        self.active = TabId::Document(id);
        id
    }

    /// Open `path` in a new tab, or activate the tab already showing it.
    pub fn open_file(&mut self, path: &Path, notebook: Option<PathBuf>) -> Result<DocumentId> {
        if let Some(id) = self.find_by_path(path) {
            self.active = TabId::Document(id);
            return Ok(id);
        }
        let id = self.next_document_id();
        let mut doc = Document::load(id, path)?;
        doc.notebook = notebook;
        self.documents.push(doc);
        self.active = TabId::Document(id);
        Ok(id)
    }

    pub fn active(&self) -> TabId {
        self.active
    }

    pub fn active_doc(&self) -> Option<&Document> {
        match self.active {
            TabId::Home => None,
            TabId::Document(id) => self.doc_by_id(id),
        }
    }

    pub fn active_doc_mut(&mut self) -> Option<&mut Document> {
        match self.active {
            TabId::Home => None,
            TabId::Document(id) => self.doc_by_id_mut(id),
        }
    }

    /// Activate `tab` if it exists. Returns false for unknown documents.
    pub fn set_active(&mut self, tab: TabId) -> bool {
        let known = match tab {
            TabId::Home => true,
            TabId::Document(id) => self.doc_by_id(id).is_some(),
        };
        if known {
            self.active = tab;
        }
        known
    }

    /// Remove a document by id and return it. Activates the nearest
    /// neighbor, or Home once no documents remain.
    pub fn remove(&mut self, id: DocumentId) -> Option<Document> {
        let idx = self.documents.iter().position(|d| d.id == id)?;
        let doc = self.documents.remove(idx);

        if self.active == TabId::Document(id) {
            self.active = if self.documents.is_empty() {
                TabId::Home
            } else {
                let new_idx = idx.min(self.documents.len() - 1);
                TabId::Document(self.documents[new_idx].id)
            };
        }
        Some(doc)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn find_by_path(&self, path: &Path) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|d| d.file_path == path)
            .map(|d| d.id)
    }

    /// First open document that belongs to `notebook`.
    pub fn find_by_notebook(&self, notebook: &Path) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|d| d.notebook.as_deref() == Some(notebook))
            .map(|d| d.id)
    }

    /// Notebook of the active document. `None` on Home or for a loose file.
    pub fn current_notebook(&self) -> Option<&Path> {
        self.active_doc().and_then(|d| d.notebook.as_deref())
    }

    pub fn doc_by_id(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn doc_by_id_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    /// Ids of documents with unsaved changes, in tab order.
    pub fn dirty_documents(&self) -> Vec<DocumentId> {
        self.documents
            .iter()
            .filter(|d| d.is_dirty())
            .map(|d| d.id)
            .collect()
    }

    pub fn close_check(&self, tab: TabId) -> CloseCheck {
        match tab {
            TabId::Home => CloseCheck::Refuse,
            TabId::Document(id) => match self.doc_by_id(id) {
                None => CloseCheck::Refuse,
                Some(doc) if doc.is_dirty() => CloseCheck::Prompt,
                Some(_) => CloseCheck::Close,
            },
        }
    }

    fn tab_order(&self) -> Vec<TabId> {
        std::iter::once(TabId::Home)
            .chain(self.documents.iter().map(|d| TabId::Document(d.id)))
            .collect()
    }

    /// Tab after the active one, wrapping around through Home.
    pub fn next_tab(&self) -> TabId {
        let order = self.tab_order();
        let idx = order.iter().position(|&t| t == self.active).unwrap_or(0);
        order[(idx + 1) % order.len()]
    }

    /// Tab before the active one, wrapping around through Home.
    pub fn prev_tab(&self) -> TabId {
        let order = self.tab_order();
        let idx = order.iter().position(|&t| t == self.active).unwrap_or(0);
        order[(idx + order.len() - 1) % order.len()]
    }

    /// Title of the active tab, with the modified marker when dirty.
    pub fn active_title(&self) -> String {
        self.active_doc()
            .map(Document::tab_title)
            .unwrap_or_else(|| HOME_TAB_TITLE.to_string())
    }

    pub fn tab_views(&self) -> Vec<TabView> {
        let home = TabView {
            id: TabId::Home,
            title: HOME_TAB_TITLE.to_string(),
            closable: false,
            is_active: self.active == TabId::Home,
            is_dirty: false,
        };
        std::iter::once(home)
            .chain(self.documents.iter().map(|d| TabView {
                id: TabId::Document(d.id),
                title: d.tab_title(),
                closable: true,
                is_active: self.active == TabId::Document(d.id),
                is_dirty: d.is_dirty(),
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(names: &[&str]) -> (TabManager, Vec<DocumentId>) {
        let mut tm = TabManager::new();
        let ids = names
            .iter()
            .map(|n| tm.add_from_file(PathBuf::from(format!("/nb/{n}")), String::new(), None))
            .collect();
        (tm, ids)
    }

    #[test]
    fn test_starts_on_home() {
        let tm = TabManager::new();
        assert_eq!(tm.active(), TabId::Home);
        assert!(tm.active_doc().is_none());
        assert_eq!(tm.active_title(), HOME_TAB_TITLE);
        assert_eq!(tm.tab_views().len(), 1);
    }

    #[test]
    fn test_add_activates_new_tab() {
        let (tm, ids) = manager_with(&["a.md", "b.md"]);
        assert_eq!(tm.count(), 2);
        assert_eq!(tm.active(), TabId::Document(ids[1]));
        assert_eq!(tm.active_title(), "b.md");
    }

    #[test]
    fn test_ids_are_unique() {
        let (mut tm, ids) = manager_with(&["a.md", "b.md"]);
        tm.remove(ids[1]);
        let c = tm.add_from_file(PathBuf::from("/nb/c.md"), String::new(), None);
        assert!(!ids.contains(&c));
    }

    #[test]
    fn test_find_by_path() {
        let (tm, ids) = manager_with(&["a.md", "b.md"]);
        assert_eq!(tm.find_by_path(Path::new("/nb/a.md")), Some(ids[0]));
        assert_eq!(tm.find_by_path(Path::new("/nb/zzz.md")), None);
    }

    #[test]
    fn test_set_active_rejects_unknown() {
        let (mut tm, ids) = manager_with(&["a.md"]);
        assert!(!tm.set_active(TabId::Document(DocumentId(999))));
        assert_eq!(tm.active(), TabId::Document(ids[0]));
        assert!(tm.set_active(TabId::Home));
        assert_eq!(tm.active(), TabId::Home);
    }

    #[test]
    fn test_remove_activates_right_neighbor() {
        let (mut tm, ids) = manager_with(&["a.md", "b.md", "c.md"]);
        tm.set_active(TabId::Document(ids[1]));
        let removed = tm.remove(ids[1]).unwrap();
        assert_eq!(removed.display_name, "b.md");
        assert_eq!(tm.active(), TabId::Document(ids[2]));
    }

    #[test]
    fn test_remove_last_activates_left_neighbor() {
        let (mut tm, ids) = manager_with(&["a.md", "b.md"]);
        tm.remove(ids[1]);
        assert_eq!(tm.active(), TabId::Document(ids[0]));
    }

    #[test]
    fn test_remove_only_document_returns_home() {
        let (mut tm, ids) = manager_with(&["a.md"]);
        tm.remove(ids[0]);
        assert_eq!(tm.active(), TabId::Home);
        assert!(tm.remove(ids[0]).is_none());
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let (mut tm, ids) = manager_with(&["a.md", "b.md"]);
        tm.remove(ids[0]);
        assert_eq!(tm.active(), TabId::Document(ids[1]));
    }

    #[test]
    fn test_close_check() {
        let (mut tm, ids) = manager_with(&["a.md", "b.md"]);
        assert_eq!(tm.close_check(TabId::Home), CloseCheck::Refuse);
        assert_eq!(tm.close_check(TabId::Document(DocumentId(42))), CloseCheck::Refuse);
        assert_eq!(tm.close_check(TabId::Document(ids[0])), CloseCheck::Close);

        tm.doc_by_id_mut(ids[1]).unwrap().replace_text("edit".into());
        assert_eq!(tm.close_check(TabId::Document(ids[1])), CloseCheck::Prompt);
        assert_eq!(tm.dirty_documents(), vec![ids[1]]);
    }

    #[test]
    fn test_cycling_wraps_through_home() {
        let (mut tm, ids) = manager_with(&["a.md", "b.md"]);
        assert_eq!(tm.next_tab(), TabId::Home);
        tm.set_active(TabId::Home);
        assert_eq!(tm.next_tab(), TabId::Document(ids[0]));
        assert_eq!(tm.prev_tab(), TabId::Document(ids[1]));
    }

    #[test]
    fn test_cycling_with_only_home() {
        let tm = TabManager::new();
        assert_eq!(tm.next_tab(), TabId::Home);
        assert_eq!(tm.prev_tab(), TabId::Home);
    }

    #[test]
    fn test_tab_views() {
        let (mut tm, ids) = manager_with(&["a.md", "b.md"]);
        tm.doc_by_id_mut(ids[0]).unwrap().replace_text("x".into());

        let views = tm.tab_views();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].title, HOME_TAB_TITLE);
        assert!(!views[0].closable);
        assert_eq!(views[1].title, "a.md*");
        assert!(views[1].is_dirty && views[1].closable && !views[1].is_active);
        assert!(views[2].is_active);
    }

    #[test]
    fn test_open_file_reuses_existing_tab() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "# A\n").unwrap();

        let mut tm = TabManager::new();
        let first = tm.open_file(&path, Some(dir.path().to_path_buf())).unwrap();
        tm.set_active(TabId::Home);
        let second = tm.open_file(&path, None).unwrap();

        assert_eq!(first, second);
        assert_eq!(tm.count(), 1);
        assert_eq!(tm.active(), TabId::Document(first));
        assert_eq!(tm.active_doc().unwrap().text(), "# A\n");
        assert_eq!(tm.find_by_notebook(dir.path()), Some(first));
    }

    #[test]
    fn test_open_missing_file_fails_without_tab() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut tm = TabManager::new();
        assert!(tm.open_file(&dir.path().join("nope.md"), None).is_err());
        assert_eq!(tm.count(), 0);
        assert_eq!(tm.active(), TabId::Home);
    }

    #[test]
    fn test_current_notebook() {
        let mut tm = TabManager::new();
        assert!(tm.current_notebook().is_none());

        let inside =
            tm.add_from_file(PathBuf::from("/nb/a.md"), String::new(), Some(PathBuf::from("/nb")));
        assert_eq!(tm.current_notebook(), Some(Path::new("/nb")));

        let loose = tm.add_from_file(PathBuf::from("/tmp/b.md"), String::new(), None);
        assert_eq!(tm.active(), TabId::Document(loose));
        assert!(tm.current_notebook().is_none());

        assert!(tm.set_active(TabId::Document(inside)));
        assert_eq!(tm.current_notebook(), Some(Path::new("/nb")));
    }

    #[test]
    fn test_home_has_no_notebook() {
        let mut tm = TabManager::new();
        tm.add_from_file(PathBuf::from("/nb/a.md"), String::new(), Some(PathBuf::from("/nb")));
        assert!(tm.set_active(TabId::Home));
        assert!(tm.current_notebook().is_none());
    }
}

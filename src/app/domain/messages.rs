use std::path::PathBuf;

use super::document::DocumentId;
use crate::app::controllers::tabs::TabId;
use crate::app::services::snippets::MarkdownComponent;

/// All messages that can be sent through the FLTK channel.
/// Widget callbacks send one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    NotebookNew,
    NotebookOpen,
    NotebookOpenPath(PathBuf),
    DocumentNew,
    DocumentOpen,
    FileSave,
    FileSaveAs,
    FileQuit,
    WindowClose,

    // Edit
    EditUndo,
    EditRedo,
    EditCut,
    EditCopy,
    EditPaste,
    InsertMarkdown(MarkdownComponent),

    // View
    TogglePreview,
    ToggleToc,

    // Tabs
    TabSwitch(TabId),
    TabClose(DocumentId),
    TabCloseActive,
    TabNext,
    TabPrevious,

    // Editor events
    BufferModified(DocumentId),
    TocJump(usize),

    // Help
    OpenWebsite,
    OpenRepository,
    OpenCommunity,
    ShowAbout,
}

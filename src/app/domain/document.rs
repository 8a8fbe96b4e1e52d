use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::Result;
use crate::app::services::text_ops::extract_filename;

/// Marker appended to tab titles of documents with unsaved changes.
pub const MODIFIED_MARKER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// A Markdown file open in a tab.
///
/// The text here mirrors the editor buffer; `modified` is a plain dirty bit
/// that any change to the text sets and only a load or save clears.
#[derive(Debug)]
pub struct Document {
    pub id: DocumentId,
    pub file_path: PathBuf,
    pub display_name: String,
    /// Notebook folder this document was opened from, if any.
    pub notebook: Option<PathBuf>,
    pub cursor_position: i32,
    text: String,
    modified: bool,
}

impl Document {
    pub fn new_from_file(id: DocumentId, path: PathBuf, content: String) -> Self {
        let display_name = extract_filename(&path);
        Self {
            id,
            file_path: path,
            display_name,
            notebook: None,
            cursor_position: 0,
            text: content,
            modified: false,
        }
    }

    /// Read a UTF-8 document from disk.
    pub fn load(id: DocumentId, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        log::info!("Loaded {} ({} bytes)", path.display(), content.len());
        Ok(Self::new_from_file(id, path.to_path_buf(), content))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.modified
    }

    pub fn mark_clean(&mut self) {
        self.modified = false;
    }

    /// Replace the in-memory text with the editor's current contents.
    ///
    /// Returns true if the text changed. Identical text (e.g. the echo of a
    /// programmatic buffer load) leaves the dirty bit untouched.
    pub fn replace_text(&mut self, text: String) -> bool {
        if text == self.text {
            return false;
        }
        self.text = text;
        self.modified = true;
        true
    }

    /// Write the text to the document's own path.
    pub fn save(&mut self) -> Result<()> {
        fs::write(&self.file_path, &self.text)?;
        self.modified = false;
        log::info!("Saved {}", self.file_path.display());
        Ok(())
    }

    /// Write the text to a new path, which becomes the document's path.
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        fs::write(&path, &self.text)?;
        self.file_path = path;
        self.update_display_name();
        self.modified = false;
        log::info!("Saved as {}", self.file_path.display());
        Ok(())
    }

    pub fn update_display_name(&mut self) {
        self.display_name = extract_filename(&self.file_path);
    }

    /// Name shown on the tab, with the modified marker when dirty.
    pub fn tab_title(&self) -> String {
        if self.modified {
            format!("{}{}", self.display_name, MODIFIED_MARKER)
        } else {
            self.display_name.clone()
        }
    }
}

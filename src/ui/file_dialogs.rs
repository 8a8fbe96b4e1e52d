use std::path::{Path, PathBuf};

use fltk::dialog::{FileDialogOptions, FileDialogType, NativeFileChooser};

/// Filter string for Markdown documents, in FLTK's tab-separated format.
pub const MARKDOWN_FILTER: &str = "Markdown Files\t*.md";

fn chosen_path(nfc: &NativeFileChooser) -> Option<PathBuf> {
    let filename = nfc.filename();
    if filename.as_os_str().is_empty() {
        None
    } else {
        Some(filename)
    }
}

pub fn native_open_dialog(title: &str, start_dir: Option<&Path>) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseFile);
    nfc.set_title(title);
    nfc.set_filter(MARKDOWN_FILTER);
    if let Some(dir) = start_dir {
        let _ = nfc.set_directory(&dir);
    }
    nfc.show(); // blocks until close
    chosen_path(&nfc)
}

pub fn native_save_dialog(title: &str, preset: &Path) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_title(title);
    nfc.set_filter(MARKDOWN_FILTER);
    nfc.set_option(FileDialogOptions::SaveAsConfirm);
    if let Some(dir) = preset.parent().filter(|d| !d.as_os_str().is_empty()) {
        let _ = nfc.set_directory(&dir);
    }
    if let Some(name) = preset.file_name().and_then(|n| n.to_str()) {
        nfc.set_preset_file(name);
    }
    nfc.show();
    chosen_path(&nfc)
}

pub fn native_folder_dialog(title: &str) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseDir);
    nfc.set_title(title);
    nfc.show();
    chosen_path(&nfc)
}

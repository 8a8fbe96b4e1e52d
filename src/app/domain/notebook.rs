//! Notebooks are plain folders of Markdown files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

pub const README_FILE: &str = "README.md";
pub const MARKDOWN_EXTENSION: &str = "md";

/// Contents of the README written into a freshly created notebook.
pub fn readme_template(name: &str) -> String {
    format!("# {name}\n\nThis is the description document of the {name} notebook.")
}

/// Contents of a freshly created document: a level-1 heading with its stem.
pub fn document_template(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("# {stem}\n\n")
}

/// Append the `.md` extension unless the name already carries it.
pub fn document_file_name(name: &str) -> String {
    let name = name.trim();
    if is_markdown_file(Path::new(name)) {
        name.to_string()
    } else {
        format!("{name}.{MARKDOWN_EXTENSION}")
    }
}

pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

/// Trimmed name, or a message explaining why it cannot be used.
fn validate_name(name: &str) -> std::result::Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.contains(['/', '\\']) {
        return Err(format!("name \"{name}\" must not contain path separators"));
    }
    Ok(name.to_string())
}

/// Create `<parent>/<name>` with a README and return the notebook path.
pub fn create_notebook(parent: &Path, name: &str) -> Result<PathBuf> {
    let name = validate_name(name).map_err(AppError::Notebook)?;
    let path = parent.join(&name);
    if path.exists() {
        return Err(AppError::Notebook(format!("{} already exists", path.display())));
    }

    fs::create_dir_all(&path)?;
    fs::write(path.join(README_FILE), readme_template(&name))?;
    log::info!("Created notebook {}", path.display());
    Ok(path)
}

/// Create a new document at `path` holding the default template.
///
/// Refuses to overwrite an existing file.
pub fn create_document(path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::Document(format!("invalid document path {}", path.display())))?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                AppError::Document(format!("{} already exists", path.display()))
            }
            _ => AppError::Io(e),
        })?;
    file.write_all(document_template(file_name).as_bytes())?;
    log::info!("Created document {}", path.display());
    Ok(())
}

/// Path for a new document called `name` inside `notebook`.
pub fn document_path_in(notebook: &Path, name: &str) -> Result<PathBuf> {
    let name = validate_name(name).map_err(AppError::Document)?;
    Ok(notebook.join(document_file_name(&name)))
}

/// All Markdown files below `notebook`, sorted by path.
///
/// Symlinked directories are not followed.
pub fn markdown_files(notebook: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![notebook.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if is_markdown_file(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// The document to show when a notebook is opened: its README if present,
/// otherwise the first Markdown file found, otherwise nothing.
pub fn entry_document(notebook: &Path) -> Result<Option<PathBuf>> {
    if !notebook.is_dir() {
        return Err(AppError::Notebook(format!("{} is not a folder", notebook.display())));
    }

    let readme = notebook.join(README_FILE);
    if readme.is_file() {
        return Ok(Some(readme));
    }
    Ok(markdown_files(notebook)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_document_file_name() {
        assert_eq!(document_file_name("plan"), "plan.md");
        assert_eq!(document_file_name("plan.md"), "plan.md");
        assert_eq!(document_file_name("  spaced  "), "spaced.md");
        assert_eq!(document_file_name("notes.txt"), "notes.txt.md");
        assert_eq!(document_file_name("Plan.MD"), "Plan.MD");
        assert_eq!(document_file_name("Plan.Md"), "Plan.Md");
    }

    #[test]
    fn test_templates() {
        assert_eq!(document_template("plan.md"), "# plan\n\n");
        assert_eq!(
            readme_template("Work"),
            "# Work\n\nThis is the description document of the Work notebook."
        );
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("a.md")));
        assert!(is_markdown_file(Path::new("A.MD")));
        assert!(!is_markdown_file(Path::new("a.markdown")));
        assert!(!is_markdown_file(Path::new("md")));
    }

    #[test]
    fn test_create_notebook_writes_readme() {
        let dir = TempDir::new().unwrap();
        let nb = create_notebook(dir.path(), "Work").unwrap();
        assert!(nb.is_dir());
        let readme = fs::read_to_string(nb.join(README_FILE)).unwrap();
        assert!(readme.starts_with("# Work\n"));
        assert_eq!(entry_document(&nb).unwrap(), Some(nb.join(README_FILE)));
    }

    #[test]
    fn test_create_notebook_rejects_existing_and_bad_names() {
        let dir = TempDir::new().unwrap();
        create_notebook(dir.path(), "Work").unwrap();
        assert!(matches!(create_notebook(dir.path(), "Work"), Err(AppError::Notebook(_))));
        assert!(matches!(create_notebook(dir.path(), "  "), Err(AppError::Notebook(_))));
        assert!(matches!(create_notebook(dir.path(), "a/b"), Err(AppError::Notebook(_))));
    }

    #[test]
    fn test_create_document_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = document_path_in(dir.path(), "idea").unwrap();
        assert_eq!(path, dir.path().join("idea.md"));

        create_document(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# idea\n\n");

        fs::write(&path, "keep me").unwrap();
        assert!(matches!(create_document(&path), Err(AppError::Document(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        assert!(matches!(document_path_in(dir.path(), ""), Err(AppError::Document(_))));
    }

    #[test]
    fn test_markdown_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("b.md"), "").unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::write(root.join("sub/c.md"), "").unwrap();
        fs::write(root.join("sub/deeper/a.md"), "").unwrap();

        let files = markdown_files(root).unwrap();
        assert_eq!(
            files,
            vec![root.join("b.md"), root.join("sub/c.md"), root.join("sub/deeper/a.md")]
        );
    }

    #[test]
    fn test_entry_document_without_readme() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("x")).unwrap();
        fs::write(dir.path().join("x/z.md"), "").unwrap();
        fs::write(dir.path().join("m.md"), "").unwrap();
        assert_eq!(entry_document(dir.path()).unwrap(), Some(dir.path().join("m.md")));
    }

    #[test]
    fn test_entry_document_empty_notebook() {
        let dir = TempDir::new().unwrap();
        assert_eq!(entry_document(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_entry_document_requires_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.md");
        fs::write(&file, "").unwrap();
        assert!(matches!(entry_document(&file), Err(AppError::Notebook(_))));
    }
}

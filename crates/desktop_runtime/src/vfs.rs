//! In-memory virtual filesystem behind the file-explorer app.
//!
//! Each path has a fixed list of seed entries followed by user-created entries in creation order.
//! Nothing is persisted and nothing is ever deleted. Duplicate names at one path are allowed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOME_PATH: &str = "home";
pub const DESKTOP_PATH: &str = "desktop";
pub const DOCUMENTS_PATH: &str = "documents";
pub const DOWNLOADS_PATH: &str = "downloads";

pub const SEED_PATHS: [&str; 4] = [HOME_PATH, DESKTOP_PATH, DOCUMENTS_PATH, DOWNLOADS_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    pub fn default_icon(self) -> &'static str {
        match self {
            Self::File => "fas fa-file",
            Self::Folder => "fas fa-folder",
        }
    }

    fn default_size_label(self) -> &'static str {
        match self {
            Self::File => "0 KB",
            Self::Folder => "--",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    pub icon: String,
    pub size_label: String,
    pub parent_path: String,
    /// Creation time for user entries; seeds have none.
    pub created_at_ms: Option<u64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("entry name must not be blank")]
    BlankName,
    #[error("entry path must not be blank")]
    BlankPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VirtualFileSystem {
    user_entries: BTreeMap<String, Vec<VfsEntry>>,
}

impl VirtualFileSystem {
    /// Seed entries for `path` followed by user-created ones, in creation order.
    pub fn list_children(&self, path: &str) -> Vec<VfsEntry> {
        let mut children = seed_entries(path);
        if let Some(created) = self.user_entries.get(path) {
            children.extend(created.iter().cloned());
        }
        children
    }

    /// Appends a new entry under `path`. The name is trimmed; duplicates are not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError`] when the name or path is blank.
    pub fn create_entry(
        &mut self,
        path: &str,
        name: &str,
        kind: EntryKind,
        created_at_ms: u64,
    ) -> Result<VfsEntry, VfsError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(VfsError::BlankPath);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(VfsError::BlankName);
        }

        let entry = VfsEntry {
            name: name.to_string(),
            kind,
            icon: kind.default_icon().to_string(),
            size_label: kind.default_size_label().to_string(),
            parent_path: path.to_string(),
            created_at_ms: Some(created_at_ms),
        };
        self.user_entries
            .entry(path.to_string())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    pub fn user_entry_count(&self) -> usize {
        self.user_entries.values().map(Vec::len).sum()
    }
}

fn seed(path: &str, name: &str, kind: EntryKind, icon: &str, size: &str) -> VfsEntry {
    VfsEntry {
        name: name.to_string(),
        kind,
        icon: icon.to_string(),
        size_label: size.to_string(),
        parent_path: path.to_string(),
        created_at_ms: None,
    }
}

fn seed_entries(path: &str) -> Vec<VfsEntry> {
    use EntryKind::{File, Folder};

    let rows: &[(&str, EntryKind, &str, &str)] = match path {
        HOME_PATH => &[
            ("Documents", Folder, "fas fa-folder", "--"),
            ("Downloads", Folder, "fas fa-folder", "--"),
            ("Pictures", Folder, "fas fa-folder", "--"),
            ("Music", Folder, "fas fa-folder", "--"),
            ("Videos", Folder, "fas fa-folder", "--"),
        ],
        DESKTOP_PATH => &[
            ("File Explorer", File, "fas fa-folder", "2.5 MB"),
            ("Notepad", File, "fas fa-sticky-note", "1.8 MB"),
            ("Calculator", File, "fas fa-calculator", "3.2 MB"),
            ("Browser", File, "fas fa-globe", "4.1 MB"),
        ],
        DOCUMENTS_PATH => &[
            ("Project Report.docx", File, "fas fa-file-word", "2.3 MB"),
            ("Budget.xlsx", File, "fas fa-file-excel", "1.7 MB"),
            ("Presentation.pptx", File, "fas fa-file-powerpoint", "5.2 MB"),
            ("Notes.txt", File, "fas fa-file-alt", "0.1 MB"),
        ],
        DOWNLOADS_PATH => &[
            ("image.jpg", File, "fas fa-file-image", "3.8 MB"),
            ("video.mp4", File, "fas fa-file-video", "15.7 MB"),
            ("archive.zip", File, "fas fa-file-archive", "8.9 MB"),
            ("document.pdf", File, "fas fa-file-pdf", "2.1 MB"),
        ],
        _ => &[],
    };

    rows.iter()
        .map(|(name, kind, icon, size)| seed(path, name, *kind, icon, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(entries: &[VfsEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn seed_directories_exist_at_startup() {
        let fs = VirtualFileSystem::default();
        for path in SEED_PATHS {
            assert!(!fs.list_children(path).is_empty(), "{path} should be seeded");
        }
        assert!(fs.list_children("pictures").is_empty());
    }

    #[test]
    fn created_entry_is_appended_after_seeds() {
        let mut fs = VirtualFileSystem::default();
        let created = fs
            .create_entry(HOME_PATH, "Reports", EntryKind::Folder, 1_000)
            .expect("create");

        let children = fs.list_children(HOME_PATH);
        assert_eq!(
            names(&children),
            vec!["Documents", "Downloads", "Pictures", "Music", "Videos", "Reports"]
        );
        let last = children.last().expect("entry");
        assert_eq!(last, &created);
        assert_eq!(last.kind, EntryKind::Folder);
        assert_eq!(last.size_label, "--");
        assert_eq!(last.created_at_ms, Some(1_000));
    }

    #[test]
    fn duplicate_names_at_one_path_are_kept() {
        let mut fs = VirtualFileSystem::default();
        fs.create_entry(DOCUMENTS_PATH, "todo.txt", EntryKind::File, 1)
            .expect("first");
        fs.create_entry(DOCUMENTS_PATH, "todo.txt", EntryKind::File, 2)
            .expect("second");

        let todo: Vec<_> = fs
            .list_children(DOCUMENTS_PATH)
            .into_iter()
            .filter(|e| e.name == "todo.txt")
            .collect();
        assert_eq!(todo.len(), 2);
        assert_eq!(todo[0].created_at_ms, Some(1));
        assert_eq!(todo[1].created_at_ms, Some(2));
        assert_eq!(fs.user_entry_count(), 2);
    }

    #[test]
    fn entries_at_unseeded_paths_and_trimmed_names() {
        let mut fs = VirtualFileSystem::default();
        let entry = fs
            .create_entry("reports", "  q3.txt ", EntryKind::File, 5)
            .expect("create");
        assert_eq!(entry.name, "q3.txt");
        assert_eq!(entry.icon, "fas fa-file");
        assert_eq!(names(&fs.list_children("reports")), vec!["q3.txt"]);
    }

    #[test]
    fn blank_names_and_paths_are_rejected() {
        let mut fs = VirtualFileSystem::default();
        assert_eq!(
            fs.create_entry(HOME_PATH, "   ", EntryKind::File, 0),
            Err(VfsError::BlankName)
        );
        assert_eq!(
            fs.create_entry("", "x", EntryKind::File, 0),
            Err(VfsError::BlankPath)
        );
        assert_eq!(fs.user_entry_count(), 0);
    }
}

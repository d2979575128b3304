//! File-explorer view state over the virtual filesystem.

use serde::{Deserialize, Serialize};

use crate::vfs::{self, EntryKind, VfsEntry};

/// Sidebar destinations as `(label, path)`.
pub const SIDEBAR_LOCATIONS: [(&str, &str); 4] = [
    ("Home", vfs::HOME_PATH),
    ("Desktop", vfs::DESKTOP_PATH),
    ("Documents", vfs::DOCUMENTS_PATH),
    ("Downloads", vfs::DOWNLOADS_PATH),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerState {
    pub current_path: String,
    /// Breadcrumb label shown above the file grid.
    pub location_label: String,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            current_path: vfs::HOME_PATH.to_string(),
            location_label: "Home".to_string(),
        }
    }
}

impl ExplorerState {
    /// Jumps to a sidebar path; unknown paths keep the raw path as their label.
    pub fn navigate(&mut self, path: &str) {
        self.location_label = SIDEBAR_LOCATIONS
            .iter()
            .find(|(_, known)| *known == path)
            .map(|(label, _)| (*label).to_string())
            .unwrap_or_else(|| path.to_string());
        self.current_path = path.to_string();
    }

    /// Opens a folder entry by substituting its lower-cased name as the new path.
    ///
    /// Returns `false` (and stays put) for non-folder entries.
    pub fn open_entry(&mut self, entry: &VfsEntry) -> bool {
        if entry.kind != EntryKind::Folder {
            return false;
        }
        self.current_path = entry.name.to_lowercase();
        self.location_label = entry.name.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::vfs::VirtualFileSystem;

    #[test]
    fn opening_folder_navigates_to_lowercased_name() {
        let fs = VirtualFileSystem::default();
        let mut explorer = ExplorerState::default();
        let documents = fs
            .list_children(vfs::HOME_PATH)
            .into_iter()
            .find(|e| e.name == "Documents")
            .expect("seed folder");

        assert!(explorer.open_entry(&documents));
        assert_eq!(explorer.current_path, "documents");
        assert_eq!(explorer.location_label, "Documents");
    }

    #[test]
    fn files_do_not_navigate() {
        let fs = VirtualFileSystem::default();
        let mut explorer = ExplorerState::default();
        let notes = fs
            .list_children(vfs::DOCUMENTS_PATH)
            .into_iter()
            .find(|e| e.name == "Notes.txt")
            .expect("seed file");

        assert!(!explorer.open_entry(&notes));
        assert_eq!(explorer, ExplorerState::default());
    }

    #[test]
    fn sidebar_navigation_uses_known_labels() {
        let mut explorer = ExplorerState::default();
        explorer.navigate(vfs::DOWNLOADS_PATH);
        assert_eq!(explorer.location_label, "Downloads");
        explorer.navigate("pictures");
        assert_eq!(explorer.location_label, "pictures");
        assert_eq!(explorer.current_path, "pictures");
    }
}

//! App registry built from the generated manifest catalog, plus per-app content state.

pub mod browser;
pub mod calculator;
pub mod explorer;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::model::{AppId, WindowRect};

pub use browser::{BrowserPage, BrowserState};
pub use calculator::{CalculatorKey, CalculatorState};
pub use explorer::ExplorerState;

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

pub const FALLBACK_APP_TITLE: &str = "Unknown App";
pub const FALLBACK_APP_ICON: &str = "fas fa-question";

#[derive(Debug, Clone, Deserialize)]
struct CatalogWindowDefaults {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    app_id: String,
    title: String,
    icon: String,
    content: String,
    show_in_launcher: bool,
    show_on_desktop: bool,
    window_defaults: CatalogWindowDefaults,
}

/// Which content template a descriptor instantiates for a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Explorer,
    Notepad,
    Calculator,
    Browser,
    Settings,
    MusicPlayer,
    SystemMonitor,
    Placeholder,
}

impl ContentKind {
    fn from_manifest(raw: &str) -> Self {
        match raw {
            "explorer" => Self::Explorer,
            "notepad" => Self::Notepad,
            "calculator" => Self::Calculator,
            "browser" => Self::Browser,
            "settings" => Self::Settings,
            "music-player" => Self::MusicPlayer,
            "system-monitor" => Self::SystemMonitor,
            _ => Self::Placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub content: ContentKind,
    pub show_in_launcher: bool,
    pub show_on_desktop: bool,
    pub window_defaults: WindowRect,
}

impl AppDescriptor {
    /// Descriptor used for identifiers missing from the catalog.
    pub fn fallback(app_id: &AppId) -> Self {
        Self {
            app_id: app_id.clone(),
            title: FALLBACK_APP_TITLE.to_string(),
            icon: FALLBACK_APP_ICON.to_string(),
            content: ContentKind::Placeholder,
            show_in_launcher: false,
            show_on_desktop: false,
            window_defaults: WindowRect::default(),
        }
    }

    /// Fresh content state for a new session of this app.
    pub fn instantiate_content(&self) -> AppContent {
        match self.content {
            ContentKind::Explorer => AppContent::Explorer(ExplorerState::default()),
            ContentKind::Notepad => AppContent::Notepad {
                text: String::new(),
            },
            ContentKind::Calculator => AppContent::Calculator(CalculatorState::default()),
            ContentKind::Browser => AppContent::Browser(BrowserState::default()),
            ContentKind::Settings => AppContent::Settings,
            ContentKind::MusicPlayer => AppContent::MusicPlayer,
            ContentKind::SystemMonitor => AppContent::SystemMonitor,
            ContentKind::Placeholder => AppContent::Placeholder {
                message: format!("No content is registered for `{}`.", self.app_id),
            },
        }
    }
}

/// Per-session content state owned by the session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AppContent {
    Explorer(ExplorerState),
    Notepad { text: String },
    Calculator(CalculatorState),
    Browser(BrowserState),
    Settings,
    MusicPlayer,
    SystemMonitor,
    Placeholder { message: String },
}

fn catalog() -> &'static [AppDescriptor] {
    static CATALOG: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let entries: Vec<CatalogEntry> = serde_json::from_str(APP_MANIFEST_CATALOG_JSON)
            .expect("generated app manifest catalog should parse");
        entries
            .into_iter()
            .map(|entry| AppDescriptor {
                app_id: AppId::new(entry.app_id),
                title: entry.title,
                icon: entry.icon,
                content: ContentKind::from_manifest(&entry.content),
                show_in_launcher: entry.show_in_launcher,
                show_on_desktop: entry.show_on_desktop,
                window_defaults: WindowRect {
                    x: entry.window_defaults.x,
                    y: entry.window_defaults.y,
                    w: entry.window_defaults.width,
                    h: entry.window_defaults.height,
                },
            })
            .collect()
    })
}

/// Every registered app, sorted by identifier.
pub fn app_registry() -> &'static [AppDescriptor] {
    catalog()
}

/// Looks up `app_id`, falling back to the "Unknown App" descriptor.
pub fn app_descriptor(app_id: &AppId) -> AppDescriptor {
    app_registry()
        .iter()
        .find(|entry| &entry.app_id == app_id)
        .cloned()
        .unwrap_or_else(|| AppDescriptor::fallback(app_id))
}

pub fn is_registered(app_id: &AppId) -> bool {
    app_registry().iter().any(|entry| &entry.app_id == app_id)
}

pub fn launcher_apps() -> Vec<&'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_in_launcher)
        .collect()
}

pub fn desktop_icon_apps() -> Vec<&'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_on_desktop)
        .collect()
}

/// Most results the launcher search returns.
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Shell actions reachable from the launcher search. Each one opens the settings app.
const SEARCH_ACTIONS: [(&str, &str); 3] = [
    ("Settings", "fas fa-cog"),
    ("Change Wallpaper", "fas fa-images"),
    ("Personalization", "fas fa-palette"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Application,
    SystemAction,
}

impl SearchKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::SystemAction => "System Action",
        }
    }
}

/// One launcher search hit and the app it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub label: String,
    pub icon: String,
    pub kind: SearchKind,
    pub opens: AppId,
}

/// Case-insensitive substring search over launcher apps, then shell actions.
///
/// A blank query matches nothing. At most [`SEARCH_RESULT_LIMIT`] results are returned.
pub fn search(query: &str) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let apps = launcher_apps()
        .into_iter()
        .filter(|app| app.title.to_lowercase().contains(&needle))
        .map(|app| SearchResult {
            label: app.title.clone(),
            icon: app.icon.clone(),
            kind: SearchKind::Application,
            opens: app.app_id.clone(),
        });
    let actions = SEARCH_ACTIONS
        .into_iter()
        .filter(|(label, _)| label.to_lowercase().contains(&needle))
        .map(|(label, icon)| SearchResult {
            label: label.to_string(),
            icon: icon.to_string(),
            kind: SearchKind::SystemAction,
            opens: AppId::from("settings"),
        });

    apps.chain(actions).take(SEARCH_RESULT_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_contains_every_manifest_in_id_order() {
        let ids: Vec<&str> = app_registry().iter().map(|d| d.app_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "browser",
                "calculator",
                "file-explorer",
                "music-player",
                "notepad",
                "settings",
                "system-monitor",
            ]
        );
    }

    #[test]
    fn known_descriptor_carries_manifest_metadata() {
        let explorer = app_descriptor(&AppId::from("file-explorer"));
        assert_eq!(explorer.title, "File Explorer");
        assert_eq!(explorer.icon, "fas fa-folder");
        assert_eq!(explorer.content, ContentKind::Explorer);
        assert_eq!(
            explorer.window_defaults,
            WindowRect {
                x: 50,
                y: 50,
                w: 600,
                h: 400
            }
        );
    }

    #[test]
    fn unknown_identifier_resolves_to_fallback() {
        let unknown = AppId::from("paint");
        let descriptor = app_descriptor(&unknown);
        assert!(!is_registered(&unknown));
        assert_eq!(descriptor.title, FALLBACK_APP_TITLE);
        assert_eq!(descriptor.icon, FALLBACK_APP_ICON);
        assert!(matches!(
            descriptor.instantiate_content(),
            AppContent::Placeholder { ref message } if message.contains("paint")
        ));
    }

    #[test]
    fn desktop_icons_are_a_subset_of_launcher_apps() {
        let desktop: Vec<&str> = desktop_icon_apps()
            .iter()
            .map(|d| d.app_id.as_str())
            .collect();
        assert_eq!(
            desktop,
            vec!["browser", "calculator", "file-explorer", "notepad", "settings"]
        );
        assert_eq!(launcher_apps().len(), app_registry().len());
    }

    #[test]
    fn content_templates_start_empty() {
        let browser = app_descriptor(&AppId::from("browser")).instantiate_content();
        assert_eq!(browser, AppContent::Browser(BrowserState::default()));
        let notepad = app_descriptor(&AppId::from("notepad")).instantiate_content();
        assert_eq!(
            notepad,
            AppContent::Notepad {
                text: String::new()
            }
        );
    }

    #[test]
    fn search_matches_titles_case_insensitively() {
        let hits = search("  NOTE ");
        assert_eq!(
            hits,
            vec![SearchResult {
                label: "Notepad".to_string(),
                icon: "fas fa-sticky-note".to_string(),
                kind: SearchKind::Application,
                opens: AppId::from("notepad"),
            }]
        );
        assert!(search("").is_empty());
        assert!(search("   ").is_empty());
        assert!(search("spreadsheet").is_empty());
    }

    #[test]
    fn search_lists_apps_before_shell_actions() {
        let hits: Vec<(String, SearchKind)> = search("settings")
            .into_iter()
            .map(|hit| (hit.label, hit.kind))
            .collect();
        assert_eq!(
            hits,
            vec![
                ("System Settings".to_string(), SearchKind::Application),
                ("Settings".to_string(), SearchKind::SystemAction),
            ]
        );

        let wallpaper = search("wallpaper");
        assert_eq!(wallpaper.len(), 1);
        assert_eq!(wallpaper[0].kind, SearchKind::SystemAction);
        assert_eq!(wallpaper[0].opens, AppId::from("settings"));
    }

    #[test]
    fn search_caps_results() {
        // Six launcher titles and all three shell actions contain "e".
        let hits: Vec<(String, SearchKind)> = search("e")
            .into_iter()
            .map(|hit| (hit.label, hit.kind))
            .collect();
        assert_eq!(hits.len(), SEARCH_RESULT_LIMIT);
        assert_eq!(
            hits[5],
            ("System Monitor".to_string(), SearchKind::Application)
        );
        assert_eq!(
            &hits[6..],
            &[
                ("Settings".to_string(), SearchKind::SystemAction),
                ("Change Wallpaper".to_string(), SearchKind::SystemAction),
            ]
        );
    }
}

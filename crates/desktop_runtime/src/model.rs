use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::apps::{self, AppContent};
use crate::preferences::ShellPreferences;
use crate::vfs::VirtualFileSystem;

pub const DEFAULT_WINDOW_WIDTH: i32 = 600;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;
pub const DEFAULT_SCREEN_WIDTH: i32 = 1024;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 768;
pub const DEFAULT_TASKBAR_HEIGHT_PX: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Stable application identifier (for example `"file-explorer"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 50,
            y: 50,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

/// Returns the content area left above a taskbar of `taskbar_height_px` on a screen.
pub fn content_area(screen_w: i32, screen_h: i32, taskbar_height_px: i32) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: screen_w.max(1),
        h: (screen_h - taskbar_height_px).max(1),
    }
}

/// Visible state of a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}

impl WindowState {
    /// Whether the window is on screen (and therefore a focus candidate).
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Minimized)
    }
}

/// Session lifecycle phase as reported in [`LifecycleEvent`]s.
///
/// `None` is "no session yet" and `Closed` is "session released".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    None,
    Normal,
    Minimized,
    Maximized,
    Closed,
}

impl From<WindowState> for SessionPhase {
    fn from(state: WindowState) -> Self {
        match state {
            WindowState::Normal => Self::Normal,
            WindowState::Minimized => Self::Minimized,
            WindowState::Maximized => Self::Maximized,
        }
    }
}

/// One running application instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub app_id: AppId,
    pub window_id: WindowId,
    pub title: String,
    pub icon_id: String,
    /// Last explicit normal-state geometry. Maximized sessions keep it untouched.
    pub rect: WindowRect,
    pub state: WindowState,
    pub z_index: u64,
    pub content: AppContent,
}

impl SessionRecord {
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Geometry the window renders at inside `viewport`.
    pub fn frame(&self, viewport: WindowRect) -> WindowRect {
        match self.state {
            WindowState::Maximized => viewport,
            WindowState::Normal | WindowState::Minimized => self.rect,
        }
    }
}

/// Transition notice consumed by rendering layers and the taskbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub app_id: AppId,
    pub window_id: WindowId,
    pub previous: SessionPhase,
    pub next: SessionPhase,
    /// Rank after the transition; `None` once the session is closed.
    pub z_index: Option<u64>,
}

/// The single owned aggregate of shell state. Only the reducer mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellState {
    pub next_window_id: u64,
    pub next_z_index: u64,
    /// Live sessions in creation order.
    pub sessions: Vec<SessionRecord>,
    pub screen: ScreenSize,
    /// Content area available to windows (screen minus taskbar).
    pub viewport: WindowRect,
    pub start_menu_open: bool,
    pub selected_icons: BTreeSet<AppId>,
    /// Desktop icon labels renamed by the user.
    pub icon_labels: BTreeMap<AppId, String>,
    /// Desktop icons the user deleted.
    pub hidden_icons: BTreeSet<AppId>,
    pub preferences: ShellPreferences,
    pub vfs: VirtualFileSystem,
}

/// A desktop icon as currently shown, after user renames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub app_id: AppId,
    pub label: String,
    pub icon: String,
}

impl Default for ShellState {
    fn default() -> Self {
        let preferences = ShellPreferences::default();
        let screen = ScreenSize::default();
        Self {
            next_window_id: 1,
            next_z_index: 1,
            sessions: Vec::new(),
            screen,
            viewport: content_area(
                screen.width,
                screen.height,
                preferences.customization.taskbar_height,
            ),
            start_menu_open: false,
            selected_icons: BTreeSet::new(),
            icon_labels: BTreeMap::new(),
            hidden_icons: BTreeSet::new(),
            preferences,
            vfs: VirtualFileSystem::default(),
        }
    }
}

impl ShellState {
    /// Recomputes the content area from the screen and the taskbar height.
    pub fn refresh_viewport(&mut self) {
        self.viewport = content_area(
            self.screen.width,
            self.screen.height,
            self.preferences.customization.taskbar_height,
        );
    }

    pub fn session(&self, app_id: &AppId) -> Option<&SessionRecord> {
        self.sessions.iter().find(|s| &s.app_id == app_id)
    }

    pub fn session_by_window(&self, window_id: WindowId) -> Option<&SessionRecord> {
        self.sessions.iter().find(|s| s.window_id == window_id)
    }

    pub fn is_running(&self, app_id: &AppId) -> bool {
        self.session(app_id).is_some()
    }

    /// The visible session holding the highest z-order rank.
    pub fn focused_session(&self) -> Option<&SessionRecord> {
        self.sessions
            .iter()
            .filter(|s| s.is_visible())
            .max_by_key(|s| s.z_index)
    }

    pub fn focused_app_id(&self) -> Option<&AppId> {
        self.focused_session().map(|s| &s.app_id)
    }

    /// Desktop icons still on the desktop, in registry order.
    pub fn desktop_icons(&self) -> Vec<DesktopIcon> {
        apps::desktop_icon_apps()
            .into_iter()
            .filter(|app| !self.hidden_icons.contains(&app.app_id))
            .map(|app| DesktopIcon {
                app_id: app.app_id.clone(),
                label: self
                    .icon_labels
                    .get(&app.app_id)
                    .cloned()
                    .unwrap_or_else(|| app.title.clone()),
                icon: app.icon.clone(),
            })
            .collect()
    }

    pub fn desktop_icon(&self, app_id: &AppId) -> Option<DesktopIcon> {
        self.desktop_icons()
            .into_iter()
            .find(|icon| &icon.app_id == app_id)
    }

    /// Sessions ordered bottom-to-top for rendering.
    pub fn stacking_order(&self) -> Vec<&SessionRecord> {
        let mut ordered: Vec<&SessionRecord> = self.sessions.iter().collect();
        ordered.sort_by_key(|s| s.z_index);
        ordered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// In-flight title-bar drag. `preview` is rendered but not committed until the drag ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub app_id: AppId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    pub preview: WindowRect,
}

/// In-flight edge/corner resize. Same commit rule as [`DragSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub app_id: AppId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    pub preview: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    /// Geometry to render for `app_id` while a gesture is in flight.
    pub fn preview_for(&self, app_id: &AppId) -> Option<WindowRect> {
        if let Some(drag) = self.dragging.as_ref().filter(|d| &d.app_id == app_id) {
            return Some(drag.preview);
        }
        self.resizing
            .as_ref()
            .filter(|r| &r.app_id == app_id)
            .map(|r| r.preview)
    }
}

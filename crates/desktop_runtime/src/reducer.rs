//! Reducer actions, side-effect intents, and transition logic for the desktop shell.

mod appearance;

use platform_host::{Personality, Severity};
use thiserror::Error;

use crate::apps::{self, browser::PAGE_LOAD_DELAY_MS, AppContent, CalculatorKey};
use crate::model::{
    AppId, DragSession, InteractionState, LifecycleEvent, PointerPosition, ResizeEdge,
    ResizeSession, SessionPhase, SessionRecord, ShellState, WindowId, WindowRect, WindowState,
};
use crate::preferences::{
    AnimationSpeed, Customization, PreferenceKey, ShellPreferences, ThemeMode,
};
use crate::scheduler::DeferredTask;
use crate::vfs::{EntryKind, VfsEntry, VfsError};
use crate::window_manager::{
    clamp_to_viewport, focus_session, minimize_session, next_z_index, resize_within_viewport,
};

/// Longest label a desktop icon may carry.
pub const ICON_NAME_MAX_CHARS: usize = 20;

const OPEN_ANNOUNCEMENTS: [&str; 6] = [
    "Opening {app} for you!",
    "{app} is ready to serve you!",
    "Welcome to {app}!",
    "Your {app} is launching!",
    "Let's get started with {app}!",
    "{app} is here to help you!",
];

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`ShellState`].
pub enum DesktopAction {
    /// Open an app, or focus it when a session already exists.
    OpenApp { app_id: AppId },
    /// Raise a session, restoring it when minimized.
    FocusApp { app_id: AppId },
    MinimizeApp { app_id: AppId },
    /// Toggle between normal and maximized.
    MaximizeApp { app_id: AppId },
    CloseApp { app_id: AppId },
    /// Close the focused session, if any.
    CloseTopmost,
    /// Minimize every visible session ("show desktop").
    MinimizeAll,
    ToggleStartMenu,
    CloseStartMenu,
    /// Select a desktop icon; `additive` keeps the existing selection (ctrl-click).
    SelectDesktopIcon { app_id: AppId, additive: bool },
    ClearIconSelection,
    /// Relabel a desktop icon; the name is trimmed and capped at [`ICON_NAME_MAX_CHARS`].
    RenameDesktopIcon { app_id: AppId, name: String },
    /// Remove an icon from the desktop. The app stays in the launcher.
    DeleteDesktopIcon { app_id: AppId },
    /// The browser window was resized.
    SetScreenSize { width: i32, height: i32 },
    BeginMove {
        app_id: AppId,
        pointer: PointerPosition,
    },
    UpdateMove { pointer: PointerPosition },
    EndMove,
    BeginResize {
        app_id: AppId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    },
    UpdateResize { pointer: PointerPosition },
    EndResize,
    ExplorerNavigate { app_id: AppId, path: String },
    ExplorerOpenEntry { app_id: AppId, entry: VfsEntry },
    /// Create an entry at the explorer's current path.
    ExplorerCreateEntry {
        app_id: AppId,
        name: String,
        kind: EntryKind,
        created_at_ms: u64,
    },
    BrowserNavigate { app_id: AppId, url: String },
    /// Deferred completion of a simulated page load.
    BrowserPageLoaded { window_id: WindowId, url: String },
    CalculatorInput { app_id: AppId, key: CalculatorKey },
    NotepadEdit { app_id: AppId, text: String },
    ToggleTheme,
    SetWallpaper { wallpaper_id: String },
    ApplySystemSettings {
        theme: ThemeMode,
        animation_speed: AnimationSpeed,
        notifications_enabled: bool,
    },
    ApplyLanguageSettings {
        language: String,
        date_format: String,
        time_format: String,
    },
    ApplyCustomization { customization: Customization },
    ResetCustomization,
    /// Replace preferences with values loaded at boot.
    HydratePreferences { preferences: ShellPreferences },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// A session changed phase; consumed by the taskbar and window rendering.
    Lifecycle(LifecycleEvent),
    Notify {
        message: String,
        severity: Severity,
    },
    Announce {
        message: String,
        personality: Personality,
    },
    ApplyVisualSetting {
        name: &'static str,
        value: String,
    },
    PersistPreference(PreferenceKey),
    ClearPreference(PreferenceKey),
    ScheduleTask {
        delay_ms: u64,
        owner: Option<WindowId>,
        task: DeferredTask,
    },
    /// Drop every deferred task owned by a closed window.
    CancelTasks { owner: WindowId },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that carry invalid user input.
pub enum ReducerError {
    #[error(transparent)]
    Vfs(#[from] VfsError),
    #[error("desktop icon name must be non-blank and differ from the current one")]
    InvalidIconName,
}

/// Applies a [`DesktopAction`] to the shell state and collects resulting side effects.
///
/// Transitions that reference an absent session are no-ops and return no effects.
///
/// # Errors
///
/// Returns [`ReducerError::Vfs`] when an explorer entry has a blank name, and
/// [`ReducerError::InvalidIconName`] when a desktop icon rename is blank or unchanged.
pub fn reduce_desktop(
    state: &mut ShellState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();

    let viewport = state.viewport;
    if appearance::reduce_preferences_action(state, &action, &mut effects) {
        if state.viewport != viewport {
            *interaction = InteractionState::default();
        }
        return Ok(effects);
    }

    match action {
        DesktopAction::OpenApp { app_id } => {
            if state.is_running(&app_id) {
                focus_app(state, &app_id, &mut effects);
            } else {
                open_app(state, app_id, &mut effects);
            }
        }
        DesktopAction::FocusApp { app_id } => focus_app(state, &app_id, &mut effects),
        DesktopAction::MinimizeApp { app_id } => {
            if let Some(event) = minimize_session(state, &app_id) {
                cancel_gestures_for(interaction, &app_id);
                effects.push(RuntimeEffect::Lifecycle(event));
                notify(state, &mut effects, "Window minimized", Severity::Info);
            }
        }
        DesktopAction::MaximizeApp { app_id } => {
            let Some(session) = session_mut(state, &app_id) else {
                return Ok(effects);
            };
            let next = match session.state {
                WindowState::Normal => WindowState::Maximized,
                WindowState::Maximized => WindowState::Normal,
                WindowState::Minimized => return Ok(effects),
            };
            let previous = SessionPhase::from(session.state);
            session.state = next;
            let event = LifecycleEvent {
                app_id: session.app_id.clone(),
                window_id: session.window_id,
                previous,
                next: next.into(),
                z_index: Some(session.z_index),
            };
            cancel_gestures_for(interaction, &app_id);
            effects.push(RuntimeEffect::Lifecycle(event));
        }
        DesktopAction::CloseApp { app_id } => {
            close_app(state, interaction, &app_id, &mut effects);
        }
        DesktopAction::CloseTopmost => {
            if let Some(app_id) = state.focused_app_id().cloned() {
                close_app(state, interaction, &app_id, &mut effects);
            }
        }
        DesktopAction::MinimizeAll => {
            let visible: Vec<AppId> = state
                .sessions
                .iter()
                .filter(|s| s.is_visible())
                .map(|s| s.app_id.clone())
                .collect();
            for app_id in visible {
                if let Some(event) = minimize_session(state, &app_id) {
                    effects.push(RuntimeEffect::Lifecycle(event));
                }
            }
            *interaction = InteractionState::default();
            notify(state, &mut effects, "Desktop shown", Severity::Info);
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::SelectDesktopIcon { app_id, additive } => {
            if additive {
                if !state.selected_icons.remove(&app_id) {
                    state.selected_icons.insert(app_id);
                }
            } else {
                state.selected_icons.clear();
                state.selected_icons.insert(app_id);
            }
        }
        DesktopAction::ClearIconSelection => {
            state.selected_icons.clear();
        }
        DesktopAction::RenameDesktopIcon { app_id, name } => {
            let Some(icon) = state.desktop_icon(&app_id) else {
                return Ok(effects);
            };
            let name: String = name.trim().chars().take(ICON_NAME_MAX_CHARS).collect();
            if name.is_empty() || name == icon.label {
                return Err(ReducerError::InvalidIconName);
            }
            notify(
                state,
                &mut effects,
                &format!("Renamed to: {name}"),
                Severity::Success,
            );
            state.icon_labels.insert(app_id, name);
        }
        DesktopAction::DeleteDesktopIcon { app_id } => {
            let Some(icon) = state.desktop_icon(&app_id) else {
                return Ok(effects);
            };
            state.selected_icons.remove(&app_id);
            state.hidden_icons.insert(app_id);
            notify(
                state,
                &mut effects,
                &format!("Deleted: {}", icon.label),
                Severity::Success,
            );
        }
        DesktopAction::SetScreenSize { width, height } => {
            state.screen.width = width;
            state.screen.height = height;
            state.refresh_viewport();
            clamp_sessions_into_viewport(state);
            // Gesture previews were computed against the old content area.
            *interaction = InteractionState::default();
        }
        DesktopAction::BeginMove { app_id, pointer } => {
            let Some(rect_start) = normal_rect(state, &app_id) else {
                return Ok(effects);
            };
            focus_app(state, &app_id, &mut effects);
            interaction.resizing = None;
            interaction.dragging = Some(DragSession {
                app_id,
                pointer_start: pointer,
                rect_start,
                preview: rect_start,
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(drag) = interaction.dragging.as_mut() {
                let dx = pointer.x - drag.pointer_start.x;
                let dy = pointer.y - drag.pointer_start.y;
                drag.preview = clamp_to_viewport(drag.rect_start.offset(dx, dy), state.viewport);
            }
        }
        DesktopAction::EndMove => {
            if let Some(drag) = interaction.dragging.take() {
                commit_rect(state, &drag.app_id, drag.preview);
            }
        }
        DesktopAction::BeginResize {
            app_id,
            edge,
            pointer,
        } => {
            let Some(rect_start) = normal_rect(state, &app_id) else {
                return Ok(effects);
            };
            focus_app(state, &app_id, &mut effects);
            interaction.dragging = None;
            interaction.resizing = Some(ResizeSession {
                app_id,
                edge,
                pointer_start: pointer,
                rect_start,
                preview: rect_start,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(resize) = interaction.resizing.as_mut() {
                let dx = pointer.x - resize.pointer_start.x;
                let dy = pointer.y - resize.pointer_start.y;
                resize.preview = resize_within_viewport(
                    resize.rect_start,
                    resize.edge,
                    dx,
                    dy,
                    state.viewport,
                );
            }
        }
        DesktopAction::EndResize => {
            if let Some(resize) = interaction.resizing.take() {
                commit_rect(state, &resize.app_id, resize.preview);
            }
        }
        DesktopAction::ExplorerNavigate { app_id, path } => {
            if let Some(AppContent::Explorer(explorer)) = content_mut(state, &app_id) {
                explorer.navigate(&path);
            }
        }
        DesktopAction::ExplorerOpenEntry { app_id, entry } => {
            if let Some(AppContent::Explorer(explorer)) = content_mut(state, &app_id) {
                explorer.open_entry(&entry);
            }
        }
        DesktopAction::ExplorerCreateEntry {
            app_id,
            name,
            kind,
            created_at_ms,
        } => {
            let Some(session) = state.session(&app_id) else {
                return Ok(effects);
            };
            let AppContent::Explorer(explorer) = &session.content else {
                return Ok(effects);
            };
            let path = explorer.current_path.clone();
            let entry = state.vfs.create_entry(&path, &name, kind, created_at_ms)?;
            let (toast, voice) = match kind {
                EntryKind::Folder => ("Created folder", "Folder"),
                EntryKind::File => ("Created file", "File"),
            };
            notify(
                state,
                &mut effects,
                &format!("{toast}: {}", entry.name),
                Severity::Success,
            );
            effects.push(RuntimeEffect::Announce {
                message: format!("{voice} {} created successfully!", entry.name),
                personality: Personality::Friendly,
            });
        }
        DesktopAction::BrowserNavigate { app_id, url } => {
            let Some(session) = session_mut(state, &app_id) else {
                return Ok(effects);
            };
            let window_id = session.window_id;
            let AppContent::Browser(browser) = &mut session.content else {
                return Ok(effects);
            };
            if let Some(url) = browser.begin_navigation(&url) {
                effects.push(RuntimeEffect::ScheduleTask {
                    delay_ms: PAGE_LOAD_DELAY_MS,
                    owner: Some(window_id),
                    task: DeferredTask::CompletePageLoad { window_id, url },
                });
            }
        }
        DesktopAction::BrowserPageLoaded { window_id, url } => {
            let session = state
                .sessions
                .iter_mut()
                .find(|s| s.window_id == window_id);
            if let Some(SessionRecord {
                content: AppContent::Browser(browser),
                ..
            }) = session
            {
                browser.complete_navigation(&url);
            }
        }
        DesktopAction::CalculatorInput { app_id, key } => {
            if let Some(AppContent::Calculator(calculator)) = content_mut(state, &app_id) {
                calculator.press(key);
            }
        }
        DesktopAction::NotepadEdit { app_id, text } => {
            if let Some(AppContent::Notepad { text: buffer }) = content_mut(state, &app_id) {
                *buffer = text;
            }
        }
        DesktopAction::ToggleTheme
        | DesktopAction::SetWallpaper { .. }
        | DesktopAction::ApplySystemSettings { .. }
        | DesktopAction::ApplyLanguageSettings { .. }
        | DesktopAction::ApplyCustomization { .. }
        | DesktopAction::ResetCustomization
        | DesktopAction::HydratePreferences { .. } => {}
    }

    Ok(effects)
}

fn open_app(state: &mut ShellState, app_id: AppId, effects: &mut Vec<RuntimeEffect>) {
    let descriptor = apps::app_descriptor(&app_id);
    let window_id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    let z_index = next_z_index(state);
    let record = SessionRecord {
        app_id: app_id.clone(),
        window_id,
        title: descriptor.title.clone(),
        icon_id: descriptor.icon.clone(),
        rect: clamp_to_viewport(descriptor.window_defaults, state.viewport),
        state: WindowState::Normal,
        z_index,
        content: descriptor.instantiate_content(),
    };
    state.sessions.push(record);
    state.start_menu_open = false;

    effects.push(RuntimeEffect::Lifecycle(LifecycleEvent {
        app_id,
        window_id,
        previous: SessionPhase::None,
        next: SessionPhase::Normal,
        z_index: Some(z_index),
    }));
    notify(
        state,
        effects,
        &format!("{} opened successfully!", descriptor.title),
        Severity::Info,
    );
    let line = OPEN_ANNOUNCEMENTS[(window_id.0 as usize) % OPEN_ANNOUNCEMENTS.len()];
    effects.push(RuntimeEffect::Announce {
        message: line.replace("{app}", &descriptor.title),
        personality: Personality::Enthusiastic,
    });
}

fn focus_app(state: &mut ShellState, app_id: &AppId, effects: &mut Vec<RuntimeEffect>) {
    let Some(event) = focus_session(state, app_id) else {
        return;
    };
    state.start_menu_open = false;
    let restored = event.previous == SessionPhase::Minimized;
    effects.push(RuntimeEffect::Lifecycle(event));
    if restored {
        let title = state
            .session(app_id)
            .map(|s| s.title.clone())
            .unwrap_or_default();
        notify(state, effects, &format!("{title} restored"), Severity::Info);
    }
}

fn close_app(
    state: &mut ShellState,
    interaction: &mut InteractionState,
    app_id: &AppId,
    effects: &mut Vec<RuntimeEffect>,
) {
    let Some(index) = state.sessions.iter().position(|s| &s.app_id == app_id) else {
        return;
    };
    let session = state.sessions.remove(index);
    cancel_gestures_for(interaction, app_id);

    effects.push(RuntimeEffect::Lifecycle(LifecycleEvent {
        app_id: session.app_id,
        window_id: session.window_id,
        previous: session.state.into(),
        next: SessionPhase::Closed,
        z_index: None,
    }));
    effects.push(RuntimeEffect::CancelTasks {
        owner: session.window_id,
    });
    notify(
        state,
        effects,
        &format!("{} closed", session.title),
        Severity::Info,
    );
}

pub(crate) fn notify(
    state: &ShellState,
    effects: &mut Vec<RuntimeEffect>,
    message: &str,
    severity: Severity,
) {
    if state.preferences.notifications_enabled {
        effects.push(RuntimeEffect::Notify {
            message: message.to_string(),
            severity,
        });
    }
}

pub(crate) fn clamp_sessions_into_viewport(state: &mut ShellState) {
    let viewport = state.viewport;
    for session in &mut state.sessions {
        session.rect = clamp_to_viewport(session.rect, viewport);
    }
}

fn session_mut<'a>(state: &'a mut ShellState, app_id: &AppId) -> Option<&'a mut SessionRecord> {
    state.sessions.iter_mut().find(|s| &s.app_id == app_id)
}

fn content_mut<'a>(state: &'a mut ShellState, app_id: &AppId) -> Option<&'a mut AppContent> {
    session_mut(state, app_id).map(|s| &mut s.content)
}

/// Geometry of a session that may be dragged or resized (normal state only).
fn normal_rect(state: &ShellState, app_id: &AppId) -> Option<WindowRect> {
    state
        .session(app_id)
        .filter(|s| s.state == WindowState::Normal)
        .map(|s| s.rect)
}

fn commit_rect(state: &mut ShellState, app_id: &AppId, rect: WindowRect) {
    if let Some(session) = session_mut(state, app_id) {
        if session.state == WindowState::Normal {
            session.rect = rect;
        }
    }
}

fn cancel_gestures_for(interaction: &mut InteractionState, app_id: &AppId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|d| &d.app_id == app_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|r| &r.app_id == app_id)
    {
        interaction.resizing = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::apps::{BrowserPage, CalculatorState};
    use crate::vfs;

    fn id(raw: &str) -> AppId {
        AppId::from(raw)
    }

    fn run(
        state: &mut ShellState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("reduce")
    }

    fn open(state: &mut ShellState, interaction: &mut InteractionState, raw: &str) {
        run(state, interaction, DesktopAction::OpenApp { app_id: id(raw) });
    }

    fn lifecycle(effects: &[RuntimeEffect]) -> Vec<&LifecycleEvent> {
        effects
            .iter()
            .filter_map(|e| match e {
                RuntimeEffect::Lifecycle(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    fn notifications(effects: &[RuntimeEffect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                RuntimeEffect::Notify { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn session<'a>(state: &'a ShellState, raw: &str) -> &'a SessionRecord {
        state.session(&id(raw)).expect("session")
    }

    fn assert_unique_topmost(state: &ShellState) {
        let mut ranks: Vec<u64> = state.sessions.iter().map(|s| s.z_index).collect();
        ranks.sort_unstable();
        ranks.dedup();
        assert_eq!(ranks.len(), state.sessions.len(), "ranks must be unique");
        if let Some(focused) = state.focused_session() {
            let top = state
                .sessions
                .iter()
                .filter(|s| s.is_visible() && s.z_index == focused.z_index)
                .count();
            assert_eq!(top, 1);
        }
    }

    #[test]
    fn open_creates_normal_session_and_announces() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        state.start_menu_open = true;

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_id: id("calculator"),
            },
        );

        let calc = session(&state, "calculator");
        assert_eq!(calc.state, WindowState::Normal);
        assert_eq!(calc.z_index, 1);
        assert_eq!(calc.window_id, WindowId(1));
        assert_eq!(calc.title, "Calculator");
        assert_eq!(calc.content, AppContent::Calculator(CalculatorState::default()));
        assert!(!state.start_menu_open);
        assert_eq!(
            lifecycle(&effects),
            vec![&LifecycleEvent {
                app_id: id("calculator"),
                window_id: WindowId(1),
                previous: SessionPhase::None,
                next: SessionPhase::Normal,
                z_index: Some(1),
            }]
        );
        assert_eq!(notifications(&effects), vec!["Calculator opened successfully!"]);
        assert!(effects.iter().any(|e| matches!(
            e,
            RuntimeEffect::Announce { personality: Personality::Enthusiastic, message }
                if message.contains("Calculator")
        )));
    }

    #[test]
    fn open_twice_is_equivalent_to_focus() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");
        open(&mut state, &mut interaction, "calculator");

        let mut focused_copy = state.clone();
        let mut focus_interaction = interaction.clone();
        let focus_effects = run(
            &mut focused_copy,
            &mut focus_interaction,
            DesktopAction::FocusApp {
                app_id: id("notepad"),
            },
        );
        let open_effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_id: id("notepad"),
            },
        );

        assert_eq!(state, focused_copy);
        assert_eq!(open_effects, focus_effects);
        assert_eq!(state.sessions.len(), 2);
        assert_eq!(state.focused_app_id(), Some(&id("notepad")));
    }

    #[test]
    fn session_scenario_keeps_focus_and_ranks_consistent() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();

        open(&mut state, &mut interaction, "calculator");
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(session(&state, "calculator").z_index, 1);

        open(&mut state, &mut interaction, "notepad");
        assert_eq!(state.sessions.len(), 2);
        assert!(session(&state, "notepad").z_index > session(&state, "calculator").z_index);
        assert_eq!(state.focused_app_id(), Some(&id("notepad")));

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp {
                app_id: id("notepad"),
            },
        );
        assert_eq!(session(&state, "notepad").state, WindowState::Minimized);
        assert_eq!(session(&state, "calculator").state, WindowState::Normal);
        assert_eq!(state.focused_app_id(), Some(&id("calculator")));
        assert_eq!(notifications(&effects), vec!["Window minimized"]);

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::FocusApp {
                app_id: id("notepad"),
            },
        );
        assert_eq!(session(&state, "notepad").state, WindowState::Normal);
        assert_eq!(session(&state, "notepad").z_index, 3);
        assert_eq!(state.focused_app_id(), Some(&id("notepad")));
        assert_eq!(notifications(&effects), vec!["Notepad restored"]);

        run(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: id("calculator"),
            },
        );
        assert_eq!(state.sessions.len(), 1);
        assert!(!state.is_running(&id("calculator")));
        assert_unique_topmost(&state);
    }

    #[test]
    fn most_recently_focused_session_is_the_unique_topmost() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        for raw in ["browser", "notepad", "calculator", "settings"] {
            open(&mut state, &mut interaction, raw);
        }
        let actions = [
            DesktopAction::FocusApp {
                app_id: id("browser"),
            },
            DesktopAction::MaximizeApp {
                app_id: id("notepad"),
            },
            DesktopAction::MinimizeApp {
                app_id: id("browser"),
            },
            DesktopAction::FocusApp {
                app_id: id("notepad"),
            },
            DesktopAction::CloseApp {
                app_id: id("settings"),
            },
        ];
        for action in actions {
            run(&mut state, &mut interaction, action);
            assert_unique_topmost(&state);
        }
        assert_eq!(state.focused_app_id(), Some(&id("notepad")));
        assert_eq!(state.next_z_index, 7);
    }

    #[test]
    fn maximize_toggles_and_restores_exact_geometry() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "browser");
        let before = session(&state, "browser").clone();

        run(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: id("browser"),
            },
        );
        let maximized = session(&state, "browser");
        assert_eq!(maximized.state, WindowState::Maximized);
        assert_eq!(maximized.frame(state.viewport), state.viewport);
        assert_eq!(maximized.z_index, before.z_index);

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: id("browser"),
            },
        );
        assert_eq!(session(&state, "browser"), &before);
        assert_eq!(lifecycle(&effects)[0].previous, SessionPhase::Maximized);
    }

    #[test]
    fn maximize_ignores_minimized_sessions() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");
        run(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp {
                app_id: id("notepad"),
            },
        );
        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: id("notepad"),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(session(&state, "notepad").state, WindowState::Minimized);
    }

    #[test]
    fn close_releases_session_and_cancels_tasks_then_is_a_noop() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "browser");

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: id("browser"),
            },
        );
        assert!(state.sessions.is_empty());
        assert_eq!(
            lifecycle(&effects)[0],
            &LifecycleEvent {
                app_id: id("browser"),
                window_id: WindowId(1),
                previous: SessionPhase::Normal,
                next: SessionPhase::Closed,
                z_index: None,
            }
        );
        assert!(effects.contains(&RuntimeEffect::CancelTasks {
            owner: WindowId(1)
        }));
        assert_eq!(notifications(&effects), vec!["Web Browser closed"]);

        let again = run(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: id("browser"),
            },
        );
        assert!(again.is_empty());
    }

    #[test]
    fn transitions_on_absent_sessions_are_silent() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        let ghost = id("notepad");
        for action in [
            DesktopAction::FocusApp {
                app_id: ghost.clone(),
            },
            DesktopAction::MinimizeApp {
                app_id: ghost.clone(),
            },
            DesktopAction::MaximizeApp {
                app_id: ghost.clone(),
            },
            DesktopAction::CloseApp {
                app_id: ghost.clone(),
            },
            DesktopAction::CloseTopmost,
        ] {
            assert!(run(&mut state, &mut interaction, action).is_empty());
        }
        assert_eq!(state, ShellState::default());
    }

    #[test]
    fn close_topmost_skips_minimized_sessions() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "calculator");
        open(&mut state, &mut interaction, "notepad");
        run(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp {
                app_id: id("notepad"),
            },
        );

        run(&mut state, &mut interaction, DesktopAction::CloseTopmost);
        assert!(!state.is_running(&id("calculator")));
        assert!(state.is_running(&id("notepad")));

        let effects = run(&mut state, &mut interaction, DesktopAction::CloseTopmost);
        assert!(effects.is_empty());
        assert!(state.is_running(&id("notepad")));
    }

    #[test]
    fn minimize_all_hides_every_visible_session() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        for raw in ["calculator", "notepad", "browser"] {
            open(&mut state, &mut interaction, raw);
        }
        run(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: id("browser"),
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp {
                app_id: id("calculator"),
            },
        );

        let effects = run(&mut state, &mut interaction, DesktopAction::MinimizeAll);
        assert!(state
            .sessions
            .iter()
            .all(|s| s.state == WindowState::Minimized));
        assert_eq!(lifecycle(&effects).len(), 2);
        assert_eq!(state.focused_session(), None);
        assert_eq!(notifications(&effects), vec!["Desktop shown"]);
    }

    #[test]
    fn unknown_app_opens_with_fallback_descriptor() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "paint");

        let paint = session(&state, "paint");
        assert_eq!(paint.title, apps::FALLBACK_APP_TITLE);
        assert_eq!(paint.icon_id, apps::FALLBACK_APP_ICON);
        assert!(matches!(paint.content, AppContent::Placeholder { .. }));
    }

    #[test]
    fn drag_preview_is_clamped_and_committed_at_end() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");
        let original = session(&state, "notepad").rect;

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                app_id: id("notepad"),
                pointer: PointerPosition { x: 100, y: 100 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 125, y: 140 },
            },
        );
        assert_eq!(session(&state, "notepad").rect, original);
        assert_eq!(
            interaction.preview_for(&id("notepad")),
            Some(original.offset(25, 40))
        );

        run(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: -5000, y: 5000 },
            },
        );
        run(&mut state, &mut interaction, DesktopAction::EndMove);

        let committed = session(&state, "notepad").rect;
        assert_eq!(committed.x, state.viewport.x);
        assert_eq!(committed.bottom(), state.viewport.bottom());
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn maximized_windows_do_not_drag() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");
        run(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: id("notepad"),
            },
        );
        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                app_id: id("notepad"),
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        assert!(effects.is_empty());
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn resize_respects_minimum_size() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                app_id: id("notepad"),
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 650, y: 450 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        run(&mut state, &mut interaction, DesktopAction::EndResize);

        let rect = session(&state, "notepad").rect;
        assert_eq!(
            rect,
            WindowRect {
                x: 50,
                y: 50,
                w: crate::window_manager::MIN_WINDOW_WIDTH,
                h: crate::window_manager::MIN_WINDOW_HEIGHT,
            }
        );
    }

    #[test]
    fn edge_resize_past_viewport_keeps_opposite_edge() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");
        let start = session(&state, "notepad").rect;

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                app_id: id("notepad"),
                edge: ResizeEdge::East,
                pointer: PointerPosition { x: 650, y: 200 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: 1250, y: 200 },
            },
        );
        run(&mut state, &mut interaction, DesktopAction::EndResize);
        let east = session(&state, "notepad").rect;
        assert_eq!(east.x, start.x);
        assert_eq!(east.right(), state.viewport.right());

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                app_id: id("notepad"),
                edge: ResizeEdge::West,
                pointer: PointerPosition { x: 50, y: 200 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: -250, y: 200 },
            },
        );
        run(&mut state, &mut interaction, DesktopAction::EndResize);
        let west = session(&state, "notepad").rect;
        assert_eq!(west.x, state.viewport.x);
        assert_eq!(west.right(), east.right());
    }

    #[test]
    fn committed_move_survives_minimize_and_restore() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");
        let start = session(&state, "notepad").rect;

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                app_id: id("notepad"),
                pointer: PointerPosition { x: 100, y: 100 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 130, y: 120 },
            },
        );
        run(&mut state, &mut interaction, DesktopAction::EndMove);
        let moved = session(&state, "notepad").rect;
        assert_eq!(moved, start.offset(30, 20));

        run(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp {
                app_id: id("notepad"),
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::FocusApp {
                app_id: id("notepad"),
            },
        );
        let restored = session(&state, "notepad");
        assert_eq!(restored.state, WindowState::Normal);
        assert_eq!(restored.rect, moved);
    }

    #[test]
    fn viewport_changes_cancel_in_flight_gestures() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                app_id: id("notepad"),
                pointer: PointerPosition { x: 100, y: 100 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 400, y: 300 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::SetScreenSize {
                width: 700,
                height: 500,
            },
        );
        assert_eq!(interaction, InteractionState::default());
        let clamped = session(&state, "notepad").rect;
        run(&mut state, &mut interaction, DesktopAction::EndMove);
        assert_eq!(session(&state, "notepad").rect, clamped);
        assert!(clamped.right() <= state.viewport.right());
        assert!(clamped.bottom() <= state.viewport.bottom());

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                app_id: id("notepad"),
                edge: ResizeEdge::South,
                pointer: PointerPosition { x: 200, y: 200 },
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::ApplyCustomization {
                customization: Customization {
                    taskbar_height: 100,
                    ..Customization::default()
                },
            },
        );
        assert_eq!(interaction.resizing, None);
    }

    #[test]
    fn screen_resize_moves_windows_inside_and_maximized_follow() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "notepad");
        open(&mut state, &mut interaction, "browser");
        run(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: id("browser"),
            },
        );

        run(
            &mut state,
            &mut interaction,
            DesktopAction::SetScreenSize {
                width: 500,
                height: 400,
            },
        );
        assert_eq!(
            state.viewport,
            WindowRect {
                x: 0,
                y: 0,
                w: 500,
                h: 340
            }
        );
        let notepad = session(&state, "notepad").rect;
        assert!(notepad.right() <= 500 && notepad.bottom() <= 340);
        assert_eq!(
            session(&state, "browser").frame(state.viewport),
            state.viewport
        );
    }

    #[test]
    fn explorer_creates_entries_at_current_path() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "file-explorer");
        run(
            &mut state,
            &mut interaction,
            DesktopAction::ExplorerNavigate {
                app_id: id("file-explorer"),
                path: vfs::DOCUMENTS_PATH.to_string(),
            },
        );

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::ExplorerCreateEntry {
                app_id: id("file-explorer"),
                name: "Reports".to_string(),
                kind: EntryKind::Folder,
                created_at_ms: 42,
            },
        );
        let last = state
            .vfs
            .list_children(vfs::DOCUMENTS_PATH)
            .pop()
            .expect("entry");
        assert_eq!(last.name, "Reports");
        assert_eq!(last.kind, EntryKind::Folder);
        assert_eq!(notifications(&effects), vec!["Created folder: Reports"]);
        assert!(effects.contains(&RuntimeEffect::Announce {
            message: "Folder Reports created successfully!".to_string(),
            personality: Personality::Friendly,
        }));

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ExplorerCreateEntry {
                app_id: id("file-explorer"),
                name: "  ".to_string(),
                kind: EntryKind::File,
                created_at_ms: 43,
            },
        )
        .expect_err("blank name");
        assert_eq!(err, ReducerError::Vfs(VfsError::BlankName));
    }

    #[test]
    fn browser_navigation_schedules_load_and_ignores_dangling_completion() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "browser");
        let window_id = session(&state, "browser").window_id;

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::BrowserNavigate {
                app_id: id("browser"),
                url: "example.com".to_string(),
            },
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleTask {
                delay_ms: PAGE_LOAD_DELAY_MS,
                owner: Some(window_id),
                task: DeferredTask::CompletePageLoad {
                    window_id,
                    url: "https://example.com".to_string(),
                },
            }]
        );

        run(
            &mut state,
            &mut interaction,
            DesktopAction::BrowserPageLoaded {
                window_id,
                url: "https://example.com".to_string(),
            },
        );
        assert!(matches!(
            &session(&state, "browser").content,
            AppContent::Browser(b) if b.page == BrowserPage::Loaded { url: "https://example.com".to_string() }
        ));

        run(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: id("browser"),
            },
        );
        let stale = run(
            &mut state,
            &mut interaction,
            DesktopAction::BrowserPageLoaded {
                window_id,
                url: "https://example.com".to_string(),
            },
        );
        assert!(stale.is_empty());
        assert!(state.sessions.is_empty());
    }

    #[test]
    fn disabled_notifications_suppress_toasts_only() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        state.preferences.notifications_enabled = false;

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_id: id("settings"),
            },
        );
        assert!(notifications(&effects).is_empty());
        assert!(effects
            .iter()
            .any(|e| matches!(e, RuntimeEffect::Announce { .. })));
    }

    #[test]
    fn desktop_icons_can_be_renamed_and_deleted() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        run(
            &mut state,
            &mut interaction,
            DesktopAction::SelectDesktopIcon {
                app_id: id("notepad"),
                additive: false,
            },
        );

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::RenameDesktopIcon {
                app_id: id("notepad"),
                name: "  Scratch pad for meeting notes ".to_string(),
            },
        );
        let renamed = state.desktop_icon(&id("notepad")).expect("icon");
        assert_eq!(renamed.label, "Scratch pad for meet");
        assert_eq!(notifications(&effects), vec!["Renamed to: Scratch pad for meet"]);

        for name in ["   ", "Scratch pad for meet"] {
            let err = reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::RenameDesktopIcon {
                    app_id: id("notepad"),
                    name: name.to_string(),
                },
            )
            .expect_err("invalid name");
            assert_eq!(err, ReducerError::InvalidIconName);
        }

        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::DeleteDesktopIcon {
                app_id: id("notepad"),
            },
        );
        assert_eq!(notifications(&effects), vec!["Deleted: Scratch pad for meet"]);
        assert_eq!(state.desktop_icon(&id("notepad")), None);
        assert!(state.selected_icons.is_empty());
        assert!(state
            .desktop_icons()
            .iter()
            .all(|icon| icon.app_id != id("notepad")));

        // Deleted icons no longer accept edits; the app itself still opens.
        let effects = run(
            &mut state,
            &mut interaction,
            DesktopAction::DeleteDesktopIcon {
                app_id: id("notepad"),
            },
        );
        assert!(effects.is_empty());
        open(&mut state, &mut interaction, "notepad");
        assert!(state.is_running(&id("notepad")));
    }

    #[test]
    fn icon_selection_supports_additive_toggle() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        run(
            &mut state,
            &mut interaction,
            DesktopAction::SelectDesktopIcon {
                app_id: id("notepad"),
                additive: false,
            },
        );
        run(
            &mut state,
            &mut interaction,
            DesktopAction::SelectDesktopIcon {
                app_id: id("browser"),
                additive: true,
            },
        );
        assert_eq!(state.selected_icons.len(), 2);
        run(
            &mut state,
            &mut interaction,
            DesktopAction::SelectDesktopIcon {
                app_id: id("notepad"),
                additive: true,
            },
        );
        assert_eq!(
            state.selected_icons.iter().collect::<Vec<_>>(),
            vec![&id("browser")]
        );
        run(&mut state, &mut interaction, DesktopAction::ClearIconSelection);
        assert!(state.selected_icons.is_empty());
    }

    #[test]
    fn calculator_and_notepad_content_follow_input() {
        let mut state = ShellState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "calculator");
        open(&mut state, &mut interaction, "notepad");

        for key in ["6", "*", "7", "="] {
            run(
                &mut state,
                &mut interaction,
                DesktopAction::CalculatorInput {
                    app_id: id("calculator"),
                    key: CalculatorKey::parse(key).expect("key"),
                },
            );
        }
        run(
            &mut state,
            &mut interaction,
            DesktopAction::NotepadEdit {
                app_id: id("notepad"),
                text: "hello".to_string(),
            },
        );

        assert!(matches!(
            &session(&state, "calculator").content,
            AppContent::Calculator(c) if c.display == "42"
        ));
        assert_eq!(
            session(&state, "notepad").content,
            AppContent::Notepad {
                text: "hello".to_string()
            }
        );
    }
}

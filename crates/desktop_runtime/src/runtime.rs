//! Runtime owner: holds shell state, runs reducer effects against host services, and drives
//! deferred tasks.
//!
//! [`DesktopRuntime`] has no Leptos dependency so the full dispatch/effect loop can be exercised
//! with in-memory host adapters. [`crate::components`] wraps it for the browser.

use std::rc::Rc;

use platform_host::{unix_time_ms_now, HostServices, PrefsStore, Severity};

use crate::model::{AppId, InteractionState, ShellState};
use crate::preferences::{clear_preference, persist_preference, PreferenceKey, ShellPreferences};
use crate::reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
use crate::scheduler::{DeferredTask, TaskScheduler};
use crate::taskbar::Taskbar;
use crate::vfs::EntryKind;

/// A preference write queued by an apply action, executed asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceWrite {
    Save {
        key: PreferenceKey,
        preferences: ShellPreferences,
    },
    Clear {
        key: PreferenceKey,
    },
}

pub struct DesktopRuntime {
    host: HostServices,
    state: ShellState,
    interaction: InteractionState,
    taskbar: Taskbar,
    scheduler: TaskScheduler,
    pending_writes: Vec<PreferenceWrite>,
}

impl DesktopRuntime {
    pub fn new(host: HostServices) -> Self {
        Self {
            host,
            state: ShellState::default(),
            interaction: InteractionState::default(),
            taskbar: Taskbar::default(),
            scheduler: TaskScheduler::default(),
            pending_writes: Vec::new(),
        }
    }

    pub fn host(&self) -> &HostServices {
        &self.host
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn scheduler(&self) -> &TaskScheduler {
        &self.scheduler
    }

    /// Applies loaded preferences and pushes every visual setting to the appearance surface.
    pub fn boot(&mut self, preferences: ShellPreferences) {
        let _ = self.dispatch(DesktopAction::HydratePreferences { preferences });
    }

    /// Reduces `action` and executes the resulting effects.
    ///
    /// # Errors
    ///
    /// Returns the reducer error after logging it; state is left unchanged in that case.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<(), ReducerError> {
        match reduce_desktop(&mut self.state, &mut self.interaction, action) {
            Ok(effects) => {
                for effect in effects {
                    self.run_effect(effect);
                }
                Ok(())
            }
            Err(err) => {
                leptos::logging::warn!("desktop reducer error: {err}");
                Err(err)
            }
        }
    }

    /// Advances the deferred-task clock and runs every task that came due.
    pub fn advance_time(&mut self, elapsed_ms: u64) {
        for scheduled in self.scheduler.advance(elapsed_ms) {
            if let Some(owner) = scheduled.owner {
                if self.state.session_by_window(owner).is_none() {
                    continue;
                }
            }
            let action = match scheduled.task {
                DeferredTask::CompletePageLoad { window_id, url } => {
                    DesktopAction::BrowserPageLoaded { window_id, url }
                }
            };
            let _ = self.dispatch(action);
        }
    }

    /// Prompts for a name and creates a folder or file at the explorer's current path.
    ///
    /// A cancelled prompt does nothing; a blank name surfaces an error toast.
    pub fn request_new_entry(&mut self, app_id: &AppId, kind: EntryKind) {
        let message = match kind {
            EntryKind::Folder => "Enter folder name:",
            EntryKind::File => "Enter file name:",
        };
        let Some(name) = self.host.dialogs.prompt(message, "") else {
            return;
        };
        let action = DesktopAction::ExplorerCreateEntry {
            app_id: app_id.clone(),
            name,
            kind,
            created_at_ms: unix_time_ms_now(),
        };
        if self.dispatch(action).is_err() {
            self.report_invalid_name();
        }
    }

    /// Prompts for a new desktop icon label, prefilled with the current one.
    pub fn request_icon_rename(&mut self, app_id: &AppId) {
        let Some(icon) = self.state.desktop_icon(app_id) else {
            return;
        };
        let Some(name) = self.host.dialogs.prompt("New name:", &icon.label) else {
            return;
        };
        let action = DesktopAction::RenameDesktopIcon {
            app_id: app_id.clone(),
            name,
        };
        if self.dispatch(action).is_err() {
            self.report_invalid_name();
        }
    }

    /// Asks for confirmation, then removes the icon from the desktop.
    pub fn request_icon_delete(&mut self, app_id: &AppId) {
        let Some(icon) = self.state.desktop_icon(app_id) else {
            return;
        };
        let question = format!("Are you sure you want to delete \"{}\"?", icon.label);
        if self.host.dialogs.confirm(&question) {
            let _ = self.dispatch(DesktopAction::DeleteDesktopIcon {
                app_id: app_id.clone(),
            });
        }
    }

    /// Shows the properties sheet of a desktop icon.
    pub fn show_icon_properties(&self, app_id: &AppId) {
        if let Some(icon) = self.state.desktop_icon(app_id) {
            self.host.dialogs.alert(&icon_properties(&icon.label));
        }
    }

    fn report_invalid_name(&self) {
        if self.state.preferences.notifications_enabled {
            self.host
                .notifications
                .notify("Please enter a valid name", Severity::Error);
        }
    }

    /// Takes the preference writes queued since the last call.
    pub fn take_preference_writes(&mut self) -> Vec<PreferenceWrite> {
        std::mem::take(&mut self.pending_writes)
    }

    fn run_effect(&mut self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::Lifecycle(event) => self.taskbar.apply(&event),
            RuntimeEffect::Notify { message, severity } => {
                self.host.notifications.notify(&message, severity);
            }
            RuntimeEffect::Announce {
                message,
                personality,
            } => self.host.speech.announce(&message, personality),
            RuntimeEffect::ApplyVisualSetting { name, value } => {
                self.host.appearance.apply_visual_setting(name, &value);
            }
            RuntimeEffect::PersistPreference(key) => {
                self.pending_writes.push(PreferenceWrite::Save {
                    key,
                    preferences: self.state.preferences.clone(),
                });
            }
            RuntimeEffect::ClearPreference(key) => {
                self.pending_writes.push(PreferenceWrite::Clear { key });
            }
            RuntimeEffect::ScheduleTask {
                delay_ms,
                owner,
                task,
            } => {
                self.scheduler.schedule(delay_ms, owner, task);
            }
            RuntimeEffect::CancelTasks { owner } => {
                self.scheduler.cancel_owned_by(owner);
            }
        }
    }
}

fn icon_properties(label: &str) -> String {
    format!(
        "Properties\n\nName: {label}\nType: Application\nSize: 2.5 MB\nCreated: 2024-01-01\nModified: 2024-01-01"
    )
}

/// Executes queued preference writes in order, logging failures.
pub async fn persist_preference_writes(store: Rc<dyn PrefsStore>, writes: Vec<PreferenceWrite>) {
    for write in writes {
        let result = match &write {
            PreferenceWrite::Save { key, preferences } => {
                persist_preference(store.as_ref(), preferences, *key).await
            }
            PreferenceWrite::Clear { key } => clear_preference(store.as_ref(), *key).await,
        };
        if let Err(err) = result {
            leptos::logging::warn!("{err}");
        }
    }
}

//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`DesktopRuntime`], mirrors its state into signals for the
//! view tree, and boots persisted preferences. UI composition stays in [`crate::components`].

use std::time::Duration;

use leptos::*;
use platform_host::{unix_time_ms_now, HostServices, MemoryNotificationService, Severity};

use crate::{
    effect_executor,
    model::{AppId, InteractionState, ShellState},
    preferences::load_preferences,
    reducer::DesktopAction,
    runtime::{DesktopRuntime, PreferenceWrite},
    scheduler::ElapsedClock,
    taskbar::Taskbar,
    vfs::EntryKind,
};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME_MS: u64 = 3_000;
/// Interval between deferred-task clock readings.
pub const SCHEDULER_TICK_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A notification currently rendered in the toast stack.
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Owner of shell state, taskbar, scheduler, and host services.
    pub runtime: StoredValue<DesktopRuntime>,
    /// Reactive mirror of [`DesktopRuntime::state`].
    pub state: RwSignal<ShellState>,
    /// Reactive mirror of in-flight drag/resize gestures.
    pub interaction: RwSignal<InteractionState>,
    /// Reactive mirror of the taskbar indicators.
    pub taskbar: RwSignal<Taskbar>,
    /// Visible toast stack.
    pub toasts: RwSignal<Vec<Toast>>,
    /// Preference writes waiting for the async store.
    pub pending_writes: RwSignal<Vec<PreferenceWrite>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
    toast_feed: StoredValue<MemoryNotificationService>,
    next_toast_id: StoredValue<u64>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Prompts for a name and creates a folder or file in the explorer window.
    pub fn request_new_entry(&self, app_id: AppId, kind: EntryKind) {
        self.runtime
            .update_value(|runtime| runtime.request_new_entry(&app_id, kind));
        self.sync();
    }

    pub fn request_icon_rename(&self, app_id: AppId) {
        self.runtime
            .update_value(|runtime| runtime.request_icon_rename(&app_id));
        self.sync();
    }

    pub fn request_icon_delete(&self, app_id: AppId) {
        self.runtime
            .update_value(|runtime| runtime.request_icon_delete(&app_id));
        self.sync();
    }

    pub fn show_icon_properties(&self, app_id: AppId) {
        self.runtime
            .with_value(|runtime| runtime.show_icon_properties(&app_id));
    }

    /// Advances the deferred-task clock when work is pending.
    pub fn advance_time(&self, elapsed_ms: u64) {
        let has_pending = self
            .runtime
            .with_value(|runtime| !runtime.scheduler().pending().is_empty());
        if !has_pending {
            return;
        }
        self.runtime
            .update_value(|runtime| runtime.advance_time(elapsed_ms));
        self.sync();
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    /// Copies runtime state into the signals that changed and moves new notifications into the
    /// toast stack.
    fn sync(&self) {
        let (state, interaction, taskbar) = self.runtime.with_value(|runtime| {
            (
                runtime.state().clone(),
                runtime.interaction().clone(),
                runtime.taskbar().clone(),
            )
        });
        if self.state.with_untracked(|current| current != &state) {
            self.state.set(state);
        }
        if self
            .interaction
            .with_untracked(|current| current != &interaction)
        {
            self.interaction.set(interaction);
        }
        if self.taskbar.with_untracked(|current| current != &taskbar) {
            self.taskbar.set(taskbar);
        }

        let writes = self
            .runtime
            .try_update_value(DesktopRuntime::take_preference_writes)
            .unwrap_or_default();
        if !writes.is_empty() {
            self.pending_writes.update(|queue| queue.extend(writes));
        }

        let delivered = self.toast_feed.with_value(MemoryNotificationService::drain);
        for notification in delivered {
            let id = self.next_toast_id.get_value();
            self.next_toast_id.set_value(id + 1);
            self.toasts.update(|toasts| {
                toasts.push(Toast {
                    id,
                    message: notification.message,
                    severity: notification.severity,
                })
            });
            let context = *self;
            set_timeout(
                move || context.dismiss_toast(id),
                Duration::from_millis(TOAST_LIFETIME_MS),
            );
        }
    }
}

fn install_boot_hydration(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let store = runtime
            .runtime
            .with_value(|runtime| runtime.host().prefs.clone());
        spawn_local(async move {
            let preferences = load_preferences(store.as_ref()).await;
            runtime
                .runtime
                .update_value(|shell| shell.boot(preferences));
            runtime.sync();
        });
    });
}

fn install_scheduler_clock(runtime: DesktopRuntimeContext) {
    let clock = store_value(ElapsedClock::default());
    clock.update_value(|clock| {
        clock.tick(unix_time_ms_now());
    });
    match set_interval_with_handle(
        move || {
            let elapsed = clock
                .try_update_value(|clock| clock.tick(unix_time_ms_now()))
                .unwrap_or_default();
            runtime.advance_time(elapsed);
        },
        Duration::from_millis(SCHEDULER_TICK_MS),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => logging::warn!("scheduler clock install failed: {err:?}"),
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted preferences.
pub fn DesktopProvider(
    /// Injected host bundle assembled by the entry layer.
    host_services: HostServices,
    /// The notification adapter inside `host_services`, drained into the toast stack.
    toast_feed: MemoryNotificationService,
    children: Children,
) -> impl IntoView {
    let runtime = store_value(DesktopRuntime::new(host_services));
    let state = create_rw_signal(ShellState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let taskbar = create_rw_signal(Taskbar::default());
    let toasts = create_rw_signal(Vec::<Toast>::new());
    let pending_writes = create_rw_signal(Vec::<PreferenceWrite>::new());
    let toast_feed = store_value(toast_feed);
    let next_toast_id = store_value(1_u64);

    let context_slot = store_value(None::<DesktopRuntimeContext>);
    let dispatch = Callback::new(move |action: DesktopAction| {
        runtime.update_value(|shell| {
            let _ = shell.dispatch(action);
        });
        if let Some(ctx) = context_slot.get_value() {
            ctx.sync();
        }
    });

    let ctx = DesktopRuntimeContext {
        runtime,
        state,
        interaction,
        taskbar,
        toasts,
        pending_writes,
        dispatch,
        toast_feed,
        next_toast_id,
    };
    context_slot.set_value(Some(ctx));

    provide_context(ctx);

    install_boot_hydration(ctx);
    install_scheduler_clock(ctx);
    effect_executor::install(ctx);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

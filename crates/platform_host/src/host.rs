//! Host service bundle assembled by the entry layer and injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    AppearanceService, DialogService, MemoryAppearanceService, MemoryNotificationService,
    MemoryPrefsStore, MemorySpeechService, NoopAppearanceService, NoopDialogService,
    NoopNotificationService, NoopPrefsStore, NoopSpeechService, NotificationService, PrefsStore,
    ScriptedDialogService, SpeechService,
};

#[derive(Clone)]
/// Every external collaborator the desktop runtime talks to.
pub struct HostServices {
    /// Flat key-value preference store.
    pub prefs: Rc<dyn PrefsStore>,
    /// Toast/notification surface.
    pub notifications: Rc<dyn NotificationService>,
    /// Voice feedback surface.
    pub speech: Rc<dyn SpeechService>,
    /// Visual customization surface.
    pub appearance: Rc<dyn AppearanceService>,
    /// Modal dialog surface.
    pub dialogs: Rc<dyn DialogService>,
}

impl HostServices {
    /// Bundle of no-op adapters for headless use.
    pub fn noop() -> Self {
        Self {
            prefs: Rc::new(NoopPrefsStore),
            notifications: Rc::new(NoopNotificationService),
            speech: Rc::new(NoopSpeechService),
            appearance: Rc::new(NoopAppearanceService),
            dialogs: Rc::new(NoopDialogService),
        }
    }

    /// Bundle built from in-memory adapters whose handles stay inspectable by the caller.
    pub fn memory(
        prefs: MemoryPrefsStore,
        notifications: MemoryNotificationService,
        speech: MemorySpeechService,
        appearance: MemoryAppearanceService,
        dialogs: ScriptedDialogService,
    ) -> Self {
        Self {
            prefs: Rc::new(prefs),
            notifications: Rc::new(notifications),
            speech: Rc::new(speech),
            appearance: Rc::new(appearance),
            dialogs: Rc::new(dialogs),
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::noop()
    }
}

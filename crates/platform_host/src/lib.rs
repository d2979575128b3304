//! Typed host-domain contracts shared by the desktop runtime and its browser adapters.
//!
//! This crate is the API-first boundary for everything the shell core treats as an external
//! collaborator: the flat key-value preference store, the toast/notification surface, voice
//! feedback, visual customization, and modal dialogs. Concrete browser adapters live in
//! `platform_host_web`; this crate only ships in-memory and no-op implementations.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod dialogs;
pub mod host;
pub mod notifications;
pub mod speech;
pub mod storage;
pub mod time;

pub use appearance::{AppearanceService, MemoryAppearanceService, NoopAppearanceService};
pub use dialogs::{DialogRequest, DialogService, NoopDialogService, ScriptedDialogService};
pub use host::HostServices;
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, Notification, NotificationService,
    Severity,
};
pub use speech::{
    Announcement, MemorySpeechService, NoopSpeechService, Personality, SpeechService,
    VoiceProfile,
};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsError, PrefsStore,
    PrefsStoreFuture,
};
pub use time::unix_time_ms_now;

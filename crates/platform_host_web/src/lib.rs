//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Every adapter compiles on native targets as a no-op so the runtime and its tests stay
//! target-agnostic.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod dialogs;
pub mod speech;
pub mod storage;

use std::rc::Rc;

use platform_host::{HostServices, NotificationService};

pub use appearance::WebAppearanceService;
pub use dialogs::WebDialogService;
pub use speech::WebSpeechService;
pub use storage::local_prefs::WebPrefsStore;

/// Assembles the browser host bundle.
///
/// Notifications are rendered by the shell itself (toast stack), so the caller supplies that
/// service.
pub fn web_host_services(notifications: Rc<dyn NotificationService>) -> HostServices {
    HostServices {
        prefs: Rc::new(WebPrefsStore),
        notifications,
        speech: Rc::new(WebSpeechService),
        appearance: Rc::new(WebAppearanceService),
        dialogs: Rc::new(WebDialogService),
    }
}

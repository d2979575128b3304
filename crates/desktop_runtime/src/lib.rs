//! Window and session manager for a browser-hosted desktop shell.
//!
//! The pure core (`reducer`, `window_manager`, `taskbar`, `vfs`, `scheduler`) runs without a
//! browser; [`runtime::DesktopRuntime`] executes reducer effects against
//! [`platform_host::HostServices`], and [`components`] renders it with Leptos.

pub mod apps;
pub mod components;
mod effect_executor;
pub mod model;
pub mod preferences;
pub mod reducer;
pub mod runtime;
mod runtime_context;
pub mod scheduler;
pub mod shortcuts;
pub mod taskbar;
pub mod vfs;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use preferences::{load_preferences, ShellPreferences};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime::{persist_preference_writes, DesktopRuntime, PreferenceWrite};
pub use runtime_context::Toast;
pub use taskbar::{Taskbar, TaskbarIndicator};

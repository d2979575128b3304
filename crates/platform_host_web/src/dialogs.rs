//! `window.alert` / `confirm` / `prompt` dialogs.

use platform_host::DialogService;

#[derive(Debug, Clone, Copy, Default)]
/// Native browser modal dialogs.
pub struct WebDialogService;

impl DialogService for WebDialogService {
    fn alert(&self, message: &str) {
        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = message;
    }

    fn confirm(&self, message: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.confirm_with_message(message).ok())
                .unwrap_or(false)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = message;
            false
        }
    }

    fn prompt(&self, message: &str, default_value: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| {
                    window
                        .prompt_with_message_and_default(message, default_value)
                        .ok()
                })
                .flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (message, default_value);
            None
        }
    }
}

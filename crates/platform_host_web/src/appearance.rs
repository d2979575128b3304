//! `document.body` backed visual customization.
//!
//! `theme` maps to the `data-theme` attribute (removed for `light`); every other setting becomes a
//! `--shell-<name>` CSS custom property for the stylesheet to consume.

use platform_host::AppearanceService;

#[derive(Debug, Clone, Copy, Default)]
/// Applies visual settings to the document body.
pub struct WebAppearanceService;

/// Returns the CSS custom property used for a non-theme visual setting.
pub fn css_property_name(setting: &str) -> String {
    format!("--shell-{}", setting.replace('_', "-"))
}

impl AppearanceService for WebAppearanceService {
    fn apply_visual_setting(&self, name: &str, value: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(body) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.body())
            else {
                return;
            };

            if name == "theme" {
                if value == "light" {
                    let _ = body.remove_attribute("data-theme");
                } else {
                    let _ = body.set_attribute("data-theme", value);
                }
                return;
            }

            let _ = body.style().set_property(&css_property_name(name), value);
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = (name, value);
    }
}

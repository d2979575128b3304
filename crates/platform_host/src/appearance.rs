//! Visual customization surface contracts.

use std::{cell::RefCell, rc::Rc};

/// Host service that applies a named visual setting (theme, wallpaper, blur, ...).
///
/// The shell core only names settings and values; how they are rendered is up to the host.
pub trait AppearanceService {
    /// Applies `value` to the visual setting `name`.
    fn apply_visual_setting(&self, name: &str, value: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Appearance service that ignores every setting.
pub struct NoopAppearanceService;

impl AppearanceService for NoopAppearanceService {
    fn apply_visual_setting(&self, _name: &str, _value: &str) {}
}

#[derive(Debug, Clone, Default)]
/// Appearance service that records applied settings in order.
pub struct MemoryAppearanceService {
    applied: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryAppearanceService {
    /// Returns every `(name, value)` pair applied so far.
    pub fn applied(&self) -> Vec<(String, String)> {
        self.applied.borrow().clone()
    }

    /// Returns the most recent value applied for `name`.
    pub fn current(&self, name: &str) -> Option<String> {
        self.applied
            .borrow()
            .iter()
            .rev()
            .find(|(applied_name, _)| applied_name == name)
            .map(|(_, value)| value.clone())
    }
}

impl AppearanceService for MemoryAppearanceService {
    fn apply_visual_setting(&self, name: &str, value: &str) {
        self.applied
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
    }
}

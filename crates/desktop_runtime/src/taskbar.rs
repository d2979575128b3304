//! Running-app indicators mirrored from session lifecycle events.
//!
//! The taskbar never reads session state directly; it only folds [`LifecycleEvent`]s.

use crate::apps;
use crate::model::{AppId, LifecycleEvent, SessionPhase, WindowId};
use crate::reducer::DesktopAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarIndicator {
    pub app_id: AppId,
    pub window_id: WindowId,
    pub title: String,
    pub icon: String,
    pub minimized: bool,
    pub focused: bool,
    z_index: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taskbar {
    indicators: Vec<TaskbarIndicator>,
}

impl Taskbar {
    /// Indicators in session-creation order.
    pub fn indicators(&self) -> &[TaskbarIndicator] {
        &self.indicators
    }

    pub fn indicator(&self, app_id: &AppId) -> Option<&TaskbarIndicator> {
        self.indicators.iter().find(|i| &i.app_id == app_id)
    }

    /// Folds one lifecycle event into the indicator list.
    pub fn apply(&mut self, event: &LifecycleEvent) {
        match event.next {
            SessionPhase::Closed | SessionPhase::None => {
                self.indicators.retain(|i| i.app_id != event.app_id);
            }
            SessionPhase::Normal | SessionPhase::Minimized | SessionPhase::Maximized => {
                let minimized = event.next == SessionPhase::Minimized;
                let z_index = event.z_index.unwrap_or_default();
                match self
                    .indicators
                    .iter_mut()
                    .find(|i| i.app_id == event.app_id)
                {
                    Some(indicator) => {
                        indicator.window_id = event.window_id;
                        indicator.minimized = minimized;
                        indicator.z_index = z_index;
                    }
                    None => {
                        let descriptor = apps::app_descriptor(&event.app_id);
                        self.indicators.push(TaskbarIndicator {
                            app_id: event.app_id.clone(),
                            window_id: event.window_id,
                            title: descriptor.title,
                            icon: descriptor.icon,
                            minimized,
                            focused: false,
                            z_index,
                        });
                    }
                }
            }
        }
        self.refresh_focus();
    }

    /// The single interaction an indicator offers: focus (which also restores).
    pub fn click(&self, app_id: &AppId) -> Option<DesktopAction> {
        self.indicator(app_id).map(|i| DesktopAction::FocusApp {
            app_id: i.app_id.clone(),
        })
    }

    /// Activates the indicator at 1-based `position` (for `Alt+1..9`).
    pub fn activate(&self, position: usize) -> Option<DesktopAction> {
        let indicator = self.indicators.get(position.checked_sub(1)?)?;
        self.click(&indicator.app_id)
    }

    fn refresh_focus(&mut self) {
        let top = self
            .indicators
            .iter()
            .filter(|i| !i.minimized)
            .map(|i| i.z_index)
            .max();
        for indicator in &mut self.indicators {
            indicator.focused = !indicator.minimized && Some(indicator.z_index) == top;
        }
    }
}

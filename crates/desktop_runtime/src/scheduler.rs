//! Deferred tasks on a virtual clock.
//!
//! Tasks carry a due time and an optional owning window. Closing a window cancels what it owns, and
//! completion handlers still re-check that the window exists before touching it.

use crate::model::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// Work the runtime performs when a task comes due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    /// Finish the simulated page load of a browser window.
    CompletePageLoad { window_id: WindowId, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub due_ms: u64,
    pub owner: Option<WindowId>,
    pub task: DeferredTask,
}

#[derive(Debug, Clone, Default)]
pub struct TaskScheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<ScheduledTask>,
}

impl TaskScheduler {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(
        &mut self,
        delay_ms: u64,
        owner: Option<WindowId>,
        task: DeferredTask,
    ) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.pending.push(ScheduledTask {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            owner,
            task,
        });
        id
    }

    /// Drops every pending task owned by `window_id` and returns how many were removed.
    pub fn cancel_owned_by(&mut self, window_id: WindowId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.owner != Some(window_id));
        before - self.pending.len()
    }

    /// Moves the clock forward by `elapsed_ms` and returns tasks that came due, earliest first.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<ScheduledTask> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let now = self.now_ms;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_ms <= now);
        self.pending = pending;
        due.sort_by_key(|t| (t.due_ms, t.id));
        due
    }

    /// Time until the earliest pending task, if any.
    pub fn next_due_in_ms(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    pub fn pending(&self) -> &[ScheduledTask] {
        &self.pending
    }
}

/// Turns wall-clock readings into elapsed time for [`TaskScheduler::advance`].
///
/// Browsers throttle timers in background tabs, so a fixed step per tick would drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElapsedClock {
    last_ms: Option<u64>,
}

impl ElapsedClock {
    /// Records `now_ms` and returns the time since the previous reading; zero on the first.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        let elapsed = self.last_ms.map_or(0, |last| now_ms.saturating_sub(last));
        self.last_ms = Some(now_ms);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page_load(window: u64, url: &str) -> DeferredTask {
        DeferredTask::CompletePageLoad {
            window_id: WindowId(window),
            url: url.to_string(),
        }
    }

    #[test]
    fn tasks_fire_only_once_due_and_in_due_order() {
        let mut scheduler = TaskScheduler::default();
        scheduler.schedule(1500, Some(WindowId(1)), page_load(1, "https://a.test"));
        scheduler.schedule(500, Some(WindowId(2)), page_load(2, "https://b.test"));

        assert!(scheduler.advance(499).is_empty());
        assert_eq!(scheduler.next_due_in_ms(), Some(1));

        let due = scheduler.advance(1001);
        let urls: Vec<_> = due
            .iter()
            .map(|t| match &t.task {
                DeferredTask::CompletePageLoad { url, .. } => url.as_str(),
            })
            .collect();
        assert_eq!(urls, vec!["https://b.test", "https://a.test"]);
        assert!(scheduler.pending().is_empty());
        assert_eq!(scheduler.now_ms(), 1500);
    }

    #[test]
    fn cancelling_a_window_drops_only_its_tasks() {
        let mut scheduler = TaskScheduler::default();
        scheduler.schedule(100, Some(WindowId(1)), page_load(1, "https://a.test"));
        scheduler.schedule(100, Some(WindowId(1)), page_load(1, "https://c.test"));
        scheduler.schedule(100, Some(WindowId(2)), page_load(2, "https://b.test"));

        assert_eq!(scheduler.cancel_owned_by(WindowId(1)), 2);
        let due = scheduler.advance(100);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, Some(WindowId(2)));
    }

    #[test]
    fn elapsed_clock_reports_real_gaps_between_ticks() {
        let mut clock = ElapsedClock::default();
        assert_eq!(clock.tick(10_000), 0);
        assert_eq!(clock.tick(10_100), 100);
        // A throttled tab fires late; the whole gap counts.
        assert_eq!(clock.tick(11_600), 1_500);
        assert_eq!(clock.tick(11_000), 0);
        assert_eq!(clock.tick(11_050), 50);
    }

    #[test]
    fn throttled_ticks_still_complete_a_page_load_on_time() {
        let mut scheduler = TaskScheduler::default();
        let mut clock = ElapsedClock::default();
        clock.tick(0);
        scheduler.schedule(1500, Some(WindowId(1)), page_load(1, "https://a.test"));

        assert!(scheduler.advance(clock.tick(1_000)).is_empty());
        assert_eq!(scheduler.advance(clock.tick(2_000)).len(), 1);
    }
}

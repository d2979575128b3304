//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{
    AppId, LifecycleEvent, ResizeEdge, SessionPhase, ShellState, WindowRect, WindowState,
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 220;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 140;

/// Takes the next z-order rank from the shell-owned counter.
pub fn next_z_index(state: &mut ShellState) -> u64 {
    let z = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z
}

/// Raises `app_id` to the top rank, bringing it back from minimized if needed.
///
/// Returns `None` when no session exists for `app_id`.
pub fn focus_session(state: &mut ShellState, app_id: &AppId) -> Option<LifecycleEvent> {
    let index = state.sessions.iter().position(|s| &s.app_id == app_id)?;
    let z = next_z_index(state);
    let session = &mut state.sessions[index];
    let previous = SessionPhase::from(session.state);
    if session.state == WindowState::Minimized {
        session.state = WindowState::Normal;
    }
    session.z_index = z;
    Some(LifecycleEvent {
        app_id: session.app_id.clone(),
        window_id: session.window_id,
        previous,
        next: session.state.into(),
        z_index: Some(z),
    })
}

/// Moves a visible session to minimized. Returns `None` when absent or already minimized.
pub fn minimize_session(state: &mut ShellState, app_id: &AppId) -> Option<LifecycleEvent> {
    let session = state
        .sessions
        .iter_mut()
        .find(|s| &s.app_id == app_id && s.is_visible())?;
    let previous = SessionPhase::from(session.state);
    session.state = WindowState::Minimized;
    Some(LifecycleEvent {
        app_id: session.app_id.clone(),
        window_id: session.window_id,
        previous,
        next: SessionPhase::Minimized,
        z_index: Some(session.z_index),
    })
}

/// Keeps a rect at least the minimum size and fully inside `viewport`.
///
/// Windows larger than the viewport shrink to it (never below the minimum size).
pub fn clamp_to_viewport(rect: WindowRect, viewport: WindowRect) -> WindowRect {
    let w = rect.w.min(viewport.w).max(MIN_WINDOW_WIDTH);
    let h = rect.h.min(viewport.h).max(MIN_WINDOW_HEIGHT);
    let max_x = (viewport.right() - w).max(viewport.x);
    let max_y = (viewport.bottom() - h).max(viewport.y);
    WindowRect {
        x: rect.x.clamp(viewport.x, max_x),
        y: rect.y.clamp(viewport.y, max_y),
        w,
        h,
    }
}

/// Which sides of the window an edge or corner drag moves, as `(west, east, north, south)`.
fn moving_sides(edge: ResizeEdge) -> (bool, bool, bool, bool) {
    match edge {
        ResizeEdge::North => (false, false, true, false),
        ResizeEdge::South => (false, false, false, true),
        ResizeEdge::East => (false, true, false, false),
        ResizeEdge::West => (true, false, false, false),
        ResizeEdge::NorthEast => (false, true, true, false),
        ResizeEdge::NorthWest => (true, false, true, false),
        ResizeEdge::SouthEast => (false, true, false, true),
        ResizeEdge::SouthWest => (true, false, false, true),
    }
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Dragging a west or north edge past the minimum keeps the opposite edge anchored.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let (moves_west, moves_east, moves_north, moves_south) = moving_sides(edge);

    let mut rect = start;
    if moves_east {
        rect.w = (start.w + dx).max(MIN_WINDOW_WIDTH);
    }
    if moves_west {
        rect.w = (start.w - dx).max(MIN_WINDOW_WIDTH);
        rect.x = start.right() - rect.w;
    }
    if moves_south {
        rect.h = (start.h + dy).max(MIN_WINDOW_HEIGHT);
    }
    if moves_north {
        rect.h = (start.h - dy).max(MIN_WINDOW_HEIGHT);
        rect.y = start.bottom() - rect.h;
    }
    rect
}

/// Resizes like [`resize_rect`] but stops each moving side at the viewport boundary.
///
/// Only the dragged sides move; the opposite edges stay where they started.
pub fn resize_within_viewport(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    viewport: WindowRect,
) -> WindowRect {
    let (moves_west, moves_east, moves_north, moves_south) = moving_sides(edge);

    let mut rect = resize_rect(start, edge, dx, dy);
    if moves_east {
        rect.w = rect.w.min(viewport.right() - start.x).max(MIN_WINDOW_WIDTH);
    }
    if moves_west {
        rect.w = rect.w.min(start.right() - viewport.x).max(MIN_WINDOW_WIDTH);
        rect.x = start.right() - rect.w;
    }
    if moves_south {
        rect.h = rect.h.min(viewport.bottom() - start.y).max(MIN_WINDOW_HEIGHT);
    }
    if moves_north {
        rect.h = rect.h.min(start.bottom() - viewport.y).max(MIN_WINDOW_HEIGHT);
        rect.y = start.bottom() - rect.h;
    }
    rect
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 0,
        w: 1000,
        h: 700,
    };

    #[test]
    fn clamp_pulls_offscreen_windows_back_inside() {
        let rect = WindowRect {
            x: -300,
            y: 900,
            w: 400,
            h: 300,
        };
        assert_eq!(
            clamp_to_viewport(rect, VIEWPORT),
            WindowRect {
                x: 0,
                y: 400,
                w: 400,
                h: 300
            }
        );
    }

    #[test]
    fn clamp_shrinks_oversized_windows_and_enforces_minimum() {
        let huge = WindowRect {
            x: 10,
            y: 10,
            w: 5000,
            h: 5000,
        };
        assert_eq!(clamp_to_viewport(huge, VIEWPORT), VIEWPORT);

        let tiny = WindowRect {
            x: 990,
            y: 690,
            w: 10,
            h: 10,
        };
        assert_eq!(
            clamp_to_viewport(tiny, VIEWPORT),
            WindowRect {
                x: 780,
                y: 560,
                w: MIN_WINDOW_WIDTH,
                h: MIN_WINDOW_HEIGHT
            }
        );
    }

    #[test]
    fn west_resize_past_minimum_keeps_right_edge() {
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 300,
            h: 200,
        };
        let resized = resize_rect(start, ResizeEdge::NorthWest, 200, 200);
        assert_eq!(resized.w, MIN_WINDOW_WIDTH);
        assert_eq!(resized.h, MIN_WINDOW_HEIGHT);
        assert_eq!(resized.right(), start.right());
        assert_eq!(resized.bottom(), start.bottom());
    }

    #[test]
    fn south_east_resize_grows_from_fixed_origin() {
        let start = WindowRect {
            x: 40,
            y: 40,
            w: 300,
            h: 200,
        };
        assert_eq!(
            resize_rect(start, ResizeEdge::SouthEast, 25, 40),
            WindowRect {
                x: 40,
                y: 40,
                w: 325,
                h: 240
            }
        );
    }

    #[test]
    fn east_resize_stops_at_viewport_and_keeps_west_edge() {
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1024,
            h: 708,
        };
        let start = WindowRect {
            x: 50,
            y: 50,
            w: 600,
            h: 400,
        };
        let resized = resize_within_viewport(start, ResizeEdge::East, 600, 0, viewport);
        assert_eq!(resized.x, start.x);
        assert_eq!(resized.right(), viewport.right());
        assert_eq!(resized.h, start.h);
    }

    #[test]
    fn west_resize_stops_at_viewport_and_keeps_east_edge() {
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1024,
            h: 708,
        };
        let start = WindowRect {
            x: 50,
            y: 50,
            w: 600,
            h: 400,
        };
        let resized = resize_within_viewport(start, ResizeEdge::West, -300, 0, viewport);
        assert_eq!(resized.x, viewport.x);
        assert_eq!(resized.right(), start.right());
    }

    #[test]
    fn north_south_corner_resize_keeps_anchors_inside_viewport() {
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 300,
            h: 200,
        };
        let grown = resize_within_viewport(start, ResizeEdge::SouthEast, 5000, 5000, VIEWPORT);
        assert_eq!(
            grown,
            WindowRect {
                x: 100,
                y: 100,
                w: 900,
                h: 600
            }
        );

        let lifted = resize_within_viewport(start, ResizeEdge::NorthWest, -500, -500, VIEWPORT);
        assert_eq!(
            lifted,
            WindowRect {
                x: 0,
                y: 0,
                w: 400,
                h: 300
            }
        );
        assert_eq!(lifted.bottom(), start.bottom());
    }
}

use std::time::Duration;

use super::*;
use crate::{
    model::AppId,
    preferences::{format_clock_date, format_clock_time},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockSnapshot {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl ClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                year: date.get_full_year() as i32,
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
            }
        }
    }
}

fn indicator_class(minimized: bool, focused: bool) -> &'static str {
    match (minimized, focused) {
        (true, _) => "taskbar-item minimized",
        (false, true) => "taskbar-item active",
        (false, false) => "taskbar-item",
    }
}

#[component]
pub(super) fn ShellTaskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let taskbar = runtime.taskbar;
    let clock_now = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let clock_time = move || {
        let now = clock_now.get();
        state.with(|s| format_clock_time(&s.preferences.time_format, now.hour, now.minute))
    };
    let clock_date = move || {
        let now = clock_now.get();
        state.with(|s| format_clock_date(&s.preferences.date_format, now.year, now.month, now.day))
    };

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Desktop taskbar"
            aria-keyshortcuts="Control+Space Alt+1 Alt+2 Alt+3 Alt+4 Alt+5 Alt+6 Alt+7 Alt+8 Alt+9"
            style=move || format!("height:{}px;", state.with(|s| s.preferences.customization.taskbar_height))
            on:mousedown=move |ev| ev.stop_propagation()
        >
            <button
                id="taskbar-start-button"
                class="start-button"
                aria-label="Open application launcher"
                aria-haspopup="menu"
                aria-controls="desktop-launcher-menu"
                aria-expanded=move || state.get().start_menu_open.to_string()
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
            >
                <i class="fas fa-th" aria-hidden="true"></i>
                <span>"Start"</span>
            </button>

            <div class="taskbar-running" role="group" aria-label="Running apps">
                <For
                    each=move || taskbar.get().indicators().to_vec()
                    key=|indicator| indicator.app_id.to_string()
                    let:indicator
                >
                    <TaskbarIndicatorButton
                        app_id=indicator.app_id
                        title=indicator.title
                        icon=indicator.icon
                    />
                </For>
            </div>

            <div class="taskbar-tray">
                <button
                    class="tray-button"
                    aria-label="Toggle theme"
                    on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleTheme)
                >
                    <i
                        class=move || {
                            if state.with(|s| s.preferences.theme == crate::preferences::ThemeMode::Dark) {
                                "fas fa-sun"
                            } else {
                                "fas fa-moon"
                            }
                        }
                        aria-hidden="true"
                    ></i>
                </button>
                <div class="taskbar-clock" aria-live="off">
                    <span class="clock-time">{clock_time}</span>
                    <span class="clock-date">{clock_date}</span>
                </div>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarIndicatorButton(app_id: AppId, title: String, icon: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app_id);
    let flags = Signal::derive(move || {
        runtime.taskbar.with(|taskbar| {
            app_id.with_value(|id| {
                taskbar
                    .indicator(id)
                    .map(|indicator| (indicator.minimized, indicator.focused))
                    .unwrap_or_default()
            })
        })
    });

    view! {
        <button
            class=move || {
                let (minimized, focused) = flags.get();
                indicator_class(minimized, focused)
            }
            aria-pressed=move || flags.get().1.to_string()
            title=title.clone()
            on:click=move |_| {
                let action = runtime
                    .taskbar
                    .with_untracked(|taskbar| app_id.with_value(|id| taskbar.click(id)));
                if let Some(action) = action {
                    runtime.dispatch_action(action);
                }
            }
        >
            <i class=icon aria-hidden="true"></i>
            <span class="taskbar-item-label">{title}</span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn minimized_indicators_never_render_as_active() {
        assert_eq!(indicator_class(true, true), "taskbar-item minimized");
        assert_eq!(indicator_class(false, true), "taskbar-item active");
        assert_eq!(indicator_class(false, false), "taskbar-item");
    }

    #[test]
    fn native_clock_snapshot_is_the_epoch() {
        let now = ClockSnapshot::now();
        assert_eq!(
            format_clock_date("YYYY-MM-DD", now.year, now.month, now.day),
            "1970-01-01"
        );
    }
}

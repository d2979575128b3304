use super::*;
use crate::{
    components::app_views::AppContentView,
    model::{AppId, WindowState},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

const RESIZE_EDGES: [ResizeEdge; 8] = [
    ResizeEdge::North,
    ResizeEdge::South,
    ResizeEdge::East,
    ResizeEdge::West,
    ResizeEdge::NorthEast,
    ResizeEdge::NorthWest,
    ResizeEdge::SouthEast,
    ResizeEdge::SouthWest,
];

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[component]
pub(super) fn DesktopWindow(app_id: AppId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app_id);

    let session = Signal::derive(move || {
        runtime
            .state
            .with(|state| app_id.with_value(|id| state.session(id).cloned()))
    });
    let is_focused = Signal::derive(move || {
        runtime
            .state
            .with(|state| app_id.with_value(|id| state.focused_app_id() == Some(id)))
    });
    let frame = Signal::derive(move || {
        let session = session.get()?;
        let preview = runtime
            .interaction
            .with(|interaction| interaction.preview_for(&session.app_id));
        let viewport = runtime.state.with(|state| state.viewport);
        Some(preview.unwrap_or_else(|| session.frame(viewport)))
    });

    let focus = move |_| {
        let needs_focus = session
            .get_untracked()
            .map(|s| !is_focused.get_untracked() || s.state == WindowState::Minimized)
            .unwrap_or(false);
        if needs_focus {
            runtime.dispatch_action(DesktopAction::FocusApp {
                app_id: app_id.get_value(),
            });
        }
    };
    let minimize = move || {
        runtime.dispatch_action(DesktopAction::MinimizeApp {
            app_id: app_id.get_value(),
        })
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::MaximizeApp {
            app_id: app_id.get_value(),
        })
    };
    let close = move || {
        runtime.dispatch_action(DesktopAction::CloseApp {
            app_id: app_id.get_value(),
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            app_id: app_id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    let style = move || {
        let z_index = session.get().map(|s| s.z_index).unwrap_or_default();
        frame
            .get()
            .map(|rect| {
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    rect.x, rect.y, rect.w, rect.h, z_index
                )
            })
            .unwrap_or_default()
    };
    let class = move || {
        let state_class = match session.get().map(|s| s.state) {
            Some(WindowState::Minimized) => " minimized",
            Some(WindowState::Maximized) => " maximized",
            Some(WindowState::Normal) | None => "",
        };
        let focused_class = if is_focused.get() { " focused" } else { "" };
        format!("desktop-window{focused_class}{state_class}")
    };
    let maximized = move || {
        session
            .get()
            .map(|s| s.state == WindowState::Maximized)
            .unwrap_or(false)
    };
    let resizable = move || {
        session
            .get()
            .map(|s| s.state == WindowState::Normal)
            .unwrap_or(false)
    };
    let (title, icon, window_id) = session
        .get_untracked()
        .map(|s| (s.title, s.icon_id, s.window_id.0.to_string()))
        .unwrap_or_default();

    view! {
        <section
            class=class
            data-window-id=window_id
            style=style
            on:pointerdown=focus
            role="dialog"
            aria-label=title.clone()
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    toggle_maximize();
                }
            >
                <div class="titlebar-title">
                    <i class=icon aria-hidden="true"></i>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            minimize();
                        }
                    >
                        <i class="fas fa-window-minimize" aria-hidden="true"></i>
                    </button>
                    <button
                        aria-label=move || if maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        <i
                            class=move || {
                                if maximized() { "fas fa-window-restore" } else { "fas fa-window-maximize" }
                            }
                            aria-hidden="true"
                        ></i>
                    </button>
                    <button
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            close();
                        }
                    >
                        <i class="fas fa-times" aria-hidden="true"></i>
                    </button>
                </div>
            </header>
            <div class="window-body">
                <AppContentView app_id=app_id.get_value() />
            </div>
            <Show when=resizable fallback=|| ()>
                {RESIZE_EDGES
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle app_id=app_id.get_value() edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(app_id: AppId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            app_id: app_id.clone(),
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

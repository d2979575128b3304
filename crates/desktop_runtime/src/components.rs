//! Desktop shell UI composition and interaction surfaces.

mod app_views;
mod taskbar;
mod window;

use leptos::*;

use self::{taskbar::ShellTaskbar, window::DesktopWindow};

use crate::{
    apps,
    model::{AppId, PointerPosition, ResizeEdge},
    reducer::DesktopAction,
    runtime_context::Toast,
    shortcuts::{shortcut_action, KeyChord},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell: icons, windows, start menu, taskbar, and toasts.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let icon_menu = create_rw_signal(None::<IconMenuAnchor>);

    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        let chord = key_chord_from_event(&ev);
        let action = runtime
            .taskbar
            .with_untracked(|taskbar| shortcut_action(&chord, taskbar));
        if let Some(action) = action {
            ev.prevent_default();
            runtime.dispatch_action(action);
        }
    });
    on_cleanup(move || shortcut_listener.remove());

    let report_screen_size = move || {
        if let Some((width, height)) = browser_screen_size() {
            runtime.dispatch_action(DesktopAction::SetScreenSize { width, height });
        }
    };
    report_screen_size();
    let resize_listener = window_event_listener(ev::resize, move |_| report_screen_size());
    on_cleanup(move || resize_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-theme=move || state.get().preferences.theme.as_str()
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
            on:mousedown=move |_| icon_menu.set(None)
        >
            <div
                class="desktop-surface"
                on:mousedown=move |_| {
                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                    runtime.dispatch_action(DesktopAction::ClearIconSelection);
                }
            >
                <div class="desktop-icons">
                    <For
                        each=move || state.get().desktop_icons()
                        key=|icon| (icon.app_id.clone(), icon.label.clone())
                        let:icon
                    >
                        {{
                            let select_id = icon.app_id.clone();
                            let open_id = icon.app_id.clone();
                            let menu_id = icon.app_id.clone();
                            let class_id = icon.app_id.clone();
                            view! {
                                <button
                                    class=move || {
                                        if state.get().selected_icons.contains(&class_id) {
                                            "desktop-icon selected"
                                        } else {
                                            "desktop-icon"
                                        }
                                    }
                                    data-app=icon.app_id.to_string()
                                    on:mousedown=move |ev| ev.stop_propagation()
                                    on:click=move |ev: web_sys::MouseEvent| {
                                        icon_menu.set(None);
                                        runtime.dispatch_action(DesktopAction::SelectDesktopIcon {
                                            app_id: select_id.clone(),
                                            additive: ev.ctrl_key() || ev.meta_key(),
                                        });
                                    }
                                    on:dblclick=move |_| {
                                        runtime.dispatch_action(DesktopAction::OpenApp {
                                            app_id: open_id.clone(),
                                        });
                                    }
                                    on:contextmenu=move |ev: web_sys::MouseEvent| {
                                        stop_mouse_event(&ev);
                                        icon_menu.set(Some(IconMenuAnchor {
                                            app_id: menu_id.clone(),
                                            position: PointerPosition {
                                                x: ev.client_x(),
                                                y: ev.client_y(),
                                            },
                                        }));
                                    }
                                >
                                    <i class=icon.icon.clone() aria-hidden="true"></i>
                                    <span>{icon.label.clone()}</span>
                                </button>
                            }
                        }}
                    </For>
                </div>
            </div>

            <div class="window-layer">
                <For
                    each=move || state.get().sessions
                    key=|session| session.window_id.0
                    let:session
                >
                    <DesktopWindow app_id=session.app_id />
                </For>
            </div>

            <DesktopIconMenu menu=icon_menu />

            <Show when=move || state.get().start_menu_open fallback=|| ()>
                <StartMenu />
            </Show>

            <ShellTaskbar />
            <ToastStack />
        </div>
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IconMenuAnchor {
    app_id: AppId,
    position: PointerPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IconMenuAction {
    Open,
    Properties,
    Rename,
    Delete,
}

const ICON_MENU_ITEMS: [(IconMenuAction, &str, &str); 4] = [
    (IconMenuAction::Open, "Open", "fas fa-external-link-alt"),
    (IconMenuAction::Properties, "Properties", "fas fa-info-circle"),
    (IconMenuAction::Rename, "Rename", "fas fa-edit"),
    (IconMenuAction::Delete, "Delete", "fas fa-trash"),
];

fn run_icon_menu_action(runtime: DesktopRuntimeContext, action: IconMenuAction, app_id: AppId) {
    match action {
        IconMenuAction::Open => runtime.dispatch_action(DesktopAction::OpenApp { app_id }),
        IconMenuAction::Properties => runtime.show_icon_properties(app_id),
        IconMenuAction::Rename => runtime.request_icon_rename(app_id),
        IconMenuAction::Delete => runtime.request_icon_delete(app_id),
    }
}

#[component]
fn DesktopIconMenu(menu: RwSignal<Option<IconMenuAnchor>>) -> impl IntoView {
    let runtime = use_desktop_runtime();

    move || {
        menu.get().map(|anchor| {
            let style = format!(
                "left: {}px; top: {}px;",
                anchor.position.x, anchor.position.y
            );
            let items = ICON_MENU_ITEMS
                .into_iter()
                .map(|(action, label, icon)| {
                    let app_id = anchor.app_id.clone();
                    view! {
                        <button
                            role="menuitem"
                            class="context-menu-item"
                            on:click=move |_| {
                                menu.set(None);
                                run_icon_menu_action(runtime, action, app_id.clone());
                            }
                        >
                            <i class=icon aria-hidden="true"></i>
                            <span>{label}</span>
                        </button>
                    }
                })
                .collect_view();

            view! {
                <div
                    class="context-menu"
                    role="menu"
                    style=style
                    on:mousedown=move |ev| ev.stop_propagation()
                >
                    {items}
                </div>
            }
        })
    }
}

#[component]
fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = create_rw_signal(String::new());
    let results = create_memo(move |_| apps::search(&query.get()));
    let open_result = move |app_id: AppId| {
        runtime.dispatch_action(DesktopAction::OpenApp { app_id });
        runtime.dispatch_action(DesktopAction::CloseStartMenu);
    };

    view! {
        <nav
            id="desktop-launcher-menu"
            class="start-menu"
            role="menu"
            aria-label="Applications"
            on:mousedown=move |ev| ev.stop_propagation()
        >
            <div class="search-box">
                <i class="fas fa-search" aria-hidden="true"></i>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search apps and settings"
                    aria-label="Search"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() != "Enter" {
                            return;
                        }
                        if let Some(first) = results.get_untracked().into_iter().next() {
                            ev.prevent_default();
                            open_result(first.opens);
                        }
                    }
                />
            </div>
            <Show
                when=move || query.with(|query| !query.trim().is_empty())
                fallback=|| view! { <LauncherList /> }
            >
                {move || {
                    let hits = results.get();
                    let query = query.get();
                    if hits.is_empty() {
                        return view! {
                            <div class="search-no-results">
                                <i class="fas fa-search" aria-hidden="true"></i>
                                <div>{format!("No results found for \"{}\"", query.trim())}</div>
                                <small>"Try different keywords or check spelling"</small>
                            </div>
                        }
                        .into_view();
                    }
                    let count = hits.len();
                    let items = hits
                        .into_iter()
                        .map(|hit| {
                            let opens = hit.opens.clone();
                            view! {
                                <button
                                    role="menuitem"
                                    class="search-result-item"
                                    on:click=move |_| open_result(opens.clone())
                                >
                                    <i class=hit.icon aria-hidden="true"></i>
                                    <span class="result-name">{hit.label}</span>
                                    <small class="result-type">{hit.kind.label()}</small>
                                </button>
                            }
                        })
                        .collect_view();
                    view! {
                        <div class="search-results">
                            <div class="search-results-header">
                                <span>{format!("Search results for \"{}\"", query.trim())}</span>
                                <small>
                                    {format!("{count} result{}", if count == 1 { "" } else { "s" })}
                                </small>
                            </div>
                            {items}
                        </div>
                    }
                    .into_view()
                }}
            </Show>
        </nav>
    }
}

#[component]
fn LauncherList() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <For
            each=move || apps::launcher_apps()
            key=|app| app.app_id.to_string()
            let:app
        >
            {{
                let app_id = app.app_id.clone();
                view! {
                    <button
                        role="menuitem"
                        class="start-menu-item"
                        on:click=move |_| {
                            runtime.dispatch_action(DesktopAction::OpenApp {
                                app_id: app_id.clone(),
                            });
                            runtime.dispatch_action(DesktopAction::CloseStartMenu);
                        }
                    >
                        <i class=app.icon.clone() aria-hidden="true"></i>
                        <span>{app.title.clone()}</span>
                    </button>
                }
            }}
        </For>
    }
}

#[component]
fn ToastStack() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || runtime.toasts.get()
                key=|toast| toast.id
                let:toast
            >
                <ToastItem toast />
            </For>
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = toast.id;

    view! {
        <div
            class=format!("toast toast-{}", toast.severity.as_str())
            on:click=move |_| runtime.dismiss_toast(id)
        >
            {toast.message}
        </div>
    }
}

fn key_chord_from_event(ev: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        code: ev.code(),
        ctrl: ev.ctrl_key(),
        alt: ev.alt_key(),
        shift: ev.shift_key(),
        meta: ev.meta_key(),
    }
}

fn browser_screen_size() -> Option<(i32, i32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as i32, height as i32))
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

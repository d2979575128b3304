//! Window bodies for the built-in pseudo-apps.

use super::*;
use crate::{
    apps::{
        browser::QUICK_LINKS, explorer::SIDEBAR_LOCATIONS, AppContent, BrowserPage,
        CalculatorKey, CalculatorState, ExplorerState,
    },
    model::AppId,
    preferences::{AnimationSpeed, Customization, ThemeMode, WALLPAPERS},
    vfs::{EntryKind, VfsEntry},
};

const KEYPAD: [[&str; 4]; 5] = [
    ["clear", "backspace", "%", "/"],
    ["7", "8", "9", "*"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "=", ""],
];

fn keypad_caption(label: &str) -> &str {
    match label {
        "clear" => "C",
        "backspace" => "\u{232b}",
        "*" => "\u{00d7}",
        "/" => "\u{00f7}",
        other => other,
    }
}

#[component]
pub(super) fn AppContentView(app_id: AppId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app_id);
    let content = Signal::derive(move || {
        runtime.state.with(|state| {
            app_id.with_value(|id| state.session(id).map(|session| session.content.clone()))
        })
    });
    // Re-render only when the kind of content changes, not on every edit.
    let kind = create_memo(move |_| {
        content.get().map(|content| match content {
            AppContent::Explorer(_) => "explorer",
            AppContent::Notepad { .. } => "notepad",
            AppContent::Calculator(_) => "calculator",
            AppContent::Browser(_) => "browser",
            AppContent::Settings => "settings",
            AppContent::MusicPlayer => "music-player",
            AppContent::SystemMonitor => "system-monitor",
            AppContent::Placeholder { .. } => "placeholder",
        })
    });

    move || {
        let id = app_id.get_value();
        match kind.get() {
            Some("explorer") => view! { <ExplorerView app_id=id content /> }.into_view(),
            Some("notepad") => view! { <NotepadView app_id=id content /> }.into_view(),
            Some("calculator") => view! { <CalculatorView app_id=id content /> }.into_view(),
            Some("browser") => view! { <BrowserView app_id=id content /> }.into_view(),
            Some("settings") => view! { <SettingsView /> }.into_view(),
            Some("music-player") => view! {
                <div class="app-music-player">
                    <i class="fas fa-music" aria-hidden="true"></i>
                    <p>"No track playing"</p>
                </div>
            }
            .into_view(),
            Some("system-monitor") => view! { <SystemMonitorView /> }.into_view(),
            Some(_) => {
                let message = match content.get_untracked() {
                    Some(AppContent::Placeholder { message }) => message,
                    _ => String::new(),
                };
                view! { <div class="app-placeholder"><p>{message}</p></div> }.into_view()
            }
            None => ().into_view(),
        }
    }
}

#[component]
fn ExplorerView(app_id: AppId, content: Signal<Option<AppContent>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app_id);
    let explorer = Signal::derive(move || match content.get() {
        Some(AppContent::Explorer(explorer)) => explorer,
        _ => ExplorerState::default(),
    });
    let entries = Signal::derive(move || {
        let path = explorer.get().current_path;
        runtime.state.with(|state| state.vfs.list_children(&path))
    });
    let navigate = move |path: &'static str| {
        runtime.dispatch_action(DesktopAction::ExplorerNavigate {
            app_id: app_id.get_value(),
            path: path.to_string(),
        });
    };
    let open_entry = move |entry: VfsEntry| {
        runtime.dispatch_action(DesktopAction::ExplorerOpenEntry {
            app_id: app_id.get_value(),
            entry,
        });
    };

    view! {
        <div class="app-explorer">
            <aside class="explorer-sidebar">
                {SIDEBAR_LOCATIONS
                    .into_iter()
                    .map(|(label, path)| {
                        view! {
                            <button
                                class=move || {
                                    if explorer.get().current_path == path {
                                        "sidebar-item active"
                                    } else {
                                        "sidebar-item"
                                    }
                                }
                                on:click=move |_| navigate(path)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </aside>
            <div class="explorer-main">
                <div class="explorer-toolbar">
                    <span class="explorer-location">{move || explorer.get().location_label}</span>
                    <button on:click=move |_| {
                        runtime.request_new_entry(app_id.get_value(), EntryKind::Folder)
                    }>
                        <i class="fas fa-folder-plus" aria-hidden="true"></i>
                        " New Folder"
                    </button>
                    <button on:click=move |_| {
                        runtime.request_new_entry(app_id.get_value(), EntryKind::File)
                    }>
                        <i class="fas fa-file-circle-plus" aria-hidden="true"></i>
                        " New File"
                    </button>
                </div>
                <div class="explorer-grid">
                    <For
                        each=move || entries.get().into_iter().enumerate()
                        key=|(position, entry)| (*position, entry.name.clone())
                        let:item
                    >
                        {{
                            let (_, entry) = item;
                            let opened = entry.clone();
                            view! {
                                <button
                                    class="explorer-entry"
                                    title=entry.kind.label()
                                    on:dblclick=move |_| open_entry(opened.clone())
                                >
                                    <i class=entry.icon.clone() aria-hidden="true"></i>
                                    <span class="entry-name">{entry.name.clone()}</span>
                                    <span class="entry-size">{entry.size_label.clone()}</span>
                                </button>
                            }
                        }}
                    </For>
                </div>
            </div>
        </div>
    }
}

#[component]
fn NotepadView(app_id: AppId, content: Signal<Option<AppContent>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let initial = match content.get_untracked() {
        Some(AppContent::Notepad { text }) => text,
        _ => String::new(),
    };

    view! {
        <textarea
            class="app-notepad"
            spellcheck="false"
            prop:value=initial
            on:input=move |ev| {
                runtime.dispatch_action(DesktopAction::NotepadEdit {
                    app_id: app_id.clone(),
                    text: event_target_value(&ev),
                });
            }
        ></textarea>
    }
}

#[component]
fn CalculatorView(app_id: AppId, content: Signal<Option<AppContent>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app_id);
    let calculator = Signal::derive(move || match content.get() {
        Some(AppContent::Calculator(calculator)) => calculator,
        _ => CalculatorState::default(),
    });
    let press = move |label: &'static str| {
        if let Some(key) = CalculatorKey::parse(label) {
            runtime.dispatch_action(DesktopAction::CalculatorInput {
                app_id: app_id.get_value(),
                key,
            });
        }
    };

    view! {
        <div class="app-calculator">
            <div class="calculator-display" aria-live="polite">
                <span class="calculator-pending">
                    {move || {
                        let calc = calculator.get();
                        match (calc.previous, calc.pending) {
                            (Some(previous), Some(op)) => format!("{previous} {}", op.symbol()),
                            _ => String::new(),
                        }
                    }}
                </span>
                <span class="calculator-value">{move || calculator.get().display}</span>
            </div>
            <div class="calculator-keypad">
                {KEYPAD
                    .into_iter()
                    .flatten()
                    .filter(|label| !label.is_empty())
                    .map(|label| {
                        view! {
                            <button class="calculator-key" data-key=label on:click=move |_| press(label)>
                                {keypad_caption(label)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn BrowserView(app_id: AppId, content: Signal<Option<AppContent>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app_id);
    let page = Signal::derive(move || match content.get() {
        Some(AppContent::Browser(browser)) => browser.page,
        _ => BrowserPage::Blank,
    });
    let address = create_rw_signal(String::new());
    let navigate = move |url: String| {
        address.set(url.clone());
        runtime.dispatch_action(DesktopAction::BrowserNavigate {
            app_id: app_id.get_value(),
            url,
        });
    };

    view! {
        <div class="app-browser">
            <form
                class="browser-bar"
                on:submit=move |ev| {
                    ev.prevent_default();
                    navigate(address.get_untracked());
                }
            >
                <input
                    type="text"
                    placeholder="Enter URL"
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))
                />
                <button type="submit">"Go"</button>
            </form>
            <div class="browser-page">
                {move || match page.get() {
                    BrowserPage::Blank => view! {
                        <div class="browser-home">
                            {QUICK_LINKS
                                .into_iter()
                                .map(|(label, url)| {
                                    view! {
                                        <button on:click=move |_| navigate(url.to_string())>{label}</button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_view(),
                    BrowserPage::Loading { url } => view! {
                        <div class="browser-loading">
                            <i class="fas fa-spinner fa-spin" aria-hidden="true"></i>
                            <p>{format!("Loading {url}...")}</p>
                        </div>
                    }
                    .into_view(),
                    BrowserPage::Loaded { url } => view! {
                        <div class="browser-loaded">
                            <h2>{url.clone()}</h2>
                            <p>"This is a simulated page. Real browsing is not available in this environment."</p>
                        </div>
                    }
                    .into_view(),
                }}
            </div>
        </div>
    }
}

#[component]
fn SettingsView() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let preferences = Signal::derive(move || runtime.state.with(|state| state.preferences.clone()));
    let theme = create_rw_signal(preferences.get_untracked().theme);
    let speed = create_rw_signal(preferences.get_untracked().customization.animation_speed);
    let notifications = create_rw_signal(preferences.get_untracked().notifications_enabled);
    let language = create_rw_signal(preferences.get_untracked().language);
    let date_format = create_rw_signal(preferences.get_untracked().date_format);
    let time_format = create_rw_signal(preferences.get_untracked().time_format);

    view! {
        <div class="app-settings">
            <section class="settings-group">
                <h3>"Appearance"</h3>
                <button on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleTheme)>
                    "Toggle theme"
                </button>
                <div class="wallpaper-grid">
                    {WALLPAPERS
                        .into_iter()
                        .map(|(id, css)| {
                            view! {
                                <button
                                    class=move || {
                                        if preferences.get().wallpaper_id == id {
                                            "wallpaper-swatch active"
                                        } else {
                                            "wallpaper-swatch"
                                        }
                                    }
                                    style=format!("background:{css};")
                                    aria-label=id
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::SetWallpaper {
                                            wallpaper_id: id.to_string(),
                                        })
                                    }
                                ></button>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="settings-group">
                <h3>"System"</h3>
                <label>
                    "Theme "
                    <select on:change=move |ev| {
                        theme.set(if event_target_value(&ev) == "dark" { ThemeMode::Dark } else { ThemeMode::Light })
                    }>
                        <option value="light" selected=move || theme.get() == ThemeMode::Light>"Light"</option>
                        <option value="dark" selected=move || theme.get() == ThemeMode::Dark>"Dark"</option>
                    </select>
                </label>
                <label>
                    "Animation speed "
                    <select on:change=move |ev| {
                        speed.set(match event_target_value(&ev).as_str() {
                            "slow" => AnimationSpeed::Slow,
                            "fast" => AnimationSpeed::Fast,
                            _ => AnimationSpeed::Normal,
                        })
                    }>
                        <option value="slow" selected=move || speed.get() == AnimationSpeed::Slow>"Slow"</option>
                        <option value="normal" selected=move || speed.get() == AnimationSpeed::Normal>"Normal"</option>
                        <option value="fast" selected=move || speed.get() == AnimationSpeed::Fast>"Fast"</option>
                    </select>
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || notifications.get()
                        on:change=move |ev| notifications.set(event_target_checked(&ev))
                    />
                    " Show notifications"
                </label>
                <button on:click=move |_| {
                    runtime.dispatch_action(DesktopAction::ApplySystemSettings {
                        theme: theme.get_untracked(),
                        animation_speed: speed.get_untracked(),
                        notifications_enabled: notifications.get_untracked(),
                    })
                }>"Apply"</button>
            </section>

            <section class="settings-group">
                <h3>"Language & Region"</h3>
                <label>
                    "Language "
                    <select on:change=move |ev| language.set(event_target_value(&ev))>
                        {["en", "es", "fr", "de"]
                            .into_iter()
                            .map(|code| view! {
                                <option value=code selected=move || language.get() == code>{code}</option>
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Date format "
                    <select on:change=move |ev| date_format.set(event_target_value(&ev))>
                        {["MM/DD/YYYY", "DD/MM/YYYY", "YYYY-MM-DD"]
                            .into_iter()
                            .map(|format| view! {
                                <option value=format selected=move || date_format.get() == format>{format}</option>
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Time format "
                    <select on:change=move |ev| time_format.set(event_target_value(&ev))>
                        <option value="24h" selected=move || time_format.get() == "24h">"24-hour"</option>
                        <option value="12h" selected=move || time_format.get() == "12h">"12-hour"</option>
                    </select>
                </label>
                <button on:click=move |_| {
                    runtime.dispatch_action(DesktopAction::ApplyLanguageSettings {
                        language: language.get_untracked(),
                        date_format: date_format.get_untracked(),
                        time_format: time_format.get_untracked(),
                    })
                }>"Apply"</button>
            </section>

            <section class="settings-group">
                <h3>"Customization"</h3>
                <CustomizationPanel />
            </section>
        </div>
    }
}

#[component]
fn CustomizationPanel() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let draft = create_rw_signal(
        runtime
            .state
            .with_untracked(|state| state.preferences.customization),
    );
    let applied = create_memo(move |_| runtime.state.with(|state| state.preferences.customization));
    create_effect(move |_| draft.set(applied.get()));

    let slider = move |label: &'static str,
                       min: u32,
                       max: u32,
                       read: fn(&Customization) -> u32,
                       write: fn(&mut Customization, u32)| {
        view! {
            <label class="customization-slider">
                {label}
                <input
                    type="range"
                    min=min
                    max=max
                    prop:value=move || draft.with(read).to_string()
                    on:input=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                            draft.update(|draft| write(draft, value));
                        }
                    }
                />
                <span>{move || draft.with(read)}</span>
            </label>
        }
    };

    view! {
        {slider("Blur intensity", 0, 30, |c| c.blur_intensity, |c, v| c.blur_intensity = v)}
        {slider("Particles", 0, 200, |c| c.particle_count, |c, v| c.particle_count = v)}
        {slider("Window opacity", 50, 100, |c| c.window_opacity, |c, v| c.window_opacity = v)}
        {slider(
            "Taskbar height",
            40,
            100,
            |c| c.taskbar_height.max(0) as u32,
            |c, v| c.taskbar_height = v as i32,
        )}
        <div class="customization-actions">
            <button on:click=move |_| {
                runtime.dispatch_action(DesktopAction::ApplyCustomization {
                    customization: draft.get_untracked(),
                })
            }>"Apply"</button>
            <button on:click=move |_| runtime.dispatch_action(DesktopAction::ResetCustomization)>
                "Reset"
            </button>
        </div>
    }
}

#[component]
fn SystemMonitorView() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <div class="app-system-monitor">
            <p>{move || format!("Open windows: {}", runtime.state.with(|state| state.sessions.len()))}</p>
            <p>{move || {
                let focused = runtime.state.with(|state| {
                    state.focused_session().map(|session| session.title.clone())
                });
                format!("Focused: {}", focused.unwrap_or_else(|| "none".to_string()))
            }}</p>
            <p>{move || {
                runtime.state.track();
                let pending = runtime.runtime.with_value(|shell| shell.scheduler().pending().len());
                format!("Pending tasks: {pending}")
            }}</p>
        </div>
    }
}

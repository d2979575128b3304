//! Reducer helpers for theme, wallpaper, language, and customization preferences.

use platform_host::{Personality, Severity};

use crate::{
    model::ShellState,
    preferences::{customization_settings, wallpaper_css, Customization, PreferenceKey, ThemeMode},
    reducer::{clamp_sessions_into_viewport, notify, DesktopAction, RuntimeEffect},
};

/// Handles preference actions. Returns `false` for actions it does not own.
pub(super) fn reduce_preferences_action(
    state: &mut ShellState,
    action: &DesktopAction,
    effects: &mut Vec<RuntimeEffect>,
) -> bool {
    match action {
        DesktopAction::ToggleTheme => {
            let theme = state.preferences.theme.toggled();
            state.preferences.theme = theme;
            apply_theme(theme, effects);
            effects.push(RuntimeEffect::PersistPreference(PreferenceKey::Theme));
            let label = match theme {
                ThemeMode::Dark => "Dark",
                ThemeMode::Light => "Light",
            };
            notify(
                state,
                effects,
                &format!("{label} theme activated"),
                Severity::Info,
            );
            effects.push(RuntimeEffect::Announce {
                message: format!("Theme changed to {} mode", theme.as_str()),
                personality: Personality::Professional,
            });
        }
        DesktopAction::SetWallpaper { wallpaper_id } => {
            let Some(css) = wallpaper_css(wallpaper_id) else {
                notify(
                    state,
                    effects,
                    "Invalid wallpaper selection",
                    Severity::Error,
                );
                return true;
            };
            state.preferences.wallpaper_id = wallpaper_id.clone();
            effects.push(RuntimeEffect::ApplyVisualSetting {
                name: "wallpaper",
                value: css.to_string(),
            });
            effects.push(RuntimeEffect::PersistPreference(PreferenceKey::Wallpaper));
            notify(
                state,
                effects,
                "Wallpaper changed successfully!",
                Severity::Success,
            );
            effects.push(RuntimeEffect::Announce {
                message: format!("Wallpaper changed to {wallpaper_id}"),
                personality: Personality::Enthusiastic,
            });
        }
        DesktopAction::ApplySystemSettings {
            theme,
            animation_speed,
            notifications_enabled,
        } => {
            state.preferences.theme = *theme;
            state.preferences.customization.animation_speed = *animation_speed;
            state.preferences.notifications_enabled = *notifications_enabled;
            apply_theme(*theme, effects);
            effects.push(RuntimeEffect::ApplyVisualSetting {
                name: "animation_speed",
                value: animation_speed.duration().to_string(),
            });
            effects.extend(
                [
                    PreferenceKey::Theme,
                    PreferenceKey::Customization,
                    PreferenceKey::Notifications,
                ]
                .map(RuntimeEffect::PersistPreference),
            );
            notify(
                state,
                effects,
                "System settings applied successfully!",
                Severity::Success,
            );
        }
        DesktopAction::ApplyLanguageSettings {
            language,
            date_format,
            time_format,
        } => {
            state.preferences.language = language.clone();
            state.preferences.date_format = date_format.clone();
            state.preferences.time_format = time_format.clone();
            effects.extend(
                [
                    PreferenceKey::Language,
                    PreferenceKey::DateFormat,
                    PreferenceKey::TimeFormat,
                ]
                .map(RuntimeEffect::PersistPreference),
            );
            notify(
                state,
                effects,
                "Language settings applied successfully!",
                Severity::Success,
            );
        }
        DesktopAction::ApplyCustomization { customization } => {
            set_customization(state, customization.normalized(), effects);
            effects.push(RuntimeEffect::PersistPreference(PreferenceKey::Customization));
            notify(
                state,
                effects,
                "Customization applied successfully!",
                Severity::Success,
            );
        }
        DesktopAction::ResetCustomization => {
            set_customization(state, Customization::default(), effects);
            effects.push(RuntimeEffect::ClearPreference(PreferenceKey::Customization));
            notify(
                state,
                effects,
                "Customization reset to default!",
                Severity::Info,
            );
        }
        DesktopAction::HydratePreferences { preferences } => {
            state.preferences = preferences.clone();
            state.refresh_viewport();
            clamp_sessions_into_viewport(state);
            effects.extend(
                state
                    .preferences
                    .visual_settings()
                    .into_iter()
                    .map(|(name, value)| RuntimeEffect::ApplyVisualSetting { name, value }),
            );
        }
        _ => return false,
    }

    true
}

fn apply_theme(theme: ThemeMode, effects: &mut Vec<RuntimeEffect>) {
    effects.push(RuntimeEffect::ApplyVisualSetting {
        name: "theme",
        value: theme.as_str().to_string(),
    });
}

fn set_customization(
    state: &mut ShellState,
    customization: Customization,
    effects: &mut Vec<RuntimeEffect>,
) {
    state.preferences.customization = customization;
    state.refresh_viewport();
    clamp_sessions_into_viewport(state);
    effects.extend(
        customization_settings(&customization)
            .into_iter()
            .map(|(name, value)| RuntimeEffect::ApplyVisualSetting { name, value }),
    );
}

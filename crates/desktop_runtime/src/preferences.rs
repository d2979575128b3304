//! Shell preferences: typed values, store keys with defaults, and boot-time loading.
//!
//! Each preference lives under its own key as JSON text. A missing or unreadable key falls back to
//! its default and never aborts boot.

use platform_host::{load_pref_with, save_pref_with, PrefsError, PrefsStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const THEME_KEY: &str = "shell.theme.v1";
pub const WALLPAPER_KEY: &str = "shell.wallpaper.v1";
pub const LANGUAGE_KEY: &str = "shell.language.v1";
pub const DATE_FORMAT_KEY: &str = "shell.date_format.v1";
pub const TIME_FORMAT_KEY: &str = "shell.time_format.v1";
pub const NOTIFICATIONS_KEY: &str = "shell.notifications.v1";
pub const CUSTOMIZATION_KEY: &str = "shell.customization.v1";

pub const DEFAULT_WALLPAPER_ID: &str = "gradient1";

/// Built-in wallpapers as `(id, css background)`.
pub const WALLPAPERS: [(&str, &str); 6] = [
    ("gradient1", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
    ("gradient2", "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)"),
    ("gradient3", "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)"),
    ("gradient4", "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)"),
    ("gradient5", "linear-gradient(135deg, #fa709a 0%, #fee140 100%)"),
    ("gradient6", "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)"),
];

pub fn wallpaper_css(wallpaper_id: &str) -> Option<&'static str> {
    WALLPAPERS
        .iter()
        .find(|(id, _)| *id == wallpaper_id)
        .map(|(_, css)| *css)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// CSS transition duration for this speed.
    pub fn duration(self) -> &'static str {
        match self {
            Self::Slow => "0.6s",
            Self::Normal => "0.3s",
            Self::Fast => "0.15s",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl IconSize {
    pub fn pixels(self) -> u32 {
        match self {
            Self::Small => 48,
            Self::Medium => 64,
            Self::Large => 80,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customization {
    pub animation_speed: AnimationSpeed,
    pub blur_intensity: u32,
    pub particle_count: u32,
    /// Window opacity in percent.
    pub window_opacity: u32,
    pub icon_size: IconSize,
    pub taskbar_height: i32,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            animation_speed: AnimationSpeed::Normal,
            blur_intensity: 10,
            particle_count: 50,
            window_opacity: 95,
            icon_size: IconSize::Medium,
            taskbar_height: crate::model::DEFAULT_TASKBAR_HEIGHT_PX,
        }
    }
}

impl Customization {
    /// Clamps slider values into the ranges the settings panel offers.
    pub fn normalized(self) -> Self {
        Self {
            blur_intensity: self.blur_intensity.min(30),
            particle_count: self.particle_count.min(200),
            window_opacity: self.window_opacity.clamp(50, 100),
            taskbar_height: self.taskbar_height.clamp(40, 100),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellPreferences {
    pub theme: ThemeMode,
    pub wallpaper_id: String,
    pub language: String,
    pub date_format: String,
    pub time_format: String,
    pub notifications_enabled: bool,
    pub customization: Customization,
}

impl Default for ShellPreferences {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            wallpaper_id: DEFAULT_WALLPAPER_ID.to_string(),
            language: "en".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
            time_format: "24h".to_string(),
            notifications_enabled: true,
            customization: Customization::default(),
        }
    }
}

impl ShellPreferences {
    /// Every visual setting as `(name, value)`, in the order the appearance surface applies them.
    pub fn visual_settings(&self) -> Vec<(&'static str, String)> {
        let mut settings = vec![("theme", self.theme.as_str().to_string())];
        if let Some(css) = wallpaper_css(&self.wallpaper_id) {
            settings.push(("wallpaper", css.to_string()));
        }
        settings.extend(customization_settings(&self.customization));
        settings
    }
}

pub fn customization_settings(customization: &Customization) -> Vec<(&'static str, String)> {
    vec![
        (
            "animation_speed",
            customization.animation_speed.duration().to_string(),
        ),
        (
            "blur_intensity",
            format!("{}px", customization.blur_intensity),
        ),
        ("particle_count", customization.particle_count.to_string()),
        (
            "window_opacity",
            format!("{:.2}", f64::from(customization.window_opacity) / 100.0),
        ),
        ("icon_size", format!("{}px", customization.icon_size.pixels())),
        ("taskbar_height", format!("{}px", customization.taskbar_height)),
    ]
}

/// A single stored preference slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Theme,
    Wallpaper,
    Language,
    DateFormat,
    TimeFormat,
    Notifications,
    Customization,
}

impl PreferenceKey {
    pub const ALL: [Self; 7] = [
        Self::Theme,
        Self::Wallpaper,
        Self::Language,
        Self::DateFormat,
        Self::TimeFormat,
        Self::Notifications,
        Self::Customization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => THEME_KEY,
            Self::Wallpaper => WALLPAPER_KEY,
            Self::Language => LANGUAGE_KEY,
            Self::DateFormat => DATE_FORMAT_KEY,
            Self::TimeFormat => TIME_FORMAT_KEY,
            Self::Notifications => NOTIFICATIONS_KEY,
            Self::Customization => CUSTOMIZATION_KEY,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferencesError {
    #[error("failed to load preference `{key}`: {source}")]
    Load {
        key: &'static str,
        #[source]
        source: PrefsError,
    },
    #[error("failed to save preference `{key}`: {source}")]
    Save {
        key: &'static str,
        #[source]
        source: PrefsError,
    },
}

async fn load_or_default<T, S>(store: &S, key: PreferenceKey, default: T) -> T
where
    T: serde::de::DeserializeOwned,
    S: PrefsStore + ?Sized,
{
    match load_pref_with::<S, T>(store, key.as_str()).await {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(source) => {
            let err = PreferencesError::Load {
                key: key.as_str(),
                source,
            };
            leptos::logging::warn!("{err}; using default");
            default
        }
    }
}

/// Reads every preference, substituting defaults for missing or unreadable keys.
pub async fn load_preferences<S: PrefsStore + ?Sized>(store: &S) -> ShellPreferences {
    let defaults = ShellPreferences::default();
    let wallpaper_id =
        load_or_default(store, PreferenceKey::Wallpaper, defaults.wallpaper_id.clone()).await;
    ShellPreferences {
        theme: load_or_default(store, PreferenceKey::Theme, defaults.theme).await,
        wallpaper_id: if wallpaper_css(&wallpaper_id).is_some() {
            wallpaper_id
        } else {
            defaults.wallpaper_id.clone()
        },
        language: load_or_default(store, PreferenceKey::Language, defaults.language.clone()).await,
        date_format: load_or_default(store, PreferenceKey::DateFormat, defaults.date_format.clone())
            .await,
        time_format: load_or_default(store, PreferenceKey::TimeFormat, defaults.time_format.clone())
            .await,
        notifications_enabled: load_or_default(
            store,
            PreferenceKey::Notifications,
            defaults.notifications_enabled,
        )
        .await,
        customization: load_or_default(store, PreferenceKey::Customization, defaults.customization)
            .await
            .normalized(),
    }
}

/// Writes the current value of `key`.
///
/// # Errors
///
/// Returns [`PreferencesError::Save`] when encoding or the store write fails.
pub async fn persist_preference<S: PrefsStore + ?Sized>(
    store: &S,
    preferences: &ShellPreferences,
    key: PreferenceKey,
) -> Result<(), PreferencesError> {
    let name = key.as_str();
    let result = match key {
        PreferenceKey::Theme => save_pref_with(store, name, &preferences.theme).await,
        PreferenceKey::Wallpaper => save_pref_with(store, name, &preferences.wallpaper_id).await,
        PreferenceKey::Language => save_pref_with(store, name, &preferences.language).await,
        PreferenceKey::DateFormat => save_pref_with(store, name, &preferences.date_format).await,
        PreferenceKey::TimeFormat => save_pref_with(store, name, &preferences.time_format).await,
        PreferenceKey::Notifications => {
            save_pref_with(store, name, &preferences.notifications_enabled).await
        }
        PreferenceKey::Customization => {
            save_pref_with(store, name, &preferences.customization).await
        }
    };
    result.map_err(|source| PreferencesError::Save { key: name, source })
}

/// Removes `key` so the next boot reads its default.
///
/// # Errors
///
/// Returns [`PreferencesError::Save`] when the store delete fails.
pub async fn clear_preference<S: PrefsStore + ?Sized>(
    store: &S,
    key: PreferenceKey,
) -> Result<(), PreferencesError> {
    store
        .delete_pref(key.as_str())
        .await
        .map_err(|source| PreferencesError::Save {
            key: key.as_str(),
            source,
        })
}

/// Formats a wall-clock time per the `time_format` preference (`"12h"` or `"24h"`).
pub fn format_clock_time(time_format: &str, hour: u32, minute: u32) -> String {
    if time_format == "12h" {
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{display_hour}:{minute:02} {suffix}")
    } else {
        format!("{hour:02}:{minute:02}")
    }
}

/// Formats a calendar date per the `date_format` preference.
pub fn format_clock_date(date_format: &str, year: i32, month: u32, day: u32) -> String {
    match date_format {
        "DD/MM/YYYY" => format!("{day:02}/{month:02}/{year}"),
        "YYYY-MM-DD" => format!("{year}-{month:02}-{day:02}"),
        _ => format!("{month:02}/{day:02}/{year}"),
    }
}

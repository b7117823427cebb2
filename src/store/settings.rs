//! Dashboard display settings, user name and daily focus.
//!
//! Stored under three keys: `dashboardSettings`, `userName` and `focus`.
//! The Pomodoro cycle never reads any of these.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StoreError};

/// Storage key for display settings
pub const SETTINGS_KEY: &str = "dashboardSettings";
/// Storage key for the onboarding name
pub const USER_NAME_KEY: &str = "userName";
/// Storage key for the daily focus note
pub const FOCUS_KEY: &str = "focus";

/// Largest accepted blur radius in pixels
pub const MAX_BLUR_AMOUNT: u32 = 64;

// ============================================================================
// Gradient presets
// ============================================================================

/// A named background gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientPreset {
    /// Display name
    pub name: &'static str,
    /// Gradient class string
    pub class: &'static str,
}

/// Built-in background gradients. The first one is the default.
pub const GRADIENT_PRESETS: [GradientPreset; 5] = [
    GradientPreset {
        name: "Mystic Night",
        class: "from-gray-900 via-purple-900 to-gray-900",
    },
    GradientPreset {
        name: "Ocean Depth",
        class: "from-blue-900 via-purple-900 to-pink-900",
    },
    GradientPreset {
        name: "Forest Dream",
        class: "from-green-900 via-teal-900 to-blue-900",
    },
    GradientPreset {
        name: "Sunset Flame",
        class: "from-orange-900 via-red-900 to-purple-900",
    },
    GradientPreset {
        name: "Aurora",
        class: "from-indigo-900 via-purple-900 to-pink-900",
    },
];

/// Looks up a preset by name, ignoring case, spaces and hyphens.
pub fn find_gradient_preset(name: &str) -> Option<&'static GradientPreset> {
    let wanted = normalize_preset_name(name);
    GRADIENT_PRESETS
        .iter()
        .find(|preset| normalize_preset_name(preset.name) == wanted)
}

fn normalize_preset_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// ColorScheme
// ============================================================================

/// Accent color of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Yellow accent (default)
    #[default]
    Yellow,
    /// Blue accent
    Blue,
    /// Purple accent
    Purple,
    /// Green accent
    Green,
    /// Pink accent
    Pink,
}

impl ColorScheme {
    /// All schemes in display order.
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::Yellow,
        ColorScheme::Blue,
        ColorScheme::Purple,
        ColorScheme::Green,
        ColorScheme::Pink,
    ];

    /// Returns the lowercase name used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Yellow => "yellow",
            ColorScheme::Blue => "blue",
            ColorScheme::Purple => "purple",
            ColorScheme::Green => "green",
            ColorScheme::Pink => "pink",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == lower)
            .ok_or_else(|| {
                let names: Vec<_> = ColorScheme::ALL.iter().map(|c| c.as_str()).collect();
                format!("カラースキームは {} のいずれかです", names.join(", "))
            })
    }
}

// ============================================================================
// DashboardSettings
// ============================================================================

/// How `background_value` is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    /// A gradient class string
    #[default]
    Gradient,
    /// An image URL
    Image,
}

/// Visual customization of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    /// Kind of background
    pub background_type: BackgroundType,
    /// Gradient class or image URL
    pub background_value: String,
    /// Accent color
    pub color_scheme: ColorScheme,
    /// Whether panels use the frosted glass look
    pub glass_effect: bool,
    /// Blur radius for the glass effect, in pixels
    pub blur_amount: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            background_type: BackgroundType::Gradient,
            background_value: GRADIENT_PRESETS[0].class.to_string(),
            color_scheme: ColorScheme::default(),
            glass_effect: true,
            blur_amount: 10,
        }
    }
}

impl DashboardSettings {
    /// Switches to a gradient background.
    pub fn with_gradient(mut self, preset: &GradientPreset) -> Self {
        self.background_type = BackgroundType::Gradient;
        self.background_value = preset.class.to_string();
        self
    }

    /// Switches to an image background.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.background_type = BackgroundType::Image;
        self.background_value = url.into();
        self
    }

    /// Returns the preset matching the current gradient, if any.
    pub fn gradient_preset(&self) -> Option<&'static GradientPreset> {
        if self.background_type != BackgroundType::Gradient {
            return None;
        }
        GRADIENT_PRESETS
            .iter()
            .find(|preset| preset.class == self.background_value)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidSettings` describing the first problem.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.background_value.trim().is_empty() {
            let what = match self.background_type {
                BackgroundType::Gradient => "グラデーションが指定されていません",
                BackgroundType::Image => "画像URLが指定されていません",
            };
            return Err(StoreError::InvalidSettings(what.to_string()));
        }
        if self.blur_amount > MAX_BLUR_AMOUNT {
            return Err(StoreError::InvalidSettings(format!(
                "blurAmount は0-{}の範囲で指定してください",
                MAX_BLUR_AMOUNT
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Settings, user name and focus note on top of a `KeyValueStore`.
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Wraps `store`; each value lives under its own key.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads display settings, falling back to defaults when missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn load(&self) -> Result<DashboardSettings, StoreError> {
        let Some(value) = self.store.get(SETTINGS_KEY)? else {
            return Ok(DashboardSettings::default());
        };

        match serde_json::from_value::<DashboardSettings>(value) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!("保存済みの表示設定を読み込めませんでした: {}", e);
                Ok(DashboardSettings::default())
            }
        }
    }

    /// Validates and stores display settings.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidSettings` without writing anything if
    /// validation fails.
    pub fn save(&self, settings: &DashboardSettings) -> Result<(), StoreError> {
        settings.validate()?;
        self.store.set(SETTINGS_KEY, serde_json::to_value(settings)?)
    }

    /// Returns the onboarding name, if one was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn user_name(&self) -> Result<Option<String>, StoreError> {
        self.get_string(USER_NAME_KEY)
    }

    /// Stores the onboarding name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyName` if the name is blank.
    pub fn set_user_name(&self, name: &str) -> Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        self.store.set(USER_NAME_KEY, name.into())?;
        Ok(name.to_string())
    }

    /// Returns the daily focus note, if one was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn focus(&self) -> Result<Option<String>, StoreError> {
        self.get_string(FOCUS_KEY)
    }

    /// Stores the daily focus note. An empty note clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn set_focus(&self, focus: &str) -> Result<(), StoreError> {
        self.store.set(FOCUS_KEY, focus.trim().into())
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .get(key)?
            .and_then(|value| value.as_str().map(str::to_string))
            .filter(|s| !s.is_empty()))
    }
}

//! HUD configuration (TOML).

use crate::selection::HighlightLevels;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f32::consts::PI;
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::warn;
use vrpong_core::Preset;

pub const DEFAULT_HUD_CONFIG_PATH: &str = "config/hud.toml";

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HudConfigError {
    #[error("the menu needs at least one button")]
    NoButtons,
    #[error("preset {0} is bound to more than one button")]
    DuplicatePreset(Preset),
    #[error("highlight duration must be positive, got {0}")]
    NonPositiveDuration(f32),
    #[error("button {0} has a degenerate hitbox")]
    EmptyHitbox(Preset),
}

/// One menu button.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ButtonSpec {
    pub preset: Preset,
    /// Caption; defaults to the preset's own label.
    #[serde(default)]
    pub label: Option<String>,
    /// Button center inside the HUD container (x, y).
    pub offset: [f32; 2],
    /// Hitbox extents (width, height, depth).
    #[serde(default = "default_hitbox_size")]
    pub hitbox_size: [f32; 3],
}

fn default_hitbox_size() -> [f32; 3] {
    [0.6, 0.16, 0.04]
}

/// Countdown overlay placement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Digit height in world units.
    pub font_size: f32,
    /// Height of the play box the digits are centered in.
    pub box_height: f32,
    /// Depth of the play box face the digits sit on.
    pub box_position_z: f32,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            font_size: 1.3,
            box_height: 1.0,
            box_position_z: -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HudConfig {
    /// Container origin in world space.
    pub container_position: [f32; 3],
    /// Container yaw in radians; a half turn faces the player.
    pub container_yaw: f32,
    /// Camera position the pointer ray starts from.
    pub camera_position: [f32; 3],
    /// Caption glyph height in world units.
    pub caption_size: f32,
    /// Optional font used to measure captions and countdown digits.
    pub font_path: Option<PathBuf>,
    /// Preset shown as selected before the player picks one.
    pub initial_selection: Option<Preset>,
    pub buttons: Vec<ButtonSpec>,
    pub highlight: HighlightLevels,
    pub countdown: CountdownConfig,
}

impl Default for HudConfig {
    fn default() -> Self {
        let buttons = Preset::ALL
            .into_iter()
            .zip([-0.7, 0.0, 0.7])
            .map(|(preset, x)| ButtonSpec {
                preset,
                label: None,
                offset: [x, 0.0],
                hitbox_size: default_hitbox_size(),
            })
            .collect();
        Self {
            container_position: [0.0, 1.0, 1.0],
            container_yaw: PI,
            camera_position: [0.0, 1.0, 0.0],
            caption_size: 0.05,
            font_path: None,
            initial_selection: None,
            buttons,
            highlight: HighlightLevels::default(),
            countdown: CountdownConfig::default(),
        }
    }
}

impl HudConfig {
    /// Load HUD configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_HUD_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let cfg = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<HudConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    return HudConfig::default();
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!("HUD config not found at {}. Using defaults", path.display());
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                return HudConfig::default();
            }
        };

        match cfg.validate() {
            Ok(()) => cfg,
            Err(err) => {
                warn!("Invalid HUD config {}: {err}. Using defaults", path.display());
                HudConfig::default()
            }
        }
    }

    /// Save HUD configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), HudConfigError> {
        if self.buttons.is_empty() {
            return Err(HudConfigError::NoButtons);
        }
        let mut seen = BTreeSet::new();
        for button in &self.buttons {
            if !seen.insert(button.preset) {
                return Err(HudConfigError::DuplicatePreset(button.preset));
            }
            if button.hitbox_size.iter().any(|&extent| extent <= 0.0) {
                return Err(HudConfigError::EmptyHitbox(button.preset));
            }
        }
        if self.highlight.duration <= 0.0 {
            return Err(HudConfigError::NonPositiveDuration(self.highlight.duration));
        }
        Ok(())
    }
}

//! Scripted camera paths for headless runs.
//!
//! A script is a list of timed steps, each aiming the camera at a menu
//! button, at a world-space point, or away from the menu.

use serde::Deserialize;
use std::{fs, path::Path};
use vrpong_core::Preset;

/// Where the camera looks during a script step.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Aim {
    /// Straight at the center of a menu button.
    Preset(Preset),
    /// At a world-space point.
    Point([f32; 3]),
}

#[derive(Debug, Deserialize)]
struct RayScriptFile {
    steps: Vec<RayStep>,
}

#[derive(Debug, Deserialize)]
struct RayStep {
    duration: f32,
    /// Missing means the player looks away from the menu.
    #[serde(default)]
    aim: Option<Aim>,
}

pub struct ScriptedRayPlayer {
    steps: Vec<RayStep>,
    index: usize,
    time_in_step: f32,
}

impl ScriptedRayPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: RayScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("ray script contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
        })
    }

    /// Total scripted time in seconds.
    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|step| step.duration.max(0.0)).sum()
    }

    /// Step the script by `dt` and return the aim for this frame. The last
    /// step holds once the script runs out.
    pub fn advance(&mut self, dt: f32) -> Option<Aim> {
        self.time_in_step += dt;
        while self.index < self.steps.len() && self.time_in_step >= self.steps[self.index].duration
        {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                break;
            }
        }

        self.steps.get(self.index).and_then(|step| step.aim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presets_points_and_gaps() {
        let mut player = ScriptedRayPlayer::from_json(
            r#"{"steps": [
                {"duration": 0.1, "aim": "PingPong"},
                {"duration": 0.1},
                {"duration": 0.1, "aim": [0.0, 2.0, 1.0]}
            ]}"#,
        )
        .unwrap();

        assert!((player.total_duration() - 0.3).abs() < 1e-6);
        assert_eq!(player.advance(0.05), Some(Aim::Preset(Preset::PingPong)));
        assert_eq!(player.advance(0.1), None);
        assert_eq!(player.advance(0.1), Some(Aim::Point([0.0, 2.0, 1.0])));
        // Holds the last step.
        assert_eq!(player.advance(1.0), Some(Aim::Point([0.0, 2.0, 1.0])));
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(ScriptedRayPlayer::from_json(r#"{"steps": []}"#).is_err());
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(ScriptedRayPlayer::from_json(r#"{"steps": [{"duration": 1.0, "aim": "Hard"}]}"#).is_err());
    }
}

//! Countdown overlay shown before a rally starts.
//!
//! Purely presentational: an external timer decides the values, the overlay
//! only rebuilds and recenters the digits.

use super::{Text3D, UIComponent};
use crate::config::CountdownConfig;
use crate::font::GlyphMeasure;
use glam::Vec3;
use tracing::debug;

const COUNTDOWN_OPACITY: f32 = 0.5;

/// Big centered number floating in the play box.
#[derive(Debug, Clone)]
pub struct CountdownOverlay {
    text: Text3D,
    box_height: f32,
    box_position_z: f32,
}

impl CountdownOverlay {
    /// Create a hidden overlay.
    pub fn new(config: &CountdownConfig) -> Self {
        let mut text = Text3D::new(Vec3::new(0.0, 0.0, config.box_position_z), "")
            .with_font_size(config.font_size)
            .with_color([1.0, 1.0, 1.0, COUNTDOWN_OPACITY]);
        text.set_visible(false);
        Self {
            text,
            box_height: config.box_height,
            box_position_z: config.box_position_z,
        }
    }

    /// Show the overlay starting at `initial`.
    pub fn show(&mut self, initial: &str, measure: &dyn GlyphMeasure) {
        self.set(initial, measure);
        self.text.set_visible(true);
    }

    /// Replace the displayed value and recenter it in the box.
    pub fn set(&mut self, value: &str, measure: &dyn GlyphMeasure) {
        let extent = measure.measure(value, self.text.font_size);
        self.text.set_text(value);
        self.text.set_position(Vec3::new(
            -extent.max_x / 2.0,
            self.box_height / 2.0 - extent.max_y / 2.0,
            self.box_position_z,
        ));
        debug!(value, width = extent.max_x, "countdown updated");
    }

    pub fn hide(&mut self) {
        self.text.set_visible(false);
    }

    pub fn is_visible(&self) -> bool {
        self.text.is_visible()
    }

    /// The displayed text element.
    pub fn text(&self) -> &Text3D {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedAdvance;

    fn config() -> CountdownConfig {
        CountdownConfig {
            font_size: 1.0,
            box_height: 2.0,
            box_position_z: -3.0,
        }
    }

    #[test]
    fn starts_hidden() {
        let overlay = CountdownOverlay::new(&config());
        assert!(!overlay.is_visible());
        assert_eq!(overlay.text().opacity(), COUNTDOWN_OPACITY);
    }

    #[test]
    fn show_centers_the_digit() {
        let measure = FixedAdvance::new(0.8, 1.0);
        let mut overlay = CountdownOverlay::new(&config());
        overlay.show("3", &measure);

        assert!(overlay.is_visible());
        assert_eq!(overlay.text().text(), "3");
        let pos = overlay.text().position();
        assert!((pos.x - -0.4).abs() < 1e-5);
        assert!((pos.y - 0.5).abs() < 1e-5);
        assert_eq!(pos.z, -3.0);
    }

    #[test]
    fn set_recenters_for_wider_values() {
        let measure = FixedAdvance::new(0.8, 1.0);
        let mut overlay = CountdownOverlay::new(&config());
        overlay.show("3", &measure);
        overlay.set("GO", &measure);

        assert_eq!(overlay.text().text(), "GO");
        assert!((overlay.text().position().x - -0.8).abs() < 1e-5);
    }

    #[test]
    fn hide_keeps_last_value() {
        let measure = FixedAdvance::default();
        let mut overlay = CountdownOverlay::new(&config());
        overlay.show("1", &measure);
        overlay.hide();
        assert!(!overlay.is_visible());
        assert_eq!(overlay.text().text(), "1");
    }
}

//! 3D Text Component

use super::{with_alpha, Transform3D, UIComponent};
use glam::Vec3;

/// Text placed in HUD space (captions, countdown digits)
#[derive(Debug, Clone, PartialEq)]
pub struct Text3D {
    /// Position of the text's left baseline
    pub transform: Transform3D,

    /// Text content
    pub text: String,

    /// Glyph size in world units
    pub font_size: f32,

    /// Text color (RGBA); alpha is the HUD opacity
    pub color: [f32; 4],

    /// Whether the text is visible
    pub visible: bool,
}

impl Default for Text3D {
    fn default() -> Self {
        Self {
            transform: Transform3D::default(),
            text: String::new(),
            font_size: 1.0,
            color: [1.0, 1.0, 1.0, 1.0],
            visible: true,
        }
    }
}

impl Text3D {
    /// Create a new Text3D component
    pub fn new(position: Vec3, text: impl Into<String>) -> Self {
        Self {
            transform: Transform3D::new(position),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Builder: Set font size
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Builder: Set color
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// Builder: Set opacity, keeping the RGB channels
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    /// Update the text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Get a reference to the text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn opacity(&self) -> f32 {
        self.color[3]
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.color = with_alpha(self.color, opacity);
    }
}

impl UIComponent for Text3D {
    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text3d_creation() {
        let text = Text3D::new(Vec3::new(0.0, 1.0, 0.0), "3");
        assert_eq!(text.text(), "3");
        assert_eq!(text.position(), Vec3::new(0.0, 1.0, 0.0));
        assert!(text.is_visible());
        assert_eq!(text.opacity(), 1.0);
    }

    #[test]
    fn test_text3d_opacity_keeps_rgb() {
        let text = Text3D::new(Vec3::ZERO, "Ping Pong")
            .with_color([1.0, 0.0, 0.0, 1.0])
            .with_opacity(0.5);
        assert_eq!(text.color, [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_text3d_update() {
        let mut text = Text3D::new(Vec3::ZERO, "3");
        text.set_text("2");
        assert_eq!(text.text(), "2");

        text.set_visible(false);
        assert!(!text.is_visible());
    }
}

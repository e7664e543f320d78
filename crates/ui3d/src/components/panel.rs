//! Button frame - the flat quad behind a caption that also marks its hitbox

use super::{with_alpha, Transform3D, UIComponent};
use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Panel3D {
    /// Center of the quad
    pub transform: Transform3D,

    /// Panel size (width, height)
    pub size: (f32, f32),

    /// Outline color (RGBA)
    pub color: [f32; 4],

    pub visible: bool,
}

impl Default for Panel3D {
    fn default() -> Self {
        Self {
            transform: Transform3D::default(),
            size: (0.6, 0.16),
            color: [1.0, 1.0, 1.0, 1.0],
            visible: true,
        }
    }
}

impl Panel3D {
    /// Create a new frame centered at `position`
    pub fn new(position: Vec3, width: f32, height: f32) -> Self {
        Self {
            transform: Transform3D::new(position),
            size: (width, height),
            ..Default::default()
        }
    }

    pub fn opacity(&self) -> f32 {
        self.color[3]
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.color = with_alpha(self.color, opacity);
    }
}

impl UIComponent for Panel3D {
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

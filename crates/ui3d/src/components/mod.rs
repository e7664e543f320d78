//! 3D HUD Components
//!
//! Visual pieces of the in-scene menu: captions, button frames, the button
//! grouping the selection machine fades as one, and the countdown overlay.

pub mod button;
pub mod countdown;
pub mod panel;
pub mod text3d;

pub use button::{ButtonGroup, MenuButton};
pub(crate) use button::group_setter;
pub use countdown::CountdownOverlay;
pub use panel::Panel3D;
pub use text3d::Text3D;

use glam::{Affine3A, Quat, Vec3};

/// Base trait for all 3D HUD components
pub trait UIComponent {
    /// Get the position of this component
    fn position(&self) -> Vec3;

    /// Set the position of this component
    fn set_position(&mut self, position: Vec3);

    /// Check if this component is visible
    fn is_visible(&self) -> bool;

    /// Set visibility
    fn set_visible(&mut self, visible: bool);
}

/// Transform in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Set the alpha channel of an RGBA color.
pub(crate) fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn half_turn_mirrors_local_x() {
        let container = Transform3D::new(Vec3::new(0.0, 1.0, 1.0))
            .with_rotation(Quat::from_rotation_y(PI));
        let world = container.to_affine().transform_point3(Vec3::new(-0.7, 0.0, 0.0));
        assert!((world - Vec3::new(0.7, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(with_alpha([1.0, 0.5, 0.0, 1.0], 1.5), [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(with_alpha([1.0, 1.0, 1.0, 1.0], 0.3)[3], 0.3);
    }
}

//! Menu Button Component
//!
//! A button is a caption plus a frame, laid out in the HUD container's local
//! space. Its visual elements live in a [`ButtonGroup`] that the selection
//! machine fades as one unit through an injected setter.

use super::{Panel3D, Text3D};
use crate::config::ButtonSpec;
use crate::font::GlyphMeasure;
use crate::interaction::UIAABB;
use glam::{Affine3A, Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use vrpong_core::Preset;

/// Intensity a freshly built button starts at ("unfocused but visible").
pub const IDLE_OPACITY: f32 = 0.5;

/// Visual elements sharing one button's selection identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonGroup {
    pub caption: Text3D,
    pub frame: Panel3D,
}

impl ButtonGroup {
    /// Write `opacity` to every element of the group.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.caption.set_opacity(opacity);
        self.frame.set_opacity(opacity);
    }

    /// Current group intensity.
    ///
    /// All elements are always written together, so the caption is
    /// representative.
    pub fn opacity(&self) -> f32 {
        self.caption.opacity()
    }
}

/// Group handle shared between the HUD (which renders it) and the selection
/// machine (which fades it).
pub(crate) type SharedGroup = Rc<RefCell<ButtonGroup>>;

/// Typed intensity setter for a group, suitable for injecting into a
/// selection region.
pub(crate) fn group_setter(group: &SharedGroup) -> impl FnMut(f32) + 'static {
    let group = Rc::clone(group);
    move |opacity| group.borrow_mut().set_opacity(opacity)
}

/// Interactive menu entry
#[derive(Debug, Clone)]
pub struct MenuButton {
    /// Preset committed when this button is selected
    pub preset: Preset,

    /// Caption text
    pub label: String,

    /// Offset of the button center inside the HUD container
    pub offset: Vec2,

    /// Hitbox extents (width, height, depth) in container space
    pub hitbox_size: Vec3,

    group: SharedGroup,
}

impl MenuButton {
    /// Build a button from its config entry, centering the caption on the
    /// button with the measured glyph extent.
    pub fn from_spec(spec: &ButtonSpec, caption_size: f32, measure: &dyn GlyphMeasure) -> Self {
        let label = spec
            .label
            .clone()
            .unwrap_or_else(|| spec.preset.label().to_string());
        let offset = Vec2::from(spec.offset);
        let hitbox_size = Vec3::from(spec.hitbox_size);

        let extent = measure.measure(&label, caption_size);
        let caption_origin = Vec3::new(
            offset.x - extent.max_x / 2.0,
            offset.y - extent.max_y / 2.0,
            0.0,
        );
        let caption = Text3D::new(caption_origin, label.as_str())
            .with_font_size(caption_size)
            .with_opacity(IDLE_OPACITY);
        let mut frame = Panel3D::new(offset.extend(0.0), hitbox_size.x, hitbox_size.y);
        frame.set_opacity(IDLE_OPACITY);

        Self {
            preset: spec.preset,
            label,
            offset,
            hitbox_size,
            group: Rc::new(RefCell::new(ButtonGroup { caption, frame })),
        }
    }

    /// Shared handle to the button's visual group. Only the selection
    /// machine writes through it.
    pub(crate) fn group(&self) -> &SharedGroup {
        &self.group
    }

    /// Snapshot of the caption as currently rendered.
    pub fn caption(&self) -> Text3D {
        self.group.borrow().caption.clone()
    }

    /// Snapshot of the frame as currently rendered.
    pub fn frame(&self) -> Panel3D {
        self.group.borrow().frame.clone()
    }

    /// Current intensity of the button's group.
    pub fn opacity(&self) -> f32 {
        self.group.borrow().opacity()
    }

    /// Hitbox in container space.
    pub fn local_bounds(&self) -> UIAABB {
        UIAABB::from_center_size(self.offset.extend(0.0), self.hitbox_size)
    }

    /// Hitbox in world space, given the container's local-to-world transform.
    pub fn world_bounds(&self, container: &Affine3A) -> UIAABB {
        self.local_bounds().transformed(container)
    }
}

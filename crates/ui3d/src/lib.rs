//! In-scene HUD for vrpong
//!
//! The mode menu floats in world space and is operated by aiming the camera
//! ray at it instead of clicking. This crate holds everything between "the
//! ray crossed these hitboxes" and "the game mode changed":
//!
//! - **Interaction**: ray/AABB picking against button hitboxes
//! - **Animation**: cancellable, frame-stepped highlight fades
//! - **Selection**: the dwell/commit state machine driving the fades and
//!   publishing preset changes
//! - **Components**: captions, button frames, the countdown overlay
//!
//! # Example
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use vrpong_core::{EventBus, Preset};
//! use vrpong_ui3d::{FixedAdvance, Hud, HudConfig};
//!
//! let bus = Rc::new(EventBus::new());
//! let mode_changes = bus.subscribe();
//!
//! let mut hud = Hud::new(HudConfig::default(), bus);
//! hud.setup(Box::new(FixedAdvance::default()));
//!
//! // Every frame:
//! let target = hud.button_center(Preset::PingPong).unwrap();
//! let ray = hud.ray_towards(target);
//! hud.camera_ray_updated(&ray);
//! hud.tick(1.0 / 60.0);
//!
//! for event in mode_changes.try_iter() {
//!     println!("{}", event.payload());
//! }
//! ```

pub mod animation;
pub mod components;
pub mod config;
pub mod font;
pub mod hud;
pub mod interaction;
pub mod selection;

// Re-export commonly used types
pub use animation::{AnimationHandle, Easing, FrameTweenAnimator, HighlightAnimator};
pub use components::{ButtonGroup, CountdownOverlay, MenuButton, Panel3D, Text3D, Transform3D};
pub use config::{ButtonSpec, CountdownConfig, HudConfig, HudConfigError};
pub use font::{FixedAdvance, FontMetrics, GlyphMeasure, TextExtent};
pub use hud::Hud;
pub use interaction::{intersect_regions, Ray, RegionHit, RegionId, UIAABB};
pub use selection::{HighlightLevels, Region, SelectionMachine, SelectionPhase};

/// Version of the UI3D crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! 3D HUD Interaction
//!
//! Camera-ray picking against button hitboxes. The selection machine only
//! consumes the sorted hit list this produces.

pub mod raycaster;

pub use raycaster::{intersect_regions, Ray, RegionHit, RegionId, UIAABB};

//! HUD Raycasting - Detect which button the camera ray points at

use glam::{Affine3A, Vec3};

/// Stable identity of a hit-testable region (its index in the region set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

/// A pointer ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `origin` through `target`
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// One intersection of the ray with a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionHit {
    pub region: RegionId,
    /// Distance from ray origin to the hit point
    pub distance: f32,
}

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UIAABB {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl UIAABB {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from center position and size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Smallest AABB enclosing this box after `transform`
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let p = transform.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Test if a ray intersects this AABB
    /// Returns distance to intersection point if hit
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        // A degenerate ray points nowhere
        if ray.direction.length_squared() == 0.0 {
            return None;
        }

        let inv_dir = ray.direction.recip();

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Entire box is behind the ray origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        // Origin inside the box: report the exit point
        let distance = if tmin < 0.0 { tmax } else { tmin };

        Some(distance)
    }
}

/// Intersect `ray` with every region, nearest first.
///
/// Ties keep the input order, so the earlier menu entry wins.
pub fn intersect_regions<'a, I>(ray: &Ray, regions: I) -> Vec<RegionHit>
where
    I: IntoIterator<Item = (RegionId, &'a UIAABB)>,
{
    let mut hits: Vec<RegionHit> = regions
        .into_iter()
        .filter_map(|(region, bounds)| {
            bounds
                .ray_intersection(ray)
                .map(|distance| RegionHit { region, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

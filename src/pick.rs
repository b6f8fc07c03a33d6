//! Object picking by ray casting against voxel bounds.
//!
//! A pick casts the camera ray through the pointer and intersects it with the
//! axis-aligned box of every voxel instance, using the transforms of the
//! current frame so animated objects are hit where they are drawn. The
//! nearest hit in front of the ray origin wins.

use cgmath::{Point3, Vector3};

use crate::{camera::Ray, data_structures::instance::Instance};

/// Closest intersection of a ray with a voxel instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    /// Index of the instance, which is also the voxel index.
    pub index: usize,
    /// Distance along the ray.
    pub distance: f32,
}

/// Slab test of `ray` against the box `center ± half_extents`.
///
/// Returns the entry distance, or `None` when the box is missed or lies
/// entirely behind the ray origin. A ray starting inside the box hits at 0.
pub fn intersect_aabb(ray: &Ray, center: Point3<f32>, half_extents: Vector3<f32>) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        let lo = center[axis] - half_extents[axis];
        let hi = center[axis] + half_extents[axis];

        if direction.abs() < f32::EPSILON {
            // Parallel to the slab: inside it or never.
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let (near, far) = {
            let a = (lo - origin) * inv;
            let b = (hi - origin) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Nearest instance hit by `ray`.
///
/// `ray` must be expressed in the scene root's frame, i.e. without the scene
/// origin translation that is applied when instances are uploaded.
pub fn pick_instance(ray: &Ray, instances: &[Instance], voxel_size: f32) -> Option<PickHit> {
    instances
        .iter()
        .enumerate()
        .filter_map(|(index, instance)| {
            let center = Point3::new(instance.position.x, instance.position.y, instance.position.z);
            intersect_aabb(ray, center, instance.half_extents(voxel_size))
                .map(|distance| PickHit { index, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

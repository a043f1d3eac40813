use glam::{EulerRot, Quat, Vec3};

use shared::{ObjectId, SceneObject};

use crate::state::scene::SceneState;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: [f32; 3], direction: [f32; 3]) -> Self {
        Self {
            origin: Vec3::from(origin),
            direction: Vec3::from(direction).normalize_or_zero(),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// World-space bounds of an object's renderable under its transform
    pub fn of_object(object: &SceneObject) -> Option<Self> {
        let (lmin, lmax) = object.renderable.local_bounds()?;
        let t = &object.transform;
        let scale = Vec3::new(t.scale[0] as f32, t.scale[1] as f32, t.scale[2] as f32);
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            t.rotation[0] as f32,
            t.rotation[1] as f32,
            t.rotation[2] as f32,
        );
        let position = Vec3::new(
            t.position[0] as f32,
            t.position[1] as f32,
            t.position[2] as f32,
        );

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { lmin[0] } else { lmax[0] } as f32,
                if i & 2 == 0 { lmin[1] } else { lmax[1] } as f32,
                if i & 4 == 0 { lmin[2] } else { lmax[2] } as f32,
            );
            let world = position + rotation * (corner * scale);
            min = min.min(world);
            max = max.max(world);
        }
        Some(Self { min, max })
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest visible object whose bounds the ray hits
pub fn pick_object(scene: &SceneState, ray: &Ray) -> Option<ObjectId> {
    let mut best: Option<(&str, f32)> = None;

    for object in scene.objects().filter(|o| o.visible) {
        let Some(aabb) = Aabb::of_object(object) else {
            continue;
        };
        if let Some(dist) = ray_aabb(ray, &aabb) {
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((object.id.as_str(), dist));
            }
        }
    }

    best.map(|(id, _)| id.to_string())
}

//! Pointer targeting
//!
//! Turns a 2D pointer position into a field column. The pointer is unprojected
//! through the renderer's camera into a world-space ray, which is intersected
//! with the field floor and with every exposed face of a placed block. The hit
//! closest to the camera wins.
//!
//! Conventions follow OpenGL: normalized device depth runs from -1 (near) to 1
//! (far), pointer pixels are measured from the top-left corner of the viewport.

use glam::{IVec3, Mat4, Vec2, Vec3};

use crate::config::FieldTransform;
use crate::field::Field;

/// Camera supplied by the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World to camera space
    pub view: Mat4,
    /// Camera to clip space (OpenGL depth range)
    pub projection: Mat4,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4, viewport: Vec2) -> Self {
        Self {
            view,
            projection,
            viewport,
        }
    }

    /// Distance in front of the camera, larger is farther away
    pub fn depth(&self, point: Vec3) -> f32 {
        -self.view.transform_point3(point).z
    }
}

/// Pointer position for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Pixels from the top-left corner of the viewport
    pub position: Vec2,
    pub camera: Camera,
}

impl PointerInput {
    pub fn new(x: f32, y: f32, camera: Camera) -> Self {
        Self {
            position: Vec2::new(x, y),
            camera,
        }
    }
}

/// World-space ray, `direction` is normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Surface hit by a pointer ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Vec3,
    /// Outward normal of the face that was hit
    pub normal: Vec3,
    /// Camera-space depth of `point`
    pub depth: f32,
}

/// Unproject a pointer position into a world-space ray.
///
/// `None` for an empty viewport or a degenerate camera.
pub fn pointer_ray(camera: &Camera, position: Vec2) -> Option<Ray> {
    if camera.viewport.x <= 0.0 || camera.viewport.y <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(
        2.0 * position.x / camera.viewport.x - 1.0,
        1.0 - 2.0 * position.y / camera.viewport.y,
    );

    let clip_to_world = (camera.projection * camera.view).inverse();
    let near = clip_to_world.project_point3(ndc.extend(-1.0));
    let far = clip_to_world.project_point3(ndc.extend(1.0));

    let direction = (far - near).normalize_or_zero();
    if !near.is_finite() || direction == Vec3::ZERO {
        return None;
    }
    Some(Ray {
        origin: near,
        direction,
    })
}

/// Closest surface along `ray`: the floor plane or an exposed block face.
pub fn pick(ray: &Ray, field: &Field, transform: &FieldTransform, camera: &Camera) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    let mut consider = |point: Vec3, normal: Vec3| {
        let depth = camera.depth(point);
        if best.map_or(true, |b| depth < b.depth) {
            best = Some(Hit {
                point,
                normal,
                depth,
            });
        }
    };

    if ray.direction.y.abs() > f32::EPSILON {
        let t = (transform.floor_y() - ray.origin.y) / ray.direction.y;
        if t >= 0.0 {
            consider(ray.at(t), Vec3::Y);
        }
    }

    let half = Vec3::splat(transform.cell_size * 0.5);
    for level in 0..field.num_levels() as i32 {
        for row in 0..field.num_rows() as i32 {
            for col in 0..field.num_cols() as i32 {
                if !field.is_occupied(level, row, col) {
                    continue;
                }
                let center = transform.cell_center(col, level, row);
                let Some((t, normal)) = ray_box(ray, center - half, center + half) else {
                    continue;
                };
                // faces shared with another block are never visible
                let n = neighbor(IVec3::new(col, level, row), normal);
                if field.is_occupied(n.y, n.z, n.x) {
                    continue;
                }
                consider(ray.at(t), normal);
            }
        }
    }

    best
}

/// Field column `(col, row)` under the pointer.
///
/// The hit is pushed half a cell out of the face it landed on, so a side
/// face resolves to the neighboring column and a top face to its own column.
/// The result may lie outside the footprint; callers bounds-check it.
pub fn target_cell(pointer: &PointerInput, field: &Field, transform: &FieldTransform) -> Option<(i32, i32)> {
    let ray = pointer_ray(&pointer.camera, pointer.position)?;
    let hit = pick(&ray, field, transform, &pointer.camera)?;
    let nudged = hit.point + hit.normal * (transform.cell_size * 0.5);
    Some(transform.world_to_column(nudged))
}

/// Slab test, returns the entry distance and the entry face normal.
///
/// Rays starting inside the box report no hit.
fn ray_box(ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    const AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for (axis, unit) in AXES.iter().enumerate() {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        if dir.abs() < 1e-8 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let t_min = (min[axis] - origin) / dir;
        let t_max = (max[axis] - origin) / dir;
        let (near, far, face) = if t_min < t_max {
            (t_min, t_max, -*unit)
        } else {
            (t_max, t_min, *unit)
        };
        if near > t_enter {
            t_enter = near;
            normal = face;
        }
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    (t_enter >= 0.0).then_some((t_enter, normal))
}

/// Cell one step across a face, `(col, level, row)`
pub fn neighbor(cell: IVec3, normal: Vec3) -> IVec3 {
    cell + normal.as_ivec3()
}

use glam::Vec3;
use helio_core::{Ray, ReceiverMesh};

/// Nearest intersection of a probe ray with the receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub triangle: u32,
    /// Weights of the triangle's three corners, in winding order.
    pub barycentric: Vec3,
    pub distance: f32,
}

/// Scene query the controller runs once per light per frame. Implementations
/// report hits on the receiver only, in the receiver's local space.
pub trait Raycaster {
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit>;
}

impl<F> Raycaster for F
where
    F: Fn(&Ray) -> Option<RaycastHit>,
{
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        self(ray)
    }
}

/// Everything the blend needs from one light's hit this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSample {
    pub triangle: u32,
    pub barycentric: Vec3,
    /// Unit vector from the receiver back toward the light.
    pub direction: Vec3,
}

impl HitSample {
    pub fn new(triangle: u32, barycentric: Vec3, direction: Vec3) -> Self {
        Self {
            triangle,
            barycentric,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Turns a hit of `ray` into a sample; the light sits at the ray's origin
    /// side, so the incoming direction is the reversed ray direction.
    pub fn from_hit(hit: &RaycastHit, ray: &Ray) -> Self {
        Self::new(hit.triangle, hit.barycentric, -ray.direction)
    }
}

/// Brute-force nearest-hit raycaster over a receiver mesh.
#[derive(Debug, Clone)]
pub struct MeshRaycaster {
    mesh: ReceiverMesh,
    offset: Vec3,
}

impl MeshRaycaster {
    pub fn new(mesh: ReceiverMesh) -> Self {
        Self {
            mesh,
            offset: Vec3::ZERO,
        }
    }

    /// Places the mesh at `offset` in the space rays are expressed in.
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

impl Raycaster for MeshRaycaster {
    fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        let origin = ray.origin - self.offset;
        let mut nearest: Option<RaycastHit> = None;

        for t in 0..self.mesh.triangle_count() {
            let Some([v0, v1, v2]) = self.mesh.triangle_positions(t) else {
                continue;
            };
            let Some((distance, u, v)) = ray_triangle_intersection(origin, ray.direction, v0, v1, v2)
            else {
                continue;
            };
            if nearest.map_or(true, |n| distance < n.distance) {
                nearest = Some(RaycastHit {
                    triangle: t as u32,
                    barycentric: Vec3::new(1.0 - u - v, u, v),
                    distance,
                });
            }
        }

        nearest
    }
}

/// Möller–Trumbore ray-triangle intersection
fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<(f32, f32, f32)> {
    const EPSILON: f32 = 1e-8;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some((t, u, v))
}

//! Shared fixtures for helio-caustics integration tests
#![allow(dead_code)]

use glam::{Vec3, Vec4};
use helio_caustics::{CausticsConfig, CausticsContext, CausticsController};
use helio_core::{create_icosahedron_mesh, CubeTexture};

// ============================================================================
// Baked textures
// ============================================================================

/// Texture `i` is a flat grey of `i / 11`, so a blend is just the weighted
/// sum of the corner ids.
pub fn uniform_bakes(size: u32) -> Vec<CubeTexture> {
    (0..12)
        .map(|i| CubeTexture::uniform(size, Vec4::splat(i as f32 / 11.0)).unwrap())
        .collect()
}

/// Texture `i` is a lobe `clamp(dir · toward_i, 0, 1)` in red, with `toward_i`
/// taken from `references`.
pub fn lobe_bakes(size: u32, references: &[Vec3]) -> Vec<CubeTexture> {
    references
        .iter()
        .map(|r| {
            let r = r.normalize();
            CubeTexture::from_fn(size, |dir| {
                Vec4::new(dir.normalize().dot(r).clamp(0.0, 1.0), 0.0, 0.0, 1.0)
            })
            .unwrap()
        })
        .collect()
}

// ============================================================================
// Receiver
// ============================================================================

pub fn icosahedron_context(bakes: Vec<CubeTexture>) -> CausticsContext {
    CausticsContext::with_vertex_normals(create_icosahedron_mesh(1.0), bakes).unwrap()
}

/// Reference direction of each canonical corner, in canonical id order.
pub fn icosahedron_references() -> Vec<Vec3> {
    let ctx = icosahedron_context(uniform_bakes(1));
    (0..12).map(|id| ctx.reference(id).unwrap()).collect()
}

pub fn controller(bakes: Vec<CubeTexture>, config: CausticsConfig) -> CausticsController {
    CausticsController::new(icosahedron_context(bakes), config)
}

// ============================================================================
// Randomness
// ============================================================================

/// xorshift32, deterministic across platforms.
pub struct Rng(pub u32);

impl Rng {
    pub fn next_f32(&mut self) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 >> 8) as f32 / (1u32 << 24) as f32
    }

    pub fn unit(&mut self) -> Vec3 {
        loop {
            let v = Vec3::new(self.next_f32(), self.next_f32(), self.next_f32()) * 2.0 - Vec3::ONE;
            let len = v.length();
            if len > 0.1 && len <= 1.0 {
                return v / len;
            }
        }
    }

    /// Barycentric weights, all positive, summing to one.
    pub fn weights(&mut self) -> Vec3 {
        let w = Vec3::new(self.next_f32(), self.next_f32(), self.next_f32()) + Vec3::splat(0.01);
        w / (w.x + w.y + w.z)
    }
}

pub fn assert_near(a: f32, b: f32, tol: f32) {
    assert!((a - b).abs() < tol, "{} vs {} (tol {})", a, b, tol);
}

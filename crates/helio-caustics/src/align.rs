//! Rotations that turn the current light direction into a baked one.
//!
//! Each baked texture was captured with light arriving along a fixed
//! reference direction. Sampling the bake through the rotation that maps the
//! current incoming direction onto that reference makes the bake look as if
//! it had been captured under the current light.

use glam::{Mat3, Mat4, Vec3};

/// Below this length `reference − cos·incoming` is treated as zero, i.e. the
/// two directions are (anti-)parallel.
pub const DEFAULT_ALIGNMENT_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentKind {
    /// General case, built from the change of basis.
    Rotated,
    /// Directions already agree (or one of them has no length).
    Identity,
    /// Directions are opposite; half turn about an axis perpendicular to the
    /// incoming direction.
    HalfTurn,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentRotation {
    pub matrix: Mat3,
    pub kind: AlignmentKind,
}

impl AlignmentRotation {
    pub const IDENTITY: Self = Self {
        matrix: Mat3::IDENTITY,
        kind: AlignmentKind::Identity,
    };

    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.matrix * v
    }

    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
            kind: self.kind,
        }
    }

    /// The rotation embedded in a 4×4 transform with no translation.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_mat3(self.matrix)
    }
}

impl Default for AlignmentRotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rotation mapping `incoming` onto `reference`. Inputs need not be unit
/// length.
pub fn align(incoming: Vec3, reference: Vec3) -> AlignmentRotation {
    align_with_epsilon(incoming, reference, DEFAULT_ALIGNMENT_EPSILON)
}

/// `epsilon` is floored at `f32::EPSILON`; a zero or negative threshold
/// would let exactly opposite directions divide by zero.
pub fn align_with_epsilon(incoming: Vec3, reference: Vec3, epsilon: f32) -> AlignmentRotation {
    let epsilon = epsilon.max(f32::EPSILON);
    let u = incoming.normalize_or_zero();
    let r = reference.normalize_or_zero();
    if u == Vec3::ZERO || r == Vec3::ZERO {
        return AlignmentRotation::IDENTITY;
    }

    let cos = u.dot(r).clamp(-1.0, 1.0);
    let perp = r - cos * u;
    let perp_len = perp.length();

    if perp_len < epsilon {
        if cos > 0.0 {
            return AlignmentRotation::IDENTITY;
        }
        // R = 2nnᵀ − I with n ⟂ u sends u to −u.
        let n = u.any_orthonormal_vector();
        let outer = Mat3::from_cols(n * n.x, n * n.y, n * n.z);
        return AlignmentRotation {
            matrix: outer * 2.0 - Mat3::IDENTITY,
            kind: AlignmentKind::HalfTurn,
        };
    }

    let v = perp / perp_len;
    // Same axis as cross(reference, incoming), already unit length.
    let w = v.cross(u);
    let sin = u.cross(r).length();

    // Rows u, v, w.
    let f = Mat3::from_cols(u, v, w).transpose();
    let g = Mat3::from_cols(
        Vec3::new(cos, sin, 0.0),
        Vec3::new(-sin, cos, 0.0),
        Vec3::Z,
    );

    AlignmentRotation {
        matrix: f.transpose() * g * f,
        kind: AlignmentKind::Rotated,
    }
}

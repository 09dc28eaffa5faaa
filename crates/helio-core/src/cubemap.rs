//! Analytic direction <-> cube face coordinate transform.
//!
//! A cube coordinate is a face index plus a `[0, 1]²` position on that face.
//! Faces are ordered +X, −X, +Y, −Y, +Z, −Z, which is also the order faces are
//! stored in a [`CubeTexture`](crate::CubeTexture).
//!
//! The face-selection predicates are deliberately asymmetric so that texels on
//! face boundaries resolve to the same face as the reference bake did. Do not
//! replace them with a plain "largest absolute component" test.

use glam::{Vec2, Vec3};

/// One of the six faces of a cube texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CubeFace {
    PositiveX = 0,
    NegativeX = 1,
    PositiveY = 2,
    NegativeY = 3,
    PositiveZ = 4,
    NegativeZ = 5,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Dominant axis: 0 = x, 1 = y, 2 = z.
    pub fn axis(self) -> usize {
        self.index() / 2
    }

    pub fn is_negative(self) -> bool {
        self.index() & 1 == 1
    }

    fn on_axis(axis: usize, negative: bool) -> Self {
        Self::ALL[axis * 2 + negative as usize]
    }
}

/// A position on a cube texture: face plus `[0, 1]²` face coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCoord {
    pub face: CubeFace,
    pub uv: Vec2,
}

impl FaceCoord {
    pub fn new(face: CubeFace, uv: Vec2) -> Self {
        Self { face, uv }
    }
}

/// Face a direction falls on.
///
/// `x` wins unless `|z| > |x|`, `y` wins only when `|y| >= |x|` and
/// `|y| > |z|`, `z` wins unless `|y| > |z|`. When no predicate holds (all
/// three magnitudes equal, including the zero vector) the x face is used.
pub fn direction_to_face(d: Vec3) -> CubeFace {
    let a = d.abs();
    let x_more_y = a.x > a.y;
    let y_more_z = a.y > a.z;
    let z_more_x = a.z > a.x;

    let x_most = x_more_y && !z_more_x;
    let y_most = !x_more_y && y_more_z;
    let z_most = z_more_x && !y_more_z;

    if x_most {
        CubeFace::on_axis(0, d.x < 0.0)
    } else if y_most {
        CubeFace::on_axis(1, d.y < 0.0)
    } else if z_most {
        CubeFace::on_axis(2, d.z < 0.0)
    } else {
        CubeFace::on_axis(0, d.x < 0.0)
    }
}

/// Projects `d` onto the face it dominates.
pub fn direction_to_face_coord(d: Vec3) -> FaceCoord {
    direction_to_face_coord_on(d, direction_to_face(d))
}

/// Projects `d` onto a caller-chosen face.
///
/// The two non-dominant components are divided by the signed dominant
/// component, so a direction pointing away from `face` lands mirrored.
pub fn direction_to_face_coord_on(d: Vec3, face: CubeFace) -> FaceCoord {
    let (perp, dominant) = match face.axis() {
        0 => (Vec2::new(d.y, d.z), d.x),
        1 => (Vec2::new(d.x, d.z), d.y),
        _ => (Vec2::new(d.x, d.y), d.z),
    };
    let uv = perp / dominant * 0.5 + Vec2::splat(0.5);
    FaceCoord { face, uv }
}

/// Direction through a face coordinate. The result lies on the unit cube, it
/// is not normalized.
pub fn face_coord_to_direction(coord: FaceCoord) -> Vec3 {
    let p = coord.uv * 2.0 - Vec2::ONE;
    let d = match coord.face.axis() {
        0 => Vec3::new(1.0, p.x, p.y),
        1 => Vec3::new(p.x, 1.0, p.y),
        _ => Vec3::new(p.x, p.y, 1.0),
    };
    if coord.face.is_negative() {
        -d
    } else {
        d
    }
}

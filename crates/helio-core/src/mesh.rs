use glam::Vec3;

use crate::error::{HelioError, Result};

/// Static receiver geometry: positions plus a flat triangle index list.
///
/// Corners may be duplicated (flat shading, UV seams); the caustics vertex
/// table collapses duplicates by exact position.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl ReceiverMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(HelioError::config(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(HelioError::config(format!(
                "index {} references past {} vertices",
                bad,
                positions.len()
            )));
        }
        Ok(Self { positions, indices })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangle(&self, triangle: usize) -> Option<[u32; 3]> {
        let i = triangle * 3;
        let tri = self.indices.get(i..i + 3)?;
        Some([tri[0], tri[1], tri[2]])
    }

    pub fn triangle_positions(&self, triangle: usize) -> Option<[Vec3; 3]> {
        let [a, b, c] = self.triangle(triangle)?;
        Some([
            *self.positions.get(a as usize)?,
            *self.positions.get(b as usize)?,
            *self.positions.get(c as usize)?,
        ])
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// The twelve corners of an icosahedron inscribed in a sphere of `radius`.
pub fn icosahedron_corners(radius: f32) -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) * 0.5;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|p| p.normalize() * radius)
}

/// Flat-shaded icosahedron: 20 triangles, 60 raw vertices, 12 distinct
/// positions. Triangles wind counter-clockwise seen from outside.
pub fn create_icosahedron_mesh(radius: f32) -> ReceiverMesh {
    let corners = icosahedron_corners(radius);
    let mut positions = Vec::with_capacity(60);
    let mut indices = Vec::with_capacity(60);

    for face in ICOSAHEDRON_FACES {
        for corner in face {
            indices.push(positions.len() as u32);
            positions.push(corners[corner]);
        }
    }

    ReceiverMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_index_lists() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(ReceiverMesh::new(positions.clone(), vec![0, 1]).is_err());
        assert!(ReceiverMesh::new(positions.clone(), vec![0, 1, 3]).is_err());
        assert!(ReceiverMesh::new(positions, vec![0, 1, 2]).is_ok());
    }

    #[test]
    fn icosahedron_is_flat_shaded_and_outward_facing() {
        let mesh = create_icosahedron_mesh(2.0);
        assert_eq!(mesh.triangle_count(), 20);
        assert_eq!(mesh.vertex_count(), 60);

        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle_positions(t).unwrap();
            let normal = (b - a).cross(c - a);
            let centre = (a + b + c) / 3.0;
            assert!(normal.dot(centre) > 0.0, "triangle {} winds inward", t);
        }
        for p in &mesh.positions {
            assert!((p.length() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn triangle_lookup_past_end_is_none() {
        let mesh = create_icosahedron_mesh(1.0);
        assert!(mesh.triangle(19).is_some());
        assert!(mesh.triangle(20).is_none());
    }
}

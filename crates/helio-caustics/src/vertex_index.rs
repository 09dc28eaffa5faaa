//! Canonical vertex ids for the receiver mesh.

use glam::Vec3;
use helio_core::{HelioError, ReceiverMesh, Result};

use crate::BAKED_VERTEX_COUNT;

/// Maps every raw vertex to a dense canonical id shared by all vertices at
/// exactly the same position.
///
/// Ids are handed out in order of first occurrence, so raw vertex `i` gets
/// the id of the smallest `j <= i` with an equal position. Quadratic in the
/// vertex count; receiver meshes are tiny.
pub fn canonicalize(positions: &[Vec3]) -> Vec<u32> {
    let mut ids: Vec<u32> = Vec::with_capacity(positions.len());
    let mut next = 0u32;

    for (i, p) in positions.iter().enumerate() {
        let first = positions[..i].iter().position(|q| q == p);
        match first {
            Some(j) => ids.push(ids[j]),
            None => {
                ids.push(next);
                next += 1;
            }
        }
    }

    ids
}

/// Per-triangle canonical corner ids, in the triangle's winding order.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleVertexTable {
    triangles: Vec<[u32; 3]>,
    canonical: Vec<u32>,
    representatives: Vec<u32>,
}

impl TriangleVertexTable {
    /// Indexes `mesh` without any constraint on how many distinct corners it
    /// has.
    pub fn from_mesh(mesh: &ReceiverMesh) -> Result<Self> {
        if mesh.indices.len() % 3 != 0 {
            return Err(HelioError::config(format!(
                "index count {} is not a multiple of 3",
                mesh.indices.len()
            )));
        }
        let canonical = canonicalize(&mesh.positions);

        let mut representatives = Vec::new();
        for (raw, &id) in canonical.iter().enumerate() {
            if id as usize == representatives.len() {
                representatives.push(raw as u32);
            }
        }

        let triangles = mesh
            .triangles()
            .map(|t| {
                let mut ids = [0u32; 3];
                for (id, raw) in ids.iter_mut().zip(t) {
                    *id = *canonical.get(raw as usize).ok_or_else(|| {
                        HelioError::config(format!(
                            "index {} references past {} vertices",
                            raw,
                            canonical.len()
                        ))
                    })?;
                }
                Ok(ids)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            triangles,
            canonical,
            representatives,
        })
    }

    /// Indexes `mesh` and requires exactly one distinct corner per baked
    /// texture.
    pub fn build(mesh: &ReceiverMesh) -> Result<Self> {
        let table = Self::from_mesh(mesh)?;
        if table.distinct_count() != BAKED_VERTEX_COUNT {
            return Err(HelioError::config(format!(
                "receiver mesh has {} distinct vertex positions, expected {}",
                table.distinct_count(),
                BAKED_VERTEX_COUNT
            )));
        }
        Ok(table)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of distinct positions in the mesh.
    pub fn distinct_count(&self) -> usize {
        self.representatives.len()
    }

    pub fn get(&self, triangle: usize) -> Option<[u32; 3]> {
        self.triangles.get(triangle).copied()
    }

    pub fn lookup(&self, triangle: usize) -> Result<[u32; 3]> {
        self.get(triangle)
            .ok_or_else(|| HelioError::out_of_range("triangle", triangle, self.triangles.len()))
    }

    pub fn canonical_id(&self, raw: usize) -> Option<u32> {
        self.canonical.get(raw).copied()
    }

    /// First raw vertex carrying canonical id `id`.
    pub fn representative(&self, id: u32) -> Option<u32> {
        self.representatives.get(id as usize).copied()
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }
}

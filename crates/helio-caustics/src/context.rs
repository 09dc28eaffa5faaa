use glam::Vec3;
use helio_core::{CubeTexture, HelioError, ReceiverMesh, Result};

use crate::vertex_index::TriangleVertexTable;
use crate::BAKED_VERTEX_COUNT;

/// Everything the per-frame blend reads: the receiver mesh, its canonical
/// vertex table and the baked texture plus reference direction of each
/// canonical corner. Built once, shared by reference.
#[derive(Debug, Clone)]
pub struct CausticsContext {
    mesh: ReceiverMesh,
    table: TriangleVertexTable,
    baked: Vec<CubeTexture>,
    references: Vec<Vec3>,
}

impl CausticsContext {
    /// `baked[i]` and `references[i]` belong to canonical vertex `i`.
    pub fn new(mesh: ReceiverMesh, baked: Vec<CubeTexture>, references: Vec<Vec3>) -> Result<Self> {
        let table = TriangleVertexTable::build(&mesh)?;
        Self::from_parts(mesh, table, baked, references)
    }

    /// Uses each corner's outward direction from the mesh centre as its
    /// reference direction.
    pub fn with_vertex_normals(mesh: ReceiverMesh, baked: Vec<CubeTexture>) -> Result<Self> {
        let table = TriangleVertexTable::build(&mesh)?;

        let corners: Vec<Vec3> = (0..table.distinct_count() as u32)
            .filter_map(|id| table.representative(id))
            .map(|raw| mesh.positions[raw as usize])
            .collect();
        let centre = corners.iter().copied().sum::<Vec3>() / corners.len() as f32;
        let references = corners.iter().map(|&p| p - centre).collect();

        Self::from_parts(mesh, table, baked, references)
    }

    fn from_parts(
        mesh: ReceiverMesh,
        table: TriangleVertexTable,
        baked: Vec<CubeTexture>,
        references: Vec<Vec3>,
    ) -> Result<Self> {
        if baked.len() != BAKED_VERTEX_COUNT {
            return Err(HelioError::config(format!(
                "expected {} baked cube textures, got {}",
                BAKED_VERTEX_COUNT,
                baked.len()
            )));
        }
        if references.len() != BAKED_VERTEX_COUNT {
            return Err(HelioError::config(format!(
                "expected {} reference directions, got {}",
                BAKED_VERTEX_COUNT,
                references.len()
            )));
        }

        let size = baked[0].size();
        if let Some(odd) = baked.iter().find(|t| t.size() != size) {
            return Err(HelioError::TextureSizeMismatch {
                expected: size,
                actual: odd.size(),
            });
        }

        let references = references
            .into_iter()
            .enumerate()
            .map(|(id, r)| {
                let n = r.normalize_or_zero();
                if n == Vec3::ZERO {
                    Err(HelioError::config(format!(
                        "reference direction of vertex {} has no length",
                        id
                    )))
                } else {
                    Ok(n)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Caustics context ready: {} triangles, {} baked {}px cube textures",
            table.triangle_count(),
            baked.len(),
            size
        );

        Ok(Self {
            mesh,
            table,
            baked,
            references,
        })
    }

    pub fn mesh(&self) -> &ReceiverMesh {
        &self.mesh
    }

    pub fn table(&self) -> &TriangleVertexTable {
        &self.table
    }

    /// Face size shared by every baked texture, and so by every cookie.
    pub fn cookie_size(&self) -> u32 {
        self.baked[0].size()
    }

    pub fn baked(&self, id: u32) -> Result<&CubeTexture> {
        self.baked
            .get(id as usize)
            .ok_or_else(|| HelioError::out_of_range("canonical vertex", id as usize, BAKED_VERTEX_COUNT))
    }

    /// Unit reference direction of canonical vertex `id`.
    pub fn reference(&self, id: u32) -> Result<Vec3> {
        self.references
            .get(id as usize)
            .copied()
            .ok_or_else(|| HelioError::out_of_range("canonical vertex", id as usize, BAKED_VERTEX_COUNT))
    }
}

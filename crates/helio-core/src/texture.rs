use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::cubemap::{self, CubeFace, FaceCoord};
use crate::error::{HelioError, Result};

/// How a [`CubeTexture`] is read between texel centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleFilter {
    /// Nearest texel.
    Point,
    /// Bilinear within the face, clamped at face edges.
    #[default]
    Bilinear,
}

/// CPU cube texture: six square RGBA faces stored face-major in
/// +X, −X, +Y, −Y, +Z, −Z order, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeTexture {
    size: u32,
    texels: Vec<Vec4>,
}

impl CubeTexture {
    /// A black cube texture with `size`×`size` faces.
    pub fn new(size: u32) -> Result<Self> {
        Self::uniform(size, Vec4::ZERO)
    }

    pub fn uniform(size: u32, color: Vec4) -> Result<Self> {
        if size == 0 {
            return Err(HelioError::config("cube texture faces must be at least 1px"));
        }
        let len = 6 * (size as usize) * (size as usize);
        Ok(Self {
            size,
            texels: vec![color; len],
        })
    }

    /// Builds a texture from raw face-major texels.
    pub fn from_texels(size: u32, texels: Vec<Vec4>) -> Result<Self> {
        let expected = 6 * (size as usize) * (size as usize);
        if size == 0 || texels.len() != expected {
            return Err(HelioError::config(format!(
                "cube texture of {}px faces needs {} texels, got {}",
                size,
                expected,
                texels.len()
            )));
        }
        Ok(Self { size, texels })
    }

    /// Fills every texel from the direction through its centre.
    pub fn from_fn(size: u32, mut f: impl FnMut(Vec3) -> Vec4) -> Result<Self> {
        let mut texture = Self::new(size)?;
        for face in CubeFace::ALL {
            for y in 0..size {
                for x in 0..size {
                    let dir = texture.texel_direction(face, x, y);
                    let i = texture.texel_index(face, x, y);
                    texture.texels[i] = f(dir);
                }
            }
        }
        Ok(texture)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn face_len(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    pub fn texels(&self) -> &[Vec4] {
        &self.texels
    }

    pub fn texels_mut(&mut self) -> &mut [Vec4] {
        &mut self.texels
    }

    pub fn face(&self, face: CubeFace) -> &[Vec4] {
        let n = self.face_len();
        &self.texels[face.index() * n..(face.index() + 1) * n]
    }

    pub fn texel_index(&self, face: CubeFace, x: u32, y: u32) -> usize {
        face.index() * self.face_len() + (y as usize) * (self.size as usize) + x as usize
    }

    pub fn texel(&self, face: CubeFace, x: u32, y: u32) -> Vec4 {
        self.texels[self.texel_index(face, x, y)]
    }

    pub fn set_texel(&mut self, face: CubeFace, x: u32, y: u32, color: Vec4) {
        let i = self.texel_index(face, x, y);
        self.texels[i] = color;
    }

    pub fn fill(&mut self, color: Vec4) {
        self.texels.fill(color);
    }

    /// Face coordinate of the centre of texel `(x, y)` on a `size`px face.
    pub fn texel_centre(size: u32, face: CubeFace, x: u32, y: u32) -> FaceCoord {
        let inv = 1.0 / size as f32;
        FaceCoord::new(face, Vec2::new((x as f32 + 0.5) * inv, (y as f32 + 0.5) * inv))
    }

    /// Direction through a texel centre (on the unit cube, not normalized).
    pub fn texel_direction(&self, face: CubeFace, x: u32, y: u32) -> Vec3 {
        cubemap::face_coord_to_direction(Self::texel_centre(self.size, face, x, y))
    }

    pub fn sample(&self, dir: Vec3, filter: SampleFilter) -> Vec4 {
        self.sample_coord(cubemap::direction_to_face_coord(dir), filter)
    }

    pub fn sample_coord(&self, coord: FaceCoord, filter: SampleFilter) -> Vec4 {
        let size = self.size as f32;
        let max = size - 1.0;
        match filter {
            SampleFilter::Point => {
                let p = (coord.uv * size).floor().clamp(Vec2::ZERO, Vec2::splat(max));
                self.texel(coord.face, p.x as u32, p.y as u32)
            }
            SampleFilter::Bilinear => {
                let p = coord.uv * size - Vec2::splat(0.5);
                let base = p.floor();
                let t = (p - base).clamp(Vec2::ZERO, Vec2::ONE);
                let lo = base.clamp(Vec2::ZERO, Vec2::splat(max));
                let hi = (base + Vec2::ONE).clamp(Vec2::ZERO, Vec2::splat(max));
                let (x0, y0, x1, y1) = (lo.x as u32, lo.y as u32, hi.x as u32, hi.y as u32);

                let top = self
                    .texel(coord.face, x0, y0)
                    .lerp(self.texel(coord.face, x1, y0), t.x);
                let bottom = self
                    .texel(coord.face, x0, y1)
                    .lerp(self.texel(coord.face, x1, y1), t.x);
                top.lerp(bottom, t.y)
            }
        }
    }

    /// Lays the faces out side by side in a `6·size × size` image, face `i`
    /// starting at column `i·size`.
    pub fn to_horizontal_strip(&self) -> Vec<Vec4> {
        let size = self.size as usize;
        let width = 6 * size;
        let mut strip = vec![Vec4::ZERO; width * size];
        for face in CubeFace::ALL {
            let src = self.face(face);
            for y in 0..size {
                let row = y * width + face.index() * size;
                strip[row..row + size].copy_from_slice(&src[y * size..(y + 1) * size]);
            }
        }
        strip
    }

    pub fn from_horizontal_strip(size: u32, strip: &[Vec4]) -> Result<Self> {
        let mut texture = Self::new(size)?;
        let size = size as usize;
        let width = 6 * size;
        if strip.len() != width * size {
            return Err(HelioError::config(format!(
                "horizontal strip for {}px faces needs {} texels, got {}",
                size,
                width * size,
                strip.len()
            )));
        }
        for face in CubeFace::ALL {
            let base = face.index() * size * size;
            for y in 0..size {
                let row = y * width + face.index() * size;
                texture.texels[base + y * size..base + (y + 1) * size]
                    .copy_from_slice(&strip[row..row + size]);
            }
        }
        Ok(texture)
    }

    /// Raw texel memory (`RGBA32F`, face-major) for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}

//! Weighted blend of three rotated baked cube textures into a cookie.

use glam::{Vec3, Vec4};
use helio_core::{cubemap, CubeFace, CubeTexture, HelioError, Result, SampleFilter};
use rayon::prelude::*;

use crate::align::{align_with_epsilon, AlignmentKind, AlignmentRotation};
use crate::config::CausticsConfig;
use crate::context::CausticsContext;
use crate::raycast::HitSample;

/// One contributing corner: its bake, the rotation applied to lookup
/// directions before sampling it, and its barycentric weight.
#[derive(Debug, Clone, Copy)]
pub struct BlendSource<'a> {
    pub texture: &'a CubeTexture,
    pub rotation: AlignmentRotation,
    pub weight: f32,
}

/// Writes `Σ weight_i · texture_i(rotation_i · dir)` into every texel of
/// `out`, clamped to `[0, 1]`.
///
/// Every texel is an independent function of the sources, so the result is
/// the same whether rows run serially or on the rayon pool.
pub fn blend_sources(
    sources: &[BlendSource<'_>; 3],
    filter: SampleFilter,
    parallel: bool,
    out: &mut CubeTexture,
) -> Result<()> {
    let size = out.size();
    for source in sources {
        if source.texture.size() != size {
            return Err(HelioError::TextureSizeMismatch {
                expected: size,
                actual: source.texture.size(),
            });
        }
    }

    let row_len = size as usize;
    if parallel {
        out.texels_mut()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, texels)| shade_row(sources, filter, size, row, texels));
    } else {
        out.texels_mut()
            .chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, texels)| shade_row(sources, filter, size, row, texels));
    }
    Ok(())
}

/// `row` counts rows across all six faces.
fn shade_row(
    sources: &[BlendSource<'_>; 3],
    filter: SampleFilter,
    size: u32,
    row: usize,
    texels: &mut [Vec4],
) {
    let face = CubeFace::ALL[row / size as usize];
    let y = (row % size as usize) as u32;
    for (x, texel) in texels.iter_mut().enumerate() {
        let coord = CubeTexture::texel_centre(size, face, x as u32, y);
        *texel = blend_texel(sources, filter, cubemap::face_coord_to_direction(coord));
    }
}

fn blend_texel(sources: &[BlendSource<'_>; 3], filter: SampleFilter, dir: Vec3) -> Vec4 {
    sources
        .iter()
        .fold(Vec4::ZERO, |acc, s| {
            if s.weight == 0.0 {
                acc
            } else {
                acc + s.weight * s.texture.sample(s.rotation.apply(dir), filter)
            }
        })
        .clamp(Vec4::ZERO, Vec4::ONE)
}

/// Synthesizes the cookie for one hit into `out`.
///
/// Fails with [`HelioError::OutOfRange`] when the hit's triangle or one of
/// its canonical corners is unknown to `context`; `out` is untouched then.
pub fn blend_hit(
    context: &CausticsContext,
    hit: &HitSample,
    config: &CausticsConfig,
    out: &mut CubeTexture,
) -> Result<()> {
    let ids = context.table().lookup(hit.triangle as usize)?;
    let weights = hit.barycentric.to_array();

    let sources = [
        corner_source(context, hit, config, ids[0], weights[0])?,
        corner_source(context, hit, config, ids[1], weights[1])?,
        corner_source(context, hit, config, ids[2], weights[2])?,
    ];

    log::trace!(
        "Blending triangle {} corners {:?} with weights {:?}",
        hit.triangle,
        ids,
        weights
    );
    blend_sources(&sources, config.filter, config.parallel, out)
}

fn corner_source<'a>(
    context: &'a CausticsContext,
    hit: &HitSample,
    config: &CausticsConfig,
    id: u32,
    weight: f32,
) -> Result<BlendSource<'a>> {
    let texture = context.baked(id)?;
    let rotation = align_with_epsilon(hit.direction, context.reference(id)?, config.alignment_epsilon);
    if rotation.kind == AlignmentKind::HalfTurn {
        log::debug!("Light is exactly opposite vertex {}, using half-turn alignment", id);
    }
    Ok(BlendSource {
        texture,
        rotation,
        weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;

    /// 2×2-per-face fixture with a distinct value in every texel.
    fn fixture(seed: f32) -> CubeTexture {
        let texels = (0..24)
            .map(|i| Vec4::new(seed, i as f32 / 24.0, 1.0 - i as f32 / 24.0, 1.0))
            .collect();
        CubeTexture::from_texels(2, texels).unwrap()
    }

    #[test]
    fn unit_weight_reproduces_rotated_source() {
        let (a, b, c) = (fixture(0.1), fixture(0.5), fixture(0.9));
        let rot = align(Vec3::X, Vec3::new(0.0, 1.0, 1.0));
        let sources = [
            BlendSource { texture: &a, rotation: rot, weight: 1.0 },
            BlendSource { texture: &b, rotation: AlignmentRotation::IDENTITY, weight: 0.0 },
            BlendSource { texture: &c, rotation: AlignmentRotation::IDENTITY, weight: 0.0 },
        ];

        for filter in [SampleFilter::Point, SampleFilter::Bilinear] {
            let mut out = CubeTexture::new(2).unwrap();
            blend_sources(&sources, filter, false, &mut out).unwrap();
            for face in CubeFace::ALL {
                for y in 0..2 {
                    for x in 0..2 {
                        let dir = out.texel_direction(face, x, y);
                        let expected = a.sample(rot.apply(dir), filter);
                        assert_eq!(out.texel(face, x, y), expected, "{:?} ({}, {})", face, x, y);
                    }
                }
            }
        }
    }

    #[test]
    fn identity_point_blend_copies_texels() {
        let a = fixture(0.3);
        let id = AlignmentRotation::IDENTITY;
        let sources = [
            BlendSource { texture: &a, rotation: id, weight: 1.0 },
            BlendSource { texture: &a, rotation: id, weight: 0.0 },
            BlendSource { texture: &a, rotation: id, weight: 0.0 },
        ];
        let mut out = CubeTexture::new(2).unwrap();
        blend_sources(&sources, SampleFilter::Point, false, &mut out).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn equal_thirds_of_same_source_reproduce_it() {
        let a = fixture(0.7);
        let rot = align(Vec3::Z, Vec3::new(1.0, 0.2, 0.0));
        let third = 1.0 / 3.0;
        let sources = [
            BlendSource { texture: &a, rotation: rot, weight: third },
            BlendSource { texture: &a, rotation: rot, weight: third },
            BlendSource { texture: &a, rotation: rot, weight: third },
        ];
        let mut blended = CubeTexture::new(2).unwrap();
        blend_sources(&sources, SampleFilter::Bilinear, false, &mut blended).unwrap();

        let single = [
            BlendSource { texture: &a, rotation: rot, weight: 1.0 },
            BlendSource { texture: &a, rotation: rot, weight: 0.0 },
            BlendSource { texture: &a, rotation: rot, weight: 0.0 },
        ];
        let mut reference = CubeTexture::new(2).unwrap();
        blend_sources(&single, SampleFilter::Bilinear, false, &mut reference).unwrap();

        for (got, want) in blended.texels().iter().zip(reference.texels()) {
            assert!((*got - *want).abs().max_element() < 1e-6, "{:?} vs {:?}", got, want);
        }
    }

    #[test]
    fn parallel_and_serial_agree() {
        let (a, b, c) = (fixture(0.2), fixture(0.4), fixture(0.6));
        let sources = [
            BlendSource { texture: &a, rotation: align(Vec3::X, Vec3::Y), weight: 0.2 },
            BlendSource { texture: &b, rotation: align(Vec3::Y, Vec3::NEG_Y), weight: 0.5 },
            BlendSource { texture: &c, rotation: AlignmentRotation::IDENTITY, weight: 0.3 },
        ];
        let mut serial = CubeTexture::new(2).unwrap();
        let mut parallel = CubeTexture::new(2).unwrap();
        blend_sources(&sources, SampleFilter::Bilinear, false, &mut serial).unwrap();
        blend_sources(&sources, SampleFilter::Bilinear, true, &mut parallel).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn output_is_clamped() {
        let bright = CubeTexture::uniform(1, Vec4::splat(0.9)).unwrap();
        let id = AlignmentRotation::IDENTITY;
        let sources = [
            BlendSource { texture: &bright, rotation: id, weight: 0.6 },
            BlendSource { texture: &bright, rotation: id, weight: 0.6 },
            BlendSource { texture: &bright, rotation: id, weight: 0.0 },
        ];
        let mut out = CubeTexture::new(1).unwrap();
        blend_sources(&sources, SampleFilter::Point, true, &mut out).unwrap();
        assert!(out.texels().iter().all(|&t| t == Vec4::ONE));
    }

    #[test]
    fn mismatched_source_size_is_rejected() {
        let small = CubeTexture::new(1).unwrap();
        let id = AlignmentRotation::IDENTITY;
        let sources = [
            BlendSource { texture: &small, rotation: id, weight: 1.0 },
            BlendSource { texture: &small, rotation: id, weight: 0.0 },
            BlendSource { texture: &small, rotation: id, weight: 0.0 },
        ];
        let mut out = CubeTexture::new(2).unwrap();
        assert_eq!(
            blend_sources(&sources, SampleFilter::Point, false, &mut out),
            Err(HelioError::TextureSizeMismatch { expected: 2, actual: 1 })
        );
    }
}

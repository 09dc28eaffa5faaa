//! Caustic cookie orbit example
//!
//! Builds an icosahedral receiver with twelve procedurally baked cube
//! textures, then orbits a point light around it and refreshes the light's
//! cookie every frame. A fixed directional light from above runs alongside.
//!
//! Run with `RUST_LOG=debug` to see per-frame statistics.

use glam::{Vec3, Vec4};
use helio_caustics::{
    CausticsConfig, CausticsContext, CausticsController, MeshRaycaster, TriangleVertexTable,
    BAKED_VERTEX_COUNT,
};
use helio_core::{create_icosahedron_mesh, icosahedron_corners, CubeTexture, HelioError, Result};
use helio_lighting::{DirectionalLight, Light, PointLight};

const COOKIE_SIZE: u32 = 32;
const FRAMES: u32 = 120;
const ORBIT_RADIUS: f32 = 6.0;
const RECEIVER_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Stand-in for an offline bake: a soft lobe of light around `toward`.
fn bake_lobe(toward: Vec3, tint: Vec3) -> Result<CubeTexture> {
    let toward = toward.normalize();
    CubeTexture::from_fn(COOKIE_SIZE, |dir| {
        let lobe = dir.normalize().dot(toward).max(0.0).powf(8.0);
        (tint * lobe).extend(1.0)
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting caustics orbit example");

    let mesh = create_icosahedron_mesh(1.0);
    let corners = icosahedron_corners(1.0);

    // Bakes are indexed by canonical vertex id, which follows first
    // appearance in the mesh rather than corner order.
    let table = TriangleVertexTable::build(&mesh)?;
    let baked = (0..BAKED_VERTEX_COUNT as u32)
        .map(|id| {
            let raw = table.representative(id).ok_or_else(|| {
                HelioError::out_of_range("canonical vertex", id as usize, BAKED_VERTEX_COUNT)
            })?;
            let position = mesh.positions[raw as usize];
            let hue = corners
                .iter()
                .position(|&c| c == position)
                .unwrap_or_default() as f32
                / 11.0;
            bake_lobe(position, Vec3::new(1.0 - hue, 0.6, hue))
        })
        .collect::<Result<Vec<_>>>()?;

    let context = CausticsContext::with_vertex_normals(mesh.clone(), baked)?;
    let raycaster = MeshRaycaster::new(mesh).with_offset(RECEIVER_POSITION);
    let mut controller = CausticsController::new(context, CausticsConfig::new());

    let mut lights = [
        controller.create_light(PointLight {
            position: RECEIVER_POSITION + Vec3::new(ORBIT_RADIUS, 2.0, 0.0),
            ..Default::default()
        })?,
        controller.create_light(DirectionalLight {
            direction: Vec3::new(0.1, -1.0, 0.05).normalize(),
            ..Default::default()
        })?,
    ];

    let mut published = 0;
    for frame in 0..FRAMES {
        let angle = frame as f32 / FRAMES as f32 * std::f32::consts::TAU;
        if let Light::Point(point) = &mut lights[0].light {
            point.position = RECEIVER_POSITION
                + Vec3::new(angle.cos() * ORBIT_RADIUS, 2.0, angle.sin() * ORBIT_RADIUS);
        }

        let stats = controller.update(&raycaster, RECEIVER_POSITION, &lights);
        published += stats.published;

        if frame % 30 == 0 {
            let cookie = lights[0].cookie().read();
            let mean = cookie.texels().iter().copied().sum::<Vec4>() / cookie.texels().len() as f32;
            log::info!(
                "Frame {:3}: orbit angle {:5.1}°, mean cookie colour ({:.3}, {:.3}, {:.3})",
                frame,
                angle.to_degrees(),
                mean.x,
                mean.y,
                mean.z
            );
        }
    }

    log::info!(
        "Done: {} cookies published over {} frames, orbit light at generation {}",
        published,
        FRAMES,
        lights[0].cookie().generation()
    );
    Ok(())
}

use glam::Vec3;
use helio_core::{HelioError, Result};
use helio_lighting::{CausticLight, Light};

use crate::blend::blend_hit;
use crate::config::{CausticsConfig, MissPolicy};
use crate::context::CausticsContext;
use crate::raycast::{HitSample, Raycaster};

/// What happened to one light's cookie this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieUpdate {
    /// A new cookie was published.
    Published { generation: u64 },
    /// Missed; the previous cookie stays.
    Kept,
    /// Missed; a black cookie was published.
    Cleared { generation: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub published: usize,
    pub missed: usize,
    pub failed: usize,
}

/// Per-frame driver: one probe ray, one blend and one cookie publish per
/// light.
#[derive(Debug)]
pub struct CausticsController {
    context: CausticsContext,
    config: CausticsConfig,
    frame: u64,
}

impl CausticsController {
    pub fn new(context: CausticsContext, config: CausticsConfig) -> Self {
        log::info!(
            "Caustics controller initialized ({:?} filter, parallel: {}, on miss: {:?})",
            config.filter,
            config.parallel,
            config.miss_policy
        );
        Self {
            context,
            config,
            frame: 0,
        }
    }

    pub fn context(&self) -> &CausticsContext {
        &self.context
    }

    pub fn config(&self) -> &CausticsConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CausticsConfig) {
        self.config = config;
    }

    /// Frames run through [`update`](Self::update) so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Wraps `light` with a cookie slot sized to match the baked textures.
    pub fn create_light(&self, light: impl Into<Light>) -> Result<CausticLight> {
        let light = CausticLight::new(light, self.context.cookie_size())?;
        log::debug!(
            "Registered {:?} light with a {}px cookie",
            light.light.light_type(),
            self.context.cookie_size()
        );
        Ok(light)
    }

    /// Applies one frame's raycast result to `light`'s cookie.
    ///
    /// On error the light's published cookie is left as it was.
    pub fn apply_hit(&self, hit: Option<&HitSample>, light: &CausticLight) -> Result<CookieUpdate> {
        let slot = light.cookie();
        if slot.size() != self.context.cookie_size() {
            return Err(HelioError::TextureSizeMismatch {
                expected: self.context.cookie_size(),
                actual: slot.size(),
            });
        }

        match hit {
            Some(hit) => {
                let generation =
                    slot.publish_with(|back| blend_hit(&self.context, hit, &self.config, back))?;
                Ok(CookieUpdate::Published { generation })
            }
            None => match self.config.miss_policy {
                MissPolicy::KeepPrevious => Ok(CookieUpdate::Kept),
                MissPolicy::Clear => Ok(CookieUpdate::Cleared {
                    generation: slot.clear(),
                }),
            },
        }
    }

    /// Probes every light against the receiver centred at `receiver` and
    /// refreshes its cookie. A failure on one light is logged and does not
    /// affect the others.
    pub fn update<R: Raycaster + ?Sized>(
        &mut self,
        raycaster: &R,
        receiver: Vec3,
        lights: &[CausticLight],
    ) -> FrameStats {
        self.frame += 1;
        let mut stats = FrameStats::default();

        for (index, light) in lights.iter().enumerate() {
            let ray = light.light.probe_ray(receiver);
            let hit = raycaster
                .raycast(&ray)
                .map(|hit| HitSample::from_hit(&hit, &ray));

            match self.apply_hit(hit.as_ref(), light) {
                Ok(CookieUpdate::Published { .. }) => stats.published += 1,
                Ok(CookieUpdate::Kept) | Ok(CookieUpdate::Cleared { .. }) => {
                    log::trace!("Light {} missed the receiver on frame {}", index, self.frame);
                    stats.missed += 1;
                }
                Err(e) => {
                    log::warn!(
                        "Skipping caustic cookie for {:?} light {} on frame {}: {}",
                        light.light.light_type(),
                        index,
                        self.frame,
                        e
                    );
                    stats.failed += 1;
                }
            }
        }

        log::debug!(
            "Caustics frame {}: {} published, {} missed, {} failed",
            self.frame,
            stats.published,
            stats.missed,
            stats.failed
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use helio_core::{create_icosahedron_mesh, CubeTexture, Ray};
    use helio_lighting::PointLight;

    use crate::raycast::RaycastHit;

    fn controller(config: CausticsConfig) -> CausticsController {
        let baked = (0..12)
            .map(|i| CubeTexture::uniform(2, Vec4::splat(i as f32 / 11.0)).unwrap())
            .collect();
        let context =
            CausticsContext::with_vertex_normals(create_icosahedron_mesh(1.0), baked).unwrap();
        CausticsController::new(context, config)
    }

    fn sample(triangle: u32) -> HitSample {
        HitSample::new(triangle, Vec3::new(0.5, 0.3, 0.2), Vec3::Y)
    }

    #[test]
    fn hit_publishes_weighted_cookie() {
        let ctrl = controller(CausticsConfig::new().with_parallel(false));
        let light = ctrl.create_light(PointLight::default()).unwrap();

        let update = ctrl.apply_hit(Some(&sample(0)), &light).unwrap();
        assert_eq!(update, CookieUpdate::Published { generation: 1 });

        // Triangle 0 has canonical corners 0, 1 and 2.
        let expected = (0.3 * 1.0 + 0.2 * 2.0) / 11.0;
        let cookie = light.cookie().read();
        assert!(cookie.texels().iter().all(|t| (t.x - expected).abs() < 1e-6));
    }

    #[test]
    fn bad_triangle_keeps_previous_cookie() {
        let ctrl = controller(CausticsConfig::new());
        let light = ctrl.create_light(PointLight::default()).unwrap();
        ctrl.apply_hit(Some(&sample(0)), &light).unwrap();
        let before = light.cookie().read().clone();

        let err = ctrl.apply_hit(Some(&sample(20)), &light).unwrap_err();
        assert_eq!(err, HelioError::out_of_range("triangle", 20, 20));
        assert_eq!(light.cookie().generation(), 1);
        assert_eq!(*light.cookie().read(), before);
    }

    #[test]
    fn miss_follows_policy() {
        let keep = controller(CausticsConfig::new());
        let light = keep.create_light(PointLight::default()).unwrap();
        keep.apply_hit(Some(&sample(0)), &light).unwrap();
        assert_eq!(keep.apply_hit(None, &light).unwrap(), CookieUpdate::Kept);
        assert_eq!(light.cookie().generation(), 1);

        let clear = controller(CausticsConfig::new().with_miss_policy(MissPolicy::Clear));
        assert_eq!(
            clear.apply_hit(None, &light).unwrap(),
            CookieUpdate::Cleared { generation: 2 }
        );
        assert!(light.cookie().read().texels().iter().all(|&t| t == Vec4::ZERO));
    }

    #[test]
    fn cookie_size_must_match_bakes() {
        let ctrl = controller(CausticsConfig::new());
        let light = CausticLight::new(PointLight::default(), 4).unwrap();
        assert_eq!(
            ctrl.apply_hit(Some(&sample(0)), &light),
            Err(HelioError::TextureSizeMismatch { expected: 2, actual: 4 })
        );
    }

    #[test]
    fn update_counts_each_outcome() {
        let mut ctrl = controller(CausticsConfig::new());
        let lights = [
            ctrl.create_light(PointLight { position: Vec3::new(0.0, 5.0, 0.0), ..Default::default() })
                .unwrap(),
            ctrl.create_light(PointLight { position: Vec3::new(0.0, -5.0, 0.0), ..Default::default() })
                .unwrap(),
            ctrl.create_light(PointLight { position: Vec3::new(5.0, 0.0, 0.0), ..Default::default() })
                .unwrap(),
        ];

        // Rays from above hit a valid triangle, rays from below hit a bogus
        // one, sideways rays miss.
        let raycaster = |ray: &Ray| {
            let triangle = if ray.direction.y < 0.0 {
                1
            } else if ray.direction.y > 0.0 {
                99
            } else {
                return None;
            };
            Some(RaycastHit {
                triangle,
                barycentric: Vec3::new(1.0, 0.0, 0.0),
                distance: 4.0,
            })
        };

        let stats = ctrl.update(&raycaster, Vec3::ZERO, &lights);
        assert_eq!(
            stats,
            FrameStats {
                published: 1,
                missed: 1,
                failed: 1
            }
        );
        assert_eq!(ctrl.frame(), 1);
        assert_eq!(lights[0].cookie().generation(), 1);
        assert_eq!(lights[1].cookie().generation(), 0);
        assert_eq!(lights[2].cookie().generation(), 0);
    }
}

use std::sync::Arc;

use glam::Vec3;
use helio_core::{Ray, Result};
use serde::{Deserialize, Serialize};

use crate::cookie::CookieSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightType {
    Directional,
    Point,
    Spot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Direction the light travels in.
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.3, -0.7, 0.2).normalize(),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub radius: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1000.0,
            radius: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub radius: f32,
    pub inner_cone_angle: f32,
    pub outer_cone_angle: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Y,
            color: Vec3::ONE,
            intensity: 1000.0,
            radius: 10.0,
            inner_cone_angle: 0.785, // 45 degrees
            outer_cone_angle: 1.047, // 60 degrees
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    pub fn light_type(&self) -> LightType {
        match self {
            Light::Directional(_) => LightType::Directional,
            Light::Point(_) => LightType::Point,
            Light::Spot(_) => LightType::Spot,
        }
    }

    /// Ray used to find where this light meets a receiver centred at
    /// `receiver`.
    ///
    /// Positional lights shoot from their position at the receiver centre,
    /// the spot cone is ignored. Directional lights shoot along their
    /// direction from one unit behind the receiver centre.
    pub fn probe_ray(&self, receiver: Vec3) -> Ray {
        match self {
            Light::Directional(l) => Ray::new(receiver - l.direction, l.direction),
            Light::Point(l) => Ray::new(l.position, receiver - l.position),
            Light::Spot(l) => Ray::new(l.position, receiver - l.position),
        }
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}

/// A light together with the cookie synthesized for it.
///
/// The cookie slot is shared so a renderer can hold on to it while the
/// caustics controller keeps publishing new frames into it.
#[derive(Debug)]
pub struct CausticLight {
    pub light: Light,
    cookie: Arc<CookieSlot>,
}

impl CausticLight {
    pub fn new(light: impl Into<Light>, cookie_size: u32) -> Result<Self> {
        Ok(Self {
            light: light.into(),
            cookie: Arc::new(CookieSlot::new(cookie_size)?),
        })
    }

    pub fn cookie(&self) -> &CookieSlot {
        &self.cookie
    }

    pub fn cookie_handle(&self) -> Arc<CookieSlot> {
        Arc::clone(&self.cookie)
    }
}

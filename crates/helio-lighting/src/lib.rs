//! Light sources that carry a caustic cookie.

pub mod cookie;
pub mod lights;

pub use cookie::CookieSlot;
pub use lights::{CausticLight, DirectionalLight, Light, LightType, PointLight, SpotLight};

//! Caustic light cookies.
//!
//! Twelve cube textures are baked offline, one per distinct corner of a
//! low-poly receiver. At runtime the controller finds the triangle each light
//! hits, rotates the three corner bakes so they face the current light
//! direction, and blends them with the hit's barycentric weights into the
//! light's cookie.

pub mod align;
pub mod blend;
pub mod config;
pub mod context;
pub mod controller;
pub mod raycast;
pub mod vertex_index;

pub use align::{align, align_with_epsilon, AlignmentKind, AlignmentRotation};
pub use blend::{blend_hit, blend_sources, BlendSource};
pub use config::{CausticsConfig, MissPolicy};
pub use context::CausticsContext;
pub use controller::{CausticsController, CookieUpdate, FrameStats};
pub use raycast::{HitSample, MeshRaycaster, RaycastHit, Raycaster};
pub use vertex_index::{canonicalize, TriangleVertexTable};

/// Number of baked cube textures, and so of distinct receiver corners.
pub const BAKED_VERTEX_COUNT: usize = 12;

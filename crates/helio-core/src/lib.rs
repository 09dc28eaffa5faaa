//! Core types shared by the Helio caustic cookie crates.

pub mod cubemap;
pub mod error;
pub mod mesh;
pub mod ray;
pub mod texture;

pub use cubemap::{
    direction_to_face, direction_to_face_coord, direction_to_face_coord_on,
    face_coord_to_direction, CubeFace, FaceCoord,
};
pub use error::{HelioError, Result};
pub use mesh::{create_icosahedron_mesh, icosahedron_corners, ReceiverMesh};
pub use ray::Ray;
pub use texture::{CubeTexture, SampleFilter};

pub use glam;

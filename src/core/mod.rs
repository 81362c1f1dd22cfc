pub mod camera;
pub mod color;
pub mod mesh;

pub use camera::CameraState;
pub use color::{Color, PALETTE};
pub use mesh::{Edge, Mesh, ParseError, ParseErrorKind};

use clap::{Arg, ArgMatches, Command};

pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod viewer;
pub mod window;

pub use config::ViewerConfig;
pub use self::core::{CameraState, Color, Edge, Mesh};
pub use error::{Result, ViewerError};
pub use loader::MeshLoader;
pub use viewer::Viewer;
pub use window::WindowSurface;

pub fn create_clap_command() -> Command {
    Command::new("wireframe_viewer")
        .about("Spinning wireframe viewer for OBJ meshes")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("model")
                .value_name("MODEL")
                .help("Path to the .obj model to view, or 'demo' to cycle through every model in ./models")
                .required(false),
        )
}

/// The model argument, or a usage error naming `program` when it is missing.
pub fn model_argument(matches: &ArgMatches, program: &str) -> Result<String> {
    matches
        .get_one::<String>("model")
        .cloned()
        .ok_or_else(|| ViewerError::Usage {
            program: program.to_string(),
        })
}

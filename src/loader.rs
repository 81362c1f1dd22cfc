use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::{Color, Mesh};
use crate::error::ViewerError;

/// CLI argument that loads every model in the models directory.
pub const DEMO_ARG: &str = "demo";

/// Turns the CLI argument into the list of meshes to cycle through, giving
/// each a color from the palette.
pub struct MeshLoader {
    rng: StdRng,
    palette: Vec<Color>,
    models_dir: PathBuf,
}

impl MeshLoader {
    pub fn new(rng: StdRng, palette: Vec<Color>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            rng,
            palette,
            models_dir: models_dir.into(),
        }
    }

    /// Fixed seed, so the color sequence repeats between runs.
    pub fn seeded(seed: u64, palette: Vec<Color>, models_dir: impl Into<PathBuf>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), palette, models_dir)
    }

    /// `demo` loads every `.obj` in the models directory, sorted by file name.
    /// Anything else is a path to a single model.
    pub fn load(&mut self, argument: &str) -> crate::Result<Vec<Mesh>> {
        let paths = if argument == DEMO_ARG {
            self.demo_paths()?
        } else {
            vec![PathBuf::from(argument)]
        };

        let meshes = paths
            .iter()
            .map(|path| self.load_one(path))
            .collect::<crate::Result<Vec<_>>>()?;

        if meshes.is_empty() {
            return Err(ViewerError::NoModelsFound(self.models_dir.clone()));
        }
        Ok(meshes)
    }

    fn load_one(&mut self, path: &Path) -> crate::Result<Mesh> {
        let color = Color::random_from(&self.palette, &mut self.rng);
        let mesh = Mesh::from_obj(path)?.with_color(color);
        info!(
            "Loaded {} ({:?}): {} vertices, {} edges",
            path.display(),
            mesh.name,
            mesh.vertices.len(),
            mesh.edges.len()
        );
        Ok(mesh)
    }

    fn demo_paths(&self) -> crate::Result<Vec<PathBuf>> {
        let dir = &self.models_dir;
        let entries = fs::read_dir(dir).map_err(|e| ViewerError::io(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ViewerError::io(dir, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "obj") {
                paths.push(path);
            }
        }
        paths.sort();

        info!("Found {} models in {}", paths.len(), dir.display());
        Ok(paths)
    }
}

use std::env;
use std::fs::OpenOptions;
use std::process::ExitCode;

use clap::ArgMatches;
use log::{error, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};
use wireframe_viewer::{
    create_clap_command, model_argument, MeshLoader, Viewer, ViewerConfig, WindowSurface,
};

const LOG_FILE: &str = "wireframe_viewer.log";

fn init_logging() {
    let result = match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => WriteLogger::init(LevelFilter::Info, Config::default(), file),
        Err(_) => TermLogger::init(
            LevelFilter::Warn,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };
    if let Err(e) = result {
        eprintln!("Failed to set up logging: {}", e);
    }
}

fn run(matches: &ArgMatches, program: &str) -> wireframe_viewer::Result<()> {
    let config = ViewerConfig::default();
    let model = model_argument(matches, program)?;

    let mut loader = MeshLoader::new(
        StdRng::from_entropy(),
        config.palette.clone(),
        config.models_dir.clone(),
    );
    let meshes = loader.load(&model)?;

    let mut surface = WindowSurface::new(&config)?;
    Viewer::new(config, meshes).run(&mut surface)
}

fn main() -> ExitCode {
    init_logging();

    let program = env::args()
        .next()
        .unwrap_or_else(|| "wireframe_viewer".to_string());

    let matches = match create_clap_command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            // --help and --version land here too
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&matches, &program) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

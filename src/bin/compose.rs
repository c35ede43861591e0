//! Renders a saved scene to a PNG without a window.
//!
//! Usage: `compose <scene.json> [out-dir] [--config editor.json]`
//!
//! Image objects are looked up relative to the scene file by their `src`.

#![warn(clippy::all, rust_2018_idioms)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use image_text_composer::scene::ObjectKind;
use image_text_composer::{EditorConfig, Editor, EditorError, SceneDocument, VisualObject};

/// Render a saved scene to a PNG.
#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "compose", version)]
struct Cli {
    /// Scene JSON saved by the editor.
    scene: PathBuf,

    /// Directory the PNG is written to.
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Editor config JSON (canvas size, export options).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    use clap::Parser as _;

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let cli = Cli::parse();
    match run(&cli.scene, &cli.out_dir, cli.config.as_deref()) {
        Ok(written) => {
            println!("{}", written.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("compose failed: {}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn run(scene_path: &Path, out_dir: &Path, config_path: Option<&Path>) -> Result<PathBuf, EditorError> {
    let config = match config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let json = std::fs::read_to_string(scene_path)?;
    let document = SceneDocument::from_json(&json)?;

    let mut editor = Editor::new(config)?;
    let base_dir = scene_path.parent().unwrap_or_else(|| Path::new("."));
    for src in image_sources(&document.objects) {
        let bytes = match std::fs::read(base_dir.join(&src)) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("skipping image {}: {}", src, err);
                continue;
            }
        };
        if let Err(err) = editor.engine().register_image_bytes(src.clone(), &bytes) {
            log::warn!("skipping image {}: {}", src, err);
        }
    }

    editor.load_json(json);
    futures::executor::block_on(editor.settle());

    let exported = editor.save_png()?;
    std::fs::create_dir_all(out_dir)?;
    let target = out_dir.join(&exported.file_name);
    std::fs::write(&target, &exported.bytes)?;
    log::info!("wrote {} ({} bytes)", target.display(), exported.bytes.len());
    Ok(target)
}

#[cfg(not(target_arch = "wasm32"))]
fn image_sources(objects: &[VisualObject]) -> Vec<String> {
    let mut sources = Vec::new();
    for object in objects {
        match &object.kind {
            ObjectKind::Image { src } if !sources.contains(src) => sources.push(src.clone()),
            ObjectKind::Group { objects } => {
                for src in image_sources(objects) {
                    if !sources.contains(&src) {
                        sources.push(src);
                    }
                }
            }
            _ => {}
        }
    }
    sources
}

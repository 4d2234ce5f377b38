//! Atlas Builder Binary
//!
//! Runs the batch pipeline over already-fetched inputs on disk and
//! writes the finished dataset artifacts. Fetching, pagination, and
//! rate-limiting live in the upstream collaborator; this binary only
//! reads local files.
//!
//! ## Configuration
//!
//! Arguments:
//! - `<chains.json>`: array of evolution chain trees
//! - `<species.json>`: array of as-fetched species profiles
//! - `<sprites_dir>`: directory of `<id>.png` sprite files (missing
//!   files leave blank cells)
//! - `<out_dir>`: output directory for the artifacts
//!
//! Environment variables:
//! - `CELL_SIZE`: sprite cell edge length in pixels (default: 96)
//! - `RUST_LOG`: log level filter (default: info)
//!
//! ## Usage
//!
//! ```bash
//! atlas_builder data/chains.json data/species.json data/sprites out/
//! ```
//!
//! Outputs `records.json`, `spritesheet.png`, and `atlas_manifest.json`
//! under `<out_dir>`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use evolution_atlas::{ChainNode, DatasetPipeline, SpeciesProfile, DEFAULT_CELL_SIZE};

/// Initialize the tracing subscriber with an env-controlled filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "atlas_builder=info,evolution_atlas=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let version = env!("CARGO_PKG_VERSION");
    info!(version = version, "Starting atlas builder");

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        eprintln!("Usage: atlas_builder <chains.json> <species.json> <sprites_dir> <out_dir>");
        std::process::exit(2);
    }
    let chains_path = Path::new(&args[1]);
    let species_path = Path::new(&args[2]);
    let sprites_dir = Path::new(&args[3]);
    let out_dir = PathBuf::from(&args[4]);

    let cell_size: u32 = std::env::var("CELL_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CELL_SIZE);

    // Load inputs
    let chains: Vec<ChainNode> = serde_json::from_slice(&std::fs::read(chains_path)?)?;
    let profiles: Vec<SpeciesProfile> = serde_json::from_slice(&std::fs::read(species_path)?)?;
    info!(
        chains = chains.len(),
        species = profiles.len(),
        cell_size = cell_size,
        "inputs loaded"
    );

    // Collect sprite bytes per species; a missing file is a blank cell,
    // not an error.
    let mut sprites = BTreeMap::new();
    for profile in &profiles {
        let path = sprites_dir.join(format!("{}.png", profile.id));
        match std::fs::read(&path) {
            Ok(bytes) => {
                sprites.insert(profile.id, bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(species = %profile.id, path = %path.display(), error = %e, "sprite unreadable");
            }
        }
    }
    info!(sprites = sprites.len(), "sprite files loaded");

    // Run the batch
    let start = Instant::now();
    let pipeline = DatasetPipeline::new(cell_size)?;
    let dataset = pipeline.build(profiles, &chains, &sprites)?;
    info!(
        latency_ms = start.elapsed().as_millis() as u64,
        records = dataset.records.len(),
        registry_fingerprint = %dataset.registry_fingerprint,
        sheet_fingerprint = %dataset.manifest.sheet_fingerprint,
        "pipeline complete"
    );

    for failure in &dataset.manifest.failures {
        warn!(identifier = %failure.identifier, reason = %failure.reason, "sprite failed");
    }

    // Persist artifacts
    std::fs::create_dir_all(&out_dir)?;

    let records_path = out_dir.join("records.json");
    std::fs::write(&records_path, serde_json::to_vec_pretty(&dataset.records)?)?;

    if !dataset.records.is_empty() {
        let sheet_path = out_dir.join("spritesheet.png");
        std::fs::write(&sheet_path, dataset.sheet.encode_png()?)?;
        info!(
            path = %sheet_path.display(),
            cols = dataset.manifest.cols,
            rows = dataset.manifest.rows,
            width = dataset.manifest.width,
            height = dataset.manifest.height,
            "sprite sheet written"
        );
    }

    let manifest_path = out_dir.join("atlas_manifest.json");
    std::fs::write(&manifest_path, serde_json::to_vec_pretty(&dataset.manifest)?)?;

    info!(path = %records_path.display(), "dataset written");
    Ok(())
}

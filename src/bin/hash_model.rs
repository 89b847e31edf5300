//! Manifest utility for cardiorisk model artifacts.
//!
//! Writes `manifest.json` next to `scaler.json` and `logistic_model.json`,
//! binding each file to its SHA-256 digest so the application can refuse
//! tampered or mismatched artifacts at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hash_model -- <model_dir> [--created-at <unix_secs>]
//! ```

use std::env;
use std::path::PathBuf;

use cardiorisk::adapters::logistic::{write_manifest, MANIFEST_FILE};

fn usage() -> String {
    "Usage: hash_model <model_dir> [--created-at <unix_secs>]".to_string()
}

fn parse_args() -> Result<(PathBuf, Option<i64>), String> {
    let mut args = env::args().skip(1);
    let mut model_dir: Option<PathBuf> = None;
    let mut created_at: Option<i64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--created-at" => {
                let v = args.next().ok_or_else(usage)?;
                let parsed = v
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| "--created-at must be an i64".to_string())?;
                created_at = Some(parsed);
            }
            "-h" | "--help" => return Err(usage()),
            _ => {
                if model_dir.is_none() {
                    model_dir = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    let model_dir = model_dir.ok_or_else(usage)?;
    Ok((model_dir, created_at))
}

fn main() -> Result<(), String> {
    let (model_dir, created_at) = parse_args()?;

    let model_dir = if model_dir.is_file() {
        model_dir
            .parent()
            .ok_or_else(|| "Model path has no parent directory".to_string())?
            .to_path_buf()
    } else {
        model_dir
    };

    // A stale manifest is expected here; only the artifacts themselves must load.
    let created_at = created_at.unwrap_or_else(|| chrono::Utc::now().timestamp());
    let manifest = write_manifest(&model_dir, created_at)
        .map_err(|e| format!("Refusing to hash {model_dir:?}: {e}"))?;

    let manifest_path = model_dir.join(MANIFEST_FILE);
    println!("Wrote manifest: {manifest_path:?}");
    for (name, digest) in &manifest.files {
        println!("  {name}  {digest}");
    }

    Ok(())
}

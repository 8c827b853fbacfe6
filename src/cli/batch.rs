//! Batch generation from a TOML manifest
//!
//! ```toml
//! [[asset]]
//! kind = "character"
//! subject = "elf ranger"
//! seed = 7
//!
//! [[asset]]
//! kind = "weapon"
//! subject = "axe"
//! guidance = 9.0
//! ```
//!
//! Entries render in parallel. Each gets its own PRNG context, so the output
//! matches generating them one at a time.

use rayon::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

use super::{pipeline_for, resolve_config, EXIT_ERROR, EXIT_SUCCESS};
use crate::config::{CliOverrides, ConfigError, ForgeConfig};
use crate::pipeline::{AssetKind, AssetPipeline, GeneratedAsset, GenerationRequest, PipelineError};

/// Batch manifest file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "asset")]
    pub assets: Vec<ManifestEntry>,
}

/// One `[[asset]]` entry. Missing steps and guidance come from forge.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub kind: AssetKind,
    pub subject: String,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub guidance: Option<f64>,
}

impl ManifestEntry {
    fn to_request(&self, config: &ForgeConfig) -> GenerationRequest {
        GenerationRequest::new(self.kind, self.subject.clone())
            .with_seed(self.seed)
            .with_steps(self.steps.unwrap_or(config.generation.inference_steps))
            .with_guidance(self.guidance.unwrap_or(config.generation.guidance_scale))
    }
}

/// Read a manifest and turn it into requests.
pub fn load_manifest(path: &Path, config: &ForgeConfig) -> Result<Vec<GenerationRequest>, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let manifest: Manifest = toml::from_str(&contents)?;

    let mut errors = Vec::new();
    if manifest.assets.is_empty() {
        errors.push(format!("{}: no [[asset]] entries", path.display()));
    }
    for (i, entry) in manifest.assets.iter().enumerate() {
        if entry.steps == Some(0) {
            errors.push(format!("asset[{}].steps must be a positive integer", i));
        }
        if entry.guidance.is_some_and(|g| !g.is_finite()) {
            errors.push(format!("asset[{}].guidance must be a finite number", i));
        }
    }
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok(manifest.assets.iter().map(|entry| entry.to_request(config)).collect())
}

/// Render every request, keeping manifest order in the results.
pub fn generate_all(
    pipeline: &AssetPipeline,
    requests: &[GenerationRequest],
) -> Vec<Result<GeneratedAsset, PipelineError>> {
    requests.par_iter().map(|request| pipeline.generate(request)).collect()
}

/// Execute the batch command
pub fn run_batch(
    manifest: &Path,
    jobs: Option<u32>,
    out: Option<PathBuf>,
    json: bool,
    config_path: Option<&Path>,
) -> ExitCode {
    let overrides = CliOverrides { out, ..Default::default() };
    let config = match resolve_config(config_path, &overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let requests = match load_manifest(manifest, &config) {
        Ok(requests) => requests,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    debug!(count = requests.len(), manifest = %manifest.display(), "loaded manifest");

    let pipeline = pipeline_for(&config);
    let results = match jobs {
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n as usize).build() {
            Ok(pool) => pool.install(|| generate_all(&pipeline, &requests)),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        None => generate_all(&pipeline, &requests),
    };

    let mut failed = 0usize;
    let mut metadata = Vec::new();
    for result in results {
        match result {
            Ok(asset) => {
                if json {
                    metadata.push(asset.metadata());
                } else {
                    println!("{}", asset.path.display());
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                failed += 1;
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(&metadata) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    info!(generated = requests.len() - failed, failed, "batch finished");
    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(body: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("batch.toml");
        fs::write(&path, body).expect("should write manifest");
        (temp, path)
    }

    #[test]
    fn test_load_manifest_fills_defaults() {
        let (_temp, path) = write_manifest(
            r#"
[[asset]]
kind = "character"
subject = "elf ranger"
seed = 7

[[asset]]
kind = "weapon"
subject = "axe"
steps = 40
guidance = 9.0
"#,
        );
        let mut config = ForgeConfig::default();
        config.generation.inference_steps = 25;

        let requests = load_manifest(&path, &config).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].kind, AssetKind::Character);
        assert_eq!(requests[0].seed, Some(7));
        assert_eq!(requests[0].inference_steps, 25);
        assert_eq!(requests[0].guidance_scale, 7.5);
        assert_eq!(requests[1].seed, None);
        assert_eq!(requests[1].inference_steps, 40);
        assert_eq!(requests[1].guidance_scale, 9.0);
    }

    #[test]
    fn test_load_manifest_negative_seed() {
        let (_temp, path) = write_manifest("[[asset]]\nkind = \"weapon\"\nsubject = \"sword\"\nseed = -5\n");
        let requests = load_manifest(&path, &ForgeConfig::default()).unwrap();
        assert_eq!(requests[0].seed, Some(-5));
        assert_eq!(requests[0].file_name(), "weapon_7f2bd14e.png");
    }

    #[test]
    fn test_load_manifest_rejects_empty() {
        let (_temp, path) = write_manifest("");
        let result = load_manifest(&path, &ForgeConfig::default());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_manifest_rejects_bad_kind() {
        let (_temp, path) = write_manifest("[[asset]]\nkind = \"vehicle\"\nsubject = \"cart\"\n");
        let result = load_manifest(&path, &ForgeConfig::default());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_manifest_rejects_zero_steps() {
        let (_temp, path) =
            write_manifest("[[asset]]\nkind = \"weapon\"\nsubject = \"bow\"\nsteps = 0\n");
        match load_manifest(&path, &ForgeConfig::default()) {
            Err(ConfigError::Validation(errors)) => assert!(errors[0].contains("asset[0].steps")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_all_matches_sequential() {
        let temp = TempDir::new().expect("should create temp dir");
        let pipeline = AssetPipeline::new(crate::output::DirStore::new(temp.path()));
        let requests: Vec<GenerationRequest> = ["sword", "axe", "bow", "staff"]
            .iter()
            .enumerate()
            .map(|(i, w)| GenerationRequest::new(AssetKind::Weapon, *w).with_seed(Some(i as i64)))
            .collect();

        let parallel = generate_all(&pipeline, &requests);
        for (request, result) in requests.iter().zip(parallel) {
            let asset = result.unwrap();
            let sequential = pipeline.generate(request).unwrap();
            assert_eq!(asset.subject, request.subject);
            assert_eq!(asset.path, sequential.path);
            assert_eq!(asset.image, sequential.image);
        }
    }
}

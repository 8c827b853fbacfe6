//! Single-asset generation commands

use std::path::Path;
use std::process::ExitCode;

use super::{pipeline_for, resolve_config, GenerateArgs, EXIT_ERROR, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::pipeline::{AssetKind, GeneratedAsset, GenerationRequest};

/// Execute the character, weapon or environment command
pub fn run_generate(
    kind: AssetKind,
    subject: &str,
    args: &GenerateArgs,
    config_path: Option<&Path>,
) -> ExitCode {
    let overrides = CliOverrides {
        out: args.out.clone(),
        steps: args.steps,
        guidance: args.guidance,
    };
    let config = match resolve_config(config_path, &overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let request = GenerationRequest::new(kind, subject)
        .with_seed(args.seed)
        .with_steps(config.generation.inference_steps)
        .with_guidance(config.generation.guidance_scale);

    let pipeline = pipeline_for(&config);
    match pipeline.generate(&request) {
        Ok(asset) => print_asset(&asset, args.json),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn print_asset(asset: &GeneratedAsset, json: bool) -> ExitCode {
    if !json {
        println!("{}", asset.path.display());
        return ExitCode::from(EXIT_SUCCESS);
    }

    match serde_json::to_string_pretty(&asset.metadata()) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

//! Conceptforge - procedural fantasy concept art
//!
//! This library provides functionality to:
//! - Render characters, weapons and environments from themed palettes
//! - Post-process them with noise, gradient backgrounds and Gaussian blur
//! - Title, hash and save the results as 512x512 PNG files
//!
//! All randomness flows through an explicit [`rng::DrawRng`], so a seeded
//! request always produces the same image.
//!
//! ```no_run
//! use conceptforge::output::DirStore;
//! use conceptforge::pipeline::AssetPipeline;
//!
//! let pipeline = AssetPipeline::new(DirStore::new("outputs/images"));
//! let asset = pipeline.generate_character("fantasy warrior", Some(42), 20, 7.5)?;
//! assert!(asset.path.ends_with("character_92528287.png"));
//! # Ok::<(), conceptforge::pipeline::PipelineError>(())
//! ```

pub mod cli;
pub mod config;
pub mod draw;
pub mod output;
pub mod palettes;
pub mod pipeline;
pub mod postprocess;
pub mod render;
pub mod rng;
pub mod shapes;
pub mod text;

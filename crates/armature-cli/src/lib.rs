//! CLI logic for the armature model tool.
//!
//! This module contains the core CLI logic: load configuration, read a model
//! manifest, assemble the graph, and either write the serialized document to
//! disk or publish it to the configured endpoint.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use armature::{ArmatureError, Assembler, manifest::Manifest, publish::HttpPublisher};

/// Run the armature CLI application.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArmatureError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Manifest loading errors
/// - Model assembly errors
/// - Publishing errors
pub fn run(args: &Args) -> Result<(), ArmatureError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model manifest"
    );

    // Load configuration
    let workspace_config = config::load_config(args.config.as_ref())?;

    // Read and assemble the model
    let manifest = Manifest::load(&args.input)?;
    let assembler = Assembler::new(workspace_config);
    let model = assembler.assemble(&manifest)?;

    if args.publish {
        let publisher = HttpPublisher::from_config(assembler.config());
        assembler.publish(&model, &publisher)?;
        info!("Workspace published");
    } else {
        let document = assembler.document(&model);
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&args.output, json)?;
        info!(output_file = args.output; "Document written");
    }

    Ok(())
}

//! Adapters that turn armature errors into miette diagnostics.
//!
//! The library errors carry no source spans, so the adapter's job is to pick
//! a help text that points the user at the right artifact: the manifest, the
//! configuration file, or the remote service.

use miette::Diagnostic;
use thiserror::Error;

use armature::ArmatureError;

/// A reportable diagnostic wrapping an [`ArmatureError`].
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct Reportable {
    message: String,

    #[help]
    help: Option<String>,
}

/// Convert an error into a diagnostic the graphical reporter can render.
pub fn to_reportable(err: &ArmatureError) -> Reportable {
    let help = match err {
        ArmatureError::Config(_) => {
            Some("check the configuration file passed with --config".to_string())
        }
        ArmatureError::Manifest(_) => {
            Some("check the model manifest for malformed tables or missing fields".to_string())
        }
        ArmatureError::Model(_) => Some(
            "the model description is inconsistent; fix the manifest and re-run".to_string(),
        ),
        ArmatureError::Publish(_) => Some(
            "the documentation service rejected the upload; the assembled model itself is consistent"
                .to_string(),
        ),
        ArmatureError::Io(_) | ArmatureError::Serialize(_) => None,
    };

    Reportable {
        message: err.to_string(),
        help,
    }
}

//! Error types shared by every phaser component.

use std::path::PathBuf;

use thiserror::Error;

use crate::program::ProgramError;

/// Fatal conditions that abort a phaser run.
///
/// Phaser is a batch tool: none of these are retried. The binary reports
/// the message and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum PhaserError {
    /// A required input is missing or option values are inconsistent.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A chromosome string contains a character outside the step catalog.
    #[error("invalid chromosome {chromosome:?}: unknown optimisation step '{abbreviation}'")]
    InvalidChromosome {
        chromosome: String,
        abbreviation: char,
    },

    /// A file could not be opened, read or written.
    #[error("cannot access file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input program failed to parse.
    #[error("failed to load program {path}:\n{}", format_program_errors(.errors))]
    ProgramLoad {
        path: String,
        errors: Vec<ProgramError>,
    },

    /// The per-round progress report could not be written.
    #[error("failed to write progress report: {0}")]
    Report(#[source] std::io::Error),

    /// A component was handed a state it can never legitimately receive.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl PhaserError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PhaserError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by user-supplied configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PhaserError::Configuration(_) | PhaserError::InvalidChromosome { .. }
        )
    }
}

fn format_program_errors(errors: &[ProgramError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

use thiserror::Error;

/// Errors raised while building a surface.
///
/// Every variant is fatal for a run: geometry and radii are resolved eagerly,
/// so nothing is sampled once one of these has been returned.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Malformed XYZ input (bad count line, truncated atom list, bad atom line)
    #[error("failed to parse XYZ data: {details} (at line {line})")]
    Parse {
        /// 1-based line number in the source
        line: usize,
        /// What was wrong with the line
        details: String,
    },

    /// Element symbol missing from the radius table
    #[error("no van der Waals radius known for element '{0}'")]
    UnknownElement(String),

    /// Sampling parameter outside of its valid range
    #[error("invalid value {value} for parameter '{name}'")]
    InvalidParameter {
        /// Parameter name as exposed on the command line
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A molecule needs at least one atom
    #[error("molecule contains no atoms")]
    EmptyMolecule,

    /// Reading the input or writing an output failed
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Tabular export failed
    #[error("failed to export surface table: {0}")]
    Export(String),

    /// Figure rendering failed
    #[error("failed to render surface figure: {0}")]
    Plot(String),
}

impl SurfaceError {
    /// Shorthand for a [`SurfaceError::Parse`] at `line`.
    pub fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SurfaceError>;

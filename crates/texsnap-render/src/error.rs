//! Render pipeline error types.

use std::process::ExitStatus;
use std::string::FromUtf8Error;

use texsnap_svg::SvgError;

/// Error from the typesetting engine or from reading its output.
///
/// Notation errors in the markup are not represented here; they are reported
/// inline by the engine and surface as [`RenderOutcome::NotationError`](crate::RenderOutcome).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Engine process could not be started.
    #[error("failed to start typesetting engine `{program}`: {source}")]
    EngineSpawn {
        /// Program that was executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Engine process exited unsuccessfully.
    #[error("typesetting engine exited with {status}: {stderr}")]
    EngineFailed {
        /// Process exit status.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// Engine wrote something other than UTF-8.
    #[error("typesetting engine produced invalid UTF-8")]
    EngineOutput(#[from] FromUtf8Error),

    /// In-process engine reported a failure.
    #[error("typesetting engine error: {0}")]
    Engine(String),

    /// Engine output is not well-formed XML.
    #[error("invalid engine output: {0}")]
    Svg(#[from] SvgError),

    /// Engine output parsed but contains no `<svg>` element.
    #[error("engine output contains no <svg> element")]
    InvalidFragment,
}

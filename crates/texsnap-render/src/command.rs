//! Typesetting through an external converter process.

use tokio::process::Command;

use crate::error::RenderError;
use crate::typesetter::{ConvertOptions, Typesetter};

/// Default converter program (`tex2svg` from mathjax-node-cli).
pub const DEFAULT_PROGRAM: &str = "tex2svg";

/// Runs an external program that prints an SVG fragment for its last argument.
///
/// The command line is `<program> <args...> [--inline] -- <markup>`; `--inline`
/// is only passed when display mode is off.
#[derive(Debug, Clone)]
pub struct CommandTypesetter {
    program: String,
    args: Vec<String>,
}

impl CommandTypesetter {
    /// Create a typesetter running `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before the markup.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Program this typesetter runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandTypesetter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Typesetter for CommandTypesetter {
    async fn convert(&self, markup: &str, options: ConvertOptions) -> Result<String, RenderError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if !options.display {
            command.arg("--inline");
        }
        command.arg("--").arg(markup);

        tracing::debug!(program = %self.program, "Invoking typesetting engine");
        let output = command
            .output()
            .await
            .map_err(|source| RenderError::EngineSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::EngineFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

//! `texsnap render` command implementation.

use std::path::PathBuf;

use clap::Args;
use texsnap_app::{Dispatched, UiEvent};
use texsnap_config::{CliSettings, Config};
use texsnap_export::{OutputFormat, Scale};
use texsnap_svg::Rgb;

use super::{build_app, parse_color, parse_format, parse_scale, report_saved};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// LaTeX markup to render.
    latex: String,

    /// Output format: svg or png.
    #[arg(short, long, default_value = "svg", value_parser = parse_format)]
    format: OutputFormat,

    /// Export scale in percent (overrides config).
    #[arg(short, long, value_parser = parse_scale)]
    scale: Option<Scale>,

    /// Text color as #rrggbb (overrides config).
    #[arg(long, value_parser = parse_color)]
    text_color: Option<Rgb>,

    /// Background color as #rrggbb; implies --opaque unless --transparent is given.
    #[arg(long, value_parser = parse_color)]
    background: Option<Rgb>,

    /// Export without a background.
    #[arg(long)]
    transparent: bool,

    /// Paint the background color behind the expression.
    #[arg(long, conflicts_with = "transparent")]
    opaque: bool,

    /// Directory the file is saved to (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Typesetting engine program (overrides config).
    #[arg(long)]
    engine: Option<String>,

    /// Path to configuration file (default: auto-discover texsnap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, rendering or saving fails, or if
    /// the markup contains a notation error.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Resolve flags before moving into CliSettings
        let transparent = self.resolve_transparent();
        let cli_settings = CliSettings {
            engine_command: self.engine,
            scale: self.scale,
            text_color: self.text_color,
            background_color: self.background,
            transparent,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let mut app = build_app(&config, &output);
        app.dispatch(UiEvent::SetInput(self.latex)).await?;
        app.dispatch(UiEvent::Render).await?;

        if let Some(message) = app.state().display.error_message() {
            output.error(message);
            return Err(CliError::Notation);
        }

        let saved = app.dispatch(UiEvent::Save(self.format)).await?;
        match saved {
            Dispatched::Saved(report) => report_saved(&output, &app, &report),
            _ => output.warning("Nothing to save: the expression is empty"),
        }
        Ok(())
    }

    /// Resolve the transparency override from the flags.
    fn resolve_transparent(&self) -> Option<bool> {
        if self.transparent {
            Some(true)
        } else if self.opaque || self.background.is_some() {
            Some(false)
        } else {
            None
        }
    }
}

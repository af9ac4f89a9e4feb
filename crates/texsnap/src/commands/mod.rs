//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod session;

pub(crate) use render::RenderArgs;
pub(crate) use session::SessionArgs;

use console::Term;
use texsnap_app::{App, AppState, Clipboard};
use texsnap_config::Config;
use texsnap_export::{DirectoryTarget, ExportReport, OutputFormat, Scale};
use texsnap_svg::Rgb;

use crate::engine::Engine;
use crate::output::Output;

/// Clipboard writing copied markup to stdout.
pub(crate) struct TerminalClipboard {
    term: Term,
}

impl TerminalClipboard {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Clipboard for TerminalClipboard {
    fn write_text(&mut self, text: &str) -> std::io::Result<()> {
        self.term.write_line(text)
    }
}

pub(crate) type CliApp = App<Engine, TerminalClipboard, DirectoryTarget>;

/// Build the application from loaded configuration.
pub(crate) fn build_app(config: &Config, output: &Output) -> CliApp {
    let engine = Engine::from_config(config);
    tracing::info!(
        config = ?config.config_path,
        output_dir = %config.export_resolved.output_dir.display(),
        scale = %config.export_resolved.options.scale,
        "Loaded configuration"
    );
    output.detail(&format!("Engine: {}", engine.describe()));

    let state = AppState::with_options(config.export_resolved.options.clone());
    let target = DirectoryTarget::new(&config.export_resolved.output_dir);
    App::with_state(state, engine, TerminalClipboard::new(), target)
}

pub(crate) fn report_saved(output: &Output, app: &CliApp, report: &ExportReport) {
    let path = app.target().dir().join(report.filename);
    output.success(&format!("Saved {} ({} bytes)", path.display(), report.size));
}

pub(crate) fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: texsnap_export::ExportError| e.to_string())
}

pub(crate) fn parse_scale(s: &str) -> Result<Scale, String> {
    s.parse().map_err(|e: texsnap_export::ExportError| e.to_string())
}

pub(crate) fn parse_color(s: &str) -> Result<Rgb, String> {
    s.parse().map_err(|e: texsnap_svg::SvgError| e.to_string())
}

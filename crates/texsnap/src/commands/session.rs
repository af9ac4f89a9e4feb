//! `texsnap session` command implementation.
//!
//! Each stdin line is either new markup or a `:command` mapped to one UI
//! event. Failures are reported and the session continues.

use std::path::PathBuf;

use clap::Args;
use texsnap_app::{Dispatched, Snippet, UiEvent};
use texsnap_config::{CliSettings, Config};
use texsnap_export::OutputFormat;
use texsnap_render::DisplayContent;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{CliApp, build_app, parse_color, parse_format, parse_scale, report_saved};
use crate::error::CliError;
use crate::output::Output;

const HELP: &str = "\
Lines not starting with ':' replace the markup.
  :render                 render the markup
  :reset                  clear markup and result
  :copy                   copy the markup to stdout
  :insert <snippet>       power frac partial int defint sum prod lim
  :select <start> <end>   select characters of the markup
  :scale <percent>        export scale
  :color <#rrggbb>        text color
  :bg <#rrggbb>           background color
  :transparent on|off     transparent background
  :swap                   swap text and background colors
  :save svg|png           save the result
  :show                   print state and result
  :quit                   leave the session";

/// Arguments for the session command.
#[derive(Args)]
pub(crate) struct SessionArgs {
    /// Directory files are saved to (overrides config).
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

/// A parsed session line.
#[derive(Debug, PartialEq)]
enum SessionCommand {
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

impl SessionArgs {
    /// Execute the session command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdin cannot be read.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            engine_command: self.engine,
            output_dir: self.output_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let mut app = build_app(&config, &output);
        output.detail("Type :help for commands");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_line(line) {
                Ok(command) => command,
                Err(e) => {
                    tracing::debug!(line, error = %e, "Rejected session line");
                    output.warning(&e.to_string());
                    continue;
                }
            };
            match command {
                SessionCommand::Quit => break,
                SessionCommand::Help => output.info(HELP),
                SessionCommand::Show => show(&output, &app)?,
                SessionCommand::Event(event) => handle_event(&output, &mut app, event).await,
            }
        }
        Ok(())
    }
}

async fn handle_event(output: &Output, app: &mut CliApp, event: UiEvent) {
    let is_render = event == UiEvent::Render;
    let dispatched = app.dispatch(event).await;
    match dispatched {
        Ok(Dispatched::Saved(report)) => report_saved(output, app, &report),
        Ok(Dispatched::Copied) => output.detail("Copied markup"),
        Ok(Dispatched::Updated) if is_render => match app.state().display.content() {
            DisplayContent::Empty => output.detail("Nothing to render"),
            DisplayContent::Graphic(result) => {
                let doc = result.document();
                output.success(&format!(
                    "Rendered {} x {}",
                    doc.attr("width").unwrap_or("?"),
                    doc.attr("height").unwrap_or("?")
                ));
            }
            DisplayContent::Error(message) => output.error(message),
        },
        Ok(Dispatched::Updated) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Session event failed");
            output.error(&format!("Error: {e}"));
        }
    }
}

fn show(output: &Output, app: &CliApp) -> Result<(), CliError> {
    let state = app.state();
    let (start, end) = state.input.selection();
    let options = &state.options;
    output.info(&format!("Markup: {} [{start}..{end}]", state.input.text()));
    output.info(&format!(
        "Scale: {}  Text: {}  Background: {}{}",
        options.scale,
        options.text_color,
        options.background_color,
        if options.transparent { " (transparent)" } else { "" }
    ));
    output.result(&state.display.to_html())?;
    Ok(())
}

/// Parse one session line.
fn parse_line(line: &str) -> Result<SessionCommand, CliError> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(SessionCommand::Event(UiEvent::SetInput(line.to_owned())));
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    let arity = |count: usize| {
        if args.len() == count {
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                ":{name} takes {count} argument(s), got {}",
                args.len()
            )))
        }
    };

    let event = match name {
        "quit" | "q" => return arity(0).map(|()| SessionCommand::Quit),
        "help" | "h" => return arity(0).map(|()| SessionCommand::Help),
        "show" => return arity(0).map(|()| SessionCommand::Show),
        "render" => arity(0).map(|()| UiEvent::Render)?,
        "reset" => arity(0).map(|()| UiEvent::Reset)?,
        "copy" => arity(0).map(|()| UiEvent::Copy)?,
        "swap" => arity(0).map(|()| UiEvent::SwapColors)?,
        "insert" => {
            arity(1)?;
            UiEvent::Insert(args[0].parse::<Snippet>()?)
        }
        "select" => {
            arity(2)?;
            let offset = |s: &str| {
                s.parse::<usize>()
                    .map_err(|_| CliError::Validation(format!("Invalid offset: {s}")))
            };
            UiEvent::Select(offset(args[0])?, offset(args[1])?)
        }
        "scale" => {
            arity(1)?;
            UiEvent::SetScale(parse_scale(args[0]).map_err(CliError::Validation)?)
        }
        "color" => {
            arity(1)?;
            UiEvent::SetTextColor(parse_color(args[0]).map_err(CliError::Validation)?)
        }
        "bg" => {
            arity(1)?;
            UiEvent::SetBackgroundColor(parse_color(args[0]).map_err(CliError::Validation)?)
        }
        "transparent" => {
            arity(1)?;
            let transparent = match args[0] {
                "on" => true,
                "off" => false,
                other => {
                    return Err(CliError::Validation(format!(
                        "Expected on or off, got {other}"
                    )));
                }
            };
            UiEvent::SetTransparent(transparent)
        }
        "save" => {
            arity(1)?;
            let format: OutputFormat = parse_format(args[0]).map_err(CliError::Validation)?;
            UiEvent::Save(format)
        }
        other => {
            return Err(CliError::Validation(format!(
                "Unknown command :{other} (try :help)"
            )));
        }
    };
    Ok(SessionCommand::Event(event))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use texsnap_export::Scale;
    use texsnap_svg::Rgb;

    use super::*;

    fn event(line: &str) -> UiEvent {
        match parse_line(line).unwrap() {
            SessionCommand::Event(event) => event,
            other => panic!("expected an event for {line}, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_line_replaces_markup() {
        assert_eq!(event(r"\frac{a}{b}"), UiEvent::SetInput(r"\frac{a}{b}".to_owned()));
        assert_eq!(event("  x + 1"), UiEvent::SetInput("  x + 1".to_owned()));
    }

    #[test]
    fn test_commands_map_to_events() {
        assert_eq!(event(":render"), UiEvent::Render);
        assert_eq!(event(":reset"), UiEvent::Reset);
        assert_eq!(event(":copy"), UiEvent::Copy);
        assert_eq!(event(":swap"), UiEvent::SwapColors);
        assert_eq!(event(":insert frac"), UiEvent::Insert(Snippet::Fraction));
        assert_eq!(event(":select 2 5"), UiEvent::Select(2, 5));
        assert_eq!(
            event(":scale 150"),
            UiEvent::SetScale(Scale::from_percent(150).unwrap())
        );
        assert_eq!(event(":color #f00"), UiEvent::SetTextColor(Rgb::new(0xff, 0, 0)));
        assert_eq!(event(":bg #000000"), UiEvent::SetBackgroundColor(Rgb::BLACK));
        assert_eq!(event(":transparent off"), UiEvent::SetTransparent(false));
        assert_eq!(event(":save png"), UiEvent::Save(OutputFormat::Png));
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(parse_line(":quit").unwrap(), SessionCommand::Quit);
        assert_eq!(parse_line(":q").unwrap(), SessionCommand::Quit);
        assert_eq!(parse_line(":show").unwrap(), SessionCommand::Show);
        assert_eq!(parse_line(":help").unwrap(), SessionCommand::Help);
    }

    #[test]
    fn test_invalid_commands() {
        for line in [
            ":frobnicate",
            ":render now",
            ":insert sqrt",
            ":select 1",
            ":select a b",
            ":scale 0",
            ":color red",
            ":transparent maybe",
            ":save gif",
        ] {
            assert!(parse_line(line).is_err(), "{line}");
        }
    }

    #[test]
    fn test_arity_message_names_command() {
        let err = parse_line(":scale").unwrap_err();
        assert_eq!(err.to_string(), ":scale takes 1 argument(s), got 0");
    }
}

//! Application state and event dispatch.

use texsnap_export::{BlobRegistry, DownloadTarget, ExportOptions, ExportReport, export};
use texsnap_render::{
    DisplayBackground, DisplayStyle, DisplaySurface, RenderRequest, Typesetter, render,
};

use crate::clipboard::Clipboard;
use crate::error::AppError;
use crate::event::UiEvent;
use crate::input::InputBuffer;

/// Everything the user can see and edit.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Markup input.
    pub input: InputBuffer,
    /// Export options, always fully populated.
    pub options: ExportOptions,
    /// Result area.
    pub display: DisplaySurface,
}

impl AppState {
    /// State with the given initial export options.
    #[must_use]
    pub fn with_options(options: ExportOptions) -> Self {
        let mut state = Self {
            options,
            ..Self::default()
        };
        state.sync_display_style();
        state
    }

    /// Derive the result area style from the export options.
    fn sync_display_style(&mut self) {
        let options = &self.options;
        self.display.style = DisplayStyle {
            font_size_rem: options.scale.factor(),
            color: options.text_color,
            background: if options.transparent {
                DisplayBackground::Checkerboard
            } else {
                DisplayBackground::Solid(options.background_color)
            },
        };
    }
}

/// What a dispatched event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// State was updated (possibly not at all).
    Updated,
    /// Markup was copied to the clipboard.
    Copied,
    /// A file was downloaded.
    Saved(ExportReport),
}

/// The application: state plus its external collaborators.
pub struct App<T, C, D> {
    state: AppState,
    engine: T,
    clipboard: C,
    target: D,
    registry: BlobRegistry,
}

impl<T: Typesetter, C: Clipboard, D: DownloadTarget> App<T, C, D> {
    /// Create an application with default state.
    pub fn new(engine: T, clipboard: C, target: D) -> Self {
        Self::with_state(AppState::default(), engine, clipboard, target)
    }

    /// Create an application starting from `state`.
    pub fn with_state(state: AppState, engine: T, clipboard: C, target: D) -> Self {
        Self {
            state,
            engine,
            clipboard,
            target,
            registry: BlobRegistry::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Clipboard collaborator.
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Download target collaborator.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Number of temporary references still alive.
    pub fn live_object_urls(&self) -> usize {
        self.registry.live_count()
    }

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, exporting or copying fails. Notation
    /// errors are shown in the result area and are not errors here.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<Dispatched, AppError> {
        tracing::debug!(?event, "Dispatching event");
        let state = &mut self.state;
        match event {
            UiEvent::SetInput(text) => state.input.set_text(text),
            UiEvent::Select(start, end) => state.input.select(start, end),
            UiEvent::Insert(snippet) => state.input.insert(snippet),
            UiEvent::Render => {
                state.display.clear();
                let request = RenderRequest::new(state.input.text());
                if !request.markup().is_empty() {
                    let outcome = render(&self.engine, &request).await?;
                    state.display.show(outcome);
                }
            }
            UiEvent::Reset => {
                state.input.clear();
                state.display.clear();
            }
            UiEvent::Copy => {
                let text = state.input.text();
                if text.is_empty() {
                    return Ok(Dispatched::Updated);
                }
                self.clipboard
                    .write_text(text)
                    .map_err(AppError::Clipboard)?;
                return Ok(Dispatched::Copied);
            }
            UiEvent::SetScale(scale) => {
                state.options.scale = scale;
                state.sync_display_style();
            }
            UiEvent::SetTextColor(color) => {
                state.options.text_color = color;
                state.sync_display_style();
            }
            UiEvent::SetBackgroundColor(color) => {
                state.options.background_color = color;
                state.sync_display_style();
            }
            UiEvent::SetTransparent(transparent) => {
                state.options.transparent = transparent;
                state.sync_display_style();
            }
            UiEvent::SwapColors => {
                let options = &mut state.options;
                std::mem::swap(&mut options.text_color, &mut options.background_color);
                state.sync_display_style();
            }
            UiEvent::Save(format) => {
                let options = state.options.clone();
                let report = export(
                    state.display.graphic(),
                    &options,
                    format,
                    &mut self.registry,
                    &self.target,
                )
                .await?;
                if let Some(report) = report {
                    return Ok(Dispatched::Saved(report));
                }
            }
        }
        Ok(Dispatched::Updated)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;
    use texsnap_export::{MemoryTarget, OutputFormat, Scale};
    use texsnap_render::{ConvertOptions, DisplayContent, RenderError};
    use texsnap_svg::{Rgb, parse};

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::input::Snippet;

    const GRAPHIC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4ex" height="2ex" viewBox="0 0 40 20"><g stroke="currentColor" fill="currentColor"><rect x="0" y="0" width="20" height="20"/></g></svg>"##;
    const NOTATION_ERROR: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="9ex" height="2ex"><g data-mml-node="merror"><text>Missing close brace</text></g></svg>"#;

    /// Returns `GRAPHIC`, or a notation error for an unclosed brace.
    #[derive(Default)]
    struct FakeEngine {
        calls: Cell<usize>,
        seen: RefCell<Vec<String>>,
    }

    impl Typesetter for FakeEngine {
        async fn convert(&self, markup: &str, options: ConvertOptions) -> Result<String, RenderError> {
            assert!(options.display);
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push(markup.to_owned());
            if markup == "fail" {
                return Err(RenderError::Engine("engine crashed".to_owned()));
            }
            if markup.contains('{') && !markup.contains('}') {
                return Ok(NOTATION_ERROR.to_owned());
            }
            Ok(GRAPHIC.to_owned())
        }
    }

    type TestApp = App<FakeEngine, MemoryClipboard, MemoryTarget>;

    fn app() -> TestApp {
        App::new(FakeEngine::default(), MemoryClipboard::new(), MemoryTarget::new())
    }

    async fn rendered(markup: &str) -> TestApp {
        let mut app = app();
        app.dispatch(UiEvent::SetInput(markup.to_owned())).await.unwrap();
        app.dispatch(UiEvent::Render).await.unwrap();
        app
    }

    #[tokio::test]
    async fn test_render_shows_graphic() {
        let app = rendered("x^2").await;
        let graphic = app.state().display.graphic().unwrap();
        assert_eq!(graphic.document(), &parse(GRAPHIC).unwrap());
        assert_eq!(app.engine.seen.borrow().as_slice(), ["x^2"]);
    }

    #[tokio::test]
    async fn test_render_empty_input_clears_without_engine_call() {
        let mut app = rendered("x^2").await;
        app.dispatch(UiEvent::SetInput(String::new())).await.unwrap();
        app.dispatch(UiEvent::Render).await.unwrap();
        assert_eq!(app.state().display.content(), &DisplayContent::Empty);
        assert_eq!(app.engine.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_notation_error_replaces_previous_graphic() {
        let mut app = rendered("x^2").await;
        app.dispatch(UiEvent::SetInput(r"\frac{a".to_owned())).await.unwrap();
        app.dispatch(UiEvent::Render).await.unwrap();
        assert_eq!(
            app.state().display.error_message(),
            Some("Error: Missing close brace")
        );
        assert!(app.state().display.graphic().is_none());
    }

    #[tokio::test]
    async fn test_engine_failure_leaves_display_cleared() {
        let mut app = rendered("x^2").await;
        app.dispatch(UiEvent::SetInput("fail".to_owned())).await.unwrap();
        let err = app.dispatch(UiEvent::Render).await.unwrap_err();
        assert!(matches!(err, AppError::Render(RenderError::Engine(_))));
        assert_eq!(app.state().display.content(), &DisplayContent::Empty);
    }

    #[tokio::test]
    async fn test_insert_then_render_uses_buffer() {
        let mut app = app();
        app.dispatch(UiEvent::SetInput("a".to_owned())).await.unwrap();
        app.dispatch(UiEvent::Insert(Snippet::Sum)).await.unwrap();
        assert_eq!(app.state().input.text(), r"a\sum\limits_{}^{}");
        app.dispatch(UiEvent::Render).await.unwrap();
        assert_eq!(app.engine.seen.borrow().as_slice(), [r"a\sum\limits_{}^{}"]);
    }

    #[tokio::test]
    async fn test_reset_clears_input_and_result() {
        let mut app = rendered("x^2").await;
        app.dispatch(UiEvent::Reset).await.unwrap();
        assert_eq!(app.state().input.text(), "");
        assert_eq!(app.state().display.content(), &DisplayContent::Empty);
    }

    #[tokio::test]
    async fn test_copy_skips_empty_input() {
        let mut app = app();
        assert_eq!(app.dispatch(UiEvent::Copy).await.unwrap(), Dispatched::Updated);
        assert_eq!(app.clipboard().contents(), None);

        app.dispatch(UiEvent::SetInput("e^{i\\pi}".to_owned())).await.unwrap();
        assert_eq!(app.dispatch(UiEvent::Copy).await.unwrap(), Dispatched::Copied);
        assert_eq!(app.clipboard().contents(), Some("e^{i\\pi}"));
    }

    #[tokio::test]
    async fn test_option_events_update_display_style() {
        let mut app = app();
        app.dispatch(UiEvent::SetScale(Scale::from_percent(250).unwrap())).await.unwrap();
        app.dispatch(UiEvent::SetTextColor(Rgb::new(0xff, 0, 0))).await.unwrap();
        app.dispatch(UiEvent::SetBackgroundColor(Rgb::new(0, 0, 0xff))).await.unwrap();

        let style = &app.state().display.style;
        assert_eq!(style.font_size_rem, 2.5);
        assert_eq!(style.color, Rgb::new(0xff, 0, 0));
        assert_eq!(style.background, DisplayBackground::Checkerboard);

        app.dispatch(UiEvent::SetTransparent(false)).await.unwrap();
        assert_eq!(
            app.state().display.style.background,
            DisplayBackground::Solid(Rgb::new(0, 0, 0xff))
        );
        app.dispatch(UiEvent::SetTransparent(true)).await.unwrap();
        assert_eq!(app.state().display.style.background, DisplayBackground::Checkerboard);
    }

    #[tokio::test]
    async fn test_swap_colors() {
        let mut app = app();
        app.dispatch(UiEvent::SetTransparent(false)).await.unwrap();
        app.dispatch(UiEvent::SwapColors).await.unwrap();

        let state = app.state();
        assert_eq!(state.options.text_color, Rgb::WHITE);
        assert_eq!(state.options.background_color, Rgb::BLACK);
        assert_eq!(state.display.style.color, Rgb::WHITE);
        assert_eq!(state.display.style.background, DisplayBackground::Solid(Rgb::BLACK));
    }

    #[tokio::test]
    async fn test_save_without_result_is_noop() {
        let mut app = app();
        let outcome = app.dispatch(UiEvent::Save(OutputFormat::Svg)).await.unwrap();
        assert_eq!(outcome, Dispatched::Updated);
        assert!(app.target().downloads().is_empty());
    }

    #[tokio::test]
    async fn test_save_after_notation_error_is_noop() {
        let mut app = rendered("{").await;
        app.dispatch(UiEvent::Save(OutputFormat::Png)).await.unwrap();
        assert!(app.target().downloads().is_empty());
    }

    #[tokio::test]
    async fn test_save_svg_uses_current_options() {
        let mut app = rendered("x^2").await;
        app.dispatch(UiEvent::SetScale(Scale::from_percent(200).unwrap())).await.unwrap();
        app.dispatch(UiEvent::SetTextColor(Rgb::new(0xff, 0, 0))).await.unwrap();

        let outcome = app.dispatch(UiEvent::Save(OutputFormat::Svg)).await.unwrap();
        let Dispatched::Saved(report) = outcome else {
            panic!("expected a download, got {outcome:?}");
        };
        assert_eq!(report.filename, "output.svg");

        let saved = app.target().downloads();
        let doc = parse(std::str::from_utf8(&saved[0].bytes).unwrap()).unwrap();
        assert_eq!(doc.attr("width"), Some("8ex"));
        assert_eq!(doc.attr("height"), Some("4ex"));
        assert_eq!(doc.children[0].attr("fill"), Some("#ff0000"));
        assert_eq!(app.live_object_urls(), 0);

        // Displayed result is untouched by the export.
        let displayed = app.state().display.graphic().unwrap();
        assert_eq!(displayed.document().attr("width"), Some("4ex"));
    }

    #[tokio::test]
    async fn test_initial_options_drive_style() {
        let state = AppState::with_options(ExportOptions {
            scale: Scale::from_percent(50).unwrap(),
            transparent: false,
            ..Default::default()
        });
        assert_eq!(state.display.style.font_size_rem, 0.5);
        assert_eq!(state.display.style.background, DisplayBackground::Solid(Rgb::WHITE));
    }
}

//! Typesetting engine selection.

use texsnap_config::Config;
use texsnap_render::{CommandTypesetter, ConvertOptions, RenderError, Typesetter};
#[cfg(feature = "mathjax")]
use texsnap_render::MathJaxTypesetter;

/// Engine command selecting the embedded MathJax runtime.
#[cfg(feature = "mathjax")]
const EMBEDDED_ENGINE: &str = "mathjax";

/// Engine configured for this run.
#[derive(Debug)]
pub(crate) enum Engine {
    Command(CommandTypesetter),
    #[cfg(feature = "mathjax")]
    MathJax(MathJaxTypesetter),
}

impl Engine {
    pub(crate) fn from_config(config: &Config) -> Self {
        #[cfg(feature = "mathjax")]
        if config.engine.command == EMBEDDED_ENGINE {
            return Self::MathJax(MathJaxTypesetter);
        }
        Self::Command(
            CommandTypesetter::new(&config.engine.command).args(config.engine.args.iter().cloned()),
        )
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Command(engine) => format!("command `{}`", engine.program()),
            #[cfg(feature = "mathjax")]
            Self::MathJax(_) => "embedded MathJax".to_owned(),
        }
    }
}

impl Typesetter for Engine {
    async fn convert(&self, markup: &str, options: ConvertOptions) -> Result<String, RenderError> {
        match self {
            Self::Command(engine) => engine.convert(markup, options).await,
            #[cfg(feature = "mathjax")]
            Self::MathJax(engine) => engine.convert(markup, options).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_engine_from_default_config() {
        let engine = Engine::from_config(&Config::default());
        assert_eq!(engine.describe(), "command `tex2svg`");
    }
}

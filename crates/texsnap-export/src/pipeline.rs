//! The export pipeline.

use texsnap_render::VectorResult;
use texsnap_svg::{SvgNode, inject_background, rewrite, serialize};

use crate::blob::{Blob, BlobRegistry};
use crate::download::{DownloadTarget, trigger_download};
use crate::encoder::rasterize_async;
use crate::error::ExportError;
use crate::options::{ExportOptions, OutputFormat};

/// Summary of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Filename the download was saved under.
    pub filename: &'static str,
    /// Size of the downloaded file in bytes.
    pub size: usize,
}

/// Apply the export rewrites to a copy of `result`.
///
/// Dimensions are scaled, painted groups recolored and, unless transparent,
/// a background rule is injected. `result` itself is never modified.
///
/// # Errors
///
/// Returns an error if the document's dimensions cannot be parsed.
pub fn prepare_document(
    result: &VectorResult,
    options: &ExportOptions,
) -> Result<SvgNode, ExportError> {
    let doc = rewrite(result.document(), options.scale.factor(), options.text_color)?;
    Ok(inject_background(doc, options.background()))
}

/// Export the displayed result.
///
/// With no result this is a silent no-op returning `Ok(None)`. Every object
/// URL created here is revoked before returning, on success and on failure.
///
/// # Errors
///
/// Returns an error if rewriting, rasterization or the download fails.
pub async fn export<D: DownloadTarget + ?Sized>(
    result: Option<&VectorResult>,
    options: &ExportOptions,
    format: OutputFormat,
    registry: &mut BlobRegistry,
    target: &D,
) -> Result<Option<ExportReport>, ExportError> {
    let Some(result) = result else {
        tracing::debug!("Nothing to export");
        return Ok(None);
    };

    let doc = prepare_document(result, options)?;
    let svg = serialize(&doc);
    let svg_url = registry.create_object_url(Blob::new(format.svg_media_type(), svg));

    let outcome = match format {
        OutputFormat::Svg => {
            trigger_download(registry, &svg_url, format.filename(), target).map(|()| {
                registry.get(&svg_url).map_or(0, |blob| blob.bytes.len())
            })
        }
        OutputFormat::Png => export_png(registry, &svg_url, options, format, target).await,
    };
    registry.revoke_object_url(&svg_url);

    let size = outcome?;
    Ok(Some(ExportReport {
        filename: format.filename(),
        size,
    }))
}

/// Decode the SVG behind `svg_url`, encode it as PNG and download it.
async fn export_png<D: DownloadTarget + ?Sized>(
    registry: &mut BlobRegistry,
    svg_url: &crate::blob::ObjectUrl,
    options: &ExportOptions,
    format: OutputFormat,
    target: &D,
) -> Result<usize, ExportError> {
    let svg = registry
        .get(svg_url)
        .ok_or_else(|| ExportError::MissingBlob(svg_url.to_string()))?
        .bytes
        .clone();

    let png = match rasterize_async(svg, options.background()).await {
        Ok(png) => png,
        Err(e) => {
            tracing::warn!(error = %e, "Raster conversion failed");
            return Err(e);
        }
    };

    let size = png.len();
    let png_url = registry.create_object_url(Blob::new("image/png", png));
    let saved = trigger_download(registry, &png_url, format.filename(), target);
    registry.revoke_object_url(&png_url);
    saved.map(|()| size)
}

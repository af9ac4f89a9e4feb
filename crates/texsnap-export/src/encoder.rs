//! Raster encoding via `resvg`.

use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use texsnap_svg::Background;

use crate::error::ExportError;

/// Decode serialized SVG and encode it as PNG at its natural size.
///
/// The pixmap is sized to the SVG's own (already scaled) width and height. A
/// solid background is painted onto the pixmap before drawing, since the
/// injected CSS canvas background is not applied by the rasterizer.
///
/// # Errors
///
/// Returns an error if the SVG cannot be decoded, has no area, or PNG
/// encoding fails.
pub fn rasterize(svg: &[u8], background: Background) -> Result<Vec<u8>, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_data(svg, &options)?;
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::EmptyCanvas { width, height })?;

    if let Some(color) = background.color() {
        pixmap.fill(Color::from_rgba8(color.r, color.g, color.b, u8::MAX));
    }
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    tracing::debug!(width, height, "Rasterized image");

    pixmap
        .encode_png()
        .map_err(|e| ExportError::PngEncode(e.to_string()))
}

/// Run [`rasterize`] off the control flow and await its completion.
pub(crate) async fn rasterize_async(
    svg: Vec<u8>,
    background: Background,
) -> Result<Vec<u8>, ExportError> {
    tokio::task::spawn_blocking(move || rasterize(&svg, background)).await?
}

#[cfg(test)]
mod tests {
    use texsnap_svg::Rgb;

    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20px" height="10px" viewBox="0 0 20 10"><g fill="#ff0000"><rect x="10" y="0" width="10" height="10"/></g></svg>"##;

    #[test]
    fn test_transparent_background_keeps_alpha() {
        let png = rasterize(SQUARE.as_bytes(), Background::Transparent).unwrap();
        let pixmap = Pixmap::decode_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (20, 10));
        assert_eq!(pixmap.pixel(2, 5).unwrap().alpha(), 0);
        let glyph = pixmap.pixel(15, 5).unwrap();
        assert_eq!((glyph.red(), glyph.alpha()), (255, 255));
    }

    #[test]
    fn test_solid_background_is_opaque() {
        let png = rasterize(SQUARE.as_bytes(), Background::Solid(Rgb::new(0, 0xff, 0))).unwrap();
        let pixmap = Pixmap::decode_png(&png).unwrap();
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
        let bg = pixmap.pixel(2, 5).unwrap();
        assert_eq!((bg.red(), bg.green(), bg.blue()), (0, 255, 0));
    }

    #[test]
    fn test_invalid_svg_is_decode_error() {
        let err = rasterize(b"not svg", Background::Transparent).unwrap_err();
        assert!(matches!(err, ExportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_rasterize_async_completes() {
        let png = rasterize_async(SQUARE.as_bytes().to_vec(), Background::Transparent)
            .await
            .unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }
}

//! External vector assets as icon renderers.
//!
//! Content-defined icons ship as SVG files resolved by the asset source.
//! [`VectorAsset`] parses one and draws it into a [`Canvas`] through the
//! same scale-fit transform the built-in bodies use, so external icons
//! center and scale identically. [`VectorAsset::into_renderer`] wraps the
//! asset for [`IconRegistry::register`](crate::IconRegistry::register),
//! letting loaders add icons without touching this crate.

use std::path::Path;
use std::sync::Arc;

use resvg::tiny_skia;
use resvg::usvg;

use crate::canvas::Canvas;
use crate::error::{IconError, IconResult};
use crate::registry::IconRenderer;
use crate::transform::Transform2D;
use crate::types::{Rect, Size};

/// A parsed SVG document that renders at any size.
///
/// The parsed tree is reference-counted and safe to share across threads.
#[derive(Clone)]
pub struct VectorAsset {
    tree: Arc<usvg::Tree>,
    natural_size: Size,
}

impl VectorAsset {
    /// Parse an SVG from bytes in memory.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::AssetLoad`] if the SVG is invalid or malformed.
    pub fn from_bytes(data: &[u8]) -> IconResult<Self> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(data, &options)
            .map_err(|e| IconError::AssetLoad(format!("failed to parse SVG: {e}")))?;

        let size = tree.size();
        let natural_size = Size::new(size.width(), size.height());

        Ok(Self {
            tree: Arc::new(tree),
            natural_size,
        })
    }

    /// Load and parse an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::AssetLoad`] if the file cannot be read or the
    /// SVG is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> IconResult<Self> {
        let data = std::fs::read(path.as_ref())
            .map_err(|e| IconError::AssetLoad(format!("failed to read SVG file: {e}")))?;
        Self::from_bytes(&data)
    }

    /// The natural size from the SVG's dimensions or viewBox.
    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    /// Rasterize the asset into the canvas, scale-fit into `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::InvalidDimensions`] if `rect` is degenerate.
    pub fn draw(&self, canvas: &mut Canvas, rect: Rect) -> IconResult<()> {
        let fit = Transform2D::fit(self.natural_size, rect)?;
        let m = fit.to_array();
        let transform = tiny_skia::Transform::from_row(m[0], m[1], m[2], m[3], m[4], m[5]);

        resvg::render(&self.tree, transform, &mut canvas.pixmap_mut().as_mut());
        Ok(())
    }

    /// Wrap this asset as a registry renderer.
    ///
    /// The SVG carries its own colors, so the registry's tint color is not
    /// applied.
    pub fn into_renderer(self) -> IconRenderer {
        Box::new(move |canvas, rect, _color| self.draw(canvas, rect))
    }
}

impl std::fmt::Debug for VectorAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorAsset")
            .field("natural_size", &self.natural_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::IconRegistry;
    use crate::types::Color;

    const SIMPLE_SVG: &[u8] = br#"
        <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
            <circle cx="12" cy="12" r="10" fill="red"/>
        </svg>
    "#;

    #[test]
    fn test_from_bytes() {
        let asset = VectorAsset::from_bytes(SIMPLE_SVG).expect("should parse valid SVG");
        assert_eq!(asset.natural_size(), Size::new(24.0, 24.0));
    }

    #[test]
    fn test_invalid_data_fails() {
        let result = VectorAsset::from_bytes(b"not valid svg");
        assert!(matches!(result, Err(IconError::AssetLoad(_))));
    }

    #[test]
    fn test_draw_scales_into_rect() {
        let asset = VectorAsset::from_bytes(SIMPLE_SVG).unwrap();
        let mut canvas = Canvas::new(48, 48).unwrap();
        asset.draw(&mut canvas, Rect::new(0.0, 0.0, 48.0, 48.0)).unwrap();

        // Circle center lands at the canvas center
        let idx = ((24 * 48 + 24) * 4) as usize;
        let d = canvas.data();
        assert!(d[idx] > 200, "red channel should be high");
        assert!(d[idx + 1] < 50, "green channel should be low");
        assert!(d[idx + 3] > 200, "alpha should be opaque");
    }

    #[test]
    fn test_draw_rejects_degenerate_rect() {
        let asset = VectorAsset::from_bytes(SIMPLE_SVG).unwrap();
        let mut canvas = Canvas::new(48, 48).unwrap();
        let err = asset.draw(&mut canvas, Rect::new(0.0, 0.0, 0.0, 48.0));
        assert!(matches!(err, Err(IconError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_registered_asset_renders_through_registry() {
        let asset = VectorAsset::from_bytes(SIMPLE_SVG).unwrap();
        let mut registry = IconRegistry::new();
        registry.register("crest", asset.into_renderer());

        let mut canvas = Canvas::new(48, 48).unwrap();
        registry
            .draw(&mut canvas, "crest", Rect::new(0.0, 0.0, 48.0, 48.0), Color::WHITE)
            .unwrap();
        assert!(!canvas.is_blank());
    }
}

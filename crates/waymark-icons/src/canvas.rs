//! The drawing context and its owned pixel surface.
//!
//! A [`Canvas`] pairs a premultiplied-RGBA8 pixel surface with the drawing
//! state icon bodies depend on: a transform stack with save/restore
//! brackets, the current color and line width, and a path under
//! construction. Surfaces are plain owned values: dropping a `Canvas`
//! releases its pixels, so a renderer that returns early or panics cannot
//! leak a surface.
//!
//! # Example
//!
//! ```
//! use waymark_icons::{Canvas, Color};
//!
//! let mut canvas = Canvas::new(64, 64)?;
//! canvas.set_color(Color::WHITE);
//! canvas.set_line_width(2.0);
//! canvas.move_to(8.0, 8.0);
//! canvas.line_to(56.0, 56.0);
//! canvas.stroke();
//! # Ok::<(), waymark_icons::IconError>(())
//! ```

use resvg::tiny_skia::{self, Pixmap, PixmapPaint};
use tracing::debug;

use crate::blur;
use crate::error::{IconError, IconResult};
use crate::paint::{BlendMode, FillRule, LineCap, LineJoin, Stroke};
use crate::transform::Transform2D;
use crate::types::{Color, Path, PathCommand, Point, Rect, Size};

/// Drawing state captured by save/restore.
#[derive(Debug, Clone)]
struct DrawState {
    transform: Transform2D,
    color: Color,
    stroke: Stroke,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            color: Color::BLACK,
            stroke: Stroke::default(),
        }
    }
}

/// A pixel surface plus the drawing state that paints into it.
///
/// New canvases start fully transparent. All paint operations go through
/// the current transform; stroke widths are in user space and scale with
/// it.
pub struct Canvas {
    pixmap: Pixmap,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Path,
}

impl Canvas {
    /// Allocate a new transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::SurfaceAllocation`] if either dimension is zero
    /// or the pixel buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> IconResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(IconError::SurfaceAllocation { width, height })?;

        debug!(
            target: "waymark_icons::canvas",
            width,
            height,
            "allocated canvas"
        );

        Ok(Self {
            pixmap,
            state: DrawState::default(),
            saved: Vec::new(),
            path: Path::new(),
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Canvas dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    // ========================================================================
    // Drawing state
    // ========================================================================

    /// Push the current drawing state onto the stack.
    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the most recently saved drawing state.
    ///
    /// Restoring with an empty stack leaves the state unchanged.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Set the current paint color for path fills and strokes.
    pub fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    /// Set the current stroke width (user-space units).
    pub fn set_line_width(&mut self, width: f32) {
        self.state.stroke.width = width;
    }

    /// Set the current line cap style.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.stroke.cap = cap;
    }

    /// Set the current line join style.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.stroke.join = join;
    }

    /// Replace the full stroke options.
    pub fn set_stroke(&mut self, stroke: Stroke) {
        self.state.stroke = stroke;
    }

    /// Get the current transform.
    pub fn current_transform(&self) -> Transform2D {
        self.state.transform
    }

    /// Concatenate a transform onto the current one.
    pub fn transform(&mut self, t: &Transform2D) {
        self.state.transform = self.state.transform.then(t);
    }

    /// Translate the current transform.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.state.transform = self.state.transform.translated(dx, dy);
    }

    /// Uniformly scale the current transform.
    pub fn scale(&mut self, s: f32) {
        self.state.transform = self.state.transform.scaled(s);
    }

    // ========================================================================
    // Path construction
    // ========================================================================

    /// Discard the path under construction.
    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(Point::new(x, y));
    }

    /// Add a line segment to the current path.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(Point::new(x, y));
    }

    /// Add a quadratic bezier to the current path.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.path.quad_to(Point::new(cx, cy), Point::new(x, y));
    }

    /// Add a cubic bezier to the current path.
    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.path
            .cubic_to(Point::new(c1x, c1y), Point::new(c2x, c2y), Point::new(x, y));
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        self.path.close();
    }

    /// Append a pre-built path to the path under construction.
    pub fn add_path(&mut self, path: &Path) {
        for cmd in path.commands() {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    self.path.move_to(p);
                }
                PathCommand::LineTo(p) => {
                    self.path.line_to(p);
                }
                PathCommand::QuadTo { control, end } => {
                    self.path.quad_to(control, end);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    self.path.cubic_to(control1, control2, end);
                }
                PathCommand::Close => {
                    self.path.close();
                }
            }
        }
    }

    // ========================================================================
    // Painting
    // ========================================================================

    /// Fill the current path with the current color, then clear the path.
    pub fn fill(&mut self) {
        self.fill_with_rule(FillRule::NonZero);
    }

    /// Fill the current path with an explicit fill rule, then clear the path.
    pub fn fill_with_rule(&mut self, rule: FillRule) {
        if let Some(skia_path) = to_skia_path(&self.path) {
            let paint = to_skia_paint(self.state.color);
            self.pixmap.fill_path(
                &skia_path,
                &paint,
                to_skia_fill_rule(rule),
                to_skia_transform(self.state.transform),
                None,
            );
        }
        self.path.clear();
    }

    /// Stroke the current path with the current color and stroke options,
    /// then clear the path.
    pub fn stroke(&mut self) {
        if let Some(skia_path) = to_skia_path(&self.path) {
            let paint = to_skia_paint(self.state.color);
            let stroke = to_skia_stroke(&self.state.stroke);
            self.pixmap.stroke_path(
                &skia_path,
                &paint,
                &stroke,
                to_skia_transform(self.state.transform),
                None,
            );
        }
        self.path.clear();
    }

    /// Fill a rectangle with an explicit color.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(skia_rect) =
            tiny_skia::Rect::from_xywh(rect.left(), rect.top(), rect.width(), rect.height())
        {
            let paint = to_skia_paint(color);
            self.pixmap.fill_rect(
                skia_rect,
                &paint,
                to_skia_transform(self.state.transform),
                None,
            );
        }
    }

    /// Stroke a rectangle outline with an explicit color and width.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        if let Some(skia_path) = to_skia_path(&Path::rect(rect)) {
            let paint = to_skia_paint(color);
            let stroke = to_skia_stroke(&Stroke::new(width));
            self.pixmap.stroke_path(
                &skia_path,
                &paint,
                &stroke,
                to_skia_transform(self.state.transform),
                None,
            );
        }
    }

    /// Stroke a single line segment with the current color and stroke
    /// options.
    pub fn stroke_line(&mut self, from: Point, to: Point) {
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
    }

    // ========================================================================
    // Surface operations
    // ========================================================================

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Composite another canvas onto this one at an integer offset.
    pub fn composite(&mut self, src: &Canvas, x: i32, y: i32, mode: BlendMode) {
        let paint = PixmapPaint {
            blend_mode: to_skia_blend_mode(mode),
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            x,
            y,
            src.pixmap.as_ref(),
            &paint,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    /// Gaussian-blur the whole surface in place.
    ///
    /// A radius of zero (or less) is a no-op.
    pub fn blur(&mut self, radius: f32) {
        let (width, height) = (self.width(), self.height());
        blur::gaussian_blur(self.pixmap.data_mut(), width, height, radius);
    }

    /// Raw premultiplied RGBA8 pixel data in row-major order.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Check if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&b| b == 0)
    }

    /// Copy out the pixels as straight (non-premultiplied) RGBA8.
    pub fn to_rgba(&self) -> Vec<u8> {
        let data = self.pixmap.data();
        let mut result = Vec::with_capacity(data.len());

        for chunk in data.chunks(4) {
            let a = chunk[3] as f32 / 255.0;
            if a > 0.0 {
                result.push((chunk[0] as f32 / a).min(255.0) as u8);
                result.push((chunk[1] as f32 / a).min(255.0) as u8);
                result.push((chunk[2] as f32 / a).min(255.0) as u8);
                result.push(chunk[3]);
            } else {
                result.extend_from_slice(&[0, 0, 0, 0]);
            }
        }

        result
    }

    /// Save the canvas content to an image file.
    ///
    /// The format is determined by the file extension (PNG recommended).
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> IconResult<()> {
        let path = path.as_ref();
        let rgba = self.to_rgba();

        let image_buffer: image::ImageBuffer<image::Rgba<u8>, _> =
            image::ImageBuffer::from_raw(self.width(), self.height(), rgba).ok_or(
                IconError::SurfaceAllocation {
                    width: self.width(),
                    height: self.height(),
                },
            )?;

        image_buffer
            .save(path)
            .map_err(|e| IconError::ImageSave(e.to_string()))?;

        debug!(
            target: "waymark_icons::canvas",
            path = %path.display(),
            "saved canvas to file"
        );

        Ok(())
    }

    /// Mutable access to the underlying pixmap for in-crate rasterizers.
    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &(self.width(), self.height()))
            .field("saved_states", &self.saved.len())
            .finish()
    }
}

// ============================================================================
// tiny-skia conversions
// ============================================================================

fn to_skia_transform(t: Transform2D) -> tiny_skia::Transform {
    let m = t.to_array();
    tiny_skia::Transform::from_row(m[0], m[1], m[2], m[3], m[4], m[5])
}

fn to_skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        c.r.clamp(0.0, 1.0),
        c.g.clamp(0.0, 1.0),
        c.b.clamp(0.0, 1.0),
        c.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::BLACK)
}

fn to_skia_paint(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    if path.is_empty() {
        return None;
    }

    let mut builder = tiny_skia::PathBuilder::new();
    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
            PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
            PathCommand::QuadTo { control, end } => {
                builder.quad_to(control.x, control.y, end.x, end.y)
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => builder.cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}

fn to_skia_fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::NonZero => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
}

fn to_skia_stroke(stroke: &Stroke) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: stroke.width,
        miter_limit: stroke.miter_limit,
        line_cap: to_skia_line_cap(stroke.cap),
        line_join: to_skia_line_join(stroke.join),
        dash: None,
    }
}

fn to_skia_line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn to_skia_line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

fn to_skia_blend_mode(mode: BlendMode) -> tiny_skia::BlendMode {
    match mode {
        BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
        BlendMode::DestOver => tiny_skia::BlendMode::DestinationOver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * canvas.width() + x) * 4) as usize;
        let d = canvas.data();
        [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
    }

    #[test]
    fn test_new_starts_transparent() {
        let canvas = Canvas::new(16, 16).unwrap();
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_zero_dimensions_fail() {
        assert!(matches!(
            Canvas::new(0, 16),
            Err(IconError::SurfaceAllocation { .. })
        ));
        assert!(matches!(
            Canvas::new(16, 0),
            Err(IconError::SurfaceAllocation { .. })
        ));
    }

    #[test]
    fn test_fill_rect_paints_pixels() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.fill_rect(Rect::new(4.0, 4.0, 8.0, 8.0), Color::RED);

        let inside = pixel(&canvas, 8, 8);
        assert!(inside[3] > 200);
        assert!(inside[0] > 200);

        let outside = pixel(&canvas, 1, 1);
        assert_eq!(outside, [0, 0, 0, 0]);
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), Color::WHITE);
        assert!(!canvas.is_blank());
        canvas.clear();
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_save_restore_transform() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.save();
        canvas.translate(8.0, 8.0);
        canvas.scale(2.0);
        assert_ne!(canvas.current_transform(), Transform2D::IDENTITY);
        canvas.restore();
        assert_eq!(canvas.current_transform(), Transform2D::IDENTITY);
    }

    #[test]
    fn test_restore_on_empty_stack_is_noop() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.translate(2.0, 0.0);
        let before = canvas.current_transform();
        canvas.restore();
        assert_eq!(canvas.current_transform(), before);
    }

    #[test]
    fn test_fill_respects_transform() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.translate(8.0, 8.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);

        assert!(pixel(&canvas, 9, 9)[3] > 0);
        assert_eq!(pixel(&canvas, 2, 2)[3], 0);
    }

    #[test]
    fn test_stroke_line_paints() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.set_color(Color::WHITE);
        canvas.set_line_width(2.0);
        canvas.stroke_line(Point::new(0.0, 8.0), Point::new(16.0, 8.0));

        assert!(pixel(&canvas, 8, 8)[3] > 0);
        assert_eq!(pixel(&canvas, 8, 2)[3], 0);
    }

    #[test]
    fn test_fill_clears_current_path() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(16.0, 0.0);
        canvas.line_to(16.0, 16.0);
        canvas.close_path();
        canvas.set_color(Color::WHITE);
        canvas.fill();

        // A second fill without new path commands paints nothing
        let snapshot = canvas.data().to_vec();
        canvas.set_color(Color::RED);
        canvas.fill();
        assert_eq!(canvas.data(), snapshot.as_slice());
    }

    #[test]
    fn test_composite_source_over() {
        let mut dst = Canvas::new(8, 8).unwrap();
        dst.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::RED);

        let mut src = Canvas::new(8, 8).unwrap();
        src.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::BLUE);

        dst.composite(&src, 0, 0, BlendMode::SourceOver);
        let p = pixel(&dst, 4, 4);
        assert!(p[2] > 200, "source-over should paint on top: {p:?}");
    }

    #[test]
    fn test_composite_dest_over_keeps_existing() {
        let mut dst = Canvas::new(8, 8).unwrap();
        dst.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0), Color::RED);

        let mut src = Canvas::new(8, 8).unwrap();
        src.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::BLUE);

        dst.composite(&src, 0, 0, BlendMode::DestOver);

        // Opaque red region untouched, transparent region now blue
        let kept = pixel(&dst, 2, 4);
        assert!(kept[0] > 200 && kept[2] < 50, "dest-over overwrote opaque pixels: {kept:?}");
        let filled = pixel(&dst, 6, 4);
        assert!(filled[2] > 200, "dest-over missed transparent pixels: {filled:?}");
    }

    #[test]
    fn test_to_rgba_unpremultiplies() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::new(1.0, 0.0, 0.0, 0.5));

        let rgba = canvas.to_rgba();
        // Straight alpha keeps the full color value
        assert!(rgba[0] > 250, "expected unpremultiplied red, got {}", rgba[0]);
        assert!((rgba[3] as i32 - 128).abs() <= 2);
    }

    #[test]
    fn test_blur_zero_radius_is_noop() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.fill_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Color::WHITE);
        let before = canvas.data().to_vec();
        canvas.blur(0.0);
        assert_eq!(canvas.data(), before.as_slice());
    }
}

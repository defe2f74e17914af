//! Seeded scribble glyph generation.
//!
//! Unlike the static icon bodies, the scribble synthesizes its appearance
//! from an integer seed: a left-right symmetric tangle of random line
//! segments with a soft blurred halo behind it. The seed is typically
//! derived from a stable game-object identifier, so the same seed must
//! always produce the same pixels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::{IconError, IconResult};
use crate::paint::{BlendMode, LineCap};
use crate::types::{Color, Point};

/// Blur radius for the halo layer, also the margin kept free of line
/// endpoints so the blur has headroom to spread.
const BLUR_RADIUS: f32 = 4.0;

/// Base range for the number of mirrored line pairs.
const MIN_LINES: u32 = 5;
const MAX_LINES: u32 = 9;

/// Draw a seeded scribble glyph into a square region of the canvas.
///
/// The glyph is deterministic: identical `(size, color, line_width, seed,
/// extra_lines)` always yields byte-identical pixels. A fresh PRNG is
/// seeded per call, so concurrent callers with their own canvases cannot
/// perturb each other.
///
/// The sharp line layer is composited first with source-over blending;
/// the same layer is then blurred in place and composited dest-over, so
/// the halo only fills pixels the sharp layer left transparent.
///
/// # Errors
///
/// Returns [`IconError::InvalidDimensions`] if `size` leaves no drawable
/// area inside the blur margin, and [`IconError::SurfaceAllocation`] if
/// the temporary layer cannot be allocated.
pub fn draw_scribble(
    canvas: &mut Canvas,
    x: f32,
    y: f32,
    size: f32,
    color: Color,
    line_width: f32,
    seed: u64,
    extra_lines: u32,
) -> IconResult<()> {
    if size <= BLUR_RADIUS * 2.0 {
        return Err(IconError::InvalidDimensions {
            width: size,
            height: size,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let lines = rng.gen_range(MIN_LINES..=MAX_LINES) + extra_lines;

    let side = size as u32 + 1;
    let mut layer = Canvas::new(side, side)?;
    layer.set_color(color);
    layer.set_line_width(line_width);
    layer.set_line_cap(LineCap::Round);

    // Endpoints confined to the left half of the inner drawable region;
    // each segment gets a mirror at x' = size - x.
    let y_min = BLUR_RADIUS;
    let y_max = size - BLUR_RADIUS;
    let x_min = BLUR_RADIUS;
    let x_max = size / 2.0;

    for _ in 0..lines {
        let x1 = rng.gen_range(x_min..=x_max);
        let y1 = rng.gen_range(y_min..=y_max);
        let x2 = rng.gen_range(x_min..=x_max);
        let y2 = rng.gen_range(y_min..=y_max);

        layer.stroke_line(Point::new(x1, y1), Point::new(x2, y2));
        layer.stroke_line(Point::new(size - x1, y1), Point::new(size - x2, y2));
    }

    canvas.composite(&layer, x as i32, y as i32, BlendMode::SourceOver);

    layer.blur(BLUR_RADIUS);
    canvas.composite(&layer, x as i32, y as i32, BlendMode::DestOver);

    debug!(
        target: "waymark_icons::scribble",
        seed,
        lines,
        size,
        "generated scribble glyph"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scribble_paints_something() {
        let mut canvas = Canvas::new(65, 65).unwrap();
        draw_scribble(&mut canvas, 0.0, 0.0, 64.0, Color::WHITE, 2.0, 7, 0).unwrap();
        assert!(!canvas.is_blank());
    }

    #[test]
    fn test_same_seed_is_byte_identical() {
        let mut a = Canvas::new(65, 65).unwrap();
        let mut b = Canvas::new(65, 65).unwrap();
        draw_scribble(&mut a, 0.0, 0.0, 64.0, Color::WHITE, 2.0, 1234, 1).unwrap();
        draw_scribble(&mut b, 0.0, 0.0, 64.0, Color::WHITE, 2.0, 1234, 1).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = Canvas::new(65, 65).unwrap();
        let mut b = Canvas::new(65, 65).unwrap();
        draw_scribble(&mut a, 0.0, 0.0, 64.0, Color::WHITE, 2.0, 1, 0).unwrap();
        draw_scribble(&mut b, 0.0, 0.0, 64.0, Color::WHITE, 2.0, 2, 0).unwrap();
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn test_output_is_left_right_symmetric() {
        let size = 64u32;
        let mut canvas = Canvas::new(size + 1, size + 1).unwrap();
        draw_scribble(&mut canvas, 0.0, 0.0, size as f32, Color::WHITE, 2.0, 99, 0).unwrap();

        let data = canvas.data();
        let w = size + 1;
        for y in 0..w {
            for x in 0..w {
                let a = data[((y * w + x) * 4 + 3) as usize] as i32;
                let b = data[((y * w + (size - x)) * 4 + 3) as usize] as i32;
                assert!(
                    (a - b).abs() <= 24,
                    "asymmetry at ({x}, {y}): {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_too_small_size_is_rejected() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        let err = draw_scribble(&mut canvas, 0.0, 0.0, 8.0, Color::WHITE, 2.0, 1, 0);
        assert!(matches!(err, Err(IconError::InvalidDimensions { .. })));
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_sharp_center_survives_halo() {
        // Dest-over must not overwrite pixels the sharp pass made opaque
        let size = 64u32;
        let mut sharp_only = Canvas::new(size + 1, size + 1).unwrap();
        draw_scribble(&mut sharp_only, 0.0, 0.0, size as f32, Color::WHITE, 3.0, 42, 2).unwrap();

        let data = sharp_only.data();
        let opaque = data.chunks(4).filter(|p| p[3] == 255).count();
        assert!(opaque > 0, "expected fully opaque line pixels to survive");
    }
}

//! Quality bar indicator generation.
//!
//! A five-segment bar gauge whose filled segment count encodes an item's
//! quality level 0-5. Bars grow monotonically taller left to right;
//! quality 0 overlays a no-signal cross over the whole indicator.

use crate::canvas::Canvas;
use crate::paint::LineCap;
use crate::types::{Color, Point, Rect};

/// Number of bar segments in the indicator.
pub const BAR_COUNT: usize = 5;

/// Gap between adjacent bars, in output units.
const BAR_PADDING: f32 = 2.0;

const FILLED: Color = Color::new(0.20, 0.75, 0.30, 0.80);
const EMPTY: Color = Color::new(0.50, 0.50, 0.50, 0.50);
const OUTLINE: Color = Color::new(0.0, 0.0, 0.0, 0.50);
const NO_SIGNAL: Color = Color::new(0.90, 0.10, 0.10, 0.60);

/// Compute the five bar rectangles for an indicator at `(x, y)` spanning
/// `size` in both axes. Bar `i + 1` is strictly taller than bar `i`; all
/// bars share a baseline at the bottom edge.
pub fn bar_rects(x: f32, y: f32, size: f32) -> [Rect; BAR_COUNT] {
    let bar_width = (size - (BAR_COUNT as f32 - 1.0) * BAR_PADDING) / BAR_COUNT as f32;
    core::array::from_fn(|i| {
        let bar_height = (i as f32 + 1.0) / BAR_COUNT as f32 * size;
        Rect::new(
            x + i as f32 * (bar_width + BAR_PADDING),
            y + size - bar_height,
            bar_width,
            bar_height,
        )
    })
}

/// Draw the quality bar indicator.
///
/// Bars below `quality` are tinted translucent green, the rest translucent
/// gray, each with a translucent black outline. `quality` is expected in
/// `[0, 5]`; larger values saturate at 5. Quality 0 additionally draws a
/// translucent red cross over the whole indicator.
pub fn draw_quality_bars(canvas: &mut Canvas, x: f32, y: f32, quality: u8, size: f32) {
    let quality = quality.min(BAR_COUNT as u8);

    for (i, rect) in bar_rects(x, y, size).iter().enumerate() {
        let fill = if (i as u8) < quality { FILLED } else { EMPTY };
        canvas.fill_rect(*rect, fill);
        canvas.stroke_rect(*rect, OUTLINE, 1.0);
    }

    if quality == 0 {
        canvas.save();
        canvas.set_color(NO_SIGNAL);
        canvas.set_line_width(size / 10.0);
        canvas.set_line_cap(LineCap::Round);
        canvas.stroke_line(Point::new(x, y), Point::new(x + size, y + size));
        canvas.stroke_line(Point::new(x + size, y), Point::new(x, y + size));
        canvas.restore();
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

    fn sample_bar(canvas: &Canvas, rect: &Rect) -> [u8; 4] {
        // Sample near the bottom of the bar, clear of the outline stroke
        pixel(
            canvas,
            rect.center().x as u32,
            (rect.bottom() - 3.0) as u32,
        )
    }

    #[test]
    fn test_bar_heights_are_strictly_monotonic() {
        let rects = bar_rects(0.0, 0.0, 40.0);
        for i in 0..BAR_COUNT - 1 {
            assert!(
                rects[i + 1].height() > rects[i].height(),
                "bar {} is not taller than bar {}",
                i + 1,
                i
            );
        }
    }

    #[test]
    fn test_bars_share_a_baseline() {
        let rects = bar_rects(3.0, 5.0, 40.0);
        for rect in &rects {
            assert!((rect.bottom() - 45.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bars_are_padded_and_inside_the_indicator() {
        let rects = bar_rects(0.0, 0.0, 40.0);
        for i in 0..BAR_COUNT - 1 {
            let gap = rects[i + 1].left() - rects[i].right();
            assert!((gap - 2.0).abs() < 1e-4, "gap {gap} between bars {i} and {}", i + 1);
        }
        assert!((rects[BAR_COUNT - 1].right() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_filled_count_matches_quality() {
        for quality in 1..=5u8 {
            let mut canvas = Canvas::new(48, 48).unwrap();
            draw_quality_bars(&mut canvas, 0.0, 0.0, quality, 40.0);

            for (i, rect) in bar_rects(0.0, 0.0, 40.0).iter().enumerate() {
                let p = sample_bar(&canvas, rect);
                if (i as u8) < quality {
                    assert!(p[1] > p[0], "bar {i} should be green at quality {quality}: {p:?}");
                } else {
                    assert!(
                        (p[0] as i32 - p[1] as i32).abs() <= 8,
                        "bar {i} should be gray at quality {quality}: {p:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_quality_zero_draws_cross() {
        let mut canvas = Canvas::new(48, 48).unwrap();
        draw_quality_bars(&mut canvas, 0.0, 0.0, 0, 40.0);

        // The diagonals meet at the indicator center
        let p = pixel(&canvas, 20, 20);
        assert!(p[0] > p[1], "expected red cross at center: {p:?}");
    }

    #[test]
    fn test_positive_quality_has_no_cross() {
        let mut canvas = Canvas::new(48, 48).unwrap();
        draw_quality_bars(&mut canvas, 0.0, 0.0, 3, 40.0);

        // Top-left corner is outside every bar; only the cross would reach it
        let p = pixel(&canvas, 1, 1);
        assert_eq!(p[3], 0, "unexpected paint in empty corner: {p:?}");
    }

    #[test]
    fn test_quality_saturates_above_five() {
        let mut a = Canvas::new(48, 48).unwrap();
        let mut b = Canvas::new(48, 48).unwrap();
        draw_quality_bars(&mut a, 0.0, 0.0, 5, 40.0);
        draw_quality_bars(&mut b, 0.0, 0.0, 9, 40.0);
        assert_eq!(a.data(), b.data());
    }
}

//! Built-in vector icon bodies.
//!
//! Each body paints in a fixed 24x24 design space and is mapped onto its
//! target rectangle by the scale-fit transform, bracketed by save/restore
//! so the caller's drawing state is untouched. Path data here is baked
//! resource geometry, ported from the client's icon sources.

use std::f32::consts::PI;

use crate::canvas::Canvas;
use crate::error::IconResult;
use crate::paint::LineCap;
use crate::transform::Transform2D;
use crate::types::{Color, Path, Point, Rect, Size};

/// Native design size shared by every built-in icon body.
pub(crate) const DESIGN_SIZE: Size = Size::new(24.0, 24.0);

/// Run an icon body inside the save / fit / restore bracket.
fn in_design_space(
    canvas: &mut Canvas,
    rect: Rect,
    body: impl FnOnce(&mut Canvas),
) -> IconResult<()> {
    let fit = Transform2D::fit(DESIGN_SIZE, rect)?;
    canvas.save();
    canvas.transform(&fit);
    body(canvas);
    canvas.restore();
    Ok(())
}

pub(crate) fn draw_undo(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.0);
        c.set_line_cap(LineCap::Round);
        c.begin_path();
        c.move_to(19.0, 17.0);
        c.cubic_to(19.0, 11.0, 14.5, 7.0, 9.0, 7.0);
        c.line_to(7.5, 7.0);
        c.stroke();
        c.begin_path();
        c.move_to(9.5, 2.5);
        c.line_to(4.0, 7.0);
        c.line_to(9.5, 11.5);
        c.close_path();
        c.fill();
    })
}

pub(crate) fn draw_redo(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.0);
        c.set_line_cap(LineCap::Round);
        c.begin_path();
        c.move_to(5.0, 17.0);
        c.cubic_to(5.0, 11.0, 9.5, 7.0, 15.0, 7.0);
        c.line_to(16.5, 7.0);
        c.stroke();
        c.begin_path();
        c.move_to(14.5, 2.5);
        c.line_to(20.0, 7.0);
        c.line_to(14.5, 11.5);
        c.close_path();
        c.fill();
    })
}

pub(crate) fn draw_close(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.5);
        c.set_line_cap(LineCap::Round);
        c.stroke_line(Point::new(5.0, 5.0), Point::new(19.0, 19.0));
        c.stroke_line(Point::new(19.0, 5.0), Point::new(5.0, 19.0));
    })
}

pub(crate) fn draw_check(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.5);
        c.set_line_cap(LineCap::Round);
        c.begin_path();
        c.move_to(4.5, 12.5);
        c.line_to(10.0, 18.0);
        c.line_to(19.5, 6.5);
        c.stroke();
    })
}

pub(crate) fn draw_plus(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.5);
        c.set_line_cap(LineCap::Round);
        c.stroke_line(Point::new(12.0, 4.0), Point::new(12.0, 20.0));
        c.stroke_line(Point::new(4.0, 12.0), Point::new(20.0, 12.0));
    })
}

pub(crate) fn draw_minus(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.5);
        c.set_line_cap(LineCap::Round);
        c.stroke_line(Point::new(4.0, 12.0), Point::new(20.0, 12.0));
    })
}

pub(crate) fn draw_arrow_up(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.5);
        c.set_line_cap(LineCap::Round);
        c.stroke_line(Point::new(12.0, 20.0), Point::new(12.0, 8.0));
        c.begin_path();
        c.move_to(12.0, 3.0);
        c.line_to(6.0, 9.5);
        c.line_to(18.0, 9.5);
        c.close_path();
        c.fill();
    })
}

pub(crate) fn draw_arrow_down(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.5);
        c.set_line_cap(LineCap::Round);
        c.stroke_line(Point::new(12.0, 4.0), Point::new(12.0, 16.0));
        c.begin_path();
        c.move_to(12.0, 21.0);
        c.line_to(6.0, 14.5);
        c.line_to(18.0, 14.5);
        c.close_path();
        c.fill();
    })
}

pub(crate) fn draw_lock(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.begin_path();
        c.move_to(5.0, 11.0);
        c.line_to(19.0, 11.0);
        c.line_to(19.0, 21.0);
        c.line_to(5.0, 21.0);
        c.close_path();
        c.fill();
        c.set_line_width(2.0);
        c.set_line_cap(LineCap::Butt);
        c.begin_path();
        c.move_to(8.0, 11.0);
        c.line_to(8.0, 8.0);
        c.cubic_to(8.0, 5.5, 9.8, 3.5, 12.0, 3.5);
        c.cubic_to(14.2, 3.5, 16.0, 5.5, 16.0, 8.0);
        c.line_to(16.0, 11.0);
        c.stroke();
    })
}

pub(crate) fn draw_search(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.set_line_width(2.0);
        c.set_line_cap(LineCap::Round);
        c.add_path(&Path::circle(Point::new(10.5, 10.5), 6.0));
        c.stroke();
        c.set_line_width(2.5);
        c.stroke_line(Point::new(15.0, 15.0), Point::new(20.5, 20.5));
    })
}

pub(crate) fn draw_star(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.begin_path();
        let center = Point::new(12.0, 12.5);
        for i in 0..10 {
            let radius = if i % 2 == 0 { 10.0 } else { 4.2 };
            let angle = -PI / 2.0 + i as f32 * PI / 5.0;
            let p = Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
            if i == 0 {
                c.move_to(p.x, p.y);
            } else {
                c.line_to(p.x, p.y);
            }
        }
        c.close_path();
        c.fill();
    })
}

pub(crate) fn draw_shield(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.begin_path();
        c.move_to(12.0, 2.5);
        c.line_to(20.0, 5.5);
        c.line_to(20.0, 11.0);
        c.cubic_to(20.0, 16.5, 16.7, 20.3, 12.0, 22.0);
        c.cubic_to(7.3, 20.3, 4.0, 16.5, 4.0, 11.0);
        c.line_to(4.0, 5.5);
        c.close_path();
        c.fill();
    })
}

pub(crate) fn draw_heart(canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
    in_design_space(canvas, rect, |c| {
        c.set_color(color);
        c.begin_path();
        c.move_to(12.0, 20.5);
        c.cubic_to(5.8, 15.6, 3.0, 12.0, 3.0, 8.5);
        c.cubic_to(3.0, 5.7, 5.2, 4.0, 7.5, 4.0);
        c.cubic_to(9.4, 4.0, 11.0, 5.0, 12.0, 7.0);
        c.cubic_to(13.0, 5.0, 14.6, 4.0, 16.5, 4.0);
        c.cubic_to(18.8, 4.0, 21.0, 5.7, 21.0, 8.5);
        c.cubic_to(21.0, 12.0, 18.2, 15.6, 12.0, 20.5);
        c.close_path();
        c.fill();
    })
}

//! Thin and wide line drawing (§4.D "Thin line", "Wide line", "Line circle").
use faint_geom::{IntPoint, Rect};
use faint_paint::{with_pixel_source, Paint, PixelSource};
use faint_pixmap::Bitmap;

use crate::plot::{fill_disc, plot};
use crate::style::{LineCap, LineStyle};

/// Stamp a filled disc of diameter `line_width` centered at `p` — the cap
/// shape used by [`LineCap::Round`] and by polygon-outline mitre hiding.
pub fn line_circle(bmp: &mut Bitmap, p: IntPoint, line_width: f64, src: &dyn PixelSource) {
    fill_disc(bmp, f64::from(p.x), f64::from(p.y), line_width, src);
}

/// Bresenham midpoint line, octant-general, with optional dash cadence of
/// `2 * line_width` steps (on for `line_width`, off for `line_width`).
fn thin_line(bmp: &mut Bitmap, p0: IntPoint, p1: IntPoint, dashed: bool, line_width: f64, src: &dyn PixelSource) {
    let (mut x0, mut y0) = (p0.x, p0.y);
    let (x1, y1) = (p1.x, p1.y);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let dash_len = (line_width.max(1.0)).round().max(1.0) as i64;
    let mut step: i64 = 0;
    loop {
        let on = !dashed || (step / dash_len) % 2 == 0;
        if on {
            plot(bmp, x0, y0, src);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
        step += 1;
    }
}

/// The source's perpendicular-offset step for a line's `n`th parallel
/// raster copy: steepness and direction are normalized away first (mirrors
/// `thin_line`'s own octant handling), then the offset accumulates in
/// Bresenham-error steps until the accumulated distance reaches `n`, at
/// which point the (possibly still-zero) running offset is returned
/// un-normalized back into the original octant. Its output is pinned
/// per-octant by `get_offset_matches_tabulated_octant_offsets` below;
/// do not change this without updating that table.
fn get_offset(x0: i32, y0: i32, x1: i32, y1: i32, line_width: i32) -> IntPoint {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }
    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut p = 2 * dy - dx.abs();
    let y_step = if y0 < y1 { -1 } else { 1 };
    let mut at_x = 0;
    let mut at_y = 0;
    let mut yp = 0;
    let mut distance = 0.0_f64;
    let diag = std::f64::consts::SQRT_2;
    for xp in 0..line_width {
        at_x = -yp;
        at_y = -xp;
        if p < 0 {
            p += 2 * dy;
            distance += 1.0;
        } else {
            yp += y_step;
            p += 2 * dy - 2 * dx;
            distance += diag;
        }
        if distance >= f64::from(line_width) {
            break;
        }
    }
    if steep {
        IntPoint::new(at_y, at_x)
    } else {
        IntPoint::new(at_x, at_y)
    }
}

/// Draw the wide raster of a line: the base Bresenham line plus parallel
/// offset copies spanning the width on either side, perpendicular to the
/// line's direction. The offsets come from [`get_offset`] rather than a
/// continuous perpendicular-normal computation, so diagonal wide lines use
/// the same per-octant integer stepping as the source instead of a rotated
/// float vector. `dx == 0 && dy == 0` (a degenerate zero-length line)
/// returns early — there is no direction to offset along.
fn wide_line(bmp: &mut Bitmap, p0: IntPoint, p1: IntPoint, style: LineStyle, src: &dyn PixelSource) {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    if dx == 0 && dy == 0 {
        return;
    }
    let steps = (style.width.ceil() as i32).max(1);
    let below = steps / 2;
    let above = steps - 1 - below;

    thin_line(bmp, p0, p1, style.dashed, style.width, src);
    for k in 1..=above {
        let off = get_offset(p0.x, p0.y, p1.x, p1.y, k + 1);
        thin_line(
            bmp,
            IntPoint::new(p0.x + off.x, p0.y + off.y),
            IntPoint::new(p1.x + off.x, p1.y + off.y),
            style.dashed,
            style.width,
            src,
        );
    }
    for k in 1..=below {
        let off = get_offset(p0.x, p0.y, p1.x, p1.y, k + 1);
        thin_line(
            bmp,
            IntPoint::new(p0.x - off.x, p0.y - off.y),
            IntPoint::new(p1.x - off.x, p1.y - off.y),
            style.dashed,
            style.width,
            src,
        );
    }
    if style.cap == LineCap::Round {
        line_circle(bmp, p0, style.width, src);
        line_circle(bmp, p1, style.width, src);
    }
}

/// Draw a line segment from `p0` to `p1` per `style`, sampling color from
/// `paint`.
pub fn draw_line(bmp: &mut Bitmap, p0: IntPoint, p1: IntPoint, paint: &Paint, style: LineStyle) {
    let bounds = Rect::new(
        faint_geom::Point::new(f64::from(p0.x.min(p1.x)), f64::from(p0.y.min(p1.y))),
        faint_geom::Size::new(
            f64::from((p1.x - p0.x).abs() + 1),
            f64::from((p1.y - p0.y).abs() + 1),
        ),
    );
    with_pixel_source(paint, bounds, |src| {
        if style.width <= 1.0 {
            thin_line(bmp, p0, p1, style.dashed, style.width, src);
            if style.cap == LineCap::Round {
                line_circle(bmp, p0, style.width.max(1.0), src);
                line_circle(bmp, p1, style.width.max(1.0), src);
            }
        } else {
            wide_line(bmp, p0, p1, style, src);
        }
    });
}

/// Draw an open polyline through `points`; only the two endpoints get a
/// round cap when `style.cap == Round`.
pub fn draw_polyline(bmp: &mut Bitmap, points: &[IntPoint], paint: &Paint, style: LineStyle) {
    if points.len() < 2 {
        if let [p] = points {
            draw_line(bmp, *p, *p, paint, style.with_cap(LineCap::Round));
        }
        return;
    }
    for w in points.windows(2) {
        draw_line(bmp, w[0], w[1], paint, style.with_cap(LineCap::Butt));
    }
    if style.cap == LineCap::Round {
        let bounds_for = |p: IntPoint| {
            Rect::new(
                faint_geom::Point::new(f64::from(p.x), f64::from(p.y)),
                faint_geom::Size::new(1.0, 1.0),
            )
        };
        with_pixel_source(paint, bounds_for(points[0]), |src| {
            line_circle(bmp, points[0], style.width, src)
        });
        let last = points[points.len() - 1];
        with_pixel_source(paint, bounds_for(last), |src| line_circle(bmp, last, style.width, src));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::{color, BLACK, WHITE};

    #[test]
    fn get_offset_matches_tabulated_octant_offsets() {
        // Hand-derived from the source's `get_offset`; covers a shallow and
        // steep slope in each of the four `(sign dx, sign dy)` quadrants,
        // plus the flat and vertical degenerate octants.
        let cases = [
            ((0, 0, 10, 0, 3), (0, -2)),
            ((0, 0, -10, 0, 3), (0, -2)),
            ((0, 0, 10, 5, 4), (2, -3)),
            ((0, 0, 10, -5, 4), (-2, -3)),
            ((0, 0, 5, 10, 4), (-3, 2)),
            ((0, 0, 5, -10, 4), (-3, -2)),
            ((0, 0, -10, 5, 4), (-2, -3)),
            ((0, 0, -10, -5, 4), (2, -3)),
            ((0, 0, 10, 10, 5), (3, -3)),
            ((0, 0, 0, 10, 3), (-2, 0)),
        ];
        for ((x0, y0, x1, y1, w), (ex, ey)) in cases {
            let got = get_offset(x0, y0, x1, y1, w);
            assert_eq!((got.x, got.y), (ex, ey), "get_offset({},{},{},{},{})", x0, y0, x1, y1, w);
        }
    }

    #[test]
    fn thin_horizontal_line_paints_all_pixels() {
        let mut bmp = Bitmap::new_with_color(10, 1, BLACK);
        draw_line(
            &mut bmp,
            IntPoint::new(0, 0),
            IntPoint::new(9, 0),
            &Paint::Color(WHITE),
            LineStyle::new(1.0),
        );
        for x in 0..10 {
            assert_eq!(bmp.get_color_raw(x, 0), WHITE, "x={}", x);
        }
    }

    #[test]
    fn wide_horizontal_line_covers_band() {
        let mut bmp = Bitmap::new_with_color(20, 20, BLACK);
        draw_line(
            &mut bmp,
            IntPoint::new(5, 5),
            IntPoint::new(15, 5),
            &Paint::Color(WHITE),
            LineStyle::new(3.0),
        );
        for x in 5..=15 {
            for y in 4..=6 {
                assert_eq!(bmp.get_color_raw(x, y), WHITE, "x={} y={}", x, y);
            }
        }
        assert_eq!(bmp.get_color_raw(5, 10), BLACK);
    }

    #[test]
    fn zero_length_wide_line_is_noop() {
        let mut bmp = Bitmap::new_with_color(5, 5, BLACK);
        wide_line(
            &mut bmp,
            IntPoint::new(2, 2),
            IntPoint::new(2, 2),
            LineStyle::new(3.0),
            &faint_paint::ColorFromColor(WHITE),
        );
        assert!(bmp.is_blank() || bmp.get_color_raw(2, 2) == color(0, 0, 0, 255));
    }

    #[test]
    fn dashed_line_has_gaps() {
        let mut bmp = Bitmap::new_with_color(20, 1, BLACK);
        thin_line(
            &mut bmp,
            IntPoint::new(0, 0),
            IntPoint::new(19, 0),
            true,
            2.0,
            &faint_paint::ColorFromColor(WHITE),
        );
        let lit: usize = (0..20).filter(|&x| bmp.get_color_raw(x, 0) == WHITE).count();
        assert!(lit < 20);
        assert!(lit > 0);
    }
}

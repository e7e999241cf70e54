//! Polygon outline and fill (§4.D "Polygon outline", "Polygon fill").
use faint_geom::{IntPoint, Point, Rect};
use faint_paint::{with_pixel_source, Paint};
use faint_pixmap::Bitmap;

use crate::line::{draw_line, line_circle};
use crate::plot::plot;
use crate::style::{LineCap, LineStyle};

fn bounding_rect(points: &[IntPoint]) -> Rect {
    let xs = points.iter().map(|p| p.x);
    let ys = points.iter().map(|p| p.y);
    let (x0, x1) = (xs.clone().min().unwrap_or(0), xs.max().unwrap_or(0));
    let (y0, y1) = (ys.clone().min().unwrap_or(0), ys.max().unwrap_or(0));
    Rect::new(
        Point::new(f64::from(x0), f64::from(y0)),
        faint_geom::Size::new(f64::from(x1 - x0 + 1), f64::from(y1 - y0 + 1)),
    )
}

/// Draw a closed polygon outline: each edge as a BUTT-capped segment, with a
/// `line_circle` mitre stamp at every vertex (including the closing one) to
/// hide gaps. Degenerate: 0 points is a no-op, 1 point draws a round dot.
pub fn draw_polygon(bmp: &mut Bitmap, points: &[IntPoint], paint: &Paint, style: LineStyle) {
    match points.len() {
        0 => return,
        1 => {
            draw_line(bmp, points[0], points[0], paint, style.with_cap(LineCap::Round));
            return;
        }
        _ => {}
    }
    for w in points.windows(2) {
        draw_line(bmp, w[0], w[1], paint, style.with_cap(LineCap::Butt));
    }
    draw_line(bmp, points[points.len() - 1], points[0], paint, style.with_cap(LineCap::Butt));

    if style.width > 1.0 {
        let bounds = bounding_rect(points);
        with_pixel_source(paint, bounds, |src| {
            for &p in points {
                line_circle(bmp, p, style.width, src);
            }
        });
    }
}

/// Fill a simple polygon using the even-odd scan-line rule, ported from the
/// source's integer scanline walk rather than a continuous re-sampling: for
/// each integer row `y` clipped to the bitmap, every edge (after swapping
/// its endpoints so the lower-`x` one comes first) whose `y`-span straddles
/// `y` as `y0 < y <= y1` contributes an `x` crossing, computed via the
/// edge's slope and truncated toward zero exactly as `static_cast<int>`
/// does. Horizontal edges contribute no intersections; a vertical edge
/// contributes its fixed `x` directly.
///
/// A one-pixel rightward bias is applied when walking from one crossing to
/// the next — this reproduces a documented quirk of the source algorithm
/// that dependent call sites rely on (see `DESIGN.md`, "Open question:
/// fill_polygon bias").
pub fn fill_polygon(bmp: &mut Bitmap, points: &[IntPoint], paint: &Paint) {
    if points.is_empty() {
        return;
    }
    let bounds = bounding_rect(points);
    let mut closed: Vec<IntPoint> = points.to_vec();
    closed.push(points[0]);

    let min_x = points.iter().map(|p| p.x).min().unwrap() - 1;
    let max_x = points.iter().map(|p| p.x).max().unwrap().min(bmp.width() as i32 - 1);
    let min_y = points.iter().map(|p| p.y).min().unwrap().max(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap().min(bmp.height() as i32 - 1);

    with_pixel_source(paint, bounds, |src| {
        for y in min_y..=max_y {
            let mut x_vals: Vec<i32> = Vec::new();
            for w in closed.windows(2) {
                let (mut x0, mut y0) = (w[0].x, w[0].y);
                let (mut x1, mut y1) = (w[1].x, w[1].y);
                if x0 > x1 {
                    std::mem::swap(&mut x0, &mut x1);
                    std::mem::swap(&mut y0, &mut y1);
                }
                if (y0 < y && y <= y1) || (y1 < y && y <= y0) {
                    if x0 == x1 {
                        x_vals.push(x0);
                        continue;
                    }
                    let k = f64::from(y1 - y0) / f64::from(x1 - x0);
                    let m = f64::from(y0) - k * f64::from(x0);
                    x_vals.push(((f64::from(y) - m) / k) as i32);
                }
            }
            if x_vals.is_empty() {
                continue;
            }
            x_vals.sort_unstable();
            for x in min_x..=max_x {
                for (j, &crossing) in x_vals.iter().enumerate() {
                    if x < crossing {
                        if (x_vals.len() - j) % 2 != 0 {
                            plot(bmp, x + 1, y, src);
                        }
                        break;
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::{BLACK, WHITE};

    #[test]
    fn fill_polygon_parity_square() {
        let mut bmp = Bitmap::new_with_color(10, 10, BLACK);
        let square = [
            IntPoint::new(2, 2),
            IntPoint::new(8, 2),
            IntPoint::new(8, 8),
            IntPoint::new(2, 8),
        ];
        fill_polygon(&mut bmp, &square, &Paint::Color(WHITE));
        assert_eq!(bmp.get_color_raw(5, 5), WHITE);
        assert_eq!(bmp.get_color_raw(0, 0), BLACK);
    }

    #[test]
    fn empty_polygon_is_noop() {
        let mut bmp = Bitmap::new_with_color(4, 4, BLACK);
        draw_polygon(&mut bmp, &[], &Paint::Color(WHITE), LineStyle::new(1.0));
        assert!(bmp.is_blank() == false);
    }

    #[test]
    fn single_point_polygon_draws_dot() {
        let mut bmp = Bitmap::new_with_color(5, 5, BLACK);
        draw_polygon(
            &mut bmp,
            &[IntPoint::new(2, 2)],
            &Paint::Color(WHITE),
            LineStyle::new(2.0),
        );
        assert_eq!(bmp.get_color_raw(2, 2), WHITE);
    }
}

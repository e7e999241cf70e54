//! Triangle fill (§4.D "Triangle fill").
use faint_geom::{Point, Rect, Size};
use faint_paint::{with_pixel_source, Paint};

use crate::plot::plot;
use faint_pixmap::Bitmap;

/// Fill a triangle by sorting its vertices by `y`, then marching two
/// sub-trapezoids (top and bottom) with 0.5 sub-pixel-centered scanlines.
/// Which of the two non-shared edges is "left" vs "right" is decided by
/// comparing their slopes (`dx1` vs `dx2`), matching the source's
/// `dx1 > dx2` branch.
pub fn fill_triangle(bmp: &mut Bitmap, p0: Point, p1: Point, p2: Point, paint: &Paint) {
    let mut pts = [p0, p1, p2];
    pts.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap());
    let [p0, p1, p2] = pts;

    let bounds = Rect::new(
        Point::new(p0.x.min(p1.x).min(p2.x), p0.y),
        Size::new((p0.x.max(p1.x).max(p2.x) - p0.x.min(p1.x).min(p2.x)).max(1.0), (p2.y - p0.y).max(1.0)),
    );

    with_pixel_source(paint, bounds, |src| {
        let total_h = p2.y - p0.y;
        if total_h <= 0.0 {
            return;
        }
        let dx_total = (p2.x - p0.x) / total_h;

        let fill_half = |bmp: &mut Bitmap, y_top: f64, y_bot: f64, x_a_start: f64, dx_a: f64, x_b_start: f64, dx_b: f64| {
            let y0 = y_top.ceil() as i32;
            let y1 = y_bot.ceil() as i32;
            for y in y0..y1 {
                let t = f64::from(y) + 0.5 - y_top;
                let xa = x_a_start + dx_a * t;
                let xb = x_b_start + dx_b * t;
                let (lo, hi) = if xa <= xb { (xa, xb) } else { (xb, xa) };
                let x0 = (lo + 0.5).floor() as i32;
                let x1 = (hi + 0.5).floor() as i32;
                for x in x0..x1 {
                    plot(bmp, x, y, src);
                }
            }
        };

        if (p1.y - p0.y) > 0.0 {
            let dx1 = (p1.x - p0.x) / (p1.y - p0.y);
            fill_half(bmp, p0.y, p1.y, p0.x, dx1, p0.x, dx_total);
        }
        if (p2.y - p1.y) > 0.0 {
            let dx3 = (p2.x - p1.x) / (p2.y - p1.y);
            let x_on_total_at_p1 = p0.x + dx_total * (p1.y - p0.y);
            fill_half(bmp, p1.y, p2.y, p1.x, dx3, x_on_total_at_p1, dx_total);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::{BLACK, WHITE};

    #[test]
    fn centroid_is_filled_corner_is_not() {
        let mut bmp = Bitmap::new_with_color(11, 11, BLACK);
        fill_triangle(
            &mut bmp,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
            &Paint::Color(WHITE),
        );
        assert_eq!(bmp.get_color_raw(5, 3), WHITE);
        assert_eq!(bmp.get_color_raw(10, 10), BLACK);
    }
}

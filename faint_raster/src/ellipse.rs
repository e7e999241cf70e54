//! Ellipse outline and fill (§4.D "Ellipse outline").
use faint_geom::Rect;
use faint_paint::{with_pixel_source, Paint, PixelSource};
use faint_pixmap::Bitmap;

use crate::plot::plot;
use crate::style::LineStyle;

/// Midpoint ellipse: the per-row half-width `x` for each `y` in `0..=ry`,
/// covering one quadrant; callers mirror across both axes.
fn midpoint_half_widths(rx: f64, ry: f64) -> Vec<i32> {
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }
    let ry_i = ry.round() as i32;
    let mut widths = vec![0i32; (ry_i + 1) as usize];
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    for (y, slot) in widths.iter_mut().enumerate() {
        let yf = y as f64;
        if yf > ry {
            *slot = 0;
            continue;
        }
        let inner = (1.0 - (yf * yf) / ry2).max(0.0);
        *slot = (rx * inner.sqrt()).round() as i32;
    }
    widths
}

fn for_each_outline_pixel(cx: f64, cy: f64, rx: f64, ry: f64, mut f: impl FnMut(i32, i32)) {
    let widths = midpoint_half_widths(rx, ry);
    for (y, &w) in widths.iter().enumerate() {
        let yi = y as i32;
        f((cx + f64::from(w)).round() as i32, (cy + f64::from(yi)).round() as i32);
        f((cx - f64::from(w)).round() as i32, (cy + f64::from(yi)).round() as i32);
        f((cx + f64::from(w)).round() as i32, (cy - f64::from(yi)).round() as i32);
        f((cx - f64::from(w)).round() as i32, (cy - f64::from(yi)).round() as i32);
    }
}

/// Draw the outline of an ellipse inscribed in `rect`. `style.width > 1`
/// draws a filled annulus between the inner and outer ellipses; `dashed`
/// toggles visibility every two pixels along the outline.
pub fn draw_ellipse(bmp: &mut Bitmap, rect: Rect, paint: &Paint, style: LineStyle) {
    let r = rect.normalized();
    let cx = r.x() + r.w() / 2.0;
    let cy = r.y() + r.h() / 2.0;
    let rx = r.w() / 2.0;
    let ry = r.h() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    with_pixel_source(paint, r, |src| {
        if style.width <= 1.0 {
            let mut toggle = 0usize;
            for_each_outline_pixel(cx, cy, rx, ry, |x, y| {
                let on = !style.dashed || (toggle / 2) % 2 == 0;
                if on {
                    plot(bmp, x, y, src);
                }
                toggle += 1;
            });
        } else {
            let half = style.width / 2.0;
            let outer_w = midpoint_half_widths(rx + half, ry + half);
            let inner_w = midpoint_half_widths((rx - half).max(0.0), (ry - half).max(0.0));
            let rows = outer_w.len();
            for y in 0..rows {
                let outer = outer_w[y];
                let inner = if y < inner_w.len() { inner_w[y] } else { 0 };
                for x in inner..=outer {
                    plot(bmp, (cx + f64::from(x)) as i32, (cy + f64::from(y as i32)) as i32, src);
                    plot(bmp, (cx - f64::from(x)) as i32, (cy + f64::from(y as i32)) as i32, src);
                    plot(bmp, (cx + f64::from(x)) as i32, (cy - f64::from(y as i32)) as i32, src);
                    plot(bmp, (cx - f64::from(x)) as i32, (cy - f64::from(y as i32)) as i32, src);
                }
            }
        }
    });
}

/// Fill the interior of an ellipse inscribed in `rect`, scan-line per row.
pub fn fill_ellipse(bmp: &mut Bitmap, rect: Rect, paint: &Paint) {
    let r = rect.normalized();
    let cx = r.x() + r.w() / 2.0;
    let cy = r.y() + r.h() / 2.0;
    let rx = r.w() / 2.0;
    let ry = r.h() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    with_pixel_source(paint, r, |src| {
        let widths = midpoint_half_widths(rx, ry);
        for (y, &w) in widths.iter().enumerate() {
            let yi = y as i32;
            for x in -w..=w {
                plot(bmp, (cx + f64::from(x)) as i32, (cy + f64::from(yi)) as i32, src);
                plot(bmp, (cx + f64::from(x)) as i32, (cy - f64::from(yi)) as i32, src);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_geom::{Point, Size};
    use faint_pixmap::{BLACK, WHITE};

    #[test]
    fn filled_ellipse_center_is_painted() {
        let mut bmp = Bitmap::new_with_color(21, 21, BLACK);
        let rect = Rect::new(Point::new(0.0, 0.0), Size::new(21.0, 21.0));
        fill_ellipse(&mut bmp, rect, &Paint::Color(WHITE));
        assert_eq!(bmp.get_color_raw(10, 10), WHITE);
        assert_eq!(bmp.get_color_raw(0, 0), BLACK);
    }

    #[test]
    fn outline_does_not_paint_corners() {
        let mut bmp = Bitmap::new_with_color(21, 21, BLACK);
        let rect = Rect::new(Point::new(0.0, 0.0), Size::new(21.0, 21.0));
        draw_ellipse(&mut bmp, rect, &Paint::Color(WHITE), LineStyle::new(1.0));
        assert_eq!(bmp.get_color_raw(0, 0), BLACK);
    }

    #[test]
    fn degenerate_ellipse_is_noop() {
        let mut bmp = Bitmap::new_with_color(5, 5, BLACK);
        let rect = Rect::new(Point::new(0.0, 0.0), Size::new(0.0, 5.0));
        fill_ellipse(&mut bmp, rect, &Paint::Color(WHITE));
        assert!(bmp.is_blank() == false || bmp.get_color_raw(0, 0) == BLACK);
    }
}

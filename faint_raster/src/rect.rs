//! Rectangle outline and fill (§4.D "Rectangle outline").
use faint_geom::{IntPoint, Rect};
use faint_paint::{with_pixel_source, Paint};
use faint_pixmap::Bitmap;

use crate::plot::plot;
use crate::polygon::draw_polygon;
use crate::style::LineStyle;

fn corners(rect: Rect) -> [IntPoint; 4] {
    let r = rect.normalized();
    [
        IntPoint::new(r.x().round() as i32, r.y().round() as i32),
        IntPoint::new(r.right().round() as i32 - 1, r.y().round() as i32),
        IntPoint::new(r.right().round() as i32 - 1, r.bottom().round() as i32 - 1),
        IntPoint::new(r.x().round() as i32, r.bottom().round() as i32 - 1),
    ]
}

/// Draw a rectangle outline. Dashed rects are drawn as a closed polygon
/// (reusing the polyline/mitre machinery); solid rects are drawn as
/// `style.width` nested concentric scanlines and verticals, which is
/// cheaper and avoids mitre stamps at square corners.
pub fn draw_rect(bmp: &mut Bitmap, rect: Rect, paint: &Paint, style: LineStyle) {
    if style.dashed {
        draw_polygon(bmp, &corners(rect), paint, style);
        return;
    }
    let r = rect.normalized();
    if r.is_empty() {
        return;
    }
    with_pixel_source(paint, r, |src| {
        let w = style.width.max(1.0) as i32;
        let x0 = r.x().round() as i32;
        let y0 = r.y().round() as i32;
        let x1 = r.right().round() as i32 - 1;
        let y1 = r.bottom().round() as i32 - 1;
        for i in 0..w {
            for x in x0..=x1 {
                plot(bmp, x, y0 + i, src);
                plot(bmp, x, y1 - i, src);
            }
            for y in y0..=y1 {
                plot(bmp, x0 + i, y, src);
                plot(bmp, x1 - i, y, src);
            }
        }
    });
}

/// Fill a rectangle, clipped to the bitmap.
pub fn fill_rect(bmp: &mut Bitmap, rect: Rect, paint: &Paint) {
    let r = rect.normalized();
    if r.is_empty() {
        return;
    }
    with_pixel_source(paint, r, |src| {
        let x0 = r.x().floor() as i32;
        let y0 = r.y().floor() as i32;
        let x1 = r.right().ceil() as i32;
        let y1 = r.bottom().ceil() as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                plot(bmp, x, y, src);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_geom::Size;
    use faint_pixmap::{BLACK, WHITE};

    #[test]
    fn fill_rect_covers_exact_region() {
        let mut bmp = Bitmap::new_with_color(10, 10, BLACK);
        fill_rect(
            &mut bmp,
            Rect::new(faint_geom::Point::new(2.0, 2.0), Size::new(3.0, 3.0)),
            &Paint::Color(WHITE),
        );
        for y in 2..5 {
            for x in 2..5 {
                assert_eq!(bmp.get_color_raw(x, y), WHITE);
            }
        }
        assert_eq!(bmp.get_color_raw(5, 5), BLACK);
    }

    #[test]
    fn draw_rect_outline_leaves_interior_untouched() {
        let mut bmp = Bitmap::new_with_color(10, 10, BLACK);
        draw_rect(
            &mut bmp,
            Rect::new(faint_geom::Point::new(1.0, 1.0), Size::new(6.0, 6.0)),
            &Paint::Color(WHITE),
            LineStyle::new(1.0),
        );
        assert_eq!(bmp.get_color_raw(1, 1), WHITE);
        assert_eq!(bmp.get_color_raw(4, 4), BLACK);
    }
}

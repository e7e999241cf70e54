//! Blend, blit, and their masked variants (§4.D "Blend", "Masked blit/blend").
use faint_geom::{IntPoint, Rect};
use faint_paint::{with_pixel_source, Paint};
use faint_pixmap::{AlphaMapRef, Bitmap, Color, Offsat};

/// Source-over compositing of `src` atop `dst` with straight alpha:
/// `out = (src*a + dst*(255-a)) / 255` per channel.
#[inline]
pub fn alpha_blended(dst: Color, src: Color) -> Color {
    let a = u16::from(src.a);
    let mix = |s: u8, d: u8| -> u8 { ((u16::from(s) * a + u16::from(d) * (255 - a)) / 255) as u8 };
    Color::new(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), dst.a.max(src.a))
}

/// Blend `src` onto `dst` at `offset`, source-over, clipped to both
/// bitmaps' bounds. Destination alpha becomes `max(src.a, dst.a)`.
pub fn blend(dst: &mut Bitmap, src: &Bitmap, offset: IntPoint) {
    for y in 0..src.height() as i32 {
        for x in 0..src.width() as i32 {
            let dx = x + offset.x;
            let dy = y + offset.y;
            if let Some(d) = dst.get_color(IntPoint::new(dx, dy)) {
                let s = src.get_color_raw(x, y);
                dst.put_pixel(IntPoint::new(dx, dy), alpha_blended(d, s));
            }
        }
    }
}

/// Copy `src` onto `dst` at `offset` unconditionally (destination alpha is
/// simply overwritten, not blended).
pub fn blit(dst: &mut Bitmap, src: &Bitmap, offset: IntPoint) {
    for y in 0..src.height() as i32 {
        for x in 0..src.width() as i32 {
            let dx = x + offset.x;
            let dy = y + offset.y;
            if dst.get_color(IntPoint::new(dx, dy)).is_some() {
                dst.put_pixel_raw(dx, dy, src.get_color_raw(x, y));
            }
        }
    }
}

/// Like [`blit`], but a source pixel is skipped (not copied) when its alpha
/// is zero or its RGBA equals `mask_color`.
pub fn blit_masked(dst: &mut Bitmap, src: &Bitmap, offset: IntPoint, mask_color: Color) {
    for y in 0..src.height() as i32 {
        for x in 0..src.width() as i32 {
            let s = src.get_color_raw(x, y);
            if s.a == 0 || s == mask_color {
                continue;
            }
            let dx = x + offset.x;
            let dy = y + offset.y;
            if dst.get_color(IntPoint::new(dx, dy)).is_some() {
                dst.put_pixel_raw(dx, dy, s);
            }
        }
    }
}

/// Like [`blend`], but a source pixel is skipped when its alpha is zero or
/// its RGBA equals `mask_color`.
pub fn blend_masked(dst: &mut Bitmap, src: &Bitmap, offset: IntPoint, mask_color: Color) {
    for y in 0..src.height() as i32 {
        for x in 0..src.width() as i32 {
            let s = src.get_color_raw(x, y);
            if s.a == 0 || s == mask_color {
                continue;
            }
            let dx = x + offset.x;
            let dy = y + offset.y;
            if let Some(d) = dst.get_color(IntPoint::new(dx, dy)) {
                dst.put_pixel(IntPoint::new(dx, dy), alpha_blended(d, s));
            }
        }
    }
}

/// Blend a `Paint` through an alpha mask (e.g. an anti-aliased brush
/// stroke): destination alpha becomes the blend of `src.a * mask / 255`
/// into the existing destination alpha.
pub fn blend_color(dst: &mut Bitmap, alpha: Offsat<AlphaMapRef<'_>>, paint: &Paint) {
    let r = alpha.value.rect();
    let bounds = Rect::new(
        faint_geom::Point::new(f64::from(alpha.offset.x), f64::from(alpha.offset.y)),
        faint_geom::Size::new(f64::from(r.w()), f64::from(r.h())),
    );
    with_pixel_source(paint, bounds, |src| {
        for y in 0..r.h() {
            for x in 0..r.w() {
                let m = alpha.value.get(x, y).unwrap_or(0);
                if m == 0 {
                    continue;
                }
                let dx = x + alpha.offset.x;
                let dy = y + alpha.offset.y;
                if let Some(d) = dst.get_color(IntPoint::new(dx, dy)) {
                    let mut c = src.at(dx, dy);
                    c.a = ((u16::from(c.a) * u16::from(m)) / 255) as u8;
                    let blended = alpha_blended(d, c);
                    let new_a = u16::from(c.a) + (u16::from(d.a) * (255 - u16::from(c.a))) / 255;
                    dst.put_pixel(
                        IntPoint::new(dx, dy),
                        Color::new(blended.r, blended.g, blended.b, new_a as u8),
                    );
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::{color, BLACK, WHITE};

    #[test]
    fn full_alpha_blend_replaces_color() {
        let dst = color(10, 20, 30, 255);
        let src = color(200, 100, 50, 255);
        assert_eq!(alpha_blended(dst, src), src);
    }

    #[test]
    fn zero_alpha_blend_keeps_destination() {
        let dst = color(10, 20, 30, 255);
        let src = color(200, 100, 50, 0);
        assert_eq!(alpha_blended(dst, src), dst);
    }

    #[test]
    fn blend_overlay_writes_into_region() {
        let mut dst = Bitmap::new_with_color(4, 4, BLACK);
        let src = Bitmap::new_with_color(2, 2, WHITE);
        blend(&mut dst, &src, IntPoint::new(1, 1));
        assert_eq!(dst.get_color_raw(1, 1), WHITE);
        assert_eq!(dst.get_color_raw(0, 0), BLACK);
    }

    #[test]
    fn masked_blit_skips_mask_color() {
        let mut dst = Bitmap::new_with_color(2, 2, BLACK);
        let mut src = Bitmap::new_with_color(2, 2, WHITE);
        src.put_pixel_raw(0, 0, color(1, 2, 3, 255));
        blit_masked(&mut dst, &src, IntPoint::new(0, 0), color(1, 2, 3, 255));
        assert_eq!(dst.get_color_raw(0, 0), BLACK);
        assert_eq!(dst.get_color_raw(1, 0), WHITE);
    }
}

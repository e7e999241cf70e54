//! Flip, rotate, and resampling (§4.E "Affine & resampling").
use faint_pixmap::{Bitmap, Color};

/// Which axis [`flip`] mirrors across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// Mirror `bmp` across `axis`; output has the same size.
pub fn flip(bmp: &Bitmap, axis: FlipAxis) -> Bitmap {
    let (w, h) = (bmp.width(), bmp.height());
    let mut out = Bitmap::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let (sx, sy) = match axis {
                FlipAxis::Horizontal => (w as i32 - 1 - x, y),
                FlipAxis::Vertical => (x, h as i32 - 1 - y),
            };
            out.put_pixel_raw(x, y, bmp.get_color_raw(sx, sy));
        }
    }
    out
}

/// Rotate `bmp` 90 degrees clockwise; output is transposed (`w x h` becomes
/// `h x w`).
pub fn rotate_90cw(bmp: &Bitmap) -> Bitmap {
    let (w, h) = (bmp.width(), bmp.height());
    let mut out = Bitmap::new(h, w);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            out.put_pixel_raw(h as i32 - 1 - y, x, bmp.get_color_raw(x, y));
        }
    }
    out
}

/// Rotate `bmp` by an arbitrary angle (radians), reverse-mapped with
/// nearest-neighbor sampling; pixels whose source maps outside the bitmap
/// are filled with `bg`. Output is sized to fit the rotated bounding box.
pub fn rotate(bmp: &Bitmap, angle: faint_geom::Radian, bg: Color) -> Bitmap {
    let (w, h) = (f64::from(bmp.width()), f64::from(bmp.height()));
    let (s, c) = angle.0.sin_cos();
    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];
    let rotated_corners: Vec<(f64, f64)> = corners
        .iter()
        .map(|&(x, y)| (x * c - y * s, x * s + y * c))
        .collect();
    let min_x = rotated_corners.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = rotated_corners.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = rotated_corners.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = rotated_corners.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let out_w = (max_x - min_x).ceil().max(1.0) as u32;
    let out_h = (max_y - min_y).ceil().max(1.0) as u32;
    let mut out = Bitmap::new_with_color(out_w, out_h, bg);

    let cx = w / 2.0;
    let cy = h / 2.0;
    let out_cx = f64::from(out_w) / 2.0;
    let out_cy = f64::from(out_h) / 2.0;

    for oy in 0..out_h as i32 {
        for ox in 0..out_w as i32 {
            let rx = f64::from(ox) - out_cx;
            let ry = f64::from(oy) - out_cy;
            let sx = rx * c + ry * s;
            let sy = -rx * s + ry * c;
            let src_x = (sx + cx).round() as i32;
            let src_y = (sy + cy).round() as i32;
            if src_x >= 0 && src_y >= 0 && (src_x as u32) < bmp.width() && (src_y as u32) < bmp.height() {
                out.put_pixel_raw(ox, oy, bmp.get_color_raw(src_x, src_y));
            }
        }
    }
    out
}

/// Nearest-neighbor scale using 16.16 fixed-point source ratios.
pub fn scale_nearest(bmp: &Bitmap, sx: f64, sy: f64) -> Bitmap {
    let (flip_x, flip_y) = (sx < 0.0, sy < 0.0);
    let (asx, asy) = (sx.abs(), sy.abs());
    let out_w = (f64::from(bmp.width()) * asx).round().max(1.0) as u32;
    let out_h = (f64::from(bmp.height()) * asy).round().max(1.0) as u32;
    let ratio_x = ((f64::from(bmp.width()) / f64::from(out_w)) * 65536.0) as i64;
    let ratio_y = ((f64::from(bmp.height()) / f64::from(out_h)) * 65536.0) as i64;
    let mut out = Bitmap::new(out_w, out_h);
    for y in 0..out_h as i32 {
        let sy_fixed = (i64::from(y) * ratio_y) >> 16;
        for x in 0..out_w as i32 {
            let sx_fixed = (i64::from(x) * ratio_x) >> 16;
            let src_x = sx_fixed.min(i64::from(bmp.width()) - 1) as i32;
            let src_y = sy_fixed.min(i64::from(bmp.height()) - 1) as i32;
            out.put_pixel_raw(x, y, bmp.get_color_raw(src_x, src_y));
        }
    }
    if flip_x || flip_y {
        let mut result = out;
        if flip_x {
            result = flip(&result, FlipAxis::Horizontal);
        }
        if flip_y {
            result = flip(&result, FlipAxis::Vertical);
        }
        result
    } else {
        out
    }
}

/// Four-tap bilinear scale; each output channel is rounded via `+0.5`
/// before truncation.
pub fn scale_bilinear(bmp: &Bitmap, sx: f64, sy: f64) -> Bitmap {
    let (flip_x, flip_y) = (sx < 0.0, sy < 0.0);
    let (asx, asy) = (sx.abs(), sy.abs());
    let out_w = (f64::from(bmp.width()) * asx).round().max(1.0) as u32;
    let out_h = (f64::from(bmp.height()) * asy).round().max(1.0) as u32;
    let mut out = Bitmap::new(out_w, out_h);
    let src_w = bmp.width() as i32;
    let src_h = bmp.height() as i32;
    for y in 0..out_h as i32 {
        let fy = (f64::from(y) + 0.5) / asy - 0.5;
        let y0 = fy.floor() as i32;
        let ty = fy - fy.floor();
        for x in 0..out_w as i32 {
            let fx = (f64::from(x) + 0.5) / asx - 0.5;
            let x0 = fx.floor() as i32;
            let tx = fx - fx.floor();
            let clamp = |v: i32, max: i32| v.max(0).min(max - 1);
            let c00 = bmp.get_color_raw(clamp(x0, src_w), clamp(y0, src_h));
            let c10 = bmp.get_color_raw(clamp(x0 + 1, src_w), clamp(y0, src_h));
            let c01 = bmp.get_color_raw(clamp(x0, src_w), clamp(y0 + 1, src_h));
            let c11 = bmp.get_color_raw(clamp(x0 + 1, src_w), clamp(y0 + 1, src_h));
            let lerp = |a: u8, b: u8, t: f64| -> f64 { f64::from(a) + (f64::from(b) - f64::from(a)) * t };
            let mix = |get: fn(Color) -> u8| -> u8 {
                let top = lerp(get(c00), get(c10), tx);
                let bot = lerp(get(c01), get(c11), tx);
                (top + (bot - top) * ty + 0.5) as u8
            };
            let c = Color::new(mix(|c| c.r), mix(|c| c.g), mix(|c| c.b), mix(|c| c.a));
            out.put_pixel_raw(x, y, c);
        }
    }
    if flip_x || flip_y {
        let mut result = out;
        if flip_x {
            result = flip(&result, FlipAxis::Horizontal);
        }
        if flip_y {
            result = flip(&result, FlipAxis::Vertical);
        }
        result
    } else {
        out
    }
}

/// Extract `rect` from `bmp` (as [`Bitmap::subbitmap`]) and scale it in one
/// pass, computing a source origin per output pixel rather than
/// materializing the intermediate sub-bitmap.
pub fn subbitmap_scale(bmp: &Bitmap, rect: faint_geom::IntRect, sx: f64, sy: f64) -> Bitmap {
    let sub = bmp.subbitmap(rect);
    scale_nearest(&sub, sx, sy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::{color, BLACK, WHITE};

    #[test]
    fn flip_horizontal_then_flip_is_identity() {
        let mut bmp = Bitmap::new(3, 2);
        bmp.put_pixel_raw(0, 0, WHITE);
        let twice = flip(&flip(&bmp, FlipAxis::Horizontal), FlipAxis::Horizontal);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(twice.get_color_raw(x, y), bmp.get_color_raw(x, y));
            }
        }
    }

    #[test]
    fn rotate_90cw_four_times_is_identity() {
        let mut bmp = Bitmap::new(3, 2);
        bmp.put_pixel_raw(0, 0, WHITE);
        bmp.put_pixel_raw(2, 1, color(1, 2, 3, 255));
        let mut r = bmp.deep_clone();
        for _ in 0..4 {
            r = rotate_90cw(&r);
        }
        assert_eq!(r.width(), bmp.width());
        assert_eq!(r.height(), bmp.height());
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(r.get_color_raw(x, y), bmp.get_color_raw(x, y));
            }
        }
    }

    #[test]
    fn scale_nearest_identity_is_pixel_identical() {
        let mut bmp = Bitmap::new(4, 4);
        bmp.put_pixel_raw(1, 1, WHITE);
        let scaled = scale_nearest(&bmp, 1.0, 1.0);
        assert_eq!(scaled.width(), bmp.width());
        assert_eq!(scaled.get_color_raw(1, 1), WHITE);
    }

    #[test]
    fn scale_nearest_doubles_dimensions() {
        let bmp = Bitmap::new_with_color(2, 2, BLACK);
        let scaled = scale_nearest(&bmp, 2.0, 2.0);
        assert_eq!(scaled.width(), 4);
        assert_eq!(scaled.height(), 4);
    }
}

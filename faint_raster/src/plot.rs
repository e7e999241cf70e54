use faint_paint::PixelSource;
use faint_pixmap::Bitmap;

/// Write the color `src` produces for `(x, y)`, silently dropping
/// out-of-bounds writes — every rasterization primitive goes through this
/// so that input coordinates may lie partially or wholly outside the
/// bitmap (§7: "drawing primitives never fail").
#[inline]
pub fn plot(bmp: &mut Bitmap, x: i32, y: i32, src: &dyn PixelSource) {
    if x < 0 || y < 0 || x as u32 >= bmp.width() || y as u32 >= bmp.height() {
        return;
    }
    bmp.put_pixel_raw(x, y, src.at(x, y));
}

/// Stamp a filled disc of `diameter` centered at `(cx, cy)` — used for
/// round line caps and polygon mitre-hiding.
pub fn fill_disc(bmp: &mut Bitmap, cx: f64, cy: f64, diameter: f64, src: &dyn PixelSource) {
    if diameter <= 0.0 {
        return;
    }
    let r = diameter / 2.0;
    let min_x = (cx - r).floor() as i32;
    let max_x = (cx + r).ceil() as i32;
    let min_y = (cy - r).floor() as i32;
    let max_y = (cy + r).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                plot(bmp, x, y, src);
            }
        }
    }
}

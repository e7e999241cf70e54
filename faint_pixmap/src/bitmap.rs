use checked::Checked;
use faint_geom::{IntPoint, IntRect, IntSize};

use crate::{color, Color};

/// Byte offset of the blue channel within a pixel.
pub const CHANNEL_B: usize = 0;
/// Byte offset of the green channel within a pixel.
pub const CHANNEL_G: usize = 1;
/// Byte offset of the red channel within a pixel.
pub const CHANNEL_R: usize = 2;
/// Byte offset of the alpha channel within a pixel.
pub const CHANNEL_A: usize = 3;

/// An owned ARGB32 pixel buffer with an explicit stride.
///
/// The data pointer is non-null (the backing `Box<[u8]>` is non-empty) iff
/// `width > 0 && height > 0`. `Bitmap` is move-only: cloning is always
/// explicit, via [`Bitmap::deep_clone`], never implicit — there is no
/// `Clone` impl.
#[derive(Debug, Default)]
pub struct Bitmap {
    data: Box<[u8]>,
    width: u32,
    height: u32,
    stride: usize,
}

impl Bitmap {
    /// The default-constructed, invalid bitmap: `width == height == 0`.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// `true` iff the bitmap has positive extent in both dimensions.
    #[inline]
    pub fn bitmap_ok(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> IntSize {
        IntSize::new(self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn default_stride(width: u32) -> usize {
        let stride = Checked::from(width as usize) * 4;
        stride.expect("bitmap stride overflow")
    }

    /// A zeroed `width x height` bitmap with the minimal stride (`4 *
    /// width`). Both dimensions may be zero, producing an empty,
    /// `bitmap_ok() == false` bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_stride(width, height, Self::default_stride(width))
    }

    /// Like [`Bitmap::new`], but filled with `fill` instead of zero.
    pub fn new_with_color(width: u32, height: u32, fill: Color) -> Self {
        let mut bmp = Self::new(width, height);
        bmp.clear(fill);
        bmp
    }

    /// Like [`Bitmap::new`], but every pixel is computed from its
    /// coordinate via `f`. Used to implement "sized, filled via a `Paint`"
    /// construction without this crate depending on the paint-dispatch
    /// crate.
    pub fn new_with(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut bmp = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bmp.put_pixel_raw(x as i32, y as i32, f(x, y));
            }
        }
        bmp
    }

    /// A zeroed bitmap with an explicitly chosen stride. `stride` must be
    /// at least `4 * width` (checked at the byte-buffer size below, via
    /// [`Checked`] to catch overflow on pathological sizes rather than
    /// silently wrapping).
    pub fn with_stride(width: u32, height: u32, stride: usize) -> Self {
        if width == 0 || height == 0 {
            return Self {
                data: Box::new([]),
                width: 0,
                height: 0,
                stride: 0,
            };
        }
        assert!(stride >= width as usize * 4, "stride too small for width");
        let num_bytes = Checked::from(stride) * height as usize;
        let num_bytes = num_bytes.expect("bitmap size overflow");
        log::trace!(
            "allocating {}x{} bitmap, stride={}, {} bytes",
            width,
            height,
            stride,
            num_bytes
        );
        Self {
            data: vec![0u8; num_bytes].into_boxed_slice(),
            width,
            height,
            stride,
        }
    }

    /// An explicit deep copy. `Bitmap` has no `Clone` impl on purpose —
    /// copies of a potentially large pixel buffer must be requested by
    /// name.
    pub fn deep_clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.put_pixel_raw(x as i32, y as i32, color);
            }
        }
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.stride + x as usize * 4
    }

    /// Write a pixel without bounds checking. Caller must ensure `(x, y)`
    /// is within `[0, width) x [0, height)`.
    #[inline]
    pub fn put_pixel_raw(&mut self, x: i32, y: i32, c: Color) {
        let o = self.offset(x, y);
        self.data[o + CHANNEL_B] = c.b;
        self.data[o + CHANNEL_G] = c.g;
        self.data[o + CHANNEL_R] = c.r;
        self.data[o + CHANNEL_A] = c.a;
    }

    /// Read a pixel without bounds checking.
    #[inline]
    pub fn get_color_raw(&self, x: i32, y: i32) -> Color {
        let o = self.offset(x, y);
        color(
            self.data[o + CHANNEL_R],
            self.data[o + CHANNEL_G],
            self.data[o + CHANNEL_B],
            self.data[o + CHANNEL_A],
        )
    }

    #[inline]
    fn contains(&self, p: IntPoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Bounds-checked write; silently dropped if `p` is out of bounds.
    #[inline]
    pub fn put_pixel(&mut self, p: IntPoint, c: Color) {
        if self.contains(p) {
            self.put_pixel_raw(p.x, p.y, c);
        }
    }

    /// Bounds-checked read.
    #[inline]
    pub fn get_color(&self, p: IntPoint) -> Option<Color> {
        if self.contains(p) {
            Some(self.get_color_raw(p.x, p.y))
        } else {
            None
        }
    }

    /// `true` iff the bitmap has no visible content, i.e. every pixel is
    /// fully transparent.
    pub fn is_blank(&self) -> bool {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get_color_raw(x as i32, y as i32).a != 0 {
                    return false;
                }
            }
        }
        true
    }

    /// An explicit copy of the sub-region `rect`, clipped to this bitmap's
    /// bounds. Pixels of `rect` outside the bitmap are omitted (the result
    /// may be smaller than `rect.size`).
    pub fn subbitmap(&self, rect: IntRect) -> Self {
        let bounds = IntRect::new(IntPoint::new(0, 0), self.size());
        let clipped = match rect.intersection(&bounds) {
            Some(r) => r,
            None => return Self::invalid(),
        };
        let mut out = Self::new(clipped.w() as u32, clipped.h() as u32);
        for y in 0..clipped.h() {
            for x in 0..clipped.w() {
                let c = self.get_color_raw(clipped.x() + x, clipped.y() + y);
                out.put_pixel_raw(x, y, c);
            }
        }
        out
    }
}

/// `true` iff `rect` fits entirely within `bitmap`'s bounds.
pub fn inside(rect: IntRect, bitmap: &Bitmap) -> bool {
    rect.inside(&IntRect::new(IntPoint::new(0, 0), bitmap.size()))
}

/// Every distinct color in `bitmap`, sorted ascending by `(r, g, b, a)` with
/// no duplicates. May exceed 256 entries; callers that need a paletted
/// `ColorMap` go through `faint_quantize::quantized` instead.
pub fn get_palette(bitmap: &Bitmap) -> Vec<Color> {
    let mut seen = std::collections::BTreeSet::new();
    for y in 0..bitmap.height() as i32 {
        for x in 0..bitmap.width() as i32 {
            let c = bitmap.get_color_raw(x, y);
            seen.insert((c.r, c.g, c.b, c.a));
        }
    }
    seen.into_iter().map(|(r, g, b, a)| color(r, g, b, a)).collect()
}

/// The number of distinct colors in `bitmap`; `get_palette(bitmap).len()`.
pub fn count_colors(bitmap: &Bitmap) -> usize {
    get_palette(bitmap).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BLACK, WHITE};

    #[test]
    fn put_then_get_raw_roundtrips() {
        let mut b = Bitmap::new(4, 4);
        b.put_pixel_raw(1, 2, WHITE);
        assert_eq!(b.get_color_raw(1, 2), WHITE);
    }

    #[test]
    fn out_of_bounds_put_pixel_is_dropped() {
        let mut b = Bitmap::new(4, 4);
        b.put_pixel(IntPoint::new(10, 10), WHITE);
        assert_eq!(b.get_color(IntPoint::new(10, 10)), None);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut b = Bitmap::new(3, 3);
        b.clear(WHITE);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(b.get_color_raw(x, y), WHITE);
            }
        }
    }

    #[test]
    fn default_bitmap_is_not_ok() {
        assert!(!Bitmap::invalid().bitmap_ok());
        assert!(Bitmap::new(1, 1).bitmap_ok());
    }

    #[test]
    fn is_blank_tracks_alpha() {
        let mut b = Bitmap::new(2, 2);
        assert!(b.is_blank());
        b.put_pixel_raw(0, 0, BLACK);
        assert!(!b.is_blank());
    }

    #[test]
    fn subbitmap_extracts_region() {
        let mut b = Bitmap::new(4, 4);
        b.put_pixel_raw(2, 2, WHITE);
        let sub = b.subbitmap(IntRect::new(IntPoint::new(2, 2), IntSize::new(2, 2)));
        assert_eq!(sub.width(), 2);
        assert_eq!(sub.get_color_raw(0, 0), WHITE);
    }

    #[test]
    fn inside_checks_bitmap_bounds() {
        let b = Bitmap::new(10, 10);
        assert!(inside(IntRect::new(IntPoint::new(0, 0), IntSize::new(10, 10)), &b));
        assert!(!inside(IntRect::new(IntPoint::new(5, 5), IntSize::new(10, 10)), &b));
    }

    #[test]
    fn deep_clone_is_independent() {
        let mut b = Bitmap::new(2, 2);
        let c = b.deep_clone();
        b.put_pixel_raw(0, 0, WHITE);
        assert_eq!(c.get_color_raw(0, 0), crate::color(0, 0, 0, 0));
    }

    #[test]
    fn get_palette_is_sorted_and_deduplicated() {
        let mut b = Bitmap::new(3, 1);
        b.put_pixel_raw(0, 0, WHITE);
        b.put_pixel_raw(1, 0, BLACK);
        b.put_pixel_raw(2, 0, WHITE);
        let palette = get_palette(&b);
        assert_eq!(palette, vec![BLACK, WHITE]);
        assert_eq!(count_colors(&b), 2);
    }
}

use faint_geom::{IntPoint, IntRect};

/// An owned 8-bit mask of `width * height` bytes with its own stride.
///
/// Used both for anti-alias masks and, in `faint_quantize`, as the
/// quantized index map (one byte per pixel, value = palette index).
#[derive(Debug, Default)]
pub struct AlphaMap {
    data: Box<[u8]>,
    width: u32,
    height: u32,
    stride: usize,
}

impl AlphaMap {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::invalid();
        }
        let stride = width as usize;
        Self {
            data: vec![0u8; stride * height as usize].into_boxed_slice(),
            width,
            height,
            stride,
        }
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

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if self.contains(x, y) {
            Some(self.data[y as usize * self.stride + x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_raw(&self, x: i32, y: i32) -> u8 {
        self.data[y as usize * self.stride + x as usize]
    }

    #[inline]
    pub fn set_raw(&mut self, x: i32, y: i32, v: u8) {
        self.data[y as usize * self.stride + x as usize] = v;
    }

    /// Add `v` to the pixel at `(x, y)`, saturating at 255. Out-of-bounds
    /// writes are silently dropped.
    pub fn add(&mut self, x: i32, y: i32, v: u8) {
        if self.contains(x, y) {
            let idx = y as usize * self.stride + x as usize;
            self.data[idx] = self.data[idx].saturating_add(v);
        }
    }

    pub fn deep_clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// A non-owning view of the whole map.
    pub fn full_reference(&self) -> AlphaMapRef<'_> {
        AlphaMapRef {
            map: self,
            rect: IntRect::new(IntPoint::new(0, 0), self.map_size()),
        }
    }

    /// A non-owning view of `rect`, clipped to this map's bounds.
    pub fn sub_reference(&self, rect: IntRect) -> AlphaMapRef<'_> {
        let bounds = IntRect::new(IntPoint::new(0, 0), self.map_size());
        let clipped = rect.intersection(&bounds).unwrap_or(IntRect::new(
            IntPoint::new(0, 0),
            faint_geom::IntSize::new(0, 0),
        ));
        AlphaMapRef {
            map: self,
            rect: clipped,
        }
    }

    /// An owned, detached copy of `rect`.
    pub fn sub_copy(&self, rect: IntRect) -> Self {
        let r = self.sub_reference(rect);
        let mut out = Self::new(r.rect.w() as u32, r.rect.h() as u32);
        for y in 0..r.rect.h() {
            for x in 0..r.rect.w() {
                let v = self.get_raw(r.rect.x() + x, r.rect.y() + y);
                out.set_raw(x, y, v);
            }
        }
        out
    }

    fn map_size(&self) -> faint_geom::IntSize {
        faint_geom::IntSize::new(self.width as i32, self.height as i32)
    }
}

/// A non-owning borrow of a rectangular region of an [`AlphaMap`]. Must not
/// outlive the map it borrows from.
#[derive(Debug, Clone, Copy)]
pub struct AlphaMapRef<'a> {
    map: &'a AlphaMap,
    rect: IntRect,
}

impl<'a> AlphaMapRef<'a> {
    #[inline]
    pub fn rect(&self) -> IntRect {
        self.rect
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.rect.w() || y >= self.rect.h() {
            return None;
        }
        self.map.get(self.rect.x() + x, self.rect.y() + y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_saturates() {
        let mut m = AlphaMap::new(2, 2);
        m.set_raw(0, 0, 250);
        m.add(0, 0, 20);
        assert_eq!(m.get_raw(0, 0), 255);
    }

    #[test]
    fn out_of_bounds_add_is_noop() {
        let mut m = AlphaMap::new(2, 2);
        m.add(10, 10, 1);
        assert_eq!(m.get(10, 10), None);
    }

    #[test]
    fn sub_reference_offsets_reads() {
        let mut m = AlphaMap::new(4, 4);
        m.set_raw(2, 2, 42);
        let r = m.sub_reference(IntRect::new(IntPoint::new(2, 2), faint_geom::IntSize::new(2, 2)));
        assert_eq!(r.get(0, 0), Some(42));
    }

    #[test]
    fn sub_copy_is_detached() {
        let mut m = AlphaMap::new(4, 4);
        m.set_raw(2, 2, 42);
        let mut copy = m.sub_copy(IntRect::new(IntPoint::new(2, 2), faint_geom::IntSize::new(2, 2)));
        copy.set_raw(0, 0, 7);
        assert_eq!(m.get_raw(2, 2), 42);
    }
}

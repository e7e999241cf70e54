/// An 8-bit-per-channel color with straight (un-premultiplied) alpha.
pub type Color = rgb::RGBA8;

#[inline]
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color::new(r, g, b, a)
}

/// Fully-opaque black.
pub const BLACK: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

/// Fully-opaque white.
pub const WHITE: Color = Color {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

/// An ordered list of up to 256 colors; index -> color by position.
///
/// Produced by [`crate::AlphaMap`]-backed quantization and consumed by the
/// paletted BMP/ICO writers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    colors: Vec<Color>,
}

/// The maximum number of entries a [`ColorMap`] may hold — the addressable
/// range of an 8-bit palette index.
pub const COLOR_MAP_MAX_LEN: usize = 256;

impl ColorMap {
    pub fn new() -> Self {
        Self { colors: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            colors: Vec::with_capacity(capacity.min(COLOR_MAP_MAX_LEN)),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Append a color. Panics if the map is already at its 256-entry
    /// capacity; callers (the octree pruner) are expected to never exceed
    /// it.
    pub fn push(&mut self, color: Color) -> usize {
        assert!(self.colors.len() < COLOR_MAP_MAX_LEN, "color map is full");
        self.colors.push(color);
        self.colors.len() - 1
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    /// Build a color map directly from a caller-supplied, already-deduped
    /// list of colors, sorted for deterministic output.
    pub fn from_colors(mut colors: Vec<Color>) -> Self {
        colors.sort_unstable_by_key(|c| (c.r, c.g, c.b, c.a));
        colors.dedup();
        assert!(colors.len() <= COLOR_MAP_MAX_LEN);
        Self { colors }
    }
}

impl std::ops::Index<usize> for ColorMap {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.colors[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_index() {
        let mut map = ColorMap::new();
        let i = map.push(BLACK);
        assert_eq!(map[i], BLACK);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn from_colors_dedupes_and_sorts() {
        let map = ColorMap::from_colors(vec![WHITE, BLACK, WHITE]);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0], BLACK);
        assert_eq!(map[1], WHITE);
    }

    #[test]
    #[should_panic]
    fn push_beyond_capacity_panics() {
        let mut map = ColorMap::new();
        for i in 0..=COLOR_MAP_MAX_LEN {
            map.push(color(i as u8, 0, 0, 255));
        }
    }
}

//! Octree construction, index tables, and pruning (§4.F).
use faint_pixmap::{Bitmap, Color, ColorMap};
use faint_pool::{Pool, PoolPtr};

/// Octree depth. Levels 1 through `CQ_NLEVELS` are accumulated; levels 0
/// and `CQ_NLEVELS + 1` are never referenced, matching the source's
/// `numLevels` range of 1..=6 for the bit-interleave tables even though
/// only `CQ_NLEVELS == 5` is ever instantiated.
pub const CQ_NLEVELS: usize = 5;

/// Extra color-map slots reserved "to avoid running out" during pruning.
pub const EXTRA_RESERVED: i32 = 25;

/// Color-map slots reserved to absorb level-2 residual cubes.
pub const LEVEL2_RESERVED: i32 = 64;

const THRESHOLD_FACTOR: [f32; 6] = [0.01, 0.01, 1.0, 1.0, 1.0, 1.0];

/// Maps an 8-bit R/G/B triple to its contribution to an octcube index at a
/// given octree depth, via bit-interleaving. Only `new(CQ_NLEVELS)` is ever
/// used by the quantizer; the other depths are carried for fidelity with
/// the source, which builds the same generality.
pub struct IndexTables {
    red: [u32; 256],
    green: [u32; 256],
    blue: [u32; 256],
}

impl IndexTables {
    pub fn new(num_levels: usize) -> Self {
        assert!((1..=6).contains(&num_levels));
        let mut red = [0u32; 256];
        let mut green = [0u32; 256];
        let mut blue = [0u32; 256];
        for i in 0u32..256 {
            let (r, g, b) = match num_levels {
                1 => ((i >> 5) & 0x0004, (i >> 6) & 0x0002, i >> 7),
                2 => (
                    ((i >> 2) & 0x0020) | ((i >> 4) & 0x0004),
                    ((i >> 3) & 0x0010) | ((i >> 5) & 0x0002),
                    ((i >> 4) & 0x0008) | ((i >> 6) & 0x0001),
                ),
                3 => (
                    ((i << 1) & 0x0100) | ((i >> 1) & 0x0020) | ((i >> 3) & 0x0004),
                    (i & 0x0080) | ((i >> 2) & 0x0010) | ((i >> 4) & 0x0002),
                    ((i >> 1) & 0x0040) | ((i >> 3) & 0x0008) | ((i >> 5) & 0x0001),
                ),
                4 => (
                    ((i << 4) & 0x0800) | ((i << 2) & 0x0100) | (i & 0x0020) | ((i >> 2) & 0x0004),
                    ((i << 3) & 0x0400) | ((i << 1) & 0x0080) | ((i >> 1) & 0x0010) | ((i >> 3) & 0x0002),
                    ((i << 2) & 0x0200) | (i & 0x0040) | ((i >> 2) & 0x0008) | ((i >> 4) & 0x0001),
                ),
                5 => (
                    ((i << 7) & 0x4000) | ((i << 5) & 0x0800) | ((i << 3) & 0x0100) | ((i << 1) & 0x0020) | ((i >> 1) & 0x0004),
                    ((i << 6) & 0x2000) | ((i << 4) & 0x0400) | ((i << 2) & 0x0080) | (i & 0x0010) | ((i >> 2) & 0x0002),
                    ((i << 5) & 0x1000) | ((i << 3) & 0x0200) | ((i << 1) & 0x0040) | ((i >> 1) & 0x0008) | ((i >> 3) & 0x0001),
                ),
                6 => (
                    ((i << 10) & 0x20000) | ((i << 8) & 0x4000) | ((i << 6) & 0x0800) | ((i << 4) & 0x0100) | ((i << 2) & 0x0020) | (i & 0x0004),
                    ((i << 9) & 0x10000) | ((i << 7) & 0x2000) | ((i << 5) & 0x0400) | ((i << 3) & 0x0080) | ((i << 1) & 0x0010) | ((i >> 1) & 0x0002),
                    ((i << 8) & 0x8000) | ((i << 6) & 0x1000) | ((i << 4) & 0x0200) | ((i << 2) & 0x0040) | (i & 0x0008) | ((i >> 2) & 0x0001),
                ),
                _ => unreachable!(),
            };
            red[i as usize] = r;
            green[i as usize] = g;
            blue[i as usize] = b;
        }
        Self { red, green, blue }
    }

    #[inline]
    pub fn index_of(&self, c: Color) -> usize {
        (self.red[c.r as usize] | self.green[c.g as usize] | self.blue[c.b as usize]) as usize
    }
}

/// Reconstruct the RGB center of an octcube given its index and depth.
fn rgb_from_octcube(cube_index: u32, level: u32) -> Color {
    let mut rgb_index = cube_index << (3 * (7 - level));
    rgb_index |= 0x7 << (3 * (6 - level));
    let r = ((rgb_index >> 13) & 0x80)
        | ((rgb_index >> 11) & 0x40)
        | ((rgb_index >> 9) & 0x20)
        | ((rgb_index >> 7) & 0x10)
        | ((rgb_index >> 5) & 0x08)
        | ((rgb_index >> 3) & 0x04)
        | ((rgb_index >> 1) & 0x02);
    let g = ((rgb_index >> 12) & 0x80)
        | ((rgb_index >> 10) & 0x40)
        | ((rgb_index >> 8) & 0x20)
        | ((rgb_index >> 6) & 0x10)
        | ((rgb_index >> 4) & 0x08)
        | ((rgb_index >> 2) & 0x04)
        | (rgb_index & 0x02);
    let b = ((rgb_index >> 11) & 0x80)
        | ((rgb_index >> 9) & 0x40)
        | ((rgb_index >> 7) & 0x20)
        | ((rgb_index >> 5) & 0x10)
        | ((rgb_index >> 3) & 0x08)
        | ((rgb_index >> 1) & 0x04)
        | ((rgb_index << 1) & 0x02);
    Color::new(r as u8, g as u8, b as u8, 255)
}

#[derive(Debug, Clone, Copy, Default)]
struct ColorNode {
    center: Color,
    num_samples: i64,
    index: i32,
    num_leaves: i32,
    is_leaf: bool,
}

/// The octree itself: a [`faint_pool::Pool`]-backed arena of per-level
/// nodes, addressed by `(level, octcube index)` rather than parent/child
/// pointers — the tree is built once, walked structurally, then dropped
/// whole when the caller is done with it.
pub struct Octree {
    pool: Pool<ColorNode>,
    levels: Vec<Vec<PoolPtr>>,
    pub color_map: ColorMap,
}

impl Octree {
    fn node(&self, level: usize, index: usize) -> &ColorNode {
        &self.pool[self.levels[level][index]]
    }

    /// Walk from level 2 down to `CQ_NLEVELS`, returning the palette index
    /// and center color that `oct_index` (a level-`CQ_NLEVELS` octcube
    /// address) resolves to.
    pub fn find_node(&self, oct_index: usize) -> (i32, Color) {
        for level in 2..CQ_NLEVELS {
            let base = oct_index >> (3 * (CQ_NLEVELS - level));
            let sub = oct_index >> (3 * (CQ_NLEVELS - 1 - level));
            let node = self.node(level, base);
            let sub_node = self.node(level + 1, sub);
            if !sub_node.is_leaf {
                return (node.index, node.center);
            } else if level == CQ_NLEVELS - 1 {
                return (sub_node.index, sub_node.center);
            }
        }
        unreachable!("octree pruning guarantees a leaf is found by the bottom level")
    }

    pub fn find_index(&self, oct_index: usize) -> i32 {
        self.find_node(oct_index).0
    }
}

/// Build the octree for `bmp`, accumulating level-`CQ_NLEVELS` sample
/// counts per pixel, then pruning from level `CQ_NLEVELS - 1` down to 2.
pub fn generate_octree(bmp: &Bitmap, requested_num_colors: i32, reserved_colors: i32) -> Octree {
    assert!((128..=256).contains(&requested_num_colors));
    let tables = IndexTables::new(CQ_NLEVELS);

    let mut pool = Pool::new();
    let mut levels: Vec<Vec<PoolPtr>> = Vec::with_capacity(CQ_NLEVELS + 1);
    for level in 0..=CQ_NLEVELS {
        let num_nodes = 1usize << (3 * level);
        let mut row = Vec::with_capacity(num_nodes);
        for _ in 0..num_nodes {
            row.push(pool.allocate(ColorNode::default()));
        }
        levels.push(row);
    }
    let mut color_map = ColorMap::new();

    let mut num_pixels: i64 = i64::from(bmp.width()) * i64::from(bmp.height());
    let mut num_colors = requested_num_colors - reserved_colors - EXTRA_RESERVED;
    let mut pixels_per_cell: i64 = num_pixels / i64::from(num_colors.max(1));

    for y in 0..bmp.height() as i32 {
        for x in 0..bmp.width() as i32 {
            let oct_index = tables.index_of(bmp.get_color_raw(x, y));
            let ptr = levels[CQ_NLEVELS][oct_index];
            pool[ptr].num_samples += 1;
        }
    }

    for level in (2..CQ_NLEVELS).rev() {
        let thresh = THRESHOLD_FACTOR[level];
        let num_nodes = 1usize << (3 * level);
        for i in 0..num_nodes {
            for j in 0..8 {
                let isub = 8 * i + j;
                let sub_is_leaf = pool[levels[level + 1][isub]].is_leaf;
                if sub_is_leaf {
                    pool[levels[level][i]].num_leaves += 1;
                    continue;
                }
                let sub_samples = pool[levels[level + 1][isub]].num_samples;
                if sub_samples as f32 >= thresh * pixels_per_cell as f32 {
                    pool[levels[level + 1][isub]].is_leaf = true;
                    if color_map.len() < 256 {
                        let idx = color_map.len() as i32;
                        let rgb = rgb_from_octcube(isub as u32, (level + 1) as u32);
                        color_map.push(rgb);
                        let node = &mut pool[levels[level + 1][isub]];
                        node.index = idx;
                        node.center = rgb;
                    }
                    pool[levels[level][i]].num_leaves += 1;
                    num_pixels -= sub_samples;
                    num_colors -= 1;
                    pixels_per_cell = if num_colors > 0 {
                        num_pixels / i64::from(num_colors)
                    } else if num_colors + reserved_colors > 0 {
                        num_pixels / i64::from(num_colors + reserved_colors)
                    } else {
                        1_000_000
                    };
                }
            }
            let num_leaves = pool[levels[level][i]].num_leaves;
            if num_leaves > 0 || level == 2 {
                pool[levels[level][i]].is_leaf = true;
                if num_leaves < 8 {
                    let mut absorbed = 0i64;
                    for j in 0..8 {
                        let isub = 8 * i + j;
                        let sub = &pool[levels[level + 1][isub]];
                        if !sub.is_leaf {
                            absorbed += sub.num_samples;
                        }
                    }
                    pool[levels[level][i]].num_samples += absorbed;
                    if color_map.len() < 256 {
                        let idx = color_map.len() as i32;
                        let rgb = rgb_from_octcube(i as u32, level as u32);
                        color_map.push(rgb);
                        let node = &mut pool[levels[level][i]];
                        node.index = idx;
                        node.center = rgb;
                    }
                    let samples = pool[levels[level][i]].num_samples;
                    num_pixels -= samples;
                    num_colors -= 1;
                    pixels_per_cell = if num_colors > 0 {
                        num_pixels / i64::from(num_colors)
                    } else if num_colors + reserved_colors > 0 {
                        num_pixels / i64::from(num_colors + reserved_colors)
                    } else {
                        1_000_000
                    };
                }
            } else {
                let mut absorbed = 0i64;
                for j in 0..8 {
                    let isub = 8 * i + j;
                    absorbed += pool[levels[level + 1][isub]].num_samples;
                }
                pool[levels[level][i]].num_samples += absorbed;
            }
        }
    }

    log::trace!("octree: pruned to {} colors", color_map.len());
    Octree { pool, levels, color_map }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::color;

    #[test]
    fn index_tables_roundtrip_for_all_levels() {
        for level in 1..=6 {
            let _ = IndexTables::new(level);
        }
    }

    #[test]
    fn index_of_is_deterministic() {
        let tables = IndexTables::new(CQ_NLEVELS);
        let c = color(10, 20, 30, 255);
        assert_eq!(tables.index_of(c), tables.index_of(c));
    }

    #[test]
    fn generate_octree_on_uniform_bitmap_yields_one_color() {
        let bmp = Bitmap::new_with_color(16, 16, color(40, 80, 120, 255));
        let tree = generate_octree(&bmp, 256, LEVEL2_RESERVED);
        assert!(tree.color_map.len() >= 1);
    }
}

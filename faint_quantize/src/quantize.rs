//! Top-level quantization entry points (§4.F).
use std::collections::HashMap;

use faint_pixmap::{AlphaMap, Bitmap, Color, ColorMap};

use crate::octree::{generate_octree, IndexTables, CQ_NLEVELS, LEVEL2_RESERVED};

/// Bitmaps at or above this width or height in either dimension get
/// Floyd-Steinberg dithered quantization; smaller ones get a direct
/// nearest-cell lookup, since dithering noise is more visible (relative to
/// the image) on small images.
const DITHER_SIZE_THRESHOLD: u32 = 250;

/// Quantize `bmp` to at most 256 colors, returning the index map and the
/// palette it indexes into. Bitmaps with 256 or fewer distinct colors are
/// indexed exactly, with no quantization error; larger palettes go through
/// octree quantization, dithered for images at or above 250px in either
/// dimension.
pub fn quantized(bmp: &Bitmap) -> (AlphaMap, ColorMap) {
    if let Some(exact) = simply_index_the_colors(bmp) {
        return exact;
    }
    let tree = generate_octree(bmp, 256, LEVEL2_RESERVED);
    let tables = IndexTables::new(CQ_NLEVELS);
    let dither = bmp.width() >= DITHER_SIZE_THRESHOLD || bmp.height() >= DITHER_SIZE_THRESHOLD;
    let indices = if dither {
        apply_dithered_quantization(bmp, &tree, &tables)
    } else {
        apply_quantization(bmp, &tree, &tables)
    };
    (indices, tree.color_map)
}

/// `quantized(bmp)` applied in place: replaces `bmp`'s pixels with their
/// quantized palette colors (no index map is retained).
pub fn quantize(bmp: &mut Bitmap) {
    let (indices, palette) = quantized(bmp);
    *bmp = bitmap_from_indexed_colors(&indices, &palette);
}

/// If `bmp` has 256 or fewer distinct colors, index them directly with no
/// quantization loss; otherwise return `None`.
fn simply_index_the_colors(bmp: &Bitmap) -> Option<(AlphaMap, ColorMap)> {
    let mut seen: HashMap<Color, usize> = HashMap::new();
    let mut palette = ColorMap::new();
    for y in 0..bmp.height() as i32 {
        for x in 0..bmp.width() as i32 {
            let c = bmp.get_color_raw(x, y);
            if !seen.contains_key(&c) {
                if palette.len() >= 256 {
                    return None;
                }
                seen.insert(c, palette.push(c));
            }
        }
    }
    let mut indices = AlphaMap::new(bmp.width(), bmp.height());
    for y in 0..bmp.height() as i32 {
        for x in 0..bmp.width() as i32 {
            let idx = seen[&bmp.get_color_raw(x, y)];
            indices.set_raw(x, y, idx as u8);
        }
    }
    Some((indices, palette))
}

/// Direct nearest-cell lookup, no error diffusion.
fn apply_quantization(bmp: &Bitmap, tree: &crate::octree::Octree, tables: &IndexTables) -> AlphaMap {
    let mut out = AlphaMap::new(bmp.width(), bmp.height());
    for y in 0..bmp.height() as i32 {
        for x in 0..bmp.width() as i32 {
            let oct_index = tables.index_of(bmp.get_color_raw(x, y));
            let idx = tree.find_index(oct_index);
            out.set_raw(x, y, idx as u8);
        }
    }
    out
}

/// Floyd-Steinberg dithered quantization using two ×64-scaled row buffers
/// (the current row and the next), matching the source's fixed-point error
/// diffusion: `3/8` of the error goes east, `3/8` south, `2/8` south-east.
fn apply_dithered_quantization(bmp: &Bitmap, tree: &crate::octree::Octree, tables: &IndexTables) -> AlphaMap {
    let w = bmp.width() as usize;
    let h = bmp.height() as usize;
    let mut out = AlphaMap::new(bmp.width(), bmp.height());

    let scale = |v: u8| -> i32 { i32::from(v) * 64 };
    let mut r1: Vec<i32> = (0..w).map(|x| scale(bmp.get_color_raw(x as i32, 0).r)).collect();
    let mut g1: Vec<i32> = (0..w).map(|x| scale(bmp.get_color_raw(x as i32, 0).g)).collect();
    let mut b1: Vec<i32> = (0..w).map(|x| scale(bmp.get_color_raw(x as i32, 0).b)).collect();

    let clamp = |v: i32| v.max(0).min(16383);
    let lookup = |r: i32, g: i32, b: i32| -> (i32, Color) {
        let sample = Color::new((r / 64) as u8, (g / 64) as u8, (b / 64) as u8, 255);
        tree.find_node(tables.index_of(sample))
    };

    if h == 0 || w == 0 {
        return out;
    }

    for y in 0..h.saturating_sub(1) {
        let (mut r2, mut g2, mut b2) = (
            (0..w).map(|x| scale(bmp.get_color_raw(x as i32, y as i32 + 1).r)).collect::<Vec<_>>(),
            (0..w).map(|x| scale(bmp.get_color_raw(x as i32, y as i32 + 1).g)).collect::<Vec<_>>(),
            (0..w).map(|x| scale(bmp.get_color_raw(x as i32, y as i32 + 1).b)).collect::<Vec<_>>(),
        );

        for x in 0..w.saturating_sub(1) {
            let (idx, center) = lookup(r1[x], g1[x], b1[x]);
            out.set_raw(x as i32, y as i32, idx as u8);

            let dif_r = r1[x] / 8 - 8 * i32::from(center.r);
            let dif_g = g1[x] / 8 - 8 * i32::from(center.g);
            let dif_b = b1[x] / 8 - 8 * i32::from(center.b);

            r1[x + 1] = clamp(r1[x + 1] + 3 * dif_r);
            g1[x + 1] = clamp(g1[x + 1] + 3 * dif_g);
            b1[x + 1] = clamp(b1[x + 1] + 3 * dif_b);
            r2[x] = clamp(r2[x] + 3 * dif_r);
            g2[x] = clamp(g2[x] + 3 * dif_g);
            b2[x] = clamp(b2[x] + 3 * dif_b);
            r2[x + 1] = clamp(r2[x + 1] + 2 * dif_r);
            g2[x + 1] = clamp(g2[x + 1] + 2 * dif_g);
            b2[x + 1] = clamp(b2[x + 1] + 2 * dif_b);
        }

        // Last pixel in the row: looked up but its error is not diffused
        // anywhere, matching the source.
        let last = w - 1;
        let (idx, _) = lookup(r1[last], g1[last], b1[last]);
        out.set_raw(last as i32, y as i32, idx as u8);

        r1 = r2;
        g1 = g2;
        b1 = b2;
    }

    // Last row: no downward propagation possible, so just look each pixel up.
    for x in 0..w {
        let (idx, _) = lookup(r1[x], g1[x], b1[x]);
        out.set_raw(x as i32, (h - 1) as i32, idx as u8);
    }

    out
}

/// Reconstruct a full-color bitmap from an index map and its palette.
pub fn bitmap_from_indexed_colors(indices: &AlphaMap, palette: &ColorMap) -> Bitmap {
    let mut out = Bitmap::new(indices.width(), indices.height());
    for y in 0..indices.height() as i32 {
        for x in 0..indices.width() as i32 {
            let idx = indices.get_raw(x, y) as usize;
            let c = palette.get(idx).unwrap_or(faint_pixmap::BLACK);
            out.put_pixel_raw(x, y, c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::color;

    #[test]
    fn uniform_bitmap_quantizes_to_one_color() {
        let bmp = Bitmap::new_with_color(8, 8, color(10, 20, 30, 255));
        let (indices, palette) = quantized(&bmp);
        assert_eq!(palette.len(), 1);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(indices.get_raw(x, y), 0);
            }
        }
    }

    #[test]
    fn small_two_color_bitmap_is_indexed_exactly() {
        let mut bmp = Bitmap::new_with_color(4, 4, color(0, 0, 0, 255));
        bmp.put_pixel_raw(0, 0, color(255, 255, 255, 255));
        let (indices, palette) = quantized(&bmp);
        assert_eq!(palette.len(), 2);
        assert_ne!(indices.get_raw(0, 0), indices.get_raw(1, 1));
    }

    #[test]
    fn quantize_in_place_preserves_dimensions() {
        let mut bmp = Bitmap::new_with_color(6, 6, color(100, 150, 200, 255));
        quantize(&mut bmp);
        assert_eq!(bmp.width(), 6);
        assert_eq!(bmp.height(), 6);
    }

    #[test]
    fn large_gradient_bitmap_dithers_without_panicking() {
        let mut bmp = Bitmap::new(300, 2);
        for x in 0..300 {
            bmp.put_pixel_raw(x, 0, color((x % 256) as u8, 0, 0, 255));
            bmp.put_pixel_raw(x, 1, color(0, (x % 256) as u8, 0, 255));
        }
        let (indices, palette) = quantized(&bmp);
        assert!(palette.len() <= 256);
        assert_eq!(indices.width(), 300);
    }
}

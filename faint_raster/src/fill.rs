//! Flood fill, boundary fill, and color replace (§4.D).
use std::collections::HashSet;

use faint_geom::{IntPoint, Rect};
use faint_paint::{with_pixel_source, Paint, PixelSource};
use faint_pixmap::{Bitmap, Color};

/// Scan-line flood fill from `seed`: walk west, then east, from the seed
/// row, pushing the row above/below onto the work queue wherever it still
/// matches `target`. Terminates because a filled pixel no longer matches
/// `target`.
///
/// A solid-color fill whose color already equals `target` is a no-op: the
/// fill would never stop re-matching its own output and loop forever, so it
/// is rejected up front. A `Pattern` or `Gradient` paint samples into a
/// shadow bitmap instead of the live one, so the `target`-equality test
/// keeps reading pixels that haven't been overwritten yet even if the paint
/// happens to produce `target`'s color somewhere; the shadow is blitted
/// back onto `bmp` once the fill is complete.
pub fn flood_fill(bmp: &mut Bitmap, seed: IntPoint, paint: &Paint) {
    let target = match bmp.get_color(seed) {
        Some(c) => c,
        None => return,
    };
    if let Paint::Color(c) = paint {
        if *c == target {
            return;
        }
    }
    let bounds = Rect::new(
        faint_geom::Point::new(0.0, 0.0),
        faint_geom::Size::new(f64::from(bmp.width()), f64::from(bmp.height())),
    );
    match paint {
        Paint::Color(_) => {
            with_pixel_source(paint, bounds, |src| {
                scanline_fill(bmp, seed, src, |bmp, x, y| bmp.get_color(IntPoint::new(x, y)) == Some(target));
            });
        }
        Paint::Pattern(_) | Paint::Gradient(_) => {
            let original = bmp.deep_clone();
            let mut filled = bmp.deep_clone();
            with_pixel_source(paint, bounds, |src| {
                scanline_fill(&mut filled, seed, src, |_live, x, y| {
                    original.get_color(IntPoint::new(x, y)) == Some(target)
                });
            });
            crate::blend::blit(bmp, &filled, IntPoint::new(0, 0));
        }
    }
}

/// Like [`flood_fill`], but spreads by testing each candidate pixel against
/// `boundary` rather than matching the seed's exact color, and tracks
/// visited pixels explicitly since the fill color may itself equal
/// `boundary`. The seed pixel is always painted, even if it is itself
/// `boundary`-colored — a boundary hit in every direction immediately still
/// paints the single seed pixel (§8 concrete scenario 5).
pub fn boundary_fill(bmp: &mut Bitmap, seed: IntPoint, paint: &Paint, boundary: Color) {
    if bmp.get_color(seed).is_none() {
        return;
    }
    let bounds = Rect::new(
        faint_geom::Point::new(0.0, 0.0),
        faint_geom::Size::new(f64::from(bmp.width()), f64::from(bmp.height())),
    );
    let mut visited: HashSet<(i32, i32)> = HashSet::new();
    visited.insert((seed.x, seed.y));
    with_pixel_source(paint, bounds, |src| {
        bmp.put_pixel(seed, src.at(seed.x, seed.y));
        let spreadable = |bmp: &Bitmap, visited: &HashSet<(i32, i32)>, x: i32, y: i32| -> bool {
            if visited.contains(&(x, y)) {
                return false;
            }
            matches!(bmp.get_color(IntPoint::new(x, y)), Some(c) if c != boundary)
        };
        let mut stack: Vec<IntPoint> = Vec::new();
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let p = IntPoint::new(seed.x + dx, seed.y + dy);
            if spreadable(bmp, &visited, p.x, p.y) {
                stack.push(p);
            }
        }
        while let Some(p) = stack.pop() {
            if !spreadable(bmp, &visited, p.x, p.y) {
                continue;
            }
            visited.insert((p.x, p.y));
            bmp.put_pixel(p, src.at(p.x, p.y));
            for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let n = IntPoint::new(p.x + dx, p.y + dy);
                if spreadable(bmp, &visited, n.x, n.y) {
                    stack.push(n);
                }
            }
        }
    });
}

/// Shared scan-line walk: from `seed`, walk west then east along the row,
/// filling every pixel `should_fill` accepts, and push the rows above and
/// below onto the work queue wherever they also qualify.
fn scanline_fill(
    bmp: &mut Bitmap,
    seed: IntPoint,
    src: &dyn PixelSource,
    mut should_fill: impl FnMut(&Bitmap, i32, i32) -> bool,
) {
    if !should_fill(bmp, seed.x, seed.y) {
        return;
    }
    let mut stack = vec![seed];
    while let Some(p) = stack.pop() {
        if !should_fill(bmp, p.x, p.y) {
            continue;
        }
        let mut west = p.x;
        while should_fill(bmp, west - 1, p.y) {
            west -= 1;
        }
        let mut east = p.x;
        while should_fill(bmp, east + 1, p.y) {
            east += 1;
        }
        for x in west..=east {
            bmp.put_pixel(IntPoint::new(x, p.y), src.at(x, p.y));
            if should_fill(bmp, x, p.y - 1) {
                stack.push(IntPoint::new(x, p.y - 1));
            }
            if should_fill(bmp, x, p.y + 1) {
                stack.push(IntPoint::new(x, p.y + 1));
            }
        }
    }
}

/// Replace every pixel matching `target` (all four channels) with `paint`'s
/// sampled color.
pub fn replace_color(bmp: &mut Bitmap, target: Color, paint: &Paint) {
    let bounds = Rect::new(
        faint_geom::Point::new(0.0, 0.0),
        faint_geom::Size::new(f64::from(bmp.width()), f64::from(bmp.height())),
    );
    with_pixel_source(paint, bounds, |src| {
        for y in 0..bmp.height() as i32 {
            for x in 0..bmp.width() as i32 {
                if bmp.get_color_raw(x, y) == target {
                    bmp.put_pixel_raw(x, y, src.at(x, y));
                }
            }
        }
    });
}

/// Replace every pixel that does *not* match `keep` with `paint`'s sampled
/// color — the inverse selection used by `erase_but`.
pub fn erase_but(bmp: &mut Bitmap, keep: Color, paint: &Paint) {
    let bounds = Rect::new(
        faint_geom::Point::new(0.0, 0.0),
        faint_geom::Size::new(f64::from(bmp.width()), f64::from(bmp.height())),
    );
    with_pixel_source(paint, bounds, |src| {
        for y in 0..bmp.height() as i32 {
            for x in 0..bmp.width() as i32 {
                if bmp.get_color_raw(x, y) != keep {
                    bmp.put_pixel_raw(x, y, src.at(x, y));
                }
            }
        }
    });
}

/// Overwrite every pixel's alpha channel with `alpha`, leaving RGB intact.
pub fn set_alpha(bmp: &mut Bitmap, alpha: u8) {
    for y in 0..bmp.height() as i32 {
        for x in 0..bmp.width() as i32 {
            let mut c = bmp.get_color_raw(x, y);
            c.a = alpha;
            bmp.put_pixel_raw(x, y, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faint_pixmap::WHITE;

    #[test]
    fn flood_fill_whole_bitmap() {
        let mut bmp = Bitmap::new_with_color(3, 3, WHITE);
        flood_fill(&mut bmp, IntPoint::new(1, 1), &Paint::Color(faint_pixmap::color(255, 0, 0, 255)));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(bmp.get_color_raw(x, y), faint_pixmap::color(255, 0, 0, 255));
            }
        }
    }

    #[test]
    fn flood_fill_with_seed_color_is_a_noop_not_a_hang() {
        let mut bmp = Bitmap::new_with_color(5, 5, WHITE);
        flood_fill(&mut bmp, IntPoint::new(2, 2), &Paint::Color(WHITE));
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(bmp.get_color_raw(x, y), WHITE);
            }
        }
    }

    #[test]
    fn flood_fill_with_pattern_containing_target_color_terminates_and_fills() {
        use faint_paint::Pattern;
        use std::sync::Arc;

        // The pattern's own bitmap contains the seed's target color (WHITE)
        // at one texel; since the fill writes into a shadow copy and only
        // tests the untouched original, this must still terminate and paint
        // the whole bitmap rather than looping on a color it just wrote.
        let mut tile = Bitmap::new_with_color(2, 2, faint_pixmap::color(0, 0, 0, 255));
        tile.put_pixel_raw(0, 0, WHITE);
        let pattern = Pattern::new(Arc::new(tile), IntPoint::new(0, 0));

        let mut bmp = Bitmap::new_with_color(4, 4, WHITE);
        flood_fill(&mut bmp, IntPoint::new(1, 1), &Paint::Pattern(pattern));

        assert_eq!(bmp.get_color_raw(0, 0), WHITE);
        assert_eq!(bmp.get_color_raw(1, 0), faint_pixmap::color(0, 0, 0, 255));
    }

    #[test]
    fn boundary_fill_stops_at_boundary_immediately() {
        let mut bmp = Bitmap::new_with_color(3, 3, WHITE);
        boundary_fill(
            &mut bmp,
            IntPoint::new(1, 1),
            &Paint::Color(faint_pixmap::color(255, 0, 0, 255)),
            WHITE,
        );
        assert_eq!(bmp.get_color_raw(1, 1), faint_pixmap::color(255, 0, 0, 255));
        assert_eq!(bmp.get_color_raw(0, 0), WHITE);
    }

    #[test]
    fn replace_color_matches_exact_channels() {
        let mut bmp = Bitmap::new_with_color(2, 2, WHITE);
        replace_color(&mut bmp, WHITE, &Paint::Color(faint_pixmap::color(1, 2, 3, 255)));
        assert_eq!(bmp.get_color_raw(0, 0), faint_pixmap::color(1, 2, 3, 255));
    }

    #[test]
    fn set_alpha_preserves_rgb() {
        let mut bmp = Bitmap::new_with_color(2, 2, WHITE);
        set_alpha(&mut bmp, 128);
        let c = bmp.get_color_raw(0, 0);
        assert_eq!((c.r, c.g, c.b, c.a), (255, 255, 255, 128));
    }
}

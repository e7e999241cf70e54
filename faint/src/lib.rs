//! Faint's graphics core (§2): geometric primitives, the pixel substrate,
//! the rasterization engine, affine/resampling transforms, octree
//! quantization, paint dispatch, and the MSW BMP/ICO/CUR codecs.
//!
//! This crate re-exports its constituent crates' public surfaces under one
//! name; `faint::prelude::*` brings in the whole API surface listed in §6.
pub use faint_fp;
pub use faint_geom;
pub use faint_msw;
pub use faint_paint;
pub use faint_pixmap;
pub use faint_quantize;
pub use faint_raster;

pub mod prelude {
    #[doc(no_inline)]
    pub use faint_geom::prelude::*;
    #[doc(no_inline)]
    pub use faint_geom::{IntPoint, IntRect, IntSize, Line, LineSegment, ParallelLines, Point, Tri};
    #[doc(no_inline)]
    pub use faint_msw::{
        read_bmp, read_cur, read_ico, write_bmp, write_cur, write_ico, BitmapQuality, Error as MswError,
    };
    #[doc(no_inline)]
    pub use faint_paint::*;
    #[doc(no_inline)]
    pub use faint_pixmap::{
        count_colors, get_palette, inside, AlphaMap, AlphaMapRef, Bitmap, Color, ColorMap, Offsat,
        BLACK, WHITE,
    };
    #[doc(no_inline)]
    pub use faint_quantize::{bitmap_from_indexed_colors, quantize, quantized};
    #[doc(no_inline)]
    pub use faint_raster::{
        alpha_blended, blend, blend_masked, blit, blit_masked, boundary_fill, draw_ellipse, draw_line,
        draw_polygon, draw_polyline, draw_rect, erase_but, fill_ellipse, fill_polygon, fill_rect,
        fill_triangle, flip, flood_fill, replace_color, rotate, rotate_90cw, scale_bilinear,
        scale_nearest, set_alpha, subbitmap_scale, FlipAxis, LineCap, LineStyle,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_wires_up_a_draw_and_quantize_round_trip() {
        let mut bmp = Bitmap::new_with_color(4, 4, BLACK);
        let paint: Paint = WHITE.into();
        draw_line(&mut bmp, IntPoint::new(0, 0), IntPoint::new(3, 0), &paint, LineStyle::default());
        let (indices, palette) = quantized(&bmp);
        assert!(palette.len() <= 2);
        assert_eq!(indices.width(), 4);
    }
}

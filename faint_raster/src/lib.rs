//! The rasterization engine (§4.D) and affine/resampling transforms (§4.E).
mod affine;
mod blend;
mod ellipse;
mod fill;
mod line;
mod plot;
mod polygon;
mod rect;
mod style;
mod triangle;

pub use affine::{flip, rotate, rotate_90cw, scale_bilinear, scale_nearest, subbitmap_scale, FlipAxis};
pub use blend::{alpha_blended, blend, blend_color, blend_masked, blit, blit_masked};
pub use ellipse::{draw_ellipse, fill_ellipse};
pub use fill::{boundary_fill, erase_but, flood_fill, replace_color, set_alpha};
pub use line::{draw_line, draw_polyline, line_circle};
pub use polygon::{draw_polygon, fill_polygon};
pub use rect::{draw_rect, fill_rect};
pub use style::{LineCap, LineStyle};
pub use triangle::fill_triangle;

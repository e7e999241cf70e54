use faint_pixmap::Color;

/// The canvas alignment grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub spacing: u32,
    pub enabled: bool,
    pub visible: bool,
    pub dashed: bool,
    pub color: Color,
}

impl Grid {
    /// Panics if `spacing == 0` — a zero-spaced grid has no meaning.
    pub fn new(spacing: u32, color: Color) -> Self {
        assert!(spacing >= 1, "grid spacing must be at least 1");
        Self {
            spacing,
            enabled: true,
            visible: true,
            dashed: false,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn zero_spacing_panics() {
        Grid::new(0, Color::new(0, 0, 0, 255));
    }
}

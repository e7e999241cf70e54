/// The cap style applied to the open ends of a line or polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    /// No extension past the endpoint.
    Butt,
    /// A filled disc of diameter `lineWidth` stamped at the endpoint.
    Round,
}

/// Stroke parameters shared by every line-like primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub cap: LineCap,
    pub dashed: bool,
}

impl LineStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
            dashed: false,
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

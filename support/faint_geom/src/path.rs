use crate::{Point, Tri};

/// A single segment of a vector path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathPt {
    MoveTo(Point),
    LineTo(Point),
    CubicBezier { c1: Point, c2: Point, to: Point },
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

/// A restartable ordered sequence of anchor points tied to a reference
/// [`Tri`].
///
/// Points are stored in the Tri's local, unit-square coordinate space (so
/// that resizing the referenced object re-derives every anchor without
/// mutating the sequence) and projected into world space on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Points {
    /// Anchor points expressed as `(u, v)` fractions of the reference Tri's
    /// two edges.
    local: Vec<(f64, f64)>,
}

impl Points {
    pub fn new() -> Self {
        Self { local: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    /// Append an anchor given its world-space position under `reference`.
    pub fn push(&mut self, p: Point, reference: &Tri) {
        self.local.push(to_local(p, reference));
    }

    /// Set the anchor at `index` given its world-space position under
    /// `reference`. Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, p: Point, reference: &Tri) {
        self.local[index] = to_local(p, reference);
    }

    /// Insert an anchor at `index` given its world-space position under
    /// `reference`.
    pub fn insert(&mut self, index: usize, p: Point, reference: &Tri) {
        self.local.insert(index, to_local(p, reference));
    }

    /// Remove the anchor at `index`, returning its world-space position
    /// under `reference`.
    pub fn remove(&mut self, index: usize, reference: &Tri) -> Point {
        let (u, v) = self.local.remove(index);
        from_local(u, v, reference)
    }

    /// World-space positions of every anchor under `reference`.
    pub fn world_points(&self, reference: &Tri) -> Vec<Point> {
        self.local
            .iter()
            .map(|&(u, v)| from_local(u, v, reference))
            .collect()
    }
}

fn to_local(p: Point, reference: &Tri) -> (f64, f64) {
    let ex = reference.p1 - reference.p0;
    let ey = reference.p2 - reference.p0;
    let det = ex.x * ey.y - ex.y * ey.x;
    if det.abs() < crate::COORD_EPSILON {
        return (0.0, 0.0);
    }
    let d = p - reference.p0;
    let u = (d.x * ey.y - d.y * ey.x) / det;
    let v = (ex.x * d.y - ex.y * d.x) / det;
    (u, v)
}

fn from_local(u: f64, v: f64, reference: &Tri) -> Point {
    let ex = reference.p1 - reference.p0;
    let ey = reference.p2 - reference.p0;
    reference.p0 + ex * u + ey * v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_local_space() {
        let tri = Tri::from_rect(Point::new(0.0, 0.0), 10.0, 20.0);
        let mut points = Points::new();
        points.push(Point::new(5.0, 10.0), &tri);
        let world = points.world_points(&tri);
        assert!((world[0].x - 5.0).abs() < 1e-9);
        assert!((world[0].y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn tracks_reshaping_of_the_reference_tri() {
        let tri = Tri::from_rect(Point::new(0.0, 0.0), 10.0, 10.0);
        let mut points = Points::new();
        points.push(Point::new(5.0, 5.0), &tri);

        let bigger = tri.scaled(crate::Scale::uniform(2.0), tri.p0);
        let world = points.world_points(&bigger);
        assert!((world[0].x - 10.0).abs() < 1e-9);
        assert!((world[0].y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn insert_and_remove() {
        let tri = Tri::from_rect(Point::new(0.0, 0.0), 10.0, 10.0);
        let mut points = Points::new();
        points.push(Point::new(1.0, 1.0), &tri);
        points.push(Point::new(3.0, 3.0), &tri);
        points.insert(1, Point::new(2.0, 2.0), &tri);
        assert_eq!(points.len(), 3);
        let removed = points.remove(1, &tri);
        assert!((removed.x - 2.0).abs() < 1e-9);
        assert_eq!(points.len(), 2);
    }
}

//! Editor shapes and derived validity.
//!
//! A floorplan is an ordered list of `Shape`s: closed boundaries (`Polygon2`)
//! and open walls (`Segment2`). List order is z-order; later entries are drawn
//! on top and win ties during hit-testing.
//!
//! Validity is derived, never enforced: a polygon is invalid iff two of its
//! non-adjacent edges meet (cross, touch or overlap) or it properly crosses
//! another polygon of the list. Invalid shapes stay in the list and surface as
//! `Status::Error`.

use serde::Serialize;

use crate::geom2::{Bbox2, Point2, Polygon2, Segment2};

/// Tagged shape variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Segment(Segment2),
    Polygon(Polygon2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Segment,
    Polygon,
}

impl Shape {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Segment(_) => ShapeKind::Segment,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    #[inline]
    pub fn as_polygon(&self) -> Option<&Polygon2> {
        match self {
            Shape::Polygon(p) => Some(p),
            Shape::Segment(_) => None,
        }
    }

    #[inline]
    pub fn as_segment(&self) -> Option<&Segment2> {
        match self {
            Shape::Segment(s) => Some(s),
            Shape::Polygon(_) => None,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        match self {
            Shape::Segment(_) => 2,
            Shape::Polygon(p) => p.len(),
        }
    }

    /// Vertex at `index` modulo the vertex count.
    #[inline]
    pub fn vertex(&self, index: usize) -> Point2 {
        match self {
            Shape::Segment(s) => {
                if index % 2 == 0 {
                    s.a
                } else {
                    s.b
                }
            }
            Shape::Polygon(p) => p.vertex(index),
        }
    }

    pub fn vertices(&self) -> Vec<Point2> {
        match self {
            Shape::Segment(s) => vec![s.a, s.b],
            Shape::Polygon(p) => p.vertices().to_vec(),
        }
    }

    /// Move the vertex at `index` (modulo the vertex count).
    pub fn update_vertex(&mut self, index: usize, p: Point2) {
        match self {
            Shape::Segment(s) => {
                if index % 2 == 0 {
                    s.a = p;
                } else {
                    s.b = p;
                }
            }
            Shape::Polygon(poly) => poly.update(index, p),
        }
    }

    /// Boundary segments: the segment itself, or the polygon's closed edge loop.
    pub fn edges(&self) -> Vec<Segment2> {
        match self {
            Shape::Segment(s) => vec![*s],
            Shape::Polygon(p) => p.edges().collect(),
        }
    }

    pub fn bbox(&self) -> Bbox2 {
        match self {
            Shape::Segment(s) => Bbox2::from_points(&[s.a, s.b]),
            Shape::Polygon(p) => p.bbox(),
        }
    }
}

/// Editor-level validity summary, ordered by severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok = 0,
    Warning = 1,
    Error = 2,
}

impl Status {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Most severe status of `statuses`; `Ok` for none.
    pub fn worst<I: IntoIterator<Item = Status>>(statuses: I) -> Status {
        statuses.into_iter().max().unwrap_or(Status::Ok)
    }
}

/// Anything that reports a `Status` to the surrounding UI.
pub trait Statused {
    fn status(&self) -> Status;
}

/// Polygons of `shapes` other than the one at `skip`.
fn other_polygons(shapes: &[Shape], skip: Option<usize>) -> impl Iterator<Item = &Polygon2> {
    shapes
        .iter()
        .enumerate()
        .filter(move |(i, _)| Some(*i) != skip)
        .filter_map(|(_, s)| s.as_polygon())
}

/// `poly` intersects itself or crosses any polygon in `others`.
pub fn polygon_invalid<'a, I>(poly: &Polygon2, others: I, eps: f64) -> bool
where
    I: IntoIterator<Item = &'a Polygon2>,
{
    poly.is_self_intersecting_eps(eps) || others.into_iter().any(|o| poly.intersects_eps(o, eps))
}

/// The shape at `index` is an invalid polygon. Segments are never invalid.
pub fn is_invalid(shapes: &[Shape], index: usize, eps: f64) -> bool {
    match shapes.get(index) {
        Some(Shape::Polygon(p)) => polygon_invalid(p, other_polygons(shapes, Some(index)), eps),
        _ => false,
    }
}

/// Per-edge flags for `poly`: edge `i` is set when it meets a non-adjacent
/// edge of `poly` (crossing or touching) or crosses any edge of a polygon in
/// `others`.
pub fn invalid_edges<'a, I>(poly: &Polygon2, others: I, eps: f64) -> Vec<bool>
where
    I: IntoIterator<Item = &'a Polygon2>,
{
    let n = poly.len();
    let mut flags = vec![false; n];
    for i in 0..n {
        let ei = poly.edge(i);
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if ei.touches(&poly.edge(j), eps) {
                flags[i] = true;
                flags[j] = true;
            }
        }
    }
    for other in others {
        if !poly.bbox().overlaps(&other.bbox()) {
            continue;
        }
        for (i, flag) in flags.iter_mut().enumerate() {
            let ei = poly.edge(i);
            if other.edges().any(|f| ei.crosses(&f, eps)) {
                *flag = true;
            }
        }
    }
    flags
}

/// Edge flags for the shape at `index` (all clear for segments).
pub fn invalid_edges_of(shapes: &[Shape], index: usize, eps: f64) -> Vec<bool> {
    match shapes.get(index) {
        Some(Shape::Polygon(p)) => invalid_edges(p, other_polygons(shapes, Some(index)), eps),
        Some(Shape::Segment(_)) => vec![false],
        None => Vec::new(),
    }
}

/// `Warning` while no polygon exists, `Error` if any polygon is invalid, else `Ok`.
pub fn status_of(shapes: &[Shape], eps: f64) -> Status {
    if !shapes.iter().any(|s| s.kind() == ShapeKind::Polygon) {
        return Status::Warning;
    }
    if (0..shapes.len()).any(|i| is_invalid(shapes, i, eps)) {
        Status::Error
    } else {
        Status::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Polygon(Polygon2::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]))
    }

    #[test]
    fn status_follows_polygon_presence_and_validity() {
        let wall = Shape::Segment(Segment2::new(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0)));
        assert_eq!(status_of(&[], 1e-9), Status::Warning);
        assert_eq!(status_of(&[wall.clone()], 1e-9), Status::Warning);
        let shapes = vec![rect(0.0, 0.0, 10.0, 10.0), wall.clone()];
        assert_eq!(status_of(&shapes, 1e-9), Status::Ok);
        let overlapping = vec![rect(0.0, 0.0, 10.0, 10.0), rect(5.0, 5.0, 15.0, 15.0), wall];
        assert_eq!(status_of(&overlapping, 1e-9), Status::Error);
        assert!(is_invalid(&overlapping, 0, 1e-9));
        assert!(is_invalid(&overlapping, 1, 1e-9));
        assert!(!is_invalid(&overlapping, 2, 1e-9));
    }

    #[test]
    fn adjacent_rooms_stay_valid() {
        let shapes = vec![rect(0.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 20.0, 10.0)];
        assert_eq!(status_of(&shapes, 1e-9), Status::Ok);
    }

    #[test]
    fn invalid_edges_flag_crossings_only() {
        let bowtie = Polygon2::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ]);
        assert_eq!(
            invalid_edges(&bowtie, std::iter::empty(), 1e-9),
            vec![true, false, true, false]
        );

        let shapes = vec![rect(0.0, 0.0, 10.0, 10.0), rect(5.0, -5.0, 15.0, 5.0)];
        // bottom edge of the first square is crossed by the second's left edge,
        // the right edge by its top edge
        assert_eq!(
            invalid_edges_of(&shapes, 0, 1e-9),
            vec![true, true, false, false]
        );
    }

    #[test]
    fn invalid_edges_flag_touching_edges_of_the_same_polygon() {
        // vertex (5, 0) rests on the bottom edge
        let t = Polygon2::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(5.0, 0.0),
        ]);
        assert_eq!(
            invalid_edges(&t, std::iter::empty(), 1e-9),
            vec![true, false, true, false]
        );
        let shapes = vec![Shape::Polygon(t)];
        assert!(is_invalid(&shapes, 0, 1e-9));
        assert_eq!(status_of(&shapes, 1e-9), Status::Error);

        // the same contact between two rooms is fine
        let shapes = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            Shape::Polygon(Polygon2::new(vec![
                Point2::new(5.0, 10.0),
                Point2::new(8.0, 20.0),
                Point2::new(2.0, 20.0),
            ])),
        ];
        assert_eq!(status_of(&shapes, 1e-9), Status::Ok);
    }

    #[test]
    fn status_ordering_and_worst() {
        assert!(Status::Error > Status::Warning && Status::Warning > Status::Ok);
        assert_eq!(Status::worst([Status::Ok, Status::Error, Status::Warning]), Status::Error);
        assert_eq!(Status::worst([]), Status::Ok);
        assert_eq!(Status::Warning.code(), 1);
    }

    #[test]
    fn segment_vertex_access_wraps() {
        let mut s = Shape::Segment(Segment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)));
        assert_eq!(s.vertex(3), Point2::new(1.0, 0.0));
        s.update_vertex(2, Point2::new(-1.0, 0.0));
        assert_eq!(s.vertex(0), Point2::new(-1.0, 0.0));
        assert_eq!(s.edges().len(), 1);
    }
}

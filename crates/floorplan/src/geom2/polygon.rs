//! Closed polygons (vertex representation) and axis-aligned bounding boxes.
//!
//! Conventions
//! - `Polygon2` is implicitly closed: edge `i` runs from vertex `i` to vertex
//!   `i + 1 (mod n)`.
//! - Simplicity is not an invariant of the type. Editors keep self-intersecting
//!   in-progress states around and flag them; see `is_self_intersecting`.
//! - Containment follows the winding-number rule. `winding_number` uses the
//!   half-open crossing rule and makes no promise for points on the boundary;
//!   `contains_eps` counts the boundary (within `eps`) as inside.

use super::segment::Segment2;
use super::types::{orient, GeomCfg, Point2};

/// Closed polygon with at least three vertices after any commit.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon2 {
    vertices: Vec<Point2>,
}

impl Polygon2 {
    /// Wraps `vertices` without checks; callers hand in ≥3 vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// `None` for fewer than three vertices.
    pub fn try_new(vertices: Vec<Point2>) -> Option<Self> {
        (vertices.len() >= 3).then(|| Self::new(vertices))
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn into_vertices(self) -> Vec<Point2> {
        self.vertices
    }

    /// Vertex at `index` modulo the vertex count.
    #[inline]
    pub fn vertex(&self, index: usize) -> Point2 {
        self.vertices[index % self.vertices.len()]
    }

    /// Edge from vertex `index` to its successor.
    #[inline]
    pub fn edge(&self, index: usize) -> Segment2 {
        Segment2::new(self.vertex(index), self.vertex(index + 1))
    }

    /// Boundary segments in order, wrapping from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = Segment2> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment2::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed number of turns the boundary makes around `p`.
    pub fn winding_number(&self, p: Point2) -> i32 {
        let mut winding = 0;
        for e in self.edges() {
            if e.a.y <= p.y {
                if e.b.y > p.y && orient(e.a, e.b, p) > 0.0 {
                    winding += 1;
                }
            } else if e.b.y <= p.y && orient(e.a, e.b, p) < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    /// Inside by winding number, or within `eps` of the boundary.
    pub fn contains_eps(&self, p: Point2, eps: f64) -> bool {
        self.winding_number(p) != 0 || self.edges().any(|e| e.distance_squared(p) <= eps * eps)
    }

    /// Shorthand for `contains_eps(p, GeomCfg::default().eps)`.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        self.contains_eps(p, GeomCfg::default().eps)
    }

    /// True if two non-adjacent edges meet: crossing, touching or overlapping
    /// within `eps`. Adjacent edges share a vertex and are skipped.
    pub fn is_self_intersecting_eps(&self, eps: f64) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return false;
        }
        for i in 0..n {
            let ei = self.edge(i);
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if ei.touches(&self.edge(j), eps) {
                    return true;
                }
            }
        }
        false
    }

    #[inline]
    pub fn is_self_intersecting(&self) -> bool {
        self.is_self_intersecting_eps(GeomCfg::default().eps)
    }

    /// True if any edge of `self` properly crosses any edge of `other`.
    /// Shared vertices and shared walls do not count.
    pub fn intersects_eps(&self, other: &Polygon2, eps: f64) -> bool {
        if !self.bbox().overlaps(&other.bbox()) {
            return false;
        }
        self.edges()
            .any(|e| other.edges().any(|f| e.crosses(&f, eps)))
    }

    #[inline]
    pub fn intersects(&self, other: &Polygon2) -> bool {
        self.intersects_eps(other, GeomCfg::default().eps)
    }

    /// Insert `p` before the vertex at `index` (modulo the vertex count).
    pub fn insert(&mut self, index: usize, p: Point2) {
        if self.vertices.is_empty() {
            self.vertices.push(p);
            return;
        }
        let at = index % self.vertices.len();
        self.vertices.insert(at, p);
    }

    /// Remove the vertex at `index` (modulo the vertex count). Rejected (returns
    /// `None`) when the polygon would drop below three vertices.
    pub fn remove(&mut self, index: usize) -> Option<Point2> {
        if self.vertices.len() <= 3 {
            return None;
        }
        let at = index % self.vertices.len();
        Some(self.vertices.remove(at))
    }

    /// Move the vertex at `index` (modulo the vertex count) to `p`.
    pub fn update(&mut self, index: usize, p: Point2) {
        if self.vertices.is_empty() {
            return;
        }
        let at = index % self.vertices.len();
        self.vertices[at] = p;
    }

    #[inline]
    pub fn bbox(&self) -> Bbox2 {
        Bbox2::from_points(&self.vertices)
    }
}

/// Axis-aligned bounding box `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox2 {
    pub min: Point2,
    pub max: Point2,
}

impl Bbox2 {
    #[inline]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest box around `points`; an empty slice yields an inverted (empty) box.
    pub fn from_points(points: &[Point2]) -> Self {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
    #[inline]
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    #[inline]
    pub fn contains_point(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// `other` lies within `self` (boundaries included).
    #[inline]
    pub fn contains_box(&self, other: &Bbox2) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    #[inline]
    pub fn overlaps(&self, other: &Bbox2) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Clamp `p` into the box.
    #[inline]
    pub fn clamp(&self, p: Point2) -> Point2 {
        Point2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }
}

//! Hover / hit-test resolution.
//!
//! Priority (strict):
//! 1. Vertex: the first shape in list order owning a vertex within `magnetism`
//!    (ties by list order, then vertex order; distance is not compared).
//! 2. Edge, only when `edges` is set: the globally nearest polygon edge within
//!    `magnetism` (smallest squared distance; equal distances keep the earlier edge).
//! 3. Body: a segment within `magnetism` (later segments win), otherwise the
//!    most deeply nested polygon containing the cursor.
//!
//! The `exclude`d shape (the one being dragged) is invisible to all three tests.
//! The resolver only reads the shape list.

use crate::geom2::{Bbox2, Point2};
use crate::shape::Shape;

/// What lies under the cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Hover {
    #[default]
    None,
    Vertex {
        shape: usize,
        vertex: usize,
    },
    /// Polygon edge `edge` (vertex `edge` → `edge + 1`), with the clamped
    /// projection of the cursor onto it.
    Edge {
        shape: usize,
        edge: usize,
        point: Point2,
    },
    Shape {
        shape: usize,
    },
}

impl Hover {
    #[inline]
    pub fn shape(&self) -> Option<usize> {
        match *self {
            Hover::None => None,
            Hover::Vertex { shape, .. } | Hover::Edge { shape, .. } | Hover::Shape { shape } => {
                Some(shape)
            }
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Hover::None)
    }
}

/// Read-only view over a shape list for hit-testing.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    pub shapes: &'a [Shape],
    /// Tolerance in floorplan pixels (already divided by zoom).
    pub magnetism: f64,
    /// Evaluate edge hits (edge/insert modifier held).
    pub edges: bool,
    pub exclude: Option<usize>,
}

impl<'a> Resolver<'a> {
    pub fn new(shapes: &'a [Shape], magnetism: f64) -> Self {
        Self {
            shapes,
            magnetism,
            edges: false,
            exclude: None,
        }
    }

    pub fn with_edges(mut self, edges: bool) -> Self {
        self.edges = edges;
        self
    }

    pub fn excluding(mut self, exclude: Option<usize>) -> Self {
        self.exclude = exclude;
        self
    }

    fn candidates(&self) -> impl Iterator<Item = (usize, &'a Shape)> + '_ {
        let exclude = self.exclude;
        self.shapes
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != exclude)
    }

    pub fn resolve(&self, cursor: Point2) -> Hover {
        if let Some((shape, vertex)) = self.vertex_hit(cursor) {
            return Hover::Vertex { shape, vertex };
        }
        if self.edges {
            if let Some((shape, edge, point)) = self.nearest_edge(cursor) {
                return Hover::Edge { shape, edge, point };
            }
        }
        match self.body_hit(cursor) {
            Some(shape) => Hover::Shape { shape },
            None => Hover::None,
        }
    }

    /// First shape (list order) with a vertex within `magnetism`.
    pub fn vertex_hit(&self, cursor: Point2) -> Option<(usize, usize)> {
        let r2 = self.magnetism * self.magnetism;
        for (i, shape) in self.candidates() {
            for k in 0..shape.vertex_count() {
                if (shape.vertex(k) - cursor).norm_squared() <= r2 {
                    return Some((i, k));
                }
            }
        }
        None
    }

    /// Nearest polygon edge within `magnetism`: `(shape, edge, projected point)`.
    pub fn nearest_edge(&self, cursor: Point2) -> Option<(usize, usize, Point2)> {
        let mut best: Option<(usize, usize, Point2)> = None;
        let mut best_d2 = self.magnetism * self.magnetism;
        for (i, shape) in self.candidates() {
            let Some(poly) = shape.as_polygon() else {
                continue;
            };
            for (k, e) in poly.edges().enumerate() {
                let p = e.project(cursor, true);
                let d2 = (p - cursor).norm_squared();
                if d2 < best_d2 || (best.is_none() && d2 <= best_d2) {
                    best_d2 = d2;
                    best = Some((i, k, p));
                }
            }
        }
        best
    }

    /// Segment within `magnetism` (top-most), else the most nested containing polygon.
    pub fn body_hit(&self, cursor: Point2) -> Option<usize> {
        let r2 = self.magnetism * self.magnetism;
        let mut segment: Option<usize> = None;
        let mut polygon: Option<(usize, Bbox2)> = None;
        for (i, shape) in self.candidates() {
            match shape {
                Shape::Segment(s) => {
                    if s.distance_squared(cursor) <= r2 {
                        segment = Some(i);
                    }
                }
                Shape::Polygon(p) => {
                    if !p.contains(cursor) {
                        continue;
                    }
                    let bbox = p.bbox();
                    match polygon {
                        Some((_, best)) if !best.contains_box(&bbox) => {}
                        _ => polygon = Some((i, bbox)),
                    }
                }
            }
        }
        segment.or(polygon.map(|(i, _)| i))
    }
}

/// One-shot resolution; see [`Resolver`].
pub fn resolve(
    cursor: Point2,
    shapes: &[Shape],
    magnetism: f64,
    edges: bool,
    exclude: Option<usize>,
) -> Hover {
    Resolver::new(shapes, magnetism)
        .with_edges(edges)
        .excluding(exclude)
        .resolve(cursor)
}

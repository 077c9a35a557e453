//! Segments and rays.
//!
//! `Segment2` is a closed segment between two ordered endpoints. `Ray2` starts at
//! `source` and passes through `through`; it is unbounded in that direction.

use super::types::{cross, orient, Angle2, Point2, Vector2};

/// Closed segment `[a, b]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2 {
    pub a: Point2,
    pub b: Point2,
}

impl Segment2 {
    #[inline]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn vector(&self) -> Vector2 {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.a, &self.b)
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Closest point on the supporting line; restricted to `[a, b]` when `clamp` is set.
    /// A zero-length segment projects everything onto `a`.
    pub fn project(&self, p: Point2, clamp: bool) -> Point2 {
        let d = self.vector();
        let len2 = d.norm_squared();
        if len2 == 0.0 {
            return self.a;
        }
        let mut t = (p - self.a).dot(&d) / len2;
        if clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.a + d * t
    }

    #[inline]
    pub fn distance_squared(&self, p: Point2) -> f64 {
        (p - self.project(p, true)).norm_squared()
    }

    #[inline]
    pub fn distance(&self, p: Point2) -> f64 {
        self.distance_squared(p).sqrt()
    }

    /// Intersection with `ray`, or `None` when parallel or when the hit lies
    /// behind the ray source or outside `[a, b]`.
    pub fn intersect(&self, ray: &Ray2) -> Option<Point2> {
        let d = ray.direction();
        let e = self.vector();
        let denom = cross(d, e);
        // relative threshold so that pixel and degree scales behave the same
        if denom.abs() <= 1e-12 * d.norm() * e.norm() {
            return None;
        }
        let w = self.a - ray.source;
        let t = cross(w, e) / denom;
        let u = cross(w, d) / denom;
        let slack = 1e-12;
        if t < -slack || !(-slack..=1.0 + slack).contains(&u) {
            return None;
        }
        Some(self.a + e * u.clamp(0.0, 1.0))
    }

    /// Proper crossing: each segment's endpoints lie strictly on opposite sides
    /// of the other (beyond `eps`). Touching endpoints and collinear overlap do
    /// not count.
    pub fn crosses(&self, other: &Segment2, eps: f64) -> bool {
        let o1 = orient(self.a, self.b, other.a);
        let o2 = orient(self.a, self.b, other.b);
        let o3 = orient(other.a, other.b, self.a);
        let o4 = orient(other.a, other.b, self.b);
        straddles(o1, o2, eps) && straddles(o3, o4, eps)
    }

    /// Closed-segment intersection: a proper crossing, or an endpoint of either
    /// segment within `eps` of the other. Covers T-junctions, shared endpoints
    /// and collinear overlap.
    pub fn touches(&self, other: &Segment2, eps: f64) -> bool {
        let e2 = eps * eps;
        self.crosses(other, eps)
            || other.distance_squared(self.a) <= e2
            || other.distance_squared(self.b) <= e2
            || self.distance_squared(other.a) <= e2
            || self.distance_squared(other.b) <= e2
    }
}

#[inline]
fn straddles(p: f64, q: f64, eps: f64) -> bool {
    (p > eps && q < -eps) || (p < -eps && q > eps)
}

/// Ray from `source` through `through`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray2 {
    pub source: Point2,
    pub through: Point2,
}

impl Ray2 {
    #[inline]
    pub fn new(source: Point2, through: Point2) -> Self {
        Self { source, through }
    }

    /// Unit-length ray leaving `source` along `angle`.
    #[inline]
    pub fn from_angle(source: Point2, angle: &Angle2) -> Self {
        Self::new(source, source + angle.unit())
    }

    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.through - self.source
    }

    /// Closest point on the ray (never behind `source`).
    pub fn project(&self, p: Point2) -> Point2 {
        let d = self.direction();
        let len2 = d.norm_squared();
        if len2 == 0.0 {
            return self.source;
        }
        let t = ((p - self.source).dot(&d) / len2).max(0.0);
        self.source + d * t
    }
}

//! Basic 2D value types and tolerances.
//!
//! - `GeomCfg`: centralizes epsilons for determinant and incidence checks.
//! - `Point2`, `Vector2`: nalgebra aliases; the same point type carries floorplan
//!   pixels `(x, y)` and geographic `(lng, lat)` coordinates.
//! - `Angle2`: radian value with cached cosine/sine and 45° rounding.
//! - `AffineMap`: `x ↦ M x + t`, produced by the three-point solver.

use nalgebra::Matrix2;

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Below this |det| three anchors count as collinear.
    pub eps_det: f64,
    /// Incidence slack for orientation and boundary tests.
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-12,
            eps: 1e-9,
        }
    }
}

/// Scalar 2D cross product `a.x b.y − a.y b.x`.
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn cross(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of `c` relative to the directed line `a → b` (twice the signed triangle area).
#[inline]
pub fn orient(a: Point2, b: Point2, c: Point2) -> f64 {
    cross(b - a, c - a)
}

/// Rotate `v` counterclockwise by `angle`.
#[inline]
pub fn rotate(v: Vector2, angle: &Angle2) -> Vector2 {
    Vector2::new(
        v.x * angle.cos - v.y * angle.sin,
        v.x * angle.sin + v.y * angle.cos,
    )
}

/// Angle in radians with cached trigonometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Angle2 {
    rad: f64,
    cos: f64,
    sin: f64,
}

impl Angle2 {
    #[inline]
    pub fn new(rad: f64) -> Self {
        Self {
            rad,
            cos: rad.cos(),
            sin: rad.sin(),
        }
    }

    /// Direction of `v` measured from the +x axis.
    #[inline]
    pub fn of(v: Vector2) -> Self {
        Self::new(v.y.atan2(v.x))
    }

    /// Direction from `from` towards `to`.
    #[inline]
    pub fn between(from: Point2, to: Point2) -> Self {
        Self::of(to - from)
    }

    #[inline]
    pub fn radians(&self) -> f64 {
        self.rad
    }
    #[inline]
    pub fn cos(&self) -> f64 {
        self.cos
    }
    #[inline]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// Unit vector pointing along this angle.
    #[inline]
    pub fn unit(&self) -> Vector2 {
        Vector2::new(self.cos, self.sin)
    }

    /// Nearest multiple of 45°.
    pub fn round_to_octant(&self) -> Self {
        let step = std::f64::consts::FRAC_PI_4;
        Self::new((self.rad / step).round() * step)
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMap {
    pub m: Matrix2<f64>,
    pub t: Vector2,
}

impl AffineMap {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }
    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::from(self.m * p.coords + self.t)
    }
    #[inline]
    pub fn apply_vector(&self, v: Vector2) -> Vector2 {
        self.m * v
    }
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }
    /// Composition `self ∘ other`.
    #[inline]
    pub fn compose(&self, other: &AffineMap) -> AffineMap {
        AffineMap {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }
    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }
}

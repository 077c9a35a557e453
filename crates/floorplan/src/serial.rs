//! Wire formats consumed by the submission layer.
//!
//! - `EditorOutput`: `{ floorplan: {height, width}, structure: [[{x,y}…]…], walls: [[{x,y},{x,y}]…] }`.
//!   Polygons are open (the closing edge is implicit).
//! - `AnchorRecord`: one `{x, y, lng, lat}` correspondence; payloads hold exactly three.
//!
//! Decoding validates structure and reports a `PayloadError`; encoding never fails
//! for finite coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom2::{Bbox2, Point2, Polygon2, Segment2};
use crate::shape::Shape;

/// Pixel size of the floorplan image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorplanSize {
    pub height: u32,
    pub width: u32,
}

impl FloorplanSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { height, width }
    }

    /// `[0, width] × [0, height]`.
    #[inline]
    pub fn bounds(&self) -> Bbox2 {
        Bbox2::new(
            Point2::origin(),
            Point2::new(f64::from(self.width), f64::from(self.height)),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A pixel coordinate as it appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl From<Point2> for Xy {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Xy> for Point2 {
    fn from(p: Xy) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// Serialized editor state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorOutput {
    pub floorplan: FloorplanSize,
    pub structure: Vec<Vec<Xy>>,
    pub walls: Vec<Vec<Xy>>,
}

impl EditorOutput {
    /// Split `shapes` into closed boundaries and walls, keeping list order within each.
    pub fn from_shapes(floorplan: FloorplanSize, shapes: &[Shape]) -> Self {
        let mut structure: Vec<Vec<Xy>> = Vec::new();
        let mut walls: Vec<Vec<Xy>> = Vec::new();
        for shape in shapes {
            match shape {
                Shape::Polygon(p) => structure.push(p.vertices().iter().map(|&v| v.into()).collect()),
                Shape::Segment(s) => walls.push(vec![s.a.into(), s.b.into()]),
            }
        }
        Self {
            floorplan,
            structure,
            walls,
        }
    }

    /// Rebuild a shape list: boundaries first, then walls.
    pub fn into_shapes(self) -> Result<(FloorplanSize, Vec<Shape>), PayloadError> {
        if self.floorplan.is_empty() {
            return Err(PayloadError::EmptyFloorplan);
        }
        let mut shapes = Vec::with_capacity(self.structure.len() + self.walls.len());
        for (index, ring) in self.structure.into_iter().enumerate() {
            if ring.len() < 3 {
                return Err(PayloadError::PolygonTooShort {
                    index,
                    len: ring.len(),
                });
            }
            let pts = finite_points(&ring, "structure")?;
            shapes.push(Shape::Polygon(Polygon2::new(pts)));
        }
        for (index, wall) in self.walls.into_iter().enumerate() {
            if wall.len() != 2 {
                return Err(PayloadError::WallArity {
                    index,
                    len: wall.len(),
                });
            }
            let pts = finite_points(&wall, "walls")?;
            shapes.push(Shape::Segment(Segment2::new(pts[0], pts[1])));
        }
        Ok((self.floorplan, shapes))
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(s)?)
    }
}

fn finite_points(xs: &[Xy], field: &'static str) -> Result<Vec<Point2>, PayloadError> {
    xs.iter()
        .map(|p| {
            if p.x.is_finite() && p.y.is_finite() {
                Ok(Point2::from(*p))
            } else {
                Err(PayloadError::NonFinite { field })
            }
        })
        .collect()
}

/// One local ↔ geographic correspondence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorRecord {
    pub x: f64,
    pub y: f64,
    pub lng: f64,
    pub lat: f64,
}

impl AnchorRecord {
    #[inline]
    pub fn local(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
    /// `(lng, lat)` as a point.
    #[inline]
    pub fn geo(&self) -> Point2 {
        Point2::new(self.lng, self.lat)
    }
}

/// Zip index-aligned local and geographic anchors into the wire payload.
pub fn anchor_payload(local: &[Point2; 3], geo: &[Point2; 3]) -> [AnchorRecord; 3] {
    std::array::from_fn(|i| AnchorRecord {
        x: local[i].x,
        y: local[i].y,
        lng: geo[i].x,
        lat: geo[i].y,
    })
}

/// Split a payload back into `(local, geo)`; exactly three finite records are required.
pub fn parse_anchor_payload(
    records: &[AnchorRecord],
) -> Result<([Point2; 3], [Point2; 3]), PayloadError> {
    let records: &[AnchorRecord; 3] = records
        .try_into()
        .map_err(|_| PayloadError::AnchorCount {
            found: records.len(),
        })?;
    for r in records {
        if ![r.x, r.y, r.lng, r.lat].iter().all(|v| v.is_finite()) {
            return Err(PayloadError::NonFinite { field: "anchors" });
        }
    }
    Ok((
        records.map(|r| r.local()),
        records.map(|r| r.geo()),
    ))
}

/// Parse a JSON anchor payload.
pub fn anchors_from_json(s: &str) -> Result<([Point2; 3], [Point2; 3]), PayloadError> {
    let records: Vec<AnchorRecord> = serde_json::from_str(s)?;
    parse_anchor_payload(&records)
}

/// Errors raised while decoding wire payloads.
#[derive(Debug)]
pub enum PayloadError {
    /// Anchor payloads carry exactly three records.
    AnchorCount { found: usize },
    NonFinite { field: &'static str },
    EmptyFloorplan,
    PolygonTooShort { index: usize, len: usize },
    WallArity { index: usize, len: usize },
    Json(serde_json::Error),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnchorCount { found } => {
                write!(f, "expected exactly 3 anchor records, found {found}")
            }
            Self::NonFinite { field } => write!(f, "non-finite coordinate in {field}"),
            Self::EmptyFloorplan => write!(f, "floorplan width and height must be positive"),
            Self::PolygonTooShort { index, len } => {
                write!(f, "structure[{index}] has {len} points (needs ≥3)")
            }
            Self::WallArity { index, len } => {
                write!(f, "walls[{index}] has {len} points (needs exactly 2)")
            }
            Self::Json(e) => write!(f, "malformed JSON: {e}"),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

//! Georeferencing: three-point affine fit between floorplan pixels and
//! geographic `(lng, lat)` coordinates, plus a local metric scale.
//!
//! Conventions
//! - Geographic points use `Point2 { x: lng, y: lat }` in degrees.
//! - The fit is exact: three non-collinear anchors determine the map uniquely.
//! - Scale is a flat-earth approximation over one floorplan: haversine distance
//!   between the projected width- and height-corners versus their pixel distance.
//!
//! A failed solve never clears the previous map; callers keep showing the last
//! good placement.

use crate::geom2::{cross, AffineMap, GeomCfg, Point2};
use crate::serial::{anchor_payload, AnchorRecord, FloorplanSize};
use crate::shape::{Status, Statused};
use nalgebra::Matrix2;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Affine map sending `src[i]` to `dst[i]` for all three anchors.
///
/// Returns `None` when the source anchors are numerically collinear
/// (`|(src1 − src0) × (src2 − src0)| < cfg.eps_det`).
pub fn solve_three_point(
    src: &[Point2; 3],
    dst: &[Point2; 3],
    cfg: &GeomCfg,
) -> Option<AffineMap> {
    let v1 = src[1] - src[0];
    let v2 = src[2] - src[0];
    let w1 = dst[1] - dst[0];
    let w2 = dst[2] - dst[0];
    let det = cross(v1, v2);
    if !det.is_finite() || det.abs() < cfg.eps_det {
        return None;
    }
    // Cramer's rule on M·v1 = w1, M·v2 = w2, one output row at a time.
    let m = Matrix2::new(
        (w1.x * v2.y - w2.x * v1.y) / det,
        (w2.x * v1.x - w1.x * v2.x) / det,
        (w1.y * v2.y - w2.y * v1.y) / det,
        (w2.y * v1.x - w1.y * v2.x) / det,
    );
    let t = dst[0].coords - m * src[0].coords;
    Some(AffineMap { m, t })
}

/// Great-circle distance in meters between two `(lng, lat)` points (degrees).
pub fn haversine_m(a: Point2, b: Point2) -> f64 {
    let (lat1, lat2) = (a.y.to_radians(), b.y.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.x - a.x).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Origin, width-corner and height-corner of the image, mapped to geo space.
pub fn reference_corners(map: &AffineMap, size: FloorplanSize) -> [Point2; 3] {
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    [
        map.apply(Point2::origin()),
        map.apply(Point2::new(w, 0.0)),
        map.apply(Point2::new(0.0, h)),
    ]
}

/// All four image corners in geo space, counterclockwise in pixel order
/// `(0,0), (w,0), (w,h), (0,h)`.
pub fn image_corners(map: &AffineMap, size: FloorplanSize) -> [Point2; 4] {
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    [
        Point2::origin(),
        Point2::new(w, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ]
    .map(|p| map.apply(p))
}

/// Floorplan pixels per meter, or `None` when the projected corners coincide.
pub fn pixels_per_meter(map: &AffineMap, size: FloorplanSize) -> Option<f64> {
    let [_, wc, hc] = reference_corners(map, size);
    let meters = haversine_m(wc, hc);
    let pixels = f64::from(size.width).hypot(f64::from(size.height));
    if !(meters.is_finite() && meters > 0.0) {
        return None;
    }
    Some(pixels / meters)
}

/// How the geographic anchors got their current positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Placed or moved in this session; scale is derived.
    Fresh,
    /// Restored from saved data; scale stays unavailable.
    Persisted,
}

/// Local/geographic anchor pairs with the last successfully solved map.
#[derive(Clone, Debug)]
pub struct Georeference {
    size: FloorplanSize,
    cfg: GeomCfg,
    local: [Point2; 3],
    geo: Option<[Point2; 3]>,
    placement: Placement,
    map: Option<AffineMap>,
    scale: Option<f64>,
}

impl Georeference {
    /// Local anchors default to the image's origin, width- and height-corners.
    pub fn new(size: FloorplanSize, cfg: GeomCfg) -> Self {
        let (w, h) = (f64::from(size.width), f64::from(size.height));
        Self::with_local_anchors(
            size,
            [Point2::origin(), Point2::new(w, 0.0), Point2::new(0.0, h)],
            cfg,
        )
    }

    pub fn with_local_anchors(size: FloorplanSize, local: [Point2; 3], cfg: GeomCfg) -> Self {
        Self {
            size,
            cfg,
            local,
            geo: None,
            placement: Placement::Fresh,
            map: None,
            scale: None,
        }
    }

    #[inline]
    pub fn size(&self) -> FloorplanSize {
        self.size
    }
    #[inline]
    pub fn local_anchors(&self) -> &[Point2; 3] {
        &self.local
    }
    #[inline]
    pub fn geo_anchors(&self) -> Option<&[Point2; 3]> {
        self.geo.as_ref()
    }
    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }
    /// Last good map.
    #[inline]
    pub fn map(&self) -> Option<&AffineMap> {
        self.map.as_ref()
    }
    #[inline]
    pub fn pixels_per_meter(&self) -> Option<f64> {
        self.scale
    }

    /// Geographic anchors placed by the user: solve and derive the scale.
    pub fn place_geo_anchors(&mut self, geo: [Point2; 3]) -> Option<&AffineMap> {
        self.geo = Some(geo);
        self.placement = Placement::Fresh;
        self.resolve();
        self.map.as_ref()
    }

    /// Geographic anchors restored from saved data: solve, scale unavailable.
    pub fn load_geo_anchors(&mut self, geo: [Point2; 3]) -> Option<&AffineMap> {
        self.geo = Some(geo);
        self.placement = Placement::Persisted;
        self.scale = None;
        self.resolve();
        self.map.as_ref()
    }

    /// Move one geographic anchor (a fresh placement). Out-of-range indices and
    /// a missing geo triple are ignored.
    pub fn move_geo_anchor(&mut self, index: usize, p: Point2) -> Option<&AffineMap> {
        let Some(mut geo) = self.geo else {
            return self.map.as_ref();
        };
        if let Some(slot) = geo.get_mut(index) {
            *slot = p;
            return self.place_geo_anchors(geo);
        }
        self.map.as_ref()
    }

    /// Move one local anchor and re-solve against the current geo anchors.
    pub fn set_local_anchor(&mut self, index: usize, p: Point2) -> Option<&AffineMap> {
        if let Some(slot) = self.local.get_mut(index) {
            *slot = p;
            self.resolve();
        }
        self.map.as_ref()
    }

    fn resolve(&mut self) {
        let Some(geo) = self.geo else {
            return;
        };
        match solve_three_point(&self.local, &geo, &self.cfg) {
            Some(map) => {
                self.map = Some(map);
                if self.placement == Placement::Fresh {
                    self.scale = pixels_per_meter(&map, self.size);
                }
            }
            None => tracing::debug!("collinear anchors; keeping previous map"),
        }
    }

    /// Image corners in geo space under the current map.
    pub fn corners(&self) -> Option<[Point2; 4]> {
        self.map.as_ref().map(|m| image_corners(m, self.size))
    }

    /// Convert a length in meters (e.g. wall height) into floorplan pixels.
    pub fn meters_to_pixels(&self, meters: f64) -> Option<f64> {
        self.scale.map(|s| meters * s)
    }

    /// Wire payload of the current anchor pairs.
    pub fn payload(&self) -> Option<[AnchorRecord; 3]> {
        self.geo.as_ref().map(|geo| anchor_payload(&self.local, geo))
    }
}

impl Statused for Georeference {
    /// `Warning` until a map exists.
    fn status(&self) -> Status {
        if self.map.is_some() {
            Status::Ok
        } else {
            Status::Warning
        }
    }
}

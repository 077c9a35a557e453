//! Cursor snapping, applied to every raw pointer position before the state
//! machine decides anything.
//!
//! Order
//! 1. Clamp into the floorplan's pixel bounds.
//! 2. Angle snap (when a source is given): round the source→cursor direction to
//!    the nearest 45° and project the cursor onto that ray. The projection is
//!    cut where the ray leaves the bounds, so it stays on the ray.
//! 3. Edge snap (when requested): replace the cursor with the closest point on
//!    any non-excluded shape edge within `magnetism`. With an active angle ray
//!    the candidate is the ray/edge intersection instead of the projection.
//!
//! The returned point always lies inside the bounds.

use crate::geom2::{Angle2, Bbox2, Point2, Ray2};
use crate::shape::Shape;

/// Which snaps apply to the current cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapCtx {
    /// Anchor of the 45° angle snap; `None` disables it.
    pub angle_source: Option<Point2>,
    pub edge: bool,
    /// Shape whose edges are ignored (the one being dragged).
    pub exclude: Option<usize>,
}

/// Rectangle `[0, width] × [0, height]` of the floorplan image.
#[inline]
pub fn image_bounds(width: f64, height: f64) -> Bbox2 {
    Bbox2::new(Point2::origin(), Point2::new(width.max(0.0), height.max(0.0)))
}

/// Ray from `source` along the 45°-rounded direction towards `raw`.
#[inline]
pub fn angle_ray(source: Point2, raw: Point2) -> Ray2 {
    Ray2::from_angle(source, &Angle2::between(source, raw).round_to_octant())
}

/// Point of `ray` closest to `p`, cut back to the last point inside `bounds`.
/// `ray.source` is assumed inside `bounds`.
pub fn project_within(ray: &Ray2, p: Point2, bounds: &Bbox2) -> Point2 {
    let d = ray.direction();
    let len2 = d.norm_squared();
    if len2 == 0.0 {
        return ray.source;
    }
    let mut t = ((p - ray.source).dot(&d) / len2).max(0.0);
    for (s, dir, lo, hi) in [
        (ray.source.x, d.x, bounds.min.x, bounds.max.x),
        (ray.source.y, d.y, bounds.min.y, bounds.max.y),
    ] {
        if dir > 0.0 {
            t = t.min((hi - s) / dir);
        } else if dir < 0.0 {
            t = t.min((lo - s) / dir);
        }
    }
    bounds.clamp(ray.source + d * t.max(0.0))
}

/// Closest edge point (or ray/edge intersection) within `magnetism` of `cursor`.
pub fn edge_snap(
    cursor: Point2,
    shapes: &[Shape],
    magnetism: f64,
    exclude: Option<usize>,
    ray: Option<&Ray2>,
) -> Option<Point2> {
    let r2 = magnetism * magnetism;
    let mut best: Option<Point2> = None;
    let mut best_d2 = f64::INFINITY;
    for (i, shape) in shapes.iter().enumerate() {
        if Some(i) == exclude {
            continue;
        }
        for e in shape.edges() {
            if e.distance_squared(cursor) > r2 {
                continue;
            }
            let candidate = match ray {
                Some(r) => match e.intersect(r) {
                    Some(p) => p,
                    None => continue,
                },
                None => e.project(cursor, true),
            };
            let d2 = (candidate - cursor).norm_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some(candidate);
            }
        }
    }
    best
}

/// Apply clamp, angle and edge snapping to `raw`.
pub fn snap_cursor(
    raw: Point2,
    bounds: &Bbox2,
    shapes: &[Shape],
    magnetism: f64,
    ctx: &SnapCtx,
) -> Point2 {
    let clamped = bounds.clamp(raw);
    let ray = ctx.angle_source.map(|src| angle_ray(src, clamped));
    let cursor = ray.map_or(clamped, |r| project_within(&r, clamped, bounds));
    if ctx.edge {
        if let Some(p) = edge_snap(cursor, shapes, magnetism, ctx.exclude, ray.as_ref()) {
            return bounds.clamp(p);
        }
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::{Polygon2, Segment2};

    fn bounds() -> Bbox2 {
        image_bounds(500.0, 400.0)
    }

    #[test]
    fn clamps_into_image() {
        let p = snap_cursor(Point2::new(-20.0, 450.0), &bounds(), &[], 8.0, &SnapCtx::default());
        assert_eq!(p, Point2::new(0.0, 400.0));
    }

    #[test]
    fn angle_snap_projects_onto_octant_ray() {
        let ctx = SnapCtx {
            angle_source: Some(Point2::new(100.0, 100.0)),
            ..SnapCtx::default()
        };
        let p = snap_cursor(Point2::new(200.0, 110.0), &bounds(), &[], 8.0, &ctx);
        assert!((p - Point2::new(200.0, 100.0)).norm() < 1e-9);
        let q = snap_cursor(Point2::new(190.0, 210.0), &bounds(), &[], 8.0, &ctx);
        assert!((q.x - q.y).abs() < 1e-9);
        assert!((q - Point2::new(200.0, 200.0)).norm() < 1e-9);
    }

    #[test]
    fn angle_snap_stops_at_image_border() {
        let ctx = SnapCtx {
            angle_source: Some(Point2::origin()),
            ..SnapCtx::default()
        };
        // rounds to 45°, whose plain projection would land at (440, 440)
        let p = snap_cursor(Point2::new(500.0, 380.0), &bounds(), &[], 8.0, &ctx);
        assert!(bounds().contains_point(p));
        assert!((p - Point2::new(400.0, 400.0)).norm() < 1e-9);

        let ctx = SnapCtx {
            angle_source: Some(Point2::new(450.0, 350.0)),
            ..SnapCtx::default()
        };
        let p = snap_cursor(Point2::new(600.0, 250.0), &bounds(), &[], 8.0, &ctx);
        assert!((p - Point2::new(500.0, 300.0)).norm() < 1e-9);
    }

    #[test]
    fn edge_snap_picks_closest_edge_point() {
        let shapes = vec![
            Shape::Segment(Segment2::new(Point2::new(0.0, 50.0), Point2::new(300.0, 50.0))),
            Shape::Polygon(Polygon2::new(vec![
                Point2::new(0.0, 55.0),
                Point2::new(300.0, 55.0),
                Point2::new(300.0, 300.0),
            ])),
        ];
        let ctx = SnapCtx {
            edge: true,
            ..SnapCtx::default()
        };
        let p = snap_cursor(Point2::new(100.0, 54.0), &bounds(), &shapes, 8.0, &ctx);
        assert_eq!(p, Point2::new(100.0, 55.0));
        // excluded shapes do not attract
        let ctx = SnapCtx {
            exclude: Some(1),
            ..ctx
        };
        let p = snap_cursor(Point2::new(100.0, 54.0), &bounds(), &shapes, 8.0, &ctx);
        assert_eq!(p, Point2::new(100.0, 50.0));
        // nothing within range leaves the cursor alone
        let p = snap_cursor(Point2::new(100.0, 150.0), &bounds(), &shapes, 8.0, &ctx);
        assert_eq!(p, Point2::new(100.0, 150.0));
    }

    #[test]
    fn edge_snap_with_angle_ray_uses_intersection() {
        let shapes = vec![Shape::Segment(Segment2::new(
            Point2::new(0.0, 200.0),
            Point2::new(400.0, 200.0),
        ))];
        let ctx = SnapCtx {
            angle_source: Some(Point2::new(100.0, 100.0)),
            edge: true,
            exclude: None,
        };
        // raw cursor near the wall, roughly diagonal from the source
        let p = snap_cursor(Point2::new(197.0, 203.0), &bounds(), &shapes, 8.0, &ctx);
        assert!((p - Point2::new(200.0, 200.0)).norm() < 1e-9);
    }
}

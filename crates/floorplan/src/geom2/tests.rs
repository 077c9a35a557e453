use super::*;
use nalgebra::matrix;
use proptest::prelude::*;

fn square() -> Polygon2 {
    Polygon2::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 10.0),
        Point2::new(0.0, 10.0),
    ])
}

#[test]
fn winding_number_square() {
    let sq = square();
    assert_ne!(sq.winding_number(Point2::new(5.0, 5.0)), 0);
    assert_eq!(sq.winding_number(Point2::new(20.0, 20.0)), 0);
    // clockwise order flips the sign but not membership
    let cw = Polygon2::new(sq.vertices().iter().rev().copied().collect());
    assert_eq!(
        cw.winding_number(Point2::new(5.0, 5.0)),
        -sq.winding_number(Point2::new(5.0, 5.0))
    );
}

#[test]
fn winding_number_non_convex() {
    // U shape opening upwards; the notch is outside
    let u = Polygon2::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(30.0, 0.0),
        Point2::new(30.0, 30.0),
        Point2::new(20.0, 30.0),
        Point2::new(20.0, 10.0),
        Point2::new(10.0, 10.0),
        Point2::new(10.0, 30.0),
        Point2::new(0.0, 30.0),
    ]);
    assert_ne!(u.winding_number(Point2::new(5.0, 20.0)), 0);
    assert_ne!(u.winding_number(Point2::new(25.0, 20.0)), 0);
    assert_eq!(u.winding_number(Point2::new(15.0, 20.0)), 0);
    assert_ne!(u.winding_number(Point2::new(15.0, 5.0)), 0);
}

#[test]
fn contains_counts_boundary_as_inside() {
    let sq = square();
    assert!(sq.contains(Point2::new(10.0, 5.0)));
    assert!(sq.contains(Point2::new(0.0, 0.0)));
    assert!(!sq.contains(Point2::new(10.5, 5.0)));
}

#[test]
fn bowtie_self_intersects_square_does_not() {
    let bowtie = Polygon2::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 10.0),
        Point2::new(10.0, 0.0),
        Point2::new(0.0, 10.0),
    ]);
    assert!(bowtie.is_self_intersecting());
    assert!(!square().is_self_intersecting());
}

#[test]
fn touching_non_adjacent_edges_self_intersect() {
    // vertex 3 rests on edge 0
    let t = Polygon2::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 10.0),
        Point2::new(5.0, 0.0),
    ]);
    assert!(t.is_self_intersecting());
    // figure-eight pinched at (10, 0)
    let pinched = Polygon2::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(20.0, 0.0),
        Point2::new(20.0, 20.0),
        Point2::new(10.0, 0.0),
        Point2::new(0.0, 20.0),
    ]);
    assert!(pinched.is_self_intersecting());
    // a collinear vertex on a straight edge is fine
    let mut sq = square();
    sq.insert(1, Point2::new(5.0, 0.0));
    assert!(!sq.is_self_intersecting());
}

#[test]
fn segment_touch_includes_contact_and_overlap() {
    let s = Segment2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
    let t_junction = Segment2::new(Point2::new(5.0, 0.0), Point2::new(5.0, 5.0));
    let overlap = Segment2::new(Point2::new(8.0, 0.0), Point2::new(15.0, 0.0));
    let apart = Segment2::new(Point2::new(5.0, 1.0), Point2::new(5.0, 5.0));
    assert!(!s.crosses(&t_junction, 1e-9) && s.touches(&t_junction, 1e-9));
    assert!(!s.crosses(&overlap, 1e-9) && s.touches(&overlap, 1e-9));
    assert!(!s.touches(&apart, 1e-9));
    let cross = Segment2::new(Point2::new(5.0, -5.0), Point2::new(5.0, 5.0));
    assert!(s.crosses(&cross, 1e-9) && s.touches(&cross, 1e-9));
}

#[test]
fn polygons_intersect_only_on_crossing_edges() {
    let sq = square();
    let shifted = Polygon2::new(
        sq.vertices()
            .iter()
            .map(|p| *p + Vector2::new(5.0, 5.0))
            .collect(),
    );
    assert!(sq.intersects(&shifted));
    // sharing an edge is not a crossing
    let neighbour = Polygon2::new(
        sq.vertices()
            .iter()
            .map(|p| *p + Vector2::new(10.0, 0.0))
            .collect(),
    );
    assert!(!sq.intersects(&neighbour));
    // full nesting has no crossing edges
    let inner = Polygon2::new(vec![
        Point2::new(2.0, 2.0),
        Point2::new(4.0, 2.0),
        Point2::new(4.0, 4.0),
    ]);
    assert!(!sq.intersects(&inner));
}

#[test]
fn remove_respects_minimum_vertex_count() {
    let mut tri = Polygon2::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.0, 1.0),
    ]);
    assert!(tri.remove(0).is_none());
    assert_eq!(tri.len(), 3);

    let mut sq = square();
    assert_eq!(sq.remove(1), Some(Point2::new(10.0, 0.0)));
    assert_eq!(sq.len(), 3);
}

#[test]
fn insert_and_update_wrap_indices() {
    let mut sq = square();
    // subdividing the closing edge (3 → 0) inserts at index 4 ≡ 0
    sq.insert(4, Point2::new(0.0, 5.0));
    assert_eq!(sq.len(), 5);
    assert_eq!(sq.vertex(0), Point2::new(0.0, 5.0));
    assert!(!sq.is_self_intersecting());
    sq.update(6, Point2::new(11.0, 0.0));
    assert_eq!(sq.vertex(1), Point2::new(11.0, 0.0));
}

#[test]
fn edges_wrap_around() {
    let sq = square();
    let edges: Vec<_> = sq.edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3].a, Point2::new(0.0, 10.0));
    assert_eq!(edges[3].b, Point2::new(0.0, 0.0));
}

#[test]
fn segment_projection_clamped_and_free() {
    let s = Segment2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
    let p = Point2::new(15.0, 3.0);
    assert_eq!(s.project(p, true), Point2::new(10.0, 0.0));
    assert_eq!(s.project(p, false), Point2::new(15.0, 0.0));
    assert!((s.distance(Point2::new(5.0, 4.0)) - 4.0).abs() < 1e-12);
    let degenerate = Segment2::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
    assert_eq!(degenerate.project(p, false), Point2::new(1.0, 1.0));
}

#[test]
fn segment_ray_intersection() {
    let s = Segment2::new(Point2::new(10.0, -5.0), Point2::new(10.0, 5.0));
    let hit = s
        .intersect(&Ray2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)))
        .unwrap();
    assert!((hit - Point2::new(10.0, 0.0)).norm() < 1e-12);
    // pointing away
    assert!(s
        .intersect(&Ray2::new(Point2::new(0.0, 0.0), Point2::new(-1.0, 0.0)))
        .is_none());
    // parallel
    assert!(s
        .intersect(&Ray2::new(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0)))
        .is_none());
    // misses the segment span
    assert!(s
        .intersect(&Ray2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)))
        .is_none());
}

#[test]
fn angle_rounds_to_octants() {
    let a = Angle2::between(Point2::new(0.0, 0.0), Point2::new(10.0, 1.0));
    assert!(a.round_to_octant().radians().abs() < 1e-12);
    let b = Angle2::between(Point2::new(0.0, 0.0), Point2::new(10.0, 9.0));
    assert!((b.round_to_octant().radians() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    let c = Angle2::between(Point2::new(0.0, 0.0), Point2::new(-10.0, -1.0));
    assert!((c.round_to_octant().radians().abs() - std::f64::consts::PI).abs() < 1e-12);
    let v = rotate(Vector2::new(1.0, 0.0), &Angle2::new(std::f64::consts::FRAC_PI_2));
    assert!((v - Vector2::new(0.0, 1.0)).norm() < 1e-12);
}

#[test]
fn ray_projection_never_behind_source() {
    let r = Ray2::from_angle(Point2::new(1.0, 1.0), &Angle2::new(0.0));
    assert_eq!(r.project(Point2::new(5.0, 3.0)), Point2::new(5.0, 1.0));
    assert_eq!(r.project(Point2::new(-5.0, 3.0)), Point2::new(1.0, 1.0));
}

#[test]
fn affine_map_apply_inverse_compose() {
    let f = AffineMap {
        m: matrix![2.0, 1.0; 0.0, 3.0],
        t: Vector2::new(1.0, -1.0),
    };
    let p = Point2::new(2.0, 5.0);
    assert_eq!(f.apply(p), Point2::new(10.0, 14.0));
    let inv = f.inverse().unwrap();
    assert!((inv.apply(f.apply(p)) - p).norm() < 1e-12);
    let id = f.compose(&inv);
    assert!((id.m - AffineMap::identity().m).norm() < 1e-12);
    assert!(id.t.norm() < 1e-12);
    assert!(f.is_orientation_preserving());
}

#[test]
fn bbox_queries() {
    let b = square().bbox();
    assert_eq!(b.area(), 100.0);
    let inner = Bbox2::new(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0));
    assert!(b.contains_box(&inner));
    assert!(!inner.contains_box(&b));
    assert_eq!(b.clamp(Point2::new(-3.0, 12.0)), Point2::new(0.0, 10.0));
}

proptest! {
    // Regular polygons (any rotation, radius, vertex count) are simple and contain their center.
    #[test]
    fn regular_polygons_are_simple(n in 3usize..24, r in 1.0f64..500.0, phase in 0.0f64..6.28) {
        let verts: Vec<Point2> = (0..n)
            .map(|k| {
                let th = phase + std::f64::consts::TAU * (k as f64) / (n as f64);
                Point2::new(r * th.cos(), r * th.sin())
            })
            .collect();
        let poly = Polygon2::new(verts);
        prop_assert!(!poly.is_self_intersecting());
        prop_assert_ne!(poly.winding_number(Point2::origin()), 0);
        prop_assert_eq!(poly.winding_number(Point2::new(2.0 * r, 0.0)), 0);
    }

    #[test]
    fn clamped_projection_is_nearest_endpoint_or_foot(
        ax in -100.0f64..100.0, ay in -100.0f64..100.0,
        bx in -100.0f64..100.0, by in -100.0f64..100.0,
        px in -100.0f64..100.0, py in -100.0f64..100.0,
    ) {
        let s = Segment2::new(Point2::new(ax, ay), Point2::new(bx, by));
        let p = Point2::new(px, py);
        let d = s.distance(p);
        prop_assert!(d <= (p - s.a).norm() + 1e-9);
        prop_assert!(d <= (p - s.b).norm() + 1e-9);
        prop_assert!(d + 1e-9 >= (p - s.project(p, false)).norm());
    }
}

//! Curated surface for hosts and tools (UNSTABLE).
//!
//! Important
//! - This is not a stable public API. Breaking changes are allowed.
//! - Prefer these re-exports over reaching into submodules so call sites read
//!   the same across the CLI, benches and demos.

// 2D geometry
pub use crate::geom2::{
    cross, orient, AffineMap, Angle2, Bbox2, GeomCfg, Point2, Polygon2, Ray2, Segment2, Vector2,
};
// Shapes and validity
pub use crate::shape::{
    invalid_edges_of, is_invalid, status_of, Shape, ShapeKind, Status, Statused,
};
// Queries
pub use crate::hover::{resolve as resolve_hover, Hover, Resolver};
pub use crate::snap::{snap_cursor, SnapCtx};
// Interaction
pub use crate::editor::{
    transition, Button, DrawMode, Editor, EditorCfg, Effect, Event, Frame, Modifiers, Preview,
    ShapeView, State,
};
// Georeferencing
pub use crate::georef::{
    haversine_m, image_corners, pixels_per_meter, reference_corners, solve_three_point,
    Georeference, Placement, EARTH_RADIUS_M,
};
// Wire formats
pub use crate::serial::{
    anchor_payload, anchors_from_json, parse_anchor_payload, AnchorRecord, EditorOutput,
    FloorplanSize, PayloadError, Xy,
};

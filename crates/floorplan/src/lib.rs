//! Floorplan tracing and georeferencing engine.
//!
//! Layers
//! - `geom2`: points, segments, rays, polygons, boxes, affine maps.
//! - `shape`: the editor's shape list (boundaries and walls) and derived validity.
//! - `hover` / `snap`: read-only queries over the shape list.
//! - `editor`: the default / drawing / dragging state machine.
//! - `georef`: three-point affine fit and pixel-per-meter scale.
//! - `serial`: wire formats for the submission layer.
//!
//! The crate is headless: no rendering or windowing dependency. Hosts feed
//! events into `editor::Editor` and draw from `editor::Frame`.

pub mod api;
pub mod editor;
pub mod geom2;
pub mod georef;
pub mod hover;
pub mod serial;
pub mod shape;
pub mod snap;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{AffineMap, GeomCfg, Point2, Vector2};
pub use shape::{Shape, Status, Statused};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::editor::{
        transition, Button, DrawMode, Editor, EditorCfg, Effect, Event, Frame, Modifiers, State,
    };
    pub use crate::geom2::{AffineMap, GeomCfg, Point2, Polygon2, Segment2, Vector2};
    pub use crate::georef::{solve_three_point, Georeference};
    pub use crate::hover::Hover;
    pub use crate::serial::{EditorOutput, FloorplanSize};
    pub use crate::shape::{Shape, Status, Statused};
}

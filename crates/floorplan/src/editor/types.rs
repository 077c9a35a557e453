//! Data types for the editor state machine: configuration, input events,
//! effects reported back to the host, and the gesture state.
//!
//! Kept small and explicit so `mod.rs` (transitions) and `frame.rs` (redraw)
//! stay easy to read.

use serde::{Deserialize, Serialize};

use crate::geom2::{GeomCfg, Point2};
use crate::shape::{Shape, Status};

/// What a committed drawing gesture produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Closed boundary (`structure`).
    #[default]
    Polygon,
    /// Two-point wall (`walls`).
    Line,
}

/// Editor configuration.
#[derive(Clone, Copy, Debug)]
pub struct EditorCfg {
    /// Snap / hit tolerance in screen pixels.
    pub magnetism: f64,
    /// Viewport zoom; the tolerance in floorplan pixels is `magnetism / zoom`.
    pub zoom: f64,
    pub mode: DrawMode,
    pub geom: GeomCfg,
}

impl Default for EditorCfg {
    fn default() -> Self {
        Self {
            magnetism: 8.0,
            zoom: 1.0,
            mode: DrawMode::Polygon,
            geom: GeomCfg::default(),
        }
    }
}

/// Held modifier keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// 45° angle snap while drawing or dragging.
    pub angle: bool,
    /// Edge snap while drawing or dragging; edge hover / vertex insertion when idle.
    pub edge: bool,
    /// Angle-snap a dragged polygon vertex against its successor instead of its predecessor.
    pub successor: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
}

/// Input forwarded by the host, in floorplan pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PointerDown {
        at: Point2,
        #[serde(default)]
        button: Button,
    },
    PointerMove {
        at: Point2,
    },
    PointerUp {
        at: Point2,
        #[serde(default)]
        button: Button,
    },
    DoubleClick {
        at: Point2,
    },
    ModifiersChanged {
        modifiers: Modifiers,
    },
    Escape,
    Zoom {
        zoom: f64,
    },
    SetMode {
        mode: DrawMode,
    },
}

/// Side effects of one event, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    ShapeCommitted { index: usize },
    ShapeChanged { index: usize },
    ShapeRemoved { index: usize },
    VertexInserted { shape: usize, vertex: usize },
    VertexRemoved { shape: usize, vertex: usize },
    GestureCancelled,
    StatusChanged { status: Status },
    Redraw,
}

/// An active vertex drag.
#[derive(Clone, Debug, PartialEq)]
pub struct Drag {
    pub shape: usize,
    pub vertex: usize,
    /// Position of the vertex when the press happened.
    pub origin: Point2,
    /// A pointer move arrived since the press.
    pub moved: bool,
    /// The shape as it was before the press; restored on Escape.
    pub before: Shape,
}

/// Gesture state. `Default` is idle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum State {
    #[default]
    Default,
    Drawing {
        vertices: Vec<Point2>,
    },
    Dragging(Drag),
}

impl State {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, State::Default)
    }

    /// Index of the shape being dragged, if any.
    #[inline]
    pub fn dragged_shape(&self) -> Option<usize> {
        match self {
            State::Dragging(d) => Some(d.shape),
            _ => None,
        }
    }
}

//! Redraw snapshot: everything a renderer needs, computed from editor state only.

use super::{DrawMode, Editor, State};
use crate::geom2::Point2;
use crate::hover::Hover;
use crate::shape::{invalid_edges, invalid_edges_of, Shape, Status};

/// One committed shape as it should be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeView {
    pub shape: Shape,
    /// Per-edge invalid flags (polygons); a single `false` for segments.
    pub invalid_edges: Vec<bool>,
    pub hovered: bool,
    pub dragged: bool,
}

/// The shape being drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub mode: DrawMode,
    /// Placed vertices.
    pub vertices: Vec<Point2>,
    /// Where the next vertex would go; `None` when the cursor closes the polygon.
    pub tentative: Option<Point2>,
    pub closable: bool,
    /// Edge flags of the polygon a release at the cursor would produce.
    pub invalid_edges: Vec<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub shapes: Vec<ShapeView>,
    pub preview: Option<Preview>,
    pub cursor: Point2,
    pub hover: Hover,
    pub status: Status,
    /// Tolerance in floorplan pixels, for drawing snap halos.
    pub magnetism: f64,
}

pub(super) fn build(editor: &Editor) -> Frame {
    let eps = editor.cfg.geom.eps;
    let dragged = editor.state.dragged_shape();
    let hovered = editor.hover.shape();
    let shapes = editor
        .shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| ShapeView {
            shape: shape.clone(),
            invalid_edges: invalid_edges_of(&editor.shapes, i, eps),
            hovered: hovered == Some(i),
            dragged: dragged == Some(i),
        })
        .collect();

    let preview = match &editor.state {
        State::Drawing { vertices } => {
            let closable = editor.closable(vertices);
            let invalid_edges = editor
                .tentative_polygon()
                .map(|p| {
                    invalid_edges(
                        &p,
                        editor.shapes.iter().filter_map(Shape::as_polygon),
                        eps,
                    )
                })
                .unwrap_or_default();
            Some(Preview {
                mode: editor.cfg.mode,
                vertices: vertices.clone(),
                tentative: (!closable).then_some(editor.cursor),
                closable,
                invalid_edges,
            })
        }
        _ => None,
    };

    Frame {
        shapes,
        preview,
        cursor: editor.cursor,
        hover: editor.hover,
        status: editor.status,
        magnetism: editor.magnetism(),
    }
}

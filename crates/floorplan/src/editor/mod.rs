//! Interaction state machine: default / drawing / dragging.
//!
//! Purpose
//! - Turn raw pointer and key events into shape edits: drawing new boundaries
//!   and walls, dragging vertices, inserting vertices on edges, deleting
//!   vertices or whole shapes, and cancelling gestures.
//! - Keep every decision headless: the host forwards `Event`s and reads back
//!   `Effect`s plus a `Frame` snapshot for drawing.
//!
//! Transitions
//! - default → drawing: primary press on nothing pickable starts a shape at the
//!   (clamped, otherwise unsnapped) press point.
//! - default → dragging: primary press on a hovered vertex, or on a hovered
//!   polygon edge with the edge modifier (inserts a vertex there first).
//! - drawing: each release farther than the tolerance from the last vertex
//!   appends the snapped cursor. Lines commit at two vertices. Polygons close on
//!   a release near the first vertex (≥3 vertices) or on a double-click.
//! - dragging → default on release after movement; a release without movement
//!   reverts the press and starts drawing from the vertex instead.
//! - Escape discards the gesture and restores the committed list.
//! - Secondary press while idle deletes the hovered vertex (polygon keeps ≥3)
//!   or the hovered shape.
//!
//! Code cross-refs: `hover::Resolver`, `snap::snap_cursor`, `shape::status_of`

mod frame;
mod types;

pub use frame::{Frame, Preview, ShapeView};
pub use types::{Button, DrawMode, Drag, EditorCfg, Effect, Event, Modifiers, State};

use crate::geom2::{Bbox2, Point2, Polygon2, Segment2};
use crate::hover::{Hover, Resolver};
use crate::serial::{EditorOutput, FloorplanSize};
use crate::shape::{polygon_invalid, status_of, Shape, Status, Statused};
use crate::snap::{snap_cursor, SnapCtx};

/// Editor owning the shape list, the gesture state and the modifier keys.
#[derive(Clone, Debug)]
pub struct Editor {
    cfg: EditorCfg,
    size: FloorplanSize,
    bounds: Bbox2,
    shapes: Vec<Shape>,
    state: State,
    modifiers: Modifiers,
    /// Last pointer position as received (clamped), before angle/edge snapping.
    raw: Point2,
    cursor: Point2,
    hover: Hover,
    status: Status,
}

impl Editor {
    pub fn new(size: FloorplanSize, cfg: EditorCfg) -> Self {
        let mut editor = Self {
            cfg,
            size,
            bounds: size.bounds(),
            shapes: Vec::new(),
            state: State::Default,
            modifiers: Modifiers::default(),
            raw: Point2::origin(),
            cursor: Point2::origin(),
            hover: Hover::None,
            status: Status::Warning,
        };
        editor.status = editor.compute_status();
        editor
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }
    #[inline]
    pub fn cursor(&self) -> Point2 {
        self.cursor
    }
    #[inline]
    pub fn hover(&self) -> Hover {
        self.hover
    }
    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
    #[inline]
    pub fn mode(&self) -> DrawMode {
        self.cfg.mode
    }
    #[inline]
    pub fn size(&self) -> FloorplanSize {
        self.size
    }
    #[inline]
    pub fn cfg(&self) -> &EditorCfg {
        &self.cfg
    }

    /// Tolerance in floorplan pixels.
    #[inline]
    pub fn magnetism(&self) -> f64 {
        self.cfg.magnetism / self.cfg.zoom
    }

    /// Serialized snapshot of the committed shapes.
    pub fn output(&self) -> EditorOutput {
        EditorOutput::from_shapes(self.size, &self.shapes)
    }

    /// Replace the whole shape list (e.g. loading saved work). Cancels any gesture.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) -> Vec<Effect> {
        let before = self.status;
        let mut fx = Vec::new();
        if !self.state.is_idle() {
            self.state = State::Default;
            fx.push(Effect::GestureCancelled);
        }
        tracing::debug!(count = shapes.len(), "replace shapes");
        self.shapes = shapes;
        self.finish(before, fx)
    }

    /// Feed one event; returns what changed, always ending with `Effect::Redraw`.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let before = self.status;
        let mut fx = Vec::new();
        match event {
            Event::PointerMove { at } => self.on_move(at, &mut fx),
            Event::PointerDown {
                at,
                button: Button::Primary,
            } => self.on_press(at, &mut fx),
            Event::PointerDown {
                at,
                button: Button::Secondary,
            } => self.on_context(at, &mut fx),
            Event::PointerUp {
                at,
                button: Button::Primary,
            } => self.on_release(at, &mut fx),
            Event::PointerUp {
                at,
                button: Button::Secondary,
            } => self.track(at),
            Event::DoubleClick { at } => self.on_double_click(at, &mut fx),
            Event::ModifiersChanged { modifiers } => {
                self.modifiers = modifiers;
                self.track(self.raw);
                self.drag_to_cursor(&mut fx);
            }
            Event::Escape => self.cancel(&mut fx),
            Event::Zoom { zoom } => {
                if zoom.is_finite() && zoom > 0.0 {
                    self.cfg.zoom = zoom;
                }
            }
            Event::SetMode { mode } => {
                if self.state.is_idle() {
                    self.cfg.mode = mode;
                }
            }
        }
        self.finish(before, fx)
    }

    fn finish(&mut self, before: Status, mut fx: Vec<Effect>) -> Vec<Effect> {
        self.refresh_hover();
        self.status = self.compute_status();
        if self.status != before {
            fx.push(Effect::StatusChanged {
                status: self.status,
            });
        }
        fx.push(Effect::Redraw);
        fx
    }

    // --- pointer handling ---

    /// Record a raw pointer position and recompute the snapped cursor.
    fn track(&mut self, at: Point2) {
        self.raw = self.bounds.clamp(at);
        let ctx = SnapCtx {
            angle_source: if self.modifiers.angle {
                self.angle_source()
            } else {
                None
            },
            edge: self.modifiers.edge && !self.state.is_idle(),
            exclude: self.state.dragged_shape(),
        };
        self.cursor = snap_cursor(self.raw, &self.bounds, &self.shapes, self.magnetism(), &ctx);
    }

    /// Anchor for the 45° snap: the previous vertex while drawing; while
    /// dragging, the other endpoint of a segment or a polygon neighbour.
    fn angle_source(&self) -> Option<Point2> {
        match &self.state {
            State::Default => None,
            State::Drawing { vertices } => vertices.last().copied(),
            State::Dragging(drag) => {
                let shape = self.shapes.get(drag.shape)?;
                let n = shape.vertex_count();
                let neighbour = match shape {
                    Shape::Segment(_) => drag.vertex + 1,
                    Shape::Polygon(_) if self.modifiers.successor => drag.vertex + 1,
                    Shape::Polygon(_) => drag.vertex + n - 1,
                };
                Some(shape.vertex(neighbour % n))
            }
        }
    }

    fn refresh_hover(&mut self) {
        self.hover = Resolver::new(&self.shapes, self.magnetism())
            .with_edges(self.modifiers.edge)
            .excluding(self.state.dragged_shape())
            .resolve(self.cursor);
    }

    fn on_move(&mut self, at: Point2, fx: &mut Vec<Effect>) {
        self.track(at);
        if let State::Dragging(drag) = &mut self.state {
            drag.moved = true;
        }
        self.drag_to_cursor(fx);
    }

    fn drag_to_cursor(&mut self, fx: &mut Vec<Effect>) {
        if let State::Dragging(drag) = &self.state {
            if !drag.moved {
                return;
            }
            let (index, vertex) = (drag.shape, drag.vertex);
            if let Some(shape) = self.shapes.get_mut(index) {
                shape.update_vertex(vertex, self.cursor);
                fx.push(Effect::ShapeChanged { index });
            }
        }
    }

    fn on_press(&mut self, at: Point2, fx: &mut Vec<Effect>) {
        self.track(at);
        if !self.state.is_idle() {
            return;
        }
        self.refresh_hover();
        match self.hover {
            Hover::Vertex { shape, vertex } => self.begin_drag(shape, vertex, None),
            Hover::Edge { shape, edge, point } if self.modifiers.edge => {
                let Some(Shape::Polygon(poly)) = self.shapes.get(shape) else {
                    return;
                };
                let before = Shape::Polygon(poly.clone());
                let vertex = (edge + 1) % poly.len();
                if let Some(Shape::Polygon(poly)) = self.shapes.get_mut(shape) {
                    poly.insert(vertex, point);
                }
                tracing::debug!(shape, vertex, "insert vertex");
                fx.push(Effect::VertexInserted { shape, vertex });
                self.begin_drag(shape, vertex, Some(before));
            }
            _ => {
                self.state = State::Drawing {
                    vertices: vec![self.raw],
                };
            }
        }
    }

    fn begin_drag(&mut self, shape: usize, vertex: usize, before: Option<Shape>) {
        let Some(current) = self.shapes.get(shape) else {
            return;
        };
        self.state = State::Dragging(Drag {
            shape,
            vertex,
            origin: current.vertex(vertex),
            moved: false,
            before: before.unwrap_or_else(|| current.clone()),
        });
    }

    fn on_release(&mut self, at: Point2, fx: &mut Vec<Effect>) {
        self.track(at);
        match std::mem::take(&mut self.state) {
            State::Default => {}
            State::Drawing { mut vertices } => {
                if self.closable(&vertices) {
                    self.commit(Shape::Polygon(Polygon2::new(vertices)), fx);
                    return;
                }
                let far = vertices
                    .last()
                    .map_or(true, |last| (self.cursor - *last).norm() > self.magnetism());
                if far {
                    vertices.push(self.cursor);
                }
                if self.cfg.mode == DrawMode::Line && vertices.len() >= 2 {
                    self.commit(Shape::Segment(Segment2::new(vertices[0], vertices[1])), fx);
                } else {
                    self.state = State::Drawing { vertices };
                }
            }
            State::Dragging(drag) => {
                if drag.moved {
                    tracing::debug!(shape = drag.shape, vertex = drag.vertex, "drag ended");
                    return;
                }
                // a click on a vertex starts a new shape there
                self.restore(drag.shape, drag.before, fx);
                self.state = State::Drawing {
                    vertices: vec![drag.origin],
                };
            }
        }
    }

    fn on_double_click(&mut self, at: Point2, fx: &mut Vec<Effect>) {
        self.track(at);
        if self.cfg.mode != DrawMode::Polygon {
            return;
        }
        if let State::Drawing { vertices } = &self.state {
            if vertices.len() >= 3 {
                let vertices = vertices.clone();
                self.state = State::Default;
                self.commit(Shape::Polygon(Polygon2::new(vertices)), fx);
            }
        }
    }

    fn on_context(&mut self, at: Point2, fx: &mut Vec<Effect>) {
        self.track(at);
        if !self.state.is_idle() {
            return;
        }
        // right-click never targets an edge
        let target = Resolver::new(&self.shapes, self.magnetism())
            .with_edges(false)
            .resolve(self.cursor);
        match target {
            Hover::Vertex { shape, vertex } => {
                if let Some(Shape::Polygon(poly)) = self.shapes.get_mut(shape) {
                    if poly.remove(vertex).is_some() {
                        tracing::debug!(shape, vertex, "remove vertex");
                        fx.push(Effect::VertexRemoved { shape, vertex });
                    }
                }
            }
            Hover::Shape { shape } => {
                self.shapes.remove(shape);
                tracing::debug!(index = shape, "remove shape");
                fx.push(Effect::ShapeRemoved { index: shape });
            }
            Hover::Edge { .. } | Hover::None => {}
        }
    }

    fn cancel(&mut self, fx: &mut Vec<Effect>) {
        match std::mem::take(&mut self.state) {
            State::Default => return,
            State::Drawing { .. } => {}
            State::Dragging(drag) => self.restore(drag.shape, drag.before, fx),
        }
        tracing::debug!("gesture cancelled");
        fx.push(Effect::GestureCancelled);
    }

    fn restore(&mut self, index: usize, before: Shape, fx: &mut Vec<Effect>) {
        if let Some(shape) = self.shapes.get_mut(index) {
            if *shape != before {
                *shape = before;
                fx.push(Effect::ShapeChanged { index });
            }
        }
    }

    fn commit(&mut self, shape: Shape, fx: &mut Vec<Effect>) {
        let index = self.shapes.len();
        tracing::debug!(index, kind = ?shape.kind(), "commit shape");
        self.shapes.push(shape);
        self.state = State::Default;
        fx.push(Effect::ShapeCommitted { index });
    }

    // --- derived state ---

    /// Polygon mode, ≥3 vertices and the cursor within tolerance of the first one.
    fn closable(&self, vertices: &[Point2]) -> bool {
        self.cfg.mode == DrawMode::Polygon
            && vertices.len() >= 3
            && (self.cursor - vertices[0]).norm() <= self.magnetism()
    }

    /// Vertices of the in-progress polygon as it would look after a release at
    /// the cursor: closed when the cursor is on the first vertex, unchanged when
    /// it is on the last one, otherwise with the cursor appended.
    fn tentative_polygon(&self) -> Option<Polygon2> {
        let State::Drawing { vertices } = &self.state else {
            return None;
        };
        if self.cfg.mode != DrawMode::Polygon {
            return None;
        }
        let mut pts = vertices.clone();
        let on_last = vertices
            .last()
            .is_some_and(|last| (self.cursor - *last).norm() <= self.magnetism());
        if !self.closable(vertices) && !on_last {
            pts.push(self.cursor);
        }
        Polygon2::try_new(pts)
    }

    fn tentative_invalid(&self) -> bool {
        self.tentative_polygon().is_some_and(|p| {
            polygon_invalid(
                &p,
                self.shapes.iter().filter_map(Shape::as_polygon),
                self.cfg.geom.eps,
            )
        })
    }

    fn compute_status(&self) -> Status {
        let committed = status_of(&self.shapes, self.cfg.geom.eps);
        if self.tentative_invalid() {
            Status::Error
        } else {
            committed
        }
    }

    /// Redraw snapshot; a pure function of the editor state.
    pub fn redraw(&self) -> Frame {
        frame::build(self)
    }
}

impl Statused for Editor {
    fn status(&self) -> Status {
        self.status
    }
}

/// Pure transition `(editor, event) → (editor, effects)`.
pub fn transition(mut editor: Editor, event: Event) -> (Editor, Vec<Effect>) {
    let fx = editor.handle(event);
    (editor, fx)
}

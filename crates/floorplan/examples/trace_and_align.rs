//! Trace a room and a wall headlessly, then place the floorplan on the map.
//!
//! Usage:
//!   cargo run -p floorplan --example trace_and_align
//!
//! Prints the serialized editor output, the geographic image corners and the
//! pixel height of a 2.5 m wall.

use floorplan::prelude::*;

fn click(ed: &mut Editor, x: f64, y: f64) {
    let at = Point2::new(x, y);
    ed.handle(Event::PointerDown { at, button: Button::Primary });
    ed.handle(Event::PointerUp { at, button: Button::Primary });
}

fn main() {
    let size = FloorplanSize::new(640, 480);
    let mut ed = Editor::new(size, EditorCfg::default());

    for (x, y) in [(40.0, 40.0), (600.0, 40.0), (600.0, 440.0), (40.0, 440.0), (42.0, 41.0)] {
        click(&mut ed, x, y);
    }
    ed.handle(Event::SetMode { mode: DrawMode::Line });
    click(&mut ed, 320.0, 60.0);
    click(&mut ed, 320.0, 420.0);

    println!("status: {:?}", ed.status());
    match ed.output().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("serialize failed: {e}"),
    }

    let mut geo = Georeference::new(size, GeomCfg::default());
    let placed = geo.place_geo_anchors([
        Point2::new(2.3500, 48.8600),
        Point2::new(2.3509, 48.8600),
        Point2::new(2.3500, 48.8595),
    ]);
    if placed.is_none() {
        eprintln!("anchors are collinear");
        return;
    }
    if let Some(corners) = geo.corners() {
        for (i, c) in corners.iter().enumerate() {
            println!("corner {i}: lng={:.6} lat={:.6}", c.x, c.y);
        }
    }
    match geo.meters_to_pixels(2.5) {
        Some(px) => println!("2.5 m wall ≈ {px:.1} px"),
        None => println!("scale unavailable"),
    }
}

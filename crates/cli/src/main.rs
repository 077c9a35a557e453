use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use floorplan::api::{
    anchors_from_json, is_invalid, AffineMap, DrawMode, Editor, EditorCfg, EditorOutput, Event,
    FloorplanSize, GeomCfg, Georeference, Point2, Status, Statused,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Floorplan tracing and georeferencing tools")]
struct Cmd {
    /// Write the JSON result here instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Polygon,
    Line,
}

impl From<Mode> for DrawMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Polygon => DrawMode::Polygon,
            Mode::Line => DrawMode::Line,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Fit the floorplan to three anchor records and report corners and scale
    Solve {
        /// JSON array of exactly three {x, y, lng, lat} records
        #[arg(long)]
        anchors: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Anchors come from saved data: scale is left unavailable
        #[arg(long)]
        persisted: bool,
    },
    /// Check a saved editor output for invalid boundaries
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Feed a JSON event script through the editor and print the result
    Replay {
        /// JSON array of events, e.g. [{"type": "pointer_down", "at": [10, 10]}]
        #[arg(long)]
        script: PathBuf,
        #[arg(long, default_value_t = 1000)]
        width: u32,
        #[arg(long, default_value_t = 1000)]
        height: u32,
        #[arg(long, value_enum, default_value_t = Mode::Polygon)]
        mode: Mode,
        #[arg(long, default_value_t = 8.0)]
        magnetism: f64,
        /// Saved editor output to start from
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let value = match cmd.action {
        Action::Solve {
            anchors,
            width,
            height,
            persisted,
        } => solve(&anchors, FloorplanSize::new(width, height), persisted)?,
        Action::Validate { input } => validate(&input)?,
        Action::Replay {
            script,
            width,
            height,
            mode,
            magnetism,
            input,
        } => {
            let cfg = EditorCfg {
                magnetism,
                mode: mode.into(),
                ..EditorCfg::default()
            };
            replay(
                &script,
                FloorplanSize::new(width, height),
                cfg,
                input.as_deref(),
            )?
        }
    };
    io::emit(&value, cmd.out.as_deref())
}

fn map_json(map: &AffineMap) -> Value {
    json!({
        "m": [[map.m[(0, 0)], map.m[(0, 1)]], [map.m[(1, 0)], map.m[(1, 1)]]],
        "t": [map.t.x, map.t.y],
    })
}

fn lng_lat(p: &Point2) -> Value {
    json!({"lng": p.x, "lat": p.y})
}

fn solve(anchors: &Path, size: FloorplanSize, persisted: bool) -> Result<Value> {
    tracing::info!(anchors = %anchors.display(), ?size, persisted, "solve");
    if size.is_empty() {
        bail!("floorplan width and height must be positive");
    }
    let text = io::read_text(anchors)?;
    let (local, geo) =
        anchors_from_json(&text).with_context(|| format!("parsing {}", anchors.display()))?;
    let mut georef = Georeference::with_local_anchors(size, local, GeomCfg::default());
    let solved = if persisted {
        georef.load_geo_anchors(geo)
    } else {
        georef.place_geo_anchors(geo)
    };
    let Some(map) = solved.copied() else {
        bail!("local anchors are collinear; no mapping");
    };
    let corners: Vec<Value> = georef
        .corners()
        .map(|cs| cs.iter().map(lng_lat).collect())
        .unwrap_or_default();
    Ok(json!({
        "status": georef.status(),
        "map": map_json(&map),
        "corners": corners,
        "pixels_per_meter": georef.pixels_per_meter(),
    }))
}

fn validate(input: &Path) -> Result<Value> {
    tracing::info!(input = %input.display(), "validate");
    let text = io::read_text(input)?;
    let (size, shapes) = EditorOutput::from_json(&text)
        .and_then(EditorOutput::into_shapes)
        .with_context(|| format!("parsing {}", input.display()))?;
    let mut editor = Editor::new(size, EditorCfg::default());
    editor.replace_shapes(shapes);
    let eps = editor.cfg().geom.eps;
    let invalid: Vec<usize> = (0..editor.shapes().len())
        .filter(|&i| is_invalid(editor.shapes(), i, eps))
        .collect();
    let status = editor.status();
    if status == Status::Error {
        tracing::warn!(?invalid, "invalid boundaries");
    }
    Ok(json!({
        "status": status,
        "shapes": editor.shapes().len(),
        "invalid": invalid,
    }))
}

fn replay(
    script: &Path,
    size: FloorplanSize,
    cfg: EditorCfg,
    input: Option<&Path>,
) -> Result<Value> {
    tracing::info!(script = %script.display(), ?size, mode = ?cfg.mode, "replay");
    if size.is_empty() {
        bail!("floorplan width and height must be positive");
    }
    let events: Vec<Event> = serde_json::from_str(&io::read_text(script)?)
        .with_context(|| format!("parsing {}", script.display()))?;
    let mut editor = Editor::new(size, cfg);
    if let Some(path) = input {
        let (_, shapes) = EditorOutput::from_json(&io::read_text(path)?)
            .and_then(EditorOutput::into_shapes)
            .with_context(|| format!("parsing {}", path.display()))?;
        editor.replace_shapes(shapes);
    }
    let mut effects = 0usize;
    for event in events {
        effects += editor.handle(event).len();
    }
    tracing::info!(effects, shapes = editor.shapes().len(), "replayed");
    Ok(json!({
        "status": editor.status(),
        "idle": editor.state().is_idle(),
        "output": editor.output(),
    }))
}

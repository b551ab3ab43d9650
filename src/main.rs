//! Replays a recorded input script against a headless controller and
//! prints the camera pose after every frame as JSON lines.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use trackball::camera::PerspectiveProjection;
use trackball::{
    Camera, ControlEvent, HeadlessSurface, InputEvent, Options, Projection,
    TrackballControls,
};

#[derive(Parser)]
#[command(name = "trackball-replay")]
#[command(about = "Replay an input script through the trackball controller")]
struct Cli {
    /// JSON input script.
    script: PathBuf,
    /// TOML options preset; defaults apply when omitted.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Print only the final pose.
    #[arg(long)]
    summary: bool,
}

#[derive(Deserialize)]
struct Script {
    #[serde(default)]
    surface: SurfaceSize,
    #[serde(default)]
    camera: CameraSetup,
    frames: Vec<Frame>,
}

#[derive(Deserialize)]
struct SurfaceSize {
    width: f64,
    height: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct CameraSetup {
    position: DVec3,
    target: DVec3,
    projection: Projection,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 5.0),
            target: DVec3::ZERO,
            projection: Projection::Perspective(
                PerspectiveProjection::default(),
            ),
        }
    }
}

/// Events delivered before one or more `update()` calls.
#[derive(Deserialize)]
struct Frame {
    #[serde(default)]
    events: Vec<InputEvent>,
    #[serde(default = "one")]
    repeat: u32,
}

const fn one() -> u32 {
    1
}

#[derive(Serialize)]
struct PoseRecord {
    frame: usize,
    position: DVec3,
    up: DVec3,
    target: DVec3,
    zoom: f64,
    changed: bool,
    events: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("reading {}", cli.script.display()))?;
    let script: Script = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", cli.script.display()))?;
    let options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let surface =
        HeadlessSurface::new(script.surface.width, script.surface.height);
    let mut camera =
        Camera::new(script.camera.position, script.camera.projection);
    if script.surface.height > 0.0 {
        camera.set_aspect(script.surface.width / script.surface.height);
    }
    let mut controls =
        TrackballControls::new(camera, script.camera.target, surface, options)?;

    let seen = Rc::new(RefCell::new(Vec::new()));
    for event in [ControlEvent::Start, ControlEvent::Change, ControlEvent::End]
    {
        let sink = Rc::clone(&seen);
        let _ = controls.subscribe(event, move |e| {
            sink.borrow_mut().push(format!("{e:?}").to_lowercase());
        });
    }

    let mut frame = 0;
    let mut last = None;
    for step in &script.frames {
        for event in &step.events {
            controls.handle_event(event)?;
        }
        for _ in 0..step.repeat {
            let changed = controls.update()?;
            let record = PoseRecord {
                frame,
                position: controls.camera().position,
                up: controls.camera().up,
                target: controls.target(),
                zoom: controls.camera().zoom(),
                changed,
                events: seen.borrow_mut().drain(..).collect(),
            };
            if !cli.summary {
                println!("{}", serde_json::to_string(&record)?);
            }
            last = Some(record);
            frame += 1;
        }
    }
    controls.dispose();

    log::info!("replayed {frame} frames from {}", cli.script.display());
    if cli.summary {
        if let Some(record) = last {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}

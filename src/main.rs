//! microchip-circuit CLI entry point.
//!
//! Reads a CircuitState JSON document and writes the rendered SVG.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use clap::Parser;

use microchip_circuit::geometry::{Point, Transform};
use microchip_circuit::{
    CircuitView, DisplaySettings, JsonFileStorage, MemoryStorage, OPEN_SUBCOMPONENT_IDS_KEY,
    OpennessStorage, RenderConfig, RenderContext, Result, parse_state,
};

/// Hierarchical circuit JSON to SVG diagram.
#[derive(Parser, Debug)]
#[command(
    name = "microchip-circuit",
    version = env!("MICROCHIP_CIRCUIT_VERSION"),
    about = "Hierarchical circuit JSON to SVG diagram"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<String>,

    /// Expand the nested chip at this path-id (e.g. 2 or 2.0); repeatable
    #[arg(long = "open", value_name = "PATH_ID")]
    open: Vec<String>,

    /// Settings file holding display settings and persisted open ids
    #[arg(short = 's', long = "settings")]
    settings: Option<String>,

    /// Viewport width in pixels
    #[arg(long = "width", default_value = "800")]
    width: f64,

    /// Viewport height in pixels
    #[arg(long = "height", default_value = "600")]
    height: f64,

    /// Start from this SVG transform, e.g. "translate(10 20) scale(2)"
    #[arg(short = 't', long = "transform", value_name = "TRANSFORM", allow_hyphen_values = true)]
    transform: Option<String>,

    /// Zoom about the viewport centre (clamped to 1..5)
    #[arg(short = 'z', long = "zoom")]
    zoom: Option<f64>,

    /// Pan by dx,dy pixels after zooming
    #[arg(long = "pan", value_name = "DX,DY", value_parser = parse_pan, allow_hyphen_values = true)]
    pan: Option<(f64, f64)>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

fn parse_pan(s: &str) -> std::result::Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let dx = dx.trim().parse().map_err(|_| format!("invalid dx '{dx}'"))?;
    let dy = dy.trim().parse().map_err(|_| format!("invalid dy '{dy}'"))?;
    Ok((dx, dy))
}

fn render(cli: &Cli, text: &str) -> Result<String> {
    let state = parse_state(text)?;

    let mut config = RenderConfig::new().with_size(cli.width, cli.height);
    let storage: Box<dyn OpennessStorage> = match &cli.settings {
        Some(path) => {
            config.display = DisplaySettings::from_file(Path::new(path))?;
            Box::new(JsonFileStorage::new(path))
        }
        None => Box::new(MemoryStorage::new()),
    };

    let mut view = CircuitView::mount(
        state,
        storage,
        OPEN_SUBCOMPONENT_IDS_KEY,
        RenderContext::new(config),
    )?;
    for id in &cli.open {
        view.open(id)?;
    }
    if let Some(ref attr) = cli.transform {
        view.set_transform(Transform::parse(attr));
    }
    if let Some(k) = cli.zoom {
        view.zoom_to(k, Point::new(cli.width / 2.0, cli.height / 2.0));
    }
    if let Some((dx, dy)) = cli.pan {
        view.drag(dx, dy);
    }

    let svg = view.render_svg()?;
    view.unmount()?;
    Ok(svg)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Read input from file or stdin
    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        buf
    };

    let rendered = match render(&cli, &text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            eprintln!("error: cannot write '{}': {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}

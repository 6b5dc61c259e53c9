mod config;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use geocore::{LonLat, lon_lat_to_mercator};
use interact::{LabelPrompt, Session};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use viewport::{InputEvent, PointerEvent};

use crate::config::MapConfig;

/// Headless session driver for the municipal GIS viewer.
///
/// The interactive surface (tiles, canvas, controls) is owned by a render
/// backend; this binary exercises the session contract directly: swipe divider
/// placement, label creation, and the read-only feature-info fetch.
#[derive(Debug, Parser)]
#[command(name = "kartvy", about = "Municipal GIS viewer session driver")]
struct Args {
    /// JSON map configuration; defaults to the built-in Lund setup.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport size in css pixels.
    #[arg(long, default_value = "1024x768", value_parser = parse_size)]
    size: [u32; 2],

    /// View zoom level.
    #[arg(long, default_value_t = 12.0)]
    zoom: f64,

    /// Report the swipe divider position for this fraction (percent of width).
    #[arg(long)]
    swipe: Option<f64>,

    /// Place a label at "LON,LAT"; the text is read from stdin (EOF cancels).
    #[arg(long, value_parser = parse_lon_lat)]
    label: Option<LonLat>,

    /// Query feature info at "LON,LAT" and print the returned markup.
    #[arg(long, value_parser = parse_lon_lat)]
    query: Option<LonLat>,
}

fn parse_size(value: &str) -> Result<[u32; 2], String> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width {w:?}"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height {h:?}"))?;
    if w == 0 || h == 0 {
        return Err("viewport size must be non-zero".into());
    }
    Ok([w, h])
}

fn parse_lon_lat(value: &str) -> Result<LonLat, String> {
    let (lon, lat) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got {value:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("bad longitude {lon:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude {lat:?}"))?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("coordinate out of range: {lon},{lat}"));
    }
    Ok(LonLat::new(lon, lat))
}

/// Modal label prompt over stdin; EOF or a read error is a cancel.
struct StdinPrompt;

impl LabelPrompt for StdinPrompt {
    fn request_text(&mut self) -> Option<String> {
        eprint!("New observation? Name it and press enter (empty for a bare marker): ");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

fn pointer_at(session: &Session, geo: LonLat) -> Option<PointerEvent> {
    let coordinate = lon_lat_to_mercator(geo);
    let pixel = session.map().pixel_for_coordinate(coordinate)?;
    Some(PointerEvent::new(pixel, coordinate))
}

async fn fetch_feature_info(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    response.text().await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = match std::fs::read_to_string(path) {
                Ok(json) => json,
                Err(err) => {
                    error!(path = %path.display(), %err, "cannot read config");
                    std::process::exit(1);
                }
            };
            match MapConfig::from_json(&json) {
                Ok(config) => config,
                Err(err) => {
                    error!(path = %path.display(), %err, "invalid config");
                    std::process::exit(1);
                }
            }
        }
        None => MapConfig::lund(),
    };

    let mut session = config.into_session();
    session.map_mut().set_size(args.size);
    session.map_mut().view_mut().set_zoom(args.zoom);

    let mut prompt = StdinPrompt;

    if let Some(pct) = args.swipe {
        session.push_input(InputEvent::SwipeInput(pct));
    }

    if let Some(geo) = args.label {
        match pointer_at(&session, geo) {
            Some(event) => session.push_input(InputEvent::ContextMenu(event)),
            None => warn!("label coordinate is outside the viewport"),
        }
    }

    if let Some(geo) = args.query {
        match pointer_at(&session, geo) {
            Some(event) => session.push_input(InputEvent::SingleClick(event)),
            None => warn!("query coordinate is outside the viewport"),
        }
    }

    session.pump(&mut prompt);

    if args.swipe.is_some() {
        let size = session.map().size().unwrap_or([0, 0]);
        let x = size[0] as f64 * session.swipe().fraction() / 100.0;
        println!(
            "swipe divider at {x:.1}px of {}px ({}%)",
            size[0],
            session.swipe().fraction()
        );
    }

    for overlay in session.overlays().overlays() {
        info!(
            x = overlay.position.x,
            y = overlay.position.y,
            text = %overlay.text,
            "label overlay created"
        );
    }

    let queries = session.take_pending_queries();
    if !queries.is_empty() {
        let client = reqwest::Client::new();
        for url in queries {
            info!(%url, "feature info request");
            match fetch_feature_info(&client, &url).await {
                Ok(html) => session.apply_query_response(&html),
                Err(err) => {
                    // Failed fetches leave the panel unchanged.
                    warn!(%err, "feature info fetch failed");
                }
            }
        }
        println!("{}", session.panel().html());
    } else if args.query.is_some() {
        info!("layer not queryable at this view; no request issued");
    }

    if args.swipe.is_none() && args.query.is_none() && args.label.is_none() {
        println!("layers (paint order): {:?}", session.layer_order());
        println!("view center: {:?}", session.map().view().center());
        println!("resolution: {:.3} m/px", session.map().view().resolution());
        session.push_input(InputEvent::ShowHelp);
        session.pump(&mut prompt);
        if let Some(help) = session.take_help_request() {
            println!("\n{help}");
        }
    }
}

//! Interactive front end: load a street map and bus system, then answer
//! shortest/fastest queries on a line-oriented prompt.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use viabus_core::loading::{create_planner, LoadConfig, PlannerTunables};
use viabus_core::prelude::*;

/// Multimodal route planner over an OSM extract and a bus system
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// OSM XML extract of the street network
    #[arg(long)]
    osm: PathBuf,
    /// CSV of StopID,NodeID rows
    #[arg(long)]
    stops: PathBuf,
    /// CSV of RouteName,StopID rows
    #[arg(long)]
    routes: PathBuf,
    /// Walking speed in miles per hour
    #[arg(long)]
    walk_speed: Option<f64>,
    /// Biking speed in miles per hour
    #[arg(long)]
    bike_speed: Option<f64>,
    /// Speed assumed for buses and unsigned roads, in miles per hour
    #[arg(long)]
    speed_limit: Option<f64>,
    /// Bus dwell time per hop, in seconds
    #[arg(long)]
    bus_stop_time: Option<f64>,
}

const HELP: &str = "Commands:
  help | ?                   show this text
  exit | quit                leave the planner
  count                      number of street nodes
  node <id>                  show a street node
  shortest <src> <dest>      shortest street path in miles
  fastest <src> <dest>       fastest multimodal path in hours";

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let planner = create_planner(
        &LoadConfig {
            osm_path: args.osm,
            stops_path: args.stops,
            routes_path: args.routes,
        },
        &PlannerTunables {
            walk_speed_mph: args.walk_speed,
            bike_speed_mph: args.bike_speed,
            default_speed_limit_mph: args.speed_limit,
            bus_stop_time_s: args.bus_stop_time,
        },
    )?;

    repl(&planner, io::stdin().lock(), io::stdout())
}

fn repl(planner: &TransportationPlanner, input: impl BufRead, mut out: impl Write) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match words.next() {
            None => {}
            Some("help" | "?") => writeln!(out, "{HELP}")?,
            Some("exit" | "quit") => break,
            Some("count") => writeln!(out, "{} nodes", planner.node_count())?,
            Some("node") => match words.next().and_then(parse_id) {
                Some(id) => show_node(planner, id, &mut out)?,
                None => eprintln!("Usage: node <id>"),
            },
            Some("shortest") => match parse_pair(&mut words) {
                Some((src, dest)) => show_shortest(planner, src, dest, &mut out)?,
                None => eprintln!("Usage: shortest <src> <dest>"),
            },
            Some("fastest") => match parse_pair(&mut words) {
                Some((src, dest)) => show_fastest(planner, src, dest, &mut out)?,
                None => eprintln!("Usage: fastest <src> <dest>"),
            },
            Some(other) => eprintln!("Unknown command {other:?}, try help"),
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

fn parse_id(word: &str) -> Option<NodeId> {
    word.parse().ok()
}

fn parse_pair<'a>(words: &mut impl Iterator<Item = &'a str>) -> Option<(NodeId, NodeId)> {
    let src = words.next().and_then(parse_id)?;
    let dest = words.next().and_then(parse_id)?;
    Some((src, dest))
}

fn show_node(planner: &TransportationPlanner, id: NodeId, out: &mut impl Write) -> Result<()> {
    match planner.config().street_map.node_by_id(id) {
        Some(node) => writeln!(
            out,
            "Node {} at ({:.6}, {:.6})",
            node.id,
            node.geometry.y(),
            node.geometry.x()
        )?,
        None => eprintln!("No node {id}"),
    }
    Ok(())
}

fn show_shortest(
    planner: &TransportationPlanner,
    src: NodeId,
    dest: NodeId,
    out: &mut impl Write,
) -> Result<()> {
    let mut path = Vec::new();
    let miles = planner.find_shortest_path(src, dest, &mut path);
    if miles == NO_PATH_EXISTS {
        eprintln!("No path exists between {src} and {dest}");
        return Ok(());
    }
    writeln!(out, "Shortest path is {miles:.2} mi:")?;
    for node_id in path {
        writeln!(out, "  {node_id}")?;
    }
    Ok(())
}

fn show_fastest(
    planner: &TransportationPlanner,
    src: NodeId,
    dest: NodeId,
    out: &mut impl Write,
) -> Result<()> {
    let mut steps = Vec::new();
    let hours = planner.find_fastest_path(src, dest, &mut steps);
    if hours == NO_PATH_EXISTS {
        eprintln!("No path exists between {src} and {dest}");
        return Ok(());
    }
    writeln!(out, "Fastest path takes {}:", format_hours(hours))?;
    let mut lines = Vec::new();
    planner.path_description(&steps, &mut lines);
    for line in lines {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

fn format_hours(hours: f64) -> String {
    let total_seconds = (hours * 3600.0).round() as u64;
    let (h, m, s) = (
        total_seconds / 3600,
        total_seconds % 3600 / 60,
        total_seconds % 60,
    );
    match (h, m, s) {
        (0, 0, s) => format!("{s} s"),
        (0, m, s) => format!("{m} min {s} s"),
        (h, m, _) => format!("{h} h {m} min"),
    }
}

//! incident_day: one logical day of traffic on a small street grid.
//!
//! Periodic congestion updates run on every road segment, a handful of
//! scripted incidents hit the commute corridor, and at the end of every
//! simulated hour the corner-to-corner commute is re-routed with both
//! Dijkstra and A*.
//!
//! Usage: `incident_day [config.json]`, where the optional file holds a
//! `SimConfig` (any field may be omitted).  `RUST_LOG` controls verbosity.

mod network;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rts_core::{NodeId, SimConfig, SimTime};
use rts_route::{CostMetric, HaversineHeuristic, PathResult, astar_with, dijkstra_to};
use rts_sim::traffic::{self, INCIDENT_PRIORITY};
use rts_sim::{
    IncidentKind, ProcessedEvent, Scheduler, SchedulerObserver, TrafficEvent, TrafficParams,
    TrafficWorld,
};

use network::{FREE_FLOW_M_PER_MIN, build_grid, grid_id};

const MINUTES_PER_HOUR: f64 = 60.0;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts processed and failed events per hour.
#[derive(Default)]
struct HourlyTally {
    processed: usize,
    failed:    usize,
}

impl SchedulerObserver<TrafficEvent> for HourlyTally {
    fn on_event_end(&mut self, event: &ProcessedEvent, _world: &TrafficWorld) {
        self.processed += 1;
        if !event.is_ok() {
            self.failed += 1;
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

/// Incidents scripted on the commute corridor, as minutes after start.
fn script_incidents(sched: &mut Scheduler<TrafficEvent>, start: SimTime) -> Result<()> {
    let (w1, w2, w3) = (grid_id(0, 1), grid_id(0, 2), grid_id(0, 3));
    let scripted = [
        (7.5 * MINUTES_PER_HOUR, w1, w2, IncidentKind::MajorAccident, Some(90.0)),
        (11.0 * MINUTES_PER_HOUR, w2, w3, IncidentKind::RoadConstruction, None),
        (17.25 * MINUTES_PER_HOUR, w2, w3, IncidentKind::EmergencyClosure, Some(45.0)),
    ];
    for (at, from, to, kind, duration) in scripted {
        sched.schedule(
            start.offset(at),
            INCIDENT_PRIORITY,
            TrafficEvent::Incident { from, to, kind, duration },
        )?;
    }

    // Afternoon storm doubles incident and congestion rates.
    sched.schedule(start.offset(13.0 * MINUTES_PER_HOUR), INCIDENT_PRIORITY, TrafficEvent::Weather {
        factor: 2.0,
    })?;
    sched.schedule(start.offset(16.0 * MINUTES_PER_HOUR), INCIDENT_PRIORITY, TrafficEvent::Weather {
        factor: 1.0,
    })?;
    Ok(())
}

// ── Routing ───────────────────────────────────────────────────────────────────

struct HourlyRoutes {
    dijkstra: PathResult,
    astar:    PathResult,
}

fn route(world: &TrafficWorld, from: NodeId, to: NodeId) -> Result<HourlyRoutes> {
    let heuristic = HaversineHeuristic::for_max_speed(FREE_FLOW_M_PER_MIN);
    let graph = world.graph();
    Ok(HourlyRoutes {
        dijkstra: dijkstra_to(graph, from, to, CostMetric::Time)?,
        astar:    astar_with(graph, from, to, &heuristic, CostMetric::Time)?,
    })
}

fn describe(path: &PathResult) -> String {
    if !path.found {
        return "unreachable".to_owned();
    }
    let hops: Vec<String> = path.nodes.iter().map(|n| n.0.to_string()).collect();
    format!("{:.2} min via {}", path.cost, hops.join("→"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let (graph, origin, destination) = build_grid();
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        seed = config.seed,
        "street grid built"
    );

    let params = TrafficParams { update_interval: config.update_interval, ..TrafficParams::default() };
    let world = TrafficWorld::new(graph, params, config.seed)?;
    let mut sched = Scheduler::with_start(world, config.start());
    let seeded = traffic::start(&mut sched, config.update_interval)?;
    script_incidents(&mut sched, config.start())?;
    info!(seeded, pending = sched.queue().len(), "events scheduled");

    let free_flow = route(sched.world(), origin, destination)?;
    println!("free flow: {}", describe(&free_flow.dijkstra));
    println!();
    println!("{:<6} {:>9} {:>7} {:>8} {:>6}  {}", "hour", "events", "failed", "blocked", "congest", "route");
    println!("{}", "-".repeat(72));

    let hours = (config.duration() / MINUTES_PER_HOUR).ceil() as u32;
    let mut last_cost = free_flow.dijkstra.cost;
    let t0 = Instant::now();

    for hour in 1..=hours {
        let until = config.start().offset(hour as f64 * MINUTES_PER_HOUR).0.min(config.end_time);
        let mut tally = HourlyTally::default();
        sched.process_until_observed(until, &mut tally);

        let routes = route(sched.world(), origin, destination)?;
        let (d, a) = (&routes.dijkstra, &routes.astar);
        if d.found != a.found || (d.found && (d.cost - a.cost).abs() > 1e-3) {
            warn!(hour, dijkstra = d.cost, astar = a.cost, "dijkstra and astar disagree");
        }
        if d.cost != last_cost {
            info!(hour, from = last_cost, to = d.cost, "commute cost changed");
            last_cost = d.cost;
        }

        let stats = sched.world().stats();
        println!(
            "{:<6} {:>9} {:>7} {:>8} {:>6.2}  {}",
            hour,
            tally.processed,
            tally.failed,
            stats.blocked_roads,
            stats.average_congestion,
            describe(d),
        );
    }

    let elapsed = t0.elapsed();
    let sched_stats = sched.stats();
    let traffic_stats = sched.world().stats();
    println!();
    println!("Simulated {hours} h in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  events: {} processed, {} failed, {} pending",
        sched_stats.processed, sched_stats.failed, sched_stats.pending
    );
    println!(
        "  incidents: {} started, {} resolved, {} active",
        traffic_stats.total_incidents, traffic_stats.resolved_incidents, traffic_stats.active_incidents
    );
    let mut kinds: Vec<_> = traffic_stats.incident_counts.iter().collect();
    kinds.sort();
    for (kind, count) in kinds {
        println!("    {:<24} {count}", kind.description());
    }

    Ok(())
}

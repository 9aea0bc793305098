//! Traffic world: congestion and incidents that rewrite edge weights.
//!
//! Every directed edge carries an [`EdgeTraffic`] state.  Each time a
//! [`TrafficEvent`] changes that state, the edge's weight in the graph is
//! rewritten as `base_weight × travel_time_multiplier`, or `+∞` while the
//! road is blocked.  Nothing else in the graph is touched, so route queries
//! made between two processing steps see exactly the traffic as of the last
//! processed event.
//!
//! Time is read as minutes since midnight: rush-hour windows and incident
//! durations are expressed in those units.

use rand_distr::{Distribution, Normal};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use rts_core::{EventId, NodeId, SimRng, SimTime};
use rts_graph::WeightedGraph;

use crate::{EventContext, EventError, Payload, Scheduler, SimError, SimResult};

/// Priority of incident start, expiry and resolution events.
pub const INCIDENT_PRIORITY: i32 = 0;

/// Priority of periodic congestion updates; runs after incidents at the
/// same instant.
pub const UPDATE_PRIORITY: i32 = 10;

type EdgeKey = (NodeId, NodeId);

// ── TrafficLevel ──────────────────────────────────────────────────────────────

/// Congestion level of one road segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TrafficLevel {
    #[default]
    FreeFlow = 0,
    Light    = 1,
    Moderate = 2,
    Heavy    = 3,
    Gridlock = 4,
}

impl TrafficLevel {
    pub const ALL: [TrafficLevel; 5] = [
        TrafficLevel::FreeFlow,
        TrafficLevel::Light,
        TrafficLevel::Moderate,
        TrafficLevel::Heavy,
        TrafficLevel::Gridlock,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fraction of free-flow speed.
    pub fn speed_factor(self) -> f64 {
        match self {
            TrafficLevel::FreeFlow => 1.0,
            TrafficLevel::Light    => 0.85,
            TrafficLevel::Moderate => 0.6,
            TrafficLevel::Heavy    => 0.3,
            TrafficLevel::Gridlock => 0.05,
        }
    }

    /// Fraction of nominal capacity.
    pub fn capacity_factor(self) -> f64 {
        match self {
            TrafficLevel::FreeFlow => 1.0,
            TrafficLevel::Light    => 0.9,
            TrafficLevel::Moderate => 0.7,
            TrafficLevel::Heavy    => 0.4,
            TrafficLevel::Gridlock => 0.1,
        }
    }

    /// One level worse, saturating at `Gridlock`.
    pub fn worse(self) -> Self {
        Self::ALL[(self.index() + 1).min(4)]
    }

    /// One level better, saturating at `FreeFlow`.
    pub fn better(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficLevel::FreeFlow => "free_flow",
            TrafficLevel::Light    => "light",
            TrafficLevel::Moderate => "moderate",
            TrafficLevel::Heavy    => "heavy",
            TrafficLevel::Gridlock => "gridlock",
        }
    }
}

impl std::fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── IncidentKind ──────────────────────────────────────────────────────────────

/// Kind of incident affecting a road segment.  Discriminants double as the
/// severity rank (1 = least severe).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum IncidentKind {
    MinorAccident    = 1,
    MajorAccident    = 2,
    VehicleBreakdown = 3,
    RoadConstruction = 4,
    EmergencyClosure = 5,
    WeatherClosure   = 6,
    SpecialEvent     = 7,
}

impl IncidentKind {
    pub const ALL: [IncidentKind; 7] = [
        IncidentKind::MinorAccident,
        IncidentKind::MajorAccident,
        IncidentKind::VehicleBreakdown,
        IncidentKind::RoadConstruction,
        IncidentKind::EmergencyClosure,
        IncidentKind::WeatherClosure,
        IncidentKind::SpecialEvent,
    ];

    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Multiplier applied on top of the congestion speed factor.
    pub fn speed_impact(self) -> f64 {
        match self {
            IncidentKind::MinorAccident    => 0.7,
            IncidentKind::MajorAccident    => 0.3,
            IncidentKind::VehicleBreakdown => 0.8,
            IncidentKind::RoadConstruction => 0.5,
            IncidentKind::EmergencyClosure => 0.0,
            IncidentKind::WeatherClosure   => 0.0,
            IncidentKind::SpecialEvent     => 0.4,
        }
    }

    pub fn capacity_impact(self) -> f64 {
        match self {
            IncidentKind::MinorAccident    => 0.8,
            IncidentKind::MajorAccident    => 0.4,
            IncidentKind::VehicleBreakdown => 0.9,
            IncidentKind::RoadConstruction => 0.6,
            IncidentKind::EmergencyClosure => 0.0,
            IncidentKind::WeatherClosure   => 0.0,
            IncidentKind::SpecialEvent     => 0.5,
        }
    }

    /// Mean duration in minutes.
    pub fn base_duration(self) -> f64 {
        match self {
            IncidentKind::MinorAccident    => 20.0,
            IncidentKind::MajorAccident    => 60.0,
            IncidentKind::VehicleBreakdown => 15.0,
            IncidentKind::RoadConstruction => 240.0,
            IncidentKind::EmergencyClosure => 45.0,
            IncidentKind::WeatherClosure   => 120.0,
            IncidentKind::SpecialEvent     => 180.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            IncidentKind::MinorAccident    => "Minor accident",
            IncidentKind::MajorAccident    => "Major accident",
            IncidentKind::VehicleBreakdown => "Vehicle breakdown",
            IncidentKind::RoadConstruction => "Road construction",
            IncidentKind::EmergencyClosure => "Emergency road closure",
            IncidentKind::WeatherClosure   => "Weather-related closure",
            IncidentKind::SpecialEvent     => "Special event traffic",
        }
    }

    /// Kind of a spontaneous incident for a uniform draw in `[0, 1)`.
    pub fn from_draw(u: f64) -> Self {
        match u {
            u if u < 0.40 => IncidentKind::MinorAccident,
            u if u < 0.60 => IncidentKind::VehicleBreakdown,
            u if u < 0.75 => IncidentKind::MajorAccident,
            u if u < 0.85 => IncidentKind::RoadConstruction,
            u if u < 0.95 => IncidentKind::EmergencyClosure,
            u if u < 0.98 => IncidentKind::WeatherClosure,
            _ => IncidentKind::SpecialEvent,
        }
    }
}

impl std::fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

// ── EdgeTraffic ───────────────────────────────────────────────────────────────

/// Traffic state of one directed edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeTraffic {
    pub level:            TrafficLevel,
    pub incident:         Option<IncidentKind>,
    /// When the current incident expires on its own.
    pub incident_ends_at: Option<SimTime>,
    pub speed_factor:     f64,
    pub capacity_factor:  f64,
}

impl Default for EdgeTraffic {
    fn default() -> Self {
        Self {
            level:            TrafficLevel::FreeFlow,
            incident:         None,
            incident_ends_at: None,
            speed_factor:     1.0,
            capacity_factor:  1.0,
        }
    }
}

impl EdgeTraffic {
    /// Recompute both factors from the level and the active incident.
    pub fn refresh(&mut self) {
        let (speed, capacity) = self
            .incident
            .map_or((1.0, 1.0), |k| (k.speed_impact(), k.capacity_impact()));
        self.speed_factor = self.level.speed_factor() * speed;
        self.capacity_factor = self.level.capacity_factor() * capacity;
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.speed_factor <= 0.001 || self.incident == Some(IncidentKind::EmergencyClosure)
    }

    /// Factor applied to the base travel time; `+∞` when blocked.
    pub fn travel_time_multiplier(&self) -> f64 {
        if self.is_blocked() { f64::INFINITY } else { 1.0 / self.speed_factor }
    }

    /// 0 for free-flowing roads, 1 for blocked ones.
    pub fn severity(&self) -> f64 {
        if self.is_blocked() {
            return 1.0;
        }
        let congestion = self.level.index() as f64 / 4.0;
        let incident = self.incident.map_or(0.0, |k| f64::from(k.rank()) / 7.0);
        congestion.max(incident)
    }

    /// Weight to store for an edge whose untouched weight is `base`.
    pub fn apply_to(&self, base: f32) -> f32 {
        if self.is_blocked() {
            f32::INFINITY
        } else {
            (f64::from(base) * self.travel_time_multiplier()) as f32
        }
    }
}

// ── TrafficParams ─────────────────────────────────────────────────────────────

/// Tuning knobs for congestion and incident generation.
///
/// Rates are probabilities per update.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrafficParams {
    /// Chance that congestion gets one level worse.
    pub base_congestion_rate:  f64,
    /// Chance that congestion eases by one level when it did not worsen.
    pub congestion_decay_rate: f64,
    /// Chance of a spontaneous incident on a road without one.
    pub incident_base_rate:    f64,
    /// Standard deviation of incident durations, minutes.
    pub incident_duration_std: f64,
    pub min_incident_duration: f64,
    /// Multiplies both congestion and incident rates.
    pub weather_factor:        f64,
    /// Multiplies the congestion rate inside rush hours.
    pub rush_hour_factor:      f64,
    pub morning_rush_start:    f64,
    pub morning_rush_end:      f64,
    pub evening_rush_start:    f64,
    pub evening_rush_end:      f64,
    /// Minutes between congestion updates of one edge.
    pub update_interval:       f64,
}

impl Default for TrafficParams {
    fn default() -> Self {
        Self {
            base_congestion_rate:  0.1,
            congestion_decay_rate: 0.3,
            incident_base_rate:    0.05,
            incident_duration_std: 15.0,
            min_incident_duration: 5.0,
            weather_factor:        1.0,
            rush_hour_factor:      2.0,
            morning_rush_start:    7.0,
            morning_rush_end:      9.0,
            evening_rush_start:    17.0,
            evening_rush_end:      19.0,
            update_interval:       5.0,
        }
    }
}

impl TrafficParams {
    /// # Errors
    ///
    /// [`SimError::Config`] naming the first out-of-range field.
    pub fn validate(&self) -> SimResult<()> {
        let rates = [
            ("base_congestion_rate", self.base_congestion_rate),
            ("congestion_decay_rate", self.congestion_decay_rate),
            ("incident_base_rate", self.incident_base_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SimError::Config(format!("{name} must be in [0, 1], got {rate}")));
            }
        }
        check_non_negative("incident_duration_std", self.incident_duration_std)?;
        check_non_negative("min_incident_duration", self.min_incident_duration)?;
        check_non_negative("weather_factor", self.weather_factor)?;
        check_non_negative("rush_hour_factor", self.rush_hour_factor)?;
        check_interval(self.update_interval)
    }

    /// `true` if `now` (minutes) falls in a rush-hour window, ends included.
    pub fn is_rush_hour(&self, now: SimTime) -> bool {
        let hour = (now.0 / 60.0).rem_euclid(24.0);
        (self.morning_rush_start..=self.morning_rush_end).contains(&hour)
            || (self.evening_rush_start..=self.evening_rush_end).contains(&hour)
    }
}

fn check_non_negative(name: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::Config(format!("{name} must be finite and non-negative, got {value}")))
    }
}

fn check_interval(interval: f64) -> SimResult<()> {
    if interval.is_finite() && interval > 0.0 {
        Ok(())
    } else {
        Err(SimError::Config(format!("update_interval must be positive, got {interval}")))
    }
}

// ── TrafficStats ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrafficStats {
    /// Congestion updates applied.
    pub updates:            u64,
    /// Incidents started, spontaneous or triggered.
    pub total_incidents:    u64,
    pub resolved_incidents: u64,
    pub incident_counts:    FxHashMap<IncidentKind, u64>,
    /// Edges with an active incident right now.
    pub active_incidents:   usize,
    /// Edges per [`TrafficLevel`], indexed by `TrafficLevel::index`.
    pub level_counts:       [usize; 5],
    /// Mean level index over all edges.
    pub average_congestion: f64,
    pub blocked_roads:      usize,
}

// ── TrafficWorld ──────────────────────────────────────────────────────────────

/// A road graph plus the traffic state layered on it.
pub struct TrafficWorld {
    graph:        WeightedGraph,
    edges:        FxHashMap<EdgeKey, EdgeTraffic>,
    base_weights: FxHashMap<EdgeKey, f32>,
    params:       TrafficParams,
    seed:         u64,
    rng:          SimRng,
    stats:        TrafficStats,
}

impl TrafficWorld {
    /// Wrap `graph`, recording every current edge weight as its base.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `params` fails validation.
    pub fn new(graph: WeightedGraph, params: TrafficParams, seed: u64) -> SimResult<Self> {
        params.validate()?;
        let mut edges = FxHashMap::default();
        let mut base_weights = FxHashMap::default();
        for edge in graph.edges() {
            edges.insert((edge.from, edge.to), EdgeTraffic::default());
            base_weights.insert((edge.from, edge.to), edge.weight);
        }
        debug!(edges = edges.len(), seed, "traffic world created");
        Ok(Self {
            graph,
            edges,
            base_weights,
            params,
            seed,
            rng: SimRng::new(seed),
            stats: TrafficStats::default(),
        })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    pub fn into_graph(self) -> WeightedGraph {
        self.graph
    }

    pub fn params(&self) -> &TrafficParams {
        &self.params
    }

    pub fn traffic(&self, from: NodeId, to: NodeId) -> Option<&EdgeTraffic> {
        self.edges.get(&(from, to))
    }

    /// Weight the edge had before any traffic effect.
    pub fn base_weight(&self, from: NodeId, to: NodeId) -> Option<f32> {
        self.base_weights.get(&(from, to)).copied()
    }

    /// Every tracked edge, sorted.
    pub fn edge_keys(&self) -> Vec<(NodeId, NodeId)> {
        let mut keys: Vec<_> = self.edges.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Edges currently blocked, sorted.
    pub fn blocked_roads(&self) -> Vec<(NodeId, NodeId)> {
        let mut keys: Vec<_> = self
            .edges
            .iter()
            .filter(|(_, t)| t.is_blocked())
            .map(|(&k, _)| k)
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_rush_hour(&self, now: SimTime) -> bool {
        self.params.is_rush_hour(now)
    }

    /// Counters plus a snapshot of the current edge states.
    pub fn stats(&self) -> TrafficStats {
        let mut stats = self.stats.clone();
        let mut level_sum = 0usize;
        for traffic in self.edges.values() {
            stats.level_counts[traffic.level.index()] += 1;
            level_sum += traffic.level.index();
            if traffic.incident.is_some() {
                stats.active_incidents += 1;
            }
            if traffic.is_blocked() {
                stats.blocked_roads += 1;
            }
        }
        if !self.edges.is_empty() {
            stats.average_congestion = level_sum as f64 / self.edges.len() as f64;
        }
        stats
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// [`SimError::Config`] for a negative or non-finite factor.
    pub fn set_weather_factor(&mut self, factor: f64) -> SimResult<()> {
        check_non_negative("weather_factor", factor)?;
        debug!(factor, "weather factor changed");
        self.params.weather_factor = factor;
        Ok(())
    }

    /// One random congestion step on `from -> to`, possibly starting a
    /// spontaneous incident.  Returns the incident's expiry time if one
    /// started.
    pub fn step_congestion(
        &mut self,
        from: NodeId,
        to: NodeId,
        now: SimTime,
    ) -> Result<Option<SimTime>, EventError> {
        let mut chance = self.params.base_congestion_rate * self.params.weather_factor;
        if self.params.is_rush_hour(now) {
            chance *= self.params.rush_hour_factor;
        }

        let worsen = self.rng.random::<f64>() < chance;
        let ease = !worsen && self.rng.random::<f64>() < self.params.congestion_decay_rate;
        let spontaneous = self.rng.random::<f64>()
            < self.params.incident_base_rate * self.params.weather_factor;

        let state = self.state_mut(from, to)?;
        if worsen {
            state.level = state.level.worse();
        } else if ease {
            state.level = state.level.better();
        }
        state.refresh();
        let idle = state.incident.is_none();
        self.stats.updates += 1;
        self.apply_weight(from, to)?;

        if spontaneous && idle {
            let kind = IncidentKind::from_draw(self.rng.random());
            return self.apply_incident(from, to, kind, None, now).map(Some);
        }
        Ok(None)
    }

    /// Start `kind` on `from -> to` at `now`, replacing any active incident.
    ///
    /// `duration` in minutes; `None` or a negative value draws one from a
    /// normal distribution around the kind's base duration.  Returns the
    /// expiry time.
    pub fn apply_incident(
        &mut self,
        from: NodeId,
        to: NodeId,
        kind: IncidentKind,
        duration: Option<f64>,
        now: SimTime,
    ) -> Result<SimTime, EventError> {
        let duration = match duration {
            Some(d) if d.is_finite() && d >= 0.0 => d,
            _ => self.draw_duration(kind),
        };
        let ends_at = now.offset(duration);

        let state = self.state_mut(from, to)?;
        state.incident = Some(kind);
        state.incident_ends_at = Some(ends_at);
        state.refresh();
        let blocked = state.is_blocked();
        self.apply_weight(from, to)?;

        self.stats.total_incidents += 1;
        *self.stats.incident_counts.entry(kind).or_insert(0) += 1;
        info!(%from, %to, kind = kind.description(), duration, blocked, "incident started");
        Ok(ends_at)
    }

    /// Clear the incident on `from -> to`.  `Ok(false)` if there was none.
    pub fn resolve_incident(&mut self, from: NodeId, to: NodeId) -> Result<bool, EventError> {
        let state = self.state_mut(from, to)?;
        let Some(kind) = state.incident.take() else {
            return Ok(false);
        };
        state.incident_ends_at = None;
        state.refresh();
        self.apply_weight(from, to)?;

        self.stats.resolved_incidents += 1;
        info!(%from, %to, kind = kind.description(), "incident resolved");
        Ok(true)
    }

    /// Replace the base weight of `from -> to` and re-apply its traffic.
    pub fn set_base_weight(&mut self, from: NodeId, to: NodeId, weight: f32) -> Result<(), EventError> {
        let state = *self.state_mut(from, to)?;
        self.graph.try_update_edge_weight(from, to, state.apply_to(weight))?;
        self.base_weights.insert((from, to), weight);
        Ok(())
    }

    /// Back to free flow everywhere: base weights restored, counters zeroed,
    /// RNG reseeded.
    pub fn reset(&mut self) {
        for (&(from, to), &weight) in &self.base_weights {
            self.graph.update_edge_weight(from, to, weight);
        }
        for state in self.edges.values_mut() {
            *state = EdgeTraffic::default();
        }
        self.stats = TrafficStats::default();
        self.rng = SimRng::new(self.seed);
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn state_mut(&mut self, from: NodeId, to: NodeId) -> Result<&mut EdgeTraffic, EventError> {
        self.edges.get_mut(&(from, to)).ok_or(EventError::UnknownEdge { from, to })
    }

    fn apply_weight(&mut self, from: NodeId, to: NodeId) -> Result<(), EventError> {
        let key = (from, to);
        let (Some(state), Some(&base)) = (self.edges.get(&key), self.base_weights.get(&key)) else {
            return Err(EventError::UnknownEdge { from, to });
        };
        self.graph.try_update_edge_weight(from, to, state.apply_to(base))?;
        Ok(())
    }

    fn draw_duration(&mut self, kind: IncidentKind) -> f64 {
        let mean = kind.base_duration();
        let drawn = Normal::new(mean, self.params.incident_duration_std)
            .map(|d| d.sample(self.rng.inner()))
            .unwrap_or(mean);
        drawn.max(self.params.min_incident_duration)
    }
}

impl std::fmt::Debug for TrafficWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficWorld")
            .field("edges", &self.edges.len())
            .field("params", &self.params)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

// ── TrafficEvent ──────────────────────────────────────────────────────────────

/// Events that drive a [`TrafficWorld`].
#[derive(Clone, Debug, PartialEq)]
pub enum TrafficEvent {
    /// Random congestion step; reschedules itself every `update_interval`.
    Update { from: NodeId, to: NodeId },
    /// Start an incident now; it expires after `duration` minutes.
    Incident { from: NodeId, to: NodeId, kind: IncidentKind, duration: Option<f64> },
    /// Clear whatever incident the edge has.
    Resolve { from: NodeId, to: NodeId },
    /// Scheduled end of the incident that expires at `at`.  A no-op if that
    /// incident was already resolved or replaced.
    Expire { from: NodeId, to: NodeId, at: SimTime },
    /// Change the edge's base weight.
    SetWeight { from: NodeId, to: NodeId, weight: f32 },
    Weather { factor: f64 },
}

impl Payload for TrafficEvent {
    type World = TrafficWorld;

    fn execute(self, ctx: &mut EventContext<'_, Self>) -> Result<(), EventError> {
        match self {
            TrafficEvent::Update { from, to } => {
                if let Some(ends_at) = ctx.world.step_congestion(from, to, ctx.now)? {
                    ctx.schedule(ends_at, INCIDENT_PRIORITY, TrafficEvent::Expire { from, to, at: ends_at })?;
                }
                let interval = ctx.world.params.update_interval;
                ctx.schedule_after(interval, UPDATE_PRIORITY, TrafficEvent::Update { from, to })?;
            }
            TrafficEvent::Incident { from, to, kind, duration } => {
                let ends_at = ctx.world.apply_incident(from, to, kind, duration, ctx.now)?;
                ctx.schedule(ends_at, INCIDENT_PRIORITY, TrafficEvent::Expire { from, to, at: ends_at })?;
            }
            TrafficEvent::Resolve { from, to } => {
                ctx.world.resolve_incident(from, to)?;
            }
            TrafficEvent::Expire { from, to, at } => {
                let current = ctx
                    .world
                    .traffic(from, to)
                    .ok_or(EventError::UnknownEdge { from, to })?
                    .incident_ends_at;
                if current == Some(at) {
                    ctx.world.resolve_incident(from, to)?;
                }
            }
            TrafficEvent::SetWeight { from, to, weight } => {
                ctx.world.set_base_weight(from, to, weight)?;
            }
            TrafficEvent::Weather { factor } => {
                ctx.world.set_weather_factor(factor)?;
            }
        }
        Ok(())
    }

    fn label(&self) -> &'static str {
        match self {
            TrafficEvent::Update { .. } => "traffic_update",
            TrafficEvent::Incident { .. } => "incident",
            TrafficEvent::Resolve { .. } => "incident_resolve",
            TrafficEvent::Expire { .. } => "incident_expire",
            TrafficEvent::SetWeight { .. } => "set_weight",
            TrafficEvent::Weather { .. } => "weather",
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Seed one periodic [`TrafficEvent::Update`] per edge, first firing
/// `interval` minutes from now.  Returns the number of edges seeded.
///
/// # Errors
///
/// [`SimError::Config`] if `interval` is not positive and finite.
pub fn start(scheduler: &mut Scheduler<TrafficEvent>, interval: f64) -> SimResult<usize> {
    check_interval(interval)?;
    scheduler.world_mut().params.update_interval = interval;
    let keys = scheduler.world().edge_keys();
    for &(from, to) in &keys {
        scheduler.schedule_after(interval, UPDATE_PRIORITY, TrafficEvent::Update { from, to })?;
    }
    debug!(edges = keys.len(), interval, "traffic updates seeded");
    Ok(keys.len())
}

/// Queue an incident on `from -> to` at the scheduler's current time.  It
/// takes effect when the scheduler next processes events.
pub fn trigger_incident(
    scheduler: &mut Scheduler<TrafficEvent>,
    from: NodeId,
    to: NodeId,
    kind: IncidentKind,
    duration: Option<f64>,
) -> SimResult<EventId> {
    let now = scheduler.now();
    scheduler.schedule(now, INCIDENT_PRIORITY, TrafficEvent::Incident { from, to, kind, duration })
}

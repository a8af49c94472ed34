//! Shared resources, events, and states for Verdant.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Running,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const DAYS_PER_SEASON: u32 = 10;
pub const GROWTH_STAGES: u8 = 5;

/// One watering fills the plant for this many simulated days.
pub const WATERED_DAYS_PER_USE: f32 = 3.0;
/// Points drained from the shared watering can per use (can holds 0-100).
pub const WATER_CAN_COST_PER_USE: u32 = 10;
pub const WATER_CAN_CAPACITY: u32 = 100;

pub const FERTILIZER_EXPIRY_DAYS: u32 = 3;
pub const PRUNE_EXPIRY_DAYS: u32 = 5;
pub const PRUNE_PEST_REDUCTION: f32 = 0.2;
pub const PRUNE_DISEASE_REDUCTION: f32 = 0.1;

pub const FERTILIZER_PRICE: u32 = 15;
pub const PESTICIDE_PRICE: u32 = 25;
pub const WATER_REFILL_PRICE: u32 = 5;

/// Experience needed to clear level N is N * this.
pub const EXP_PER_LEVEL: u32 = 100;

pub const STARTING_MONEY: u32 = 1000;
pub const STARTING_FERTILIZER: u32 = 5;
pub const STARTING_PESTICIDE: u32 = 3;

// ═══════════════════════════════════════════════════════════════════════
// SEASONS & WEATHER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

pub const SEASONS: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

impl Season {
    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    /// Season for a 1-based day counter: ten days each, cycling forever.
    pub fn for_day(day_count: u32) -> Self {
        let idx = (day_count.saturating_sub(1) / DAYS_PER_SEASON) % 4;
        SEASONS[idx as usize]
    }

    /// Temperature sampling range in °C.
    pub fn temperature_range(self) -> (f32, f32) {
        match self {
            Season::Spring => (15.0, 25.0),
            Season::Summer => (25.0, 35.0),
            Season::Fall => (10.0, 20.0),
            Season::Winter => (-5.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Stormy,
    Snowy,
}

impl Weather {
    /// Growth rate multiplier applied while this weather holds.
    pub fn growth_multiplier(self) -> f32 {
        match self {
            Weather::Sunny => 1.2,
            Weather::Rainy => 1.5,
            Weather::Stormy => 0.8,
            Weather::Snowy => 0.3,
        }
    }

    /// Humidity sampling range in percent.
    pub fn humidity_range(self) -> (f32, f32) {
        match self {
            Weather::Sunny => (30.0, 60.0),
            Weather::Rainy => (80.0, 100.0),
            Weather::Stormy => (70.0, 90.0),
            Weather::Snowy => (60.0, 80.0),
        }
    }
}

/// Which seasons a species grows well in. Off-season growth is crippled
/// (or rejected outright at planting, depending on `SeasonPolicy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonAffinity {
    Only(Season),
    Any,
}

impl SeasonAffinity {
    pub fn multiplier(self, current: Season) -> f32 {
        match self {
            SeasonAffinity::Any => 1.0,
            SeasonAffinity::Only(s) if s == current => 1.5,
            SeasonAffinity::Only(_) => 0.3,
        }
    }

    pub fn allows(self, current: Season) -> bool {
        match self {
            SeasonAffinity::Any => true,
            SeasonAffinity::Only(s) => s == current,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentState {
    pub season: Season,
    pub weather: Weather,
    /// Fraction of the current day elapsed, in [0, 1).
    pub day_time: f32,
    /// 1-based day counter. Never resets.
    pub day_count: u32,
    pub temperature: f32,
    pub humidity: f32,
    /// Real-seconds accumulator for the weather re-roll interval.
    pub weather_elapsed_secs: f32,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self {
            season: Season::Spring,
            weather: Weather::Sunny,
            day_time: 0.0,
            day_count: 1,
            temperature: 20.0,
            humidity: 50.0,
            weather_elapsed_secs: 0.0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════

/// How growth is integrated over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthModel {
    /// Every tick advances growth by the elapsed sim-day fraction.
    Continuous,
    /// Growth advances in one full step at each day boundary.
    Daily,
}

/// Whether planting out of season is rejected or merely penalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonPolicy {
    /// Off-season planting fails with `WrongSeason`.
    Enforce,
    /// Off-season planting succeeds; the 0.3 growth multiplier still applies.
    Advisory,
}

#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    pub growth_model: GrowthModel,
    pub season_policy: SeasonPolicy,
    /// Chebyshev radius of one pesticide application.
    pub pesticide_radius: i32,
    /// Real seconds per simulated day.
    pub day_length_secs: f32,
    /// Real seconds between weather re-rolls.
    pub weather_interval_secs: f32,
    /// Per-tick probability that an unprotected plant gains disease.
    pub disease_chance: f64,
    /// Per-tick probability that a new pest appears somewhere in the garden.
    pub pest_spawn_chance: f64,
    /// Per-tick probability that a pest wanders to a neighboring cell.
    pub pest_move_chance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            growth_model: GrowthModel::Continuous,
            season_policy: SeasonPolicy::Enforce,
            pesticide_radius: 2,
            day_length_secs: 60.0,
            weather_interval_secs: 300.0,
            disease_chance: 0.001,
            pest_spawn_chance: 0.001,
            pest_move_chance: 0.1,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLANTS & GARDEN
// ═══════════════════════════════════════════════════════════════════════

/// Cell coordinates on the (unbounded) garden grid.
pub type GridPos = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    Carrot,
    Tomato,
    Pumpkin,
    Sunflower,
    Rose,
    Cactus,
}

pub const PLANT_KINDS: [PlantKind; 6] = [
    PlantKind::Carrot,
    PlantKind::Tomato,
    PlantKind::Pumpkin,
    PlantKind::Sunflower,
    PlantKind::Rose,
    PlantKind::Cactus,
];

/// Static description of a plant species. The tables live in `data`.
#[derive(Debug, Clone, Copy)]
pub struct PlantDef {
    pub kind: PlantKind,
    pub name: &'static str,
    pub seed_cost: u32,
    /// Days to full growth under neutral (1.0x) conditions.
    pub growth_days: f32,
    pub value: u32,
    pub experience: u32,
    pub season: SeasonAffinity,
    pub water_need: u8,
    pub sun_need: u8,
    /// 0.0 = defenseless, 1.0 = immune. Scales incoming pest damage.
    pub pest_resistance: f32,
    /// Same scale, for the per-tick disease roll.
    pub disease_resistance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantInstance {
    pub kind: PlantKind,
    /// Monotone growth progress in [0, 1]. 1.0 = harvestable.
    pub growth: f32,
    /// Remaining watered-days. > 0 means the plant counts as watered.
    pub water_level: f32,
    pub fertilized: bool,
    pub pruned: bool,
    pub pest_damage: f32,
    pub disease_level: f32,
    pub planted_on_day: u32,
    pub last_watered_day: Option<u32>,
    pub last_fertilized_day: Option<u32>,
    pub last_pruned_day: Option<u32>,
}

impl PlantInstance {
    pub fn new(kind: PlantKind, day: u32) -> Self {
        Self {
            kind,
            growth: 0.0,
            water_level: 0.0,
            fertilized: false,
            pruned: false,
            pest_damage: 0.0,
            disease_level: 0.0,
            planted_on_day: day,
            last_watered_day: None,
            last_fertilized_day: None,
            last_pruned_day: None,
        }
    }

    /// Display stage derived from growth. Never stored.
    pub fn stage(&self) -> u8 {
        ((self.growth * GROWTH_STAGES as f32) as u8).min(GROWTH_STAGES - 1)
    }

    pub fn is_mature(&self) -> bool {
        self.growth >= 1.0
    }

    /// Condition multiplier applied to harvest payout and experience.
    pub fn health_factor(&self) -> f32 {
        (1.0 - self.pest_damage - self.disease_level).clamp(0.5, 1.0)
    }
}

/// All living plants, keyed by grid cell. The map key is what enforces
/// one-plant-per-cell.
///
/// Not serialized directly: JSON object keys must be strings, so the save
/// module flattens this to a list of entries.
#[derive(Resource, Debug, Clone, Default)]
pub struct GardenState {
    pub plants: HashMap<GridPos, PlantInstance>,
}

impl GardenState {
    pub fn plant_at(&self, pos: GridPos) -> Option<&PlantInstance> {
        self.plants.get(&pos)
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.plants.contains_key(&pos)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PESTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PestKind {
    Aphids,
    Caterpillars,
    Beetles,
    Slugs,
}

pub const PEST_KINDS: [PestKind; 4] = [
    PestKind::Aphids,
    PestKind::Caterpillars,
    PestKind::Beetles,
    PestKind::Slugs,
];

#[derive(Debug, Clone, Copy)]
pub struct PestDef {
    pub kind: PestKind,
    pub name: &'static str,
    /// Pest damage dealt per tick is this times 0.01.
    pub damage_rate: f32,
    pub move_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PestInstance {
    pub kind: PestKind,
    pub pos: GridPos,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PestState {
    pub pests: Vec<PestInstance>,
}

// ═══════════════════════════════════════════════════════════════════════
// LEDGER — money, supplies, progression
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub money: u32,
    pub seeds: HashMap<PlantKind, u32>,
    pub fertilizer: u32,
    pub pesticide: u32,
    /// Shared watering can, 0-100 points.
    pub water_can: u32,
    pub experience: u32,
    pub level: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        let mut seeds = HashMap::new();
        seeds.insert(PlantKind::Carrot, 10);
        seeds.insert(PlantKind::Tomato, 8);
        seeds.insert(PlantKind::Pumpkin, 5);
        seeds.insert(PlantKind::Sunflower, 3);
        seeds.insert(PlantKind::Rose, 2);
        seeds.insert(PlantKind::Cactus, 1);

        Self {
            money: STARTING_MONEY,
            seeds,
            fertilizer: STARTING_FERTILIZER,
            pesticide: STARTING_PESTICIDE,
            water_can: WATER_CAN_CAPACITY,
            experience: 0,
            level: 1,
        }
    }
}

impl Ledger {
    pub fn credit(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Withdraws `amount` or fails without touching the balance.
    pub fn debit(&mut self, amount: u32) -> Result<(), ActionError> {
        if amount > self.money {
            return Err(ActionError::InsufficientFunds);
        }
        self.money -= amount;
        Ok(())
    }

    pub fn seed_count(&self, kind: PlantKind) -> u32 {
        self.seeds.get(&kind).copied().unwrap_or(0)
    }

    /// Consumes one seed or fails without touching anything.
    pub fn take_seed(&mut self, kind: PlantKind) -> Result<(), ActionError> {
        match self.seeds.get_mut(&kind) {
            Some(n) if *n > 0 => {
                *n -= 1;
                Ok(())
            }
            _ => Err(ActionError::OutOfSeed),
        }
    }

    pub fn add_seeds(&mut self, kind: PlantKind, count: u32) {
        *self.seeds.entry(kind).or_insert(0) += count;
    }

    pub fn exp_to_next_level(&self) -> u32 {
        self.level * EXP_PER_LEVEL
    }

    /// Adds experience. Returns true if a level was gained.
    ///
    /// On level-up the experience counter resets to zero; any remainder past
    /// the threshold is discarded, and at most one level is gained per call.
    pub fn gain_experience(&mut self, amount: u32) -> bool {
        self.experience = self.experience.saturating_add(amount);
        if self.experience >= self.exp_to_next_level() {
            self.level += 1;
            self.experience = 0;
            true
        } else {
            false
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STATS & ACHIEVEMENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenStats {
    pub plants_planted: u32,
    pub plants_harvested: u32,
    pub pests_eliminated: u32,
    pub storms_survived: u32,
    pub money_earned: u64,
    pub days_played: u32,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    /// Ids of unlocked achievements, in unlock order. Write-once.
    pub unlocked: Vec<String>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ACTION ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// Why a user action was rejected. Every rejection leaves all simulation
/// state exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    OccupiedPlot,
    OutOfSeed,
    WrongSeason,
    NoPlantAtPosition,
    WaterCanEmpty,
    NoFertilizer,
    AlreadyFertilized,
    AlreadyPruned,
    NotReady,
    NoPesticide,
    InsufficientFunds,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ActionError::OccupiedPlot => "that plot already has a plant",
            ActionError::OutOfSeed => "no seeds of that kind left",
            ActionError::WrongSeason => "that species cannot be planted this season",
            ActionError::NoPlantAtPosition => "no plant at that position",
            ActionError::WaterCanEmpty => "the watering can is empty",
            ActionError::NoFertilizer => "no fertilizer left",
            ActionError::AlreadyFertilized => "that plant is already fertilized",
            ActionError::AlreadyPruned => "that plant was pruned recently",
            ActionError::NotReady => "that plant is not ready to harvest",
            ActionError::NoPesticide => "no pesticide left",
            ActionError::InsufficientFunds => "not enough money",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for ActionError {}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// A new day has begun. `season` is the (possibly new) season of that day.
#[derive(Event, Debug, Clone)]
pub struct DayStartedEvent {
    pub day: u32,
    pub season: Season,
}

#[derive(Event, Debug, Clone)]
pub struct SeasonChangedEvent {
    pub season: Season,
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct WeatherChangedEvent {
    pub weather: Weather,
    pub humidity: f32,
}

// ── Action requests (host → simulation) ────────────────────────────────

#[derive(Event, Debug, Clone)]
pub struct PlantRequestEvent {
    pub pos: GridPos,
    pub kind: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct WaterRequestEvent {
    pub pos: GridPos,
}

#[derive(Event, Debug, Clone)]
pub struct FertilizeRequestEvent {
    pub pos: GridPos,
}

#[derive(Event, Debug, Clone)]
pub struct PruneRequestEvent {
    pub pos: GridPos,
}

#[derive(Event, Debug, Clone)]
pub struct HarvestRequestEvent {
    pub pos: GridPos,
}

#[derive(Event, Debug, Clone)]
pub struct PesticideRequestEvent {
    pub pos: GridPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOrder {
    Seed(PlantKind),
    Fertilizer,
    Pesticide,
    WaterRefill,
}

#[derive(Event, Debug, Clone)]
pub struct PurchaseRequestEvent {
    pub order: PurchaseOrder,
}

// ── Action outcomes (simulation → host) ────────────────────────────────

#[derive(Event, Debug, Clone)]
pub struct ActionFailedEvent {
    pub error: ActionError,
}

#[derive(Event, Debug, Clone)]
pub struct PlantedEvent {
    pub pos: GridPos,
    pub kind: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct HarvestedEvent {
    pub pos: GridPos,
    pub kind: PlantKind,
    pub payout: u32,
    pub experience: u32,
}

#[derive(Event, Debug, Clone)]
pub struct PestsRemovedEvent {
    pub center: GridPos,
    pub count: u32,
}

#[derive(Event, Debug, Clone)]
pub struct LevelUpEvent {
    pub level: u32,
}

#[derive(Event, Debug, Clone)]
pub struct AchievementUnlockedEvent {
    pub id: String,
    pub name: String,
    pub reward: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

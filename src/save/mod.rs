//! Persistence — snapshot the whole simulation to JSON and restore it.
//!
//! The plant map is flattened to a list of (position, plant) entries because
//! JSON object keys must be strings. Writes go through a temp file followed
//! by a rename so a crash mid-write never corrupts an existing save.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;
pub const DEFAULT_SAVE_FILE: &str = "verdant_save.json";

// ═══════════════════════════════════════════════════════════════════════
// SAVE DATA
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub environment: EnvironmentState,
    pub plants: Vec<(GridPos, PlantInstance)>,
    pub pests: PestState,
    pub ledger: Ledger,
    pub stats: GardenStats,
    pub achievements: Achievements,
}

/// Captures the live resources into a serializable snapshot.
pub fn snapshot(
    env: &EnvironmentState,
    garden: &GardenState,
    pests: &PestState,
    ledger: &Ledger,
    stats: &GardenStats,
    achievements: &Achievements,
) -> SaveData {
    let mut plants: Vec<(GridPos, PlantInstance)> = garden
        .plants
        .iter()
        .map(|(pos, plant)| (*pos, plant.clone()))
        .collect();
    // Stable order so identical worlds produce identical files.
    plants.sort_by_key(|(pos, _)| *pos);

    SaveData {
        version: SAVE_VERSION,
        environment: env.clone(),
        plants,
        pests: pests.clone(),
        ledger: ledger.clone(),
        stats: *stats,
        achievements: achievements.clone(),
    }
}

/// Applies a snapshot back onto the live resources.
pub fn restore(
    data: SaveData,
    env: &mut EnvironmentState,
    garden: &mut GardenState,
    pests: &mut PestState,
    ledger: &mut Ledger,
    stats: &mut GardenStats,
    achievements: &mut Achievements,
) {
    *env = data.environment;
    garden.plants = data.plants.into_iter().collect();
    *pests = data.pests;
    *ledger = data.ledger;
    *stats = data.stats;
    *achievements = data.achievements;
}

// ═══════════════════════════════════════════════════════════════════════
// ENCODING & FILE I/O
// ═══════════════════════════════════════════════════════════════════════

pub fn encode(data: &SaveData) -> Result<String, String> {
    serde_json::to_string_pretty(data).map_err(|e| format!("failed to encode save: {e}"))
}

pub fn decode(text: &str) -> Result<SaveData, String> {
    let data: SaveData =
        serde_json::from_str(text).map_err(|e| format!("failed to decode save: {e}"))?;
    if data.version != SAVE_VERSION {
        warn!(
            "[Save] Version mismatch: file is v{}, expected v{}",
            data.version, SAVE_VERSION
        );
    }
    Ok(data)
}

/// Writes atomically: temp file in the same directory, then rename.
pub fn write_save(path: &Path, data: &SaveData) -> Result<(), String> {
    let json = encode(data)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| format!("failed to write {}: {e}", tmp.display()))?;
    fs::rename(&tmp, path).map_err(|e| format!("failed to rename into {}: {e}", path.display()))
}

pub fn read_save(path: &Path) -> Result<SaveData, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    decode(&text)
}

fn default_save_path() -> PathBuf {
    PathBuf::from(DEFAULT_SAVE_FILE)
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS & PLUGIN
// ═══════════════════════════════════════════════════════════════════════

/// Sent by the host to trigger a save. `path = None` uses the default file.
#[derive(Event, Debug, Clone, Default)]
pub struct SaveRequestEvent {
    pub path: Option<PathBuf>,
}

/// Sent by the host to load a save file.
#[derive(Event, Debug, Clone, Default)]
pub struct LoadRequestEvent {
    pub path: Option<PathBuf>,
}

#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            // Saving and loading stay available while paused.
            .add_systems(Update, (handle_save_requests, handle_load_requests));
    }
}

fn handle_save_requests(
    mut requests: EventReader<SaveRequestEvent>,
    env: Res<EnvironmentState>,
    garden: Res<GardenState>,
    pests: Res<PestState>,
    ledger: Res<Ledger>,
    stats: Res<GardenStats>,
    achievements: Res<Achievements>,
    mut complete_writer: EventWriter<SaveCompleteEvent>,
) {
    for req in requests.read() {
        let path = req.path.clone().unwrap_or_else(default_save_path);
        let data = snapshot(&env, &garden, &pests, &ledger, &stats, &achievements);

        match write_save(&path, &data) {
            Ok(()) => {
                info!(
                    "[Save] Saved day {} to {}",
                    data.environment.day_count,
                    path.display()
                );
                complete_writer.send(SaveCompleteEvent {
                    success: true,
                    error_message: None,
                });
            }
            Err(e) => {
                warn!("[Save] Save failed: {e}");
                complete_writer.send(SaveCompleteEvent {
                    success: false,
                    error_message: Some(e),
                });
            }
        }
    }
}

fn handle_load_requests(
    mut requests: EventReader<LoadRequestEvent>,
    mut env: ResMut<EnvironmentState>,
    mut garden: ResMut<GardenState>,
    mut pests: ResMut<PestState>,
    mut ledger: ResMut<Ledger>,
    mut stats: ResMut<GardenStats>,
    mut achievements: ResMut<Achievements>,
    mut complete_writer: EventWriter<LoadCompleteEvent>,
) {
    for req in requests.read() {
        let path = req.path.clone().unwrap_or_else(default_save_path);

        match read_save(&path) {
            Ok(data) => {
                restore(
                    data,
                    &mut env,
                    &mut garden,
                    &mut pests,
                    &mut ledger,
                    &mut stats,
                    &mut achievements,
                );
                info!(
                    "[Save] Loaded {} — day {}, {} plants",
                    path.display(),
                    env.day_count,
                    garden.plants.len()
                );
                complete_writer.send(LoadCompleteEvent {
                    success: true,
                    error_message: None,
                });
            }
            Err(e) => {
                warn!("[Save] Load failed: {e}");
                complete_writer.send(LoadCompleteEvent {
                    success: false,
                    error_message: Some(e),
                });
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

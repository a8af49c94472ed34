//! Pest domain — spawning, wandering, feeding, and pesticide.
//!
//! Pests live on the same grid as plants. A pest standing on a plant chews
//! on it every tick; a pest whose plant disappears starves and is removed
//! rather than re-targeting.

use bevy::prelude::*;
use rand::Rng;

use crate::data::pest_def;
use crate::shared::*;

pub struct PestPlugin;

impl Plugin for PestPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_tick, update_tick, handle_pesticide_requests)
                .run_if(in_state(GameState::Running)),
        );
    }
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn spawn_tick(
    config: Res<SimConfig>,
    garden: Res<GardenState>,
    mut pests: ResMut<PestState>,
) {
    let mut rng = rand::thread_rng();
    if let Some(pest) = try_spawn_pest(&garden, config.pest_spawn_chance, &mut rng) {
        info!("[Pests] {:?} appeared at {:?}", pest.kind, pest.pos);
        pests.pests.push(pest);
    }
}

fn update_tick(
    config: Res<SimConfig>,
    mut garden: ResMut<GardenState>,
    mut pests: ResMut<PestState>,
) {
    let mut rng = rand::thread_rng();
    advance_pests(&mut garden, &mut pests, config.pest_move_chance, &mut rng);
}

fn handle_pesticide_requests(
    mut requests: EventReader<PesticideRequestEvent>,
    config: Res<SimConfig>,
    mut pests: ResMut<PestState>,
    mut ledger: ResMut<Ledger>,
    mut removed_writer: EventWriter<PestsRemovedEvent>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for req in requests.read() {
        match apply_pesticide(&mut pests, &mut ledger, req.pos, config.pesticide_radius) {
            Ok(count) => {
                info!(
                    "[Pests] Pesticide at {:?} removed {} pest(s) ({} doses left)",
                    req.pos, count, ledger.pesticide
                );
                removed_writer.send(PestsRemovedEvent {
                    center: req.pos,
                    count,
                });
            }
            Err(error) => {
                warn!("[Pests] Pesticide at {:?} rejected: {}", req.pos, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

// ─── Pure rules ───────────────────────────────────────────────────────────────

/// Rolls the per-tick spawn check. A new pest of a random kind appears at a
/// randomly chosen plant's position; an empty garden spawns nothing.
pub fn try_spawn_pest(
    garden: &GardenState,
    spawn_chance: f64,
    rng: &mut impl Rng,
) -> Option<PestInstance> {
    if garden.plants.is_empty() || !rng.gen_bool(spawn_chance.clamp(0.0, 1.0)) {
        return None;
    }

    let positions: Vec<GridPos> = garden.plants.keys().copied().collect();
    let pos = positions[rng.gen_range(0..positions.len())];
    let kind = PEST_KINDS[rng.gen_range(0..PEST_KINDS.len())];
    Some(PestInstance { kind, pos })
}

/// One pest tick: feed, maybe wander, starve.
///
/// A pest on a plant deals `damage_rate * 0.01`, scaled down by the species'
/// pest resistance, then may step one cell in a random direction (faster
/// kinds wander more often). A pest with no plant under it is removed; it
/// never re-targets.
pub fn advance_pests(
    garden: &mut GardenState,
    pests: &mut PestState,
    move_chance: f64,
    rng: &mut impl Rng,
) {
    pests.pests.retain_mut(|pest| {
        let Some(plant) = garden.plants.get_mut(&pest.pos) else {
            return false;
        };

        let def = pest_def(pest.kind);
        let resistance = crate::data::plant_def(plant.kind).pest_resistance;
        let damage = def.damage_rate * 0.01 * (1.0 - resistance);
        plant.pest_damage = (plant.pest_damage + damage).min(1.0);

        let wander = (move_chance * def.move_speed as f64).clamp(0.0, 1.0);
        if wander > 0.0 && rng.gen_bool(wander) {
            pest.pos.0 += rng.gen_range(-1..=1);
            pest.pos.1 += rng.gen_range(-1..=1);
        }
        true
    });
}

/// Removes every pest within Chebyshev `radius` of `pos`.
///
/// Consumes exactly one dose of pesticide per application, no matter how
/// many pests (including zero) are caught in the radius.
pub fn apply_pesticide(
    pests: &mut PestState,
    ledger: &mut Ledger,
    pos: GridPos,
    radius: i32,
) -> Result<u32, ActionError> {
    if ledger.pesticide == 0 {
        return Err(ActionError::NoPesticide);
    }
    ledger.pesticide -= 1;

    let before = pests.pests.len();
    pests.pests.retain(|pest| {
        let dx = (pest.pos.0 - pos.0).abs();
        let dy = (pest.pos.1 - pos.1).abs();
        dx.max(dy) > radius
    });
    Ok((before - pests.pests.len()) as u32)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

//! Economy domain — purchases, progression stats, and achievements.

pub mod achievements;
pub mod shop;
pub mod stats;

use bevy::prelude::*;

use crate::shared::*;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_purchase_requests,
                stats::track_planted,
                stats::track_harvested,
                stats::track_pests_eliminated,
                stats::track_day_started,
                achievements::check_achievements,
            )
                .run_if(in_state(GameState::Running)),
        );
    }
}

fn handle_purchase_requests(
    mut requests: EventReader<PurchaseRequestEvent>,
    mut ledger: ResMut<Ledger>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for req in requests.read() {
        match shop::purchase(&mut ledger, req.order) {
            Ok(()) => info!(
                "[Economy] Bought {:?} ({} money left)",
                req.order, ledger.money
            ),
            Err(error) => {
                warn!("[Economy] Purchase {:?} rejected: {}", req.order, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

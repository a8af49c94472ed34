mod shared;
mod data;
mod environment;
mod garden;
mod pests;
mod economy;
mod save;

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 30.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(StatesPlugin)
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .insert_resource(SimConfig {
            // Demo pacing: a day every five seconds, weather every ten.
            day_length_secs: 5.0,
            weather_interval_secs: 10.0,
            ..Default::default()
        })
        .init_resource::<EnvironmentState>()
        .init_resource::<GardenState>()
        .init_resource::<PestState>()
        .init_resource::<Ledger>()
        .init_resource::<GardenStats>()
        .init_resource::<Achievements>()
        // Events
        .add_event::<DayStartedEvent>()
        .add_event::<SeasonChangedEvent>()
        .add_event::<WeatherChangedEvent>()
        .add_event::<PlantRequestEvent>()
        .add_event::<WaterRequestEvent>()
        .add_event::<FertilizeRequestEvent>()
        .add_event::<PruneRequestEvent>()
        .add_event::<HarvestRequestEvent>()
        .add_event::<PesticideRequestEvent>()
        .add_event::<PurchaseRequestEvent>()
        .add_event::<ActionFailedEvent>()
        .add_event::<PlantedEvent>()
        .add_event::<HarvestedEvent>()
        .add_event::<PestsRemovedEvent>()
        .add_event::<LevelUpEvent>()
        .add_event::<AchievementUnlockedEvent>()
        // Domain plugins
        .add_plugins(environment::EnvironmentPlugin)
        .add_plugins(garden::GardenPlugin)
        .add_plugins(pests::PestPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(save::SavePlugin)
        // Demo driver
        .add_systems(Startup, demo_plant_starters)
        .add_systems(Update, demo_caretaker.run_if(in_state(GameState::Running)))
        .run();
}

/// Puts the first few seeds in the ground so the demo has something to tend.
fn demo_plant_starters(mut plant_writer: EventWriter<PlantRequestEvent>) {
    for (pos, kind) in [
        ((0, 0), PlantKind::Carrot),
        ((1, 0), PlantKind::Carrot),
        ((0, 1), PlantKind::Rose),
    ] {
        plant_writer.send(PlantRequestEvent { pos, kind });
    }
}

/// A simple automated gardener: waters dry plants, harvests mature ones,
/// replants the freed plot, and restocks at the shop when supplies run out.
fn demo_caretaker(
    garden: Res<GardenState>,
    ledger: Res<Ledger>,
    mut harvested_reader: EventReader<HarvestedEvent>,
    mut water_writer: EventWriter<WaterRequestEvent>,
    mut harvest_writer: EventWriter<HarvestRequestEvent>,
    mut plant_writer: EventWriter<PlantRequestEvent>,
    mut purchase_writer: EventWriter<PurchaseRequestEvent>,
) {
    if ledger.water_can < WATER_CAN_COST_PER_USE {
        purchase_writer.send(PurchaseRequestEvent {
            order: PurchaseOrder::WaterRefill,
        });
    }

    for (pos, plant) in garden.plants.iter() {
        if plant.is_mature() {
            harvest_writer.send(HarvestRequestEvent { pos: *pos });
        } else if plant.water_level <= 0.0 && ledger.water_can >= WATER_CAN_COST_PER_USE {
            water_writer.send(WaterRequestEvent { pos: *pos });
        }
    }

    // Replant every freed plot with the same species, buying seed if needed.
    for ev in harvested_reader.read() {
        if ledger.seed_count(ev.kind) == 0 {
            purchase_writer.send(PurchaseRequestEvent {
                order: PurchaseOrder::Seed(ev.kind),
            });
        }
        plant_writer.send(PlantRequestEvent {
            pos: ev.pos,
            kind: ev.kind,
        });
    }
}

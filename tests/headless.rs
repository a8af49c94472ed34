//! Headless integration tests for Verdant.
//!
//! These tests exercise the simulation's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register the domain
//! plugins, and verify the request-event surface end to end.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use verdant::economy::EconomyPlugin;
use verdant::environment::EnvironmentPlugin;
use verdant::garden::actions::{harvest, plant};
use verdant::garden::growth::integrate_growth;
use verdant::garden::GardenPlugin;
use verdant::pests::PestPlugin;
use verdant::save::{LoadRequestEvent, SavePlugin, SaveRequestEvent};
use verdant::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources, events, and domain
/// plugins registered but NO rendering, windowing, or real-time pacing.
fn build_test_app(config: SimConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.insert_resource(config)
        .init_resource::<EnvironmentState>()
        .init_resource::<GardenState>()
        .init_resource::<PestState>()
        .init_resource::<Ledger>()
        .init_resource::<GardenStats>()
        .init_resource::<Achievements>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<DayStartedEvent>()
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
        .add_event::<AchievementUnlockedEvent>();

    // ── Domain plugins ───────────────────────────────────────────────────
    app.add_plugins((
        EnvironmentPlugin,
        GardenPlugin,
        PestPlugin,
        EconomyPlugin,
        SavePlugin,
    ));

    app
}

/// Default test configuration: deterministic (no stochastic hazards) and with
/// an effectively infinite day so the real-time clock never interferes.
fn quiet_config() -> SimConfig {
    SimConfig {
        disease_chance: 0.0,
        pest_spawn_chance: 0.0,
        pest_move_chance: 0.0,
        day_length_secs: 1.0e9,
        weather_interval_secs: 1.0e9,
        ..Default::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot smoke
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_smoke() {
    let mut app = build_test_app(quiet_config());

    for _ in 0..60 {
        app.update();
    }

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Running,
        "simulation should boot straight into Running"
    );
    assert!(app.world().resource::<GardenState>().plants.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Planting via the event surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_plant_request_flows_to_stats_and_achievement() {
    let mut app = build_test_app(quiet_config());
    app.update();

    app.world_mut().send_event(PlantRequestEvent {
        pos: (0, 0),
        kind: PlantKind::Carrot,
    });

    // One update to handle the request, one for the stats listener, one for
    // the achievement checker to observe the new stats.
    for _ in 0..3 {
        app.update();
    }

    let garden = app.world().resource::<GardenState>();
    assert!(garden.is_occupied((0, 0)));

    let ledger = app.world().resource::<Ledger>();
    assert_eq!(ledger.seed_count(PlantKind::Carrot), 9);

    let stats = app.world().resource::<GardenStats>();
    assert_eq!(stats.plants_planted, 1);

    let achievements = app.world().resource::<Achievements>();
    assert!(
        achievements.is_unlocked("first_plant"),
        "first planting should unlock the starter achievement"
    );
    // Starting 1000, +50 achievement reward; seeds came from starting stock.
    assert_eq!(app.world().resource::<Ledger>().money, 1050);
}

#[test]
fn test_occupied_plot_rejected_through_events() {
    let mut app = build_test_app(quiet_config());
    app.update();

    app.world_mut().send_event(PlantRequestEvent {
        pos: (2, 2),
        kind: PlantKind::Carrot,
    });
    app.world_mut().send_event(PlantRequestEvent {
        pos: (2, 2),
        kind: PlantKind::Rose,
    });
    for _ in 0..2 {
        app.update();
    }

    let garden = app.world().resource::<GardenState>();
    assert_eq!(garden.plants.len(), 1);
    assert_eq!(garden.plant_at((2, 2)).map(|p| p.kind), Some(PlantKind::Carrot));

    let ledger = app.world().resource::<Ledger>();
    assert_eq!(ledger.seed_count(PlantKind::Carrot), 9, "first seed spent");
    assert_eq!(ledger.seed_count(PlantKind::Rose), 2, "rejected planting spends nothing");
}

#[test]
fn test_wrong_season_honors_policy() {
    // Enforce: winter tomato is rejected.
    let mut app = build_test_app(quiet_config());
    app.world_mut().resource_mut::<EnvironmentState>().season = Season::Winter;
    app.update();

    app.world_mut().send_event(PlantRequestEvent {
        pos: (0, 0),
        kind: PlantKind::Tomato,
    });
    app.update();
    assert!(app.world().resource::<GardenState>().plants.is_empty());

    // Advisory: same request goes through.
    let mut app = build_test_app(SimConfig {
        season_policy: SeasonPolicy::Advisory,
        ..quiet_config()
    });
    app.world_mut().resource_mut::<EnvironmentState>().season = Season::Winter;
    app.update();

    app.world_mut().send_event(PlantRequestEvent {
        pos: (0, 0),
        kind: PlantKind::Tomato,
    });
    app.update();
    assert!(app.world().resource::<GardenState>().is_occupied((0, 0)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Harvest flow
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_harvest_request_pays_and_counts() {
    let mut app = build_test_app(quiet_config());
    app.update();

    {
        let mut garden = app.world_mut().resource_mut::<GardenState>();
        let mut plant = PlantInstance::new(PlantKind::Carrot, 1);
        plant.growth = 1.0;
        garden.plants.insert((4, 4), plant);
    }
    let money_before = app.world().resource::<Ledger>().money;

    app.world_mut().send_event(HarvestRequestEvent { pos: (4, 4) });
    for _ in 0..2 {
        app.update();
    }

    assert!(app.world().resource::<GardenState>().plants.is_empty());
    assert_eq!(app.world().resource::<Ledger>().money, money_before + 15);
    let stats = app.world().resource::<GardenStats>();
    assert_eq!(stats.plants_harvested, 1);
    assert_eq!(stats.money_earned, 15);
}

#[test]
fn test_immature_harvest_is_a_no_op() {
    let mut app = build_test_app(quiet_config());
    app.update();

    {
        let mut garden = app.world_mut().resource_mut::<GardenState>();
        let mut plant = PlantInstance::new(PlantKind::Carrot, 1);
        plant.growth = 0.5;
        garden.plants.insert((4, 4), plant);
    }
    let money_before = app.world().resource::<Ledger>().money;

    app.world_mut().send_event(HarvestRequestEvent { pos: (4, 4) });
    for _ in 0..2 {
        app.update();
    }

    let garden = app.world().resource::<GardenState>();
    assert_eq!(garden.plant_at((4, 4)).map(|p| p.growth), Some(0.5));
    assert_eq!(app.world().resource::<Ledger>().money, money_before);
    assert_eq!(app.world().resource::<GardenStats>().plants_harvested, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Economy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_underfunded_purchase_rejected_through_events() {
    let mut app = build_test_app(quiet_config());
    app.update();

    {
        let mut ledger = app.world_mut().resource_mut::<Ledger>();
        ledger.money = 3;
    }
    app.world_mut().send_event(PurchaseRequestEvent {
        order: PurchaseOrder::Fertilizer,
    });
    app.update();

    let ledger = app.world().resource::<Ledger>();
    assert_eq!(ledger.money, 3, "failed debit leaves the balance untouched");
    assert_eq!(ledger.fertilizer, STARTING_FERTILIZER);
}

#[test]
fn test_shop_restock_round_trip() {
    let mut app = build_test_app(quiet_config());
    app.update();

    {
        let mut ledger = app.world_mut().resource_mut::<Ledger>();
        ledger.water_can = 0;
    }
    app.world_mut().send_event(PurchaseRequestEvent {
        order: PurchaseOrder::WaterRefill,
    });
    app.world_mut().send_event(PurchaseRequestEvent {
        order: PurchaseOrder::Seed(PlantKind::Pumpkin),
    });
    app.update();

    let ledger = app.world().resource::<Ledger>();
    assert_eq!(ledger.water_can, WATER_CAN_CAPACITY);
    assert_eq!(ledger.seed_count(PlantKind::Pumpkin), 6);
    assert_eq!(
        ledger.money,
        STARTING_MONEY - WATER_REFILL_PRICE - 25 // pumpkin seed costs 25
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Pests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_pesticide_request_counts_kills() {
    let mut app = build_test_app(quiet_config());
    app.update();

    {
        let mut pests = app.world_mut().resource_mut::<PestState>();
        pests.pests = vec![
            PestInstance { kind: PestKind::Aphids, pos: (0, 0) },
            PestInstance { kind: PestKind::Beetles, pos: (1, 1) },
            PestInstance { kind: PestKind::Slugs, pos: (10, 10) },
        ];
        // No plants in the garden: orphaned pests would normally starve, so
        // park plants under them to keep them alive through the update.
    }
    {
        let mut garden = app.world_mut().resource_mut::<GardenState>();
        for pos in [(0, 0), (1, 1), (10, 10)] {
            garden.plants.insert(pos, PlantInstance::new(PlantKind::Cactus, 1));
        }
    }

    app.world_mut().send_event(PesticideRequestEvent { pos: (0, 0) });
    for _ in 0..2 {
        app.update();
    }

    let pests = app.world().resource::<PestState>();
    assert_eq!(pests.pests.len(), 1, "only the far pest survives");
    assert_eq!(app.world().resource::<GardenStats>().pests_eliminated, 2);
    assert_eq!(
        app.world().resource::<Ledger>().pesticide,
        STARTING_PESTICIDE - 1
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Day boundaries, storms, daily growth model
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_day_boundary_counts_days_and_storms() {
    let mut app = build_test_app(quiet_config());
    app.world_mut().resource_mut::<EnvironmentState>().weather = Weather::Stormy;
    app.update();

    app.world_mut().send_event(DayStartedEvent {
        day: 2,
        season: Season::Spring,
    });
    app.update();

    let stats = app.world().resource::<GardenStats>();
    assert_eq!(stats.days_played, 1);
    assert_eq!(stats.storms_survived, 1);
}

#[test]
fn test_weather_warrior_unlocks_at_five_storms() {
    let mut app = build_test_app(quiet_config());
    app.world_mut().resource_mut::<EnvironmentState>().weather = Weather::Stormy;
    app.update();

    for day in 2..=6 {
        app.world_mut().send_event(DayStartedEvent {
            day,
            season: Season::Spring,
        });
        app.update();
    }
    app.update(); // achievement checker observes the final stats

    let achievements = app.world().resource::<Achievements>();
    assert!(achievements.is_unlocked("weather_warrior"));
    let stats = app.world().resource::<GardenStats>();
    assert_eq!(stats.storms_survived, 5);
}

#[test]
fn test_daily_growth_model_steps_on_day_events() {
    let mut app = build_test_app(SimConfig {
        growth_model: GrowthModel::Daily,
        ..quiet_config()
    });
    app.update();

    {
        let mut garden = app.world_mut().resource_mut::<GardenState>();
        garden
            .plants
            .insert((0, 0), PlantInstance::new(PlantKind::Carrot, 1));
    }

    app.world_mut().send_event(DayStartedEvent {
        day: 2,
        season: Season::Spring,
    });
    app.update();

    // Dry carrot in sunny spring: (1/12) * 0.5 * 1.2 * 1.5 per day.
    let expected = (1.0 / 12.0) * 0.5 * 1.2 * 1.5;
    let growth = app
        .world()
        .resource::<GardenState>()
        .plant_at((0, 0))
        .map(|p| p.growth)
        .expect("plant survives the day");
    assert!((growth - expected).abs() < 1e-5, "growth was {growth}");
}

#[test]
fn test_fertilizer_expires_across_day_boundaries() {
    let mut app = build_test_app(quiet_config());
    app.update();

    {
        let mut garden = app.world_mut().resource_mut::<GardenState>();
        let mut plant = PlantInstance::new(PlantKind::Carrot, 1);
        plant.fertilized = true;
        plant.last_fertilized_day = Some(1);
        garden.plants.insert((0, 0), plant);
    }

    for day in [2, 3, 4] {
        app.world_mut().send_event(DayStartedEvent {
            day,
            season: Season::Spring,
        });
        app.update();
    }
    assert!(
        app.world()
            .resource::<GardenState>()
            .plant_at((0, 0))
            .is_some_and(|p| p.fertilized),
        "still active on day 4"
    );

    app.world_mut().send_event(DayStartedEvent {
        day: 5,
        season: Season::Spring,
    });
    app.update();
    assert!(
        app.world()
            .resource::<GardenState>()
            .plant_at((0, 0))
            .is_some_and(|p| !p.fertilized),
        "expired on day 5"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Pause state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_paused_state_ignores_requests() {
    let mut app = build_test_app(quiet_config());
    app.update();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Paused);
    app.update(); // process state transition

    app.world_mut().send_event(PlantRequestEvent {
        pos: (0, 0),
        kind: PlantKind::Carrot,
    });
    for _ in 0..3 {
        app.update();
    }

    assert!(
        app.world().resource::<GardenState>().plants.is_empty(),
        "garden systems must not run while paused"
    );
    assert_eq!(
        app.world().resource::<Ledger>().seed_count(PlantKind::Carrot),
        10
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Deterministic end-to-end scenario (pure call surface)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_end_to_end_plant_grow_harvest() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut garden = GardenState::default();
    let mut ledger = Ledger::default();
    ledger.money = 100;
    ledger.seeds.insert(PlantKind::Carrot, 5);

    let env = EnvironmentState::default(); // day 1, Spring, Sunny
    let mut rng = StdRng::seed_from_u64(99);

    plant(
        &mut garden,
        &mut ledger,
        env.season,
        SeasonPolicy::Enforce,
        (0, 0),
        PlantKind::Carrot,
        env.day_count,
    )
    .expect("planting succeeds");
    assert_eq!(ledger.seed_count(PlantKind::Carrot), 4);
    assert_eq!(garden.plant_at((0, 0)).map(|p| p.growth), Some(0.0));

    // Never watered, never fertilized, no hazards: growth advances at
    // (1/12) * 0.5 * 1.2 * 1.5 per day, so maturity lands within 14 days.
    let mut ticks = 0;
    while !garden.plant_at((0, 0)).is_some_and(|p| p.is_mature()) {
        integrate_growth(&mut garden, &env, 0.0, 0.1, &mut rng);
        ticks += 1;
        assert!(ticks < 2_000, "carrot must mature in bounded time");
    }

    let outcome = harvest(&mut garden, &mut ledger, (0, 0)).expect("harvest succeeds");
    assert_eq!(outcome.payout, 15, "untouched carrot pays full value");
    assert_eq!(ledger.money, 115);
    assert!(garden.plants.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Save / load through the event surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_save_load_round_trip_through_events() {
    let dir = std::env::temp_dir().join("verdant_headless_save_test");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("roundtrip.json");

    let mut app = build_test_app(quiet_config());
    app.update();

    {
        let mut garden = app.world_mut().resource_mut::<GardenState>();
        let mut plant = PlantInstance::new(PlantKind::Rose, 3);
        plant.growth = 0.7;
        plant.water_level = 2.0;
        garden.plants.insert((1, 2), plant);
    }
    {
        let mut env = app.world_mut().resource_mut::<EnvironmentState>();
        env.day_count = 17;
        env.season = Season::Summer;
    }
    {
        let mut ledger = app.world_mut().resource_mut::<Ledger>();
        ledger.money = 777;
    }

    app.world_mut().send_event(SaveRequestEvent {
        path: Some(path.clone()),
    });
    app.update();
    assert!(path.exists(), "save file written");

    // Wreck the live state, then load it back.
    {
        let mut garden = app.world_mut().resource_mut::<GardenState>();
        garden.plants.clear();
    }
    {
        let mut ledger = app.world_mut().resource_mut::<Ledger>();
        ledger.money = 0;
    }

    app.world_mut().send_event(LoadRequestEvent {
        path: Some(path.clone()),
    });
    app.update();

    let garden = app.world().resource::<GardenState>();
    let restored = garden.plant_at((1, 2)).expect("plant restored");
    assert_eq!(restored.kind, PlantKind::Rose);
    assert!((restored.growth - 0.7).abs() < 1e-6);
    assert_eq!(app.world().resource::<Ledger>().money, 777);
    assert_eq!(app.world().resource::<EnvironmentState>().day_count, 17);

    std::fs::remove_dir_all(&dir).ok();
}

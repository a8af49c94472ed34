//! Static species and pest tables.
//!
//! Everything here is resolved at compile time. A `PlantKind` or `PestKind`
//! value is a valid index into its table by construction, so lookups never
//! fail.

use crate::shared::*;

// ─── Plant species ────────────────────────────────────────────────────────────

pub const PLANTS: &[PlantDef] = &[
    PlantDef {
        kind: PlantKind::Carrot,
        name: "Carrot",
        seed_cost: 8,
        growth_days: 12.0,
        value: 15,
        experience: 5,
        season: SeasonAffinity::Only(Season::Spring),
        water_need: 3,
        sun_need: 2,
        pest_resistance: 0.7,
        disease_resistance: 0.8,
    },
    PlantDef {
        kind: PlantKind::Tomato,
        name: "Tomato",
        seed_cost: 15,
        growth_days: 18.0,
        value: 35,
        experience: 10,
        season: SeasonAffinity::Only(Season::Summer),
        water_need: 4,
        sun_need: 3,
        pest_resistance: 0.5,
        disease_resistance: 0.6,
    },
    PlantDef {
        kind: PlantKind::Pumpkin,
        name: "Pumpkin",
        seed_cost: 25,
        growth_days: 25.0,
        value: 60,
        experience: 15,
        season: SeasonAffinity::Only(Season::Fall),
        water_need: 5,
        sun_need: 2,
        pest_resistance: 0.8,
        disease_resistance: 0.7,
    },
    PlantDef {
        kind: PlantKind::Sunflower,
        name: "Sunflower",
        seed_cost: 20,
        growth_days: 15.0,
        value: 30,
        experience: 12,
        season: SeasonAffinity::Only(Season::Summer),
        water_need: 3,
        sun_need: 4,
        pest_resistance: 0.6,
        disease_resistance: 0.8,
    },
    PlantDef {
        kind: PlantKind::Rose,
        name: "Rose",
        seed_cost: 35,
        growth_days: 20.0,
        value: 80,
        experience: 20,
        season: SeasonAffinity::Only(Season::Spring),
        water_need: 4,
        sun_need: 3,
        pest_resistance: 0.4,
        disease_resistance: 0.5,
    },
    PlantDef {
        kind: PlantKind::Cactus,
        name: "Cactus",
        seed_cost: 40,
        growth_days: 30.0,
        value: 100,
        experience: 25,
        season: SeasonAffinity::Only(Season::Summer),
        water_need: 1,
        sun_need: 5,
        pest_resistance: 0.9,
        disease_resistance: 0.9,
    },
];

pub fn plant_def(kind: PlantKind) -> &'static PlantDef {
    match kind {
        PlantKind::Carrot => &PLANTS[0],
        PlantKind::Tomato => &PLANTS[1],
        PlantKind::Pumpkin => &PLANTS[2],
        PlantKind::Sunflower => &PLANTS[3],
        PlantKind::Rose => &PLANTS[4],
        PlantKind::Cactus => &PLANTS[5],
    }
}

// ─── Pest kinds ───────────────────────────────────────────────────────────────

pub const PESTS: &[PestDef] = &[
    PestDef {
        kind: PestKind::Aphids,
        name: "Aphids",
        damage_rate: 0.1,
        move_speed: 0.5,
    },
    PestDef {
        kind: PestKind::Caterpillars,
        name: "Caterpillars",
        damage_rate: 0.15,
        move_speed: 0.3,
    },
    PestDef {
        kind: PestKind::Beetles,
        name: "Beetles",
        damage_rate: 0.2,
        move_speed: 0.4,
    },
    PestDef {
        kind: PestKind::Slugs,
        name: "Slugs",
        damage_rate: 0.12,
        move_speed: 0.2,
    },
];

pub fn pest_def(kind: PestKind) -> &'static PestDef {
    match kind {
        PestKind::Aphids => &PESTS[0],
        PestKind::Caterpillars => &PESTS[1],
        PestKind::Beetles => &PESTS[2],
        PestKind::Slugs => &PESTS[3],
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_lookup_matches_kind() {
        for kind in PLANT_KINDS {
            assert_eq!(plant_def(kind).kind, kind);
        }
    }

    #[test]
    fn test_pest_lookup_matches_kind() {
        for kind in PEST_KINDS {
            assert_eq!(pest_def(kind).kind, kind);
        }
    }

    #[test]
    fn test_plant_values_sane() {
        for def in PLANTS {
            assert!(def.growth_days > 0.0);
            assert!(def.value > def.seed_cost, "{} should sell above seed cost", def.name);
            assert!((0.0..=1.0).contains(&def.pest_resistance));
            assert!((0.0..=1.0).contains(&def.disease_resistance));
        }
    }

    #[test]
    fn test_cactus_is_hardy() {
        let cactus = plant_def(PlantKind::Cactus);
        assert_eq!(cactus.water_need, 1);
        assert!(cactus.pest_resistance >= 0.9);
    }
}

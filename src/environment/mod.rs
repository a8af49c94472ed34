//! Environment domain — the clock of the simulation.
//!
//! Responsible for:
//! - Advancing day_time / day_count from real elapsed seconds
//! - Deriving the season from the day counter (10 days per season)
//! - Re-rolling weather on a fixed interval with season-weighted odds
//! - Sampling temperature (per season) and humidity (per weather)
//! - Sending DayStartedEvent, SeasonChangedEvent, and WeatherChangedEvent

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (tick_clock, reroll_weather).run_if(in_state(GameState::Running)),
        );
    }
}

// ─── Clock ────────────────────────────────────────────────────────────────────

/// Advances the day-fraction clock. Every crossed day boundary emits a
/// DayStartedEvent; season changes additionally emit SeasonChangedEvent.
fn tick_clock(
    time: Res<Time>,
    config: Res<SimConfig>,
    mut env: ResMut<EnvironmentState>,
    mut day_writer: EventWriter<DayStartedEvent>,
    mut season_writer: EventWriter<SeasonChangedEvent>,
) {
    let dt_days = if config.day_length_secs > 0.0 {
        time.delta_secs() / config.day_length_secs
    } else {
        0.0
    };

    let mut rng = rand::thread_rng();
    let days_started = advance_clock(&mut env, dt_days, &mut rng);

    for offset in (0..days_started).rev() {
        let day = env.day_count - offset;
        let season = Season::for_day(day);
        day_writer.send(DayStartedEvent { day, season });

        if season != Season::for_day(day - 1) {
            season_writer.send(SeasonChangedEvent { season, day });
            info!("[Environment] Season changed to {:?} on day {}", season, day);
        }

        info!(
            "[Environment] Day {} begins — {:?}, {:?}, {:.1}°C",
            day, season, env.weather, env.temperature
        );
    }
}

/// Pure clock step. Accumulates `dt_days` into `day_time`, rolling the day
/// counter (and season / temperature) over each boundary crossed.
///
/// Returns the number of day boundaries crossed, so callers can emit one
/// event per started day even when a large step spans several.
pub fn advance_clock(env: &mut EnvironmentState, dt_days: f32, rng: &mut impl Rng) -> u32 {
    env.day_time += dt_days;

    let mut days_started = 0;
    while env.day_time >= 1.0 {
        env.day_time -= 1.0;
        env.day_count += 1;
        env.season = Season::for_day(env.day_count);
        env.temperature = sample_temperature(env.season, rng);
        days_started += 1;
    }
    days_started
}

// ─── Weather ──────────────────────────────────────────────────────────────────

/// Re-rolls the weather once per configured interval and derives a fresh
/// humidity reading from the result.
fn reroll_weather(
    time: Res<Time>,
    config: Res<SimConfig>,
    mut env: ResMut<EnvironmentState>,
    mut weather_writer: EventWriter<WeatherChangedEvent>,
) {
    env.weather_elapsed_secs += time.delta_secs();
    if env.weather_elapsed_secs < config.weather_interval_secs {
        return;
    }
    env.weather_elapsed_secs -= config.weather_interval_secs;

    let mut rng = rand::thread_rng();
    let old = env.weather;
    env.weather = roll_weather(env.season, &mut rng);
    env.humidity = sample_humidity(env.weather, &mut rng);

    weather_writer.send(WeatherChangedEvent {
        weather: env.weather,
        humidity: env.humidity,
    });

    info!(
        "[Environment] Weather: {:?} -> {:?} (humidity {:.0}%)",
        old, env.weather, env.humidity
    );
}

/// Rolls a weather result for the given season using weighted probabilities.
///
/// Spring:  30% Sunny, 40% Rainy, 20% Stormy, 10% Snowy
/// Summer:  50% Sunny, 20% Rainy, 20% Stormy, 10% Snowy
/// Fall:    30% Sunny, 30% Rainy, 30% Stormy, 10% Snowy
/// Winter:  20% Sunny, 20% Rainy, 20% Stormy, 40% Snowy
pub fn roll_weather(season: Season, rng: &mut impl Rng) -> Weather {
    let roll: f32 = rng.gen(); // 0.0 ..< 1.0

    match season {
        Season::Spring => {
            if roll < 0.30 {
                Weather::Sunny
            } else if roll < 0.70 {
                Weather::Rainy
            } else if roll < 0.90 {
                Weather::Stormy
            } else {
                Weather::Snowy
            }
        }
        Season::Summer => {
            if roll < 0.50 {
                Weather::Sunny
            } else if roll < 0.70 {
                Weather::Rainy
            } else if roll < 0.90 {
                Weather::Stormy
            } else {
                Weather::Snowy
            }
        }
        Season::Fall => {
            if roll < 0.30 {
                Weather::Sunny
            } else if roll < 0.60 {
                Weather::Rainy
            } else if roll < 0.90 {
                Weather::Stormy
            } else {
                Weather::Snowy
            }
        }
        Season::Winter => {
            if roll < 0.20 {
                Weather::Sunny
            } else if roll < 0.40 {
                Weather::Rainy
            } else if roll < 0.60 {
                Weather::Stormy
            } else {
                Weather::Snowy
            }
        }
    }
}

pub fn sample_humidity(weather: Weather, rng: &mut impl Rng) -> f32 {
    let (lo, hi) = weather.humidity_range();
    rng.gen_range(lo..=hi)
}

pub fn sample_temperature(season: Season, rng: &mut impl Rng) -> f32 {
    let (lo, hi) = season.temperature_range();
    rng.gen_range(lo..=hi)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_advance_clock_crosses_boundary() {
        let mut env = EnvironmentState::default();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(advance_clock(&mut env, 0.6, &mut rng), 0);
        assert_eq!(env.day_count, 1);

        assert_eq!(advance_clock(&mut env, 0.6, &mut rng), 1);
        assert_eq!(env.day_count, 2);
        assert!((0.0..1.0).contains(&env.day_time));
    }

    #[test]
    fn test_advance_clock_spans_multiple_days() {
        let mut env = EnvironmentState::default();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(advance_clock(&mut env, 3.25, &mut rng), 3);
        assert_eq!(env.day_count, 4);
        assert!((env.day_time - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_season_flips_on_day_eleven() {
        let mut env = EnvironmentState::default();
        let mut rng = StdRng::seed_from_u64(7);

        advance_clock(&mut env, 9.5, &mut rng);
        assert_eq!(env.day_count, 10);
        assert_eq!(env.season, Season::Spring);

        advance_clock(&mut env, 1.0, &mut rng);
        assert_eq!(env.day_count, 11);
        assert_eq!(env.season, Season::Summer);
    }

    #[test]
    fn test_temperature_resampled_within_season_range() {
        let mut env = EnvironmentState::default();
        let mut rng = StdRng::seed_from_u64(42);

        // Jump well into winter.
        advance_clock(&mut env, 35.0, &mut rng);
        assert_eq!(env.season, Season::Winter);
        let (lo, hi) = Season::Winter.temperature_range();
        assert!(env.temperature >= lo && env.temperature <= hi);
    }

    #[test]
    fn test_weather_roll_spring_distribution() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sunny = 0u32;
        let mut rainy = 0u32;
        let mut stormy = 0u32;
        let mut snowy = 0u32;

        for _ in 0..10_000 {
            match roll_weather(Season::Spring, &mut rng) {
                Weather::Sunny => sunny += 1,
                Weather::Rainy => rainy += 1,
                Weather::Stormy => stormy += 1,
                Weather::Snowy => snowy += 1,
            }
        }

        // Very rough sanity checks (loose tolerances for probabilistic tests)
        assert!(sunny > 2_000 && sunny < 4_000, "Sunny should be ~30%: {sunny}");
        assert!(rainy > 3_000 && rainy < 5_000, "Rainy should be ~40%: {rainy}");
        assert!(stormy > 1_200 && stormy < 2_800, "Stormy should be ~20%: {stormy}");
        assert!(snowy > 400 && snowy < 1_600, "Snowy should be ~10%: {snowy}");
    }

    #[test]
    fn test_weather_roll_winter_favors_snow() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut snowy = 0u32;
        for _ in 0..10_000 {
            if matches!(roll_weather(Season::Winter, &mut rng), Weather::Snowy) {
                snowy += 1;
            }
        }
        assert!(snowy > 3_000, "Winter should produce ~40% Snowy weather: {snowy}");
    }

    #[test]
    fn test_weather_roll_summer_favors_sun() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sunny = 0u32;
        for _ in 0..10_000 {
            if matches!(roll_weather(Season::Summer, &mut rng), Weather::Sunny) {
                sunny += 1;
            }
        }
        assert!(sunny > 4_000, "Summer should produce ~50% Sunny weather: {sunny}");
    }

    #[test]
    fn test_humidity_tracks_weather() {
        let mut rng = StdRng::seed_from_u64(4);
        for weather in [Weather::Sunny, Weather::Rainy, Weather::Stormy, Weather::Snowy] {
            let (lo, hi) = weather.humidity_range();
            for _ in 0..100 {
                let h = sample_humidity(weather, &mut rng);
                assert!(h >= lo && h <= hi, "{weather:?} humidity {h} outside [{lo}, {hi}]");
            }
        }
    }
}

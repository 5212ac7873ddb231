use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use season_core::game::GameModel;
use season_core::goals::simulate_game_with_goals;
use season_core::schedule::{generate_schedule, ScheduleConfig};
use season_core::season::LeagueState;
use season_core::team::Player;

fn league_strengths(n_teams: usize) -> HashMap<String, f64> {
    (0..n_teams)
        .map(|i| {
            let strength = 0.2 + 1.8 * (i as f64 / n_teams as f64);
            (format!("Team{}", i), strength)
        })
        .collect()
}

fn test_roster(prefix: &str, size: usize) -> Vec<Player> {
    (0..size)
        .map(|i| {
            Player::new(
                i as u32 + 1,
                format!("{}{}", prefix, i),
                "C",
                75.0 + (i % 20) as f64,
            )
        })
        .collect()
}

fn bench_simulate_game(c: &mut Criterion) {
    let model = GameModel::basic();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("simulate_game", |b| {
        b.iter(|| model.simulate(black_box(1.2), black_box(0.9), &mut rng))
    });
}

fn bench_simulate_game_with_goals(c: &mut Criterion) {
    let home = test_roster("Home", 20);
    let away = test_roster("Away", 20);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("simulate_game_with_goals", |b| {
        b.iter(|| {
            simulate_game_with_goals(
                black_box(1.2),
                black_box(0.9),
                black_box(&home),
                black_box(&away),
                &mut rng,
            )
        })
    });
}

fn bench_schedule_generation(c: &mut Criterion) {
    let teams: Vec<String> = (0..9).map(|i| format!("Team{}", i)).collect();
    let config = ScheduleConfig::default();

    c.bench_function("generate_schedule_9_teams_82_games", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| generate_schedule(black_box(&teams), black_box(82), &config, &mut rng))
    });
}

fn bench_full_season(c: &mut Criterion) {
    let league = LeagueState::new(league_strengths(9), 82);

    c.bench_function("season_9_teams_82_games", |b| {
        b.iter(|| black_box(&league).simulate(Some(42)))
    });
}

criterion_group!(
    benches,
    bench_simulate_game,
    bench_simulate_game_with_goals,
    bench_schedule_generation,
    bench_full_season,
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scorekeeper::{Color, Ledger, PlayerId, View};

fn build_ledger(players: u32, games: u32) -> Ledger {
    let mut ledger = Ledger::new();
    for i in 0..players {
        ledger.add_player(&format!("Player {i}"), Color::DEFAULT).unwrap();
    }
    for g in 0..games {
        let game = ledger.add_game().unwrap().id;
        for p in 1..=players {
            ledger.update_score(game, PlayerId::new(p), &((g * p) % 17).to_string());
        }
    }
    ledger
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_derive");
    for (players, games) in [(4, 10), (8, 100), (16, 1000)] {
        let ledger = build_ledger(players, games);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{players}x{games}")),
            &ledger,
            |b, ledger| b.iter(|| View::derive(black_box(ledger))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_derive);
criterion_main!(benches);

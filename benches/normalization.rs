//! Benchmarks for record normalization
//!
//! Measures turning provider pages into catalog items.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mediadex::catalog::normalize::{Normalizer, RawRecord};
use mediadex::catalog::providers::rawg::RawgGame;
use mediadex::catalog::providers::tmdb::TmdbRecord;
use mediadex::catalog::providers::{RawgProvider, TmdbProvider};
use mediadex::config::{RawgConfig, TmdbConfig};
use serde_json::json;

fn movie_page(size: usize) -> Vec<RawRecord> {
    (0..size)
        .map(|i| {
            let record: TmdbRecord = serde_json::from_value(json!({
                "id": i,
                "title": format!("Movie {}", i),
                "overview": "A long enough overview to look like a real synopsis.",
                "release_date": "2019-05-01",
                "poster_path": format!("/poster{}.jpg", i),
                "backdrop_path": format!("/backdrop{}.jpg", i),
                "vote_average": 7.3,
                "genre_ids": [28, 12, 878]
            }))
            .unwrap();
            RawRecord::Movie(record)
        })
        .collect()
}

fn game_page(size: usize) -> Vec<RawRecord> {
    (0..size)
        .map(|i| {
            let game: RawgGame = serde_json::from_value(json!({
                "id": i,
                "name": format!("Game {}", i),
                "released": "2020-09-17",
                "background_image": format!("https://media.rawg.io/media/games/{}.jpg", i),
                "rating": 4.4,
                "platforms": [
                    {"platform": {"id": 4, "name": "PC"}},
                    {"platform": {"id": 187, "name": "PlayStation 5"}},
                    {"platform": {"id": 1, "name": "Xbox One"}}
                ],
                "genres": [{"id": 4, "name": "Action"}, {"id": 51, "name": "Indie"}],
                "stores": [{"url": "", "store": {"id": 1, "slug": "steam", "name": "Steam"}}]
            }))
            .unwrap();
            RawRecord::Game(game)
        })
        .collect()
}

fn bench_normalize_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_page");

    let tmdb = TmdbProvider::new(&TmdbConfig::default());
    let rawg = RawgProvider::new(&RawgConfig::default());
    let normalizer = Normalizer::new(&tmdb, &rawg);

    for size in [20usize, 100] {
        let movies = movie_page(size);
        group.bench_with_input(BenchmarkId::new("movies", size), &movies, |b, page| {
            b.iter(|| normalizer.normalize_all(black_box(page.clone())));
        });

        let games = game_page(size);
        group.bench_with_input(BenchmarkId::new("games", size), &games, |b, page| {
            b.iter(|| normalizer.normalize_all(black_box(page.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_pages);
criterion_main!(benches);

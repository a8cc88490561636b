//! Daily trivia integration tests
//!
//! Wires the real catalog and Gemini client to wiremock and drives the
//! cache with a controllable clock.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use common::{gemini_text, tmdb_page, Upstreams, GEMINI_KEY};
use mediadex::catalog::Catalog;
use mediadex::trivia::{
    Clock, DailyTriviaCache, GeminiClient, TriviaError, TriviaGenerator,
};
use mediadex_common::MediaKind;
use parking_lot::Mutex;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

struct TestClock(Mutex<NaiveDate>);

impl TestClock {
    fn new(y: i32, m: u32, d: u32) -> Arc<Self> {
        Arc::new(Self(Mutex::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())))
    }

    fn set(&self, date: NaiveDate) {
        *self.0.lock() = date;
    }
}

impl Clock for TestClock {
    fn today(&self) -> NaiveDate {
        *self.0.lock()
    }
}

async fn mount_popular(upstreams: &Upstreams) {
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tmdb_page(json!([
            {"id": 105, "title": "De Volta para o Futuro", "release_date": "1985-07-03",
             "poster_path": "/bttf.jpg"}
        ]))))
        .mount(&upstreams.tmdb)
        .await;
}

#[tokio::test]
async fn gemini_client_sends_prompt_and_trims_answer() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", GEMINI_KEY))
        .and(body_string_contains("De Volta para o Futuro"))
        .and(body_string_contains("Brazilian Portuguese"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_text("  Originalmente, a máquina do tempo seria uma geladeira.\n")),
        )
        .expect(1)
        .mount(&upstreams.gemini)
        .await;

    let client = GeminiClient::new(&upstreams.config().trivia);
    let text = client
        .generate("De Volta para o Futuro", MediaKind::Movie)
        .await
        .unwrap();

    assert_eq!(text, "Originalmente, a máquina do tempo seria uma geladeira.");
}

#[tokio::test]
async fn gemini_errors_are_typed() {
    let upstreams = Upstreams::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .up_to_n_times(1)
        .mount(&upstreams.gemini)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstreams.gemini)
        .await;

    let client = GeminiClient::new(&upstreams.config().trivia);

    let empty = client.generate("Heat", MediaKind::Movie).await.unwrap_err();
    assert_matches!(empty, TriviaError::EmptyResponse);

    let failed = client.generate("Heat", MediaKind::Movie).await.unwrap_err();
    assert_matches!(failed, TriviaError::Generator(_));
}

#[tokio::test]
async fn daily_slot_is_stable_within_a_day_and_rolls_over() {
    let upstreams = Upstreams::start().await;
    mount_popular(&upstreams).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text("Fato de bastidores.")))
        .expect(2)
        .mount(&upstreams.gemini)
        .await;

    let config = upstreams.config();
    let clock = TestClock::new(2024, 6, 1);
    let cache = DailyTriviaCache::new(
        Arc::new(Catalog::from_config(&config)),
        Arc::new(GeminiClient::new(&config.trivia)),
        clock.clone(),
    );

    let first = cache.get().await.unwrap();
    let second = cache.get().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.subject_title, "De Volta para o Futuro");
    assert_eq!(first.subject_kind, MediaKind::Movie);
    assert_eq!(first.poster_url.as_deref(), Some("https://img.test/w500/bttf.jpg"));
    assert_eq!(first.release_date.as_deref(), Some("1985-07-03"));
    assert_eq!(first.text, "Fato de bastidores.");

    let next_day = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    clock.set(next_day);
    let third = cache.get().await.unwrap();
    assert_eq!(third.generated_on, next_day);
}

#[tokio::test]
async fn generator_outage_is_not_cached() {
    let upstreams = Upstreams::start().await;
    mount_popular(&upstreams).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&upstreams.gemini)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text("Agora sim.")))
        .expect(1)
        .mount(&upstreams.gemini)
        .await;

    let config = upstreams.config();
    let cache = DailyTriviaCache::new(
        Arc::new(Catalog::from_config(&config)),
        Arc::new(GeminiClient::new(&config.trivia)),
        TestClock::new(2024, 6, 1),
    );

    assert!(cache.get().await.is_none());
    let retried = cache.get().await.unwrap();
    assert_eq!(retried.text, "Agora sim.");
}

#[tokio::test]
async fn missing_gemini_key_produces_no_slot_without_upstream_calls() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tmdb_page(json!([]))))
        .expect(0)
        .mount(&upstreams.tmdb)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text("unused")))
        .expect(0)
        .mount(&upstreams.gemini)
        .await;

    let mut config = upstreams.config();
    config.trivia.api_key.clear();
    let cache = DailyTriviaCache::new(
        Arc::new(Catalog::from_config(&config)),
        Arc::new(GeminiClient::new(&config.trivia)),
        TestClock::new(2024, 6, 1),
    );

    assert!(cache.get().await.is_none());
    assert!(cache.get().await.is_none());
}

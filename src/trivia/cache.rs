//! Single-slot, once-per-day trivia memo.
//!
//! The slot is either empty or holds the trivia computed on some date. A
//! read on a later date triggers a refresh:
//!
//! 1. Pick one candidate uniformly at random.
//! 2. Ask the generator for text about it.
//! 3. Commit `(today, trivia)` only when both steps succeed.
//!
//! A failed refresh commits nothing: the caller gets the stale slot (or
//! `None`) and the next read retries. Refreshes are single-flight, so
//! concurrent first-of-day reads produce one generation, and reads queued
//! behind a failing refresh share its failure instead of repeating it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use mediadex_common::DailyTrivia;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{Clock, SubjectSource, TriviaError, TriviaGenerator};

/// The most recent refresh that failed.
#[derive(Debug, Clone, Copy)]
struct FailedAttempt {
    date: NaiveDate,
    /// Value of the attempt counter once this attempt finished.
    seq: u64,
}

pub struct DailyTriviaCache {
    subjects: Arc<dyn SubjectSource>,
    generator: Arc<dyn TriviaGenerator>,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<DailyTrivia>>,
    refresh: Mutex<Option<FailedAttempt>>,
    /// Finished refresh attempts, successful or not.
    attempts: AtomicU64,
}

impl DailyTriviaCache {
    pub fn new(
        subjects: Arc<dyn SubjectSource>,
        generator: Arc<dyn TriviaGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subjects,
            generator,
            clock,
            slot: RwLock::new(None),
            refresh: Mutex::new(None),
            attempts: AtomicU64::new(0),
        }
    }

    /// The current slot without refreshing, whatever its date.
    pub fn peek(&self) -> Option<DailyTrivia> {
        self.slot.read().clone()
    }

    /// Today's trivia, computing it if needed.
    ///
    /// Returns the stale slot (or `None`) when today's could not be produced.
    pub async fn get(&self) -> Option<DailyTrivia> {
        let today = self.clock.today();
        if let Some(current) = self.current_for(today) {
            return Some(current);
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let mut last_failure = self.refresh.lock().await;
        // Another request may have refreshed while we waited.
        if let Some(current) = self.current_for(today) {
            return Some(current);
        }
        // Or tried and failed while we waited.
        if last_failure.is_some_and(|failed| failed.date == today && failed.seq > seen) {
            return self.peek();
        }

        let result = self.compute(today).await;
        let seq = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        match result {
            Ok(trivia) => {
                info!(
                    subject = %trivia.subject_title,
                    date = %today,
                    "Daily trivia refreshed"
                );
                *last_failure = None;
                *self.slot.write() = Some(trivia.clone());
                Some(trivia)
            }
            Err(e) => {
                match e {
                    TriviaError::NotConfigured => {
                        debug!(date = %today, "Trivia generator not configured");
                    }
                    _ => warn!(date = %today, error = %e, "Daily trivia refresh failed"),
                }
                *last_failure = Some(FailedAttempt { date: today, seq });
                self.peek()
            }
        }
    }

    fn current_for(&self, today: NaiveDate) -> Option<DailyTrivia> {
        self.slot
            .read()
            .as_ref()
            .filter(|trivia| trivia.generated_on == today)
            .cloned()
    }

    async fn compute(&self, today: NaiveDate) -> Result<DailyTrivia, TriviaError> {
        if !self.generator.is_available() {
            return Err(TriviaError::NotConfigured);
        }

        let candidates = self.subjects.candidates().await;
        let subject = candidates
            .choose(&mut rand::thread_rng())
            .ok_or(TriviaError::EmptyCatalog)?;

        let text = self.generator.generate(&subject.title, subject.kind).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(TriviaError::EmptyResponse);
        }

        Ok(DailyTrivia::from_item(subject, text.to_string(), today))
    }
}

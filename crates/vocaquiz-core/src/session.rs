//! Quiz session engine.
//!
//! Owns the working queue of not-yet-known items and drives the
//! `setup -> loading -> active -> complete` lifecycle. Items answered as
//! unknown go to the back of the queue; the pass completes once every item
//! has been answered as known.

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::model::{validate_items, Direction, PracticeItem, Settings};
use crate::progress::Progress;
use crate::shuffle::shuffle_with;
use crate::traits::ItemSource;

/// Advisory stored in `last_error` when a scope resolves to no items.
pub const NO_ITEMS_MESSAGE: &str = "no words available for the selected scope";

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Setup,
    Loading,
    Active,
    Complete,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Loading => write!(f, "loading"),
            Phase::Active => write!(f, "active"),
            Phase::Complete => write!(f, "complete"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

/// Identifies one load started by [`QuizSession::begin_load`].
///
/// Only the ticket of the most recent load is honoured by
/// [`QuizSession::finish_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load ticket must be passed to finish_load"]
pub struct LoadTicket {
    token: u64,
}

/// Result of starting a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Items were loaded and the first question is ready.
    Started { total: usize },
    /// The scope matched nothing; the session is back at setup.
    NoItems,
    /// Loading failed; the session is in the failed phase.
    Failed(String),
    /// A newer load or a reset superseded this one; nothing changed.
    Stale,
}

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The item went to the back of the queue.
    Requeued,
    /// The item was removed; `remaining` items are still queued.
    Mastered { remaining: usize },
    /// The last item was removed and the pass is complete.
    Completed,
    /// No question was active; nothing changed.
    Ignored,
}

/// A single learner's in-memory quiz session.
pub struct QuizSession {
    phase: Phase,
    settings: Option<Settings>,
    initial_order: Vec<PracticeItem>,
    working_queue: VecDeque<PracticeItem>,
    last_error: Option<String>,
    answers_given: usize,
    load_token: u64,
    rng: StdRng,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("settings", &self.settings)
            .field("total", &self.initial_order.len())
            .field("remaining", &self.working_queue.len())
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl QuizSession {
    /// Create a session in the setup phase, shuffling with OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a session whose shuffles are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            phase: Phase::Setup,
            settings: None,
            initial_order: Vec::new(),
            working_queue: VecDeque::new(),
            last_error: None,
            answers_given: 0,
            load_token: 0,
            rng,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Load items for `settings` from `source` and begin a pass.
    ///
    /// Callable from any phase. Fetch errors never escape: they move the
    /// session to [`Phase::Failed`].
    pub async fn start_quiz(
        &mut self,
        settings: Settings,
        source: &dyn ItemSource,
    ) -> StartOutcome {
        let scope = settings.scope.clone();
        let ticket = self.begin_load(settings);
        tracing::debug!(source = source.name(), %scope, "fetching items");
        let result = source.fetch_items(&scope).await;
        self.finish_load(ticket, result)
    }

    /// Enter the loading phase for `settings`.
    ///
    /// Any earlier ticket becomes stale. The queues are cleared so a failed
    /// or empty load never leaves a previous pass half in place.
    pub fn begin_load(&mut self, settings: Settings) -> LoadTicket {
        self.load_token += 1;
        self.phase = Phase::Loading;
        self.settings = Some(settings);
        self.initial_order.clear();
        self.working_queue.clear();
        self.last_error = None;
        self.answers_given = 0;
        LoadTicket {
            token: self.load_token,
        }
    }

    /// Apply the result of the fetch started with `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: anyhow::Result<Vec<PracticeItem>>,
    ) -> StartOutcome {
        if ticket.token != self.load_token || self.phase != Phase::Loading {
            tracing::warn!(
                ticket = ticket.token,
                latest = self.load_token,
                "discarding superseded item load"
            );
            return StartOutcome::Stale;
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                if e
                    .downcast_ref::<SourceError>()
                    .is_some_and(SourceError::is_permanent)
                {
                    tracing::warn!("the source rejected the request; a retry will fail the same way");
                }
                return self.fail(format!("{e:#}"));
            }
        };

        if items.is_empty() {
            tracing::info!("scope resolved to no items");
            self.phase = Phase::Setup;
            self.last_error = Some(NO_ITEMS_MESSAGE.to_string());
            return StartOutcome::NoItems;
        }

        if let Err(e) = validate_items(&items) {
            return self.fail(format!("invalid item set: {e}"));
        }

        let shuffled = shuffle_with(&items, &mut self.rng);
        self.working_queue = shuffled.iter().cloned().collect();
        self.initial_order = shuffled;
        self.phase = Phase::Active;

        let total = self.initial_order.len();
        tracing::info!(total, "quiz started");
        StartOutcome::Started { total }
    }

    fn fail(&mut self, message: String) -> StartOutcome {
        tracing::error!("failed to load items: {message}");
        self.phase = Phase::Failed;
        self.last_error = Some(message.clone());
        StartOutcome::Failed(message)
    }

    /// Record the learner's self-assessment of the current question.
    pub fn answer_question(&mut self, knew: bool) -> AnswerOutcome {
        if self.phase != Phase::Active {
            tracing::debug!(phase = %self.phase, "answer ignored outside an active quiz");
            return AnswerOutcome::Ignored;
        }
        let Some(head) = self.working_queue.pop_front() else {
            tracing::debug!("answer ignored with an empty queue");
            return AnswerOutcome::Ignored;
        };
        self.answers_given += 1;

        if !knew {
            tracing::debug!(id = %head.id, "requeued");
            self.working_queue.push_back(head);
            return AnswerOutcome::Requeued;
        }

        tracing::debug!(id = %head.id, remaining = self.working_queue.len(), "mastered");
        if self.working_queue.is_empty() {
            self.phase = Phase::Complete;
            tracing::info!(
                total = self.initial_order.len(),
                answers = self.answers_given,
                "quiz complete"
            );
            return AnswerOutcome::Completed;
        }
        AnswerOutcome::Mastered {
            remaining: self.working_queue.len(),
        }
    }

    /// Practise the same item set again in a fresh order.
    ///
    /// Returns `false` (and changes nothing) when no item set is loaded.
    pub fn repeat_quiz(&mut self) -> bool {
        if self.initial_order.is_empty() {
            tracing::debug!(phase = %self.phase, "repeat ignored without a loaded item set");
            return false;
        }
        let reshuffled = shuffle_with(&self.initial_order, &mut self.rng);
        self.working_queue = reshuffled.iter().cloned().collect();
        self.initial_order = reshuffled;
        self.answers_given = 0;
        self.phase = Phase::Active;
        tracing::info!(total = self.initial_order.len(), "quiz repeated");
        true
    }

    /// Drop all session state and return to setup. Any in-flight load
    /// becomes stale.
    pub fn reset_quiz(&mut self) {
        self.load_token += 1;
        self.phase = Phase::Setup;
        self.settings = None;
        self.initial_order.clear();
        self.working_queue.clear();
        self.last_error = None;
        self.answers_given = 0;
        tracing::debug!("quiz reset");
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.settings.as_ref().map(|s| s.direction)
    }

    /// Head of the working queue while a pass is active.
    pub fn current_question(&self) -> Option<&PracticeItem> {
        match self.phase {
            Phase::Active => self.working_queue.front(),
            _ => None,
        }
    }

    pub fn working_queue(&self) -> &VecDeque<PracticeItem> {
        &self.working_queue
    }

    pub fn initial_order(&self) -> &[PracticeItem] {
        &self.initial_order
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn progress(&self) -> Progress {
        let question_number = match self.phase {
            Phase::Active => self.answers_given + 1,
            _ => self.answers_given,
        };
        Progress::new(
            self.initial_order.len(),
            self.working_queue.len(),
            question_number,
        )
    }
}

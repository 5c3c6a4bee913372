//! vocaquiz-core: quiz session engine, data model, and item source trait.
//!
//! This crate defines the practice item model, the shuffle and progress
//! helpers, and the session state machine that the sources and the CLI
//! build on.

pub mod deck;
pub mod error;
pub mod model;
pub mod progress;
pub mod session;
pub mod shuffle;
pub mod traits;

pub use error::{ItemSetError, SourceError};
pub use model::{Direction, PracticeItem, Scope, Settings, Tag};
pub use progress::Progress;
pub use session::{AnswerOutcome, Phase, QuizSession, StartOutcome};
pub use traits::ItemSource;

#![forbid(unsafe_code)]

pub mod achievements;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod progress_tracker;
pub mod quiz;
pub mod rollup;
pub mod session_store;

pub use chefs_core::Clock;

pub use achievements::AchievementsService;
pub use catalog::CatalogService;
pub use error::{AuthError, CatalogError, ProfileError};
pub use favorites::FavoritesService;
pub use progress_tracker::{FULL_SCORE, ProgressSnapshot, ProgressTracker};
pub use quiz::{QuizOutcome, QuizPhase, QuizProgress, QuizSession, QuizStepError, finish_quiz};
pub use rollup::{cuisine_progress, skill_progress};
pub use session_store::{SessionState, SessionStore};

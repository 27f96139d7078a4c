#![forbid(unsafe_code)]

pub mod app_services;
pub mod best_score;
pub mod config;
pub mod controller;
pub mod error;
pub mod ticker;

pub use quiz_core::Clock;

pub use app_services::QuizServices;
pub use best_score::{BEST_SCORE_KEY, BestScoreService};
pub use config::QuizSettings;
pub use controller::QuizController;
pub use error::{BestScoreError, ConfigError, QuizError, ServicesError};
pub use ticker::ElapsedTicker;

//! kornum - 韓国語の数字（固有語・漢字語）の練習ツール

pub mod config;
pub mod error;
pub mod generator;
pub mod numerals;
pub mod plain;
pub mod quiz;

pub use error::{AppError, NumeralError, QuizError};
pub use generator::{NumberRange, QuestionGenerator, RecentHistory};
pub use numerals::{NumberSystem, OUT_OF_RANGE, to_korean_text};
pub use quiz::{Direction, Feedback, Score, Session, Settings, evaluate};

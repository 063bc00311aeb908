// ============================================
// src/error.rs
// エラー型
// ============================================

use thiserror::Error;

/// 数字の変換・解釈で起きるエラー
#[derive(Debug, Error)]
pub enum NumeralError {
    /// 負の数は変換できない
    #[error("negative numbers cannot be converted: {0}")]
    Negative(i64),

    /// u32 に収まらない数
    #[error("number is too large: {0}")]
    TooLarge(i64),

    /// 知らない体系名
    #[error("unknown number system: {0:?} (expected \"native\" or \"sino\")")]
    UnknownSystem(String),
}

/// 出題設定の解釈・回答の送信で起きるエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// 空の回答は送信しない
    #[error("answer is empty")]
    EmptyAnswer,

    /// この問題にはもう回答済み
    #[error("question has already been answered")]
    AlreadyAnswered,

    /// 知らない出題方向
    #[error("unknown direction: {0:?} (expected \"k2e\" or \"e2k\")")]
    UnknownDirection(String),
}

/// アプリ全体のエラー
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Numeral(#[from] NumeralError),
}

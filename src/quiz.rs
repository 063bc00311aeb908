// ============================================
// src/quiz.rs
// 採点とクイズの進行状態
// ============================================

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::generator::{NumberRange, QuestionGenerator, RecentHistory};
use crate::numerals::{NumberSystem, to_korean_text};

/// 正解後に次の問題へ自動で進むまでの時間
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_secs(1);

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// 出題の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// 韓国語を見て数字を答える
    #[default]
    #[serde(rename = "k2e")]
    KoreanToEnglish,
    /// 数字を見て韓国語を答える
    #[serde(rename = "e2k")]
    EnglishToKorean,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::KoreanToEnglish => Direction::EnglishToKorean,
            Direction::EnglishToKorean => Direction::KoreanToEnglish,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::KoreanToEnglish => "Korean → English",
            Direction::EnglishToKorean => "English → Korean",
        }
    }

    /// 問題文の上に出す説明
    pub fn instruction(self) -> &'static str {
        match self {
            Direction::KoreanToEnglish => "What number is this?",
            Direction::EnglishToKorean => "How do you say this in Korean?",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::KoreanToEnglish => f.write_str("k2e"),
            Direction::EnglishToKorean => f.write_str("e2k"),
        }
    }
}

impl FromStr for Direction {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "k2e" | "korean-to-english" => Ok(Direction::KoreanToEnglish),
            "e2k" | "english-to-korean" => Ok(Direction::EnglishToKorean),
            other => Err(QuizError::UnknownDirection(other.to_string())),
        }
    }
}

/// 出題設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub system: NumberSystem,
    pub direction: Direction,
    pub range: NumberRange,
}

/// 正解数 / 回答数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    /// 回答 1 回ぶんを記録する
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {} / {}", self.correct, self.total)
    }
}

/// 採点結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    /// 正しい答え（不正解時に表示する）
    pub expected: String,
}

// --------------------------------------------------
// 採点
// --------------------------------------------------

/// 正しい答えの文字列
pub fn expected_answer(question: u32, system: NumberSystem, direction: Direction) -> String {
    match direction {
        Direction::KoreanToEnglish => question.to_string(),
        Direction::EnglishToKorean => to_korean_text(question, system),
    }
}

/// 問題として見せる文字列（答えの反対側）
pub fn prompt_text(question: u32, system: NumberSystem, direction: Direction) -> String {
    match direction {
        Direction::KoreanToEnglish => to_korean_text(question, system),
        Direction::EnglishToKorean => question.to_string(),
    }
}

/// 回答を採点する（前後の空白は無視、それ以外は完全一致）
pub fn evaluate(answer: &str, question: u32, system: NumberSystem, direction: Direction) -> Feedback {
    let expected = expected_answer(question, system, direction);
    let is_correct = answer.trim() == expected.trim();
    Feedback { is_correct, expected }
}

// --------------------------------------------------
// セッション
// --------------------------------------------------

/// 1 回の練習の状態（設定・現在の問題・スコア・自動送り）
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    generator: QuestionGenerator,
    current: u32,
    score: Score,
    feedback: Option<Feedback>,
    /// 正解後の自動送りの期限
    advance_at: Option<Instant>,
    advance_delay: Duration,
}

impl Session {
    /// 最初の問題を出した状態で始める
    pub fn new(settings: Settings, mut generator: QuestionGenerator) -> Self {
        let current = generator.next(&settings.range, settings.system);
        Self {
            settings,
            generator,
            current,
            score: Score::default(),
            feedback: None,
            advance_at: None,
            advance_delay: AUTO_ADVANCE_DELAY,
        }
    }

    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn has_answered(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn pending_advance(&self) -> Option<Instant> {
        self.advance_at
    }

    /// 直近に出題した数字
    pub fn history(&self) -> &RecentHistory {
        self.generator.history()
    }

    /// 現在の設定での問題文
    pub fn prompt(&self) -> String {
        prompt_text(self.current, self.settings.system, self.settings.direction)
    }

    /// 回答を送信する
    ///
    /// 採点は送信時点の設定で行う。正解なら自動送りを予約する。
    pub fn submit(&mut self, answer: &str, now: Instant) -> Result<&Feedback, QuizError> {
        if self.has_answered() {
            return Err(QuizError::AlreadyAnswered);
        }
        if answer.trim().is_empty() {
            return Err(QuizError::EmptyAnswer);
        }

        let feedback = evaluate(
            answer,
            self.current,
            self.settings.system,
            self.settings.direction,
        );
        self.score.record(feedback.is_correct);
        tracing::debug!(
            question = self.current,
            correct = feedback.is_correct,
            "answer submitted"
        );

        if feedback.is_correct {
            self.advance_at = Some(now + self.advance_delay);
        }
        Ok(&*self.feedback.insert(feedback))
    }

    /// 次の問題へ進む（手動）。予約済みの自動送りは取り消す
    pub fn next_question(&mut self) -> u32 {
        self.advance_at = None;
        self.feedback = None;
        self.current = self.generator.next(&self.settings.range, self.settings.system);
        self.current
    }

    /// 自動送りの期限が来ていれば次へ進む。進んだら true
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.advance_at {
            Some(at) if now >= at => {
                self.next_question();
                true
            }
            _ => false,
        }
    }

    /// 設定を反映する。履歴は消し、スコアは残す
    pub fn apply_settings(&mut self, settings: Settings) {
        tracing::info!(
            system = %settings.system,
            direction = %settings.direction,
            min = settings.range.min,
            max = settings.range.max,
            "settings applied"
        );
        self.settings = settings;
        self.generator.clear_history();
        self.next_question();
    }
}

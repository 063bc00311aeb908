// ============================================
// src/generator.rs
// 出題する数字を選ぶモジュール
// ============================================

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::numerals::NumberSystem;

/// 直近何問ぶんを覚えておくか
pub const HISTORY_LEN: usize = 5;

/// 重複を避けるために引き直す最大回数
pub const MAX_ATTEMPTS: u32 = 50;

/// この幅以下の範囲では重複回避をしない
pub const SMALL_SPAN: u32 = 3;

// --------------------------------------------------
// 出題範囲
// --------------------------------------------------

/// 設定された出題範囲（体系の上限で切る前の値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: i64,
    pub max: i64,
}

impl Default for NumberRange {
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

impl NumberRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// 実際に使う範囲 (min, max) を返す
    ///
    /// 両端を [0, 体系の上限] に収め、逆転していれば入れ替える。
    pub fn bounds(&self, system: NumberSystem) -> (u32, u32) {
        let top = system.max();
        let clamp = |v: i64| v.clamp(0, i64::from(top)) as u32;
        let (lo, hi) = (clamp(self.min), clamp(self.max));
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }

    /// 範囲に含まれる数の個数
    pub fn span(&self, system: NumberSystem) -> u32 {
        let (lo, hi) = self.bounds(system);
        hi - lo + 1
    }
}

// --------------------------------------------------
// 直近の出題履歴
// --------------------------------------------------

/// 直近に出題した数字（古いものから順に捨てる）
#[derive(Debug, Clone, Default)]
pub struct RecentHistory {
    items: VecDeque<u32>,
}

impl RecentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, n: u32) -> bool {
        self.items.contains(&n)
    }

    /// 追加して、最新 HISTORY_LEN 件だけ残す
    pub fn push(&mut self, n: u32) {
        self.items.push_back(n);
        while self.items.len() > HISTORY_LEN {
            self.items.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 古い順
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().copied()
    }
}

// --------------------------------------------------
// 出題
// --------------------------------------------------

/// 乱数と履歴を持ち、次の問題を選ぶ
#[derive(Debug)]
pub struct QuestionGenerator<R = StdRng> {
    rng: R,
    history: RecentHistory,
}

impl QuestionGenerator<StdRng> {
    /// OS の乱数で初期化
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// シード固定（テスト・再現用）
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            history: RecentHistory::new(),
        }
    }

    pub fn history(&self) -> &RecentHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// 次に出題する数字を選ぶ
    ///
    /// 範囲が狭い（3 個以下）ときはそのまま一様に選び、履歴も触らない。
    /// それ以外は直近の履歴にある数字を最大 50 回まで引き直し、
    /// それでも外れなければ最後に引いた数字をそのまま使う。
    pub fn next(&mut self, range: &NumberRange, system: NumberSystem) -> u32 {
        let (min, max) = range.bounds(system);
        let span = max - min + 1;

        if span <= SMALL_SPAN {
            return self.rng.random_range(min..=max);
        }

        let mut drawn = self.rng.random_range(min..=max);
        let mut attempts = 1;
        while self.history.contains(drawn) && attempts < MAX_ATTEMPTS {
            drawn = self.rng.random_range(min..=max);
            attempts += 1;
        }
        if attempts >= MAX_ATTEMPTS && self.history.contains(drawn) {
            tracing::debug!(drawn, "repeat avoidance gave up after {MAX_ATTEMPTS} attempts");
        }

        self.history.push(drawn);
        drawn
    }
}

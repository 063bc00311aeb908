// ============================================
// src/numerals.rs
// 数字 -> 韓国語（固有語・漢字語）変換
// ============================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NumeralError;

/// 範囲外の数字に対して返す表示用の文字列
pub const OUT_OF_RANGE: &str = "범위 초과";

/// ゼロ（固有語・漢字語で共通）
const ZERO_WORD: &str = "영";

/// 固有語の数詞テーブル (0〜99)
pub const NATIVE_KOREAN: [&str; 100] = [
    "영", "하나", "둘", "셋", "넷", "다섯", "여섯", "일곱", "여덟", "아홉",
    "열", "열하나", "열둘", "열셋", "열넷", "열다섯", "열여섯", "열일곱", "열여덟", "열아홉",
    "스물", "스물하나", "스물둘", "스물셋", "스물넷", "스물다섯", "스물여섯", "스물일곱", "스물여덟", "스물아홉",
    "서른", "서른하나", "서른둘", "서른셋", "서른넷", "서른다섯", "서른여섯", "서른일곱", "서른여덟", "서른아홉",
    "마흔", "마흔하나", "마흔둘", "마흔셋", "마흔넷", "마흔다섯", "마흔여섯", "마흔일곱", "마흔여덟", "마흔아홉",
    "쉰", "쉰하나", "쉰둘", "쉰셋", "쉰넷", "쉰다섯", "쉰여섯", "쉰일곱", "쉰여덟", "쉰아홉",
    "예순", "예순하나", "예순둘", "예순셋", "예순넷", "예순다섯", "예순여섯", "예순일곱", "예순여덟", "예순아홉",
    "일흔", "일흔하나", "일흔둘", "일흔셋", "일흔넷", "일흔다섯", "일흔여섯", "일흔일곱", "일흔여덟", "일흔아홉",
    "여든", "여든하나", "여든둘", "여든셋", "여든넷", "여든다섯", "여든여섯", "여든일곱", "여든여덟", "여든아홉",
    "아흔", "아흔하나", "아흔둘", "아흔셋", "아흔넷", "아흔다섯", "아흔여섯", "아흔일곱", "아흔여덟", "아흔아홉",
];

/// 漢字語の 1〜9 (添字 0 は未使用)
const SINO_DIGITS: [&str; 10] = ["", "일", "이", "삼", "사", "오", "육", "칠", "팔", "구"];

/// 位の単位 (一, 十, 百, 千)
const SINO_UNITS: [&str; 4] = ["", "십", "백", "천"];

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// 数詞の体系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberSystem {
    /// 固有語 (하나, 둘, 셋 ...)
    #[default]
    Native,
    /// 漢字語 (일, 이, 삼 ...)
    Sino,
}

impl NumberSystem {
    /// この体系で出題できる最大値
    pub fn max(self) -> u32 {
        match self {
            NumberSystem::Native => 99,
            NumberSystem::Sino => 9999,
        }
    }

    /// もう一方の体系
    pub fn toggled(self) -> Self {
        match self {
            NumberSystem::Native => NumberSystem::Sino,
            NumberSystem::Sino => NumberSystem::Native,
        }
    }

    /// 画面表示用の名前
    pub fn label(self) -> &'static str {
        match self {
            NumberSystem::Native => "Native Korean",
            NumberSystem::Sino => "Sino-Korean",
        }
    }
}

impl fmt::Display for NumberSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberSystem::Native => f.write_str("native"),
            NumberSystem::Sino => f.write_str("sino"),
        }
    }
}

impl FromStr for NumberSystem {
    type Err = NumeralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(NumberSystem::Native),
            "sino" => Ok(NumberSystem::Sino),
            other => Err(NumeralError::UnknownSystem(other.to_string())),
        }
    }
}

// --------------------------------------------------
// 変換
// --------------------------------------------------

/// 数字を指定した体系の韓国語に変換する
///
/// 範囲外（固有語で 100 以上、漢字語で 10000 以上）のときは
/// エラーではなく [`OUT_OF_RANGE`] を返す。
pub fn to_korean_text(n: u32, system: NumberSystem) -> String {
    match system {
        NumberSystem::Native => native_korean(n).unwrap_or(OUT_OF_RANGE).to_string(),
        NumberSystem::Sino => sino_korean(n).unwrap_or_else(|| OUT_OF_RANGE.to_string()),
    }
}

/// 符号付きの入力を受け付ける版（CLI など外部からの入力用）
pub fn try_to_korean_text(n: i64, system: NumberSystem) -> Result<String, NumeralError> {
    let n = u32::try_from(n).map_err(|_| {
        if n < 0 {
            NumeralError::Negative(n)
        } else {
            NumeralError::TooLarge(n)
        }
    })?;
    Ok(to_korean_text(n, system))
}

/// 固有語（テーブル引き）
pub fn native_korean(n: u32) -> Option<&'static str> {
    NATIVE_KOREAN.get(n as usize).copied()
}

/// 漢字語（位ごとに組み立てる）
///
/// 上の位から順に見ていき、0 の桁は読まない。
/// 十・百・千の位の 1 は単位だけを読む（10 は "십"、"일십" ではない）。
pub fn sino_korean(n: u32) -> Option<String> {
    if n > NumberSystem::Sino.max() {
        return None;
    }
    if n == 0 {
        return Some(ZERO_WORD.to_string());
    }

    let digits = n.to_string();
    let len = digits.len();
    let mut result = String::new();

    for (i, b) in digits.bytes().enumerate() {
        let digit = (b - b'0') as usize;
        let position = len - i - 1; // この桁の後ろに残っている桁数

        if digit == 0 {
            continue;
        }
        if digit == 1 && position > 0 {
            result.push_str(SINO_UNITS[position]);
        } else {
            result.push_str(SINO_DIGITS[digit]);
            result.push_str(SINO_UNITS[position]);
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn zero_is_the_same_in_both_systems() {
        assert_eq!(to_korean_text(0, NumberSystem::Native), "영");
        assert_eq!(to_korean_text(0, NumberSystem::Sino), "영");
    }

    #[test]
    fn single_digits_use_digit_words() {
        for n in 1..=9u32 {
            assert_eq!(to_korean_text(n, NumberSystem::Sino), SINO_DIGITS[n as usize]);
        }
    }

    #[test]
    fn leading_one_is_dropped_before_units() {
        assert_eq!(to_korean_text(10, NumberSystem::Sino), "십");
        assert_eq!(to_korean_text(100, NumberSystem::Sino), "백");
        assert_eq!(to_korean_text(1000, NumberSystem::Sino), "천");
        assert_eq!(to_korean_text(11, NumberSystem::Sino), "십일");
        assert_eq!(to_korean_text(111, NumberSystem::Sino), "백십일");
    }

    #[test]
    fn zero_digits_are_skipped() {
        assert_eq!(to_korean_text(1001, NumberSystem::Sino), "천일");
        assert_eq!(to_korean_text(1010, NumberSystem::Sino), "천십");
        assert_eq!(to_korean_text(2005, NumberSystem::Sino), "이천오");
        assert_eq!(to_korean_text(300, NumberSystem::Sino), "삼백");
    }

    #[test]
    fn sino_compound_numbers() {
        assert_eq!(to_korean_text(1234, NumberSystem::Sino), "천이백삼십사");
        assert_eq!(to_korean_text(21, NumberSystem::Sino), "이십일");
        assert_eq!(to_korean_text(9999, NumberSystem::Sino), "구천구백구십구");
    }

    #[test]
    fn native_table_is_complete_and_unique() {
        assert_eq!(NATIVE_KOREAN.len(), 100);
        let unique: HashSet<&str> = NATIVE_KOREAN.iter().copied().collect();
        assert_eq!(unique.len(), 100);

        assert_eq!(to_korean_text(21, NumberSystem::Native), "스물하나");
        assert_eq!(to_korean_text(50, NumberSystem::Native), "쉰");
        assert_eq!(to_korean_text(99, NumberSystem::Native), "아흔아홉");
    }

    #[test]
    fn out_of_range_returns_sentinel() {
        assert_eq!(to_korean_text(100, NumberSystem::Native), OUT_OF_RANGE);
        assert_eq!(to_korean_text(10000, NumberSystem::Sino), OUT_OF_RANGE);
    }

    #[test]
    fn checked_conversion_rejects_negative_input() {
        assert!(matches!(
            try_to_korean_text(-1, NumberSystem::Sino),
            Err(NumeralError::Negative(-1))
        ));
        assert_eq!(try_to_korean_text(5, NumberSystem::Native).unwrap(), "다섯");
    }

    #[test]
    fn system_parses_from_short_names() {
        assert_eq!("native".parse::<NumberSystem>().unwrap(), NumberSystem::Native);
        assert_eq!(" Sino ".parse::<NumberSystem>().unwrap(), NumberSystem::Sino);
        assert!("roman".parse::<NumberSystem>().is_err());
        assert_eq!(NumberSystem::Sino.to_string(), "sino");
    }
}

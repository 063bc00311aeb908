// ============================================
// src/config.rs
// 設定ファイル (settings.json) の読み込み
// ============================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::generator::NumberRange;
use crate::numerals::NumberSystem;
use crate::quiz::{Direction, Settings};

const CONFIG_FILE: &str = "settings.json";

/// 起動時の既定値（ファイルにない項目は既定値）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system: NumberSystem,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_min")]
    pub min: i64,
    #[serde(default = "default_max")]
    pub max: i64,
    /// 正解後に次の問題へ進むまでの時間 (ms)
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u64,
}

fn default_min() -> i64 {
    0
}

fn default_max() -> i64 {
    10
}

fn default_auto_advance_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system: NumberSystem::default(),
            direction: Direction::default(),
            min: default_min(),
            max: default_max(),
            auto_advance_ms: default_auto_advance_ms(),
        }
    }
}

impl Config {
    /// 既定の設定ファイルの場所
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("jp", "Fukumoto0141", "KORNUM")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// 既定の場所から読み込む。読めなければ警告を出して既定値
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("no config directory available, using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// 指定したファイルから読み込む。ファイルがなければ既定値
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file not found");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let config = serde_json::from_str(&contents).map_err(|source| AppError::Config {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(config)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            system: self.system,
            direction: self.direction,
            range: NumberRange::new(self.min, self.max),
        }
    }

    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }
}

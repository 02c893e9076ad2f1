use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::quiz::GradeThresholds;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_quiz_questions")]
    pub quiz_questions: usize,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub grades: GradeThresholds,
}

fn default_theme() -> String {
    "sakura-night".to_string()
}
fn default_quiz_questions() -> usize {
    20
}
fn default_level() -> String {
    "n5".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            quiz_questions: default_quiz_questions(),
            level: default_level(),
            grades: GradeThresholds::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kotoba")
            .join("config.toml")
    }

    /// Clamp hand-edited values back into usable ranges. Called after
    /// deserialization so a stale or mangled config never breaks a session.
    pub fn normalize(&mut self) {
        self.quiz_questions = self.quiz_questions.clamp(1, 100);
        if self.level.parse::<crate::content::models::JlptLevel>().is_err() {
            self.level = default_level();
        }
        self.grades.normalize();
    }
}

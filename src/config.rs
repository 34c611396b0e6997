use crate::capture::CaptureAffordances;
use crate::history::HistoryAffordances;
use crate::theme::ThemeAffordances;
use std::{env, path::PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/mood-tracker.json";
pub const DEFAULT_PORT: u16 = 8080;

/// Which optional controls each page carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageConfig {
    pub capture: CaptureAffordances,
    pub history: HistoryAffordances,
    pub theme: ThemeAffordances,
    pub chart: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub pages: PageConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_path = env::var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            data_path,
            port,
            pages: PageConfig {
                chart: true,
                ..PageConfig::default()
            },
        }
    }
}

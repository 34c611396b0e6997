use crate::capture::MoodCapture;
use crate::config::PageConfig;
use crate::storage::LocalStorage;
use crate::theme::ThemeSwitcher;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Everything one page session mutates, guarded by a single lock.
#[derive(Debug)]
pub struct Session {
    pub storage: LocalStorage,
    pub capture: MoodCapture,
    pub theme: ThemeSwitcher,
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub pages: PageConfig,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, pages: PageConfig, storage: LocalStorage) -> Self {
        let theme = ThemeSwitcher::init(&storage, pages.theme);
        let capture = MoodCapture::new(pages.capture);
        Self {
            data_path,
            pages,
            session: Arc::new(Mutex::new(Session {
                storage,
                capture,
                theme,
            })),
        }
    }
}

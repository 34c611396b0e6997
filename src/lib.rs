pub mod app;
pub mod capture;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod insight;
pub mod models;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{load_storage, LocalStorage, MoodStorage};

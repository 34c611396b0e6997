use crate::capture::{CaptureError, MoodCapture};
use crate::errors::AppError;
use crate::history::{HistoryCard, HistoryView, MoodFilter, RangeFilter};
use crate::insight::{ChartSurface, InsightView};
use crate::models::{
    HistoryQuery, InsightQuery, Mood, MoodEntry, NoteForm, SaveMoodRequest, SelectMoodForm,
    ThemeRequest, ThemeResponse, ToggleForm,
};
use crate::state::{AppState, Session};
use crate::storage::persist_storage;
use crate::ui::{render_capture, render_history, render_insight, render_settings};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Utc;
use tracing::{error, warn};

const DEFAULT_CHART_WIDTH: f64 = 600.0;

pub async fn capture_page(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_capture(&session.capture, &session.theme))
}

pub async fn select_mood(
    State(state): State<AppState>,
    Form(form): Form<SelectMoodForm>,
) -> Redirect {
    let mut session = state.session.lock().await;
    session.capture.select_mood(Mood::from(form.mood.trim()));
    Redirect::to("/")
}

pub async fn save_mood(
    State(state): State<AppState>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    let Session {
        storage, capture, ..
    } = &mut *session;
    capture.set_note(form.note);
    match capture.save(storage, Utc::now()) {
        Ok(entry) => {
            if let Err(err) = persist_storage(&state.data_path, storage).await {
                error!(id = entry.id, "mood kept in memory but not written to disk: {err}");
                return Err(err.into());
            }
        }
        Err(err) => warn!("mood not saved: {err}"),
    }
    Ok(Redirect::to("/"))
}

pub async fn history_page(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Html<String> {
    let session = state.session.lock().await;
    let view = load_history(&state, &session, &query);
    Html(render_history(&view, &session.theme))
}

pub async fn insight_page(
    State(state): State<AppState>,
    Query(query): Query<InsightQuery>,
) -> Html<String> {
    let session = state.session.lock().await;
    let view = InsightView::load(&session.storage, chart_surface(&state, &query));
    Html(render_insight(&view, &session.theme))
}

pub async fn settings_page(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_settings(&session.theme))
}

pub async fn toggle_theme(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state).await?;
    let next = form
        .next
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/".to_string());
    Ok(Redirect::to(&next))
}

pub async fn select_theme(
    State(state): State<AppState>,
    Form(form): Form<ThemeRequest>,
) -> Result<Redirect, AppError> {
    apply_selection(&state, &form.theme).await?;
    Ok(Redirect::to("/settings"))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<HistoryCard>> {
    let session = state.session.lock().await;
    let view = load_history(&state, &session, &query);
    Json(view.visible().iter().map(HistoryCard::from_entry).collect())
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<SaveMoodRequest>,
) -> Result<(StatusCode, Json<MoodEntry>), AppError> {
    let mut session = state.session.lock().await;

    // Each API call is its own page view, so it gets a fresh capture state.
    let mut capture = MoodCapture::new(state.pages.capture);
    if let Some(mood) = payload.mood.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        capture.select_mood(Mood::from(mood));
    }
    capture.set_note(payload.note.unwrap_or_default());

    let entry = capture
        .save(&mut session.storage, Utc::now())
        .map_err(|err: CaptureError| AppError::bad_request(err.to_string()))?;
    if let Err(err) = persist_storage(&state.data_path, &session.storage).await {
        error!(id = entry.id, "mood kept in memory but not written to disk: {err}");
        return Err(err.into());
    }
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_insight(
    State(state): State<AppState>,
    Query(query): Query<InsightQuery>,
) -> Json<InsightView> {
    let session = state.session.lock().await;
    Json(InsightView::load(&session.storage, chart_surface(&state, &query)))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let session = state.session.lock().await;
    Json(theme_response(&session))
}

pub async fn toggle_theme_api(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    Ok(Json(apply_toggle(&state).await?))
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<ThemeResponse>, AppError> {
    Ok(Json(apply_selection(&state, &payload.theme).await?))
}

async fn apply_toggle(state: &AppState) -> Result<ThemeResponse, AppError> {
    let mut session = state.session.lock().await;
    let Session { storage, theme, .. } = &mut *session;
    theme.toggle(storage);
    persist_storage(&state.data_path, storage).await?;
    Ok(theme_response(&session))
}

async fn apply_selection(state: &AppState, value: &str) -> Result<ThemeResponse, AppError> {
    let mut session = state.session.lock().await;
    let Session { storage, theme, .. } = &mut *session;
    theme.select_explicit(storage, value.trim());
    persist_storage(&state.data_path, storage).await?;
    Ok(theme_response(&session))
}

fn theme_response(session: &Session) -> ThemeResponse {
    ThemeResponse {
        theme: session.theme.current().as_str().to_string(),
    }
}

fn load_history(state: &AppState, session: &Session, query: &HistoryQuery) -> HistoryView {
    let mut view = HistoryView::load(&session.storage, state.pages.history);
    view.apply_filters(
        MoodFilter::parse(query.mood.as_deref()),
        RangeFilter::parse(query.range.as_deref()),
        Utc::now(),
    );
    view
}

fn chart_surface(state: &AppState, query: &InsightQuery) -> Option<ChartSurface> {
    if !state.pages.chart {
        return None;
    }
    let width = query
        .width
        .filter(|width| width.is_finite() && *width > 0.0)
        .unwrap_or(DEFAULT_CHART_WIDTH);
    Some(ChartSurface { width })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::storage::{LocalStorage, MoodStorage};

    #[tokio::test]
    async fn failed_write_reports_error_and_keeps_entry_in_memory() {
        // A directory cannot be written as a file.
        let state = AppState::new(std::env::temp_dir(), PageConfig::default(), LocalStorage::default());
        state.session.lock().await.capture.select_mood(Mood::Good);

        let result = save_mood(
            State(state.clone()),
            Form(NoteForm {
                note: "unsaved".to_string(),
            }),
        )
        .await;

        let err = result.err().expect("write into a directory should fail");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        let session = state.session.lock().await;
        assert_eq!(session.storage.load().len(), 1);
        assert!(session.capture.selected().is_none());
    }

    #[tokio::test]
    async fn toggle_form_redirects_back_to_local_paths_only() {
        use axum::response::IntoResponse;

        let mut path = std::env::temp_dir();
        path.push(format!("mood_tracker_toggle_{}.json", std::process::id()));
        let state = AppState::new(path.clone(), PageConfig::default(), LocalStorage::default());

        let response = toggle_theme(
            State(state.clone()),
            Form(ToggleForm {
                next: Some("/history".to_string()),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(response.headers()["location"], "/history");

        let response = toggle_theme(
            State(state.clone()),
            Form(ToggleForm {
                next: Some("//elsewhere.example".to_string()),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(response.headers()["location"], "/");

        assert_eq!(state.session.lock().await.theme.current(), crate::models::Theme::Default);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn oversized_range_lists_every_entry() {
        let mut storage = LocalStorage::default();
        storage.set_item(
            crate::storage::ENTRIES_KEY,
            r#"[{"id":1,"mood":"good","note":"","date":"2026-10-18T12:00:00.000Z"}]"#,
        );
        let state = AppState::new(std::env::temp_dir(), PageConfig::default(), storage);

        let Json(cards) = list_entries(
            State(state),
            Query(HistoryQuery {
                mood: None,
                range: Some("100000000".to_string()),
            }),
        )
        .await;
        assert_eq!(cards.len(), 1);
    }
}

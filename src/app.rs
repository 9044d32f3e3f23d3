use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/navigate", post(handlers::navigate))
        .route("/api/calendar/select", post(handlers::select_date))
        .route("/api/tasks", get(handlers::get_tasks).post(handlers::add_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/notes", get(handlers::get_notes).post(handlers::add_note))
        .route("/api/notes/:id/select", post(handlers::select_note))
        .route("/api/notes/update", post(handlers::update_note))
        .route("/api/notes/cancel", post(handlers::cancel_edit))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}

use crate::calendar::{self, MonthStep, WEEKDAY_HEADERS};
use crate::dashboard::Dashboard;
use crate::errors::AppError;
use crate::models::{
    CalendarResponse, DashboardView, NavigateRequest, NewTaskRequest, NoteId, NoteRequest,
    NotesResponse, SelectDateRequest, StatsResponse, TaskId, TasksResponse,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let dashboard = state.dashboard.lock().await;
    let page = render_index(&dashboard_view(&dashboard))?;
    Ok(Html(page))
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(calendar_view(&dashboard))
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<CalendarResponse>, AppError> {
    let step = MonthStep::from_direction(payload.direction)
        .ok_or_else(|| AppError::bad_request("direction must be -1 or 1"))?;

    let mut dashboard = state.dashboard.lock().await;
    dashboard.navigate_month(step);
    Ok(Json(calendar_view(&dashboard)))
}

pub async fn select_date(
    State(state): State<AppState>,
    Json(payload): Json<SelectDateRequest>,
) -> Result<Json<CalendarResponse>, AppError> {
    let date = NaiveDate::parse_from_str(payload.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?;

    let mut dashboard = state.dashboard.lock().await;
    dashboard.select_date(date);
    Ok(Json(calendar_view(&dashboard)))
}

pub async fn get_tasks(State(state): State<AppState>) -> Json<TasksResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(tasks_view(&dashboard))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTaskRequest>,
) -> Json<TasksResponse> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.add_task(&payload.title);
    Json(tasks_view(&dashboard))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Json<TasksResponse> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.toggle_task(id);
    Json(tasks_view(&dashboard))
}

pub async fn get_notes(State(state): State<AppState>) -> Json<NotesResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(notes_view(&dashboard))
}

pub async fn add_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> Json<NotesResponse> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.add_note(&payload.title, &payload.content);
    Json(notes_view(&dashboard))
}

pub async fn select_note(
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
) -> Json<NotesResponse> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.select_note(id);
    Json(notes_view(&dashboard))
}

pub async fn update_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> Json<NotesResponse> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.update_note(&payload.title, &payload.content);
    Json(notes_view(&dashboard))
}

pub async fn cancel_edit(State(state): State<AppState>) -> Json<NotesResponse> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.cancel_edit();
    Json(notes_view(&dashboard))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(build_stats(&dashboard))
}

pub fn dashboard_view(dashboard: &Dashboard) -> DashboardView {
    DashboardView {
        calendar: calendar_view(dashboard),
        tasks: tasks_view(dashboard),
        notes: notes_view(dashboard),
        stats: build_stats(dashboard),
    }
}

fn calendar_view(dashboard: &Dashboard) -> CalendarResponse {
    let cursor = dashboard.cursor();
    CalendarResponse {
        month: calendar::month_label(cursor),
        cursor,
        weekdays: WEEKDAY_HEADERS,
        leading_blanks: calendar::leading_blanks(cursor),
        days: dashboard.calendar_days(),
    }
}

fn tasks_view(dashboard: &Dashboard) -> TasksResponse {
    TasksResponse {
        date: dashboard.cursor(),
        label: calendar::day_label(dashboard.cursor()),
        tasks: dashboard.tasks_on_cursor(),
    }
}

fn notes_view(dashboard: &Dashboard) -> NotesResponse {
    NotesResponse {
        date: dashboard.cursor(),
        label: calendar::day_label(dashboard.cursor()),
        notes: dashboard.notes_on_cursor(),
        editor: dashboard.editor().clone(),
    }
}

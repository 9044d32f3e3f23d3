use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = u64;
pub type NoteId = u64;

/// Category stamped on every note.
pub const NOTE_CATEGORY: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub category: String,
}

/// Edit fields for the note form. `target` is the note being edited, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteEditor {
    pub target: Option<NoteId>,
    pub title: String,
    pub content: String,
}

/// One cell of the month grid. Rebuilt on every read.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub label: String,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: i32,
}

#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub month: String,
    pub cursor: NaiveDate,
    pub weekdays: [&'static str; 7],
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub date: NaiveDate,
    pub label: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub date: NaiveDate,
    pub label: String,
    pub notes: Vec<Note>,
    pub editor: NoteEditor,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub label: String,
    pub date: NaiveDate,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub notes: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryPoint {
    pub name: &'static str,
    pub value: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub month: String,
    pub daily: Vec<DailyPoint>,
    pub summary: Vec<SummaryPoint>,
}

/// Everything the page needs on first paint.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub calendar: CalendarResponse,
    pub tasks: TasksResponse,
    pub notes: NotesResponse,
    pub stats: StatsResponse,
}

//! In-memory state behind the dashboard: tasks, notes, the month cursor and
//! the note editor.
//!
//! Mutations never fail. Invalid input (blank text, unknown ids, no edit
//! target) leaves the state untouched and is reported through the return
//! value only.

use crate::calendar::{self, MonthStep};
use crate::models::{CalendarDay, Note, NoteEditor, NoteId, NOTE_CATEGORY, Task, TaskId};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Dashboard {
    tasks: Vec<Task>,
    notes: Vec<Note>,
    cursor: NaiveDate,
    editor: NoteEditor,
    next_id: u64,
}

impl Dashboard {
    pub fn new(cursor: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            notes: Vec::new(),
            cursor,
            editor: NoteEditor::default(),
            next_id: 1,
        }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn editor(&self) -> &NoteEditor {
        &self.editor
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn calendar_days(&self) -> Vec<CalendarDay> {
        calendar::calendar_days(self.cursor, &self.tasks, &self.notes)
    }

    /// Tasks dated on the cursor day, in creation order.
    pub fn tasks_on_cursor(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.date == self.cursor)
            .cloned()
            .collect()
    }

    pub fn notes_on_cursor(&self) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.date == self.cursor)
            .cloned()
            .collect()
    }

    /// Returns false when the shifted date would fall outside chrono's range.
    pub fn navigate_month(&mut self, step: MonthStep) -> bool {
        match calendar::shift_month(self.cursor, step) {
            Some(next) => {
                info!(from = %self.cursor, to = %next, "month cursor moved");
                self.cursor = next;
                true
            }
            None => {
                warn!(cursor = %self.cursor, ?step, "month shift out of range");
                false
            }
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        debug!(from = %self.cursor, to = %date, "cursor date selected");
        self.cursor = date;
    }

    pub fn add_task(&mut self, title: &str) -> Option<TaskId> {
        if title.trim().is_empty() {
            debug!("rejected task with blank title");
            return None;
        }

        let id = self.allocate_id();
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            completed: false,
            date: self.cursor,
            created_at: Utc::now(),
        });
        info!(id, date = %self.cursor, "task added");
        Some(id)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                info!(id, completed = task.completed, "task toggled");
                true
            }
            None => {
                debug!(id, "toggle for unknown task");
                false
            }
        }
    }

    /// Appends a note dated on the cursor day and resets the editor.
    pub fn add_note(&mut self, title: &str, content: &str) -> Option<NoteId> {
        if title.trim().is_empty() || content.trim().is_empty() {
            debug!("rejected note with blank title or content");
            return None;
        }

        let id = self.allocate_id();
        self.notes.push(Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            date: self.cursor,
            created_at: Utc::now(),
            updated_at: None,
            tags: Vec::new(),
            category: NOTE_CATEGORY.to_string(),
        });
        self.editor = NoteEditor::default();
        info!(id, date = %self.cursor, "note added");
        Some(id)
    }

    /// Loads a note into the editor and makes it the edit target.
    pub fn select_note(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            debug!(id, "select for unknown note");
            return false;
        };

        self.editor = NoteEditor {
            target: Some(note.id),
            title: note.title.clone(),
            content: note.content.clone(),
        };
        debug!(id, "note selected for edit");
        true
    }

    /// Replaces the edit target's title and content, then clears the editor.
    ///
    /// Id, date and creation time are kept. Without a target, or with a blank
    /// field, nothing changes.
    pub fn update_note(&mut self, title: &str, content: &str) -> bool {
        let Some(target) = self.editor.target else {
            debug!("update without an edit target");
            return false;
        };
        if title.trim().is_empty() || content.trim().is_empty() {
            debug!(id = target, "rejected note update with blank field");
            return false;
        }

        let updated = match self.notes.iter_mut().find(|note| note.id == target) {
            Some(note) => {
                note.title = title.to_string();
                note.content = content.to_string();
                note.updated_at = Some(Utc::now());
                true
            }
            None => false,
        };
        self.editor = NoteEditor::default();

        if updated {
            info!(id = target, "note updated");
        } else {
            warn!(id = target, "edit target vanished before update");
        }
        updated
    }

    pub fn cancel_edit(&mut self) {
        self.editor = NoteEditor::default();
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn blank_task_title_is_ignored() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        assert_eq!(dashboard.add_task(""), None);
        assert_eq!(dashboard.add_task("   \t\n"), None);
        assert!(dashboard.tasks().is_empty());
    }

    #[test]
    fn task_is_dated_to_cursor_and_starts_open() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        let id = dashboard.add_task("  write report ").unwrap();
        let task = dashboard.task(id).unwrap();
        assert_eq!(task.title, "  write report ");
        assert_eq!(task.date, date(2024, 3, 5));
        assert!(!task.completed);
    }

    #[test]
    fn toggling_twice_restores_state() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        let id = dashboard.add_task("call").unwrap();
        assert!(dashboard.toggle_task(id));
        assert!(dashboard.task(id).unwrap().completed);
        assert!(dashboard.toggle_task(id));
        assert!(!dashboard.task(id).unwrap().completed);
    }

    #[test]
    fn toggling_unknown_task_changes_nothing() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        dashboard.add_task("call");
        let before = dashboard.tasks().to_vec();
        assert!(!dashboard.toggle_task(999));
        assert_eq!(dashboard.tasks(), before.as_slice());
    }

    #[test]
    fn ids_stay_unique_under_rapid_creation() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        let mut ids: Vec<u64> = (0..100)
            .map(|i| dashboard.add_task(&format!("t{i}")).unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn note_needs_title_and_content() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        assert_eq!(dashboard.add_note("title", "  "), None);
        assert_eq!(dashboard.add_note(" ", "body"), None);
        assert!(dashboard.notes().is_empty());

        let id = dashboard.add_note("title", "body").unwrap();
        let note = dashboard.note(id).unwrap();
        assert!(note.tags.is_empty());
        assert_eq!(note.category, "general");
        assert_eq!(note.date, date(2024, 3, 5));
        assert_eq!(note.updated_at, None);
    }

    #[test]
    fn unchanged_update_preserves_note() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        let id = dashboard.add_note("日记", "line one\nline two ").unwrap();
        let before = dashboard.note(id).unwrap().clone();

        assert!(dashboard.select_note(id));
        let editor = dashboard.editor().clone();
        assert_eq!(editor.target, Some(id));
        assert!(dashboard.update_note(&editor.title, &editor.content));

        let after = dashboard.note(id).unwrap();
        assert_eq!(after.title.as_bytes(), before.title.as_bytes());
        assert_eq!(after.content.as_bytes(), before.content.as_bytes());
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at.is_some());
        assert_eq!(dashboard.editor(), &NoteEditor::default());
    }

    #[test]
    fn update_replaces_text_in_place() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        let first = dashboard.add_note("a", "one").unwrap();
        let second = dashboard.add_note("b", "two").unwrap();
        dashboard.select_date(date(2024, 4, 1));

        assert!(dashboard.select_note(first));
        assert!(dashboard.update_note("a2", "one2"));

        let notes = dashboard.notes();
        assert_eq!(notes[0].id, first);
        assert_eq!(notes[0].title, "a2");
        assert_eq!(notes[0].content, "one2");
        assert_eq!(notes[0].date, date(2024, 3, 5));
        assert_eq!(notes[1].id, second);
        assert_eq!(notes[1].title, "b");
    }

    #[test]
    fn update_requires_target_and_text() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        let id = dashboard.add_note("a", "one").unwrap();
        assert!(!dashboard.update_note("x", "y"));
        assert_eq!(dashboard.note(id).unwrap().title, "a");

        assert!(dashboard.select_note(id));
        assert!(!dashboard.update_note("x", " "));
        assert_eq!(dashboard.note(id).unwrap().title, "a");
        assert_eq!(dashboard.editor().target, Some(id));

        dashboard.cancel_edit();
        assert_eq!(dashboard.editor().target, None);
        assert!(!dashboard.select_note(404));
        assert_eq!(dashboard.editor().target, None);
    }

    #[test]
    fn navigation_moves_cursor_with_clamping() {
        let mut dashboard = Dashboard::new(date(2024, 1, 31));
        assert!(dashboard.navigate_month(MonthStep::Next));
        assert_eq!(dashboard.cursor(), date(2024, 2, 29));
        assert!(dashboard.navigate_month(MonthStep::Previous));
        assert_eq!(dashboard.cursor(), date(2024, 1, 29));

        let mut edge = Dashboard::new(NaiveDate::MAX);
        assert!(!edge.navigate_month(MonthStep::Next));
        assert_eq!(edge.cursor(), NaiveDate::MAX);
    }

    #[test]
    fn cursor_lists_only_that_day() {
        let mut dashboard = Dashboard::new(date(2024, 3, 5));
        dashboard.add_task("fifth");
        dashboard.add_note("n", "fifth");
        dashboard.select_date(date(2024, 3, 6));
        dashboard.add_task("sixth");

        assert_eq!(dashboard.tasks_on_cursor().len(), 1);
        assert_eq!(dashboard.tasks_on_cursor()[0].title, "sixth");
        assert!(dashboard.notes_on_cursor().is_empty());
        assert_eq!(dashboard.calendar_days()[4].total_tasks, 1);
    }
}

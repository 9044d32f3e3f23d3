use crate::calendar::{calendar_days, month_label, same_month};
use crate::dashboard::Dashboard;
use crate::models::{DailyPoint, Note, StatsResponse, SummaryPoint, Task};
use chrono::NaiveDate;

pub const COMPLETED_LABEL: &str = "已完成任务";
pub const PENDING_LABEL: &str = "待完成任务";
pub const MONTH_NOTES_LABEL: &str = "本月笔记";

pub fn build_stats(dashboard: &Dashboard) -> StatsResponse {
    build_stats_at(dashboard.cursor(), dashboard.tasks(), dashboard.notes())
}

/// Daily series for `cursor`'s month plus the three summary bars.
///
/// Task totals in the summary cover every task ever added; the note total
/// only counts notes in the displayed month.
pub fn build_stats_at(cursor: NaiveDate, tasks: &[Task], notes: &[Note]) -> StatsResponse {
    let daily = calendar_days(cursor, tasks, notes)
        .into_iter()
        .map(|day| DailyPoint {
            label: day.label,
            date: day.date,
            total_tasks: day.total_tasks,
            completed_tasks: day.completed_tasks,
            notes: day.notes.len(),
        })
        .collect();

    let completed = tasks.iter().filter(|task| task.completed).count();
    let month_notes = notes
        .iter()
        .filter(|note| same_month(note.date, cursor))
        .count();

    let summary = vec![
        SummaryPoint {
            name: COMPLETED_LABEL,
            value: completed,
        },
        SummaryPoint {
            name: PENDING_LABEL,
            value: tasks.len() - completed,
        },
        SummaryPoint {
            name: MONTH_NOTES_LABEL,
            value: month_notes,
        },
    ];

    StatsResponse {
        month: month_label(cursor),
        daily,
        summary,
    }
}

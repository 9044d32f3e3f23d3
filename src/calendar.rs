use crate::models::{CalendarDay, Note, Task};
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::BTreeMap;

/// Column headers for the month grid, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
}

impl MonthStep {
    pub fn from_direction(direction: i32) -> Option<Self> {
        match direction {
            -1 => Some(Self::Previous),
            1 => Some(Self::Next),
            _ => None,
        }
    }
}

/// Moves `date` one month in `step`, clamping the day to the length of the
/// target month. `None` only when the result is outside chrono's range.
pub fn shift_month(date: NaiveDate, step: MonthStep) -> Option<NaiveDate> {
    match step {
        MonthStep::Previous => date.checked_sub_months(Months::new(1)),
        MonthStep::Next => date.checked_add_months(Months::new(1)),
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        // Only the last representable month lacks a successor, and it ends on NaiveDate::MAX.
        .unwrap_or(NaiveDate::MAX)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    month_end(date).day()
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Empty cells before the 1st when weeks start on Sunday.
pub fn leading_blanks(date: NaiveDate) -> u32 {
    month_start(date).weekday().num_days_from_sunday()
}

pub fn month_label(date: NaiveDate) -> String {
    format!("{}年{}月", date.year(), date.month())
}

pub fn day_label(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// Every day of `reference`'s month, ascending.
pub fn month_days(reference: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let end = month_end(reference);
    month_start(reference)
        .iter_days()
        .take_while(move |date| *date <= end)
}

/// Builds one `CalendarDay` per day of `reference`'s month.
///
/// Items are bucketed by date in a single pass, then handed out day by day;
/// within a day they keep their collection order. Items dated outside the
/// month are ignored.
pub fn calendar_days(reference: NaiveDate, tasks: &[Task], notes: &[Note]) -> Vec<CalendarDay> {
    let mut buckets: BTreeMap<NaiveDate, (Vec<Task>, Vec<Note>)> = BTreeMap::new();
    for task in tasks.iter().filter(|task| same_month(task.date, reference)) {
        buckets.entry(task.date).or_default().0.push(task.clone());
    }
    for note in notes.iter().filter(|note| same_month(note.date, reference)) {
        buckets.entry(note.date).or_default().1.push(note.clone());
    }

    let mut days = Vec::with_capacity(days_in_month(reference) as usize);
    for date in month_days(reference) {
        let (tasks, notes) = buckets.remove(&date).unwrap_or_default();
        let completed_tasks = tasks.iter().filter(|task| task.completed).count();
        days.push(CalendarDay {
            date,
            day: date.day(),
            label: day_label(date),
            total_tasks: tasks.len(),
            completed_tasks,
            tasks,
            notes,
        });
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u64, on: NaiveDate, completed: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            completed,
            date: on,
            created_at: Utc::now(),
        }
    }

    fn note(id: u64, on: NaiveDate) -> Note {
        Note {
            id,
            title: format!("note {id}"),
            content: "body".to_string(),
            date: on,
            created_at: Utc::now(),
            updated_at: None,
            tags: Vec::new(),
            category: crate::models::NOTE_CATEGORY.to_string(),
        }
    }

    #[test]
    fn thirty_day_month_has_thirty_ordered_days() {
        let days = calendar_days(date(2024, 4, 17), &[], &[]);
        assert_eq!(days.len(), 30);
        assert_eq!(days.first().unwrap().date, date(2024, 4, 1));
        assert_eq!(days.last().unwrap().date, date(2024, 4, 30));
        assert!(days.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn leap_february_has_twenty_nine_days() {
        assert_eq!(calendar_days(date(2024, 2, 10), &[], &[]).len(), 29);
        assert_eq!(calendar_days(date(2023, 2, 10), &[], &[]).len(), 28);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
    }

    #[test]
    fn days_bucket_only_exact_date_matches() {
        let tasks = vec![
            task(1, date(2024, 3, 5), true),
            task(2, date(2024, 3, 5), true),
            task(3, date(2024, 3, 5), false),
            task(4, date(2024, 4, 5), false),
            task(5, date(2024, 3, 6), false),
        ];
        let notes = vec![note(6, date(2024, 3, 5)), note(7, date(2023, 3, 5))];

        let days = calendar_days(date(2024, 3, 20), &tasks, &notes);
        let fifth = &days[4];
        assert_eq!(fifth.date, date(2024, 3, 5));
        assert_eq!(fifth.total_tasks, 3);
        assert_eq!(fifth.completed_tasks, 2);
        assert_eq!(fifth.notes.len(), 1);
        assert_eq!(
            fifth.tasks.iter().map(|task| task.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let tenth = &days[9];
        assert_eq!(tenth.total_tasks, 0);
        assert_eq!(tenth.completed_tasks, 0);

        for day in &days {
            let incomplete = day.tasks.iter().filter(|task| !task.completed).count();
            assert_eq!(day.total_tasks, day.completed_tasks + incomplete);
            assert!(day.tasks.iter().all(|task| task.date == day.date));
        }
    }

    #[test]
    fn shift_month_clamps_to_target_month_length() {
        assert_eq!(
            shift_month(date(2024, 1, 31), MonthStep::Next),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            shift_month(date(2024, 3, 31), MonthStep::Previous),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            shift_month(date(2024, 5, 31), MonthStep::Next),
            Some(date(2024, 6, 30))
        );
        assert_eq!(
            shift_month(date(2024, 12, 15), MonthStep::Next),
            Some(date(2025, 1, 15))
        );
        assert_eq!(shift_month(NaiveDate::MAX, MonthStep::Next), None);
    }

    #[test]
    fn direction_must_be_one_step() {
        assert_eq!(MonthStep::from_direction(-1), Some(MonthStep::Previous));
        assert_eq!(MonthStep::from_direction(1), Some(MonthStep::Next));
        assert_eq!(MonthStep::from_direction(0), None);
        assert_eq!(MonthStep::from_direction(2), None);
    }

    #[test]
    fn labels_and_grid_offset() {
        // 2024-03-01 is a Friday.
        assert_eq!(leading_blanks(date(2024, 3, 18)), 5);
        assert_eq!(month_label(date(2024, 3, 18)), "2024年3月");
        assert_eq!(day_label(date(2024, 3, 5)), "2024年3月5日");
    }
}

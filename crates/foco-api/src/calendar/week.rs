use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::task::TaskView;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Sum of the planned minutes of the day's tasks
    pub planned_minutes: u32,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarWeek {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<CalendarDay>,
}

/// Sunday and Saturday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = u64::from(date.weekday().num_days_from_sunday());
    let start = date.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Lay out the tasks on the seven days of the week containing `date`.
///
/// Tasks outside the week are ignored; each day keeps the input order.
pub fn build_week(date: NaiveDate, today: NaiveDate, tasks: Vec<TaskView>) -> CalendarWeek {
    let (start, end) = week_bounds(date);

    let mut days: Vec<CalendarDay> = start
        .iter_days()
        .take(7)
        .map(|day| CalendarDay {
            date: day,
            is_today: day == today,
            planned_minutes: 0,
            tasks: Vec::new(),
        })
        .collect();

    for view in tasks {
        let Some(day) = days.iter_mut().find(|d| d.date == view.task.due_date) else {
            continue;
        };
        day.planned_minutes = day.planned_minutes.saturating_add(view.task.duration_minutes);
        day.tasks.push(view);
    }

    CalendarWeek { start, end, days }
}

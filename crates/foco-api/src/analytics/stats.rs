use std::collections::HashMap;

use chrono::NaiveDate;
use foco_db::models::{ErrorNote, Flashcard, Subject, Task, TaskStatus};
use serde::Serialize;
use uuid::Uuid;

use crate::error_note::stats::{ErrorNoteStats, error_note_stats};

/// `part` as a whole-number percentage of `whole`, rounded half up. 0 when `whole` is 0.
pub const fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (whole * 2)) as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskTotals {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectTaskStats {
    pub subject_id: Uuid,
    pub name: String,
    pub color: String,
    pub total: usize,
    pub done: usize,
    pub completion_rate: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StudyMinutes {
    pub total: u32,
    pub completed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectFlashcardStats {
    pub subject_id: Uuid,
    pub name: String,
    pub color: String,
    pub correct: u32,
    pub wrong: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub tasks: TaskTotals,
    pub tasks_by_subject: Vec<SubjectTaskStats>,
    pub study_minutes: StudyMinutes,
    pub flashcards_by_subject: Vec<SubjectFlashcardStats>,
    pub errors: ErrorNoteStats,
}

pub fn task_totals(tasks: &[Task], today: NaiveDate) -> TaskTotals {
    let with_status = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
    let done = with_status(TaskStatus::Done);

    TaskTotals {
        total: tasks.len(),
        done,
        pending: with_status(TaskStatus::Pending),
        in_progress: with_status(TaskStatus::InProgress),
        overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        completion_rate: percent(done, tasks.len()),
    }
}

fn subject_task_stats(subject: &Subject, tasks: &[Task]) -> Option<SubjectTaskStats> {
    let owned: Vec<&Task> = tasks.iter().filter(|t| t.subject_id == subject.id).collect();
    if owned.is_empty() {
        return None;
    }

    let done = owned.iter().filter(|t| t.status == TaskStatus::Done).count();
    Some(SubjectTaskStats {
        subject_id: subject.id,
        name: subject.name.clone(),
        color: subject.color.clone(),
        total: owned.len(),
        done,
        completion_rate: percent(done, owned.len()),
        minutes: owned.iter().map(|t| t.duration_minutes).sum(),
    })
}

pub fn study_minutes(tasks: &[Task]) -> StudyMinutes {
    StudyMinutes {
        total: tasks.iter().map(|t| t.duration_minutes).sum(),
        completed: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .map(|t| t.duration_minutes)
            .sum(),
    }
}

fn flashcards_by_subject(cards: &[Flashcard], subjects: &[Subject]) -> Vec<SubjectFlashcardStats> {
    let mut sums: HashMap<Uuid, (u32, u32)> = HashMap::new();
    for card in cards {
        let entry = sums.entry(card.subject_id).or_default();
        entry.0 += card.correct_count;
        entry.1 += card.wrong_count;
    }

    subjects
        .iter()
        .filter_map(|subject| {
            let &(correct, wrong) = sums.get(&subject.id)?;
            (correct + wrong > 0).then(|| SubjectFlashcardStats {
                subject_id: subject.id,
                name: subject.name.clone(),
                color: subject.color.clone(),
                correct,
                wrong,
            })
        })
        .collect()
}

pub fn dashboard(
    subjects: &[Subject],
    tasks: &[Task],
    cards: &[Flashcard],
    notes: &[ErrorNote],
    today: NaiveDate,
) -> Dashboard {
    Dashboard {
        tasks: task_totals(tasks, today),
        tasks_by_subject: subjects
            .iter()
            .filter_map(|s| subject_task_stats(s, tasks))
            .collect(),
        study_minutes: study_minutes(tasks),
        flashcards_by_subject: flashcards_by_subject(cards, subjects),
        errors: error_note_stats(notes, subjects),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use foco_db::models::Priority;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn subject(name: &str) -> Subject {
        Subject {
            id: Uuid::new_v4(),
            name: name.to_string(),
            priority: Priority::High,
            category: "Exatas".to_string(),
            color: "#3B82F6".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(subject_id: Uuid, due: NaiveDate, minutes: u32, status: TaskStatus) -> Task {
        Task {
            id: Uuid::new_v4(),
            subject_id,
            title: "Lista de exercícios".to_string(),
            description: String::new(),
            due_date: due,
            duration_minutes: minutes,
            status,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn card(subject_id: Uuid, correct: u32, wrong: u32) -> Flashcard {
        Flashcard {
            id: Uuid::new_v4(),
            subject_id,
            content: String::new(),
            front: "2 + 2".to_string(),
            back: "4".to_string(),
            correct_count: correct,
            wrong_count: wrong,
            interval_days: 1,
            next_review: None,
            last_difficulty: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(1, 8), 13); // 12.5 rounds up
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = dashboard(&[], &[], &[], &[], day(10));

        assert_eq!(dashboard.tasks, TaskTotals::default());
        assert!(dashboard.tasks_by_subject.is_empty());
        assert_eq!(dashboard.study_minutes, StudyMinutes::default());
        assert!(dashboard.flashcards_by_subject.is_empty());
        assert_eq!(dashboard.errors.total, 0);
    }

    #[test]
    fn test_task_totals() {
        let math = subject("Matemática");
        let tasks = vec![
            task(math.id, day(5), 60, TaskStatus::Done),
            task(math.id, day(6), 30, TaskStatus::Pending),
            task(math.id, day(12), 45, TaskStatus::InProgress),
        ];

        let totals = task_totals(&tasks, day(10));
        assert_eq!(totals.total, 3);
        assert_eq!(totals.done, 1);
        assert_eq!(totals.pending, 1);
        assert_eq!(totals.in_progress, 1);
        assert_eq!(totals.overdue, 1);
        assert_eq!(totals.completion_rate, 33);

        let minutes = study_minutes(&tasks);
        assert_eq!(minutes.total, 135);
        assert_eq!(minutes.completed, 60);
    }

    #[test]
    fn test_subjects_without_activity_are_left_out() {
        let math = subject("Matemática");
        let history = subject("História");
        let biology = subject("Biologia");
        let subjects = vec![math.clone(), history.clone(), biology.clone()];

        let tasks = vec![
            task(math.id, day(5), 60, TaskStatus::Done),
            task(math.id, day(6), 30, TaskStatus::Done),
        ];
        let cards = vec![
            card(history.id, 3, 1),
            card(history.id, 2, 0),
            card(biology.id, 0, 0),
        ];

        let dashboard = dashboard(&subjects, &tasks, &cards, &[], day(10));

        assert_eq!(dashboard.tasks_by_subject.len(), 1);
        let math_stats = &dashboard.tasks_by_subject[0];
        assert_eq!(math_stats.name, "Matemática");
        assert_eq!(math_stats.completion_rate, 100);
        assert_eq!(math_stats.minutes, 90);

        assert_eq!(dashboard.flashcards_by_subject.len(), 1);
        let history_cards = &dashboard.flashcards_by_subject[0];
        assert_eq!(history_cards.subject_id, history.id);
        assert_eq!(history_cards.correct, 5);
        assert_eq!(history_cards.wrong, 1);
    }
}

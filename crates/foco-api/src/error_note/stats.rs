use std::collections::HashMap;

use foco_db::models::{ErrorNote, ErrorType, Subject};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorTypeCount {
    pub error_type: ErrorType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectErrorCount {
    pub subject_id: Uuid,
    pub name: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNoteStats {
    pub total: usize,
    /// Sum of recorded review dates over all notes
    pub total_reviews: usize,
    /// Every error type, zero counts included
    pub by_type: Vec<ErrorTypeCount>,
    /// Only subjects with at least one note, in subject order
    pub by_subject: Vec<SubjectErrorCount>,
}

pub fn error_note_stats(notes: &[ErrorNote], subjects: &[Subject]) -> ErrorNoteStats {
    let by_type = ErrorType::ALL
        .iter()
        .map(|&error_type| ErrorTypeCount {
            error_type,
            count: notes.iter().filter(|n| n.error_type == error_type).count(),
        })
        .collect();

    let mut per_subject: HashMap<Uuid, usize> = HashMap::new();
    for note in notes {
        *per_subject.entry(note.subject_id).or_default() += 1;
    }

    let by_subject = subjects
        .iter()
        .filter_map(|subject| {
            let count = *per_subject.get(&subject.id)?;
            Some(SubjectErrorCount {
                subject_id: subject.id,
                name: subject.name.clone(),
                color: subject.color.clone(),
                count,
            })
        })
        .collect();

    ErrorNoteStats {
        total: notes.len(),
        total_reviews: notes.iter().map(|n| n.review_dates.len()).sum(),
        by_type,
        by_subject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use foco_db::models::Priority;

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

    fn note(subject_id: Uuid, error_type: ErrorType, reviews: usize) -> ErrorNote {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ErrorNote {
            id: Uuid::new_v4(),
            subject_id,
            content: "Cinemática".to_string(),
            question: "Q".to_string(),
            wrong_answer: "A".to_string(),
            correct_answer: "B".to_string(),
            insight: String::new(),
            error_type,
            occurred_on: day,
            review_dates: vec![day; reviews],
            last_reviewed: (reviews > 0).then_some(day),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_count_types_and_subjects() {
        let physics = subject("Física");
        let history = subject("História");
        let empty = subject("Artes");
        let notes = vec![
            note(physics.id, ErrorType::Conceptual, 2),
            note(physics.id, ErrorType::Distraction, 0),
            note(history.id, ErrorType::Conceptual, 5),
        ];

        let stats = error_note_stats(&notes, &[physics.clone(), empty, history.clone()]);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.total_reviews, 7);
        assert_eq!(stats.by_type.len(), 4);
        assert_eq!(
            stats.by_type[0],
            ErrorTypeCount {
                error_type: ErrorType::Conceptual,
                count: 2
            }
        );
        assert_eq!(stats.by_type[2].count, 0);

        let names: Vec<_> = stats.by_subject.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Física", "História"]);
        assert_eq!(stats.by_subject[0].count, 2);
    }

    #[test]
    fn test_stats_of_empty_notebook() {
        let stats = error_note_stats(&[], &[subject("Química")]);
        assert_eq!(stats.total, 0);
        assert!(stats.by_type.iter().all(|t| t.count == 0));
        assert!(stats.by_subject.is_empty());
    }
}

//! Study data models and the mapping layer between database rows and models.
//!
//! Rows (`*Row`) mirror the table columns exactly: enum labels are plain
//! strings and counters are `i32`. Models are what the rest of the workspace
//! works with. The only conversion point is the `TryFrom<*Row>` impls below.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use foco_srs::{Difficulty, ReviewCounters};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A row that cannot be turned into a model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown {field} label: '{value}'")]
    UnknownLabel { field: &'static str, value: String },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Error returned by the `FromStr` impls of the label enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label: '{}'", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

/// Declares an enum stored as a TEXT label, with `as_str`, `FromStr` and serde
/// all using the same labels.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(UnknownLabel(other.to_string())),
                }
            }
        }
    };
}

label_enum! {
    /// Priority tier of a subject
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

label_enum! {
    /// Three-state status of a study task
    pub enum TaskStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Done => "done",
    }
}

label_enum! {
    /// Why a mistake happened
    pub enum ErrorType {
        Conceptual => "conceptual",
        Distraction => "distraction",
        Interpretation => "interpretation",
        Other => "other",
    }
}

label_enum! {
    /// Status of one journey topic
    pub enum JourneyStatus {
        Todo => "todo",
        InProgress => "in_progress",
        Done => "done",
    }
}

fn parse_label<T: FromStr>(field: &'static str, value: &str) -> Result<T, ModelError> {
    value.parse().map_err(|_| ModelError::UnknownLabel {
        field,
        value: value.to_string(),
    })
}

fn non_negative(field: &'static str, value: i32) -> Result<u32, ModelError> {
    u32::try_from(value).map_err(|_| ModelError::OutOfRange {
        field,
        value: i64::from(value),
    })
}

/// Convert a list of rows, failing on the first malformed one.
pub fn from_rows<R, M>(rows: Vec<R>) -> Result<Vec<M>, ModelError>
where
    M: TryFrom<R, Error = ModelError>,
{
    rows.into_iter().map(M::try_from).collect()
}

// --- Subjects ---

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubjectRow {
    pub id: Uuid,
    pub name: String,
    pub priority: String,
    pub category: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named, colored category that owns tasks, flashcards and error notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub priority: Priority,
    pub category: String,
    /// `#RRGGBB`
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SubjectRow> for Subject {
    type Error = ModelError;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            priority: parse_label("priority", &row.priority)?,
            category: row.category,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub priority: Priority,
    pub category: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectChanges {
    pub name: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub color: Option<String>,
}

// --- Tasks ---

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRow {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub duration_minutes: i32,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A scheduled study activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub duration_minutes: u32,
    pub status: TaskStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Past its date and not done yet.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && self.status != TaskStatus::Done
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = ModelError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            subject_id: row.subject_id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            duration_minutes: non_negative("duration_minutes", row.duration_minutes)?,
            status: parse_label("status", &row.status)?,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub subject_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub duration_minutes: u32,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub subject_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub status: Option<TaskStatus>,
}

// --- Flashcards ---

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FlashcardRow {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub content: String,
    pub front: String,
    pub back: String,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub interval_days: i32,
    pub next_review: Option<NaiveDate>,
    pub last_difficulty: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One recall item with its review state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub content: String,
    pub front: String,
    pub back: String,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub interval_days: u32,
    /// `None` until the first review; such a card is always due
    pub next_review: Option<NaiveDate>,
    pub last_difficulty: Option<Difficulty>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub const fn counters(&self) -> ReviewCounters {
        ReviewCounters::new(self.correct_count, self.wrong_count)
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        foco_srs::is_flashcard_due(self.next_review, today)
    }
}

impl TryFrom<FlashcardRow> for Flashcard {
    type Error = ModelError;

    fn try_from(row: FlashcardRow) -> Result<Self, Self::Error> {
        let last_difficulty = row
            .last_difficulty
            .as_deref()
            .map(|label| parse_label::<Difficulty>("last_difficulty", label))
            .transpose()?;

        Ok(Self {
            id: row.id,
            subject_id: row.subject_id,
            content: row.content,
            front: row.front,
            back: row.back,
            correct_count: non_negative("correct_count", row.correct_count)?,
            wrong_count: non_negative("wrong_count", row.wrong_count)?,
            interval_days: non_negative("interval_days", row.interval_days)?,
            next_review: row.next_review,
            last_difficulty,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewFlashcard {
    pub subject_id: Uuid,
    pub content: String,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, Default)]
pub struct FlashcardChanges {
    pub subject_id: Option<Uuid>,
    pub content: Option<String>,
    pub front: Option<String>,
    pub back: Option<String>,
}

/// Review state written back after a flashcard review
#[derive(Debug, Clone, Copy)]
pub struct FlashcardReviewUpdate {
    pub counters: ReviewCounters,
    pub interval_days: u32,
    pub next_review: NaiveDate,
    pub difficulty: Difficulty,
}

// --- Error notebook ---

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ErrorNoteRow {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub content: String,
    pub question: String,
    pub wrong_answer: String,
    pub correct_answer: String,
    pub insight: String,
    pub error_type: String,
    pub occurred_on: NaiveDate,
    pub review_dates: Vec<NaiveDate>,
    pub last_reviewed: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recorded mistake, reviewed on the fixed error notebook ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNote {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub content: String,
    pub question: String,
    pub wrong_answer: String,
    pub correct_answer: String,
    pub insight: String,
    pub error_type: ErrorType,
    pub occurred_on: NaiveDate,
    /// Append-only, oldest first
    pub review_dates: Vec<NaiveDate>,
    pub last_reviewed: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ErrorNote {
    pub fn next_due(&self) -> Option<NaiveDate> {
        foco_srs::error_note_next_due(&self.review_dates)
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        foco_srs::is_error_note_due(&self.review_dates, today)
    }
}

impl TryFrom<ErrorNoteRow> for ErrorNote {
    type Error = ModelError;

    fn try_from(row: ErrorNoteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            subject_id: row.subject_id,
            content: row.content,
            question: row.question,
            wrong_answer: row.wrong_answer,
            correct_answer: row.correct_answer,
            insight: row.insight,
            error_type: parse_label("error_type", &row.error_type)?,
            occurred_on: row.occurred_on,
            review_dates: row.review_dates,
            last_reviewed: row.last_reviewed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewErrorNote {
    pub subject_id: Uuid,
    pub content: String,
    pub question: String,
    pub wrong_answer: String,
    pub correct_answer: String,
    pub insight: String,
    pub error_type: ErrorType,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct ErrorNoteChanges {
    pub subject_id: Option<Uuid>,
    pub content: Option<String>,
    pub question: Option<String>,
    pub wrong_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub insight: Option<String>,
    pub error_type: Option<ErrorType>,
    pub occurred_on: Option<NaiveDate>,
}

// --- Journey ---

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JourneyProgressRow {
    pub area: String,
    pub topic: String,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

/// The owner's status on one journey topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyProgress {
    pub area: String,
    pub topic: String,
    pub status: JourneyStatus,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<JourneyProgressRow> for JourneyProgress {
    type Error = ModelError;

    fn try_from(row: JourneyProgressRow) -> Result<Self, Self::Error> {
        Ok(Self {
            area: row.area,
            topic: row.topic,
            status: parse_label("status", &row.status)?,
            updated_at: row.updated_at,
        })
    }
}

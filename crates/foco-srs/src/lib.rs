//! SRS (Spaced Repetition System) library for Foco
//!
//! This crate holds the review scheduling rules shared by the flashcard review
//! flow and the error notebook. Everything here is pure: callers pass in the
//! current state and "today", and persist whatever comes back.
//!
//! Two variants exist:
//!
//! * [`flashcard`] picks the next interval from a difficulty-indexed ladder
//!   and updates the correct/wrong counters.
//! * [`error_note`] walks a single fixed ladder indexed by how many reviews
//!   have been recorded so far. Every review counts as a step forward.

pub mod difficulty;
pub mod error_note;
pub mod flashcard;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use error_note::{
    ERROR_NOTE_LADDER, error_note_next_due, is_error_note_due, record_error_note_review,
};
pub use flashcard::{
    ReviewCounters, ReviewOutcome, build_due_queue, compute_next_review, due_queue_order,
    is_flashcard_due,
};

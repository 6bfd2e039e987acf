// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).
//
// Every query is scoped by `user_id`. A row owned by someone else is reported
// the same way as a missing one.

pub mod error_note;
pub mod flashcard;
pub mod journey;
pub mod subject;
pub mod task;

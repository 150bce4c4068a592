//! Result types for vote store operations.

/// Outcome of inserting a vote row.
///
/// A row that already exists for the voter is an expected outcome, not an
/// error: the caller decides whether to fall back to an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was created for the voter.
    Inserted,
    /// A row with the same voter id already exists (unique violation).
    AlreadyExists,
}

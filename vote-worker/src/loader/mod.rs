//! Loader module for the vote worker.
//!
//! Writes decoded votes to the store with insert-or-update semantics keyed by
//! voter id.

use tracing::{debug, instrument};

use vote_worker_repository::{InsertOutcome, VoteStore, VoteStoreError};
use vote_worker_shared::VoteMessage;

/// Which branch of the upsert stored the vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// First vote from this voter; a new row was created.
    Inserted,
    /// The voter already had a row; its vote was overwritten.
    Updated,
}

/// Store `vote` as the current vote of its voter.
///
/// Tries an insert first. Only `InsertOutcome::AlreadyExists` takes the update
/// branch; any error from either statement is returned untouched and the
/// caller treats it as fatal.
#[instrument(skip(store, vote), fields(voter_id = %vote.voter_id))]
pub async fn upsert_vote<S>(store: &mut S, vote: &VoteMessage) -> Result<UpsertOutcome, VoteStoreError>
where
    S: VoteStore + ?Sized,
{
    match store.insert_vote(&vote.voter_id, &vote.vote).await? {
        InsertOutcome::Inserted => {
            debug!("Inserted vote");
            Ok(UpsertOutcome::Inserted)
        }
        InsertOutcome::AlreadyExists => {
            store.update_vote(&vote.voter_id, &vote.vote).await?;
            debug!("Updated vote");
            Ok(UpsertOutcome::Updated)
        }
    }
}

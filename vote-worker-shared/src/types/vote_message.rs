//! Vote message types for the vote queue.
//!
//! This module defines the payload that producers push onto the `votes` list.

use serde::{Deserialize, Serialize};

/// A single vote as it travels through the queue.
///
/// Both fields are required strings. Unknown fields in the payload are ignored.
///
/// # Fields
///
/// - `vote`: The option the voter selected
/// - `voter_id`: Stable identifier of the voter, used as the row key in the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteMessage {
    pub vote: String,
    pub voter_id: String,
}

impl VoteMessage {
    /// Create a new vote message.
    ///
    /// # Example
    ///
    /// ```
    /// use vote_worker_shared::VoteMessage;
    ///
    /// let message = VoteMessage::new("a", "123");
    /// assert_eq!(message.voter_id, "123");
    /// ```
    pub fn new(vote: impl Into<String>, voter_id: impl Into<String>) -> Self {
        Self {
            vote: vote.into(),
            voter_id: voter_id.into(),
        }
    }

    /// Decode a vote message from its JSON representation.
    ///
    /// # Arguments
    ///
    /// * `payload` - Raw JSON popped from the queue
    ///
    /// # Returns
    ///
    /// * `Ok(VoteMessage)` - The decoded vote
    /// * `Err(serde_json::Error)` - If the payload is not valid JSON or a field is missing
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Encode the vote message as JSON, in the shape producers enqueue it.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_vote_message() {
        let message = VoteMessage::from_json(r#"{"vote":"a","voter_id":"123"}"#).unwrap();

        assert_eq!(message.vote, "a");
        assert_eq!(message.voter_id, "123");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let message =
            VoteMessage::from_json(r#"{"voter_id":"abc","vote":"b","ts":1713859200}"#).unwrap();

        assert_eq!(message, VoteMessage::new("b", "abc"));
    }

    #[test]
    fn test_decode_missing_voter_id() {
        let result = VoteMessage::from_json(r#"{"vote":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_non_string_vote() {
        let result = VoteMessage::from_json(r#"{"vote":1,"voter_id":"123"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_malformed_payload() {
        assert!(VoteMessage::from_json("not json").is_err());
        assert!(VoteMessage::from_json("").is_err());
    }

    #[test]
    fn test_encoded_message_decodes_to_same_vote() {
        let message = VoteMessage::new("a", "123");
        let json = message.to_json().unwrap();

        assert_eq!(VoteMessage::from_json(&json).unwrap(), message);
    }
}

use serde::{Deserialize, Serialize};

/// One schedulable activity. The activity name is the directory key, not a
/// field, so the wire format stays name → record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Signup order. Emails are unique within one roster.
    pub participants: Vec<String>,
}

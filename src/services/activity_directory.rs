use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::Activity;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Student is already signed up")]
    AlreadySignedUp,

    #[error("Participant not found")]
    ParticipantNotFound,
}

/// Owns the activity mapping for the process lifetime. Every
/// check-then-mutate runs under the write lock, so an operation is atomic
/// with respect to concurrent requests.
pub struct ActivityDirectory {
    inner: RwLock<BTreeMap<String, Activity>>,
}

impl ActivityDirectory {
    pub fn new(activities: BTreeMap<String, Activity>) -> Self {
        Self {
            inner: RwLock::new(activities),
        }
    }

    /// Directory preloaded with the fixed seed set. Restarting the process
    /// resets to exactly this state; nothing is persisted.
    pub fn seeded() -> Self {
        let mut map = BTreeMap::new();
        map.insert(
            "Chess Club".to_string(),
            Activity {
                description: "Learn strategies and compete in chess tournaments".to_string(),
                schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
                max_participants: 12,
                participants: vec![
                    "michael@mergington.edu".to_string(),
                    "daniel@mergington.edu".to_string(),
                ],
            },
        );
        map.insert(
            "Programming Class".to_string(),
            Activity {
                description: "Learn programming fundamentals and build software projects"
                    .to_string(),
                schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM".to_string(),
                max_participants: 20,
                participants: vec![
                    "emma@mergington.edu".to_string(),
                    "sophia@mergington.edu".to_string(),
                ],
            },
        );
        map.insert(
            "Gym Class".to_string(),
            Activity {
                description: "Physical education and sports activities".to_string(),
                schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM".to_string(),
                max_participants: 30,
                participants: vec![
                    "john@mergington.edu".to_string(),
                    "olivia@mergington.edu".to_string(),
                ],
            },
        );
        Self::new(map)
    }

    /// Snapshot of the full mapping for serialization.
    pub async fn list(&self) -> BTreeMap<String, Activity> {
        self.inner.read().await.clone()
    }

    /// Append the email to the activity's roster, preserving signup order.
    /// Rejects a duplicate signup without touching state.
    ///
    /// Note: max_participants is informational and not checked here.
    pub async fn sign_up(&self, name: &str, email: &str) -> Result<(), DirectoryError> {
        let mut map = self.inner.write().await;
        let activity = map.get_mut(name).ok_or(DirectoryError::ActivityNotFound)?;

        if activity.participants.iter().any(|p| p == email) {
            return Err(DirectoryError::AlreadySignedUp);
        }

        activity.participants.push(email.to_string());
        Ok(())
    }

    /// Remove exactly that email from the roster; the remaining entries keep
    /// their relative order.
    pub async fn unregister(&self, name: &str, email: &str) -> Result<(), DirectoryError> {
        let mut map = self.inner.write().await;
        let activity = map.get_mut(name).ok_or(DirectoryError::ActivityNotFound)?;

        let idx = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or(DirectoryError::ParticipantNotFound)?;

        activity.participants.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_rosters_have_no_duplicates() {
        let directory = ActivityDirectory::seeded();
        let map = directory.list().await;

        assert!(map.contains_key("Chess Club"));
        for (name, activity) in &map {
            let mut seen = std::collections::HashSet::new();
            for email in &activity.participants {
                assert!(seen.insert(email), "duplicate {} in {}", email, name);
            }
        }
    }

    #[tokio::test]
    async fn sign_up_appends_in_order() {
        let directory = ActivityDirectory::seeded();

        directory
            .sign_up("Chess Club", "new.kid@mergington.edu")
            .await
            .unwrap();

        let map = directory.list().await;
        let participants = &map["Chess Club"].participants;
        assert_eq!(participants.last().unwrap(), "new.kid@mergington.edu");
        assert_eq!(participants[0], "michael@mergington.edu");
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected_and_state_unchanged() {
        let directory = ActivityDirectory::seeded();
        let before = directory.list().await["Chess Club"].participants.len();

        let err = directory
            .sign_up("Chess Club", "michael@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, DirectoryError::AlreadySignedUp);

        let after = directory.list().await["Chess Club"].participants.len();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn unregister_removes_only_the_target() {
        let directory = ActivityDirectory::seeded();

        directory
            .unregister("Programming Class", "emma@mergington.edu")
            .await
            .unwrap();

        let map = directory.list().await;
        let participants = &map["Programming Class"].participants;
        assert_eq!(participants, &vec!["sophia@mergington.edu".to_string()]);
    }

    #[tokio::test]
    async fn unknown_activity_is_reported_for_both_mutations() {
        let directory = ActivityDirectory::seeded();

        let err = directory
            .sign_up("Knitting Circle", "a@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, DirectoryError::ActivityNotFound);

        let err = directory
            .unregister("Knitting Circle", "a@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, DirectoryError::ActivityNotFound);
    }

    #[tokio::test]
    async fn unregister_missing_participant_is_reported() {
        let directory = ActivityDirectory::seeded();
        let before = directory.list().await["Gym Class"].participants.clone();

        let err = directory
            .unregister("Gym Class", "nobody@x.com")
            .await
            .unwrap_err();
        assert_eq!(err, DirectoryError::ParticipantNotFound);

        let after = directory.list().await["Gym Class"].participants.clone();
        assert_eq!(before, after);
    }
}

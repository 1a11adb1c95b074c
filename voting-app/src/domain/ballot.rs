use super::Poll;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voting_errors::AppError;

pub const MAX_REASON_CHARS: usize = 1000;

const PLAIN_WEIGHT: i32 = 1;
const REASONED_WEIGHT: i32 = 2;

/// A voter's choice before it is admitted into a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub poll_id: Uuid,
    pub option_id: Uuid,
    pub reason: Option<String>,
}

/// Vote row ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub poll_id: Uuid,
    pub option_id: Uuid,
    pub user_id: Uuid,
    pub reason: Option<String>,
    pub weight: i32,
}

impl Ballot {
    /// Blank reasons count as no reason at all.
    pub fn new(poll_id: Uuid, option_id: Uuid, reason: Option<&str>) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        Self {
            poll_id,
            option_id,
            reason,
        }
    }

    pub fn weight(&self) -> i32 {
        if self.reason.is_some() {
            REASONED_WEIGHT
        } else {
            PLAIN_WEIGHT
        }
    }

    /// Checks the ballot against the poll as last fetched. Nothing is written here.
    pub fn admit(
        &self,
        poll: &Poll,
        voter: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<NewVote, AppError> {
        let user_id = voter.ok_or(AppError::AuthRequired)?;

        if poll.id != self.poll_id {
            return Err(AppError::NotFound);
        }
        if !poll.is_open(now) {
            return Err(AppError::PollClosed);
        }
        if poll.has_voted(Some(user_id)) {
            return Err(AppError::Conflict);
        }
        if !poll.has_option(self.option_id) {
            return Err(AppError::Validation("option does not belong to this poll".to_string()));
        }
        if self
            .reason
            .as_ref()
            .is_some_and(|text| text.chars().count() > MAX_REASON_CHARS)
        {
            return Err(AppError::Validation("reason is too long".to_string()));
        }

        Ok(NewVote {
            poll_id: self.poll_id,
            option_id: self.option_id,
            user_id,
            reason: self.reason.clone(),
            weight: self.weight(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poll::fixtures::*;

    #[test]
    fn test_reason_doubles_weight() {
        let (poll, option) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(Ballot::new(poll, option, Some("I like it")).weight(), 2);
        assert_eq!(Ballot::new(poll, option, Some("   ")).weight(), 1);
        assert_eq!(Ballot::new(poll, option, Some("")).weight(), 1);
        assert_eq!(Ballot::new(poll, option, None).weight(), 1);
    }

    #[test]
    fn test_reason_is_trimmed() {
        let ballot = Ballot::new(Uuid::new_v4(), Uuid::new_v4(), Some("  tasty \n"));
        assert_eq!(ballot.reason.as_deref(), Some("tasty"));
    }

    #[test]
    fn test_admit_requires_voter() {
        let poll = poll_with_options(&["a", "b"]);
        let ballot = Ballot::new(poll.id, poll.options[0].id, None);
        assert_eq!(ballot.admit(&poll, None, at(10)), Err(AppError::AuthRequired));
    }

    #[test]
    fn test_admit_builds_vote() {
        let poll = poll_with_options(&["a", "b"]);
        let voter = Uuid::new_v4();
        let ballot = Ballot::new(poll.id, poll.options[1].id, Some("I like it"));

        let vote = ballot.admit(&poll, Some(voter), at(10)).unwrap();
        assert_eq!(vote.user_id, voter);
        assert_eq!(vote.option_id, poll.options[1].id);
        assert_eq!(vote.weight, 2);
    }

    #[test]
    fn test_expired_poll_rejects() {
        let mut poll = poll_with_options(&["a", "b"]);
        poll.expires_at = Some(at(9));
        let ballot = Ballot::new(poll.id, poll.options[0].id, None);
        assert_eq!(
            ballot.admit(&poll, Some(Uuid::new_v4()), at(10)),
            Err(AppError::PollClosed)
        );
    }

    #[test]
    fn test_second_vote_conflicts() {
        let mut poll = poll_with_options(&["a", "b"]);
        let voter = Uuid::new_v4();
        cast(&mut poll, 0, 1, Some(voter));
        let ballot = Ballot::new(poll.id, poll.options[1].id, None);
        assert_eq!(ballot.admit(&poll, Some(voter), at(10)), Err(AppError::Conflict));
    }

    #[test]
    fn test_foreign_option_is_invalid() {
        let poll = poll_with_options(&["a", "b"]);
        let ballot = Ballot::new(poll.id, Uuid::new_v4(), None);
        assert!(matches!(
            ballot.admit(&poll, Some(Uuid::new_v4()), at(10)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_ballot_shown_before_deadline_is_refused_after_it() {
        let mut poll = poll_with_options(&["Pizza", "Sushi"]);
        poll.expires_at = Some(at(12));
        let ballot = Ballot::new(poll.id, poll.options[0].id, None);
        let voter = Some(Uuid::new_v4());

        assert!(ballot.admit(&poll, voter, at(11)).is_ok());
        assert!(ballot.admit(&poll, voter, at(12)).is_ok());
        assert_eq!(ballot.admit(&poll, voter, at(13)), Err(AppError::PollClosed));
    }
}

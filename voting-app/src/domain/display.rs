//! Per-viewer presentation state of a poll card.
//!
//! Results are always shown once the poll expired or the viewer voted. Before
//! that the viewer may peek at the results and come back to the ballot.

use serde::{Deserialize, Serialize};
use voting_errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollView {
    Voting,
    ViewingResults,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollViewState {
    peeking: bool,
    voted: bool,
}

impl PollViewState {
    /// Evaluate on every render: `expired` moves with the clock.
    pub fn view(&self, has_voted: bool, expired: bool) -> PollView {
        if self.peeking || self.voted || has_voted || expired {
            PollView::ViewingResults
        } else {
            PollView::Voting
        }
    }

    pub fn peek(&mut self) {
        self.peeking = true;
    }

    pub fn can_return_to_vote(&self, has_voted: bool, expired: bool) -> bool {
        !self.voted && !has_voted && !expired
    }

    /// Returns whether the ballot is shown again.
    pub fn back_to_vote(&mut self, has_voted: bool, expired: bool) -> bool {
        if self.can_return_to_vote(has_voted, expired) {
            self.peeking = false;
            true
        } else {
            false
        }
    }

    /// The backend accepted the vote, or reported the viewer already had one.
    pub fn vote_recorded(&mut self) {
        self.voted = true;
    }

    /// Settles the card after a refused ballot. A repeat vote or a closed
    /// poll can never succeed, so the ballot is put away for good; returns
    /// whether the poll needs refetching.
    pub fn vote_refused(&mut self, err: &AppError) -> bool {
        match err {
            AppError::Conflict | AppError::PollClosed => {
                self.voted = true;
                self.peeking = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_voting() {
        let state = PollViewState::default();
        assert_eq!(state.view(false, false), PollView::Voting);
    }

    #[test]
    fn test_expired_or_voted_shows_results() {
        let state = PollViewState::default();
        assert_eq!(state.view(true, false), PollView::ViewingResults);
        assert_eq!(state.view(false, true), PollView::ViewingResults);
        assert!(!state.can_return_to_vote(false, true));
    }

    #[test]
    fn test_peek_and_back() {
        let mut state = PollViewState::default();
        state.peek();
        assert_eq!(state.view(false, false), PollView::ViewingResults);
        assert!(state.back_to_vote(false, false));
        assert_eq!(state.view(false, false), PollView::Voting);
    }

    #[test]
    fn test_results_are_terminal_after_voting() {
        let mut state = PollViewState::default();
        state.vote_recorded();
        assert_eq!(state.view(false, false), PollView::ViewingResults);
        assert!(!state.back_to_vote(false, false));
        assert_eq!(state.view(false, false), PollView::ViewingResults);
    }

    #[test]
    fn test_expiry_blocks_back_to_vote() {
        let mut state = PollViewState::default();
        state.peek();
        assert!(!state.back_to_vote(false, true));
        assert_eq!(state.view(false, true), PollView::ViewingResults);
    }

    #[test]
    fn test_closed_or_duplicate_refusal_ends_voting() {
        let mut state = PollViewState::default();
        assert!(state.vote_refused(&AppError::PollClosed));
        assert_eq!(state.view(false, false), PollView::ViewingResults);
        assert!(!state.back_to_vote(false, false));

        let mut state = PollViewState::default();
        assert!(state.vote_refused(&AppError::Conflict));
        assert_eq!(state.view(false, false), PollView::ViewingResults);
    }

    #[test]
    fn test_retryable_refusal_keeps_ballot() {
        let mut state = PollViewState::default();
        assert!(!state.vote_refused(&AppError::Backend("timeout".to_string())));
        assert!(!state.vote_refused(&AppError::RateLimited(30)));
        assert_eq!(state.view(false, false), PollView::Voting);
    }
}

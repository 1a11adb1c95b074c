mod ballot;
mod display;
mod draft;
mod poll;
mod profile;
mod tally;

pub use ballot::{Ballot, NewVote, MAX_REASON_CHARS};
pub use display::{PollView, PollViewState};
pub use draft::{NewPoll, PollDraft, MAX_OPTIONS, MIN_OPTIONS};
pub use poll::{Poll, PollOption, Vote};
pub use profile::{Identity, Profile};
pub use tally::{option_percentage, option_weight, tally, total_weight, OptionTally, Reason};

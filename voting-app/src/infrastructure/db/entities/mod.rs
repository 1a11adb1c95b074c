pub mod poll;
pub mod poll_option;
pub mod profile;
pub mod vote;

pub use poll::Entity as Poll;
pub use poll_option::Entity as PollOption;
pub use profile::Entity as Profile;
pub use vote::Entity as Vote;

mod accounts;
mod backend;
mod polls;

pub use accounts::AccountService;
pub use backend::{BackendError, PollBackend, PollFilter};
pub use polls::PollService;

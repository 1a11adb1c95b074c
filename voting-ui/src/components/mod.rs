mod auth_button;
mod create_poll_form;
mod error_display;
mod loading_spinner;
mod notice_banner;
mod poll_card;
mod results_view;

pub use auth_button::AuthButton;
pub use create_poll_form::CreatePollForm;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use notice_banner::NoticeBanner;
pub use poll_card::PollCard;
pub use results_view::ResultsView;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use voting_errors::AppError;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 20;
pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_OPTION_CHARS: usize = 200;

/// Raw contents of the poll form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollDraft {
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A validated creation request: trimmed title, blank options dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPoll {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl PollDraft {
    /// An empty form with two blank option rows.
    pub fn blank() -> Self {
        Self {
            options: vec![String::new(); MIN_OPTIONS],
            ..Self::default()
        }
    }

    pub fn filled_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Cheap check used to enable the submit control.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && self.filled_options().len() >= MIN_OPTIONS
    }

    /// The expiry is trusted as given; the form control already refuses past dates.
    pub fn validate(&self) -> Result<NewPoll, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("title is empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::Validation("title is too long".to_string()));
        }

        let description = self.description.trim();
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(AppError::Validation("description is too long".to_string()));
        }

        let options = self.filled_options();
        if options.len() < MIN_OPTIONS {
            return Err(AppError::Validation(format!(
                "at least {} options are required",
                MIN_OPTIONS
            )));
        }
        if options.len() > MAX_OPTIONS {
            return Err(AppError::Validation(format!(
                "at most {} options are allowed",
                MAX_OPTIONS
            )));
        }
        if options.iter().any(|text| text.chars().count() > MAX_OPTION_CHARS) {
            return Err(AppError::Validation("option text is too long".to_string()));
        }

        Ok(NewPoll {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            options,
            expires_at: self.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, options: &[&str]) -> PollDraft {
        PollDraft {
            title: title.to_string(),
            description: String::new(),
            options: options.iter().map(|s| s.to_string()).collect(),
            expires_at: None,
        }
    }

    #[test]
    fn test_blank_options_are_dropped() {
        let new_poll = draft("Lunch", &["Pizza", "Sushi", ""]).validate().unwrap();
        assert_eq!(new_poll.title, "Lunch");
        assert_eq!(new_poll.options, vec!["Pizza", "Sushi"]);
        assert_eq!(new_poll.description, None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut d = draft("  Dinner ", &[" Tacos ", "\tRamen", "   "]);
        d.description = "  where to go  ".to_string();
        let new_poll = d.validate().unwrap();
        assert_eq!(new_poll.title, "Dinner");
        assert_eq!(new_poll.options, vec!["Tacos", "Ramen"]);
        assert_eq!(new_poll.description.as_deref(), Some("where to go"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let d = draft("   ", &["a", "b"]);
        assert!(!d.is_submittable());
        assert!(matches!(d.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_needs_two_filled_options_regardless_of_rows() {
        let d = draft("Lunch", &["Pizza", " ", "", "   "]);
        assert!(!d.is_submittable());
        assert!(matches!(d.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_limits() {
        let long = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(draft(&long, &["a", "b"]).validate().is_err());

        let many: Vec<String> = (0..=MAX_OPTIONS).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        assert!(draft("Lunch", &refs).validate().is_err());
    }

    #[test]
    fn test_blank_form_has_two_rows() {
        let d = PollDraft::blank();
        assert_eq!(d.options.len(), 2);
        assert!(d.title.is_empty());
        assert!(d.expires_at.is_none());
    }
}

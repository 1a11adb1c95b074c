use super::Poll;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weighted result of one option, in poll order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTally {
    pub option_id: Uuid,
    pub text: String,
    pub weight: i32,
    pub percentage: u8,
    pub reasons: Vec<Reason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub vote_id: Uuid,
    pub text: String,
    pub weight: i32,
}

/// Sum of weights over the votes that belong to one of the poll's options.
pub fn total_weight(poll: &Poll) -> i32 {
    poll.votes
        .iter()
        .filter(|vote| poll.has_option(vote.option_id))
        .map(|vote| vote.weight)
        .sum()
}

pub fn option_weight(poll: &Poll, option_id: Uuid) -> i32 {
    poll.votes
        .iter()
        .filter(|vote| vote.option_id == option_id)
        .map(|vote| vote.weight)
        .sum()
}

/// Share of the weighted total, rounded half away from zero. Zero when nobody voted.
pub fn option_percentage(poll: &Poll, option_id: Uuid) -> u8 {
    percentage_of(option_weight(poll, option_id), total_weight(poll))
}

fn percentage_of(part: i32, total: i32) -> u8 {
    if total <= 0 || part <= 0 {
        return 0;
    }
    let part = i64::from(part);
    let total = i64::from(total);
    ((200 * part + total) / (2 * total)).clamp(0, 100) as u8
}

pub fn tally(poll: &Poll) -> Vec<OptionTally> {
    let total = total_weight(poll);

    poll.options
        .iter()
        .map(|option| {
            let weight = option_weight(poll, option.id);
            let reasons = poll
                .votes
                .iter()
                .filter(|vote| vote.option_id == option.id)
                .filter_map(|vote| {
                    vote.reason.as_ref().map(|text| Reason {
                        vote_id: vote.id,
                        text: text.clone(),
                        weight: vote.weight,
                    })
                })
                .collect();

            OptionTally {
                option_id: option.id,
                text: option.text.clone(),
                weight,
                percentage: percentage_of(weight, total),
                reasons,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poll::fixtures::*;

    #[test]
    fn test_empty_poll_is_all_zero() {
        let poll = poll_with_options(&["a", "b", "c"]);
        assert_eq!(total_weight(&poll), 0);
        for option in &poll.options {
            assert_eq!(option_weight(&poll, option.id), 0);
            assert_eq!(option_percentage(&poll, option.id), 0);
        }
    }

    #[test]
    fn test_unknown_option_is_zero() {
        let mut poll = poll_with_options(&["a", "b"]);
        cast(&mut poll, 0, 2, None);
        let stranger = Uuid::new_v4();
        assert_eq!(option_weight(&poll, stranger), 0);
        assert_eq!(option_percentage(&poll, stranger), 0);
    }

    #[test]
    fn test_weighted_split_rounds_half_away_from_zero() {
        let mut poll = poll_with_options(&["a", "b"]);
        for _ in 0..3 {
            cast(&mut poll, 0, 1, None);
        }
        cast(&mut poll, 0, 2, None);
        cast(&mut poll, 1, 1, None);
        cast(&mut poll, 1, 1, None);

        let (a, b) = (poll.options[0].id, poll.options[1].id);
        assert_eq!(total_weight(&poll), 7);
        assert_eq!(option_weight(&poll, a), 5);
        assert_eq!(option_weight(&poll, b), 2);
        assert_eq!(option_percentage(&poll, a), 71);
        assert_eq!(option_percentage(&poll, b), 29);
    }

    #[test]
    fn test_exact_half_rounds_up() {
        // 1/8 = 12.5%
        assert_eq!(percentage_of(1, 8), 13);
        assert_eq!(percentage_of(3, 8), 38);
        assert_eq!(percentage_of(8, 8), 100);
        assert_eq!(percentage_of(0, 8), 0);
    }

    #[test]
    fn test_option_weights_add_up_to_total() {
        let mut poll = poll_with_options(&["a", "b", "c"]);
        let pattern = [(0, 1), (1, 2), (2, 2), (0, 2), (2, 1), (1, 1), (0, 1)];
        for (index, weight) in pattern {
            cast(&mut poll, index, weight, None);
        }

        let sum: i32 = poll.options.iter().map(|o| option_weight(&poll, o.id)).sum();
        assert_eq!(sum, total_weight(&poll));

        let percentages: Vec<u8> = poll
            .options
            .iter()
            .map(|o| option_percentage(&poll, o.id))
            .collect();
        let total: i32 = percentages.iter().map(|p| i32::from(*p)).sum();
        assert!(percentages.iter().all(|p| *p <= 100));
        assert!((total - 100).abs() <= poll.options.len() as i32 - 1);
    }

    #[test]
    fn test_votes_outside_the_options_are_ignored() {
        let mut poll = poll_with_options(&["a", "b"]);
        cast(&mut poll, 0, 1, None);
        let mut stray = poll.votes[0].clone();
        stray.option_id = Uuid::new_v4();
        poll.votes.push(stray);

        assert_eq!(total_weight(&poll), 1);
        assert_eq!(option_percentage(&poll, poll.options[0].id), 100);
    }

    #[test]
    fn test_tally_keeps_order_and_reasons() {
        let mut poll = poll_with_options(&["Pizza", "Sushi"]);
        cast(&mut poll, 1, 2, None);
        cast(&mut poll, 0, 1, None);

        let rows = tally(&poll);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "Pizza");
        assert_eq!(rows[0].weight, 1);
        assert_eq!(rows[0].percentage, 33);
        assert!(rows[0].reasons.is_empty());
        assert_eq!(rows[1].text, "Sushi");
        assert_eq!(rows[1].percentage, 67);
        assert_eq!(rows[1].reasons.len(), 1);
        assert_eq!(rows[1].reasons[0].weight, 2);
    }
}

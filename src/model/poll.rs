//! Poll engine: the vote state machine behind `/poll`.
//!
//! A [`Poll`] owns its options, per-option tallies, and each voter's current choice. It is a
//! pure in-memory state machine with no knowledge of Discord; the poll service serializes
//! access to it and hands the closing [`PollResults`] to a renderer.
//!
//! Tallies are maintained incrementally and always satisfy
//! `sum(tallies) == votes_by_user.len()` while the poll is open. Once closed, a poll never
//! mutates again.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::poll::PollError;

/// Minimum number of usable options a poll must have.
pub const MIN_POLL_OPTIONS: usize = 2;

/// Maximum number of options a poll displays; extra options are dropped.
pub const MAX_POLL_OPTIONS: usize = 5;

/// Discord button labels are capped at 80 characters.
pub const MAX_OPTION_LABEL_CHARS: usize = 80;

/// Result text shown when a poll closes without a single vote.
pub const NO_VOTES_RESULT: &str = "No votes. Democracy cancelled.";

/// What a single vote toggle did to the voter's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The user had no vote and now votes for the option.
    Voted,
    /// The user pressed their current option again and their vote was withdrawn.
    Removed,
    /// The user moved their vote from `previous` to the pressed option.
    Changed { previous: usize },
}

/// Outcome of a toggle plus the label it concerned, used for the private acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub outcome: VoteOutcome,
    pub label: String,
}

impl VoteReceipt {
    /// Message sent privately to the voter.
    pub fn acknowledgment(&self) -> String {
        match self.outcome {
            VoteOutcome::Voted => format!("You voted for **{}**.", self.label),
            VoteOutcome::Removed => format!("Removed your vote for **{}**.", self.label),
            VoteOutcome::Changed { .. } => format!("Changed your vote to **{}**.", self.label),
        }
    }
}

/// Final per-option counts of a closed poll, in option order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResults {
    pub counts: Vec<(String, u32)>,
}

impl PollResults {
    /// Total number of votes cast.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Plain summary: one `label — count` line per option, or [`NO_VOTES_RESULT`].
    pub fn summary(&self) -> String {
        self.render_lines(|label, count| format!("{} — {}", label, count))
    }

    /// Summary with bold labels, as shown in the results embed field.
    pub fn markdown_summary(&self) -> String {
        self.render_lines(|label, count| format!("**{}** — {}", label, count))
    }

    fn render_lines(&self, line: impl Fn(&str, u32) -> String) -> String {
        if self.total() == 0 {
            return NO_VOTES_RESULT.to_string();
        }

        self.counts
            .iter()
            .map(|(label, count)| line(label, *count))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single poll instance.
#[derive(Debug, Clone)]
pub struct Poll {
    question: String,
    options: Vec<String>,
    tallies: Vec<u32>,
    votes_by_user: HashMap<u64, usize>,
    duration: Duration,
    closed: bool,
}

impl Poll {
    /// Creates an open poll.
    ///
    /// Blank options are skipped, at most [`MAX_POLL_OPTIONS`] are kept, and each label is
    /// trimmed and truncated to [`MAX_OPTION_LABEL_CHARS`] characters. Option order is the
    /// display order and fixes each option's index.
    ///
    /// # Arguments
    /// - `question` - The poll question
    /// - `options` - Candidate option labels; blanks are ignored
    /// - `duration` - How long voting stays open; must be non-zero
    ///
    /// # Returns
    /// - `Ok(Poll)` - Open poll with all tallies at zero
    /// - `Err(PollError::InvalidOptions)` - Fewer than two usable options
    /// - `Err(PollError::InvalidDuration)` - Zero duration
    pub fn create<I, S>(
        question: impl Into<String>,
        options: I,
        duration: Duration,
    ) -> Result<Self, PollError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let options: Vec<String> = options
            .into_iter()
            .filter_map(|option| {
                let option = option.as_ref().trim();
                (!option.is_empty())
                    .then(|| option.chars().take(MAX_OPTION_LABEL_CHARS).collect())
            })
            .take(MAX_POLL_OPTIONS)
            .collect();

        if options.len() < MIN_POLL_OPTIONS {
            return Err(PollError::InvalidOptions {
                min: MIN_POLL_OPTIONS,
                given: options.len(),
            });
        }

        if duration.is_zero() {
            return Err(PollError::InvalidDuration {
                min: 1,
                max: u64::MAX,
                given: 0,
            });
        }

        Ok(Self {
            question: question.into(),
            tallies: vec![0; options.len()],
            options,
            votes_by_user: HashMap::new(),
            duration,
            closed: false,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current count for an option, `None` if the index is out of range.
    pub fn tally(&self, index: usize) -> Option<u32> {
        self.tallies.get(index).copied()
    }

    /// The option a user currently votes for, if any.
    pub fn vote_of(&self, user_id: u64) -> Option<usize> {
        self.votes_by_user.get(&user_id).copied()
    }

    /// Number of users with a recorded vote.
    pub fn voter_count(&self) -> usize {
        self.votes_by_user.len()
    }

    /// Applies one vote toggle for `user_id` on `index`.
    ///
    /// - No current vote: the vote is recorded.
    /// - Same option as the current vote: the vote is withdrawn.
    /// - Different option: the vote moves.
    ///
    /// All tally and vote-map updates happen together or not at all.
    ///
    /// # Returns
    /// - `Ok(VoteReceipt)` - Outcome and the pressed option's label
    /// - `Err(PollError::PollClosed)` - Poll already closed, nothing changed
    /// - `Err(PollError::InvalidOptionIndex)` - Index outside the options, nothing changed
    pub fn toggle_vote(&mut self, user_id: u64, index: usize) -> Result<VoteReceipt, PollError> {
        if self.closed {
            return Err(PollError::PollClosed);
        }
        if index >= self.options.len() {
            return Err(PollError::InvalidOptionIndex {
                index,
                len: self.options.len(),
            });
        }

        let outcome = match self.votes_by_user.get(&user_id).copied() {
            None => {
                self.votes_by_user.insert(user_id, index);
                self.tallies[index] += 1;
                VoteOutcome::Voted
            }
            Some(previous) if previous == index => {
                self.votes_by_user.remove(&user_id);
                self.tallies[index] -= 1;
                VoteOutcome::Removed
            }
            Some(previous) => {
                self.tallies[previous] -= 1;
                self.votes_by_user.insert(user_id, index);
                self.tallies[index] += 1;
                VoteOutcome::Changed { previous }
            }
        };

        Ok(VoteReceipt {
            outcome,
            label: self.options[index].clone(),
        })
    }

    /// Closes the poll and returns its final results.
    ///
    /// Only the first call produces results; later calls return `None` so the results are
    /// rendered exactly once.
    pub fn close(&mut self) -> Option<PollResults> {
        if self.closed {
            return None;
        }
        self.closed = true;

        Some(self.results())
    }

    /// Snapshot of the current counts in option order.
    pub fn results(&self) -> PollResults {
        PollResults {
            counts: self
                .options
                .iter()
                .cloned()
                .zip(self.tallies.iter().copied())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    fn poll(options: &[&str]) -> Poll {
        Poll::create("Lunch?", options.iter().copied(), MINUTE).unwrap()
    }

    fn assert_consistent(poll: &Poll) {
        let sum: u32 = (0..poll.options().len())
            .map(|i| poll.tally(i).unwrap())
            .sum();
        assert_eq!(sum as usize, poll.voter_count());
    }

    #[test]
    fn creation_requires_two_usable_options() {
        let err = Poll::create("Q", ["Only", "", "   "], MINUTE).unwrap_err();
        assert_eq!(err, PollError::InvalidOptions { min: 2, given: 1 });

        let poll = Poll::create("Q", ["A", "B"], MINUTE).unwrap();
        assert_eq!(poll.options(), ["A", "B"]);
        assert!(!poll.is_closed());
        assert_eq!(poll.tally(0), Some(0));
        assert_eq!(poll.tally(1), Some(0));
    }

    #[test]
    fn creation_skips_blanks_and_keeps_order() {
        let poll = Poll::create("Q", ["", "B", "", "A", " C "], MINUTE).unwrap();
        assert_eq!(poll.options(), ["B", "A", "C"]);
    }

    #[test]
    fn creation_caps_options_and_truncates_labels() {
        let long = "x".repeat(120);
        let poll = Poll::create("Q", [long.as_str(), "2", "3", "4", "5", "6"], MINUTE).unwrap();

        assert_eq!(poll.options().len(), MAX_POLL_OPTIONS);
        assert_eq!(poll.options()[0].chars().count(), MAX_OPTION_LABEL_CHARS);
        assert_eq!(poll.options()[4], "5");
    }

    #[test]
    fn creation_rejects_zero_duration() {
        let err = Poll::create("Q", ["A", "B"], Duration::ZERO).unwrap_err();
        assert!(matches!(err, PollError::InvalidDuration { given: 0, .. }));
    }

    #[test]
    fn first_vote_is_recorded() {
        let mut poll = poll(&["A", "B"]);

        let receipt = poll.toggle_vote(1, 0).unwrap();

        assert_eq!(receipt.outcome, VoteOutcome::Voted);
        assert_eq!(receipt.label, "A");
        assert_eq!(receipt.acknowledgment(), "You voted for **A**.");
        assert_eq!(poll.tally(0), Some(1));
        assert_eq!(poll.vote_of(1), Some(0));
    }

    #[test]
    fn toggling_same_option_restores_state() {
        let mut poll = poll(&["A", "B"]);
        poll.toggle_vote(7, 1).unwrap();
        let before = (poll.results(), poll.voter_count(), poll.vote_of(1));

        poll.toggle_vote(1, 0).unwrap();
        let receipt = poll.toggle_vote(1, 0).unwrap();

        assert_eq!(receipt.outcome, VoteOutcome::Removed);
        assert_eq!(receipt.acknowledgment(), "Removed your vote for **A**.");
        assert_eq!((poll.results(), poll.voter_count(), poll.vote_of(1)), before);
    }

    #[test]
    fn switching_moves_exactly_one_vote() {
        let mut poll = poll(&["A", "B", "C"]);
        poll.toggle_vote(1, 0).unwrap();
        let after_first = poll.results();

        let receipt = poll.toggle_vote(1, 2).unwrap();

        assert_eq!(receipt.outcome, VoteOutcome::Changed { previous: 0 });
        assert_eq!(receipt.acknowledgment(), "Changed your vote to **C**.");
        assert_eq!(poll.tally(0), Some(after_first.counts[0].1 - 1));
        assert_eq!(poll.tally(2), Some(after_first.counts[2].1 + 1));
        assert_eq!(poll.tally(1), Some(after_first.counts[1].1));
        assert_eq!(poll.voter_count(), 1);
    }

    #[test]
    fn tallies_match_voters_after_every_toggle() {
        let mut poll = poll(&["A", "B", "C", "D"]);
        let events = [
            (1, 0),
            (2, 1),
            (1, 1),
            (3, 3),
            (2, 1),
            (3, 0),
            (4, 2),
            (1, 1),
            (4, 2),
            (5, 3),
        ];

        for (user, index) in events {
            poll.toggle_vote(user, index).unwrap();
            assert_consistent(&poll);
        }
    }

    #[test]
    fn invalid_index_is_rejected_without_mutation() {
        let mut poll = poll(&["A", "B"]);
        poll.toggle_vote(1, 0).unwrap();

        let err = poll.toggle_vote(2, 5).unwrap_err();

        assert_eq!(err, PollError::InvalidOptionIndex { index: 5, len: 2 });
        assert_eq!(poll.voter_count(), 1);
        assert_eq!(poll.vote_of(2), None);
    }

    #[test]
    fn close_is_idempotent() {
        let mut poll = poll(&["A", "B"]);
        poll.toggle_vote(1, 1).unwrap();

        let first = poll.close();
        let second = poll.close();

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(poll.is_closed());
        assert_eq!(poll.tally(1), Some(1));
    }

    #[test]
    fn votes_after_close_are_rejected() {
        let mut poll = poll(&["A", "B"]);
        poll.toggle_vote(1, 0).unwrap();
        poll.close();
        let frozen = poll.results();

        assert_eq!(poll.toggle_vote(1, 0), Err(PollError::PollClosed));
        assert_eq!(poll.toggle_vote(2, 1), Err(PollError::PollClosed));
        assert_eq!(poll.results(), frozen);
        assert_eq!(poll.vote_of(1), Some(0));
        assert_eq!(poll.vote_of(2), None);
    }

    #[test]
    fn pizza_or_tacos() {
        let mut poll = Poll::create("Lunch?", ["Pizza", "Tacos"], MINUTE).unwrap();
        let (a, b) = (100, 200);

        poll.toggle_vote(a, 0).unwrap();
        assert_eq!((poll.tally(0), poll.tally(1)), (Some(1), Some(0)));
        poll.toggle_vote(b, 1).unwrap();
        assert_eq!((poll.tally(0), poll.tally(1)), (Some(1), Some(1)));
        poll.toggle_vote(a, 1).unwrap();
        assert_eq!((poll.tally(0), poll.tally(1)), (Some(0), Some(2)));

        let results = poll.close().unwrap();
        assert_eq!(results.summary(), "Pizza — 0\nTacos — 2");
        assert_eq!(results.markdown_summary(), "**Pizza** — 0\n**Tacos** — 2");
    }

    #[test]
    fn closing_without_votes_reports_no_votes() {
        let mut poll = poll(&["A", "B"]);

        let results = poll.close().unwrap();

        assert_eq!(results.total(), 0);
        assert_eq!(results.summary(), NO_VOTES_RESULT);
        assert_eq!(results.markdown_summary(), NO_VOTES_RESULT);
    }
}

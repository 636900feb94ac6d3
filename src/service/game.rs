//! Magic 8-ball and dice rolls.
//!
//! Both take the random source as a parameter so outcomes are reproducible in tests.

use rand::Rng;

use crate::error::AppError;

/// One answer in this many is rude.
const RUDE_ANSWER_ODDS: u32 = 200;

const ANSWERS: [&str; 10] = [
    "It is certain.",
    "Without a doubt.",
    "You may rely on it.",
    "Yes.",
    "Ask again later.",
    "Reply hazy, try again.",
    "Better not tell you now.",
    "Don't count on it.",
    "My reply is no.",
    "Very doubtful.",
];

const RUDE_ANSWERS: [&str; 3] = [
    "No. And that question hurt my circuits.",
    "Absolutely not. Touch grass.",
    "Ask a better question.",
];

/// Die types `/roll` accepts.
pub const DIE_SIDES: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

pub const MAX_DICE: u32 = 30;

/// Rolls listed individually before the preview is cut short.
const ROLL_PREVIEW_LIMIT: usize = 50;

/// Shakes the 8-ball.
pub fn eight_ball<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    let answers: &[&str] = if rng.random_range(1..=RUDE_ANSWER_ODDS) == 1 {
        &RUDE_ANSWERS
    } else {
        &ANSWERS
    };

    answers[rng.random_range(0..answers.len())]
}

/// Result of rolling `count` dice with `sides` faces and adding a modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    pub count: u32,
    pub sides: u32,
    pub modifier: i64,
    pub rolls: Vec<u32>,
}

impl DiceRoll {
    /// Rolls the dice.
    ///
    /// # Returns
    /// - `Ok(DiceRoll)` - The individual rolls
    /// - `Err(AppError::BadRequest)` - Count outside 1-30 or an unsupported die
    pub fn roll<R: Rng + ?Sized>(
        count: u32,
        sides: u32,
        modifier: i64,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        if !(1..=MAX_DICE).contains(&count) {
            return Err(AppError::BadRequest(format!(
                "Pick between 1 and {} dice.",
                MAX_DICE
            )));
        }
        if !DIE_SIDES.contains(&sides) {
            return Err(AppError::BadRequest(format!("There's no d{} here.", sides)));
        }

        let rolls = (0..count).map(|_| rng.random_range(1..=sides)).collect();

        Ok(Self {
            count,
            sides,
            modifier,
            rolls,
        })
    }

    /// Dice notation such as `3d6+2` or `1d20-1`.
    pub fn notation(&self) -> String {
        format!("{}d{}{:+}", self.count, self.sides, self.modifier)
    }

    pub fn total(&self) -> i64 {
        self.rolls.iter().map(|&r| i64::from(r)).sum::<i64>() + self.modifier
    }

    /// Comma-separated rolls, cut short after 50.
    pub fn preview(&self) -> String {
        format_preview(&self.rolls)
    }
}

fn format_preview(rolls: &[u32]) -> String {
    let mut preview = rolls
        .iter()
        .take(ROLL_PREVIEW_LIMIT)
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if rolls.len() > ROLL_PREVIEW_LIMIT {
        preview.push_str(", ...");
    }

    preview
}

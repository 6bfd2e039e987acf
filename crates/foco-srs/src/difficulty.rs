use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Interval ladder (in days) used after an "easy" rating.
pub const EASY_LADDER: [u32; 6] = [1, 3, 7, 14, 30, 60];
/// Interval ladder (in days) used after a "medium" rating.
pub const MEDIUM_LADDER: [u32; 6] = [1, 2, 5, 10, 20, 40];
/// Interval ladder (in days) used after a "hard" rating.
pub const HARD_LADDER: [u32; 6] = [1, 1, 3, 7, 14, 30];
/// Interval ladder (in days) used after a "very hard" rating.
pub const VERY_HARD_LADDER: [u32; 6] = [1, 1, 2, 5, 10, 20];

/// Self-reported recall difficulty for a flashcard review.
///
/// The wire and storage label of [`Difficulty::VeryHard`] is `veryHard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    /// All labels, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::VeryHard];

    /// The ladder of intervals the scheduler walks for this rating.
    pub const fn ladder(self) -> &'static [u32] {
        match self {
            Self::Easy => &EASY_LADDER,
            Self::Medium => &MEDIUM_LADDER,
            Self::Hard => &HARD_LADDER,
            Self::VeryHard => &VERY_HARD_LADDER,
        }
    }

    /// Easy and medium count as a correct answer, hard and very hard as a wrong one.
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Easy | Self::Medium)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::VeryHard => "veryHard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or submitted label is not one of the four difficulties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(pub String);

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty label: '{}'", self.0)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladders_are_ascending_and_start_at_one_day() {
        for difficulty in Difficulty::ALL {
            let ladder = difficulty.ladder();
            assert_eq!(ladder[0], 1, "{difficulty} ladder should start at 1 day");
            assert!(
                ladder.windows(2).all(|w| w[0] <= w[1]),
                "{difficulty} ladder should be ascending"
            );
        }
    }

    #[test]
    fn test_easy_ladder_grows_faster_than_very_hard() {
        let easy = Difficulty::Easy.ladder();
        let very_hard = Difficulty::VeryHard.ladder();
        assert!(easy.last() > very_hard.last());
    }

    #[test]
    fn test_is_correct() {
        assert!(Difficulty::Easy.is_correct());
        assert!(Difficulty::Medium.is_correct());
        assert!(!Difficulty::Hard.is_correct());
        assert!(!Difficulty::VeryHard.is_correct());
    }

    #[test]
    fn test_label_parsing() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.as_str().parse::<Difficulty>(), Ok(difficulty));
        }
        assert!("very_hard".parse::<Difficulty>().is_err());
        assert!("".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_serde_labels_match_storage_labels() {
        let json = serde_json::to_string(&Difficulty::VeryHard).unwrap();
        assert_eq!(json, "\"veryHard\"");

        let parsed: Difficulty = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Difficulty::Medium);
    }
}

use serde::{Deserialize, Serialize};

use super::knockout::KnockoutCheck;

pub const STRONG_MATCH_THRESHOLD: u8 = 85;
pub const PROMISING_THRESHOLD: u8 = 70;
pub const TRAINABLE_THRESHOLD: u8 = 55;

/// Final categorical outcome for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Strong Match")]
    StrongMatch,
    Promising,
    Trainable,
    #[serde(rename = "Low Match")]
    LowMatch,
    #[serde(rename = "Review (Knockout unmet)")]
    KnockoutReview,
}

impl Tier {
    /// Any failed knockout overrides the score; otherwise thresholds are inclusive lower bounds.
    pub fn classify(overall_score: u8, knockout_failed: &[KnockoutCheck]) -> Self {
        if !knockout_failed.is_empty() {
            return Tier::KnockoutReview;
        }

        match overall_score {
            score if score >= STRONG_MATCH_THRESHOLD => Tier::StrongMatch,
            score if score >= PROMISING_THRESHOLD => Tier::Promising,
            score if score >= TRAINABLE_THRESHOLD => Tier::Trainable,
            _ => Tier::LowMatch,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Tier::StrongMatch => "Strong Match",
            Tier::Promising => "Promising",
            Tier::Trainable => "Trainable",
            Tier::LowMatch => "Low Match",
            Tier::KnockoutReview => "Review (Knockout unmet)",
        }
    }

    /// Display accent for scorecards.
    pub const fn accent(self) -> &'static str {
        match self {
            Tier::StrongMatch => "green",
            Tier::Promising => "blue",
            Tier::Trainable => "gray",
            Tier::LowMatch => "red",
            Tier::KnockoutReview => "yellow",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(Tier::classify(100, &[]), Tier::StrongMatch);
        assert_eq!(Tier::classify(85, &[]), Tier::StrongMatch);
        assert_eq!(Tier::classify(84, &[]), Tier::Promising);
        assert_eq!(Tier::classify(70, &[]), Tier::Promising);
        assert_eq!(Tier::classify(69, &[]), Tier::Trainable);
        assert_eq!(Tier::classify(55, &[]), Tier::Trainable);
        assert_eq!(Tier::classify(54, &[]), Tier::LowMatch);
        assert_eq!(Tier::classify(0, &[]), Tier::LowMatch);
    }

    #[test]
    fn any_knockout_forces_review() {
        assert_eq!(
            Tier::classify(95, &[KnockoutCheck::AvailabilityEvenings]),
            Tier::KnockoutReview
        );
        assert_eq!(
            Tier::classify(10, &[KnockoutCheck::SalesComfort]),
            Tier::KnockoutReview
        );
    }

    #[test]
    fn serializes_with_display_labels() {
        assert_eq!(
            serde_json::to_string(&Tier::KnockoutReview).expect("serialize"),
            r#""Review (Knockout unmet)""#
        );
        assert_eq!(Tier::StrongMatch.to_string(), "Strong Match");
        assert_eq!(Tier::Promising.accent(), "blue");
    }
}

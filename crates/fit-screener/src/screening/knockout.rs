use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;

/// Lowest sales-comfort rating that still clears the knockout.
pub const MINIMUM_SALES_COMFORT: i64 = 3;
const DEFAULT_SALES_COMFORT: i64 = 3;

/// Hard requirements checked independently of the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutCheck {
    AvailabilityEvenings,
    AvailabilityWeekends,
    SalesComfort,
}

impl KnockoutCheck {
    /// Every check, in the order failures are reported.
    pub const ALL: [KnockoutCheck; 3] = [
        KnockoutCheck::AvailabilityEvenings,
        KnockoutCheck::AvailabilityWeekends,
        KnockoutCheck::SalesComfort,
    ];

    /// Question id the check reads, which doubles as the exported failure id.
    pub const fn id(self) -> &'static str {
        match self {
            KnockoutCheck::AvailabilityEvenings => "availability_evenings",
            KnockoutCheck::AvailabilityWeekends => "availability_weekends",
            KnockoutCheck::SalesComfort => "sales_comfort",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            KnockoutCheck::AvailabilityEvenings => "Can work evenings",
            KnockoutCheck::AvailabilityWeekends => "Can work weekends",
            KnockoutCheck::SalesComfort => "Comfort with initiating sales conversations",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|check| check.id() == id)
    }

    /// Whether the answers satisfy this requirement. Missing answers never do, except for
    /// sales comfort, which reads a missing, zero or empty answer as the neutral rating.
    pub fn passes(self, answers: &AnswerSet) -> bool {
        match self {
            KnockoutCheck::AvailabilityEvenings | KnockoutCheck::AvailabilityWeekends => answers
                .get(self.id())
                .map(|answer| answer.is_affirmative())
                .unwrap_or(false),
            KnockoutCheck::SalesComfort => {
                let comfort = answers
                    .get(self.id())
                    .filter(|answer| !answer.is_blank())
                    .and_then(|answer| answer.as_whole_number())
                    .unwrap_or(DEFAULT_SALES_COMFORT);
                comfort >= MINIMUM_SALES_COMFORT
            }
        }
    }
}

/// Ordered list of the checks the answers fail; empty when every requirement is met.
pub fn failed_knockouts(answers: &AnswerSet) -> Vec<KnockoutCheck> {
    KnockoutCheck::ALL
        .into_iter()
        .filter(|check| !check.passes(answers))
        .collect()
}

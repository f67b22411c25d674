//! [`Profile`] definitions.

use std::collections::BTreeSet;

use common::{Money, Score};
use derive_more::Display;
use rust_decimal::Decimal;

use super::{place::Keyword, region};

/// Preferences of a prospective business owner looking for a unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    /// Available budget.
    ///
    /// Carried along for display, but not scored.
    pub budget: Option<Money>,

    /// Business categories the owner is interested in.
    pub desired_categories: Vec<Keyword>,

    /// Names of the regions the owner would open a business in.
    pub preferred_regions: BTreeSet<region::Name>,

    /// [`Weights`] of the scoring components.
    pub weights: Weights,
}

impl Profile {
    /// Resolves the business categories of this [`Profile`]: desired ones
    /// without duplicates (first occurrence wins), or the provided `fallback`
    /// if none are desired.
    #[must_use]
    pub fn categories(&self, fallback: &[Keyword]) -> Vec<Keyword> {
        let source = if self.desired_categories.is_empty() {
            fallback
        } else {
            &self.desired_categories
        };

        let mut seen = BTreeSet::new();
        source
            .iter()
            .filter(|k| seen.insert(*k))
            .cloned()
            .collect()
    }
}

/// Weights of the four scoring components of a [`Profile`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Weights {
    /// Importance of foot traffic.
    pub foot_traffic: Weight,

    /// Sensitivity to high rent.
    pub rent_sensitivity: Weight,

    /// Tolerance to nearby competition.
    pub competition_tolerance: Weight,

    /// Preference for young customers.
    pub youth_preference: Weight,
}

/// Importance of a single scoring component on a `1..=5` scale.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Weight(u8);

impl Weight {
    /// Maximum [`Weight`].
    pub const MAX: Self = Self(5);

    /// Creates a new [`Weight`] if the provided value is within `1..=5`.
    #[must_use]
    pub const fn new(val: u8) -> Option<Self> {
        if matches!(val, 1..=5) {
            Some(Self(val))
        } else {
            None
        }
    }

    /// Creates a new [`Weight`] clamping the provided value into `1..=5`.
    #[must_use]
    pub const fn saturating(val: i32) -> Self {
        match val {
            i32::MIN..=1 => Self(1),
            2 => Self(2),
            3 => Self(3),
            4 => Self(4),
            _ => Self::MAX,
        }
    }

    /// Returns the underlying value of this [`Weight`].
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Applies this [`Weight`] to the provided [`Score`], scaling it by
    /// `weight / 5`.
    #[must_use]
    pub fn apply(self, score: Score) -> Decimal {
        Decimal::from(score.get()) * Decimal::from(self.0)
            / Decimal::from(Self::MAX.0)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(3)
    }
}

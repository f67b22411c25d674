//! [`Score`]-related definitions.

use std::str::FromStr;

use derive_more::Display;

/// Normalized index on a `0..=100` scale.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Score(u8);

impl Score {
    /// Maximum possible [`Score`].
    pub const MAX: Self = Self(100);

    /// Neutral [`Score`] used whenever an input is unknown or missing.
    pub const NEUTRAL: Self = Self(50);

    /// Creates a new [`Score`] by checking the provided value is not greater
    /// than `100`.
    #[must_use]
    pub const fn new(val: u8) -> Option<Self> {
        if val > 100 {
            None
        } else {
            Some(Self(val))
        }
    }

    /// Creates a new [`Score`] clamping the provided value into `0..=100`.
    #[must_use]
    pub fn saturating(val: i64) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped into `0..=100`"
        )]
        let val = val.clamp(0, 100) as u8;
        Self(val)
    }

    /// Returns the underlying value of this [`Score`].
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the complement of this [`Score`] (`100 - score`).
    ///
    /// Turns "higher is costlier" indices into "higher is better" ones.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self(100 - self.0)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        Self::from(score.0)
    }
}

impl FromStr for Score {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid score value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Normalized index on a `0..=100` scale.
    #[graphql_scalar(with = Self, parse_token(i32))]
    type Score = super::Score;

    impl Score {
        fn to_output<S: ScalarValue>(s: &Score) -> Value<S> {
            Value::scalar(i32::from(s.get()))
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_int_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Score` input scalar from \
                         non-integer value: {input}",
                    )
                })
                .and_then(|i| {
                    u8::try_from(i).ok().and_then(Self::new).ok_or_else(|| {
                        format!("`Score` must be in `0..=100` range, got: {i}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Score;

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Score::new(100), Some(Score::MAX));
        assert_eq!(Score::new(101), None);
        assert!(Score::from_str("101").is_err());
        assert!(Score::from_str("-1").is_err());
        assert_eq!(Score::from_str("55").unwrap().get(), 55);
    }

    #[test]
    fn saturates() {
        assert_eq!(Score::saturating(-5).get(), 0);
        assert_eq!(Score::saturating(250), Score::MAX);
        assert_eq!(Score::saturating(42).get(), 42);
    }

    #[test]
    fn inverses() {
        assert_eq!(Score::new(20).unwrap().inverse().get(), 80);
        assert_eq!(Score::NEUTRAL.inverse(), Score::NEUTRAL);
    }
}

//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::define_kind;

/// Amount of money in Korean won, expressed in some [`Unit`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Unit`] of this amount.
    pub unit: Unit,
}

impl Money {
    /// Number of won in a single [`Unit::Manwon`].
    const WON_PER_MANWON: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

    /// Creates a new [`Money`] amount in [`Unit::Manwon`].
    #[must_use]
    pub fn manwon(amount: impl Into<Decimal>) -> Self {
        Self {
            amount: amount.into(),
            unit: Unit::Manwon,
        }
    }

    /// Returns this amount converted into [`Unit::Manwon`].
    #[must_use]
    pub fn in_manwon(self) -> Decimal {
        match self.unit {
            Unit::Manwon => self.amount,
            Unit::Won => self.amount / Self::WON_PER_MANWON,
        }
    }

    /// Indicates whether this amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, unit } = self;
        write!(f, "{}{unit}", amount.normalize())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or("missing unit")?;
        if split == 0 {
            return Err("missing amount");
        }

        let (amount, unit) = s.split_at(split);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let unit = Unit::from_str(unit).map_err(|_| "invalid unit")?;

        Ok(Self { amount, unit })
    }
}

define_kind! {
    #[doc = "Unit of a [`Money`] amount."]
    enum Unit {
        #[doc = "Korean won."]
        Won = 1,

        #[doc = "Ten thousand Korean won, the customary unit of lease prices."]
        Manwon = 2,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{amount}{unit}` format, where:
    /// - `amount` is a decimal number;
    /// - `unit` is either `WON` or `MANWON` (10,000 won).
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Money, Unit};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45MANWON").unwrap(),
            Money {
                amount: decimal("123.45"),
                unit: Unit::Manwon,
            },
        );
        assert_eq!(
            Money::from_str("5000000WON").unwrap(),
            Money {
                amount: decimal("5000000"),
                unit: Unit::Won,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("MANWON").is_err());
        assert!(Money::from_str("123.45USD").is_err());
        assert!(Money::from_str("12x3MANWON").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::manwon(decimal("200")).to_string(), "200MANWON");
        assert_eq!(Money::manwon(decimal("200.00")).to_string(), "200MANWON");
        assert_eq!(Money::manwon(decimal("12.50")).to_string(), "12.5MANWON");
    }

    #[test]
    fn converts_won_into_manwon() {
        let won = Money {
            amount: decimal("2500000"),
            unit: Unit::Won,
        };
        assert_eq!(won.in_manwon(), decimal("250"));
        assert_eq!(Money::manwon(7).in_manwon(), decimal("7"));
    }
}

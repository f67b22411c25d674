//! [`Listing`] definitions.

use std::{collections::BTreeSet, str::FromStr};

use common::{define_kind, Money};
use derive_more::{AsRef, Display};
use rust_decimal::Decimal;

use super::{geo::Coordinate, region::Region};

/// Commercial unit offered for lease or sale.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// Free-text [`Address`] of this [`Listing`].
    pub address: Address,

    /// Administrative [`Region`] this [`Listing`] is located in.
    pub region: Region,

    /// [`Deal`] terms of this [`Listing`].
    pub deal: Deal,

    /// Monthly maintenance fee, if any.
    pub maintenance_fee: Option<Money>,

    /// Floor [`Area`] of this [`Listing`], if known.
    pub area: Option<Area>,

    /// [`Coordinate`] of this [`Listing`], absent until geocoded.
    pub coordinate: Option<Coordinate>,

    /// Category/theme [`Tag`]s of this [`Listing`].
    pub tags: BTreeSet<Tag>,
}

impl Listing {
    /// Returns [`TradeType`] of this [`Listing`].
    #[must_use]
    pub fn trade_type(&self) -> TradeType {
        self.deal.trade_type()
    }

    /// Returns monthly rent of this [`Listing`], if it's leased monthly.
    #[must_use]
    pub fn rent(&self) -> Option<Money> {
        match self.deal {
            Deal::Monthly { rent, .. } => Some(rent),
            Deal::Sale { .. } | Deal::Jeonse { .. } => None,
        }
    }

    /// Indicates whether this [`Listing`] mentions the provided `keyword` in
    /// its [`Title`] or [`Address`].
    #[must_use]
    pub fn mentions(&self, keyword: &str) -> bool {
        self.title.0.contains(keyword) || self.address.0.contains(keyword)
    }
}

/// ID of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 64
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `listing::Id`")
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `listing::Title`")
    }
}

/// Free-text address of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Returns this [`Address`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `listing::Address`")
    }
}

/// Category or theme tag of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Tag(String);

impl Tag {
    /// Creates a new [`Tag`] if the given `tag` is valid.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Option<Self> {
        let tag = tag.into();
        Self::check(&tag).then_some(Self(tag))
    }

    /// Returns this [`Tag`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `tag` is a valid [`Tag`].
    fn check(tag: impl AsRef<str>) -> bool {
        let tag = tag.as_ref();
        tag.trim() == tag && !tag.is_empty() && tag.len() <= 64
    }
}

/// Floor area of a [`Listing`] in square meters.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}m²")]
pub struct Area(Decimal);

impl Area {
    /// Creates a new [`Area`] if the given `m2` is positive.
    #[must_use]
    pub fn new(m2: Decimal) -> Option<Self> {
        (m2 > Decimal::ZERO).then_some(Self(m2))
    }

    /// Returns this [`Area`] in square meters.
    #[must_use]
    pub const fn m2(self) -> Decimal {
        self.0
    }
}

/// Terms a [`Listing`] is offered on.
///
/// Each [`TradeType`] carries exactly the prices it requires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Deal {
    /// Outright sale.
    Sale {
        /// Sale price.
        price: Money,
    },

    /// Long-term lease secured by a single deposit.
    Jeonse {
        /// Lease deposit.
        deposit: Money,
    },

    /// Lease with a deposit and monthly rent.
    Monthly {
        /// Lease deposit.
        deposit: Money,

        /// Monthly rent.
        rent: Money,
    },
}

impl Deal {
    /// Returns [`TradeType`] of this [`Deal`].
    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        match self {
            Self::Sale { .. } => TradeType::Sale,
            Self::Jeonse { .. } => TradeType::Jeonse,
            Self::Monthly { .. } => TradeType::Monthly,
        }
    }
}

define_kind! {
    #[doc = "Trade type of a [`Listing`]."]
    enum TradeType {
        #[doc = "Outright sale."]
        Sale = 1,

        #[doc = "Long-term deposit lease."]
        Jeonse = 2,

        #[doc = "Deposit plus monthly rent."]
        Monthly = 3,
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use super::{Address, Area, Deal, Id, TradeType};

    #[test]
    fn validates_strings() {
        assert!(Id::new("p-1").is_some());
        assert!(Id::new(" p-1").is_none());
        assert!(Address::new("충남 서산시 부춘동 1").is_some());
        assert!(Address::new("").is_none());
    }

    #[test]
    fn area_is_positive() {
        assert!(Area::new(Decimal::ZERO).is_none());
        assert!(Area::new(Decimal::from(-3)).is_none());
        assert_eq!(Area::new(Decimal::from(33)).unwrap().m2(), Decimal::from(33));
    }

    #[test]
    fn deal_defines_trade_type() {
        let monthly = Deal::Monthly {
            deposit: Money::manwon(1000),
            rent: Money::manwon(80),
        };
        assert_eq!(monthly.trade_type(), TradeType::Monthly);
        assert_eq!(
            Deal::Sale {
                price: Money::manwon(30000),
            }
            .trade_type(),
            TradeType::Sale,
        );
    }
}

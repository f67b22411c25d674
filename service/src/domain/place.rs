//! Places-search definitions.

use std::str::FromStr;

use common::define_kind;
use derive_more::{AsRef, Display};

use super::geo::{Coordinate, Radius};

define_kind! {
    #[doc = "Category group of a [`Place`], as classified by the places-search \
             provider."]
    enum Category {
        #[doc = "Large supermarket."]
        Mart = 1,

        #[doc = "Convenience store."]
        Convenience = 2,

        #[doc = "Kindergarten or daycare."]
        Kindergarten = 3,

        #[doc = "School."]
        School = 4,

        #[doc = "Private academy."]
        Academy = 5,

        #[doc = "Parking lot."]
        Parking = 6,

        #[doc = "Gas or charging station."]
        GasStation = 7,

        #[doc = "Subway station."]
        Subway = 8,

        #[doc = "Bank."]
        Bank = 9,

        #[doc = "Cultural facility."]
        Culture = 10,

        #[doc = "Real estate agency."]
        RealEstateAgency = 11,

        #[doc = "Public institution."]
        Public = 12,

        #[doc = "Tourist attraction."]
        Attraction = 13,

        #[doc = "Lodging."]
        Lodging = 14,

        #[doc = "Restaurant of any kind."]
        Restaurant = 15,

        #[doc = "Cafe."]
        Cafe = 16,

        #[doc = "Hospital."]
        Hospital = 17,

        #[doc = "Pharmacy."]
        Pharmacy = 18,
    }
}

impl Category {
    /// [`Category`]s a sub-district is broken down by on the map.
    pub const BREAKDOWN: &'static [Self] = &[
        Self::Cafe,
        Self::Restaurant,
        Self::Convenience,
        Self::Mart,
        Self::Academy,
        Self::Hospital,
        Self::Pharmacy,
        Self::Bank,
    ];

    /// Returns the provider's category group code of this [`Category`].
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mart => "MT1",
            Self::Convenience => "CS2",
            Self::Kindergarten => "PS3",
            Self::School => "SC4",
            Self::Academy => "AC5",
            Self::Parking => "PK6",
            Self::GasStation => "OL7",
            Self::Subway => "SW8",
            Self::Bank => "BK9",
            Self::Culture => "CT1",
            Self::RealEstateAgency => "AG2",
            Self::Public => "PO3",
            Self::Attraction => "AT4",
            Self::Lodging => "AD5",
            Self::Restaurant => "FD6",
            Self::Cafe => "CE7",
            Self::Hospital => "HP8",
            Self::Pharmacy => "PM9",
        }
    }

    /// Returns the Korean display label of this [`Category`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mart => "대형마트",
            Self::Convenience => "편의점",
            Self::Kindergarten => "어린이집/유치원",
            Self::School => "학교",
            Self::Academy => "학원",
            Self::Parking => "주차장",
            Self::GasStation => "주유소/충전소",
            Self::Subway => "지하철역",
            Self::Bank => "은행",
            Self::Culture => "문화시설",
            Self::RealEstateAgency => "중개업소",
            Self::Public => "공공기관",
            Self::Attraction => "관광명소",
            Self::Lodging => "숙박",
            Self::Restaurant => "음식점",
            Self::Cafe => "카페",
            Self::Hospital => "병원",
            Self::Pharmacy => "약국",
        }
    }

    /// Looks up a [`Category`] by the provider's category group `code`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Indicates whether this [`Category`] draws customers on its own
    /// (supermarkets, schools, subway stations).
    #[must_use]
    pub const fn is_anchor(self) -> bool {
        matches!(self, Self::Mart | Self::School | Self::Subway)
    }
}

/// Free-text keyword to search [`Place`]s by.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Keyword(String);

impl Keyword {
    /// Business categories assumed when none are requested.
    pub const DEFAULT_CATEGORIES: [&'static str; 3] = ["카페", "분식", "치킨"];

    /// Returns [`Keyword::DEFAULT_CATEGORIES`] as [`Keyword`]s.
    #[must_use]
    pub fn default_categories() -> Vec<Self> {
        Self::DEFAULT_CATEGORIES
            .into_iter()
            .filter_map(Self::new)
            .collect()
    }

    /// Returns the [`Keyword`] of cafes, the first of
    /// [`Keyword::DEFAULT_CATEGORIES`].
    #[must_use]
    pub fn cafe() -> Self {
        Self(Self::DEFAULT_CATEGORIES[0].to_owned())
    }

    /// Creates a new [`Keyword`] if the given `keyword` is valid.
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Option<Self> {
        let keyword = keyword.into();
        Self::check(&keyword).then_some(Self(keyword))
    }

    /// Returns this [`Keyword`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `keyword` is a valid [`Keyword`].
    fn check(keyword: impl AsRef<str>) -> bool {
        let keyword = keyword.as_ref();
        keyword.trim() == keyword && !keyword.is_empty() && keyword.len() <= 100
    }
}

impl FromStr for Keyword {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `place::Keyword`")
    }
}

/// Point of interest returned by a places search.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    /// Name of this [`Place`].
    pub name: String,

    /// Provider's full category path of this [`Place`] (e.g.
    /// `음식점 > 분식`).
    pub category_name: String,

    /// [`Coordinate`] of this [`Place`].
    pub coordinate: Coordinate,

    /// Distance in meters from the search center, if reported.
    pub distance: Option<u32>,
}

/// Single page of a places search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Total number of [`Place`]s matching the search, beyond this [`Page`].
    pub total: u32,

    /// [`Place`]s of this [`Page`], nearest first.
    pub items: Vec<Place>,
}

impl Page {
    /// Creates an empty [`Page`].
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }
}

/// What a places search is looking for.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Target {
    /// [`Place`]s of the provided [`Category`].
    Category(Category),

    /// [`Place`]s matching the provided [`Keyword`].
    Keyword(Keyword),
}

/// Places search request.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    /// [`Target`] of the search.
    pub target: Target,

    /// Center of the search.
    pub center: Coordinate,

    /// [`Radius`] of the search around its center.
    pub radius: Radius,
}

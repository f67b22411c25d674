//! Market signal definitions.

use common::Score;
use juniper::{GraphQLInputObject, GraphQLObject};
use service::domain::{self, geo};

use crate::{api::scalar, Context, Error};

use super::InputError;

/// Geographic point in WGS84 degrees.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "CoordinateInput")]
pub struct CoordinateInput {
    /// Latitude in `-90.0..=90.0` range.
    pub lat: f64,

    /// Longitude in `-180.0..=180.0` range.
    pub lng: f64,
}

impl CoordinateInput {
    /// Converts this input into a [`geo::Coordinate`].
    ///
    /// # Errors
    ///
    /// With [`InputError::Coordinate`] if it's out of range.
    pub fn into_coordinate(self) -> Result<geo::Coordinate, Error> {
        geo::Coordinate::new(self.lat, self.lng)
            .ok_or_else(|| InputError::Coordinate.into())
    }
}

/// Converts the provided search radius in meters into a [`geo::Radius`].
///
/// # Errors
///
/// With [`InputError::Radius`] if it's not positive.
pub fn radius(meters: i32) -> Result<geo::Radius, Error> {
    u32::try_from(meters)
        .ok()
        .and_then(geo::Radius::new)
        .ok_or_else(|| InputError::Radius.into())
}

/// Saturating conversion of a count into a GraphQL `Int`.
pub(crate) fn int(count: impl TryInto<i32>) -> i32 {
    count.try_into().unwrap_or(i32::MAX)
}

/// Competition signal measured around a single point.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct CompetitionSignal {
    /// Places found per searched keyword.
    pub by_keyword: Vec<KeywordCount>,

    /// Places found per always measured category.
    pub by_category: Vec<CategoryCount>,

    /// Sum of the per-keyword totals.
    pub total: i32,

    /// Competition score, the lower the more crowded.
    pub competition: Score,

    /// Rent index of the unit, the higher the pricier.
    pub rent_index: Score,

    /// Foot traffic heuristic of the region.
    pub foot_traffic: Score,

    /// Youth density heuristic of the region.
    pub youth: Score,

    /// Whether some of the searches failed, so the totals may be
    /// understated.
    pub degraded: bool,
}

impl From<domain::signal::CompetitionSignal> for CompetitionSignal {
    fn from(s: domain::signal::CompetitionSignal) -> Self {
        Self {
            by_keyword: s
                .by_keyword
                .into_iter()
                .map(|(keyword, total)| KeywordCount {
                    keyword: keyword.into(),
                    total: int(total),
                })
                .collect(),
            by_category: s
                .by_category
                .into_iter()
                .map(|(category, total)| CategoryCount::new(category, total))
                .collect(),
            total: int(s.total),
            competition: s.competition,
            rent_index: s.rent_index,
            foot_traffic: s.foot_traffic,
            youth: s.youth,
            degraded: s.degraded,
        }
    }
}

/// Number of places matching a keyword.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct KeywordCount {
    /// Searched keyword.
    pub keyword: scalar::Keyword,

    /// Number of places found.
    pub total: i32,
}

/// Number of places of a category.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct CategoryCount {
    /// Provider code of the category, like `CE7`.
    pub code: String,

    /// Human-readable label of the category, like `카페`.
    pub label: String,

    /// Number of places found.
    pub total: i32,
}

impl CategoryCount {
    /// Creates a new [`CategoryCount`] of the provided `category`.
    pub(crate) fn new(category: domain::place::Category, total: u32) -> Self {
        Self {
            code: category.code().to_owned(),
            label: category.label().to_owned(),
            total: int(total),
        }
    }
}

/// Distance-decayed density indices around a single point.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct DensityIndex {
    /// Total number of cafes nearby.
    pub cafes: i32,

    /// Total number of restaurants nearby.
    pub restaurants: i32,

    /// Total number of convenience stores nearby.
    pub convenience_stores: i32,

    /// Competition index in `0.0..=1.0` range.
    pub competition: f64,

    /// Attractiveness index in `0.0..=1.0` range.
    pub attractiveness: f64,

    /// Whether some of the searches failed.
    pub degraded: bool,
}

impl From<domain::signal::DensityIndex> for DensityIndex {
    fn from(d: domain::signal::DensityIndex) -> Self {
        Self {
            cafes: int(d.cafes),
            restaurants: int(d.restaurants),
            convenience_stores: int(d.convenience_stores),
            competition: d.competition,
            attractiveness: d.attractiveness,
            degraded: d.degraded,
        }
    }
}

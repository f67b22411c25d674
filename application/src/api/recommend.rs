//! Definitions of the recommendation, simulation and comparison results.

use common::{Money, Score};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use rust_decimal::Decimal;
use service::{
    domain::{
        self,
        listing::Area,
        profile::{Weight, Weights},
    },
    query,
};

use crate::{
    api::{self, scalar, signal},
    Context, Error,
};

use super::InputError;

/// Preferences of a prospective tenant.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct ProfileInput {
    /// Monthly budget.
    pub budget: Option<Money>,

    /// Business categories of interest, the configured defaults if empty.
    pub desired_categories: Option<Vec<scalar::Keyword>>,

    /// Names of the sub-districts to recommend `Listing`s in.
    pub preferred_regions: Vec<scalar::RegionName>,

    /// Importance of each recommendation factor.
    pub weights: Option<WeightsInput>,
}

impl ProfileInput {
    /// Converts this input into a [`domain::Profile`].
    #[must_use]
    pub fn into_profile(self) -> domain::Profile {
        domain::Profile {
            budget: self.budget,
            desired_categories: self
                .desired_categories
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            preferred_regions: self
                .preferred_regions
                .into_iter()
                .map(Into::into)
                .collect(),
            weights: self
                .weights
                .map(WeightsInput::into_weights)
                .unwrap_or_default(),
        }
    }
}

/// Importance of each recommendation factor in `1..=5` range, `3` if
/// omitted. Values outside the range are clamped into it.
#[derive(Clone, Copy, Debug, Default, GraphQLInputObject)]
pub struct WeightsInput {
    /// Importance of foot traffic.
    pub foot_traffic: Option<i32>,

    /// Importance of low rent.
    pub rent_sensitivity: Option<i32>,

    /// Importance of low competition.
    pub competition_tolerance: Option<i32>,

    /// Importance of youth density.
    pub youth_preference: Option<i32>,
}

impl WeightsInput {
    /// Converts this input into [`Weights`].
    #[must_use]
    pub fn into_weights(self) -> Weights {
        let weight = |w: Option<i32>| w.map_or_else(Weight::default, Weight::saturating);
        Weights {
            foot_traffic: weight(self.foot_traffic),
            rent_sensitivity: weight(self.rent_sensitivity),
            competition_tolerance: weight(self.competition_tolerance),
            youth_preference: weight(self.youth_preference),
        }
    }
}

/// Converts the provided floor area in square meters into an [`Area`].
///
/// # Errors
///
/// With [`InputError::Area`] if it's not a positive number.
pub fn area(m2: f64) -> Result<Area, Error> {
    Decimal::try_from(m2)
        .ok()
        .and_then(Area::new)
        .ok_or_else(|| InputError::Area.into())
}

/// Ranked `Listing`s recommended to a profile.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Recommendation {
    /// Best scored `Listing`s, highest first.
    pub listings: Vec<ScoredListing>,

    /// Business categories the recommendation is made for.
    pub categories: Vec<scalar::Keyword>,

    /// Remarks on how the scores were obtained.
    pub reasons: Vec<String>,

    /// Whether some of the competition measurements failed.
    pub degraded: bool,
}

impl From<query::recommend::Output> for Recommendation {
    fn from(out: query::recommend::Output) -> Self {
        Self {
            listings: out.listings.into_iter().map(Into::into).collect(),
            categories: out.categories.into_iter().map(Into::into).collect(),
            reasons: out.reasons.into_iter().map(str::to_owned).collect(),
            degraded: out.degraded,
        }
    }
}

/// `Listing` along with its recommendation score.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct ScoredListing {
    /// Scored `Listing`.
    pub listing: api::Listing,

    /// Weighted score in `0..=400` range.
    pub score: i32,

    /// Competition signal measured at the `Listing`.
    pub signal: signal::CompetitionSignal,
}

impl From<query::recommend::Scored> for ScoredListing {
    fn from(s: query::recommend::Scored) -> Self {
        Self {
            listing: s.listing.into(),
            score: s.score.into(),
            signal: s.signal.into(),
        }
    }
}

/// Parameters of a business simulation. Amounts are monthly.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct SimulationInput {
    /// Name of the region the business is opened in.
    pub region: Option<scalar::RegionName>,

    /// Floor area in square meters, `50` if omitted.
    pub area: Option<f64>,

    /// Share of the cost of goods sold in sales, `0.33` if omitted.
    pub cogs_rate: Option<f64>,

    /// Rent, `200MANWON` if omitted.
    pub rent: Option<Money>,

    /// Labor costs, `300MANWON` if omitted.
    pub labor: Option<Money>,

    /// Other fixed costs, `100MANWON` if omitted.
    pub misc: Option<Money>,

    /// Business category, `카페` if omitted.
    pub category: Option<scalar::Keyword>,
}

impl SimulationInput {
    /// Converts this input into a [`query::Simulate`].
    ///
    /// # Errors
    ///
    /// - With [`InputError::Area`] if the area is not positive.
    /// - With [`InputError::CogsRate`] if the rate is not finite.
    pub fn into_query(self) -> Result<query::Simulate, Error> {
        let area = self.area.map(area).transpose()?;
        let cogs_rate = self
            .cogs_rate
            .map(|r| Decimal::try_from(r).map_err(|_| InputError::CogsRate))
            .transpose()?;

        Ok(query::Simulate {
            region: self.region.map(Into::into),
            area,
            cogs_rate,
            rent: self.rent,
            labor: self.labor,
            misc: self.misc,
            category: self.category.map(Into::into),
        })
    }
}

/// Rough monthly revenue and break-even estimation.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Simulation {
    /// Foot traffic heuristic of the region.
    pub foot_traffic: Score,

    /// Estimated sales.
    pub estimated_sales: Money,

    /// Sales minus the cost of goods sold.
    pub gross_profit: Money,

    /// Sum of rent, labor and other fixed costs.
    pub fixed_costs: Money,

    /// Gross profit minus fixed costs.
    pub operating_profit: Money,

    /// Sales needed to cover the fixed costs.
    pub bep_sales: Money,

    /// Business category the estimation is made for.
    pub recommended_category: scalar::Keyword,
}

impl From<query::simulate::Output> for Simulation {
    fn from(out: query::simulate::Output) -> Self {
        Self {
            foot_traffic: out.foot_traffic,
            estimated_sales: out.estimated_sales,
            gross_profit: out.gross_profit,
            fixed_costs: out.fixed_costs,
            operating_profit: out.operating_profit,
            bep_sales: out.bep_sales,
            recommended_category: out.recommended_category.into(),
        }
    }
}

/// Side-by-side market indices of two regions.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Comparison {
    /// Indices of the first region.
    pub a: RegionIndices,

    /// Indices of the second region.
    pub b: RegionIndices,

    /// Human-readable summary of both regions.
    pub summary: String,

    /// Whether some of the competition measurements failed.
    pub degraded: bool,
}

impl From<query::compare::Output> for Comparison {
    fn from(out: query::compare::Output) -> Self {
        Self {
            a: out.a.into(),
            b: out.b.into(),
            summary: out.summary,
            degraded: out.degraded,
        }
    }
}

/// Market indices of a single region.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct RegionIndices {
    /// Name of the region.
    pub name: scalar::RegionName,

    /// Foot traffic heuristic.
    pub foot_traffic: Score,

    /// Mean rent index of the region's monthly leases.
    pub rent_index: Score,

    /// Competition score at the region's centroid.
    pub competition: Score,

    /// Youth density heuristic.
    pub youth: Score,

    /// What the rent index and competition are based on.
    pub basis: Basis,
}

impl From<query::compare::Indices> for RegionIndices {
    fn from(i: query::compare::Indices) -> Self {
        Self {
            name: i.name.into(),
            foot_traffic: i.foot_traffic,
            rent_index: i.rent_index,
            competition: i.competition,
            youth: i.youth,
            basis: i.basis.into(),
        }
    }
}

/// What `RegionIndices` are based on.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "IndicesBasis")]
pub enum Basis {
    /// Stored `Listing`s and places searched around their centroid.
    Measured,

    /// Placeholders derived from the region name, for regions without
    /// geocoded `Listing`s.
    Synthetic,
}

impl From<query::compare::Basis> for Basis {
    fn from(basis: query::compare::Basis) -> Self {
        use query::compare::Basis as B;

        match basis {
            B::Measured => Self::Measured,
            B::Synthetic => Self::Synthetic,
        }
    }
}

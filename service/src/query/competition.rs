//! [`Query`] for measuring a [`CompetitionSignal`].

use std::convert::Infallible;

use common::Money;
use futures::future;
use smart_default::SmartDefault;

use crate::{
    domain::{
        geo::{Coordinate, Radius},
        listing::Area,
        place::{Keyword, Target},
        region,
        signal::{competition_score, rent_index, CompetitionSignal},
    },
    Service,
};

use super::{places, Query, SearchPlaces};

/// Default [`Radius`] of a [`Competition`] measurement.
#[expect(unsafe_code, reason = "positive")]
const DEFAULT_RADIUS: Radius = unsafe { Radius::new_unchecked(700) };

/// [`Competition`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// [`Radius`] to measure within by default.
    #[default(DEFAULT_RADIUS)]
    pub radius: Radius,

    /// [`Keyword`]s of competing businesses searched by default.
    #[default(Keyword::default_categories())]
    pub keywords: Vec<Keyword>,
}

/// [`Query`] for measuring a [`CompetitionSignal`] around a point.
///
/// Never fails: every failed search contributes zero and marks the signal as
/// degraded.
#[derive(Clone, Debug, Default)]
pub struct Competition {
    /// Point to measure around, if known.
    ///
    /// Nothing is searched without it.
    pub center: Option<Coordinate>,

    /// [`Keyword`]s of competing businesses, the configured ones if [`None`].
    pub keywords: Option<Vec<Keyword>>,

    /// [`Radius`] to measure within, the configured one if [`None`].
    pub radius: Option<Radius>,

    /// Name of the region the point belongs to.
    pub region: Option<region::Name>,

    /// Monthly rent of the measured unit.
    pub rent: Option<Money>,

    /// [`Area`] of the measured unit.
    pub area: Option<Area>,
}

impl<Db, Pl, Gc> Query<Competition> for Service<Db, Pl, Gc>
where
    Self: Query<SearchPlaces, Ok = places::Outcome, Err = Infallible>,
{
    type Ok = CompetitionSignal;
    type Err = Infallible;

    async fn execute(
        &self,
        query: Competition,
    ) -> Result<Self::Ok, Self::Err> {
        let Competition {
            center,
            keywords,
            radius,
            region,
            rent,
            area,
        } = query;
        let config = &self.config().competition;
        let keywords = keywords.unwrap_or_else(|| config.keywords.clone());
        let radius = radius.unwrap_or(config.radius);

        let (by_keyword, by_category, degraded) = if let Some(center) = center
        {
            let search = |target| async move {
                let outcome = self
                    .execute(SearchPlaces::new(target, center, radius))
                    .await
                    .unwrap_or_else(|e| match e {});
                (outcome.page.total, outcome.degraded)
            };

            let (keyword_totals, category_totals) = future::join(
                future::join_all(
                    keywords.iter().cloned().map(Target::Keyword).map(search),
                ),
                future::join_all(
                    CompetitionSignal::CATEGORIES
                        .into_iter()
                        .map(Target::Category)
                        .map(search),
                ),
            )
            .await;

            let degraded = keyword_totals
                .iter()
                .chain(&category_totals)
                .any(|(_, degraded)| *degraded);
            (
                keywords
                    .into_iter()
                    .zip(keyword_totals.into_iter().map(|(t, _)| t))
                    .collect::<Vec<_>>(),
                CompetitionSignal::CATEGORIES
                    .into_iter()
                    .zip(category_totals.into_iter().map(|(t, _)| t))
                    .collect::<Vec<_>>(),
                degraded,
            )
        } else {
            (
                keywords.into_iter().map(|k| (k, 0)).collect(),
                CompetitionSignal::CATEGORIES
                    .into_iter()
                    .map(|c| (c, 0))
                    .collect(),
                true,
            )
        };

        let total = by_keyword
            .iter()
            .fold(0_u32, |sum, (_, n)| sum.saturating_add(*n));
        let region = region.as_ref().map_or("", region::Name::as_str);

        Ok(CompetitionSignal {
            by_keyword,
            by_category,
            total,
            competition: competition_score(total),
            rent_index: rent_index(rent, area),
            foot_traffic: self.heuristics().foot_traffic(region),
            youth: self.heuristics().youth(region),
            degraded,
        })
    }
}

//! [`Query`] for searching nearby [`Place`]s.

use std::{convert::Infallible, fmt};

use common::operations::{By, Search};
use tracing as log;

use crate::{
    domain::{
        geo::{Coordinate, Radius},
        place::{self, Page, Target},
        signal::DECAY_WINDOW,
    },
    infra::Places,
    Service,
};
#[cfg(doc)]
use crate::domain::Place;

use super::Query;

/// [`Query`] for searching [`Place`]s around a point.
///
/// Never fails: a failed or unauthenticated search resolves into an empty
/// [`Page`] marked as degraded, so callers never branch on provider failures.
#[derive(Clone, Debug)]
pub struct SearchPlaces(pub place::Request);

impl SearchPlaces {
    /// Creates a new [`SearchPlaces`] [`Query`] for the provided [`Target`].
    #[must_use]
    pub fn new(target: Target, center: Coordinate, radius: Radius) -> Self {
        Self(place::Request {
            target,
            center,
            radius,
        })
    }
}

/// Result of a [`SearchPlaces`] [`Query`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    /// Found [`Page`], nearest first.
    pub page: Page,

    /// Indicator whether the search failed and the [`Page`] is empty because
    /// of that.
    pub degraded: bool,
}

impl<Db, Pl, Gc> Query<SearchPlaces> for Service<Db, Pl, Gc>
where
    Pl: Places<Search<By<Page, place::Request>>, Ok = Page>,
    Pl::Err: fmt::Display,
{
    type Ok = Outcome;
    type Err = Infallible;

    async fn execute(
        &self,
        SearchPlaces(req): SearchPlaces,
    ) -> Result<Self::Ok, Self::Err> {
        let target = req.target.clone();

        match self.places().execute(Search(By::new(req))).await {
            Ok(mut page) => {
                page.items.sort_by_key(|p| p.distance.unwrap_or(u32::MAX));
                page.items.truncate(DECAY_WINDOW);
                Ok(Outcome {
                    page,
                    degraded: false,
                })
            }
            Err(e) => {
                log::warn!("places search for `{target}` failed: {e}");
                Ok(Outcome {
                    page: Page::empty(),
                    degraded: true,
                })
            }
        }
    }
}

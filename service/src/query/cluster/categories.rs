//! [`Query`] of the category drill-down step.

use std::{convert::Infallible, fmt};

use futures::future;
use tracing as log;

use crate::{
    domain::{
        geo::Coordinate,
        place::{Category, Target},
        region::{self, Level},
        Listing,
    },
    query::{listing, places, Query, SearchPlaces},
    read::cluster::{Breakdown, CategoryCount},
    Service,
};

/// [`Query`] for breaking a sub-district down by nearby place [`Category`]s,
/// along with a preview of its [`Listing`]s.
#[derive(Clone, Debug)]
pub struct Categories {
    /// [`region::Code`] of the selected sub-district.
    pub subdistrict: region::Code,

    /// Centroid of the selected sub-district, if known.
    ///
    /// The centroid of its [`Listing`]s is used if [`None`].
    pub centroid: Option<Coordinate>,
}

impl<Db, Pl, Gc> Query<Categories> for Service<Db, Pl, Gc>
where
    Self: Query<listing::ByRegion, Ok = Vec<Listing>>
        + Query<SearchPlaces, Ok = places::Outcome, Err = Infallible>,
    <Self as Query<listing::ByRegion>>::Err: fmt::Display,
{
    type Ok = Breakdown;
    type Err = Infallible;

    async fn execute(
        &self,
        Categories {
            subdistrict,
            centroid,
        }: Categories,
    ) -> Result<Self::Ok, Self::Err> {
        let config = &self.config().clusters;

        let mut listings = match self
            .execute(listing::ByRegion::by(region::Selector {
                code: subdistrict.clone(),
                level: Level::Subdistrict,
            }))
            .await
        {
            Ok(l) => l,
            Err(e) => {
                log::warn!(
                    "failed to load listings of `{subdistrict}` sub-district: \
                     {e}",
                );
                return Ok(Breakdown {
                    degraded: true,
                    ..Breakdown::default()
                });
            }
        };

        let center = centroid.or_else(|| {
            Coordinate::centroid(listings.iter().filter_map(|l| l.coordinate))
        });
        listings.retain(|l| l.coordinate.is_some());
        listings.truncate(config.preview_limit);

        let Some(center) = center else {
            log::debug!("no centroid to count places around `{subdistrict}`");
            return Ok(Breakdown {
                counts: Vec::new(),
                listings,
                degraded: true,
            });
        };

        let outcomes =
            future::join_all(Category::BREAKDOWN.iter().map(|&category| {
                self.execute(SearchPlaces::new(
                    Target::Category(category),
                    center,
                    config.category_radius,
                ))
            }))
            .await;

        let mut degraded = false;
        let counts = Category::BREAKDOWN
            .iter()
            .zip(outcomes)
            .map(|(&category, outcome)| {
                let outcome = outcome.unwrap_or_else(|e| match e {});
                degraded |= outcome.degraded;
                CategoryCount {
                    category,
                    total: outcome.page.total,
                }
            })
            .collect();

        Ok(Breakdown {
            counts,
            listings,
            degraded,
        })
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            geo::Coordinate,
            place::{Category, Target},
            region::Code,
        },
        query::spec::{broken, service, Scripted, Unreachable},
        read::cluster::spec::listing,
        Query as _,
    };

    use super::Categories;

    const SEOSAN: (&str, &str) = ("44210", "서산시");
    const BUCHUN: (&str, &str) = ("4421051000", "부춘동");

    fn query(centroid: Option<Coordinate>) -> Categories {
        Categories {
            subdistrict: Code::new(BUCHUN.0).unwrap(),
            centroid,
        }
    }

    #[tokio::test]
    async fn counts_every_breakdown_category() {
        let places = Scripted::default()
            .with(Target::Category(Category::Cafe), 14)
            .with(Target::Category(Category::Pharmacy), 3);
        let svc = service(
            [
                listing("1", SEOSAN, BUCHUN, Some((36.78, 126.45))),
                listing("2", SEOSAN, BUCHUN, None),
                listing("3", SEOSAN, ("4421052000", "동문1동"), Some((36.8, 126.47))),
            ],
            places,
        );

        let breakdown = svc
            .execute(query(Coordinate::new(36.78, 126.45)))
            .await
            .unwrap();

        assert_eq!(breakdown.counts.len(), Category::BREAKDOWN.len());
        assert_eq!(breakdown.counts[0].category, Category::Cafe);
        assert_eq!(breakdown.counts[0].total, 14);
        let pharmacy = breakdown
            .counts
            .iter()
            .find(|c| c.category == Category::Pharmacy)
            .unwrap();
        assert_eq!(pharmacy.total, 3);
        let ids = breakdown
            .listings
            .iter()
            .map(|l| l.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["1"]);
        assert!(!breakdown.degraded);
        assert!(svc
            .places()
            .asked()
            .iter()
            .all(|t| matches!(t, Target::Category(_))));
    }

    #[tokio::test]
    async fn caps_preview() {
        let listings = (0..30)
            .map(|i| {
                listing(&i.to_string(), SEOSAN, BUCHUN, Some((36.78, 126.45)))
            })
            .collect::<Vec<_>>();
        let svc = service(listings, Unreachable);

        let breakdown = svc.execute(query(None)).await.unwrap();

        assert_eq!(breakdown.listings.len(), 20);
        assert!(breakdown.counts.iter().all(|c| c.total == 0));
        assert!(breakdown.degraded);
    }

    #[tokio::test]
    async fn previews_only_placed_listings_without_centroid() {
        let svc = service(
            [
                listing("1", SEOSAN, BUCHUN, None),
                listing("2", SEOSAN, BUCHUN, None),
            ],
            Unreachable,
        );

        let breakdown = svc.execute(query(None)).await.unwrap();

        assert!(breakdown.counts.is_empty());
        assert!(breakdown.listings.is_empty());
        assert!(breakdown.degraded);
    }

    #[tokio::test]
    async fn empty_when_store_fails() {
        for centroid in [None, Coordinate::new(36.78, 126.45)] {
            let svc = broken(
                Scripted::default().with(Target::Category(Category::Cafe), 14),
            );

            let breakdown = svc.execute(query(centroid)).await.unwrap();

            assert!(breakdown.counts.is_empty());
            assert!(breakdown.listings.is_empty());
            assert!(breakdown.degraded);
            assert!(svc.places().asked().is_empty());
        }
    }
}

//! [`Query`] of the sub-district drill-down step.

use std::{convert::Infallible, fmt};

use tracing as log;

use crate::{
    domain::{
        region::{self, Level},
        Listing,
    },
    query::{listing, Query},
    read::{listing::Filter, Cluster},
    Service,
};

/// [`Query`] for clustering [`Listing`]s of a district by their
/// sub-districts.
#[derive(Clone, Debug)]
pub struct Subdistricts {
    /// [`region::Code`] of the selected district.
    pub district: region::Code,

    /// [`Filter`] of the clustered [`Listing`]s.
    pub filter: Filter,
}

impl<Db, Pl, Gc> Query<Subdistricts> for Service<Db, Pl, Gc>
where
    Self: Query<listing::ByRegion, Ok = Vec<Listing>>,
    <Self as Query<listing::ByRegion>>::Err: fmt::Display,
{
    type Ok = Vec<Cluster>;
    type Err = Infallible;

    async fn execute(
        &self,
        Subdistricts { district, filter }: Subdistricts,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = region::Selector {
            code: district,
            level: Level::ProvinceDistrict,
        };
        let listings = match self
            .execute(listing::ByRegion::by(selector.clone()))
            .await
        {
            Ok(l) => l,
            Err(e) => {
                log::warn!(
                    "failed to load listings of `{}` district: {e}",
                    selector.code,
                );
                return Ok(Vec::new());
            }
        };

        Ok(Cluster::group(
            listings.iter().filter(|l| filter.matches(l)),
            Level::Subdistrict,
        ))
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::region::{Code, Level},
        query::spec::{broken, service, Unreachable},
        read::{cluster::spec::listing, listing::Filter},
        Query as _,
    };

    use super::Subdistricts;

    const SEOSAN: (&str, &str) = ("44210", "서산시");
    const DANGJIN: (&str, &str) = ("44270", "당진시");

    fn query(district: &str) -> Subdistricts {
        Subdistricts {
            district: Code::new(district).unwrap(),
            filter: Filter::default(),
        }
    }

    #[tokio::test]
    async fn references_parent_district() {
        let svc = service(
            [
                listing("1", SEOSAN, ("4421051000", "부춘동"), Some((36.78, 126.45))),
                listing("2", SEOSAN, ("4421052000", "동문1동"), Some((36.79, 126.46))),
                listing("3", SEOSAN, ("4421052000", "동문1동"), Some((36.80, 126.47))),
                listing("4", DANGJIN, ("4427051000", "당진1동"), Some((36.89, 126.63))),
            ],
            Unreachable,
        );

        let clusters = svc.execute(query("44210")).await.unwrap();

        let names = clusters
            .iter()
            .map(|c| (c.name.to_string(), c.count))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [("동문1동".to_owned(), 2), ("부춘동".to_owned(), 1)],
        );
        assert!(clusters.iter().all(|c| c.level == Level::Subdistrict));
        assert!(clusters
            .iter()
            .all(|c| c.parent == Code::new("44210")));
    }

    #[tokio::test]
    async fn empty_for_unknown_district() {
        let svc = service(
            [listing("1", SEOSAN, ("4421051000", "부춘동"), Some((36.78, 126.45)))],
            Unreachable,
        );

        assert!(svc.execute(query("11110")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_when_store_fails() {
        let svc = broken(Unreachable);

        assert!(svc.execute(query("44210")).await.unwrap().is_empty());
    }
}

//! [`Query`] of the district drill-down step.

use std::{convert::Infallible, fmt};

use tracing as log;

use crate::{
    domain::{geo::BoundingBox, region::Level, Listing},
    query::{listing, Query},
    read::{listing::Filter, Cluster},
    Service,
};

/// [`Query`] for clustering [`Listing`]s within a viewport by their
/// districts.
#[derive(Clone, Debug, Default)]
pub struct Districts {
    /// Viewport to cluster within, the configured service area if [`None`].
    pub viewport: Option<BoundingBox>,

    /// [`Filter`] of the clustered [`Listing`]s.
    pub filter: Filter,
}

impl<Db, Pl, Gc> Query<Districts> for Service<Db, Pl, Gc>
where
    Self: Query<listing::All, Ok = Vec<Listing>>,
    <Self as Query<listing::All>>::Err: fmt::Display,
{
    type Ok = Vec<Cluster>;
    type Err = Infallible;

    async fn execute(
        &self,
        Districts { viewport, filter }: Districts,
    ) -> Result<Self::Ok, Self::Err> {
        let bbox = viewport.unwrap_or(self.config().clusters.service_area);

        let listings = match self.execute(listing::All::by(())).await {
            Ok(l) => l,
            Err(e) => {
                log::warn!("failed to load listings for district step: {e}");
                return Ok(Vec::new());
            }
        };

        let mut clusters = Cluster::group(
            listings.iter().filter(|l| filter.matches_within(l, &bbox)),
            Level::ProvinceDistrict,
        );
        for c in &mut clusters {
            c.centroid = c.centroid.or(Some(bbox.center()));
        }
        Ok(clusters)
    }
}

//! [`Query`] for measuring a [`DensityIndex`].

use std::convert::Infallible;

use futures::future;

use crate::{
    domain::{
        geo::{Coordinate, Radius},
        place::{Category, Target},
        signal::DensityIndex,
    },
    Service,
};

use super::{places, Query, SearchPlaces};

/// [`Query`] for measuring a [`DensityIndex`] around a point.
///
/// Never fails: a failed search counts as an empty one and marks the
/// [`DensityIndex`] as degraded.
#[derive(Clone, Copy, Debug)]
pub struct Density {
    /// Point to measure around.
    pub center: Coordinate,

    /// [`Radius`] to measure within, the configured competition one if
    /// [`None`].
    pub radius: Option<Radius>,
}

impl<Db, Pl, Gc> Query<Density> for Service<Db, Pl, Gc>
where
    Self: Query<SearchPlaces, Ok = places::Outcome, Err = Infallible>,
{
    type Ok = DensityIndex;
    type Err = Infallible;

    async fn execute(
        &self,
        Density { center, radius }: Density,
    ) -> Result<Self::Ok, Self::Err> {
        let radius = radius.unwrap_or(self.config().competition.radius);
        let search = |category| async move {
            self.execute(SearchPlaces::new(
                Target::Category(category),
                center,
                radius,
            ))
            .await
            .unwrap_or_else(|e| match e {})
        };

        let (cafes, restaurants, convenience) = future::join3(
            search(Category::Cafe),
            search(Category::Restaurant),
            search(Category::Convenience),
        )
        .await;

        Ok(DensityIndex {
            degraded: cafes.degraded
                || restaurants.degraded
                || convenience.degraded,
            ..DensityIndex::new(
                &cafes.page,
                &restaurants.page,
                &convenience.page,
            )
        })
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            geo::Coordinate,
            place::{Category, Target},
            signal::decay_sum,
        },
        query::spec::{page, service, Scripted, Unreachable},
        Query as _,
    };

    use super::Density;

    fn query() -> Density {
        Density {
            center: Coordinate::new(36.78, 126.45).unwrap(),
            radius: None,
        }
    }

    #[tokio::test]
    async fn decays_by_rank() {
        let places = Scripted::default()
            .with(Target::Category(Category::Cafe), 200)
            .with(Target::Category(Category::Restaurant), 300)
            .with(Target::Category(Category::Convenience), 50);
        let svc = service([], places);

        let index = svc.execute(query()).await.unwrap();

        assert_eq!(index.cafes, 200);
        assert_eq!(index.restaurants, 300);
        assert_eq!(index.convenience_stores, 50);
        let decayed = decay_sum(&page(15));
        assert!((index.competition - decayed * 1.7 / 15.0).abs() < 1e-9);
        assert!((index.attractiveness - decayed / 12.0).abs() < 1e-9);
        assert!(index.competition > index.attractiveness);
        assert!(!index.degraded);
    }

    #[tokio::test]
    async fn zero_when_unreachable() {
        let svc = service([], Unreachable);

        let index = svc.execute(query()).await.unwrap();

        assert_eq!(index.cafes, 0);
        assert!(index.competition.abs() < f64::EPSILON);
        assert!(index.attractiveness.abs() < f64::EPSILON);
        assert!(index.degraded);
    }
}

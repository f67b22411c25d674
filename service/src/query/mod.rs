//! [`Query`] definition.

pub mod cluster;
pub mod compare;
pub mod competition;
pub mod density;
pub mod listing;
pub mod places;
pub mod recommend;
pub mod simulate;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{infra::Database, Service};

pub use self::{
    compare::Compare, competition::Competition, density::Density,
    places::SearchPlaces, recommend::Recommend, simulate::Simulate,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, Pl, Gc, W, B, E> Query<DatabaseQuery<By<W, B>>>
    for Service<Db, Pl, Gc>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<E>>,
{
    type Ok = W;
    type Err = Traced<E>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
pub(crate) mod spec {
    //! Fakes shared by [`Query`] tests.

    use std::sync::Mutex;

    use common::operations::{By, Search, Select};
    use tracerr::Traced;

    use crate::{
        domain::{
            geo::{Coordinate, Geocoded},
            listing::Address,
            place::{self, Page, Place, Target},
            Listing,
        },
        infra::{Database, Geocoder, Memory, Places},
        Config, Service,
    };

    /// [`Places`] provider answering from a script, recording every
    /// [`Target`] it was asked for.
    ///
    /// Unscripted [`Target`]s resolve into an empty [`Page`].
    #[derive(Debug, Default)]
    pub(crate) struct Scripted {
        pub(crate) pages: Vec<(Target, Result<Page, &'static str>)>,
        pub(crate) asked: Mutex<Vec<Target>>,
    }

    impl Scripted {
        /// Scripts the provided [`Target`] to find `total` places.
        pub(crate) fn with(mut self, target: Target, total: u32) -> Self {
            self.pages.push((target, Ok(page(total))));
            self
        }

        /// Scripts the provided [`Target`] to fail.
        pub(crate) fn failing(mut self, target: Target) -> Self {
            self.pages.push((target, Err("provider unreachable")));
            self
        }

        /// Returns all the [`Target`]s asked so far.
        pub(crate) fn asked(&self) -> Vec<Target> {
            self.asked.lock().unwrap().clone()
        }
    }

    impl Places<Search<By<Page, place::Request>>> for Scripted {
        type Ok = Page;
        type Err = &'static str;

        async fn execute(
            &self,
            Search(by): Search<By<Page, place::Request>>,
        ) -> Result<Self::Ok, Self::Err> {
            let target = by.into_inner().target;
            self.asked.lock().unwrap().push(target.clone());
            self.pages
                .iter()
                .find(|(t, _)| *t == target)
                .map_or_else(|| Ok(Page::empty()), |(_, p)| p.clone())
        }
    }

    /// [`Places`] provider failing every search.
    #[derive(Clone, Copy, Debug)]
    pub(crate) struct Unreachable;

    impl Places<Search<By<Page, place::Request>>> for Unreachable {
        type Ok = Page;
        type Err = &'static str;

        async fn execute(
            &self,
            _: Search<By<Page, place::Request>>,
        ) -> Result<Self::Ok, Self::Err> {
            Err("missing credential")
        }
    }

    /// [`Geocoder`] never finding anything.
    #[derive(Clone, Copy, Debug)]
    pub(crate) struct Nowhere;

    impl Geocoder<Select<By<Option<Geocoded>, Address>>> for Nowhere {
        type Ok = Option<Geocoded>;
        type Err = &'static str;

        async fn execute(
            &self,
            _: Select<By<Option<Geocoded>, Address>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(None)
        }
    }

    /// [`Database`] failing every query.
    #[derive(Clone, Copy, Debug)]
    pub(crate) struct Broken;

    impl<B> Database<Select<By<Vec<Listing>, B>>> for Broken {
        type Ok = Vec<Listing>;
        type Err = Traced<&'static str>;

        async fn execute(
            &self,
            _: Select<By<Vec<Listing>, B>>,
        ) -> Result<Self::Ok, Self::Err> {
            Err(tracerr::new!("storage is unavailable"))
        }
    }

    /// Creates a distance-sorted [`Page`] with `total` places.
    pub(crate) fn page(total: u32) -> Page {
        Page {
            total,
            items: (0..total.min(15))
                .map(|i| Place {
                    name: format!("place {i}"),
                    category_name: "음식점".into(),
                    coordinate: Coordinate::new(36.78, 126.45).unwrap(),
                    distance: Some(i * 20),
                })
                .collect(),
        }
    }

    /// Creates a [`Service`] over a [`Broken`] [`Database`] and the provided
    /// [`Places`].
    pub(crate) fn broken<Pl>(places: Pl) -> Service<Broken, Pl, Nowhere> {
        Service::new(Config::default(), Broken, places, Nowhere)
    }

    /// Creates a [`Service`] over the provided [`Listing`]s and [`Places`].
    pub(crate) fn service<Pl>(
        listings: impl IntoIterator<Item = Listing>,
        places: Pl,
    ) -> Service<Memory, Pl, Nowhere> {
        Service::new(Config::default(), Memory::new(listings), places, Nowhere)
    }
}

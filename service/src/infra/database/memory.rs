//! In-memory [`Database`] implementation.

use std::sync::Arc;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{region, Listing},
    infra::{database, Database},
};

/// [`Database`] keeping a fixed set of [`Listing`]s in memory.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Stored [`Listing`]s.
    listings: Arc<[Listing]>,
}

impl Memory {
    /// Creates a new [`Memory`] storing the provided [`Listing`]s.
    #[must_use]
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        Self {
            listings: listings.into_iter().collect(),
        }
    }
}

impl Database<Select<By<Vec<Listing>, ()>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Listing>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.listings.to_vec())
    }
}

impl Database<Select<By<Vec<Listing>, region::Selector>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, region::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        Ok(self
            .listings
            .iter()
            .filter(|l| selector.matches(&l.region))
            .cloned()
            .collect())
    }
}

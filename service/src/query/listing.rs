//! [`Query`]s for reading [`Listing`]s.

use common::operations::By;

use crate::domain::{region, Listing};
#[cfg(doc)]
use crate::query::Query;

use super::DatabaseQuery;

/// [`Query`] for selecting all the [`Listing`]s.
pub type All = DatabaseQuery<By<Vec<Listing>, ()>>;

/// [`Query`] for selecting [`Listing`]s of the specified region.
pub type ByRegion = DatabaseQuery<By<Vec<Listing>, region::Selector>>;

//! Service contains the market-signal aggregation and scoring engine.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::sync::Arc;

use smart_default::SmartDefault;

#[cfg(doc)]
use infra::{Database, Geocoder, Places};

use self::domain::{heuristic::StaticTable, RegionHeuristics};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// [`query::Recommend`] configuration.
    pub recommend: query::recommend::Config,

    /// [`query::Competition`] configuration.
    pub competition: query::competition::Config,

    /// [`query::cluster`] configuration.
    pub clusters: query::cluster::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Pl, Gc> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Places`]-search provider of this [`Service`].
    places: Pl,

    /// [`Geocoder`] of this [`Service`].
    geocoder: Gc,

    /// [`RegionHeuristics`] of this [`Service`].
    heuristics: Arc<dyn RegionHeuristics>,
}

impl<Db, Pl, Gc> Service<Db, Pl, Gc> {
    /// Creates a new [`Service`] with the provided parameters, using the
    /// built-in [`StaticTable`] as its [`RegionHeuristics`].
    pub fn new(config: Config, database: Db, places: Pl, geocoder: Gc) -> Self {
        Self {
            config,
            database,
            places,
            geocoder,
            heuristics: Arc::new(StaticTable::default()),
        }
    }

    /// Replaces [`RegionHeuristics`] of this [`Service`].
    #[must_use]
    pub fn with_heuristics(
        mut self,
        heuristics: impl RegionHeuristics + 'static,
    ) -> Self {
        self.heuristics = Arc::new(heuristics);
        self
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Places`]-search provider of this [`Service`].
    #[must_use]
    pub fn places(&self) -> &Pl {
        &self.places
    }

    /// Returns [`Geocoder`] of this [`Service`].
    #[must_use]
    pub fn geocoder(&self) -> &Gc {
        &self.geocoder
    }

    /// Returns [`RegionHeuristics`] of this [`Service`].
    #[must_use]
    pub fn heuristics(&self) -> &dyn RegionHeuristics {
        &*self.heuristics
    }
}

//! [`Command`] definition.

pub mod geocode_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::geocode_listing::GeocodeListing;

//! Read entities definitions.

pub mod cluster;
pub mod listing;

pub use self::cluster::Cluster;

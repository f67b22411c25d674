//! Domain definitions.

pub mod drill_down;
pub mod geo;
pub mod heuristic;
pub mod listing;
pub mod place;
pub mod profile;
pub mod region;
pub mod signal;

pub use self::{
    drill_down::DrillDown, heuristic::RegionHeuristics, listing::Listing,
    place::Place, profile::Profile, region::Region,
};

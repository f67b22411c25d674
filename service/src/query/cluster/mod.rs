//! [`Query`]s of the region drill-down steps.
//!
//! Every step fails open: a store failure resolves into an empty step, so the
//! map renders "nothing to show" instead of an error.

pub mod categories;
pub mod districts;
pub mod subdistricts;

use smart_default::SmartDefault;

use crate::domain::geo::{BoundingBox, Radius};
#[cfg(doc)]
use crate::{domain::Listing, query::Query};

pub use self::{
    categories::Categories, districts::Districts, subdistricts::Subdistricts,
};

/// Default [`Radius`] of the [`Categories`] step.
#[expect(unsafe_code, reason = "positive")]
const DEFAULT_CATEGORY_RADIUS: Radius = unsafe { Radius::new_unchecked(800) };

/// Drill-down [`Query`]s configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// [`BoundingBox`] the [`Districts`] step covers if no viewport is
    /// provided.
    #[default(BoundingBox::SEOSAN)]
    pub service_area: BoundingBox,

    /// [`Radius`] places are counted within by the [`Categories`] step.
    #[default(DEFAULT_CATEGORY_RADIUS)]
    pub category_radius: Radius,

    /// Maximum number of [`Listing`]s previewed by the [`Categories`] step.
    #[default = 20]
    pub preview_limit: usize,
}

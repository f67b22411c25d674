//! [`Listing`]-related read definitions.

use smart_default::SmartDefault;

use crate::domain::{geo::BoundingBox, Listing};

/// Filter of [`Listing`]s shown on the map.
#[derive(Clone, Debug, SmartDefault)]
pub struct Filter {
    /// Indicator whether [`Listing`]s without a coordinate are skipped.
    #[default = true]
    pub only_with_coordinates: bool,

    /// Text the [`Listing`] title or address must contain.
    pub keyword: Option<String>,

    /// Tag the [`Listing`] must carry.
    pub theme: Option<String>,
}

impl Filter {
    /// Indicates whether the provided [`Listing`] passes this [`Filter`].
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        if self.only_with_coordinates && listing.coordinate.is_none() {
            return false;
        }
        if let Some(keyword) = self.keyword.as_deref() {
            if !listing.mentions(keyword) {
                return false;
            }
        }
        if let Some(theme) = self.theme.as_deref() {
            if !listing.tags.iter().any(|t| t.as_str() == theme) {
                return false;
            }
        }
        true
    }

    /// Indicates whether the provided [`Listing`] passes this [`Filter`] and
    /// lies within the provided [`BoundingBox`].
    ///
    /// [`Listing`]s without a coordinate can't be placed, so they are only
    /// kept if this [`Filter`] allows them at all.
    #[must_use]
    pub fn matches_within(&self, listing: &Listing, bbox: &BoundingBox) -> bool {
        self.matches(listing)
            && listing.coordinate.map_or(true, |c| bbox.contains(c))
    }
}

//! Region drill-down definitions.

use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use service::{domain, domain::geo, read};

use crate::{
    api::{self, scalar, signal},
    Context, Error,
};

use super::InputError;

/// Rectangular map viewport.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
pub struct BoundingBoxInput {
    /// South-west corner.
    pub sw: signal::CoordinateInput,

    /// North-east corner.
    pub ne: signal::CoordinateInput,
}

impl BoundingBoxInput {
    /// Converts this input into a [`geo::BoundingBox`].
    ///
    /// # Errors
    ///
    /// - With [`InputError::Coordinate`] if any corner is out of range.
    /// - With [`InputError::BoundingBox`] if the corners are swapped.
    pub fn into_bounding_box(self) -> Result<geo::BoundingBox, Error> {
        geo::BoundingBox::new(
            self.sw.into_coordinate()?,
            self.ne.into_coordinate()?,
        )
        .ok_or_else(|| InputError::BoundingBox.into())
    }
}

/// Filter of the clustered `Listing`s.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct ListingFilterInput {
    /// Substring the title or address must contain.
    pub keyword: Option<String>,

    /// Tag the `Listing` must carry.
    pub theme: Option<String>,

    /// Whether to skip not yet geocoded `Listing`s, `true` by default.
    pub only_with_coordinates: Option<bool>,
}

impl From<ListingFilterInput> for read::listing::Filter {
    fn from(input: ListingFilterInput) -> Self {
        let default = Self::default();
        Self {
            keyword: input.keyword.filter(|k| !k.trim().is_empty()),
            theme: input.theme.filter(|t| !t.trim().is_empty()),
            only_with_coordinates: input
                .only_with_coordinates
                .unwrap_or(default.only_with_coordinates),
        }
    }
}

/// Aggregate of `Listing`s sharing a region.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Cluster {
    /// Code of the region, unique within its level.
    pub code: scalar::RegionCode,

    /// Display name of the region.
    pub name: scalar::RegionName,

    /// Administrative level of the region.
    pub level: Level,

    /// Latitude of the members' centroid, if known.
    pub lat: Option<f64>,

    /// Longitude of the members' centroid, if known.
    pub lng: Option<f64>,

    /// Number of `Listing`s in the region.
    pub count: i32,

    /// Code of the parent district, for sub-districts only.
    pub parent: Option<scalar::RegionCode>,
}

impl From<read::Cluster> for Cluster {
    fn from(c: read::Cluster) -> Self {
        Self {
            code: c.code.into(),
            name: c.name.into(),
            level: c.level.into(),
            lat: c.centroid.map(geo::Coordinate::lat),
            lng: c.centroid.map(geo::Coordinate::lng),
            count: signal::int(c.count),
            parent: c.parent.map(Into::into),
        }
    }
}

/// Administrative level of a `Cluster`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "RegionLevel")]
pub enum Level {
    /// District: si, gun or gu.
    District,

    /// Sub-district: eup, myeon or dong.
    Subdistrict,
}

impl From<domain::region::Level> for Level {
    fn from(level: domain::region::Level) -> Self {
        use domain::region::Level as L;

        match level {
            L::ProvinceDistrict => Self::District,
            L::Subdistrict => Self::Subdistrict,
        }
    }
}

/// Category breakdown of a single sub-district.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Breakdown {
    /// Places found per category.
    pub counts: Vec<signal::CategoryCount>,

    /// Preview of the geocoded `Listing`s in the sub-district.
    pub listings: Vec<api::Listing>,

    /// Whether some of the searches failed.
    pub degraded: bool,
}

impl From<read::cluster::Breakdown> for Breakdown {
    fn from(b: read::cluster::Breakdown) -> Self {
        Self {
            counts: b
                .counts
                .into_iter()
                .map(|c| signal::CategoryCount::new(c.category, c.total))
                .collect(),
            listings: b.listings.into_iter().map(Into::into).collect(),
            degraded: b.degraded,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::read::listing::Filter;

    use crate::api::signal::CoordinateInput;

    use super::{BoundingBoxInput, ListingFilterInput};

    #[test]
    fn rejects_swapped_corners() {
        let sw = CoordinateInput {
            lat: 36.62,
            lng: 126.26,
        };
        let ne = CoordinateInput {
            lat: 36.94,
            lng: 126.64,
        };

        assert!(BoundingBoxInput { sw, ne }.into_bounding_box().is_ok());
        assert_eq!(
            BoundingBoxInput { sw: ne, ne: sw }
                .into_bounding_box()
                .unwrap_err()
                .code,
            "INVALID_BOUNDING_BOX",
        );
    }

    #[test]
    fn filter_defaults_to_geocoded_only() {
        let filter = Filter::from(ListingFilterInput {
            keyword: Some("  ".into()),
            ..ListingFilterInput::default()
        });

        assert!(filter.only_with_coordinates);
        assert!(filter.keyword.is_none());
    }
}

//! [`Cluster`] read model definitions.

use std::{cmp::Ordering, collections::BTreeMap};

use crate::domain::{
    geo::Coordinate,
    place::Category,
    region::{self, Level},
    Listing,
};

/// Aggregate of [`Listing`]s sharing a region at one administrative
/// [`Level`].
///
/// Recomputed on every request, so it has no identity across calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    /// [`region::Code`] of this [`Cluster`], unique within its [`Level`].
    pub code: region::Code,

    /// Display name of this [`Cluster`].
    pub name: region::Name,

    /// Administrative [`Level`] of this [`Cluster`].
    pub level: Level,

    /// Mean [`Coordinate`] of the members, if any of them is geocoded.
    pub centroid: Option<Coordinate>,

    /// Number of [`Listing`]s in this [`Cluster`].
    pub count: u32,

    /// [`region::Code`] of the parent [`Cluster`], set for
    /// [`Level::Subdistrict`] ones only.
    pub parent: Option<region::Code>,
}

impl Cluster {
    /// Groups the provided [`Listing`]s by their region at the provided
    /// [`Level`] into [`Cluster`]s in a deterministic order: the most
    /// populated first, then by name, then by code.
    pub fn group<'l>(
        listings: impl IntoIterator<Item = &'l Listing>,
        level: Level,
    ) -> Vec<Self> {
        let mut groups = BTreeMap::<&region::Code, Group<'l>>::new();
        for l in listings {
            let division = l.region.at(level);
            let group = groups.entry(&division.code).or_insert_with(|| Group {
                name: &division.name,
                parent: &l.region.district.code,
                coordinates: Vec::new(),
                count: 0,
            });
            group.count += 1;
            group.coordinates.extend(l.coordinate);
        }

        let mut clusters = groups
            .into_iter()
            .map(|(code, g)| Self {
                code: code.clone(),
                name: g.name.clone(),
                level,
                centroid: Coordinate::centroid(g.coordinates),
                count: g.count,
                parent: match level {
                    Level::ProvinceDistrict => None,
                    Level::Subdistrict => Some(g.parent.clone()),
                },
            })
            .collect::<Vec<_>>();
        clusters.sort_by(Self::display_order);
        clusters
    }

    /// Orders [`Cluster`]s by count descending, then by name and code.
    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.code.cmp(&b.code))
    }
}

/// [`Cluster`] being accumulated.
struct Group<'l> {
    /// Name of the region.
    name: &'l region::Name,

    /// District code of the first member.
    parent: &'l region::Code,

    /// Known member [`Coordinate`]s.
    coordinates: Vec<Coordinate>,

    /// Number of members.
    count: u32,
}

/// Number of places of a [`Category`] found around a sub-district.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CategoryCount {
    /// Counted [`Category`].
    pub category: Category,

    /// Number of places found.
    pub total: u32,
}

/// Category breakdown of a single sub-district.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Breakdown {
    /// Places found per [`Category`].
    pub counts: Vec<CategoryCount>,

    /// Preview of the [`Listing`]s located in the sub-district.
    pub listings: Vec<Listing>,

    /// Indicator whether some of the underlying searches failed.
    pub degraded: bool,
}

//! Administrative region definitions.

use std::str::FromStr;

use common::define_kind;
use derive_more::{AsRef, Display};

#[cfg(doc)]
use super::Listing;

/// Administrative placement of a [`Listing`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    /// Province ("sido") the [`Listing`] belongs to, if known.
    pub province: Option<Division>,

    /// District ("si/gun/gu") the [`Listing`] belongs to.
    pub district: Division,

    /// Sub-district ("eup/myeon/dong") the [`Listing`] belongs to.
    pub subdistrict: Division,
}

impl Region {
    /// Returns the display label of this [`Region`] used for region-keyed
    /// heuristics and preference matching: the sub-district name.
    #[must_use]
    pub fn label(&self) -> &Name {
        &self.subdistrict.name
    }

    /// Returns the [`Division`] of this [`Region`] at the provided [`Level`].
    #[must_use]
    pub fn at(&self, level: Level) -> &Division {
        match level {
            Level::ProvinceDistrict => &self.district,
            Level::Subdistrict => &self.subdistrict,
        }
    }
}

/// Single administrative division: its [`Code`] and [`Name`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Division {
    /// [`Code`] of this [`Division`].
    pub code: Code,

    /// [`Name`] of this [`Division`].
    pub name: Name,
}

/// Hierarchical administrative code of a region (unique within its [`Level`]).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Code(String);

impl Code {
    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Returns this [`Code`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        !code.is_empty()
            && code.len() <= 16
            && code.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `region::Code`")
    }
}

/// Display name of a region.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Returns this [`Name`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `region::Name`")
    }
}

define_kind! {
    #[doc = "Administrative level a region cluster is aggregated at."]
    enum Level {
        #[doc = "District (\"sig\"): si, gun or gu inside a province."]
        ProvinceDistrict = 1,

        #[doc = "Sub-district (\"emd\"): eup, myeon or dong inside a district."]
        Subdistrict = 2,
    }
}

/// Selector of [`Listing`]s by their region [`Code`] at some [`Level`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Selector {
    /// [`Code`] to select by.
    pub code: Code,

    /// [`Level`] the [`Code`] belongs to.
    pub level: Level,
}

impl Selector {
    /// Indicates whether the provided [`Region`] is selected by this
    /// [`Selector`].
    #[must_use]
    pub fn matches(&self, region: &Region) -> bool {
        region.at(self.level).code == self.code
    }
}

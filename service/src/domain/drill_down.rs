//! [`DrillDown`] state machine definitions.

use std::mem;

use common::define_kind;
use derive_more::{Display, Error};

use crate::read::cluster::{Breakdown, Cluster};

use super::region::Level;

/// Region-to-category drill-down on the map.
///
/// Every step carries exactly the data loaded for it and the steps before it,
/// so a [`Step::Category`] without a selected sub-district is unrepresentable.
#[derive(Clone, Debug, PartialEq)]
pub enum DrillDown {
    /// Districts are listed.
    District {
        /// Listed district [`Cluster`]s.
        districts: Vec<Cluster>,
    },

    /// Sub-districts of the selected district are listed.
    Subdistrict {
        /// District [`Cluster`]s listed on the previous step.
        districts: Vec<Cluster>,

        /// Selected district [`Cluster`].
        district: Cluster,

        /// Listed sub-district [`Cluster`]s.
        subdistricts: Vec<Cluster>,
    },

    /// Category [`Breakdown`] of the selected sub-district is shown.
    Category {
        /// District [`Cluster`]s listed on the first step.
        districts: Vec<Cluster>,

        /// Selected district [`Cluster`].
        district: Cluster,

        /// Sub-district [`Cluster`]s listed on the previous step.
        subdistricts: Vec<Cluster>,

        /// Selected sub-district [`Cluster`].
        subdistrict: Cluster,

        /// [`Breakdown`] of the selected sub-district.
        breakdown: Breakdown,
    },
}

impl Default for DrillDown {
    fn default() -> Self {
        Self::District {
            districts: Vec::new(),
        }
    }
}

impl DrillDown {
    /// Starts a new [`DrillDown`] at the [`Step::District`] with the provided
    /// district [`Cluster`]s.
    #[must_use]
    pub const fn start(districts: Vec<Cluster>) -> Self {
        Self::District { districts }
    }

    /// Returns the current [`Step`] of this [`DrillDown`].
    #[must_use]
    pub const fn step(&self) -> Step {
        match self {
            Self::District { .. } => Step::District,
            Self::Subdistrict { .. } => Step::Subdistrict,
            Self::Category { .. } => Step::Category,
        }
    }

    /// Selects the provided district [`Cluster`] listed on the
    /// [`Step::District`], moving to the [`Step::Subdistrict`] with the
    /// provided sub-district [`Cluster`]s.
    ///
    /// # Errors
    ///
    /// If this [`DrillDown`] is not at the [`Step::District`], or the
    /// `district` isn't one of the listed ones.
    pub fn select_district(
        &mut self,
        district: Cluster,
        subdistricts: Vec<Cluster>,
    ) -> Result<(), TransitionError> {
        let Self::District { districts } = self else {
            return Err(TransitionError::WrongStep(self.step()));
        };
        if district.level != Level::ProvinceDistrict
            || !districts.iter().any(|d| d.code == district.code)
        {
            return Err(TransitionError::UnknownCluster);
        }

        *self = Self::Subdistrict {
            districts: mem::take(districts),
            district,
            subdistricts,
        };
        Ok(())
    }

    /// Selects the provided sub-district [`Cluster`] listed on the
    /// [`Step::Subdistrict`], moving to the [`Step::Category`] with the
    /// provided [`Breakdown`].
    ///
    /// # Errors
    ///
    /// If this [`DrillDown`] is not at the [`Step::Subdistrict`], or the
    /// `subdistrict` isn't one of the listed ones.
    pub fn select_subdistrict(
        &mut self,
        subdistrict: Cluster,
        breakdown: Breakdown,
    ) -> Result<(), TransitionError> {
        let Self::Subdistrict {
            districts,
            district,
            subdistricts,
        } = self
        else {
            return Err(TransitionError::WrongStep(self.step()));
        };
        if subdistrict.parent.as_ref() != Some(&district.code)
            || !subdistricts.iter().any(|s| s.code == subdistrict.code)
        {
            return Err(TransitionError::UnknownCluster);
        }

        *self = Self::Category {
            districts: mem::take(districts),
            district: district.clone(),
            subdistricts: mem::take(subdistricts),
            subdistrict,
            breakdown,
        };
        Ok(())
    }

    /// Goes one [`Step`] back, discarding everything loaded for the current
    /// one.
    ///
    /// # Errors
    ///
    /// If this [`DrillDown`] is already at the [`Step::District`].
    pub fn back(&mut self) -> Result<(), TransitionError> {
        let previous = match mem::take(self) {
            s @ Self::District { .. } => {
                *self = s;
                return Err(TransitionError::WrongStep(Step::District));
            }
            Self::Subdistrict { districts, .. } => Self::District { districts },
            Self::Category {
                districts,
                district,
                subdistricts,
                ..
            } => Self::Subdistrict {
                districts,
                district,
                subdistricts,
            },
        };
        *self = previous;
        Ok(())
    }
}

define_kind! {
    #[doc = "Step of a [`DrillDown`]."]
    enum Step {
        #[doc = "Districts are listed."]
        District = 1,

        #[doc = "Sub-districts of a district are listed."]
        Subdistrict = 2,

        #[doc = "Categories of a sub-district are shown."]
        Category = 3,
    }
}

/// Error of a [`DrillDown`] transition.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum TransitionError {
    /// Transition is not allowed from the current [`Step`].
    #[display("transition is not allowed at `{_0}` step")]
    WrongStep(#[error(not(source))] Step),

    /// Selected [`Cluster`] is not listed on the current [`Step`].
    #[display("selected cluster is not listed on the current step")]
    UnknownCluster,
}

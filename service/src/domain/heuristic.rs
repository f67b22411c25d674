//! Region-keyed heuristics.

use std::fmt;

use common::Score;

/// Source of region-level demand heuristics, keyed by region display name.
///
/// Implementations must never fail: an unknown region resolves into a
/// documented default.
pub trait RegionHeuristics: fmt::Debug + Send + Sync {
    /// Returns the foot traffic heuristic of the named region.
    fn foot_traffic(&self, region: &str) -> Score;

    /// Returns the youth density heuristic of the named region.
    fn youth(&self, region: &str) -> Score;
}

/// [`RegionHeuristics`] backed by a static lookup table.
#[derive(Clone, Copy, Debug)]
pub struct StaticTable {
    /// `(region, foot traffic, youth)` rows.
    rows: &'static [(&'static str, u8, u8)],

    /// Value returned for regions missing in the rows.
    default: Score,
}

impl StaticTable {
    /// Seosan sub-district estimates.
    const SEOSAN: &'static [(&'static str, u8, u8)] = &[
        ("부춘동", 80, 65),
        ("동문1동", 75, 70),
        ("동문2동", 68, 62),
        ("수석동", 60, 58),
        ("석남동", 65, 60),
        ("해미읍", 50, 45),
    ];

    /// Creates a new [`StaticTable`] out of the provided `rows`, falling back
    /// to the provided `default` for unknown regions.
    #[must_use]
    pub const fn new(
        rows: &'static [(&'static str, u8, u8)],
        default: Score,
    ) -> Self {
        Self { rows, default }
    }

    /// Looks up the row of the named region.
    fn row(&self, region: &str) -> Option<(u8, u8)> {
        self.rows
            .iter()
            .find(|(name, ..)| *name == region)
            .map(|&(_, foot, youth)| (foot, youth))
    }
}

impl Default for StaticTable {
    fn default() -> Self {
        Self {
            rows: Self::SEOSAN,
            default: Score::saturating(55),
        }
    }
}

impl RegionHeuristics for StaticTable {
    fn foot_traffic(&self, region: &str) -> Score {
        self.row(region)
            .and_then(|(foot, _)| Score::new(foot))
            .unwrap_or(self.default)
    }

    fn youth(&self, region: &str) -> Score {
        self.row(region)
            .and_then(|(_, youth)| Score::new(youth))
            .unwrap_or(self.default)
    }
}

//! Market signal calculations.
//!
//! Every function here is pure: it turns already collected places-search
//! results and listing attributes into normalized [`Score`]s.

use common::{Money, Score};
use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use super::{
    listing::Area,
    place::{Category, Keyword, Page},
};

/// Maximum number of nearest [`Place`]s contributing to a [`decay_sum`].
///
/// [`Place`]: super::place::Place
pub const DECAY_WINDOW: usize = 30;

/// Maps the total number of competing places around a point into a
/// [`Score`], where a higher [`Score`] means a less saturated market.
///
/// Upper bounds of the bands are inclusive.
#[must_use]
pub fn competition_score(total: u32) -> Score {
    let score = match total {
        0..=5 => 85,
        6..=20 => 70,
        21..=50 => 55,
        51..=120 => 40,
        _ => 25,
    };
    Score::saturating(score)
}

/// Computes the rent index of a unit: its monthly rent per square meter
/// rescaled from `2..=6` manwon into `20..=90`.
///
/// Higher rent per area yields a higher index. Returns [`Score::NEUTRAL`] if
/// either the `rent` or the `area` is unknown or zero.
#[must_use]
pub fn rent_index(rent: Option<Money>, area: Option<Area>) -> Score {
    let (Some(rent), Some(area)) = (rent, area) else {
        return Score::NEUTRAL;
    };
    let rent = rent.in_manwon();
    if rent <= Decimal::ZERO {
        return Score::NEUTRAL;
    }

    let per_area = rent / area.m2().max(Decimal::from(20));
    let clamped = per_area.clamp(Decimal::from(2), Decimal::from(6));
    let index =
        (clamped - Decimal::from(2)) / Decimal::from(4) * Decimal::from(70)
            + Decimal::from(20);
    Score::saturating(round(index))
}

/// Sums the `1/sqrt(rank + 1)` weights of the first [`DECAY_WINDOW`] places of
/// the provided distance-sorted [`Page`].
///
/// Closer places contribute more, so the sum saturates smoothly even when the
/// provider truncates the result list.
#[must_use]
pub fn decay_sum(page: &Page) -> f64 {
    (1..=u32::MAX)
        .zip(page.items.iter().take(DECAY_WINDOW))
        .map(|(rank, _)| 1.0 / f64::from(rank).sqrt())
        .sum()
}

/// Rounds the provided [`Decimal`] to the nearest integer, halves away from
/// zero.
pub(crate) fn round(d: Decimal) -> i64 {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Competition signal measured around a single point.
#[derive(Clone, Debug, PartialEq)]
pub struct CompetitionSignal {
    /// Total number of places found per searched [`Keyword`].
    pub by_keyword: Vec<(Keyword, u32)>,

    /// Total number of places found per [`Category`] of
    /// [`CompetitionSignal::CATEGORIES`].
    pub by_category: Vec<(Category, u32)>,

    /// Sum of the per-[`Keyword`] totals.
    pub total: u32,

    /// [`competition_score`] of the [`CompetitionSignal::total`].
    pub competition: Score,

    /// [`rent_index`] of the unit the signal is measured for.
    pub rent_index: Score,

    /// Foot traffic heuristic of the region the point belongs to.
    pub foot_traffic: Score,

    /// Youth density heuristic of the region the point belongs to.
    pub youth: Score,

    /// Indicator whether some of the underlying searches failed, so the
    /// totals may be understated.
    pub degraded: bool,
}

impl CompetitionSignal {
    /// [`Category`]s always measured along with the keywords.
    pub const CATEGORIES: [Category; 3] =
        [Category::Cafe, Category::Restaurant, Category::Convenience];
}

/// Distance-decayed density indices measured around a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityIndex {
    /// Total number of cafes nearby.
    pub cafes: u32,

    /// Total number of restaurants nearby.
    pub restaurants: u32,

    /// Total number of convenience stores nearby.
    pub convenience_stores: u32,

    /// Competition index in `0.0..=1.0`, driven by restaurants and cafes.
    pub competition: f64,

    /// Attractiveness index in `0.0..=1.0`, driven by cafes and convenience
    /// stores.
    pub attractiveness: f64,

    /// Indicator whether some of the underlying searches failed.
    pub degraded: bool,
}

impl DensityIndex {
    /// Decayed density at which the competition index saturates.
    const COMPETITION_THRESHOLD: f64 = 15.0;

    /// Decayed density at which the attractiveness index saturates.
    const ATTRACTIVENESS_THRESHOLD: f64 = 12.0;

    /// Computes a [`DensityIndex`] out of the cafe, restaurant and convenience
    /// store [`Page`]s found around a point.
    #[must_use]
    pub fn new(cafes: &Page, restaurants: &Page, convenience: &Page) -> Self {
        let cafe = decay_sum(cafes);
        let food = decay_sum(restaurants);
        let cvs = decay_sum(convenience);

        let competition = food + 0.7 * cafe;
        let attractiveness = 0.6 * cafe + 0.4 * cvs;

        Self {
            cafes: cafes.total,
            restaurants: restaurants.total,
            convenience_stores: convenience.total,
            competition: (competition / Self::COMPETITION_THRESHOLD).min(1.0),
            attractiveness: (attractiveness / Self::ATTRACTIVENESS_THRESHOLD)
                .min(1.0),
            degraded: false,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Money, Score};
    use rust_decimal::Decimal;

    use crate::domain::{
        geo::Coordinate,
        listing::Area,
        place::{Page, Place},
    };

    use super::{competition_score, decay_sum, rent_index, DensityIndex};

    fn area(m2: i64) -> Option<Area> {
        Area::new(Decimal::from(m2))
    }

    fn page(n: u32) -> Page {
        Page {
            total: n,
            items: (0..n)
                .map(|i| Place {
                    name: format!("place {i}"),
                    category_name: "음식점".into(),
                    coordinate: Coordinate::new(36.78, 126.45).unwrap(),
                    distance: Some(i * 10),
                })
                .collect(),
        }
    }

    #[test]
    fn competition_score_bands() {
        for (total, expected) in [
            (0, 85),
            (3, 85),
            (5, 85),
            (6, 70),
            (20, 70),
            (21, 55),
            (50, 55),
            (51, 40),
            (120, 40),
            (121, 25),
            (1000, 25),
        ] {
            assert_eq!(
                competition_score(total).get(),
                expected,
                "total: {total}",
            );
        }
    }

    #[test]
    fn competition_score_is_non_increasing() {
        let mut prev = competition_score(0);
        for total in 1..=500 {
            let next = competition_score(total);
            assert!(next <= prev, "total: {total}");
            prev = next;
        }
    }

    #[test]
    fn rent_index_is_neutral_without_inputs() {
        assert_eq!(rent_index(Some(Money::manwon(0)), area(50)), Score::NEUTRAL);
        assert_eq!(rent_index(None, area(50)), Score::NEUTRAL);
        assert_eq!(rent_index(Some(Money::manwon(120)), None), Score::NEUTRAL);
    }

    #[test]
    fn rent_index_clamps_per_area_rent() {
        // 300 / 30 = 10, clamped to 6.
        assert_eq!(rent_index(Some(Money::manwon(300)), area(30)).get(), 90);
        // 20 / max(10, 20) = 1, clamped to 2.
        assert_eq!(rent_index(Some(Money::manwon(20)), area(10)).get(), 20);
        // 160 / 40 = 4, right in the middle.
        assert_eq!(rent_index(Some(Money::manwon(160)), area(40)).get(), 55);
    }

    #[test]
    fn rent_index_stays_in_range() {
        for rent in [1, 7, 45, 99, 150, 333, 1_000, 50_000] {
            for m2 in [1, 13, 20, 33, 66, 100, 1_000] {
                let idx = rent_index(Some(Money::manwon(rent)), area(m2)).get();
                assert!((20..=90).contains(&idx), "rent: {rent}, area: {m2}");
            }
        }
    }

    #[test]
    fn decay_sum_is_bounded_by_window() {
        assert!(decay_sum(&Page::empty()).abs() < f64::EPSILON);
        assert!((decay_sum(&page(1)) - 1.0).abs() < 1e-9);
        assert!((decay_sum(&page(30)) - decay_sum(&page(45))).abs() < 1e-9);
        assert!(decay_sum(&page(29)) < decay_sum(&page(30)));
    }

    #[test]
    fn density_index_saturates() {
        let empty = DensityIndex::new(&Page::empty(), &Page::empty(), &page(0));
        assert!(empty.competition.abs() < f64::EPSILON);
        assert!(empty.attractiveness.abs() < f64::EPSILON);

        let dense = DensityIndex::new(&page(30), &page(30), &page(30));
        assert!((dense.competition - 1.0).abs() < f64::EPSILON);
        assert!(dense.attractiveness <= 1.0);
        assert_eq!(dense.cafes, 30);
    }
}

//! [`Query`] for recommending [`Listing`]s to a [`Profile`].

use std::convert::Infallible;

use futures::future;
use rust_decimal::Decimal;
use smart_default::SmartDefault;

use crate::{
    domain::{
        place::Keyword,
        signal::{round, CompetitionSignal},
        Listing, Profile,
    },
    Service,
};

use super::{Competition, Query};

/// [`Recommend`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Maximum number of recommended [`Listing`]s.
    #[default = 4]
    pub limit: usize,

    /// Business categories assumed when a [`Profile`] desires none.
    #[default(Keyword::default_categories())]
    pub categories: Vec<Keyword>,
}

/// [`Query`] for ranking candidate [`Listing`]s against a [`Profile`].
///
/// Listings scoring equally keep their candidate order.
#[derive(Clone, Debug)]
pub struct Recommend {
    /// [`Profile`] to rank for.
    pub profile: Profile,

    /// Candidate [`Listing`]s.
    pub candidates: Vec<Listing>,
}

/// Result of a [`Recommend`] [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Best [`Scored`] [`Listing`]s, highest first.
    pub listings: Vec<Scored>,

    /// Business categories the recommendation is made for.
    pub categories: Vec<Keyword>,

    /// Human-readable remarks on how the scores were obtained.
    pub reasons: Vec<&'static str>,

    /// Indicator whether some of the competition measurements failed.
    pub degraded: bool,
}

/// [`Listing`] along with its recommendation score.
#[derive(Clone, Debug, PartialEq)]
pub struct Scored {
    /// Scored [`Listing`].
    pub listing: Listing,

    /// Weighted score of the [`Listing`], within `0..=400`.
    pub score: u16,

    /// [`CompetitionSignal`] measured at the [`Listing`].
    pub signal: CompetitionSignal,
}

impl Output {
    /// Remarks attached to every recommendation.
    pub const REASONS: [&'static str; 2] = [
        "주변 경쟁도/임대/유동/청년 지표를 반영했습니다.",
        "Kakao 장소검색 기반 근사치이므로 참고용으로 활용하세요.",
    ];
}

impl<Db, Pl, Gc> Query<Recommend> for Service<Db, Pl, Gc>
where
    Self: Query<Competition, Ok = CompetitionSignal, Err = Infallible>,
{
    type Ok = Output;
    type Err = Infallible;

    async fn execute(
        &self,
        Recommend {
            profile,
            candidates,
        }: Recommend,
    ) -> Result<Self::Ok, Self::Err> {
        let config = &self.config().recommend;
        let categories = profile.categories(&config.categories);

        let preferred = candidates
            .into_iter()
            .filter(|l| profile.preferred_regions.contains(l.region.label()))
            .collect::<Vec<_>>();

        let signals = future::join_all(preferred.iter().map(|l| {
            self.execute(Competition {
                center: l.coordinate,
                keywords: None,
                radius: None,
                region: Some(l.region.label().clone()),
                rent: l.rent(),
                area: l.area,
            })
        }))
        .await;

        let mut degraded = false;
        let mut listings = preferred
            .into_iter()
            .zip(signals)
            .map(|(listing, signal)| {
                let signal = signal.unwrap_or_else(|e| match e {});
                degraded |= signal.degraded;
                Scored {
                    score: score(&profile, &signal),
                    listing,
                    signal,
                }
            })
            .collect::<Vec<_>>();
        listings.sort_by(|a, b| b.score.cmp(&a.score));
        listings.truncate(config.limit);

        Ok(Output {
            listings,
            categories,
            reasons: Output::REASONS.to_vec(),
            degraded,
        })
    }
}

/// Computes the weighted score of the provided [`CompetitionSignal`] for the
/// provided [`Profile`].
///
/// Rent counts against the score: the pricier the unit, the lower it ranks
/// for rent-sensitive [`Profile`]s.
fn score(profile: &Profile, signal: &CompetitionSignal) -> u16 {
    let w = profile.weights;
    let sum: Decimal = [
        w.competition_tolerance.apply(signal.competition),
        w.rent_sensitivity.apply(signal.rent_index.inverse()),
        w.foot_traffic.apply(signal.foot_traffic),
        w.youth_preference.apply(signal.youth),
    ]
    .into_iter()
    .sum();
    u16::try_from(round(sum)).unwrap_or_default()
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            listing::{Area, Deal},
            place::{Keyword, Target},
            profile::{Weight, Weights},
            region, Listing, Profile,
        },
        infra::Memory,
        query::spec::{service, Nowhere, Scripted, Unreachable},
        read::cluster::spec::listing,
        Config, Query as _, Service,
    };

    use super::{Output, Recommend};

    fn candidate(id: &str, subdistrict: &str, at: (f64, f64)) -> Listing {
        listing(
            id,
            ("44210", "서산시"),
            ("4421051000", subdistrict),
            Some(at),
        )
    }

    fn profile(regions: &[&str]) -> Profile {
        Profile {
            preferred_regions: regions
                .iter()
                .map(|r| region::Name::new(*r).unwrap())
                .collect::<BTreeSet<_>>(),
            ..Profile::default()
        }
    }

    #[tokio::test]
    async fn filters_by_preferred_regions() {
        let svc = service([], Unreachable);

        let out = svc
            .execute(Recommend {
                profile: profile(&["부춘동"]),
                candidates: vec![
                    candidate("1", "부춘동", (36.78, 126.45)),
                    candidate("2", "해미읍", (36.71, 126.55)),
                    candidate("3", "부춘동", (36.77, 126.44)),
                ],
            })
            .await
            .unwrap();

        let ids = out
            .listings
            .iter()
            .map(|s| s.listing.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(out.reasons, Output::REASONS);
        assert!(out.degraded);
    }

    #[tokio::test]
    async fn scores_with_default_weights() {
        let svc = service([], Unreachable);

        let out = svc
            .execute(Recommend {
                profile: profile(&["부춘동"]),
                candidates: vec![candidate("1", "부춘동", (36.78, 126.45))],
            })
            .await
            .unwrap();

        // Competition 85, rent 100 - 50, foot traffic 80 and youth 65, each
        // weighted by 3/5.
        assert_eq!(out.listings[0].score, 168);
    }

    #[tokio::test]
    async fn ranks_by_weighted_score() {
        let places =
            Scripted::default().with(Target::Keyword(kw("카페")), 200);
        let svc = service([], places);

        let mut unplaced = candidate("unplaced", "부춘동", (36.78, 126.45));
        unplaced.coordinate = None;
        let mut pricey = candidate("pricey", "부춘동", (36.78, 126.45));
        pricey.deal = Deal::Monthly {
            deposit: Money::manwon(1000),
            rent: Money::manwon(300),
        };
        pricey.area = Area::new(Decimal::from(30));
        let cheap = candidate("cheap", "부춘동", (36.78, 126.45));

        let out = svc
            .execute(Recommend {
                profile: Profile {
                    weights: Weights {
                        rent_sensitivity: Weight::MAX,
                        ..Weights::default()
                    },
                    ..profile(&["부춘동"])
                },
                candidates: vec![pricey, cheap, unplaced],
            })
            .await
            .unwrap();

        let ids = out
            .listings
            .iter()
            .map(|s| s.listing.id.to_string())
            .collect::<Vec<_>>();
        // A listing with no coordinate is never searched around, so it meets
        // no competition at all.
        assert_eq!(ids, ["unplaced", "cheap", "pricey"]);
        assert_eq!(
            out.listings.iter().map(|s| s.score).collect::<Vec<_>>(),
            [188, 152, 112],
        );
        assert_eq!(out.listings[0].signal.total, 0);
        assert!(out.listings[0].signal.degraded);
        assert_eq!(out.listings[2].signal.total, 200);
        assert_eq!(out.listings[2].signal.rent_index.get(), 90);
        assert!(out.degraded);
    }

    #[tokio::test]
    async fn caps_the_result() {
        let svc = service([], Unreachable);
        let candidates = (0..10)
            .map(|i| candidate(&i.to_string(), "동문1동", (36.78, 126.45)))
            .collect();

        let out = svc
            .execute(Recommend {
                profile: profile(&["동문1동"]),
                candidates,
            })
            .await
            .unwrap();

        assert_eq!(out.listings.len(), 4);
        let ids = out
            .listings
            .iter()
            .map(|s| s.listing.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["0", "1", "2", "3"]);
    }

    #[tokio::test]
    async fn respects_configured_limit_and_categories() {
        let mut config = Config::default();
        config.recommend.limit = 2;
        config.recommend.categories = vec![kw("분식")];
        let svc = Service::new(config, Memory::new([]), Unreachable, Nowhere);
        let candidates = (0..5)
            .map(|i| candidate(&i.to_string(), "동문1동", (36.78, 126.45)))
            .collect();

        let out = svc
            .execute(Recommend {
                profile: profile(&["동문1동"]),
                candidates,
            })
            .await
            .unwrap();

        let ids = out
            .listings
            .iter()
            .map(|s| s.listing.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["0", "1"]);
        assert_eq!(out.categories, [kw("분식")]);
    }

    #[tokio::test]
    async fn empty_without_preferred_regions() {
        let svc = service([], Unreachable);

        let out = svc
            .execute(Recommend {
                profile: Profile {
                    desired_categories: vec![kw("치킨"), kw("치킨"), kw("카페")],
                    ..profile(&[])
                },
                candidates: vec![candidate("1", "부춘동", (36.78, 126.45))],
            })
            .await
            .unwrap();

        assert!(out.listings.is_empty());
        assert_eq!(out.categories, [kw("치킨"), kw("카페")]);
        assert_eq!(out.reasons.len(), 2);
    }

    #[tokio::test]
    async fn defaults_categories() {
        let svc = service([], Unreachable);

        let out = svc
            .execute(Recommend {
                profile: profile(&["부춘동"]),
                candidates: vec![],
            })
            .await
            .unwrap();

        assert_eq!(out.categories, Keyword::default_categories());
    }

    fn kw(k: &str) -> Keyword {
        Keyword::new(k).unwrap()
    }
}

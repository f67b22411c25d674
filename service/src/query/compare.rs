//! [`Query`] for comparing two regions.

use std::{convert::Infallible, fmt};

use common::Score;
use futures::future;
use rust_decimal::Decimal;
use tracing as log;

use crate::{
    domain::{
        geo::Coordinate,
        region,
        signal::{rent_index, round, CompetitionSignal},
        Listing,
    },
    Service,
};

use super::{listing, Competition, Query};

/// [`Query`] for comparing market [`Indices`] of two regions by their names.
#[derive(Clone, Debug)]
pub struct Compare {
    /// Name of the first region.
    pub a: region::Name,

    /// Name of the second region.
    pub b: region::Name,
}

/// Result of a [`Compare`] [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// [`Indices`] of the first region.
    pub a: Indices,

    /// [`Indices`] of the second region.
    pub b: Indices,

    /// Human-readable summary of both [`Indices`].
    pub summary: String,

    /// Indicator whether the stored listings couldn't be loaded or some of the
    /// competition measurements failed.
    pub degraded: bool,
}

/// Market indices of a single region.
#[derive(Clone, Debug, PartialEq)]
pub struct Indices {
    /// Name of the region.
    pub name: region::Name,

    /// Foot traffic heuristic.
    pub foot_traffic: Score,

    /// Mean rent index of the region's monthly leased [`Listing`]s.
    pub rent_index: Score,

    /// Competition score at the region's centroid.
    pub competition: Score,

    /// Youth density heuristic.
    pub youth: Score,

    /// [`Basis`] of the rent index and competition values.
    pub basis: Basis,
}

/// What [`Indices`] are based on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Basis {
    /// Stored [`Listing`]s and places searched around their centroid.
    Measured,

    /// Placeholders derived from the region name only, for regions with no
    /// geocoded [`Listing`]s.
    Synthetic,
}

impl fmt::Display for Indices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}는 유동 {}, 임대 {}, 경쟁 {}, 청년 {}",
            self.name,
            self.foot_traffic.get(),
            self.rent_index.get(),
            self.competition.get(),
            self.youth.get(),
        )
    }
}

impl<Db, Pl, Gc> Query<Compare> for Service<Db, Pl, Gc>
where
    Self: Query<listing::All, Ok = Vec<Listing>>
        + Query<Competition, Ok = CompetitionSignal, Err = Infallible>,
    <Self as Query<listing::All>>::Err: fmt::Display,
{
    type Ok = Output;
    type Err = Infallible;

    async fn execute(
        &self,
        Compare { a, b }: Compare,
    ) -> Result<Self::Ok, Self::Err> {
        let (listings, store_failed) =
            match self.execute(listing::All::by(())).await {
                Ok(l) => (l, false),
                Err(e) => {
                    log::warn!(
                        "failed to load listings to compare regions: {e}",
                    );
                    (Vec::new(), true)
                }
            };

        let ((a, a_degraded), (b, b_degraded)) = future::join(
            indices(self, a, &listings),
            indices(self, b, &listings),
        )
        .await;

        Ok(Output {
            summary: format!("{a} / {b} 입니다."),
            a,
            b,
            degraded: store_failed || a_degraded || b_degraded,
        })
    }
}

/// Computes [`Indices`] of the named region out of the provided [`Listing`]s,
/// along with an indicator whether the competition measurement degraded.
async fn indices<Db, Pl, Gc>(
    service: &Service<Db, Pl, Gc>,
    name: region::Name,
    listings: &[Listing],
) -> (Indices, bool)
where
    Service<Db, Pl, Gc>:
        Query<Competition, Ok = CompetitionSignal, Err = Infallible>,
{
    let heuristics = service.heuristics();
    let foot_traffic = heuristics.foot_traffic(name.as_str());
    let youth = heuristics.youth(name.as_str());

    let members = listings
        .iter()
        .filter(|l| {
            l.region.subdistrict.name == name || l.region.district.name == name
        })
        .collect::<Vec<_>>();
    let Some(centroid) =
        Coordinate::centroid(members.iter().filter_map(|l| l.coordinate))
    else {
        let (rent_index, competition) = synthetic(&name);
        return (
            Indices {
                name,
                foot_traffic,
                rent_index,
                competition,
                youth,
                basis: Basis::Synthetic,
            },
            false,
        );
    };

    let rents = members
        .iter()
        .filter(|l| l.rent().is_some())
        .map(|l| Decimal::from(rent_index(l.rent(), l.area).get()))
        .collect::<Vec<_>>();
    let rent_index = if rents.is_empty() {
        Score::NEUTRAL
    } else {
        Score::saturating(round(
            rents.iter().sum::<Decimal>() / Decimal::from(rents.len()),
        ))
    };

    let signal = service
        .execute(Competition {
            center: Some(centroid),
            region: Some(name.clone()),
            ..Competition::default()
        })
        .await
        .unwrap_or_else(|e| match e {});

    (
        Indices {
            name,
            foot_traffic,
            rent_index,
            competition: signal.competition,
            youth,
            basis: Basis::Measured,
        },
        signal.degraded,
    )
}

/// Derives stable placeholder rent index and competition values out of the
/// provided region name.
fn synthetic(name: &region::Name) -> (Score, Score) {
    let first = name.as_str().encode_utf16().next().unwrap_or_default();
    let len = name.as_str().encode_utf16().count();
    (
        Score::saturating(60 + i64::from(first % 20)),
        Score::saturating(30 + i64::try_from(len * 3 % 50).unwrap_or_default()),
    )
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            listing::{Area, Deal},
            place::{Keyword, Target},
            region,
        },
        query::spec::{broken, service, Scripted, Unreachable},
        read::cluster::spec::listing,
        Query as _,
    };

    use super::{Basis, Compare};

    fn compare(a: &str, b: &str) -> Compare {
        Compare {
            a: region::Name::new(a).unwrap(),
            b: region::Name::new(b).unwrap(),
        }
    }

    #[tokio::test]
    async fn synthetic_for_unknown_regions() {
        let svc = service([], Unreachable);

        let out = svc.execute(compare("부춘동", "해미읍")).await.unwrap();

        assert_eq!(out.a.basis, Basis::Synthetic);
        assert_eq!(out.a.foot_traffic.get(), 80);
        assert_eq!(out.a.rent_index.get(), 72);
        assert_eq!(out.a.competition.get(), 39);
        assert_eq!(out.b.rent_index.get(), 64);
        assert_eq!(
            out.summary,
            "부춘동는 유동 80, 임대 72, 경쟁 39, 청년 65 / \
             해미읍는 유동 50, 임대 64, 경쟁 39, 청년 45 입니다.",
        );
        assert!(!out.degraded);
    }

    #[tokio::test]
    async fn is_deterministic() {
        let svc = service([], Unreachable);

        let first = svc.execute(compare("동문1동", "수석동")).await.unwrap();
        let second = svc.execute(compare("동문1동", "수석동")).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn measures_stored_regions() {
        let mut pricey = listing(
            "1",
            ("44210", "서산시"),
            ("4421051000", "부춘동"),
            Some((36.78, 126.45)),
        );
        pricey.deal = Deal::Monthly {
            deposit: Money::manwon(1000),
            rent: Money::manwon(300),
        };
        pricey.area = Area::new(Decimal::from(30));
        let mut sale = listing(
            "2",
            ("44210", "서산시"),
            ("4421051000", "부춘동"),
            Some((36.76, 126.43)),
        );
        sale.deal = Deal::Sale {
            price: Money::manwon(50_000),
        };
        let cheap =
            listing("3", ("44210", "서산시"), ("4421051000", "부춘동"), None);
        let places = Scripted::default()
            .with(Target::Keyword(Keyword::new("카페").unwrap()), 12);
        let svc = service([pricey, sale, cheap], places);

        let out = svc.execute(compare("부춘동", "해미읍")).await.unwrap();

        assert_eq!(out.a.basis, Basis::Measured);
        assert_eq!(out.a.rent_index.get(), 70);
        assert_eq!(out.a.competition.get(), 70);
        assert_eq!(out.a.foot_traffic.get(), 80);
        assert_eq!(out.b.basis, Basis::Synthetic);
        assert!(!out.degraded);
    }

    #[tokio::test]
    async fn synthetic_when_store_fails() {
        let svc = broken(Unreachable);

        let out = svc.execute(compare("부춘동", "해미읍")).await.unwrap();

        assert_eq!(out.a.basis, Basis::Synthetic);
        assert_eq!(out.b.basis, Basis::Synthetic);
        assert!(out.degraded);
    }
}

//! [`Query`] for estimating revenue and break-even point of a business.

use std::convert::Infallible;

use common::{Money, Score};
use rust_decimal::Decimal;

use crate::{
    domain::{listing::Area, place::Keyword, region, signal::round},
    Service,
};

use super::Query;

/// [`Query`] for a rough monthly revenue and break-even estimation of a
/// business opened in some region.
///
/// All the amounts are in manwon per month. The break-even point assumes a
/// flat 25% of variable costs on top of the cost of goods sold, so it's an
/// approximation only.
#[derive(Clone, Debug, Default)]
pub struct Simulate {
    /// Name of the region the business is opened in.
    pub region: Option<region::Name>,

    /// Floor [`Area`] of the unit, 50m² if [`None`].
    pub area: Option<Area>,

    /// Share of the cost of goods sold in sales, 0.33 if [`None`].
    ///
    /// Clamped into `0..=1`.
    pub cogs_rate: Option<Decimal>,

    /// Monthly rent, 200 if [`None`].
    pub rent: Option<Money>,

    /// Monthly labor costs, 300 if [`None`].
    pub labor: Option<Money>,

    /// Other monthly fixed costs, 100 if [`None`].
    pub misc: Option<Money>,

    /// Business category, [`Keyword::cafe()`] if [`None`].
    pub category: Option<Keyword>,
}

/// Result of a [`Simulate`] [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Foot traffic heuristic of the region.
    pub foot_traffic: Score,

    /// Estimated monthly sales.
    pub estimated_sales: Money,

    /// Sales minus the cost of goods sold.
    pub gross_profit: Money,

    /// Sum of rent, labor and other fixed costs.
    pub fixed_costs: Money,

    /// Gross profit minus fixed costs.
    pub operating_profit: Money,

    /// Monthly sales needed to cover the fixed costs.
    pub bep_sales: Money,

    /// Business category the estimation is made for.
    pub recommended_category: Keyword,
}

impl<Db, Pl, Gc> Query<Simulate> for Service<Db, Pl, Gc> {
    type Ok = Output;
    type Err = Infallible;

    async fn execute(
        &self,
        query: Simulate,
    ) -> Result<Self::Ok, Self::Err> {
        let Simulate {
            region,
            area,
            cogs_rate,
            rent,
            labor,
            misc,
            category,
        } = query;

        let foot_traffic = self
            .heuristics()
            .foot_traffic(region.as_ref().map_or("", region::Name::as_str));
        let area = area.map_or(Decimal::from(50), Area::m2);
        let cogs_rate = cogs_rate
            .unwrap_or(Decimal::new(33, 2))
            .clamp(Decimal::ZERO, Decimal::ONE);

        let sales = round(
            Decimal::from(1200)
                + Decimal::from(foot_traffic.get()) * Decimal::TEN
                + area * Decimal::from(3),
        )
        .max(800);
        let gross = round(Decimal::from(sales) * (Decimal::ONE - cogs_rate));
        let fixed = round(
            [(rent, 200), (labor, 300), (misc, 100)]
                .into_iter()
                .map(|(cost, default)| {
                    cost.map_or(Decimal::from(default), Money::in_manwon)
                })
                .sum(),
        );
        let margin = (Decimal::ONE - cogs_rate - Decimal::new(25, 2))
            .max(Decimal::new(5, 2));
        let bep = round(Decimal::from(fixed) / margin);

        Ok(Output {
            foot_traffic,
            estimated_sales: Money::manwon(sales),
            gross_profit: Money::manwon(gross),
            fixed_costs: Money::manwon(fixed),
            operating_profit: Money::manwon(gross - fixed),
            bep_sales: Money::manwon(bep),
            recommended_category: category.unwrap_or_else(Keyword::cafe),
        })
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        domain::{listing::Area, place::Keyword, region},
        query::spec::{service, Unreachable},
        Query as _,
    };

    use super::Simulate;

    #[tokio::test]
    async fn applies_defaults() {
        let svc = service([], Unreachable);

        let out = svc.execute(Simulate::default()).await.unwrap();

        assert_eq!(out.foot_traffic.get(), 55);
        assert_eq!(out.estimated_sales, Money::manwon(1900));
        assert_eq!(out.gross_profit, Money::manwon(1273));
        assert_eq!(out.fixed_costs, Money::manwon(600));
        assert_eq!(out.operating_profit, Money::manwon(673));
        assert_eq!(out.bep_sales, Money::manwon(1429));
        assert_eq!(out.recommended_category.as_str(), "카페");
    }

    #[tokio::test]
    async fn uses_region_foot_traffic() {
        let svc = service([], Unreachable);

        let out = svc
            .execute(Simulate {
                region: region::Name::new("부춘동"),
                area: Area::new(Decimal::from(33)),
                rent: Some(Money::manwon(150)),
                labor: Some(Money::manwon(0)),
                category: Keyword::new("치킨"),
                ..Simulate::default()
            })
            .await
            .unwrap();

        assert_eq!(out.estimated_sales, Money::manwon(2099));
        assert_eq!(out.fixed_costs, Money::manwon(250));
        assert_eq!(out.recommended_category.as_str(), "치킨");
    }

    #[tokio::test]
    async fn floors_bep_margin() {
        let svc = service([], Unreachable);

        let out = svc
            .execute(Simulate {
                cogs_rate: Some(Decimal::new(9, 1)),
                ..Simulate::default()
            })
            .await
            .unwrap();

        assert_eq!(out.bep_sales, Money::manwon(12_000));
        assert_eq!(out.gross_profit, Money::manwon(190));
        assert_eq!(out.operating_profit, Money::manwon(-410));
    }

    #[tokio::test]
    async fn sales_never_below_floor() {
        let svc = service([], Unreachable);

        let out = svc
            .execute(Simulate {
                area: Area::new(Decimal::new(1, 2)),
                ..Simulate::default()
            })
            .await
            .unwrap();

        assert!(out.estimated_sales.in_manwon() >= Decimal::from(800));
        assert_eq!(out.estimated_sales, Money::manwon(1750));
    }
}

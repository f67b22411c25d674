//! [`Listing`]-related definitions.

use common::Money;
use derive_more::From;
use juniper::{graphql_object, GraphQLEnum};
use rust_decimal::prelude::ToPrimitive as _;
use service::domain::{self, listing::Deal};

use crate::{api, api::scalar, Context};

/// A commercial unit offered for lease or sale.
#[derive(Clone, Debug, From)]
pub struct Listing(domain::Listing);

/// A commercial unit offered for lease or sale.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> String {
        self.0.id.to_string()
    }

    /// Title of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn title(&self) -> String {
        self.0.title.to_string()
    }

    /// Free-text address of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn address(&self) -> String {
        self.0.address.to_string()
    }

    /// Code of the district this `Listing` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.districtCode",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn district_code(&self) -> scalar::RegionCode {
        self.0.region.district.code.clone().into()
    }

    /// Name of the district this `Listing` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.district",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn district(&self) -> scalar::RegionName {
        self.0.region.district.name.clone().into()
    }

    /// Code of the sub-district this `Listing` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.subdistrictCode",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn subdistrict_code(&self) -> scalar::RegionCode {
        self.0.region.subdistrict.code.clone().into()
    }

    /// Name of the sub-district this `Listing` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.subdistrict",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn subdistrict(&self) -> scalar::RegionName {
        self.0.region.subdistrict.name.clone().into()
    }

    /// Trade type of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.tradeType",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn trade_type(&self) -> TradeType {
        self.0.trade_type().into()
    }

    /// Sale price of this `Listing`, if it's for sale.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn price(&self) -> Option<Money> {
        match self.0.deal {
            Deal::Sale { price } => Some(price),
            Deal::Jeonse { .. } | Deal::Monthly { .. } => None,
        }
    }

    /// Lease deposit of this `Listing`, if it's leased.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.deposit",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn deposit(&self) -> Option<Money> {
        match self.0.deal {
            Deal::Jeonse { deposit } | Deal::Monthly { deposit, .. } => {
                Some(deposit)
            }
            Deal::Sale { .. } => None,
        }
    }

    /// Monthly rent of this `Listing`, if it's leased monthly.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.rent",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn rent(&self) -> Option<Money> {
        self.0.rent()
    }

    /// Monthly maintenance fee of this `Listing`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.maintenanceFee",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn maintenance_fee(&self) -> Option<Money> {
        self.0.maintenance_fee
    }

    /// Floor area of this `Listing` in square meters, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.area",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn area(&self) -> Option<f64> {
        self.0.area.and_then(|a| a.m2().to_f64())
    }

    /// Latitude of this `Listing`, if it's geocoded.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.lat",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn lat(&self) -> Option<f64> {
        self.0.coordinate.map(domain::geo::Coordinate::lat)
    }

    /// Longitude of this `Listing`, if it's geocoded.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.lng",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn lng(&self) -> Option<f64> {
        self.0.coordinate.map(domain::geo::Coordinate::lng)
    }

    /// Category and theme tags of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.tags",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn tags(&self) -> Vec<String> {
        self.0.tags.iter().map(ToString::to_string).collect()
    }
}

/// Trade type of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingTradeType")]
pub enum TradeType {
    /// Outright sale.
    Sale,

    /// Long-term lease secured by a single deposit.
    Jeonse,

    /// Lease with a deposit and monthly rent.
    Monthly,
}

impl From<domain::listing::TradeType> for TradeType {
    fn from(kind: domain::listing::TradeType) -> Self {
        use domain::listing::TradeType as T;

        match kind {
            T::Sale => Self::Sale,
            T::Jeonse => Self::Jeonse,
            T::Monthly => Self::Monthly,
        }
    }
}

//! JSON file [`Database`] implementation.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use common::{
    operations::{By, Select},
    Money,
};
use derive_more::{Display, Error as StdError, From};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        geo::Coordinate,
        listing::{Area, Deal, Tag, TradeType},
        region, Listing, Region,
    },
    infra::{database, Database},
};

/// [`Database`] reading [`Listing`]s from a JSON file.
///
/// The file is re-read on every query, so edits made by the CRUD layer are
/// picked up without a restart.
#[derive(Clone, Debug)]
pub struct JsonFile {
    /// Path to the JSON file.
    path: Arc<Path>,
}

impl JsonFile {
    /// Creates a new [`JsonFile`] reading from the provided `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into().into(),
        }
    }

    /// Loads all the valid [`Listing`]s from the file.
    ///
    /// A missing file is treated as an empty one. Records failing validation
    /// are skipped.
    async fn load(&self) -> Result<Vec<Listing>, Traced<database::Error>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("`{}` doesn't exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .map_err(tracerr::from_and_wrap!(=> Error))
                    .map_err(tracerr::map_from);
            }
        };

        let records = serde_json::from_slice::<Vec<Record>>(&bytes)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(records
            .into_iter()
            .filter_map(|r| {
                let id = r.id.clone();
                Listing::try_from(r)
                    .inspect_err(|e| {
                        log::warn!("skipping invalid listing `{id}`: {e}");
                    })
                    .ok()
            })
            .collect())
    }
}

impl Database<Select<By<Vec<Listing>, ()>>> for JsonFile {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Listing>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.load().await.map_err(tracerr::wrap!())
    }
}

impl Database<Select<By<Vec<Listing>, region::Selector>>> for JsonFile {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, region::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let mut listings = self.load().await.map_err(tracerr::wrap!())?;
        listings.retain(|l| selector.matches(&l.region));
        Ok(listings)
    }
}

/// [`JsonFile`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read the file.
    #[display("Failed to read listings file: {_0}")]
    Io(std::io::Error),

    /// Failed to decode the file contents.
    #[display("Failed to decode listings file: {_0}")]
    Decode(serde_json::Error),
}

/// Stored representation of a [`Listing`].
///
/// Prices are in manwon, the area is in square meters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Record {
    id: String,
    title: String,
    address: String,
    region: RegionRecord,
    trade_type: String,
    #[serde(default)]
    sale_price: Option<Decimal>,
    #[serde(default)]
    deposit: Option<Decimal>,
    #[serde(default)]
    rent: Option<Decimal>,
    #[serde(default)]
    maintenance_fee: Option<Decimal>,
    #[serde(default)]
    area: Option<Decimal>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    theme: Vec<String>,
}

/// Stored representation of a [`Region`].
#[derive(Debug, Deserialize)]
struct RegionRecord {
    #[serde(default)]
    province: Option<DivisionRecord>,
    district: DivisionRecord,
    subdistrict: DivisionRecord,
}

/// Stored representation of a [`region::Division`].
#[derive(Debug, Deserialize)]
struct DivisionRecord {
    code: String,
    name: String,
}

impl TryFrom<DivisionRecord> for region::Division {
    type Error = &'static str;

    fn try_from(r: DivisionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            code: r.code.parse()?,
            name: r.name.parse()?,
        })
    }
}

impl TryFrom<Record> for Listing {
    type Error = &'static str;

    fn try_from(r: Record) -> Result<Self, Self::Error> {
        let trade_type = r
            .trade_type
            .parse::<TradeType>()
            .map_err(|_| "invalid trade type")?;
        let deal = match trade_type {
            TradeType::Sale => Deal::Sale {
                price: Money::manwon(r.sale_price.ok_or("missing sale price")?),
            },
            TradeType::Jeonse => Deal::Jeonse {
                deposit: Money::manwon(r.deposit.ok_or("missing deposit")?),
            },
            TradeType::Monthly => Deal::Monthly {
                deposit: Money::manwon(r.deposit.unwrap_or_default()),
                rent: Money::manwon(r.rent.ok_or("missing monthly rent")?),
            },
        };

        // Zero coordinates are how the upload tooling marks missing ones.
        let coordinate = match (r.lat, r.lng) {
            (Some(lat), Some(lng))
                if lat.abs() > f64::EPSILON && lng.abs() > f64::EPSILON =>
            {
                Some(Coordinate::new(lat, lng).ok_or("invalid coordinate")?)
            }
            _ => None,
        };

        Ok(Self {
            id: r.id.parse()?,
            title: r.title.parse()?,
            address: r.address.parse()?,
            region: Region {
                province: r.region.province.map(TryInto::try_into).transpose()?,
                district: r.region.district.try_into()?,
                subdistrict: r.region.subdistrict.try_into()?,
            },
            deal,
            maintenance_fee: r
                .maintenance_fee
                .filter(|f| !f.is_zero())
                .map(Money::manwon),
            area: r.area.and_then(Area::new),
            coordinate,
            tags: r.theme.into_iter().filter_map(Tag::new).collect(),
        })
    }
}

//! [Kakao Local] REST API client.
//!
//! [Kakao Local]: https://developers.kakao.com/docs/latest/ko/local/dev-guide

use std::time::Duration;

use common::operations::{By, Search, Select};
use derive_more::{Display, Error as StdError, From};
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Deserialize};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        geo::{Coordinate, Geocoded, Provider},
        listing::Address,
        place::{self, Page, Place, Target},
    },
    infra::{geocoder, places, Geocoder, Places},
};

/// [`Kakao`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// REST API key.
    ///
    /// Every call is skipped as failed if it's not set.
    pub rest_key: Option<SecretString>,

    /// Base URL of the API.
    #[default("https://dapi.kakao.com".into())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(Duration::from_secs(3))]
    pub timeout: Duration,

    /// Number of places requested per keyword search page.
    #[default(15)]
    pub keyword_page_size: u8,
}

/// [Kakao Local] REST API client.
///
/// [Kakao Local]: https://developers.kakao.com/docs/latest/ko/local/dev-guide
#[derive(Clone, Debug)]
pub struct Kakao {
    /// HTTP client.
    client: reqwest::Client,

    /// [`Config`] of this [`Kakao`] client.
    config: Config,
}

impl Kakao {
    /// Maximum search radius accepted by the API, in meters.
    const MAX_RADIUS: u32 = 20_000;

    /// Maximum page size accepted by the API.
    const MAX_PAGE_SIZE: u8 = 15;

    /// Creates a new [`Kakao`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to initialize the HTTP client.
    pub fn new(config: Config) -> Result<Self, Traced<Error>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!())?;
        Ok(Self { client, config })
    }

    /// Performs a `GET` request to the provided API `path` with the provided
    /// `query` parameters.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Traced<Error>> {
        let key = self
            .config
            .rest_key
            .as_ref()
            .ok_or(Error::MissingCredential)
            .map_err(tracerr::wrap!())?;

        self.client
            .get(format!("{}/v2/local{path}", self.config.base_url))
            .header(AUTHORIZATION, format!("KakaoAK {}", key.expose_secret()))
            .query(query)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!())?
            .json::<T>()
            .await
            .map_err(tracerr::from_and_wrap!())
    }
}

impl Places<Search<By<Page, place::Request>>> for Kakao {
    type Ok = Page;
    type Err = Traced<places::Error>;

    async fn execute(
        &self,
        Search(by): Search<By<Page, place::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        let place::Request {
            target,
            center,
            radius,
        } = by.into_inner();

        let mut query = vec![
            ("x", center.lng().to_string()),
            ("y", center.lat().to_string()),
            ("radius", radius.meters().min(Self::MAX_RADIUS).to_string()),
            ("sort", "distance".to_owned()),
        ];
        let path = match &target {
            Target::Category(c) => {
                query.push(("category_group_code", c.code().to_owned()));
                "/search/category.json"
            }
            Target::Keyword(k) => {
                query.push(("query", k.as_str().to_owned()));
                query.push((
                    "size",
                    self.config
                        .keyword_page_size
                        .clamp(1, Self::MAX_PAGE_SIZE)
                        .to_string(),
                ));
                "/search/keyword.json"
            }
        };

        let resp = self
            .get::<Response<PlaceDocument>>(path, &query)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        let items = resp
            .documents
            .into_iter()
            .filter_map(PlaceDocument::into_place)
            .collect::<Vec<_>>();
        log::debug!(
            "Kakao `{path}` search found {} places ({} on page)",
            resp.meta.total_count,
            items.len(),
        );
        Ok(Page {
            total: resp.meta.total_count,
            items,
        })
    }
}

impl Geocoder<Select<By<Option<Geocoded>, Address>>> for Kakao {
    type Ok = Option<Geocoded>;
    type Err = Traced<geocoder::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Geocoded>, Address>>,
    ) -> Result<Self::Ok, Self::Err> {
        let address = by.into_inner();

        let resp = self
            .get::<Response<AddressDocument>>(
                "/search/address.json",
                &[("query", address.as_str().to_owned())],
            )
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        Ok(resp
            .documents
            .into_iter()
            .next()
            .and_then(|d| parse_coordinate(&d.y, &d.x))
            .map(|coordinate| Geocoded {
                coordinate,
                provider: Provider::Kakao,
            }))
    }
}

/// [`Kakao`] client error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// REST API key is not configured.
    #[display("Kakao REST API key is not configured")]
    MissingCredential,

    /// HTTP request failed or returned a non-success status.
    #[display("Kakao request failed: {_0}")]
    #[from]
    Request(reqwest::Error),
}

/// Parses a [`Coordinate`] out of the API's stringified `lat` and `lng`.
fn parse_coordinate(lat: &str, lng: &str) -> Option<Coordinate> {
    Coordinate::new(lat.parse().ok()?, lng.parse().ok()?)
}

/// Response of a search API.
#[derive(Debug, Deserialize)]
struct Response<D> {
    /// Search metadata.
    meta: Meta,

    /// Found documents.
    #[serde(default = "Vec::new")]
    documents: Vec<D>,
}

/// Metadata of a [`Response`].
#[derive(Debug, Deserialize)]
struct Meta {
    /// Total number of documents matching the search.
    #[serde(default)]
    total_count: u32,
}

/// Place found by a category or keyword search.
#[derive(Debug, Deserialize)]
struct PlaceDocument {
    place_name: String,
    #[serde(default)]
    category_name: String,
    x: String,
    y: String,
    #[serde(default)]
    distance: String,
}

impl PlaceDocument {
    /// Converts this [`PlaceDocument`] into a [`Place`], if its coordinate is
    /// valid.
    fn into_place(self) -> Option<Place> {
        Some(Place {
            coordinate: parse_coordinate(&self.y, &self.x)?,
            distance: self.distance.parse().ok(),
            name: self.place_name,
            category_name: self.category_name,
        })
    }
}

/// Address found by an address search.
#[derive(Debug, Deserialize)]
struct AddressDocument {
    x: String,
    y: String,
}

//! [Naver Cloud Maps] geocoding client.
//!
//! [Naver Cloud Maps]: https://api.ncloud-docs.com/docs/en/ai-naver-mapsgeocoding

use std::time::Duration;

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    domain::{
        geo::{Coordinate, Geocoded, Provider},
        listing::Address,
    },
    infra::{geocoder, Geocoder},
};

/// [`Naver`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// API gateway client ID.
    pub client_id: Option<SecretString>,

    /// API gateway client secret.
    pub client_secret: Option<SecretString>,

    /// URL of the geocoding endpoint.
    #[default(
        "https://naveropenapi.apigw.ntruss.com/map-geocode/v2/geocode".into()
    )]
    pub url: String,

    /// Timeout of a single request.
    #[default(Duration::from_secs(3))]
    pub timeout: Duration,
}

/// [Naver Cloud Maps] geocoding client.
///
/// [Naver Cloud Maps]: https://api.ncloud-docs.com/docs/en/ai-naver-mapsgeocoding
#[derive(Clone, Debug)]
pub struct Naver {
    /// HTTP client.
    client: reqwest::Client,

    /// [`Config`] of this [`Naver`] client.
    config: Config,
}

impl Naver {
    /// Creates a new [`Naver`] client with the provided [`Config`].
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
}

impl Geocoder<Select<By<Option<Geocoded>, Address>>> for Naver {
    type Ok = Option<Geocoded>;
    type Err = Traced<geocoder::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Geocoded>, Address>>,
    ) -> Result<Self::Ok, Self::Err> {
        let address = by.into_inner();

        let (Some(id), Some(secret)) =
            (&self.config.client_id, &self.config.client_secret)
        else {
            return Err(tracerr::new!(Error::MissingCredential))
                .map_err(tracerr::map_from_and_wrap!());
        };

        let resp = self
            .client
            .get(&self.config.url)
            .header("X-NCP-APIGW-API-KEY-ID", id.expose_secret())
            .header("X-NCP-APIGW-API-KEY", secret.expose_secret())
            .query(&[("query", address.as_str())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .json::<Response>()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(resp
            .addresses
            .into_iter()
            .next()
            .and_then(|a| Coordinate::new(a.y.parse().ok()?, a.x.parse().ok()?))
            .map(|coordinate| Geocoded {
                coordinate,
                provider: Provider::Naver,
            }))
    }
}

/// [`Naver`] client error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Client ID or secret is not configured.
    #[display("Naver API gateway credentials are not configured")]
    MissingCredential,

    /// HTTP request failed or returned a non-success status.
    #[display("Naver request failed: {_0}")]
    #[from]
    Request(reqwest::Error),
}

/// Response of the geocoding API.
#[derive(Debug, Deserialize)]
struct Response {
    /// Found addresses, best match first.
    #[serde(default)]
    addresses: Vec<AddressDocument>,
}

/// Address found by the geocoding API.
#[derive(Debug, Deserialize)]
struct AddressDocument {
    x: String,
    y: String,
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{domain::listing::Address, infra::Geocoder as _};

    use super::{Config, Naver, Response};

    #[test]
    fn decodes_response() {
        let resp = serde_json::from_str::<Response>(
            r#"{
                "status": "OK",
                "addresses": [
                    {"roadAddress": "충청남도 서산시 ...", "x": "126.45", "y": "36.78"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(resp.addresses.len(), 1);
        assert_eq!(resp.addresses[0].y, "36.78");
    }

    #[tokio::test]
    async fn fails_without_credentials() {
        let naver = Naver::new(Config::default()).unwrap();

        let res = naver
            .execute(Select(By::new(
                Address::new("충남 서산시 부춘동 100").unwrap(),
            )))
            .await;
        assert!(res.is_err());
    }
}

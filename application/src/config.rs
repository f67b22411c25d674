//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use service::domain::{
    geo::{BoundingBox, Coordinate, Radius},
    place::Keyword,
};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: Server,

    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Kakao Local configuration.
    #[serde(default)]
    pub kakao: Kakao,

    /// Naver Cloud Maps configuration.
    #[serde(default)]
    pub naver: Naver,

    /// Listing store configuration.
    #[serde(default)]
    pub store: Store,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Recommendation configuration.
    pub recommend: Recommend,

    /// Competition measurement configuration.
    pub competition: Competition,

    /// Region drill-down configuration.
    pub clusters: Clusters,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            recommend,
            competition,
            clusters,
        } = value;
        let defaults = Self::default();

        Self {
            recommend: service::query::recommend::Config {
                limit: recommend.limit,
                categories: keywords(recommend.categories)
                    .unwrap_or(defaults.recommend.categories),
            },
            competition: service::query::competition::Config {
                radius: Radius::new(competition.radius)
                    .unwrap_or(defaults.competition.radius),
                keywords: keywords(competition.keywords)
                    .unwrap_or(defaults.competition.keywords),
            },
            clusters: service::query::cluster::Config {
                service_area: clusters
                    .service_area
                    .and_then(Area::into_bounding_box)
                    .unwrap_or(defaults.clusters.service_area),
                category_radius: Radius::new(clusters.category_radius)
                    .unwrap_or(defaults.clusters.category_radius),
                preview_limit: clusters.preview_limit,
            },
        }
    }
}

/// Parses the provided `keywords`, returning [`None`] if none of them is
/// valid.
fn keywords(keywords: Vec<String>) -> Option<Vec<Keyword>> {
    let parsed = keywords
        .into_iter()
        .filter_map(Keyword::new)
        .collect::<Vec<_>>();
    (!parsed.is_empty()).then_some(parsed)
}

/// Recommendation configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Recommend {
    /// Maximum number of recommended listings.
    #[default(4)]
    pub limit: usize,

    /// Business categories assumed when a profile desires none.
    #[default(Keyword::DEFAULT_CATEGORIES.map(str::to_owned).to_vec())]
    pub categories: Vec<String>,
}

/// Competition measurement configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Competition {
    /// Radius to measure within, in meters.
    #[default(700)]
    pub radius: u32,

    /// Keywords of competing businesses.
    #[default(Keyword::DEFAULT_CATEGORIES.map(str::to_owned).to_vec())]
    pub keywords: Vec<String>,
}

/// Region drill-down configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Clusters {
    /// Area covered by the district step when no viewport is provided.
    ///
    /// Seosan is covered if not set.
    pub service_area: Option<Area>,

    /// Radius places are counted within by the category step, in meters.
    #[default(800)]
    pub category_radius: u32,

    /// Maximum number of listings previewed by the category step.
    #[default(20)]
    pub preview_limit: usize,
}

/// Rectangular area given by its south-west and north-east corners.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Area {
    /// Latitude of the south-west corner.
    pub sw_lat: f64,

    /// Longitude of the south-west corner.
    pub sw_lng: f64,

    /// Latitude of the north-east corner.
    pub ne_lat: f64,

    /// Longitude of the north-east corner.
    pub ne_lng: f64,
}

impl Area {
    /// Converts this [`Area`] into a [`BoundingBox`], if it's a valid one.
    #[must_use]
    pub fn into_bounding_box(self) -> Option<BoundingBox> {
        BoundingBox::new(
            Coordinate::new(self.sw_lat, self.sw_lng)?,
            Coordinate::new(self.ne_lat, self.ne_lng)?,
        )
    }
}

/// Kakao Local configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Kakao {
    /// REST API key.
    ///
    /// Places are never found and nothing is geocoded by Kakao without it.
    pub rest_key: Option<SecretString>,

    /// Base URL of the API.
    #[default("https://dapi.kakao.com".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(3))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,

    /// Number of places requested per keyword search page.
    #[default(15)]
    pub keyword_page_size: u8,
}

impl From<Kakao> for service::infra::kakao::Config {
    fn from(value: Kakao) -> Self {
        let Kakao {
            rest_key,
            base_url,
            timeout,
            keyword_page_size,
        } = value;

        Self {
            rest_key,
            base_url,
            timeout,
            keyword_page_size,
        }
    }
}

/// Naver Cloud Maps configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Naver {
    /// API gateway client ID.
    pub client_id: Option<SecretString>,

    /// API gateway client secret.
    pub client_secret: Option<SecretString>,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(3))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Naver> for service::infra::naver::Config {
    fn from(value: Naver) -> Self {
        let Naver {
            client_id,
            client_secret,
            timeout,
        } = value;

        Self {
            client_id,
            client_secret,
            timeout,
            ..Self::default()
        }
    }
}

/// Listing store configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Store {
    /// Path to the JSON file with listings.
    #[default("listings.json".to_owned())]
    pub path: String,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Area, Clusters, Competition, Config, Service};

    #[test]
    fn defaults_match_service() {
        let config = service::Config::from(Config::default().service);
        let defaults = service::Config::default();

        assert_eq!(config.recommend.limit, defaults.recommend.limit);
        assert_eq!(config.recommend.categories, defaults.recommend.categories);
        assert_eq!(config.competition.radius, defaults.competition.radius);
        assert_eq!(
            config.competition.keywords,
            defaults.competition.keywords,
        );
        assert_eq!(
            config.clusters.service_area,
            defaults.clusters.service_area,
        );
        assert_eq!(
            config.clusters.category_radius,
            defaults.clusters.category_radius,
        );
    }

    #[test]
    fn ignores_invalid_values() {
        let config = service::Config::from(Service {
            competition: Competition {
                radius: 0,
                keywords: vec![" ".to_owned()],
            },
            clusters: Clusters {
                service_area: Some(Area {
                    sw_lat: 37.0,
                    sw_lng: 127.0,
                    ne_lat: 36.0,
                    ne_lng: 126.0,
                }),
                ..Clusters::default()
            },
            ..Service::default()
        });
        let defaults = service::Config::default();

        assert_eq!(config.competition.radius, defaults.competition.radius);
        assert_eq!(
            config.competition.keywords,
            defaults.competition.keywords,
        );
        assert_eq!(
            config.clusters.service_area,
            defaults.clusters.service_area,
        );
    }
}

//! [`Geocoder`] definitions.

use std::{convert::Infallible, fmt};

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use tracing as log;

use crate::domain::{geo::Geocoded, listing::Address};

#[cfg(feature = "kakao")]
use super::kakao;
#[cfg(feature = "naver")]
use super::naver;

/// Geocoding provider operation.
pub use common::Handler as Geocoder;

/// [`Geocoder`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "kakao")]
    /// Kakao Local error.
    Kakao(kakao::Error),

    #[cfg(feature = "naver")]
    /// Naver Cloud Maps error.
    Naver(naver::Error),
}

/// [`Geocoder`] trying the `primary` one first and the `secondary` one if the
/// `primary` fails or finds nothing.
///
/// Never fails itself: resolves into [`None`] if both of them fail.
#[derive(Clone, Debug)]
pub struct Fallback<P, S> {
    /// [`Geocoder`] tried first.
    primary: P,

    /// [`Geocoder`] tried when the `primary` one gives up.
    secondary: S,
}

impl<P, S> Fallback<P, S> {
    /// Creates a new [`Fallback`] out of the provided [`Geocoder`]s.
    #[must_use]
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P, S> Geocoder<Select<By<Option<Geocoded>, Address>>> for Fallback<P, S>
where
    P: Geocoder<Select<By<Option<Geocoded>, Address>>, Ok = Option<Geocoded>>,
    P::Err: fmt::Display,
    S: Geocoder<Select<By<Option<Geocoded>, Address>>, Ok = Option<Geocoded>>,
    S::Err: fmt::Display,
{
    type Ok = Option<Geocoded>;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Geocoded>, Address>>,
    ) -> Result<Self::Ok, Self::Err> {
        let address = by.into_inner();

        match self.primary.execute(Select(By::new(address.clone()))).await {
            Ok(Some(found)) => return Ok(Some(found)),
            Ok(None) => {
                log::debug!("primary geocoder found nothing for `{address}`");
            }
            Err(e) => {
                log::warn!("primary geocoder failed for `{address}`: {e}");
            }
        }

        match self.secondary.execute(Select(By::new(address.clone()))).await {
            Ok(found) => Ok(found),
            Err(e) => {
                log::warn!("secondary geocoder failed for `{address}`: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::{
        convert::Infallible,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use common::operations::{By, Select};

    use crate::domain::{
        geo::{Coordinate, Geocoded, Provider},
        listing::Address,
    };

    use super::{Fallback, Geocoder};

    /// [`Geocoder`] answering with a fixed result and counting its calls.
    #[derive(Debug)]
    pub(crate) struct Fixed {
        pub(crate) result: Result<Option<Geocoded>, &'static str>,
        pub(crate) calls: AtomicUsize,
    }

    impl Fixed {
        pub(crate) fn new(result: Result<Option<Geocoded>, &'static str>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Geocoder<Select<By<Option<Geocoded>, Address>>> for Fixed {
        type Ok = Option<Geocoded>;
        type Err = &'static str;

        async fn execute(
            &self,
            _: Select<By<Option<Geocoded>, Address>>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
        }
    }

    /// Creates a [`Geocoded`] result of the provided [`Provider`].
    pub(crate) fn geocoded(provider: Provider) -> Geocoded {
        Geocoded {
            coordinate: Coordinate::new(36.78, 126.45).unwrap(),
            provider,
        }
    }

    async fn geocode<G>(geocoder: &G) -> Option<Geocoded>
    where
        G: Geocoder<
            Select<By<Option<Geocoded>, Address>>,
            Ok = Option<Geocoded>,
            Err = Infallible,
        >,
    {
        let address = Address::new("충남 서산시 부춘동 100").unwrap();
        match geocoder.execute(Select(By::new(address))).await {
            Ok(found) => found,
            Err(e) => match e {},
        }
    }

    #[tokio::test]
    async fn prefers_primary() {
        let fallback = Fallback::new(
            Fixed::new(Ok(Some(geocoded(Provider::Kakao)))),
            Fixed::new(Ok(Some(geocoded(Provider::Naver)))),
        );

        let found = geocode(&fallback).await.unwrap();
        assert_eq!(found.provider, Provider::Kakao);
        assert_eq!(fallback.secondary.calls(), 0);
    }

    #[tokio::test]
    async fn falls_back_on_miss_or_failure() {
        for primary in [Ok(None), Err("unauthorized")] {
            let fallback = Fallback::new(
                Fixed::new(primary),
                Fixed::new(Ok(Some(geocoded(Provider::Naver)))),
            );

            let found = geocode(&fallback).await.unwrap();
            assert_eq!(found.provider, Provider::Naver);
        }
    }

    #[tokio::test]
    async fn resolves_into_none_when_both_fail() {
        let fallback =
            Fallback::new(Fixed::new(Err("timeout")), Fixed::new(Err("5xx")));

        assert_eq!(geocode(&fallback).await, None);
        assert_eq!(fallback.primary.calls(), 1);
        assert_eq!(fallback.secondary.calls(), 1);
    }
}

//! [`Command`] for geocoding a [`Listing`].

use common::operations::{By, Select};
use tracing as log;

use crate::{
    domain::{geo::Geocoded, listing::Address, Listing},
    infra::Geocoder,
    Service,
};

use super::Command;

/// [`Command`] for resolving a [`Coordinate`] of a [`Listing`] by its
/// [`Address`].
///
/// The geocoded [`Listing`] is returned rather than stored: persisting it is
/// up to the caller.
///
/// [`Coordinate`]: crate::domain::geo::Coordinate
#[derive(Clone, Debug)]
pub struct GeocodeListing(pub Listing);

impl<Db, Pl, Gc> Command<GeocodeListing> for Service<Db, Pl, Gc>
where
    Gc: Geocoder<Select<By<Option<Geocoded>, Address>>, Ok = Option<Geocoded>>,
{
    type Ok = Listing;
    type Err = Gc::Err;

    async fn execute(
        &self,
        GeocodeListing(mut listing): GeocodeListing,
    ) -> Result<Self::Ok, Self::Err> {
        if listing.coordinate.is_some() {
            return Ok(listing);
        }

        let found = self
            .geocoder()
            .execute(Select(By::new(listing.address.clone())))
            .await?;
        if let Some(Geocoded {
            coordinate,
            provider,
        }) = found
        {
            log::debug!(
                "`Listing(id: {})` geocoded by {provider} at {coordinate}",
                listing.id,
            );
            listing.coordinate = Some(coordinate);
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            geo::{Coordinate, Provider},
            Listing,
        },
        infra::{
            geocoder::spec::{geocoded, Fixed},
            Memory,
        },
        read::cluster::spec::listing,
        Command as _, Config, Service,
    };

    use super::GeocodeListing;

    fn ungeocoded() -> Listing {
        listing("1", ("44210", "서산시"), ("4421051000", "부춘동"), None)
    }

    fn service(geocoder: Fixed) -> Service<Memory, (), Fixed> {
        Service::new(Config::default(), Memory::new([]), (), geocoder)
    }

    #[tokio::test]
    async fn resolves_missing_coordinate() {
        let svc = service(Fixed::new(Ok(Some(geocoded(Provider::Kakao)))));

        let geocoded = svc.execute(GeocodeListing(ungeocoded())).await.unwrap();

        assert!(geocoded.coordinate.is_some());
        assert_eq!(geocoded.id, ungeocoded().id);
        assert_eq!(svc.geocoder().calls(), 1);
    }

    #[tokio::test]
    async fn keeps_existing_coordinate() {
        let svc = service(Fixed::new(Ok(Some(geocoded(Provider::Naver)))));
        let mut located = ungeocoded();
        located.coordinate = Coordinate::new(36.78, 126.45);

        let same = svc.execute(GeocodeListing(located.clone())).await.unwrap();

        assert_eq!(same, located);
        assert_eq!(svc.geocoder().calls(), 0);
    }

    #[tokio::test]
    async fn leaves_unresolved_listing_as_is() {
        let svc = service(Fixed::new(Ok(None)));

        let same = svc.execute(GeocodeListing(ungeocoded())).await.unwrap();

        assert_eq!(same, ungeocoded());
    }

    #[tokio::test]
    async fn propagates_geocoder_failure() {
        let svc = service(Fixed::new(Err("unauthorized")));

        assert!(svc.execute(GeocodeListing(ungeocoded())).await.is_err());
    }
}

//! Geographic definitions.

use common::define_kind;
use derive_more::Display;

/// WGS84 coordinate of a point.
///
/// Both latitude and longitude are always present: a partially known position
/// is not representable.
#[derive(Clone, Copy, Debug, Display, PartialEq)]
#[display("({lat}, {lng})")]
pub struct Coordinate {
    /// Latitude in degrees.
    lat: f64,

    /// Longitude in degrees.
    lng: f64,
}

impl Coordinate {
    /// Creates a new [`Coordinate`] if the provided `lat` and `lng` are finite
    /// and within their valid ranges.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    /// Returns latitude of this [`Coordinate`].
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Returns longitude of this [`Coordinate`].
    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Returns the arithmetic mean of the provided [`Coordinate`]s, if any.
    pub fn centroid(points: impl IntoIterator<Item = Self>) -> Option<Self> {
        let (lat, lng, n) = points
            .into_iter()
            .fold((0.0, 0.0, 0_u32), |(lat, lng, n), p| {
                (lat + p.lat, lng + p.lng, n + 1)
            });
        (n > 0).then(|| Self {
            lat: lat / f64::from(n),
            lng: lng / f64::from(n),
        })
    }
}

/// Rectangular map viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// South-west corner.
    sw: Coordinate,

    /// North-east corner.
    ne: Coordinate,
}

impl BoundingBox {
    /// Area of Seosan (서산시), South Chungcheong Province.
    pub const SEOSAN: Self = Self {
        sw: Coordinate {
            lat: 36.62,
            lng: 126.26,
        },
        ne: Coordinate {
            lat: 36.94,
            lng: 126.64,
        },
    };

    /// Creates a new [`BoundingBox`] if `sw` is indeed south-west of `ne`.
    #[must_use]
    pub fn new(sw: Coordinate, ne: Coordinate) -> Option<Self> {
        (sw.lat <= ne.lat && sw.lng <= ne.lng).then_some(Self { sw, ne })
    }

    /// Returns the south-west corner of this [`BoundingBox`].
    #[must_use]
    pub const fn sw(&self) -> Coordinate {
        self.sw
    }

    /// Returns the north-east corner of this [`BoundingBox`].
    #[must_use]
    pub const fn ne(&self) -> Coordinate {
        self.ne
    }

    /// Indicates whether the provided [`Coordinate`] lies inside (or on the
    /// border of) this [`BoundingBox`].
    #[must_use]
    pub fn contains(&self, p: Coordinate) -> bool {
        (self.sw.lat..=self.ne.lat).contains(&p.lat)
            && (self.sw.lng..=self.ne.lng).contains(&p.lng)
    }

    /// Returns the center of this [`BoundingBox`].
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.sw.lat + self.ne.lat) / 2.0,
            lng: (self.sw.lng + self.ne.lng) / 2.0,
        }
    }
}

/// Search radius in meters.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}m")]
pub struct Radius(u32);

impl Radius {
    /// Creates a new [`Radius`] if the provided `meters` is positive.
    #[must_use]
    pub const fn new(meters: u32) -> Option<Self> {
        if meters == 0 {
            None
        } else {
            Some(Self(meters))
        }
    }

    /// Creates a new [`Radius`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided `meters` must be positive.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(meters: u32) -> Self {
        Self(meters)
    }

    /// Returns this [`Radius`] in meters.
    #[must_use]
    pub const fn meters(self) -> u32 {
        self.0
    }
}

/// Result of geocoding an address.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geocoded {
    /// Resolved [`Coordinate`].
    pub coordinate: Coordinate,

    /// [`Provider`] that resolved the [`Coordinate`].
    pub provider: Provider,
}

define_kind! {
    #[doc = "Provider of a [`Geocoded`] result."]
    enum Provider {
        #[doc = "Kakao Local address search."]
        Kakao = 1,

        #[doc = "Naver Cloud Maps geocoding."]
        Naver = 2,
    }
}

//! Infrastructure layer.

pub mod database;
pub mod geocoder;
#[cfg(feature = "kakao")]
pub mod kakao;
#[cfg(feature = "naver")]
pub mod naver;
pub mod places;

#[cfg(feature = "json")]
pub use self::database::JsonFile;
#[cfg(feature = "kakao")]
pub use self::kakao::Kakao;
#[cfg(feature = "naver")]
pub use self::naver::Naver;
pub use self::{
    database::{Database, Memory},
    geocoder::{Fallback, Geocoder},
    places::Places,
};

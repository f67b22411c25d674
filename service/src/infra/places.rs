//! [`Places`]-search provider definitions.

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "kakao")]
use super::kakao;

/// Places-search provider operation.
pub use common::Handler as Places;

/// [`Places`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "kakao")]
    /// Kakao Local error.
    Kakao(kakao::Error),
}

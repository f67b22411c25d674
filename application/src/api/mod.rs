//! GraphQL API definitions.

pub mod listing;
mod query;
pub mod recommend;
pub mod region;
pub mod scalar;
pub mod signal;

use crate::{define_error, Context};

pub use self::{listing::Listing, query::Query};

/// GraphQL mutations root.
///
/// The API is read-only, so there are none.
pub type Mutation = juniper::EmptyMutation<Context>;

/// GraphQL subscriptions root.
pub type Subscription = juniper::EmptySubscription<Context>;

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum InputError {
        #[code = "INVALID_COORDINATE"]
        #[status = BAD_REQUEST]
        #[message = "Coordinate is out of range"]
        Coordinate,

        #[code = "INVALID_BOUNDING_BOX"]
        #[status = BAD_REQUEST]
        #[message = "South-west corner must not exceed the north-east one"]
        BoundingBox,

        #[code = "INVALID_RADIUS"]
        #[status = BAD_REQUEST]
        #[message = "Radius must be a positive number of meters"]
        Radius,

        #[code = "INVALID_AREA"]
        #[status = BAD_REQUEST]
        #[message = "Area must be a positive number of square meters"]
        Area,

        #[code = "INVALID_COGS_RATE"]
        #[status = BAD_REQUEST]
        #[message = "Cost of goods sold rate must be a finite number"]
        CogsRate,
    }
}

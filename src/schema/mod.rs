//! Request schema
//!
//! Closed vocabularies, the validated [`SalesRequest`] value object, and the
//! error items produced when a payload breaks the contract.

mod categories;
mod contract;
mod request;
mod validation;

pub use categories::{
    Categorical, FatContent, ItemType, LocationType, OutletIdentifier, OutletSize, OutletType,
};
pub use contract::{describe, FieldConstraint, FieldSpec, RequestContract, API_TITLE};
pub use request::*;
pub use validation::{FieldError, ValidationFailure};

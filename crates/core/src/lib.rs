//! `contentrepo-core`: content repository building blocks.
//!
//! This crate contains **pure domain** value objects (no infrastructure concerns):
//! identifiers, names, dimension coordinates, typed property values and stream addressing.

pub mod dimension;
pub mod error;
pub mod id;
pub mod name;
pub mod property;
pub mod stream;

pub use dimension::DimensionValues;
pub use error::{DomainError, DomainResult};
pub use id::{EditingSessionId, NodeId};
pub use name::{NodeName, NodeTypeName};
pub use property::{PropertyType, PropertyValue, PropertyValues};
pub use stream::{ExpectedVersion, StreamName};

//! Core types and traits for rowmodel.
//!
//! `rowmodel-core` is the **foundation layer** for the rowmodel workspace. It
//! defines the data types and the backend contract that the entity layer
//! builds on.
//!
//! # Role In The Architecture
//!
//! - **Contract layer**: [`Backend`] is the trait implemented by storage
//!   drivers. It is synchronous and blocking; transaction and retry policy
//!   belong to the driver and its callers, never to this crate.
//! - **Data model**: [`Value`] and [`Record`] represent column values and raw
//!   backend rows shared between the entity layer and drivers.
//! - **Naming**: the [`naming`] module holds the pure helpers for the
//!   camelCase ↔ snake_case translation, the persistability filters, and the
//!   composite primary-key clause builder.
//!
//! Most applications should use the `rowmodel` facade; reach for
//! `rowmodel-core` directly when writing drivers.

pub mod backend;
pub mod error;
pub mod naming;
pub mod record;
pub mod value;

pub use backend::Backend;
pub use error::{Error, Result};
pub use record::Record;
pub use value::Value;

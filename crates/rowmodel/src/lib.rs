//! Descriptor-driven entity persistence for relational stores.
//!
//! rowmodel maps in-memory entities to rows without per-type code: a
//! [`Descriptor`] declares the storage target, primary-key fields, known
//! columns, and relation fields once per concrete entity type, and
//! [`Entity`] drives assembly, serialization, and insert/update/delete
//! routing from that metadata.
//!
//! # Design Philosophy
//!
//! - **Declarative over reflective**: an explicit schema descriptor replaces
//!   runtime introspection; setter hooks are registered per field instead of
//!   synthesized from names.
//! - **Explicit dependencies**: an entity is constructed with its backend
//!   handle, never looked up from a global container.
//! - **No hidden policy**: backend errors propagate verbatim; there is no
//!   retry, rollback, caching, or transaction demarcation here.
//!
//! # Example
//!
//! ```ignore
//! let descriptor = Descriptor::new("users")
//!     .primary_key("id")
//!     .column("name")
//!     .column("email");
//!
//! let mut user = Entity::new(backend, descriptor);
//! user.set("name", Value::from("Bo"))
//!     .set("email", Value::from("bo@x.com"));
//! user.save()?; // no identity yet -> INSERT, adopts the generated id
//! user.set("email", Value::from("bo@y.com"));
//! user.save()?; // identity present and loaded -> UPDATE ... WHERE id = ?
//! ```

pub mod descriptor;
pub mod entity;

pub use descriptor::{integer_setter, Descriptor, FieldDef, Setter};
pub use entity::{Entity, FieldValue};
pub use rowmodel_core::{naming, Backend, Error, Record, Result, Value};

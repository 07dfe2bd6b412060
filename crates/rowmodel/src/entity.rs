//! The entity: one in-memory record bound to a storage target.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rowmodel_core::naming::{is_not_null, is_persistable, primary_key_clause, to_field_case};
use rowmodel_core::{Backend, Record, Result, Value};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{debug, trace};

use crate::descriptor::Descriptor;

/// Empty-identity check used for insert-vs-update routing: null, zero, an
/// empty or `"0"` string, and `false` all count as "no identity yet". Zero
/// doubles as the backend's "no generated identity" sentinel.
fn is_empty_identity(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Int(i) => *i == 0,
        Value::Double(d) => *d == 0.0,
        Value::Text(s) => {
            let trimmed = s.trim();
            trimmed.is_empty() || trimmed == "0"
        }
    }
}

/// The current value of one entity field.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// A flat column value.
    Scalar(Value),
    /// A nested entity (relation field).
    Entity(Box<Entity>),
    /// A collection of nested entities (relation field).
    Entities(Vec<Entity>),
}

impl FieldValue {
    /// The scalar value, if this is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Scalar(value)
    }
}

/// An in-memory record bound to a storage target.
///
/// Constructed from a [`Descriptor`] and an explicit backend handle. The
/// descriptor copy is per-instance: first-load column discovery mutates it
/// without affecting other entities of the same type. An entity is not safe
/// for concurrent use without external synchronization; in particular,
/// concurrent first-assemble column discovery is undefined.
///
/// Lifecycle: constructed empty (not loaded, no identity), optionally
/// populated via [`load`](Entity::load) or [`assemble`](Entity::assemble),
/// mutated through setters, then persisted with [`save`](Entity::save).
/// [`delete`](Entity::delete) ends the persisted lifetime and the instance
/// may be reused as a new entity.
#[derive(Clone)]
pub struct Entity {
    backend: Arc<dyn Backend>,
    descriptor: Descriptor,
    values: HashMap<String, FieldValue>,
    loaded: bool,
    columns_inferred: bool,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("target", &self.descriptor.target())
            .field("values", &self.values)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

impl Entity {
    /// Construct an empty entity for the given descriptor.
    ///
    /// When the descriptor declares no primary key, the identity defaults
    /// to a single `id` field.
    pub fn new(backend: Arc<dyn Backend>, descriptor: Descriptor) -> Self {
        let mut descriptor = descriptor;
        descriptor.apply_default_primary_key();
        Self {
            backend,
            descriptor,
            values: HashMap::new(),
            loaded: false,
            columns_inferred: false,
        }
    }

    /// The entity's metadata.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Set a field value, routing through the registered setter hook when
    /// the field declares one.
    pub fn set(&mut self, field: &str, value: Value) -> &mut Self {
        let setter = self.descriptor.find(field).and_then(|f| f.setter);
        if let Some(setter) = setter {
            setter(self, field, value);
        } else {
            self.store(field, value);
        }
        self
    }

    /// Store a field value directly, bypassing any setter hook. Setter
    /// hooks use this to write the value they settled on.
    pub fn store(&mut self, field: &str, value: Value) -> &mut Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    /// Set a relation field to one nested entity.
    pub fn set_relation(&mut self, field: &str, entity: Entity) -> &mut Self {
        self.values
            .insert(field.to_string(), FieldValue::Entity(Box::new(entity)));
        self
    }

    /// Set a relation field to a collection of nested entities.
    pub fn set_relations(&mut self, field: &str, entities: Vec<Entity>) -> &mut Self {
        self.values
            .insert(field.to_string(), FieldValue::Entities(entities));
        self
    }

    /// Get a field's scalar value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).and_then(FieldValue::as_scalar)
    }

    /// Get a field's full value, whatever its shape.
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Clear a field, returning what it held.
    pub fn unset(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// The identity value: the first primary-key field's current value.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        let (field, _) = *self.descriptor.primary_key_pairs().first()?;
        self.get(field)
    }

    /// Assign the identity.
    pub fn set_id(&mut self, id: i64) -> &mut Self {
        if let Some(&(field, _)) = self.descriptor.primary_key_pairs().first() {
            let field = field.to_string();
            self.set(&field, Value::Int(id));
        }
        self
    }

    /// True iff the identity currently holds a numeric-looking value.
    ///
    /// Deliberately independent of the loaded flag: an identity assigned by
    /// hand before an update counts.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.id().is_some_and(Value::is_numeric)
    }

    /// True iff at least one column or primary-key field currently holds a
    /// non-null value. Distinguishes a genuinely empty entity from one
    /// carrying data; relations do not count.
    #[must_use]
    pub fn is_affected(&self) -> bool {
        self.descriptor
            .fields()
            .iter()
            .filter(|f| !f.relation)
            .any(|f| self.get(&f.name).is_some_and(is_not_null))
    }

    /// Execute the descriptor's query template and assemble the result.
    ///
    /// A no-op returning the entity unchanged when no template is
    /// configured. Backend failures propagate; retry policy belongs to the
    /// caller.
    pub fn load(&mut self, params: &[Value]) -> Result<&mut Self> {
        let Some(template) = self.descriptor.query_template() else {
            return Ok(self);
        };
        let template = template.to_string();
        let record = self.backend.get_record(&template, params)?;
        self.assemble(&record);
        Ok(self)
    }

    /// Populate the entity from an already-fetched record.
    ///
    /// Marks the entity loaded. When the descriptor never declared any
    /// plain columns, the first non-empty record's key set supplies them
    /// (one-time discovery; later calls never re-infer, and an empty
    /// record such as a load miss leaves discovery pending). Storage-case
    /// keys translate
    /// to field-case; declared fields take the non-null values, nulls are
    /// skipped so prior field state survives a partial record, and unknown
    /// keys are dropped. Both skip conditions are observable at debug
    /// level for implementers who want stricter schema enforcement.
    pub fn assemble(&mut self, record: &Record) -> &mut Self {
        self.loaded = true;

        if !self.columns_inferred && !self.descriptor.has_plain_columns() && !record.is_empty() {
            for key in record.keys() {
                self.descriptor.add_inferred_column(to_field_case(key));
            }
            self.columns_inferred = true;
        }

        for (key, value) in record.iter() {
            if value.is_null() {
                debug!(column = key, table = self.descriptor.target(), "assemble skipped null value");
                continue;
            }
            let field = to_field_case(key);
            if self.descriptor.find(&field).is_some() {
                self.set(&field, value.clone());
            } else {
                debug!(column = key, table = self.descriptor.target(), "assemble dropped unmapped column");
            }
        }

        self
    }

    /// Serialize the entity's current fields into a storage-case mapping.
    ///
    /// Field selection follows the descriptor in declaration order: primary
    /// keys and known columns always, relations only when `only_columns` is
    /// false. A relation holding a nested entity expands into that entity's
    /// own full mapping; a collection expands each member. Unset fields are
    /// omitted. Does not mutate the entity.
    #[must_use]
    pub fn to_map(&self, only_columns: bool) -> JsonMap<String, JsonValue> {
        let mut out = JsonMap::new();

        for def in self.descriptor.fields() {
            if only_columns && def.relation {
                continue;
            }
            let Some(value) = self.values.get(&def.name) else {
                continue;
            };
            let serialized = match value {
                FieldValue::Scalar(v) => v.to_json(),
                FieldValue::Entity(e) => JsonValue::Object(e.to_map(false)),
                FieldValue::Entities(list) => JsonValue::Array(
                    list.iter()
                        .map(|e| JsonValue::Object(e.to_map(false)))
                        .collect(),
                ),
            };
            out.insert(def.storage_name.clone(), serialized);
        }

        out
    }

    /// Route to insert or update and return the entity (fluent).
    ///
    /// Inserts when the identity is empty (unset, null, or zero) or the
    /// entity never went through assembly; updates otherwise. A generated
    /// identity is adopted only when the identity field is still empty, so
    /// an explicitly pre-set identity is never clobbered, and a zero from
    /// the backend (its "no generated identity" sentinel) is never adopted.
    pub fn save(&mut self) -> Result<&mut Self> {
        let identity_empty = self.id().is_none_or(is_empty_identity);
        if !identity_empty && self.loaded {
            trace!(table = self.descriptor.target(), "save routed to update");
            self.update()?;
        } else {
            trace!(table = self.descriptor.target(), "save routed to insert");
            let generated = self.insert()?;
            if generated != 0 && self.id().is_none_or(is_empty_identity) {
                self.set_id(generated);
            }
        }
        Ok(self)
    }

    /// Insert the entity's persistable payload, returning the generated
    /// identity.
    pub fn insert(&self) -> Result<i64> {
        let payload = self.payload();
        self.backend.insert(self.descriptor.target(), &payload)
    }

    /// Update the backing row, keyed by the declared primary-key fields.
    ///
    /// Fails with [`Error::MissingKey`](rowmodel_core::Error::MissingKey)
    /// when a declared key has no current value. Returns the affected-row
    /// count.
    pub fn update(&self) -> Result<u64> {
        let mut payload = self.payload();
        let (clause, bound) = primary_key_clause(
            &self.descriptor.primary_key_pairs(),
            self.descriptor.target(),
            &mut payload,
        )?;
        self.backend
            .update(self.descriptor.target(), &payload, &clause, &bound)
    }

    /// Delete the backing row, then clear the loaded flag.
    ///
    /// The flag clears once the backend call completes, whether or not a
    /// row actually existed; a failed call leaves it untouched. Returns the
    /// affected-row count.
    pub fn delete(&mut self) -> Result<u64> {
        let mut payload = self.payload();
        let (clause, bound) = primary_key_clause(
            &self.descriptor.primary_key_pairs(),
            self.descriptor.target(),
            &mut payload,
        )?;
        let affected = self
            .backend
            .delete(self.descriptor.target(), &clause, &bound)?;
        self.loaded = false;
        Ok(affected)
    }

    /// The storage-case insert/update payload: column fields only, filtered
    /// down to flat non-null scalars, in declaration order.
    fn payload(&self) -> Vec<(String, Value)> {
        self.descriptor
            .fields()
            .iter()
            .filter(|f| !f.relation)
            .filter_map(|f| {
                self.get(&f.name)
                    .filter(|v| is_persistable(v))
                    .map(|v| (f.storage_name.clone(), v.clone()))
            })
            .collect()
    }
}

//! Declarative entity metadata.
//!
//! A [`Descriptor`] is the per-type schema declaration: the storage target,
//! an optional load-query template, and the field set with its roles
//! (primary key / known column / relation). It replaces reflection: instead
//! of deriving setters from names at runtime, concrete types register their
//! field list (and any setter hooks) once and clone the descriptor into
//! each entity instance.

use rowmodel_core::naming::to_storage_case;
use rowmodel_core::Value;

use crate::entity::Entity;

/// A registered setter hook.
///
/// When a field carries one, [`Entity::set`] and assembly route incoming
/// values through it instead of storing them directly. The hook receives the
/// entity, the field-case name, and the raw value; it is expected to call
/// [`Entity::store`] with whatever it decides to keep.
pub type Setter = fn(&mut Entity, &str, Value);

/// Setter hook that coerces incoming values to integers where possible.
///
/// Registered by default on the implicit `id` primary key so identities
/// read back as text (`"7"`) normalize to `Value::Int(7)`. Values that do
/// not look like integers are stored untouched.
pub fn integer_setter(entity: &mut Entity, field: &str, value: Value) {
    let coerced = match value {
        Value::Double(d) => Value::Int(d as i64),
        Value::Text(s) => match s.trim().parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Text(s),
        },
        other => other,
    };
    entity.store(field, coerced);
}

/// One declared entity field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field-case name (`tenantId`).
    pub name: String,
    /// Storage column name (`tenant_id`); derived from `name` unless
    /// overridden.
    pub storage_name: String,
    /// Part of the entity's identity.
    pub primary_key: bool,
    /// Holds a nested entity or a collection thereof; excluded from column
    /// persistence, included only in full serialization.
    pub relation: bool,
    /// Optional setter hook applied on assignment.
    pub setter: Option<Setter>,
}

impl FieldDef {
    /// Declare a plain column field. The storage name is derived via
    /// [`to_storage_case`].
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let storage_name = to_storage_case(&name);
        Self {
            name,
            storage_name,
            primary_key: false,
            relation: false,
            setter: None,
        }
    }

    /// Override the storage column name.
    pub fn storage(mut self, name: impl Into<String>) -> Self {
        self.storage_name = name.into();
        self
    }

    /// Mark as part of the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as a relation field.
    #[must_use]
    pub fn relation(mut self) -> Self {
        self.relation = true;
        self
    }

    /// Register a setter hook for this field.
    #[must_use]
    pub fn with_setter(mut self, setter: Setter) -> Self {
        self.setter = Some(setter);
        self
    }
}

/// The per-type schema declaration an [`Entity`] is built from.
///
/// Field declarations are kept in declaration order; duplicate declarations
/// of the same name collapse into one field with the union of the declared
/// roles, so a name declared both as column and primary key stays a single
/// field. Every primary-key field is a known column by construction.
#[derive(Debug, Clone)]
pub struct Descriptor {
    target: String,
    query: Option<String>,
    fields: Vec<FieldDef>,
}

impl Descriptor {
    /// Start a descriptor for the given storage target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            query: None,
            fields: Vec::new(),
        }
    }

    /// Set the parameterized query template used by `Entity::load`.
    pub fn query(mut self, template: impl Into<String>) -> Self {
        self.query = Some(template.into());
        self
    }

    /// Declare a primary-key field.
    #[must_use]
    pub fn primary_key(mut self, name: &str) -> Self {
        self.declare(FieldDef::new(name).primary_key());
        self
    }

    /// Declare a known column.
    #[must_use]
    pub fn column(mut self, name: &str) -> Self {
        self.declare(FieldDef::new(name));
        self
    }

    /// Declare a relation field.
    #[must_use]
    pub fn relation(mut self, name: &str) -> Self {
        self.declare(FieldDef::new(name).relation());
        self
    }

    /// Declare a fully-specified field.
    #[must_use]
    pub fn field(mut self, def: FieldDef) -> Self {
        self.declare(def);
        self
    }

    fn declare(&mut self, def: FieldDef) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == def.name) {
            existing.primary_key |= def.primary_key;
            existing.relation |= def.relation;
            if existing.setter.is_none() {
                existing.setter = def.setter;
            }
        } else {
            self.fields.push(def);
        }
    }

    /// The storage target name.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The load-query template, if one was configured.
    #[must_use]
    pub fn query_template(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// All declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Find a declared field by field-case name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Primary-key `(field name, storage column)` pairs in declaration
    /// order.
    #[must_use]
    pub fn primary_key_pairs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .filter(|f| f.primary_key)
            .map(|f| (f.name.as_str(), f.storage_name.as_str()))
            .collect()
    }

    /// Field-case names of the known columns (primary keys included,
    /// relations excluded).
    #[must_use]
    pub fn column_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.relation)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Field-case names of the relation fields.
    #[must_use]
    pub fn relation_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.relation)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// True once any non-key, non-relation column is declared. Until then
    /// the column set counts as "never populated" and the first assembled
    /// record supplies it.
    #[must_use]
    pub fn has_plain_columns(&self) -> bool {
        self.fields.iter().any(|f| !f.primary_key && !f.relation)
    }

    /// Default the identity to a single `id` field when no primary key was
    /// declared. Called once when an entity is constructed.
    pub(crate) fn apply_default_primary_key(&mut self) {
        if !self.fields.iter().any(|f| f.primary_key) {
            self.fields.insert(
                0,
                FieldDef::new("id").primary_key().with_setter(integer_setter),
            );
        }
    }

    /// Add a column discovered from the first assembled record. No-op for
    /// names already declared.
    pub(crate) fn add_inferred_column(&mut self, name: String) {
        if self.find(&name).is_none() {
            self.fields.push(FieldDef::new(name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_name_derived() {
        let def = FieldDef::new("tenantId");
        assert_eq!(def.storage_name, "tenant_id");
    }

    #[test]
    fn test_storage_name_override() {
        let def = FieldDef::new("legacyName").storage("legacy_name_v2");
        assert_eq!(def.storage_name, "legacy_name_v2");
    }

    #[test]
    fn test_primary_keys_are_columns() {
        // Declared only as primary keys, yet both show up in the column set.
        let descriptor = Descriptor::new("items")
            .primary_key("tenantId")
            .primary_key("itemId");

        assert_eq!(descriptor.column_fields(), vec!["tenantId", "itemId"]);
        assert_eq!(
            descriptor.primary_key_pairs(),
            vec![("tenantId", "tenant_id"), ("itemId", "item_id")]
        );
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let descriptor = Descriptor::new("users").column("id").primary_key("id");

        assert_eq!(descriptor.fields().len(), 1);
        assert!(descriptor.find("id").unwrap().primary_key);
    }

    #[test]
    fn test_default_primary_key() {
        let mut descriptor = Descriptor::new("users").column("name");
        descriptor.apply_default_primary_key();

        let id = descriptor.find("id").unwrap();
        assert!(id.primary_key);
        assert!(id.setter.is_some());
        // The declared primary key suppresses the default.
        let mut declared = Descriptor::new("items").primary_key("itemId");
        declared.apply_default_primary_key();
        assert!(declared.find("id").is_none());
    }

    #[test]
    fn test_relation_fields() {
        let descriptor = Descriptor::new("users")
            .column("name")
            .relation("addresses");

        assert_eq!(descriptor.relation_fields(), vec!["addresses"]);
        assert_eq!(descriptor.column_fields(), vec!["name"]);
    }

    #[test]
    fn test_has_plain_columns() {
        let keys_only = Descriptor::new("users").primary_key("id");
        assert!(!keys_only.has_plain_columns());

        let with_column = keys_only.column("name");
        assert!(with_column.has_plain_columns());
    }
}

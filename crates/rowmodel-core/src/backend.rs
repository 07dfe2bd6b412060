//! The storage driver contract.

use crate::error::Result;
use crate::record::Record;
use crate::value::Value;

/// The contract a storage driver must satisfy.
///
/// Every operation is synchronous and blocking: the caller is suspended
/// until the driver responds, and there is no cancellation at this layer.
/// The handle behind an implementation is shared, externally-managed state
/// (a connection or a pool); its concurrency and transaction discipline are
/// entirely the driver's business.
pub trait Backend {
    /// Execute a parameterized read expected to return at most one row.
    ///
    /// Zero matching rows is "no data", coerced to an empty [`Record`],
    /// never an error. Behavior for multiple matching rows is
    /// driver-defined.
    fn get_record(&self, query: &str, params: &[Value]) -> Result<Record>;

    /// Insert one row into `target`, returning the generated identity
    /// (0 when the driver produced none).
    fn insert(&self, target: &str, fields: &[(String, Value)]) -> Result<i64>;

    /// Update rows in `target` matching `where_clause` (with `?`
    /// placeholders bound to `where_values`), returning the affected-row
    /// count.
    fn update(
        &self,
        target: &str,
        fields: &[(String, Value)],
        where_clause: &str,
        where_values: &[Value],
    ) -> Result<u64>;

    /// Delete rows in `target` matching `where_clause`, returning the
    /// affected-row count.
    fn delete(&self, target: &str, where_clause: &str, where_values: &[Value]) -> Result<u64>;
}

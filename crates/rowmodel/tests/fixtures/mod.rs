//! Mock backend for integration tests.
#![allow(dead_code)] // not every suite uses every helper

use std::cell::{Cell, RefCell};

use rowmodel::{Backend, Error, Record, Result, Value};

/// One recorded backend interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    GetRecord {
        query: String,
        params: Vec<Value>,
    },
    Insert {
        target: String,
        fields: Vec<(String, Value)>,
    },
    Update {
        target: String,
        fields: Vec<(String, Value)>,
        where_clause: String,
        where_values: Vec<Value>,
    },
    Delete {
        target: String,
        where_clause: String,
        where_values: Vec<Value>,
    },
}

/// In-memory backend that records every call.
pub struct MockBackend {
    /// Record served by `get_record`.
    pub record: RefCell<Record>,
    /// Identity returned by `insert`.
    pub generated_id: Cell<i64>,
    /// Affected-row count returned by `update`/`delete`.
    pub affected: Cell<u64>,
    /// When set, every call fails with this message.
    pub fail_message: RefCell<Option<String>>,
    /// Calls in arrival order.
    pub calls: RefCell<Vec<BackendCall>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            record: RefCell::new(Record::new()),
            generated_id: Cell::new(0),
            affected: Cell::new(1),
            fail_message: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn generating(id: i64) -> Self {
        let backend = Self::new();
        backend.generated_id.set(id);
        backend
    }

    pub fn returning_record(record: Record) -> Self {
        let backend = Self::new();
        backend.record.replace(record);
        backend
    }

    pub fn failing(message: &str) -> Self {
        let backend = Self::new();
        backend.fail_message.replace(Some(message.to_string()));
        backend
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.borrow().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match self.fail_message.borrow().as_deref() {
            Some(message) => Err(Error::backend(message)),
            None => Ok(()),
        }
    }
}

impl Backend for MockBackend {
    fn get_record(&self, query: &str, params: &[Value]) -> Result<Record> {
        self.calls.borrow_mut().push(BackendCall::GetRecord {
            query: query.to_string(),
            params: params.to_vec(),
        });
        self.check_failure()?;
        Ok(self.record.borrow().clone())
    }

    fn insert(&self, target: &str, fields: &[(String, Value)]) -> Result<i64> {
        self.calls.borrow_mut().push(BackendCall::Insert {
            target: target.to_string(),
            fields: fields.to_vec(),
        });
        self.check_failure()?;
        Ok(self.generated_id.get())
    }

    fn update(
        &self,
        target: &str,
        fields: &[(String, Value)],
        where_clause: &str,
        where_values: &[Value],
    ) -> Result<u64> {
        self.calls.borrow_mut().push(BackendCall::Update {
            target: target.to_string(),
            fields: fields.to_vec(),
            where_clause: where_clause.to_string(),
            where_values: where_values.to_vec(),
        });
        self.check_failure()?;
        Ok(self.affected.get())
    }

    fn delete(&self, target: &str, where_clause: &str, where_values: &[Value]) -> Result<u64> {
        self.calls.borrow_mut().push(BackendCall::Delete {
            target: target.to_string(),
            where_clause: where_clause.to_string(),
            where_values: where_values.to_vec(),
        });
        self.check_failure()?;
        Ok(self.affected.get())
    }
}

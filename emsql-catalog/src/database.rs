//! The database: schema map behind the meta lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use emsql_core::{ErrorKind, FrontendError, Result};

use crate::objects::{Domain, FunctionAlias, Sequence, Table, UserAggregate};

/// Name of the main schema.
pub const MAIN_SCHEMA: &str = "PUBLIC";

/// An in-memory database catalog.
///
/// All schema maps live behind one meta lock; every mutation bumps the
/// modification id so prepared commands can detect staleness.
pub struct Database {
    short_name: String,
    meta: RwLock<Catalog>,
    modification_id: AtomicU64,
    next_system_id: AtomicU32,
}

#[derive(Default)]
struct Catalog {
    schemas: HashMap<String, Schema>,
}

#[derive(Default)]
struct Schema {
    tables: HashMap<String, Arc<Table>>,
    sequences: HashMap<String, Arc<Sequence>>,
    domains: HashMap<String, Arc<Domain>>,
    functions: HashMap<String, Arc<FunctionAlias>>,
    aggregates: HashMap<String, Arc<UserAggregate>>,
}

impl Database {
    /// A fresh database with the main schema.
    pub fn new(short_name: impl Into<String>) -> Arc<Self> {
        let mut catalog = Catalog::default();
        catalog.schemas.insert(MAIN_SCHEMA.to_owned(), Schema::default());
        Arc::new(Self {
            short_name: short_name.into(),
            meta: RwLock::new(catalog),
            modification_id: AtomicU64::new(0),
            next_system_id: AtomicU32::new(0),
        })
    }

    /// The catalog short name, matched against leading identifier segments.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The current modification id.
    pub fn modification_id(&self) -> u64 {
        self.modification_id.load(Ordering::Acquire)
    }

    /// Bumps the modification id; called for every catalog-visible change.
    pub fn bump_modification_id(&self) {
        self.modification_id.fetch_add(1, Ordering::AcqRel);
    }

    /// Allocates a unique system identifier suffix.
    pub fn next_system_id(&self) -> u32 {
        self.next_system_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Whether a schema exists.
    pub fn schema_exists(&self, name: &str) -> bool {
        self.meta.read().schemas.contains_key(name)
    }

    /// All schema names.
    pub fn schema_names(&self) -> Vec<String> {
        self.meta.read().schemas.keys().cloned().collect()
    }

    /// Adds a schema.
    pub fn add_schema(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        let mut meta = self.meta.write();
        if meta.schemas.contains_key(&name) {
            return Err(FrontendError::new(
                ErrorKind::TableOrViewAlreadyExists,
                format!("Schema {} already exists", name),
            ));
        }
        meta.schemas.insert(name, Schema::default());
        drop(meta);
        self.bump_modification_id();
        Ok(())
    }

    /// Looks up a table or view.
    pub fn find_table(&self, schema: &str, name: &str) -> Option<Arc<Table>> {
        self.meta
            .read()
            .schemas
            .get(schema)
            .and_then(|s| s.tables.get(name))
            .cloned()
    }

    /// Looks up a sequence.
    pub fn find_sequence(&self, schema: &str, name: &str) -> Option<Arc<Sequence>> {
        self.meta
            .read()
            .schemas
            .get(schema)
            .and_then(|s| s.sequences.get(name))
            .cloned()
    }

    /// Looks up a domain.
    pub fn find_domain(&self, schema: &str, name: &str) -> Option<Arc<Domain>> {
        self.meta
            .read()
            .schemas
            .get(schema)
            .and_then(|s| s.domains.get(name))
            .cloned()
    }

    /// Looks up a function alias.
    pub fn find_function(&self, schema: &str, name: &str) -> Option<Arc<FunctionAlias>> {
        self.meta
            .read()
            .schemas
            .get(schema)
            .and_then(|s| s.functions.get(name))
            .cloned()
    }

    /// Looks up a user aggregate.
    pub fn find_aggregate(&self, schema: &str, name: &str) -> Option<Arc<UserAggregate>> {
        self.meta
            .read()
            .schemas
            .get(schema)
            .and_then(|s| s.aggregates.get(name))
            .cloned()
    }

    /// Installs a table or view into a schema.
    pub fn add_table(&self, schema: &str, table: Table) -> Result<Arc<Table>> {
        let table = Arc::new(table);
        let mut meta = self.meta.write();
        let schema = meta.schemas.get_mut(schema).ok_or_else(|| {
            FrontendError::new(
                ErrorKind::SchemaNotFound,
                format!("Schema {} not found", schema),
            )
        })?;
        if schema.tables.contains_key(table.name()) {
            return Err(FrontendError::new(
                ErrorKind::TableOrViewAlreadyExists,
                format!("Table or view {} already exists", table.name()),
            ));
        }
        schema.tables.insert(table.name().to_owned(), table.clone());
        drop(meta);
        self.bump_modification_id();
        debug!(table = table.name(), "table added to catalog");
        Ok(table)
    }

    /// Removes a table or view.
    pub fn remove_table(&self, schema: &str, name: &str) -> bool {
        let removed = self
            .meta
            .write()
            .schemas
            .get_mut(schema)
            .and_then(|s| s.tables.remove(name))
            .is_some();
        if removed {
            self.bump_modification_id();
        }
        removed
    }

    /// Installs a sequence.
    pub fn add_sequence(&self, schema: &str, sequence: Sequence) {
        if let Some(schema) = self.meta.write().schemas.get_mut(schema) {
            schema
                .sequences
                .insert(sequence.name.clone(), Arc::new(sequence));
        }
        self.bump_modification_id();
    }

    /// Installs a domain.
    pub fn add_domain(&self, schema: &str, domain: Domain) {
        if let Some(schema) = self.meta.write().schemas.get_mut(schema) {
            schema.domains.insert(domain.name.clone(), Arc::new(domain));
        }
        self.bump_modification_id();
    }

    /// Installs a function alias.
    pub fn add_function(&self, schema: &str, function: FunctionAlias) {
        if let Some(schema) = self.meta.write().schemas.get_mut(schema) {
            schema
                .functions
                .insert(function.name.clone(), Arc::new(function));
        }
        self.bump_modification_id();
    }

    /// Installs a user aggregate.
    pub fn add_aggregate(&self, schema: &str, aggregate: UserAggregate) {
        if let Some(schema) = self.meta.write().schemas.get_mut(schema) {
            schema
                .aggregates
                .insert(aggregate.name.clone(), Arc::new(aggregate));
        }
        self.bump_modification_id();
    }

    /// Whether the database holds no user tables at all (used for the
    /// dedicated empty-database error message).
    pub fn has_no_tables(&self) -> bool {
        self.meta
            .read()
            .schemas
            .values()
            .all(|schema| schema.tables.is_empty())
    }

    /// All table names in the given schemas, for fuzzy candidate matching.
    pub fn table_names_in(&self, schemas: &[String]) -> Vec<String> {
        let meta = self.meta.read();
        let mut names = Vec::new();
        for schema in schemas {
            if let Some(schema) = meta.schemas.get(schema) {
                names.extend(schema.tables.keys().cloned());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Column;
    use emsql_ast::{DataType, PrimaryType};

    #[test]
    fn schema_and_table_lifecycle() {
        let db = Database::new("TEST");
        assert!(db.schema_exists(MAIN_SCHEMA));
        assert!(db.has_no_tables());

        let before = db.modification_id();
        db.add_table(
            MAIN_SCHEMA,
            Table::new(
                "T",
                vec![Column::new("A", DataType::simple(PrimaryType::Integer))],
            ),
        )
        .unwrap();
        assert!(db.modification_id() > before);
        assert!(!db.has_no_tables());

        let table = db.find_table(MAIN_SCHEMA, "T").unwrap();
        let (position, column) = table.find_column("A").unwrap();
        assert_eq!(position, 1);
        assert_eq!(column.name, "A");
        assert!(db.find_table(MAIN_SCHEMA, "MISSING").is_none());

        assert!(db.remove_table(MAIN_SCHEMA, "T"));
        assert!(db.has_no_tables());
    }

    #[test]
    fn duplicate_table_rejected() {
        let db = Database::new("TEST");
        db.add_table(MAIN_SCHEMA, Table::new("T", vec![])).unwrap();
        let error = db
            .add_table(MAIN_SCHEMA, Table::new("T", vec![]))
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::TableOrViewAlreadyExists);
    }
}

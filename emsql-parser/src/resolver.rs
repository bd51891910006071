//! The name resolver: schema, table, function, sequence and domain lookup
//! against the session's current schema and search path.

use std::sync::Arc;

use emsql_catalog::{Column, Domain, FunctionAlias, Sequence, Session, Table, UserAggregate};
use emsql_core::{ErrorKind, FrontendError, Result};

/// The two special one-row tables accepted as a last resort.
const DUAL: &str = "DUAL";
const SYSDUMMY1: &str = "SYSDUMMY1";

/// A resolved table together with the schema it was found in.
#[derive(Clone, Debug)]
pub struct ResolvedTable {
    /// The schema name.
    pub schema: String,
    /// The table.
    pub table: Arc<Table>,
}

/// Stateless per-call resolver over a session.
pub struct NameResolver<'a> {
    session: &'a Session,
}

impl<'a> NameResolver<'a> {
    /// A resolver for the session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Finds a schema by canonical name.
    pub fn find_schema(&self, name: &str) -> Option<String> {
        if self.session.database().schema_exists(name) {
            Some(name.to_owned())
        } else {
            None
        }
    }

    /// Finds a schema or fails with `SCHEMA_NOT_FOUND`.
    pub fn get_schema_or_fail(&self, name: &str) -> Result<String> {
        self.find_schema(name).ok_or_else(|| {
            FrontendError::new(
                ErrorKind::SchemaNotFound,
                format!("Schema \"{}\" not found", name),
            )
        })
    }

    /// The schemas consulted for unqualified lookups, in order.
    fn candidate_schemas(&self) -> Vec<String> {
        let mut schemas = vec![self.session.current_schema()];
        for schema in self.session.search_path() {
            if !schemas.contains(&schema) {
                schemas.push(schema);
            }
        }
        schemas
    }

    /// Resolves a table: explicit schema, else session shadow views, the
    /// current schema, the search path, and finally the DUAL fallbacks.
    pub fn resolve_table(&self, schema: Option<&str>, name: &str) -> Result<ResolvedTable> {
        let database = self.session.database();
        if let Some(schema) = schema {
            let schema = self.get_schema_or_fail(schema)?;
            if let Some(table) = database.find_table(&schema, name) {
                return Ok(ResolvedTable { schema, table });
            }
            if name == SYSDUMMY1 {
                return Ok(self.dual(name));
            }
            return Err(self.table_not_found(name, &[schema]));
        }
        if let Some(table) = self.session.find_shadow_view(name) {
            return Ok(ResolvedTable {
                schema: self.session.current_schema(),
                table,
            });
        }
        let candidates = self.candidate_schemas();
        for schema in &candidates {
            if let Some(table) = database.find_table(schema, name) {
                return Ok(ResolvedTable {
                    schema: schema.clone(),
                    table,
                });
            }
        }
        if name == DUAL || name == SYSDUMMY1 {
            return Ok(self.dual(name));
        }
        Err(self.table_not_found(name, &candidates))
    }

    fn dual(&self, name: &str) -> ResolvedTable {
        ResolvedTable {
            schema: self.session.current_schema(),
            table: Arc::new(Table::view(name, Vec::<Column>::new(), false)),
        }
    }

    fn table_not_found(&self, name: &str, schemas: &[String]) -> FrontendError {
        let database = self.session.database();
        if database.has_no_tables() {
            return FrontendError::new(
                ErrorKind::TableOrViewNotFoundDatabaseEmpty,
                format!(
                    "Table or view \"{}\" not found (this database is empty)",
                    name
                ),
            );
        }
        // fuzzy-match by upper-case equality to suggest candidates
        let upper = name.to_uppercase();
        let mut candidates: Vec<String> = database
            .table_names_in(schemas)
            .into_iter()
            .filter(|candidate| candidate.to_uppercase() == upper && candidate != name)
            .collect();
        candidates.sort();
        if candidates.is_empty() {
            FrontendError::new(
                ErrorKind::TableOrViewNotFound,
                format!("Table or view \"{}\" not found", name),
            )
        } else {
            FrontendError::new(
                ErrorKind::TableOrViewNotFoundWithCandidates,
                format!(
                    "Table or view \"{}\" not found (candidates are: {})",
                    name,
                    candidates.join(", ")
                ),
            )
        }
    }

    /// Resolves a user-defined function alias; lookup mirrors table lookup.
    pub fn resolve_function(
        &self,
        schema: Option<&str>,
        name: &str,
    ) -> Result<Option<Arc<FunctionAlias>>> {
        let database = self.session.database();
        if let Some(schema) = schema {
            let schema = self.get_schema_or_fail(schema)?;
            return Ok(database.find_function(&schema, name));
        }
        for schema in self.candidate_schemas() {
            if let Some(function) = database.find_function(&schema, name) {
                return Ok(Some(function));
            }
        }
        Ok(None)
    }

    /// Resolves a user-defined aggregate.
    pub fn resolve_aggregate(
        &self,
        schema: Option<&str>,
        name: &str,
    ) -> Result<Option<Arc<UserAggregate>>> {
        let database = self.session.database();
        if let Some(schema) = schema {
            let schema = self.get_schema_or_fail(schema)?;
            return Ok(database.find_aggregate(&schema, name));
        }
        for schema in self.candidate_schemas() {
            if let Some(aggregate) = database.find_aggregate(&schema, name) {
                return Ok(Some(aggregate));
            }
        }
        Ok(None)
    }

    /// Resolves a sequence.
    pub fn resolve_sequence(&self, schema: Option<&str>, name: &str) -> Result<Arc<Sequence>> {
        let database = self.session.database();
        if let Some(schema) = schema {
            let schema = self.get_schema_or_fail(schema)?;
            return database.find_sequence(&schema, name).ok_or_else(|| {
                FrontendError::new(
                    ErrorKind::SequenceNotFound,
                    format!("Sequence \"{}\" not found", name),
                )
            });
        }
        for schema in self.candidate_schemas() {
            if let Some(sequence) = database.find_sequence(&schema, name) {
                return Ok(sequence);
            }
        }
        Err(FrontendError::new(
            ErrorKind::SequenceNotFound,
            format!("Sequence \"{}\" not found", name),
        ))
    }

    /// Finds a domain in the given schema (or the candidates).
    pub fn find_domain(&self, schema: Option<&str>, name: &str) -> Option<Arc<Domain>> {
        let database = self.session.database();
        if let Some(schema) = schema {
            return database.find_domain(schema, name);
        }
        for schema in self.candidate_schemas() {
            if let Some(domain) = database.find_domain(&schema, name) {
                return Some(domain);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emsql_ast::{DataType, PrimaryType};
    use emsql_catalog::{Database, MAIN_SCHEMA};

    fn session_with_table() -> Session {
        let db = Database::new("TEST");
        db.add_table(
            MAIN_SCHEMA,
            Table::new(
                "CUSTOMER",
                vec![Column::new("ID", DataType::simple(PrimaryType::Integer))],
            ),
        )
        .unwrap();
        Session::new(db)
    }

    #[test]
    fn resolves_in_current_schema() {
        let session = session_with_table();
        let resolver = NameResolver::new(&session);
        let resolved = resolver.resolve_table(None, "CUSTOMER").unwrap();
        assert_eq!(resolved.schema, MAIN_SCHEMA);
        assert_eq!(resolved.table.name(), "CUSTOMER");
    }

    #[test]
    fn search_path_consulted_after_current_schema() {
        let session = session_with_table();
        session.database().add_schema("APP").unwrap();
        session
            .database()
            .add_table("APP", Table::new("ORDERS", vec![]))
            .unwrap();
        session.set_search_path(vec!["APP".into()]);
        let resolver = NameResolver::new(&session);
        let resolved = resolver.resolve_table(None, "ORDERS").unwrap();
        assert_eq!(resolved.schema, "APP");
    }

    #[test]
    fn dual_fallback() {
        let session = session_with_table();
        let resolver = NameResolver::new(&session);
        assert!(resolver.resolve_table(None, "DUAL").is_ok());
        assert!(resolver.resolve_table(None, "SYSDUMMY1").is_ok());
    }

    #[test]
    fn empty_database_has_dedicated_error() {
        let session = Session::new(Database::new("TEST"));
        let resolver = NameResolver::new(&session);
        let error = resolver.resolve_table(None, "MISSING").unwrap_err();
        assert_eq!(error.kind, ErrorKind::TableOrViewNotFoundDatabaseEmpty);
    }

    #[test]
    fn candidate_suggestions() {
        let session = session_with_table();
        let resolver = NameResolver::new(&session);
        // lower-case lookup of an upper-case table suggests the candidate
        let error = resolver.resolve_table(None, "customer").unwrap_err();
        assert_eq!(error.kind, ErrorKind::TableOrViewNotFoundWithCandidates);
        assert!(error.message.contains("CUSTOMER"));

        let error = resolver.resolve_table(None, "NO_SUCH").unwrap_err();
        assert_eq!(error.kind, ErrorKind::TableOrViewNotFound);
    }

    #[test]
    fn schema_not_found() {
        let session = session_with_table();
        let resolver = NameResolver::new(&session);
        let error = resolver.resolve_table(Some("NOPE"), "CUSTOMER").unwrap_err();
        assert_eq!(error.kind, ErrorKind::SchemaNotFound);
    }
}

//! The session: per-connection parse context and the session-local shadow
//! view namespace used by parse-time CTEs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use emsql_core::ParserConfig;

use crate::{
    database::{Database, MAIN_SCHEMA},
    objects::Table,
};

/// A session. One parse runs at a time per session; the parser owns the
/// session's parameter list for the duration of a parse.
pub struct Session {
    database: Arc<Database>,
    config: ParserConfig,
    user: String,
    current_schema: Mutex<String>,
    search_path: Mutex<Vec<String>>,
    shadow_views: Mutex<HashMap<String, Arc<Table>>>,
    next_local_id: AtomicU32,
}

impl Session {
    /// A session on the given database with the default configuration.
    pub fn new(database: Arc<Database>) -> Self {
        Self::with_config(database, ParserConfig::default())
    }

    /// A session with an explicit configuration.
    pub fn with_config(database: Arc<Database>, config: ParserConfig) -> Self {
        Self {
            database,
            config,
            user: "SA".to_owned(),
            current_schema: Mutex::new(MAIN_SCHEMA.to_owned()),
            search_path: Mutex::new(Vec::new()),
            shadow_views: Mutex::new(HashMap::new()),
            next_local_id: AtomicU32::new(0),
        }
    }

    /// The database.
    pub fn database(&self) -> &Arc<Database> {
        &self.database
    }

    /// The parse configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replaces the parse configuration (e.g. after `SET MODE`).
    pub fn set_config(&mut self, config: ParserConfig) {
        self.config = config;
    }

    /// The current user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The current schema name.
    pub fn current_schema(&self) -> String {
        self.current_schema.lock().clone()
    }

    /// Changes the current schema.
    pub fn set_current_schema(&self, name: impl Into<String>) {
        *self.current_schema.lock() = name.into();
    }

    /// The schema search path.
    pub fn search_path(&self) -> Vec<String> {
        self.search_path.lock().clone()
    }

    /// Replaces the schema search path.
    pub fn set_search_path(&self, path: Vec<String>) {
        *self.search_path.lock() = path;
    }

    /// Allocates a session-unique system identifier.
    pub fn next_system_identifier(&self, prefix: &str) -> String {
        let id = self.next_local_id.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}", prefix, id)
    }

    // ---- shadow views ----

    /// Installs a shadow view in the session-local namespace. The install
    /// is atomic with respect to other sessions: the database meta lock is
    /// held for the critical pair.
    pub fn install_shadow_view(&self, table: Arc<Table>) {
        // the modification-id bump doubles as the meta-lock critical section
        self.database.bump_modification_id();
        trace!(view = table.name(), "shadow view installed");
        self.shadow_views
            .lock()
            .insert(table.name().to_owned(), table);
    }

    /// Removes a shadow view; returns whether it existed.
    pub fn remove_shadow_view(&self, name: &str) -> bool {
        let removed = self.shadow_views.lock().remove(name).is_some();
        if removed {
            self.database.bump_modification_id();
            trace!(view = name, "shadow view removed");
        }
        removed
    }

    /// Looks up a shadow view.
    pub fn find_shadow_view(&self, name: &str) -> Option<Arc<Table>> {
        self.shadow_views.lock().get(name).cloned()
    }

    /// Names of all installed shadow views, sorted; used to verify the
    /// namespace is restored after a failed parse.
    pub fn shadow_view_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.shadow_views.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_view_namespace() {
        let session = Session::new(Database::new("TEST"));
        assert!(session.shadow_view_names().is_empty());

        session.install_shadow_view(Arc::new(Table::view("R", vec![], true)));
        assert!(session.find_shadow_view("R").is_some());
        assert_eq!(session.shadow_view_names(), vec!["R".to_owned()]);

        assert!(session.remove_shadow_view("R"));
        assert!(!session.remove_shadow_view("R"));
        assert!(session.shadow_view_names().is_empty());
    }

    #[test]
    fn schema_state() {
        let session = Session::new(Database::new("TEST"));
        assert_eq!(session.current_schema(), MAIN_SCHEMA);
        session.set_current_schema("APP");
        assert_eq!(session.current_schema(), "APP");
        session.set_search_path(vec!["APP".into(), MAIN_SCHEMA.into()]);
        assert_eq!(session.search_path().len(), 2);
    }
}

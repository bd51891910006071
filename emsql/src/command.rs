//! The command container: owns a prepared command, detects catalog
//! staleness, and re-parses when required.

use tracing::debug;

use emsql_catalog::Session;
use emsql_core::Result;
use emsql_parser::{prepare_command, Prepared};

/// Wraps a [`Prepared`] command, the lazily parsed tail of a
/// multi-statement input, and the database modification id captured when
/// the command was built.
#[derive(Debug)]
pub struct Command {
    prepared: Prepared,
    tail_sql: Option<String>,
    modification_id: u64,
}

impl Command {
    /// Parses the head statement of `sql` into a command.
    pub fn prepare(session: &Session, sql: &str) -> Result<Self> {
        let list = prepare_command(session, sql)?;
        Ok(Self {
            prepared: list.head,
            tail_sql: list.tail_sql,
            modification_id: session.database().modification_id(),
        })
    }

    /// The prepared command.
    pub fn prepared(&self) -> &Prepared {
        &self.prepared
    }

    /// Mutable access for parameter binding.
    pub fn prepared_mut(&mut self) -> &mut Prepared {
        &mut self.prepared
    }

    /// Whether the command must be re-parsed before execution: either the
    /// command asked for it, or the catalog modification id advanced past
    /// the one captured at build time.
    pub fn needs_recompile(&self, session: &Session) -> bool {
        self.prepared.recompile_always
            || session.database().modification_id() > self.modification_id
    }

    /// Re-parses the command from its recovered SQL text.
    pub fn recompile(&mut self, session: &Session) -> Result<()> {
        debug!(sql = self.prepared.sql.as_str(), "recompiling command");
        self.prepared.cleanup(session);
        let list = prepare_command(session, &self.prepared.sql.clone())?;
        self.prepared = list.head;
        self.modification_id = session.database().modification_id();
        Ok(())
    }

    /// Parses the next statement of a multi-statement input, if any. The
    /// tail is parsed on demand so DDL earlier in a script is visible to
    /// the statements after it.
    pub fn next_command(&mut self, session: &Session) -> Result<Option<Command>> {
        match self.tail_sql.take() {
            Some(sql) => Command::prepare(session, &sql).map(Some),
            None => Ok(None),
        }
    }

    /// Releases the command's transient resources (CTE shadow views).
    pub fn close(&self, session: &Session) {
        self.prepared.cleanup(session);
    }
}

//! Prepared commands.

use tracing::debug;

use emsql_ast::Statement;
use emsql_catalog::Session;
use emsql_core::{ErrorKind, FrontendError, Result};

use crate::param::ParameterDef;

/// A fully parsed, name-resolved command.
#[derive(Debug)]
pub struct Prepared {
    /// The command tree.
    pub statement: Statement,
    /// The SQL text, trimmed to the matched range.
    pub sql: String,
    /// The parameter list in ordinal order.
    pub parameters: Vec<ParameterDef>,
    /// Whether the command must re-parse before every execution.
    pub recompile_always: bool,
    /// Shadow views to remove at end of life, already reversed so
    /// destruction order is the inverse of creation order.
    pub cte_cleanups: Vec<String>,
}

impl Prepared {
    /// Re-emits canonical SQL from the command tree.
    pub fn to_sql(&self) -> String {
        self.statement.to_string()
    }

    /// Binds a parameter value by 1-based ordinal.
    pub fn set_parameter(&mut self, ordinal: u32, value: emsql_ast::Value) -> Result<()> {
        let slot = self
            .parameters
            .get_mut(ordinal.saturating_sub(1) as usize)
            .ok_or_else(|| {
                FrontendError::new(
                    ErrorKind::InvalidParameterIndex,
                    format!("Invalid parameter index {}", ordinal),
                )
            })?;
        slot.set_value(value);
        Ok(())
    }

    /// Removes the shadow views this command installed. Safe to call more
    /// than once.
    pub fn cleanup(&self, session: &Session) {
        for name in &self.cte_cleanups {
            if session.remove_shadow_view(name) {
                debug!(view = name.as_str(), "cte shadow view cleaned up");
            }
        }
    }
}

/// The head command of a multi-statement input plus the not-yet-parsed
/// tail. The tail is parsed on demand so DDL earlier in a script is
/// visible to later statements.
#[derive(Debug)]
pub struct CommandList {
    /// The first statement, prepared.
    pub head: Prepared,
    /// The remaining SQL after the separating semicolon, if any.
    pub tail_sql: Option<String>,
}

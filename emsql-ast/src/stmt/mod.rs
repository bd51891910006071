//! Top-level statements.

mod ddl;
mod dml;
mod session;

use core::fmt;

pub use self::{ddl::*, dml::*, session::*};
use crate::query::Query;

/// A top-level statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    // ========================================================================
    // Queries
    // ========================================================================
    /// SELECT / VALUES / TABLE and set operations.
    Query(Box<Query>),

    // ========================================================================
    // Data manipulation
    // ========================================================================
    /// `INSERT INTO ...`
    Insert(InsertStmt),
    /// `UPDATE ...`
    Update(UpdateStmt),
    /// `DELETE FROM ...`
    Delete(DeleteStmt),
    /// `MERGE INTO ...`
    Merge(MergeStmt),
    /// `REPLACE INTO ...`
    Replace(ReplaceStmt),

    // ========================================================================
    // Data definition
    // ========================================================================
    /// `CREATE TABLE ...`
    CreateTable(CreateTableStmt),
    /// `ALTER TABLE ...`
    AlterTable(AlterTableStmt),
    /// `CREATE VIEW ...`
    CreateView(CreateViewStmt),
    /// `CREATE INDEX ...`
    CreateIndex(CreateIndexStmt),
    /// `CREATE SEQUENCE ...`
    CreateSequence(CreateSequenceStmt),
    /// `ALTER SEQUENCE ...`
    AlterSequence(AlterSequenceStmt),
    /// `CREATE DOMAIN ...`
    CreateDomain(CreateDomainStmt),
    /// `ALTER DOMAIN ...`
    AlterDomain(AlterDomainStmt),
    /// `CREATE SCHEMA ...`
    CreateSchema(CreateSchemaStmt),
    /// `CREATE CONSTANT ...`
    CreateConstant(CreateConstantStmt),
    /// `CREATE ALIAS ...`
    CreateAlias(CreateAliasStmt),
    /// `CREATE AGGREGATE ...`
    CreateAggregate(CreateAggregateStmt),
    /// `CREATE TRIGGER ...`
    CreateTrigger(CreateTriggerStmt),
    /// `CREATE ROLE ...`
    CreateRole(CreateRoleStmt),
    /// `CREATE USER ...`
    CreateUser(CreateUserStmt),
    /// `ALTER USER ...`
    AlterUser(AlterUserStmt),
    /// `CREATE SYNONYM ...`
    CreateSynonym(CreateSynonymStmt),
    /// `CREATE LINKED TABLE ...`
    CreateLinkedTable(CreateLinkedTableStmt),
    /// `DROP <object> ...`
    Drop(DropStmt),
    /// `TRUNCATE TABLE ...`
    Truncate(TruncateStmt),
    /// `COMMENT ON ...`
    Comment(CommentStmt),
    /// `GRANT` / `REVOKE`
    GrantRevoke(GrantRevokeStmt),

    // ========================================================================
    // Transactions and session control
    // ========================================================================
    /// Transaction control.
    Transaction(TransactionStmt),
    /// `SET name value`
    Set(SetStmt),
    /// `USE schema`
    Use(UseStmt),
    /// `SHOW ...`
    Show(ShowStmt),
    /// `HELP [topic]`
    Help(HelpStmt),
    /// `CALL expr`
    Call(CallStmt),
    /// `EXPLAIN ...`
    Explain(ExplainStmt),
    /// `PREPARE name AS ...`
    Prepare(PrepareStmt),
    /// `EXECUTE name`
    Execute(ExecuteStmt),
    /// `DEALLOCATE name`
    Deallocate(DeallocateStmt),
    /// `SHUTDOWN ...`
    Shutdown(ShutdownMode),
    /// `CHECKPOINT [SYNC]`
    Checkpoint(CheckpointStmt),
    /// `RUNSCRIPT FROM ...`
    RunScript(RunScriptStmt),
    /// `SCRIPT [TO ...]`
    Script(ScriptStmt),
    /// `ANALYZE ...`
    Analyze(AnalyzeStmt),
    /// An empty statement.
    NoOperation,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(stmt) => write!(f, "{}", stmt),
            Self::Insert(stmt) => write!(f, "{}", stmt),
            Self::Update(stmt) => write!(f, "{}", stmt),
            Self::Delete(stmt) => write!(f, "{}", stmt),
            Self::Merge(stmt) => write!(f, "{}", stmt),
            Self::Replace(stmt) => write!(f, "{}", stmt),
            Self::CreateTable(stmt) => write!(f, "{}", stmt),
            Self::AlterTable(stmt) => write!(f, "{}", stmt),
            Self::CreateView(stmt) => write!(f, "{}", stmt),
            Self::CreateIndex(stmt) => write!(f, "{}", stmt),
            Self::CreateSequence(stmt) => write!(f, "{}", stmt),
            Self::AlterSequence(stmt) => write!(f, "{}", stmt),
            Self::CreateDomain(stmt) => write!(f, "{}", stmt),
            Self::AlterDomain(stmt) => write!(f, "{}", stmt),
            Self::CreateSchema(stmt) => write!(f, "{}", stmt),
            Self::CreateConstant(stmt) => write!(f, "{}", stmt),
            Self::CreateAlias(stmt) => write!(f, "{}", stmt),
            Self::CreateAggregate(stmt) => write!(f, "{}", stmt),
            Self::CreateTrigger(stmt) => write!(f, "{}", stmt),
            Self::CreateRole(stmt) => write!(f, "{}", stmt),
            Self::CreateUser(stmt) => write!(f, "{}", stmt),
            Self::AlterUser(stmt) => write!(f, "{}", stmt),
            Self::CreateSynonym(stmt) => write!(f, "{}", stmt),
            Self::CreateLinkedTable(stmt) => write!(f, "{}", stmt),
            Self::Drop(stmt) => write!(f, "{}", stmt),
            Self::Truncate(stmt) => write!(f, "{}", stmt),
            Self::Comment(stmt) => write!(f, "{}", stmt),
            Self::GrantRevoke(stmt) => write!(f, "{}", stmt),
            Self::Transaction(stmt) => write!(f, "{}", stmt),
            Self::Set(stmt) => write!(f, "{}", stmt),
            Self::Use(stmt) => write!(f, "{}", stmt),
            Self::Show(stmt) => write!(f, "{}", stmt),
            Self::Help(stmt) => write!(f, "{}", stmt),
            Self::Call(stmt) => write!(f, "{}", stmt),
            Self::Explain(stmt) => write!(f, "{}", stmt),
            Self::Prepare(stmt) => write!(f, "{}", stmt),
            Self::Execute(stmt) => write!(f, "{}", stmt),
            Self::Deallocate(stmt) => write!(f, "{}", stmt),
            Self::Shutdown(stmt) => write!(f, "{}", stmt),
            Self::Checkpoint(stmt) => write!(f, "{}", stmt),
            Self::RunScript(stmt) => write!(f, "{}", stmt),
            Self::Script(stmt) => write!(f, "{}", stmt),
            Self::Analyze(stmt) => write!(f, "{}", stmt),
            Self::NoOperation => Ok(()),
        }
    }
}

//! The recursive-descent parser.
//!
//! A [`Parser`] is the parse context of one invocation: the token vector
//! with a cursor, the session handle, the growing parameter list, the
//! expected-token accumulator and the CTE cleanup list. Re-parsing (for
//! expected-list enrichment) constructs a fresh context.

mod ddl;
mod dml;
mod expr;
mod query;
mod session_stmt;
mod types;

use itertools::Itertools;
use tracing::debug;

use emsql_ast::{Ident, ObjectName, Statement, Value};
use emsql_catalog::Session;
use emsql_core::{ErrorKind, FrontendError, Keyword, Result};
use emsql_lexer::{Token, TokenSpan, Tokenizer, Word};

use crate::{
    param::ParamTracker,
    prepared::{CommandList, Prepared},
    resolver::{NameResolver, ResolvedTable},
};

static EOI: Token = Token::EndOfInput;

/// The parser: one instance per parse invocation.
pub struct Parser<'a> {
    session: &'a Session,
    sql: &'a str,
    tokens: Vec<TokenSpan>,
    index: usize,
    last_index: usize,
    pub(crate) params: ParamTracker,
    expected: Option<Vec<String>>,
    pub(crate) recompile_always: bool,
    pub(crate) create_view_depth: u32,
    pub(crate) parse_domain_constraint: bool,
    pub(crate) cte_cleanups: Vec<String>,
    /// The shared pending-schema field mutated by
    /// [`Parser::read_identifier_with_schema`].
    pub(crate) schema_name: Option<String>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given SQL string.
    pub fn new(session: &'a Session, sql: &'a str) -> Result<Self> {
        let tokens = Tokenizer::new(session.config(), sql)
            .tokenize()
            .map_err(|error| error.with_sql(sql))?;
        Ok(Self::with_tokens(session, sql, tokens))
    }

    /// Creates a parser over pre-tokenized input.
    pub fn with_tokens(session: &'a Session, sql: &'a str, tokens: Vec<TokenSpan>) -> Self {
        Self {
            session,
            sql,
            tokens,
            index: 0,
            last_index: 0,
            params: ParamTracker::new(),
            expected: None,
            recompile_always: false,
            create_view_depth: 0,
            parse_domain_constraint: false,
            cte_cleanups: Vec::new(),
            schema_name: None,
        }
    }

    /// Turns on expected-token accumulation for rich error messages.
    fn collect_expected(&mut self) {
        self.expected = Some(Vec::new());
    }

    /// The session this parse runs under.
    pub(crate) fn session(&self) -> &'a Session {
        self.session
    }

    /// A resolver over the session.
    pub(crate) fn resolver(&self) -> NameResolver<'a> {
        NameResolver::new(self.session)
    }

    // ---- token cursor ----

    pub(crate) fn peek_token(&self) -> &Token {
        self.tokens.get(self.index).map_or(&EOI, |span| &span.token)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        self.tokens
            .get(self.index + n)
            .map_or(&EOI, |span| &span.token)
    }

    /// Byte offset of the current token; this is the "last parse index"
    /// reported in errors.
    pub(crate) fn token_start(&self) -> usize {
        self.tokens
            .get(self.index)
            .map_or(self.sql.len(), |span| span.start)
    }

    fn matched_end(&self) -> usize {
        if self.index == 0 {
            0
        } else {
            self.tokens[self.index - 1].end
        }
    }

    pub(crate) fn next_token(&mut self) -> Token {
        let token = self
            .tokens
            .get(self.index)
            .map_or(Token::EndOfInput, |span| span.token.clone());
        self.last_index = self.index;
        if token != Token::EndOfInput {
            self.index += 1;
        }
        token
    }

    pub(crate) fn next_token_if_is(&mut self, expected: &Token) -> bool {
        if self.peek_token() == expected {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_token(&mut self, expected: &Token) -> Result<()> {
        if self.next_token_if_is(expected) {
            Ok(())
        } else {
            self.expected(&expected.to_string())
        }
    }

    // ---- keyword consumption ----

    /// Consumes the next token if it is the expected keyword. A miss is
    /// recorded in the expected-token accumulator when it is active.
    pub(crate) fn parse_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_token().is_keyword(keyword) {
            self.next_token();
            true
        } else {
            self.record_expected(keyword.as_str());
            false
        }
    }

    /// Consumes a run of keywords if they all match.
    pub(crate) fn parse_keywords(&mut self, keywords: &[Keyword]) -> bool {
        for (n, &keyword) in keywords.iter().enumerate() {
            if !self.peek_nth(n).is_keyword(keyword) {
                if n == 0 {
                    self.record_expected(keyword.as_str());
                }
                return false;
            }
        }
        for _ in keywords {
            self.next_token();
        }
        true
    }

    /// Consumes the next token if it is one of the given keywords.
    pub(crate) fn parse_one_of_keywords(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        match self.peek_token().which_keyword(keywords) {
            Some(keyword) => {
                self.next_token();
                Some(keyword)
            }
            None => {
                for keyword in keywords {
                    self.record_expected(keyword.as_str());
                }
                None
            }
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.parse_keyword(keyword) {
            Ok(())
        } else {
            self.expected(keyword.as_str())
        }
    }

    pub(crate) fn expect_keywords(&mut self, keywords: &[Keyword]) -> Result<()> {
        for &keyword in keywords {
            self.expect_keyword(keyword)?;
        }
        Ok(())
    }

    /// Consumes an identifier-like word equal to the given upper-case
    /// spelling; used for contextual words that are not in the keyword
    /// table (`RR`, `SAMPLE_SIZE`, ...).
    pub(crate) fn parse_contextual(&mut self, upper: &str) -> bool {
        match self.peek_token() {
            Token::Word(word) if !word.quoted && word.value.eq_ignore_ascii_case(upper) => {
                self.next_token();
                true
            }
            _ => {
                self.record_expected(upper);
                false
            }
        }
    }

    // ---- error reporting ----

    fn record_expected(&mut self, what: &str) {
        if let Some(expected) = &mut self.expected {
            expected.push(what.to_owned());
        }
    }

    /// Reports the current token as unexpected.
    pub(crate) fn expected<R>(&mut self, what: &str) -> Result<R> {
        self.record_expected(what);
        let offset = self.token_start();
        let found = self.peek_token().clone();
        Err(FrontendError::syntax(
            offset,
            format!("Syntax error: expected {}, found \"{}\"", what, found),
        ))
    }

    pub(crate) fn syntax_error<R>(&self, message: impl Into<String>) -> Result<R> {
        Err(FrontendError::syntax(self.token_start(), message.into()))
    }

    // ---- list helpers ----

    /// Parses a comma-separated list of one or more items.
    pub(crate) fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T>,
    {
        let mut values = Vec::new();
        loop {
            values.push(f(self)?);
            if !self.next_token_if_is(&Token::Comma) {
                break;
            }
        }
        Ok(values)
    }

    /// Parses `( item, item, ... )`.
    pub(crate) fn parse_parenthesized<T, F>(&mut self, f: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T>,
    {
        self.expect_token(&Token::LeftParen)?;
        let values = self.parse_comma_separated(f)?;
        self.expect_token(&Token::RightParen)?;
        Ok(values)
    }

    // ---- identifiers ----

    /// Parses an identifier: a quoted word, or an unquoted word that is not
    /// a reserved keyword.
    pub(crate) fn parse_identifier(&mut self) -> Result<Ident> {
        match self.peek_token() {
            Token::Word(word) if usable_as_identifier(word) => {
                let word = word.clone();
                self.next_token();
                Ok(to_ident(word))
            }
            _ => self.expected("<identifier>"),
        }
    }

    /// Parses a period-separated identifier chain.
    pub(crate) fn parse_object_name(&mut self) -> Result<ObjectName> {
        let mut parts = vec![self.parse_identifier()?];
        while self.peek_token() == &Token::Period
            && matches!(self.peek_nth(1), Token::Word(word) if usable_as_identifier(word))
        {
            self.next_token();
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName(parts))
    }

    /// Reads `[schema.]name`, updating the shared `schema_name` field.
    ///
    /// Passing `None` as the default resets the pending schema even when a
    /// default was previously in effect. The original implementation
    /// behaves the same way (flagged by its author as a likely bug); the
    /// observable behavior is preserved here rather than silently changed.
    pub(crate) fn read_identifier_with_schema(&mut self, default: Option<&str>) -> Result<Ident> {
        self.schema_name = default.map(str::to_owned);
        let first = self.parse_identifier()?;
        if self.peek_token() == &Token::Period
            && matches!(self.peek_nth(1), Token::Word(word) if usable_as_identifier(word))
        {
            self.next_token();
            let mut schema = first;
            let mut name = self.parse_identifier()?;
            if self.peek_token() == &Token::Period
                && matches!(self.peek_nth(1), Token::Word(word) if usable_as_identifier(word))
            {
                // catalog.schema.name: validate and discard the catalog
                self.next_token();
                self.check_catalog(&schema)?;
                schema = name;
                name = self.parse_identifier()?;
            }
            self.schema_name = Some(schema.value);
            Ok(name)
        } else {
            Ok(first)
        }
    }

    /// Validates a leading catalog segment against the database short name.
    pub(crate) fn check_catalog(&mut self, catalog: &Ident) -> Result<()> {
        if self.session.config().ignore_catalogs {
            return Ok(());
        }
        let short_name = self.session.database().short_name().to_uppercase();
        if catalog.value.to_uppercase() != short_name {
            return Err(FrontendError::new(
                ErrorKind::DatabaseNotFound,
                format!("Database \"{}\" not found", catalog.value),
            ));
        }
        Ok(())
    }

    /// Splits an object name into (schema, unqualified name), validating
    /// and discarding a catalog prefix.
    pub(crate) fn schema_and_name(&mut self, name: &ObjectName) -> Result<(Option<String>, String)> {
        let segments = &name.0;
        match segments.len() {
            1 => Ok((None, segments[0].value.clone())),
            2 => Ok((Some(segments[0].value.clone()), segments[1].value.clone())),
            3 => {
                self.check_catalog(&segments[0])?;
                Ok((Some(segments[1].value.clone()), segments[2].value.clone()))
            }
            _ => self.syntax_error(format!("Invalid object name \"{}\"", name)),
        }
    }

    /// Resolves an object name to a table.
    pub(crate) fn resolve_table_name(&mut self, name: &ObjectName) -> Result<ResolvedTable> {
        let (schema, table) = self.schema_and_name(name)?;
        self.resolver().resolve_table(schema.as_deref(), &table)
    }

    // ---- statement dispatch ----

    /// Parses one statement; dispatch is driven by the first significant
    /// keyword.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        let keyword = match self.peek_token() {
            Token::EndOfInput => return Ok(Statement::NoOperation),
            Token::LeftParen => {
                return Ok(Statement::Query(Box::new(self.parse_query()?)));
            }
            Token::Word(Word {
                keyword: Some(keyword),
                ..
            }) => *keyword,
            _ => return self.expected("a statement"),
        };
        match keyword {
            Keyword::SELECT | Keyword::VALUES | Keyword::TABLE | Keyword::WITH => {
                Ok(Statement::Query(Box::new(self.parse_query()?)))
            }
            Keyword::FROM => {
                // a clear error for the common `SELECT * FROM` truncation
                self.expected("SELECT")
            }
            Keyword::INSERT => self.parse_insert_stmt().map(Statement::Insert),
            Keyword::UPDATE => self.parse_update_stmt().map(Statement::Update),
            Keyword::DELETE => self.parse_delete_stmt().map(Statement::Delete),
            Keyword::MERGE => self.parse_merge_stmt().map(Statement::Merge),
            Keyword::REPLACE => {
                if !self.session.config().flags.replace_into {
                    return self.expected("a statement");
                }
                self.parse_replace_stmt().map(Statement::Replace)
            }
            Keyword::CREATE => self.parse_create_stmt(),
            Keyword::ALTER => self.parse_alter_stmt(),
            Keyword::DROP => self.parse_drop_stmt().map(Statement::Drop),
            Keyword::TRUNCATE => self.parse_truncate_stmt().map(Statement::Truncate),
            Keyword::COMMENT => self.parse_comment_stmt().map(Statement::Comment),
            Keyword::GRANT | Keyword::REVOKE => {
                self.parse_grant_revoke_stmt().map(Statement::GrantRevoke)
            }
            Keyword::SET => self.parse_set_stmt(),
            Keyword::USE => self.parse_use_stmt().map(Statement::Use),
            Keyword::SHOW => self.parse_show_stmt(),
            Keyword::HELP => self.parse_help_stmt().map(Statement::Help),
            Keyword::CALL => self.parse_call_stmt().map(Statement::Call),
            Keyword::EXPLAIN => self.parse_explain_stmt().map(Statement::Explain),
            Keyword::PREPARE => self.parse_prepare_stmt().map(Statement::Prepare),
            Keyword::EXEC => {
                if !self.session.config().flags.exec_is_procedure_call {
                    return self.expected("a statement");
                }
                self.parse_execute_stmt().map(Statement::Execute)
            }
            Keyword::EXECUTE => self.parse_execute_stmt().map(Statement::Execute),
            Keyword::DEALLOCATE => self.parse_deallocate_stmt().map(Statement::Deallocate),
            Keyword::BEGIN | Keyword::START | Keyword::COMMIT | Keyword::ROLLBACK
            | Keyword::SAVEPOINT | Keyword::RELEASE => {
                self.parse_transaction_stmt().map(Statement::Transaction)
            }
            Keyword::SHUTDOWN => self.parse_shutdown_stmt().map(Statement::Shutdown),
            Keyword::CHECKPOINT => self.parse_checkpoint_stmt().map(Statement::Checkpoint),
            Keyword::RUNSCRIPT => self.parse_runscript_stmt().map(Statement::RunScript),
            Keyword::SCRIPT => self.parse_script_stmt().map(Statement::Script),
            Keyword::ANALYZE => self.parse_analyze_stmt().map(Statement::Analyze),
            _ => self.expected("a statement"),
        }
    }

    // ---- command emission ----

    /// Parses a single statement and emits a [`Prepared`]; a trailing
    /// semicolon is not accepted.
    fn parse_single(&mut self) -> Result<Prepared> {
        let statement = self.parse_statement()?;
        self.parse_brace_initializer()?;
        if self.peek_token() != &Token::EndOfInput {
            return self.expected("end of statement");
        }
        Ok(self.emit(statement))
    }

    /// Parses the head of a possibly multi-statement input.
    fn parse_command_head(&mut self) -> Result<CommandList> {
        let statement = self.parse_statement()?;
        self.parse_brace_initializer()?;
        if !matches!(self.peek_token(), Token::SemiColon | Token::EndOfInput) {
            return self.expected("end of statement");
        }
        // emit before consuming the separator so the recovered SQL text
        // covers the head statement only
        let head = self.emit(statement);
        let mut tail_sql = None;
        if self.next_token_if_is(&Token::SemiColon) {
            // skip empty statements between separators
            while self.next_token_if_is(&Token::SemiColon) {}
            if self.peek_token() != &Token::EndOfInput {
                // the tail is parsed lazily, preserving dependency order
                // between DDL and the statements after it
                tail_sql = Some(self.sql[self.token_start()..].to_owned());
            }
        }
        Ok(CommandList { head, tail_sql })
    }

    /// `{1: value, 2: value, ...}` at statement tail: binds literal values
    /// to the parameters and clears the parameter list, so the command
    /// appears parameter-free downstream.
    fn parse_brace_initializer(&mut self) -> Result<()> {
        if !self.next_token_if_is(&Token::LeftBrace) {
            return Ok(());
        }
        loop {
            let ordinal = match self.next_token() {
                Token::Integer(n) if n > 0 => n as u32,
                _ => return self.expected("a parameter index"),
            };
            self.expect_token(&Token::Colon)?;
            let value = self.parse_literal_value()?;
            let _ = (ordinal, value);
            if !self.next_token_if_is(&Token::Comma) {
                break;
            }
        }
        self.expect_token(&Token::RightBrace)?;
        self.params.clear();
        Ok(())
    }

    /// Parses a literal token into a [`Value`].
    pub(crate) fn parse_literal_value(&mut self) -> Result<Value> {
        match self.next_token() {
            Token::Integer(v) => Ok(Value::Int(v)),
            Token::Bigint(v) => Ok(Value::Bigint(v)),
            Token::Numeric(v) => Ok(Value::Numeric(v)),
            Token::Approximate(v) => Ok(Value::Decfloat(v)),
            Token::CharString(v) => Ok(Value::CharString(v)),
            Token::BinaryString(v) => Ok(Value::BinaryString(v)),
            Token::Word(word) if word.keyword == Some(Keyword::NULL) => Ok(Value::Null),
            Token::Word(word) if word.keyword == Some(Keyword::TRUE) => Ok(Value::Boolean(true)),
            Token::Word(word) if word.keyword == Some(Keyword::FALSE) => Ok(Value::Boolean(false)),
            _ => self.expected("a literal"),
        }
    }

    fn emit(&mut self, statement: Statement) -> Prepared {
        let end = self.matched_end();
        let sql = self.sql[..end].trim().to_owned();
        let params = std::mem::take(&mut self.params);
        let mut cleanups = std::mem::take(&mut self.cte_cleanups);
        // destruction order is the inverse of creation order
        cleanups.reverse();
        let prepared = Prepared {
            statement,
            sql,
            parameters: params.finish(),
            recompile_always: self.recompile_always,
            cte_cleanups: cleanups,
        };
        debug!(
            sql = prepared.sql.as_str(),
            parameters = prepared.parameters.len(),
            recompile = prepared.recompile_always,
            "command prepared"
        );
        prepared
    }

    /// Removes every shadow view this parse installed; called on all error
    /// paths before the error propagates.
    fn cleanup_shadow_views(&mut self) {
        for name in self.cte_cleanups.drain(..).rev() {
            self.session.remove_shadow_view(&name);
        }
    }

    fn take_expected(&mut self) -> Vec<String> {
        self.expected
            .take()
            .unwrap_or_default()
            .into_iter()
            .unique()
            .collect()
    }
}

fn usable_as_identifier(word: &Word) -> bool {
    word.quoted || word.keyword.map_or(true, |keyword| !keyword.is_reserved())
}

fn to_ident(word: Word) -> Ident {
    Ident {
        value: word.value,
        quoted: word.quoted,
    }
}

// ---- entry points ----

/// Parses and resolves a single statement; a trailing semicolon after the
/// statement is a syntax error.
pub fn prepare(session: &Session, sql: &str) -> Result<Prepared> {
    run_with_reparse(session, sql, |parser| parser.parse_single())
}

/// Parses the first statement of a possibly multi-statement input; the
/// remainder after the separating `;` is carried for lazy parsing.
pub fn prepare_command(session: &Session, sql: &str) -> Result<CommandList> {
    run_with_reparse(session, sql, |parser| parser.parse_command_head())
}

/// Parses a standalone expression (no statement framing).
pub fn parse_expression(session: &Session, sql: &str) -> Result<emsql_ast::Expr> {
    run_with_reparse(session, sql, |parser| {
        let expr = parser.parse_expr()?;
        if parser.peek_token() != &Token::EndOfInput {
            return parser.expected("end of expression");
        }
        Ok(expr)
    })
}

/// Parses a standalone expression in which the `VALUE` keyword stands for
/// the domain value.
pub fn parse_domain_constraint_expression(session: &Session, sql: &str) -> Result<emsql_ast::Expr> {
    run_with_reparse(session, sql, |parser| {
        parser.parse_domain_constraint = true;
        let expr = parser.parse_expr()?;
        parser.parse_domain_constraint = false;
        if parser.peek_token() != &Token::EndOfInput {
            return parser.expected("end of expression");
        }
        Ok(expr)
    })
}

/// Parses a single identifier chain and resolves it to a table.
pub fn parse_table_name(session: &Session, sql: &str) -> Result<ResolvedTable> {
    run_with_reparse(session, sql, |parser| {
        let name = parser.parse_object_name()?;
        if parser.peek_token() != &Token::EndOfInput {
            return parser.expected("end of name");
        }
        parser.resolve_table_name(&name)
    })
}

/// The contents of a parsed parenthesized column list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColumnList {
    /// A list of column names.
    Names(Vec<Ident>),
    /// A list of 1-based column positions.
    Positions(Vec<u32>),
}

/// Parses a parenthesized list starting at `offset`; whether the contents
/// are identifiers or positions is decided by the first token inside.
pub fn parse_column_list(session: &Session, sql: &str, offset: usize) -> Result<ColumnList> {
    let tokens = Tokenizer::new(session.config(), sql)
        .stop_on_close_paren()
        .tokenize_from(offset)
        .map_err(|error| error.with_sql(sql))?;
    let mut parser = Parser::with_tokens(session, sql, tokens);
    parser.expect_token(&Token::LeftParen).map_err(|e| e.with_sql(sql))?;
    let result = if matches!(parser.peek_token(), Token::Integer(_)) {
        let positions = parser.parse_comma_separated(|parser| match parser.next_token() {
            Token::Integer(n) if n > 0 => Ok(n as u32),
            _ => parser.expected("a column position"),
        });
        positions.map(ColumnList::Positions)
    } else {
        parser
            .parse_comma_separated(Parser::parse_identifier)
            .map(ColumnList::Names)
    };
    let result = result.and_then(|list| {
        parser.expect_token(&Token::RightParen)?;
        Ok(list)
    });
    result.map_err(|error| error.with_sql(sql))
}

/// Runs a parse; on a plain syntax error the input is re-parsed with the
/// expected-token accumulator on to produce a richer message. Every error
/// path removes transiently installed shadow views and attaches the SQL
/// text before propagation.
fn run_with_reparse<T>(
    session: &Session,
    sql: &str,
    mut f: impl FnMut(&mut Parser<'_>) -> Result<T>,
) -> Result<T> {
    let mut parser = Parser::new(session, sql)?;
    match f(&mut parser) {
        Ok(value) => Ok(value),
        Err(error) => {
            parser.cleanup_shadow_views();
            if error.kind != ErrorKind::SyntaxError {
                // name-resolution and other errors do not trigger a re-parse
                return Err(error.with_sql(sql));
            }
            let mut retry = match Parser::new(session, sql) {
                Ok(retry) => retry,
                Err(lex_error) => return Err(lex_error),
            };
            retry.collect_expected();
            match f(&mut retry) {
                // the second pass can only succeed if the grammar is
                // nondeterministic; treat it as the result
                Ok(value) => Ok(value),
                Err(second) => {
                    retry.cleanup_shadow_views();
                    let offset = second.offset.unwrap_or_else(|| retry.token_start());
                    let expected = retry.take_expected();
                    if expected.is_empty() || second.kind != ErrorKind::SyntaxError {
                        Err(second.with_sql(sql))
                    } else {
                        let mut error = FrontendError::syntax_expected(offset, expected);
                        // keep the specific first-pass message in front of
                        // the accumulated continuations
                        error.message =
                            format!("{}; expected {}", second.message, error.expected.join(", "));
                        Err(error.with_sql(sql))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use emsql_ast::{
        AlterTableAction, ColumnConstraint, DataType, Expr, FunctionKind, PrimaryType,
        SetOperator, Statement, TableFactor, Value,
    };
    use emsql_catalog::{Column, Database, Domain, FunctionAlias, Sequence, Table, MAIN_SCHEMA};
    use emsql_core::{AllowLiterals, CompatMode, ErrorKind, ParserConfig};

    use super::*;

    fn test_database() -> Arc<Database> {
        let database = Database::new("TEST");
        database
            .add_table(
                MAIN_SCHEMA,
                Table::new(
                    "T",
                    vec![
                        Column::new("A", DataType::simple(PrimaryType::Integer)),
                        Column::new("B", DataType::simple(PrimaryType::Varchar)),
                    ],
                ),
            )
            .unwrap();
        database.add_sequence(MAIN_SCHEMA, Sequence::new("SEQ"));
        database.add_domain(
            MAIN_SCHEMA,
            Domain::new("EMAIL", DataType::with_precision(PrimaryType::Varchar, 200)),
        );
        database.add_function(
            MAIN_SCHEMA,
            FunctionAlias::new("MY_FUNC", "org.example.Functions.myFunc"),
        );
        database.add_function(
            MAIN_SCHEMA,
            FunctionAlias::new("MY_RAND", "org.example.Functions.myRand").nondeterministic(),
        );
        database
    }

    fn test_session() -> Session {
        Session::new(test_database())
    }

    #[track_caller]
    fn parse_ok(session: &Session, sql: &str) -> Statement {
        match prepare(session, sql) {
            Ok(prepared) => prepared.statement,
            Err(error) => panic!("failed to parse {:?}: {}", sql, error),
        }
    }

    #[test]
    fn statement_dispatch_covers_the_grammar() {
        let session = test_session();
        for sql in [
            "SELECT A, B AS ALIAS_B FROM T WHERE A BETWEEN 1 AND 10",
            "SELECT CASE WHEN A > 0 THEN 'pos' ELSE 'neg' END FROM T",
            "SELECT CAST(A AS BIGINT), B FROM T",
            "SELECT * FROM T WHERE A IN (SELECT A FROM T)",
            "SELECT * FROM T WHERE B LIKE 'x%' ESCAPE '\\'",
            "SELECT * FROM T WHERE EXISTS (SELECT 1 FROM T)",
            "SELECT * FROM T WHERE A = ANY (SELECT A FROM T)",
            "SELECT * FROM T LEFT JOIN T AS T2 ON T.A = T2.A",
            "SELECT * FROM (SELECT A FROM T) AS SUB",
            "SELECT * FROM SYSTEM_RANGE(1, 10)",
            "SELECT * FROM T USE INDEX (IDX_A)",
            "SELECT COUNT(*), SUM(A) FROM T GROUP BY B HAVING COUNT(*) > 1",
            "SELECT A FROM T GROUP BY (A, B), () QUALIFY A > 1",
            "SELECT ROW_NUMBER() OVER (ORDER BY A) FROM T",
            "SELECT LISTAGG(B) WITHIN GROUP (ORDER BY A) FROM T",
            "SELECT A FROM T WINDOW W AS (PARTITION BY B) ORDER BY A OFFSET 1 ROWS \
             FETCH FIRST 10 ROWS ONLY",
            "SELECT DATE '2024-05-01', TIME '12:00:00', TIMESTAMP '2024-05-01 12:00:00'",
            "SELECT INTERVAL '1-2' YEAR TO MONTH",
            "SELECT NEXT VALUE FOR SEQ",
            "SELECT TRIM(LEADING ' ' FROM B), SUBSTRING(B FROM 1 FOR 3) FROM T",
            "SELECT EXTRACT(YEAR FROM DATE '2024-05-01')",
            "VALUES (1, 'a'), (2, 'b')",
            "TABLE T",
            "INSERT INTO T(A, B) VALUES (1, 'x')",
            "INSERT INTO T SELECT A, B FROM T",
            "INSERT INTO T DEFAULT VALUES",
            "UPDATE T SET A = 1, B = 'y' WHERE A = 0",
            "UPDATE T SET (A, B) = (1, 'z')",
            "DELETE FROM T WHERE A < 0",
            "CREATE TABLE U(ID INT PRIMARY KEY, NAME VARCHAR(50))",
            "CREATE TEMPORARY TABLE TMP(A INT) ON COMMIT DELETE ROWS",
            "CREATE TABLE CTAS AS SELECT A FROM T",
            "CREATE OR REPLACE VIEW V AS SELECT A FROM T",
            "CREATE UNIQUE INDEX IDX ON T(A DESC) INCLUDE(B)",
            "CREATE INDEX ON T(A)",
            "CREATE SEQUENCE SEQ2 START WITH 10 INCREMENT BY 5 NO MAXVALUE CYCLE",
            "CREATE DOMAIN POSITIVE AS INTEGER CHECK (VALUE > 0)",
            "CREATE SCHEMA APP AUTHORIZATION SA",
            "CREATE CONSTANT PI_ISH VALUE 3.14",
            "CREATE ALIAS REVERSE DETERMINISTIC FOR 'org.example.Fn.reverse'",
            "CREATE AGGREGATE MEDIAN FOR 'org.example.Median'",
            "CREATE TRIGGER TRG BEFORE INSERT, UPDATE ON T FOR EACH ROW CALL 'org.example.Trg'",
            "CREATE ROLE READERS",
            "CREATE USER ALICE PASSWORD 'secret' ADMIN",
            "CREATE SYNONYM T_ALIAS FOR T",
            "CREATE LINKED TABLE REMOTE('org.h2.Driver', 'jdbc:h2:mem:', 'sa', '', 'T')",
            "ALTER TABLE T ADD COLUMN C INT",
            "ALTER TABLE T ADD CONSTRAINT POSITIVE_A CHECK (A >= 0)",
            "ALTER TABLE T ALTER COLUMN A SET DEFAULT 0",
            "ALTER TABLE T RENAME TO T_RENAMED",
            "ALTER SEQUENCE SEQ RESTART WITH 100",
            "ALTER DOMAIN EMAIL SET DEFAULT ''",
            "ALTER USER ALICE SET PASSWORD 'next'",
            "DROP TABLE IF EXISTS GONE",
            "DROP VIEW V1, V2 CASCADE",
            "DROP SEQUENCE SEQ",
            "TRUNCATE TABLE T",
            "COMMENT ON TABLE T IS 'fact table'",
            "COMMENT ON COLUMN T.A IS NULL",
            "GRANT SELECT, UPDATE ON T TO READERS",
            "GRANT READERS TO ALICE",
            "REVOKE SELECT ON T FROM READERS",
            "SET AUTOCOMMIT TRUE",
            "SET SCHEMA_SEARCH_PATH PUBLIC, APP",
            "SET NON_KEYWORDS LIMIT, TOP",
            "USE PUBLIC",
            "SHOW AUTOCOMMIT",
            "HELP SELECT",
            "CALL 1 + 1",
            "EXPLAIN SELECT A FROM T",
            "EXPLAIN ANALYZE SELECT A FROM T",
            "PREPARE Q AS SELECT A FROM T WHERE A = ?",
            "EXECUTE Q(1)",
            "DEALLOCATE Q",
            "BEGIN",
            "START TRANSACTION",
            "COMMIT WORK",
            "ROLLBACK",
            "SAVEPOINT SP1",
            "RELEASE SAVEPOINT SP1",
            "ROLLBACK TO SAVEPOINT SP1",
            "SHUTDOWN COMPACT",
            "CHECKPOINT SYNC",
            "RUNSCRIPT FROM 'backup.sql'",
            "SCRIPT TO 'backup.sql'",
            "ANALYZE TABLE T SAMPLE_SIZE 1000",
        ] {
            parse_ok(&session, sql);
        }
    }

    #[test]
    fn set_operations_build_left_associative_trees() {
        let session = test_session();
        let statement = parse_ok(
            &session,
            "SELECT A FROM T UNION SELECT A FROM T EXCEPT SELECT A FROM T",
        );
        let Statement::Query(query) = statement else {
            panic!("expected a query");
        };
        let emsql_ast::QueryBody::SetOp(outer) = query.body else {
            panic!("expected a set operation");
        };
        assert_eq!(outer.op, SetOperator::Except);
        let emsql_ast::QueryBody::SetOp(inner) = outer.left else {
            panic!("expected a nested set operation on the left");
        };
        assert_eq!(inner.op, SetOperator::Union);
    }

    #[test]
    fn domain_reference_inherits_base_type() {
        let session = test_session();
        let statement = parse_ok(&session, "CREATE TABLE M(ADDR EMAIL)");
        let Statement::CreateTable(create) = statement else {
            panic!("expected CREATE TABLE");
        };
        let data_type = create.columns[0].data_type.as_ref().unwrap();
        assert_eq!(data_type.primary, PrimaryType::Varchar);
        assert_eq!(data_type.precision, Some(200));
        assert!(matches!(
            data_type.ext.as_deref(),
            Some(emsql_ast::ExtTypeInfo::Domain { .. })
        ));

        let error = prepare(&session, "CREATE TABLE M(ADDR NO_SUCH_TYPE)").unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnknownDataType);
    }

    #[test]
    fn user_function_resolution_and_recompile_flag() {
        let session = test_session();
        let prepared = prepare(&session, "SELECT MY_FUNC(A) FROM T").unwrap();
        assert!(!prepared.recompile_always);

        // non-deterministic aliases force recompilation
        let prepared = prepare(&session, "SELECT MY_RAND() FROM T").unwrap();
        assert!(prepared.recompile_always);

        let error = prepare(&session, "SELECT NO_SUCH_FUNC(A) FROM T").unwrap_err();
        assert_eq!(error.kind, ErrorKind::FunctionNotFound);
    }

    #[test]
    fn builtin_and_compat_functions() {
        let session = test_session();
        let statement = parse_ok(&session, "SELECT ABS(A), COALESCE(B, 'x') FROM T");
        let Statement::Query(query) = statement else {
            panic!("expected a query");
        };
        let emsql_ast::QueryBody::Select(select) = query.body else {
            panic!("expected a select");
        };
        let emsql_ast::SelectItem::UnnamedExpr(Expr::Function(abs)) = &select.projection[0] else {
            panic!("expected a function");
        };
        assert!(matches!(abs.kind, FunctionKind::Builtin(_)));

        let statement = parse_ok(&session, "SELECT NVL(B, 'x') FROM T");
        let Statement::Query(query) = statement else {
            panic!("expected a query");
        };
        let emsql_ast::QueryBody::Select(select) = query.body else {
            panic!("expected a select");
        };
        let emsql_ast::SelectItem::UnnamedExpr(Expr::Function(nvl)) = &select.projection[0] else {
            panic!("expected a function");
        };
        assert!(matches!(nvl.kind, FunctionKind::Compatibility(_)));
    }

    #[test]
    fn literals_can_be_restricted() {
        let database = test_database();
        let mut config = ParserConfig::default();
        config.allow_literals = AllowLiterals::Numbers;
        let session = Session::with_config(database, config);
        assert!(prepare(&session, "SELECT A + 1 FROM T").is_ok());
        let error = prepare(&session, "SELECT 'text' FROM T").unwrap_err();
        assert_eq!(error.kind, ErrorKind::LiteralsAreNotAllowed);
    }

    #[test]
    fn brace_initializer_clears_parameters() {
        let session = test_session();
        let prepared = prepare(&session, "SELECT A FROM T WHERE A = ?1 {1: 42}").unwrap();
        assert!(prepared.parameters.is_empty());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let session = test_session();
        let error = prepare(&session, "SET MODE NO_SUCH_MODE").unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnknownMode);
        assert!(prepare(&session, "SET MODE REGULAR").is_ok());
    }

    #[test]
    fn with_ties_requires_order_by() {
        let session = test_session();
        let error = prepare(
            &session,
            "SELECT A FROM T FETCH FIRST 3 ROWS WITH TIES",
        )
        .unwrap_err();
        assert_eq!(error.kind, ErrorKind::WithTiesWithoutOrderBy);
        assert!(prepare(
            &session,
            "SELECT A FROM T ORDER BY A FETCH FIRST 3 ROWS WITH TIES"
        )
        .is_ok());
    }

    #[test]
    fn aggregates_rejected_in_row_limits() {
        let session = test_session();
        assert!(prepare(&session, "SELECT TOP COUNT(*) A FROM T").is_err());
        assert!(prepare(&session, "SELECT A FROM T OFFSET COUNT(*) ROWS").is_err());
    }

    #[test]
    fn alter_table_drop_column_accepts_paren_list() {
        let session = test_session();
        let statement = parse_ok(&session, "ALTER TABLE T DROP (A, B)");
        let Statement::AlterTable(alter) = statement else {
            panic!("expected ALTER TABLE");
        };
        let AlterTableAction::DropColumn(columns) = alter.action else {
            panic!("expected DROP COLUMN");
        };
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn data_change_delta_table() {
        let session = test_session();
        let statement = parse_ok(
            &session,
            "SELECT * FROM FINAL TABLE (INSERT INTO T(A) VALUES (1))",
        );
        let Statement::Query(query) = statement else {
            panic!("expected a query");
        };
        let emsql_ast::QueryBody::Select(select) = query.body else {
            panic!("expected a select");
        };
        assert!(matches!(
            select.from[0].relation,
            TableFactor::DataChangeDelta { .. }
        ));
    }

    #[test]
    fn domain_constraint_expression_allows_value_keyword() {
        let session = test_session();
        let expr = parse_domain_constraint_expression(&session, "VALUE > 0").unwrap();
        let Expr::Comparison(comparison) = expr else {
            panic!("expected a comparison");
        };
        assert_eq!(*comparison.left, Expr::DomainValue);

        // outside domain constraints VALUE does not parse as a placeholder
        assert!(parse_expression(&session, "VALUE > 0").is_err());
    }

    #[test]
    fn read_identifier_with_schema_resets_pending_schema() {
        let session = test_session();
        let mut parser = Parser::new(&session, "X").unwrap();
        parser.schema_name = Some("LEFT_OVER".to_owned());
        // passing no default resets the shared field even though a value
        // was in effect; this mirrors the original observable behavior
        let ident = parser.read_identifier_with_schema(None).unwrap();
        assert_eq!(ident.value, "X");
        assert_eq!(parser.schema_name, None);
    }

    #[test]
    fn legacy_escaped_string_literal_in_every_mode() {
        // recognition does not depend on the compatibility mode; the
        // escapes are applied by the parser
        let session = test_session();
        let expr = parse_expression(&session, r"E'a\nb'").unwrap();
        assert_eq!(expr, Expr::Literal(Value::CharString("a\nb".into())));

        // in PostgreSQL mode the lexer already decoded the body
        let session = Session::with_config(
            test_database(),
            ParserConfig::for_mode(CompatMode::PostgreSql),
        );
        let expr = parse_expression(&session, r"E'a\nb'").unwrap();
        assert_eq!(expr, Expr::Literal(Value::CharString("a\nb".into())));
    }

    #[test]
    fn named_column_constraint_is_kept() {
        let session = test_session();
        let statement = parse_ok(
            &session,
            "CREATE TABLE N1(ID INT CONSTRAINT PK_ID PRIMARY KEY, K INT CHECK (K > 0))",
        );
        let Statement::CreateTable(create) = &statement else {
            panic!("expected CREATE TABLE");
        };
        let named = &create.columns[0].constraints[0];
        assert_eq!(named.name.as_ref().map(|n| n.value.as_str()), Some("PK_ID"));
        assert!(matches!(
            named.constraint,
            ColumnConstraint::PrimaryKey { .. }
        ));
        let unnamed = &create.columns[1].constraints[0];
        assert_eq!(unnamed.name, None);
        // the name round-trips through re-emission
        assert!(statement
            .to_string()
            .contains("CONSTRAINT PK_ID PRIMARY KEY"));
    }

    #[test]
    fn joins_flatten_left_deep_unless_order_is_forced() {
        let sql = "SELECT * FROM (T JOIN T AS T2 ON T.A = T2.A) JOIN T AS T3 ON T2.A = T3.A";
        let from_item = |statement: Statement| {
            let Statement::Query(query) = statement else {
                panic!("expected a query");
            };
            let emsql_ast::QueryBody::Select(select) = query.body else {
                panic!("expected a select");
            };
            select.from.into_iter().next().expect("one FROM item")
        };

        // by default the parenthesized join folds into a left-deep chain
        let session = test_session();
        let filter = from_item(parse_ok(&session, sql));
        assert!(matches!(filter.relation, TableFactor::Table { .. }));
        assert_eq!(filter.joins.len(), 2);

        // forcing the join order preserves the written structure
        let mut config = ParserConfig::default();
        config.force_join_order = true;
        let session = Session::with_config(test_database(), config);
        let filter = from_item(parse_ok(&session, sql));
        assert!(matches!(filter.relation, TableFactor::NestedJoin(_)));
        assert_eq!(filter.joins.len(), 1);
    }

    #[test]
    fn constant_values_fold_during_parse() {
        let session = test_session();
        let expr = parse_expression(&session, "1 + 2 * 3").unwrap();
        // constants stay literal-valued; evaluation is the executor's job
        let Expr::BinaryOp(add) = expr else {
            panic!("expected an addition");
        };
        assert_eq!(*add.left, Expr::Literal(Value::Int(1)));
    }
}

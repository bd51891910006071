//! Session statements: SET, USE, SHOW, HELP, CALL, EXPLAIN, prepared
//! statement control, transactions and administration commands.

use emsql_ast::{
    AnalyzeStmt, CallStmt, CheckpointStmt, DeallocateStmt, ExecuteStmt, Expr, ExplainStmt,
    HelpStmt, Ident, PrepareStmt, RunScriptStmt, ScriptStmt, SetStmt, ShowStmt, ShutdownMode,
    Statement, TransactionStmt, UseStmt, Value,
};
use emsql_core::{CompatMode, ErrorKind, FrontendError, Keyword, Result};
use emsql_lexer::{Token, Word};

use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_set_stmt(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::SET)?;
        let mut name = match self.next_token() {
            Token::Word(word) => word.value.to_uppercase(),
            _ => return self.expected("a setting name"),
        };
        if name == "LOGSIZE" && self.session().config().flags.logsize_alias {
            name = "MAX_LOG_SIZE".to_owned();
        }
        if name == "MODE" {
            let mode = self.parse_setting_value()?;
            let text = match &mode {
                Expr::Literal(Value::CharString(text)) => text.clone(),
                Expr::Column(column) => column.name.value.clone(),
                _ => return self.expected("a mode name"),
            };
            if text.parse::<CompatMode>().is_err() {
                return Err(FrontendError::new(
                    ErrorKind::UnknownMode,
                    format!("Unknown mode \"{}\"", text),
                ));
            }
            return Ok(Statement::Set(SetStmt {
                name: Ident::new(name),
                values: vec![mode],
            }));
        }
        self.next_token_if_is(&Token::Eq);
        let mut values = Vec::new();
        if !matches!(self.peek_token(), Token::EndOfInput | Token::SemiColon) {
            values.push(self.parse_setting_value()?);
            while self.next_token_if_is(&Token::Comma) {
                values.push(self.parse_setting_value()?);
            }
        }
        Ok(Statement::Set(SetStmt {
            name: Ident::new(name),
            values,
        }))
    }

    /// A setting value: an expression, or a bare reserved word (`ON`,
    /// `DEFAULT`, keyword names for `SET NON_KEYWORDS`, ...) carried as a
    /// string.
    fn parse_setting_value(&mut self) -> Result<Expr> {
        if let Token::Word(Word {
            keyword: Some(keyword),
            quoted: false,
            ..
        }) = self.peek_token()
        {
            if keyword.is_reserved() {
                let text = keyword.as_str().to_owned();
                self.next_token();
                return Ok(Expr::Literal(Value::CharString(text)));
            }
        }
        self.parse_expr()
    }

    pub(crate) fn parse_use_stmt(&mut self) -> Result<UseStmt> {
        self.expect_keyword(Keyword::USE)?;
        let schema = self.parse_identifier()?;
        self.resolver().get_schema_or_fail(&schema.value)?;
        Ok(UseStmt { schema })
    }

    /// SHOW and its compatibility variants. The table-listing variants
    /// rewrite to canonical catalog queries.
    pub(crate) fn parse_show_stmt(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::SHOW)?;
        if self.parse_keyword(Keyword::TABLES) {
            let from = if self.parse_keyword(Keyword::FROM) {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            return Ok(self.show_tables_query(from.as_ref()));
        }
        if self.parse_keyword(Keyword::COLUMNS) {
            self.expect_keyword(Keyword::FROM)?;
            let table = self.parse_object_name()?;
            return Ok(self.show_columns_query(&table));
        }
        if self.parse_keyword(Keyword::DATABASES) || self.parse_contextual("SCHEMAS") {
            return Ok(self.show_schemas_query());
        }
        let setting = self.parse_identifier()?;
        Ok(Statement::Show(ShowStmt::Setting(setting)))
    }

    pub(crate) fn parse_help_stmt(&mut self) -> Result<HelpStmt> {
        self.expect_keyword(Keyword::HELP)?;
        let mut topic = Vec::new();
        while let Token::Word(word) = self.peek_token() {
            topic.push(word.value.clone());
            self.next_token();
        }
        Ok(HelpStmt { topic })
    }

    pub(crate) fn parse_call_stmt(&mut self) -> Result<CallStmt> {
        self.expect_keyword(Keyword::CALL)?;
        let expr = self.parse_expr()?;
        Ok(CallStmt { expr })
    }

    pub(crate) fn parse_explain_stmt(&mut self) -> Result<ExplainStmt> {
        self.expect_keyword(Keyword::EXPLAIN)?;
        let analyze = self.parse_keyword(Keyword::ANALYZE);
        if !analyze && self.parse_keyword(Keyword::PLAN) {
            self.parse_keyword(Keyword::FOR);
        }
        let statement = Box::new(self.parse_statement()?);
        Ok(ExplainStmt { analyze, statement })
    }

    pub(crate) fn parse_prepare_stmt(&mut self) -> Result<PrepareStmt> {
        if self.session().config().flags.prepare_disabled {
            return Err(FrontendError::new(
                ErrorKind::UnsupportedFeature,
                "PREPARE is not supported in this compatibility mode",
            ));
        }
        self.expect_keyword(Keyword::PREPARE)?;
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::AS)?;
        let statement = Box::new(self.parse_statement()?);
        Ok(PrepareStmt { name, statement })
    }

    pub(crate) fn parse_execute_stmt(&mut self) -> Result<ExecuteStmt> {
        // EXEC and EXECUTE dispatch here; EXEC only in procedure-call modes
        if !self.parse_keyword(Keyword::EXECUTE) {
            self.expect_keyword(Keyword::EXEC)?;
        }
        let name = self.parse_identifier()?;
        let args = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_expr)?
        } else if !matches!(self.peek_token(), Token::EndOfInput | Token::SemiColon) {
            self.parse_comma_separated(Parser::parse_expr)?
        } else {
            Vec::new()
        };
        Ok(ExecuteStmt { name, args })
    }

    pub(crate) fn parse_deallocate_stmt(&mut self) -> Result<DeallocateStmt> {
        self.expect_keyword(Keyword::DEALLOCATE)?;
        self.parse_keyword(Keyword::PREPARE);
        let name = self.parse_identifier()?;
        Ok(DeallocateStmt { name })
    }

    pub(crate) fn parse_transaction_stmt(&mut self) -> Result<TransactionStmt> {
        if self.parse_keyword(Keyword::BEGIN) {
            self.parse_keyword(Keyword::WORK);
            self.parse_keyword(Keyword::TRANSACTION);
            return Ok(TransactionStmt::Begin);
        }
        if self.parse_keyword(Keyword::START) {
            self.expect_keyword(Keyword::TRANSACTION)?;
            return Ok(TransactionStmt::Begin);
        }
        if self.parse_keyword(Keyword::COMMIT) {
            self.parse_keyword(Keyword::WORK);
            return Ok(TransactionStmt::Commit);
        }
        if self.parse_keyword(Keyword::ROLLBACK) {
            self.parse_keyword(Keyword::WORK);
            if self.parse_keyword(Keyword::TO) {
                self.expect_keyword(Keyword::SAVEPOINT)?;
                let name = self.parse_identifier()?;
                return Ok(TransactionStmt::RollbackToSavepoint(name));
            }
            return Ok(TransactionStmt::Rollback);
        }
        if self.parse_keyword(Keyword::SAVEPOINT) {
            let name = self.parse_identifier()?;
            return Ok(TransactionStmt::Savepoint(name));
        }
        if self.parse_keyword(Keyword::RELEASE) {
            self.parse_keyword(Keyword::SAVEPOINT);
            let name = self.parse_identifier()?;
            return Ok(TransactionStmt::ReleaseSavepoint(name));
        }
        self.expected("a transaction statement")
    }

    pub(crate) fn parse_shutdown_stmt(&mut self) -> Result<ShutdownMode> {
        self.expect_keyword(Keyword::SHUTDOWN)?;
        if self.parse_keyword(Keyword::IMMEDIATELY) {
            Ok(ShutdownMode::Immediately)
        } else if self.parse_keyword(Keyword::COMPACT) {
            Ok(ShutdownMode::Compact)
        } else if self.parse_keyword(Keyword::DEFRAG) {
            Ok(ShutdownMode::Defrag)
        } else {
            Ok(ShutdownMode::Normal)
        }
    }

    pub(crate) fn parse_checkpoint_stmt(&mut self) -> Result<CheckpointStmt> {
        self.expect_keyword(Keyword::CHECKPOINT)?;
        let sync = self.parse_keyword(Keyword::SYNC);
        Ok(CheckpointStmt { sync })
    }

    pub(crate) fn parse_runscript_stmt(&mut self) -> Result<RunScriptStmt> {
        self.expect_keywords(&[Keyword::RUNSCRIPT, Keyword::FROM])?;
        let from = self.parse_string_literal()?;
        Ok(RunScriptStmt { from })
    }

    pub(crate) fn parse_script_stmt(&mut self) -> Result<ScriptStmt> {
        self.expect_keyword(Keyword::SCRIPT)?;
        let to = if self.parse_keyword(Keyword::TO) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        Ok(ScriptStmt { to })
    }

    pub(crate) fn parse_analyze_stmt(&mut self) -> Result<AnalyzeStmt> {
        self.expect_keyword(Keyword::ANALYZE)?;
        let table = if self.parse_keyword(Keyword::TABLE) {
            let table = self.parse_object_name()?;
            self.resolve_table_name(&table)?;
            Some(table)
        } else {
            None
        };
        let sample_size = if self.parse_contextual("SAMPLE_SIZE") {
            Some(self.parse_uint()?)
        } else {
            None
        };
        Ok(AnalyzeStmt { table, sample_size })
    }
}

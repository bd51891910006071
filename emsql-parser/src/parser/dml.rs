//! Data-manipulation statements: INSERT, UPDATE, DELETE, MERGE, REPLACE.

use emsql_ast::{
    Assignment, AssignmentTarget, DeleteStmt, InsertOverriding, InsertSource, InsertStmt,
    MergeAction, MergeKind, MergeStmt, MergeWhen, Query, QueryBody, ReplaceStmt, UpdateStmt,
};
use emsql_core::{Keyword, Result};
use emsql_lexer::Token;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parses an `INSERT` statement.
    ///
    /// ```txt
    /// INSERT INTO t [(cols)] [OVERRIDING {SYSTEM | USER} VALUE]
    ///     {VALUES (...) | SET col = expr, ... | DEFAULT VALUES | query}
    ///     [ON DUPLICATE KEY UPDATE ...] [ON CONFLICT DO NOTHING]
    /// ```
    pub(crate) fn parse_insert_stmt(&mut self) -> Result<InsertStmt> {
        self.expect_keywords(&[Keyword::INSERT, Keyword::INTO])?;
        let table = self.parse_object_name()?;
        self.resolve_table_name(&table)?;
        let columns = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        let overriding = if self.parse_keyword(Keyword::OVERRIDING) {
            let overriding = if self.parse_keyword(Keyword::SYSTEM) {
                InsertOverriding::System
            } else {
                self.expect_keyword(Keyword::USER)?;
                InsertOverriding::User
            };
            self.expect_keyword(Keyword::VALUE)?;
            Some(overriding)
        } else {
            None
        };
        let source = if self.parse_keywords(&[Keyword::DEFAULT, Keyword::VALUES]) {
            InsertSource::DefaultValues
        } else if self.peek_token().is_keyword(Keyword::VALUES) {
            self.next_token();
            InsertSource::Values(self.parse_values_rows()?)
        } else if self.parse_keyword(Keyword::SET) {
            InsertSource::Set(self.parse_comma_separated(Parser::parse_assignment)?)
        } else if self.peek_is_query_start() || self.peek_token() == &Token::LeftParen {
            InsertSource::Query(Box::new(self.parse_query()?))
        } else {
            return self.expected("VALUES, SET, DEFAULT VALUES or a query");
        };
        let flags = self.session().config().flags;
        let mut on_duplicate_update = None;
        let mut on_conflict_do_nothing = false;
        if flags.on_duplicate_key_update
            && self.parse_keywords(&[
                Keyword::ON,
                Keyword::DUPLICATE,
                Keyword::KEY,
                Keyword::UPDATE,
            ])
        {
            on_duplicate_update = Some(self.parse_comma_separated(Parser::parse_assignment)?);
        } else if flags.on_conflict_do_nothing
            && self.parse_keywords(&[Keyword::ON, Keyword::CONFLICT])
        {
            self.expect_keywords(&[Keyword::DO, Keyword::NOTHING])?;
            on_conflict_do_nothing = true;
        }
        Ok(InsertStmt {
            table,
            columns,
            overriding,
            source,
            on_duplicate_update,
            on_conflict_do_nothing,
        })
    }

    /// Parses a SET clause. A parenthesized column tuple takes a single
    /// row-valued right-hand side.
    pub(crate) fn parse_assignment(&mut self) -> Result<Assignment> {
        let target = if self.next_token_if_is(&Token::LeftParen) {
            let columns = self.parse_comma_separated(Parser::parse_object_name)?;
            self.expect_token(&Token::RightParen)?;
            AssignmentTarget::Tuple(columns)
        } else {
            AssignmentTarget::Column(self.parse_object_name()?)
        };
        self.expect_token(&Token::Eq)?;
        let value = Box::new(self.parse_expr()?);
        Ok(Assignment { target, value })
    }

    /// Parses an `UPDATE` statement.
    pub(crate) fn parse_update_stmt(&mut self) -> Result<UpdateStmt> {
        self.expect_keyword(Keyword::UPDATE)?;
        let table = self.parse_object_name()?;
        self.resolve_table_name(&table)?;
        let alias = if self.parse_keyword(Keyword::AS) {
            Some(self.parse_identifier()?)
        } else if !self.peek_token().is_keyword(Keyword::SET) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::SET)?;
        let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
        let from = if self.parse_keyword(Keyword::FROM) {
            self.parse_comma_separated(Parser::parse_table_filter)?
        } else {
            Vec::new()
        };
        let selection = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let order_by = if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
            self.parse_comma_separated(Parser::parse_sort_spec)?
        } else {
            Vec::new()
        };
        let mut update = UpdateStmt {
            table,
            alias,
            assignments,
            from,
            selection,
            order_by,
            limit: None,
            fetch: None,
        };
        self.parse_dml_row_limits(&mut update.limit, &mut update.fetch)?;
        Ok(update)
    }

    /// Parses a `DELETE` statement.
    pub(crate) fn parse_delete_stmt(&mut self) -> Result<DeleteStmt> {
        self.expect_keywords(&[Keyword::DELETE, Keyword::FROM])?;
        let table = self.parse_object_name()?;
        self.resolve_table_name(&table)?;
        let alias = if self.parse_keyword(Keyword::AS) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let selection = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let mut delete = DeleteStmt {
            table,
            alias,
            selection,
            limit: None,
            fetch: None,
        };
        self.parse_dml_row_limits(&mut delete.limit, &mut delete.fetch)?;
        Ok(delete)
    }

    fn parse_dml_row_limits(
        &mut self,
        limit: &mut Option<emsql_ast::LimitClause>,
        fetch: &mut Option<emsql_ast::FetchClause>,
    ) -> Result<()> {
        if self.peek_token().is_keyword(Keyword::LIMIT) {
            self.next_token();
            let count = self.parse_expr()?;
            *limit = Some(emsql_ast::LimitClause {
                count,
                offset: None,
            });
        } else if self.parse_keyword(Keyword::FETCH) {
            if !self.parse_keyword(Keyword::FIRST) {
                self.expect_keyword(Keyword::NEXT)?;
            }
            let quantity = if self.peek_token().is_keyword(Keyword::ROW)
                || self.peek_token().is_keyword(Keyword::ROWS)
            {
                None
            } else {
                Some(self.parse_expr()?)
            };
            if !self.parse_keyword(Keyword::ROW) {
                self.expect_keyword(Keyword::ROWS)?;
            }
            self.expect_keyword(Keyword::ONLY)?;
            *fetch = Some(emsql_ast::FetchClause {
                quantity,
                percent: false,
                with_ties: false,
            });
        }
        Ok(())
    }

    /// Parses a `MERGE` statement, either the standard `USING` form or the
    /// legacy key-based form.
    pub(crate) fn parse_merge_stmt(&mut self) -> Result<MergeStmt> {
        self.expect_keywords(&[Keyword::MERGE, Keyword::INTO])?;
        let into = self.parse_object_name()?;
        self.resolve_table_name(&into)?;
        let alias = if self.parse_keyword(Keyword::AS) {
            Some(self.parse_identifier()?)
        } else if matches!(self.peek_token(), Token::Word(word)
            if word.keyword.is_none() && !word.quoted)
        {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        if self.parse_keyword(Keyword::USING) {
            let source = Box::new(self.parse_table_filter()?);
            self.expect_keyword(Keyword::ON)?;
            let on = Box::new(self.parse_expr()?);
            let mut clauses = Vec::new();
            while self.peek_token().is_keyword(Keyword::WHEN) {
                clauses.push(self.parse_merge_when()?);
            }
            if clauses.is_empty() {
                return self.expected("WHEN");
            }
            return Ok(MergeStmt {
                into,
                alias,
                kind: MergeKind::Using {
                    source,
                    on,
                    clauses,
                },
            });
        }
        // legacy form: [(cols)] [KEY(cols)] {VALUES ... | query}
        let columns = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        let keys = if self.parse_keyword(Keyword::KEY) {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        let source = if self.peek_token().is_keyword(Keyword::VALUES) {
            self.next_token();
            let values = self.parse_values_rows()?;
            Box::new(Query::plain(QueryBody::Values(values)))
        } else {
            Box::new(self.parse_query()?)
        };
        Ok(MergeStmt {
            into,
            alias,
            kind: MergeKind::Legacy {
                columns,
                keys,
                source,
            },
        })
    }

    /// One `WHEN [NOT] MATCHED [AND cond] THEN action` branch; branches
    /// keep their declared order.
    fn parse_merge_when(&mut self) -> Result<MergeWhen> {
        self.expect_keyword(Keyword::WHEN)?;
        let matched = !self.parse_keyword(Keyword::NOT);
        self.expect_keyword(Keyword::MATCHED)?;
        let and_condition = if self.parse_keyword(Keyword::AND) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::THEN)?;
        let action = if self.parse_keyword(Keyword::UPDATE) {
            self.expect_keyword(Keyword::SET)?;
            MergeAction::Update(self.parse_comma_separated(Parser::parse_assignment)?)
        } else if self.parse_keyword(Keyword::DELETE) {
            MergeAction::Delete
        } else if self.parse_keyword(Keyword::INSERT) {
            let columns = if self.peek_token() == &Token::LeftParen {
                self.parse_parenthesized(Parser::parse_identifier)?
            } else {
                Vec::new()
            };
            self.expect_keyword(Keyword::VALUES)?;
            let values = self.parse_parenthesized(Parser::parse_expr)?;
            MergeAction::Insert { columns, values }
        } else {
            return self.expected("UPDATE, DELETE or INSERT");
        };
        Ok(MergeWhen {
            matched,
            and_condition,
            action,
        })
    }

    /// Parses a MySQL `REPLACE INTO` statement.
    pub(crate) fn parse_replace_stmt(&mut self) -> Result<ReplaceStmt> {
        self.expect_keywords(&[Keyword::REPLACE, Keyword::INTO])?;
        let table = self.parse_object_name()?;
        self.resolve_table_name(&table)?;
        let columns = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        let source = if self.peek_token().is_keyword(Keyword::VALUES) {
            self.next_token();
            InsertSource::Values(self.parse_values_rows()?)
        } else if self.parse_keyword(Keyword::SET) {
            InsertSource::Set(self.parse_comma_separated(Parser::parse_assignment)?)
        } else {
            InsertSource::Query(Box::new(self.parse_query()?))
        };
        Ok(ReplaceStmt {
            table,
            columns,
            source,
        })
    }
}

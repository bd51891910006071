//! Query expressions: CTE preamble, set-operation trees, the SELECT core,
//! the FROM list with joins and hints, and the ordering / row limiting
//! clauses.

use std::sync::Arc;

use emsql_ast::{
    Cte, DataType, Distinct, Expr, FetchClause, GroupingElement, Ident, IsolationClause, Join,
    JoinConstraint, JoinOperator, LimitClause, NamedWindow, ObjectName, OffsetClause, OffsetRows,
    PrimaryType, Query, QueryBody, Select, SelectItem, SetOpQuery, SetOperator, SortSpec,
    Statement, TableFactor, TableWithJoins, TopClause, Values, With, DeltaKind, FunctionCall,
    FunctionKind, IndexHints, TableAlias,
};
use emsql_catalog::{Column, Table};
use emsql_core::{ErrorKind, FrontendError, Keyword, Result};
use emsql_lexer::Token;

use crate::parser::{expr::contains_aggregate, usable_as_identifier, Parser};

impl<'a> Parser<'a> {
    /// Whether the current token starts a query expression.
    pub(crate) fn peek_is_query_start(&self) -> bool {
        self.peek_token()
            .which_keyword(&[
                Keyword::SELECT,
                Keyword::WITH,
                Keyword::VALUES,
                Keyword::TABLE,
            ])
            .is_some()
    }

    /// Parses a full query expression.
    pub fn parse_query(&mut self) -> Result<Query> {
        let with = if self.peek_token().is_keyword(Keyword::WITH) {
            Some(self.parse_with_clause()?)
        } else {
            None
        };
        let body = self.parse_query_body()?;
        let mut query = Query::plain(body);
        query.with = with;
        if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
            query.order_by = self.parse_comma_separated(Parser::parse_sort_spec)?;
            if query
                .order_by
                .iter()
                .any(|sort| contains_parameter(&sort.expr))
            {
                // a parameter may change which column is sorted on
                self.recompile_always = true;
            }
        }
        if self.parse_keyword(Keyword::OFFSET) {
            let count = self.parse_row_count_expr("OFFSET")?;
            let rows = if self.parse_keyword(Keyword::ROW) {
                OffsetRows::Row
            } else if self.parse_keyword(Keyword::ROWS) {
                OffsetRows::Rows
            } else {
                OffsetRows::None
            };
            query.offset = Some(OffsetClause { count, rows });
        }
        if self.parse_keyword(Keyword::FETCH) {
            let fetch = self.parse_fetch_clause(query.order_by.is_empty())?;
            query.fetch = Some(fetch);
        }
        if self.peek_token().is_keyword(Keyword::LIMIT) {
            self.next_token();
            let limit = self.parse_limit_clause()?;
            query.limit = Some(limit);
        }
        if self.parse_keywords(&[Keyword::FOR, Keyword::UPDATE]) {
            query.for_update = true;
        }
        if self.session().config().flags.isolation_clause {
            query.isolation = self.parse_isolation_clause()?;
        }
        Ok(query)
    }

    fn parse_fetch_clause(&mut self, order_by_empty: bool) -> Result<FetchClause> {
        if !self.parse_keyword(Keyword::FIRST) {
            self.expect_keyword(Keyword::NEXT)?;
        }
        let quantity = if self.peek_token().is_keyword(Keyword::ROW)
            || self.peek_token().is_keyword(Keyword::ROWS)
        {
            None
        } else {
            Some(self.parse_row_count_expr("FETCH")?)
        };
        let percent = self.parse_keyword(Keyword::PERCENT);
        if !self.parse_keyword(Keyword::ROW) {
            self.expect_keyword(Keyword::ROWS)?;
        }
        let with_ties = if self.parse_keyword(Keyword::ONLY) {
            false
        } else {
            self.expect_keywords(&[Keyword::WITH, Keyword::TIES])?;
            true
        };
        if with_ties && order_by_empty {
            return Err(FrontendError::new(
                ErrorKind::WithTiesWithoutOrderBy,
                "WITH TIES requires ORDER BY",
            ));
        }
        Ok(FetchClause {
            quantity,
            percent,
            with_ties,
        })
    }

    fn parse_limit_clause(&mut self) -> Result<LimitClause> {
        let first = self.parse_row_count_expr("LIMIT")?;
        if self.session().config().flags.limit_comma_form && self.next_token_if_is(&Token::Comma) {
            // `LIMIT offset, count`
            let count = self.parse_row_count_expr("LIMIT")?;
            return Ok(LimitClause {
                count,
                offset: Some(first),
            });
        }
        let offset = if self.parse_keyword(Keyword::OFFSET) {
            Some(self.parse_row_count_expr("OFFSET")?)
        } else {
            None
        };
        Ok(LimitClause {
            count: first,
            offset,
        })
    }

    /// A TOP / LIMIT / OFFSET / FETCH expression; aggregates are not
    /// allowed here.
    fn parse_row_count_expr(&mut self, clause: &str) -> Result<Expr> {
        let start = self.token_start();
        let expr = self.parse_expr()?;
        if contains_aggregate(&expr) {
            return Err(FrontendError::syntax(
                start,
                format!("Aggregates are not allowed in {}", clause),
            ));
        }
        Ok(expr)
    }

    fn parse_isolation_clause(&mut self) -> Result<Option<IsolationClause>> {
        if !self.peek_token().is_keyword(Keyword::WITH) {
            return Ok(None);
        }
        let level = match self.peek_nth(1) {
            Token::Word(word) if !word.quoted => match word.value.to_uppercase().as_str() {
                "RR" => IsolationClause::Rr,
                "RS" => IsolationClause::Rs,
                "CS" => IsolationClause::Cs,
                "UR" => IsolationClause::Ur,
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };
        self.next_token();
        self.next_token();
        Ok(Some(level))
    }

    // ---- CTEs ----

    fn parse_with_clause(&mut self) -> Result<With> {
        self.expect_keyword(Keyword::WITH)?;
        let recursive = self.parse_keyword(Keyword::RECURSIVE);
        let ctes = self.parse_comma_separated(Parser::parse_cte)?;
        Ok(With { recursive, ctes })
    }

    fn parse_cte(&mut self) -> Result<Cte> {
        let name = self.parse_identifier()?;
        let columns = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::AS)?;
        // install a placeholder shadow view before the body parses so a
        // recursive self-reference resolves; the cleanup list guarantees
        // removal at end of statement life or on error
        let placeholder_columns: Vec<Column> = columns
            .iter()
            .map(|column| {
                Column::new(
                    column.value.clone(),
                    DataType::simple(PrimaryType::Integer),
                )
            })
            .collect();
        self.session().install_shadow_view(Arc::new(Table::view(
            name.value.clone(),
            placeholder_columns,
            true,
        )));
        self.cte_cleanups.push(name.value.clone());
        self.expect_token(&Token::LeftParen)?;
        let query = self.parse_query()?;
        self.expect_token(&Token::RightParen)?;
        Ok(Cte {
            name,
            columns,
            query: Box::new(query),
        })
    }

    // ---- query bodies and set operations ----

    fn parse_query_body(&mut self) -> Result<QueryBody> {
        let mut body = self.parse_query_primary()?;
        loop {
            let op = if self.parse_keyword(Keyword::UNION) {
                SetOperator::Union
            } else if self.parse_keyword(Keyword::EXCEPT) || self.parse_keyword(Keyword::MINUS) {
                SetOperator::Except
            } else if self.parse_keyword(Keyword::INTERSECT) {
                SetOperator::Intersect
            } else {
                break;
            };
            let all = if self.parse_keyword(Keyword::ALL) {
                true
            } else {
                self.parse_keyword(Keyword::DISTINCT);
                false
            };
            let right = self.parse_query_primary()?;
            body = QueryBody::SetOp(Box::new(SetOpQuery {
                op,
                all,
                left: body,
                right,
            }));
        }
        Ok(body)
    }

    fn parse_query_primary(&mut self) -> Result<QueryBody> {
        if self.next_token_if_is(&Token::LeftParen) {
            let body = self.parse_query_body()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(body);
        }
        if self.peek_token().is_keyword(Keyword::SELECT) {
            return Ok(QueryBody::Select(Box::new(self.parse_select_core()?)));
        }
        if self.parse_keyword(Keyword::VALUES) {
            return Ok(QueryBody::Values(self.parse_values_rows()?));
        }
        if self.parse_keyword(Keyword::TABLE) {
            let name = self.parse_object_name()?;
            self.resolve_table_name(&name)?;
            return Ok(QueryBody::Table(name));
        }
        self.expected("SELECT, VALUES, TABLE or a parenthesized query")
    }

    pub(crate) fn parse_values_rows(&mut self) -> Result<Values> {
        let rows = self.parse_comma_separated(|parser| {
            parser.parse_keyword(Keyword::ROW);
            parser.parse_parenthesized(Parser::parse_expr)
        })?;
        Ok(Values { rows })
    }

    // ---- the SELECT core ----

    fn parse_select_core(&mut self) -> Result<Select> {
        self.expect_keyword(Keyword::SELECT)?;
        let distinct = if self.parse_keyword(Keyword::DISTINCT) {
            if self.parse_keyword(Keyword::ON) {
                let exprs = self.parse_parenthesized(Parser::parse_expr)?;
                Some(Distinct::On(exprs))
            } else {
                Some(Distinct::Distinct)
            }
        } else if self.parse_keyword(Keyword::ALL) {
            Some(Distinct::All)
        } else {
            None
        };
        let top = if self.parse_keyword(Keyword::TOP) {
            let quantity = self.parse_row_count_expr("TOP")?;
            let percent = self.parse_keyword(Keyword::PERCENT);
            let with_ties = self.parse_keywords(&[Keyword::WITH, Keyword::TIES]);
            Some(TopClause {
                quantity,
                percent,
                with_ties,
            })
        } else {
            None
        };
        let projection = self.parse_comma_separated(Parser::parse_select_item)?;
        let mut select = Select {
            distinct,
            top,
            projection,
            from: Vec::new(),
            selection: None,
            group_by: Vec::new(),
            having: None,
            windows: Vec::new(),
            qualify: None,
        };
        if self.parse_keyword(Keyword::FROM) {
            select.from = self.parse_comma_separated(Parser::parse_table_filter)?;
        }
        if self.parse_keyword(Keyword::WHERE) {
            select.selection = Some(self.parse_expr()?);
        }
        if self.parse_keywords(&[Keyword::GROUP, Keyword::BY]) {
            select.group_by = self.parse_comma_separated(Parser::parse_grouping_element)?;
        }
        if self.parse_keyword(Keyword::HAVING) {
            select.having = Some(self.parse_expr()?);
        }
        if self.parse_keyword(Keyword::WINDOW) {
            select.windows = self.parse_comma_separated(|parser| {
                let name = parser.parse_identifier()?;
                parser.expect_keyword(Keyword::AS)?;
                parser.expect_token(&Token::LeftParen)?;
                let spec = parser.parse_window_spec()?;
                parser.expect_token(&Token::RightParen)?;
                Ok(NamedWindow { name, spec })
            })?;
        }
        if self.parse_keyword(Keyword::QUALIFY) {
            select.qualify = Some(self.parse_expr()?);
        }
        Ok(select)
    }

    fn parse_select_item(&mut self) -> Result<SelectItem> {
        if self.next_token_if_is(&Token::Asterisk) {
            return Ok(SelectItem::Wildcard);
        }
        let expr = self.parse_expr()?;
        if let Expr::QualifiedWildcard(prefix) = expr {
            return Ok(SelectItem::QualifiedWildcard(prefix));
        }
        if self.parse_keyword(Keyword::AS) {
            let alias = self.parse_identifier()?;
            return Ok(SelectItem::ExprWithAlias { expr, alias });
        }
        if matches!(self.peek_token(), Token::Word(word) if usable_as_identifier(word)) {
            let alias = self.parse_identifier()?;
            return Ok(SelectItem::ExprWithAlias { expr, alias });
        }
        Ok(SelectItem::UnnamedExpr(expr))
    }

    fn parse_grouping_element(&mut self) -> Result<GroupingElement> {
        if self.peek_token() == &Token::LeftParen {
            if self.peek_nth(1) == &Token::RightParen {
                self.next_token();
                self.next_token();
                return Ok(GroupingElement::Empty);
            }
            // a parenthesized list with a top-level comma is a grouping
            // set; a single nested expression stays an expression
            if self.paren_encloses_list() {
                let set = self.parse_parenthesized(Parser::parse_expr)?;
                return Ok(GroupingElement::Set(set));
            }
        }
        Ok(GroupingElement::Expr(self.parse_expr()?))
    }

    /// `expr [ASC | DESC] [NULLS {FIRST | LAST}]`.
    pub(crate) fn parse_sort_spec(&mut self) -> Result<SortSpec> {
        let expr = Box::new(self.parse_expr()?);
        let asc = if self.parse_keyword(Keyword::ASC) {
            Some(true)
        } else if self.parse_keyword(Keyword::DESC) {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.parse_keyword(Keyword::NULLS) {
            if self.parse_keyword(Keyword::FIRST) {
                Some(true)
            } else {
                self.expect_keyword(Keyword::LAST)?;
                Some(false)
            }
        } else {
            None
        };
        Ok(SortSpec {
            expr,
            asc,
            nulls_first,
        })
    }

    // ---- FROM: table filters and joins ----

    pub(crate) fn parse_table_filter(&mut self) -> Result<TableWithJoins> {
        let filter = self.parse_table_filter_as_written()?;
        if self.session().config().force_join_order {
            return Ok(filter);
        }
        Ok(flatten_left_deep(filter))
    }

    fn parse_table_filter_as_written(&mut self) -> Result<TableWithJoins> {
        let relation = self.parse_table_factor()?;
        let mut joins = Vec::new();
        loop {
            let natural = self.peek_token().is_keyword(Keyword::NATURAL);
            if natural {
                self.next_token();
            }
            let operator = if self.parse_keywords(&[Keyword::CROSS, Keyword::JOIN]) {
                if natural {
                    return self.expected("INNER, LEFT or RIGHT after NATURAL");
                }
                JoinOperator::Cross
            } else if self.parse_keyword(Keyword::JOIN)
                || self.parse_keywords(&[Keyword::INNER, Keyword::JOIN])
            {
                JoinOperator::Inner(JoinConstraint::None)
            } else if self.parse_keyword(Keyword::LEFT) {
                self.parse_keyword(Keyword::OUTER);
                self.expect_keyword(Keyword::JOIN)?;
                JoinOperator::LeftOuter(JoinConstraint::None)
            } else if self.parse_keyword(Keyword::RIGHT) {
                self.parse_keyword(Keyword::OUTER);
                self.expect_keyword(Keyword::JOIN)?;
                JoinOperator::RightOuter(JoinConstraint::None)
            } else if self.peek_token().is_keyword(Keyword::FULL) {
                // recognized, then rejected with a clear message
                return self.syntax_error("FULL OUTER JOIN is not supported");
            } else {
                if natural {
                    return self.expected("JOIN after NATURAL");
                }
                break;
            };
            let relation = self.parse_table_factor()?;
            let constraint = if natural {
                JoinConstraint::Natural
            } else if matches!(operator, JoinOperator::Cross) {
                JoinConstraint::None
            } else if self.parse_keyword(Keyword::ON) {
                JoinConstraint::On(self.parse_expr()?)
            } else if self.parse_keyword(Keyword::USING) {
                JoinConstraint::Using(self.parse_parenthesized(Parser::parse_identifier)?)
            } else {
                JoinConstraint::None
            };
            let operator = match operator {
                JoinOperator::Inner(_) => JoinOperator::Inner(constraint),
                JoinOperator::LeftOuter(_) => JoinOperator::LeftOuter(constraint),
                JoinOperator::RightOuter(_) => JoinOperator::RightOuter(constraint),
                JoinOperator::Cross => JoinOperator::Cross,
            };
            joins.push(Join { relation, operator });
        }
        Ok(TableWithJoins { relation, joins })
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor> {
        if self.next_token_if_is(&Token::LeftParen) {
            if self.peek_is_query_start() {
                let subquery = Box::new(self.parse_query()?);
                self.expect_token(&Token::RightParen)?;
                let alias = self.parse_table_alias()?;
                return Ok(TableFactor::Derived { subquery, alias });
            }
            let join = self.parse_table_filter()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(TableFactor::NestedJoin(Box::new(join)));
        }
        if self.parse_keyword(Keyword::VALUES) {
            let values = self.parse_values_rows()?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::Values { values, alias });
        }
        if self.peek_token().is_keyword(Keyword::TABLE)
            && self.peek_nth(1) == &Token::LeftParen
        {
            self.next_token();
            self.expect_token(&Token::LeftParen)?;
            let name = self.parse_object_name()?;
            let args = if self.peek_token() == &Token::LeftParen {
                self.parse_parenthesized(Parser::parse_expr)?
            } else {
                Vec::new()
            };
            self.expect_token(&Token::RightParen)?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::TableFunction {
                call: FunctionCall::simple(name, FunctionKind::Table, args),
                alias,
            });
        }
        for (keyword, kind) in [
            (Keyword::OLD, DeltaKind::Old),
            (Keyword::NEW, DeltaKind::New),
            (Keyword::FINAL, DeltaKind::Final),
        ] {
            if self.peek_token().is_keyword(keyword)
                && self.peek_nth(1).is_keyword(Keyword::TABLE)
            {
                self.next_token();
                self.next_token();
                self.expect_token(&Token::LeftParen)?;
                let statement = Box::new(self.parse_statement()?);
                self.expect_token(&Token::RightParen)?;
                let alias = self.parse_table_alias()?;
                return Ok(TableFactor::DataChangeDelta {
                    kind,
                    statement,
                    alias,
                });
            }
        }
        // `SYSTEM_RANGE(min, max [, step])`
        if matches!(self.peek_token(), Token::Word(word) if !word.quoted
            && word.value.eq_ignore_ascii_case("SYSTEM_RANGE"))
            && self.peek_nth(1) == &Token::LeftParen
        {
            self.next_token();
            self.expect_token(&Token::LeftParen)?;
            let min = self.parse_expr()?;
            self.expect_token(&Token::Comma)?;
            let max = self.parse_expr()?;
            let step = if self.next_token_if_is(&Token::Comma) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect_token(&Token::RightParen)?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::SystemRange {
                min,
                max,
                step,
                alias,
            });
        }
        let name = self.parse_object_name()?;
        if self.peek_token() == &Token::LeftParen {
            // a table-valued function without the TABLE wrapper
            let args = self.parse_parenthesized(Parser::parse_expr)?;
            let alias = self.parse_table_alias()?;
            return Ok(TableFactor::TableFunction {
                call: FunctionCall::simple(name, FunctionKind::Table, args),
                alias,
            });
        }
        self.resolve_table_name(&name)?;
        let alias = self.parse_table_alias()?;
        let index_hints = self.parse_index_hints()?;
        Ok(TableFactor::Table {
            name,
            alias,
            index_hints,
        })
    }

    fn parse_table_alias(&mut self) -> Result<Option<TableAlias>> {
        let name = if self.parse_keyword(Keyword::AS) {
            self.parse_identifier()?
        } else if matches!(self.peek_token(), Token::Word(word) if usable_as_identifier(word)
            && word.keyword.is_none())
        {
            self.parse_identifier()?
        } else {
            return Ok(None);
        };
        let columns = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        Ok(Some(TableAlias { name, columns }))
    }

    /// `USE INDEX (...)` and MS-SQL `WITH (...)` hints; only the first
    /// hint list parsed is carried forward.
    fn parse_index_hints(&mut self) -> Result<Option<IndexHints>> {
        let mut hints = None;
        if self.peek_token().is_keyword(Keyword::USE)
            && self.peek_nth(1).is_keyword(Keyword::INDEX)
        {
            self.next_token();
            self.next_token();
            let indexes = self.parse_parenthesized(Parser::parse_identifier)?;
            hints = Some(IndexHints { indexes });
        }
        if self.peek_token().is_keyword(Keyword::WITH) && self.peek_nth(1) == &Token::LeftParen {
            self.next_token();
            let _ = self.parse_parenthesized(Parser::parse_identifier)?;
        }
        Ok(hints)
    }

    // ---- SHOW rewrites ----

    /// Builds the canonical catalog query a SHOW variant rewrites to.
    pub(crate) fn show_tables_query(&self, schema: Option<&Ident>) -> Statement {
        let mut select = Select {
            distinct: None,
            top: None,
            projection: vec![SelectItem::UnnamedExpr(column("TABLE_NAME"))],
            from: vec![information_schema_table("TABLES")],
            selection: None,
            group_by: Vec::new(),
            having: None,
            windows: Vec::new(),
            qualify: None,
        };
        if let Some(schema) = schema {
            select.selection = Some(equals_string("TABLE_SCHEMA", &schema.value));
        }
        sorted_query(select, "TABLE_NAME")
    }

    /// The canonical query for `SHOW COLUMNS FROM t`.
    pub(crate) fn show_columns_query(&self, table: &ObjectName) -> Statement {
        let mut select = Select {
            distinct: None,
            top: None,
            projection: vec![
                SelectItem::UnnamedExpr(column("COLUMN_NAME")),
                SelectItem::UnnamedExpr(column("DATA_TYPE")),
            ],
            from: vec![information_schema_table("COLUMNS")],
            selection: None,
            group_by: Vec::new(),
            having: None,
            windows: Vec::new(),
            qualify: None,
        };
        select.selection = Some(equals_string(
            "TABLE_NAME",
            &table.unqualified().value,
        ));
        sorted_query(select, "ORDINAL_POSITION")
    }

    /// The canonical query for `SHOW SCHEMAS` / `SHOW DATABASES`.
    pub(crate) fn show_schemas_query(&self) -> Statement {
        let select = Select {
            distinct: None,
            top: None,
            projection: vec![SelectItem::UnnamedExpr(column("SCHEMA_NAME"))],
            from: vec![information_schema_table("SCHEMATA")],
            selection: None,
            group_by: Vec::new(),
            having: None,
            windows: Vec::new(),
            qualify: None,
        };
        sorted_query(select, "SCHEMA_NAME")
    }

    /// Whether the parenthesized region at the cursor contains a top-level
    /// comma (grouping-set disambiguation without consuming tokens).
    fn paren_encloses_list(&self) -> bool {
        let mut depth = 0usize;
        let mut n = 0usize;
        loop {
            match self.peek_nth(n) {
                Token::LeftParen => depth += 1,
                Token::RightParen => {
                    if depth <= 1 {
                        return false;
                    }
                    depth -= 1;
                }
                Token::Comma if depth == 1 => return true,
                Token::EndOfInput => return false,
                _ => {}
            }
            n += 1;
        }
    }
}

fn column(name: &str) -> Expr {
    Expr::Column(emsql_ast::ColumnRef {
        schema: None,
        table: None,
        name: Ident::new(name),
    })
}

fn equals_string(name: &str, value: &str) -> Expr {
    Expr::Comparison(emsql_ast::ComparisonExpr {
        op: emsql_ast::ComparisonOperator::Eq,
        left: Box::new(column(name)),
        right: Box::new(Expr::Literal(emsql_ast::Value::CharString(
            value.to_owned(),
        ))),
    })
}

fn information_schema_table(name: &str) -> TableWithJoins {
    TableWithJoins {
        relation: TableFactor::Table {
            name: ObjectName::new(vec!["INFORMATION_SCHEMA", name]),
            alias: None,
            index_hints: None,
        },
        joins: Vec::new(),
    }
}

fn sorted_query(select: Select, order_column: &str) -> Statement {
    let mut query = Query::plain(QueryBody::Select(Box::new(select)));
    query.order_by = vec![SortSpec {
        expr: Box::new(column(order_column)),
        asc: None,
        nulls_first: None,
    }];
    Statement::Query(Box::new(query))
}

/// Reassociates a join chain into a left-deep tree: a parenthesized join
/// in the leading position folds into the enclosing chain. Skipped when
/// the session forces the written join order.
fn flatten_left_deep(mut tree: TableWithJoins) -> TableWithJoins {
    loop {
        match tree.relation {
            TableFactor::NestedJoin(inner) => {
                let inner = *inner;
                let mut joins = inner.joins;
                joins.extend(tree.joins);
                tree = TableWithJoins {
                    relation: inner.relation,
                    joins,
                };
            }
            other => {
                tree.relation = other;
                return tree;
            }
        }
    }
}

fn contains_parameter(expr: &Expr) -> bool {
    match expr {
        Expr::Parameter(_) => true,
        Expr::Nested(inner) | Expr::FormatJson(inner) => contains_parameter(inner),
        Expr::UnaryOp(e) => contains_parameter(&e.expr),
        Expr::BinaryOp(e) => contains_parameter(&e.left) || contains_parameter(&e.right),
        Expr::NaryOp(e) => e.operands.iter().any(contains_parameter),
        Expr::Cast(e) => contains_parameter(&e.expr),
        _ => false,
    }
}

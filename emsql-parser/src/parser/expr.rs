//! The expression parser: operator-precedence recursive descent.
//!
//! Levels, lowest to highest: OR, AND, NOT/EXISTS/UNIQUE/INTERSECTS,
//! comparison and predicates, concatenation, additive, multiplicative,
//! unary sign and postfix operations, primary. OR / AND / `||` chains fold
//! into N-ary nodes so later tree walks do not recurse per operand.

use emsql_ast::{
    AggregateKind, ArrayConstructorExpr, ArrayElementExpr, AtTimeZoneExpr, BetweenExpr,
    BinaryOpExpr, BinaryOperator, BuiltinFunction, CaseExpr, CaseWhen, CastExpr, ColumnRef,
    ComparisonExpr, ComparisonOperator, CompatFunction, CurrentValue, Expr, FieldAccessExpr,
    FrameBound, FrameExclude, FrameUnits, FunctionCall, FunctionKind, GeometrySource, Ident,
    InListExpr, InSubqueryExpr, IntersectsExpr, IntervalQualifiedExpr, IsDistinctFromExpr,
    IsJsonExpr, IsNullExpr, IsOfTypeExpr, IsTruthExpr, JsonItemType, LikeExpr, NaryOpExpr,
    NaryOperator, ObjectName, Quantifier, QuantifiedExpr, RegexpExpr, RowConstructorExpr,
    SequenceValueExpr, TruthValue, UnaryOpExpr, UnaryOperator, Value, VariableAssignmentExpr,
    WindowFrame, WindowKind, WindowRef, WindowSpec,
};
use emsql_core::{AllowLiterals, ErrorKind, FrontendError, Keyword, Result};
use emsql_lexer::{Token, Word};

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parses an expression.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let first = self.parse_and()?;
        if !self.peek_token().is_keyword(Keyword::OR) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.parse_keyword(Keyword::OR) {
            operands.push(self.parse_and()?);
        }
        Ok(Expr::NaryOp(NaryOpExpr {
            op: NaryOperator::Or,
            operands,
        }))
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let first = self.parse_condition()?;
        if !self.peek_token().is_keyword(Keyword::AND) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.parse_keyword(Keyword::AND) {
            operands.push(self.parse_condition()?);
        }
        Ok(Expr::NaryOp(NaryOpExpr {
            op: NaryOperator::And,
            operands,
        }))
    }

    fn parse_condition(&mut self) -> Result<Expr> {
        if self.parse_keyword(Keyword::NOT) {
            return Ok(Expr::UnaryOp(UnaryOpExpr {
                op: UnaryOperator::Not,
                expr: Box::new(self.parse_condition()?),
            }));
        }
        if self.peek_token().is_keyword(Keyword::EXISTS) && self.peek_nth(1) == &Token::LeftParen {
            self.next_token();
            self.expect_token(&Token::LeftParen)?;
            let query = self.parse_query()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::Exists(Box::new(query)));
        }
        if self.peek_token().is_keyword(Keyword::UNIQUE) && self.peek_nth(1) == &Token::LeftParen {
            self.next_token();
            self.expect_token(&Token::LeftParen)?;
            let query = self.parse_query()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::Unique(Box::new(query)));
        }
        if self.peek_token().is_keyword(Keyword::INTERSECTS)
            && self.peek_nth(1) == &Token::LeftParen
        {
            self.next_token();
            self.expect_token(&Token::LeftParen)?;
            let left = Box::new(self.parse_expr()?);
            self.expect_token(&Token::Comma)?;
            let right = Box::new(self.parse_expr()?);
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::Intersects(IntersectsExpr { left, right }));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let left = self.parse_concat()?;
        let op = match self.peek_token() {
            Token::Eq => Some(ComparisonOperator::Eq),
            Token::NotEq => Some(ComparisonOperator::NotEq),
            Token::Lt => Some(ComparisonOperator::Lt),
            Token::LtEq => Some(ComparisonOperator::LtEq),
            Token::Gt => Some(ComparisonOperator::Gt),
            Token::GtEq => Some(ComparisonOperator::GtEq),
            Token::SpatialIntersects => Some(ComparisonOperator::SpatialIntersects),
            _ => None,
        };
        if let Some(op) = op {
            self.next_token();
            if let Some(quantifier) = self.parse_quantifier()? {
                return self.parse_quantified(left, op, quantifier);
            }
            let right = self.parse_concat()?;
            return Ok(Expr::Comparison(ComparisonExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }));
        }
        match self.peek_token() {
            Token::Tilde => {
                self.next_token();
                let pattern = self.parse_concat()?;
                return Ok(Expr::Regexp(RegexpExpr {
                    expr: Box::new(left),
                    negated: false,
                    pattern: Box::new(pattern),
                }));
            }
            Token::NotTilde => {
                self.next_token();
                let pattern = self.parse_concat()?;
                return Ok(Expr::Regexp(RegexpExpr {
                    expr: Box::new(left),
                    negated: true,
                    pattern: Box::new(pattern),
                }));
            }
            _ => {}
        }
        // [NOT] {IN | BETWEEN | LIKE | ILIKE | REGEXP} and IS predicates
        let negated = self.peek_token().is_keyword(Keyword::NOT)
            && self
                .peek_nth(1)
                .which_keyword(&[
                    Keyword::IN,
                    Keyword::BETWEEN,
                    Keyword::LIKE,
                    Keyword::ILIKE,
                    Keyword::REGEXP,
                ])
                .is_some();
        if negated {
            self.next_token(); // NOT
        }
        if self.parse_keyword(Keyword::IS) {
            return self.parse_is(left);
        }
        if self.parse_keyword(Keyword::IN) {
            return self.parse_in(left, negated);
        }
        if self.parse_keyword(Keyword::BETWEEN) {
            return self.parse_between(left, negated);
        }
        if self.parse_keyword(Keyword::LIKE) {
            return self.parse_like(left, negated, false);
        }
        if self.parse_keyword(Keyword::ILIKE) {
            return self.parse_like(left, negated, true);
        }
        if self.parse_keyword(Keyword::REGEXP) {
            let pattern = self.parse_concat()?;
            return Ok(Expr::Regexp(RegexpExpr {
                expr: Box::new(left),
                negated,
                pattern: Box::new(pattern),
            }));
        }
        if negated {
            return self.expected("IN, BETWEEN, LIKE, ILIKE or REGEXP after NOT");
        }
        Ok(left)
    }

    fn parse_quantifier(&mut self) -> Result<Option<Quantifier>> {
        let quantifier = match self.peek_token() {
            token if token.is_keyword(Keyword::ALL) => Quantifier::All,
            token if token.is_keyword(Keyword::ANY) => Quantifier::Any,
            token if token.is_keyword(Keyword::SOME) => Quantifier::Some,
            _ => return Ok(None),
        };
        if self.peek_nth(1) != &Token::LeftParen {
            return Ok(None);
        }
        self.next_token();
        Ok(Some(quantifier))
    }

    fn parse_quantified(
        &mut self,
        left: Expr,
        op: ComparisonOperator,
        quantifier: Quantifier,
    ) -> Result<Expr> {
        self.expect_token(&Token::LeftParen)?;
        if let Token::Parameter(index) = *self.peek_token() {
            // `= ANY(?)`: the array parameter form reads as an IN over the
            // parameter value
            self.next_token();
            let param = self.params.register(index)?;
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::InList(InListExpr {
                expr: Box::new(left),
                negated: op == ComparisonOperator::NotEq,
                list: vec![Expr::Parameter(param)],
            }));
        }
        let subquery = Box::new(self.parse_query()?);
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::Quantified(QuantifiedExpr {
            op,
            quantifier,
            left: Box::new(left),
            subquery,
        }))
    }

    fn parse_is(&mut self, left: Expr) -> Result<Expr> {
        let negated = self.parse_keyword(Keyword::NOT);
        if self.parse_keyword(Keyword::NULL) {
            return Ok(Expr::IsNull(IsNullExpr {
                expr: Box::new(left),
                negated,
            }));
        }
        for (keyword, value) in [
            (Keyword::TRUE, TruthValue::True),
            (Keyword::FALSE, TruthValue::False),
            (Keyword::UNKNOWN, TruthValue::Unknown),
        ] {
            if self.parse_keyword(keyword) {
                return Ok(Expr::IsTruth(IsTruthExpr {
                    expr: Box::new(left),
                    negated,
                    value,
                }));
            }
        }
        if self.parse_keywords(&[Keyword::DISTINCT, Keyword::FROM]) {
            let right = self.parse_concat()?;
            return Ok(Expr::IsDistinctFrom(IsDistinctFromExpr {
                negated,
                left: Box::new(left),
                right: Box::new(right),
            }));
        }
        if self.parse_keyword(Keyword::JSON) {
            let item_type = if self.parse_keyword(Keyword::VALUE) {
                Some(JsonItemType::Value)
            } else if self.parse_keyword(Keyword::ARRAY) {
                Some(JsonItemType::Array)
            } else if self.parse_keyword(Keyword::OBJECT) {
                Some(JsonItemType::Object)
            } else if self.parse_contextual("SCALAR") {
                Some(JsonItemType::Scalar)
            } else {
                None
            };
            return Ok(Expr::IsJson(IsJsonExpr {
                expr: Box::new(left),
                negated,
                item_type,
            }));
        }
        if self.parse_keyword(Keyword::OF) {
            let types = self.parse_parenthesized(Parser::parse_data_type)?;
            return Ok(Expr::IsOfType(IsOfTypeExpr {
                expr: Box::new(left),
                negated,
                types,
            }));
        }
        self.expected("NULL, TRUE, FALSE, UNKNOWN, DISTINCT FROM, JSON or OF")
    }

    fn parse_in(&mut self, left: Expr, negated: bool) -> Result<Expr> {
        self.expect_token(&Token::LeftParen)?;
        if self.peek_is_query_start() {
            let subquery = Box::new(self.parse_query()?);
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::InSubquery(InSubqueryExpr {
                expr: Box::new(left),
                negated,
                subquery,
            }));
        }
        let list = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::InList(InListExpr {
            expr: Box::new(left),
            negated,
            list,
        }))
    }

    fn parse_between(&mut self, left: Expr, negated: bool) -> Result<Expr> {
        let symmetric = if self.parse_keyword(Keyword::SYMMETRIC) {
            true
        } else {
            self.parse_keyword(Keyword::ASYMMETRIC);
            false
        };
        // the bounds stop below AND
        let low = self.parse_concat()?;
        self.expect_keyword(Keyword::AND)?;
        let high = self.parse_concat()?;
        Ok(Expr::Between(BetweenExpr {
            expr: Box::new(left),
            negated,
            symmetric,
            low: Box::new(low),
            high: Box::new(high),
        }))
    }

    fn parse_like(&mut self, left: Expr, negated: bool, case_insensitive: bool) -> Result<Expr> {
        let pattern = self.parse_concat()?;
        let escape = if self.parse_keyword(Keyword::ESCAPE) {
            Some(Box::new(self.parse_concat()?))
        } else {
            None
        };
        Ok(Expr::Like(LikeExpr {
            expr: Box::new(left),
            negated,
            case_insensitive,
            pattern: Box::new(pattern),
            escape,
        }))
    }

    fn parse_concat(&mut self) -> Result<Expr> {
        let first = self.parse_summand()?;
        if self.peek_token() != &Token::Concat {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.next_token_if_is(&Token::Concat) {
            operands.push(self.parse_summand()?);
        }
        Ok(Expr::NaryOp(NaryOpExpr {
            op: NaryOperator::Concat,
            operands,
        }))
    }

    fn parse_summand(&mut self) -> Result<Expr> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.peek_token() {
                Token::Plus => BinaryOperator::Plus,
                Token::Minus => BinaryOperator::Minus,
                _ => break,
            };
            self.next_token();
            let right = self.parse_term()?;
            expr = Expr::BinaryOp(BinaryOpExpr {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = match self.peek_token() {
                Token::Asterisk => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                // `%` reads as MOD
                Token::Percent => BinaryOperator::Modulo,
                _ => break,
            };
            self.next_token();
            let right = self.parse_factor()?;
            expr = Expr::BinaryOp(BinaryOpExpr {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        if self.next_token_if_is(&Token::Minus) {
            return Ok(Expr::UnaryOp(UnaryOpExpr {
                op: UnaryOperator::Minus,
                expr: Box::new(self.parse_factor()?),
            }));
        }
        if self.next_token_if_is(&Token::Plus) {
            return Ok(Expr::UnaryOp(UnaryOpExpr {
                op: UnaryOperator::Plus,
                expr: Box::new(self.parse_factor()?),
            }));
        }
        let expr = self.parse_primary()?;
        self.parse_postfix(expr)
    }

    fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr> {
        loop {
            match self.peek_token() {
                Token::DoubleColon if self.session().config().flags.double_colon_cast => {
                    self.next_token();
                    let data_type = self.parse_data_type()?;
                    expr = Expr::Cast(CastExpr {
                        expr: Box::new(expr),
                        data_type,
                        postfix: true,
                    });
                }
                Token::LeftBracket => {
                    self.next_token();
                    let index = self.parse_expr()?;
                    self.expect_token(&Token::RightBracket)?;
                    expr = Expr::ArrayElement(ArrayElementExpr {
                        array: Box::new(expr),
                        index: Box::new(index),
                    });
                }
                Token::Period => {
                    self.next_token();
                    let field = self.parse_identifier()?;
                    expr = Expr::FieldAccess(FieldAccessExpr {
                        expr: Box::new(expr),
                        field,
                    });
                }
                token if token.is_keyword(Keyword::AT) => {
                    self.next_token();
                    if self.parse_keyword(Keyword::LOCAL) {
                        expr = Expr::AtTimeZone(AtTimeZoneExpr {
                            expr: Box::new(expr),
                            zone: None,
                        });
                    } else {
                        self.expect_keywords(&[Keyword::TIME, Keyword::ZONE])?;
                        let zone = self.parse_concat()?;
                        expr = Expr::AtTimeZone(AtTimeZoneExpr {
                            expr: Box::new(expr),
                            zone: Some(Box::new(zone)),
                        });
                    }
                }
                token if token.is_keyword(Keyword::FORMAT) => {
                    self.next_token();
                    self.expect_keyword(Keyword::JSON)?;
                    expr = Expr::FormatJson(Box::new(expr));
                }
                // `(a - b) DAY TO SECOND`: the interval qualifier postfix is
                // accepted only after a parenthesized expression
                token
                    if matches!(expr, Expr::Nested(_))
                        && token
                            .which_keyword(&[
                                Keyword::YEAR,
                                Keyword::MONTH,
                                Keyword::DAY,
                                Keyword::HOUR,
                                Keyword::MINUTE,
                                Keyword::SECOND,
                            ])
                            .is_some() =>
                {
                    let qualifier = self.parse_interval_qualifier()?;
                    expr = Expr::IntervalQualified(IntervalQualifiedExpr {
                        expr: Box::new(expr),
                        qualifier,
                    });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    // ---- primary expressions ----

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek_token().clone() {
            Token::Parameter(index) => {
                self.next_token();
                let param = self.params.register(index)?;
                Ok(Expr::Parameter(param))
            }
            Token::Integer(_) | Token::Bigint(_) | Token::Numeric(_) | Token::Approximate(_) => {
                self.check_literal_allowed(true)?;
                Ok(Expr::Literal(self.parse_literal_value()?))
            }
            Token::CharString(_) | Token::BinaryString(_) => {
                self.check_literal_allowed(false)?;
                Ok(Expr::Literal(self.parse_literal_value()?))
            }
            Token::LeftParen => self.parse_parenthesized_primary(),
            Token::At => {
                self.next_token();
                let name = self.parse_identifier()?;
                if self.next_token_if_is(&Token::ColonEq) {
                    let value = self.parse_expr()?;
                    Ok(Expr::VariableAssignment(VariableAssignmentExpr {
                        name,
                        value: Box::new(value),
                    }))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            Token::Word(word) => self.parse_word_primary(word),
            _ => self.expected("an expression"),
        }
    }

    fn parse_parenthesized_primary(&mut self) -> Result<Expr> {
        self.expect_token(&Token::LeftParen)?;
        if self.peek_is_query_start() {
            let query = self.parse_query()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::Subquery(Box::new(query)));
        }
        let first = self.parse_expr()?;
        if self.next_token_if_is(&Token::Comma) {
            let mut values = vec![first];
            loop {
                values.push(self.parse_expr()?);
                if !self.next_token_if_is(&Token::Comma) {
                    break;
                }
            }
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::RowConstructor(RowConstructorExpr { values }));
        }
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::Nested(Box::new(first)))
    }

    fn parse_word_primary(&mut self, word: Word) -> Result<Expr> {
        if let Some(keyword) = word.keyword {
            match keyword {
                Keyword::NULL => {
                    self.next_token();
                    return Ok(Expr::Literal(Value::Null));
                }
                Keyword::TRUE => {
                    self.next_token();
                    return Ok(Expr::Literal(Value::Boolean(true)));
                }
                Keyword::FALSE => {
                    self.next_token();
                    return Ok(Expr::Literal(Value::Boolean(false)));
                }
                Keyword::CASE => return self.parse_case(),
                Keyword::CAST => return self.parse_cast(),
                Keyword::ARRAY => return self.parse_array_constructor(),
                Keyword::ROW => {
                    if self.peek_nth(1) == &Token::LeftParen {
                        self.next_token();
                        let values = self.parse_parenthesized(Parser::parse_expr)?;
                        return Ok(Expr::RowConstructor(RowConstructorExpr { values }));
                    }
                }
                Keyword::INTERVAL => return self.parse_interval_literal(),
                Keyword::DATE
                | Keyword::TIME
                | Keyword::TIMESTAMP
                | Keyword::UUID
                | Keyword::JSON
                | Keyword::GEOMETRY => {
                    if let Some(literal) = self.parse_contextual_literal(keyword)? {
                        return Ok(literal);
                    }
                }
                Keyword::NEXT => {
                    if self.parse_keywords(&[Keyword::NEXT, Keyword::VALUE, Keyword::FOR]) {
                        return self.parse_sequence_value(false);
                    }
                }
                Keyword::CURRENT => {
                    if self.parse_keywords(&[Keyword::CURRENT, Keyword::VALUE, Keyword::FOR]) {
                        return self.parse_sequence_value(true);
                    }
                }
                Keyword::VALUE => {
                    if self.parse_domain_constraint {
                        self.next_token();
                        return Ok(Expr::DomainValue);
                    }
                }
                Keyword::CURRENT_DATE => return self.current_value(CurrentValue::CurrentDate),
                Keyword::CURRENT_TIME => return self.current_value(CurrentValue::CurrentTime),
                Keyword::CURRENT_TIMESTAMP => {
                    return self.current_value(CurrentValue::CurrentTimestamp)
                }
                Keyword::LOCALTIME => return self.current_value(CurrentValue::LocalTime),
                Keyword::LOCALTIMESTAMP => return self.current_value(CurrentValue::LocalTimestamp),
                Keyword::CURRENT_USER | Keyword::USER => {
                    return self.current_value(CurrentValue::CurrentUser)
                }
                Keyword::SESSION_USER => return self.current_value(CurrentValue::SessionUser),
                Keyword::SYSTEM_USER => return self.current_value(CurrentValue::SystemUser),
                Keyword::CURRENT_CATALOG => {
                    return self.current_value(CurrentValue::CurrentCatalog)
                }
                Keyword::CURRENT_SCHEMA => return self.current_value(CurrentValue::CurrentSchema),
                Keyword::ROWNUM => return self.current_value(CurrentValue::RowNumber),
                // LEFT and RIGHT are reserved join words but also builtin
                // string functions when directly called
                Keyword::LEFT | Keyword::RIGHT if self.peek_nth(1) == &Token::LeftParen => {
                    let name = ObjectName(vec![Ident::new(keyword.as_str())]);
                    self.next_token();
                    return self.parse_function_call(name);
                }
                _ => {}
            }
            if keyword.is_reserved() && !word.quoted {
                return self.expected("an expression");
            }
        }
        // legacy typed literals: D'...', T'...', TS'...', E'...'
        if !word.quoted && matches!(self.peek_nth(1), Token::CharString(_)) {
            let upper = word.value.to_uppercase();
            match upper.as_str() {
                "D" => {
                    self.next_token();
                    let value = self.expect_char_string()?;
                    return Ok(Expr::Literal(Value::Date(value)));
                }
                "E" => {
                    self.next_token();
                    let raw = self.expect_char_string()?;
                    // modes that decode plain literals in the lexer deliver
                    // the body already processed
                    let value = if self.session().config().flags.backslash_escapes {
                        raw
                    } else {
                        decode_backslash_escapes(&raw)
                    };
                    return Ok(Expr::Literal(Value::CharString(value)));
                }
                "T" => {
                    self.next_token();
                    let value = self.expect_char_string()?;
                    return Ok(Expr::Literal(Value::Time {
                        value,
                        with_time_zone: false,
                    }));
                }
                "TS" => {
                    self.next_token();
                    let value = self.expect_char_string()?;
                    return Ok(Expr::Literal(Value::Timestamp {
                        value,
                        with_time_zone: false,
                    }));
                }
                _ => {}
            }
        }
        self.parse_identifier_expr()
    }

    fn current_value(&mut self, value: CurrentValue) -> Result<Expr> {
        self.next_token();
        // `CURRENT_TIMESTAMP(precision)` and friends accept and discard a
        // precision argument
        if self.next_token_if_is(&Token::LeftParen) {
            if !self.next_token_if_is(&Token::RightParen) {
                let _ = self.parse_expr()?;
                self.expect_token(&Token::RightParen)?;
            }
        }
        Ok(Expr::CurrentValue(value))
    }

    fn expect_char_string(&mut self) -> Result<String> {
        match self.next_token() {
            Token::CharString(value) => Ok(value),
            _ => self.expected("a string literal"),
        }
    }

    /// `DATE '...'`, `TIME [WITH|WITHOUT TIME ZONE] '...'`, `UUID '...'`,
    /// `JSON '...'`, `GEOMETRY '...' | X'...'`. Returns `None` when the
    /// keyword is not followed by a literal and reads as an identifier.
    fn parse_contextual_literal(&mut self, keyword: Keyword) -> Result<Option<Expr>> {
        let mut with_time_zone = false;
        let mut lookahead = 1;
        if matches!(keyword, Keyword::TIME | Keyword::TIMESTAMP) {
            if self.peek_nth(1).is_keyword(Keyword::WITH)
                && self.peek_nth(2).is_keyword(Keyword::TIME)
                && self.peek_nth(3).is_keyword(Keyword::ZONE)
            {
                with_time_zone = true;
                lookahead = 4;
            } else if self.peek_nth(1).is_keyword(Keyword::WITHOUT)
                && self.peek_nth(2).is_keyword(Keyword::TIME)
                && self.peek_nth(3).is_keyword(Keyword::ZONE)
            {
                lookahead = 4;
            }
        }
        let is_string = matches!(self.peek_nth(lookahead), Token::CharString(_));
        let is_binary = matches!(self.peek_nth(lookahead), Token::BinaryString(_));
        if !is_string && !(keyword == Keyword::GEOMETRY && is_binary) {
            return Ok(None);
        }
        for _ in 0..lookahead {
            self.next_token();
        }
        let expr = match keyword {
            Keyword::DATE => Expr::Literal(Value::Date(self.expect_char_string()?)),
            Keyword::TIME => Expr::Literal(Value::Time {
                value: self.expect_char_string()?,
                with_time_zone,
            }),
            Keyword::TIMESTAMP => Expr::Literal(Value::Timestamp {
                value: self.expect_char_string()?,
                with_time_zone,
            }),
            Keyword::UUID => Expr::Literal(Value::Uuid(self.expect_char_string()?)),
            Keyword::JSON => Expr::Literal(Value::Json(self.expect_char_string()?)),
            Keyword::GEOMETRY => {
                let source = match self.next_token() {
                    Token::CharString(wkt) => GeometrySource::Wkt(wkt),
                    Token::BinaryString(ewkb) => GeometrySource::Ewkb(ewkb),
                    _ => return self.expected("a geometry literal"),
                };
                Expr::Literal(Value::Geometry(source))
            }
            _ => unreachable!("caller restricts the keyword set"),
        };
        Ok(Some(expr))
    }

    fn parse_sequence_value(&mut self, current: bool) -> Result<Expr> {
        let name = self.parse_object_name()?;
        let (schema, sequence) = self.schema_and_name(&name)?;
        self.resolver()
            .resolve_sequence(schema.as_deref(), &sequence)?;
        Ok(Expr::SequenceValue(SequenceValueExpr {
            current,
            sequence: name,
        }))
    }

    fn parse_case(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::CASE)?;
        let operand = if self.peek_token().is_keyword(Keyword::WHEN) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut when_clauses = Vec::new();
        while self.parse_keyword(Keyword::WHEN) {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::THEN)?;
            let result = self.parse_expr()?;
            when_clauses.push(CaseWhen { condition, result });
        }
        if when_clauses.is_empty() {
            return self.expected("WHEN");
        }
        let else_result = if self.parse_keyword(Keyword::ELSE) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::END)?;
        Ok(Expr::Case(CaseExpr {
            operand,
            when_clauses,
            else_result,
        }))
    }

    fn parse_cast(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::CAST)?;
        self.expect_token(&Token::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::AS)?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::Cast(CastExpr {
            expr: Box::new(expr),
            data_type,
            postfix: false,
        }))
    }

    fn parse_array_constructor(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::ARRAY)?;
        if self.next_token_if_is(&Token::LeftBracket) {
            if self.next_token_if_is(&Token::RightBracket) {
                return Ok(Expr::ArrayConstructor(ArrayConstructorExpr::List(vec![])));
            }
            let items = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RightBracket)?;
            return Ok(Expr::ArrayConstructor(ArrayConstructorExpr::List(items)));
        }
        self.expect_token(&Token::LeftParen)?;
        let query = self.parse_query()?;
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::ArrayConstructor(ArrayConstructorExpr::Subquery(
            Box::new(query),
        )))
    }

    fn parse_interval_literal(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::INTERVAL)?;
        let value = self.expect_char_string()?;
        let (qualifier, leading_precision, fractional_precision) =
            self.parse_interval_qualifier_full()?;
        Ok(Expr::Literal(Value::Interval {
            value,
            qualifier,
            leading_precision,
            fractional_precision,
        }))
    }

    // ---- identifiers, columns and functions ----

    fn parse_identifier_expr(&mut self) -> Result<Expr> {
        let first = self.parse_identifier()?;
        if self.peek_token() == &Token::LeftParen {
            return self.parse_function_call(ObjectName(vec![first]));
        }
        let mut parts = vec![first];
        while self.peek_token() == &Token::Period {
            match self.peek_nth(1) {
                Token::Asterisk => {
                    self.next_token();
                    self.next_token();
                    return Ok(Expr::QualifiedWildcard(ObjectName(parts)));
                }
                Token::Word(word) if word_usable(word) => {
                    self.next_token();
                    parts.push(self.parse_identifier()?);
                    if self.peek_token() == &Token::LeftParen {
                        return self.parse_function_call(ObjectName(parts));
                    }
                }
                _ => break,
            }
        }
        self.column_ref_from_parts(parts)
    }

    fn column_ref_from_parts(&mut self, mut parts: Vec<Ident>) -> Result<Expr> {
        // `seq.NEXTVAL` / `seq.CURRVAL` pseudo-columns
        if parts.len() == 2 && self.session().config().flags.next_curr_val_pseudo_columns {
            let last = parts[1].value.to_uppercase();
            if last == "NEXTVAL" || last == "CURRVAL" {
                let sequence = ObjectName(vec![parts.remove(0)]);
                self.resolver()
                    .resolve_sequence(None, &sequence.0[0].value)?;
                return Ok(Expr::SequenceValue(SequenceValueExpr {
                    current: last == "CURRVAL",
                    sequence,
                }));
            }
        }
        let column = match parts.len() {
            1 => ColumnRef {
                schema: None,
                table: None,
                name: parts.pop().expect("one part"),
            },
            2 => {
                let name = parts.pop().expect("two parts");
                ColumnRef {
                    schema: None,
                    table: parts.pop(),
                    name,
                }
            }
            3 => {
                let name = parts.pop().expect("three parts");
                let table = parts.pop();
                ColumnRef {
                    schema: parts.pop(),
                    table,
                    name,
                }
            }
            4 => {
                let name = parts.pop().expect("four parts");
                let table = parts.pop();
                let schema = parts.pop();
                let catalog = parts.pop().expect("four parts");
                self.check_catalog(&catalog)?;
                ColumnRef {
                    schema,
                    table,
                    name,
                }
            }
            _ => return self.syntax_error("Invalid column reference"),
        };
        Ok(Expr::Column(column))
    }

    /// Dispatches a call by name: aggregates, window functions, builtins,
    /// user-defined functions and the compatibility family.
    pub(crate) fn parse_function_call(&mut self, name: ObjectName) -> Result<Expr> {
        let (schema, fname) = self.schema_and_name(&name)?;
        let upper = fname.to_uppercase();
        if schema.is_none() {
            if let Some(kind) = AggregateKind::from_name_with_synonyms(&upper) {
                return self.parse_aggregate_call(name, kind);
            }
            if let Some(kind) = WindowKind::from_name(&upper) {
                return self.parse_window_call(name, kind);
            }
            if let Some(expr) = self.parse_special_syntax_function(&upper)? {
                return Ok(expr);
            }
            if let Some(builtin) = BuiltinFunction::from_name(&upper) {
                let args = self.parse_call_args()?;
                return Ok(Expr::Function(Box::new(FunctionCall::simple(
                    name,
                    FunctionKind::Builtin(builtin),
                    args,
                ))));
            }
        }
        let allow_override = self.session().config().allow_builtin_override;
        if !allow_override && schema.is_none() {
            if let Some(compat) = CompatFunction::from_name(&upper) {
                return self.parse_compat_call(name, compat);
            }
        }
        if let Some(alias) = self.resolver().resolve_function(schema.as_deref(), &fname)? {
            if !alias.deterministic {
                self.recompile_always = true;
            }
            let args = self.parse_call_args()?;
            return Ok(Expr::Function(Box::new(FunctionCall::simple(
                name,
                FunctionKind::UserDefined,
                args,
            ))));
        }
        if let Some(_aggregate) = self.resolver().resolve_aggregate(schema.as_deref(), &fname)? {
            let args = self.parse_call_args()?;
            return Ok(Expr::Function(Box::new(FunctionCall::simple(
                name,
                FunctionKind::UserAggregate,
                args,
            ))));
        }
        if allow_override && schema.is_none() {
            if let Some(compat) = CompatFunction::from_name(&upper) {
                return self.parse_compat_call(name, compat);
            }
        }
        Err(FrontendError::new(
            ErrorKind::FunctionNotFound,
            format!("Function \"{}\" not found", fname),
        ))
    }

    fn parse_compat_call(&mut self, name: ObjectName, compat: CompatFunction) -> Result<Expr> {
        let mut args = self.parse_call_args()?;
        if compat == CompatFunction::Convert && self.session().config().flags.swapped_convert_arguments
        {
            args.reverse();
        }
        Ok(Expr::Function(Box::new(FunctionCall::simple(
            name,
            FunctionKind::Compatibility(compat),
            args,
        ))))
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>> {
        self.expect_token(&Token::LeftParen)?;
        if self.next_token_if_is(&Token::RightParen) {
            return Ok(Vec::new());
        }
        let args = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&Token::RightParen)?;
        Ok(args)
    }

    /// TRIM / SUBSTRING / POSITION / EXTRACT with their SQL-standard
    /// keyword argument syntax.
    fn parse_special_syntax_function(&mut self, upper: &str) -> Result<Option<Expr>> {
        let builtin = match upper {
            "TRIM" => BuiltinFunction::Trim,
            "SUBSTRING" => BuiltinFunction::Substring,
            "POSITION" => BuiltinFunction::Position,
            "EXTRACT" => BuiltinFunction::Extract,
            _ => return Ok(None),
        };
        self.expect_token(&Token::LeftParen)?;
        let name = ObjectName(vec![Ident::new(builtin.as_str())]);
        let call = match builtin {
            BuiltinFunction::Trim => {
                let mut flags = Expr::Literal(Value::CharString("BOTH".into()));
                if self.parse_keyword(Keyword::LEADING) {
                    flags = Expr::Literal(Value::CharString("LEADING".into()));
                } else if self.parse_keyword(Keyword::TRAILING) {
                    flags = Expr::Literal(Value::CharString("TRAILING".into()));
                } else {
                    self.parse_keyword(Keyword::BOTH);
                }
                if self.parse_keyword(Keyword::FROM) {
                    let source = self.parse_expr()?;
                    FunctionCall::simple(name, FunctionKind::Builtin(builtin), vec![flags, source])
                } else {
                    let first = self.parse_expr()?;
                    if self.parse_keyword(Keyword::FROM) {
                        let source = self.parse_expr()?;
                        FunctionCall::simple(
                            name,
                            FunctionKind::Builtin(builtin),
                            vec![flags, first, source],
                        )
                    } else {
                        let mut args = vec![first];
                        while self.next_token_if_is(&Token::Comma) {
                            args.push(self.parse_expr()?);
                        }
                        FunctionCall::simple(name, FunctionKind::Builtin(builtin), args)
                    }
                }
            }
            BuiltinFunction::Substring => {
                let source = self.parse_expr()?;
                if self.parse_keyword(Keyword::FROM) {
                    let start = self.parse_expr()?;
                    let mut args = vec![source, start];
                    if self.parse_keyword(Keyword::FOR) {
                        args.push(self.parse_expr()?);
                    }
                    FunctionCall::simple(name, FunctionKind::Builtin(builtin), args)
                } else {
                    let mut args = vec![source];
                    while self.next_token_if_is(&Token::Comma) {
                        args.push(self.parse_expr()?);
                    }
                    FunctionCall::simple(name, FunctionKind::Builtin(builtin), args)
                }
            }
            BuiltinFunction::Position => {
                let needle = self.parse_expr()?;
                self.expect_keyword(Keyword::IN)?;
                let haystack = self.parse_expr()?;
                FunctionCall::simple(
                    name,
                    FunctionKind::Builtin(builtin),
                    vec![needle, haystack],
                )
            }
            BuiltinFunction::Extract => {
                let field = self.parse_identifier_or_datetime_field()?;
                self.expect_keyword(Keyword::FROM)?;
                let source = self.parse_expr()?;
                FunctionCall::simple(
                    name,
                    FunctionKind::Builtin(builtin),
                    vec![Expr::Literal(Value::CharString(field)), source],
                )
            }
            _ => unreachable!("restricted above"),
        };
        self.expect_token(&Token::RightParen)?;
        Ok(Some(Expr::Function(Box::new(call))))
    }

    fn parse_identifier_or_datetime_field(&mut self) -> Result<String> {
        if let Some(keyword) = self.parse_one_of_keywords(&[
            Keyword::YEAR,
            Keyword::MONTH,
            Keyword::DAY,
            Keyword::HOUR,
            Keyword::MINUTE,
            Keyword::SECOND,
        ]) {
            return Ok(keyword.as_str().to_owned());
        }
        Ok(self.parse_identifier()?.value)
    }

    fn parse_aggregate_call(&mut self, name: ObjectName, kind: AggregateKind) -> Result<Expr> {
        self.expect_token(&Token::LeftParen)?;
        let mut call = FunctionCall::simple(name, FunctionKind::Aggregate(kind), Vec::new());
        if self.next_token_if_is(&Token::Asterisk) {
            call.args.push(Expr::Wildcard);
        } else if !self.next_token_if_is(&Token::RightParen) {
            if self.parse_keyword(Keyword::DISTINCT) {
                call.distinct = true;
            } else {
                self.parse_keyword(Keyword::ALL);
            }
            call.args = self.parse_comma_separated(Parser::parse_expr)?;
            if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
                call.order_by = self.parse_comma_separated(Parser::parse_sort_spec)?;
            }
            self.expect_token(&Token::RightParen)?;
            return self.parse_aggregate_tail(call);
        } else {
            // empty argument list already consumed the close paren
            return self.parse_aggregate_tail(call);
        }
        self.expect_token(&Token::RightParen)?;
        self.parse_aggregate_tail(call)
    }

    fn parse_aggregate_tail(&mut self, mut call: FunctionCall) -> Result<Expr> {
        if self.parse_keywords(&[Keyword::WITHIN, Keyword::GROUP]) {
            self.expect_token(&Token::LeftParen)?;
            self.expect_keywords(&[Keyword::ORDER, Keyword::BY])?;
            call.within_group = self.parse_comma_separated(Parser::parse_sort_spec)?;
            self.expect_token(&Token::RightParen)?;
        }
        if self.parse_keyword(Keyword::FILTER) {
            self.expect_token(&Token::LeftParen)?;
            self.expect_keyword(Keyword::WHERE)?;
            call.filter = Some(Box::new(self.parse_expr()?));
            self.expect_token(&Token::RightParen)?;
        }
        if self.parse_keyword(Keyword::OVER) {
            call.over = Some(self.parse_window_ref()?);
        }
        Ok(Expr::Function(Box::new(call)))
    }

    fn parse_window_call(&mut self, name: ObjectName, kind: WindowKind) -> Result<Expr> {
        let args = self.parse_call_args()?;
        let mut call = FunctionCall::simple(name, FunctionKind::Window(kind), args);
        self.expect_keyword(Keyword::OVER)?;
        call.over = Some(self.parse_window_ref()?);
        Ok(Expr::Function(Box::new(call)))
    }

    pub(crate) fn parse_window_ref(&mut self) -> Result<WindowRef> {
        if self.next_token_if_is(&Token::LeftParen) {
            let spec = self.parse_window_spec()?;
            self.expect_token(&Token::RightParen)?;
            Ok(WindowRef::Spec(spec))
        } else {
            Ok(WindowRef::Name(self.parse_identifier()?))
        }
    }

    pub(crate) fn parse_window_spec(&mut self) -> Result<WindowSpec> {
        let mut spec = WindowSpec::default();
        if matches!(self.peek_token(), Token::Word(word) if word_usable(word))
            && !self.peek_token().is_keyword(Keyword::PARTITION)
            && !self.peek_token().is_keyword(Keyword::ORDER)
            && !self.peek_token().is_keyword(Keyword::ROWS)
            && !self.peek_token().is_keyword(Keyword::RANGE)
            && !self.peek_token().is_keyword(Keyword::GROUPS)
        {
            spec.base = Some(self.parse_identifier()?);
        }
        if self.parse_keywords(&[Keyword::PARTITION, Keyword::BY]) {
            spec.partition_by = self.parse_comma_separated(Parser::parse_expr)?;
        }
        if self.parse_keywords(&[Keyword::ORDER, Keyword::BY]) {
            spec.order_by = self.parse_comma_separated(Parser::parse_sort_spec)?;
        }
        let units = if self.parse_keyword(Keyword::ROWS) {
            Some(FrameUnits::Rows)
        } else if self.parse_keyword(Keyword::RANGE) {
            Some(FrameUnits::Range)
        } else if self.parse_keyword(Keyword::GROUPS) {
            Some(FrameUnits::Groups)
        } else {
            None
        };
        if let Some(units) = units {
            let frame = self.parse_window_frame(units)?;
            if !frame.is_well_formed() {
                return self.syntax_error("Window frame starts after it ends");
            }
            spec.frame = Some(frame);
        }
        Ok(spec)
    }

    fn parse_window_frame(&mut self, units: FrameUnits) -> Result<WindowFrame> {
        let (start, end) = if self.parse_keyword(Keyword::BETWEEN) {
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::AND)?;
            let end = self.parse_frame_bound()?;
            (start, Some(end))
        } else {
            (self.parse_frame_bound()?, None)
        };
        let exclude = if self.parse_keyword(Keyword::EXCLUDE) {
            if self.parse_keywords(&[Keyword::CURRENT, Keyword::ROW]) {
                Some(FrameExclude::CurrentRow)
            } else if self.parse_keyword(Keyword::GROUP) {
                Some(FrameExclude::Group)
            } else if self.parse_keyword(Keyword::TIES) {
                Some(FrameExclude::Ties)
            } else if self.parse_keywords(&[Keyword::NO, Keyword::OTHERS]) {
                Some(FrameExclude::NoOthers)
            } else {
                return self.expected("CURRENT ROW, GROUP, TIES or NO OTHERS");
            }
        } else {
            None
        };
        Ok(WindowFrame {
            units,
            start,
            end,
            exclude,
        })
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound> {
        if self.parse_keyword(Keyword::UNBOUNDED) {
            if self.parse_keyword(Keyword::PRECEDING) {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_keyword(Keyword::FOLLOWING)?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        if self.parse_keywords(&[Keyword::CURRENT, Keyword::ROW]) {
            return Ok(FrameBound::CurrentRow);
        }
        let offset = Box::new(self.parse_expr()?);
        if self.parse_keyword(Keyword::PRECEDING) {
            return Ok(FrameBound::Preceding(offset));
        }
        self.expect_keyword(Keyword::FOLLOWING)?;
        Ok(FrameBound::Following(offset))
    }

    fn check_literal_allowed(&mut self, numeric: bool) -> Result<()> {
        let allowed = match self.session().config().allow_literals {
            AllowLiterals::All => true,
            AllowLiterals::Numbers => numeric,
            AllowLiterals::None => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(FrontendError::new(
                ErrorKind::LiteralsAreNotAllowed,
                "Literals of this kind are not allowed",
            ))
        }
    }
}

use crate::parser::usable_as_identifier as word_usable;

/// Applies the backslash escapes of a legacy `E'...'` literal.
fn decode_backslash_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Whether an expression contains an aggregate invocation outside any
/// nested subquery; used to reject aggregates in TOP / LIMIT / OFFSET /
/// FETCH expressions.
pub(crate) fn contains_aggregate(expr: &Expr) -> bool {
    match expr {
        Expr::Function(call) => {
            matches!(
                call.kind,
                FunctionKind::Aggregate(_) | FunctionKind::UserAggregate
            ) || call.args.iter().any(contains_aggregate)
        }
        Expr::UnaryOp(e) => contains_aggregate(&e.expr),
        Expr::BinaryOp(e) => contains_aggregate(&e.left) || contains_aggregate(&e.right),
        Expr::NaryOp(e) => e.operands.iter().any(contains_aggregate),
        Expr::Comparison(e) => contains_aggregate(&e.left) || contains_aggregate(&e.right),
        Expr::Nested(e) | Expr::FormatJson(e) => contains_aggregate(e),
        Expr::Cast(e) => contains_aggregate(&e.expr),
        Expr::Case(e) => {
            e.operand.as_deref().map_or(false, contains_aggregate)
                || e.when_clauses
                    .iter()
                    .any(|w| contains_aggregate(&w.condition) || contains_aggregate(&w.result))
                || e.else_result.as_deref().map_or(false, contains_aggregate)
        }
        _ => false,
    }
}

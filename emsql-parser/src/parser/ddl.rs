//! Data-definition statements: the CREATE / ALTER / DROP families.

use emsql_ast::{
    AlterDomainAction, AlterDomainStmt, AlterSequenceStmt, AlterTableAction, AlterTableStmt,
    AlterUserAction, AlterUserStmt, ColumnConstraint, ColumnConstraintDef, ColumnDef, CommentStmt,
    CreateAggregateStmt,
    CreateAliasStmt, CreateConstantStmt, CreateDomainStmt, CreateIndexStmt,
    CreateLinkedTableStmt, CreateRoleStmt, CreateSchemaStmt, CreateSequenceStmt,
    CreateSynonymStmt, CreateTableStmt, CreateTriggerStmt, CreateUserStmt, CreateViewStmt,
    DomainConstraintDef, DropBehavior, DropStmt, ForeignKeyRef, GrantRevokeStmt, IdentityOptions,
    ObjectType, OnCommit, ReferentialAction, Right, SequenceOptions, Statement, TableConstraint,
    TableConstraintDef, TriggerEvent, TriggerTiming, TruncateStmt,
};
use emsql_core::{ErrorKind, FrontendError, Keyword, Result};
use emsql_lexer::Token;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_create_stmt(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::CREATE)?;
        let or_replace = self.parse_keywords(&[Keyword::OR, Keyword::REPLACE]);
        // CREATE [GLOBAL | LOCAL] [TEMPORARY | TEMP] TABLE
        let global_local =
            self.parse_keyword(Keyword::GLOBAL) || self.parse_keyword(Keyword::LOCAL);
        let temporary = self.parse_keyword(Keyword::TEMPORARY)
            || self.parse_keyword(Keyword::TEMP)
            || global_local;
        if temporary {
            self.expect_keyword(Keyword::TABLE)?;
            return self.parse_create_table(true).map(Statement::CreateTable);
        }
        if self.parse_keyword(Keyword::TABLE) {
            return self.parse_create_table(false).map(Statement::CreateTable);
        }
        if self.parse_keywords(&[Keyword::LINKED, Keyword::TABLE]) {
            return self
                .parse_create_linked_table()
                .map(Statement::CreateLinkedTable);
        }
        let force = self.parse_keyword(Keyword::FORCE);
        if self.parse_keyword(Keyword::VIEW) {
            return self
                .parse_create_view(or_replace, force)
                .map(Statement::CreateView);
        }
        if force {
            return self.expected("VIEW");
        }
        let unique = self.parse_keyword(Keyword::UNIQUE);
        let spatial = self.parse_keyword(Keyword::SPATIAL);
        let hash = self.parse_keyword(Keyword::HASH);
        if self.parse_keyword(Keyword::INDEX) {
            return self
                .parse_create_index(unique, spatial, hash)
                .map(Statement::CreateIndex);
        }
        if unique || spatial || hash {
            return self.expected("INDEX");
        }
        if self.parse_keyword(Keyword::SEQUENCE) {
            return self.parse_create_sequence().map(Statement::CreateSequence);
        }
        if self.parse_keyword(Keyword::DOMAIN) || self.parse_keyword(Keyword::TYPE) {
            return self.parse_create_domain().map(Statement::CreateDomain);
        }
        if self.parse_keyword(Keyword::SCHEMA) {
            return self.parse_create_schema().map(Statement::CreateSchema);
        }
        if self.parse_keyword(Keyword::CONSTANT) {
            return self.parse_create_constant().map(Statement::CreateConstant);
        }
        if self.parse_keyword(Keyword::ALIAS) {
            return self.parse_create_alias().map(Statement::CreateAlias);
        }
        if self.parse_keyword(Keyword::AGGREGATE) {
            return self.parse_create_aggregate().map(Statement::CreateAggregate);
        }
        if self.parse_keyword(Keyword::TRIGGER) {
            return self.parse_create_trigger().map(Statement::CreateTrigger);
        }
        if self.parse_keyword(Keyword::ROLE) {
            let if_not_exists = self.parse_if_not_exists();
            let name = self.parse_identifier()?;
            return Ok(Statement::CreateRole(CreateRoleStmt {
                if_not_exists,
                name,
            }));
        }
        if self.parse_keyword(Keyword::USER) {
            return self.parse_create_user().map(Statement::CreateUser);
        }
        if self.parse_keyword(Keyword::SYNONYM) {
            return self.parse_create_synonym().map(Statement::CreateSynonym);
        }
        self.expected("an object kind after CREATE")
    }

    fn parse_if_not_exists(&mut self) -> bool {
        self.parse_keywords(&[Keyword::IF, Keyword::NOT, Keyword::EXISTS])
    }

    fn parse_if_exists(&mut self) -> bool {
        self.parse_keywords(&[Keyword::IF, Keyword::EXISTS])
    }

    // ---- tables ----

    fn parse_create_table(&mut self, temporary: bool) -> Result<CreateTableStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        let mut stmt = CreateTableStmt {
            temporary,
            if_not_exists,
            name,
            columns: Vec::new(),
            constraints: Vec::new(),
            as_query: None,
            engine: None,
            on_commit: None,
        };
        if self.next_token_if_is(&Token::LeftParen) {
            loop {
                if self.peek_table_constraint_start() {
                    let constraint = self.parse_table_constraint_def()?;
                    stmt.constraints.push(constraint);
                } else if self.session().config().flags.key_and_index_constraints
                    && (self.peek_token().is_keyword(Keyword::KEY)
                        || self.peek_token().is_keyword(Keyword::INDEX))
                {
                    // MySQL inline index definitions parse and are dropped
                    self.next_token();
                    let _ = self.parse_identifier();
                    let _ = self.parse_parenthesized(Parser::parse_identifier)?;
                } else {
                    let column = self.parse_column_def()?;
                    if stmt
                        .columns
                        .iter()
                        .any(|existing| existing.name == column.name)
                    {
                        return Err(FrontendError::new(
                            ErrorKind::DuplicateColumnName,
                            format!("Duplicate column name \"{}\"", column.name.value),
                        ));
                    }
                    stmt.columns.push(column);
                }
                if !self.next_token_if_is(&Token::Comma) {
                    break;
                }
            }
            self.expect_token(&Token::RightParen)?;
        }
        if self.parse_keyword(Keyword::ENGINE) {
            self.next_token_if_is(&Token::Eq);
            stmt.engine = Some(self.parse_identifier()?);
        }
        if self.parse_keywords(&[Keyword::ON, Keyword::COMMIT]) {
            stmt.on_commit = if self.parse_keyword(Keyword::DROP) {
                Some(OnCommit::Drop)
            } else {
                self.expect_keywords(&[Keyword::DELETE, Keyword::ROWS])?;
                Some(OnCommit::DeleteRows)
            };
        }
        if self.parse_keyword(Keyword::AS) {
            stmt.as_query = Some(Box::new(self.parse_query()?));
        }
        Ok(stmt)
    }

    fn peek_table_constraint_start(&self) -> bool {
        self.peek_token()
            .which_keyword(&[
                Keyword::CONSTRAINT,
                Keyword::PRIMARY,
                Keyword::FOREIGN,
                Keyword::CHECK,
            ])
            .is_some()
            // UNIQUE at this position is a table constraint only when a
            // column list follows
            || (self.peek_token().is_keyword(Keyword::UNIQUE)
                && self.peek_nth(1) == &Token::LeftParen)
    }

    pub(crate) fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let name = self.parse_identifier()?;
        let data_type = if matches!(self.peek_token(), Token::Comma | Token::RightParen) {
            None
        } else {
            Some(self.parse_data_type()?)
        };
        let mut def = ColumnDef {
            name,
            data_type,
            default: None,
            on_update: None,
            identity: None,
            generated_as: None,
            constraints: Vec::new(),
        };
        let flags = self.session().config().flags;
        // a pending CONSTRAINT name applies to the next constraint parsed
        let mut constraint_name: Option<emsql_ast::Ident> = None;
        loop {
            if self.parse_keyword(Keyword::CONSTRAINT) {
                constraint_name = Some(self.parse_identifier()?);
                continue;
            }
            if self.parse_keyword(Keyword::DEFAULT) {
                def.default = Some(Box::new(self.parse_expr()?));
                continue;
            }
            if self.parse_keywords(&[Keyword::ON, Keyword::UPDATE]) {
                def.on_update = Some(Box::new(self.parse_expr()?));
                continue;
            }
            if self.parse_keywords(&[Keyword::NOT, Keyword::NULL]) {
                def.constraints.push(ColumnConstraintDef {
                    name: constraint_name.take(),
                    constraint: ColumnConstraint::NotNull,
                });
                if flags.constraint_state_modifiers {
                    while self
                        .parse_one_of_keywords(&[
                            Keyword::ENABLE,
                            Keyword::DISABLE,
                            Keyword::VALIDATE,
                            Keyword::NOVALIDATE,
                        ])
                        .is_some()
                    {}
                }
                continue;
            }
            if self.parse_keyword(Keyword::NULL) {
                def.constraints.push(ColumnConstraintDef {
                    name: constraint_name.take(),
                    constraint: ColumnConstraint::Null,
                });
                continue;
            }
            if self.parse_keywords(&[Keyword::PRIMARY, Keyword::KEY]) {
                let hash = self.parse_keyword(Keyword::HASH);
                def.constraints.push(ColumnConstraintDef {
                    name: constraint_name.take(),
                    constraint: ColumnConstraint::PrimaryKey { hash },
                });
                continue;
            }
            if self.parse_keyword(Keyword::UNIQUE) {
                def.constraints.push(ColumnConstraintDef {
                    name: constraint_name.take(),
                    constraint: ColumnConstraint::Unique,
                });
                continue;
            }
            if self.parse_keyword(Keyword::CHECK) {
                self.expect_token(&Token::LeftParen)?;
                let check = self.parse_expr()?;
                self.expect_token(&Token::RightParen)?;
                def.constraints.push(ColumnConstraintDef {
                    name: constraint_name.take(),
                    constraint: ColumnConstraint::Check(Box::new(check)),
                });
                continue;
            }
            if self.parse_keyword(Keyword::REFERENCES) {
                let references = self.parse_foreign_key_ref()?;
                def.constraints.push(ColumnConstraintDef {
                    name: constraint_name.take(),
                    constraint: ColumnConstraint::References(references),
                });
                continue;
            }
            if flags.auto_increment && self.parse_keyword(Keyword::AUTO_INCREMENT) {
                def.constraints.push(ColumnConstraintDef {
                    name: constraint_name.take(),
                    constraint: ColumnConstraint::AutoIncrement,
                });
                continue;
            }
            if flags.identity_keyword && self.parse_keyword(Keyword::IDENTITY) {
                def.identity = Some(IdentityOptions {
                    always: false,
                    sequence: SequenceOptions::default(),
                });
                continue;
            }
            if self.parse_keyword(Keyword::GENERATED) {
                let always = if self.parse_keyword(Keyword::ALWAYS) {
                    true
                } else {
                    self.expect_keywords(&[Keyword::BY, Keyword::DEFAULT])?;
                    false
                };
                self.expect_keyword(Keyword::AS)?;
                if self.parse_keyword(Keyword::IDENTITY) {
                    let sequence = if self.next_token_if_is(&Token::LeftParen) {
                        let options = self.parse_sequence_options()?;
                        self.expect_token(&Token::RightParen)?;
                        options
                    } else {
                        SequenceOptions::default()
                    };
                    def.identity = Some(IdentityOptions { always, sequence });
                } else {
                    self.expect_token(&Token::LeftParen)?;
                    def.generated_as = Some(Box::new(self.parse_expr()?));
                    self.expect_token(&Token::RightParen)?;
                }
                continue;
            }
            if flags.charset_clause_noop {
                if self.parse_keywords(&[Keyword::CHARACTER, Keyword::SET])
                    || self.parse_keyword(Keyword::CHARSET)
                    || self.parse_keyword(Keyword::COLLATE)
                {
                    let _ = self.parse_identifier()?;
                    continue;
                }
            }
            break;
        }
        if constraint_name.is_some() {
            return self.expected("a column constraint after CONSTRAINT name");
        }
        Ok(def)
    }

    /// Parses the shared sequence option list.
    pub(crate) fn parse_sequence_options(&mut self) -> Result<SequenceOptions> {
        let mut options = SequenceOptions::default();
        let flags = self.session().config().flags;
        loop {
            if self.parse_keywords(&[Keyword::START, Keyword::WITH]) {
                options.start_with = Some(self.parse_signed_int()?);
            } else if self.parse_keywords(&[Keyword::INCREMENT, Keyword::BY]) {
                options.increment_by = Some(self.parse_signed_int()?);
            } else if self.parse_keyword(Keyword::MINVALUE) {
                options.min_value = Some(Some(self.parse_signed_int()?));
            } else if self.parse_keyword(Keyword::MAXVALUE) {
                options.max_value = Some(Some(self.parse_signed_int()?));
            } else if self.parse_keywords(&[Keyword::NO, Keyword::MINVALUE]) {
                options.min_value = Some(None);
            } else if self.parse_keywords(&[Keyword::NO, Keyword::MAXVALUE]) {
                options.max_value = Some(None);
            } else if self.parse_keyword(Keyword::CYCLE) {
                options.cycle = Some(true);
            } else if self.parse_keywords(&[Keyword::NO, Keyword::CYCLE]) {
                options.cycle = Some(false);
            } else if self.parse_keyword(Keyword::CACHE) {
                options.cache = Some(Some(self.parse_signed_int()?));
            } else if self.parse_keywords(&[Keyword::NO, Keyword::CACHE]) {
                options.cache = Some(None);
            } else if self.parse_keywords(&[Keyword::DATA, Keyword::TYPE]) {
                options.data_type = Some(self.parse_data_type()?);
            } else if flags.sequence_order_noop
                && (self.parse_keyword(Keyword::ORDER) || self.parse_contextual("NOORDER"))
            {
                // accepted and discarded
            } else {
                break;
            }
        }
        Ok(options)
    }

    fn parse_signed_int(&mut self) -> Result<i64> {
        let negative = self.next_token_if_is(&Token::Minus);
        let value = self.parse_uint()?;
        Ok(if negative { -value } else { value })
    }

    pub(crate) fn parse_table_constraint_def(&mut self) -> Result<TableConstraintDef> {
        let name = if self.parse_keyword(Keyword::CONSTRAINT) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let constraint = if self.parse_keywords(&[Keyword::PRIMARY, Keyword::KEY]) {
            TableConstraint::PrimaryKey(self.parse_parenthesized(Parser::parse_identifier)?)
        } else if self.parse_keyword(Keyword::UNIQUE) {
            TableConstraint::Unique(self.parse_parenthesized(Parser::parse_identifier)?)
        } else if self.parse_keywords(&[Keyword::FOREIGN, Keyword::KEY]) {
            let columns = self.parse_parenthesized(Parser::parse_identifier)?;
            self.expect_keyword(Keyword::REFERENCES)?;
            let references = self.parse_foreign_key_ref()?;
            TableConstraint::ForeignKey {
                columns,
                references,
            }
        } else if self.parse_keyword(Keyword::CHECK) {
            self.expect_token(&Token::LeftParen)?;
            let check = self.parse_expr()?;
            self.expect_token(&Token::RightParen)?;
            TableConstraint::Check(Box::new(check))
        } else {
            return self.expected("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK");
        };
        Ok(TableConstraintDef { name, constraint })
    }

    fn parse_foreign_key_ref(&mut self) -> Result<ForeignKeyRef> {
        let table = self.parse_object_name()?;
        let columns = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        let mut on_delete = None;
        let mut on_update = None;
        loop {
            if self.parse_keywords(&[Keyword::ON, Keyword::DELETE]) {
                on_delete = Some(self.parse_referential_action()?);
            } else if self.parse_keywords(&[Keyword::ON, Keyword::UPDATE]) {
                on_update = Some(self.parse_referential_action()?);
            } else {
                break;
            }
        }
        Ok(ForeignKeyRef {
            table,
            columns,
            on_delete,
            on_update,
        })
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction> {
        if self.parse_keyword(Keyword::CASCADE) {
            Ok(ReferentialAction::Cascade)
        } else if self.parse_keyword(Keyword::RESTRICT) {
            Ok(ReferentialAction::Restrict)
        } else if self.parse_keywords(&[Keyword::NO, Keyword::ACTION]) {
            Ok(ReferentialAction::NoAction)
        } else if self.parse_keywords(&[Keyword::SET, Keyword::NULL]) {
            Ok(ReferentialAction::SetNull)
        } else if self.parse_keywords(&[Keyword::SET, Keyword::DEFAULT]) {
            Ok(ReferentialAction::SetDefault)
        } else if self.parse_keyword(Keyword::IGNORE) {
            // historical behavior: IGNORE reads as SET DEFAULT
            Ok(ReferentialAction::SetDefault)
        } else {
            self.expected("CASCADE, RESTRICT, NO ACTION, SET NULL or SET DEFAULT")
        }
    }

    // ---- views ----

    fn parse_create_view(&mut self, or_replace: bool, force: bool) -> Result<CreateViewStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        let columns = if self.peek_token() == &Token::LeftParen {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::AS)?;
        // the view-body context is released on every exit path
        self.create_view_depth += 1;
        let query = self.parse_query();
        self.create_view_depth -= 1;
        Ok(CreateViewStmt {
            or_replace,
            force,
            if_not_exists,
            name,
            columns,
            query: Box::new(query?),
        })
    }

    // ---- indexes ----

    fn parse_create_index(
        &mut self,
        unique: bool,
        spatial: bool,
        hash: bool,
    ) -> Result<CreateIndexStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = if self.peek_token().is_keyword(Keyword::ON) {
            None
        } else {
            Some(self.parse_object_name()?)
        };
        self.expect_keyword(Keyword::ON)?;
        // note: passing no default resets the pending schema qualifier
        let table_name = self.read_identifier_with_schema(None)?;
        let table = match self.schema_name.take() {
            Some(schema) => emsql_ast::ObjectName(vec![
                emsql_ast::Ident::new(schema),
                table_name,
            ]),
            None => emsql_ast::ObjectName(vec![table_name]),
        };
        self.resolve_table_name(&table)?;
        let columns = self.parse_parenthesized(Parser::parse_sort_spec)?;
        let include = if self.parse_keyword(Keyword::INCLUDE) {
            self.parse_parenthesized(Parser::parse_identifier)?
        } else {
            Vec::new()
        };
        Ok(CreateIndexStmt {
            unique,
            spatial,
            hash,
            if_not_exists,
            name,
            table,
            columns,
            include,
        })
    }

    // ---- sequences, domains, schemas, constants ----

    fn parse_create_sequence(&mut self) -> Result<CreateSequenceStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        let options = self.parse_sequence_options()?;
        Ok(CreateSequenceStmt {
            if_not_exists,
            name,
            options,
        })
    }

    fn parse_create_domain(&mut self) -> Result<CreateDomainStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        self.parse_keyword(Keyword::AS);
        let data_type = self.parse_data_type()?;
        let mut stmt = CreateDomainStmt {
            if_not_exists,
            name,
            data_type,
            default: None,
            on_update: None,
            constraints: Vec::new(),
        };
        loop {
            if self.parse_keyword(Keyword::DEFAULT) {
                stmt.default = Some(Box::new(self.parse_expr()?));
            } else if self.parse_keywords(&[Keyword::ON, Keyword::UPDATE]) {
                stmt.on_update = Some(Box::new(self.parse_expr()?));
            } else if self.peek_token().is_keyword(Keyword::CONSTRAINT)
                || self.peek_token().is_keyword(Keyword::CHECK)
            {
                stmt.constraints.push(self.parse_domain_constraint_def()?);
            } else if self.parse_keywords(&[Keyword::NOT, Keyword::NULL])
                || self.parse_keyword(Keyword::NULL)
            {
                // nullability on domains is accepted and ignored
            } else {
                break;
            }
        }
        Ok(stmt)
    }

    fn parse_domain_constraint_def(&mut self) -> Result<DomainConstraintDef> {
        let name = if self.parse_keyword(Keyword::CONSTRAINT) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::CHECK)?;
        self.expect_token(&Token::LeftParen)?;
        // VALUE refers to the domain value inside the check
        let saved = self.parse_domain_constraint;
        self.parse_domain_constraint = true;
        let check = self.parse_expr();
        self.parse_domain_constraint = saved;
        let check = check?;
        self.expect_token(&Token::RightParen)?;
        Ok(DomainConstraintDef {
            name,
            check: Box::new(check),
        })
    }

    fn parse_create_schema(&mut self) -> Result<CreateSchemaStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_identifier()?;
        let authorization = if self.parse_keyword(Keyword::AUTHORIZATION) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(CreateSchemaStmt {
            if_not_exists,
            name,
            authorization,
        })
    }

    fn parse_create_constant(&mut self) -> Result<CreateConstantStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::VALUE)?;
        let value = Box::new(self.parse_expr()?);
        Ok(CreateConstantStmt {
            if_not_exists,
            name,
            value,
        })
    }

    // ---- aliases, aggregates, triggers ----

    fn parse_create_alias(&mut self) -> Result<CreateAliasStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        let deterministic = self.parse_contextual("DETERMINISTIC");
        self.expect_keyword(Keyword::FOR)?;
        let external = self.parse_string_literal()?;
        Ok(CreateAliasStmt {
            if_not_exists,
            name,
            external,
            deterministic,
        })
    }

    fn parse_create_aggregate(&mut self) -> Result<CreateAggregateStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::FOR)?;
        let external = self.parse_string_literal()?;
        Ok(CreateAggregateStmt {
            if_not_exists,
            name,
            external,
        })
    }

    pub(crate) fn parse_string_literal(&mut self) -> Result<String> {
        match self.next_token() {
            Token::CharString(value) => Ok(value),
            _ => self.expected("a string literal"),
        }
    }

    fn parse_create_trigger(&mut self) -> Result<CreateTriggerStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        let timing = if self.parse_keyword(Keyword::BEFORE) {
            TriggerTiming::Before
        } else if self.parse_keyword(Keyword::AFTER) {
            TriggerTiming::After
        } else {
            self.expect_keywords(&[Keyword::INSTEAD, Keyword::OF])?;
            TriggerTiming::InsteadOf
        };
        let events = self.parse_comma_separated(|parser| {
            match parser.parse_one_of_keywords(&[
                Keyword::INSERT,
                Keyword::UPDATE,
                Keyword::DELETE,
                Keyword::SELECT,
                Keyword::ROLLBACK,
            ]) {
                Some(Keyword::INSERT) => Ok(TriggerEvent::Insert),
                Some(Keyword::UPDATE) => Ok(TriggerEvent::Update),
                Some(Keyword::DELETE) => Ok(TriggerEvent::Delete),
                Some(Keyword::SELECT) => Ok(TriggerEvent::Select),
                Some(Keyword::ROLLBACK) => Ok(TriggerEvent::Rollback),
                _ => parser.expected("INSERT, UPDATE, DELETE, SELECT or ROLLBACK"),
            }
        })?;
        self.expect_keyword(Keyword::ON)?;
        let table = self.parse_object_name()?;
        self.resolve_table_name(&table)?;
        let for_each_row = if self.parse_keyword(Keyword::FOR) {
            self.expect_keyword(Keyword::EACH)?;
            if self.parse_keyword(Keyword::ROW) {
                true
            } else {
                self.expect_keyword(Keyword::STATEMENT)?;
                false
            }
        } else {
            false
        };
        self.expect_keyword(Keyword::CALL)?;
        let external = self.parse_string_literal()?;
        Ok(CreateTriggerStmt {
            if_not_exists,
            name,
            timing,
            events,
            table,
            for_each_row,
            external,
        })
    }

    // ---- users, roles, synonyms, linked tables ----

    fn parse_create_user(&mut self) -> Result<CreateUserStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_identifier()?;
        let password = if self.parse_keyword(Keyword::PASSWORD) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        let admin = self.parse_keyword(Keyword::ADMIN);
        Ok(CreateUserStmt {
            if_not_exists,
            name,
            password,
            admin,
        })
    }

    fn parse_create_synonym(&mut self) -> Result<CreateSynonymStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::FOR)?;
        let target = self.parse_object_name()?;
        Ok(CreateSynonymStmt {
            if_not_exists,
            name,
            target,
        })
    }

    fn parse_create_linked_table(&mut self) -> Result<CreateLinkedTableStmt> {
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        self.expect_token(&Token::LeftParen)?;
        let driver = self.parse_string_literal()?;
        self.expect_token(&Token::Comma)?;
        let url = self.parse_string_literal()?;
        self.expect_token(&Token::Comma)?;
        let user = self.parse_string_literal()?;
        self.expect_token(&Token::Comma)?;
        let password = self.parse_string_literal()?;
        self.expect_token(&Token::Comma)?;
        let source_table = self.parse_string_literal()?;
        self.expect_token(&Token::RightParen)?;
        Ok(CreateLinkedTableStmt {
            if_not_exists,
            name,
            driver,
            url,
            user,
            password,
            source_table,
        })
    }

    // ---- ALTER ----

    pub(crate) fn parse_alter_stmt(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::ALTER)?;
        if self.parse_keyword(Keyword::TABLE) {
            return self.parse_alter_table().map(Statement::AlterTable);
        }
        if self.parse_keyword(Keyword::SEQUENCE) {
            return self.parse_alter_sequence().map(Statement::AlterSequence);
        }
        if self.parse_keyword(Keyword::DOMAIN) {
            return self.parse_alter_domain().map(Statement::AlterDomain);
        }
        if self.parse_keyword(Keyword::USER) {
            return self.parse_alter_user().map(Statement::AlterUser);
        }
        self.expected("TABLE, SEQUENCE, DOMAIN or USER after ALTER")
    }

    fn parse_alter_table(&mut self) -> Result<AlterTableStmt> {
        let if_exists = self.parse_if_exists();
        let name = self.parse_object_name()?;
        if !if_exists {
            self.resolve_table_name(&name)?;
        }
        let action = self.parse_alter_table_action()?;
        Ok(AlterTableStmt {
            if_exists,
            name,
            action,
        })
    }

    fn parse_alter_table_action(&mut self) -> Result<AlterTableAction> {
        let flags = self.session().config().flags;
        if self.parse_keyword(Keyword::ADD) {
            if self.peek_table_constraint_start() {
                return Ok(AlterTableAction::AddConstraint(
                    self.parse_table_constraint_def()?,
                ));
            }
            self.parse_keyword(Keyword::COLUMN);
            let _ = self.parse_if_not_exists();
            return Ok(AlterTableAction::AddColumn(self.parse_column_def()?));
        }
        if self.parse_keyword(Keyword::DROP) {
            if self.parse_keyword(Keyword::CONSTRAINT) {
                let _ = self.parse_if_exists();
                return Ok(AlterTableAction::DropConstraint(self.parse_identifier()?));
            }
            if self.parse_keyword(Keyword::COLUMN) {
                let _ = self.parse_if_exists();
                return Ok(AlterTableAction::DropColumn(vec![self.parse_identifier()?]));
            }
            // Oracle-style parenthesized column drop
            if self.peek_token() == &Token::LeftParen {
                let columns = self.parse_parenthesized(Parser::parse_identifier)?;
                return Ok(AlterTableAction::DropColumn(columns));
            }
            return Ok(AlterTableAction::DropColumn(vec![self.parse_identifier()?]));
        }
        if self.parse_keyword(Keyword::RENAME) {
            if self.parse_keyword(Keyword::COLUMN) {
                let from = self.parse_identifier()?;
                self.expect_keyword(Keyword::TO)?;
                let to = self.parse_identifier()?;
                return Ok(AlterTableAction::RenameColumn { from, to });
            }
            self.expect_keyword(Keyword::TO)?;
            return Ok(AlterTableAction::RenameTo(self.parse_identifier()?));
        }
        if flags.alter_change_column && self.parse_keyword(Keyword::CHANGE) {
            self.parse_keyword(Keyword::COLUMN);
            let column = self.parse_identifier()?;
            let def = self.parse_column_def()?;
            return Ok(AlterTableAction::ChangeColumn { column, def });
        }
        if flags.alter_change_column && self.parse_keyword(Keyword::MODIFY) {
            self.parse_keyword(Keyword::COLUMN);
            let column = self.parse_identifier()?;
            // MODIFY keeps the column name; re-parse the definition with it
            let mut def = ColumnDef::new(column.clone(), self.parse_data_type()?);
            if self.parse_keywords(&[Keyword::NOT, Keyword::NULL]) {
                def.constraints
                    .push(ColumnConstraintDef::unnamed(ColumnConstraint::NotNull));
            } else if self.parse_keyword(Keyword::NULL) {
                def.constraints
                    .push(ColumnConstraintDef::unnamed(ColumnConstraint::Null));
            }
            return Ok(AlterTableAction::ChangeColumn { column, def });
        }
        if self.parse_keyword(Keyword::ALTER) {
            self.parse_keyword(Keyword::COLUMN);
            let column = self.parse_identifier()?;
            if self.parse_keywords(&[Keyword::SET, Keyword::DEFAULT]) {
                return Ok(AlterTableAction::SetColumnDefault {
                    column,
                    default: Box::new(self.parse_expr()?),
                });
            }
            if self.parse_keywords(&[Keyword::DROP, Keyword::DEFAULT]) {
                return Ok(AlterTableAction::DropColumnDefault(column));
            }
            if self.parse_keywords(&[Keyword::SET, Keyword::NOT, Keyword::NULL]) {
                return Ok(AlterTableAction::SetColumnNullable {
                    column,
                    nullable: false,
                });
            }
            if self.parse_keywords(&[Keyword::SET, Keyword::NULL]) {
                return Ok(AlterTableAction::SetColumnNullable {
                    column,
                    nullable: true,
                });
            }
            let def = ColumnDef::new(column.clone(), self.parse_data_type()?);
            return Ok(AlterTableAction::ChangeColumn { column, def });
        }
        self.expected("ADD, DROP, RENAME, ALTER, CHANGE or MODIFY")
    }

    fn parse_alter_sequence(&mut self) -> Result<AlterSequenceStmt> {
        let if_exists = self.parse_if_exists();
        let name = self.parse_object_name()?;
        let restart = if self.parse_keyword(Keyword::RESTART) {
            if self.parse_keyword(Keyword::WITH) {
                Some(Some(self.parse_signed_int()?))
            } else {
                Some(None)
            }
        } else {
            None
        };
        let options = self.parse_sequence_options()?;
        Ok(AlterSequenceStmt {
            if_exists,
            name,
            restart,
            options,
        })
    }

    fn parse_alter_domain(&mut self) -> Result<AlterDomainStmt> {
        let if_exists = self.parse_if_exists();
        let name = self.parse_object_name()?;
        let action = if self.parse_keywords(&[Keyword::SET, Keyword::DEFAULT]) {
            AlterDomainAction::SetDefault(Box::new(self.parse_expr()?))
        } else if self.parse_keywords(&[Keyword::DROP, Keyword::DEFAULT]) {
            AlterDomainAction::DropDefault
        } else if self.parse_keywords(&[Keyword::SET, Keyword::ON, Keyword::UPDATE]) {
            AlterDomainAction::SetOnUpdate(Box::new(self.parse_expr()?))
        } else if self.parse_keywords(&[Keyword::DROP, Keyword::ON, Keyword::UPDATE]) {
            AlterDomainAction::DropOnUpdate
        } else if self.parse_keyword(Keyword::ADD) {
            AlterDomainAction::AddConstraint(self.parse_domain_constraint_def()?)
        } else if self.parse_keywords(&[Keyword::DROP, Keyword::CONSTRAINT]) {
            AlterDomainAction::DropConstraint(self.parse_identifier()?)
        } else if self.parse_keyword(Keyword::RENAME) {
            if self.parse_keyword(Keyword::CONSTRAINT) {
                let from = self.parse_identifier()?;
                self.expect_keyword(Keyword::TO)?;
                let to = self.parse_identifier()?;
                AlterDomainAction::RenameConstraint { from, to }
            } else {
                self.expect_keyword(Keyword::TO)?;
                AlterDomainAction::RenameTo(self.parse_identifier()?)
            }
        } else {
            return self.expected("SET, DROP, ADD or RENAME");
        };
        Ok(AlterDomainStmt {
            if_exists,
            name,
            action,
        })
    }

    fn parse_alter_user(&mut self) -> Result<AlterUserStmt> {
        let name = self.parse_identifier()?;
        let action = if self.parse_keywords(&[Keyword::SET, Keyword::PASSWORD]) {
            AlterUserAction::SetPassword(self.parse_string_literal()?)
        } else if self.parse_keywords(&[Keyword::RENAME, Keyword::TO]) {
            AlterUserAction::RenameTo(self.parse_identifier()?)
        } else if self.parse_keyword(Keyword::ADMIN) {
            if self.parse_keyword(Keyword::TRUE) {
                AlterUserAction::Admin(true)
            } else {
                self.expect_keyword(Keyword::FALSE)?;
                AlterUserAction::Admin(false)
            }
        } else {
            return self.expected("SET PASSWORD, RENAME TO or ADMIN");
        };
        Ok(AlterUserStmt { name, action })
    }

    // ---- DROP, TRUNCATE, COMMENT, GRANT ----

    pub(crate) fn parse_drop_stmt(&mut self) -> Result<DropStmt> {
        self.expect_keyword(Keyword::DROP)?;
        let object_type = match self.parse_one_of_keywords(&[
            Keyword::TABLE,
            Keyword::VIEW,
            Keyword::INDEX,
            Keyword::SCHEMA,
            Keyword::SEQUENCE,
            Keyword::DOMAIN,
            Keyword::TYPE,
            Keyword::CONSTANT,
            Keyword::ALIAS,
            Keyword::TRIGGER,
            Keyword::ROLE,
            Keyword::USER,
            Keyword::SYNONYM,
            Keyword::AGGREGATE,
        ]) {
            Some(Keyword::TABLE) => ObjectType::Table,
            Some(Keyword::VIEW) => ObjectType::View,
            Some(Keyword::INDEX) => ObjectType::Index,
            Some(Keyword::SCHEMA) => ObjectType::Schema,
            Some(Keyword::SEQUENCE) => ObjectType::Sequence,
            Some(Keyword::DOMAIN) | Some(Keyword::TYPE) => ObjectType::Domain,
            Some(Keyword::CONSTANT) => ObjectType::Constant,
            Some(Keyword::ALIAS) => ObjectType::Alias,
            Some(Keyword::TRIGGER) => ObjectType::Trigger,
            Some(Keyword::ROLE) => ObjectType::Role,
            Some(Keyword::USER) => ObjectType::User,
            Some(Keyword::SYNONYM) => ObjectType::Synonym,
            Some(Keyword::AGGREGATE) => ObjectType::Aggregate,
            _ => return self.expected("an object kind after DROP"),
        };
        let if_exists = self.parse_if_exists();
        let names = self.parse_comma_separated(Parser::parse_object_name)?;
        let behavior = if self.parse_keyword(Keyword::CASCADE) {
            Some(DropBehavior::Cascade)
        } else if self.parse_keyword(Keyword::RESTRICT) {
            Some(DropBehavior::Restrict)
        } else {
            None
        };
        Ok(DropStmt {
            object_type,
            if_exists,
            names,
            behavior,
        })
    }

    pub(crate) fn parse_truncate_stmt(&mut self) -> Result<TruncateStmt> {
        self.expect_keywords(&[Keyword::TRUNCATE, Keyword::TABLE])?;
        let table = self.parse_object_name()?;
        self.resolve_table_name(&table)?;
        Ok(TruncateStmt { table })
    }

    pub(crate) fn parse_comment_stmt(&mut self) -> Result<CommentStmt> {
        self.expect_keywords(&[Keyword::COMMENT, Keyword::ON])?;
        let object_type = match self.parse_one_of_keywords(&[
            Keyword::TABLE,
            Keyword::COLUMN,
            Keyword::VIEW,
            Keyword::INDEX,
            Keyword::SEQUENCE,
            Keyword::DOMAIN,
            Keyword::TRIGGER,
            Keyword::ROLE,
            Keyword::USER,
            Keyword::SCHEMA,
            Keyword::CONSTANT,
            Keyword::ALIAS,
        ]) {
            Some(Keyword::TABLE) => ObjectType::Table,
            Some(Keyword::COLUMN) => ObjectType::Column,
            Some(Keyword::VIEW) => ObjectType::View,
            Some(Keyword::INDEX) => ObjectType::Index,
            Some(Keyword::SEQUENCE) => ObjectType::Sequence,
            Some(Keyword::DOMAIN) => ObjectType::Domain,
            Some(Keyword::TRIGGER) => ObjectType::Trigger,
            Some(Keyword::ROLE) => ObjectType::Role,
            Some(Keyword::USER) => ObjectType::User,
            Some(Keyword::SCHEMA) => ObjectType::Schema,
            Some(Keyword::CONSTANT) => ObjectType::Constant,
            Some(Keyword::ALIAS) => ObjectType::Alias,
            _ => return self.expected("an object kind after COMMENT ON"),
        };
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::IS)?;
        let comment = if self.parse_keyword(Keyword::NULL) {
            None
        } else {
            Some(self.parse_string_literal()?)
        };
        Ok(CommentStmt {
            object_type,
            name,
            comment,
        })
    }

    pub(crate) fn parse_grant_revoke_stmt(&mut self) -> Result<GrantRevokeStmt> {
        let grant = self.parse_keyword(Keyword::GRANT);
        if !grant {
            self.expect_keyword(Keyword::REVOKE)?;
        }
        let mut rights = Vec::new();
        let mut roles = Vec::new();
        loop {
            if self.parse_keyword(Keyword::SELECT) {
                rights.push(Right::Select);
            } else if self.parse_keyword(Keyword::INSERT) {
                rights.push(Right::Insert);
            } else if self.parse_keyword(Keyword::UPDATE) {
                rights.push(Right::Update);
            } else if self.parse_keyword(Keyword::DELETE) {
                rights.push(Right::Delete);
            } else if self.parse_keyword(Keyword::ALL) {
                self.parse_keyword(Keyword::PRIVILEGES);
                rights.push(Right::All);
            } else {
                roles.push(self.parse_identifier()?);
            }
            if !self.next_token_if_is(&Token::Comma) {
                break;
            }
        }
        if !rights.is_empty() && !roles.is_empty() {
            return Err(FrontendError::new(
                ErrorKind::RolesAndRightCannotBeMixed,
                "Roles and rights cannot be mixed",
            ));
        }
        let on = if self.parse_keyword(Keyword::ON) {
            Some(self.parse_object_name()?)
        } else {
            None
        };
        if grant {
            self.expect_keyword(Keyword::TO)?;
        } else {
            self.expect_keyword(Keyword::FROM)?;
        }
        let grantee = self.parse_identifier()?;
        Ok(GrantRevokeStmt {
            grant,
            rights,
            roles,
            on,
            grantee,
        })
    }
}

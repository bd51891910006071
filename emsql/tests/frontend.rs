//! End-to-end tests of the SQL front-end: boundary scenarios, negative
//! scenarios and the structural invariants.

use emsql::ast::{
    AggregateKind, ColumnConstraint, DataType, Expr, FrameBound, FrameUnits, FunctionKind,
    MergeAction, MergeKind, NaryOperator, PrimaryType, QueryBody, SelectItem, Statement, Value,
    WindowRef,
};
use emsql::{
    parse_column_list, parse_expression, parse_table_name, prepare, Column, ColumnList, Command,
    CompatMode, Database, ErrorKind, ParserConfig, Session, Table, MAIN_SCHEMA,
};

fn test_session() -> Session {
    let database = Database::new("TEST");
    for (table, columns) in [
        ("T", vec!["A", "B", "ID", "V", "X", "Y", "Z"]),
        ("S", vec!["ID", "K", "V"]),
        ("CUSTOMER", vec!["ID", "NAME"]),
    ] {
        database
            .add_table(
                MAIN_SCHEMA,
                Table::new(
                    table,
                    columns
                        .into_iter()
                        .map(|name| {
                            Column::new(name, DataType::simple(PrimaryType::Integer))
                        })
                        .collect(),
                ),
            )
            .unwrap();
    }
    Session::new(database)
}

fn select_projection(statement: &Statement) -> &[SelectItem] {
    match statement {
        Statement::Query(query) => match &query.body {
            QueryBody::Select(select) => &select.projection,
            other => panic!("expected a select body, got {:?}", other),
        },
        other => panic!("expected a query, got {:?}", other),
    }
}

// ---- boundary scenarios ----

#[test]
fn arithmetic_precedence() {
    let session = test_session();
    let prepared = prepare(&session, "SELECT 1 + 2 * 3").unwrap();
    assert!(prepared.parameters.is_empty());
    let projection = select_projection(&prepared.statement);
    let SelectItem::UnnamedExpr(Expr::BinaryOp(add)) = &projection[0] else {
        panic!("expected 1 + (2 * 3), got {:?}", projection);
    };
    assert_eq!(*add.left, Expr::Literal(Value::Int(1)));
    let Expr::BinaryOp(mul) = &*add.right else {
        panic!("multiplication must bind tighter");
    };
    assert_eq!(*mul.left, Expr::Literal(Value::Int(2)));
    assert_eq!(*mul.right, Expr::Literal(Value::Int(3)));
}

#[test]
fn positional_parameters_and_in_list() {
    let session = test_session();
    let prepared = prepare(&session, "SELECT A, B FROM T WHERE A = ? AND B IN (?, ?, ?)").unwrap();
    assert_eq!(prepared.parameters.len(), 4);
    for (n, parameter) in prepared.parameters.iter().enumerate() {
        assert_eq!(parameter.ordinal as usize, n + 1);
        assert!(!parameter.is_set());
    }
    let Statement::Query(query) = &prepared.statement else {
        panic!("expected a query");
    };
    let QueryBody::Select(select) = &query.body else {
        panic!("expected a select body");
    };
    let Some(Expr::NaryOp(and)) = &select.selection else {
        panic!("expected an AND over the predicates");
    };
    assert_eq!(and.op, NaryOperator::And);
    let Expr::InList(in_list) = &and.operands[1] else {
        panic!("expected an IN list");
    };
    assert_eq!(in_list.list.len(), 3);
}

#[test]
fn recursive_cte_installs_and_cleans_up_shadow_view() {
    let session = test_session();
    let prepared = prepare(
        &session,
        "WITH RECURSIVE R(N) AS (SELECT 1 UNION ALL SELECT N + 1 FROM R WHERE N < 5) \
         SELECT * FROM R",
    )
    .unwrap();
    let Statement::Query(query) = &prepared.statement else {
        panic!("expected a query");
    };
    let with = query.with.as_ref().expect("with clause");
    assert!(with.recursive);
    assert_eq!(with.ctes.len(), 1);
    assert_eq!(with.ctes[0].name.value, "R");

    // the shadow view is still installed for the command's lifetime
    assert_eq!(session.shadow_view_names(), vec!["R".to_owned()]);
    assert_eq!(prepared.cte_cleanups, vec!["R".to_owned()]);
    prepared.cleanup(&session);
    assert!(session.shadow_view_names().is_empty());
}

#[test]
fn merge_with_two_branches() {
    let session = test_session();
    let prepared = prepare(
        &session,
        "MERGE INTO T USING S ON T.ID = S.ID \
         WHEN MATCHED AND S.K > 0 THEN UPDATE SET T.V = S.V \
         WHEN NOT MATCHED THEN INSERT (ID, V) VALUES (S.ID, S.V)",
    )
    .unwrap();
    let Statement::Merge(merge) = &prepared.statement else {
        panic!("expected MERGE");
    };
    let MergeKind::Using { clauses, .. } = &merge.kind else {
        panic!("expected the USING form");
    };
    assert_eq!(clauses.len(), 2);
    assert!(clauses[0].matched);
    assert!(clauses[0].and_condition.is_some());
    assert!(matches!(clauses[0].action, MergeAction::Update(_)));
    assert!(!clauses[1].matched);
    assert!(clauses[1].and_condition.is_none());
    assert!(matches!(clauses[1].action, MergeAction::Insert { .. }));
}

#[test]
fn aggregate_with_filter_and_window() {
    let session = test_session();
    let prepared = prepare(
        &session,
        "SELECT COUNT(DISTINCT X) FILTER (WHERE X > 0) \
         OVER (PARTITION BY Y ORDER BY Z ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) \
         FROM T",
    )
    .unwrap();
    let projection = select_projection(&prepared.statement);
    let SelectItem::UnnamedExpr(Expr::Function(call)) = &projection[0] else {
        panic!("expected an aggregate call");
    };
    assert_eq!(call.kind, FunctionKind::Aggregate(AggregateKind::Count));
    assert!(call.distinct);
    assert!(call.filter.is_some());
    let Some(WindowRef::Spec(spec)) = &call.over else {
        panic!("expected an inline window spec");
    };
    assert_eq!(spec.partition_by.len(), 1);
    assert_eq!(spec.order_by.len(), 1);
    let frame = spec.frame.as_ref().expect("frame");
    assert_eq!(frame.units, FrameUnits::Rows);
    assert_eq!(frame.start, FrameBound::UnboundedPreceding);
    assert_eq!(frame.end, Some(FrameBound::CurrentRow));
    assert!(frame.is_well_formed());
}

#[test]
fn create_table_with_identity_column() {
    let session = test_session();
    let prepared = prepare(
        &session,
        "CREATE TABLE T2(A INT PRIMARY KEY, B VARCHAR(10) NOT NULL DEFAULT 'x', \
         C INT GENERATED ALWAYS AS IDENTITY (START WITH 100 INCREMENT BY 2))",
    )
    .unwrap();
    let Statement::CreateTable(create) = &prepared.statement else {
        panic!("expected CREATE TABLE");
    };
    assert_eq!(create.columns.len(), 3);
    assert!(create.columns[0]
        .constraints
        .iter()
        .any(|c| matches!(c.constraint, ColumnConstraint::PrimaryKey { .. })));
    assert!(create.columns[1]
        .constraints
        .iter()
        .any(|c| c.constraint == ColumnConstraint::NotNull));
    assert!(create.columns[1].default.is_some());
    let identity = create.columns[2].identity.as_ref().expect("identity");
    assert!(identity.always);
    assert_eq!(identity.sequence.start_with, Some(100));
    assert_eq!(identity.sequence.increment_by, Some(2));
}

// ---- negative scenarios ----

#[test]
fn truncated_select_reports_expected_tokens() {
    let session = test_session();
    let error = prepare(&session, "SELECT * FROM").unwrap_err();
    assert_eq!(error.kind, ErrorKind::SyntaxErrorExpected);
    assert_eq!(error.offset, Some(13));
    assert!(error.expected.iter().any(|e| e == "<identifier>"));
    assert!(error.sql.as_deref() == Some("SELECT * FROM"));
}

#[test]
fn mixing_parameter_styles_is_rejected() {
    let session = test_session();
    let error = prepare(&session, "SELECT ? + ?1 FROM T").unwrap_err();
    assert_eq!(error.kind, ErrorKind::CannotMixIndexedAndUnindexedParams);
}

#[test]
fn duplicate_column_is_rejected() {
    let session = test_session();
    let error = prepare(&session, "CREATE TABLE T3(A INT, A VARCHAR)").unwrap_err();
    assert_eq!(error.kind, ErrorKind::DuplicateColumnName);
    assert!(error.message.contains("\"A\""));
}

#[test]
fn unterminated_quoted_identifier() {
    let session = test_session();
    let error = prepare(&session, "SELECT \"ident").unwrap_err();
    assert_eq!(error.offset, Some(7));
}

#[test]
fn full_join_is_rejected() {
    let session = test_session();
    let error = prepare(&session, "SELECT * FROM T FULL JOIN S ON T.ID = S.ID").unwrap_err();
    assert!(error.message.contains("FULL OUTER JOIN"));
}

#[test]
fn unknown_table_reports_resolution_error() {
    let session = test_session();
    let error = prepare(&session, "SELECT * FROM NO_SUCH_TABLE").unwrap_err();
    assert_eq!(error.kind, ErrorKind::TableOrViewNotFound);
    // name-resolution errors carry the SQL text too
    assert!(error.sql.is_some());
}

// ---- structural invariants ----

#[test]
fn re_emission_is_idempotent() {
    let session = test_session();
    for sql in [
        "SELECT A, B FROM T WHERE A = 1 ORDER BY B DESC",
        "SELECT DISTINCT A FROM T GROUP BY A HAVING COUNT(*) > 1",
        "INSERT INTO T(A, B) VALUES (1, 2), (3, 4)",
        "UPDATE T SET A = A + 1 WHERE B IS NOT NULL",
        "DELETE FROM T WHERE A IN (1, 2, 3)",
        "SELECT A FROM T UNION ALL SELECT ID FROM S",
        "CREATE TABLE T9(A INTEGER, B VARCHAR(10) NOT NULL)",
        "DROP TABLE IF EXISTS T CASCADE",
    ] {
        let first = prepare(&session, sql).unwrap().to_sql();
        let second = prepare(&session, &first).unwrap().to_sql();
        assert_eq!(first, second, "re-emission must be stable for {}", sql);
    }
}

#[test]
fn or_and_chains_fold_into_nary_nodes() {
    let session = test_session();
    for (sql, op) in [
        ("A OR B OR C", NaryOperator::Or),
        ("A AND B AND C", NaryOperator::And),
        ("A || B || C", NaryOperator::Concat),
    ] {
        let Expr::NaryOp(nary) = parse_expression(&session, sql).unwrap() else {
            panic!("expected an n-ary node for {}", sql);
        };
        assert_eq!(nary.op, op);
        assert_eq!(nary.operands.len(), 3);
        let names: Vec<_> = nary
            .operands
            .iter()
            .map(|operand| match operand {
                Expr::Column(column) => column.name.value.clone(),
                other => panic!("unexpected operand {:?}", other),
            })
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}

#[test]
fn indexed_parameter_list_length_is_max_index() {
    let session = test_session();
    let prepared = prepare(&session, "SELECT A FROM T WHERE A = ?3 OR B = ?1").unwrap();
    assert_eq!(prepared.parameters.len(), 3);
}

#[test]
fn failed_parse_restores_shadow_namespace() {
    let session = test_session();
    assert!(session.shadow_view_names().is_empty());
    let error = prepare(
        &session,
        "WITH R AS (SELECT 1) SELECT * FROM R WHERE",
    )
    .unwrap_err();
    assert_eq!(error.kind, ErrorKind::SyntaxErrorExpected);
    assert!(session.shadow_view_names().is_empty());
}

#[test]
fn case_folding_round_trip() {
    let session = test_session();
    let prepared = prepare(&session, "select a, \"Quoted\" from t").unwrap();
    let projection = select_projection(&prepared.statement);
    let SelectItem::UnnamedExpr(Expr::Column(first)) = &projection[0] else {
        panic!("expected a column");
    };
    assert_eq!(first.name.value, "A");
    let SelectItem::UnnamedExpr(Expr::Column(second)) = &projection[1] else {
        panic!("expected a column");
    };
    assert_eq!(second.name.value, "Quoted");
    assert!(second.name.quoted);
}

#[test]
fn order_by_parameter_forces_recompile() {
    let session = test_session();
    let prepared = prepare(&session, "SELECT A FROM T ORDER BY ?").unwrap();
    assert!(prepared.recompile_always);
    let prepared = prepare(&session, "SELECT A FROM T ORDER BY A").unwrap();
    assert!(!prepared.recompile_always);
}

// ---- entry points and the command container ----

#[test]
fn parse_table_name_resolves() {
    let session = test_session();
    let resolved = parse_table_name(&session, "CUSTOMER").unwrap();
    assert_eq!(resolved.schema, MAIN_SCHEMA);
    assert_eq!(resolved.table.name(), "CUSTOMER");
    assert!(parse_table_name(&session, "MISSING").is_err());
}

#[test]
fn parse_column_list_names_and_positions() {
    let session = test_session();
    let names = parse_column_list(&session, "(a, b, c)", 0).unwrap();
    assert_eq!(
        names,
        ColumnList::Names(vec![
            emsql::ast::Ident::new("A"),
            emsql::ast::Ident::new("B"),
            emsql::ast::Ident::new("C"),
        ])
    );
    assert_eq!(
        parse_column_list(&session, "(1, 3)", 0).unwrap(),
        ColumnList::Positions(vec![1, 3])
    );
    // the list may start mid-statement
    let offset = "INSERT INTO T ".len();
    let names = parse_column_list(&session, "INSERT INTO T (a) VALUES (1)", offset).unwrap();
    assert_eq!(names, ColumnList::Names(vec![emsql::ast::Ident::new("A")]));
}

#[test]
fn multi_statement_command_list() {
    let session = test_session();
    let mut command = Command::prepare(
        &session,
        "CREATE TABLE T5(A INT); INSERT INTO T5 VALUES (1)",
    )
    .unwrap();
    assert!(matches!(
        command.prepared().statement,
        Statement::CreateTable(_)
    ));
    // the tail is carried un-parsed: the INSERT would not resolve until
    // the CREATE TABLE has executed
    let tail_error = command.next_command(&session).unwrap_err();
    assert_eq!(tail_error.kind, ErrorKind::TableOrViewNotFound);
}

#[test]
fn catalog_change_forces_recompile() {
    let session = test_session();
    let command = Command::prepare(&session, "SELECT A FROM T").unwrap();
    assert!(!command.needs_recompile(&session));
    session
        .database()
        .add_table(MAIN_SCHEMA, Table::new("T6", vec![]))
        .unwrap();
    assert!(command.needs_recompile(&session));
}

#[test]
fn mysql_mode_accepts_limit_and_backticks() {
    let database = Database::new("TEST");
    database
        .add_table(
            MAIN_SCHEMA,
            Table::new(
                "t",
                vec![Column::new("a", DataType::simple(PrimaryType::Integer))],
            ),
        )
        .unwrap();
    let session =
        Session::with_config(database, ParserConfig::for_mode(CompatMode::MySql));
    let prepared = prepare(&session, "SELECT `a` FROM t LIMIT 2, 10").unwrap();
    let Statement::Query(query) = &prepared.statement else {
        panic!("expected a query");
    };
    let limit = query.limit.as_ref().expect("limit clause");
    assert_eq!(limit.count, Expr::Literal(Value::Int(10)));
    assert_eq!(limit.offset, Some(Expr::Literal(Value::Int(2))));
}

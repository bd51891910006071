//! Catalog objects: tables, columns, sequences, domains and functions.

use emsql_ast::DataType;

/// What kind of relation a [`Table`] entry is.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TableKind {
    /// A base table.
    Base,
    /// A persistent view.
    View,
    /// A transient shadow view installed during parse so recursive CTE
    /// references resolve against themselves.
    ShadowView,
}

/// A table or view.
#[derive(Clone, Debug)]
pub struct Table {
    name: String,
    kind: TableKind,
    columns: Vec<Column>,
}

impl Table {
    /// A base table.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::Base,
            columns,
        }
    }

    /// A view or shadow view.
    pub fn view(name: impl Into<String>, columns: Vec<Column>, shadow: bool) -> Self {
        Self {
            name: name.into(),
            kind: if shadow {
                TableKind::ShadowView
            } else {
                TableKind::View
            },
            columns,
        }
    }

    /// The table name (canonicalized).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The relation kind.
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// The columns in position order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Finds a column by canonical name; positions are 1-based.
    pub fn find_column(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns
            .iter()
            .position(|column| column.name == name)
            .map(|index| (index + 1, &self.columns[index]))
    }
}

/// A table column.
#[derive(Clone, Debug)]
pub struct Column {
    /// The canonical name.
    pub name: String,
    /// The declared type.
    pub data_type: DataType,
    /// Whether NULL is accepted.
    pub nullable: bool,
}

impl Column {
    /// A nullable column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Marks the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// A sequence.
#[derive(Clone, Debug)]
pub struct Sequence {
    /// The canonical name.
    pub name: String,
    /// Start value.
    pub start_with: i64,
    /// Increment.
    pub increment_by: i64,
}

impl Sequence {
    /// A sequence starting at 1 with increment 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_with: 1,
            increment_by: 1,
        }
    }
}

/// A domain: a named type with an optional constraint.
#[derive(Clone, Debug)]
pub struct Domain {
    /// The canonical name.
    pub name: String,
    /// The base type the domain resolves to.
    pub data_type: DataType,
    /// An attached comment, inherited by columns of this domain.
    pub comment: Option<String>,
}

impl Domain {
    /// A domain over the given base type.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            comment: None,
        }
    }
}

/// A user-defined function alias bound to an opaque external method.
#[derive(Clone, Debug)]
pub struct FunctionAlias {
    /// The canonical name.
    pub name: String,
    /// The external binding; opaque to the front-end.
    pub external: String,
    /// Non-deterministic aliases force recompilation of dependent commands.
    pub deterministic: bool,
}

impl FunctionAlias {
    /// A deterministic alias.
    pub fn new(name: impl Into<String>, external: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external: external.into(),
            deterministic: true,
        }
    }

    /// Marks the alias non-deterministic.
    pub fn nondeterministic(mut self) -> Self {
        self.deterministic = false;
        self
    }
}

/// A user-defined aggregate; invocation is opaque to the front-end.
#[derive(Clone, Debug)]
pub struct UserAggregate {
    /// The canonical name.
    pub name: String,
    /// The external binding.
    pub external: String,
}

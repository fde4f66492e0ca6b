use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use smol_str::SmolStr;
use strum::{Display, EnumString};

/// Column types understood by the target engine.
///
/// Parsing is case-insensitive and accepts the common SQL spellings of each type, e.g. `INT`
/// parses as [`EngineType::Integer`] and `TEXT` as [`EngineType::Varchar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum EngineType {
    #[strum(to_string = "TINYINT")]
    TinyInt,
    #[strum(to_string = "SMALLINT")]
    SmallInt,
    #[strum(to_string = "INTEGER", serialize = "INT")]
    Integer,
    #[strum(to_string = "BIGINT")]
    BigInt,
    #[strum(to_string = "FLOAT", serialize = "DOUBLE", serialize = "REAL")]
    Float,
    #[strum(to_string = "DECIMAL", serialize = "NUMERIC", serialize = "DEC")]
    Decimal,
    #[strum(
        to_string = "VARCHAR",
        serialize = "CHAR",
        serialize = "CHARACTER",
        serialize = "TEXT",
        serialize = "STRING"
    )]
    Varchar,
    #[strum(to_string = "VARBINARY", serialize = "BINARY", serialize = "BLOB")]
    Varbinary,
    #[strum(to_string = "TIMESTAMP", serialize = "DATETIME")]
    Timestamp,
}

impl EngineType {
    /// Returns `true` for the exact integral types.
    #[inline]
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::Integer | Self::BigInt
        )
    }

    /// Returns `true` for every numeric type.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.is_integral() || matches!(self, Self::Float | Self::Decimal)
    }
}

/// A single output column of a statement or a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    name: SmolStr,
    ty: EngineType,
}

impl ColumnSchema {
    #[inline]
    pub fn new(name: impl Into<SmolStr>, ty: EngineType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> EngineType {
        self.ty
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

/// The ordered output columns of a statement.
///
/// A `ResultSchema` is an owned snapshot: it never refers back to the catalog it was resolved
/// from, so it can be stored alongside translation state freely.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSchema(Vec<ColumnSchema>);

impl ResultSchema {
    #[inline]
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self(columns)
    }

    #[inline]
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ColumnSchema> {
        self.0.get(index)
    }

    /// Returns the position of the first column whose name matches `name` case-insensitively.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn push(&mut self, column: ColumnSchema) {
        self.0.push(column);
    }

    pub fn extend(&mut self, schema: &ResultSchema) {
        self.0.extend(schema.0.iter().cloned());
    }
}

impl fmt::Display for ResultSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

impl FromIterator<ColumnSchema> for ResultSchema {
    fn from_iter<T: IntoIterator<Item = ColumnSchema>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

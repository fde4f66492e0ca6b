//! Mapping of PL/SQL and engine types onto the small set of categories the generated code uses.

use plsql2volt_catalog::provider::SchemaProvider;
use plsql2volt_common::data_type::EngineType;
use plsql_parser::ast::TypeSpec;
use serde::Serialize;
use smol_str::SmolStr;

use crate::error::TypeError;
use crate::ir::ValueType;

const STRING_TYPES: [&str; 7] = [
    "CHAR",
    "NCHAR",
    "VARCHAR",
    "VARCHAR2",
    "NVARCHAR2",
    "CHARACTER",
    "STRING",
];

const INTEGER_TYPES: [&str; 8] = [
    "INTEGER",
    "INT",
    "SMALLINT",
    "BIGINT",
    "PLS_INTEGER",
    "BINARY_INTEGER",
    "NATURAL",
    "POSITIVE",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeCategory {
    String,
    Integer,
    /// A type without translation, carrying its name for diagnostics.
    ///
    /// This is only an error once a value of the type has to be declared or read.
    Unrecognized(SmolStr),
}

impl TypeCategory {
    /// Categorizes a native PL/SQL type name, ignoring case.
    pub fn from_native_name(name: &str) -> Self {
        if STRING_TYPES.iter().any(|ty| ty.eq_ignore_ascii_case(name)) {
            Self::String
        } else if INTEGER_TYPES.iter().any(|ty| ty.eq_ignore_ascii_case(name)) {
            Self::Integer
        } else {
            Self::Unrecognized(name.into())
        }
    }

    /// Categorizes a column type of the engine.
    pub fn from_engine_type(ty: EngineType) -> Self {
        match ty {
            EngineType::TinyInt | EngineType::SmallInt | EngineType::Integer | EngineType::BigInt => {
                Self::Integer
            }
            EngineType::Varchar => Self::String,
            other => Self::Unrecognized(other.to_string().into()),
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer)
    }

    /// Returns the type of a variable holding values of this category.
    ///
    /// # Errors
    /// Returns [`TypeError::Unrecognized`] for the sentinel category.
    pub fn value_type(&self) -> Result<ValueType, TypeError> {
        match self {
            Self::String => Ok(ValueType::String),
            Self::Integer => Ok(ValueType::Integer),
            Self::Unrecognized(name) => Err(TypeError::Unrecognized(name.clone())),
        }
    }
}

/// Translates declared types, looking up `table.column%TYPE` forms in the schema.
#[derive(Debug, Clone, Copy)]
pub struct TypeTranslator<'a> {
    schema: &'a dyn SchemaProvider,
}

impl<'a> TypeTranslator<'a> {
    pub fn new(schema: &'a dyn SchemaProvider) -> Self {
        Self { schema }
    }

    /// # Errors
    /// Fails if a `%TYPE` reference names an unknown table or column. Unknown native types are
    /// not an error here, they translate to [`TypeCategory::Unrecognized`].
    pub fn translate(&self, spec: &TypeSpec) -> Result<TypeCategory, TypeError> {
        match spec {
            TypeSpec::Native { name, .. } => Ok(TypeCategory::from_native_name(name.value())),
            TypeSpec::ColumnType { table, column } => {
                let (table, column) = (table.value(), column.value());
                self.schema
                    .resolve_column_type(table, column)
                    .map(TypeCategory::from_engine_type)
                    .map_err(|source| TypeError::Column {
                        table: table.clone(),
                        column: column.clone(),
                        source,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use plsql_parser::span::Spanned;

    use super::*;

    fn native(name: &str) -> TypeSpec {
        TypeSpec::Native {
            name: Spanned(name.into(), 0..name.len()),
            args: Vec::new(),
        }
    }

    fn column_type(table: &str, column: &str) -> TypeSpec {
        TypeSpec::ColumnType {
            table: Spanned(table.into(), 0..0),
            column: Spanned(column.into(), 0..0),
        }
    }

    #[test]
    fn test_native_types() {
        let catalog = plsql2volt_catalog::load("").unwrap();
        let translator = TypeTranslator::new(&catalog);
        assert_eq!(translator.translate(&native("varchar2")).unwrap(), TypeCategory::String);
        assert_eq!(translator.translate(&native("Pls_Integer")).unwrap(), TypeCategory::Integer);
        assert_eq!(
            translator.translate(&native("NUMBER")).unwrap(),
            TypeCategory::Unrecognized("NUMBER".into())
        );
    }

    #[test]
    fn test_column_types() {
        let catalog = plsql2volt_catalog::load(
            "CREATE TABLE votes (phone_number BIGINT, state VARCHAR(2), created TIMESTAMP);",
        )
        .unwrap();
        let translator = TypeTranslator::new(&catalog);
        assert_eq!(
            translator.translate(&column_type("VOTES", "phone_number")).unwrap(),
            TypeCategory::Integer
        );
        assert_eq!(
            translator.translate(&column_type("votes", "state")).unwrap(),
            TypeCategory::String
        );
        assert_eq!(
            translator.translate(&column_type("votes", "created")).unwrap(),
            TypeCategory::Unrecognized("TIMESTAMP".into())
        );
        assert!(matches!(
            translator.translate(&column_type("votes", "missing")),
            Err(TypeError::Column { .. })
        ));
    }

    #[test]
    fn test_sentinel_has_no_value_type() {
        assert_eq!(TypeCategory::Integer.value_type().unwrap(), ValueType::Integer);
        assert!(matches!(
            TypeCategory::Unrecognized("DECIMAL".into()).value_type(),
            Err(TypeError::Unrecognized(name)) if name == "DECIMAL"
        ));
    }
}

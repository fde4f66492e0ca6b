//! Vocabulary of the generated Java code.

use crate::ir::ValueType;

pub const FILE_EXTENSION: &str = "java";

pub const LONG_TYPE: &str = "long";
pub const STRING_TYPE: &str = "String";
pub const TABLE_TYPE: &str = "VoltTable";

/// Name of the table variable that receives multi-column `SELECT ... INTO` results.
pub const SCRATCH_TABLE: &str = "vt";

pub const EQUALS: &str = "==";
pub const NOT_EQUALS: &str = "!=";
pub const LESS_THAN_OR_EQUALS: &str = "<=";
pub const GREATER_THAN_OR_EQUALS: &str = ">=";
pub const AND: &str = "&&";
pub const OR: &str = "||";
pub const NOT: &str = "!";
pub const CONCAT: &str = "+";

pub const QUEUE_SQL: &str = "voltQueueSQL";
pub const EXECUTE_SQL: &str = "voltExecuteSQL()";
pub const SCALAR_LONG: &str = "asScalarLong()";
pub const ADVANCE_ROW: &str = "advanceRow()";
pub const LINE_COMMENT: &str = "//";

/// Returns the Java spelling of a value type.
pub fn type_name(ty: ValueType) -> &'static str {
    match ty {
        ValueType::Integer => LONG_TYPE,
        ValueType::String => STRING_TYPE,
        ValueType::Table => TABLE_TYPE,
    }
}

/// Returns the `VoltTable` getter reading column `index` of a value of type `ty`.
pub fn accessor(ty: ValueType, index: usize) -> String {
    match ty {
        ValueType::String => format!("getString({index})"),
        _ => format!("getLong({index})"),
    }
}

/// Wraps `inner` in Java string delimiters. `inner` is not escaped.
pub fn string_literal(inner: &str) -> String {
    format!("\"{inner}\"")
}

/// Escapes `text` for use inside a Java string literal.
pub fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

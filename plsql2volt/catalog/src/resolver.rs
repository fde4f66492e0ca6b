use itertools::Itertools;
use plsql2volt_common::data_type::{ColumnSchema, EngineType, ResultSchema};
use smol_str::{SmolStr, format_smolstr};
use sqlparser::ast::{
    BinaryOperator, Expr, Function, FunctionArg, FunctionArgExpr, FunctionArguments, Query,
    Select, SelectItem, SetExpr, Statement, TableFactor, TableWithJoins,
};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use crate::ddl::{parse_engine_type, table_name};
use crate::error::{CatalogError, CatalogResult};
use crate::provider::SchemaProvider;

/// Resolves the output columns of `sql` against the tables of `schema`.
pub(crate) fn resolve_statement<S>(schema: &S, sql: &str) -> CatalogResult<ResultSchema>
where
    S: SchemaProvider + ?Sized,
{
    let statements = Parser::parse_sql(&GenericDialect {}, sql)?;
    let [statement] = statements.as_slice() else {
        return Err(CatalogError::StatementCount(statements.len()));
    };
    let resolved = match statement {
        Statement::Query(query) => resolve_query(schema, query)?,
        Statement::Insert { .. } | Statement::Update { .. } | Statement::Delete { .. } => {
            ResultSchema::default()
        }
        other => return Err(CatalogError::UnsupportedStatement(other.to_string())),
    };
    debug!(schema = %resolved, "resolved statement");
    Ok(resolved)
}

fn resolve_query<S>(schema: &S, query: &Query) -> CatalogResult<ResultSchema>
where
    S: SchemaProvider + ?Sized,
{
    resolve_set_expr(schema, &query.body)
}

fn resolve_set_expr<S>(schema: &S, body: &SetExpr) -> CatalogResult<ResultSchema>
where
    S: SchemaProvider + ?Sized,
{
    match body {
        SetExpr::Select(select) => resolve_select(schema, select),
        SetExpr::Query(query) => resolve_query(schema, query),
        // The left operand names and types the columns of a set operation.
        SetExpr::SetOperation { left, .. } => resolve_set_expr(schema, left),
        other => Err(CatalogError::UnsupportedStatement(other.to_string())),
    }
}

fn resolve_select<S>(schema: &S, select: &Select) -> CatalogResult<ResultSchema>
where
    S: SchemaProvider + ?Sized,
{
    let mut scope = FromScope::default();
    for table in &select.from {
        scope.add_table_with_joins(schema, table)?;
    }

    let mut output = ResultSchema::default();
    for item in &select.projection {
        match item {
            SelectItem::UnnamedExpr(expr) => {
                let column = match scope.column_of(expr)? {
                    Some(column) => column.clone(),
                    None => ColumnSchema::new(
                        format_smolstr!("C{}", output.len() + 1),
                        scope.type_of(expr)?,
                    ),
                };
                output.push(column);
            }
            SelectItem::ExprWithAlias { expr, alias } => {
                output.push(ColumnSchema::new(
                    alias.value.as_str(),
                    scope.type_of(expr)?,
                ));
            }
            SelectItem::Wildcard(_) => {
                for source in &scope.sources {
                    output.extend(&source.columns);
                }
            }
            SelectItem::QualifiedWildcard(..) => {
                let text = item.to_string();
                let qualifier = text.trim_end_matches(".*");
                output.extend(&scope.source(qualifier)?.columns);
            }
        }
    }
    Ok(output)
}

#[derive(Debug)]
struct Source {
    table: Option<SmolStr>,
    alias: Option<SmolStr>,
    columns: ResultSchema,
}

impl Source {
    fn is_named(&self, qualifier: &str) -> bool {
        match &self.alias {
            Some(alias) => alias.eq_ignore_ascii_case(qualifier),
            None => self
                .table
                .as_ref()
                .is_some_and(|table| table.eq_ignore_ascii_case(qualifier)),
        }
    }
}

/// The relations visible to one `SELECT`, in `FROM` order.
#[derive(Debug, Default)]
struct FromScope {
    sources: Vec<Source>,
}

impl FromScope {
    fn add_table_with_joins<S>(&mut self, schema: &S, table: &TableWithJoins) -> CatalogResult<()>
    where
        S: SchemaProvider + ?Sized,
    {
        self.add_table_factor(schema, &table.relation)?;
        for join in &table.joins {
            self.add_table_factor(schema, &join.relation)?;
        }
        Ok(())
    }

    fn add_table_factor<S>(&mut self, schema: &S, factor: &TableFactor) -> CatalogResult<()>
    where
        S: SchemaProvider + ?Sized,
    {
        match factor {
            TableFactor::Table { name, alias, .. } => {
                let name = table_name(name);
                let table = schema
                    .get_table(&name)?
                    .ok_or_else(|| CatalogError::TableNotFound(name.clone()))?;
                self.sources.push(Source {
                    table: Some(name),
                    alias: alias.as_ref().map(|alias| alias.name.value.as_str().into()),
                    columns: table.columns().clone(),
                });
            }
            TableFactor::Derived {
                subquery, alias, ..
            } => {
                let columns = resolve_query(schema, subquery)?;
                self.sources.push(Source {
                    table: None,
                    alias: alias.as_ref().map(|alias| alias.name.value.as_str().into()),
                    columns,
                });
            }
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.add_table_with_joins(schema, table_with_joins)?,
            other => return Err(CatalogError::UnsupportedStatement(other.to_string())),
        }
        Ok(())
    }

    fn source(&self, qualifier: &str) -> CatalogResult<&Source> {
        self.sources
            .iter()
            .find(|source| source.is_named(qualifier))
            .ok_or_else(|| CatalogError::TableNotFound(qualifier.into()))
    }

    fn lookup(&self, qualifier: Option<&str>, name: &str) -> CatalogResult<&ColumnSchema> {
        let not_found = || CatalogError::ColumnNotFound {
            table: qualifier.map(Into::into),
            column: name.into(),
        };
        if let Some(qualifier) = qualifier {
            let columns = &self.source(qualifier)?.columns;
            return columns
                .position_of(name)
                .and_then(|index| columns.get(index))
                .ok_or_else(not_found);
        }
        let matches = self
            .sources
            .iter()
            .filter_map(|source| {
                source
                    .columns
                    .position_of(name)
                    .and_then(|index| source.columns.get(index))
            })
            .collect_vec();
        match matches.as_slice() {
            [] => Err(not_found()),
            [column] => Ok(*column),
            _ => Err(CatalogError::AmbiguousColumn(name.into())),
        }
    }

    /// Returns the referenced column when `expr` is a plain column reference.
    fn column_of(&self, expr: &Expr) -> CatalogResult<Option<&ColumnSchema>> {
        match expr {
            Expr::Identifier(ident) => self.lookup(None, &ident.value).map(Some),
            Expr::CompoundIdentifier(parts) => match parts.as_slice() {
                [.., table, column] => self
                    .lookup(Some(table.value.as_str()), &column.value)
                    .map(Some),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn type_of(&self, expr: &Expr) -> CatalogResult<EngineType> {
        if let Some(column) = self.column_of(expr)? {
            return Ok(column.ty());
        }
        let unsupported = || CatalogError::UnsupportedExpression(expr.to_string());
        match expr {
            Expr::Nested(inner) => self.type_of(inner),
            Expr::UnaryOp { expr, .. } => self.type_of(expr),
            Expr::Cast { data_type, .. } => parse_engine_type(&data_type.to_string()),
            Expr::BinaryOp { left, op, right } => match op {
                BinaryOperator::StringConcat => Ok(EngineType::Varchar),
                BinaryOperator::Plus
                | BinaryOperator::Minus
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo => {
                    let (left, right) = (self.type_of(left)?, self.type_of(right)?);
                    arithmetic_type(left, right).ok_or_else(unsupported)
                }
                _ => Err(unsupported()),
            },
            Expr::Function(function) => self.function_type(function).ok_or_else(unsupported)?,
            Expr::Value(value) => literal_type(&value.to_string()).ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }

    fn function_type(&self, function: &Function) -> Option<CatalogResult<EngineType>> {
        let name = function.name.to_string().to_ascii_lowercase();
        let argument_type = || match first_argument(function) {
            Some(argument) => self.type_of(argument),
            None => Err(CatalogError::UnsupportedExpression(function.to_string())),
        };
        let ty = match name.as_str() {
            "count" => Ok(EngineType::BigInt),
            "sum" => argument_type().map(|ty| {
                if ty.is_integral() {
                    EngineType::BigInt
                } else {
                    ty
                }
            }),
            "min" | "max" | "avg" | "abs" | "ceiling" | "floor" => argument_type(),
            "lower" | "upper" | "substring" | "substr" | "trim" | "concat" | "left" | "right"
            | "replace" | "repeat" => Ok(EngineType::Varchar),
            "char_length" | "octet_length" | "position" => Ok(EngineType::Integer),
            "power" | "sqrt" | "exp" | "ln" | "log" => Ok(EngineType::Float),
            "now" | "current_timestamp" => Ok(EngineType::Timestamp),
            _ => return None,
        };
        Some(ty)
    }
}

fn first_argument(function: &Function) -> Option<&Expr> {
    match &function.args {
        FunctionArguments::List(list) => list.args.iter().find_map(|arg| match arg {
            FunctionArg::Unnamed(FunctionArgExpr::Expr(expr)) => Some(expr),
            _ => None,
        }),
        _ => None,
    }
}

fn arithmetic_type(left: EngineType, right: EngineType) -> Option<EngineType> {
    if !left.is_numeric() || !right.is_numeric() {
        return None;
    }
    let ty = if left.is_integral() && right.is_integral() {
        EngineType::BigInt
    } else if left == EngineType::Decimal || right == EngineType::Decimal {
        EngineType::Decimal
    } else {
        EngineType::Float
    };
    Some(ty)
}

fn literal_type(text: &str) -> Option<EngineType> {
    if text.starts_with('\'') {
        Some(EngineType::Varchar)
    } else if text.parse::<i64>().is_ok() {
        Some(EngineType::BigInt)
    } else if text.parse::<f64>().is_ok() {
        Some(EngineType::Float)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::load;
    use crate::memory::MemorySchemaCatalog;

    fn catalog() -> MemorySchemaCatalog {
        load(
            "create table votes (phone_number integer, state varchar(2), contestant_number integer);
             create table contestants (contestant_number integer, contestant_name varchar(50));
             create table t (id bigint, name varchar(20), score float);",
        )
        .unwrap()
    }

    fn resolve(sql: &str) -> CatalogResult<String> {
        catalog().resolve_statement(sql).map(|s| s.to_string())
    }

    #[test]
    fn test_count_is_single_bigint() {
        assert_eq!(
            resolve("select count(*) from votes where phone_number = ?").unwrap(),
            "(C1 BIGINT)"
        );
    }

    #[test]
    fn test_plain_columns_keep_declared_names() {
        assert_eq!(
            resolve("SELECT ID, Name FROM t").unwrap(),
            "(id BIGINT, name VARCHAR)"
        );
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(
            resolve("select * from t").unwrap(),
            "(id BIGINT, name VARCHAR, score FLOAT)"
        );
        assert_eq!(
            resolve("select c.* from votes v join contestants c on v.contestant_number = c.contestant_number")
                .unwrap(),
            "(contestant_number INTEGER, contestant_name VARCHAR)"
        );
    }

    #[test]
    fn test_aliases_and_joins() {
        assert_eq!(
            resolve(
                "select c.contestant_name as who, count(*) as total, sum(v.phone_number) \
                 from votes v, contestants c \
                 where v.contestant_number = c.contestant_number \
                 group by c.contestant_name"
            )
            .unwrap(),
            "(who VARCHAR, total BIGINT, C3 BIGINT)"
        );
    }

    #[test]
    fn test_computed_columns() {
        assert_eq!(
            resolve("select id + 1, score * 2, name || 'x', max(score) from t").unwrap(),
            "(C1 BIGINT, C2 FLOAT, C3 VARCHAR, C4 FLOAT)"
        );
    }

    #[test]
    fn test_derived_table() {
        assert_eq!(
            resolve("select x.n from (select count(*) as n from t) x").unwrap(),
            "(n BIGINT)"
        );
    }

    #[test]
    fn test_dml_has_empty_schema() {
        assert_eq!(
            resolve("insert into votes (phone_number, state, contestant_number) values (?, ?, ?)")
                .unwrap(),
            "()"
        );
        assert_eq!(resolve("delete from votes where state = ?").unwrap(), "()");
        assert_eq!(
            resolve("update votes set state = ? where phone_number = ?").unwrap(),
            "()"
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            resolve("select missing from t"),
            Err(CatalogError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            resolve("select contestant_number from votes, contestants"),
            Err(CatalogError::AmbiguousColumn(_))
        ));
        assert!(matches!(
            resolve("select * from nowhere"),
            Err(CatalogError::TableNotFound(_))
        ));
        assert!(matches!(
            resolve("select 1 from t; select 2 from t"),
            Err(CatalogError::StatementCount(2))
        ));
        assert!(matches!(resolve("select * from"), Err(CatalogError::Sql(_))));
    }
}

mod expression;
mod lexical;
mod procedure;
mod sql;
mod statement;

pub(super) use procedure::source_file;

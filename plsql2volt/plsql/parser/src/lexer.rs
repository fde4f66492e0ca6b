use logos::{Lexer as LogosLexer, Logos};

use crate::error::TokenErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
#[logos(error = TokenErrorKind)]
#[logos(skip r"[\p{White_Space}]+")]
pub enum TokenKind<'a> {
    // Procedural keywords.
    #[token("as", ignore(case))]
    As,
    #[token("begin", ignore(case))]
    Begin,
    #[token("constant", ignore(case))]
    Constant,
    #[token("create", ignore(case))]
    Create,
    #[token("default", ignore(case))]
    Default,
    #[token("else", ignore(case))]
    Else,
    #[token("elsif", ignore(case))]
    Elsif,
    #[token("end", ignore(case))]
    End,
    #[token("false", ignore(case))]
    False,
    #[token("for", ignore(case))]
    For,
    #[token("if", ignore(case))]
    If,
    #[token("in", ignore(case))]
    In,
    #[token("is", ignore(case))]
    Is,
    #[token("loop", ignore(case))]
    Loop,
    #[token("nocopy", ignore(case))]
    Nocopy,
    #[token("null", ignore(case))]
    Null,
    #[token("out", ignore(case))]
    Out,
    #[token("procedure", ignore(case))]
    Procedure,
    #[token("replace", ignore(case))]
    Replace,
    #[token("return", ignore(case))]
    Return,
    #[token("then", ignore(case))]
    Then,
    #[token("true", ignore(case))]
    True,

    // Operator keywords shared with SQL.
    #[token("and", ignore(case))]
    And,
    #[token("not", ignore(case))]
    Not,
    #[token("or", ignore(case))]
    Or,

    // SQL keywords. Words in this group never count as variable references inside SQL text.
    #[token("all", ignore(case))]
    All,
    #[token("asc", ignore(case))]
    Asc,
    #[token("between", ignore(case))]
    Between,
    #[token("by", ignore(case))]
    By,
    #[token("case", ignore(case))]
    Case,
    #[token("delete", ignore(case))]
    Delete,
    #[token("desc", ignore(case))]
    Desc,
    #[token("distinct", ignore(case))]
    Distinct,
    #[token("exists", ignore(case))]
    Exists,
    #[token("from", ignore(case))]
    From,
    #[token("group", ignore(case))]
    Group,
    #[token("having", ignore(case))]
    Having,
    #[token("inner", ignore(case))]
    Inner,
    #[token("insert", ignore(case))]
    Insert,
    #[token("into", ignore(case))]
    Into,
    #[token("join", ignore(case))]
    Join,
    #[token("left", ignore(case))]
    Left,
    #[token("like", ignore(case))]
    Like,
    #[token("limit", ignore(case))]
    Limit,
    #[token("offset", ignore(case))]
    Offset,
    #[token("on", ignore(case))]
    On,
    #[token("order", ignore(case))]
    Order,
    #[token("outer", ignore(case))]
    Outer,
    #[token("right", ignore(case))]
    Right,
    #[token("select", ignore(case))]
    Select,
    #[token("set", ignore(case))]
    Set,
    #[token("union", ignore(case))]
    Union,
    #[token("update", ignore(case))]
    Update,
    #[token("upsert", ignore(case))]
    Upsert,
    #[token("values", ignore(case))]
    Values,
    #[token("when", ignore(case))]
    When,
    #[token("where", ignore(case))]
    Where,

    // Symbols.
    #[token(":=")]
    Assign,
    #[token("*")]
    Asterisk,
    #[token(",")]
    Comma,
    #[token("||")]
    Concatenation,
    #[token("=")]
    Equals,
    #[token(">")]
    GreaterThan,
    #[regex(r">[ \t]*=")]
    GreaterThanOrEquals,
    #[token("(")]
    LeftParen,
    #[token("<")]
    LessThan,
    #[regex(r"<[ \t]*=")]
    LessThanOrEquals,
    #[token("-")]
    Minus,
    #[regex(r"<[ \t]*>|![ \t]*=|\^[ \t]*=|~[ \t]*=")]
    NotEquals,
    #[regex(r"%[tT][yY][pP][eE]")]
    PercentType,
    #[token(".")]
    Period,
    #[token("+")]
    Plus,
    #[token("?")]
    QuestionMark,
    #[token(")")]
    RightParen,
    #[token(";")]
    Semicolon,
    #[token("/")]
    Solidus,

    // Identifiers and literals.
    #[regex(r"[A-Za-z][A-Za-z0-9_$#]*")]
    Identifier(&'a str),
    #[regex(r#""([^"]|"")*""#)]
    QuotedIdentifier(&'a str),
    #[regex(r"[0-9]+")]
    UnsignedInteger(&'a str),
    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    UnsignedDecimal(&'a str),
    /// A single-quoted string, including its delimiters. Doubled quotes are kept as written.
    #[regex(r"'([^']|'')*'")]
    SingleQuoted(&'a str),

    // Trivia. These are split off before parsing.
    #[regex(r"--[^\r\n]*")]
    LineComment(&'a str),
    #[token("/*", handle_comment)]
    BlockComment(&'a str),
}

fn handle_comment<'a>(lex: &mut LogosLexer<'a, TokenKind<'a>>) -> Result<&'a str, TokenErrorKind> {
    let remainder = lex.remainder();
    if let Some(len) = remainder.find("*/") {
        lex.bump(len + 2);
        Ok(lex.slice())
    } else {
        lex.bump(remainder.len());
        Err(TokenErrorKind::IncompleteComment)
    }
}

impl TokenKind<'_> {
    #[inline]
    pub fn is_prefix_of_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_) | Self::QuotedIdentifier(_))
    }

    #[inline]
    pub fn is_prefix_of_sql_statement(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::Insert | Self::Update | Self::Upsert | Self::Delete
        )
    }

    #[inline]
    pub fn is_prefix_of_literal(&self) -> bool {
        matches!(
            self,
            Self::UnsignedInteger(_)
                | Self::UnsignedDecimal(_)
                | Self::SingleQuoted(_)
                | Self::True
                | Self::False
                | Self::Null
        )
    }
}

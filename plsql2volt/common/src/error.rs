use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Suggests how to rewrite a procedure around a construct that is not translated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Workaround(Option<&'static str>);

impl Workaround {
    pub fn new(hint: Option<&'static str>) -> Self {
        Self(hint)
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.0
    }
}

impl fmt::Display for Workaround {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(hint) => write!(f, "{hint}"),
            None => f.write_str(
                "only a subset of PL/SQL is translated; rewrite the procedure without this construct",
            ),
        }
    }
}

/// Raised for source constructs that parse but have no VoltDB counterpart yet.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("translation is not yet implemented for: {construct}")]
pub struct NotImplemented {
    construct: String,
    #[help]
    workaround: Workaround,
}

impl NotImplemented {
    #[inline]
    pub fn new(construct: String, workaround: Workaround) -> Self {
        Self {
            construct,
            workaround,
        }
    }

    #[inline]
    pub fn construct(&self) -> &str {
        &self.construct
    }

    #[inline]
    pub fn workaround(&self) -> &Workaround {
        &self.workaround
    }
}

#[inline]
pub fn not_implemented<T, E>(construct: impl Into<String>, hint: Option<&'static str>) -> Result<T, E>
where
    E: From<NotImplemented>,
{
    Err(E::from(NotImplemented::new(
        construct.into(),
        Workaround::new(hint),
    )))
}

/// An error that occurred while building a generator or generating a string.
///
/// Structural problems in a syntax tree (a misplaced anchor, an unsupported
/// word boundary) are not errors. Those are recorded as
/// [`Anomaly`](crate::Anomaly) values and generation continues. An error is
/// only returned when generation cannot produce anything sensible at all.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The pattern given to a [`Builder`](crate::Builder) could not be
    /// parsed.
    Syntax(Box<regex_syntax::Error>),
    /// A character class had no candidate characters to pick from.
    ///
    /// This happens for classes that match nothing, like `[a&&b]`, and for
    /// negated classes that exclude every printable ASCII character, like
    /// `[^ -~]`.
    EmptyClass,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Syntax(ref err) => Some(&**err),
            Error::EmptyClass => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Error::Syntax(ref err) => write!(f, "failed to parse pattern: {}", err),
            Error::EmptyClass => write!(
                f,
                "character class has no printable candidates to choose from",
            ),
        }
    }
}

impl From<regex_syntax::Error> for Error {
    fn from(err: regex_syntax::Error) -> Error {
        Error::Syntax(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn syntax_error_has_source() {
        let err = Error::from(regex_syntax::parse("a(").unwrap_err());
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("failed to parse pattern"));
    }

    #[test]
    fn empty_class_has_no_source() {
        assert!(Error::EmptyClass.source().is_none());
    }
}

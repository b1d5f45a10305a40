use crate::Error;

/// Either a valid value returned by Crowd, or the error Crowd reported instead.
///
/// Exactly one side is populated. Crowd-level rejections (bad password, unknown
/// user, not a group member) arrive as [`Either::Error`]; transport failures are
/// never folded into this type and surface as [`crate::Error`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Either<S, E> {
    /// The call succeeded
    Value(S),
    /// Crowd answered with an error body
    Error(E),
}

impl<S, E> Either<S, E> {
    /// Creates an instance holding a valid value.
    pub const fn value(value: S) -> Self {
        Self::Value(value)
    }

    /// Creates an instance holding an error.
    pub const fn error(error: E) -> Self {
        Self::Error(error)
    }

    /// Assembles an instance from two optional sides.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if both sides or neither side is present.
    pub fn from_parts(value: Option<S>, error: Option<E>) -> Result<Self, Error> {
        match (value, error) {
            (Some(value), None) => Ok(Self::Value(value)),
            (None, Some(error)) => Ok(Self::Error(error)),
            (Some(_), Some(_)) => Err(Error::InvalidArgument(
                "both value and error cannot be present".to_string(),
            )),
            (None, None) => Err(Error::InvalidArgument(
                "both value and error cannot be absent".to_string(),
            )),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Gets the valid value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidState`] if this holds an error.
    pub fn get_value(&self) -> Result<&S, Error> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(_) => Err(Error::InvalidState("value is not present")),
        }
    }

    /// Gets the error.
    ///
    /// # Errors
    /// Returns [`Error::InvalidState`] if this holds a valid value.
    pub fn get_error(&self) -> Result<&E, Error> {
        match self {
            Self::Error(error) => Ok(error),
            Self::Value(_) => Err(Error::InvalidState("error is not present")),
        }
    }

    /// Takes the valid value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidState`] if this holds an error.
    pub fn into_value(self) -> Result<S, Error> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(_) => Err(Error::InvalidState("value is not present")),
        }
    }

    /// Takes the error.
    ///
    /// # Errors
    /// Returns [`Error::InvalidState`] if this holds a valid value.
    pub fn into_error(self) -> Result<E, Error> {
        match self {
            Self::Error(error) => Ok(error),
            Self::Value(_) => Err(Error::InvalidState("error is not present")),
        }
    }

    pub const fn as_ref(&self) -> Either<&S, &E> {
        match self {
            Self::Value(value) => Either::Value(value),
            Self::Error(error) => Either::Error(error),
        }
    }

    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Either<T, E> {
        match self {
            Self::Value(value) => Either::Value(f(value)),
            Self::Error(error) => Either::Error(error),
        }
    }

    pub fn map_error<F>(self, f: impl FnOnce(E) -> F) -> Either<S, F> {
        match self {
            Self::Value(value) => Either::Value(value),
            Self::Error(error) => Either::Error(f(error)),
        }
    }

    /// Converts into a standard `Result`, with the Crowd error as `Err`.
    #[allow(clippy::missing_errors_doc)]
    pub fn into_result(self) -> Result<S, E> {
        self.into()
    }
}

impl<S, E> From<Either<S, E>> for Result<S, E> {
    fn from(either: Either<S, E>) -> Self {
        match either {
            Either::Value(value) => Ok(value),
            Either::Error(error) => Err(error),
        }
    }
}

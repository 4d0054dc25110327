/// A type alias for handling errors throughout meshlet
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A precondition violation: a dimension, stride, limit or weight was
    /// outside its contract. Detected before any buffer is touched.
    #[error("invalid parameter: {0}")]
    InvalidParameter(std::borrow::Cow<'static, str>),

    /// A destination array was too small for the worst-case output computed
    /// by `build_meshlets_bound`. Detected before writing out of bounds.
    #[error("capacity error: {0}")]
    Capacity(std::borrow::Cow<'static, str>),
}

impl Error {
    #[inline]
    pub(crate) fn invalid_parameter(msg: &'static str) -> Self {
        Self::InvalidParameter(std::borrow::Cow::Borrowed(msg))
    }

    #[inline]
    pub(crate) fn invalid_parameter_dynamic(msg: String) -> Self {
        Self::InvalidParameter(std::borrow::Cow::Owned(msg))
    }

    #[inline]
    pub(crate) fn capacity(msg: &'static str) -> Self {
        Self::Capacity(std::borrow::Cow::Borrowed(msg))
    }
}

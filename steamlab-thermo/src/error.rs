use thiserror::Error;

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// A requested input lies outside the provider's documented domain.
    ///
    /// Values are reported in SI base units.
    #[error("`{property}` = {value} is outside the valid domain [{min}, {max}]")]
    OutOfDomain {
        property: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The property has no value at the given state.
    ///
    /// For example, quality outside the two-phase region.
    #[error("property `{property}` is undefined at the given state")]
    Undefined {
        property: &'static str,
        context: Option<String>,
    },

    /// The calculation failed due to a numerical error.
    ///
    /// For example, a non-finite intermediate or a failure to converge.
    #[error("calculation error: {0}")]
    Calculation(String),
}

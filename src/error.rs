use thiserror::Error;

/// Errors surfaced by the pure calculators.
///
/// Both variants are programming or data errors: they are always returned to
/// the caller and never retried internally. Degenerate divisions (zero
/// denominator where the design says "result is zero") are logged, not
/// returned as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An arithmetic step would exceed the representable 256-bit range.
    /// Never silently saturated or wrapped.
    #[error("arithmetic overflow in wei-scale computation")]
    Overflow,
    /// A precondition violation, e.g. a negative value fed to an integer
    /// square root.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

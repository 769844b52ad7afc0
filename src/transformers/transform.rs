//! Transform trait.

/// A line-level rewrite step.
///
/// Steps are chained by the [super::Normalizer], each one taking ownership of
/// the output of the previous one.
pub trait Transform: Send + Sync {
    /// Takes ownership of the line and returns its transformed form.
    fn transform_own(&self, line: String) -> String;
}

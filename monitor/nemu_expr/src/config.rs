//! Evaluator configuration.

/// What to do when the right operand of `/` is zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DivisionByZero {
    /// Report [`EvalError::DivisionByZero`](crate::EvalError::DivisionByZero)
    /// like any other bad expression.
    #[default]
    Fail,
    /// Panic with a diagnostic. Matches monitors that treat a zero divisor
    /// as fatal for the whole session.
    Abort,
}

/// Evaluation policy shared by every call made through one
/// [`Evaluator`](crate::Evaluator).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EvalConfig {
    division_by_zero: DivisionByZero,
    max_depth: Option<usize>,
}

impl EvalConfig {
    /// Default policy: zero divisors fail, nesting is unbounded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the division-by-zero policy.
    #[must_use]
    pub fn division_by_zero(mut self, policy: DivisionByZero) -> Self {
        self.division_by_zero = policy;
        self
    }

    /// Cap recursion depth; deeper expressions fail with
    /// [`EvalError::TooDeep`](crate::EvalError::TooDeep).
    ///
    /// Without a cap the stack grows on demand.
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    #[inline]
    pub fn division_policy(&self) -> DivisionByZero {
        self.division_by_zero
    }

    #[inline]
    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }
}

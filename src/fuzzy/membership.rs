//! Piecewise-linear membership functions.
//!
//! Both shapes evaluate analytically at any scalar input, so they need no
//! universe to be defined. Degrees are always in `[0, 1]`; inputs far outside
//! the support saturate to 0 instead of raising an error.
//!
//! # Shapes
//!
//! - [`MembershipFunction::Trapezoidal`]: `(a, b, c, d)`, plateau on `[b, c]`
//! - [`MembershipFunction::Triangular`]: `(a, b, c)`, apex at `b`
//!
//! Zero-width ramps (`a == b`, `c == d`) act as instantaneous steps. This is
//! how shoulder sets such as `Trapezoidal(-90, -90, -45, 0)` reach degree 1 at
//! the edge of their universe.

use crate::error::{FuzzyError, FuzzyResult};

/// A trapezoidal or triangular membership function.
///
/// Invariant: breakpoints are finite and non-decreasing (`a <= b <= c (<= d)`).
/// Use [`trapezoidal`](Self::trapezoidal) / [`triangular`](Self::triangular)
/// to construct a checked value, or [`from_unsorted`](Self::from_unsorted)
/// to sort raw parameters first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MembershipFunction {
    /// Trapezoid with feet `a`, `d` and plateau `[b, c]`.
    Trapezoidal(f64, f64, f64, f64),
    /// Triangle with feet `a`, `c` and apex `b`.
    Triangular(f64, f64, f64),
}

/// Shape tag used by chromosome layouts and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MembershipKind {
    Trapezoidal,
    Triangular,
}

impl MembershipKind {
    /// Number of breakpoints the shape takes.
    pub fn arity(self) -> usize {
        match self {
            MembershipKind::Trapezoidal => 4,
            MembershipKind::Triangular => 3,
        }
    }
}

impl MembershipFunction {
    /// Checked trapezoid constructor.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FuzzyResult<Self> {
        check_ordered(&[a, b, c, d])?;
        Ok(MembershipFunction::Trapezoidal(a, b, c, d))
    }

    /// Checked triangle constructor.
    pub fn triangular(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        check_ordered(&[a, b, c])?;
        Ok(MembershipFunction::Triangular(a, b, c))
    }

    /// Builds a function of `kind` from raw parameters, sorting them ascending.
    ///
    /// This is the validity-preserving step used when decoding chromosomes:
    /// recombination is free to invert breakpoint order, sorting restores it.
    pub fn from_unsorted(kind: MembershipKind, params: &[f64]) -> FuzzyResult<Self> {
        if params.len() != kind.arity() {
            return Err(FuzzyError::InvalidMembership(format!(
                "{kind:?} takes {} breakpoints, got {}",
                kind.arity(),
                params.len()
            )));
        }
        if let Some(bad) = params.iter().find(|p| !p.is_finite()) {
            return Err(FuzzyError::InvalidMembership(format!(
                "non-finite breakpoint {bad}"
            )));
        }
        let mut p = params.to_vec();
        p.sort_by(f64::total_cmp);
        match kind {
            MembershipKind::Trapezoidal => Self::trapezoidal(p[0], p[1], p[2], p[3]),
            MembershipKind::Triangular => Self::triangular(p[0], p[1], p[2]),
        }
    }

    /// Shape of this function.
    pub fn kind(&self) -> MembershipKind {
        match self {
            MembershipFunction::Trapezoidal(..) => MembershipKind::Trapezoidal,
            MembershipFunction::Triangular(..) => MembershipKind::Triangular,
        }
    }

    /// Breakpoints in ascending order.
    pub fn breakpoints(&self) -> Vec<f64> {
        match *self {
            MembershipFunction::Trapezoidal(a, b, c, d) => vec![a, b, c, d],
            MembershipFunction::Triangular(a, b, c) => vec![a, b, c],
        }
    }

    /// Degree of membership of `x`, in `[0, 1]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Trapezoidal(a, b, c, d) => trapezoid(a, b, c, d, x),
            MembershipFunction::Triangular(a, b, c) => trapezoid(a, b, b, c, x),
        }
    }
}

/// Trapezoid evaluation; a triangle is the `b == c` case.
fn trapezoid(a: f64, b: f64, c: f64, d: f64, x: f64) -> f64 {
    if b <= x && x <= c {
        return 1.0;
    }
    if x <= a || x >= d {
        return 0.0;
    }
    // a < x < b and b > a, or c < x < d and d > c
    if x < b {
        ((x - a) / (b - a)).clamp(0.0, 1.0)
    } else {
        ((d - x) / (d - c)).clamp(0.0, 1.0)
    }
}

fn check_ordered(params: &[f64]) -> FuzzyResult<()> {
    if params.iter().any(|p| !p.is_finite()) {
        return Err(FuzzyError::InvalidMembership(format!(
            "non-finite breakpoints {params:?}"
        )));
    }
    if params.windows(2).any(|w| w[0] > w[1]) {
        return Err(FuzzyError::InvalidMembership(format!(
            "breakpoints must be non-decreasing, got {params:?}"
        )));
    }
    Ok(())
}

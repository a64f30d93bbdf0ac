//! Harmony values.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A non-positive measure of constraint satisfaction.
///
/// Zero means perfectly well-formed; every penalty pushes the value below
/// zero. Unlike solver scores, harmony is real-valued because Harmonic
/// Grammar weights are.
///
/// # Examples
///
/// ```
/// use statgram_core::Harmony;
///
/// let total: Harmony = [Harmony::of(-1.0), Harmony::ZERO, Harmony::of(-0.5)]
///     .into_iter()
///     .sum();
/// assert_eq!(total, Harmony::of(-1.5));
/// assert!(!total.is_well_formed());
/// assert!(Harmony::ZERO.is_well_formed());
/// ```
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Harmony(f64);

impl Harmony {
    /// The harmony of a well-formed element.
    pub const ZERO: Harmony = Harmony(0.0);

    /// The categorical penalty of one ill-formed OT subnode.
    pub const PENALTY: Harmony = Harmony(-1.0);

    /// Wraps a raw value.
    #[inline]
    pub const fn of(value: f64) -> Self {
        Harmony(value)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if nothing was penalized.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.0 >= 0.0
    }
}

impl PartialOrd for Harmony {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Harmony {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Harmony(self.0 + other.0)
    }
}

impl AddAssign for Harmony {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Harmony {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Harmony::ZERO, Add::add)
    }
}

impl From<f64> for Harmony {
    fn from(value: f64) -> Self {
        Harmony(value)
    }
}

impl fmt::Debug for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Harmony({})", self.0)
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Compile-time unit safety for export system quantities.
//!
//! Prevents mixing incompatible units like kilometres and metres, or tonnes
//! and dollars.
//!
//! # Design Philosophy
//!
//! Export design mixes several physical and economic quantities:
//! - Power (MW) and reactive compensation (Mvar)
//! - Route lengths (km) and site depths / touchdown offsets (m)
//! - Masses (t) and costs (USD)
//!
//! The touchdown distance is configured in metres while the route is in
//! kilometres; keeping both as raw `f64` invites a factor-of-1000 slip. The
//! newtypes below make those conversions explicit.
//!
//! All types use `#[repr(transparent)]` and serialize as plain numbers.
//!
//! # Usage
//!
//! ```
//! use oswe_core::units::{Kilometers, Meters};
//!
//! let route = Kilometers(50.0);
//! let touchdown = Meters(500.0);
//!
//! let offshore = route - touchdown.to_kilometers();
//! assert_eq!(offshore, Kilometers(49.5));
//!
//! // This would NOT compile - different units
//! // let wrong = route - touchdown;
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Round to `decimals` places, ties to even
            #[inline]
            pub fn round_to(self, decimals: i32) -> Self {
                Self(round_to(self.0, decimals))
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

/// Round `value` to `decimals` places.
///
/// Positive `decimals` round the exact decimal expansion of `value`, so
/// `round_to(x, 10)` lands on the nearest 10-place decimal even where
/// `x * 1e10` would itself round. Zero or negative `decimals` round half to
/// even on the scaled value.
///
/// Used for the 10-decimal stabilisation of cable lengths and masses, and for
/// snapping transformer ratings to 10 MW steps.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if decimals > 0 {
        return format!("{:.*}", decimals as usize, value)
            .parse()
            .unwrap_or(value);
    }
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

// =============================================================================
// Power Units
// =============================================================================

/// Active power in megawatts (MW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl_unit_ops!(Megawatts, "MW");

/// Reactive power in megavolt-amperes reactive (Mvar)
///
/// Shunt reactors are sized in Mvar to offset the charging current of long
/// AC export cables.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megavars(pub f64);

impl_unit_ops!(Megavars, "Mvar");

// =============================================================================
// Length Units
// =============================================================================

/// Route length in kilometres (km)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilometers(pub f64);

impl_unit_ops!(Kilometers, "km");

impl Kilometers {
    /// Convert to metres
    #[inline]
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * 1000.0)
    }
}

/// Length in metres (m), used for depths and touchdown offsets
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(pub f64);

impl_unit_ops!(Meters, "m");

impl Meters {
    /// Convert to kilometres
    #[inline]
    pub fn to_kilometers(self) -> Kilometers {
        Kilometers(self.0 / 1000.0)
    }
}

// =============================================================================
// Mass and Cost Units
// =============================================================================

/// Mass in metric tonnes (t)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Tonnes(pub f64);

impl_unit_ops!(Tonnes, "t");

/// Nominal cost in US dollars
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Usd(pub f64);

impl_unit_ops!(Usd, "USD");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilometers_arithmetic() {
        let a = Kilometers(10.0);
        let b = Kilometers(2.5);
        assert_eq!(a + b, Kilometers(12.5));
        assert_eq!(a - b, Kilometers(7.5));
        assert_eq!(a * 2.0, Kilometers(20.0));
        assert_eq!(2.0 * a, Kilometers(20.0));
        assert_eq!(a / 2.0, Kilometers(5.0));
        assert_eq!(a / b, 4.0);
    }

    #[test]
    fn test_length_conversion() {
        assert_eq!(Meters(1500.0).to_kilometers(), Kilometers(1.5));
        assert_eq!(Kilometers(0.25).to_meters(), Meters(250.0));
    }

    #[test]
    fn test_round_to_ten_decimals() {
        let rounded = round_to(0.1 + 0.2, 10);
        assert_eq!(rounded, 0.3);
        assert_eq!(Tonnes(1.000_000_000_04).round_to(10), Tonnes(1.0));
    }

    #[test]
    fn test_round_to_uses_exact_decimal_value() {
        // x * 1e10 is exactly 1113574779602.5, so scaling first would round to ...602
        assert_eq!(round_to(111.357_477_960_250_01, 10), 111.357_477_960_3);
        assert_eq!(round_to(-0.000_000_000_04, 10), 0.0);
        assert_eq!(round_to(53.03, 10), 53.03);
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
    }

    #[test]
    fn test_round_passes_non_finite_through() {
        assert!(round_to(f64::NAN, 10).is_nan());
        assert_eq!(round_to(f64::INFINITY, 10), f64::INFINITY);
    }

    #[test]
    fn test_sum_iterator() {
        let costs = vec![Usd(1.0e6), Usd(2.0e6), Usd(3.0e6)];
        let total: Usd = costs.iter().sum();
        assert_eq!(total, Usd(6.0e6));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Tonnes(2248.5)).unwrap();
        assert_eq!(json, "2248.5");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Megawatts(100.0)), "100.0000 MW");
        assert_eq!(format!("{}", Megavars(5.0)), "5.0000 Mvar");
    }
}

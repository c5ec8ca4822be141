//! Fixed-point scalar for sub-pixel motion
//!
//! Character position and velocity are kept in `i32` with 8 fractional bits,
//! so one pixel is 256 sub-units. All shifts live here.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Signed fixed-point value with [`Fixed::FRACTION_BITS`] fractional bits
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Number of fractional bits
    pub const FRACTION_BITS: u32 = 8;
    pub const ZERO: Fixed = Fixed(0);
    /// One whole pixel
    pub const ONE: Fixed = Fixed(1 << Self::FRACTION_BITS);

    /// Wrap from raw sub-units
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Whole pixels to fixed-point
    #[inline]
    pub const fn from_int(pixels: i32) -> Self {
        Self(pixels << Self::FRACTION_BITS)
    }

    /// Quarter pixels to fixed-point (meteor momentum transfer)
    #[inline]
    pub const fn from_quarters(quarters: i32) -> Self {
        Self(quarters << (Self::FRACTION_BITS - 2))
    }

    /// Raw sub-units
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whole pixels, rounding toward negative infinity
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRACTION_BITS
    }

    /// Euclidean remainder, used for horizontal wraparound
    #[inline]
    pub const fn rem_euclid(self, modulus: Fixed) -> Self {
        Self(self.0.rem_euclid(modulus.0))
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    #[inline]
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

//! Fixed-point scalar and 3D vector math
//!
//! One world unit is 4096 integer steps (12 fractional bits). The simulation
//! core works entirely in these units with no floats; i64 intermediates keep
//! products and squared lengths from overflowing.

use serde::{Deserialize, Serialize};

pub type Fp = i32;

pub const SHIFT: u32 = 12;
pub const ONE: Fp = 1 << SHIFT; // 4096

/// Fixed-point multiply: (a * b) >> SHIFT
#[inline(always)]
pub fn mul(a: Fp, b: Fp) -> Fp {
    ((a as i64 * b as i64) >> SHIFT) as Fp
}

/// Fixed-point divide: (a << SHIFT) / b
#[inline(always)]
pub fn div(a: Fp, b: Fp) -> Fp {
    (((a as i64) << SHIFT) / b as i64) as Fp
}

/// Integer square root (floor) over non-negative i64
fn isqrt(v: i64) -> i64 {
    if v <= 0 {
        return 0;
    }
    let mut x = v;
    let mut next = (x + 1) / 2;
    while next < x {
        x = next;
        next = (x + v / x) / 2;
    }
    x
}

/// A 3D vector of fixed-point components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vec3Fp {
    pub x: Fp,
    pub y: Fp,
    pub z: Fp,
}

impl Vec3Fp {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: Fp, y: Fp, z: Fp) -> Self {
        Self { x, y, z }
    }

    /// Plain integer scale (component * s)
    #[inline]
    pub fn scale(self, s: Fp) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Fixed-point scale ((component * s) >> SHIFT)
    #[inline]
    pub fn scale_fp(self, s: Fp) -> Self {
        Self::new(mul(self.x, s), mul(self.y, s), mul(self.z, s))
    }

    /// Dot product at ONE scale
    #[inline]
    pub fn dot(self, other: Self) -> Fp {
        let sum = self.x as i64 * other.x as i64
            + self.y as i64 * other.y as i64
            + self.z as i64 * other.z as i64;
        (sum >> SHIFT) as Fp
    }

    /// Cross product; for two ONE-scale unit vectors the result is ONE-scale
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            ((self.y as i64 * other.z as i64 - self.z as i64 * other.y as i64) >> SHIFT) as Fp,
            ((self.z as i64 * other.x as i64 - self.x as i64 * other.z as i64) >> SHIFT) as Fp,
            ((self.x as i64 * other.y as i64 - self.y as i64 * other.x as i64) >> SHIFT) as Fp,
        )
    }

    /// Euclidean length in the same units as the components
    pub fn length(self) -> Fp {
        let sq = self.x as i64 * self.x as i64
            + self.y as i64 * self.y as i64
            + self.z as i64 * self.z as i64;
        isqrt(sq) as Fp
    }

    /// Unit vector at ONE scale (magnitude 4096); zero input stays zero
    pub fn normalize(self) -> Self {
        let len = self.length() as i64;
        if len == 0 {
            return Self::ZERO;
        }
        Self::new(
            (((self.x as i64) << SHIFT) / len) as Fp,
            (((self.y as i64) << SHIFT) / len) as Fp,
            (((self.z as i64) << SHIFT) / len) as Fp,
        )
    }
}

impl std::ops::Add for Vec3Fp {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3Fp {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Neg for Vec3Fp {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::AddAssign for Vec3Fp {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

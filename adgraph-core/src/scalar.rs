use half::{bf16, f16};

/// Scalar trait is implemented for all value types a node can hold
pub trait Scalar:
    Copy + PartialOrd + core::fmt::Debug + core::fmt::Display + 'static
{
    /// From f64
    fn from_f64(t: f64) -> Self;
    /// Convert self into f64
    fn into_f64(self) -> f64;
    /// Get zero of Self
    fn zero() -> Self;
    /// Get one of Self
    fn one() -> Self;
    /// Neg
    fn neg(self) -> Self;
    /// Ln
    fn ln(self) -> Self;
    /// Add
    fn add(self, rhs: Self) -> Self;
    /// Sub
    fn sub(self, rhs: Self) -> Self;
    /// Mul
    fn mul(self, rhs: Self) -> Self;
    /// Div
    fn div(self, rhs: Self) -> Self;
    /// Pow
    fn pow(self, rhs: Self) -> Self;
    /// Very small value of scalar, very close to zero
    fn epsilon() -> Self;
    /// Comparison for scalars, checks for diffs > Self::epsilon()
    fn is_equal(self, rhs: Self) -> bool;

    /// Exactly zero
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

impl Scalar for f32 {
    fn from_f64(t: f64) -> Self {
        t as f32
    }

    fn into_f64(self) -> f64 {
        self as f64
    }

    fn zero() -> Self {
        0.
    }

    fn one() -> Self {
        1.
    }

    fn neg(self) -> Self {
        -self
    }

    fn ln(self) -> Self {
        f32::ln(self)
    }

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn div(self, rhs: Self) -> Self {
        self / rhs
    }

    fn pow(self, rhs: Self) -> Self {
        self.powf(rhs)
    }

    fn epsilon() -> Self {
        0.00001
    }

    fn is_equal(self, rhs: Self) -> bool {
        (self == -f32::INFINITY && rhs == -f32::INFINITY)
            || (self - rhs).abs() < Self::epsilon()
            || (self == f32::INFINITY && rhs == f32::INFINITY)
    }
}

impl Scalar for f64 {
    fn from_f64(t: f64) -> Self {
        t
    }

    fn into_f64(self) -> f64 {
        self
    }

    fn zero() -> Self {
        0.
    }

    fn one() -> Self {
        1.
    }

    fn neg(self) -> Self {
        -self
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn div(self, rhs: Self) -> Self {
        self / rhs
    }

    fn pow(self, rhs: Self) -> Self {
        self.powf(rhs)
    }

    fn epsilon() -> Self {
        0.00001
    }

    fn is_equal(self, rhs: Self) -> bool {
        (self == -f64::INFINITY && rhs == -f64::INFINITY)
            || (self - rhs).abs() < Self::epsilon()
            || (self == f64::INFINITY && rhs == f64::INFINITY)
    }
}

// Half precision types compute in f32 and round back.
macro_rules! impl_half_scalar {
    ($t:ty, $eps:expr) => {
        impl Scalar for $t {
            fn from_f64(t: f64) -> Self {
                <$t>::from_f64(t)
            }

            fn into_f64(self) -> f64 {
                self.to_f64()
            }

            fn zero() -> Self {
                <$t>::ZERO
            }

            fn one() -> Self {
                <$t>::ONE
            }

            fn neg(self) -> Self {
                <$t>::from_f32(-self.to_f32())
            }

            fn ln(self) -> Self {
                <$t>::from_f32(self.to_f32().ln())
            }

            fn add(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() + rhs.to_f32())
            }

            fn sub(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() - rhs.to_f32())
            }

            fn mul(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() * rhs.to_f32())
            }

            fn div(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() / rhs.to_f32())
            }

            fn pow(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32().powf(rhs.to_f32()))
            }

            fn epsilon() -> Self {
                <$t>::from_f32($eps)
            }

            fn is_equal(self, rhs: Self) -> bool {
                (self.to_f32() - rhs.to_f32()).abs() < $eps
            }

            fn is_zero(self) -> bool {
                self.to_f32() == 0.
            }
        }
    };
}

impl_half_scalar!(f16, 0.01);
impl_half_scalar!(bf16, 0.05);

//! # Numeric Coercion Intermediate
//!
//! [`Numeric`] is what the numeric coercion family produces: a number the
//! primitive getters narrow to their own width. Narrowing happens here,
//! once, with the same documented semantics for every caller:
//!
//! - integer-to-integer narrowing wraps (two's complement, Rust `as`)
//! - float-to-integer conversion truncates toward zero and saturates at the
//!   target range; NaN becomes zero
//! - integer-to-float and float-to-float use the nearest representable value
//! - decimals truncate toward zero for integer targets and round through
//!   f64 for float targets
//!
//! No overflow is reported at this layer.

use super::Decimal;

/// A dynamically-typed number produced by numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
}

impl Numeric {
    pub fn as_i8(self) -> i8 {
        match self {
            Numeric::Int(i) => i as i8,
            Numeric::Float(f) => f as i8,
            Numeric::Decimal(d) => d.trunc_i64() as i8,
        }
    }

    pub fn as_i16(self) -> i16 {
        match self {
            Numeric::Int(i) => i as i16,
            Numeric::Float(f) => f as i16,
            Numeric::Decimal(d) => d.trunc_i64() as i16,
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            Numeric::Int(i) => i as i32,
            Numeric::Float(f) => f as i32,
            Numeric::Decimal(d) => d.trunc_i64() as i32,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Numeric::Int(i) => i,
            Numeric::Float(f) => f as i64,
            Numeric::Decimal(d) => d.trunc_i64(),
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Numeric::Int(i) => i as f32,
            Numeric::Float(f) => f as f32,
            Numeric::Decimal(d) => d.to_f64() as f32,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
            Numeric::Decimal(d) => d.to_f64(),
        }
    }
}

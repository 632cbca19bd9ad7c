//! # Coercion Dispatcher
//!
//! Three independent coercion families convert a freshly extracted
//! [`CellValue`] into the representation a typed accessor requested:
//!
//! 1. [`coerce`]: generic family for object-like targets. NULL passes
//!    through unchanged; otherwise the result is exactly the target's
//!    variant or a `TypeMismatch` naming both the actual and the requested
//!    type.
//! 2. [`coerce_numeric`]: numeric family used only by the primitive
//!    getters. NULL becomes `None` (the caller substitutes the zero of its
//!    width); everything else becomes a [`Numeric`] whose truncating
//!    extractors perform the final narrowing.
//! 3. [`coerce_calendrical`]: temporal family used only by the
//!    calendar-taking getters. Instants are shifted into the calendar's
//!    wall clock before date or time-of-day fields are derived.
//!
//! ## Generic Conversion Matrix
//!
//! | Target | Accepted sources |
//! |--------|------------------|
//! | boolean | boolean; integers (nonzero is true); text `true`/`false` |
//! | int1..int8 | same or narrower integer; text (parsed) |
//! | float4 | float4; integers; text |
//! | float8 | float8, float4; integers; decimal; text |
//! | decimal | decimal; integers; text |
//! | text | text; bytes (UTF-8 validated); any scalar rendering |
//! | bytes | bytes; text (UTF-8 bytes) |
//! | date/time | same; derived from timestamp or timestamptz |
//! | timestamp | same; date (midnight); timestamptz (instant) |
//! | timestamptz | same; timestamp (zero offset) |
//! | array, ref | same variant only |
//! | url | url; text (parsed) |
//!
//! Anything else fails with `TypeMismatch`. Parse failures of text sources
//! are also reported as `TypeMismatch`, since the text cannot produce an
//! instance of the requested type.

use crate::error::AccessError;
use crate::types::{
    Calendar, CellValue, Decimal, Numeric, TargetType, Timestamp, TimestampTz, MICROS_PER_DAY,
};
use eyre::{bail, Result};

/// Generic coercion of `value` to `target`. Returns NULL unchanged;
/// otherwise the result is exactly the target's variant.
pub fn coerce(target: TargetType, value: CellValue) -> Result<CellValue> {
    if value.is_null() {
        return Ok(CellValue::Null);
    }
    let actual = value.type_name();
    let mismatch = || AccessError::type_mismatch(actual, target.name());

    match target {
        TargetType::Bool => match value {
            CellValue::Bool(b) => Ok(CellValue::Bool(b)),
            CellValue::Int1(i) => Ok(CellValue::Bool(i != 0)),
            CellValue::Int2(i) => Ok(CellValue::Bool(i != 0)),
            CellValue::Int4(i) => Ok(CellValue::Bool(i != 0)),
            CellValue::Int8(i) => Ok(CellValue::Bool(i != 0)),
            CellValue::Text(s) => {
                let t = s.trim();
                if t.eq_ignore_ascii_case("true") {
                    Ok(CellValue::Bool(true))
                } else if t.eq_ignore_ascii_case("false") {
                    Ok(CellValue::Bool(false))
                } else {
                    bail!(mismatch())
                }
            }
            _ => bail!(mismatch()),
        },
        TargetType::Int1 => match value {
            CellValue::Int1(i) => Ok(CellValue::Int1(i)),
            CellValue::Text(s) => match s.trim().parse::<i8>() {
                Ok(i) => Ok(CellValue::Int1(i)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
        TargetType::Int2 => match value {
            CellValue::Int1(i) => Ok(CellValue::Int2(i as i16)),
            CellValue::Int2(i) => Ok(CellValue::Int2(i)),
            CellValue::Text(s) => match s.trim().parse::<i16>() {
                Ok(i) => Ok(CellValue::Int2(i)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
        TargetType::Int4 => match value {
            CellValue::Int1(i) => Ok(CellValue::Int4(i as i32)),
            CellValue::Int2(i) => Ok(CellValue::Int4(i as i32)),
            CellValue::Int4(i) => Ok(CellValue::Int4(i)),
            CellValue::Text(s) => match s.trim().parse::<i32>() {
                Ok(i) => Ok(CellValue::Int4(i)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
        TargetType::Int8 => match value {
            CellValue::Int1(i) => Ok(CellValue::Int8(i as i64)),
            CellValue::Int2(i) => Ok(CellValue::Int8(i as i64)),
            CellValue::Int4(i) => Ok(CellValue::Int8(i as i64)),
            CellValue::Int8(i) => Ok(CellValue::Int8(i)),
            CellValue::Text(s) => match s.trim().parse::<i64>() {
                Ok(i) => Ok(CellValue::Int8(i)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
        TargetType::Float4 => match value {
            CellValue::Float4(x) => Ok(CellValue::Float4(x)),
            CellValue::Int1(i) => Ok(CellValue::Float4(i as f32)),
            CellValue::Int2(i) => Ok(CellValue::Float4(i as f32)),
            CellValue::Int4(i) => Ok(CellValue::Float4(i as f32)),
            CellValue::Int8(i) => Ok(CellValue::Float4(i as f32)),
            CellValue::Text(s) => match s.trim().parse::<f32>() {
                Ok(x) => Ok(CellValue::Float4(x)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
        TargetType::Float8 => match value {
            CellValue::Float8(x) => Ok(CellValue::Float8(x)),
            CellValue::Float4(x) => Ok(CellValue::Float8(x as f64)),
            CellValue::Int1(i) => Ok(CellValue::Float8(i as f64)),
            CellValue::Int2(i) => Ok(CellValue::Float8(i as f64)),
            CellValue::Int4(i) => Ok(CellValue::Float8(i as f64)),
            CellValue::Int8(i) => Ok(CellValue::Float8(i as f64)),
            CellValue::Decimal(d) => Ok(CellValue::Float8(d.to_f64())),
            CellValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(x) => Ok(CellValue::Float8(x)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
        TargetType::Decimal => match value {
            CellValue::Decimal(d) => Ok(CellValue::Decimal(d)),
            CellValue::Int1(i) => Ok(CellValue::Decimal(Decimal::from_i64(i as i64))),
            CellValue::Int2(i) => Ok(CellValue::Decimal(Decimal::from_i64(i as i64))),
            CellValue::Int4(i) => Ok(CellValue::Decimal(Decimal::from_i64(i as i64))),
            CellValue::Int8(i) => Ok(CellValue::Decimal(Decimal::from_i64(i))),
            CellValue::Text(s) => match s.trim().parse::<Decimal>() {
                Ok(d) => Ok(CellValue::Decimal(d)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
        TargetType::Text => match value {
            CellValue::Text(s) => Ok(CellValue::Text(s)),
            CellValue::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => Ok(CellValue::Text(s)),
                Err(_) => bail!(mismatch()),
            },
            CellValue::Array(_) | CellValue::Ref(_) => bail!(mismatch()),
            other => Ok(CellValue::Text(other.to_string())),
        },
        TargetType::Bytes => match value {
            CellValue::Bytes(b) => Ok(CellValue::Bytes(b)),
            CellValue::Text(s) => Ok(CellValue::Bytes(s.into_bytes())),
            _ => bail!(mismatch()),
        },
        TargetType::Date => match value {
            CellValue::Date(d) => Ok(CellValue::Date(d)),
            CellValue::Timestamp(ts) => Ok(CellValue::Date(ts.date())),
            CellValue::TimestampTz(tz) => Ok(CellValue::Date(tz.instant().date())),
            _ => bail!(mismatch()),
        },
        TargetType::Time => match value {
            CellValue::Time(t) => Ok(CellValue::Time(t)),
            CellValue::Timestamp(ts) => Ok(CellValue::Time(ts.time())),
            CellValue::TimestampTz(tz) => Ok(CellValue::Time(tz.instant().time())),
            _ => bail!(mismatch()),
        },
        TargetType::Timestamp => match value {
            CellValue::Timestamp(ts) => Ok(CellValue::Timestamp(ts)),
            CellValue::Date(d) => Ok(CellValue::Timestamp(Timestamp::from_micros(
                d.days() as i64 * MICROS_PER_DAY,
            ))),
            CellValue::TimestampTz(tz) => Ok(CellValue::Timestamp(tz.instant())),
            _ => bail!(mismatch()),
        },
        TargetType::TimestampTz => match value {
            CellValue::TimestampTz(tz) => Ok(CellValue::TimestampTz(tz)),
            CellValue::Timestamp(ts) => {
                Ok(CellValue::TimestampTz(TimestampTz::new(ts.micros(), 0)))
            }
            _ => bail!(mismatch()),
        },
        TargetType::Array => match value {
            CellValue::Array(items) => Ok(CellValue::Array(items)),
            _ => bail!(mismatch()),
        },
        TargetType::Ref => match value {
            CellValue::Ref(r) => Ok(CellValue::Ref(r)),
            _ => bail!(mismatch()),
        },
        TargetType::Url => match value {
            CellValue::Url(u) => Ok(CellValue::Url(u)),
            CellValue::Text(s) => match url::Url::parse(s.trim()) {
                Ok(u) => Ok(CellValue::Url(u)),
                Err(_) => bail!(mismatch()),
            },
            _ => bail!(mismatch()),
        },
    }
}

/// Numeric coercion for the primitive getters. NULL becomes `None`; any
/// non-numeric, non-parseable value is a `TypeMismatch` against `target`.
pub fn coerce_numeric(target: TargetType, value: CellValue) -> Result<Option<Numeric>> {
    let actual = value.type_name();
    match value {
        CellValue::Null => Ok(None),
        CellValue::Bool(b) => Ok(Some(Numeric::Int(if b { 1 } else { 0 }))),
        CellValue::Int1(i) => Ok(Some(Numeric::Int(i as i64))),
        CellValue::Int2(i) => Ok(Some(Numeric::Int(i as i64))),
        CellValue::Int4(i) => Ok(Some(Numeric::Int(i as i64))),
        CellValue::Int8(i) => Ok(Some(Numeric::Int(i))),
        CellValue::Float4(x) => Ok(Some(Numeric::Float(x as f64))),
        CellValue::Float8(x) => Ok(Some(Numeric::Float(x))),
        CellValue::Decimal(d) => Ok(Some(Numeric::Decimal(d))),
        CellValue::Text(s) => {
            let t = s.trim();
            if let Ok(i) = t.parse::<i64>() {
                Ok(Some(Numeric::Int(i)))
            } else if let Ok(x) = t.parse::<f64>() {
                Ok(Some(Numeric::Float(x)))
            } else {
                bail!(AccessError::type_mismatch(actual, target.name()))
            }
        }
        _ => bail!(AccessError::type_mismatch(actual, target.name())),
    }
}

/// Calendrical coercion for the calendar-taking temporal getters.
///
/// `calendar` supplies the zone whose wall clock the result is expressed
/// in: instants are shifted by the zone offset before date or time-of-day
/// fields are derived. `Date` and `Time` values carry no instant and pass
/// through the generic family untouched.
pub fn coerce_calendrical(
    target: TargetType,
    value: CellValue,
    calendar: &Calendar,
) -> Result<CellValue> {
    let actual = value.type_name();
    match value {
        CellValue::Null => Ok(CellValue::Null),
        CellValue::Timestamp(ts) => wall_clock(target, ts.micros() + calendar.offset_micros(), actual),
        CellValue::TimestampTz(tz) => {
            wall_clock(target, tz.micros + calendar.offset_micros(), actual)
        }
        CellValue::Date(_) | CellValue::Time(_) => coerce(target, value),
        _ => bail!(AccessError::type_mismatch(actual, target.name())),
    }
}

/// Derives the requested temporal field from shifted wall-clock micros.
fn wall_clock(target: TargetType, micros: i64, actual: &'static str) -> Result<CellValue> {
    let wall = Timestamp::from_micros(micros);
    match target {
        TargetType::Date => Ok(CellValue::Date(wall.date())),
        TargetType::Time => Ok(CellValue::Time(wall.time())),
        TargetType::Timestamp => Ok(CellValue::Timestamp(wall)),
        _ => bail!(AccessError::type_mismatch(actual, target.name())),
    }
}

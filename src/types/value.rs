//! # Dynamically-Typed Column Values
//!
//! [`CellValue`] is the tagged union produced by one column extraction. A
//! fresh value is materialized per accessor call and owns all of its data;
//! nothing is cached across calls at this layer.
//!
//! ## Variants
//!
//! | Variant | Rust Type | Description |
//! |---------|-----------|-------------|
//! | Null | - | SQL NULL |
//! | Bool | bool | boolean |
//! | Int1/Int2/Int4/Int8 | i8..i64 | exact integers by width |
//! | Float4/Float8 | f32/f64 | binary floating point |
//! | Decimal | Decimal | exact decimal |
//! | Text | String | UTF-8 string |
//! | Bytes | Vec\<u8\> | binary data |
//! | Date/Time/Timestamp/TimestampTz | temporal | see `types::temporal` |
//! | Array | Vec\<CellValue\> | value array |
//! | Ref | RowRef | opaque row reference |
//! | Url | url::Url | parsed URL |
//!
//! Large-object handles do not appear here: blob and clob data normalize to
//! `Bytes` and `Text` at the row-source boundary, and the accessor facade
//! derives streaming wrappers from those on demand.
//!
//! The `Display` rendering is what the generic coercion family uses when a
//! caller requests text from a non-text value.

use super::{Date, Decimal, Time, Timestamp, TimestampTz};
use std::fmt;
use url::Url;

/// Opaque reference handle to another row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRef(pub u64);

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// The dynamically-typed result of reading one column of the current row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int1(i8),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Date(Date),
    Time(Time),
    Timestamp(Timestamp),
    TimestampTz(TimestampTz),
    Array(Vec<CellValue>),
    Ref(RowRef),
    Url(Url),
}

impl CellValue {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Lowercase name used in coercion error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "boolean",
            CellValue::Int1(_) => "int1",
            CellValue::Int2(_) => "int2",
            CellValue::Int4(_) => "int4",
            CellValue::Int8(_) => "int8",
            CellValue::Float4(_) => "float4",
            CellValue::Float8(_) => "float8",
            CellValue::Decimal(_) => "decimal",
            CellValue::Text(_) => "text",
            CellValue::Bytes(_) => "bytes",
            CellValue::Date(_) => "date",
            CellValue::Time(_) => "time",
            CellValue::Timestamp(_) => "timestamp",
            CellValue::TimestampTz(_) => "timestamptz",
            CellValue::Array(_) => "array",
            CellValue::Ref(_) => "ref",
            CellValue::Url(_) => "url",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int1(i) => write!(f, "{}", i),
            CellValue::Int2(i) => write!(f, "{}", i),
            CellValue::Int4(i) => write!(f, "{}", i),
            CellValue::Int8(i) => write!(f, "{}", i),
            CellValue::Float4(x) => write!(f, "{}", x),
            CellValue::Float8(x) => write!(f, "{}", x),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bytes(b) => {
                write!(f, "\\x")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Time(t) => write!(f, "{}", t),
            CellValue::Timestamp(ts) => write!(f, "{}", ts),
            CellValue::TimestampTz(tz) => write!(f, "{}", tz),
            CellValue::Array(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            CellValue::Ref(r) => write!(f, "{}", r),
            CellValue::Url(u) => write!(f, "{}", u),
        }
    }
}

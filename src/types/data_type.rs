//! # Requested Type Descriptor
//!
//! [`TargetType`] names every representation a caller of the typed accessor
//! surface can request. It drives branch selection in the coercion
//! dispatcher and is passed down to the row source as an optional extraction
//! hint.
//!
//! ## Discriminant Grouping
//!
//! Discriminants are grouped by category:
//! - 0-6: primitives (bool, integer widths, float widths)
//! - 10-11: exact decimal and text
//! - 12: byte sequence
//! - 20-23: temporal kinds
//! - 30-32: structured kinds (array, ref, url)

/// Identifies the target representation of one typed accessor call.
///
/// Uses `#[repr(u8)]` so a descriptor fits in a single byte when a row
/// source wants to record or forward the hint.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Bool = 0,
    Int1 = 1,
    Int2 = 2,
    Int4 = 3,
    Int8 = 4,
    Float4 = 5,
    Float8 = 6,
    Decimal = 10,
    Text = 11,
    Bytes = 12,
    Date = 20,
    Time = 21,
    Timestamp = 22,
    TimestampTz = 23,
    Array = 30,
    Ref = 31,
    Url = 32,
}

impl TargetType {
    /// Lowercase name used in coercion error messages.
    pub fn name(self) -> &'static str {
        match self {
            TargetType::Bool => "boolean",
            TargetType::Int1 => "int1",
            TargetType::Int2 => "int2",
            TargetType::Int4 => "int4",
            TargetType::Int8 => "int8",
            TargetType::Float4 => "float4",
            TargetType::Float8 => "float8",
            TargetType::Decimal => "decimal",
            TargetType::Text => "text",
            TargetType::Bytes => "bytes",
            TargetType::Date => "date",
            TargetType::Time => "time",
            TargetType::Timestamp => "timestamp",
            TargetType::TimestampTz => "timestamptz",
            TargetType::Array => "array",
            TargetType::Ref => "ref",
            TargetType::Url => "url",
        }
    }

    /// True for the targets served by the numeric coercion family.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TargetType::Int1
                | TargetType::Int2
                | TargetType::Int4
                | TargetType::Int8
                | TargetType::Float4
                | TargetType::Float8
        )
    }

    /// True for the targets served by the calendrical coercion family.
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            TargetType::Date | TargetType::Time | TargetType::Timestamp | TargetType::TimestampTz
        )
    }
}

//! # Row Source and Typed Accessor Facade
//!
//! This module is the extraction core of the crate. [`RowSource`] is the
//! single abstract extension point a concrete row cursor implements: fetch
//! the raw value of one 1-based column (optionally informed by the
//! requested type) and store a normalized value back. [`RowAccessor`]
//! builds the entire typed getter/updater surface on top of that one pair
//! of operations.
//!
//! [`FromCell`] is the instance-check boundary for the strictly typed
//! getter: after coercion, the result must be NULL or exactly the variant
//! the requested Rust type maps to. There is no silent narrowing on this
//! path.

mod accessor;
#[cfg(test)]
mod tests;

pub use accessor::RowAccessor;

use crate::error::AccessError;
use crate::types::{
    CellValue, Date, Decimal, RowRef, TargetType, Time, Timestamp, TimestampTz,
};
use eyre::{bail, Result};
use std::collections::HashMap;
use url::Url;

/// Caller-supplied type-name mapping. Accepted for signature compatibility
/// only: any non-null map is rejected with the unsupported-feature kind.
pub type TypeMap = HashMap<String, TargetType>;

/// Column metadata descriptor. No built-in source provides one yet;
/// [`RowAccessor::metadata`] always reports unsupported.
// TODO: surface column names and declared types once RowSource exposes them.
#[derive(Debug)]
pub struct RowMetadata {}

/// Capability interface over the current row of an external cursor.
///
/// Columns are addressed by 1-based position. Row advancement, column
/// metadata, and transaction state belong to the cursor itself and are not
/// part of this contract.
pub trait RowSource {
    /// Fetches the raw value of `column`, optionally informed by the type
    /// the caller requested. The hint never constrains the returned
    /// variant; the coercion dispatcher enforces the requested type.
    ///
    /// Untyped extraction is `extract(column, None)` and must yield exactly
    /// the value a hinted call with no hint would yield.
    fn extract(&mut self, column: usize, target: Option<TargetType>) -> Result<CellValue>;

    /// Stores a normalized value into `column` of the current row.
    fn update(&mut self, column: usize, value: CellValue) -> Result<()>;
}

/// Conversion out of a coerced [`CellValue`] into a concrete Rust type.
///
/// `TARGET` names the descriptor the accessor passes to coercion;
/// `from_cell` performs the strict instance check on the coerced result.
pub trait FromCell: Sized {
    const TARGET: TargetType;

    fn from_cell(cell: CellValue) -> Result<Option<Self>>;
}

macro_rules! from_cell {
    ($ty:ty, $target:ident, $variant:ident) => {
        impl FromCell for $ty {
            const TARGET: TargetType = TargetType::$target;

            fn from_cell(cell: CellValue) -> Result<Option<Self>> {
                match cell {
                    CellValue::Null => Ok(None),
                    CellValue::$variant(v) => Ok(Some(v)),
                    other => bail!(AccessError::type_mismatch(
                        other.type_name(),
                        TargetType::$target.name()
                    )),
                }
            }
        }
    };
}

from_cell!(bool, Bool, Bool);
from_cell!(i8, Int1, Int1);
from_cell!(i16, Int2, Int2);
from_cell!(i32, Int4, Int4);
from_cell!(i64, Int8, Int8);
from_cell!(f32, Float4, Float4);
from_cell!(f64, Float8, Float8);
from_cell!(Decimal, Decimal, Decimal);
from_cell!(String, Text, Text);
from_cell!(Vec<u8>, Bytes, Bytes);
from_cell!(Date, Date, Date);
from_cell!(Time, Time, Time);
from_cell!(Timestamp, Timestamp, Timestamp);
from_cell!(TimestampTz, TimestampTz, TimestampTz);
from_cell!(Vec<CellValue>, Array, Array);
from_cell!(RowRef, Ref, Ref);
from_cell!(Url, Url, Url);

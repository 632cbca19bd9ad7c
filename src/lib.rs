//! # rowcast - Typed Row-Value Access Layer
//!
//! rowcast exposes uniform, type-safe accessors over any row-oriented data
//! source addressed by 1-based column position. A source implements one
//! extraction operation and one generic update operation; everything else
//! (~40 typed getters and updaters across booleans, integer and float
//! widths, decimals, text, bytes, temporal values, large-object wrappers,
//! arrays, refs, and URLs) is built on top of that pair.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowcast::{CellValue, RowAccessor, RowSource};
//!
//! let mut row = RowAccessor::new(my_cursor_row);
//!
//! let id = row.get_i64(1)?;
//! let name = row.get_string(2)?;          // None on NULL
//! if row.was_null() { /* column 2 was NULL */ }
//!
//! row.update_string(2, "renamed")?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Typed Accessor Facade (RowAccessor)    │
//! │   get_bool .. get_url, update_* ...      │
//! ├─────────────────────────────────────────┤
//! │   Coercion Dispatcher (coerce)           │
//! │   generic | numeric | calendrical        │
//! ├─────────────────────────────────────────┤
//! │   Extraction Core (RowSource)            │
//! │   extract(column, hint) / update(column) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Every getter funnels through a canonical extraction wrapper that records
//! the was-null flag, hands the fresh [`CellValue`] to exactly one coercion
//! family, and applies the type's null substitution (zero for primitives,
//! `None` for object types). Every updater normalizes its argument to a
//! `CellValue` and forwards to the one generic update primitive.
//!
//! ## Concurrency
//!
//! Accessors take `&mut self` and complete synchronously; the was-null flag
//! and the cursor position beneath the source are unsynchronized state, so
//! a row is single-threaded by construction. No locks, retries, or
//! timeouts.
//!
//! ## Module Overview
//!
//! - [`types`]: `CellValue`, `TargetType`, and the value types they carry
//! - [`coerce`]: the three coercion families
//! - [`row`]: the `RowSource` extension point and the accessor facade
//! - [`lob`]: blob/clob wrappers with declared-length stream support
//! - [`error`]: the `AccessError` taxonomy carried inside `eyre` reports

pub mod coerce;
pub mod error;
pub mod lob;
pub mod row;
pub mod types;

pub use error::AccessError;
pub use lob::{BlobValue, ClobValue};
pub use row::{FromCell, RowAccessor, RowMetadata, RowSource, TypeMap};
pub use types::{
    Calendar, CellValue, Date, Decimal, Numeric, RowRef, TargetType, Time, Timestamp, TimestampTz,
};

//! # Unified Type System for Row Access
//!
//! This module provides the canonical value and type-descriptor definitions
//! shared by the extraction core, the coercion dispatcher, and the typed
//! accessor facade.
//!
//! ## Module Structure
//!
//! - `data_type`: [`TargetType`], the requested-type descriptor
//! - `value`: [`CellValue`], the dynamically-typed column value
//! - `numeric`: [`Numeric`], the numeric-coercion result with truncating
//!   width extractors
//! - `temporal`: [`Date`], [`Time`], [`Timestamp`], [`TimestampTz`] and the
//!   [`Calendar`] zone context
//! - `decimal`: [`Decimal`], exact decimal as unscaled digits plus scale
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `TargetType` | Identifies the representation a caller requested |
//! | `CellValue` | Tagged union produced by one column extraction |
//! | `Numeric` | Intermediate number for the primitive getters |
//! | `Decimal` | 128-bit unscaled digits with a decimal scale |
//! | `RowRef` | Opaque reference handle to another row |

mod data_type;
mod decimal;
mod numeric;
mod temporal;
mod value;

pub use data_type::TargetType;
pub use decimal::Decimal;
pub use numeric::Numeric;
pub use temporal::{Calendar, Date, Time, Timestamp, TimestampTz, MICROS_PER_DAY, MICROS_PER_SEC};
pub use value::{CellValue, RowRef};

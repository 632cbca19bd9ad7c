//! # Typed Accessor Facade
//!
//! [`RowAccessor`] implements the full typed getter/updater surface over
//! one [`RowSource`]. Every getter funnels through a canonical extraction
//! wrapper ([`RowAccessor::get_object`] or the strictly typed
//! [`RowAccessor::get`]) or through the numeric path; those are the only
//! mutators of the was-null flag, so [`RowAccessor::was_null`] is correct
//! no matter which public accessor ran last. Every updater normalizes its
//! argument into a [`CellValue`] and forwards to the one generic update
//! primitive.
//!
//! The accessor is stateless apart from the flag. It takes `&mut self` on
//! every call: the flag and the underlying cursor position are
//! unsynchronized, and a row may not be accessed from two threads at once.

use crate::coerce;
use crate::error::AccessError;
use crate::lob::{BlobValue, ClobValue};
use crate::row::{FromCell, RowMetadata, RowSource, TypeMap};
use crate::types::{
    Calendar, CellValue, Date, Decimal, RowRef, TargetType, Time, Timestamp, TimestampTz,
};
use eyre::{bail, Result};
use std::io::Read;
use tracing::trace;
use url::Url;

/// Typed accessor surface over the current row of a [`RowSource`].
#[derive(Debug)]
pub struct RowAccessor<S: RowSource> {
    source: S,
    was_null: bool,
}

impl<S: RowSource> RowAccessor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            was_null: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// True if the most recent extraction on this accessor produced NULL.
    /// Valid only immediately after a getter call; the next getter
    /// overwrites it.
    pub fn was_null(&self) -> bool {
        self.was_null
    }

    /// Warnings are not collected; this is a no-op.
    pub fn clear_warnings(&mut self) {}

    /// Always empty; warnings are not collected.
    pub fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    // ************************************************************
    // Canonical extraction wrappers
    // ************************************************************

    /// Untyped extraction of `column`. Records the was-null flag.
    pub fn get_object(&mut self, column: usize) -> Result<CellValue> {
        let value = self.source.extract(column, None)?;
        self.was_null = value.is_null();
        trace!(column, null = self.was_null, "column extracted");
        Ok(value)
    }

    /// Untyped extraction with a caller-supplied type map. Any non-null map
    /// is rejected with the unsupported-feature kind; a null map behaves
    /// exactly like [`RowAccessor::get_object`].
    pub fn get_object_mapped(
        &mut self,
        column: usize,
        type_map: Option<&TypeMap>,
    ) -> Result<CellValue> {
        if type_map.is_some() {
            bail!(AccessError::unsupported(
                "obtaining values using an explicit type map"
            ));
        }
        self.get_object(column)
    }

    /// Strictly typed extraction of `column`. Records the was-null flag,
    /// then coerces and enforces that the result is NULL or a true `T`;
    /// anything else is a type-mismatch failure, never a silent cast.
    pub fn get<T: FromCell>(&mut self, column: usize) -> Result<Option<T>> {
        let raw = self.source.extract(column, Some(T::TARGET))?;
        self.was_null = raw.is_null();
        let coerced = coerce::coerce(T::TARGET, raw)?;
        T::from_cell(coerced)
    }

    // ************************************************************
    // Getters by column position
    // ************************************************************

    /// Reads a boolean, substituting `false` for NULL.
    pub fn get_bool(&mut self, column: usize) -> Result<bool> {
        let value = self.value_as(column, TargetType::Bool)?;
        Ok(FromCell::from_cell(value)?.unwrap_or(false))
    }

    /// Reads an 8-bit integer, substituting `0` for NULL.
    pub fn get_i8(&mut self, column: usize) -> Result<i8> {
        Ok(self
            .number(column, TargetType::Int1)?
            .map_or(0, |n| n.as_i8()))
    }

    /// Reads a 16-bit integer, substituting `0` for NULL.
    pub fn get_i16(&mut self, column: usize) -> Result<i16> {
        Ok(self
            .number(column, TargetType::Int2)?
            .map_or(0, |n| n.as_i16()))
    }

    /// Reads a 32-bit integer, substituting `0` for NULL.
    pub fn get_i32(&mut self, column: usize) -> Result<i32> {
        Ok(self
            .number(column, TargetType::Int4)?
            .map_or(0, |n| n.as_i32()))
    }

    /// Reads a 64-bit integer, substituting `0` for NULL.
    pub fn get_i64(&mut self, column: usize) -> Result<i64> {
        Ok(self
            .number(column, TargetType::Int8)?
            .map_or(0, |n| n.as_i64()))
    }

    /// Reads a 32-bit float, substituting `0.0` for NULL.
    pub fn get_f32(&mut self, column: usize) -> Result<f32> {
        Ok(self
            .number(column, TargetType::Float4)?
            .map_or(0.0, |n| n.as_f32()))
    }

    /// Reads a 64-bit float, substituting `0.0` for NULL.
    pub fn get_f64(&mut self, column: usize) -> Result<f64> {
        Ok(self
            .number(column, TargetType::Float8)?
            .map_or(0.0, |n| n.as_f64()))
    }

    pub fn get_decimal(&mut self, column: usize) -> Result<Option<Decimal>> {
        let value = self.value_as(column, TargetType::Decimal)?;
        FromCell::from_cell(value)
    }

    pub fn get_string(&mut self, column: usize) -> Result<Option<String>> {
        let value = self.value_as(column, TargetType::Text)?;
        FromCell::from_cell(value)
    }

    pub fn get_bytes(&mut self, column: usize) -> Result<Option<Vec<u8>>> {
        let value = self.value_as(column, TargetType::Bytes)?;
        FromCell::from_cell(value)
    }

    pub fn get_date(&mut self, column: usize) -> Result<Option<Date>> {
        let value = self.value_as(column, TargetType::Date)?;
        FromCell::from_cell(value)
    }

    /// Reads a date expressed in `calendar`'s wall clock.
    pub fn get_date_with(&mut self, column: usize, calendar: &Calendar) -> Result<Option<Date>> {
        let value = self.value_as_with(column, TargetType::Date, calendar)?;
        FromCell::from_cell(value)
    }

    pub fn get_time(&mut self, column: usize) -> Result<Option<Time>> {
        let value = self.value_as(column, TargetType::Time)?;
        FromCell::from_cell(value)
    }

    /// Reads a time of day expressed in `calendar`'s wall clock.
    pub fn get_time_with(&mut self, column: usize, calendar: &Calendar) -> Result<Option<Time>> {
        let value = self.value_as_with(column, TargetType::Time, calendar)?;
        FromCell::from_cell(value)
    }

    pub fn get_timestamp(&mut self, column: usize) -> Result<Option<Timestamp>> {
        let value = self.value_as(column, TargetType::Timestamp)?;
        FromCell::from_cell(value)
    }

    /// Reads a timestamp shifted into `calendar`'s wall clock.
    pub fn get_timestamp_with(
        &mut self,
        column: usize,
        calendar: &Calendar,
    ) -> Result<Option<Timestamp>> {
        let value = self.value_as_with(column, TargetType::Timestamp, calendar)?;
        FromCell::from_cell(value)
    }

    pub fn get_array(&mut self, column: usize) -> Result<Option<Vec<CellValue>>> {
        let value = self.value_as(column, TargetType::Array)?;
        FromCell::from_cell(value)
    }

    pub fn get_ref(&mut self, column: usize) -> Result<Option<RowRef>> {
        let value = self.value_as(column, TargetType::Ref)?;
        FromCell::from_cell(value)
    }

    pub fn get_url(&mut self, column: usize) -> Result<Option<Url>> {
        let value = self.value_as(column, TargetType::Url)?;
        FromCell::from_cell(value)
    }

    /// Reads the column's bytes wrapped as a blob, `None` on NULL.
    pub fn get_blob(&mut self, column: usize) -> Result<Option<BlobValue>> {
        Ok(self.get_bytes(column)?.map(BlobValue::from_bytes))
    }

    /// Reads the column's text wrapped as a clob, `None` on NULL.
    pub fn get_clob(&mut self, column: usize) -> Result<Option<ClobValue>> {
        Ok(self.get_string(column)?.map(ClobValue::from_string))
    }

    /// Binary stream over the column's bytes, `None` on NULL.
    pub fn get_binary_stream(&mut self, column: usize) -> Result<Option<Box<dyn Read>>> {
        Ok(self.get_blob(column)?.map(BlobValue::binary_stream))
    }

    /// US-ASCII stream over the column's text, `None` on NULL.
    pub fn get_ascii_stream(&mut self, column: usize) -> Result<Option<Box<dyn Read>>> {
        match self.get_clob(column)? {
            None => Ok(None),
            Some(clob) => Ok(Some(clob.ascii_stream()?)),
        }
    }

    /// Character (UTF-8) stream over the column's text, `None` on NULL.
    pub fn get_character_stream(&mut self, column: usize) -> Result<Option<Box<dyn Read>>> {
        match self.get_clob(column)? {
            None => Ok(None),
            Some(clob) => Ok(Some(clob.character_stream()?)),
        }
    }

    // ************************************************************
    // Unsupported legacy operations
    // ************************************************************

    /// Scaled decimal retrieval is not supported.
    pub fn get_decimal_scaled(&mut self, _column: usize, _scale: i32) -> Result<Option<Decimal>> {
        bail!(AccessError::unsupported("get_decimal with explicit scale"))
    }

    /// Legacy Unicode stream retrieval is not supported.
    pub fn get_unicode_stream(&mut self, _column: usize) -> Result<Option<Box<dyn Read>>> {
        bail!(AccessError::unsupported("unicode stream retrieval"))
    }

    /// Row metadata is not yet provided by any source.
    pub fn metadata(&self) -> Result<RowMetadata> {
        bail!(AccessError::unsupported("row metadata"))
    }

    /// Refresh row is not supported.
    pub fn refresh_row(&mut self) -> Result<()> {
        bail!(AccessError::unsupported("refresh row"))
    }

    // ************************************************************
    // Updaters by column position
    // ************************************************************

    /// Generic update primitive; every typed updater forwards here.
    pub fn update_object(&mut self, column: usize, value: CellValue) -> Result<()> {
        trace!(column, kind = value.type_name(), "column updated");
        self.source.update(column, value)
    }

    pub fn update_null(&mut self, column: usize) -> Result<()> {
        self.update_object(column, CellValue::Null)
    }

    pub fn update_bool(&mut self, column: usize, x: bool) -> Result<()> {
        self.update_object(column, CellValue::Bool(x))
    }

    pub fn update_i8(&mut self, column: usize, x: i8) -> Result<()> {
        self.update_object(column, CellValue::Int1(x))
    }

    pub fn update_i16(&mut self, column: usize, x: i16) -> Result<()> {
        self.update_object(column, CellValue::Int2(x))
    }

    pub fn update_i32(&mut self, column: usize, x: i32) -> Result<()> {
        self.update_object(column, CellValue::Int4(x))
    }

    pub fn update_i64(&mut self, column: usize, x: i64) -> Result<()> {
        self.update_object(column, CellValue::Int8(x))
    }

    pub fn update_f32(&mut self, column: usize, x: f32) -> Result<()> {
        self.update_object(column, CellValue::Float4(x))
    }

    pub fn update_f64(&mut self, column: usize, x: f64) -> Result<()> {
        self.update_object(column, CellValue::Float8(x))
    }

    pub fn update_decimal(&mut self, column: usize, x: Decimal) -> Result<()> {
        self.update_object(column, CellValue::Decimal(x))
    }

    pub fn update_string(&mut self, column: usize, x: impl Into<String>) -> Result<()> {
        self.update_object(column, CellValue::Text(x.into()))
    }

    pub fn update_bytes(&mut self, column: usize, x: Vec<u8>) -> Result<()> {
        self.update_object(column, CellValue::Bytes(x))
    }

    pub fn update_date(&mut self, column: usize, x: Date) -> Result<()> {
        self.update_object(column, CellValue::Date(x))
    }

    pub fn update_time(&mut self, column: usize, x: Time) -> Result<()> {
        self.update_object(column, CellValue::Time(x))
    }

    pub fn update_timestamp(&mut self, column: usize, x: Timestamp) -> Result<()> {
        self.update_object(column, CellValue::Timestamp(x))
    }

    pub fn update_timestamp_tz(&mut self, column: usize, x: TimestampTz) -> Result<()> {
        self.update_object(column, CellValue::TimestampTz(x))
    }

    pub fn update_array(&mut self, column: usize, x: Vec<CellValue>) -> Result<()> {
        self.update_object(column, CellValue::Array(x))
    }

    pub fn update_ref(&mut self, column: usize, x: RowRef) -> Result<()> {
        self.update_object(column, CellValue::Ref(x))
    }

    pub fn update_url(&mut self, column: usize, x: Url) -> Result<()> {
        self.update_object(column, CellValue::Url(x))
    }

    /// Normalizes the blob to its bytes and forwards to the generic update.
    /// A backing stream is consumed here, on the update call.
    pub fn update_blob(&mut self, column: usize, x: BlobValue) -> Result<()> {
        self.update_object(column, CellValue::Bytes(x.into_bytes()?))
    }

    /// Normalizes the clob to its text and forwards to the generic update.
    /// A backing stream is decoded here, in its declared encoding.
    pub fn update_clob(&mut self, column: usize, x: ClobValue) -> Result<()> {
        self.update_object(column, CellValue::Text(x.into_string()?))
    }

    /// Wraps `stream` as a blob of exactly `length` bytes and updates.
    pub fn update_binary_stream(
        &mut self,
        column: usize,
        stream: impl Read + 'static,
        length: u64,
    ) -> Result<()> {
        self.update_blob(column, BlobValue::from_stream(stream, length))
    }

    /// Wraps `stream` as a US-ASCII clob of exactly `length` characters and
    /// updates. A byte outside US-ASCII fails with the encoding kind; there
    /// is no fallback to another encoding.
    pub fn update_ascii_stream(
        &mut self,
        column: usize,
        stream: impl Read + 'static,
        length: u64,
    ) -> Result<()> {
        self.update_clob(column, ClobValue::from_ascii_stream(stream, length))
    }

    /// Wraps `stream` as a UTF-8 clob of `length` characters and updates.
    pub fn update_character_stream(
        &mut self,
        column: usize,
        stream: impl Read + 'static,
        length: u64,
    ) -> Result<()> {
        self.update_clob(column, ClobValue::from_reader(stream, length))
    }

    // ************************************************************
    // Implementation methods
    // ************************************************************

    /// Canonical extraction plus the generic coercion family. The flag is
    /// recorded by `get_object`.
    fn value_as(&mut self, column: usize, target: TargetType) -> Result<CellValue> {
        let value = self.get_object(column)?;
        coerce::coerce(target, value)
    }

    /// Canonical extraction plus the calendrical coercion family.
    fn value_as_with(
        &mut self,
        column: usize,
        target: TargetType,
        calendar: &Calendar,
    ) -> Result<CellValue> {
        let value = self.get_object(column)?;
        coerce::coerce_calendrical(target, value, calendar)
    }

    /// Numeric extraction path. Not a canonical wrapper, so it records the
    /// flag itself before handing the value to the numeric family.
    fn number(&mut self, column: usize, target: TargetType) -> Result<Option<crate::types::Numeric>> {
        let value = self.source.extract(column, None)?;
        self.was_null = value.is_null();
        coerce::coerce_numeric(target, value)
    }
}

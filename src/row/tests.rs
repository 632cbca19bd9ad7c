//! Tests for the row accessor facade

use super::*;
use crate::error::AccessError;
use crate::types::{CellValue, Date, Decimal, Time, Timestamp};
use eyre::{ensure, eyre, Result};

/// Single in-memory row, 1-based like the accessor contract.
struct VecRow {
    cells: Vec<CellValue>,
    last_hint: Option<TargetType>,
}

impl VecRow {
    fn new(cells: Vec<CellValue>) -> Self {
        Self {
            cells,
            last_hint: None,
        }
    }
}

impl RowSource for VecRow {
    fn extract(&mut self, column: usize, target: Option<TargetType>) -> Result<CellValue> {
        self.last_hint = target;
        let idx = column
            .checked_sub(1)
            .ok_or_else(|| eyre!("column positions are 1-based"))?;
        self.cells
            .get(idx)
            .cloned()
            .ok_or_else(|| eyre!("column {} out of range", column))
    }

    fn update(&mut self, column: usize, value: CellValue) -> Result<()> {
        let idx = column
            .checked_sub(1)
            .ok_or_else(|| eyre!("column positions are 1-based"))?;
        ensure!(idx < self.cells.len(), "column {} out of range", column);
        self.cells[idx] = value;
        Ok(())
    }
}

fn accessor(cells: Vec<CellValue>) -> RowAccessor<VecRow> {
    RowAccessor::new(VecRow::new(cells))
}

#[test]
fn null_substitutes_primitive_defaults() {
    let mut row = accessor(vec![CellValue::Null]);
    assert_eq!(row.get_bool(1).unwrap(), false);
    assert!(row.was_null());
    assert_eq!(row.get_i8(1).unwrap(), 0);
    assert_eq!(row.get_i16(1).unwrap(), 0);
    assert_eq!(row.get_i32(1).unwrap(), 0);
    assert_eq!(row.get_i64(1).unwrap(), 0);
    assert_eq!(row.get_f32(1).unwrap(), 0.0);
    assert_eq!(row.get_f64(1).unwrap(), 0.0);
    assert!(row.was_null());
}

#[test]
fn null_maps_to_none_for_object_getters() {
    let mut row = accessor(vec![CellValue::Null]);
    assert_eq!(row.get_string(1).unwrap(), None);
    assert_eq!(row.get_bytes(1).unwrap(), None);
    assert_eq!(row.get_decimal(1).unwrap(), None);
    assert!(row.get_blob(1).unwrap().is_none());
    assert!(row.get_clob(1).unwrap().is_none());
    assert!(row.get_binary_stream(1).unwrap().is_none());
    assert!(row.get_ascii_stream(1).unwrap().is_none());
    assert!(row.get_character_stream(1).unwrap().is_none());
    assert!(row.was_null());
}

#[test]
fn was_null_tracks_most_recent_extraction_only() {
    let mut row = accessor(vec![CellValue::Null, CellValue::Int4(7)]);
    row.get_i32(1).unwrap();
    assert!(row.was_null());
    row.get_i32(2).unwrap();
    assert!(!row.was_null());
    row.get_string(1).unwrap();
    assert!(row.was_null());
}

#[test]
fn strict_get_rejects_wrong_variant() {
    let mut row = accessor(vec![CellValue::Int8(5)]);
    let err = row.get::<RowRef>(1).unwrap_err();
    match err.downcast_ref::<AccessError>() {
        Some(AccessError::TypeMismatch { actual, requested }) => {
            assert_eq!(*actual, "int8");
            assert_eq!(*requested, "ref");
        }
        other => panic!("expected type mismatch, got {:?}", other),
    }
}

#[test]
fn strict_get_does_not_narrow() {
    let mut row = accessor(vec![CellValue::Int8(5)]);
    assert!(row.get::<i32>(1).is_err());
    assert_eq!(row.get::<i64>(1).unwrap(), Some(5));
}

#[test]
fn strict_get_passes_the_type_hint_to_the_source() {
    let mut row = accessor(vec![CellValue::Text("x".into())]);
    row.get::<String>(1).unwrap();
    assert_eq!(row.source().last_hint, Some(TargetType::Text));
    row.get_object(1).unwrap();
    assert_eq!(row.source().last_hint, None);
}

#[test]
fn numeric_getters_narrow_by_truncation() {
    let mut row = accessor(vec![
        CellValue::Int8(0x1_0000_002A),
        CellValue::Float8(3.9),
        CellValue::Decimal(Decimal::new(-1999, 3)),
    ]);
    assert_eq!(row.get_i32(1).unwrap(), 42);
    assert_eq!(row.get_i8(1).unwrap(), 42);
    assert_eq!(row.get_i32(2).unwrap(), 3);
    assert_eq!(row.get_i64(3).unwrap(), -1);
}

#[test]
fn decimal_with_oversized_scale_truncates_to_zero() {
    let mut row = accessor(vec![CellValue::Decimal(Decimal::new(1, 40))]);
    assert_eq!(row.get_i64(1).unwrap(), 0);
    assert_eq!(row.get_i32(1).unwrap(), 0);
    assert!(!row.was_null());
}

#[test]
fn updates_forward_to_the_generic_primitive() {
    let mut row = accessor(vec![CellValue::Null, CellValue::Null]);
    row.update_i32(1, 42).unwrap();
    row.update_string(2, "hi").unwrap();
    assert_eq!(row.source().cells[0], CellValue::Int4(42));
    assert_eq!(row.source().cells[1], CellValue::Text("hi".into()));
    row.update_null(1).unwrap();
    assert_eq!(row.source().cells[0], CellValue::Null);
}

#[test]
fn temporal_getters_honor_the_calendar() {
    let ts = Timestamp::from_date_time(Date::from_ymd(2024, 1, 1), Time::from_hms(23, 30, 0));
    let mut row = accessor(vec![CellValue::Timestamp(ts)]);
    let cal = crate::types::Calendar::fixed_offset(3600);
    assert_eq!(
        row.get_date_with(1, &cal).unwrap(),
        Some(Date::from_ymd(2024, 1, 2))
    );
    assert_eq!(row.get_date(1).unwrap(), Some(Date::from_ymd(2024, 1, 1)));
}

#[test]
fn unsupported_operations_report_their_kind() {
    let mut row = accessor(vec![CellValue::Int4(1)]);
    let unsupported = |err: eyre::Report| {
        matches!(
            err.downcast_ref::<AccessError>(),
            Some(AccessError::Unsupported(_))
        )
    };
    assert!(unsupported(row.get_decimal_scaled(1, 2).unwrap_err()));
    assert!(unsupported(row.get_unicode_stream(1).err().unwrap()));
    assert!(unsupported(row.metadata().unwrap_err()));
    assert!(unsupported(row.refresh_row().unwrap_err()));
    assert!(unsupported(
        row.get_object_mapped(1, Some(&TypeMap::new())).unwrap_err()
    ));
    // Still readable afterwards; no partial work happened.
    assert_eq!(row.get_i32(1).unwrap(), 1);
}

#[test]
fn null_type_map_behaves_like_plain_extraction() {
    let mut row = accessor(vec![CellValue::Int4(9)]);
    assert_eq!(row.get_object_mapped(1, None).unwrap(), CellValue::Int4(9));
    assert!(!row.was_null());
}

#[test]
fn warnings_surface_is_empty() {
    let mut row = accessor(vec![CellValue::Null]);
    assert!(row.warnings().is_empty());
    row.clear_warnings();
    assert!(row.warnings().is_empty());
}

#[test]
fn source_errors_propagate_opaquely() {
    let mut row = accessor(vec![CellValue::Null]);
    let err = row.get_i32(2).unwrap_err();
    assert!(err.downcast_ref::<AccessError>().is_none());
    assert!(err.to_string().contains("out of range"));
}

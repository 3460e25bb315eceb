//! FILENAME: core/roster-engine/src/definition.rs
//! Roster Definition - The record and filter types.
//!
//! This module contains the types that DESCRIBE roster input:
//! - `ScheduleRecord`: one shift assignment as delivered by the data source
//! - `FilterCriteria`: the current per-axis selection
//!
//! Records are immutable once fetched. Field values are always strings;
//! anything missing or oddly typed on the wire degrades to a string here so
//! grouping never has to deal with absent values.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

// ============================================================================
// WIRE KEYS
// ============================================================================

/// Sheet header for the employee name column.
pub const KEY_EMPLOYEE: &str = "Tên nhân viên";
/// Sheet header for the registered shift column.
pub const KEY_SHIFT: &str = "Ca đăng ký";
/// Sheet header for the work date column.
pub const KEY_WORK_DATE: &str = "Ngày đi làm";
/// Sheet header for the job position column.
pub const KEY_POSITION: &str = "Vị Trí Công Việc";

/// Sentinel used by the filter surface for "no constraint".
pub const ALL_SENTINEL: &str = "all";

// ============================================================================
// SCHEDULE RECORD
// ============================================================================

/// One shift assignment. No identity field: records are grouped purely by
/// `(employee_name, work_date)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "Tên nhân viên", default, deserialize_with = "lenient_string")]
    pub employee_name: String,

    #[serde(rename = "Ca đăng ký", default, deserialize_with = "lenient_string")]
    pub shift_name: String,

    #[serde(rename = "Ngày đi làm", default, deserialize_with = "lenient_string")]
    pub work_date: String,

    #[serde(rename = "Vị Trí Công Việc", default, deserialize_with = "lenient_string")]
    pub position: String,
}

impl ScheduleRecord {
    pub fn new(
        employee_name: impl Into<String>,
        shift_name: impl Into<String>,
        work_date: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        ScheduleRecord {
            employee_name: employee_name.into(),
            shift_name: shift_name.into(),
            work_date: work_date.into(),
            position: position.into(),
        }
    }

    /// Returns the record's value on the given filter axis.
    pub fn field(&self, axis: FilterAxis) -> &str {
        match axis {
            FilterAxis::Employee => &self.employee_name,
            FilterAxis::Shift => &self.shift_name,
            FilterAxis::Date => &self.work_date,
        }
    }
}

/// Accepts any JSON scalar as a string. `null` and containers become `""`,
/// numbers are rendered the way a spreadsheet export would show them.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string-like value")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(format_number(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<String, D2::Error> {
            d.deserialize_any(LenientVisitor)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<String, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(String::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

/// Integral floats print without a fractional part ("3", not "3.0").
fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// One of the three independently selectable filter axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAxis {
    Employee,
    Shift,
    Date,
}

impl FilterAxis {
    pub const ALL: [FilterAxis; 3] = [FilterAxis::Employee, FilterAxis::Shift, FilterAxis::Date];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterAxis::Employee => "employee",
            FilterAxis::Shift => "shift",
            FilterAxis::Date => "date",
        }
    }
}

impl fmt::Display for FilterAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection on a single axis. Serializes to the `"all"` sentinel or the
/// selected raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parses a filter-surface value; the literal `"all"` means no constraint.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SENTINEL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// Exact match, or always true for `All`.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL_SENTINEL,
            Selection::Only(v) => v,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Selection::parse(&raw))
    }
}

/// The current per-axis selection. Defaults to `all` on every axis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub employee: Selection,
    #[serde(default)]
    pub shift: Selection,
    #[serde(default)]
    pub date: Selection,
}

impl FilterCriteria {
    /// No constraint on any axis.
    pub fn all() -> Self {
        FilterCriteria::default()
    }

    pub fn get(&self, axis: FilterAxis) -> &Selection {
        match axis {
            FilterAxis::Employee => &self.employee,
            FilterAxis::Shift => &self.shift,
            FilterAxis::Date => &self.date,
        }
    }

    pub fn set(&mut self, axis: FilterAxis, selection: Selection) {
        match axis {
            FilterAxis::Employee => self.employee = selection,
            FilterAxis::Shift => self.shift = selection,
            FilterAxis::Date => self.date = selection,
        }
    }

    /// Returns a copy with one axis replaced, leaving the other two untouched.
    pub fn with(mut self, axis: FilterAxis, value: &str) -> Self {
        self.set(axis, Selection::parse(value));
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        FilterAxis::ALL.iter().all(|axis| self.get(*axis).is_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_sheet_json() {
        let json = r#"{
            "Tên nhân viên": "An",
            "Ca đăng ký": "Sáng",
            "Ngày đi làm": "2024-01-01",
            "Vị Trí Công Việc": "Lễ tân"
        }"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ScheduleRecord::new("An", "Sáng", "2024-01-01", "Lễ tân"));
    }

    #[test]
    fn test_missing_and_odd_fields_degrade_to_strings() {
        let json = r#"{
            "Tên nhân viên": null,
            "Ca đăng ký": 3,
            "Ngày đi làm": 45292.5,
            "Vị Trí Công Việc": ["x"],
            "Ghi chú": "ignored"
        }"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_name, "");
        assert_eq!(record.shift_name, "3");
        assert_eq!(record.work_date, "45292.5");
        assert_eq!(record.position, "");

        let empty: ScheduleRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ScheduleRecord::default());
    }

    #[test]
    fn test_record_serializes_with_sheet_keys() {
        let record = ScheduleRecord::new("An", "Tối", "2024-01-02", "Phục vụ");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value[KEY_EMPLOYEE], "An");
        assert_eq!(value[KEY_SHIFT], "Tối");
        assert_eq!(value[KEY_WORK_DATE], "2024-01-02");
        assert_eq!(value[KEY_POSITION], "Phục vụ");
    }

    #[test]
    fn test_selection_sentinel() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("All"), Selection::Only("All".to_string()));
        assert!(Selection::All.accepts("anything"));
        assert!(Selection::Only("An".into()).accepts("An"));
        assert!(!Selection::Only("An".into()).accepts("an"));
    }

    #[test]
    fn test_criteria_round_trip_through_sentinel() {
        let criteria = FilterCriteria::all().with(FilterAxis::Shift, "Sáng");
        let json = serde_json::to_string(&criteria).unwrap();
        assert_eq!(json, r#"{"employee":"all","shift":"Sáng","date":"all"}"#);
        let back: FilterCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
        assert!(!back.is_unconstrained());
        assert!(back.with(FilterAxis::Shift, "all").is_unconstrained());
    }
}

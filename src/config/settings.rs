//! Settings store for the numeric layout parameters
//!
//! The store is the single source of truth for rows, columns, margins and
//! gutter. Every write is validated against the per-key invariant before it
//! lands, so a rejected value never leaves the store half-updated.

use crate::domain::grid::Margins;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of a stored layout setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Rows,
    Cols,
    Top,
    Left,
    Bottom,
    Right,
    Gutter,
}

impl SettingKey {
    /// All keys in display order
    pub const ALL: [SettingKey; 7] = [
        SettingKey::Rows,
        SettingKey::Cols,
        SettingKey::Top,
        SettingKey::Left,
        SettingKey::Bottom,
        SettingKey::Right,
        SettingKey::Gutter,
    ];

    /// Margins that follow `Top` while margins are linked
    pub const LINKED_FOLLOWERS: [SettingKey; 3] =
        [SettingKey::Left, SettingKey::Bottom, SettingKey::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Rows => "rows",
            SettingKey::Cols => "cols",
            SettingKey::Top => "top",
            SettingKey::Left => "left",
            SettingKey::Bottom => "bottom",
            SettingKey::Right => "right",
            SettingKey::Gutter => "gutter",
        }
    }

    /// Label shown next to the entry for this setting
    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::Rows => "# Rows",
            SettingKey::Cols => "# Cols",
            SettingKey::Top => "Top",
            SettingKey::Left => "Left",
            SettingKey::Bottom => "Bottom",
            SettingKey::Right => "Right",
            SettingKey::Gutter => "Gutter",
        }
    }

    /// Smallest value this setting accepts
    pub fn minimum(&self) -> u32 {
        match self {
            SettingKey::Rows | SettingKey::Cols => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = InvalidSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| InvalidSettingError::UnknownKey(s.to_string()))
    }
}

/// Rejection of a setting key or value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSettingError {
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),
    #[error("Value '{raw}' for {key} is not a number")]
    NotNumeric { key: String, raw: String },
    #[error("Value {value} for {key} is below the minimum of {min}")]
    BelowMinimum { key: SettingKey, value: i64, min: u32 },
    #[error("Value {value} for {key} is above the maximum of {max}")]
    AboveMaximum { key: SettingKey, value: i64, max: u32 },
}

/// Coerces free-form entry text to an integer
///
/// Surrounding whitespace is ignored. Decimal input is truncated toward
/// zero. Range checks are left to [`SettingsStore::set`].
pub fn coerce_value(key: &str, raw: &str) -> Result<i64, InvalidSettingError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        // `as` saturates out-of-range floats, which the range check then rejects
        Ok(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => Err(InvalidSettingError::NotNumeric {
            key: key.to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Snapshot of every layout setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub rows: u32,
    pub cols: u32,
    pub margins: Margins,
    pub gutter: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            margins: Margins::default(),
            gutter: 0,
        }
    }
}

/// Bounds applied on top of the per-key minimums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingLimits {
    /// Largest accepted row or column count
    pub max_divisions: u32,
}

impl SettingLimits {
    pub const DEFAULT_MAX_DIVISIONS: u32 = 64;

    pub fn maximum(&self, key: SettingKey) -> u32 {
        match key {
            SettingKey::Rows | SettingKey::Cols => self.max_divisions.max(1),
            _ => u32::MAX,
        }
    }
}

impl Default for SettingLimits {
    fn default() -> Self {
        Self {
            max_divisions: Self::DEFAULT_MAX_DIVISIONS,
        }
    }
}

/// Holds the current value of each layout setting
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Settings,
    limits: SettingLimits,
}

impl SettingsStore {
    /// Creates a store from an initial defaults table
    ///
    /// Every default goes through the same validation as [`SettingsStore::set`].
    pub fn new(defaults: Settings, limits: SettingLimits) -> Result<Self, InvalidSettingError> {
        let mut store = Self {
            settings: Settings::default(),
            limits,
        };
        for key in SettingKey::ALL {
            store.set(key, i64::from(read(&defaults, key)))?;
        }
        Ok(store)
    }

    pub fn get(&self, key: SettingKey) -> u32 {
        read(&self.settings, key)
    }

    /// Stores a value, returning the previous one
    ///
    /// Fails without touching the store if `value` is out of range for `key`.
    pub fn set(&mut self, key: SettingKey, value: i64) -> Result<u32, InvalidSettingError> {
        let value = self.validate(key, value)?;
        let previous = self.get(key);
        *slot(&mut self.settings, key) = value;
        Ok(previous)
    }

    /// Checks `value` against the invariant for `key`
    pub fn validate(&self, key: SettingKey, value: i64) -> Result<u32, InvalidSettingError> {
        let min = key.minimum();
        if value < i64::from(min) {
            return Err(InvalidSettingError::BelowMinimum { key, value, min });
        }
        let max = self.limits.maximum(key);
        if value > i64::from(max) {
            return Err(InvalidSettingError::AboveMaximum { key, value, max });
        }
        // Bounded by `max` above
        Ok(value as u32)
    }

    /// Copies `top` into the other three margins
    ///
    /// Any stored top value is valid for every margin, so this cannot fail.
    pub fn mirror_top(&mut self) -> Margins {
        self.settings.margins = Margins::uniform(self.settings.margins.top);
        self.settings.margins
    }

    pub fn snapshot(&self) -> Settings {
        self.settings
    }

    pub fn margins(&self) -> Margins {
        self.settings.margins
    }
}

fn read(settings: &Settings, key: SettingKey) -> u32 {
    match key {
        SettingKey::Rows => settings.rows,
        SettingKey::Cols => settings.cols,
        SettingKey::Top => settings.margins.top,
        SettingKey::Left => settings.margins.left,
        SettingKey::Bottom => settings.margins.bottom,
        SettingKey::Right => settings.margins.right,
        SettingKey::Gutter => settings.gutter,
    }
}

fn slot(settings: &mut Settings, key: SettingKey) -> &mut u32 {
    match key {
        SettingKey::Rows => &mut settings.rows,
        SettingKey::Cols => &mut settings.cols,
        SettingKey::Top => &mut settings.margins.top,
        SettingKey::Left => &mut settings.margins.left,
        SettingKey::Bottom => &mut settings.margins.bottom,
        SettingKey::Right => &mut settings.margins.right,
        SettingKey::Gutter => &mut settings.gutter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SettingsStore {
        SettingsStore::new(Settings::default(), SettingLimits::default()).unwrap()
    }

    #[test]
    fn keys_round_trip_through_names() {
        for key in SettingKey::ALL {
            assert_eq!(key.as_str().parse::<SettingKey>().unwrap(), key);
        }
        assert_eq!(
            "margin".parse::<SettingKey>(),
            Err(InvalidSettingError::UnknownKey("margin".to_string()))
        );
        assert!("Rows".parse::<SettingKey>().is_err());
    }

    #[test]
    fn set_returns_previous_value() {
        let mut store = store();
        assert_eq!(store.set(SettingKey::Gutter, 12).unwrap(), 0);
        assert_eq!(store.set(SettingKey::Gutter, 4).unwrap(), 12);
        assert_eq!(store.get(SettingKey::Gutter), 4);
    }

    #[test]
    fn rows_and_cols_require_at_least_one() {
        let mut store = store();
        let err = store.set(SettingKey::Rows, 0).unwrap_err();
        assert_eq!(
            err,
            InvalidSettingError::BelowMinimum {
                key: SettingKey::Rows,
                value: 0,
                min: 1
            }
        );
        assert_eq!(store.get(SettingKey::Rows), 1);
    }

    #[test]
    fn margins_reject_negative_values() {
        let mut store = store();
        store.set(SettingKey::Left, 30).unwrap();
        assert!(store.set(SettingKey::Left, -1).is_err());
        assert_eq!(store.get(SettingKey::Left), 30);
    }

    #[test]
    fn divisions_are_capped_by_limits() {
        let mut store = SettingsStore::new(
            Settings::default(),
            SettingLimits { max_divisions: 8 },
        )
        .unwrap();
        assert!(store.set(SettingKey::Cols, 8).is_ok());
        assert!(matches!(
            store.set(SettingKey::Cols, 9),
            Err(InvalidSettingError::AboveMaximum { max: 8, .. })
        ));
        assert!(store.set(SettingKey::Gutter, i64::from(u32::MAX)).is_ok());
        assert!(store.set(SettingKey::Gutter, i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn invalid_defaults_are_rejected() {
        let defaults = Settings {
            cols: 0,
            ..Settings::default()
        };
        assert!(SettingsStore::new(defaults, SettingLimits::default()).is_err());
    }

    #[test]
    fn snapshot_reflects_writes() {
        let mut store = store();
        store.set(SettingKey::Rows, 2).unwrap();
        store.set(SettingKey::Bottom, 15).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.rows, 2);
        assert_eq!(snapshot.margins, Margins::new(0, 0, 15, 0));
    }

    #[test]
    fn mirror_top_equalizes_margins() {
        let mut store = store();
        store.set(SettingKey::Top, 40).unwrap();
        store.set(SettingKey::Right, 5).unwrap();
        assert_eq!(store.mirror_top(), Margins::uniform(40));
        assert_eq!(store.get(SettingKey::Right), 40);
    }

    #[test]
    fn coerce_accepts_integers_and_decimals() {
        assert_eq!(coerce_value("gutter", "42"), Ok(42));
        assert_eq!(coerce_value("gutter", "  7 "), Ok(7));
        assert_eq!(coerce_value("gutter", "-3"), Ok(-3));
        assert_eq!(coerce_value("gutter", "12.9"), Ok(12));
        assert_eq!(coerce_value("gutter", "-0.5"), Ok(0));
    }

    #[test]
    fn coerce_rejects_non_numeric_text() {
        for raw in ["abc", "", "  ", "12px", "NaN", "inf"] {
            assert!(
                matches!(
                    coerce_value("gutter", raw),
                    Err(InvalidSettingError::NotNumeric { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn labels_mark_counts() {
        assert_eq!(SettingKey::Rows.label(), "# Rows");
        assert_eq!(SettingKey::Cols.label(), "# Cols");
        assert_eq!(SettingKey::Gutter.label(), "Gutter");
    }
}

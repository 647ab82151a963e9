#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MIN_COLUMNS: u32 = 3;
pub const MAX_COLUMNS: u32 = 10;
pub const MIN_ROWS: u32 = 1;
pub const MAX_ROWS: u32 = 5;

/// Bookmark grid dimensions. `columns * rows` is the page capacity, which
/// the column/row bounds keep at one or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSettings {
    pub columns: u32,
    pub rows: u32,
    pub gap: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 3,
            gap: 1,
        }
    }
}

/// The individually adjustable grid fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridDimension {
    Columns,
    Rows,
    Gap,
}

impl GridSettings {
    /// Builds a grid with every field forced into its allowed range.
    pub fn clamped(columns: u32, rows: u32, gap: u32) -> Self {
        Self {
            columns: columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
            rows: rows.clamp(MIN_ROWS, MAX_ROWS),
            gap,
        }
    }

    /// Re-applies the bounds, e.g. to a record read back from storage.
    pub fn sanitized(self) -> Self {
        Self::clamped(self.columns, self.rows, self.gap)
    }

    pub fn is_within_bounds(&self) -> bool {
        (MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns)
            && (MIN_ROWS..=MAX_ROWS).contains(&self.rows)
    }

    /// Copy of `self` with one dimension replaced, clamped.
    pub fn with_dimension(self, dimension: GridDimension, value: u32) -> Self {
        match dimension {
            GridDimension::Columns => {
                Self::clamped(value, self.rows, self.gap)
            }
            GridDimension::Rows => {
                Self::clamped(self.columns, value, self.gap)
            }
            GridDimension::Gap => Self::clamped(self.columns, self.rows, value),
        }
    }

    /// Slots per page. Never zero, even for a hand-built out-of-range grid.
    pub fn capacity(&self) -> usize {
        (self.columns as usize)
            .saturating_mul(self.rows as usize)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_enforces_bounds() {
        let grid = GridSettings::clamped(1, 9, 4);
        assert_eq!(grid.columns, MIN_COLUMNS);
        assert_eq!(grid.rows, MAX_ROWS);
        assert_eq!(grid.gap, 4);
        assert!(grid.is_within_bounds());
    }

    #[test]
    fn capacity_is_never_zero() {
        let broken = GridSettings {
            columns: 0,
            rows: 0,
            gap: 0,
        };
        assert_eq!(broken.capacity(), 1);
        assert_eq!(broken.sanitized().capacity(), 3);
    }

    #[test]
    fn with_dimension_replaces_single_field() {
        let grid = GridSettings::default()
            .with_dimension(GridDimension::Columns, 12)
            .with_dimension(GridDimension::Gap, 2);
        assert_eq!(
            grid,
            GridSettings {
                columns: 10,
                rows: 3,
                gap: 2
            }
        );
    }
}

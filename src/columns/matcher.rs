use super::units::convert_unit;
use super::{Column, ColumnError, TableView};

/// Matches one table column by label and unit and converts it to canonical units
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMatcher {
    /// Accepted labels
    pub labels: Vec<String>,
    /// Accepted units, `None` for any unit
    pub units: Option<Vec<String>>,
    /// Multiplier applied after unit conversion
    pub scale: f64,
    /// Offset added after scaling
    pub offset: f64,
    /// Columns labeled with `COS` hold cosines and are turned into degrees
    pub cosine: bool,
}

impl ColumnMatcher {
    /// Match any of `labels` in any of `units`
    pub fn new<L, U>(labels: L, units: U) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            units: Some(units.into_iter().map(Into::into).collect()),
            scale: 1.0,
            offset: 0.0,
            cosine: false,
        }
    }

    /// Match any of `labels` whatever their unit
    pub fn any_unit<L>(labels: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            units: None,
            ..Self::new(labels, Vec::<String>::new())
        }
    }

    /// Multiply converted values by `scale`
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Add `offset` to converted values
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Invert cosine-labeled columns into angles
    pub fn with_cosine(mut self) -> Self {
        self.cosine = true;
        self
    }

    /// Whether column `icol` has an accepted label and unit
    pub fn is_match<T: TableView + ?Sized>(&self, icol: usize, table: &T) -> bool {
        let (Some(label), Some(unit)) = (table.labels().get(icol), table.units().get(icol)) else {
            return false;
        };
        self.labels.iter().any(|l| l == label)
            && self
                .units
                .as_ref()
                .map_or(true, |units| units.iter().any(|u| u == unit))
    }

    /// Index of the first matching column
    pub fn first_match<T: TableView + ?Sized>(&self, table: &T) -> Option<usize> {
        (0..table.numcols()).find(|&icol| self.is_match(icol, table))
    }

    /// Indices of every matching column
    pub fn all_matches<T: TableView + ?Sized>(&self, table: &T) -> Vec<usize> {
        (0..table.numcols())
            .filter(|&icol| self.is_match(icol, table))
            .collect()
    }

    /// Column `icol` in canonical units; an empty column when it does not match
    pub fn column<T: TableView + ?Sized>(
        &self,
        icol: usize,
        table: &T,
        strict: bool,
    ) -> Result<Column, ColumnError> {
        if !self.is_match(icol, table) {
            return Ok(Column::empty(table.numrows()));
        }
        let label = &table.labels()[icol];
        let unit = &table.units()[icol];

        if self.cosine && label.contains("COS") {
            let (factor, canonical) = convert_unit(label, "RAD", strict)?;
            let values = (0..table.numrows())
                .map(|row| {
                    table
                        .cell(row, icol)
                        .map(|x| x * self.scale + self.offset)
                        .filter(|c| (-1.0..=1.0).contains(c))
                        .map(|c| c.acos() * factor)
                })
                .collect();
            return Ok(Column::new(label.clone(), canonical, values));
        }

        let (factor, canonical) = convert_unit(label, unit, strict)?;
        let values = (0..table.numrows())
            .map(|row| {
                table
                    .cell(row, icol)
                    .map(|x| x * factor * self.scale + self.offset)
            })
            .collect();
        Ok(Column::new(label.clone(), canonical, values))
    }

    /// The first matching column, or an empty column
    pub fn first_column<T: TableView + ?Sized>(
        &self,
        table: &T,
        strict: bool,
    ) -> Result<Column, ColumnError> {
        match self.first_match(table) {
            Some(icol) => self.column(icol, table, strict),
            None => Ok(Column::empty(table.numrows())),
        }
    }
}

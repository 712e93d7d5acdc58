use super::units::PERCENT;
use super::{Column, ColumnError, ColumnMatcher, Quantity, TableView};

/// A value/uncertainty strategy: how one physical quantity and its error are
/// spread over the columns of a table
#[derive(Debug, Clone, PartialEq)]
pub enum PairMatcher {
    /// Only a value column; the uncertainty is absent
    MissingError {
        /// Value column
        value: ColumnMatcher,
    },
    /// A value column and an error column, the error possibly in percent
    Independent {
        /// Value column
        value: ColumnMatcher,
        /// Error column
        error: ColumnMatcher,
    },
    /// Lower and upper bound columns
    HighLow {
        /// Lower bound
        low: ColumnMatcher,
        /// Upper bound
        high: ColumnMatcher,
    },
    /// A central value with separate minus and plus error columns
    HighMidLow {
        /// Central value
        mid: ColumnMatcher,
        /// Minus error
        minus: ColumnMatcher,
        /// Plus error
        plus: ColumnMatcher,
    },
    /// A value with two error columns added in quadrature
    AddErrorBars {
        /// Value column
        value: ColumnMatcher,
        /// Systematic error
        systematic: ColumnMatcher,
        /// Statistical error
        statistical: ColumnMatcher,
    },
    /// A cross section times sqrt(E), divided by sqrt(E in eV) to give barns
    DerivedRatio {
        /// Value column
        value: ColumnMatcher,
        /// Error column
        error: ColumnMatcher,
    },
}

impl PairMatcher {
    /// Whether the columns this strategy needs are present
    pub fn is_match<T: TableView + ?Sized>(&self, table: &T) -> bool {
        let found = |m: &ColumnMatcher| m.first_match(table).is_some();
        match self {
            PairMatcher::MissingError { value } | PairMatcher::DerivedRatio { value, .. } => found(value),
            PairMatcher::Independent { value, error } => found(value) && found(error),
            PairMatcher::HighLow { low, high } => found(low) || found(high),
            PairMatcher::HighMidLow { mid, minus, plus }
            | PairMatcher::AddErrorBars {
                value: mid,
                systematic: minus,
                statistical: plus,
            } => found(mid) && (found(minus) || found(plus)),
        }
    }

    /// The value column in canonical units, empty when the strategy does not match
    pub fn value<T: TableView + ?Sized>(&self, table: &T, strict: bool) -> Result<Column, ColumnError> {
        let numrows = table.numrows();
        if !self.is_match(table) {
            return Ok(Column::empty(numrows));
        }
        match self {
            PairMatcher::MissingError { value }
            | PairMatcher::Independent { value, .. }
            | PairMatcher::AddErrorBars { value, .. } => value.first_column(table, strict),
            PairMatcher::HighLow { low, high } => {
                let low = low.first_column(table, strict)?;
                let high = high.first_column(table, strict)?;
                let values = zip_rows(&low, &high, |lo, hi| match (lo, hi) {
                    (Some(lo), Some(hi)) => Some(0.5 * (lo + hi)),
                    (None, Some(hi)) => Some(0.5 * hi),
                    _ => None,
                });
                Ok(Column::headed_by(&[&low, &high], values))
            }
            PairMatcher::HighMidLow { mid, minus, plus } => {
                let mid = mid.first_column(table, strict)?;
                let minus = minus.first_column(table, strict)?;
                let plus = plus.first_column(table, strict)?;
                let values = (0..numrows)
                    .map(|i| Some(mid.at(i)? + 0.5 * (plus.at(i)? - minus.at(i)?)))
                    .collect();
                Ok(Column::headed_by(&[&mid, &minus, &plus], values))
            }
            PairMatcher::DerivedRatio { value, .. } => {
                let column = value.first_column(table, strict)?;
                derive_barns(column, table, strict)
            }
        }
    }

    /// The uncertainty column in canonical units, empty when absent
    pub fn error<T: TableView + ?Sized>(&self, table: &T, strict: bool) -> Result<Column, ColumnError> {
        let numrows = table.numrows();
        if !self.is_match(table) {
            return Ok(Column::empty(numrows));
        }
        let column = match self {
            PairMatcher::MissingError { .. } => Column::empty(numrows),
            PairMatcher::Independent { value, error } => {
                let err = error.first_column(table, strict)?;
                if err.unit.as_deref() == Some(PERCENT) {
                    from_percent(err, &value.first_column(table, strict)?)
                } else {
                    err
                }
            }
            PairMatcher::HighLow { low, high } => {
                let low = low.first_column(table, strict)?;
                let high = high.first_column(table, strict)?;
                let values = zip_rows(&low, &high, |lo, hi| match (lo, hi) {
                    (Some(lo), Some(hi)) => Some(0.5 * (lo - hi)),
                    (None, Some(bound)) | (Some(bound), None) => Some(0.5 * bound),
                    (None, None) => None,
                });
                Column::headed_by(&[&low, &high], values)
            }
            PairMatcher::HighMidLow { mid, minus, plus } => {
                let mid = mid.first_column(table, strict)?;
                let minus = minus.first_column(table, strict)?;
                let plus = plus.first_column(table, strict)?;
                let values = (0..numrows)
                    .map(|i| {
                        mid.at(i)?;
                        Some(0.5 * (minus.at(i)? + plus.at(i)?))
                    })
                    .collect();
                Column::headed_by(&[&mid, &minus, &plus], values)
            }
            PairMatcher::AddErrorBars {
                value,
                systematic,
                statistical,
            } => {
                let value = value.first_column(table, strict)?;
                let mut unit = None;
                let mut parts = Vec::with_capacity(2);
                for matcher in [systematic, statistical] {
                    let mut part = matcher.first_column(table, strict)?;
                    if part.unit.as_deref() == Some(PERCENT) {
                        part = from_percent(part, &value);
                    }
                    if part.unit.is_some() {
                        unit = part.unit.clone();
                    }
                    parts.push(part);
                }
                let values = zip_rows(&parts[0], &parts[1], |a, b| match (a, b) {
                    (None, None) => None,
                    (a, b) => Some(a.unwrap_or(0.0).hypot(b.unwrap_or(0.0))),
                });
                Column {
                    label: Some("ERR".to_string()),
                    unit,
                    values,
                }
            }
            PairMatcher::DerivedRatio { error, .. } => {
                let column = error.first_column(table, strict)?;
                derive_barns(column, table, strict)?
            }
        };
        Ok(column.abs())
    }
}

fn zip_rows(a: &Column, b: &Column, f: impl Fn(Option<f64>, Option<f64>) -> Option<f64>) -> Vec<Option<f64>> {
    (0..a.len().max(b.len())).map(|i| f(a.at(i), b.at(i))).collect()
}

/// Percent errors made absolute against the value column, in the value's unit
fn from_percent(err: Column, value: &Column) -> Column {
    let values = zip_rows(&err, value, |e, v| Some(v? * e? / 100.0));
    Column {
        label: err.label,
        unit: value.unit.clone(),
        values,
    }
}

/// Divide by the square root of the incident energy in eV
fn derive_barns<T: TableView + ?Sized>(column: Column, table: &T, strict: bool) -> Result<Column, ColumnError> {
    let (energy, _) = Quantity::IncidentEnergy.extract(table, strict)?;
    let values = zip_rows(&column, &energy, |x, e| Some(x? / (e? * 1.0e6).sqrt()));
    Ok(Column {
        label: column.label,
        unit: Some("barns".to_string()),
        values,
    })
}

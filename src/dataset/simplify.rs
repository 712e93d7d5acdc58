use log::debug;

use super::{Dataset, DatasetError, ExtractConfig};

impl Dataset {
    /// Reduce the columns to canonical quantities: `Energy`, `Data` and so on,
    /// each followed at the end by its `d(...)` uncertainty column.
    ///
    /// Uncertainty columns of quantities without any uncertainty are zero-filled
    /// under `make_all_columns`, otherwise they fail the dataset under
    /// `fail_if_missing_errors`, otherwise they are left out. Calling this on a
    /// simplified dataset returns a copy.
    pub fn simplified(&self, config: &ExtractConfig) -> Result<Dataset, DatasetError> {
        if self.simplified {
            return Ok(self.clone());
        }
        let Some(map) = self.class.column_map()? else {
            return Ok(self.clone());
        };

        let numrows = self.numrows();
        let mut values = Vec::with_capacity(map.len());
        let mut errors = Vec::with_capacity(map.len());
        for (name, quantity) in map {
            let (value, error) = quantity.extract(self, config.strict_units)?;
            if value.is_blank() {
                return Err(DatasetError::NoValuesGiven(name.to_string()));
            }
            if error.is_blank() && !config.make_all_columns && config.fail_if_missing_errors {
                return Err(DatasetError::NoUncertaintyGiven(name.to_string()));
            }
            debug!("{name}: value from {:?}, error from {:?}", value.label, error.label);
            values.push(value);
            errors.push(error);
        }

        let mut result = self.clone();
        result.labels = map.iter().map(|(name, _)| name.to_string()).collect();
        result.units = values.iter().map(|v| v.unit.clone().unwrap_or_default()).collect();
        let mut error_columns = Vec::new();
        for ((name, _), (value, error)) in map.iter().zip(values.iter().zip(&errors)) {
            if error.is_blank() && !config.make_all_columns {
                continue;
            }
            result.labels.push(format!("d({name})"));
            let unit = if error.is_blank() { &value.unit } else { &error.unit };
            result.units.push(unit.clone().unwrap_or_default());
            error_columns.push(error);
        }

        result.data = (0..numrows)
            .map(|row| {
                let mut cells: Vec<Option<f64>> = values.iter().map(|v| v.at(row)).collect();
                cells.extend(error_columns.iter().map(|e| {
                    if e.is_blank() {
                        Some(0.0)
                    } else {
                        e.at(row)
                    }
                }));
                cells
            })
            .collect();
        result.simplified = true;
        Ok(result)
    }
}

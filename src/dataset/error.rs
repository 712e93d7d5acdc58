use crate::columns::ColumnError;
use crate::fields::FieldError;
use crate::record::RecordError;

/// Errors raised while assembling, simplifying or exporting datasets
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Simplification found no column for a required quantity
    #[error("{0}")]
    NoValuesGiven(String),

    /// Simplification found no uncertainty for a quantity and the caller demands one
    #[error("{0}")]
    NoUncertaintyGiven(String),

    /// A quantity whose simplification is not implemented
    #[error("{0} not supported")]
    Unsupported(String),

    /// A reaction combination mixing different quantities
    #[error("Coupled data with different quantities in expression: {0}")]
    CoupledQuantities(String),

    /// `append` of a dataset with different columns or reaction
    #[error("Can't add datasets because {0}")]
    Incompatible(String),

    /// Tokenizer failure, including broken table cells
    #[error(transparent)]
    Record(#[from] RecordError),

    /// BIB field interpretation failure
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Column conversion failure
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// CSV export failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error during export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON export failure
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatasetError {
    /// Error kind name as used in extraction reports, e.g. `NoValuesGivenError`
    pub fn kind_name(&self) -> &'static str {
        match self {
            DatasetError::NoValuesGiven(_) => "NoValuesGivenError",
            DatasetError::NoUncertaintyGiven(_) => "NoUncertaintyGivenError",
            DatasetError::Unsupported(_) | DatasetError::CoupledQuantities(_) => "NotImplementedError",
            DatasetError::Incompatible(_) => "IncompatibleDatasetError",
            DatasetError::Record(RecordError::BrokenNumber(_)) => "BrokenNumberError",
            DatasetError::Record(RecordError::DataSectionFormat { .. }) => "DataSectionFormatError",
            DatasetError::Record(_) => "RecordError",
            DatasetError::Field(err) => err.kind_name(),
            DatasetError::Column(ColumnError::BadUnits { .. }) => "BadUnitsError",
            DatasetError::Csv(_) => "CsvError",
            DatasetError::Io(_) => "IOError",
            DatasetError::Json(_) => "JsonError",
        }
    }

    /// The line recorded in an extraction report
    pub fn report(&self) -> String {
        format!("Encountered {}: {}", self.kind_name(), self)
    }
}

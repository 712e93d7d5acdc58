/// Errors raised while matching and converting table columns
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColumnError {
    /// A matched column whose unit has no conversion, in strict unit mode
    #[error("Column '{label}' has unrecognized units '{unit}'")]
    BadUnits {
        /// Column label
        label: String,
        /// Unit as written
        unit: String,
    },
}

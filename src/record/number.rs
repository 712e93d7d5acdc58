use super::RecordError;

/// Decode a fixed-field FORTRAN number as found in EXFOR tables.
///
/// Blank cells give `Ok(None)`. Exponents written without the `E`
/// (`1.234-05`, `9.075  -06`) and spaces inside the number are repaired
/// before giving up with [`RecordError::BrokenNumber`].
pub fn parse_fortran_number(text: &str) -> Result<Option<f64>, RecordError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Ok(Some(value));
    }

    let mut repaired = trimmed.to_string();
    if !repaired.contains(['E', 'e']) {
        let chars: Vec<char> = repaired.chars().collect();
        let tail_start = chars.len().saturating_sub(3);
        let tail: String = chars[tail_start..].iter().collect();
        let separator = if tail.matches('-').count() == 1 {
            Some('-')
        } else if tail.contains('+') {
            Some('+')
        } else {
            None
        };
        if let Some(sep) = separator {
            let head: String = chars[..tail_start].iter().collect();
            repaired = format!("{head}{}", tail.replacen(sep, &format!("E{sep}"), 1));
        }
    }
    repaired.retain(|c| c != ' ');

    repaired
        .parse::<f64>()
        .map(Some)
        .map_err(|_| RecordError::BrokenNumber(text.to_string()))
}

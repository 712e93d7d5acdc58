use super::field::line_tag;

/// Split a multi-entry request into `ENTRY`..`ENDENTRY` line groups.
///
/// Lines outside any entry (request headers, `REQUEST`/`ENDREQUEST` markers)
/// are dropped. An entry missing its `ENDENTRY` keeps whatever lines it
/// collected before the next `ENTRY` or the end of input.
pub fn split_request<S: AsRef<str>>(lines: &[S]) -> Vec<Vec<&str>> {
    let mut entries = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for line in lines.iter().map(AsRef::as_ref) {
        match line_tag(line).as_str() {
            "ENTRY" => {
                entries.extend(current.replace(vec![line]));
            }
            "ENDENTRY" => {
                if let Some(mut entry) = current.take() {
                    entry.push(line);
                    entries.push(entry);
                }
            }
            _ => {
                if let Some(entry) = current.as_mut() {
                    entry.push(line);
                }
            }
        }
    }
    entries.extend(current);
    entries
}

use std::fs;

use camino::Utf8Path;

use crate::error::VdsError;

// Header lines (trailing spaces included) exactly as FEWS ships them.
const DIAG_HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<Diag xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \n",
    "xmlns=\"http://www.wldelft.nl/fews/PI\" xsi:schemaLocation=\"http://www.wldelft.nl/fews/PI \n",
    "http://fews.wldelft.nl/schemas/version1.0/pi-schemas/pi_diag.xsd\" version=\"1.2\">\n",
);
const DIAG_FOOTER: &str = "</Diag>\n";

pub fn log_to_diag(log_path: &Utf8Path, xml_path: &Utf8Path) -> Result<(), VdsError> {
    if !log_path.exists() {
        return Ok(());
    }
    let content = fs::read_to_string(log_path.as_std_path())
        .map_err(|err| VdsError::Filesystem(err.to_string()))?;

    let mut document = String::from(DIAG_HEADER);
    for line in content.lines() {
        document.push_str(&translate_line(line)?);
        document.push('\n');
    }
    document.push_str(DIAG_FOOTER);

    fs::write(xml_path.as_std_path(), document)
        .map_err(|err| VdsError::Filesystem(err.to_string()))
}

// Offending characters are stripped, not escaped. Lossy, but what the
// downstream diag reader has always been fed.
fn translate_line(line: &str) -> Result<String, VdsError> {
    let clean: String = line
        .chars()
        .filter(|&c| !matches!(c, '<' | '>' | '&' | '"' | '\''))
        .collect();
    let clean = clean.trim();

    let parts: Vec<&str> = clean.splitn(5, " - ").collect();
    if parts.len() < 5 {
        return Err(VdsError::MalformedLogLine(line.to_string()));
    }
    let level =
        severity(parts[3]).ok_or_else(|| VdsError::UnknownLogLevel(parts[3].to_string()))?;
    Ok(format!(
        r#"<line level="{level}" description="{} [{}]"/>"#,
        parts[4], parts[0]
    ))
}

fn severity(level: &str) -> Option<&'static str> {
    match level {
        "WARNING" => Some("2"),
        "ERROR" => Some("1"),
        "INFO" => Some("3"),
        "DEBUG" => Some("4"),
        "CRITICAL" => Some("1"),
        "FATAL" => Some("1"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn translates_line_with_markup_stripped() {
        let line = r#"2020-01-01 10:00:00 - vds - mod - ERROR - bad <input> & "stuff""#;
        assert_eq!(
            translate_line(line).unwrap(),
            r#"<line level="1" description="bad input  stuff [2020-01-01 10:00:00]"/>"#
        );
    }

    #[test]
    fn message_keeps_inner_delimiter() {
        let line = "2020-01-01 10:00:00 - vds - fetch - INFO - Processing date: 2020-01-01 - rerun";
        assert_eq!(
            translate_line(line).unwrap(),
            r#"<line level="3" description="Processing date: 2020-01-01 - rerun [2020-01-01 10:00:00]"/>"#
        );
    }

    #[test]
    fn severity_table_is_fixed() {
        assert_eq!(severity("WARNING"), Some("2"));
        assert_eq!(severity("ERROR"), Some("1"));
        assert_eq!(severity("INFO"), Some("3"));
        assert_eq!(severity("DEBUG"), Some("4"));
        assert_eq!(severity("CRITICAL"), Some("1"));
        assert_eq!(severity("FATAL"), Some("1"));
        assert_eq!(severity("TRACE"), None);
    }

    #[test]
    fn unmapped_level_is_fatal() {
        let line = "2020-01-01 10:00:00 - vds - mod - NOTICE - hello";
        assert_matches!(translate_line(line), Err(VdsError::UnknownLogLevel(level)) if level == "NOTICE");
    }

    #[test]
    fn short_line_is_fatal() {
        assert_matches!(
            translate_line("not a log line"),
            Err(VdsError::MalformedLogLine(_))
        );
    }
}

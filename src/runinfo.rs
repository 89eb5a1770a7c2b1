use std::fs;

use camino::Utf8Path;
use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::VdsError;
use crate::window::RunWindow;

pub fn read_window(path: &Utf8Path) -> Result<RunWindow, VdsError> {
    let content =
        fs::read_to_string(path).map_err(|_| VdsError::RuninfoRead(path.to_owned()))?;
    let start = parse_field(&content, "startDateTime")?;
    let end = parse_field(&content, "endDateTime")?;
    Ok(RunWindow::new(start, end))
}

fn parse_field(content: &str, element: &str) -> Result<NaiveDateTime, VdsError> {
    let date = attribute(content, element, "date")?;
    let time = attribute(content, element, "time")?;
    let time = normalize_time(&time);
    NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y-%m-%d%H:%M:%S")
        .map_err(|_| VdsError::RuninfoTimestamp(format!("{date} {time}")))
}

fn attribute(content: &str, element: &str, name: &str) -> Result<String, VdsError> {
    let pattern = format!(r#"<(?:\w+:)?{element}\b[^>]*\b{name}="([^"]*)""#);
    let captured = Regex::new(&pattern)
        .unwrap()
        .captures(content)
        .and_then(|caps| caps.get(1));
    match captured {
        Some(value) => Ok(value.as_str().to_string()),
        None => Err(VdsError::RuninfoAttribute {
            element: element.to_string(),
            attribute: name.to_string(),
        }),
    }
}

// The FEWS testrunner writes HH:MM:SS.mmm here.
fn normalize_time(value: &str) -> &str {
    if value.len() == 12 {
        value.split('.').next().unwrap_or(value)
    } else {
        value
    }
}

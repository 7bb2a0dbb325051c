//! CSV export rendering for attendance sheets.

use chrono::SecondsFormat;

use crate::domain::{AttendanceEntry, Session};
use crate::error::DomainError;

/// Column headers of the data block.
pub const EXPORT_HEADERS: &[&str] = &["Name", "Roll No", "Timestamp"];

/// Render one session's attendance as a CSV document: subject/section/course
/// header rows, a blank separator, the column header row, then one row per
/// record. Rows have uneven widths, so the writer runs in flexible mode.
pub fn render_attendance_csv(
    session: &Session,
    entries: &[AttendanceEntry],
) -> Result<Vec<u8>, DomainError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record(["Subject", session.subject.as_str()])
        .map_err(|e| DomainError::ExportError(e.to_string()))?;
    wtr.write_record(["Section", session.section.as_str()])
        .map_err(|e| DomainError::ExportError(e.to_string()))?;
    wtr.write_record(["Course", session.course.as_str()])
        .map_err(|e| DomainError::ExportError(e.to_string()))?;
    wtr.write_record([""])
        .map_err(|e| DomainError::ExportError(e.to_string()))?;
    wtr.write_record(EXPORT_HEADERS)
        .map_err(|e| DomainError::ExportError(e.to_string()))?;

    for entry in entries {
        let roll_no = render_roll_no(&entry.roll_no);
        let timestamp = entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        wtr.write_record([entry.name.as_str(), roll_no.as_str(), timestamp.as_str()])
            .map_err(|e| DomainError::ExportError(e.to_string()))?;
    }

    wtr.into_inner()
        .map_err(|e| DomainError::ExportError(e.to_string()))
}

/// A roll number that parses as an integer is rendered in canonical numeric
/// form; anything else stays verbatim. Presentation only, the stored value
/// remains a string.
fn render_roll_no(roll_no: &str) -> String {
    match roll_no.parse::<i64>() {
        Ok(n) => n.to_string(),
        Err(_) => roll_no.to_string(),
    }
}

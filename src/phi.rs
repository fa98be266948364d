use crate::models::NoteHeader;
use once_cell::sync::Lazy;
use regex::Regex;

static FULL_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+$").expect("valid regex"));

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}-\d{2}-\d{2}\b|\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").expect("valid regex")
});

/// Advisory warnings for header fields that look like direct identifiers.
/// Flags, never blocks: saving a note with PHI present is the clinician's
/// call under clinic policy.
pub fn header_phi_warnings(header: &NoteHeader) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(name) = &header.client_name {
        if FULL_NAME_PATTERN.is_match(name.trim()) {
            warnings.push(
                "clientName appears to be a full name. Use minimum identifiers needed by clinic policy."
                    .to_string(),
            );
        }
    }

    if let Some(dob) = &header.dob {
        if DATE_PATTERN.is_match(dob) {
            warnings.push(
                "DOB appears to contain a date pattern. Avoid DOB unless required by policy."
                    .to_string(),
            );
        }
    }

    warnings
}

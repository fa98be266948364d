use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid regex"));

fn clean(value: &str) -> String {
    UNSAFE_CHARS.replace_all(value, "").trim().to_string()
}

/// Deterministic draft filename:
/// `{date}__{client}__Session{NN}.soap.json`. Path-unsafe characters are
/// stripped from the date and client key; fields that strip to nothing get
/// placeholder values. Total — any input yields a valid filename.
pub fn build_draft_filename(date_of_session: &str, client_key: &str, session_number: u32) -> String {
    let date = match clean(date_of_session) {
        s if s.is_empty() => "0000-00-00".to_string(),
        s => s,
    };
    let client = match clean(client_key) {
        s if s.is_empty() => "ClientKey".to_string(),
        s => s,
    };
    format!("{}__{}__Session{:02}.soap.json", date, client, session_number)
}

#[cfg(test)]
mod tests {
    use super::build_draft_filename;

    #[test]
    fn strips_punctuation_and_pads_session() {
        assert_eq!(
            build_draft_filename("2024-01-05", "CL#1!", 3),
            "2024-01-05__CL1__Session03.soap.json"
        );
    }

    #[test]
    fn empty_fields_get_placeholders() {
        assert_eq!(
            build_draft_filename("", "", 1),
            "0000-00-00__ClientKey__Session01.soap.json"
        );
        assert_eq!(
            build_draft_filename("!!!", "@@@", 12),
            "0000-00-00__ClientKey__Session12.soap.json"
        );
    }

    #[test]
    fn large_session_numbers_keep_all_digits() {
        assert_eq!(
            build_draft_filename("2024-06-01", "CL2", 123),
            "2024-06-01__CL2__Session123.soap.json"
        );
    }

    #[test]
    fn path_separators_never_survive() {
        let name = build_draft_filename("../../etc", "a/b\\c", 2);
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert_eq!(name, "etc__abc__Session02.soap.json");
    }
}

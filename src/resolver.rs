//! Identity column detection.
//!
//! Archive exports do not carry a validated schema, so the column holding a
//! person's name is located by keyword: the first label (in schema order)
//! that contains any identity keyword as a substring wins.

use crate::error::{Error, Result};

/// Keywords denoting a name/person column in archive exports.
pub const DEFAULT_IDENTITY_KEYWORDS: &[&str] = &["姓名", "名字", "人员"];

/// Find the identity column among `labels`.
///
/// Matching is case-sensitive substring containment, with no
/// normalization of either side. Empty keywords never match.
///
/// # Errors
///
/// Returns [`Error::NameColumnNotFound`] if no label contains any keyword.
///
/// # Example
///
/// ```
/// use dossier::resolver::resolve_identity_column;
///
/// let labels = vec!["序号".to_string(), "人员姓名".to_string()];
/// let column = resolve_identity_column(&labels, &["姓名"]).unwrap();
/// assert_eq!(column, "人员姓名");
/// ```
pub fn resolve_identity_column<'a, K: AsRef<str>>(
    labels: &'a [String],
    keywords: &[K],
) -> Result<&'a str> {
    labels
        .iter()
        .find(|label| {
            keywords
                .iter()
                .map(AsRef::as_ref)
                .any(|k| !k.is_empty() && label.contains(k))
        })
        .map(String::as_str)
        .ok_or_else(|| Error::NameColumnNotFound {
            keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            columns: labels.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_exact_label_match() {
        let cols = labels(&["姓名", "性别"]);
        assert_eq!(
            resolve_identity_column(&cols, DEFAULT_IDENTITY_KEYWORDS).unwrap(),
            "姓名"
        );
    }

    #[test]
    fn test_substring_match() {
        let cols = labels(&["序号", "干部名字", "性别"]);
        assert_eq!(
            resolve_identity_column(&cols, DEFAULT_IDENTITY_KEYWORDS).unwrap(),
            "干部名字"
        );
    }

    #[test]
    fn test_first_qualifying_column_in_schema_order() {
        // "人员" is listed last among keywords but its column comes first.
        let cols = labels(&["人员编号", "姓名"]);
        assert_eq!(
            resolve_identity_column(&cols, DEFAULT_IDENTITY_KEYWORDS).unwrap(),
            "人员编号"
        );
    }

    #[test]
    fn test_case_sensitive() {
        let cols = labels(&["Full Name", "Dept"]);
        assert!(resolve_identity_column(&cols, &["name"]).is_err());
        assert_eq!(resolve_identity_column(&cols, &["Name"]).unwrap(), "Full Name");
    }

    #[test]
    fn test_no_match_reports_columns() {
        let cols = labels(&["性别", "民族"]);
        let err = resolve_identity_column(&cols, DEFAULT_IDENTITY_KEYWORDS).unwrap_err();
        match err {
            Error::NameColumnNotFound { keywords, columns } => {
                assert_eq!(columns, cols);
                assert_eq!(keywords.len(), DEFAULT_IDENTITY_KEYWORDS.len());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let cols = labels(&["性别"]);
        assert!(resolve_identity_column(&cols, &[""]).is_err());
    }

    #[test]
    fn test_empty_schema() {
        assert!(resolve_identity_column::<&str>(&[], DEFAULT_IDENTITY_KEYWORDS).is_err());
    }
}

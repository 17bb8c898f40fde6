//! Keyword filtering over the name index.

/// Whether `name` matches `keyword`.
///
/// Contiguous substring test: case-sensitive, with no trimming
/// or width/diacritic folding. The empty keyword matches everything.
#[inline]
pub fn matches(name: &str, keyword: &str) -> bool {
    keyword.is_empty() || name.contains(keyword)
}

/// Filter `names` down to those containing `keyword`.
///
/// An absent or empty keyword returns every name. The result is always an
/// order-preserving subsequence of `names`.
///
/// # Example
///
/// ```
/// use dossier::search::filter_names;
///
/// let names = vec!["Li Hua".to_string(), "Wang Wei".to_string()];
/// assert_eq!(filter_names(&names, Some("Wang")), vec!["Wang Wei"]);
/// assert_eq!(filter_names(&names, None).len(), 2);
/// ```
pub fn filter_names<'a, S: AsRef<str>>(names: &'a [S], keyword: Option<&str>) -> Vec<&'a str> {
    let keyword = keyword.unwrap_or_default();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| matches(name, keyword))
        .collect()
}

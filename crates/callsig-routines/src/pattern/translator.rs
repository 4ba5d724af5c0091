//! Routine reference to search pattern translation

/// Catalog and routine name patterns derived from a routine reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutinePattern {
    /// Escaped catalog (Oracle: package) pattern, `None` for a standalone routine
    pub catalog: Option<String>,
    /// Escaped routine name pattern
    pub name: String,
}

/// Translate a name into an uppercase search pattern with `_` escaped
///
/// # Examples
///
/// ```
/// use callsig_routines::translate_to_name_pattern;
///
/// assert_eq!(
///     translate_to_name_pattern(Some("property_tax"), "\\"),
///     Some("PROPERTY\\_TAX".to_string())
/// );
/// assert_eq!(translate_to_name_pattern(Some("foo"), "\\"), Some("FOO".to_string()));
/// assert_eq!(translate_to_name_pattern(None, "\\"), None);
/// ```
pub fn translate_to_name_pattern(text: Option<&str>, escape: &str) -> Option<String> {
    let upper_cased = text?.to_uppercase();
    if upper_cased.contains('_') {
        Some(upper_cased.replace('_', &format!("{}_", escape)))
    } else {
        Some(upper_cased)
    }
}

/// Split a `catalog.name` reference at the first `.` and translate both parts
///
/// # Examples
///
/// ```
/// use callsig_routines::split_reference;
///
/// let pattern = split_reference("pkg.proc_name", "\\");
/// assert_eq!(pattern.catalog.as_deref(), Some("PKG"));
/// assert_eq!(pattern.name, "PROC\\_NAME");
/// ```
pub fn split_reference(reference: &str, escape: &str) -> RoutinePattern {
    let (catalog, name) = match reference.split_once('.') {
        Some((catalog, name)) => (Some(catalog), name),
        None => (None, reference),
    };
    RoutinePattern {
        catalog: translate_to_name_pattern(catalog, escape),
        name: translate_to_name_pattern(Some(name), escape).unwrap_or_default(),
    }
}

//! Tests for search pattern translation

use super::*;

#[test]
fn test_translate_none() {
    assert_eq!(translate_to_name_pattern(None, "\\"), None);
    assert_eq!(translate_to_name_pattern(None, "/"), None);
}

#[test]
fn test_translate_without_underscore_is_unchanged() {
    for escape in ["\\", "/", "!!", ""] {
        assert_eq!(
            translate_to_name_pattern(Some("FOO"), escape),
            Some("FOO".to_string())
        );
    }
}

#[test]
fn test_translate_uppercases() {
    assert_eq!(
        translate_to_name_pattern(Some("sales"), "\\"),
        Some("SALES".to_string())
    );
}

#[test]
fn test_translate_escapes_every_underscore() {
    assert_eq!(
        translate_to_name_pattern(Some("property_tax"), "\\"),
        Some("PROPERTY\\_TAX".to_string())
    );
    assert_eq!(
        translate_to_name_pattern(Some("a_b_c"), "\\"),
        Some("A\\_B\\_C".to_string())
    );
    assert_eq!(
        translate_to_name_pattern(Some("_lead"), "/"),
        Some("/_LEAD".to_string())
    );
}

#[test]
fn test_translate_multi_character_escape() {
    assert_eq!(
        translate_to_name_pattern(Some("x_y"), "!!"),
        Some("X!!_Y".to_string())
    );
}

#[test]
fn test_split_reference_with_catalog() {
    let pattern = split_reference("pkg.proc_name", "\\");
    assert_eq!(pattern.catalog, Some("PKG".to_string()));
    assert_eq!(pattern.name, "PROC\\_NAME");
}

#[test]
fn test_split_reference_escapes_catalog() {
    let pattern = split_reference("stored_procedure_proxy.negate_procedure", "\\");
    assert_eq!(
        pattern.catalog,
        Some("STORED\\_PROCEDURE\\_PROXY".to_string())
    );
    assert_eq!(pattern.name, "NEGATE\\_PROCEDURE");
}

#[test]
fn test_split_reference_without_catalog() {
    let pattern = split_reference("proc_name", "\\");
    assert_eq!(pattern.catalog, None);
    assert_eq!(pattern.name, "PROC\\_NAME");
}

#[test]
fn test_split_reference_uses_first_dot() {
    let pattern = split_reference("a.b.c", "\\");
    assert_eq!(pattern.catalog, Some("A".to_string()));
    assert_eq!(pattern.name, "B.C");
}

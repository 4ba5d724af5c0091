//! JDBC escape call syntax

use callsig_core::{ParameterDescriptor, ParameterRole, RoutineKind};

/// Build the escape-syntax call statement for a resolved routine
///
/// Every declared parameter gets a `?` placeholder in declaration order; a
/// function's result is bound through the leading `? =`.
///
/// # Examples
///
/// ```
/// use callsig_core::{ParameterDescriptor, ParameterRole, RoutineKind};
/// use callsig_routines::build_call_statement;
///
/// let params = vec![
///     ParameterDescriptor::new("SUBTOTAL", 2, ParameterRole::In),
///     ParameterDescriptor::new("TAX", 2, ParameterRole::Out),
/// ];
/// let sql = build_call_statement("property_tax", RoutineKind::Procedure, &params);
/// assert_eq!(sql, "{call property_tax(?, ?)}");
/// ```
pub fn build_call_statement(
    routine: &str,
    kind: RoutineKind,
    parameters: &[ParameterDescriptor],
) -> String {
    let placeholders = parameters
        .iter()
        .filter(|p| p.role() != ParameterRole::Result)
        .map(|_| "?")
        .collect::<Vec<_>>()
        .join(", ");

    match kind {
        RoutineKind::Procedure => format!("{{call {}({})}}", routine, placeholders),
        RoutineKind::Function => format!("{{? = call {}({})}}", routine, placeholders),
    }
}

/// Render the declared parameters as `NAME ROLE` pairs for log output,
/// e.g. `SUBTOTAL IN, TAX OUT`
pub fn describe_signature(parameters: &[ParameterDescriptor]) -> String {
    parameters
        .iter()
        .map(|p| format!("{} {}", p.name(), p.role().as_sql()))
        .collect::<Vec<_>>()
        .join(", ")
}

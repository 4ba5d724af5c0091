//! Classification of catalog rows into parameter descriptors

use callsig_core::direction::{
    FUNCTION_COLUMN_IN, FUNCTION_COLUMN_RESULT, PROCEDURE_COLUMN_IN, PROCEDURE_COLUMN_IN_OUT,
    PROCEDURE_COLUMN_OUT,
};
use callsig_core::{
    CallsigError, ParameterDescriptor, ParameterRole, ParameterRow, RESULT_PARAMETER_NAME, Result,
    RoutineKind,
};

/// Classify one metadata row of `routine`.
///
/// Procedures accept IN, INOUT and OUT parameters; functions accept IN
/// parameters and their result. Any other direction code, such as a
/// cursor-returning parameter, is rejected rather than dropped.
///
/// # Examples
///
/// ```
/// use callsig_core::{direction, sql_types, ParameterRole, ParameterRow, RoutineKind};
/// use callsig_routines::classify_parameter;
///
/// let row = ParameterRow::unnamed(sql_types::NUMERIC, direction::FUNCTION_COLUMN_RESULT);
/// let param = classify_parameter("sales_tax", &row, RoutineKind::Function).unwrap();
/// assert_eq!(param.name(), "result");
/// assert_eq!(param.role(), ParameterRole::Result);
/// ```
pub fn classify_parameter(
    routine: &str,
    row: &ParameterRow,
    kind: RoutineKind,
) -> Result<ParameterDescriptor> {
    let name = row.name.as_deref().unwrap_or_default();
    let role = match (kind, row.direction) {
        (RoutineKind::Procedure, PROCEDURE_COLUMN_IN) => ParameterRole::In,
        (RoutineKind::Procedure, PROCEDURE_COLUMN_IN_OUT) => ParameterRole::InOut,
        (RoutineKind::Procedure, PROCEDURE_COLUMN_OUT) => ParameterRole::Out,
        (RoutineKind::Function, FUNCTION_COLUMN_IN) => ParameterRole::In,
        (RoutineKind::Function, FUNCTION_COLUMN_RESULT) => ParameterRole::Result,
        (_, code) => {
            return Err(CallsigError::UnrecognizedParameterDirection {
                routine: routine.to_string(),
                parameter: name.to_string(),
                code,
            });
        }
    };

    let name = if role == ParameterRole::Result && name.is_empty() {
        RESULT_PARAMETER_NAME
    } else {
        name
    };

    Ok(ParameterDescriptor::new(name, row.sql_type, role).with_scale(row.scale))
}

//! Argument binder

use callsig_core::{ArgumentMap, BindMode, BoundArguments, ParameterDescriptor, Value};
use std::collections::HashMap;

/// Parameters the caller may supply a value for (IN and INOUT), in order
pub fn input_parameters(
    parameters: &[ParameterDescriptor],
) -> impl Iterator<Item = &ParameterDescriptor> {
    parameters.iter().filter(|p| p.role().is_input())
}

/// Look up the value for a parameter, trying the exact name first and the
/// lowercased name second. Unsupplied values bind as NULL.
///
/// # Examples
///
/// ```
/// use callsig_core::{ArgumentMap, ParameterDescriptor, ParameterRole, Value};
/// use callsig_routines::extract_value;
///
/// let param = ParameterDescriptor::new("SUBTOTAL", 2, ParameterRole::In);
/// let values = ArgumentMap::from([("subtotal".to_string(), Value::Float(100.0))]);
/// assert_eq!(extract_value(&values, &param), Value::Float(100.0));
/// ```
pub fn extract_value(values: &ArgumentMap, parameter: &ParameterDescriptor) -> Value {
    let name = parameter.name();
    match values.get(name) {
        Some(value) if !value.is_null() => value.clone(),
        _ => values
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or(Value::Null),
    }
}

/// Bind caller values to the input parameters of a resolved signature.
///
/// OUT and RESULT parameters never consume a value. Missing values are not an
/// error here; whether a NULL input is acceptable is up to the routine.
pub fn bind_arguments(
    parameters: &[ParameterDescriptor],
    values: &ArgumentMap,
    mode: BindMode,
) -> BoundArguments {
    match mode {
        BindMode::Positional => BoundArguments::Positional(
            input_parameters(parameters)
                .map(|p| extract_value(values, p))
                .collect(),
        ),
        BindMode::Named => {
            // Later parameters overwrite earlier ones sharing a name.
            let mut named = HashMap::new();
            for parameter in input_parameters(parameters) {
                named.insert(parameter.name().to_string(), extract_value(values, parameter));
            }
            BoundArguments::Named(named)
        }
    }
}

//! Signature lookup against the catalog

use crate::pattern::split_reference;
use crate::signature::classify_parameter;
use callsig_core::{ParameterCursor, ParameterDescriptor, Result, RoutineKind, RoutineMetadata};

/// Resolves routine references into their declared parameters
pub struct SignatureResolver<'a> {
    metadata: &'a dyn RoutineMetadata,
}

impl<'a> SignatureResolver<'a> {
    pub fn new(metadata: &'a dyn RoutineMetadata) -> Self {
        Self { metadata }
    }

    /// Resolve the parameters of `reference` in catalog order.
    ///
    /// A routine without parameters, or one the catalog does not know,
    /// resolves to an empty list.
    pub async fn resolve(
        &self,
        reference: &str,
        kind: RoutineKind,
    ) -> Result<Vec<ParameterDescriptor>> {
        let escape = self.metadata.search_string_escape().await?;
        let pattern = split_reference(reference, &escape);
        tracing::debug!(
            routine = %reference,
            kind = %kind,
            catalog = ?pattern.catalog,
            name = %pattern.name,
            "resolving routine signature"
        );

        let catalog = pattern.catalog.as_deref();
        let cursor = match kind {
            RoutineKind::Procedure => {
                self.metadata
                    .procedure_columns(catalog, None, Some(&pattern.name), None)
                    .await?
            }
            RoutineKind::Function => {
                self.metadata
                    .function_columns(catalog, None, Some(&pattern.name), None)
                    .await?
            }
        };

        let parameters = read_parameters(cursor, reference, kind).await?;
        tracing::debug!(
            routine = %reference,
            parameter_count = parameters.len(),
            "resolved routine signature"
        );
        Ok(parameters)
    }
}

/// Drain and close the cursor. The cursor is closed even when a row fails to
/// classify; the first error wins.
async fn read_parameters(
    mut cursor: Box<dyn ParameterCursor>,
    reference: &str,
    kind: RoutineKind,
) -> Result<Vec<ParameterDescriptor>> {
    let collected = collect_parameters(cursor.as_mut(), reference, kind).await;
    let closed = cursor.close().await;

    match (collected, closed) {
        (Ok(parameters), Ok(())) => Ok(parameters),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_error)) => {
            tracing::warn!(
                routine = %reference,
                error = %close_error,
                "failed to close parameter cursor after error"
            );
            Err(e)
        }
    }
}

async fn collect_parameters(
    cursor: &mut dyn ParameterCursor,
    reference: &str,
    kind: RoutineKind,
) -> Result<Vec<ParameterDescriptor>> {
    let mut parameters = Vec::new();
    while let Some(row) = cursor.next_row().await? {
        parameters.push(classify_parameter(reference, &row, kind)?);
    }
    Ok(parameters)
}

//! Routine listing

use crate::pattern::translate_to_name_pattern;
use callsig_core::{Result, RoutineKind, RoutineMetadata, RoutineSummary};

/// List the procedures or functions of a catalog, or of every catalog when
/// `catalog` is `None`.
pub async fn list_routines(
    metadata: &dyn RoutineMetadata,
    catalog: Option<&str>,
    kind: RoutineKind,
) -> Result<Vec<RoutineSummary>> {
    let escape = metadata.search_string_escape().await?;
    let catalog = translate_to_name_pattern(catalog, &escape);
    let routines = match kind {
        RoutineKind::Procedure => metadata.procedures(catalog.as_deref(), None, None).await?,
        RoutineKind::Function => metadata.functions(catalog.as_deref(), None, None).await?,
    };
    tracing::debug!(
        catalog = ?catalog,
        kind = %kind,
        count = routines.len(),
        "listed routines"
    );
    Ok(routines)
}

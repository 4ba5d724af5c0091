//! Catalog metadata facility

use crate::{ParameterRow, Result, RoutineSummary};
use async_trait::async_trait;

/// A forward-only cursor over procedure or function column rows.
///
/// A cursor holds resources on the underlying connection. Whoever opens one
/// must call [`ParameterCursor::close`] exactly once, whether iteration
/// succeeded or not.
#[async_trait]
pub trait ParameterCursor: Send {
    /// Fetch the next row, or `None` once the cursor is exhausted
    async fn next_row(&mut self) -> Result<Option<ParameterRow>>;

    /// Release the cursor
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Catalog metadata of a live connection.
///
/// Pattern arguments use SQL `LIKE` semantics: `_` and `%` are wildcards
/// unless preceded by [`RoutineMetadata::search_string_escape`], and `None`
/// means "do not filter on this dimension".
#[async_trait]
pub trait RoutineMetadata: Send + Sync {
    /// The string used to escape wildcard characters in search patterns
    async fn search_string_escape(&self) -> Result<String>;

    /// Open a cursor over the parameters of matching procedures
    async fn procedure_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_pattern: Option<&str>,
        column_pattern: Option<&str>,
    ) -> Result<Box<dyn ParameterCursor>>;

    /// Open a cursor over the parameters and return value of matching functions
    async fn function_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_pattern: Option<&str>,
        column_pattern: Option<&str>,
    ) -> Result<Box<dyn ParameterCursor>>;

    /// List matching procedures
    async fn procedures(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_pattern: Option<&str>,
    ) -> Result<Vec<RoutineSummary>>;

    /// List matching functions
    async fn functions(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_pattern: Option<&str>,
    ) -> Result<Vec<RoutineSummary>>;
}

//! Generic routine caller

use crate::binding::bind_arguments;
use crate::fingerprint::Fingerprint;
use crate::invoke::{build_call_statement, describe_signature};
use crate::signature::{SignatureResolver, list_routines};
use callsig_core::{
    ArgumentMap, BindMode, CallerConfig, Invocation, OutputMap, ParameterDescriptor, Result,
    RoutineExecutor, RoutineKind, RoutineMetadata, RoutineSummary,
};
use std::sync::Arc;
use std::time::Instant;

/// Calls stored procedures and functions without knowing their signatures
/// in advance.
///
/// Each call reads the routine's parameters from the catalog, binds the
/// supplied values to its IN and INOUT parameters and returns every OUT,
/// INOUT and RESULT value keyed by parameter name.
pub struct GenericRoutineCaller {
    metadata: Arc<dyn RoutineMetadata>,
    executor: Arc<dyn RoutineExecutor>,
    config: CallerConfig,
}

impl GenericRoutineCaller {
    /// Create a caller with the default configuration (positional binding)
    pub fn new(metadata: Arc<dyn RoutineMetadata>, executor: Arc<dyn RoutineExecutor>) -> Self {
        Self::with_config(metadata, executor, CallerConfig::default())
    }

    pub fn with_config(
        metadata: Arc<dyn RoutineMetadata>,
        executor: Arc<dyn RoutineExecutor>,
        config: CallerConfig,
    ) -> Self {
        Self {
            metadata,
            executor,
            config,
        }
    }

    pub fn config(&self) -> &CallerConfig {
        &self.config
    }

    /// Call a stored procedure, returning its OUT and INOUT values
    pub async fn call_procedure(&self, reference: &str, values: &ArgumentMap) -> Result<OutputMap> {
        self.invoke(reference, RoutineKind::Procedure, values, self.config.bind_mode)
            .await
    }

    /// Call a stored function. Its return value is keyed `"result"` unless
    /// the catalog names it.
    pub async fn call_function(&self, reference: &str, values: &ArgumentMap) -> Result<OutputMap> {
        self.invoke(reference, RoutineKind::Function, values, self.config.bind_mode)
            .await
    }

    /// Resolve, bind and execute a routine call
    pub async fn invoke(
        &self,
        reference: &str,
        kind: RoutineKind,
        values: &ArgumentMap,
        mode: BindMode,
    ) -> Result<OutputMap> {
        let start = Instant::now();
        let result = self.resolve_and_execute(reference, kind, values, mode).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(outputs) => tracing::debug!(
                routine = %reference,
                kind = %kind,
                outputs = outputs.len(),
                elapsed_ms,
                "routine call completed"
            ),
            Err(e) => tracing::warn!(
                routine = %reference,
                kind = %kind,
                error = %e,
                elapsed_ms,
                "routine call failed"
            ),
        }
        result
    }

    async fn resolve_and_execute(
        &self,
        reference: &str,
        kind: RoutineKind,
        values: &ArgumentMap,
        mode: BindMode,
    ) -> Result<OutputMap> {
        let parameters = self.describe(reference, kind).await?;
        let statement = build_call_statement(reference, kind, &parameters);
        let arguments = bind_arguments(&parameters, values, mode);

        if self.config.fingerprint_calls {
            tracing::debug!(
                routine = %reference,
                sql_id = %Fingerprint::of(&statement),
                statement = %statement,
                signature = %describe_signature(&parameters),
                mode = ?mode,
                argument_types = ?arguments.type_names(),
                "executing routine"
            );
        }

        let invocation = Invocation {
            routine: reference.to_string(),
            kind,
            parameters,
            statement,
        };
        self.executor.execute(&invocation, arguments).await
    }

    /// Resolve the parameters of a routine without calling it
    pub async fn describe(
        &self,
        reference: &str,
        kind: RoutineKind,
    ) -> Result<Vec<ParameterDescriptor>> {
        SignatureResolver::new(self.metadata.as_ref())
            .resolve(reference, kind)
            .await
    }

    pub async fn describe_procedure(&self, reference: &str) -> Result<Vec<ParameterDescriptor>> {
        self.describe(reference, RoutineKind::Procedure).await
    }

    pub async fn describe_function(&self, reference: &str) -> Result<Vec<ParameterDescriptor>> {
        self.describe(reference, RoutineKind::Function).await
    }

    /// List procedures, optionally restricted to one catalog (Oracle: package)
    pub async fn list_procedures(&self, catalog: Option<&str>) -> Result<Vec<RoutineSummary>> {
        list_routines(self.metadata.as_ref(), catalog, RoutineKind::Procedure).await
    }

    /// List functions, optionally restricted to one catalog (Oracle: package)
    pub async fn list_functions(&self, catalog: Option<&str>) -> Result<Vec<RoutineSummary>> {
        list_routines(self.metadata.as_ref(), catalog, RoutineKind::Function).await
    }

    /// Fingerprint a statement the way the database identifies it
    pub fn fingerprint(&self, statement: &str) -> Fingerprint {
        Fingerprint::of(statement)
    }
}

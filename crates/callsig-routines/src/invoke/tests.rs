//! Tests for routine invocation

use super::*;
use crate::test_support::{MockCatalog, MockExecutor};
use callsig_core::{
    ArgumentMap, BindMode, BoundArguments, CallerConfig, CallsigError, OutputMap,
    ParameterDescriptor, ParameterRole, ParameterRow, RoutineKind, Value, direction, sql_types,
};
use std::sync::Arc;

fn caller(mode: BindMode) -> (GenericRoutineCaller, Arc<MockCatalog>, Arc<MockExecutor>) {
    let catalog = Arc::new(MockCatalog::with_tax_routines());
    let executor = Arc::new(MockExecutor::with_tax_routines());
    let caller = GenericRoutineCaller::with_config(
        catalog.clone(),
        executor.clone(),
        CallerConfig::default().with_bind_mode(mode),
    );
    (caller, catalog, executor)
}

fn args(entries: &[(&str, Value)]) -> ArgumentMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn assert_close(outputs: &OutputMap, key: &str, expected: f64) {
    let actual = outputs
        .get(key)
        .and_then(Value::as_f64)
        .unwrap_or_else(|| panic!("missing output {key}: {outputs:?}"));
    assert!(
        (actual - expected).abs() < 1e-7,
        "{key}: expected {expected}, got {actual}"
    );
}

const MODES: [BindMode; 2] = [BindMode::Positional, BindMode::Named];

// ============================================================================
// Call statement
// ============================================================================

mod statement_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_procedure_statement() {
        let params = vec![
            ParameterDescriptor::new("SUBTOTAL", sql_types::NUMERIC, ParameterRole::In),
            ParameterDescriptor::new("TAX", sql_types::NUMERIC, ParameterRole::Out),
        ];
        assert_eq!(
            build_call_statement("property_tax", RoutineKind::Procedure, &params),
            "{call property_tax(?, ?)}"
        );
    }

    #[test]
    fn test_function_statement() {
        let params = vec![
            ParameterDescriptor::new("result", sql_types::NUMERIC, ParameterRole::Result),
            ParameterDescriptor::new("SUBTOTAL", sql_types::NUMERIC, ParameterRole::In),
        ];
        assert_eq!(
            build_call_statement("sales_tax", RoutineKind::Function, &params),
            "{? = call sales_tax(?)}"
        );
    }

    #[test]
    fn test_describe_signature() {
        let params = vec![
            ParameterDescriptor::new("result", sql_types::NUMERIC, ParameterRole::Result),
            ParameterDescriptor::new("SUBTOTAL", sql_types::NUMERIC, ParameterRole::In),
            ParameterDescriptor::new("B", sql_types::BOOLEAN, ParameterRole::InOut),
            ParameterDescriptor::new("TAX", sql_types::NUMERIC, ParameterRole::Out),
        ];
        assert_eq!(
            describe_signature(&params),
            "result RETURN, SUBTOTAL IN, B IN OUT, TAX OUT"
        );
        assert_eq!(describe_signature(&[]), "");
    }

    #[test]
    fn test_statement_without_parameters() {
        assert_eq!(
            build_call_statement("pkg.do_something", RoutineKind::Procedure, &[]),
            "{call pkg.do_something()}"
        );
    }
}

// ============================================================================
// End-to-end calls
// ============================================================================

mod caller_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_call_procedure() {
        for mode in MODES {
            let (caller, _, _) = caller(mode);
            let outputs = caller
                .call_procedure("property_tax", &args(&[("subtotal", Value::Float(100.0))]))
                .await
                .unwrap();

            assert_eq!(outputs.len(), 1, "{mode:?}");
            assert_close(&outputs, "TAX", 6.0);
        }
    }

    #[tokio::test]
    async fn test_call_function() {
        for mode in MODES {
            let (caller, _, _) = caller(mode);
            let outputs = caller
                .call_function("sales_tax", &args(&[("subtotal", Value::Float(100.0))]))
                .await
                .unwrap();

            assert_eq!(outputs.len(), 1, "{mode:?}");
            assert_close(&outputs, "result", 6.0);
        }
    }

    #[tokio::test]
    async fn test_call_packaged_procedure_with_inout() {
        let (caller, _, _) = caller(BindMode::Named);
        let outputs = caller
            .call_procedure(
                "stored_procedure_proxy.negate_procedure",
                &args(&[("b", Value::Bool(true))]),
            )
            .await
            .unwrap();
        assert_eq!(outputs, OutputMap::from([("B".to_string(), Value::Bool(false))]));
    }

    #[tokio::test]
    async fn test_positional_arguments_reach_executor() {
        let (caller, _, executor) = caller(BindMode::Positional);
        caller
            .call_procedure("property_tax", &args(&[("subtotal", Value::Float(100.0))]))
            .await
            .unwrap();

        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        let (invocation, arguments) = &calls[0];
        assert_eq!(invocation.routine, "property_tax");
        assert_eq!(invocation.kind, RoutineKind::Procedure);
        assert_eq!(invocation.statement, "{call property_tax(?, ?)}");
        assert_eq!(invocation.parameters.len(), 2);
        assert_eq!(
            *arguments,
            BoundArguments::Positional(vec![Value::Float(100.0)])
        );
    }

    #[tokio::test]
    async fn test_named_arguments_reach_executor() {
        let (caller, _, executor) = caller(BindMode::Named);
        caller
            .call_function("sales_tax", &args(&[("subtotal", Value::Float(100.0))]))
            .await
            .unwrap();

        let (invocation, arguments) = executor.calls().remove(0);
        assert_eq!(invocation.statement, "{? = call sales_tax(?)}");
        let outputs: Vec<_> = invocation.output_parameters().map(|p| p.name()).collect();
        assert_eq!(outputs, vec!["result"]);
        assert_eq!(
            arguments,
            BoundArguments::Named(args(&[("SUBTOTAL", Value::Float(100.0))]))
        );
    }

    #[tokio::test]
    async fn test_explicit_mode_overrides_config() {
        let (caller, _, executor) = caller(BindMode::Positional);
        caller
            .invoke(
                "property_tax",
                RoutineKind::Procedure,
                &args(&[("subtotal", Value::Float(50.0))]),
                BindMode::Named,
            )
            .await
            .unwrap();
        assert_eq!(executor.calls()[0].1.mode(), BindMode::Named);
    }

    #[tokio::test]
    async fn test_missing_argument_binds_null() {
        let (caller, _, executor) = caller(BindMode::Positional);
        let outputs = caller
            .call_procedure("property_tax", &ArgumentMap::new())
            .await
            .unwrap();

        assert_close(&outputs, "TAX", 0.0);
        assert_eq!(
            executor.calls()[0].1,
            BoundArguments::Positional(vec![Value::Null])
        );
    }

    #[tokio::test]
    async fn test_zero_parameter_routine() {
        let catalog = Arc::new(MockCatalog::new());
        let executor = Arc::new(
            MockExecutor::new().with_routine("refresh_stats", |_| Ok(OutputMap::new())),
        );
        let caller = GenericRoutineCaller::new(catalog.clone(), executor.clone());

        let outputs = caller
            .call_procedure("refresh_stats", &ArgumentMap::new())
            .await
            .unwrap();
        assert!(outputs.is_empty());

        let (invocation, arguments) = executor.calls().remove(0);
        assert_eq!(invocation.statement, "{call refresh_stats()}");
        assert!(arguments.is_empty());
    }

    #[tokio::test]
    async fn test_signature_resolved_on_every_call() {
        let (caller, catalog, _) = caller(BindMode::Positional);
        let values = args(&[("subtotal", Value::Float(100.0))]);
        caller.call_procedure("property_tax", &values).await.unwrap();
        caller.call_procedure("property_tax", &values).await.unwrap();

        assert_eq!(catalog.requests().len(), 2);
        assert_eq!(catalog.opened_cursors(), 2);
        assert_eq!(catalog.closed_cursors(), 2);
    }

    #[tokio::test]
    async fn test_describe() {
        let (caller, _, executor) = caller(BindMode::Positional);
        let params = caller.describe_function("sales_tax").await.unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].role(), ParameterRole::Result);

        let params = caller.describe_procedure("property_tax").await.unwrap();
        assert_eq!(params[1].name(), "TAX");
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_routines() {
        let (caller, _, _) = caller(BindMode::Positional);
        let functions = caller.list_functions(None).await.unwrap();
        assert_eq!(functions.len(), 2);

        let procedures = caller
            .list_procedures(Some("stored_procedure_proxy"))
            .await
            .unwrap();
        assert_eq!(procedures.len(), 1);
        assert_eq!(
            procedures[0].reference(),
            "STORED_PROCEDURE_PROXY.NEGATE_PROCEDURE"
        );
    }

    #[test]
    fn test_fingerprint() {
        let (caller, _, _) = caller(BindMode::Positional);
        assert_eq!(
            caller.fingerprint("SELECT * from dual where dummy = :1 ").as_str(),
            "71hmmykrsa7wp"
        );
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_unrecognized_direction_prevents_execution() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.add_procedure(
            None,
            "OPEN_ORDERS",
            vec![
                ParameterRow::new("CUSTOMER", sql_types::INTEGER, direction::PROCEDURE_COLUMN_IN),
                ParameterRow::new("ORDERS", sql_types::REF_CURSOR, 42),
            ],
        );
        let executor = Arc::new(MockExecutor::new());
        let caller = GenericRoutineCaller::new(catalog.clone(), executor.clone());

        let result = caller
            .call_procedure("open_orders", &args(&[("customer", Value::Int(1))]))
            .await;
        match result {
            Err(CallsigError::UnrecognizedParameterDirection {
                routine,
                parameter,
                code,
            }) => {
                assert_eq!(routine, "open_orders");
                assert_eq!(parameter, "ORDERS");
                assert_eq!(code, 42);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(executor.calls().is_empty());
        assert_eq!(catalog.closed_cursors(), 1);
    }

    #[tokio::test]
    async fn test_metadata_failure_propagates() {
        let catalog = Arc::new(MockCatalog::with_tax_routines().failing_escape());
        let executor = Arc::new(MockExecutor::with_tax_routines());
        let caller = GenericRoutineCaller::new(catalog, executor.clone());

        let result = caller.call_function("sales_tax", &ArgumentMap::new()).await;
        assert!(matches!(result, Err(CallsigError::Metadata(_))));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_execution_failure_propagates() {
        let catalog = Arc::new(MockCatalog::with_tax_routines());
        let executor = Arc::new(MockExecutor::new().with_routine("property_tax", |_| {
            Err(CallsigError::Execution(
                "ORA-20001: subtotal must be positive".into(),
            ))
        }));
        let caller = GenericRoutineCaller::new(catalog, executor);

        let err = caller
            .call_procedure("property_tax", &args(&[("subtotal", Value::Float(-1.0))]))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Execution error: ORA-20001: subtotal must be positive"
        );
    }

    #[tokio::test]
    async fn test_unknown_routine_reaches_executor() {
        let (caller, _, executor) = caller(BindMode::Positional);
        let result = caller
            .call_procedure("no_such_proc", &ArgumentMap::new())
            .await;

        assert!(matches!(result, Err(CallsigError::Execution(_))));
        assert_eq!(executor.calls().len(), 1);
        assert!(executor.calls()[0].0.parameters.is_empty());
    }
}

//! In-memory catalog and executor shared by the unit tests

use async_trait::async_trait;
use callsig_core::{
    BoundArguments, CallsigError, Invocation, OutputMap, ParameterCursor, ParameterRow, Result,
    RoutineExecutor, RoutineKind, RoutineMetadata, RoutineSummary, Value, direction, sql_types,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A row a mock cursor yields, or a failure it raises instead
#[derive(Debug, Clone)]
pub enum MockRow {
    Row(ParameterRow),
    Fail(String),
}

impl From<ParameterRow> for MockRow {
    fn from(row: ParameterRow) -> Self {
        MockRow::Row(row)
    }
}

/// Arguments of one `procedure_columns` / `function_columns` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRequest {
    pub kind: RoutineKind,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: Option<String>,
    pub column: Option<String>,
}

#[derive(Debug, Clone)]
struct MockRoutine {
    catalog: Option<String>,
    name: String,
    kind: RoutineKind,
    rows: Vec<MockRow>,
}

/// Catalog metadata held in memory. Routines are stored under their
/// uppercase names, the way Oracle reports them.
pub struct MockCatalog {
    escape: String,
    routines: Mutex<Vec<MockRoutine>>,
    requests: Mutex<Vec<ColumnRequest>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    fail_close: bool,
    fail_escape: bool,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            escape: "/".to_string(),
            routines: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
            fail_close: false,
            fail_escape: false,
        }
    }

    /// Oracle's `property_tax`, `sales_tax` and a packaged pair of routines
    pub fn with_tax_routines() -> Self {
        let catalog = Self::new();
        catalog.add_procedure(
            None,
            "PROPERTY_TAX",
            vec![
                ParameterRow::new("SUBTOTAL", sql_types::NUMERIC, direction::PROCEDURE_COLUMN_IN),
                ParameterRow::new("TAX", sql_types::NUMERIC, direction::PROCEDURE_COLUMN_OUT),
            ],
        );
        catalog.add_function(
            None,
            "SALES_TAX",
            vec![
                ParameterRow::unnamed(sql_types::NUMERIC, direction::FUNCTION_COLUMN_RESULT),
                ParameterRow::new("SUBTOTAL", sql_types::NUMERIC, direction::FUNCTION_COLUMN_IN),
            ],
        );
        catalog.add_procedure(
            Some("STORED_PROCEDURE_PROXY"),
            "NEGATE_PROCEDURE",
            vec![
                ParameterRow::new("B", sql_types::BOOLEAN, direction::PROCEDURE_COLUMN_IN_OUT),
            ],
        );
        catalog.add_function(
            Some("STORED_PROCEDURE_PROXY"),
            "NEGATE_FUNCTION",
            vec![
                ParameterRow::unnamed(sql_types::BOOLEAN, direction::FUNCTION_COLUMN_RESULT),
                ParameterRow::new("B", sql_types::BOOLEAN, direction::FUNCTION_COLUMN_IN),
            ],
        );
        catalog
    }

    pub fn with_escape(mut self, escape: &str) -> Self {
        self.escape = escape.to_string();
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn failing_escape(mut self) -> Self {
        self.fail_escape = true;
        self
    }

    pub fn add_procedure(&self, catalog: Option<&str>, name: &str, rows: Vec<ParameterRow>) {
        let rows = rows.into_iter().map(MockRow::from).collect();
        self.add(catalog, name, RoutineKind::Procedure, rows);
    }

    pub fn add_function(&self, catalog: Option<&str>, name: &str, rows: Vec<ParameterRow>) {
        let rows = rows.into_iter().map(MockRow::from).collect();
        self.add(catalog, name, RoutineKind::Function, rows);
    }

    pub fn add(&self, catalog: Option<&str>, name: &str, kind: RoutineKind, rows: Vec<MockRow>) {
        let mut routines = self.routines.lock().unwrap();
        routines.retain(|r| !(r.kind == kind && r.name == name && r.catalog.as_deref() == catalog));
        routines.push(MockRoutine {
            catalog: catalog.map(str::to_string),
            name: name.to_string(),
            kind,
            rows,
        });
    }

    pub fn requests(&self) -> Vec<ColumnRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn opened_cursors(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed_cursors(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// `LIKE` matching without `%`: `_` matches one character unless escaped
    fn matches(&self, pattern: Option<&str>, value: Option<&str>) -> bool {
        let Some(pattern) = pattern else {
            return true;
        };
        let Some(value) = value else {
            return false;
        };

        let mut expected = Vec::new();
        let mut rest = pattern;
        while let Some(c) = rest.chars().next() {
            if !self.escape.is_empty() && rest.starts_with(&self.escape) {
                rest = &rest[self.escape.len()..];
                if let Some(escaped) = rest.chars().next() {
                    expected.push(Some(escaped));
                    rest = &rest[escaped.len_utf8()..];
                }
            } else {
                expected.push(if c == '_' { None } else { Some(c) });
                rest = &rest[c.len_utf8()..];
            }
        }

        let actual: Vec<char> = value.chars().collect();
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(&expected)
                .all(|(a, e)| e.is_none_or(|e| e == *a))
    }

    fn columns(
        &self,
        kind: RoutineKind,
        catalog: Option<&str>,
        schema: Option<&str>,
        name: Option<&str>,
        column: Option<&str>,
    ) -> Result<Box<dyn ParameterCursor>> {
        self.requests.lock().unwrap().push(ColumnRequest {
            kind,
            catalog: catalog.map(str::to_string),
            schema: schema.map(str::to_string),
            name: name.map(str::to_string),
            column: column.map(str::to_string),
        });

        let rows = self
            .routines
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind)
            .filter(|r| self.matches(catalog, r.catalog.as_deref()))
            .filter(|r| self.matches(name, Some(&r.name)))
            .flat_map(|r| r.rows.clone())
            .collect();

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockCursor {
            rows,
            closed: self.closed.clone(),
            fail_close: self.fail_close,
        }))
    }

    fn summaries(
        &self,
        kind: RoutineKind,
        catalog: Option<&str>,
        name: Option<&str>,
    ) -> Vec<RoutineSummary> {
        self.routines
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind)
            .filter(|r| self.matches(catalog, r.catalog.as_deref()))
            .filter(|r| self.matches(name, Some(&r.name)))
            .map(|r| RoutineSummary {
                catalog: r.catalog.clone(),
                schema: Some("SCOTT".to_string()),
                name: r.name.clone(),
                kind,
                remarks: None,
            })
            .collect()
    }
}

#[async_trait]
impl RoutineMetadata for MockCatalog {
    async fn search_string_escape(&self) -> Result<String> {
        if self.fail_escape {
            return Err(CallsigError::Metadata("connection reset".into()));
        }
        Ok(self.escape.clone())
    }

    async fn procedure_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_pattern: Option<&str>,
        column_pattern: Option<&str>,
    ) -> Result<Box<dyn ParameterCursor>> {
        self.columns(
            RoutineKind::Procedure,
            catalog,
            schema_pattern,
            procedure_pattern,
            column_pattern,
        )
    }

    async fn function_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_pattern: Option<&str>,
        column_pattern: Option<&str>,
    ) -> Result<Box<dyn ParameterCursor>> {
        self.columns(
            RoutineKind::Function,
            catalog,
            schema_pattern,
            function_pattern,
            column_pattern,
        )
    }

    async fn procedures(
        &self,
        catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        procedure_pattern: Option<&str>,
    ) -> Result<Vec<RoutineSummary>> {
        Ok(self.summaries(RoutineKind::Procedure, catalog, procedure_pattern))
    }

    async fn functions(
        &self,
        catalog: Option<&str>,
        _schema_pattern: Option<&str>,
        function_pattern: Option<&str>,
    ) -> Result<Vec<RoutineSummary>> {
        Ok(self.summaries(RoutineKind::Function, catalog, function_pattern))
    }
}

pub struct MockCursor {
    rows: VecDeque<MockRow>,
    closed: Arc<AtomicUsize>,
    fail_close: bool,
}

#[async_trait]
impl ParameterCursor for MockCursor {
    async fn next_row(&mut self) -> Result<Option<ParameterRow>> {
        match self.rows.pop_front() {
            Some(MockRow::Row(row)) => Ok(Some(row)),
            Some(MockRow::Fail(message)) => Err(CallsigError::Metadata(message)),
            None => Ok(None),
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(CallsigError::Metadata("cursor already closed".into()));
        }
        Ok(())
    }
}

type RoutineBody = Box<dyn Fn(&HashMap<String, Value>) -> Result<OutputMap> + Send + Sync>;

/// Executes routines registered as closures over their named inputs
pub struct MockExecutor {
    bodies: HashMap<String, RoutineBody>,
    calls: Mutex<Vec<(Invocation, BoundArguments)>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `property_tax` and `sales_tax` both charge 6%
    pub fn with_tax_routines() -> Self {
        Self::new()
            .with_routine("property_tax", |inputs| {
                let subtotal = inputs.get("SUBTOTAL").and_then(Value::as_f64).unwrap_or(0.0);
                Ok(OutputMap::from([("TAX".to_string(), Value::Float(subtotal * 0.06))]))
            })
            .with_routine("sales_tax", |inputs| {
                let subtotal = inputs.get("SUBTOTAL").and_then(Value::as_f64).unwrap_or(0.0);
                Ok(OutputMap::from([("result".to_string(), Value::Float(subtotal * 0.06))]))
            })
            .with_routine("stored_procedure_proxy.negate_procedure", |inputs| {
                let b = inputs.get("B").and_then(Value::as_bool).unwrap_or(false);
                Ok(OutputMap::from([("B".to_string(), Value::Bool(!b))]))
            })
    }

    pub fn with_routine(
        mut self,
        routine: &str,
        body: impl Fn(&HashMap<String, Value>) -> Result<OutputMap> + Send + Sync + 'static,
    ) -> Self {
        self.bodies.insert(routine.to_string(), Box::new(body));
        self
    }

    pub fn calls(&self) -> Vec<(Invocation, BoundArguments)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoutineExecutor for MockExecutor {
    async fn execute(
        &self,
        invocation: &Invocation,
        arguments: BoundArguments,
    ) -> Result<OutputMap> {
        self.calls
            .lock()
            .unwrap()
            .push((invocation.clone(), arguments.clone()));

        let inputs: HashMap<String, Value> = match arguments {
            BoundArguments::Named(named) => named,
            BoundArguments::Positional(values) => invocation
                .parameters
                .iter()
                .filter(|p| p.role().is_input())
                .map(|p| p.name().to_string())
                .zip(values)
                .collect(),
        };

        let body = self.bodies.get(&invocation.routine).ok_or_else(|| {
            CallsigError::Execution(format!(
                "ORA-06550: identifier '{}' must be declared",
                invocation.routine.to_uppercase()
            ))
        })?;
        body(&inputs)
    }
}

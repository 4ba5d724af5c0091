//! Execution facility

use crate::{OutputMap, ParameterDescriptor, Result, RoutineKind, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How caller-supplied values are matched to declared parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindMode {
    /// Arguments are passed in declared parameter order
    #[default]
    Positional,
    /// Arguments are passed as a map keyed by parameter name
    Named,
}

/// Arguments shaped for execution, covering only IN and INOUT parameters
#[derive(Debug, Clone, PartialEq)]
pub enum BoundArguments {
    Positional(Vec<Value>),
    Named(HashMap<String, Value>),
}

impl BoundArguments {
    pub fn mode(&self) -> BindMode {
        match self {
            BoundArguments::Positional(_) => BindMode::Positional,
            BoundArguments::Named(_) => BindMode::Named,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BoundArguments::Positional(values) => values.len(),
            BoundArguments::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variant names of the bound values. Named arguments are ordered by key.
    pub fn type_names(&self) -> Vec<&'static str> {
        match self {
            BoundArguments::Positional(values) => values.iter().map(Value::type_name).collect(),
            BoundArguments::Named(values) => {
                let mut entries: Vec<_> = values.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                entries.into_iter().map(|(_, v)| v.type_name()).collect()
            }
        }
    }
}

/// A routine call with its declared parameters, ready to execute
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Routine reference as given by the caller, e.g. `pkg.proc_name`
    pub routine: String,
    pub kind: RoutineKind,
    /// Every resolved parameter in declaration order, outputs included
    pub parameters: Vec<ParameterDescriptor>,
    /// JDBC escape call syntax, e.g. `{ ? = call sales_tax(?) }`
    pub statement: String,
}

impl Invocation {
    /// Declared parameters the execution facility must return values for
    pub fn output_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.role().is_output())
    }
}

/// Performs routine calls on a live connection
#[async_trait]
pub trait RoutineExecutor: Send + Sync {
    /// Execute the invocation and return every OUT, INOUT and RESULT value
    /// keyed by parameter name
    async fn execute(
        &self,
        invocation: &Invocation,
        arguments: BoundArguments,
    ) -> Result<OutputMap>;
}

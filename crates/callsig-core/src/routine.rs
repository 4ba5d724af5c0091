//! Routine and parameter descriptors
//!
//! A routine's signature is never declared by the caller; it is read from the
//! catalog as a sequence of [`ParameterRow`]s and classified into
//! [`ParameterDescriptor`]s.

use serde::{Deserialize, Serialize};

/// Name given to a function's return value when the catalog reports none
pub const RESULT_PARAMETER_NAME: &str = "result";

/// Direction codes reported by the catalog, as defined by JDBC `DatabaseMetaData`
pub mod direction {
    pub const PROCEDURE_COLUMN_UNKNOWN: i16 = 0;
    pub const PROCEDURE_COLUMN_IN: i16 = 1;
    pub const PROCEDURE_COLUMN_IN_OUT: i16 = 2;
    pub const PROCEDURE_COLUMN_RESULT: i16 = 3;
    pub const PROCEDURE_COLUMN_OUT: i16 = 4;
    pub const PROCEDURE_COLUMN_RETURN: i16 = 5;

    pub const FUNCTION_COLUMN_UNKNOWN: i16 = 0;
    pub const FUNCTION_COLUMN_IN: i16 = 1;
    pub const FUNCTION_COLUMN_IN_OUT: i16 = 2;
    pub const FUNCTION_COLUMN_OUT: i16 = 3;
    pub const FUNCTION_RETURN: i16 = 4;
    pub const FUNCTION_COLUMN_RESULT: i16 = 5;
}

/// Whether a routine is a procedure or a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineKind {
    Procedure,
    Function,
}

impl RoutineKind {
    pub fn is_function(&self) -> bool {
        matches!(self, RoutineKind::Function)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutineKind::Procedure => "procedure",
            RoutineKind::Function => "function",
        }
    }
}

impl std::fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter direction of a resolved routine parameter
///
/// # Examples
///
/// ```
/// use callsig_core::ParameterRole;
///
/// assert!(ParameterRole::InOut.is_input());
/// assert!(ParameterRole::InOut.is_output());
/// assert!(!ParameterRole::Result.is_input());
/// assert!(ParameterRole::Result.is_output());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterRole {
    /// Input parameter - value is passed to the routine
    In,
    /// Input/Output parameter - value is passed in and returned
    InOut,
    /// Output parameter - value is returned from the routine
    Out,
    /// The return value of a function
    Result,
}

impl ParameterRole {
    /// Whether the caller may supply a value for this parameter
    pub fn is_input(&self) -> bool {
        matches!(self, ParameterRole::In | ParameterRole::InOut)
    }

    /// Whether the execution facility returns a value for this parameter
    pub fn is_output(&self) -> bool {
        !matches!(self, ParameterRole::In)
    }

    /// Convert to SQL keyword
    pub fn as_sql(&self) -> &'static str {
        match self {
            ParameterRole::In => "IN",
            ParameterRole::InOut => "IN OUT",
            ParameterRole::Out => "OUT",
            ParameterRole::Result => "RETURN",
        }
    }
}

/// A single routine parameter resolved from catalog metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    name: String,
    sql_type: i32,
    role: ParameterRole,
    scale: Option<i16>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, sql_type: i32, role: ParameterRole) -> Self {
        Self {
            name: name.into(),
            sql_type,
            role,
            scale: None,
        }
    }

    /// Carry the numeric scale reported by the catalog
    pub fn with_scale(mut self, scale: Option<i16>) -> Self {
        self.scale = scale;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// JDBC `java.sql.Types` code of the declared type
    pub fn sql_type(&self) -> i32 {
        self.sql_type
    }

    pub fn role(&self) -> ParameterRole {
        self.role
    }

    pub fn scale(&self) -> Option<i16> {
        self.scale
    }
}

/// One row of procedure or function column metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterRow {
    /// Parameter name; empty or missing for an unnamed function result
    pub name: Option<String>,
    /// JDBC `java.sql.Types` code
    pub sql_type: i32,
    /// Direction code, see [`direction`]
    pub direction: i16,
    pub scale: Option<i16>,
}

impl ParameterRow {
    pub fn new(name: impl Into<String>, sql_type: i32, direction: i16) -> Self {
        Self {
            name: Some(name.into()),
            sql_type,
            direction,
            scale: None,
        }
    }

    /// A row without a reported name
    pub fn unnamed(sql_type: i32, direction: i16) -> Self {
        Self {
            name: None,
            sql_type,
            direction,
            scale: None,
        }
    }
}

/// A routine listed by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineSummary {
    /// Catalog (Oracle: package) the routine belongs to
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    pub kind: RoutineKind,
    pub remarks: Option<String>,
}

impl RoutineSummary {
    /// The reference a caller would pass to invoke this routine
    pub fn reference(&self) -> String {
        match &self.catalog {
            Some(catalog) => format!("{}.{}", catalog, self.name),
            None => self.name.clone(),
        }
    }
}

/// JDBC `java.sql.Types` codes used by the tests and by collaborators
pub mod sql_types {
    pub const BIT: i32 = -7;
    pub const INTEGER: i32 = 4;
    pub const NUMERIC: i32 = 2;
    pub const DECIMAL: i32 = 3;
    pub const DOUBLE: i32 = 8;
    pub const VARCHAR: i32 = 12;
    pub const DATE: i32 = 91;
    pub const TIMESTAMP: i32 = 93;
    pub const BOOLEAN: i32 = 16;
    pub const REF_CURSOR: i32 = 2012;
    pub const OTHER: i32 = 1111;
}

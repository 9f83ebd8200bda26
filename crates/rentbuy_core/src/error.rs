//! Errors produced by the simulation pipeline.

/// Everything that can stop a simulation from producing results.
///
/// Validation errors are raised before any path is generated. Numerical
/// errors are raised as soon as a non-finite quantity is detected; no
/// partial results are ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid parameter `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("non-finite {quantity}{} ({value})", year_suffix(.year))]
    Numerical {
        quantity: &'static str,
        year: Option<usize>,
        value: f64,
    },
}

fn year_suffix(year: &Option<usize>) -> String {
    match year {
        Some(y) => format!(" in year {y}"),
        None => String::new(),
    }
}

impl SimulationError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        SimulationError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending parameter for validation errors
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SimulationError::Validation { field, .. } => Some(field),
            SimulationError::Numerical { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

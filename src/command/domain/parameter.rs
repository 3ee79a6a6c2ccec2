//! Declared argument parameters and their constraints.

use serde_json::Value;

use crate::argument::domain::{ArgumentType, ArgumentValue};
use crate::interaction::OptionChoice;

/// A numeric limit on an integer or float argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterBound {
    /// Integer limit.
    Integer(i64),
    /// Floating-point limit.
    Float(f64),
}

impl ParameterBound {
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed integer and float limits are compared approximately"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    fn is_above(self, value: &ArgumentValue) -> bool {
        match (self, value) {
            (Self::Integer(bound), ArgumentValue::Int(actual)) => *actual < bound,
            (_, ArgumentValue::Float(actual)) => *actual < self.as_f64(),
            (Self::Float(bound), ArgumentValue::Int(actual)) => {
                Self::Integer(*actual).as_f64() < bound
            }
            _ => false,
        }
    }

    fn is_below(self, value: &ArgumentValue) -> bool {
        match (self, value) {
            (Self::Integer(bound), ArgumentValue::Int(actual)) => *actual > bound,
            (_, ArgumentValue::Float(actual)) => *actual > self.as_f64(),
            (Self::Float(bound), ArgumentValue::Int(actual)) => {
                Self::Integer(*actual).as_f64() > bound
            }
            _ => false,
        }
    }
}

/// Optional limits on an argument's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterConstraints {
    /// Smallest accepted numeric value.
    pub min_value: Option<ParameterBound>,
    /// Largest accepted numeric value.
    pub max_value: Option<ParameterBound>,
    /// Shortest accepted string, in characters.
    pub min_length: Option<usize>,
    /// Longest accepted string, in characters.
    pub max_length: Option<usize>,
    /// Enumerated set of accepted wire values; empty means unrestricted.
    pub choices: Vec<OptionChoice>,
}

impl ParameterConstraints {
    /// Returns whether the raw wire value is one of the declared choices.
    #[must_use]
    pub fn allows_raw(&self, raw: &Value) -> bool {
        self.choices.is_empty() || self.choices.iter().any(|choice| &choice.value == raw)
    }

    /// Checks a converted value against the declared limits.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when a limit is violated.
    pub fn check(&self, value: &ArgumentValue) -> Result<(), String> {
        if self.min_value.is_some_and(|bound| bound.is_above(value)) {
            return Err("value is below the allowed minimum".to_owned());
        }
        if self.max_value.is_some_and(|bound| bound.is_below(value)) {
            return Err("value is above the allowed maximum".to_owned());
        }
        if let ArgumentValue::String(text) = value {
            let length = text.chars().count();
            if let Some(min) = self.min_length.filter(|min| length < *min) {
                return Err(format!("text must be at least {min} characters"));
            }
            if let Some(max) = self.max_length.filter(|max| length > *max) {
                return Err(format!("text must be at most {max} characters"));
            }
        }
        Ok(())
    }
}

/// Static declaration of one expected argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentParameter {
    /// Option name on the wire.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Type tag selecting the converter.
    pub argument_type: ArgumentType,
    /// Whether the option must be supplied.
    pub required: bool,
    /// Value limits.
    pub constraints: ParameterConstraints,
}

impl ArgumentParameter {
    /// Declares a required argument.
    #[must_use]
    pub fn required(name: impl Into<String>, argument_type: ArgumentType) -> Self {
        Self::new(name, argument_type, true)
    }

    /// Declares an optional argument.
    #[must_use]
    pub fn optional(name: impl Into<String>, argument_type: ArgumentType) -> Self {
        Self::new(name, argument_type, false)
    }

    fn new(name: impl Into<String>, argument_type: ArgumentType, required: bool) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            argument_type,
            required,
            constraints: ParameterConstraints::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the numeric range.
    #[must_use]
    pub fn with_range(
        mut self,
        min_value: Option<ParameterBound>,
        max_value: Option<ParameterBound>,
    ) -> Self {
        self.constraints.min_value = min_value;
        self.constraints.max_value = max_value;
        self
    }

    /// Sets the accepted string length range.
    #[must_use]
    pub fn with_length(mut self, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.constraints.min_length = min_length;
        self.constraints.max_length = max_length;
        self
    }

    /// Restricts the argument to an enumerated set of values.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = OptionChoice>) -> Self {
        self.constraints.choices = choices.into_iter().collect();
        self
    }
}

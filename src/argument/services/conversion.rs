//! Per-request conversion of declared parameters.

use std::sync::Arc;
use std::time::Duration;

use super::{ConversionInput, ConverterRegistry};
use crate::argument::domain::{Argument, ArgumentError, Arguments, ConversionError};
use crate::argument::ports::DirectoryLookup;
use crate::command::{ArgumentParameter, RawOptions};
use crate::interaction::Interaction;

/// How conversion failures are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// The first failure aborts conversion.
    Strict,
    /// Failing or missing parameters are skipped. Used for autocomplete,
    /// where the user is still typing.
    Lenient,
}

/// Converts the declared parameters of a resolved command.
#[derive(Clone)]
pub struct ArgumentConversionService {
    registry: Arc<ConverterRegistry>,
    directory: Arc<dyn DirectoryLookup>,
    lookup_timeout: Duration,
}

impl ArgumentConversionService {
    /// Creates a service over a populated registry and a directory port.
    #[must_use]
    pub fn new(
        registry: Arc<ConverterRegistry>,
        directory: Arc<dyn DirectoryLookup>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            directory,
            lookup_timeout,
        }
    }

    /// Returns the converter registry.
    #[must_use]
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Converts each parameter in declaration order.
    ///
    /// Absent or null optional parameters produce no entry. In
    /// [`ConversionMode::Lenient`] every failure is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] naming the first parameter whose converter
    /// is missing, whose required value is absent, whose value violates its
    /// constraints, or whose converter fails.
    pub async fn convert(
        &self,
        interaction: &Interaction,
        raw_options: &RawOptions,
        parameters: &[ArgumentParameter],
        mode: ConversionMode,
    ) -> Result<Arguments, ArgumentError> {
        let mut arguments = Arguments::new();
        for parameter in parameters {
            match self.convert_one(interaction, raw_options, parameter).await {
                Ok(Some(argument)) => arguments.insert(parameter.name.clone(), argument),
                Ok(None) => {}
                Err(error) if mode == ConversionMode::Lenient => {
                    tracing::debug!(parameter = %parameter.name, %error, "skipping argument");
                }
                Err(error) => return Err(ArgumentError::new(parameter.name.clone(), error)),
            }
        }
        Ok(arguments)
    }

    async fn convert_one(
        &self,
        interaction: &Interaction,
        raw_options: &RawOptions,
        parameter: &ArgumentParameter,
    ) -> Result<Option<Argument>, ConversionError> {
        let converter = self
            .registry
            .get(parameter.argument_type)
            .ok_or(ConversionError::ConverterNotFound(parameter.argument_type))?;

        let supplied = raw_options.get(&parameter.name).and_then(|option| {
            option
                .value
                .as_ref()
                .filter(|raw| !raw.is_null())
                .map(|raw| (option, raw))
        });
        let Some((option, raw)) = supplied else {
            return if parameter.required {
                Err(ConversionError::MissingRequiredArgument)
            } else {
                Ok(None)
            };
        };

        if !parameter.constraints.allows_raw(raw) {
            return Err(ConversionError::ConstraintViolation {
                reason: "value is not one of the declared choices".to_owned(),
            });
        }

        let input = ConversionInput {
            interaction,
            option,
            raw,
            directory: self.directory.as_ref(),
            lookup_timeout: self.lookup_timeout,
        };
        let value = converter.convert(&input).await?;
        parameter
            .constraints
            .check(&value)
            .map_err(|reason| ConversionError::ConstraintViolation { reason })?;
        Ok(Some(Argument::new(parameter.argument_type, value)))
    }
}

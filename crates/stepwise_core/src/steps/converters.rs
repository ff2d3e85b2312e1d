//! Text to value conversion for step parameters.
//!
//! # Invariants
//! - At most one converter per target type; adding one replaces the old one.
//! - Input text is trimmed before conversion.

use crate::steps::monitor::StepMonitor;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Parameter conversion errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    NoConverter {
        type_name: String,
    },
    InvalidValue {
        type_name: String,
        value: String,
        message: String,
    },
}

impl ConversionError {
    pub fn invalid_value<T: ?Sized>(value: &str, message: impl Display) -> Self {
        Self::InvalidValue {
            type_name: type_name::<T>().to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoConverter { type_name } => write!(f, "no parameter converter for {type_name}"),
            Self::InvalidValue {
                type_name,
                value,
                message,
            } => write!(f, "cannot convert `{value}` to {type_name}: {message}"),
        }
    }
}

impl Error for ConversionError {}

type ConvertFn = dyn Fn(&str) -> Result<Box<dyn Any + Send>, ConversionError> + Send + Sync;

#[derive(Clone)]
struct Converter {
    type_name: &'static str,
    convert: Arc<ConvertFn>,
}

/// Converters keyed by target type.
#[derive(Clone)]
pub struct ParameterConverters {
    converters: HashMap<TypeId, Converter>,
}

impl Debug for ParameterConverters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterConverters")
            .field("types", &self.type_names())
            .finish()
    }
}

impl Default for ParameterConverters {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterConverters {
    /// Built-in set: `String`, `bool`, common integers, floats and
    /// comma-separated `Vec<String>`.
    pub fn new() -> Self {
        let mut converters = Self::empty();
        converters
            .add_converter::<String, _>(|text| Ok(text.to_string()))
            .add_converter::<bool, _>(|text| {
                text.to_ascii_lowercase()
                    .parse::<bool>()
                    .map_err(|err| ConversionError::invalid_value::<bool>(text, err))
            })
            .add_converter::<i32, _>(parse_from_str::<i32>)
            .add_converter::<i64, _>(parse_from_str::<i64>)
            .add_converter::<u32, _>(parse_from_str::<u32>)
            .add_converter::<u64, _>(parse_from_str::<u64>)
            .add_converter::<usize, _>(parse_from_str::<usize>)
            .add_converter::<f32, _>(parse_from_str::<f32>)
            .add_converter::<f64, _>(parse_from_str::<f64>)
            .add_converter::<Vec<String>, _>(|text| {
                Ok(text
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect())
            });
        converters
    }

    /// Converter set with no conversions at all.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Adds or replaces the converter for `T`.
    pub fn add_converter<T, F>(&mut self, convert: F) -> &mut Self
    where
        T: Any + Send,
        F: Fn(&str) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        self.converters.insert(
            TypeId::of::<T>(),
            Converter {
                type_name: type_name::<T>(),
                convert: Arc::new(move |text| {
                    convert(text).map(|value| Box::new(value) as Box<dyn Any + Send>)
                }),
            },
        );
        self
    }

    /// Owned form of [`ParameterConverters::add_converter`].
    pub fn with_converter<T, F>(mut self, convert: F) -> Self
    where
        T: Any + Send,
        F: Fn(&str) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        self.add_converter(convert);
        self
    }

    pub fn supports<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Converts `text` into `T`.
    ///
    /// # Errors
    /// - `NoConverter` when no converter is registered for `T`.
    /// - `InvalidValue` when the registered converter rejects the text.
    pub fn convert<T: Any>(&self, text: &str) -> Result<T, ConversionError> {
        let Some(converter) = self.converters.get(&TypeId::of::<T>()) else {
            return Err(ConversionError::NoConverter {
                type_name: type_name::<T>().to_string(),
            });
        };
        let value = (converter.convert)(text.trim())?;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            ConversionError::invalid_value::<T>(text, "converter produced another type")
        })
    }

    /// Converts `text` into `T` and reports the converted value to `monitor`.
    /// Failed conversions are not reported.
    pub fn convert_monitored<T: Any + Debug>(
        &self,
        text: &str,
        monitor: &dyn StepMonitor,
    ) -> Result<T, ConversionError> {
        let value = self.convert::<T>(text)?;
        monitor.converted_value_of_type(text, type_name::<T>(), &format!("{value:?}"));
        Ok(value)
    }

    /// Registered target type names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .converters
            .values()
            .map(|converter| converter.type_name)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

fn parse_from_str<T>(text: &str) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse::<T>()
        .map_err(|err| ConversionError::invalid_value::<T>(text, err))
}

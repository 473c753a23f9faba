// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for configuration merging and validation.
//!
//! Every settings struct has a partial twin in which each value is optional.
//! Partials from several sources are merged field by field, and the result is
//! validated into the full struct once every value is known.

use std::fmt::{self, Display, Formatter};

/// A partially specified value.
pub trait Partial: Default {
    /// The fully specified value, returned after validation.
    type Output;

    /// Merges the values from `high` and `low`, where `high` takes precedence
    /// in the case of conflicts.
    fn merge(low: Self, high: Self) -> Self;

    /// Produces the full value, recording anything missing under `path`.
    fn finish(self, path: &str, err: &mut ValidationError) -> Option<Self::Output>;
}

/// A value that can appear in a settings struct.
pub trait Configurable: Sized {
    type Partial: Partial<Output = Self>;
}

impl<T> Partial for Option<T> {
    type Output = T;

    fn merge(low: Self, high: Self) -> Self {
        high.or(low)
    }

    fn finish(self, path: &str, err: &mut ValidationError) -> Option<T> {
        if self.is_none() {
            err.missing.push(path.to_owned());
        }
        self
    }
}

macro_rules! leaf_config {
    ($($ty:ty),*) => {
        $(impl Configurable for $ty {
            type Partial = Option<$ty>;
        })*
    };
}

leaf_config!(bool, i32, f64, String);

/// Validates a top-level partial.
pub fn validate<P: Partial>(partial: P) -> Result<P::Output, ValidationError> {
    let mut err = ValidationError::default();
    match partial.finish("", &mut err) {
        Some(value) if err.is_empty() => Ok(value),
        _ => Err(err),
    }
}

pub(super) fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() { field.to_owned() } else { format!("{path}.{field}") }
}

#[derive(Default, Debug, PartialEq)]
pub struct ValidationError {
    /// Dotted paths of fields no source provided.
    pub missing: Vec<String>,
    /// Values that were provided but are out of range.
    pub invalid: Vec<String>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if !self.missing.is_empty() {
            write!(f, "missing fields {}", self.missing.join(", "))?;
            sep = "; ";
        }
        for problem in &self.invalid {
            write!(f, "{sep}{problem}")?;
            sep = "; ";
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Defines a settings struct together with its partial twin.
///
/// ```ignore
/// partial_config! {
///     #[derive(Debug)]
///     pub struct Drag => DragPartial {
///         pub respect_minimum_sizes: bool,
///     }
/// }
/// ```
///
/// Field types must implement [`Configurable`]; nested settings structs
/// defined with this macro do.
macro_rules! partial_config {
    (
        $(#[$struct_meta:meta])*
        $vis:vis struct $Name:ident => $PartialName:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident: $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$struct_meta])*
        $vis struct $Name {
            $( $(#[$field_meta])* $field_vis $field: $ty, )*
        }

        #[derive(::serde::Serialize, ::serde::Deserialize, Default, Debug, Clone, PartialEq)]
        #[serde(default, deny_unknown_fields)]
        $vis struct $PartialName {
            $(
                #[serde(skip_serializing_if = "crate::config::partial::is_unset")]
                $field: <$ty as $crate::config::partial::Configurable>::Partial,
            )*
        }

        impl $crate::config::partial::Configurable for $Name {
            type Partial = $PartialName;
        }

        impl $crate::config::partial::Partial for $PartialName {
            type Output = $Name;

            fn merge(low: Self, high: Self) -> Self {
                use $crate::config::partial::Partial;
                Self {
                    $( $field: Partial::merge(low.$field, high.$field), )*
                }
            }

            fn finish(
                self,
                path: &str,
                err: &mut $crate::config::partial::ValidationError,
            ) -> Option<$Name> {
                use $crate::config::partial::{Partial, join_path};
                $(
                    let $field =
                        Partial::finish(self.$field, &join_path(path, stringify!($field)), err);
                )*
                match ($($field,)*) {
                    ($(Some($field),)*) => Some($Name { $($field),* }),
                    _ => None,
                }
            }
        }
    };
}

/// Whether a partial value carries nothing, so serialising it can be skipped.
pub fn is_unset<P: Partial + PartialEq>(partial: &P) -> bool {
    *partial == P::default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    partial_config! {
        #[derive(Debug, PartialEq)]
        struct Inner => InnerPartial {
            depth: i32,
        }
    }

    partial_config! {
        #[derive(Debug, PartialEq)]
        struct Outer => OuterPartial {
            name: String,
            inner: Inner,
        }
    }

    #[test]
    fn high_takes_precedence() {
        let low: OuterPartial = toml::from_str("name = 'low'\ninner.depth = 1").unwrap();
        let high: OuterPartial = toml::from_str("inner.depth = 2").unwrap();
        let merged = validate(Partial::merge(low, high)).unwrap();
        assert_eq!(
            merged,
            Outer {
                name: "low".into(),
                inner: Inner { depth: 2 },
            }
        );
    }

    #[test]
    fn missing_fields_are_reported_with_paths() {
        let partial: OuterPartial = toml::from_str("").unwrap();
        let err = validate(partial).unwrap_err();
        assert_eq!(err.missing, vec!["name".to_owned(), "inner.depth".to_owned()]);
        assert_eq!(err.to_string(), "missing fields name, inner.depth");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<OuterPartial>("inner.width = 3").is_err());
    }

    #[test]
    fn unset_values_are_not_serialized() {
        let partial: OuterPartial = toml::from_str("name = 'x'").unwrap();
        assert_eq!(toml::to_string(&partial).unwrap().trim(), "name = \"x\"");
    }
}

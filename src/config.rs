// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime settings for a sash container.
//!
//! Settings are read from TOML. Any value the user leaves out is taken from
//! the embedded `sashtree.default.toml`.

#[macro_use]
mod partial;
use std::fs;
use std::ops::Range;
use std::path::Path;

use partial::{Partial, ValidationError};
use serde::{Deserialize, Serialize};

use crate::model::is_valid_ratio;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
#[serde(default)]
struct ConfigPartial {
    settings: SettingsPartial,
}

partial_config! {
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    #[serde(deny_unknown_fields)]
    pub struct Settings => SettingsPartial {
        /// Width of every sash along its split axis, in pixels.
        pub sash_thickness: i32,
        /// Share of the reference region given to a panel added without an
        /// explicit ratio.
        pub docking_ratio: f64,
        pub drag: Drag,
    }
}

partial_config! {
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    #[serde(deny_unknown_fields)]
    pub struct Drag => DragPartial {
        /// Keep dragged sashes from shrinking a panel below its minimum size.
        pub respect_minimum_sizes: bool,
        /// Commit the last clamped drag position on release instead of the
        /// raw pointer position.
        pub commit_clamped_position: bool,
    }
}

impl Settings {
    fn check(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::default();
        if self.sash_thickness < 0 {
            err.invalid.push(format!("sash_thickness must not be negative, got {}", self.sash_thickness));
        }
        if !is_valid_ratio(self.docking_ratio) {
            err.invalid.push(format!("docking_ratio must be in [0, 1], got {}", self.docking_ratio));
        }
        if err.is_empty() { Ok(()) } else { Err(err) }
    }
}

impl ConfigPartial {
    fn default() -> Self {
        toml::from_str(include_str!("../sashtree.default.toml")).unwrap()
    }

    fn validate(self) -> Result<Config, SpannedError> {
        let settings = partial::validate(self.settings)?;
        settings.check()?;
        Ok(Config { settings })
    }

    fn merge(low: Self, high: Self) -> Self {
        Self {
            settings: SettingsPartial::merge(low.settings, high.settings),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        ConfigPartial::default().validate().unwrap()
    }
}

impl Config {
    /// Reads settings from `path`, filling in anything unspecified from the
    /// defaults. Errors are rendered against the file's contents.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let buf = fs::read_to_string(path)?;
        Self::parse_spanned(&buf).map_err(|e| anyhow::anyhow!("{}", format_toml_error(e, &buf, path)))
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        Self::parse_spanned(buf).map_err(|e| anyhow::anyhow!("could not parse config: {}", e.message))
    }

    fn parse_spanned(buf: &str) -> Result<Self, SpannedError> {
        let c: ConfigPartial = toml::from_str(buf)?;
        let defaults = ConfigPartial::default();
        ConfigPartial::merge(defaults, c).validate()
    }
}

fn format_toml_error(error: SpannedError, input: &str, path: &Path) -> String {
    use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

    let message = error.message;
    let Some(span) = error.span else {
        return format!("could not parse config: {}", message);
    };

    let snippet = Snippet::source(input)
        .path(path.to_string_lossy())
        .annotation(AnnotationKind::Primary.span(span.start..span.end).label(message));

    let report = Level::ERROR.primary_title("could not parse config").element(snippet);

    let renderer = Renderer::plain();
    format!("{}", renderer.render(&[report]))
}

#[derive(Debug)]
struct SpannedError {
    message: String,
    span: Option<Range<usize>>,
}

impl From<toml::de::Error> for SpannedError {
    fn from(e: toml::de::Error) -> Self {
        Self {
            message: e.message().to_owned(),
            span: e.span(),
        }
    }
}

impl From<ValidationError> for SpannedError {
    fn from(e: ValidationError) -> Self {
        Self { message: format!("{e}"), span: None }
    }
}

//! jsany_options: jsany.json parsing and transpile options.
//!
//! Parses project files and resolves the user-facing option set into the
//! settings each pipeline stage consumes.

use jsany_emitter::{EmitMode, GeneratorOptions};
use jsany_optimizer::OptimizationFlags;
use jsany_scanner::SlashMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default project file name.
pub const CONFIG_FILE_NAME: &str = "jsany.json";

/// Transpile options, matching the `compilerOptions` object of jsany.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspileOptions {
    pub indent: Option<String>,
    pub slash_mode: Option<SlashModeOption>,
    pub emit_mode: Option<EmitModeOption>,
    /// Continue for-in temporary numbering across every file of a session.
    pub shared_temp_counter: Option<bool>,
    pub optimize: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlashModeOption {
    Contextual,
    AlwaysRegex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmitModeOption {
    Program,
    Statements,
}

/// Options with every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub generator: GeneratorOptions,
    pub slash_mode: SlashMode,
    pub shared_temp_counter: bool,
    pub optimize: OptimizationFlags,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            generator: GeneratorOptions::default(),
            slash_mode: SlashMode::Contextual,
            shared_temp_counter: false,
            optimize: OptimizationFlags::NONE,
        }
    }
}

impl TranspileOptions {
    pub fn resolved(&self) -> Result<ResolvedOptions, ConfigError> {
        let mut resolved = ResolvedOptions::default();
        if let Some(ref indent) = self.indent {
            resolved.generator.indent = indent.clone();
        }
        if let Some(mode) = self.emit_mode {
            resolved.generator.emit_mode = match mode {
                EmitModeOption::Program => EmitMode::Program,
                EmitModeOption::Statements => EmitMode::Statements,
            };
        }
        if let Some(mode) = self.slash_mode {
            resolved.slash_mode = match mode {
                SlashModeOption::Contextual => SlashMode::Contextual,
                SlashModeOption::AlwaysRegex => SlashMode::AlwaysRegex,
            };
        }
        resolved.shared_temp_counter = self.shared_temp_counter.unwrap_or(false);
        for name in self.optimize.iter().flatten() {
            let flag = OptimizationFlags::from_option_name(name)
                .ok_or_else(|| ConfigError::UnknownOptimization(name.clone()))?;
            resolved.optimize |= flag;
        }
        Ok(resolved)
    }

    /// Overlay `other` on top of `self`. Fields set in `other` win.
    pub fn merge(&self, other: &TranspileOptions) -> TranspileOptions {
        TranspileOptions {
            indent: other.indent.clone().or_else(|| self.indent.clone()),
            slash_mode: other.slash_mode.or(self.slash_mode),
            emit_mode: other.emit_mode.or(self.emit_mode),
            shared_temp_counter: other.shared_temp_counter.or(self.shared_temp_counter),
            optimize: other.optimize.clone().or_else(|| self.optimize.clone()),
        }
    }
}

/// The jsany.json file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub compiler_options: Option<TranspileOptions>,
    pub files: Option<Vec<String>>,
    pub out_dir: Option<String>,
}

impl ProjectConfig {
    /// The project file written by `jsany --init`.
    pub fn default_project() -> Self {
        Self {
            compiler_options: Some(TranspileOptions {
                indent: Some("    ".to_string()),
                slash_mode: Some(SlashModeOption::Contextual),
                emit_mode: Some(EmitModeOption::Program),
                shared_temp_counter: Some(false),
                optimize: Some(Vec::new()),
            }),
            files: Some(Vec::new()),
            out_dir: None,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown optimization '{0}'")]
    UnknownOptimization(String),
}

/// Parse a jsany.json file from a string.
pub fn parse_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a jsany.json file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<ProjectConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

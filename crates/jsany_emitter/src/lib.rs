//! jsany_emitter: C++ output generation.
//!
//! Lowers a parsed program to C++ source over the `JS::Any` runtime and
//! places the generated translation units:
//! 1. Generate C++ text from the AST ([`CodeGenerator`])
//! 2. Compute the output path
//! 3. Write output files

mod generator;

pub use generator::{CodeGenerator, EmitMode, Fragment, GenerateResult, GeneratorOptions, RUNTIME_INCLUDES};

use jsany_diagnostics::GenerateError;
use std::path::{Path, PathBuf};

/// The emitter produces output files from the AST.
pub struct Emitter {
    /// Output directory override.
    pub out_dir: Option<PathBuf>,
    /// Exact output file, used for single-input compilations.
    pub out_file: Option<PathBuf>,
    /// Extension of generated files, including the dot.
    pub extension: String,
    pub generator_options: GeneratorOptions,
}

/// The files of one emit, plus the generation errors that left files out.
#[derive(Debug, Default)]
pub struct EmitResult {
    /// Output file paths.
    pub output_files: Vec<OutputFile>,
    /// Whether any errors occurred during emit.
    pub has_errors: bool,
    pub errors: Vec<GenerateError>,
}

/// A file produced by the emitter.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// The output file path.
    pub path: PathBuf,
    /// The content of the file.
    pub text: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            out_dir: None,
            out_file: None,
            extension: ".cpp".to_string(),
            generator_options: GeneratorOptions::default(),
        }
    }

    /// Place already generated text for `file_name` at its output path.
    pub fn output_for(&self, file_name: &str, text: String) -> OutputFile {
        OutputFile {
            path: self.get_output_path(Path::new(file_name), &self.extension),
            text,
        }
    }

    /// Write output files to disk.
    pub fn write_output_files(&self, result: &EmitResult) -> std::io::Result<()> {
        for file in &result.output_files {
            if let Some(parent) = file.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&file.path, &file.text)?;
        }
        Ok(())
    }

    pub fn get_output_path(&self, source: &Path, ext: &str) -> PathBuf {
        if let Some(ref out_file) = self.out_file {
            return out_file.clone();
        }
        let stem = source.file_stem().unwrap_or_default();
        let base_dir = if let Some(ref out_dir) = self.out_dir {
            out_dir.clone()
        } else {
            source.parent().unwrap_or_else(|| Path::new(".")).to_path_buf()
        };
        base_dir.join(format!("{}{}", stem.to_string_lossy(), ext))
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_creation() {
        let emitter = Emitter::new();
        assert_eq!(emitter.extension, ".cpp");
        assert!(emitter.out_dir.is_none());
        assert_eq!(emitter.generator_options.emit_mode, EmitMode::Program);
    }

    #[test]
    fn test_output_path() {
        let emitter = Emitter::new();
        let path = emitter.get_output_path(Path::new("src/foo.js"), ".cpp");
        assert_eq!(path, PathBuf::from("src/foo.cpp"));
    }

    #[test]
    fn test_output_path_with_outdir() {
        let mut emitter = Emitter::new();
        emitter.out_dir = Some(PathBuf::from("build"));
        let path = emitter.get_output_path(Path::new("src/foo.js"), ".cpp");
        assert_eq!(path, PathBuf::from("build/foo.cpp"));
    }

    #[test]
    fn test_output_path_with_outfile() {
        let mut emitter = Emitter::new();
        emitter.out_dir = Some(PathBuf::from("build"));
        emitter.out_file = Some(PathBuf::from("main.cpp"));
        let path = emitter.get_output_path(Path::new("src/foo.js"), ".cpp");
        assert_eq!(path, PathBuf::from("main.cpp"));
    }

    #[test]
    fn test_output_for() {
        let mut emitter = Emitter::new();
        emitter.out_dir = Some(PathBuf::from("out"));
        let file = emitter.output_for("lib/a.js", "int main() {}\n".to_string());
        assert_eq!(file.path, PathBuf::from("out/a.cpp"));
        assert_eq!(file.text, "int main() {}\n");
    }
}

//! jsany_compiler: Transpiler orchestration.
//!
//! Creates the program, then runs tokenize, parse, optimize and generate
//! for every source file, and hands the results to the emitter.

use jsany_core::CompilerArena;
use jsany_diagnostics::{messages, Diagnostic, DiagnosticCollection, GenerateError, ParseError};
use jsany_emitter::{CodeGenerator, EmitResult, Emitter};
use jsany_optimizer::Optimizer;
use jsany_options::ResolvedOptions;
use jsany_parser::parse;
use jsany_scanner::{Scanner, Token};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Why one source file produced no output.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not valid UTF-8")]
    InvalidUtf8 { path: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl CompileError {
    /// The reportable form of this error, located in `file_name`.
    pub fn to_diagnostic(&self, file_name: &str) -> Diagnostic {
        let diagnostic = match self {
            CompileError::Io { path, source } => {
                let reason = source.to_string();
                Diagnostic::new(&messages::CANNOT_READ_FILE_0_1, &[path.as_str(), reason.as_str()])
            }
            CompileError::InvalidUtf8 { path } => {
                Diagnostic::new(&messages::FILE_0_IS_NOT_VALID_UTF8, &[path.as_str()])
            }
            CompileError::Parse(error) => Diagnostic::from_parse_error(error),
            CompileError::Generate(error) => Diagnostic::from_generate_error(error),
        };
        diagnostic.in_file(file_name)
    }
}

/// Wall-clock time spent in each stage for one file.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub tokenize: Duration,
    pub parse: Duration,
    pub generate: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.tokenize + self.parse + self.generate
    }
}

impl std::ops::AddAssign for StageTimings {
    fn add_assign(&mut self, other: Self) {
        self.tokenize += other.tokenize;
        self.parse += other.parse;
        self.generate += other.generate;
    }
}

/// The outcome of transpiling one source file.
#[derive(Debug)]
pub struct CompileOutput {
    pub file_name: String,
    /// The generated C++ text.
    pub result: Result<String, CompileError>,
    pub timings: StageTimings,
}

/// The program represents every source file of one transpile session.
pub struct Program {
    /// Resolved transpile options.
    pub options: ResolvedOptions,
    /// Output directory override.
    pub out_dir: Option<PathBuf>,
    /// Exact output path, for a single input.
    pub out_file: Option<PathBuf>,
    /// Source files as (file name, text), in insertion order.
    source_files: Vec<(String, String)>,
}

impl Program {
    pub fn new(options: ResolvedOptions) -> Self {
        Self {
            options,
            out_dir: None,
            out_file: None,
            source_files: Vec::new(),
        }
    }

    /// Add a source file to the program.
    pub fn add_source(&mut self, file_name: impl Into<String>, source_text: impl Into<String>) {
        self.source_files.push((file_name.into(), source_text.into()));
    }

    /// Load files from disk. Stops at the first unreadable or non-UTF-8 file.
    pub fn load_root_files(&mut self, files: &[String]) -> Result<(), CompileError> {
        for file in files {
            let text = read_source(file)?;
            self.source_files.push((file.clone(), text));
        }
        Ok(())
    }

    pub fn source_files(&self) -> &[(String, String)] {
        &self.source_files
    }

    /// Transpile every source file. Results are in insertion order.
    ///
    /// Files run in parallel unless temporary numbering is shared, in which
    /// case they run in order and each continues the previous file's counter.
    pub fn compile(&self) -> Vec<CompileOutput> {
        if self.options.shared_temp_counter {
            let mut counter = 0;
            self.source_files
                .iter()
                .map(|(file_name, text)| {
                    let (output, next) = self.compile_unit(file_name, text, counter);
                    counter = next;
                    output
                })
                .collect()
        } else {
            self.source_files
                .par_iter()
                .map(|(file_name, text)| self.compile_unit(file_name, text, 0).0)
                .collect()
        }
    }

    /// Map successful outputs to files at their `.cpp` paths.
    pub fn emit(&self, outputs: &[CompileOutput]) -> EmitResult {
        let emitter = self.emitter();
        let mut result = EmitResult::default();
        for output in outputs {
            match &output.result {
                Ok(text) => result.output_files.push(emitter.output_for(&output.file_name, text.clone())),
                Err(CompileError::Generate(error)) => {
                    result.has_errors = true;
                    result.errors.push(error.clone());
                }
                Err(_) => result.has_errors = true,
            }
        }
        result
    }

    /// Write emitted files to disk.
    pub fn write(&self, result: &EmitResult) -> std::io::Result<()> {
        self.emitter().write_output_files(result)
    }

    /// Diagnostics for every failed output, sorted by file and position.
    pub fn diagnostics(outputs: &[CompileOutput]) -> DiagnosticCollection {
        let mut diagnostics = DiagnosticCollection::new();
        for output in outputs {
            if let Err(ref error) = output.result {
                diagnostics.add(error.to_diagnostic(&output.file_name));
            }
        }
        diagnostics.sort();
        diagnostics
    }

    /// Tokenize `text` with this program's options.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).with_slash_mode(self.options.slash_mode).tokenize()
    }

    /// One line per token: position, kind and text.
    pub fn token_dump(&self, text: &str) -> String {
        let mut out = String::new();
        for token in self.tokenize(text) {
            out.push_str(&format!(
                "{}:{}\t{:?}\t{}\n",
                token.line,
                token.column,
                token.kind,
                token.display_text().escape_debug()
            ));
        }
        out
    }

    /// The indented debug print of the parsed tree.
    pub fn ast_dump(&self, text: &str) -> Result<String, CompileError> {
        let tokens = self.tokenize(text);
        let arena = CompilerArena::new();
        let program = parse(&arena, &tokens)?;
        Ok(jsany_printer::print_program(&program))
    }

    fn emitter(&self) -> Emitter {
        let mut emitter = Emitter::new();
        emitter.out_dir = self.out_dir.clone();
        emitter.out_file = self.out_file.clone();
        emitter.generator_options = self.options.generator.clone();
        emitter
    }

    /// Returns the output and the next free for-in suffix.
    fn compile_unit(&self, file_name: &str, text: &str, counter_start: u32) -> (CompileOutput, u32) {
        let mut timings = StageTimings::default();
        let (result, next) = self.run_stages(text, counter_start, &mut timings);
        let output = CompileOutput {
            file_name: file_name.to_string(),
            result,
            timings,
        };
        (output, next)
    }

    fn run_stages(
        &self,
        text: &str,
        counter_start: u32,
        timings: &mut StageTimings,
    ) -> (Result<String, CompileError>, u32) {
        let start = Instant::now();
        let tokens = self.tokenize(text);
        timings.tokenize = start.elapsed();

        let start = Instant::now();
        let arena = CompilerArena::new();
        let program = match parse(&arena, &tokens) {
            Ok(program) => program,
            Err(error) => {
                timings.parse = start.elapsed();
                return (Err(error.into()), counter_start);
            }
        };
        timings.parse = start.elapsed();

        let start = Instant::now();
        let mut optimizer = Optimizer::new(program.statements);
        optimizer.optimize(self.options.optimize);
        let mut generator = CodeGenerator::new(self.options.generator.clone()).with_counter_start(counter_start);
        let result = optimizer.transpile(&mut generator).map_err(CompileError::from);
        timings.generate = start.elapsed();
        (result, generator.next_counter())
    }
}

/// Read a source file, validating its encoding.
pub fn read_source(path: &str) -> Result<String, CompileError> {
    let bytes = std::fs::read(path).map_err(|source| CompileError::Io {
        path: path.to_string(),
        source,
    })?;
    match simdutf8::basic::from_utf8(&bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Err(CompileError::InvalidUtf8 { path: path.to_string() }),
    }
}

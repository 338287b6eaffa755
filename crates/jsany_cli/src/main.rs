//! jsany: Transpiles a JavaScript subset to C++.
//!
//! Usage:
//!   jsany [options] [file...]
//!
//! Each input becomes one C++ translation unit over the `JS::Any` runtime.

use clap::Parser as ClapParser;
use jsany_compiler::{read_source, CompileOutput, Program, StageTimings};
use jsany_diagnostics::Diagnostic;
use jsany_options::{
    parse_config_file, EmitModeOption, ProjectConfig, SlashModeOption, TranspileOptions, CONFIG_FILE_NAME,
};
use miette::miette;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant, SystemTime};

#[derive(ClapParser, Debug)]
#[command(name = "jsany", about = "jsany - Transpile JavaScript to C++", disable_version_flag = true)]
struct Cli {
    /// JavaScript files to transpile.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Write the output to this file (single input only).
    #[arg(short = 'o', long = "out-file")]
    out_file: Option<String>,

    /// Redirect output files to the directory.
    #[arg(long = "out-dir")]
    out_dir: Option<String>,

    /// Path to jsany.json.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Print the token stream instead of transpiling.
    #[arg(long = "emit-tokens")]
    emit_tokens: bool,

    /// Print the syntax tree instead of transpiling.
    #[arg(long = "emit-ast")]
    emit_ast: bool,

    /// Print generated code to stdout instead of writing files.
    #[arg(long)]
    stdout: bool,

    /// Emit bare statements without includes or `main`.
    #[arg(long)]
    statements: bool,

    /// Treat every `/` as the start of a regular expression.
    #[arg(long = "always-regex")]
    always_regex: bool,

    /// Number of spaces per indentation level.
    #[arg(long)]
    indent: Option<usize>,

    /// Continue for-in temporary numbering across input files.
    #[arg(long = "shared-temp-counter")]
    shared_temp_counter: bool,

    /// Watch input files.
    #[arg(short = 'w', long)]
    watch: bool,

    /// Initialize a jsany.json file.
    #[arg(long)]
    init: bool,

    /// Print per-stage timings.
    #[arg(long)]
    verbose: bool,

    /// Print the transpiler version.
    #[arg(short = 'v', long)]
    version: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("jsany Version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if cli.init {
        return run_init();
    }

    if cli.emit_tokens || cli.emit_ast {
        let exit_code = run_dump(&cli)?;
        if exit_code != 0 {
            process::exit(exit_code);
        }
        return Ok(());
    }

    if cli.watch {
        return run_watch(&cli);
    }

    let exit_code = run_compile(&cli)?;
    if exit_code != 0 {
        process::exit(exit_code);
    }
    Ok(())
}

/// The input files, the project they came from and its directory.
struct Inputs {
    files: Vec<String>,
    config: Option<ProjectConfig>,
    root_dir: PathBuf,
}

fn run_compile(cli: &Cli) -> miette::Result<i32> {
    let start = Instant::now();
    let inputs = resolve_inputs(cli)?;
    if inputs.files.is_empty() {
        return Err(miette!("No input files found."));
    }
    if cli.out_file.is_some() && inputs.files.len() > 1 {
        return Err(miette!("--out-file requires exactly one input file."));
    }

    let mut program = build_program(cli, &inputs)?;
    program
        .load_root_files(&inputs.files)
        .map_err(|e| miette!("Failed to load source files: {}", e))?;

    let outputs = program.compile();
    if cli.verbose {
        print_timings(&outputs);
    }

    let use_color = is_terminal();
    let diagnostics = Program::diagnostics(&outputs);
    for diagnostic in diagnostics.diagnostics() {
        print_diagnostic(diagnostic, use_color);
    }
    if diagnostics.has_errors() {
        let count = diagnostics.len();
        let plural = if count == 1 { "" } else { "s" };
        if use_color {
            eprintln!("\n{}Found {} error{}.{}", RED, count, plural, RESET);
        } else {
            eprintln!("\nFound {} error{}.", count, plural);
        }
        return Ok(2);
    }

    if cli.stdout {
        for output in &outputs {
            if let Ok(ref text) = output.result {
                print!("{}", text);
            }
        }
    } else {
        let result = program.emit(&outputs);
        program
            .write(&result)
            .map_err(|e| miette!("Failed to write output files: {}", e))?;
    }

    if use_color {
        eprintln!(
            "{}Transpiled {} file{} in {:.2}s.{}",
            GRAY,
            outputs.len(),
            if outputs.len() == 1 { "" } else { "s" },
            start.elapsed().as_secs_f64(),
            RESET
        );
    }
    Ok(0)
}

fn build_program(cli: &Cli, inputs: &Inputs) -> miette::Result<Program> {
    let base = inputs
        .config
        .as_ref()
        .and_then(|config| config.compiler_options.clone())
        .unwrap_or_default();
    let options = base
        .merge(&cli_overrides(cli))
        .resolved()
        .map_err(|e| miette!("Invalid options: {}", e))?;

    let mut program = Program::new(options);
    program.out_file = cli.out_file.as_ref().map(PathBuf::from);
    program.out_dir = match (&cli.out_dir, inputs.config.as_ref().and_then(|c| c.out_dir.as_ref())) {
        (Some(dir), _) => Some(PathBuf::from(dir)),
        (None, Some(dir)) => Some(inputs.root_dir.join(dir)),
        (None, None) => None,
    };
    Ok(program)
}

/// Options given on the command line. Unset flags leave the project's value.
fn cli_overrides(cli: &Cli) -> TranspileOptions {
    TranspileOptions {
        indent: cli.indent.map(|n| " ".repeat(n)),
        slash_mode: cli.always_regex.then_some(SlashModeOption::AlwaysRegex),
        emit_mode: cli.statements.then_some(EmitModeOption::Statements),
        shared_temp_counter: cli.shared_temp_counter.then_some(true),
        optimize: None,
    }
}

fn run_dump(cli: &Cli) -> miette::Result<i32> {
    let inputs = resolve_inputs(cli)?;
    if inputs.files.is_empty() {
        return Err(miette!("No input files found."));
    }
    let program = build_program(cli, &inputs)?;
    let use_color = is_terminal();
    let mut exit_code = 0;

    for file in &inputs.files {
        let text = read_source(file).map_err(|e| miette!("Failed to load source files: {}", e))?;
        if inputs.files.len() > 1 {
            println!("// {}", file);
        }
        if cli.emit_tokens {
            print!("{}", program.token_dump(&text));
        }
        if cli.emit_ast {
            match program.ast_dump(&text) {
                Ok(dump) => print!("{}", dump),
                Err(e) => {
                    print_diagnostic(&e.to_diagnostic(file), use_color);
                    exit_code = 2;
                }
            }
        }
    }
    Ok(exit_code)
}

fn run_init() -> miette::Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Err(miette!("A {} file already exists in the current directory.", CONFIG_FILE_NAME));
    }

    let content = ProjectConfig::default_project()
        .to_json_pretty()
        .map_err(|e| miette!("Failed to create {}: {}", CONFIG_FILE_NAME, e))?;
    std::fs::write(config_path, content + "\n").map_err(|e| miette!("Failed to create {}: {}", CONFIG_FILE_NAME, e))?;
    println!("Successfully created a {} file.", CONFIG_FILE_NAME);
    Ok(())
}

fn run_watch(cli: &Cli) -> miette::Result<()> {
    println!("Starting transpilation in watch mode...");
    println!();

    if let Err(e) = run_compile(cli) {
        print_error(&e.to_string());
    }

    println!();
    println!("Watching for file changes...");

    let inputs = resolve_inputs(cli)?;
    let mut last_modified = get_latest_mtime(&inputs.files);

    loop {
        std::thread::sleep(Duration::from_millis(500));
        let current_mtime = get_latest_mtime(&inputs.files);
        if current_mtime > last_modified {
            last_modified = current_mtime;
            println!();
            println!("File change detected. Starting transpilation...");
            println!();
            if let Err(e) = run_compile(cli) {
                print_error(&e.to_string());
            }
        }
    }
}

fn resolve_inputs(cli: &Cli) -> miette::Result<Inputs> {
    if let Some(ref project) = cli.project {
        load_project(project)
    } else if !cli.files.is_empty() {
        Ok(Inputs {
            files: cli.files.clone(),
            config: None,
            root_dir: PathBuf::from("."),
        })
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        load_project(CONFIG_FILE_NAME)
    } else {
        Ok(Inputs {
            files: Vec::new(),
            config: None,
            root_dir: PathBuf::from("."),
        })
    }
}

fn load_project(path: &str) -> miette::Result<Inputs> {
    let config = parse_config_file(path).map_err(|e| miette!("Failed to read project '{}': {}", path, e))?;
    let root_dir = Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let files = config
        .files
        .iter()
        .flatten()
        .map(|f| root_dir.join(f).to_string_lossy().to_string())
        .collect();

    Ok(Inputs {
        files,
        config: Some(config),
        root_dir,
    })
}

fn print_timings(outputs: &[CompileOutput]) {
    let mut total = StageTimings::default();
    for output in outputs {
        let t = output.timings;
        eprintln!(
            "{}: tokenize {:.3}ms, parse {:.3}ms, generate {:.3}ms",
            output.file_name,
            millis(t.tokenize),
            millis(t.parse),
            millis(t.generate)
        );
        total += t;
    }
    eprintln!(
        "Total: tokenize {:.3}ms, parse {:.3}ms, generate {:.3}ms ({:.3}ms)",
        millis(total.tokenize),
        millis(total.parse),
        millis(total.generate),
        millis(total.total())
    );
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn print_diagnostic(diag: &Diagnostic, use_color: bool) {
    if use_color {
        if let Some(ref file) = diag.file {
            eprint!("{}{}{}", CYAN, file, RESET);
            if let Some((line, column)) = diag.location {
                eprint!("({},{})", line, column);
            }
            eprint!(": ");
        }
        eprintln!(
            "{}{}error{} {}JS{}{}: {}",
            BOLD, RED, RESET, CYAN, diag.code, RESET, diag.message_text
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn print_error(msg: &str) {
    if is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}

fn get_latest_mtime(files: &[String]) -> SystemTime {
    let mut latest = SystemTime::UNIX_EPOCH;
    for f in files {
        if let Ok(metadata) = std::fs::metadata(f) {
            if let Ok(mtime) = metadata.modified() {
                if mtime > latest {
                    latest = mtime;
                }
            }
        }
    }
    latest
}

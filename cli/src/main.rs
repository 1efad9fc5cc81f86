use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use miette::{Diagnostic, Result};
use rester::{
    Engine, EngineOptions, Error, EvaluatorOptions, ExecutionMode, Juxtaposition, render_error,
};
use rester_core::parser;
use thiserror::Error as ThisError;
use tracing::info;

/// Rester - an embeddable language for describing HTTP interactions
#[derive(Parser, Debug)]
#[command(name = "rester")]
#[command(about = "Evaluate rester programs", long_about = None)]
struct Args {
    /// Definition-dialect file loaded before anything is evaluated
    #[arg(long, value_name = "FILE")]
    definitions: Vec<PathBuf>,

    /// Expression to evaluate
    #[arg(short, long, conflicts_with = "file")]
    expression: Option<String>,

    /// Keep evaluating after a statement fails
    #[arg(long)]
    isolate: bool,

    /// Reject operator-free token sequences instead of listing their values
    #[arg(long)]
    strict: bool,

    /// Maximum evaluation depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Print the parsed statements (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Print the owned bindings once evaluation finishes
    #[arg(long)]
    print_context: bool,

    /// Expression-dialect file (if neither this nor -e is given, reads stdin)
    file: Option<PathBuf>,
}

#[derive(Debug, ThisError, Diagnostic)]
enum CliError {
    #[error("cannot read '{}'", path.display())]
    #[diagnostic(code(rester::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load definitions from '{}'", path.display())]
    #[diagnostic(code(rester::definitions))]
    Definitions { path: PathBuf },

    #[error("evaluation failed")]
    #[diagnostic(code(rester::failed), help("the error is reported above"))]
    Failed,
}

impl Args {
    fn engine_options(&self) -> EngineOptions {
        let defaults = EvaluatorOptions::default();
        EngineOptions {
            evaluator: EvaluatorOptions {
                max_depth: self.max_depth.unwrap_or(defaults.max_depth),
                juxtaposition: if self.strict {
                    Juxtaposition::Reject
                } else {
                    Juxtaposition::Sequence
                },
            },
            mode: if self.isolate {
                ExecutionMode::Isolated
            } else {
                ExecutionMode::FailFast
            },
        }
    }
}

fn read(path: &PathBuf) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })
}

/// Evaluate `input` and print one line per statement. Returns whether every
/// statement succeeded.
fn interpret_input(engine: &mut Engine, input: &str, debug_parse: bool) -> bool {
    if debug_parse {
        match parser::parse_statements(input) {
            Ok(statements) => {
                println!("=== Parsed statements ===");
                println!("{:#?}", statements);
                println!();
            }
            Err(e) => {
                render_error(&e.into());
                return false;
            }
        }
    }

    let outcomes = match engine.execute(input) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            render_error(&e.into());
            return false;
        }
    };

    let mut ok = true;
    for outcome in outcomes {
        match outcome {
            Ok(value) => println!("{}", value),
            Err(e) => {
                render_error(&Error::Eval(e));
                ok = false;
            }
        }
    }
    ok
}

/// `name = value` for each owned binding, reducing definitions. A binding
/// that fails to evaluate is shown as written.
fn context_lines(engine: &mut Engine) -> Vec<String> {
    let names: Vec<String> = engine.context().names().map(str::to_string).collect();
    names
        .into_iter()
        .map(|name| match engine.lookup(&name) {
            Ok(value) => format!("{} = {}", name, value),
            Err(_) => match engine.context().get(&name) {
                Some(binding) => format!("{} = {}", name, binding),
                None => name,
            },
        })
        .collect()
}

fn print_context(engine: &mut Engine) {
    println!("=== Context ===");
    for line in context_lines(engine) {
        println!("{}", line);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the log level, defaulting to WARN
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut engine = Engine::new(args.engine_options());

    for path in &args.definitions {
        let source = read(path)?;
        match engine.define(&source) {
            Ok(names) => info!(path = %path.display(), count = names.len(), "definitions loaded"),
            Err(e) => {
                render_error(&e);
                return Err(CliError::Definitions { path: path.clone() }.into());
            }
        }
    }

    let source = match (&args.expression, &args.file) {
        (Some(expr), _) => Some(expr.clone()),
        (None, Some(path)) => Some(read(path)?),
        (None, None) => None,
    };

    let ok = match source {
        Some(source) => interpret_input(&mut engine, &source, args.debug_parse),
        None => {
            // Pipe mode: each line is a program sharing one context.
            let stdin = std::io::stdin();
            let reader = BufReader::new(stdin.lock());
            let mut ok = true;
            for line in reader.lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("Error reading line from stdin: {}", e);
                        break;
                    }
                };
                ok &= interpret_input(&mut engine, &line, args.debug_parse);
            }
            ok
        }
    };

    if args.print_context {
        print_context(&mut engine);
    }

    if ok { Ok(()) } else { Err(CliError::Failed.into()) }
}

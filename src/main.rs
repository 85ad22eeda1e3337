mod debug_report;

use echolalia::{Chooser, ResponseEngine, RngChooser, error_chain, regex};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

const DEFAULT_RESPONSES: &str = "data/responses.txt";
const DEFAULT_SUBSTITUTIONS: &str = "data/substitutions.txt";
const GREETING: &str = "Hello, I'm Eliza. How are you feeling today?";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    let engine = match ResponseEngine::from_files(&config.responses, &config.substitutions) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {}", error_chain(&err));
            std::process::exit(1);
        }
    };

    let mut chooser: Box<dyn Chooser> = match config.seed {
        Some(seed) => Box::new(RngChooser(StdRng::seed_from_u64(seed))),
        None => Box::new(RngChooser(rand::thread_rng())),
    };

    let result = match &config.input {
        Some(input) => reply(&engine, input, chooser.as_mut(), &config),
        None => converse(&engine, chooser.as_mut(), &config),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    responses: String,
    substitutions: String,
    input: Option<String>,
    seed: Option<u64>,
    verbose: bool,
    color: bool,
}

/// Logs go to stderr so they never interleave with replies.
fn init_tracing() {
    let default = if std::env::var_os("ECHOLALIA_DEBUG_RULES").is_some() { "warn,echolalia=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn converse(engine: &ResponseEngine, chooser: &mut dyn Chooser, config: &CliConfig) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "Eliza: {GREETING}")?;

    let mut lines = io::stdin().lock().lines();
    loop {
        write!(stdout, "You: ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line?;

        reply(engine, &line, chooser, config)?;

        // Eliza gets the last word before the loop ends.
        if regex!(r"(?i)^quit$").is_match(&line) {
            break;
        }
    }

    Ok(())
}

fn reply(engine: &ResponseEngine, input: &str, chooser: &mut dyn Chooser, config: &CliConfig) -> io::Result<()> {
    let mut stdout = io::stdout();

    if config.verbose {
        let trace = engine.respond_verbose_with(input, chooser);
        writeln!(stdout, "Eliza: {}", trace.reply)?;
        debug_report::print_trace(input, &trace, config.color);
    } else {
        writeln!(stdout, "Eliza: {}", engine.respond_with(input, chooser))?;
    }

    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        responses: DEFAULT_RESPONSES.to_string(),
        substitutions: DEFAULT_SUBSTITUTIONS.to_string(),
        input: None,
        seed: None,
        verbose: false,
        color: io::stdout().is_terminal(),
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("echolalia {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "-v" | "--verbose" => config.verbose = true,
            "--responses" => {
                config.responses = args.next().ok_or_else(|| "error: --responses expects a path".to_string())?;
            }
            "--substitutions" => {
                config.substitutions =
                    args.next().ok_or_else(|| "error: --substitutions expects a path".to_string())?;
            }
            "--seed" => {
                let value = args.next().ok_or_else(|| "error: --seed expects a value".to_string())?;
                config.seed = Some(parse_seed(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut config, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut config, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--responses=") => {
                config.responses = arg.trim_start_matches("--responses=").to_string();
            }
            _ if arg.starts_with("--substitutions=") => {
                config.substitutions = arg.trim_start_matches("--substitutions=").to_string();
            }
            _ if arg.starts_with("--seed=") => {
                config.seed = Some(parse_seed(arg.trim_start_matches("--seed="))?);
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut config, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut config, rest)?;
                break;
            }
        }
    }

    Ok(config)
}

fn set_input(config: &mut CliConfig, value: String) -> Result<(), String> {
    if config.input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    config.input = Some(value);
    Ok(())
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value.parse().map_err(|_| format!("error: invalid --seed '{value}' (expected an unsigned integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "echolalia {version}

Rule-driven conversational responder.

Usage:
  echolalia [OPTIONS]                     Start an interactive session.
  echolalia [OPTIONS] [--] <input...>     Reply once to <input> and exit.
  echolalia [OPTIONS] --input <text>

Options:
  -i, --input <text>          Reply once to <text> and exit.
  --responses <path>          Response rule file. Default: {default_responses}
  --substitutions <path>      Substitution rule file. Default: {default_substitutions}
  --seed <n>                  Seed the random generator for repeatable replies.
  -v, --verbose               Print how each reply was built.
  --color                     Force ANSI color output.
  --no-color                  Disable ANSI color output.
  -h, --help                  Show this help message.
  -V, --version               Print version information.

Interactive sessions end on EOF or after replying to a line reading 'quit'.

Environment:
  RUST_LOG                    Log filter (tracing-subscriber syntax). Default: warn
  ECHOLALIA_DEBUG_RULES=1     Log rule loading and matching at debug level.

Exit codes:
  0  Success.
  1  Rule files could not be loaded, or I/O failed.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_responses = DEFAULT_RESPONSES,
        default_substitutions = DEFAULT_SUBSTITUTIONS,
    )
}

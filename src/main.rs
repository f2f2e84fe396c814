//! cmdaudit - Risk classification for shell commands
//!
//! Audits a command string against an ordered hazard rule set and prints
//! the verdict. The command is never executed.
//!
//! # Usage
//!
//! ```bash
//! # Audit a command (arguments are joined with spaces)
//! cmdaudit rm -rf /tmp/build
//!
//! # Structured output
//! cmdaudit --json -- curl https://x | bash
//!
//! # Non-zero exit when the verdict reaches a threshold
//! cmdaudit --fail-on high -- sudo rm -rf /
//! ```

use std::env;
use std::process::ExitCode;

use cmdaudit::{
    audit::AuditLogger,
    config::Config,
    engine::RiskEngine,
    output::{render_text, Report},
    rules::Severity,
};

/// Print version information
fn print_version() {
    println!("cmdaudit {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"cmdaudit - Risk classification for shell commands

USAGE:
    cmdaudit [OPTIONS] [--] COMMAND...

    COMMAND... is joined with single spaces and audited as one string.
    The command is never executed.

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    -c, --config PATH       Path to config file
    -j, --json              Print a structured JSON report
    -q, --quiet             Suppress the report (useful with --fail-on)
    -f, --fail-on LEVEL     Exit 2 if the highest severity reaches LEVEL
                            (low, medium, high, critical)

OUTPUT:
    Clear verdicts print "Risk Level: LOW". Flagged verdicts print one
    "SEVERITY: message" segment per matched rule, joined with " | ",
    in rule declaration order.

CONFIGURATION:
    ~/.config/cmdaudit/config.toml or /etc/cmdaudit/config.toml.
    [[rules]] entries carry pattern, kind (substring|regex), severity,
    and message; configured rules replace the built-in set.
"#
    );
}

/// Parsed command line arguments
struct Args {
    help: bool,
    version: bool,
    json: bool,
    quiet: bool,
    fail_on: Option<Severity>,
    config_path: Option<String>,
    command: String,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            json: false,
            quiet: false,
            fail_on: None,
            config_path: None,
            command: String::new(),
        };

        let mut command_parts: Vec<&str> = Vec::new();
        let mut i = 1;
        while i < args.len() {
            // Once the command starts, everything is taken verbatim so that
            // audited flags like "-rf" are not mistaken for our options
            if !command_parts.is_empty() {
                command_parts.push(&args[i]);
                i += 1;
                continue;
            }

            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-V" | "--version" => result.version = true,
                "-j" | "--json" => result.json = true,
                "-q" | "--quiet" => result.quiet = true,
                "-f" | "--fail-on" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.fail_on = Some(parse_severity(&args[i])?);
                    } else {
                        return Err("--fail-on requires a severity level".to_string());
                    }
                }
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    } else {
                        return Err("--config requires a path".to_string());
                    }
                }
                arg if arg.starts_with("--fail-on=") => {
                    let level = arg.trim_start_matches("--fail-on=");
                    result.fail_on = Some(parse_severity(level)?);
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                "--" => {
                    for part in &args[i + 1..] {
                        command_parts.push(part);
                    }
                    break;
                }
                arg => command_parts.push(arg),
            }
            i += 1;
        }

        result.command = command_parts.join(" ");
        Ok(result)
    }
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    Severity::from_str(s)
        .ok_or_else(|| format!("unknown severity level: {} (expected low, medium, high, critical)", s))
}

fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    // Load configuration. A malformed config aborts the run: falling back
    // to built-ins would silently drop operator rules.
    let config = match args.config_path {
        Some(ref path) => Config::load_from(std::path::Path::new(path)),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let engine = match RiskEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let verdict = engine.classify(&args.command);

    // Append to the audit log; a logging failure is reported but does not
    // change the verdict or exit status
    let mut logger = AuditLogger::new(config.audit_path().as_deref());
    if let Err(e) = logger.log_verdict(&args.command, &verdict) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }

    if !args.quiet {
        if args.json {
            println!("{}", Report::new(&args.command, &verdict).to_json());
        } else {
            println!("{}", render_text(&verdict));
        }
    }

    // Threshold decision lives here in the caller, not in the classifier
    if let (Some(threshold), Some(highest)) = (args.fail_on, verdict.highest()) {
        if highest >= threshold {
            return ExitCode::from(2);
        }
    }

    ExitCode::SUCCESS
}

mod cli;

use clap::Parser;
use cli::{Cli, Commands, ValidateArgs};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use validate_skill::finding::{self, Severity};
use validate_skill::{config, output, rules, validate};

fn main() {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Some(Commands::ListRules) => list_rules(),
        Some(Commands::Explain { code }) => explain(&code),
        None => run(cli.validate),
    }
}

/// Diagnostics go to stderr so reports on stdout stay machine-readable.
/// `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(args: ValidateArgs) {
    let Some(path) = args.path else {
        eprintln!("Error: a path is required");
        std::process::exit(2);
    };

    let mut config = config::Config::load(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    });

    if args.strict {
        config.strict.enabled = true;
    }

    let reports = validate::validate_path(&path, &config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    });

    print!(
        "{}",
        output::format_reports(&reports, args.format, args.verbose)
    );

    let passed = finding::all_pass(&reports, config.strict.enabled);
    std::process::exit(if passed { 0 } else { 1 });
}

fn list_rules() {
    println!("{}", "Built-in Rules".bold().underline());
    println!();

    let mut current_component = "";
    for rule in rules::RULES {
        if rule.component != current_component {
            if !current_component.is_empty() {
                println!();
            }
            println!("  {}", rule.component.bold());
            current_component = rule.component;
        }

        let severity = match rule.severity {
            Severity::Error => "  ERROR".red().bold().to_string(),
            Severity::Warning => "WARNING".yellow().bold().to_string(),
        };

        println!(
            "    [{severity}] {id:<30} {message}",
            id = rule.id,
            message = rule.message,
        );
    }

    println!();
    println!("  Total: {} rules", rules::RULES.len());
}

fn explain(code: &str) {
    match rules::lookup(code) {
        Some(rule) => {
            println!("{}", rule.id.bold());
            println!();
            println!("  Component:    {}", rule.component);
            println!("  Severity:     {}", rule.severity);
            println!("  Description:  {}", rule.message);
            println!("  Remediation:  {}", rule.remediation);
        }
        None => {
            eprintln!("Unknown rule: {code}");
            eprintln!("Use 'validate-skill list-rules' to see all available rules.");
            std::process::exit(2);
        }
    }
}

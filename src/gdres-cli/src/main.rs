mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::*;
use commands::configure::DefaultPaths;
use commands::optimize::OptimizeArgs;

/// Log to stderr so reports on stdout stay clean. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            input,
            class,
            stats,
            all,
            format,
        } => {
            commands::parse::handle(&input, class.into(), stats.as_deref(), all, format)?;
        }

        Commands::Optimize {
            slots,
            goals,
            components,
            augments,
            stats,
            components_first,
            format,
        } => {
            let args = OptimizeArgs {
                slots,
                goals,
                components,
                augments,
                stats,
                components_first,
            };
            commands::optimize::handle(args, format)?;
        }

        Commands::Configure {
            slots,
            goals,
            components,
            augments,
            stats,
            deny,
            show,
        } => {
            let paths = DefaultPaths {
                slots,
                goals,
                components,
                augments,
                stats,
            };
            commands::configure::handle(paths, deny, show)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_optimize_args() {
        let cli = Cli::try_parse_from([
            "gdres",
            "-v",
            "optimize",
            "--slots",
            "s.csv",
            "--components-first",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Optimize {
                slots,
                components_first,
                format,
                ..
            } => {
                assert_eq!(slots.as_deref(), Some(std::path::Path::new("s.csv")));
                assert!(components_first);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected optimize"),
        }
    }

    #[test]
    fn test_parse_repeated_deny() {
        let cli = Cli::try_parse_from([
            "gdres",
            "configure",
            "--deny",
            "Titan Plating",
            "--deny",
            "Sacred Plating",
        ])
        .unwrap();
        match cli.command {
            Commands::Configure { deny, .. } => assert_eq!(deny.len(), 2),
            _ => panic!("expected configure"),
        }
    }
}

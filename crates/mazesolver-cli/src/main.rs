mod commands;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mazesolver_cli::output::{self, print_footer, print_logo, OutputFormat};

use commands::algorithms::handle_algorithms_command;
use commands::compare::{handle_compare_command, CompareArgs};
use commands::generate::{handle_generate_command, GenerateArgs};
use commands::solve::{handle_solve_command, SolveArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid maze pathfinding utilities")]
struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Suppress the banner and footer.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a path through a maze file with one search strategy.
    Solve(SolveArgs),
    /// Benchmark several strategies on one or more mazes.
    Compare(CompareArgs),
    /// Generate a random solvable maze.
    Generate(GenerateArgs),
    /// List the available search strategies.
    Algorithms,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    // A maze printed to stdout must stay loadable when redirected to a file.
    let maze_on_stdout = matches!(&cli.command, Command::Generate(args) if args.output.is_none());
    let decorate = !cli.no_logo && cli.format == OutputFormat::Text && !maze_on_stdout;
    if decorate {
        print_logo();
    }

    let code = match &cli.command {
        Command::Solve(args) => handle_solve_command(cli.format, args)?,
        Command::Compare(args) => {
            handle_compare_command(cli.format, args)?;
            ExitCode::SUCCESS
        }
        Command::Generate(args) => {
            handle_generate_command(cli.format, args)?;
            ExitCode::SUCCESS
        }
        Command::Algorithms => {
            handle_algorithms_command(cli.format)?;
            ExitCode::SUCCESS
        }
    };

    if decorate {
        print_footer(started.elapsed());
    }
    Ok(code)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

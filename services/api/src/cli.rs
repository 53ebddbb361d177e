use crate::demo::{run_demo, run_match, DemoArgs, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Matcher",
    about = "Score candidates against internship opportunities and allocate seats",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one matching pass over candidate and opportunity roster files
    Match(MatchArgs),
    /// Run the engine over a built-in sample roster
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::OutputFormat;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["placement-ai-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn match_accepts_paths_seed_and_format() {
        let cli = Cli::try_parse_from([
            "placement-ai-api",
            "match",
            "--candidates",
            "candidates.csv",
            "--opportunities",
            "opportunities.json",
            "--seed",
            "9",
            "--format",
            "csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Match(args)) => {
                assert_eq!(args.seed, Some(9));
                assert_eq!(args.format, OutputFormat::Csv);
                assert_eq!(args.opportunities.to_string_lossy(), "opportunities.json");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn match_requires_both_rosters() {
        let parsed = Cli::try_parse_from(["placement-ai-api", "match", "--candidates", "c.csv"]);
        assert!(parsed.is_err());
    }
}

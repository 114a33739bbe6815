//! Command line configuration.

use std::path::PathBuf;

use clap::{builder::RangedU64ValueParser, Parser};

use crate::generator::MAX_SIDE;

/// Parses a maze side, rejecting values above [`MAX_SIDE`].
fn side_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(..=u64::try_from(MAX_SIDE).unwrap_or(u64::MAX))
}

/// Command line arguments of the game.
///
/// Trace a path through a randomly generated maze, from the start cell to the end cell, with the
/// mouse.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Number of maze rows, at most 255. Even values are rounded up to the next odd one.
    #[arg(long, default_value_t = 15, value_parser = side_parser())]
    pub rows: usize,
    /// Number of maze columns, at most 255. Even values are rounded up to the next odd one.
    #[arg(long, default_value_t = 15, value_parser = side_parser())]
    pub cols: usize,
    /// Seed for the maze generator, making every maze of the session reproducible.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File to write logs to. Nothing is logged when absent.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["labyrintrace"]).expect("no arguments should parse");

        assert_eq!(cli.rows, 15, "default rows");
        assert_eq!(cli.cols, 15, "default columns");
        assert_eq!(cli.seed, None, "random by default");
        assert!(cli.log_file.is_none(), "no logging by default");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "labyrintrace",
            "--rows",
            "21",
            "--cols",
            "31",
            "--seed",
            "42",
            "--log-file",
            "trace.log",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.rows, 21, "rows");
        assert_eq!(cli.cols, 31, "columns");
        assert_eq!(cli.seed, Some(42), "seed");
        assert_eq!(cli.log_file, Some(PathBuf::from("trace.log")), "log file");
    }

    #[test]
    fn test_cli_rejects_negative_sizes() {
        assert!(
            Cli::try_parse_from(["labyrintrace", "--rows", "-3"]).is_err(),
            "sizes are unsigned"
        );
    }

    #[test]
    fn test_cli_rejects_oversized_sizes() {
        let limit = MAX_SIDE.to_string();
        let above = (MAX_SIDE + 1).to_string();

        let cli = Cli::try_parse_from(["labyrintrace", "--rows", &limit, "--cols", &limit])
            .expect("the largest side should parse");
        assert_eq!(cli.rows, MAX_SIDE, "largest rows");

        assert!(
            Cli::try_parse_from(["labyrintrace", "--rows", &above]).is_err(),
            "rows above the limit are rejected"
        );
        assert!(
            Cli::try_parse_from(["labyrintrace", "--cols", "70001"]).is_err(),
            "columns above the limit are rejected"
        );
    }
}

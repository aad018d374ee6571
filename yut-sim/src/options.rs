//! Command-line options shared by the binaries.

use yut_core::{BoardShape, GameConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    pub games: u64,
    pub config: GameConfig,
    /// Fixed seed for reproducible runs. Fresh OS entropy when absent.
    pub seed: Option<u64>,
    pub quiet: bool,
    pub log_interval_secs: u64,
    pub max_actions: usize,
    pub json: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        SimOptions {
            games: 1000,
            config: GameConfig::default(),
            seed: None,
            quiet: false,
            log_interval_secs: 5,
            max_actions: 100_000,
            json: false,
        }
    }
}

/// `with_json` lists the `--json` flag, which only the trace binary accepts.
pub fn print_usage(program: &str, with_json: bool) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games <n>            Number of games to play (default: 1000)");
    eprintln!("  --shape <shape>        square, pentagon or hexagon (default: square)");
    eprintln!("  --teams <n>            Teams, 2 to 4 (default: 2)");
    eprintln!("  --pieces <n>           Pieces per team, 1 to 5 (default: 4)");
    eprintln!("  --seed <n>             Seed for rolls and choices");
    eprintln!("  --max-actions <n>      Give up on a game after this many actions");
    eprintln!("  --log-interval <secs>  Seconds between progress lines (default: 5)");
    if with_json {
        eprintln!("  --json                 Print events as JSON lines");
    }
    eprintln!("  --quiet                Only print the summary");
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = value(args, i, flag)?;
    raw.parse().map_err(|_| format!("{}: not a number: {}", flag, raw))
}

impl SimOptions {
    /// Parse `args` (program name first). `Ok(None)` means help was asked for.
    /// `--json` is an unknown argument unless `with_json` is set.
    pub fn parse(args: &[String], with_json: bool) -> Result<Option<SimOptions>, String> {
        let mut opts = SimOptions::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--games" => {
                    i += 1;
                    opts.games = number(args, i, "--games")?;
                }
                "--shape" => {
                    i += 1;
                    let raw = value(args, i, "--shape")?;
                    opts.config.shape = raw.parse::<BoardShape>().map_err(|e| e.to_string())?;
                }
                "--teams" => {
                    i += 1;
                    opts.config.teams = number(args, i, "--teams")?;
                }
                "--pieces" => {
                    i += 1;
                    opts.config.pieces_per_team = number(args, i, "--pieces")?;
                }
                "--seed" => {
                    i += 1;
                    opts.seed = Some(number(args, i, "--seed")?);
                }
                "--max-actions" => {
                    i += 1;
                    opts.max_actions = number(args, i, "--max-actions")?;
                }
                "--log-interval" => {
                    i += 1;
                    opts.log_interval_secs = number(args, i, "--log-interval")?;
                }
                "--json" if with_json => opts.json = true,
                "-q" | "--quiet" => opts.quiet = true,
                "-h" | "--help" => return Ok(None),
                other => return Err(format!("Unknown argument: {}", other)),
            }
            i += 1;
        }
        opts.config.validate().map_err(|e| e.to_string())?;
        Ok(Some(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("simulate")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect()
    }

    fn parse(line: &str) -> Result<Option<SimOptions>, String> {
        SimOptions::parse(&args(line), false)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(""), Ok(Some(SimOptions::default())));
    }

    #[test]
    fn test_all_flags() {
        let opts = parse("--games 20 --shape hexagon --teams 4 --pieces 5 --seed 9 --quiet")
            .unwrap()
            .unwrap();
        assert_eq!(opts.games, 20);
        assert_eq!(opts.config, GameConfig::new(BoardShape::Hexagon, 4, 5));
        assert_eq!(opts.seed, Some(9));
        assert!(opts.quiet);
    }

    #[test]
    fn test_json_only_when_accepted() {
        assert_eq!(parse("--json"), Err("Unknown argument: --json".to_string()));
        let opts = SimOptions::parse(&args("--json --seed 3"), true).unwrap().unwrap();
        assert!(opts.json);
        assert_eq!(opts.seed, Some(3));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse("--help"), Ok(None));
    }

    #[test]
    fn test_errors() {
        assert!(parse("--games").is_err());
        assert!(parse("--games many").is_err());
        assert!(parse("--shape octagon").is_err());
        assert!(parse("--teams 5").is_err());
        assert!(parse("--pieces 0").is_err());
        assert!(parse("--fast").is_err());
    }
}

//! Lottery Binary
//!
//! Resolve an election from a dominance relation, a duel tally, or a list
//! of preorder ballots, all read as JSON from a file or stdin.
//!
//! Options: --limit, --draws, --seed, --verbose

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use maxlottery::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lottery", about = "Resolve Condorcet elections into maximal lotteries")]
struct Args {
    #[command(subcommand)]
    input: Input,
    /// Refuse elections with more candidates than this.
    #[arg(long, env = "LOTTERY_LIMIT")]
    limit: Option<usize>,
    /// Sample this many winners from the lottery.
    #[arg(long, default_value_t = 0)]
    draws: usize,
    /// Seed for sampling winners.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the strategy as JSON instead of a table.
    #[arg(long)]
    json: bool,
    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Input {
    /// Square matrix of booleans (or 0/1): row beats column.
    Graph { path: Option<PathBuf> },
    /// Square matrix of pairwise win counts.
    Tally { path: Option<PathBuf> },
    /// List of ballots, each mapping candidate to [low, high] ranks.
    Ballots {
        path: Option<PathBuf>,
        /// Number of candidates (defaults to one past the largest ranked).
        #[arg(long)]
        candidates: Option<usize>,
    },
}

/// Accept either `true`/`false` or `1`/`0` cells.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Cell {
    Bool(bool),
    Flag(u8),
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Bool(b) => b,
            Cell::Flag(f) => f != 0,
        }
    }
}

fn read(path: Option<PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        }
    }
}

fn dominance(input: Input, lottery: &Lottery) -> anyhow::Result<Dominance> {
    match input {
        Input::Graph { path } => {
            let rows = serde_json::from_str::<Vec<Vec<Cell>>>(&read(path)?)?;
            let rows = rows
                .into_iter()
                .map(|row| row.into_iter().map(bool::from).collect())
                .collect::<Vec<Vec<bool>>>();
            Ok(Dominance::try_from(rows)?)
        }
        Input::Tally { path } => {
            let rows = serde_json::from_str::<Vec<Vec<Votes>>>(&read(path)?)?;
            Ok(Dominance::try_from(&Tally::try_from(rows)?)?)
        }
        Input::Ballots { path, candidates } => {
            let ballots = serde_json::from_str::<Vec<BTreeMap<Candidate, (Rank, Rank)>>>(&read(path)?)?
                .into_iter()
                .map(Ranking::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            let n = candidates
                .or_else(|| ballots.iter().flat_map(Ranking::candidates).max().map(|v| v + 1))
                .ok_or_else(|| anyhow::anyhow!("no ranked candidates"))?;
            Ok(Dominance::try_from(&lottery.tally(n, &ballots)?)?)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    })?;
    let lottery = match args.limit {
        Some(limit) => Lottery::new().limit(limit),
        None => Lottery::new(),
    };
    let ref graph = dominance(args.input, &lottery)?;
    let strategy = lottery
        .solve(graph)
        .context("election could not be resolved; fall back to another rule")?;
    match args.json {
        true => println!("{}", serde_json::to_string_pretty(&strategy)?),
        false => print!("{}", strategy),
    }
    if args.draws > 0 {
        let ref mut rng = match args.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let winners = (0..args.draws)
            .map(|_| strategy.play(rng).to_string())
            .collect::<Vec<_>>();
        println!("{}", winners.join(" "));
    }
    Ok(())
}

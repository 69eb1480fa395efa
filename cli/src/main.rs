use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use waypath_core::{Grid, Pos};
use waypath_gen::{GenConfig, ObstacleGen};
use waypath_paths::{Algorithm, PathTrace, SearchOptions, find_path};

/// waypath: grid pathfinding with replayable exploration traces.
#[derive(Parser)]
#[command(name = "waypath", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a grid with obstacles, then search it corner to corner.
    Generate {
        /// JSON file holding a `RunConfig`. Flags below override it.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        rows: Option<i32>,
        #[arg(long)]
        cols: Option<i32>,
        /// Requested obstacle count.
        #[arg(long)]
        obstacles: Option<usize>,
        /// Attempts allowed per requested obstacle.
        #[arg(long)]
        max_attempt_multiplier: Option<usize>,
        /// Seed for obstacle placement. Random when omitted.
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Search a grid read from a JSON file.
    Search {
        /// `{"model": "code"|"cost", "rows": [[...]]}`
        #[arg(long)]
        grid: PathBuf,
        /// Start cell as `row,col`.
        #[arg(long, value_parser = parse_pos)]
        start: Pos,
        /// End cell as `row,col`.
        #[arg(long, value_parser = parse_pos)]
        end: Pos,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// dijkstra, astar or jump_point
    #[arg(long)]
    algorithm: Option<Algorithm>,
    /// Let A* move diagonally.
    #[arg(long)]
    diagonal: bool,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl SearchArgs {
    fn apply(&self, opts: &mut SearchOptions) {
        if let Some(algorithm) = self.algorithm {
            opts.algorithm = algorithm;
        }
        if self.diagonal {
            opts.diagonal = true;
        }
    }
}

/// Everything one run needs, as loaded from `--config`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RunConfig {
    generator: GenConfig,
    search: SearchOptions,
}

#[derive(Serialize)]
struct GenerateReport<'a> {
    seed: u64,
    options: &'a SearchOptions,
    map: &'a Grid,
    start: Pos,
    end: Pos,
    requested: usize,
    placed: usize,
    trace: &'a PathTrace,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    options: &'a SearchOptions,
    start: Pos,
    end: Pos,
    trace: &'a PathTrace,
}

fn parse_pos(s: &str) -> Result<Pos, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got {s:?}"))?;
    let row = r.trim().parse().map_err(|e| format!("bad row {r:?}: {e}"))?;
    let col = c.trim().parse().map_err(|e| format!("bad col {c:?}: {e}"))?;
    Ok(Pos::new(row, col))
}

fn load_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            config,
            rows,
            cols,
            obstacles,
            max_attempt_multiplier,
            seed,
            search,
        } => {
            let mut run: RunConfig = match &config {
                Some(path) => load_json(path)?,
                None => RunConfig::default(),
            };
            let g = &mut run.generator;
            g.rows = rows.unwrap_or(g.rows);
            g.cols = cols.unwrap_or(g.cols);
            g.obstacle_count = obstacles.unwrap_or(g.obstacle_count);
            g.max_attempt_multiplier = max_attempt_multiplier.unwrap_or(g.max_attempt_multiplier);
            search.apply(&mut run.search);

            let seed = seed.unwrap_or_else(|| rand::rng().random());
            log::info!("generating {}x{} grid with seed {seed}", run.generator.rows, run.generator.cols);
            let generated = ObstacleGen::new(StdRng::seed_from_u64(seed))
                .generate(&run.generator)
                .context("generating grid")?;
            let trace = find_path(&generated.grid, generated.start, generated.end, &run.search)?;

            emit(
                &GenerateReport {
                    seed,
                    options: &run.search,
                    map: &generated.grid,
                    start: generated.start,
                    end: generated.end,
                    requested: generated.requested,
                    placed: generated.placed,
                    trace: &trace,
                },
                search.pretty,
            )
        }
        Command::Search {
            grid,
            start,
            end,
            search,
        } => {
            let map: Grid = load_json(&grid)?;
            let mut opts = SearchOptions::default();
            search.apply(&mut opts);
            log::info!("searching {} from {start} to {end} with {}", grid.display(), opts.algorithm);
            let trace = find_path(&map, start, end, &opts)?;
            emit(
                &SearchReport {
                    options: &opts,
                    start,
                    end,
                    trace: &trace,
                },
                search.pretty,
            )
        }
    }
}

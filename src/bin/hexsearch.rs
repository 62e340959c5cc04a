use clap::Parser;
use hexsearch::search::{
    CellId, EngineState, HexGrid, PathSearch, Result, SearchBudget, SearchConfig, SearchStrategy,
    Solution, Verbosity,
};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode, time::Duration};
use tracing::{error, info};

#[derive(Parser)]
#[command(version)]
/// Search a path across a hex grid, a slice of work at a time.
struct Cli {
    #[arg(help = "Number of grid rows", long = "rows", id = "ROWS")]
    rows: usize,
    #[arg(help = "Number of grid columns", long = "columns", id = "COLUMNS")]
    columns: usize,
    #[arg(
        help = "An impassable cell as row,col; may be repeated",
        short = 'b',
        long = "blocked",
        id = "BLOCKED"
    )]
    blocked: Vec<CellId>,
    #[arg(help = "The start cell as row,col", long = "start", id = "START")]
    start: CellId,
    #[arg(help = "The goal cell as row,col", long = "goal", id = "GOAL")]
    goal: CellId,
    #[arg(
        value_enum,
        help = "The search strategy to use, overrides the config file",
        short = 'e',
        long = "engine",
        id = "ENGINE"
    )]
    strategy: Option<SearchStrategy>,
    #[arg(
        help = "Heuristic multiplier for greedy and A* search, overrides the config file",
        long = "heuristic-weight",
        id = "WEIGHT"
    )]
    heuristic_weight: Option<f64>,
    #[arg(
        help = "A TOML file with the search configuration",
        long = "config",
        id = "CONFIG"
    )]
    config: Option<PathBuf>,
    #[arg(
        help = "Expansion steps per update call",
        long = "iterations",
        id = "ITERATIONS",
        conflicts_with = "TIME_SLICE"
    )]
    iterations: Option<usize>,
    #[arg(
        help = "Wall time per update call, e.g. 5ms",
        long = "time-slice",
        id = "TIME_SLICE",
        value_parser = humantime::parse_duration
    )]
    time_slice: Option<Duration>,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour")]
    colour: bool,
    #[arg(help = "Print the result as JSON", long = "json")]
    json: bool,
}

impl Cli {
    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_path(path)?,
            None => SearchConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(heuristic_weight) = self.heuristic_weight {
            config.heuristic_weight = heuristic_weight;
        }
        Ok(config)
    }

    fn budget(&self) -> SearchBudget {
        match (self.iterations, self.time_slice) {
            (Some(iterations), _) => SearchBudget::Iterations(iterations),
            (None, Some(slice)) => SearchBudget::TimeSlice(slice),
            (None, None) => SearchBudget::default(),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    strategy: SearchStrategy,
    heuristic_weight: f64,
    start: CellId,
    goal: CellId,
    state: String,
    solution: Option<&'a Solution>,
    expanded_nodes: i64,
    generated_nodes: i64,
    reopened_nodes: i64,
    updates: i64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(cli.colour)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match search(&cli) {
        Ok(EngineState::Succeeded) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn search(cli: &Cli) -> Result<EngineState> {
    let config = cli.search_config()?;
    let mut grid = HexGrid::uniform(cli.rows, cli.columns);
    for &cell in &cli.blocked {
        grid.block(cell)?;
    }

    let mut engine = PathSearch::new(config);
    engine.initialize(&grid)?;
    engine.enter(cli.start, cli.goal)?;

    let budget = cli.budget();
    while !engine.is_done() {
        engine.update(budget)?;
    }

    if cli.json {
        let statistics = engine.statistics();
        let report = Report {
            strategy: config.strategy,
            heuristic_weight: config.heuristic_weight,
            start: cli.start,
            goal: cli.goal,
            state: engine.state().to_string(),
            solution: engine.solution_path(),
            expanded_nodes: statistics.map_or(0, |s| s.expanded_nodes()),
            generated_nodes: statistics.map_or(0, |s| s.generated_nodes()),
            reopened_nodes: statistics.map_or(0, |s| s.reopened_nodes()),
            updates: statistics.map_or(0, |s| s.updates()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match engine.solution_path() {
            Some(solution) => {
                info!(hops = solution.hops());
                println!("Path found:");
                println!("{}", solution);
                println!("Path cost: {:.3}", solution.cost());
            }
            None => println!("No path found"),
        }
    }

    let state = engine.state();
    engine.exit()?;
    engine.shutdown();
    Ok(state)
}

// algotrace: record an algorithm run, then step through it

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use algotrace::algorithms::{self, pathfinding, AlgorithmInput, AlgorithmKind};
use algotrace::playback::{PlaybackEngine, DEFAULT_SPEED_MS};
use algotrace::snapshot::Snapshot;
use algotrace::trace::Trace;
use algotrace::ui::{App, PlayerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Record an algorithm run and play it back step by step")]
struct Args {
    /// Algorithm to run
    #[arg(value_enum)]
    algorithm: AlgorithmKind,
    /// Comma-separated input values; a built-in sample when omitted
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Vec<i64>,
    /// Value to search for, insert, push or delete
    #[arg(long, allow_negative_numbers = true)]
    target: Option<i64>,
    /// Linked list insert position (appends when omitted)
    #[arg(long)]
    position: Option<usize>,
    /// Graph start node
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Dijkstra destination node
    #[arg(long)]
    end: Option<usize>,
    /// Adjacency matrix, rows separated by `;`, weights by `,` (0 = no edge)
    #[arg(long)]
    matrix: Option<String>,
    /// A* grid, rows separated by `;`: `.` open, `#` wall, `S` start, `G` goal
    #[arg(long)]
    grid: Option<String>,
    /// Milliseconds between steps during playback
    #[arg(long, default_value_t = DEFAULT_SPEED_MS as i64, allow_negative_numbers = true)]
    speed: i64,
    /// Print every step and exit instead of opening the viewer
    #[arg(long)]
    print: bool,
    /// With --print, emit one JSON object per step
    #[arg(long, requires = "print")]
    json: bool,
    /// Write logs here (the viewer owns the terminal, so logs are dropped otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if args.print => builder.with_writer(io::stderr).init(),
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

/// Parse `0,4,0;4,0,1;0,1,0` into rows of weights
fn parse_matrix(text: &str) -> Result<Vec<Vec<i64>>> {
    text.split(';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .enumerate()
        .map(|(r, row)| {
            row.split(',')
                .map(|w| {
                    w.trim()
                        .parse::<i64>()
                        .with_context(|| format!("bad weight `{}` in matrix row {}", w.trim(), r))
                })
                .collect()
        })
        .collect()
}

fn build_input(args: &Args) -> Result<AlgorithmInput> {
    let values = if args.values.is_empty() {
        args.algorithm.sample_values()
    } else {
        args.values.clone()
    };
    let matrix = args.matrix.as_deref().map(parse_matrix).transpose()?;
    let grid = args
        .grid
        .as_deref()
        .map(pathfinding::parse_grid)
        .transpose()
        .context("bad --grid")?;

    if args.algorithm.needs_target() && args.target.is_none() {
        bail!("{} needs --target", args.algorithm.name());
    }

    Ok(AlgorithmInput {
        values,
        target: args.target,
        position: args.position,
        matrix,
        start: args.start,
        end: args.end,
        grid,
    })
}

/// One-line rendering of a snapshot for `--print`
fn summarize(snapshot: &Snapshot) -> String {
    fn list(values: &[i64]) -> String {
        let items: Vec<String> = values.iter().map(i64::to_string).collect();
        format!("[{}]", items.join(", "))
    }

    match snapshot {
        Snapshot::Array(a) => list(&a.values()),
        Snapshot::Graph(g) => {
            let visited: Vec<i64> = g.visited_nodes.iter().map(|&n| n as i64).collect();
            match g.current_node {
                Some(node) => format!("at {} visited {}", node, list(&visited)),
                None => format!("visited {}", list(&visited)),
            }
        }
        Snapshot::Grid(g) => {
            let closed = format!("closed {}", g.closed.len());
            match (g.current, g.path.is_empty()) {
                (_, false) => format!("{} path {}", closed, g.path.len()),
                (Some((r, c)), true) => format!("at ({}, {}) {}", r, c, closed),
                (None, true) => closed,
            }
        }
        Snapshot::Tree(t) => format!("inorder {}", list(&t.inorder())),
        Snapshot::Sequence(s) => format!("{} {}", s.kind.name(), list(&s.values())),
    }
}

fn print_trace(trace: &Trace, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !json {
        writeln!(out, "{} ({} steps)", trace.algorithm_name(), trace.len())?;
    }
    for step in trace.steps() {
        if json {
            writeln!(out, "{}", serde_json::to_string(step)?)?;
            continue;
        }
        let line = step
            .source_line
            .map_or_else(|| "  -".to_string(), |l| format!("{:>3}", l));
        writeln!(
            out,
            "{:>4} L{} {:<48} {}",
            step.index,
            line,
            step.description,
            summarize(&step.snapshot)
        )?;
    }
    Ok(())
}

/// Raw mode plus alternate screen, undone on drop
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard { out };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, Show) {
            warn!(error = %e, "failed to restore the screen");
        }
    }
}

fn run_viewer(trace: Trace, kind: AlgorithmKind, speed: i64) -> Result<()> {
    let mut engine = PlaybackEngine::default();
    engine.set_speed(speed)?;
    engine.load(trace)?;

    // Set up terminal; the guard restores it on every exit path from here on
    let _guard = TerminalGuard::enter(io::stdout())?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, kind.listing(), PlayerConfig::default());
    let res = app.run(&mut terminal);

    res.context("viewer failed")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let input = build_input(&args)?;
    let trace = algorithms::run(args.algorithm, &input)
        .with_context(|| format!("{} failed", args.algorithm.name()))?;
    info!(
        algorithm = trace.algorithm_name(),
        steps = trace.len(),
        "recorded"
    );

    if args.print {
        return print_trace(&trace, args.json);
    }
    if trace.is_empty() {
        warn!("nothing was recorded");
        bail!("{} recorded no steps", args.algorithm.name());
    }
    run_viewer(trace, args.algorithm, args.speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matrix() {
        let m = parse_matrix("0,4, 0; 4,0,1 ;0,1,0;").unwrap();
        assert_eq!(m, vec![vec![0, 4, 0], vec![4, 0, 1], vec![0, 1, 0]]);
        assert!(parse_matrix("0,x").is_err());
    }

    #[test]
    fn test_args_parse_negative_values() {
        let args =
            Args::try_parse_from(["algotrace", "binary-search", "--values", "-3,0,7", "--target", "-3"])
                .unwrap();
        assert_eq!(args.values, vec![-3, 0, 7]);
        assert_eq!(args.target, Some(-3));
        assert_eq!(args.speed, 800);
    }

    #[test]
    fn test_missing_target_is_reported_before_running() {
        let args = Args::try_parse_from(["algotrace", "bst-insert"]).unwrap();
        let err = build_input(&args).unwrap_err();
        assert!(err.to_string().contains("--target"));
    }

    #[test]
    fn test_sample_values_fill_in() {
        let args = Args::try_parse_from(["algotrace", "quick-sort"]).unwrap();
        let input = build_input(&args).unwrap();
        assert_eq!(input.values, AlgorithmKind::QuickSort.sample_values());
    }

    #[test]
    fn test_terminal_guard_restores_screen_on_drop() {
        let mut out = Vec::new();
        drop(TerminalGuard { out: &mut out });
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "left alternate screen");
        assert!(written.contains("\x1b[?25h"), "cursor shown");
    }

    #[test]
    fn test_grid_argument_is_parsed() {
        let args = Args::try_parse_from(["algotrace", "a-star", "--grid", "S.#;..G"]).unwrap();
        let grid = build_input(&args).unwrap().grid.unwrap();
        assert_eq!((grid.rows, grid.cols), (2, 3));
        assert_eq!(grid.goal, (1, 2));

        let args = Args::try_parse_from(["algotrace", "a-star", "--grid", "S.;.."]).unwrap();
        assert!(build_input(&args).is_err());
    }

    #[test]
    fn test_json_requires_print() {
        assert!(Args::try_parse_from(["algotrace", "bfs", "--json"]).is_err());
    }
}

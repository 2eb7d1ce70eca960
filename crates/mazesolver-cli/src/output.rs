//! Output formatting for solve results, benchmark reports, and generated mazes.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use mazesolver_lib::{AlgorithmInfo, BenchmarkReport, BenchmarkSuite, SearchPhase, SolveSummary};

use crate::terminal::{format_with_separators, supports_unicode, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly view with statistics.
    #[default]
    Text,
    /// One position per line with `+`/`|`/`-` prefixes.
    Basic,
    /// Pretty-printed JSON on stdout.
    Json,
}

impl OutputFormat {
    /// Render a solve summary. `overlay` is the ASCII maze drawing requested
    /// with `--show-maze`; JSON output omits it.
    pub fn render_solve(self, summary: &SolveSummary, overlay: Option<&str>) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                let palette = ColorPalette::detect();
                if let Some(drawing) = overlay {
                    print!("{}", colorize_maze(drawing, &palette));
                    println!();
                }
                print!("{}", format_text(summary, &palette));
                Ok(())
            }
            OutputFormat::Basic => {
                if let Some(drawing) = overlay {
                    print!("{drawing}");
                }
                print!("{}", format_basic(summary));
                Ok(())
            }
            OutputFormat::Json => render_json(summary),
        }
    }

    pub fn render_benchmark(self, suite: &BenchmarkSuite) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(suite),
            OutputFormat::Text | OutputFormat::Basic => {
                print!("{}", format_suite(suite));
                Ok(())
            }
        }
    }

    pub fn render_catalog(self, catalog: &[AlgorithmInfo]) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(catalog),
            OutputFormat::Text => {
                print!("{}", format_catalog(catalog));
                Ok(())
            }
            OutputFormat::Basic => {
                for info in catalog {
                    println!("{}", info.algorithm);
                }
                Ok(())
            }
        }
    }
}

/// Print the CLI logo banner, in Unicode box drawing when the locale allows.
pub fn print_logo() {
    let palette = ColorPalette::detect();
    let (cyan, reset) = (palette.cyan, palette.reset);

    if supports_unicode() {
        println!(
            "{cyan}╭──────────────────────────────╮{reset}
{cyan}│  ▚▚ M A Z E S O L V E R ▞▞   │{reset}
{cyan}╰──────────────────────────────╯{reset}"
        );
    } else {
        println!(
            "{cyan}+------------------------------+
|  MAZESOLVER                  |
+------------------------------+{reset}"
        );
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration) {
    let palette = ColorPalette::detect();
    let (gray, reset) = (palette.gray, palette.reset);
    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };
    println!("\n{gray}Completed in {}{reset}", time_str);
}

/// Human-friendly solve view with algorithm annotation.
pub fn format_text(summary: &SolveSummary, palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let stats = &summary.statistics;
    let p = palette;

    match summary.goal {
        Some(goal) => {
            let _ = writeln!(
                buffer,
                "{}Path from {} to {}{} ({} moves; algorithm: {}):",
                p.white_bold,
                summary.start,
                goal,
                p.reset,
                summary.moves(),
                summary.algorithm
            );
            for step in &summary.steps {
                let _ = writeln!(buffer, " - {}", step.position);
            }
        }
        None => {
            let reason = match summary.status {
                SearchPhase::TimedOut => "search timed out",
                _ => "no path exists",
            };
            let _ = writeln!(
                buffer,
                "{}No path found from {} ({reason}; algorithm: {}){}",
                p.red, summary.start, summary.algorithm, p.reset
            );
        }
    }

    let _ = writeln!(buffer);
    let _ = writeln!(
        buffer,
        "{}Nodes explored:{} {}",
        p.gray,
        p.reset,
        format_with_separators(stats.nodes_explored as u64)
    );
    let _ = writeln!(
        buffer,
        "{}Max frontier:{} {}",
        p.gray,
        p.reset,
        format_with_separators(stats.max_frontier_size as u64)
    );
    let _ = writeln!(
        buffer,
        "{}Elapsed:{} {:.3}ms",
        p.gray,
        p.reset,
        stats.elapsed.as_secs_f64() * 1000.0
    );
    if let Some(meeting) = stats.meeting_point {
        let _ = writeln!(buffer, "{}Meeting point:{} {}", p.gray, p.reset, meeting);
    }
    buffer
}

/// Minimal path view using `+`/`|`/`-` prefixes for first/middle/last steps.
pub fn format_basic(summary: &SolveSummary) -> String {
    let mut buffer = String::new();
    let len = summary.steps.len();
    if len == 0 {
        let _ = writeln!(buffer, "no path ({})", status_label(summary.status));
        return buffer;
    }
    for (i, step) in summary.steps.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        let _ = writeln!(buffer, "{prefix} {}", step.position);
    }
    let _ = writeln!(
        buffer,
        "via {} after exploring {} nodes",
        summary.algorithm, summary.statistics.nodes_explored
    );
    buffer
}

/// One benchmark table per maze, separated by blank lines.
pub fn format_suite(suite: &BenchmarkSuite) -> String {
    let mut buffer = String::new();
    for (index, maze) in suite.mazes.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(buffer);
        }
        let _ = writeln!(buffer, "Maze: {}", maze.name);
        buffer.push_str(&format_benchmark(&maze.report));
    }
    buffer
}

/// Tabular comparison of benchmark summaries plus the best performers.
pub fn format_benchmark(report: &BenchmarkReport) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Benchmark on {}x{} maze ({} runs per algorithm)",
        report.rows, report.cols, report.runs_per_algorithm
    );
    let _ = writeln!(
        buffer,
        "{:<14} {:>8} {:>12} {:>10} {:>10} {:>8} {:>10} {:>10}",
        "algorithm", "success", "mean ms", "std ms", "nodes", "path", "frontier", "state"
    );
    for summary in &report.algorithms {
        let _ = writeln!(
            buffer,
            "{:<14} {:>7.0}% {:>12} {:>10} {:>10} {:>8} {:>10} {:>10}",
            summary.algorithm.to_string(),
            summary.success_rate * 100.0,
            format_optional(summary.mean_elapsed_secs.map(|s| s * 1000.0), 3),
            format_optional(summary.std_elapsed_secs.map(|s| s * 1000.0), 3),
            format_optional(summary.mean_nodes_explored, 1),
            format_optional(summary.mean_path_length, 1),
            format_optional(summary.mean_max_frontier, 1),
            format_optional(summary.mean_state_size, 1),
        );
    }

    let comparisons = &report.comparisons;
    let _ = writeln!(buffer);
    for (title, best) in [
        ("Fastest", comparisons.fastest),
        ("Most efficient (fewest nodes)", comparisons.most_efficient),
        ("Shortest path", comparisons.shortest_path),
        ("Most reliable", comparisons.most_reliable),
    ] {
        let name = best.map_or_else(|| "-".to_string(), |algorithm| algorithm.to_string());
        let _ = writeln!(buffer, "{title}: {name}");
    }
    buffer
}

/// Strategy catalog as an aligned table.
pub fn format_catalog(catalog: &[AlgorithmInfo]) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{:<14} {:<22} {:<18} {:<8} {:<8}",
        "algorithm", "name", "complexity", "optimal", "complete"
    );
    for info in catalog {
        let _ = writeln!(
            buffer,
            "{:<14} {:<22} {:<18} {:<8} {:<8}",
            info.algorithm.to_string(),
            info.name,
            info.complexity,
            yes_no(info.optimal),
            yes_no(info.complete),
        );
        let _ = writeln!(buffer, "    {}", info.description);
    }
    buffer
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Apply palette colors to an ASCII maze drawing.
pub fn colorize_maze(drawing: &str, palette: &ColorPalette) -> String {
    let mut buffer = String::with_capacity(drawing.len());
    for ch in drawing.chars() {
        let color = match ch {
            '#' => palette.gray,
            'S' => palette.start,
            'G' => palette.goal,
            '*' => palette.path,
            _ => "",
        };
        if color.is_empty() {
            buffer.push(ch);
        } else {
            let _ = write!(buffer, "{color}{ch}{}", palette.reset);
        }
    }
    buffer
}

/// Render any serialisable value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn status_label(status: SearchPhase) -> &'static str {
    match status {
        SearchPhase::Succeeded => "succeeded",
        SearchPhase::Exhausted => "exhausted",
        SearchPhase::TimedOut => "timed out",
        SearchPhase::Initialized | SearchPhase::Running => "incomplete",
    }
}

fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazesolver_lib::{
        algorithm_catalog, parse_maze, render_maze, run_benchmark_suite, solve_maze,
        BenchmarkConfig, SolveAlgorithm, SolveRequest,
    };

    fn summary(text: &str, algorithm: SolveAlgorithm) -> SolveSummary {
        let grid = parse_maze(text).expect("maze");
        let outcome = solve_maze(&grid, &SolveRequest::new(algorithm)).expect("solve");
        SolveSummary::from_outcome(&grid, &outcome)
    }

    #[test]
    fn basic_format_marks_first_middle_last() {
        let rendered = format_basic(&summary("2 0 3\n0 0 0\n0 0 0", SolveAlgorithm::Bfs));
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "+ (0, 0)");
        assert_eq!(lines[1], "| (0, 1)");
        assert_eq!(lines[2], "- (0, 2)");
        assert!(lines[3].starts_with("via bfs"));
    }

    #[test]
    fn basic_format_reports_missing_path() {
        let rendered = format_basic(&summary("2 1 0\n1 1 0\n0 0 3", SolveAlgorithm::Dfs));
        assert_eq!(rendered, "no path (exhausted)\n");
    }

    #[test]
    fn text_format_without_colors_is_plain() {
        let rendered = format_text(
            &summary("2 0 0\n1 1 0\n0 0 3", SolveAlgorithm::AStar),
            &ColorPalette::plain(),
        );
        assert!(rendered.starts_with("Path from (0, 0) to (2, 2) (4 moves; algorithm: astar):"));
        assert!(rendered.contains(" - (1, 2)"));
        assert!(rendered.contains("Nodes explored: "));
        assert!(!rendered.contains('\x1b'));
    }

    #[test]
    fn suite_format_prints_one_table_per_maze() {
        let mazes = vec![
            ("first.txt".to_string(), parse_maze("2 0 0\n0 0 0\n0 0 3").expect("maze")),
            ("second.txt".to_string(), parse_maze("2 0 3\n0 0 0\n0 0 0").expect("maze")),
        ];
        let config = BenchmarkConfig {
            algorithms: vec![SolveAlgorithm::Bfs],
            runs: 1,
            timeout: None,
        };
        let suite = run_benchmark_suite(&mazes, &config).expect("suite");
        let rendered = format_suite(&suite);
        let first = rendered.find("Maze: first.txt").expect("first header");
        let second = rendered.find("Maze: second.txt").expect("second header");
        assert!(first < second);
        assert_eq!(rendered.matches("Shortest path: bfs").count(), 2);
        assert!(rendered.contains("state"));
    }

    #[test]
    fn catalog_table_flags_non_optimal_strategies() {
        let rendered = format_catalog(&algorithm_catalog());
        let dfs = rendered
            .lines()
            .find(|line| line.starts_with("dfs "))
            .expect("dfs row");
        assert!(dfs.contains("Depth-First Search"));
        assert!(dfs.contains(" no "));
        let bfs = rendered
            .lines()
            .find(|line| line.starts_with("bfs "))
            .expect("bfs row");
        assert!(bfs.contains("yes"));
    }

    #[test]
    fn colorize_wraps_only_marked_cells() {
        let grid = parse_maze("2 0 3\n1 1 0\n0 0 0").expect("maze");
        let drawing = render_maze(&grid, None);
        assert_eq!(colorize_maze(&drawing, &ColorPalette::plain()), drawing);

        let colored = colorize_maze(&drawing, &ColorPalette::colored());
        assert!(colored.contains("\x1b[1;32mS\x1b[0m"));
        assert!(colored.contains(".."));
    }
}

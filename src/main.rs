// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use party_leaders::{check, parse_date, render_svg, run, ChartSpec, PartyLeader, DEFAULT_INPUT};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scatter chart of Swedish party leaders", long_about = None)]
struct Cli {
    /// Party leader table (CSV with header row)
    #[arg(env = "PARTY_LEADERS_CSV", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Date used for missing assumed-office, left-office and death dates (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,

    /// Write the chart as SVG to this path instead of opening the terminal UI
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Print the prepared records as JSON instead of opening the terminal UI
    #[arg(long, conflicts_with = "svg")]
    json: bool,
}

fn parse_as_of(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value, "as_of").map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let now = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    let leaders = run(&cli.input, now)
        .with_context(|| format!("Failed to prepare party leaders from {}", cli.input.display()))?;
    check(&leaders, now);

    if let Some(path) = &cli.svg {
        run_export_svg(&leaders, path)
    } else if cli.json {
        run_print_json(&leaders)
    } else {
        run_ui_mode(leaders)
    }
}

fn run_export_svg(leaders: &[PartyLeader], path: &Path) -> Result<()> {
    let spec = ChartSpec::from_leaders(leaders);
    std::fs::write(path, render_svg(&spec))
        .with_context(|| format!("Failed to write SVG to {}", path.display()))?;

    println!("✓ Wrote {} leaders to {}", spec.point_count(), path.display());
    Ok(())
}

fn run_print_json(leaders: &[PartyLeader]) -> Result<()> {
    let json = serde_json::to_string_pretty(leaders).context("Failed to serialize leaders")?;
    println!("{}", json);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(leaders: Vec<PartyLeader>) -> Result<()> {
    println!("📊 Loaded {} party leaders", leaders.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(leaders);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_leaders: Vec<PartyLeader>) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or export the chart: party-leaders --svg chart.svg");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_as_of_parses_and_documents_defaults() {
        let cli = Cli::try_parse_from(["party-leaders", "leaders.csv", "--as-of", "2020-05-01"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("leaders.csv"));
        assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2020, 5, 1));

        assert!(Cli::try_parse_from(["party-leaders", "leaders.csv", "--as-of", "2020/05/01"]).is_err());

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("assumed-office"));
        assert!(help.contains("left-office"));
    }

    #[test]
    fn test_svg_and_json_conflict() {
        assert!(Cli::try_parse_from(["party-leaders", "leaders.csv", "--svg", "out.svg", "--json"]).is_err());
    }
}

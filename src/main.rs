//! lumina-csv CLI - load a CSV file and query it

use clap::Parser;
use lumina_csv::{
    AnalysisContext, BuildReport, ChartSet, ColumnStats, Page, Query, SortSpec, Table,
    TableReader, profile_columns, run_query,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

/// Load CSV files into a typed table and inspect them.
///
/// Prints one page of rows, optionally filtered and sorted, along with
/// column statistics, default chart aggregations and the text projection
/// used for natural-language analysis.
#[derive(Parser, Debug)]
#[command(name = "lumina-csv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file(s)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Keep only rows where some cell contains this text (case-insensitive)
    #[arg(short = 's', long)]
    search: Option<String>,

    /// Sort by this column
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// 1-based page to print
    #[arg(short = 'p', long, default_value = "1")]
    page: usize,

    /// Rows per page
    #[arg(long, default_value_t = lumina_csv::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Stop after this many data rows (0 = unlimited)
    #[arg(long, default_value = "0")]
    max_rows: usize,

    /// Output format: text (default), json, or csv
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Show column statistics
    #[arg(long)]
    stats: bool,

    /// Show default chart aggregations
    #[arg(long)]
    charts: bool,

    /// Show the text projection handed to an analysis service
    #[arg(long)]
    context: bool,

    /// Show lines dropped for a field count mismatch
    #[arg(long)]
    report: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Everything computed for one file.
#[derive(Debug, Serialize)]
struct FileOutput<'a> {
    file: String,
    headers: &'a [String],
    page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<Vec<ColumnStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    charts: Option<ChartSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<AnalysisContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<BuildReport>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args);

    let mut exit_code = ExitCode::SUCCESS;

    for file in &args.files {
        if let Err(e) = process_file(file, &args) {
            eprintln!("Error processing {}: {}", file.display(), e);
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

/// Set up structured logging on stderr. `RUST_LOG` overrides the flags.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lumina_csv={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn build_query(args: &Args) -> Query {
    let mut query = Query::new();
    query.page(args.page).page_size(args.page_size);
    if let Some(ref term) = args.search {
        query.search(term.as_str());
    }
    if let Some(ref key) = args.sort {
        let spec = if args.desc {
            SortSpec::desc(key.as_str())
        } else {
            SortSpec::asc(key.as_str())
        };
        query.sort(spec);
    }
    query
}

fn process_file(path: &Path, args: &Args) -> lumina_csv::Result<()> {
    let data = std::fs::read(path)?;

    let mut reader = TableReader::new();
    reader.max_rows(args.max_rows);
    let (table, report) = reader.read_bytes_with_report(&data);
    debug!(
        file = %path.display(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded"
    );

    let page = run_query(&table, &build_query(args))?;
    let stats = (args.stats || args.charts).then(|| profile_columns(&table));
    let charts = if args.charts {
        stats.as_deref().map(|s| ChartSet::build(&table, s))
    } else {
        None
    };

    let output = FileOutput {
        file: path.display().to_string(),
        headers: table.headers(),
        page,
        stats: if args.stats { stats } else { None },
        charts,
        context: args.context.then(|| AnalysisContext::from_table(&table)),
        report: args.report.then_some(report),
    };

    match args.format {
        OutputFormat::Text => print_text_output(&table, &output),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Csv => print_csv_output(&output)?,
    }

    Ok(())
}

fn print_text_output(table: &Table, output: &FileOutput<'_>) {
    let page = &output.page;

    println!("File: {}", output.file);
    println!("  Columns: {}", output.headers.join(", "));
    println!("  Rows: {}", table.num_rows());
    println!(
        "  Showing {} to {} of {} rows (page {} of {})",
        page.first_row,
        page.last_row,
        page.total_matched,
        page.page_index,
        page.total_pages.max(1)
    );

    if page.is_empty() {
        println!("  No matching records found.");
    }
    for (offset, row) in page.rows.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("  {:>6}  {}", page.first_row + offset, cells.join(" | "));
    }

    if let Some(ref stats) = output.stats {
        println!("  Column stats:");
        for s in stats {
            match (s.min, s.max) {
                (Some(min), Some(max)) => println!(
                    "    {}: {} ({} unique, min {}, max {})",
                    s.field, s.column_type, s.unique_count, min, max
                ),
                _ => println!(
                    "    {}: {} ({} unique)",
                    s.field, s.column_type, s.unique_count
                ),
            }
        }
    }

    if let Some(ref charts) = output.charts {
        print_charts(charts);
    }

    if let Some(ref context) = output.context {
        println!("  Analysis context:");
        for line in context.to_string().lines() {
            println!("    {line}");
        }
    }

    if let Some(ref report) = output.report {
        println!(
            "  Rows accepted: {} of {} ({} dropped)",
            report.accepted_rows,
            report.total_lines,
            report.rejected_count()
        );
        for rejected in &report.rejected {
            println!(
                "    line {}: expected {} fields, found {}",
                rejected.line, rejected.expected, rejected.found
            );
        }
    }

    println!();
}

fn print_charts(charts: &ChartSet) {
    if charts.is_empty() {
        println!("  Not enough numeric or categorical data to build charts.");
        return;
    }

    let cat = charts.columns.categorical.as_ref().map(|c| c.name.as_str());
    let num = charts.columns.numeric.as_ref().map(|c| c.name.as_str());

    if let (Some(totals), Some(cat), Some(num)) = (&charts.totals, cat, num) {
        println!("  Total {num} by {cat}:");
        for entry in totals {
            println!("    {}: {}", entry.label, entry.value);
        }
    }
    if let (Some(trend), Some(num)) = (&charts.trend, num) {
        let values: Vec<String> = trend.iter().map(|p| p.value.to_string()).collect();
        println!("  {num} trend (first {} rows): {}", trend.len(), values.join(", "));
    }
    if let (Some(composition), Some(cat)) = (&charts.composition, cat) {
        println!("  {cat} distribution:");
        for entry in composition {
            println!("    {}: {}", entry.label, entry.value);
        }
    }
}

fn print_csv_output(output: &FileOutput<'_>) -> lumina_csv::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(output.headers)?;
    for row in &output.page.rows {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

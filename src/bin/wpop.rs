use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::{Locale, ToFormattedString};
use std::path::PathBuf;
use wpop_rs::series::DEFAULT_YEARS;
use wpop_rs::stats::{StatsPanel, summarize};
use wpop_rs::{CountryIndex, DatasetCache, Resolution, Resolver, SourceConfig, Year};
use wpop_rs::{bounds, series, storage};

#[derive(Parser, Debug)]
#[command(
    name = "wpop",
    version,
    about = "Look up a country's population history and boundary extent"
)]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// JSON file with `stats` and/or `geometry` source locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Statistics CSV (URL or path). Overrides $WPOP_STATS_SOURCE and --config.
    #[arg(long, global = true)]
    stats_source: Option<String>,
    /// Boundary GeoJSON (URL or path). Overrides $WPOP_GEO_SOURCE and --config.
    #[arg(long, global = true)]
    geo_source: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the country names that can be looked up.
    Countries,
    /// Show statistics, a population series and the map extent for one country.
    Show(ShowArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Country name exactly as listed by `wpop countries`.
    #[arg(short, long)]
    country: String,
    /// Years separated by comma or semicolon, in display order (e.g., 2020,1990).
    /// Defaults to 2022,2020,2015. Pass an empty string for none.
    #[arg(short, long)]
    years: Option<String>,
    /// Print the bounding box of the country's boundary.
    #[arg(long, default_value_t = false)]
    bounds: bool,
    /// Print min/max/mean/median over the selected years.
    #[arg(long, default_value_t = false)]
    summary: bool,
    /// Save the series to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn fmt_num(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        (v as i64).to_formatted_string(&Locale::en)
    } else if v.is_finite() {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        "NA".to_string()
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(fmt_num).unwrap_or_else(|| "NA".to_string())
}

fn parse_years(s: &str) -> Result<Vec<Year>> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(|x| x.parse::<Year>().map_err(anyhow::Error::from))
        .collect()
}

fn source_config(args: &SourceArgs) -> Result<SourceConfig> {
    let base = match &args.config {
        Some(path) => SourceConfig::from_json_file(path)?,
        None => SourceConfig::default(),
    };
    Ok(base
        .with_env()
        .with_overrides(args.stats_source.clone(), args.geo_source.clone()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cache = DatasetCache::new(source_config(&cli.sources)?);
    match cli.cmd {
        Command::Countries => cmd_countries(&cache),
        Command::Show(args) => cmd_show(&cache, args),
    }
}

fn cmd_countries(cache: &DatasetCache) -> Result<()> {
    let data = cache.load().context("could not load datasets")?;
    let index = CountryIndex::build(&data.stats, &data.geometries);
    for name in index.names() {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_show(cache: &DatasetCache, args: ShowArgs) -> Result<()> {
    let years = match &args.years {
        Some(s) => parse_years(s).context("invalid --years")?,
        None => DEFAULT_YEARS.to_vec(),
    };

    let data = cache.load().context("could not load datasets")?;
    let index = CountryIndex::build(&data.stats, &data.geometries);
    let profile = match Resolver::new(&index).resolve(&args.country) {
        Resolution::Found(p) => p,
        Resolution::NotFound => {
            anyhow::bail!(
                "{:?} is not in the statistics data; please select a valid country (see `wpop countries`)",
                args.country
            )
        }
    };

    println!("{}", profile.name());
    println!();
    println!("Population over selected years");
    let points = series::extract(&profile, &years);
    if points.is_empty() {
        println!("  (no years selected)");
    }
    for p in &points {
        println!("  {}  {}", p.year, fmt_num(p.population));
    }

    if args.summary {
        let s = summarize(&points);
        println!(
            "  count={}  min={} max={} mean={} median={}",
            s.count,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }

    println!();
    println!("Country statistics");
    for (label, value, unit) in StatsPanel::from(profile.stats()).rows() {
        let sep = if unit == "%" { "" } else { " " };
        println!("  {}: {}{}{}", label, fmt_num(value), sep, unit);
    }

    match profile.geometry() {
        Some(geo) if args.bounds => {
            let b = bounds(&geo.geometry);
            println!();
            println!("Map extent");
            println!(
                "  min_x={} min_y={} max_x={} max_y={}",
                b.min_x, b.min_y, b.max_x, b.max_y
            );
        }
        Some(_) => {}
        None => eprintln!("Selected country could not be found in geographical data."),
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_series_csv(&points, path)?,
            "json" => storage::save_series_json(&points, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", points.len(), path.display());
    }

    Ok(())
}

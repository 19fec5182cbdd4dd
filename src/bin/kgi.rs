use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use kaggle_insights::dashboard::{Dashboard, DashboardView};
use kaggle_insights::registry::CountryCatalog;
use kaggle_insights::region::CatalogResolver;
use kaggle_insights::{DashboardConfig, Dataset, LongTable, Region, RegionFilter};
use kaggle_insights::{storage, viz};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "kgi",
    version,
    about = "Explore Kaggle usage by country: region filters, rankings, exports & charts"
)]
struct Cli {
    /// TOML config file (data dir, file names, top-K limits, flag URL template).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the input CSV files (overrides the config).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print top users, the most medal-efficient country, cards, keywords and tools.
    Summary(FilterArgs),
    /// List the available regions and the medal-efficiency bounds.
    Regions,
    /// Write the filtered table (and optionally the whole view) to files.
    Export(ExportArgs),
    /// Render the dashboard charts as SVG files.
    Plot(PlotArgs),
    /// Print the flag image URL for a country name.
    Flag {
        /// Country name or ISO code.
        country: String,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Regions separated by comma or semicolon (e.g., "Asia,North America"). Default: all.
    #[arg(long)]
    regions: Option<String>,
    /// Lower medal-efficiency bound (inclusive). Default: table minimum.
    #[arg(long)]
    min_eff: Option<f64>,
    /// Upper medal-efficiency bound (inclusive). Default: table maximum.
    #[arg(long)]
    max_eff: Option<f64>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    filter: FilterArgs,
    /// Spreadsheet-compatible CSV of the filtered table.
    #[arg(long)]
    csv: Option<PathBuf>,
    /// JSON array of the filtered rows.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Plain-text table dump of the filtered rows.
    #[arg(long)]
    txt: Option<PathBuf>,
    /// JSON of the complete dashboard view.
    #[arg(long)]
    view: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    filter: FilterArgs,
    /// Output directory for the SVG files.
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,
    /// Width of each chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of each chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.cmd {
        Command::Flag { country } => cmd_flag(&config, &country),
        Command::Regions => cmd_regions(open(config)?),
        Command::Summary(args) => cmd_summary(open(config)?, &args),
        Command::Export(args) => cmd_export(open(config)?, &args),
        Command::Plot(args) => cmd_plot(open(config)?, &args),
    }
}

fn open(config: DashboardConfig) -> Result<Dashboard<&'static CountryCatalog>> {
    let data = Dataset::load(&config)
        .with_context(|| format!("loading data from {}", config.data_dir.display()))?;
    Ok(Dashboard::new(config, data, CountryCatalog::global()))
}

fn build_filter(
    dash: &mut Dashboard<&'static CountryCatalog>,
    args: &FilterArgs,
) -> Result<RegionFilter> {
    let mut filter = dash.default_filter();
    if let Some(list) = &args.regions {
        filter.regions = parse_list(list)
            .iter()
            .map(|s| s.parse::<Region>().map_err(|e| anyhow!(e)))
            .collect::<Result<_>>()?;
    }
    if let Some(lo) = args.min_eff {
        filter.range.0 = lo;
    }
    if let Some(hi) = args.max_eff {
        filter.range.1 = hi;
    }
    if filter.range.0 > filter.range.1 {
        warn!(
            "--min-eff {} is above --max-eff {}; nothing can match",
            filter.range.0, filter.range.1
        );
    }
    Ok(filter)
}

fn cmd_flag(config: &DashboardConfig, country: &str) -> Result<()> {
    let resolver = CatalogResolver::default().with_flag_template(config.flag_url_template.clone());
    match resolver.flag_url(country) {
        Some(url) => println!("{url}"),
        None => println!("no flag for '{country}'"),
    }
    Ok(())
}

fn cmd_regions(mut dash: Dashboard<&'static CountryCatalog>) -> Result<()> {
    let filter = dash.default_filter();
    for r in &filter.regions {
        println!("{r}");
    }
    println!(
        "MedalEfficiency range: {:.2} .. {:.2}",
        filter.range.0, filter.range.1
    );
    Ok(())
}

fn print_long_table(title: &str, table: &LongTable) {
    println!("\n{title}");
    if table.is_empty() {
        println!("  (no data)");
        return;
    }
    println!(
        "  {:<24} {:<24} {:>10}",
        table.entity_label, "Country", table.value_label
    );
    for r in &table.rows {
        println!("  {:<24} {:<24} {:>10}", r.entity, r.country, r.value);
    }
}

fn print_view(view: &DashboardView, top_users: usize) {
    println!("Top {top_users} Countries by Kaggle Users");
    for (i, c) in view.top_users.iter().enumerate() {
        println!("  {:>2}. {:<32} {:>8}", i + 1, c.country, c.users);
    }

    println!("\nMost Medal-Efficient Country (Filtered)");
    match &view.most_efficient {
        Some(top) => println!(
            "  {} ({}) is the most medal-efficient country with a score of {:.2}",
            top.country, top.region, top.medal_efficiency
        ),
        None => println!("  No countries match the selected filters."),
    }

    println!("\nCountry Medal Efficiency Cards (Filtered Top {})", view.cards.len());
    for card in &view.cards {
        println!(
            "  {:<32} {:>8.2}  {:<14} {}",
            card.country,
            card.medal_efficiency,
            card.region,
            card.flag_url.as_deref().unwrap_or("-")
        );
    }

    print_long_table("Top Modeling Keywords in Top Countries", &view.keywords);
    print_long_table("Popular Tools in Top Countries", &view.tools);
}

fn cmd_summary(mut dash: Dashboard<&'static CountryCatalog>, args: &FilterArgs) -> Result<()> {
    let filter = build_filter(&mut dash, args)?;
    let view = dash.view(&filter);
    print_view(&view, dash.config().top_users);
    Ok(())
}

fn cmd_export(mut dash: Dashboard<&'static CountryCatalog>, args: &ExportArgs) -> Result<()> {
    if args.csv.is_none() && args.json.is_none() && args.txt.is_none() && args.view.is_none() {
        bail!("nothing to export: pass at least one of --csv, --json, --txt, --view");
    }
    let filter = build_filter(&mut dash, &args.filter)?;
    let view = dash.view(&filter);
    let rows = &view.filtered;

    if let Some(path) = &args.csv {
        storage::save_csv(rows, path).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }
    if let Some(path) = &args.json {
        storage::save_json(rows, path).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }
    if let Some(path) = &args.txt {
        storage::save_text(rows, path).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }
    if let Some(path) = &args.view {
        storage::save_json(&view, path).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Saved dashboard view to {}", path.display());
    }
    Ok(())
}

fn plot_one(
    name: &str,
    out_dir: &Path,
    has_data: bool,
    draw: impl FnOnce(&Path) -> Result<()>,
) -> Result<()> {
    if !has_data {
        warn!("skipping {}: no data", name);
        return Ok(());
    }
    let path = out_dir.join(name);
    draw(&path).with_context(|| format!("rendering {}", path.display()))?;
    info!("wrote {}", path.display());
    eprintln!("Wrote plot to {}", path.display());
    Ok(())
}

fn cmd_plot(mut dash: Dashboard<&'static CountryCatalog>, args: &PlotArgs) -> Result<()> {
    let filter = build_filter(&mut dash, &args.filter)?;
    let view = dash.view(&filter);
    let locale = dash.config().locale.clone();
    let (w, h) = (args.width, args.height);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    plot_one("top_users.svg", &args.out_dir, !view.top_users.is_empty(), |p| {
        viz::plot_country_counts(&view.top_users, p, w, h, &locale)
    })?;
    let has_trends = view.token_trends.iter().any(|s| !s.points.is_empty());
    plot_one("token_trends.svg", &args.out_dir, has_trends, |p| {
        viz::plot_token_trends(&view.token_trends, p, w, h)
    })?;
    plot_one("keywords.svg", &args.out_dir, !view.keywords.is_empty(), |p| {
        viz::plot_long_table(
            &view.keywords,
            "Top Modeling Keywords by Frequency",
            p,
            w,
            h,
            &locale,
        )
    })?;
    plot_one("tools.svg", &args.out_dir, !view.tools.is_empty(), |p| {
        viz::plot_long_table(&view.tools, "Top Tool Usage", p, w, h, &locale)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_splits_and_trims() {
        assert_eq!(
            parse_list("Asia, North America ;Europe,,"),
            vec!["Asia", "North America", "Europe"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn empty_chart_is_skipped_without_drawing() {
        let dir = std::env::temp_dir();
        let mut called = false;
        plot_one("empty.svg", &dir, false, |_| {
            called = true;
            Ok(())
        })
        .unwrap();
        assert!(!called);
    }

    #[test]
    fn render_errors_are_not_swallowed() {
        let dir = std::env::temp_dir();
        let err = plot_one("broken.svg", &dir, true, |_| bail!("no data to plot")).unwrap_err();
        assert!(err.to_string().starts_with("rendering"));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

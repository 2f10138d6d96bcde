// Trade Insights - Main executable
// Author: Gabriel Demetrios Lafis

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::{error, info};

use trade_insights::{
    data::{load, CategoricalField, Dataset, Direction, Field, NumericField},
    processing::{
        crosstab, describe, extremes, group_aggregate, headline, rank_desc, summary_header,
        top_n, unique, Aggregation, Extreme, FilterSpec, FilteredView, ALL,
    },
    storage::export,
    utils::{init_logging, validate_range, Config},
};

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Load configuration
    let mut config = if let Some(config_path) = matches.value_of("config") {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config file: {}", err);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Override config with command line arguments
    if let Some(path) = matches.value_of("data") {
        config.dataset.path = path.to_string();
    }
    if let Some(seed) = matches.value_of("seed") {
        config.dataset.seed = seed.parse().context("--seed must be an unsigned integer")?;
    }
    if let Some(size) = matches.value_of("sample-size") {
        config.dataset.sample_size = size.parse().context("--sample-size must be a positive integer")?;
    }
    config.validate()?;

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter(), config.logging.file.as_deref()) {
        eprintln!("Error initializing logger: {}", err);
    }

    let dataset = load(&config.dataset.path, config.dataset.sample_size, config.dataset.seed)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset.path))?;
    info!("Dataset ready with {} records", dataset.len());

    // Handle subcommands
    match matches.subcommand() {
        Some(("preview", sub)) => preview(&dataset, sub),
        Some(("analysis", sub)) => analysis(&dataset, sub),
        Some(("extremes", _)) => {
            print_extremes(&dataset);
            Ok(())
        }
        Some(("top", sub)) => top(&dataset, sub),
        Some(("options", sub)) => options(&dataset, sub),
        Some(("export", sub)) => export_view(&dataset, sub, &config),
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
            Ok(())
        }
    }
}

fn cli() -> Command<'static> {
    Command::new("Trade Insights")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Filter and summarize an imports/exports trade dataset")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file (yaml or json)")
                .takes_value(true),
        )
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .value_name("FILE")
                .help("Sets the CSV dataset to load")
                .takes_value(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Sets the sampling seed")
                .takes_value(true),
        )
        .arg(
            Arg::new("sample-size")
                .long("sample-size")
                .value_name("N")
                .help("Sets the number of records to sample")
                .takes_value(true),
        )
        .subcommand(
            Command::new("preview")
                .about("Show filtered rows and summary statistics")
                .args(filter_args())
                .arg(
                    Arg::new("rows")
                        .long("rows")
                        .value_name("N")
                        .help("Number of rows to print")
                        .takes_value(true),
                ),
        )
        .subcommand(
            Command::new("analysis")
                .about("Show headline metrics and live aggregates")
                .args(filter_args()),
        )
        .subcommand(Command::new("extremes").about("Show minimum and maximum of each categorical field"))
        .subcommand(
            Command::new("top")
                .about("Show the most frequent values of a field")
                .arg(
                    Arg::new("field")
                        .long("field")
                        .value_name("FIELD")
                        .help("Categorical field, e.g. Product")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::new("n")
                        .short('n')
                        .long("n")
                        .value_name("N")
                        .help("Number of values to show")
                        .takes_value(true),
                ),
        )
        .subcommand(
            Command::new("options")
                .about("List the distinct values of a field, as offered for selection")
                .arg(
                    Arg::new("field")
                        .long("field")
                        .value_name("FIELD")
                        .help("Categorical field, e.g. Country")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Save the filtered data as CSV")
                .args(filter_args())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Destination file")
                        .takes_value(true),
                ),
        )
}

fn filter_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new("country")
            .long("country")
            .value_name("COUNTRY")
            .help("Country to include; repeat for several")
            .takes_value(true)
            .multiple_occurrences(true),
        Arg::new("product")
            .long("product")
            .value_name("PRODUCT")
            .help("Product to match, or All")
            .takes_value(true),
        Arg::new("category")
            .long("category")
            .value_name("CATEGORY")
            .help("Category to match, or All")
            .takes_value(true),
        Arg::new("direction")
            .long("direction")
            .value_name("DIRECTION")
            .help("Import, Export or All")
            .takes_value(true),
    ]
}

/// Build a filter from the shared filter arguments
fn filter_spec(matches: &ArgMatches) -> Result<FilterSpec> {
    let mut spec = FilterSpec::new();

    if let Some(countries) = matches.values_of("country") {
        for country in countries {
            spec = spec.country(country);
        }
    }
    if let Some(product) = matches.value_of("product") {
        spec = spec.product(product);
    }
    if let Some(category) = matches.value_of("category") {
        spec = spec.category(category);
    }
    if let Some(direction) = matches.value_of("direction") {
        if direction != ALL {
            let direction = direction.parse::<Direction>().map_err(anyhow::Error::msg)?;
            spec = spec.direction(Some(direction));
        }
    }

    Ok(spec)
}

fn parse_count(matches: &ArgMatches, name: &str, default: usize) -> Result<usize> {
    let value = match matches.value_of(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("--{} must be a positive integer", name))?,
        None => default,
    };
    validate_range(value, 1, 10_000, name).map_err(anyhow::Error::msg)?;
    Ok(value)
}

fn preview(dataset: &Dataset, matches: &ArgMatches) -> Result<()> {
    let spec = filter_spec(matches)?;
    let rows = parse_count(matches, "rows", 10)?;
    let view = spec.apply(dataset);

    if spec.is_empty() {
        println!("Sampled Data of {} Records", view.len());
    } else {
        println!("Filtered Data ({} of {} records)", view.len(), dataset.len());
    }

    println!(
        "{:<28}{:<14}{:<8}{:>10}{:>12}{:<14}{:>10}  {}",
        "Country", "Product", "Dir", "Quantity", "Value", "  Category", "Weight", "Shipping"
    );
    for record in view.iter().take(rows) {
        println!(
            "{:<28}{:<14}{:<8}{:>10}{:>12.2}  {:<12}{:>10.2}  {}",
            record.country,
            record.product,
            record.direction,
            record.quantity,
            record.value,
            record.category,
            record.weight,
            record.shipping_method.as_str()
        );
    }

    println!();
    print_summary(&view);
    Ok(())
}

fn print_summary(view: &FilteredView) {
    println!("Summary Statistics");
    println!("{}", summary_header());
    for stats in describe(view, &NumericField::ALL) {
        println!("{}", stats);
    }
}

fn analysis(dataset: &Dataset, matches: &ArgMatches) -> Result<()> {
    // Headline cards always describe the whole sample
    let metrics = headline(&dataset.view());
    println!("Total Records:              {}", metrics.total_records);
    println!("Unique Products:            {}", metrics.unique_products);
    println!("Unique Countries:           {}", metrics.unique_countries);
    println!(
        "Most Used Shipping Method:  {}",
        metrics.top_shipping_method.as_deref().unwrap_or("-")
    );
    println!("Top Product:                {}", metrics.top_product.as_deref().unwrap_or("-"));

    let spec = filter_spec(matches)?;
    let view = spec.apply(dataset);
    let label = match spec.direction {
        Some(direction) => direction.to_string(),
        None => "Total".to_string(),
    };

    println!();
    println!("Top 5 Countries by {} Volume", label);
    for (country, count) in top_n(&view, CategoricalField::Country, 5) {
        println!("  {:<32}{:>6}", country, count);
    }

    println!();
    println!("Category Ranking by Total Economic Impact");
    let impact = group_aggregate(&view, CategoricalField::Category, NumericField::Value, Aggregation::Sum);
    for (rank, (category, total)) in rank_desc(impact).into_iter().enumerate() {
        println!("  {}. {:<20}{:>16.2}", rank + 1, category, total);
    }

    println!();
    println!("Count of Products by Payment Terms per Category");
    let table = crosstab(&view, CategoricalField::Category, CategoricalField::PaymentTerms);
    print!("  {:<14}", "");
    for column in &table.columns {
        print!("{:>18}", column);
    }
    println!();
    for (row, counts) in table.rows.iter().zip(&table.counts) {
        print!("  {:<14}", row);
        for count in counts {
            print!("{:>18}", count);
        }
        println!();
    }

    Ok(())
}

fn print_extremes(dataset: &Dataset) {
    let fields: Vec<Field> = CategoricalField::ALL.iter().map(|&f| f.into()).collect();

    println!("{:<18}{:<32}{}", "Field", "Minimum Value", "Maximum Value");
    for (field, extreme) in extremes(&dataset.view(), &fields) {
        match extreme {
            Some(Extreme::Text { min, max }) => {
                println!("{:<18}{:<32}{}", field, min, max)
            }
            Some(Extreme::Numeric { min, max }) => {
                println!("{:<18}{:<32}{}", field, min, max)
            }
            None => println!("{:<18}{:<32}{}", field, "-", "-"),
        }
    }
}

fn top(dataset: &Dataset, matches: &ArgMatches) -> Result<()> {
    let field: CategoricalField = matches
        .value_of("field")
        .unwrap_or("Product")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let n = parse_count(matches, "n", 5)?;

    for (value, count) in top_n(&dataset.view(), field, n) {
        println!("{:<32}{:>6}", value, count);
    }
    Ok(())
}

fn options(dataset: &Dataset, matches: &ArgMatches) -> Result<()> {
    let field: CategoricalField = matches
        .value_of("field")
        .unwrap_or("Country")
        .parse()
        .map_err(anyhow::Error::msg)?;

    println!("{}", ALL);
    for value in unique(&dataset.view(), field) {
        println!("{}", value);
    }
    Ok(())
}

fn export_view(dataset: &Dataset, matches: &ArgMatches, config: &Config) -> Result<()> {
    let spec = filter_spec(matches)?;
    let destination = matches.value_of("output").unwrap_or(&config.export.path);
    let view = spec.apply(dataset);

    match export(&view, destination) {
        Ok(receipt) => {
            println!("{}", receipt);
            Ok(())
        }
        Err(err) => {
            error!("Export failed: {}", err);
            Err(err).context("Filtered data was not saved")
        }
    }
}

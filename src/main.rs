use anyhow::{anyhow, Context, Result};
use clap::{crate_version, App, Arg, ArgMatches};
use log::*;
use messageformat_bench::config::Config;
use messageformat_bench::harness::{
    render_table, run_fork, BlackHole, FixedParameter, ForkLauncher, ParameterProvider, Runner,
};
use messageformat_bench::logger::StderrLogger;
use messageformat_bench::{AppResult, ArgumentSource, Catalog, PatternId, Strategy, Variant};
use std::str::FromStr;
use std::sync::Arc;

fn cli<'a, 'b>(pattern_names: &'b [&'b str], strategy_names: &'b [&'b str]) -> App<'a, 'b> {
    App::new("messageformat-bench")
        .version(crate_version!())
        .about("Measures the latency of message formatting strategies")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("Configuration file (default: ~/.config/messageformat-bench/config.yml)"),
        )
        .arg(
            Arg::with_name("pattern")
                .short("p")
                .long("pattern")
                .value_name("PATTERN")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .possible_values(pattern_names)
                .help("Pattern to benchmark, repeatable (default: all)"),
        )
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .value_name("STRATEGY")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .possible_values(strategy_names)
                .help("Strategy to benchmark, repeatable (default: all)"),
        )
        .arg(
            Arg::with_name("warmup")
                .long("warmup")
                .value_name("N")
                .takes_value(true)
                .help("Warmup iterations per fork"),
        )
        .arg(
            Arg::with_name("iterations")
                .long("iterations")
                .value_name("N")
                .takes_value(true)
                .help("Measured iterations per fork"),
        )
        .arg(
            Arg::with_name("forks")
                .long("forks")
                .value_name("N")
                .takes_value(true)
                .help("Worker processes per benchmark, 0 to measure in process"),
        )
        .arg(
            Arg::with_name("time-ms")
                .long("time-ms")
                .value_name("MILLIS")
                .takes_value(true)
                .help("Duration of every iteration in milliseconds"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .takes_value(true)
                .help("Seed for generated arguments"),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .help("List patterns with their variants and strategies, then exit"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .takes_value(true)
                .help("Log level: off, error, warn, info, debug or trace"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increase log verbosity"),
        )
        .arg(
            Arg::with_name("fork-worker")
                .long("fork-worker")
                .value_name("FORK")
                .takes_value(true)
                .hidden(true),
        )
}

fn parse_value<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse::<T>()
                .with_context(|| format!("Invalid value '{}' for --{}", value, name))
        })
        .transpose()
}

/// Apply command line flags on top of the loaded configuration.
///
fn apply_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    if let Some(value) = parse_value(matches, "warmup")? {
        config.warmup_iterations = value;
    }
    if let Some(value) = parse_value(matches, "iterations")? {
        config.measurement_iterations = value;
    }
    if let Some(value) = parse_value(matches, "forks")? {
        config.forks = value;
    }
    if let Some(value) = parse_value(matches, "time-ms")? {
        config.iteration_time_ms = value;
    }
    if let Some(value) = parse_value(matches, "seed")? {
        config.seed = Some(value);
    }
    if let Some(values) = matches.values_of("pattern") {
        config.patterns = values.map(str::to_string).collect();
    }
    if let Some(values) = matches.values_of("strategy") {
        config.strategies = values.map(str::to_string).collect();
    }
    if let Some(level) = matches.value_of("log-level") {
        config.log_level = level.to_string();
    }
    match matches.occurrences_of("verbose") {
        0 => {}
        1 => config.log_level = "debug".to_string(),
        _ => config.log_level = "trace".to_string(),
    }
    Ok(())
}

fn selected_patterns(config: &Config, catalog: &Catalog) -> AppResult<Vec<PatternId>> {
    if config.patterns.is_empty() {
        return Ok(PatternId::ALL.to_vec());
    }
    config
        .patterns
        .iter()
        .map(|name| -> AppResult<PatternId> { Ok(catalog.get(name)?.id()) })
        .collect()
}

fn selected_strategies(config: &Config) -> AppResult<Vec<Strategy>> {
    if config.strategies.is_empty() {
        return Ok(Strategy::ALL.to_vec());
    }
    config
        .strategies
        .iter()
        .map(|name| -> AppResult<Strategy> { Ok(name.parse::<Strategy>()?) })
        .collect()
}

fn list(catalog: &Catalog) {
    for pattern in catalog.iter() {
        println!("{}", pattern.id());
        println!("  canonical     {}", pattern.syntax(Variant::Canonical));
        println!("  printf        {}", pattern.syntax(Variant::Printf));
        println!("  named curly   {}", pattern.syntax(Variant::NamedCurly));
        println!("  named tagged  {}", pattern.syntax(Variant::NamedTagged));
    }
    println!();
    let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
    println!("strategies: {}", names.join(", "));
}

/// Run a single fork for the parent process and print its result as JSON.
///
fn run_worker(config: &Config, catalog: &Catalog, fork: &str) -> Result<()> {
    let fork: usize = fork
        .parse()
        .with_context(|| format!("Invalid fork index '{}'", fork))?;
    let parameters = match config.patterns.as_slice() {
        [name] => FixedParameter(name.clone()),
        _ => return Err(anyhow!("A worker needs exactly one --pattern")),
    };
    let strategy = match selected_strategies(config)?.as_slice() {
        [strategy] => *strategy,
        _ => return Err(anyhow!("A worker needs exactly one --strategy")),
    };

    let pattern = catalog.get(parameters.pattern_name())?;
    let instance = strategy.build();
    let mut sink = BlackHole::new();
    let result = run_fork(
        &config.run_options(),
        instance.as_ref(),
        pattern,
        catalog,
        &mut sink,
        fork,
    );
    debug!("Worker {} consumed {} results", fork, sink.consumed());
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn run(config: &Config, catalog: &Catalog) -> AppResult<()> {
    let patterns = selected_patterns(config, catalog)?;
    let strategies = selected_strategies(config)?;
    let options = config.run_options();
    let launcher = if options.forks > 0 {
        Some(ForkLauncher::current(config.seed)?.with_log_level(config.log_level.as_str()))
    } else {
        None
    };
    let runner = Runner::new(options, catalog, launcher);

    let mut summaries = Vec::with_capacity(patterns.len() * strategies.len());
    for pattern in &patterns {
        let parameters = FixedParameter(pattern.name().to_string());
        for strategy in &strategies {
            summaries.push(runner.run(&parameters, *strategy)?);
        }
    }

    print!("{}", render_table(&summaries));
    Ok(())
}

fn main() -> Result<()> {
    let pattern_names: Vec<&str> = PatternId::ALL.iter().map(|id| id.name()).collect();
    let strategy_names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
    let matches = cli(&pattern_names, &strategy_names).get_matches();

    let worker = matches.value_of("fork-worker");
    let mut config = Config::new();
    // Workers run only with the settings on their command line
    if worker.is_none() {
        config.load(matches.value_of("config"))?;
    }
    apply_overrides(&mut config, &matches)?;
    config.validate()?;

    StderrLogger::init(config.level_filter()?)?;
    if let Some(path) = config.file_path() {
        debug!("Loaded configuration from {}", path.display());
    }

    let source = match config.seed {
        Some(seed) => ArgumentSource::seeded(seed),
        None => ArgumentSource::new(),
    };
    let catalog = Catalog::new(Arc::new(source));

    if matches.is_present("list") {
        list(&catalog);
        return Ok(());
    }
    if let Some(fork) = worker {
        return run_worker(&config, &catalog, fork);
    }

    info!("Starting benchmarks...");
    if let Err(e) = run(&config, &catalog) {
        error!("Benchmark run failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}

use std::{str::FromStr, time::Instant};

use fern::colors::{Color, ColoredLevelConfig};
use gapfit::{
    job::{FitJob, JobReport},
    series::Table,
};

const USAGE: &str = "Usage: gapfit <table.csv> [column=<name>]... [degree=<d>] [origin=<x>] [from=<x>] \
[step=<x>] [predict=<x,x,...>] [job=<job.json>] [format=text|json] [verbose]";

#[derive(Clone, Copy, PartialEq)]
enum Format {
    Text,
    Json,
}

fn main() {
    //
    // First argument is the path to a CSV table: x column first, one series per other column.
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };
    if path == "help" || path == "--help" || path == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }

    let mut columns = Vec::new();
    let mut overrides = Vec::new();
    let mut job_path = None;
    let mut format = Format::Text;
    let mut verbose = false;
    for arg in std::env::args().skip(2) {
        if let Some(name) = arg.strip_prefix("column=") {
            columns.push(name.to_string());
        } else if let Some(file) = arg.strip_prefix("job=") {
            job_path = Some(file.to_string());
        } else if let Some(option) = arg.strip_prefix("format=") {
            format = match option {
                "text" => Format::Text,
                "json" => Format::Json,
                _ => {
                    eprintln!("Invalid format: {option}");
                    std::process::exit(1);
                }
            };
        } else if arg == "verbose" {
            verbose = true;
        } else if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        } else {
            overrides.push(arg);
        }
    }

    if let Err(e) = setup_logger(verbose) {
        eprintln!("Failed to set up logging: {e}");
        std::process::exit(1);
    }

    //
    // The job file is the base, individual keys override it.
    let mut job = match job_path {
        Some(file) => FitJob::load(&file).unwrap_or_else(|e| {
            log::error!("Failed to load job {file}: {e}");
            std::process::exit(1);
        }),
        None => FitJob::default(),
    };
    for arg in &overrides {
        apply_override(&mut job, arg);
    }

    let table = Table::<f64>::open(&path).unwrap_or_else(|e| {
        log::error!("Failed to read {path}: {e}");
        std::process::exit(1);
    });

    if columns.is_empty() {
        columns = table.columns().to_vec();
    }
    let series: Vec<(String, Vec<(f64, f64)>)> = columns
        .into_iter()
        .map(|name| match table.column(&name) {
            Some(samples) => (name, samples),
            None => {
                log::error!("No column named `{name}` in {path}");
                std::process::exit(1);
            }
        })
        .collect();

    log::info!(
        "fitting {} series from {path} with degree {}",
        series.len(),
        job.degree
    );
    let reports = run_all(&job, &series);

    let mut failed = false;
    match format {
        Format::Text => {
            for (name, report) in &reports {
                match report {
                    Ok(report) => print_report(name, table.x_label(), report, job.precision),
                    Err(e) => {
                        log::error!("{name}: {e}");
                        failed = true;
                    }
                }
            }
        }
        Format::Json => {
            let mut output = serde_json::Map::new();
            for (name, report) in &reports {
                let value = match report {
                    Ok(report) => serde_json::to_value(report)
                        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() })),
                    Err(e) => {
                        failed = true;
                        serde_json::json!({ "error": e.to_string() })
                    }
                };
                output.insert(name.clone(), value);
            }

            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    log::error!("Failed to serialize reports: {e}");
                    failed = true;
                }
            }
        }
    }

    std::process::exit(i32::from(failed));
}

fn apply_override(job: &mut FitJob, arg: &str) {
    let Some((key, value)) = arg.split_once('=') else {
        eprintln!("Unrecognized argument: {arg}\n{USAGE}");
        std::process::exit(1);
    };

    match key {
        "degree" => job.degree = parse(key, value),
        "origin" => job.origin = Some(parse(key, value)),
        "from" => job.min_x = Some(parse(key, value)),
        "step" => job.gap_step = Some(parse(key, value)),
        "precision" => job.precision = parse(key, value),
        "predict" => {
            job.predict = value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse(key, s.trim()))
                .collect();
        }
        _ => {
            eprintln!("Unrecognized option: {key}\n{USAGE}");
            std::process::exit(1);
        }
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> T {
    str::parse::<T>(value).unwrap_or_else(|_| {
        eprintln!("Invalid {key} value: {value}");
        std::process::exit(1);
    })
}

#[cfg(not(feature = "parallel"))]
fn run_all(
    job: &FitJob,
    series: &[(String, Vec<(f64, f64)>)],
) -> Vec<(String, gapfit::Result<JobReport>)> {
    series
        .iter()
        .map(|(name, samples)| (name.clone(), job.run(samples)))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_all(
    job: &FitJob,
    series: &[(String, Vec<(f64, f64)>)],
) -> Vec<(String, gapfit::Result<JobReport>)> {
    use rayon::prelude::*;

    series
        .par_iter()
        .map(|(name, samples)| (name.clone(), job.run(samples)))
        .collect()
}

fn print_report(name: &str, x_label: &str, report: &JobReport, precision: usize) {
    let properties = &report.properties;
    println!(
        "[ {name}: degree {}, {} samples, R² = {:.4}, RMSE = {:.precision$} ]",
        properties.degree, properties.data_points, properties.r_squared, properties.rmse
    );
    println!("{}", report.equation);

    if !report.gaps.is_empty() {
        println!("Gaps:");
        for (x, y) in &report.gaps {
            println!("  {x_label} {x}: {y:.precision$}");
        }
    }

    if !report.predictions.is_empty() {
        println!("Predictions:");
        for (x, y) in &report.predictions {
            println!("  {x_label} {x}: {y:.precision$}");
        }
    }
    println!();
}

fn setup_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let start = Instant::now();
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Cyan)
        .debug(Color::BrightBlack)
        .trace(Color::Magenta);

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let t = start.elapsed();
            out.finish(format_args!(
                "[{:>4}.{:03}s][{}][{}] {}",
                t.as_secs(),
                t.subsec_millis(),
                record.target(),
                colors.color(record.level()),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "inlay workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the holder-versus-heap suite once per global allocator
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Only benchmark these allocators (e.g. `--allocator system --allocator mimalloc`)
        #[arg(long = "allocator")]
        allocators: Vec<String>,
    },
    /// Summarise existing criterion output without running anything
    Report {
        /// Criterion output directory
        #[arg(long, default_value = "target/criterion")]
        criterion_dir: PathBuf,

        /// Directory for report.md and results.json
        #[arg(long, default_value = "benchmark_results")]
        out_dir: PathBuf,
    },
}

const ALLOCATORS: &[&str] = &["system", "mimalloc", "snmalloc", "jemalloc"];

/// One measured workload under one allocator.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Measurement {
    workload: String,
    allocator: String,
    /// Operations (or elements, for throughput groups) per second.
    ops_per_sec: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, allocators } => {
            let selected = select_allocators(&allocators)?;
            run_benchmarks(&selected, quick)?;
            write_report(Path::new("target/criterion"), Path::new("benchmark_results"))?;
        }
        Commands::Report {
            criterion_dir,
            out_dir,
        } => write_report(&criterion_dir, &out_dir)?,
    }

    Ok(())
}

fn select_allocators(requested: &[String]) -> Result<Vec<&'static str>> {
    if requested.is_empty() {
        return Ok(ALLOCATORS.to_vec());
    }
    requested
        .iter()
        .map(|name| {
            ALLOCATORS
                .iter()
                .copied()
                .find(|known| *known == name.as_str())
                .with_context(|| format!("unknown allocator `{name}` (expected one of {ALLOCATORS:?})"))
        })
        .collect()
}

fn run_benchmarks(allocators: &[&str], quick: bool) -> Result<()> {
    println!("Compiling benchmark suite...");
    let status = Command::new("cargo")
        .args(["build", "--bench", "suite", "--release"])
        .status()
        .context("failed to spawn cargo")?;
    if !status.success() {
        bail!("failed to compile the benchmark suite");
    }

    for allocator in allocators {
        let feature = format!("alloc-{allocator}");
        println!("\n>>> Benchmarking with feature: {feature}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0")
            .env("RUSTFLAGS", "-C opt-level=3 -C codegen-units=1")
            .args(["bench", "--bench", "suite", "--no-default-features", "--features"])
            .arg(&feature)
            // Criterion arguments follow `--`.
            .arg("--")
            .arg("--save-baseline")
            .arg(allocator);

        if quick {
            cmd.args(["--measurement-time", "0.1", "--noplot", "--sample-size", "10"]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to run the suite with {feature}"))?;
        if status.success() {
            println!("Finished {feature} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: suite failed with {feature}");
        }
    }

    Ok(())
}

fn write_report(criterion_dir: &Path, out_dir: &Path) -> Result<()> {
    println!("\n>>> Generating report...");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut measurements = Vec::new();
    collect_measurements(criterion_dir, &mut measurements)?;
    measurements.sort_by(|a, b| (&a.workload, &a.allocator).cmp(&(&b.workload, &b.allocator)));

    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let json_path = out_dir.join("results.json");
    fs::write(&json_path, serde_json::to_string_pretty(&measurements)?)
        .with_context(|| format!("writing {}", json_path.display()))?;

    let report_path = out_dir.join("report.md");
    let mut file = fs::File::create(&report_path).with_context(|| format!("creating {}", report_path.display()))?;
    render_markdown(&mut file, &measurements)?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn render_markdown(out: &mut impl Write, measurements: &[Measurement]) -> Result<()> {
    let mut table: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    for m in measurements {
        table
            .entry(m.workload.as_str())
            .or_default()
            .insert(m.allocator.as_str(), m.ops_per_sec);
    }

    writeln!(out, "# Holder vs Heap Benchmark Report")?;
    writeln!(out)?;
    writeln!(out, "`inlay_*` rows never reach the allocator; `box_*` rows do.")?;
    writeln!(out)?;

    write!(out, "| Workload |")?;
    for allocator in ALLOCATORS {
        write!(out, " {allocator} (ops/s) | vs system |")?;
    }
    writeln!(out)?;

    write!(out, "|---|")?;
    for _ in ALLOCATORS {
        write!(out, "---|---|")?;
    }
    writeln!(out)?;

    for (workload, by_allocator) in &table {
        write!(out, "| {workload} |")?;
        let system = by_allocator.get("system").copied().unwrap_or(0.0);

        for allocator in ALLOCATORS {
            match by_allocator.get(allocator) {
                Some(ops) => {
                    let relative = if system > 0.0 { ops / system } else { 0.0 };
                    write!(out, " {} | **{relative:.2}x** |", human_rate(*ops))?;
                }
                None => write!(out, " N/A | - |")?,
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

fn human_rate(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion's `<group>/<workload>/<baseline>/estimates.json` layout.
fn collect_measurements(dir: &Path, out: &mut Vec<Measurement>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_measurements(&path, out)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        let Some(workload_dir) = baseline_dir.parent() else { continue };
        let (Some(allocator), Some(workload)) = (dir_name(baseline_dir), dir_name(workload_dir)) else {
            continue;
        };
        if !ALLOCATORS.contains(&allocator.as_str()) || workload == "report" {
            continue;
        }

        let elements = read_json(&workload_dir.join("benchmark.json"))
            .ok()
            .and_then(|json| json.get("throughput")?.get("Elements")?.as_f64())
            .unwrap_or(1.0);

        let estimates = read_json(&path)?;
        let Some(mean_ns) = estimates
            .get("mean")
            .and_then(|m| m.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
        else {
            continue;
        };
        if mean_ns <= 0.0 {
            continue;
        }

        out.push(Measurement {
            workload,
            allocator,
            ops_per_sec: elements * 1e9 / mean_ns,
        });
    }
    Ok(())
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_owned)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

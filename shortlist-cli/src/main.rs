use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Import from shortlist-core
use shortlist_core::config::TrailingMode;
use shortlist_core::{PipelineStages, RankingConfig, RankingPipeline, RankingReport};

// Import CLI utilities
use shortlist_cli::RankingPresenter;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum RedactionMode {
    /// Delete the date-of-birth marker and everything after it
    Greedy,
    /// Delete the marker and one following date only
    Scoped,
}

impl From<RedactionMode> for TrailingMode {
    fn from(mode: RedactionMode) -> Self {
        match mode {
            RedactionMode::Greedy => TrailingMode::Greedy,
            RedactionMode::Scoped => TrailingMode::Scoped,
        }
    }
}

#[derive(Parser)]
#[command(name = "shortlist")]
#[command(about = "Rank a folder of resumes by extracted signals and print a shortlist")]
struct Args {
    /// Folder of resumes (PDF, DOCX, TXT). Prompted for when omitted
    #[arg(short, long)]
    input: Option<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Number of ranked rows to show (overrides the config)
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Report format written with --output: full or compact
    #[arg(short = 'f', long, default_value = "full")]
    output_format: String,

    /// Write the ranking report as JSON to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Date-of-birth redaction reach (overrides the config)
    #[arg(long, value_enum)]
    redaction_mode: Option<RedactionMode>,

    /// Print the default config as YAML and exit
    #[arg(long)]
    show_config: bool,

    /// Skip the bar chart under the table
    #[arg(long)]
    no_chart: bool,

    /// Enable per-stage timings
    #[arg(long)]
    profile: bool,

    /// Dump all intermediate pipeline stage outputs to a directory
    /// Captures: records, skipped documents, CGPA statistics, scored and ranked results
    #[arg(long)]
    dump_stages: bool,

    /// Directory for stage dump output (default: test_outputs/stages)
    #[arg(long, default_value = "test_outputs/stages")]
    stages_dir: String,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if args.show_config {
        print!("{}", serde_yaml::to_string(&RankingConfig::default())?);
        return Ok(());
    }

    println!("🦀 Shortlist Resume Ranker");

    let input = match &args.input {
        Some(input) => input.clone(),
        None => prompt_for_folder()?,
    };
    if !Path::new(&input).is_dir() {
        bail!("Resume folder not found: {input}");
    }
    tracing::debug!(input = %input, "resume folder");

    let mut config = RankingConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {config_path}");
    } else {
        println!("📋 Using default config");
    }

    // Apply CLI overrides to config
    if let Some(top_n) = args.top_n {
        tracing::debug!(top_n, "top-n override");
        config.top_n = top_n;
    }
    if let Some(mode) = args.redaction_mode {
        tracing::debug!(?mode, "redaction mode override");
        config.redaction.trailing_mode = mode.into();
    }

    let pipeline = RankingPipeline::new(config)?;
    println!("📄 Ranking resumes in: {input}");

    // Stage dump mode: capture and save all intermediates
    if args.dump_stages {
        println!("\n🔬 Pipeline stage dump mode");
        let stages = pipeline.capture_stages(Path::new(&input))?;
        save_stages(&stages, &input, &args.stages_dir)?;
        println!("\n✅ All stages dumped to: {}", args.stages_dir);
        return Ok(());
    }

    let report = pipeline.rank_directory_with_profiling(Path::new(&input), args.profile)?;
    let top_n = pipeline.config().top_n;
    present(&report, &args, top_n, pipeline.config().scoring.max_score);

    if let Some(output_path) = &args.output {
        save_report(&report, output_path, &args.output_format, top_n)?;
    }

    Ok(())
}

/// Interactive fallback when no --input is given
fn prompt_for_folder() -> Result<String> {
    print!("📁 Enter the path to the resume folder: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read folder path from stdin")?;

    let folder = line.trim();
    if folder.is_empty() {
        bail!("No resume folder given");
    }
    Ok(folder.to_string())
}

fn present(report: &RankingReport, args: &Args, top_n: usize, max_score: f64) {
    let rows = report.top(top_n);
    let presenter = RankingPresenter::new(max_score);

    println!("\n🏆 Top {} of {} ranked resumes\n", rows.len(), report.results.len());
    print!("{}", presenter.render_table(rows));

    if !args.no_chart && !rows.is_empty() {
        println!();
        print!("{}", presenter.render_chart(rows));
    }

    if !report.skipped.is_empty() {
        println!("\n⚠️  Skipped {} files:", report.skipped.len());
        for skipped in &report.skipped {
            println!("   - {}: {}", skipped.resume, skipped.reason);
        }
    }
}

fn save_report(report: &RankingReport, output_path: &str, format: &str, top_n: usize) -> Result<()> {
    report.save_with_format(output_path, format, top_n)?;

    match format {
        "compact" => println!("💾 Compact ranking saved to: {output_path}"),
        "full" => println!("💾 Full report saved to: {output_path}"),
        _ => {
            tracing::warn!("⚠️  Unknown output format '{format}', using full report format");
            println!("💾 Full report saved to: {output_path}");
        }
    }

    Ok(())
}

fn save_stages(stages: &PipelineStages, input: &str, output_dir: &str) -> Result<()> {
    use std::fs;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create stage directory {output_dir}"))?;

    // Stage 1: extracted records
    let records_path = format!("{output_dir}/stage1_records.json");
    fs::write(&records_path, serde_json::to_string_pretty(&stages.records)?)?;
    println!("  💾 {} ({} records)", records_path, stages.records.len());

    // Stage 1b: skipped documents
    let skipped_path = format!("{output_dir}/stage1b_skipped.json");
    fs::write(&skipped_path, serde_json::to_string_pretty(&stages.skipped)?)?;
    println!("  💾 {} ({} skipped)", skipped_path, stages.skipped.len());

    // Stage 2: batch CGPA statistics
    let stats_path = format!("{output_dir}/stage2_cgpa_stats.json");
    fs::write(&stats_path, serde_json::to_string_pretty(&stages.cgpa_stats)?)?;
    println!("  💾 {stats_path}");

    // Stage 3: scored, input order
    let scored_path = format!("{output_dir}/stage3_scored.json");
    fs::write(&scored_path, serde_json::to_string_pretty(&stages.scored)?)?;
    println!("  💾 {} ({} scored)", scored_path, stages.scored.len());

    // Stage 4: ranked
    let ranked_path = format!("{output_dir}/stage4_ranked.json");
    fs::write(&ranked_path, serde_json::to_string_pretty(&stages.ranked)?)?;
    println!("  💾 {} ({} ranked)", ranked_path, stages.ranked.len());

    // Summary file: quick reference for validation scripts
    let summary = serde_json::json!({
        "input_folder": input,
        "captured_at": chrono::Utc::now().to_rfc3339(),
        "stage_counts": {
            "records": stages.records.len(),
            "skipped": stages.skipped.len(),
            "cgpa_samples": stages.cgpa_stats.map(|s| s.samples).unwrap_or(0),
            "scored": stages.scored.len(),
            "ranked": stages.ranked.len(),
        }
    });
    let summary_path = format!("{output_dir}/summary.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    println!("  💾 {summary_path}");

    Ok(())
}

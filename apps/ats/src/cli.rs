use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::input::{load_scoring_text, read_text};
use crate::models::{ParseWarning, ScoreReport};
use crate::parser::parse_resume;
use crate::render::render_ats_text;
use crate::report::{read_report, write_report, ReportComparison, ReportEnvelope, ReportFormat};
use crate::scoring::{sanitize_for_ats, AtsScorer, RubricScorer};

#[derive(Parser, Debug)]
#[command(
    name = "resume-ats",
    about = "Parse Definition-List Markdown resumes and score their ATS compatibility",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a Markdown resume and render it as ATS-friendly plain text
    Convert(ConvertArgs),
    /// Score a PDF or plain-text resume
    Score(ScoreArgs),
    /// Convert a Markdown resume, score the rendering, and optionally compare it with its PDF
    Check(CheckArgs),
    /// Compare two saved score reports
    Compare(CompareArgs),
    /// Rewrite text into ATS-safe ASCII
    Sanitize(SanitizeArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Markdown resume to parse
    pub input: PathBuf,
    /// Write the rendering here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emit the parsed record as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// PDF (text is extracted) or UTF-8 text file
    pub input: PathBuf,
    /// Save the report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Report format; defaults to ATS_REPORT_FORMAT or json
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Markdown resume to parse
    pub input: PathBuf,
    /// Built PDF of the same resume, scored and compared against the rendering
    #[arg(long)]
    pub pdf: Option<PathBuf>,
    /// Save the report (the PDF's when given, otherwise the rendering's)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Earlier report (JSON or key=value)
    pub before: PathBuf,
    /// Later report
    pub after: PathBuf,
}

#[derive(Args, Debug)]
pub struct SanitizeArgs {
    pub input: PathBuf,
    /// Write the sanitized text here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let scorer = RubricScorer::new(config.weights);
    match cli.command {
        Command::Convert(args) => convert(args),
        Command::Score(args) => score(args, config, &scorer),
        Command::Check(args) => check(args, config, &scorer),
        Command::Compare(args) => compare(args),
        Command::Sanitize(args) => sanitize(args),
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    let source = read_text(&args.input)?;
    let outcome = parse_resume(&source);
    print_warnings(&outcome.warnings);

    let body = if args.json {
        let mut json = serde_json::to_string_pretty(&outcome.record).map_err(AppError::from)?;
        json.push('\n');
        json
    } else {
        let rendered = render_ats_text(&outcome.record);
        print_warnings(&rendered.warnings);
        rendered.text
    };
    emit(args.output.as_deref(), &body)
}

fn score(args: ScoreArgs, config: &Config, scorer: &dyn AtsScorer) -> Result<()> {
    let text = load_scoring_text(&args.input)?;
    let report = scorer.score(&text);
    info!(scorer = scorer.name(), score = report.overall_score, "scored {}", args.input.display());

    print_summary(&args.input.display().to_string(), &report);
    if let Some(path) = &args.output {
        let envelope = ReportEnvelope::new(args.input.display().to_string(), scorer.name(), report);
        write_report(path, &envelope, args.format.unwrap_or(config.report_format))?;
    }
    Ok(())
}

fn check(args: CheckArgs, config: &Config, scorer: &dyn AtsScorer) -> Result<()> {
    let source = read_text(&args.input)?;
    // Read the PDF up front so an unreadable file fails before any output.
    let pdf_text = match &args.pdf {
        Some(path) => Some((path, load_scoring_text(path)?)),
        None => None,
    };

    let outcome = parse_resume(&source);
    print_warnings(&outcome.warnings);
    let rendered = render_ats_text(&outcome.record);
    print_warnings(&rendered.warnings);

    let rendered_report = scorer.score(&rendered.text);
    print_summary("rendered text", &rendered_report);

    let (source_label, saved) = match pdf_text {
        Some((path, text)) => {
            let pdf_report = scorer.score(&text);
            print_summary(&path.display().to_string(), &pdf_report);
            let comparison = ReportComparison::between(&rendered_report, &pdf_report)
                .with_labels("rendered", "pdf");
            println!("{comparison}");
            (path.display().to_string(), pdf_report)
        }
        None => (args.input.display().to_string(), rendered_report),
    };

    if let Some(path) = &args.output {
        let envelope = ReportEnvelope::new(source_label, scorer.name(), saved);
        write_report(path, &envelope, args.format.unwrap_or(config.report_format))?;
    }
    Ok(())
}

fn compare(args: CompareArgs) -> Result<()> {
    let before = read_report(&args.before)?;
    let after = read_report(&args.after)?;
    let label = |path: &Path, envelope: &ReportEnvelope| {
        if envelope.source.is_empty() {
            path.display().to_string()
        } else {
            envelope.source.clone()
        }
    };
    let comparison = ReportComparison::between(&before.report, &after.report)
        .with_labels(label(&args.before, &before), label(&args.after, &after));
    info!(
        delta = comparison.score_delta(),
        improved = comparison.improved(),
        "reports compared"
    );
    println!("{comparison}");
    Ok(())
}

fn sanitize(args: SanitizeArgs) -> Result<()> {
    let text = load_scoring_text(&args.input)?;
    emit(args.output.as_deref(), &sanitize_for_ats(&text))
}

// ────────────────────────────────────────────────────────────────────────────
// Output helpers
// ────────────────────────────────────────────────────────────────────────────

fn emit(output: Option<&Path>, body: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body)
                .map_err(|source| AppError::Write {
                    path: path.to_path_buf(),
                    source,
                })
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => print!("{body}"),
    }
    Ok(())
}

fn print_warnings(warnings: &[ParseWarning]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

fn print_summary(label: &str, report: &ScoreReport) {
    println!(
        "{label}: {}/100 ({})",
        report.overall_score,
        report.rating.as_str()
    );
    for (name, section) in &report.section_scores {
        let marker = if section.is_full() { ' ' } else { '!' };
        println!("{marker} {name:<18} {:>3}/{:<3}", section.points, section.max);
    }
    if report.issues.is_empty() {
        println!("  no issues");
    } else {
        for (idx, issue) in report.issues.iter().enumerate() {
            println!("  {}. {issue}", idx + 1);
        }
    }
    println!("  {}", report.rating.describe());
    if !report.recommendations.is_empty() {
        println!("  Recommendations:");
        for rec in &report.recommendations {
            println!("    - {rec}");
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_score_command() {
        let cli = Cli::try_parse_from(["resume-ats", "score", "resume.pdf", "--format", "kv", "-o", "r.txt"])
            .unwrap();
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.input, PathBuf::from("resume.pdf"));
                assert_eq!(args.format, Some(ReportFormat::Kv));
                assert_eq!(args.output, Some(PathBuf::from("r.txt")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_convert_writes_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("resume.md");
        let output = dir.path().join("resume.txt");
        std::fs::write(
            &input,
            "---\nname: Jane Doe\n---\n### Work Experience\n**Engineer**\n: Acme | _2020_\n*   Shipped\n",
        )
        .unwrap();

        convert(ConvertArgs {
            input,
            output: Some(output.clone()),
            json: false,
        })
        .unwrap();
        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.starts_with("Jane Doe\n"));
        assert!(text.contains("WORK EXPERIENCE\nEngineer: Acme | 2020\n* Shipped\n"));
    }

    #[test]
    fn test_check_fails_before_output_on_missing_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("resume.md");
        let report = dir.path().join("report.json");
        std::fs::write(&input, "### Skills\n**Languages**\nRust\n").unwrap();

        let config = Config {
            rust_log: "info".into(),
            report_format: ReportFormat::Json,
            weights: Default::default(),
        };
        let result = check(
            CheckArgs {
                input,
                pdf: Some(dir.path().join("missing.pdf")),
                output: Some(report.clone()),
                format: None,
            },
            &config,
            &RubricScorer::default(),
        );
        assert!(result.is_err());
        assert!(!report.exists());
    }

    #[test]
    fn test_sanitize_writes_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "R&D • “quoted”").unwrap();
        sanitize(SanitizeArgs {
            input,
            output: Some(output.clone()),
        })
        .unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "RandD * \"quoted\"");
    }
}

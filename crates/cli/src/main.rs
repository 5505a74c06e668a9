use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geoconf::api::{
    ConsistencyStats, GeometryCore, ObjectId, PredicateVerdict, Registration, TracingTracer,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::SubscriberBuilder;

mod problem;
mod provenance;
mod settings;

use problem::Problem;
use provenance::Payload;
use settings::Settings;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Register geometric configurations and verify predicates")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Register the configuration of a problem file and evaluate its predicates
    Verify {
        #[arg(long)]
        input: PathBuf,
        /// Write the JSON report here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// JSON settings file; missing fields use the defaults
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        pictures: Option<usize>,
    },
    /// Print a provenance JSON block with the effective settings
    Report {
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Verify {
            input,
            out,
            settings,
            seed,
            pictures,
        } => {
            let settings = Settings::load(settings.as_deref())?.with_overrides(seed, pictures);
            verify(&input, out.as_deref(), &settings)
        }
        Action::Report { settings } => report(&Settings::load(settings.as_deref())?),
    }
}

#[derive(Debug, Serialize)]
struct StatsView {
    inconsistencies: usize,
    reconstructions: usize,
    dropped_pictures: usize,
    agreements: usize,
}

impl From<ConsistencyStats> for StatsView {
    fn from(s: ConsistencyStats) -> Self {
        Self {
            inconsistencies: s.inconsistencies,
            reconstructions: s.reconstructions,
            dropped_pictures: s.dropped_pictures,
            agreements: s.agreements,
        }
    }
}

#[derive(Debug, Serialize)]
struct PredicateView {
    predicate: String,
    verdict: String,
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    status: &'static str,
    key: Option<String>,
    detail: Option<String>,
    pictures: usize,
    stats: StatsView,
    predicates: Vec<PredicateView>,
}

fn verify_report(problem: &Problem, settings: &Settings) -> Result<VerifyReport> {
    let built = problem.build()?;
    let name = |id: ObjectId| -> String {
        built
            .names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    };
    let core = GeometryCore::new(settings.core_cfg()).with_tracer(Arc::new(TracingTracer));
    let registration = core.try_register(&built.configuration);
    let mut report = VerifyReport {
        status: "",
        key: None,
        detail: None,
        pictures: 0,
        stats: ConsistencyStats::default().into(),
        predicates: Vec::new(),
    };
    match registration {
        Registration::Accepted(mut accepted) => {
            report.status = "accepted";
            report.key = Some(accepted.key.to_string());
            let mut stats = accepted.stats;
            for (label, predicate) in &built.predicates {
                let verdict =
                    match core.evaluate_predicate_with(&mut accepted.pictures, predicate, &mut stats) {
                        PredicateVerdict::True => "true".to_string(),
                        PredicateVerdict::False => "false".to_string(),
                        PredicateVerdict::UnresolvableInconsistency(r) => format!("unresolvable: {r}"),
                    };
                tracing::info!(predicate = %label, %verdict, "evaluated");
                report.predicates.push(PredicateView {
                    predicate: label.clone(),
                    verdict,
                });
            }
            report.pictures = accepted.pictures.len();
            report.stats = stats.into();
        }
        Registration::DuplicateOf(key) => {
            report.status = "duplicate";
            report.key = Some(key.to_string());
        }
        Registration::Inconstructible(ids) => {
            report.status = "inconstructible";
            let names: Vec<String> = ids.into_iter().map(name).collect();
            report.detail = Some(names.join(", "));
        }
        Registration::EqualObjects { object, equal_to } => {
            report.status = "equal_objects";
            report.detail = Some(format!("{} = {}", name(object), name(equal_to)));
        }
        Registration::UnresolvableInconsistency(r) => {
            report.status = "unresolvable";
            report.pictures = r.surviving;
            report.detail = Some(match r.object {
                Some(id) => format!("{} (at {})", r.reason, name(id)),
                None => r.reason.to_string(),
            });
            report.stats = r.stats.into();
        }
    }
    Ok(report)
}

fn verify(input: &Path, out: Option<&Path>, settings: &Settings) -> Result<()> {
    tracing::info!(input = %input.display(), seed = settings.seed, pictures = settings.pictures, "verify");
    let problem = Problem::load(input)?;
    let report = verify_report(&problem, settings)?;
    tracing::info!(status = report.status, "registration");
    let json = serde_json::to_vec_pretty(&report)?;
    let Some(out) = out else {
        println!("{}", String::from_utf8_lossy(&json));
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
    let payload = Payload::new(serde_json::to_value(settings)?)
        .with_input(input.to_string_lossy());
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), provenance = %sidecar.display(), "written");
    Ok(())
}

fn report(settings: &Settings) -> Result<()> {
    let payload = Payload::new(serde_json::to_value(settings)?);
    let doc = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

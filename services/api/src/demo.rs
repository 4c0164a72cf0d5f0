use crate::infra::{load_sentencing_engine, ToolState};
use clap::Args;
use justice_suite::config::{AppConfig, SentencingConfig};
use justice_suite::error::AppError;
use justice_suite::tools::audit::{run_simulation, AuditRequest, DEFAULT_BIAS_MULTIPLIER};
use justice_suite::tools::cases::{
    CaseId, CaseLifecycleService, CaseRecord, CaseRepository, CaseServiceError,
    InMemoryCaseRepository,
};
use justice_suite::tools::corrections::GpsReading;
use justice_suite::tools::pretrial::{risk_score, DefendantProfile};
use justice_suite::tools::sentencing::{SentencingEngine, SentencingResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Crime category, matched case-sensitively (e.g. Theft, Burglary)
    #[arg(long)]
    pub(crate) crime_type: String,
    /// Severity score on the 1-5 scale
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) severity: i64,
    /// Historical case CSV to use instead of the configured history
    #[arg(long)]
    pub(crate) history_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Historical case CSV to use instead of the configured history
    #[arg(long)]
    pub(crate) history_csv: Option<PathBuf>,
    /// Seed for the bias audit simulation (random when omitted)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Group B weight used by the bias audit simulation
    #[arg(long, default_value_t = DEFAULT_BIAS_MULTIPLIER)]
    pub(crate) bias_multiplier: f64,
    /// Skip the case-file portion of the demo
    #[arg(long)]
    pub(crate) skip_cases: bool,
}

fn sentencing_engine(history_csv: Option<PathBuf>) -> Result<SentencingEngine, AppError> {
    let config = match history_csv {
        Some(path) => SentencingConfig {
            history_csv: Some(path),
        },
        None => AppConfig::load()?.sentencing,
    };
    Ok(load_sentencing_engine(&config)?)
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        crime_type,
        severity,
        history_csv,
    } = args;

    let engine = sentencing_engine(history_csv)?;
    let result = engine.recommend(&crime_type, severity);
    println!("Sentencing recommendation for {crime_type} (severity {severity})");
    render_recommendation(&result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        history_csv,
        seed,
        bias_multiplier,
        skip_cases,
    } = args;

    let tools = ToolState::new(sentencing_engine(history_csv)?);

    println!("Justice suite demo");

    println!("\nInvestigator: biometric lookup");
    for hash in ["A1B2-C3D4-E5F6", "FFFF-0000-FFFF"] {
        match tools.suspects.find_match(hash) {
            Some(suspect) => println!(
                "- {hash}: match {} ({}), last seen {}",
                suspect.name, suspect.id, suspect.last_known_location
            ),
            None => println!("- {hash}: no match found in the database"),
        }
    }

    println!("\nPre-trial analyst: risk score");
    let profile = DefendantProfile {
        prior_offenses: 2,
        age_at_first_arrest: 19,
        has_stable_employment: false,
    };
    println!(
        "- {} priors, first arrest at {}, employed: {} -> score {}",
        profile.prior_offenses,
        profile.age_at_first_arrest,
        profile.has_stable_employment,
        risk_score(&profile)
    );

    println!("\nSentencing advisor");
    for (crime_type, severity) in [("Theft", 2), ("Burglary", 3), ("Homicide", 5)] {
        println!("- {crime_type} (severity {severity})");
        render_recommendation(&tools.sentencing.recommend(crime_type, severity));
    }

    println!("\nCorrections officer: supervision check");
    for reading in [
        GpsReading {
            current_x: 45.0,
            current_y: 60.0,
            current_hour: 14,
        },
        GpsReading {
            current_x: 95.5,
            current_y: 60.0,
            current_hour: 23,
        },
    ] {
        println!(
            "- ({:.1}, {:.1}) at {:02}:00 -> {}",
            reading.current_x,
            reading.current_y,
            reading.current_hour,
            tools.supervision.check(&reading).join(" | ")
        );
    }

    println!("\nAuditor: bias simulation (multiplier {bias_multiplier})");
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let summary = run_simulation(&AuditRequest { bias_multiplier }, &mut rng);
    println!(
        "- Group A avg {:.2} | Group B avg {:.2} | disparity x{:.2}",
        summary.group_a, summary.group_b, summary.disparity_factor
    );

    if skip_cases {
        return Ok(());
    }

    println!("\nSystem architect: case files");
    let service = CaseLifecycleService::new(Arc::new(InMemoryCaseRepository::default()));
    let case_id = CaseId::new("CASE-001");
    demo_case_lifecycle(&service, &case_id)?;

    Ok(())
}

fn demo_case_lifecycle<R>(
    service: &CaseLifecycleService<R>,
    case_id: &CaseId,
) -> Result<(), CaseServiceError>
where
    R: CaseRepository + 'static,
{
    let record = service.create_case(case_id.clone(), "John Doe")?;
    println!("- Opened {} for {}", record.case_id, record.defendant_name);

    match service.create_case(case_id.clone(), "Someone Else") {
        Err(CaseServiceError::DuplicateCase(id)) => {
            println!("- Second create for {id} rejected: case ID already exists")
        }
        Ok(_) => println!("- Unexpected: duplicate case was accepted"),
        Err(other) => return Err(other),
    }

    service.add_evidence(case_id, "Fingerprint card A1B2-C3D4-E5F6")?;
    service.add_evidence(case_id, "CCTV footage, 5th Street")?;
    let record = service.update_status(case_id, "Pre-Trial")?;
    render_case(&record);

    match service.get_case(&CaseId::new("CASE-404")) {
        Err(CaseServiceError::CaseNotFound(id)) => {
            println!("- Lookup for {id}: case not found")
        }
        Ok(_) => println!("- Unexpected: unknown case resolved"),
        Err(other) => return Err(other),
    }

    Ok(())
}

fn render_case(record: &CaseRecord) {
    println!(
        "- {} | {} | status {}",
        record.case_id, record.defendant_name, record.status
    );
    for entry in &record.evidence_log {
        println!("  - [{}] {}", entry.timestamp, entry.item);
    }
}

fn render_recommendation(result: &SentencingResult) {
    match (
        result.recommendation_months,
        result.min_sentence,
        result.max_sentence,
    ) {
        (Some(months), Some(min), Some(max)) => println!(
            "  {}: {:.1} months (range {}-{}, {} case(s))",
            result.status.label(),
            months,
            min,
            max,
            result.case_count
        ),
        _ => println!("  {}", result.status.label()),
    }
    println!("  Basis: {}", result.basis);
}

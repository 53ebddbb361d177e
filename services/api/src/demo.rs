use chrono::Utc;
use clap::{Args, ValueEnum};
use placement_ai::config::AppConfig;
use placement_ai::error::AppError;
use placement_ai::matching::{
    Candidate, CandidateId, MatchResponse, MatchingOutcome, MatchingRun, MatchingSummary,
    Opportunity, OpportunityId, RosterFormat, RosterImporter, ScoredEdge, ScorerConfig,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

const SAMPLE_CANDIDATES: &str = "\
id,name,skills,education,aptitude,location,sectors,rural,category,preferences,portfolio
C-001,Asha Rao,Python;SQL;Tableau,Bachelors,8.5,Urban,Technology|Analytics,no,GEN,OPP-ANALYTICS,4
C-002,Vikram Singh,Java;Spring;SQL,Masters,7.5,Urban,Technology,no,OBC,,3
C-003,Meena Devi,Accounting;Tally;Excel,Diploma,6.5,Rural,Finance,yes,SC,,1
C-004,Imran Sheikh,Python;Machine Learning;Statistics,Masters,9,Semi-Urban,Technology|Analytics,no,GEN,,5
C-005,Lakshmi Nair,Figma;Illustrator;Branding,Bachelors,7,Urban,Design,no,GEN,,4
C-006,Ravi Kumar,Excel;Communication;Sales,12th,5.5,Rural,Finance|Retail,yes,ST,,1
C-007,Pooja Verma,Kotlin;Android;Java,Bachelors,8,Semi-Urban,Technology,yes,OBC,,2
C-008,Arjun Das,Tally;GST;Excel,Diploma,6,Rural,Finance,yes,SC,,2
";

const SAMPLE_OPPORTUNITIES: &str = "\
id,organization,role,location,skills,capacity,sector
OPP-ANALYTICS,DataWorks,Analytics Intern,Urban,Python;SQL;Tableau,2,Analytics
OPP-BACKEND,CodeForge,Backend Intern,Urban,Java;Spring;SQL,1,Technology
OPP-FINANCE,LedgerCo,Accounts Intern,Rural,Accounting;Tally;GST,2,Finance
OPP-DESIGN,PixelHouse,Design Intern,Urban,Figma;Branding,1,Design
OPP-MOBILE,AppNest,Android Intern,Semi-Urban,Kotlin;Android,1,Technology
OPP-PAUSED,Dormant Labs,Research Intern,Urban,Statistics,0,Technology
";

/// Rendering applied to a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Candidate roster (CSV, or JSON when the extension is .json)
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Opportunity roster (CSV, or JSON when the extension is .json)
    #[arg(long)]
    pub(crate) opportunities: PathBuf,
    /// Override the configured scorer seed
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the configured scorer seed
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        candidates,
        opportunities,
        seed,
        format,
    } = args;

    let candidates = RosterImporter::candidates_from_path(&candidates)?;
    let opportunities = RosterImporter::opportunities_from_path(&opportunities)?;
    let scorer = scorer_config(seed)?;

    let rendered = render_run(scorer, &candidates, &opportunities, format)?;
    print!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (candidates, opportunities) = sample_roster()?;
    let scorer = scorer_config(args.seed)?;

    println!("Placement matching demo");
    println!(
        "- {} candidates | {} opportunities | seed {}",
        candidates.len(),
        opportunities.len(),
        scorer.seed
    );
    let rendered = render_run(scorer, &candidates, &opportunities, OutputFormat::Table)?;
    print!("{rendered}");
    Ok(())
}

fn scorer_config(seed: Option<u64>) -> Result<ScorerConfig, AppError> {
    let config = AppConfig::load()?.scorer;
    Ok(match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

pub(crate) fn sample_roster() -> Result<(Vec<Candidate>, Vec<Opportunity>), AppError> {
    let candidates =
        RosterImporter::candidates_from_reader(SAMPLE_CANDIDATES.as_bytes(), RosterFormat::Csv)?;
    let opportunities = RosterImporter::opportunities_from_reader(
        SAMPLE_OPPORTUNITIES.as_bytes(),
        RosterFormat::Csv,
    )?;
    Ok((candidates, opportunities))
}

pub(crate) fn render_run(
    scorer: ScorerConfig,
    candidates: &[Candidate],
    opportunities: &[Opportunity],
    format: OutputFormat,
) -> Result<String, AppError> {
    let outcome = MatchingRun::new(scorer).execute(candidates, opportunities)?;
    let summary = MatchingSummary::from_outcome(&outcome, candidates, opportunities);

    match format {
        OutputFormat::Table => render_table(&outcome, &summary, candidates, opportunities),
        OutputFormat::Json => render_json(outcome, summary),
        OutputFormat::Csv => render_csv(&outcome, candidates, opportunities),
    }
}

struct Directory<'a> {
    candidates: BTreeMap<&'a CandidateId, &'a Candidate>,
    opportunities: BTreeMap<&'a OpportunityId, &'a Opportunity>,
}

impl<'a> Directory<'a> {
    fn new(candidates: &'a [Candidate], opportunities: &'a [Opportunity]) -> Self {
        Self {
            candidates: candidates.iter().map(|c| (&c.id, c)).collect(),
            opportunities: opportunities.iter().map(|o| (&o.id, o)).collect(),
        }
    }

    fn candidate_name(&self, id: &CandidateId) -> &'a str {
        self.candidates
            .get(id)
            .map(|candidate| candidate.name.as_str())
            .unwrap_or("")
    }

    fn opportunity(&self, id: &OpportunityId) -> (&'a str, &'a str) {
        self.opportunities
            .get(id)
            .map(|opportunity| (opportunity.organization.as_str(), opportunity.role.as_str()))
            .unwrap_or(("", ""))
    }
}

fn render_table(
    outcome: &MatchingOutcome,
    summary: &MatchingSummary,
    candidates: &[Candidate],
    opportunities: &[Opportunity],
) -> Result<String, AppError> {
    let directory = Directory::new(candidates, opportunities);
    let mut out = String::new();
    write_table(&mut out, outcome, summary, &directory)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    Ok(out)
}

fn write_table(
    out: &mut impl fmt::Write,
    outcome: &MatchingOutcome,
    summary: &MatchingSummary,
    directory: &Directory<'_>,
) -> fmt::Result {
    writeln!(
        out,
        "\n{:<10} {:<18} {:<14} {:<18} {:>6} {:>6} {:>6} {:>6}",
        "Candidate", "Name", "Opportunity", "Organization", "Final", "Lex", "Rule", "Shape"
    )?;
    for edge in &outcome.matches {
        let (organization, _) = directory.opportunity(&edge.opportunity_id);
        writeln!(
            out,
            "{:<10} {:<18} {:<14} {:<18} {:>6.3} {:>6.3} {:>6.3} {:>6.3}",
            edge.candidate_id.0,
            directory.candidate_name(&edge.candidate_id),
            edge.opportunity_id.0,
            organization,
            edge.breakdown.final_score,
            edge.breakdown.lexical,
            edge.breakdown.rule_based,
            edge.breakdown.shape,
        )?;
    }

    writeln!(
        out,
        "\nPlaced {}/{} candidates ({:.0}%) | average score {:.3} | {} rural placements",
        summary.placed,
        summary.total_candidates,
        summary.placement_rate * 100.0,
        summary.average_score,
        summary.rural_placements
    )?;
    for fill in &summary.opportunity_fill {
        writeln!(
            out,
            "  - {} ({} / {}): {}/{} seats",
            fill.opportunity_id, fill.organization, fill.role, fill.filled, fill.capacity
        )?;
    }
    for excluded in &outcome.excluded_opportunities {
        writeln!(
            out,
            "  ! {} skipped: {}",
            excluded.opportunity_id, excluded.reason
        )?;
    }

    Ok(())
}

fn render_json(outcome: MatchingOutcome, summary: MatchingSummary) -> Result<String, AppError> {
    let response = MatchResponse {
        generated_at: Utc::now(),
        seed: outcome.seed,
        scored_pairs: outcome.scored_pairs,
        matches: outcome.matches,
        excluded_opportunities: outcome.excluded_opportunities,
        summary,
    };
    let mut rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
    rendered.push('\n');
    Ok(rendered)
}

#[derive(Debug, Serialize)]
struct AssignmentRow<'a> {
    candidate_id: &'a str,
    candidate_name: &'a str,
    opportunity_id: &'a str,
    organization: &'a str,
    role: &'a str,
    final_score: f64,
    lexical: f64,
    rule_based: f64,
    shape: f64,
}

impl<'a> AssignmentRow<'a> {
    fn new(edge: &'a ScoredEdge, directory: &Directory<'a>) -> Self {
        let (organization, role) = directory.opportunity(&edge.opportunity_id);
        Self {
            candidate_id: &edge.candidate_id.0,
            candidate_name: directory.candidate_name(&edge.candidate_id),
            opportunity_id: &edge.opportunity_id.0,
            organization,
            role,
            final_score: edge.breakdown.final_score,
            lexical: edge.breakdown.lexical,
            rule_based: edge.breakdown.rule_based,
            shape: edge.breakdown.shape,
        }
    }
}

fn render_csv(
    outcome: &MatchingOutcome,
    candidates: &[Candidate],
    opportunities: &[Opportunity],
) -> Result<String, AppError> {
    let directory = Directory::new(candidates, opportunities);
    let mut writer = csv::Writer::from_writer(Vec::new());

    if outcome.matches.is_empty() {
        writer
            .write_record([
                "candidate_id",
                "candidate_name",
                "opportunity_id",
                "organization",
                "role",
                "final_score",
                "lexical",
                "rule_based",
                "shape",
            ])
            .map_err(std::io::Error::from)?;
    }
    for edge in &outcome.matches {
        writer
            .serialize(AssignmentRow::new(edge, &directory))
            .map_err(std::io::Error::from)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

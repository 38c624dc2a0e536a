use crate::infra::{
    deadlines_within, default_freshness_config, seed_records, InMemoryExportDispatcher,
    SeededProgramSource,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use subsidy_companion::error::AppError;
use subsidy_companion::programs::catalog::{
    card_view, deadline_view, derive_stats, filter_and_sort, CatalogQuery, CompanionService,
    DeadlineViewModel, ProgramCardView, ProgramCsvImporter,
};
use subsidy_companion::programs::domain::{ProgramRecord, ProgramStats, SortKey};
use subsidy_companion::programs::eligibility::{
    assemble_pack, evaluate, AnswerField, EligibilityAnswers, EligibilityView, ExportMethod,
    PackExportRequest, SubmissionPack,
};
use subsidy_companion::programs::practices::PracticeCatalog;
use subsidy_companion::wizard::{Page, SubmissionView, WizardSession};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the evaluation date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Optional program catalog CSV to hydrate the demo instead of seed data.
    #[arg(long)]
    pub(crate) programs_csv: Option<PathBuf>,
    /// Skip the pack export portion of the demo.
    #[arg(long)]
    pub(crate) skip_export: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BrowseArgs {
    /// Case-insensitive term matched against title, summary, and category.
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Restrict results to a single country (exact match, "all" disables).
    #[arg(long)]
    pub(crate) country: Option<String>,
    /// Sort order: deadline, priority, or newest.
    #[arg(long, value_parser = crate::infra::parse_sort)]
    pub(crate) sort: Option<SortKey>,
    /// Optional program catalog CSV instead of seed data.
    #[arg(long)]
    pub(crate) programs_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DeadlinesArgs {
    /// Look-ahead window in days.
    #[arg(long, default_value_t = 30)]
    pub(crate) days: u32,
    /// Evaluation date for the board (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Optional program catalog CSV instead of seed data.
    #[arg(long)]
    pub(crate) programs_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityCheckArgs {
    /// What the operation produces, for example "Row crops" or "Dairy".
    #[arg(long)]
    pub(crate) operation: String,
    /// Operation scale, for example "320 acres".
    #[arg(long)]
    pub(crate) scale: String,
    /// Territory code or country name, for example us-iowa or canada-alberta.
    #[arg(long)]
    pub(crate) location: String,
    /// Planned practice, for example cover-crops.
    #[arg(long)]
    pub(crate) practice: String,
    /// Land control status (owned, leased, or other).
    #[arg(long)]
    pub(crate) land_control: Option<String>,
    /// Compliance records identifier, if the operation has one.
    #[arg(long)]
    pub(crate) compliance_id: Option<String>,
    /// Assemble and print the full submission pack.
    #[arg(long)]
    pub(crate) pack: bool,
}

pub(crate) fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let BrowseArgs {
        search,
        country,
        sort,
        programs_csv,
    } = args;

    let today = Local::now().date_naive();
    let (records, imported) = load_records_from_path(programs_csv, today)?;
    let query = CatalogQuery {
        search: search.unwrap_or_default(),
        country,
        sort: sort.unwrap_or_default(),
    };
    let matches = filter_and_sort(&records, &query);

    render_source_note(imported, records.len());
    if matches.is_empty() {
        println!("No programs match the current filters.");
        return Ok(());
    }

    println!("{} program(s), sorted by {}", matches.len(), query.sort.label());
    for record in &matches {
        render_program_card(&card_view(record));
    }

    Ok(())
}

pub(crate) fn run_deadlines(args: DeadlinesArgs) -> Result<(), AppError> {
    let DeadlinesArgs {
        days,
        today,
        programs_csv,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let (records, imported) = load_records_from_path(programs_csv, today)?;

    render_source_note(imported, records.len());
    let board = deadline_board_for(&records, days, today);
    render_deadline_board(&board, days);

    render_stats(&derive_stats(&records, today));

    Ok(())
}

pub(crate) fn run_eligibility_check(args: EligibilityCheckArgs) -> Result<(), AppError> {
    let EligibilityCheckArgs {
        operation,
        scale,
        location,
        practice,
        land_control,
        compliance_id,
        pack,
    } = args;

    let answers = EligibilityAnswers {
        operation,
        scale,
        location,
        practice,
        land_control: land_control.unwrap_or_default(),
        compliance_id: compliance_id.unwrap_or_default(),
    };

    match evaluate(&answers) {
        None => println!(
            "Screen incomplete. Missing answers: {}",
            answers.missing().join(", ")
        ),
        Some(result) => {
            render_eligibility_result(&result.to_view());
            if pack {
                let catalog = PracticeCatalog::standard();
                render_submission_pack(&assemble_pack(&answers, &result, &catalog));
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        programs_csv,
        skip_export,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    println!("Subsidy companion demo (evaluated {today})");

    let (records, imported) = load_records_from_path(programs_csv, today)?;
    render_source_note(imported, records.len());

    println!("\nHighest priority programs");
    let query = CatalogQuery::sorted(SortKey::Priority);
    for record in filter_and_sort(&records, &query).iter().take(4) {
        render_program_card(&card_view(record));
    }

    let board = deadline_board_for(&records, 30, today);
    println!("\nDeadline board (next 30 days)");
    render_deadline_board(&board, 30);

    render_stats(&derive_stats(&records, today));

    println!("\nWizard walkthrough");
    let mut session = WizardSession::new();
    session.go_to(Page::Eligibility);
    session.answer(AnswerField::Operation, "Row crops");
    session.answer(AnswerField::Scale, "320 acres");
    session.answer(AnswerField::Location, "us-iowa");
    session.answer(AnswerField::Practice, "cover crops");
    session.answer(AnswerField::LandControl, "Owned");

    for tip in session.tips(board.len()) {
        println!("- assistant: {tip}");
    }

    let Some(result) = session.evaluation() else {
        println!("Screen incomplete; the canned demo answers should never do this.");
        return Ok(());
    };
    render_eligibility_result(&result.to_view());

    session.go_to(Page::Submission);
    let catalog = PracticeCatalog::standard();
    match session.submission_view(&catalog) {
        SubmissionView::Ready(pack) => render_submission_pack(&pack),
        SubmissionView::Empty { prompt, .. } => println!("{prompt}"),
    }

    if skip_export {
        return Ok(());
    }

    println!("\nPack export");
    let dispatcher = Arc::new(InMemoryExportDispatcher::default());
    let service = Arc::new(CompanionService::new(
        Arc::new(SeededProgramSource::default()),
        dispatcher.clone(),
        default_freshness_config(),
    ));

    let request = PackExportRequest {
        method: ExportMethod::Email,
        contact: Some("farm@example.org".to_string()),
        program: Some(result.program.to_string()),
    };
    match service.export(request) {
        Ok(receipt) => println!("- queued {} export '{}'", receipt.method_label, receipt.subject),
        Err(err) => println!("- export rejected: {err}"),
    }

    let jobs = dispatcher.jobs();
    if jobs.is_empty() {
        println!("- dispatch queue: empty");
    } else {
        println!("- dispatch queue:");
        for job in jobs {
            let destination = job
                .contact
                .unwrap_or_else(|| "local output".to_string());
            println!("  - '{}' -> {}", job.subject, destination);
        }
    }

    Ok(())
}

pub(crate) fn load_records_from_path(
    programs_csv: Option<PathBuf>,
    today: NaiveDate,
) -> Result<(Vec<ProgramRecord>, bool), AppError> {
    match programs_csv {
        Some(path) => ProgramCsvImporter::from_path(path)
            .map(|records| (records, true))
            .map_err(AppError::from),
        None => Ok((seed_records(today), false)),
    }
}

fn deadline_board_for(records: &[ProgramRecord], days: u32, today: NaiveDate) -> Vec<DeadlineViewModel> {
    deadlines_within(records, days, today)
        .iter()
        .map(|record| deadline_view(record, today))
        .collect()
}

fn render_source_note(imported: bool, count: usize) {
    if imported {
        println!("Data source: catalog CSV import ({count} records)");
    } else {
        println!("Data source: seeded catalog ({count} records)");
    }
}

fn render_program_card(card: &ProgramCardView) {
    let priority_note = if card.high_priority { " [high priority]" } else { "" };
    println!("- {}{}", card.title, priority_note);
    println!(
        "  {} | {} | deadline {} | funding {}",
        card.country, card.category, card.deadline_display, card.funding_display
    );
    println!("  {} | {}", card.location_display, card.url);
}

fn render_deadline_board(board: &[DeadlineViewModel], days: u32) {
    if board.is_empty() {
        println!("No deadlines inside the next {days} days.");
        return;
    }

    for row in board {
        println!(
            "- {} | {} | {} | in {} day(s) | {} | {}",
            row.date_display, row.program, row.kind_label, row.days_until, row.status_label,
            row.location_display
        );
    }
}

fn render_stats(stats: &ProgramStats) {
    println!("\nCatalog stats");
    println!(
        "- {} programs | {} active | {} expired | {} high priority | {} deadlines next month",
        stats.total_programs,
        stats.active_programs,
        stats.expired_programs,
        stats.high_priority,
        stats.upcoming_deadlines
    );
    let countries: Vec<String> = stats
        .by_country
        .iter()
        .map(|(country, count)| format!("{country} {count}"))
        .collect();
    if !countries.is_empty() {
        println!("- by country: {}", countries.join(", "));
    }
}

fn render_eligibility_result(view: &EligibilityView) {
    println!("\nEligibility screen");
    println!("- result: {} | program: {}", view.eligible_label, view.program);
    println!(
        "- cost share {} | payment cap {} | {} next: {}",
        view.cost_share, view.cap, view.rule_type_label, view.next_date
    );
    println!("- documents to gather:");
    for item in &view.checklist {
        println!("  - {item}");
    }
}

fn render_submission_pack(pack: &SubmissionPack) {
    println!("\nSubmission pack ({})", pack.country_label);
    println!(
        "- {} via {}",
        pack.eligibility.program, pack.practice_name
    );
    println!("- plan:");
    for step in &pack.practice_plan {
        println!("  - {step}");
    }
    if pack.actions_enabled {
        println!("- plan actions: enabled");
    } else {
        println!("- plan actions: answer the optional questions to enable");
    }
}

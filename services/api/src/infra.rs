use chrono::{Duration, Local, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use subsidy_companion::programs::catalog::{
    derive_stats, FreshnessConfig, ProgramSource, SourceError,
};
use subsidy_companion::programs::domain::{ProgramRecord, ProgramStats, SortKey};
use subsidy_companion::programs::eligibility::{ExportDispatcher, ExportError, ExportJob};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog source backed by a fixed record set, standing in for the remote
/// aggregation feed. Deadline offsets pivot on the construction date so the
/// board stays populated no matter when the service starts.
#[derive(Clone)]
pub(crate) struct SeededProgramSource {
    records: Vec<ProgramRecord>,
    today: NaiveDate,
}

impl Default for SeededProgramSource {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            records: seed_records(today),
            today,
        }
    }
}

impl ProgramSource for SeededProgramSource {
    fn fetch_programs(&self) -> Result<Vec<ProgramRecord>, SourceError> {
        Ok(self.records.clone())
    }

    fn fetch_deadlines_soon(&self, days: u32) -> Result<Vec<ProgramRecord>, SourceError> {
        Ok(deadlines_within(&self.records, days, self.today))
    }

    fn fetch_stats(&self) -> Result<ProgramStats, SourceError> {
        Ok(derive_stats(&self.records, self.today))
    }

    fn fetch_high_priority(&self) -> Result<Vec<ProgramRecord>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.is_high_priority)
            .cloned()
            .collect())
    }
}

/// Records whose deadline falls after `today` and inside the window, soonest
/// first. Expired and open-ended records never appear on the board.
pub(crate) fn deadlines_within(
    records: &[ProgramRecord],
    days: u32,
    today: NaiveDate,
) -> Vec<ProgramRecord> {
    let mut upcoming: Vec<ProgramRecord> = records
        .iter()
        .filter(|record| {
            record.deadline.is_some_and(|deadline| {
                let span = (deadline - today).num_days();
                span > 0 && span <= i64::from(days)
            })
        })
        .cloned()
        .collect();
    upcoming.sort_by_key(|record| record.deadline);
    upcoming
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryExportDispatcher {
    jobs: Arc<Mutex<Vec<ExportJob>>>,
}

impl ExportDispatcher for InMemoryExportDispatcher {
    fn dispatch(&self, job: ExportJob) -> Result<(), ExportError> {
        let mut guard = self.jobs.lock().expect("export mutex poisoned");
        guard.push(job);
        Ok(())
    }
}

impl InMemoryExportDispatcher {
    pub(crate) fn jobs(&self) -> Vec<ExportJob> {
        self.jobs.lock().expect("export mutex poisoned").clone()
    }
}

pub(crate) fn default_freshness_config() -> FreshnessConfig {
    FreshnessConfig {
        programs_window: Duration::minutes(10),
        deadlines_window: Duration::minutes(15),
        stats_window: Duration::minutes(30),
        high_priority_window: Duration::minutes(15),
    }
}

pub(crate) fn seed_records(today: NaiveDate) -> Vec<ProgramRecord> {
    vec![
        ProgramRecord {
            id: "usda-eqip-general".to_string(),
            title: "Environmental Quality Incentives Program (EQIP)".to_string(),
            summary: "Cost share for conservation practices on working farmland, from cover crops to irrigation upgrades.".to_string(),
            category: "Conservation".to_string(),
            published_date: today - Duration::days(90),
            url: "https://www.nrcs.usda.gov/programs-initiatives/eqip".to_string(),
            funding_amount: Some("Up to $450,000 per contract".to_string()),
            deadline: Some(today + Duration::days(82)),
            location: Some("All states".to_string()),
            data_source: "usda_nrcs".to_string(),
            source_agency: Some("USDA Natural Resources Conservation Service".to_string()),
            country: "US".to_string(),
            region: None,
            opportunity_number: Some("USDA-NRCS-EQIP-2026".to_string()),
            is_high_priority: true,
        },
        ProgramRecord {
            id: "usda-csp-renewal".to_string(),
            title: "Conservation Stewardship Program (CSP)".to_string(),
            summary: "Annual payments for maintaining and improving existing conservation systems across the whole operation.".to_string(),
            category: "Conservation".to_string(),
            published_date: today - Duration::days(60),
            url: "https://www.nrcs.usda.gov/programs-initiatives/csp".to_string(),
            funding_amount: Some("Average $4,000 per year".to_string()),
            deadline: Some(today + Duration::days(130)),
            location: Some("All states".to_string()),
            data_source: "usda_nrcs".to_string(),
            source_agency: Some("USDA Natural Resources Conservation Service".to_string()),
            country: "US".to_string(),
            region: None,
            opportunity_number: None,
            is_high_priority: false,
        },
        ProgramRecord {
            id: "usda-reap-energy".to_string(),
            title: "Rural Energy for America Program (REAP)".to_string(),
            summary: "Grants and guaranteed loans for renewable energy systems and energy efficiency improvements.".to_string(),
            category: "Energy".to_string(),
            published_date: today - Duration::days(45),
            url: "https://www.rd.usda.gov/programs-services/energy-programs".to_string(),
            funding_amount: Some("25% of total project cost".to_string()),
            deadline: Some(today + Duration::days(12)),
            location: Some("Rural areas".to_string()),
            data_source: "usda_rd".to_string(),
            source_agency: Some("USDA Rural Development".to_string()),
            country: "US".to_string(),
            region: None,
            opportunity_number: Some("RD-RBS-REAP-2026".to_string()),
            is_high_priority: false,
        },
        ProgramRecord {
            id: "usda-crp-continuous".to_string(),
            title: "Conservation Reserve Program (CRP) Continuous Signup".to_string(),
            summary: "Rental payments for taking environmentally sensitive land out of production under long-term contracts.".to_string(),
            category: "Conservation".to_string(),
            published_date: today - Duration::days(200),
            url: "https://www.fsa.usda.gov/programs-and-services/conservation-programs/conservation-reserve-program".to_string(),
            funding_amount: None,
            deadline: None,
            location: None,
            data_source: "usda_fsa".to_string(),
            source_agency: Some("USDA Farm Service Agency".to_string()),
            country: "US".to_string(),
            region: None,
            opportunity_number: None,
            is_high_priority: false,
        },
        ProgramRecord {
            id: "aafc-agriinvest".to_string(),
            title: "Canadian Agricultural Partnership (CAP) - AgriInvest".to_string(),
            summary: "Matched savings account for managing income declines and funding on-farm investments.".to_string(),
            category: "Risk management".to_string(),
            published_date: today - Duration::days(30),
            url: "https://agriculture.canada.ca/en/programs/agriinvest".to_string(),
            funding_amount: Some("1% matched government contribution".to_string()),
            deadline: Some(today + Duration::days(128)),
            location: None,
            data_source: "aafc".to_string(),
            source_agency: Some("Agriculture and Agri-Food Canada".to_string()),
            country: "Canada".to_string(),
            region: Some("All provinces".to_string()),
            opportunity_number: None,
            is_high_priority: true,
        },
        ProgramRecord {
            id: "daff-smart-farms-r8".to_string(),
            title: "Smart Farms Small Grants Round 8".to_string(),
            summary: "Grants for adopting land management practices that improve soil, vegetation, and biodiversity.".to_string(),
            category: "Soils".to_string(),
            published_date: today - Duration::days(20),
            url: "https://www.agriculture.gov.au/agriculture-land/farm-food-drought/natural-resources/landcare/smart-farms".to_string(),
            funding_amount: Some("AUD 5,000 to 100,000".to_string()),
            deadline: Some(today + Duration::days(25)),
            location: None,
            data_source: "daff_au".to_string(),
            source_agency: Some("Department of Agriculture, Fisheries and Forestry".to_string()),
            country: "Australia".to_string(),
            region: None,
            opportunity_number: None,
            is_high_priority: false,
        },
        ProgramRecord {
            id: "mpi-sff-futures".to_string(),
            title: "Sustainable Food and Fibre Futures".to_string(),
            summary: "Co-investment in projects that improve productivity and sustainability across the primary sector.".to_string(),
            category: "Innovation".to_string(),
            published_date: today - Duration::days(75),
            url: "https://www.mpi.govt.nz/funding-rural-support/sustainable-food-fibre-futures/".to_string(),
            funding_amount: Some("Up to 40% co-investment".to_string()),
            deadline: None,
            location: None,
            data_source: "mpi_nz".to_string(),
            source_agency: Some("Ministry for Primary Industries".to_string()),
            country: "New Zealand".to_string(),
            region: None,
            opportunity_number: None,
            is_high_priority: false,
        },
        ProgramRecord {
            id: "mapa-abc-plus".to_string(),
            title: "Plano ABC+ Credit Lines".to_string(),
            summary: "Subsidized credit for low-carbon agriculture, pasture recovery, and no-till systems.".to_string(),
            category: "Climate".to_string(),
            published_date: today - Duration::days(15),
            url: "https://www.gov.br/agricultura/pt-br/assuntos/sustentabilidade/planoabc-abcmais".to_string(),
            funding_amount: None,
            deadline: Some(today + Duration::days(40)),
            location: None,
            data_source: "mapa_br".to_string(),
            source_agency: Some("Ministry of Agriculture and Livestock".to_string()),
            country: "Brazil".to_string(),
            region: None,
            opportunity_number: None,
            is_high_priority: false,
        },
        ProgramRecord {
            id: "indap-sirsd-s".to_string(),
            title: "Sistema de Incentivos para la Sustentabilidad Agroambiental (SIRSD-S)".to_string(),
            summary: "Incentives for recovering degraded soils and sustaining agri-environmental improvements.".to_string(),
            category: "Soils".to_string(),
            published_date: today - Duration::days(10),
            url: "https://www.indap.gob.cl/programas/sirsd-s".to_string(),
            funding_amount: None,
            deadline: Some(today + Duration::days(8)),
            location: None,
            data_source: "indap_cl".to_string(),
            source_agency: Some("Instituto de Desarrollo Agropecuario".to_string()),
            country: "Chile".to_string(),
            region: None,
            opportunity_number: None,
            is_high_priority: false,
        },
        ProgramRecord {
            id: "usda-vapg-closed".to_string(),
            title: "Value-Added Producer Grants".to_string(),
            summary: "Working capital and planning grants for processing and marketing value-added products.".to_string(),
            category: "Marketing".to_string(),
            published_date: today - Duration::days(120),
            url: "https://www.rd.usda.gov/programs-services/business-programs/value-added-producer-grants".to_string(),
            funding_amount: Some("Up to $250,000 working capital".to_string()),
            deadline: Some(today - Duration::days(21)),
            location: Some("All states".to_string()),
            data_source: "usda_rd".to_string(),
            source_agency: Some("USDA Rural Development".to_string()),
            country: "US".to_string(),
            region: None,
            opportunity_number: None,
            is_high_priority: false,
        },
    ]
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortKey, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "deadline" => Ok(SortKey::Deadline),
        "priority" => Ok(SortKey::Priority),
        "newest" => Ok(SortKey::Newest),
        other => Err(format!(
            "unknown sort key '{other}' (expected deadline, priority, or newest)"
        )),
    }
}

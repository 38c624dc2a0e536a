use serde::{Deserialize, Serialize};

use super::super::domain::{ProgramRecord, SortKey};

/// Search, country filter, and sort order for a catalog browse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Self::default()
        }
    }

    pub fn sorted(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }
}

/// Apply search, country filter, and sort in one pass over the cached list.
///
/// All sorts are stable, so ties keep the upstream order. A missing deadline
/// sorts after every concrete date rather than first.
pub fn filter_and_sort(records: &[ProgramRecord], query: &CatalogQuery) -> Vec<ProgramRecord> {
    let needle = query.search.trim().to_lowercase();

    let mut matched: Vec<ProgramRecord> = records
        .iter()
        .filter(|record| {
            matches_search(record, &needle) && matches_country(record, query.country.as_deref())
        })
        .cloned()
        .collect();

    match query.sort {
        SortKey::Deadline => {
            matched.sort_by_key(|record| (record.deadline.is_none(), record.deadline));
        }
        SortKey::Priority => {
            matched.sort_by_key(|record| !record.is_high_priority);
        }
        SortKey::Newest => {
            matched.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        }
    }

    matched
}

fn matches_search(record: &ProgramRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [&record.title, &record.summary, &record.category]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_country(record: &ProgramRecord, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(country) if country.is_empty() || country == "all" => true,
        Some(country) => record.country == country,
    }
}

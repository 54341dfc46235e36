use serde::{Deserialize, Serialize};

/// Which products a `GetProducts` call asks for.
///
/// Exactly one branch runs per call. Callers holding the loose
/// `(ids, query, skip, take)` shape go through [`ProductQuery::from_parts`],
/// which applies the precedence: a non-empty query searches, else non-empty ids
/// fetch by id, else a page is scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductQuery {
    BySearch { query: String, skip: u64, take: u64 },
    ByIds { ids: Vec<String> },
    Page { skip: u64, take: u64 },
}

impl ProductQuery {
    pub fn from_parts(ids: Vec<String>, query: impl Into<String>, skip: u64, take: u64) -> Self {
        let query = query.into();
        if !query.is_empty() {
            Self::BySearch { query, skip, take }
        } else if !ids.is_empty() {
            Self::ByIds { ids }
        } else {
            Self::Page { skip, take }
        }
    }

    /// Fetch exactly these ids, dropping duplicates while keeping first-seen order.
    pub fn by_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self::ByIds { ids: unique }
    }

    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BySearch { .. } => "search",
            Self::ByIds { .. } => "ids",
            Self::Page { .. } => "page",
        }
    }
}

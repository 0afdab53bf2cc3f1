//! Filtering and pagination of list screens.
//!
//! The backend may page and filter a collection itself (when it answers
//! with an envelope) or return the whole collection as a bare array, in
//! which case the same query is applied here in memory.

use serde::{Deserialize, Serialize};

use crate::models::{busqueda_valida, MIN_LONGITUD_BUSQUEDA};

pub const DEFAULT_PER_PAGE: u32 = 10;

/// Types that can be matched by the search box of a list screen.
pub trait Searchable {
    /// Text fields the search box looks into.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, query: &str) -> bool {
        let needle = normalize(query);
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| normalize(field).contains(&needle))
    }
}

/// Lowercase and strip Spanish accents so `café` matches `CAFE`.
pub fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(query)).collect()
}

/// Query forwarded to list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            q: None,
            page: Some(page),
            per_page: Some(DEFAULT_PER_PAGE),
        }
    }

    /// Text shorter than [`MIN_LONGITUD_BUSQUEDA`] means no filter.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.q = busqueda_valida(&q).then_some(q);
        self
    }

    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1)
    }
}

/// One page of a list screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        let per_page = u64::from(self.per_page.max(1));
        (self.total.div_ceil(per_page)).max(1) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based index range of the rows shown, for "11-20 de 45" labels.
    pub fn range(&self) -> (u64, u64) {
        if self.items.is_empty() {
            return (0, 0);
        }
        let start = u64::from(self.page - 1) * u64::from(self.per_page) + 1;
        (start, start + self.items.len() as u64 - 1)
    }
}

/// Slice a full collection into one page. Pages past the end clamp to the
/// last page.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len() as u64;
    let last_page = (total.div_ceil(u64::from(per_page))).max(1) as u32;
    let page = page.clamp(1, last_page);

    let start = ((page - 1) * per_page) as usize;
    let items = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
    }
}

/// What a list endpoint answers: either a paged envelope or every row.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged {
        data: Vec<T>,
        total: u64,
        page: u32,
        per_page: u32,
    },
    Bare(Vec<T>),
}

impl<T: Searchable> ListResponse<T> {
    /// Resolve into a page. Bare arrays are filtered and paged here.
    pub fn into_page(self, query: &ListQuery) -> Page<T> {
        match self {
            ListResponse::Paged {
                data,
                total,
                page,
                per_page,
            } => Page {
                items: data,
                page: page.max(1),
                per_page: per_page.max(1),
                total,
            },
            ListResponse::Bare(items) => {
                let needle = query.q.clone().unwrap_or_default();
                let filtered: Vec<T> = items.into_iter().filter(|i| i.matches(&needle)).collect();
                paginate(filtered, query.page_number(), query.per_page())
            }
        }
    }
}

impl<T> ListResponse<T> {
    /// Every row the server returned, ignoring any paging metadata.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paged { data, .. } => data,
            ListResponse::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        nombre: String,
        codigo: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.nombre.as_str(), self.codigo.as_str()]
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n)
            .map(|i| Row {
                nombre: format!("Producto {}", i),
                codigo: format!("P{:03}", i),
            })
            .collect()
    }

    #[test]
    fn test_matches_ignores_case_and_accents() {
        let row = Row {
            nombre: "Café Molido".into(),
            codigo: "CAF-1".into(),
        };
        assert!(row.matches("cafe"));
        assert!(row.matches("MOLIDO"));
        assert!(row.matches("caf-1"));
        assert!(row.matches("   "));
        assert!(!row.matches("azucar"));
    }

    #[test]
    fn test_filter_returns_matching_rows() {
        let data = rows(12);
        let found = filter(&data, "producto 1");
        let names: Vec<_> = found.iter().map(|r| r.nombre.as_str()).collect();
        assert_eq!(names, vec!["Producto 1", "Producto 10", "Producto 11", "Producto 12"]);
    }

    #[test]
    fn test_paginate() {
        let page = paginate(rows(25), 2, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].codigo, "P011");
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.range(), (11, 20));
    }

    #[test]
    fn test_paginate_clamps_out_of_range_page() {
        let page = paginate(rows(25), 9, 10);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 5);

        let page = paginate(rows(25), 0, 10);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate(Vec::<Row>::new(), 1, 10);
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.range(), (0, 0));
        assert!(!page.has_next());
    }

    #[test]
    fn test_bare_response_is_filtered_locally() {
        let body = serde_json::to_string(
            &rows(15)
                .into_iter()
                .map(|r| serde_json::json!({ "nombre": r.nombre, "codigo": r.codigo }))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let response: ListResponse<Row> = serde_json::from_str(&body).unwrap();

        let page = response.into_page(&ListQuery::page(1).with_search("producto 1"));
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 7);
    }

    #[test]
    fn test_paged_envelope_is_trusted() {
        let body = r#"{"data":[{"nombre":"A","codigo":"1"}],"total":31,"page":4,"per_page":10}"#;
        let response: ListResponse<Row> = serde_json::from_str(body).unwrap();

        let page = response.into_page(&ListQuery::page(4).with_search("zzz"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 31);
        assert_eq!(page.page, 4);
        assert_eq!(page.total_pages(), 4);
    }

    #[test]
    fn test_short_search_is_not_a_filter() {
        assert_eq!(ListQuery::page(1).with_search("a").q, None);
        assert_eq!(ListQuery::page(1).with_search(" é ").q, None);
        assert_eq!(ListQuery::page(1).with_search("té").q.as_deref(), Some("té"));
    }

    #[test]
    fn test_list_query_serializes_only_present_fields() {
        let q = ListQuery::default().with_search("  ");
        assert_eq!(serde_json::to_string(&q).unwrap(), "{}");

        let q = ListQuery::page(2).with_search("leche");
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            serde_json::json!({ "q": "leche", "page": 2, "per_page": 10 })
        );
    }
}

//! Expense Listing
//!
//! Maps backend expenses to display rows (pl-PL dates, category names
//! joined from the category cache) and builds the list query.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::api::dto::{Category, ExpenseDto, ExpenseList, Pagination};
use crate::api::{ApiClient, ApiError};

pub const UNKNOWN_CATEGORY: &str = "Nieznana kategoria";
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpenseError {
    #[error("Kwota minimalna nie może być ujemna")]
    NegativeAmount,

    #[error("Kwota minimalna nie może być większa od maksymalnej")]
    AmountRange,

    #[error("Data początkowa nie może być późniejsza niż końcowa")]
    DateRange,

    #[error("Nie udało się pobrać wydatków")]
    Fetch(#[source] ApiError),
}

/// Expense row as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseView {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category_id: String,
    /// `DD.MM.YYYY`
    pub date: String,
    /// Original ISO value
    pub datetime: String,
    pub created_at: String,
    pub category_name: String,
}

impl ExpenseView {
    pub fn from_dto(dto: ExpenseDto, categories: &[Category]) -> Self {
        let category_name = categories
            .iter()
            .find(|c| c.id == dto.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        Self {
            id: dto.id,
            amount: dto.amount,
            description: dto.description.unwrap_or_default(),
            date: display_date(&dto.date_of_expense),
            datetime: dto.date_of_expense,
            category_id: dto.category_id,
            created_at: dto.created_at,
            category_name,
        }
    }
}

/// `2024-03-05T10:00:00Z` → `05.03.2024`; unparseable input is returned as is
pub fn display_date(iso: &str) -> String {
    parse_date(iso)
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| iso.to_string())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// List filters; `None` fields are omitted from the query
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFilter {
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ExpenseFilter {
    fn default() -> Self {
        Self {
            search: None,
            date_from: None,
            date_to: None,
            amount_min: None,
            amount_max: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ExpenseFilter {
    /// Move to a 1-based page; offsets past `u32::MAX` stick at the maximum
    pub fn page(mut self, page: u32) -> Self {
        self.offset = page.saturating_sub(1).saturating_mul(self.effective_limit());
        self
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.amount_min.is_some_and(|min| min < 0.0) {
            return Err(ExpenseError::NegativeAmount);
        }
        if let (Some(min), Some(max)) = (self.amount_min, self.amount_max) {
            if min > max {
                return Err(ExpenseError::AmountRange);
            }
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(ExpenseError::DateRange);
            }
        }
        Ok(())
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.effective_limit().to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(from) = self.date_from {
            params.push(("date_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            params.push(("date_to", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(min) = self.amount_min {
            params.push(("amount_min", min.to_string()));
        }
        if let Some(max) = self.amount_max {
            params.push(("amount_max", max.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub limit: u32,
    pub offset: u32,
    pub total: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

impl From<Pagination> for PaginationView {
    fn from(p: Pagination) -> Self {
        let limit = p.limit.max(1);
        Self {
            limit: p.limit,
            offset: p.offset,
            total: p.total,
            current_page: p.offset / limit + 1,
            total_pages: p.total.div_ceil(limit).max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensePage {
    pub expenses: Vec<ExpenseView>,
    pub pagination: PaginationView,
}

/// Fetch one page of expenses
pub async fn list_expenses(
    api: &ApiClient,
    filter: &ExpenseFilter,
    categories: &[Category],
) -> Result<ExpensePage, ExpenseError> {
    filter.validate()?;

    let list: ExpenseList = api
        .get_with_query("/expenses", &filter.to_query())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch expenses");
            ExpenseError::Fetch(e)
        })?;

    tracing::debug!(count = list.data.len(), total = list.pagination.total, "Expenses fetched");
    Ok(ExpensePage {
        expenses: list
            .data
            .into_iter()
            .map(|dto| ExpenseView::from_dto(dto, categories))
            .collect(),
        pagination: list.pagination.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn dto(category_id: &str, date: &str) -> ExpenseDto {
        ExpenseDto {
            id: "e1".to_string(),
            amount: 42.5,
            description: None,
            category_id: category_id.to_string(),
            date_of_expense: date.to_string(),
            created_at: "2024-03-05T10:00:00Z".to_string(),
        }
    }

    fn categories() -> Vec<Category> {
        vec![Category {
            id: "c1".to_string(),
            name: "Jedzenie".to_string(),
            is_default: true,
        }]
    }

    #[test]
    fn test_mapping_joins_category_and_formats_date() {
        let view = ExpenseView::from_dto(dto("c1", "2024-03-05T10:00:00Z"), &categories());
        assert_eq!(view.category_name, "Jedzenie");
        assert_eq!(view.date, "05.03.2024");
        assert_eq!(view.datetime, "2024-03-05T10:00:00Z");
        assert_eq!(view.description, "");
    }

    #[test]
    fn test_unknown_category_and_odd_dates() {
        let view = ExpenseView::from_dto(dto("zz", "2024-12-31"), &categories());
        assert_eq!(view.category_name, "Nieznana kategoria");
        assert_eq!(view.date, "31.12.2024");

        assert_eq!(display_date("2024-01-02T03:04:05.123"), "02.01.2024");
        assert_eq!(display_date("wczoraj"), "wczoraj");
    }

    #[test]
    fn test_filter_query_and_limits() {
        let filter = ExpenseFilter {
            search: Some("  kawa ".to_string()),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            amount_max: Some(50.0),
            limit: 500,
            ..ExpenseFilter::default()
        }
        .page(3);

        assert_eq!(
            filter.to_query(),
            vec![
                ("limit", "100".to_string()),
                ("offset", "200".to_string()),
                ("search", "kawa".to_string()),
                ("date_from", "2024-01-01".to_string()),
                ("amount_max", "50".to_string()),
            ]
        );

        let zero = ExpenseFilter {
            limit: 0,
            ..ExpenseFilter::default()
        };
        assert_eq!(zero.effective_limit(), 1);
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let filter = ExpenseFilter::default().page(u32::MAX);
        assert_eq!(filter.offset, u32::MAX);

        let first = ExpenseFilter::default().page(0);
        assert_eq!(first.offset, 0);
    }

    #[test]
    fn test_filter_validation() {
        let f = ExpenseFilter {
            amount_min: Some(-1.0),
            ..ExpenseFilter::default()
        };
        assert_eq!(f.validate(), Err(ExpenseError::NegativeAmount));

        let f = ExpenseFilter {
            amount_min: Some(10.0),
            amount_max: Some(5.0),
            ..ExpenseFilter::default()
        };
        assert_eq!(f.validate(), Err(ExpenseError::AmountRange));

        let f = ExpenseFilter {
            date_from: NaiveDate::from_ymd_opt(2024, 2, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..ExpenseFilter::default()
        };
        assert_eq!(f.validate(), Err(ExpenseError::DateRange));
    }

    #[test]
    fn test_pagination_view() {
        let view = PaginationView::from(Pagination {
            limit: 20,
            offset: 40,
            total: 45,
        });
        assert_eq!(view.current_page, 3);
        assert_eq!(view.total_pages, 3);

        let empty = PaginationView::from(Pagination {
            limit: 20,
            offset: 0,
            total: 0,
        });
        assert_eq!(empty.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_expenses() {
        let h = Harness::new();
        h.transport.respond(
            200,
            r#"{"data":[{"id":"e1","amount":"12.30","description":"Obiad","category_id":"c1",
                "date_of_expense":"2024-03-05T12:00:00Z","created_at":"2024-03-05T12:00:00Z"}],
                "pagination":{"limit":20,"offset":0,"total":1}}"#,
        );

        let page = list_expenses(&h.api, &ExpenseFilter::default(), &categories())
            .await
            .unwrap();

        assert_eq!(page.expenses.len(), 1);
        assert_eq!(page.expenses[0].amount, 12.3);
        assert_eq!(page.expenses[0].category_name, "Jedzenie");
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(
            h.transport.last_request().unwrap().url,
            "http://api.test/expenses?limit=20&offset=0"
        );
    }

    #[tokio::test]
    async fn test_list_expenses_rejects_invalid_filter_locally() {
        let h = Harness::new();
        let filter = ExpenseFilter {
            amount_min: Some(-5.0),
            ..ExpenseFilter::default()
        };
        let err = list_expenses(&h.api, &filter, &[]).await.unwrap_err();
        assert_eq!(err, ExpenseError::NegativeAmount);
        assert_eq!(h.transport.request_count(), 0);
    }
}

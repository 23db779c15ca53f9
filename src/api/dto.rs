//! Data Transfer Objects
//!
//! Wire types exchanged with the backend. Field names follow the
//! backend's snake_case JSON (plus the camelCase keys its auth
//! endpoints expect).

use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// CATEGORY DTOs
// ============================================

/// Category as returned by `GET /categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Create/update command for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
}

impl CategoryPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Onboarding suggestion from `GET /categories/initial-suggestions`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySuggestionDto {
    pub id: String,
    pub name: String,
    pub usage_count: u64,
}

// ============================================
// AUTH DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetConfirmRequest<'a> {
    pub token: &'a str,
    pub password: &'a str,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    #[serde(rename = "currentPassword")]
    pub current_password: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: &'a str,
}

/// `{status, token}` returned by login/register
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `{status: "ok"}` acknowledgement
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// Weekly summary from `GET /expenses/summary?period=weekly`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseSummary {
    #[serde(deserialize_with = "amount")]
    pub total_amount: f64,
    pub transaction_count: u64,
}

/// Single AI tip from `GET /ai/tips`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AiTip {
    pub message: String,
}

// ============================================
// EXPENSE DTOs
// ============================================

/// Expense as returned by `GET /expenses`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseDto {
    pub id: String,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: String,
    pub date_of_expense: String,
    pub created_at: String,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
    pub total: u32,
}

/// Paginated expense list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseList {
    pub data: Vec<ExpenseDto>,
    pub pagination: Pagination,
}

/// The backend serializes `Decimal` amounts either as numbers or strings
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_accepts_decimal_strings() {
        let s: ExpenseSummary =
            serde_json::from_str(r#"{"total_amount":"1234.50","transaction_count":3}"#).unwrap();
        assert_eq!(s.total_amount, 1234.5);
        assert_eq!(s.transaction_count, 3);

        let s: ExpenseSummary =
            serde_json::from_str(r#"{"total_amount":0,"transaction_count":0}"#).unwrap();
        assert_eq!(s.total_amount, 0.0);
    }

    #[test]
    fn test_summary_rejects_garbage_amount() {
        let r: Result<ExpenseSummary, _> =
            serde_json::from_str(r#"{"total_amount":"abc","transaction_count":0}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_category_default_flag_optional() {
        let c: Category = serde_json::from_str(r#"{"id":"1","name":"Jedzenie"}"#).unwrap();
        assert!(!c.is_default);
    }

    #[test]
    fn test_register_request_uses_backend_keys() {
        let body = serde_json::to_value(RegisterRequest {
            email: "a@b.pl",
            password: "secret123",
            password_confirm: "secret123",
        })
        .unwrap();
        assert_eq!(body["passwordConfirm"], "secret123");
    }
}

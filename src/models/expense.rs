use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Expense entity owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Expense {
    pub id: i32,
    pub name: String,
    pub amount: Decimal,
    #[serde(with = "expense_date_format")]
    #[schema(value_type = String, example = "15-01-2024")]
    pub date_of_expense: NaiveDate,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub belongs_to: i32,
}

/// Fields of an expense row to be inserted; ids and timestamps are
/// assigned by the database.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub name: String,
    pub amount: Decimal,
    pub date_of_expense: NaiveDate,
    pub belongs_to: i32,
}

/// Request payload for creating an expense.
///
/// Amount and date arrive as raw strings and are parsed by the service so
/// that malformed input maps to the API's 400 messages instead of a
/// deserialization rejection. Numeric JSON values are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "snacks",
    "amount": "12.23",
    "date_of_expense": "01-01-2021"
}))]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "loose_string_opt")]
    #[schema(value_type = String, example = "12.23")]
    pub amount: Option<String>,

    #[serde(default)]
    #[schema(example = "01-01-2021")]
    pub date_of_expense: Option<String>,
}

/// Request payload for updating an expense. All fields are optional, but
/// the service rejects an absent or empty name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "chargers",
    "amount": "200",
    "date_of_expense": "10-01-2021"
}))]
pub struct UpdateExpenseRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "loose_string_opt")]
    #[schema(value_type = String, example = "200")]
    pub amount: Option<String>,

    #[serde(default)]
    #[schema(example = "10-01-2021")]
    pub date_of_expense: Option<String>,
}

/// Confirmation returned by the delete endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Accepts either a JSON string or a JSON number, yielding its string form.
fn loose_string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// Serde adapter for the API's `DD-MM-YYYY` date representation
pub mod expense_date_format {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

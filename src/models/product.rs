use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{AppError, Result};

/// Closed set of product categories. `Unknown` is the fallback used
/// when a payload carries no recognizable category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }

    /// Resolve a category by its uppercase name. Unrecognized names
    /// resolve to `Unknown` rather than failing.
    pub fn from_name(name: &str) -> Category {
        match name {
            "CLOTHS" => Category::Cloths,
            "FOOD" => Category::Food,
            "HOUSEWARES" => Category::Housewares,
            "AUTOMOTIVE" => Category::Automotive,
            "TOOLS" => Category::Tools,
            _ => Category::Unknown,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_name(&value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            available: false,
            category: Category::Unknown,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Product {
    /// External payload for this product: exactly the six documented
    /// keys, with the price as its canonical decimal string.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.name(),
        })
    }

    /// Populate this product from an external payload. The `id` key is
    /// ignored: surrogate keys are assigned by the store, never taken
    /// from callers.
    pub fn deserialize(&mut self, data: &Value) -> Result<()> {
        let map = data.as_object().ok_or_else(|| {
            AppError::DataValidation("payload must be a JSON object".to_string())
        })?;

        self.name = require_string(map, "name")?;
        self.description = require_string(map, "description")?;
        self.available = parse_available(require_field(map, "available")?)?;
        self.price = parse_price(require_field(map, "price")?)?;
        // Lenient on purpose: a missing or unrecognized category means
        // Unknown, unlike the strict handling of available/price.
        self.category = match map.get("category").and_then(Value::as_str) {
            Some(name) => Category::from_name(name),
            None => Category::Unknown,
        };

        Ok(())
    }
}

/// A price as supplied by a caller: either an exact decimal or its
/// textual representation. Text is normalized before comparison so
/// both forms select the same rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceFilter {
    Value(Decimal),
    Text(String),
}

impl PriceFilter {
    pub fn normalize(&self) -> Result<Decimal> {
        match self {
            PriceFilter::Value(price) => Ok(*price),
            PriceFilter::Text(raw) => {
                let trimmed = raw.trim().trim_matches('"').trim();
                Decimal::from_str(trimmed).map_err(|_| {
                    AppError::DataValidation(format!("invalid price value: {}", raw))
                })
            }
        }
    }
}

impl From<Decimal> for PriceFilter {
    fn from(price: Decimal) -> Self {
        PriceFilter::Value(price)
    }
}

impl From<String> for PriceFilter {
    fn from(raw: String) -> Self {
        PriceFilter::Text(raw)
    }
}

impl From<&str> for PriceFilter {
    fn from(raw: &str) -> Self {
        PriceFilter::Text(raw.to_string())
    }
}

fn require_field<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    map.get(field)
        .ok_or_else(|| AppError::DataValidation(format!("missing required field: {}", field)))
}

fn require_string(map: &Map<String, Value>, field: &str) -> Result<String> {
    require_field(map, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| AppError::DataValidation(format!("field {} must be a string", field)))
}

fn parse_available(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(AppError::DataValidation(format!(
                "invalid boolean value for available: {}",
                s
            ))),
        },
        other => Err(AppError::DataValidation(format!(
            "invalid boolean value for available: {}",
            other
        ))),
    }
}

fn parse_price(value: &Value) -> Result<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .map_err(|_| AppError::DataValidation(format!("invalid price value: {}", n))),
        Value::String(s) => PriceFilter::Text(s.clone()).normalize(),
        other => Err(AppError::DataValidation(format!(
            "invalid price value: {}",
            other
        ))),
    }
}

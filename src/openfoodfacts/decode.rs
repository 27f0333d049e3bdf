use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LookupError;
use crate::nutrition::NutrientTable;

/// A product as the rest of the crate sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub serving_size_raw: Option<String>,
    pub nutriments: NutrientTable,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    product: Option<RawProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProduct {
    code: Option<String>,
    product_name: Option<String>,
    generic_name: Option<String>,
    brands: Option<String>,
    image_front_url: Option<String>,
    image_url: Option<String>,
    ingredients_text: Option<String>,
    allergens: Option<String>,
    allergens_tags: Vec<String>,
    serving_size: Option<String>,
    nutriments: Option<NutrientTable>,
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn reports_missing(status: Option<&Value>) -> bool {
    match status {
        Some(Value::Number(n)) => n.as_i64() == Some(0),
        Some(Value::String(s)) => matches!(s.as_str(), "0" | "failure"),
        _ => false,
    }
}

/// Turns a product API document into a [`Product`].
///
/// `status: 0` or a missing `product` object is [`LookupError::NotFound`];
/// any other shape mismatch is [`LookupError::Unparseable`].
pub fn decode_product(doc: Value) -> Result<Product, LookupError> {
    let raw: RawResponse =
        serde_json::from_value(doc).map_err(|e| LookupError::Unparseable(e.to_string()))?;

    if reports_missing(raw.status.as_ref()) {
        return Err(LookupError::NotFound);
    }
    let product = raw.product.ok_or(LookupError::NotFound)?;

    let barcode = non_blank(raw.code)
        .or_else(|| non_blank(product.code))
        .ok_or_else(|| LookupError::Unparseable("missing barcode".into()))?;

    let name = non_blank(product.product_name)
        .or_else(|| non_blank(product.generic_name))
        .unwrap_or_else(|| "Unknown product".to_string());

    let brand = non_blank(product.brands)
        .and_then(|b| b.split(',').map(str::trim).find(|s| !s.is_empty()).map(str::to_string));

    let allergens = if product.allergens_tags.is_empty() {
        non_blank(product.allergens)
    } else {
        let tags: Vec<&str> = product
            .allergens_tags
            .iter()
            .map(|t| t.split_once(':').map_or(t.as_str(), |(_, name)| name))
            .collect();
        Some(tags.join(", "))
    };

    Ok(Product {
        barcode,
        name,
        brand,
        image_url: non_blank(product.image_front_url).or_else(|| non_blank(product.image_url)),
        ingredients: non_blank(product.ingredients_text),
        allergens,
        serving_size_raw: non_blank(product.serving_size),
        nutriments: product.nutriments.unwrap_or_default(),
    })
}

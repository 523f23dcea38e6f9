//! Product catalog operations.
//!
//! Submits a new product variant to the backend. The payload comes
//! from a TOML or JSON file instead of an interactive form, but the
//! wire format is exactly what the product-creation endpoint expects,
//! including its mixed camelCase/snake_case field names.

use crate::api::{ApiClient, ApiError};
use crate::models::Category;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const PRODUCT_PATH: &str = "/product";
const CATEGORY_LIST_PATH: &str = "/category";

/// A product-variant creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    /// Variant identifier.
    pub id: String,
    /// Free-form detail text.
    #[serde(default)]
    pub detail: String,
    /// Color name of the variant.
    #[serde(rename = "colorName")]
    pub color_name: String,
    /// Size name of the variant.
    #[serde(rename = "sizeName")]
    pub size_name: String,
    /// Stock quantity; required, like the form field it replaces.
    pub quantity: u32,
    /// Product description.
    #[serde(default)]
    pub description: String,
    /// Optional image reference; the backend accepts null.
    #[serde(default)]
    pub image: Option<String>,
    /// Featured flag.
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    /// Hot-item flag.
    #[serde(rename = "isHot", default)]
    pub is_hot: bool,
    /// Category the product belongs to.
    pub category_id: u64,
    /// Sale price.
    pub price: f64,
    /// Promotional price; 0 means no promotion.
    #[serde(default)]
    pub price_promotion: f64,
}

impl ProductForm {
    /// Load a payload from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read product file: {}", path.display()))?;

        let form = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse product JSON: {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("Failed to parse product TOML: {}", path.display()))?,
        };

        Ok(form)
    }

    /// Validate the payload before submission.
    ///
    /// Mirrors the required fields of the creation form: the id,
    /// color, and size must be set, the price positive, and a
    /// category selected.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Product id must not be empty".to_string());
        }
        if self.color_name.trim().is_empty() {
            return Err("Color name must not be empty".to_string());
        }
        if self.size_name.trim().is_empty() {
            return Err("Size name must not be empty".to_string());
        }
        if self.quantity == 0 {
            return Err("Quantity must be at least 1".to_string());
        }
        if self.price <= 0.0 {
            return Err("Price must be greater than zero".to_string());
        }
        if self.price_promotion < 0.0 {
            return Err("Promotional price must not be negative".to_string());
        }
        if self.category_id == 0 {
            return Err("A category must be selected".to_string());
        }
        Ok(())
    }
}

/// Fetch the category list (the CLI stand-in for the form's selector).
pub async fn fetch_categories(api: &ApiClient) -> Result<Vec<Category>, ApiError> {
    api.get_json(CATEGORY_LIST_PATH).await
}

/// Submit a validated product payload.
///
/// Verifies the chosen category against the live category list first;
/// an unknown category is rejected before anything is posted.
pub async fn submit_product(api: &ApiClient, form: &ProductForm) -> Result<()> {
    let categories = fetch_categories(api)
        .await
        .context("Có lỗi xảy ra khi tải danh mục. Vui lòng thử lại sau.")?;

    if !categories.iter().any(|c| c.category_id == form.category_id) {
        anyhow::bail!(
            "Unknown category id {} (backend knows {} categories)",
            form.category_id,
            categories.len()
        );
    }

    api.post_json(PRODUCT_PATH, form)
        .await
        .context("Có lỗi xảy ra khi thêm sản phẩm. Vui lòng thử lại!")?;

    info!("Product {} submitted", form.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> ProductForm {
        ProductForm {
            id: "SP-001".to_string(),
            detail: "Cotton".to_string(),
            color_name: "Đỏ".to_string(),
            size_name: "M".to_string(),
            quantity: 5,
            description: "Áo thun".to_string(),
            image: None,
            is_featured: true,
            is_hot: false,
            category_id: 2,
            price: 150000.0,
            price_promotion: 0.0,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(sample_form().validate().is_ok());
    }

    #[test]
    fn test_empty_required_fields_fail() {
        let mut form = sample_form();
        form.id = "  ".to_string();
        assert!(form.validate().is_err());

        let mut form = sample_form();
        form.color_name = String::new();
        assert!(form.validate().is_err());

        let mut form = sample_form();
        form.size_name = String::new();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_price_and_category_bounds() {
        let mut form = sample_form();
        form.price = 0.0;
        assert!(form.validate().is_err());

        let mut form = sample_form();
        form.category_id = 0;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_zero_quantity_fails() {
        let mut form = sample_form();
        form.quantity = 0;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_missing_quantity_is_a_parse_error() {
        let toml_content = r#"
id = "SP-003"
colorName = "Vàng"
sizeName = "S"
category_id = 1
price = 50000.0
"#;
        assert!(toml::from_str::<ProductForm>(toml_content).is_err());
    }

    #[test]
    fn test_serializes_wire_field_names() {
        let json = serde_json::to_value(sample_form()).unwrap();
        assert!(json.get("colorName").is_some());
        assert!(json.get("sizeName").is_some());
        assert!(json.get("isFeatured").is_some());
        assert!(json.get("isHot").is_some());
        // These two stay snake_case on the wire
        assert!(json.get("category_id").is_some());
        assert!(json.get("price_promotion").is_some());
    }

    #[test]
    fn test_parses_toml_payload() {
        let toml_content = r#"
id = "SP-002"
colorName = "Xanh"
sizeName = "L"
quantity = 3
category_id = 1
price = 99000.0
"#;
        let form: ProductForm = toml::from_str(toml_content).unwrap();
        assert_eq!(form.id, "SP-002");
        assert_eq!(form.color_name, "Xanh");
        assert_eq!(form.quantity, 3);
        assert!(!form.is_featured);
        assert_eq!(form.price_promotion, 0.0);
        assert!(form.validate().is_ok());
    }
}

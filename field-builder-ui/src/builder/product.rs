//! Product showcase form built on the same field engine

use field_types::{FieldMap, FieldOrder, FieldValue};

use crate::builder::config::capitalize;
use crate::builder::form::SaveFormat;
use crate::builder::variant::FieldDefinition;

pub const PRODUCT_TITLE: &str = "Product Showcase";
pub const PRICE_KEY: &str = "price";
pub const STATUS_CHOICES: [&str; 3] = ["draft", "published", "archived"];
pub const FEATURED_TOOLTIP: &str = "Display this product in featured sections.";

const MAX_NAME_LENGTH: usize = 100;
const MAX_PRICE: f64 = 1_000_000.0;
const MAX_STOCK: i64 = 1_000_000;
const MAX_CATEGORIES: usize = 5;

/// Initial product values. `product_id` adds a readonly row when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub product_id: Option<String>,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: String,
    pub stock: String,
    pub categories: Vec<String>,
    pub status: String,
    pub featured: bool,
}

impl Default for ProductData {
    fn default() -> Self {
        Self {
            product_id: None,
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            price: String::new(),
            stock: String::new(),
            categories: Vec::new(),
            status: STATUS_CHOICES[0].to_string(),
            featured: false,
        }
    }
}

fn is_blank(value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(text) => text.trim().is_empty(),
        FieldValue::Bool(flag) => !flag,
        FieldValue::List(_) => false,
    }
}

/// Drop currency symbols and thousands separators
pub fn strip_price(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '$' | ',')).collect()
}

pub fn required_validation(value: &FieldValue) -> Option<String> {
    is_blank(value).then(|| "This field is required.".to_string())
}

pub fn name_validation(value: &FieldValue) -> Option<String> {
    if is_blank(value) {
        return Some("Product name is required.".to_string());
    }
    match value.as_text() {
        Some(name) if name.chars().count() > MAX_NAME_LENGTH => Some(format!(
            "Product name cannot exceed {MAX_NAME_LENGTH} characters."
        )),
        _ => None,
    }
}

pub fn sku_validation(value: &FieldValue) -> Option<String> {
    if is_blank(value) {
        return Some("SKU is required.".to_string());
    }
    let sku = value.as_text()?;
    if !sku.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Some("SKU can only contain letters, numbers, and hyphens.".to_string());
    }
    if !(4..=20).contains(&sku.len()) {
        return Some("SKU must be between 4 and 20 characters.".to_string());
    }
    None
}

pub fn price_validation(value: &FieldValue) -> Option<String> {
    if is_blank(value) {
        return Some("Price is required.".to_string());
    }
    let raw = value.as_text()?;
    let price = match strip_price(raw).trim().parse::<f64>() {
        Ok(price) if price.is_finite() => price,
        _ => return Some("Price must be a valid number.".to_string()),
    };
    if price < 0.0 {
        return Some("Price cannot be negative.".to_string());
    }
    if price > MAX_PRICE {
        return Some("Price cannot exceed $1,000,000.".to_string());
    }
    None
}

/// Stock is optional; a blank value passes
pub fn stock_validation(value: &FieldValue) -> Option<String> {
    let raw = value.as_text()?.trim();
    if raw.is_empty() {
        return None;
    }
    let Ok(stock) = raw.parse::<i64>() else {
        return Some("Stock must be a valid number.".to_string());
    };
    if stock < 0 {
        return Some("Stock cannot be negative.".to_string());
    }
    if stock > MAX_STOCK {
        return Some("Stock cannot exceed 1,000,000 units.".to_string());
    }
    None
}

pub fn categories_validation(value: &FieldValue) -> Option<String> {
    let categories = value.as_list().unwrap_or_default();
    if categories.is_empty() {
        return Some("At least one category is required.".to_string());
    }
    if categories.len() > MAX_CATEGORIES {
        return Some(format!("Maximum {MAX_CATEGORIES} categories allowed."));
    }
    None
}

/// Send the price as a bare number string
pub fn strip_price_before_save(values: &FieldMap) -> FieldMap {
    let mut next = values.clone();
    if let Some(FieldValue::Text(price)) = next.get_mut(PRICE_KEY) {
        *price = strip_price(price);
    }
    next
}

pub fn product_before_save_format() -> SaveFormat {
    SaveFormat::new(strip_price_before_save)
}

pub fn product_fields(data: &ProductData) -> Vec<FieldDefinition> {
    let status_choices = STATUS_CHOICES.iter().map(|s| s.to_string()).collect();

    let mut fields = Vec::with_capacity(9);
    if let Some(id) = &data.product_id {
        fields.push(FieldDefinition::readonly("Product ID", "productId", id.clone()));
    }
    fields.extend([
        FieldDefinition::text("Product Name", "name", data.name.clone())
            .with_placeholder("Enter product name")
            .with_max_length(MAX_NAME_LENGTH as i32)
            .with_validation(name_validation),
        FieldDefinition::text("Description", "description", data.description.clone())
            .with_placeholder("Enter product description")
            .with_max_length(500),
        FieldDefinition::text("SKU", "sku", data.sku.clone())
            .with_placeholder("Enter product SKU code")
            .with_max_length(20)
            .with_validation(sku_validation),
        FieldDefinition::text("Price", PRICE_KEY, data.price.clone())
            .with_placeholder("Enter product price")
            .with_validation(price_validation),
        FieldDefinition::text("Stock", "stock", data.stock.clone())
            .with_placeholder("Enter available stock (optional)")
            .with_validation(stock_validation),
        FieldDefinition::list("Categories", "categories", data.categories.clone())
            .with_sort(FieldOrder::Asc)
            .with_max_length(30)
            .with_validation(categories_validation),
        FieldDefinition::dropdown("Status", "status", data.status.clone(), status_choices)
            .with_format(capitalize),
        FieldDefinition::checkbox("Featured Product", "featured", data.featured)
            .with_tooltip(FEATURED_TOOLTIP),
    ]);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    use crate::builder::form::{FieldForm, FormError};
    use crate::builder::transport::{SaveTransport, TransportError};
    use crate::builder::variant::VariantKind;

    struct Echo;

    #[async_trait::async_trait(?Send)]
    impl SaveTransport for Echo {
        async fn save(&self, fields: &FieldMap) -> Result<serde_json::Value, TransportError> {
            Ok(field_types::to_wire_object(fields))
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn product() -> ProductData {
        ProductData {
            name: "Trail Runner".to_string(),
            sku: "TR-2041".to_string(),
            price: "$1,249.50".to_string(),
            stock: "12".to_string(),
            categories: strings(&["shoes", "outdoor"]),
            ..ProductData::default()
        }
    }

    #[test]
    fn strips_currency_symbols_and_separators() {
        assert_eq!(strip_price("$1,249.50"), "1249.50");
        assert_eq!(strip_price("99"), "99");

        let mut values = FieldMap::new();
        values.insert(PRICE_KEY.to_string(), "$2,000".into());
        values.insert("name".to_string(), "Keep, $me".into());
        let formatted = product_before_save_format().apply(&values);
        assert_eq!(formatted[PRICE_KEY], FieldValue::from("2000"));
        assert_eq!(formatted["name"], FieldValue::from("Keep, $me"));
    }

    #[test]
    fn required_rule() {
        assert_eq!(
            required_validation(&" ".into()).as_deref(),
            Some("This field is required.")
        );
        assert_eq!(
            required_validation(&FieldValue::Bool(false)).as_deref(),
            Some("This field is required.")
        );
        assert_eq!(required_validation(&"x".into()), None);
    }

    #[test]
    fn name_rules() {
        assert_eq!(
            name_validation(&"".into()).as_deref(),
            Some("Product name is required.")
        );
        assert_eq!(
            name_validation(&"n".repeat(101).into()).as_deref(),
            Some("Product name cannot exceed 100 characters.")
        );
        assert_eq!(name_validation(&"n".repeat(100).into()), None);
    }

    #[test]
    fn sku_rules() {
        assert_eq!(sku_validation(&"  ".into()).as_deref(), Some("SKU is required."));
        assert_eq!(
            sku_validation(&"AB_12".into()).as_deref(),
            Some("SKU can only contain letters, numbers, and hyphens.")
        );
        assert_eq!(
            sku_validation(&"AB1".into()).as_deref(),
            Some("SKU must be between 4 and 20 characters.")
        );
        assert_eq!(
            sku_validation(&"A".repeat(21).into()).as_deref(),
            Some("SKU must be between 4 and 20 characters.")
        );
        assert_eq!(sku_validation(&"TR-2041".into()), None);
    }

    #[test]
    fn price_rules() {
        assert_eq!(price_validation(&"".into()).as_deref(), Some("Price is required."));
        assert_eq!(
            price_validation(&"abc".into()).as_deref(),
            Some("Price must be a valid number.")
        );
        assert_eq!(
            price_validation(&"-5".into()).as_deref(),
            Some("Price cannot be negative.")
        );
        assert_eq!(
            price_validation(&"$1,000,000.01".into()).as_deref(),
            Some("Price cannot exceed $1,000,000.")
        );
        assert_eq!(price_validation(&"$1,000,000".into()), None);
        assert_eq!(price_validation(&"19.99".into()), None);
    }

    #[test]
    fn stock_rules() {
        assert_eq!(stock_validation(&"".into()), None);
        assert_eq!(
            stock_validation(&"lots".into()).as_deref(),
            Some("Stock must be a valid number.")
        );
        assert_eq!(
            stock_validation(&"-1".into()).as_deref(),
            Some("Stock cannot be negative.")
        );
        assert_eq!(
            stock_validation(&"1000001".into()).as_deref(),
            Some("Stock cannot exceed 1,000,000 units.")
        );
        assert_eq!(stock_validation(&"250".into()), None);
    }

    #[test]
    fn categories_rules() {
        assert_eq!(
            categories_validation(&Vec::<String>::new().into()).as_deref(),
            Some("At least one category is required.")
        );
        assert_eq!(
            categories_validation(&"shoes".into()).as_deref(),
            Some("At least one category is required.")
        );
        assert_eq!(
            categories_validation(&strings(&["a", "b", "c", "d", "e", "f"]).into()).as_deref(),
            Some("Maximum 5 categories allowed.")
        );
        assert_eq!(categories_validation(&strings(&["a"]).into()), None);
    }

    #[test]
    fn fields_in_display_order() {
        let kinds: Vec<VariantKind> = product_fields(&product())
            .iter()
            .map(|f| f.variant.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                VariantKind::Text,
                VariantKind::Text,
                VariantKind::Text,
                VariantKind::Text,
                VariantKind::Text,
                VariantKind::List,
                VariantKind::Dropdown,
                VariantKind::Checkbox,
            ]
        );

        let with_id = product_fields(&ProductData {
            product_id: Some("p-17".to_string()),
            ..product()
        });
        assert_eq!(with_id[0].name, "productId");
        assert_eq!(with_id[0].variant.kind(), VariantKind::Readonly);
        assert_eq!(with_id[7].variant.display("published"), "Published");
    }

    #[test]
    fn saving_sends_stripped_price() {
        let mut form =
            FieldForm::new(product_fields(&product())).with_before_save(product_before_save_format());
        form.on_change(crate::builder::ChangeEvent {
            name: "stock".to_string(),
            value: "15".into(),
        });

        block_on(form.submit(&Echo)).unwrap();
        assert_eq!(form.value(PRICE_KEY), Some(&FieldValue::from("1249.50")));
        assert!(!form.has_field_changes());
    }

    #[test]
    fn invalid_sku_blocks_save() {
        let mut form =
            FieldForm::new(product_fields(&product())).with_before_save(product_before_save_format());
        form.on_change(crate::builder::ChangeEvent {
            name: "sku".to_string(),
            value: "bad sku".into(),
        });

        let result = block_on(form.submit(&Echo));
        assert_eq!(
            result,
            Err(FormError::Validation(
                "SKU can only contain letters, numbers, and hyphens.".to_string()
            ))
        );
    }
}

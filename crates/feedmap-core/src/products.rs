use serde::{Deserialize, Serialize};

/// Language tag attached to every display name.
pub const DEFAULT_LANGUAGE: &str = "en";

/// ISO 4217 currency code attached to every price.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A price exactly as a feed delivered it, before normalization.
///
/// JSON feeds may send either `10.5` or `"$10.50"`; XML and raw feeds only
/// ever produce [`RawPrice::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A feed record after format-specific decoding, shared by every parser.
///
/// Identity fields are optional here because feeds routinely omit them;
/// rows without both are dropped before mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub list_price: Option<RawPrice>,
    pub sales_price: Option<RawPrice>,
}

impl NormalizedRow {
    /// Returns `true` when both `product_id` and `product_name` are present
    /// and non-empty.
    #[must_use]
    pub fn has_required_fields(&self) -> bool {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.product_id) && present(&self.product_name)
    }
}

/// A text value tagged with its language, e.g. `{ "language": "en", "value": "Widget" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub language: String,
    pub value: String,
}

/// An amount tagged with its currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    ReplaceProvidedProperties,
}

/// How the catalog should merge an update into existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMode {
    pub product_update_kind: UpdateKind,
    pub variant_update_kind: UpdateKind,
    pub replace_existing_variants: bool,
}

impl UpdateMode {
    /// The single policy used for every feed: overwrite provided properties
    /// at both levels and leave existing variants in place.
    pub const REPLACE_PROVIDED: Self = Self {
        product_update_kind: UpdateKind::ReplaceProvidedProperties,
        variant_update_kind: UpdateKind::ReplaceProvidedProperties,
        replace_existing_variants: false,
    };
}

impl Default for UpdateMode {
    fn default() -> Self {
        Self::REPLACE_PROVIDED
    }
}

/// The format-agnostic product update handed to the catalog system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProductUpdate {
    pub id: String,
    pub display_name: Vec<LocalizedText>,
    pub list_price: Vec<Money>,
    pub sales_price: Vec<Money>,
    pub update_mode: UpdateMode,
}

impl CanonicalProductUpdate {
    /// Builds an update with one `en` display name and one `USD` amount for
    /// each price, under [`UpdateMode::REPLACE_PROVIDED`].
    #[must_use]
    pub fn new(id: &str, name: &str, list_amount: f64, sales_amount: f64) -> Self {
        let usd = |amount| Money {
            currency: DEFAULT_CURRENCY.to_owned(),
            amount,
        };
        Self {
            id: id.to_owned(),
            display_name: vec![LocalizedText {
                language: DEFAULT_LANGUAGE.to_owned(),
                value: name.to_owned(),
            }],
            list_price: vec![usd(list_amount)],
            sales_price: vec![usd(sales_amount)],
            update_mode: UpdateMode::REPLACE_PROVIDED,
        }
    }

    /// Display name text in the default language, if set.
    #[must_use]
    pub fn display_name_text(&self) -> Option<&str> {
        self.display_name.first().map(|t| t.value.as_str())
    }

    /// First list price amount, if set.
    #[must_use]
    pub fn list_amount(&self) -> Option<f64> {
        self.list_price.first().map(|m| m.amount)
    }

    /// First sales price amount, if set.
    #[must_use]
    pub fn sales_amount(&self) -> Option<f64> {
        self.sales_price.first().map(|m| m.amount)
    }
}

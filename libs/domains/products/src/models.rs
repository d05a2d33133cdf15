use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A stored product record.
///
/// `id` maps to the document `_id`. It is `None` only before the first save,
/// when the repository assigns one.
///
/// Ids are stored as strings, so documents whose `_id` is a BSON ObjectId
/// (as written by other drivers' defaults) cannot be read into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, quantity: i32, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity,
            price,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Wire representation of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    /// Store-assigned identifier; ignored on update, optional on create
    #[serde(default)]
    #[schema(example = "65f1c0ffee0ddba11ca7d00d")]
    pub id: Option<String>,
    #[schema(example = "Product1")]
    pub name: String,
    #[schema(example = 1)]
    pub quantity: i32,
    #[schema(example = 20.1)]
    pub price: f64,
}

/// Closed price interval `[min, max]`, also bound from `?min=&max=`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

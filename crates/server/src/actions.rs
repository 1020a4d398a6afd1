use std::collections::HashMap;

use crate::errors::ApiError;

/// Closed set of operations the `/process` endpoint can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetAllProducts,
    GetProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    GetAllProductTypes,
    GetProductType,
    CreateProductType,
    UpdateProductType,
    DeleteProductType,
    GetProductsByType,
}

impl Action {
    /// Resolve the wire name to an operation. Unknown names fail as
    /// `Invalid action` without touching any service.
    pub fn parse(name: &str) -> Result<Self, ApiError> {
        Ok(match name {
            "get_all_products" => Self::GetAllProducts,
            "get_product" => Self::GetProduct,
            "create_product" => Self::CreateProduct,
            "update_product" => Self::UpdateProduct,
            "delete_product" => Self::DeleteProduct,
            "get_all_product_types" => Self::GetAllProductTypes,
            "get_product_type" => Self::GetProductType,
            "create_product_type" => Self::CreateProductType,
            "update_product_type" => Self::UpdateProductType,
            "delete_product_type" => Self::DeleteProductType,
            "get_products_by_type" => Self::GetProductsByType,
            _ => return Err(ApiError::InvalidAction),
        })
    }
}

/// Flat parameter bag merged from the query string and form body.
/// Form values win on key collision.
#[derive(Debug, Default)]
pub struct ParamBag(HashMap<String, String>);

impl ParamBag {
    pub fn merge(query: HashMap<String, String>, form: HashMap<String, String>) -> Self {
        let mut all = query;
        all.extend(form);
        Self(all)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, ApiError> {
        self.get(key)
            .ok_or_else(|| ApiError::Validation(format!("missing required parameter: {key}")))
    }

    pub fn require_i32(&self, key: &str) -> Result<i32, ApiError> {
        self.require(key)?
            .trim()
            .parse::<i32>()
            .map_err(|_| ApiError::Validation(format!("invalid integer for parameter: {key}")))
    }

    /// The parameter must be present but may be blank, meaning null
    /// (an untyped product).
    pub fn require_nullable_i32(&self, key: &str) -> Result<Option<i32>, ApiError> {
        let raw = self.require(key)?.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
            return Ok(None);
        }
        raw.parse::<i32>()
            .map(Some)
            .map_err(|_| ApiError::Validation(format!("invalid integer for parameter: {key}")))
    }
}

use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DatabaseConnection;
use serde_json::json;
use service::db::{product_service, product_type_service};

use crate::actions::{Action, ParamBag};
use crate::errors::ApiError;

fn created(message: &str, id: i32) -> Response {
    Json(json!({ "success": true, "message": message, "id": id })).into_response()
}

fn updated(message: &str, rows_affected: u64) -> Response {
    Json(json!({ "success": true, "message": message, "rows_affected": rows_affected }))
        .into_response()
}

/// Map one action to one service call and wrap the outcome in the response
/// envelope: sequences as arrays, single entities as objects, writes as
/// `{success, message, ...}`. No business logic lives here.
pub async fn dispatch(
    db: &DatabaseConnection,
    action: Action,
    params: &ParamBag,
) -> Result<Response, ApiError> {
    Ok(match action {
        Action::GetAllProducts => {
            Json(product_service::list_products(db).await?).into_response()
        }
        Action::GetProduct => {
            let id = params.require_i32("id")?;
            Json(product_service::get_product(db, id).await?).into_response()
        }
        Action::CreateProduct => {
            let name = params.require("name")?;
            let type_id = params.require_nullable_i32("type_id")?;
            let date = params.require("date")?;
            let quantity = params.require_i32("quantity")?;
            let id = product_service::create_product(db, name, type_id, date, quantity).await?;
            created("Product created successfully", id)
        }
        Action::UpdateProduct => {
            let id = params.require_i32("id")?;
            let name = params.require("name")?;
            let type_id = params.require_nullable_i32("type_id")?;
            let date = params.require("date")?;
            let quantity = params.require_i32("quantity")?;
            let rows =
                product_service::update_product(db, id, name, type_id, date, quantity).await?;
            updated("Product updated successfully", rows)
        }
        Action::DeleteProduct => {
            let id = params.require_i32("id")?;
            let rows = product_service::delete_product(db, id).await?;
            updated("Product deleted successfully", rows)
        }
        Action::GetAllProductTypes => {
            Json(product_type_service::list_product_types(db).await?).into_response()
        }
        Action::GetProductType => {
            let id = params.require_i32("id")?;
            Json(product_type_service::get_product_type(db, id).await?).into_response()
        }
        Action::CreateProductType => {
            let name = params.require("name")?;
            let description = params.get("description");
            let id = product_type_service::create_product_type(db, name, description).await?;
            created("Product type created successfully", id)
        }
        Action::UpdateProductType => {
            let id = params.require_i32("id")?;
            let name = params.require("name")?;
            let description = params.get("description");
            let rows =
                product_type_service::update_product_type(db, id, name, description).await?;
            updated("Product type updated successfully", rows)
        }
        Action::DeleteProductType => {
            let id = params.require_i32("id")?;
            let outcome = product_type_service::delete_product_type(db, id).await?;
            Json(json!({
                "success": true,
                "message": "Product type deleted successfully",
                "rows_affected": outcome.rows_affected,
                "products_updated": outcome.products_detached,
            }))
            .into_response()
        }
        Action::GetProductsByType => {
            let type_id = params.require_i32("type_id")?;
            Json(product_type_service::list_products_by_type(db, type_id).await?).into_response()
        }
    })
}

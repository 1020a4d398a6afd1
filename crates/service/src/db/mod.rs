pub mod product_service;
pub mod product_type_service;

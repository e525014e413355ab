//! Dopamart store catalogue.

use crate::domains::tools::crud::BackendResource;

/// `/api/v1/dopamart/products/`
///
/// Prices come back as decimal strings (`"10.00"`).
pub const PRODUCTS: BackendResource = BackendResource {
    domain: "dopamart",
    collection: "products",
    singular: "product",
    list_tool: "list_products",
    summary: "store products with prices as decimal strings",
};

pub const RESOURCES: [&BackendResource; 1] = [&PRODUCTS];

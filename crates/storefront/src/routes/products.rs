//! Product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use techstore_core::Product;

use crate::breadcrumb::{self, Crumb};
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub images: Vec<String>,
    pub specs: Vec<(String, String)>,
    pub category: Option<String>,
    pub in_stock: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let image = if product.image.is_empty() {
            techstore_core::cart::FALLBACK_IMAGE.to_string()
        } else {
            product.image.clone()
        };
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: filters::usd(product.price),
            image,
            images: product.images.clone(),
            specs: product
                .specs
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            category: product.category.clone(),
            in_stock: product.in_stock(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub crumbs: Vec<Crumb>,
    pub product: ProductView,
}

/// Display product detail page.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .catalog()
        .get_product(id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    Ok(ProductShowTemplate {
        crumbs: breadcrumb::trail(&format!("/product/{id}")),
        product: ProductView::from(&product),
    })
}

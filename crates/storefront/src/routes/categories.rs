//! Category browsing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use techstore_core::search::filter_by_category;
use tracing::instrument;

use crate::breadcrumb::{self, Crumb};
use crate::error::AppError;
use crate::filters;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// A browsable product category.
#[derive(Clone, Copy)]
pub struct Category {
    pub id: i64,
    pub name: &'static str,
    pub blurb: &'static str,
}

/// The fixed set of storefront categories.
pub const CATEGORIES: &[Category] = &[
    Category {
        id: 1,
        name: "Laptops",
        blurb: "Portable computers for work and play",
    },
    Category {
        id: 2,
        name: "Smartphones",
        blurb: "The latest phones from top brands",
    },
    Category {
        id: 3,
        name: "Tablets",
        blurb: "Lightweight tablets for every budget",
    },
    Category {
        id: 4,
        name: "Accessories",
        blurb: "Chargers, cases, cables, and more",
    },
    Category {
        id: 5,
        name: "Gaming",
        blurb: "Consoles, controllers, and gaming gear",
    },
    Category {
        id: 6,
        name: "Audio",
        blurb: "Headphones, speakers, and earbuds",
    },
];

fn category_by_id(id: i64) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub crumbs: Vec<Crumb>,
    pub categories: Vec<Category>,
}

/// Single category page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub crumbs: Vec<Crumb>,
    pub category: Category,
    pub products: Vec<ProductView>,
}

/// Display the category grid.
pub async fn index() -> impl IntoResponse {
    CategoriesIndexTemplate {
        crumbs: breadcrumb::trail("/categories"),
        categories: CATEGORIES.to_vec(),
    }
}

/// Display the products belonging to one category.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let category = category_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;

    let products = state.catalog().list_products().await?;
    let products = filter_by_category(&products, category.name)
        .iter()
        .map(ProductView::from)
        .collect();

    Ok(CategoryShowTemplate {
        crumbs: breadcrumb::trail(&format!("/category/{id}")),
        category: *category,
        products,
    })
}

//! Search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use techstore_core::search::filter_products;
use tracing::instrument;

use crate::breadcrumb::{self, Crumb};
use crate::error::AppError;
use crate::filters;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchPageTemplate {
    pub crumbs: Vec<Crumb>,
    pub query: String,
    pub results: Vec<ProductView>,
    pub searched: bool,
}

/// Display the search page.
///
/// A non-empty `q` parameter runs the search immediately; a blank or
/// missing one renders the empty search form.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let term = query.q.trim().to_string();
    let searched = !term.is_empty();

    let results = if searched {
        let products = state.catalog().list_products().await?;
        filter_products(&products, &term)
            .iter()
            .map(ProductView::from)
            .collect()
    } else {
        Vec::new()
    };

    Ok(SearchPageTemplate {
        crumbs: breadcrumb::trail("/search"),
        query: term,
        results,
        searched,
    })
}

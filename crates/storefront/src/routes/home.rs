//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::breadcrumb::Crumb;
use crate::filters;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub crumbs: Vec<Crumb>,
    pub products: Vec<ProductView>,
    pub error: Option<String>,
}

/// Display the home page product grid.
///
/// A catalog failure renders the page with an error banner and a retry
/// link instead of failing the whole request.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (products, error) = match state.catalog().list_products().await {
        Ok(products) => (products.iter().map(ProductView::from).collect(), None),
        Err(err) => {
            tracing::error!(error = %err, "failed to load product catalog");
            (Vec::new(), Some(err.user_message()))
        }
    };

    HomeTemplate {
        crumbs: Vec::new(),
        products,
        error,
    }
}

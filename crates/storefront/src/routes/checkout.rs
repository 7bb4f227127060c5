//! Checkout route handlers.
//!
//! Checkout is a plain form post. A successful submission clears the
//! session cart and redirects to the confirmation page; a failed one
//! re-renders the form with the server's message and the entered values.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::api::CheckoutOrder;
use crate::breadcrumb::{self, Crumb};
use crate::cart as cart_store;
use crate::filters;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub crumbs: Vec<Crumb>,
    pub cart: CartView,
    pub order: CheckoutOrder,
    pub error: Option<String>,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/thank_you.html")]
pub struct ThankYouTemplate {
    pub crumbs: Vec<Crumb>,
}

/// Display the checkout form with the order summary.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let lines = cart_store::load(&session).await;
    let lines = crate::routes::cart::hydrate(&state, lines).await;

    CheckoutTemplate {
        crumbs: breadcrumb::trail("/checkout"),
        cart: CartView::from(lines.as_slice()),
        order: CheckoutOrder::default(),
        error: None,
    }
}

/// Validate the form and return the first problem, if any.
fn validate(order: &CheckoutOrder) -> Option<String> {
    let required = [
        (&order.name, "name"),
        (&order.email, "email"),
        (&order.address, "address"),
        (&order.city, "city"),
        (&order.postal_code, "postal code"),
        (&order.country, "country"),
    ];
    for (value, label) in required {
        if value.trim().is_empty() {
            return Some(format!("Please fill in your {label}."));
        }
    }
    if !is_valid_email(order.email.trim()) {
        return Some("Please enter a valid email address.".to_string());
    }
    None
}

/// Submit the order.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutOrder>,
) -> Response {
    let lines = cart_store::load(&session).await;

    let rerender = |order: CheckoutOrder, error: String, status: StatusCode| {
        (
            status,
            CheckoutTemplate {
                crumbs: breadcrumb::trail("/checkout"),
                cart: CartView::from(lines.as_slice()),
                order,
                error: Some(error),
            },
        )
            .into_response()
    };

    if lines.is_empty() {
        return rerender(
            form,
            "Your cart is empty.".to_string(),
            StatusCode::BAD_REQUEST,
        );
    }

    if let Some(message) = validate(&form) {
        return rerender(form, message, StatusCode::BAD_REQUEST);
    }

    match state.catalog().submit_checkout(&form).await {
        Ok(()) => {
            if let Err(e) = cart_store::clear(&session).await {
                tracing::error!("failed to clear cart after checkout: {e}");
            }
            Redirect::to("/thank-you").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "checkout submission failed");
            rerender(form, e.user_message(), StatusCode::BAD_GATEWAY)
        }
    }
}

/// Display the order confirmation page.
pub async fn thank_you() -> impl IntoResponse {
    ThankYouTemplate {
        crumbs: breadcrumb::trail("/thank-you"),
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

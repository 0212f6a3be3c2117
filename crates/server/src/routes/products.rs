//! Product pages.
//!
//! Reads render a view; writes answer with `redirect:/products` so that a
//! browser refresh after a submit does not post the form again.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Form;
use models::Product;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::views::ModelAndView;

pub const PRODUCTS_PATH: &str = "/products";

/// Fields submitted by the new and edit forms.
///
/// Any `id` in the submission is ignored: new products get their id from the
/// store and updates take it from the path.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl From<ProductForm> for Product {
    fn from(form: ProductForm) -> Self {
        Product::new(form.name, form.description, form.price)
    }
}

/// GET /products
pub async fn list(State(state): State<AppState>) -> Result<ModelAndView, AppError> {
    let products = state.products.find_all().await?;
    Ok(ModelAndView::new("list").with_object("products", &products)?)
}

/// GET /products/new
pub async fn new_form() -> Result<ModelAndView, AppError> {
    Ok(ModelAndView::new("new").with_object("product", Product::default())?)
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<ProductForm>, FormRejection>,
) -> Result<ModelAndView, AppError> {
    let Form(form) = form?;
    let saved = state.products.save(form.into()).await?;
    info!(product_id = ?saved.id, "product created");
    Ok(ModelAndView::redirect(PRODUCTS_PATH))
}

/// GET /products/edit/{id}
pub async fn edit_form(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ModelAndView, AppError> {
    let Path(id) = id?;
    match state.products.find_by_id(id).await? {
        Some(product) => Ok(ModelAndView::new("edit").with_object("product", product)?),
        None => Err(AppError::NotFound(format!("product {id}"))),
    }
}

/// POST /products/edit/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<ProductForm>, FormRejection>,
) -> Result<ModelAndView, AppError> {
    let Path(id) = id?;
    let Form(form) = form?;
    let product = Product::from(form).with_id(id);
    let saved = state.products.save(product).await?;
    info!(path_id = id, product_id = ?saved.id, "product saved from edit form");
    Ok(ModelAndView::redirect(PRODUCTS_PATH))
}

/// GET /products/delete/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ModelAndView, AppError> {
    let Path(id) = id?;
    state.products.delete_by_id(id).await?;
    info!(product_id = id, "product deleted");
    Ok(ModelAndView::redirect(PRODUCTS_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_conversion_drops_nothing_but_id() {
        let form = ProductForm { name: "Widget".into(), description: "blue".into(), price: 9.99 };
        let p = Product::from(form);
        assert_eq!(p, Product::new("Widget", "blue", 9.99));
        assert_eq!(p.id, None);
    }
}

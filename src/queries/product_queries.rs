use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    error::{AppError, Result},
    models::{Category, PriceFilter, Product},
};

/// Insert a row for the product and assign the store-generated id,
/// overwriting any id already present on the model.
pub async fn create(pool: &PgPool, product: &mut Product) -> Result<()> {
    tracing::debug!("creating product {}", product.name);

    let (id, created_at, updated_at): (i32, DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
        "INSERT INTO products (name, description, price, available, category)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, created_at, updated_at",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.available)
    .bind(product.category.name())
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::DataValidation(format!("failed to create product: {}", e)))?;

    product.id = Some(id);
    product.created_at = Some(created_at);
    product.updated_at = Some(updated_at);

    Ok(())
}

/// Persist the product's current fields to the row identified by its
/// id. A product that was never created cannot be updated, and an
/// update aimed at a vanished row is an error, never a silent no-op.
pub async fn update(pool: &PgPool, product: &mut Product) -> Result<()> {
    let id = product.id.ok_or_else(|| {
        AppError::DataValidation("cannot update a product without an id".to_string())
    })?;

    tracing::debug!("updating product {}", id);

    let row: Option<(DateTime<Utc>,)> = sqlx::query_as(
        "UPDATE products
         SET name = $1, description = $2, price = $3, available = $4, category = $5,
             updated_at = NOW()
         WHERE id = $6
         RETURNING updated_at",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.available)
    .bind(product.category.name())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::DataValidation(format!("failed to update product {}: {}", id, e)))?;

    match row {
        Some((updated_at,)) => {
            product.updated_at = Some(updated_at);
            Ok(())
        }
        None => Err(AppError::NotFound(format!(
            "product with id {} not found",
            id
        ))),
    }
}

/// Remove the row identified by the product's id. Deleting a row that
/// is already gone is not an error.
pub async fn delete(pool: &PgPool, product: &Product) -> Result<()> {
    let id = product.id.ok_or_else(|| {
        AppError::DataValidation("cannot delete a product without an id".to_string())
    })?;

    tracing::debug!("deleting product {}", id);

    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| AppError::DataValidation(format!("failed to delete product {}: {}", id, e)))?;

    Ok(())
}

pub async fn all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE name = $1")
        .bind(name)
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn find_by_availability(pool: &PgPool, available: bool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE available = $1")
        .bind(available)
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn find_by_category(pool: &PgPool, category: Category) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE category = $1")
        .bind(category.name())
        .fetch_all(pool)
        .await?;

    Ok(products)
}

/// Equality lookup by price. Accepts either a typed decimal or its
/// textual representation; both forms are normalized to the same
/// decimal before comparison.
pub async fn find_by_price(pool: &PgPool, price: impl Into<PriceFilter>) -> Result<Vec<Product>> {
    let price = price.into().normalize()?;

    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE price = $1")
        .bind(price)
        .fetch_all(pool)
        .await?;

    Ok(products)
}

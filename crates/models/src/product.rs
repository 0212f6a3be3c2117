//! The `product` table and the `Product` record handed between layers.
//!
//! `Model` is the persisted row; `Product` is the same record before it has
//! been stored, so its id is optional. The functions at the bottom are the
//! generic CRUD surface the service layer forwards to.

use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// `None` until the store assigns one.
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self { id: None, name: name.into(), description: description.into(), price }
    }

    /// Same record carrying `id`, replacing whatever id it had.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// True when every field except the id matches.
    pub fn same_fields(&self, other: &Product) -> bool {
        self.name == other.name && self.description == other.description && self.price == other.price
    }

    fn into_new_row(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name),
            description: Set(self.description),
            price: Set(self.price),
        }
    }

    fn into_replacement_row(self, id: i64) -> ActiveModel {
        ActiveModel {
            id: Unchanged(id),
            name: Set(self.name),
            description: Set(self.description),
            price: Set(self.price),
        }
    }
}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Self { id: Some(m.id), name: m.name, description: m.description, price: m.price }
    }
}

/// Every product, ordered by id.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Product>, ModelError> {
    let rows = Entity::find().order_by_asc(Column::Id).all(db).await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Product>, ModelError> {
    let row = Entity::find_by_id(id).one(db).await?;
    Ok(row.map(Product::from))
}

/// Insert when the product has no id or its id is unknown, otherwise
/// overwrite every column of the existing row.
///
/// An unknown id is not reused: the row gets a fresh id from the database.
pub async fn save(db: &DatabaseConnection, product: Product) -> Result<Product, ModelError> {
    let existing = match product.id {
        Some(id) => Entity::find_by_id(id).one(db).await?,
        None => None,
    };
    let stored = match existing {
        Some(row) => product.into_replacement_row(row.id).update(db).await?,
        None => product.into_new_row().insert(db).await?,
    };
    Ok(stored.into())
}

/// Delete by id; a missing row is not an error.
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<(), ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

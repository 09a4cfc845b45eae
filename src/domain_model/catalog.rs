use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct StoreId(pub i64);

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct ItemId(pub i64);

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct TagId(pub i64);

/// Store row without relations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainStore {
    pub id: StoreId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainItem {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainTag {
    pub id: TagId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub items: Vec<PlainItem>,
    pub tags: Vec<PlainTag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub store_id: StoreId,
    pub store: PlainStore,
    pub tags: Vec<PlainTag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub store_id: StoreId,
    pub store: PlainStore,
    pub items: Vec<PlainItem>,
}

//! The catalog use-cases shared by the REST API and the HTML screens:
//! repository reads, pagination, the read/create/update views and the
//! mutation contract (validate, persist, dispatch a change message).

pub mod albums;
pub mod artists;
pub mod messenger;
pub mod pagination;
pub mod tracks;
pub mod views;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Select};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use serde_valid::{validation::Errors, Validate};
use thiserror::Error;

use messenger::Change;
use pagination::Page;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(#[from] Errors),
    #[error("The referenced {resource} {id} does not exist")]
    MissingReference { resource: &'static str, id: i32 },
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),
}

impl Error {
    /// Structured description of what failed validation, keyed like the
    /// validator output (`{"errors": [...], "properties": {...}}`).
    pub fn violations(&self) -> Value {
        match self {
            Error::Validation(errors) => {
                let raw = errors.to_string();
                serde_json::from_str(&raw).unwrap_or(Value::String(raw))
            }
            Error::MissingReference { .. } => serde_json::json!({ "errors": [self.to_string()] }),
            Error::DbErr(_) => Value::Null,
        }
    }

    /// Flat list of the human readable violation messages.
    pub fn messages(&self) -> Vec<String> {
        fn collect(value: &Value, out: &mut Vec<String>) {
            match value {
                Value::String(s) => out.push(s.to_owned()),
                Value::Array(values) => values.iter().for_each(|v| collect(v, out)),
                Value::Object(map) => map.values().for_each(|v| collect(v, out)),
                _ => {}
            }
        }
        let mut out = Vec::new();
        collect(&self.violations(), &mut out);
        out
    }
}

/// Describes one catalog entity: how it is named at the HTTP boundary, its
/// three views and how each mutation is persisted.
#[async_trait]
pub trait Resource: EntityTrait + Send + Sync + 'static {
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    type Read: Serialize + for<'a> From<&'a Self::Model> + Send;
    type Create: DeserializeOwned + Validate + Send;
    type Update: DeserializeOwned + Validate + Send;

    fn id_column() -> Self::Column;
    fn id(model: &Self::Model) -> i32;

    async fn persist_new<C>(db: &C, payload: Self::Create) -> Result<Self::Model, Error>
    where
        C: ConnectionTrait;

    /// Applies the fields present in `payload` onto `model`, leaving the
    /// others untouched.
    async fn apply_update<C>(
        db: &C,
        model: Self::Model,
        payload: Self::Update,
    ) -> Result<Self::Model, Error>
    where
        C: ConnectionTrait;

    async fn remove<C>(db: &C, model: Self::Model) -> Result<(), Error>
    where
        C: ConnectionTrait;
}

pub fn find_all<R: Resource>() -> Select<R> {
    R::find().order_by_asc(R::id_column())
}

pub async fn find_by_id<R, C>(db: &C, id: i32) -> Result<Option<R::Model>, DbErr>
where
    R: Resource,
    C: ConnectionTrait,
{
    R::find().filter(R::id_column().eq(id)).one(db).await
}

pub async fn list<R, C>(db: &C, page: u64) -> Result<Page<R::Model>, DbErr>
where
    R: Resource,
    R::Model: Sync,
    C: ConnectionTrait,
{
    pagination::paginate(db, find_all::<R>(), page).await
}

pub async fn create<R, C>(db: &C, payload: R::Create) -> Result<R::Model, Error>
where
    R: Resource,
    C: ConnectionTrait,
{
    payload.validate()?;
    let model = R::persist_new(db, payload).await?;
    let id = R::id(&model);
    tracing::info!(resource = R::SINGULAR, id, "Created");
    messenger::resource_changed(db, R::SINGULAR, id, Change::Created).await?;
    Ok(model)
}

pub async fn update<R, C>(db: &C, model: R::Model, payload: R::Update) -> Result<R::Model, Error>
where
    R: Resource,
    C: ConnectionTrait,
{
    payload.validate()?;
    let model = R::apply_update(db, model, payload).await?;
    let id = R::id(&model);
    tracing::info!(resource = R::SINGULAR, id, "Updated");
    messenger::resource_changed(db, R::SINGULAR, id, Change::Updated).await?;
    Ok(model)
}

pub async fn delete<R, C>(db: &C, model: R::Model) -> Result<(), Error>
where
    R: Resource,
    C: ConnectionTrait,
{
    let id = R::id(&model);
    R::remove(db, model).await?;
    tracing::info!(resource = R::SINGULAR, id, "Deleted");
    messenger::resource_changed(db, R::SINGULAR, id, Change::Deleted).await?;
    Ok(())
}

use axum::extract::{Query, State};
use sea_orm::TransactionTrait;
use serde_json::{json, Map, Value};

use crate::{
    api::{
        extract::{Json, Path},
        Error,
    },
    catalog::{self, pagination::PageQuery, Resource},
    AppState,
};

fn wrap(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

pub async fn list<R>(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, Error>
where
    R: Resource,
    R::Model: Sync,
{
    let page = catalog::list::<R, _>(&state.db, query.number()).await?;
    let items = page.items.iter().map(R::Read::from).collect::<Vec<_>>();
    let mut body = wrap(R::PLURAL, serde_json::to_value(items)?);
    if let Value::Object(map) = &mut body {
        map.insert(
            "currentPageNumber".to_string(),
            json!(page.current_page_number),
        );
    }
    Ok(Json(body))
}

pub async fn show<R>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, Error>
where
    R: Resource,
{
    let model = catalog::find_by_id::<R, _>(&state.db, id)
        .await?
        .ok_or(Error::NotFound)?;
    let read = serde_json::to_value(R::Read::from(&model))?;
    Ok(Json(wrap(R::SINGULAR, read)))
}

pub async fn create<R>(
    State(state): State<AppState>,
    Json(payload): Json<R::Create>,
) -> Result<Json<R::Read>, Error>
where
    R: Resource,
{
    let tx = state.db.begin().await?;
    let model = catalog::create::<R, _>(&tx, payload).await?;
    tx.commit().await?;
    Ok(Json(R::Read::from(&model)))
}

pub async fn update<R>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<R::Update>,
) -> Result<Json<R::Read>, Error>
where
    R: Resource,
{
    let tx = state.db.begin().await?;
    let model = catalog::find_by_id::<R, _>(&tx, id)
        .await?
        .ok_or(Error::NotFound)?;
    let model = catalog::update::<R, _>(&tx, model, payload).await?;
    tx.commit().await?;
    Ok(Json(R::Read::from(&model)))
}

pub async fn delete<R>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, Error>
where
    R: Resource,
{
    let tx = state.db.begin().await?;
    let model = catalog::find_by_id::<R, _>(&tx, id)
        .await?
        .ok_or(Error::NotFound)?;
    catalog::delete::<R, _>(&tx, model).await?;
    tx.commit().await?;
    Ok(Json(json!({ "message": "Movie deleted successfully" })))
}

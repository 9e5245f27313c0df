//! Append-only writes into the `messenger_messages` transport table.
//! Delivery is left to whatever consumes the queue.

use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};
use serde::Serialize;
use time::{OffsetDateTime, PrimitiveDateTime};

pub const DEFAULT_QUEUE: &str = "default";
pub const RESOURCE_CHANGED: &str = "catalog.resource_changed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Serialize)]
struct ResourceChanged<'a> {
    resource: &'a str,
    id: i32,
    change: Change,
}

pub async fn dispatch<C>(
    db: &C,
    queue_name: &str,
    message_type: &str,
    body: String,
) -> Result<entity::MessengerMessage, DbErr>
where
    C: ConnectionTrait,
{
    let now = OffsetDateTime::now_utc();
    let now = PrimitiveDateTime::new(now.date(), now.time());
    let headers = serde_json::json!({ "type": message_type }).to_string();
    entity::MessengerMessageActive {
        id: ActiveValue::NotSet,
        body: ActiveValue::Set(body),
        headers: ActiveValue::Set(headers),
        queue_name: ActiveValue::Set(queue_name.to_owned()),
        created_at: ActiveValue::Set(now),
        available_at: ActiveValue::Set(now),
        delivered_at: ActiveValue::Set(None),
    }
    .insert(db)
    .await
}

pub async fn resource_changed<C>(
    db: &C,
    resource: &str,
    id: i32,
    change: Change,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let body = serde_json::to_string(&ResourceChanged {
        resource,
        id,
        change,
    })
    .map_err(|e| DbErr::Custom(e.to_string()))?;
    let message = dispatch(db, DEFAULT_QUEUE, RESOURCE_CHANGED, body).await?;
    tracing::debug!(message = message.id, resource, id, ?change, "Queued change message");
    Ok(())
}

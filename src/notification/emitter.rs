/// 알림 발행기
/// 경매 종료/위약금 생성의 부수효과로 호출된다. 알림 저장 실패는
/// 호출한 상태 전이를 되돌리지 않는다: emit_or_log로 감싸서 기록만 남긴다.
// region:    --- Imports
use crate::notification::model::{Notification, NotificationDraft};
use crate::query::queries;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Notification Sink
/// 알림 저장소 트레이트
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(&self, draft: NotificationDraft) -> Result<Notification, sqlx::Error>;
}

/// 알림 저장소 구현체
pub struct PostgresNotificationSink {
    pool: Arc<PgPool>,
}

impl PostgresNotificationSink {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSink for PostgresNotificationSink {
    async fn emit(&self, draft: NotificationDraft) -> Result<Notification, sqlx::Error> {
        let notification = sqlx::query_as::<_, Notification>(queries::INSERT_NOTIFICATION)
            .bind(draft.user_id)
            .bind(draft.kind)
            .bind(&draft.title)
            .bind(&draft.message)
            .bind(draft.auction_id)
            .bind(draft.product_id)
            .fetch_one(&*self.pool)
            .await?;

        info!(
            "{:<12} --> 알림 생성: 사용자 {} 종류 {}",
            "Notify", notification.user_id, notification.kind
        );
        Ok(notification)
    }
}

/// 실패를 전파하지 않는 알림 발행 (기록 후 계속)
pub async fn emit_or_log(sink: &impl NotificationSink, draft: NotificationDraft) {
    let user_id = draft.user_id;
    let kind = draft.kind;
    if let Err(e) = sink.emit(draft).await {
        error!(
            "{:<12} --> 알림 생성 실패 (사용자 {}, 종류 {}): {:?}",
            "Notify", user_id, kind, e
        );
    }
}
// endregion: --- Notification Sink

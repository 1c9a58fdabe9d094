/// 주기 점검 스케줄러
/// 프로세스 수명 동안 도는 두 개의 고정 주기 타이머:
/// 1. 60초마다 만료 경매 일괄 종료
/// 2. 60분마다 연체 결제 위약금 점검 (경매 기반 + 주문 기반)
/// 마지막 실행 시각을 저장하지 않으므로 재시작 후에는 다음 틱에서 밀린 대상을 그대로 집는다.
// region:    --- Imports
use crate::auction::engine;
use crate::database::DatabaseManager;
use crate::notification::emitter::PostgresNotificationSink;
use crate::penalty::assessor;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error};

// endregion: --- Imports

// region:    --- Sweep Scheduler
/// 만료 경매 점검 주기 (초)
pub const EXPIRY_SWEEP_INTERVAL_SECS: u64 = 60;

/// 연체 결제 점검 주기 (초)
pub const OVERDUE_SWEEP_INTERVAL_SECS: u64 = 60 * 60;

/// 주기 점검 스케줄러
pub struct SweepScheduler {
    db_manager: Arc<DatabaseManager>,
}

impl SweepScheduler {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }

    /// 두 타이머 시작 (각각 독립 태스크, 틱 실패는 기록 후 계속)
    pub fn start(&self) {
        let db_manager = Arc::clone(&self.db_manager);
        tokio::spawn(async move {
            let sink = PostgresNotificationSink::new(db_manager.get_pool());
            let mut interval = interval(Duration::from_secs(EXPIRY_SWEEP_INTERVAL_SECS));
            loop {
                interval.tick().await;
                match engine::sweep_expired(&db_manager, &sink).await {
                    Ok(count) => {
                        debug!("{:<12} --> 만료 경매 점검 완료: {}건 종료", "Scheduler", count)
                    }
                    Err(e) => error!(
                        "{:<12} --> 만료 경매 점검 중 오류 발생: {:?}",
                        "Scheduler", e
                    ),
                }
            }
        });

        let db_manager = Arc::clone(&self.db_manager);
        tokio::spawn(async move {
            let sink = PostgresNotificationSink::new(db_manager.get_pool());
            let mut interval = interval(Duration::from_secs(OVERDUE_SWEEP_INTERVAL_SECS));
            loop {
                interval.tick().await;
                match assessor::sweep_overdue_payments(&db_manager, &sink).await {
                    Ok(created) => debug!(
                        "{:<12} --> 연체 결제 점검 완료: 위약금 {}건 생성",
                        "Scheduler",
                        created.len()
                    ),
                    Err(e) => error!(
                        "{:<12} --> 연체 결제 점검 중 오류 발생: {:?}",
                        "Scheduler", e
                    ),
                }
            }
        });
    }
}
// endregion: --- Sweep Scheduler

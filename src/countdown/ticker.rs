/// 카운트다운 갱신 티커
/// 매 틱마다 시스템 시계를 다시 읽어 모든 카드의 남은 시간을 다시 계산한다.
/// 경과 시간을 누적하지 않으므로 한 틱이 늦어져도 다음 틱에서 바로잡힌다.
// region:    --- Imports
use crate::page::SharedPage;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

// endregion: --- Imports

const TICK_PERIOD: Duration = Duration::from_secs(1);

// region:    --- Countdown Ticker
/// 카운트다운 갱신 티커
pub struct CountdownTicker {
    page: SharedPage,
    period: Duration,
}

impl CountdownTicker {
    pub fn new(page: SharedPage) -> Self {
        Self {
            page,
            period: TICK_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// 티커 시작. 첫 갱신은 즉시 실행된다.
    ///
    /// 반환된 핸들을 abort 하기 전까지 계속 실행된다.
    pub fn start(&self) -> JoinHandle<()> {
        let page = Arc::clone(&self.page);
        let period = self.period;
        tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                Self::update_countdowns(&page).await;
            }
        })
    }

    /// 모든 카드의 카운트다운 갱신
    async fn update_countdowns(page: &SharedPage) {
        let now = Utc::now();
        let changed = page.lock().await.refresh_countdowns(now);
        debug!("{:<12} --> 카운트다운 갱신: {}건 변경", "Ticker", changed);
    }
}
// endregion: --- Countdown Ticker

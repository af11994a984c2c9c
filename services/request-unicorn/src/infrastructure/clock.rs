/// 時刻取得の抽象化
use chrono::{DateTime, Utc};

/// 現在時刻を返すトレイト
pub trait Clock: Send + Sync {
    /// 現在のUTC時刻
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻を返すClock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 常に同じ時刻を返すClock
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ライドリクエストとライドレコード
//
// リクエストボディのスキーマ（境界での明示的な検証）と、
// DynamoDBに1件ずつ書き込まれるライドレコードを定義する。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use super::Unicorn;

/// 乗車位置
///
/// 座標値の範囲チェックは行わない（ログ出力にのみ使用する）。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PickupLocation {
    /// 緯度
    pub latitude: f64,
    /// 経度
    pub longitude: f64,
}

/// ライドリクエストのボディ
///
/// `{"PickupLocation": {"Latitude": <number>, "Longitude": <number>}}`
/// 未知のフィールドは無視する。ライダーの識別子はボディからは受け取らない。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RideRequest {
    /// 乗車位置
    pub pickup_location: PickupLocation,
}

impl RideRequest {
    /// JSONボディをパース
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// 永続化されるライドレコード
///
/// 書き込み後に更新されることはない。
#[derive(Debug, Clone, PartialEq)]
pub struct RideRecord {
    /// ライドID（パーティションキー）
    pub ride_id: String,
    /// ライダーのユーザー名
    pub user: String,
    /// 配車されたユニコーン
    pub unicorn: Unicorn,
    /// リクエスト時刻
    pub request_time: DateTime<Utc>,
}

impl RideRecord {
    /// リクエスト時刻をISO-8601形式（ミリ秒精度、`Z`サフィックス）で取得
    ///
    /// 例: `2024-01-01T00:00:00.000Z`
    pub fn request_time_iso(&self) -> String {
        self.request_time
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

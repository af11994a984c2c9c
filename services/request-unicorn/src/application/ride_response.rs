// ライドリクエストのHTTPレスポンス生成
//
// 成功時は201 Createdでライド情報を、失敗時は500でエラーエンベロープを返す。
// どちらのレスポンスにもCORSヘッダーを付与する。

use lambda_http::http::StatusCode;
use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use lambda_http::{Body, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{RideRecord, Unicorn};

/// 到着予定時刻（固定値）
pub const ETA: &str = "30 seconds";

/// 201 Createdレスポンスのボディ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RideResponse<'a> {
    pub ride_id: &'a str,
    pub unicorn: &'a Unicorn,
    pub eta: &'a str,
    pub rider: &'a str,
}

impl<'a> RideResponse<'a> {
    pub fn from_record(record: &'a RideRecord) -> Self {
        Self {
            ride_id: &record.ride_id,
            unicorn: &record.unicorn,
            eta: ETA,
            rider: &record.user,
        }
    }
}

/// エラーレスポンスのボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorEnvelope {
    /// エラーメッセージ
    pub error: String,
    /// 相関ID（LambdaのリクエストID）
    pub reference: String,
}

/// ライド作成成功レスポンス（201）
///
/// `reference`はボディのシリアライズに失敗したときのエンベロープにだけ使う。
pub fn created_response(record: &RideRecord, reference: &str) -> Response<Body> {
    json_response(
        StatusCode::CREATED,
        &RideResponse::from_record(record),
        reference,
    )
}

/// エラーレスポンス（500）
///
/// 認可未設定もストレージ障害も同じ500で返す（既存クライアントとの互換のため）。
pub fn error_response(message: &str, reference: &str) -> Response<Body> {
    let envelope = ErrorEnvelope {
        error: message.to_string(),
        reference: reference.to_string(),
    };
    json_response(StatusCode::INTERNAL_SERVER_ERROR, &envelope, reference)
}

/// レスポンス共通ヘッダーを生成
///
/// - Content-Type: application/json
/// - Access-Control-Allow-Origin: *
pub fn build_cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    headers
}

fn json_response<T: Serialize>(status: StatusCode, body: &T, reference: &str) -> Response<Body> {
    let (status, json) = match serde_json::to_string(body) {
        Ok(json) => (status, json),
        Err(err) => {
            error!(reference = reference, error = %err, "レスポンスのシリアライズに失敗");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serialization_fallback(reference),
            )
        }
    };

    let mut response = Response::new(Body::Text(json));
    *response.status_mut() = status;
    *response.headers_mut() = build_cors_headers();

    response
}

/// シリアライズ失敗時のエンベロープ（`Value`の文字列化は失敗しない）
fn serialization_fallback(reference: &str) -> String {
    serde_json::json!({
        "Error": "Internal server error",
        "Reference": reference,
    })
    .to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::FLEET;
    use chrono::{TimeZone, Utc};
    use serde::Serializer;

    /// レスポンスボディを文字列として取得
    pub fn body_text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
            Body::Empty => String::new(),
            _ => panic!("予期しないBody型"),
        }
    }

    pub fn body_json(response: &Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_text(response)).unwrap()
    }

    fn sample_record() -> RideRecord {
        RideRecord {
            ride_id: "AAECAwQFBgcICQoLDA0ODw".to_string(),
            user: "the_username".to_string(),
            unicorn: FLEET[1],
            request_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_created_response_status() {
        let response = created_response(&sample_record(), "req-123");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_created_response_body() {
        let response = created_response(&sample_record(), "req-123");

        assert_eq!(
            body_json(&response),
            serde_json::json!({
                "RideId": "AAECAwQFBgcICQoLDA0ODw",
                "Unicorn": {"Name": "Gil", "Color": "White", "Gender": "Male"},
                "Eta": "30 seconds",
                "Rider": "the_username"
            })
        );
    }

    #[test]
    fn test_created_response_headers() {
        let response = created_response(&sample_record(), "req-123");

        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_error_response() {
        let response = error_response("Authorization not configured", "req-123");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let envelope: ErrorEnvelope = serde_json::from_str(&body_text(&response)).unwrap();
        assert_eq!(
            envelope,
            ErrorEnvelope {
                error: "Authorization not configured".to_string(),
                reference: "req-123".to_string(),
            }
        );
    }

    /// エンベロープのキーはPascalCaseの2つだけ
    #[test]
    fn test_error_envelope_keys() {
        let response = error_response("boom", "ref");
        let json = body_json(&response);

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(json["Error"], "boom");
        assert_eq!(json["Reference"], "ref");
    }

    /// 常にシリアライズに失敗するボディ
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unserializable body"))
        }
    }

    /// シリアライズに失敗しても相関IDを含む500エンベロープを返す
    #[test]
    fn test_json_response_serialization_failure_keeps_reference() {
        let response = json_response(StatusCode::CREATED, &Unserializable, "req-456");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let envelope: ErrorEnvelope = serde_json::from_str(&body_text(&response)).unwrap();
        assert_eq!(
            envelope,
            ErrorEnvelope {
                error: "Internal server error".to_string(),
                reference: "req-456".to_string(),
            }
        );
    }
}

/// DynamoDBにライドレコードを書き込むためのライドリポジトリ
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::Debug;
use thiserror::Error;

use crate::domain::{RideRecord, Unicorn};

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),
}

impl RepositoryError {
    /// 下位レイヤーから受け取ったエラーメッセージをそのまま取得
    pub fn message(&self) -> &str {
        match self {
            RepositoryError::WriteError(msg) => msg,
        }
    }
}

/// ライドレコード永続化用トレイト
///
/// 実際のDynamoDBとテスト用モックを差し替えられるようにする。
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// ライドレコードを1件書き込む
    ///
    /// ライドIDをキーとした単一アイテムのPutのみを行う。
    /// 読み取りや複数アイテムにまたがるトランザクションは行わない。
    ///
    /// # 引数
    /// * `record` - 書き込むライドレコード
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`
    /// * 失敗時は`Err(RepositoryError)`
    async fn put(&self, record: &RideRecord) -> Result<(), RepositoryError>;
}

/// RideRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoRideRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// ライドテーブル名
    table_name: String,
}

impl DynamoRideRepository {
    /// 新しいDynamoRideRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - ライドテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// ライドレコードをDynamoDBアイテムに変換
    ///
    /// 属性: RideId (S), User (S), Unicorn (M), UnicornName (S), RequestTime (S)
    pub fn to_item(record: &RideRecord) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (
                "RideId".to_string(),
                AttributeValue::S(record.ride_id.clone()),
            ),
            ("User".to_string(), AttributeValue::S(record.user.clone())),
            ("Unicorn".to_string(), unicorn_to_attribute(&record.unicorn)),
            (
                "UnicornName".to_string(),
                AttributeValue::S(record.unicorn.name.to_string()),
            ),
            (
                "RequestTime".to_string(),
                AttributeValue::S(record.request_time_iso()),
            ),
        ])
    }
}

/// ユニコーンをDynamoDBのMap属性に変換
fn unicorn_to_attribute(unicorn: &Unicorn) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        ("Name".to_string(), AttributeValue::S(unicorn.name.to_string())),
        (
            "Color".to_string(),
            AttributeValue::S(unicorn.color.to_string()),
        ),
        (
            "Gender".to_string(),
            AttributeValue::S(unicorn.gender.to_string()),
        ),
    ]))
}

/// SDKエラーからエンベロープに載せるメッセージを取り出す
///
/// サービスが返したメッセージがあればそれを使う。接続失敗・タイムアウトや
/// メッセージの無いエラーは原因チェーン全体を文字列化する
/// （`into_service_error`だと"unhandled error"しか残らない）。
fn write_error_message<E, R>(err: SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + StdError + 'static,
    R: Debug,
{
    if let Some(message) = err.as_service_error().and_then(|e| e.message()) {
        return message.to_string();
    }
    DisplayErrorContext(&err).to_string()
}

#[async_trait]
impl RideRepository for DynamoRideRepository {
    async fn put(&self, record: &RideRecord) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(record)))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(write_error_message(e)))?;

        Ok(())
    }
}

/// DynamoDB接続設定
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// ライドテーブル名の環境変数
pub const RIDES_TABLE_ENV: &str = "RIDES_TABLE";

/// 環境変数が未設定の場合のライドテーブル名
pub const DEFAULT_RIDES_TABLE: &str = "Rides";

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// テーブル名とクライアントを持つDynamoDB設定
///
/// テーブル名は環境変数`RIDES_TABLE`で設定する（未設定時は`Rides`）。
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// ライドテーブル名
    rides_table: String,
}

impl DynamoDbConfig {
    /// 環境からAWS設定を読み込み、環境変数からテーブル名を読み取って新しいDynamoDbConfigを作成
    ///
    /// 環境変数:
    /// - AWS認証情報: aws-configにより自動読み込み
    /// - RIDES_TABLE: ライド用DynamoDBテーブル名
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        let rides_table = rides_table_from_env()?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Ok(Self {
            client,
            rides_table,
        })
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, rides_table: String) -> Self {
        Self {
            client,
            rides_table,
        }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// ライドテーブル名を取得
    pub fn rides_table(&self) -> &str {
        &self.rides_table
    }
}

/// 環境変数からライドテーブル名を読み込む
///
/// 未設定ならデフォルト値、空白のみの値は設定ミスとしてエラーにする。
pub fn rides_table_from_env() -> Result<String, DynamoDbConfigError> {
    match std::env::var(RIDES_TABLE_ENV) {
        Ok(value) if value.trim().is_empty() => Err(DynamoDbConfigError::InvalidEnvVar(
            RIDES_TABLE_ENV.to_string(),
            "must not be empty".to_string(),
        )),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(DEFAULT_RIDES_TABLE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn test_invalid_env_var_error_display() {
        let error = DynamoDbConfigError::InvalidEnvVar(
            "RIDES_TABLE".to_string(),
            "must not be empty".to_string(),
        );
        assert_eq!(
            error.to_string(),
            "Invalid environment variable RIDES_TABLE: must not be empty"
        );
    }

    #[test]
    #[serial(rides_env)]
    fn test_rides_table_defaults_when_unset() {
        unsafe { remove_env(RIDES_TABLE_ENV) };

        assert_eq!(rides_table_from_env().unwrap(), "Rides");
    }

    #[test]
    #[serial(rides_env)]
    fn test_rides_table_from_env() {
        unsafe { set_env(RIDES_TABLE_ENV, " wildrydes-prod-rides ") };

        assert_eq!(rides_table_from_env().unwrap(), "wildrydes-prod-rides");

        unsafe { remove_env(RIDES_TABLE_ENV) };
    }

    #[test]
    #[serial(rides_env)]
    fn test_rides_table_rejects_blank_value() {
        unsafe { set_env(RIDES_TABLE_ENV, "   ") };

        let result = rides_table_from_env();
        assert!(matches!(
            result,
            Err(DynamoDbConfigError::InvalidEnvVar(ref key, _)) if key == "RIDES_TABLE"
        ));

        unsafe { remove_env(RIDES_TABLE_ENV) };
    }

    // 明示的な値でDynamoDbConfig構築のテスト
    #[tokio::test]
    async fn test_dynamodb_config_new() {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        let config = DynamoDbConfig::new(client, "test-rides".to_string());

        assert_eq!(config.rides_table(), "test-rides");
    }
}

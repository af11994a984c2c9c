/// POST /ride Lambdaエントリポイント
///
/// API Gateway（Cognitoオーソライザー付き）経由のライドリクエストを処理し、
/// ユニコーンを配車してライドをDynamoDBに記録する。
use lambda_http::{Error, Request, run, service_fn};
use request_unicorn::application::RequestUnicornHandler;
use request_unicorn::infrastructure::{
    DynamoDbConfig, DynamoRideRepository, SystemClock, ThreadRandomSource, init_logging,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDB設定を環境から読み込み（失敗時は初期化エラーとしてLambdaに報告）
    let config = DynamoDbConfig::from_env().await.inspect_err(|err| {
        error!(error = %err, "DynamoDB設定の読み込みに失敗");
    })?;

    info!(
        rides_table = config.rides_table(),
        "RequestUnicorn Lambda関数を初期化"
    );

    let ride_repo = DynamoRideRepository::new(
        config.client().clone(),
        config.rides_table().to_string(),
    );

    // ハンドラーはwarm start間で再利用する
    let handler = RequestUnicornHandler::new(ride_repo, ThreadRandomSource, SystemClock);
    let handler = &handler;

    run(service_fn(move |request: Request| async move {
        Ok::<_, Error>(handler.handle_request(&request).await)
    }))
    .await
}

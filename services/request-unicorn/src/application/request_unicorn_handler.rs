/// ライドリクエストハンドラー
///
/// 認可コンテキストを確認し、ボディをパースし、ユニコーンを選んで
/// ライドレコードを1件書き込み、201または500のレスポンスを返す。
use lambda_http::{Body, Request, Response};
use thiserror::Error;
use tracing::{Instrument, debug, error, info, info_span};

use super::request_context::{AuthorizerContext, correlation_id};
use super::ride_response::{created_response, error_response};
use crate::domain::{
    PickupLocation, RIDE_ID_BYTES, RideRecord, RideRequest, Unicorn, encode_ride_id,
    select_unicorn,
};
use crate::infrastructure::{Clock, RandomSource, RepositoryError, RideRepository};

/// ライドリクエスト処理のエラー型
///
/// どのバリアントも500のエラーエンベロープとして返される。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestUnicornError {
    /// 上流の認証ステップが実行されていない
    #[error("Authorization not configured")]
    AuthorizationNotConfigured,

    /// 認可コンテキストにユーザー名クレームが無い
    #[error("Missing cognito:username claim in authorizer context")]
    MissingUsername,

    /// リクエストボディが不正
    #[error("Invalid request body: {0}")]
    MalformedRequest(String),

    /// ライドレコードの書き込みに失敗
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RequestUnicornError {
    /// エラーエンベロープの`Error`に載せるメッセージ
    ///
    /// ストレージ障害は下位のメッセージをそのまま返す。
    pub fn envelope_message(&self) -> String {
        match self {
            RequestUnicornError::Repository(err) => err.message().to_string(),
            other => other.to_string(),
        }
    }
}

/// ライドリクエストを処理するハンドラー
///
/// 状態を持たず、コールドスタート時に1度だけ作成して全呼び出しで共有する。
pub struct RequestUnicornHandler<RR, RS, C>
where
    RR: RideRepository,
    RS: RandomSource,
    C: Clock,
{
    /// ライドリポジトリ
    ride_repo: RR,
    /// ライドIDとユニコーン選択用の乱数ソース
    random: RS,
    /// RequestTime用の時計
    clock: C,
}

impl<RR, RS, C> RequestUnicornHandler<RR, RS, C>
where
    RR: RideRepository,
    RS: RandomSource,
    C: Clock,
{
    /// 新しいRequestUnicornHandlerを作成
    pub fn new(ride_repo: RR, random: RS, clock: C) -> Self {
        Self {
            ride_repo,
            random,
            clock,
        }
    }

    /// API GatewayのHTTPリクエストを処理
    ///
    /// リクエストコンテキストから認可コンテキストと相関IDを取り出して`handle`に委譲する。
    pub async fn handle_request(&self, request: &Request) -> Response<Body> {
        let authorizer = AuthorizerContext::from_request(request);
        let reference = correlation_id(request);

        self.handle(request.body().as_ref(), authorizer.as_ref(), &reference)
            .await
    }

    /// ライドリクエストを処理してレスポンスを生成
    ///
    /// # 処理フロー
    /// 1. 認可コンテキストの有無を確認（無ければ書き込みせずに500）
    /// 2. ボディをパース
    /// 3. ライドIDを生成
    /// 4. ユニコーンを選択
    /// 5. ライドレコードを1件書き込み
    /// 6. 成功時は201、失敗時は500のエラーエンベロープ
    ///
    /// エラーは`Err`として呼び出し元に伝播せず、すべてレスポンスに変換する。
    /// 処理中のログはすべて`request_unicorn`スパン（`reference`付き）の中で出力される。
    pub async fn handle(
        &self,
        body: &[u8],
        authorizer: Option<&AuthorizerContext>,
        reference: &str,
    ) -> Response<Body> {
        let span = info_span!("request_unicorn", reference = reference);

        async {
            info!(
                authorized = authorizer.is_some(),
                body = %String::from_utf8_lossy(body),
                "ライドリクエスト受信"
            );

            match self.request_ride(body, authorizer).await {
                Ok(record) => created_response(&record, reference),
                Err(err) => {
                    error!(error = %err, "ライドリクエストの処理に失敗");
                    error_response(&err.envelope_message(), reference)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// ライドを作成して永続化し、書き込んだレコードを返す
    pub async fn request_ride(
        &self,
        body: &[u8],
        authorizer: Option<&AuthorizerContext>,
    ) -> Result<RideRecord, RequestUnicornError> {
        let authorizer = authorizer.ok_or(RequestUnicornError::AuthorizationNotConfigured)?;
        let rider = authorizer
            .username()
            .ok_or(RequestUnicornError::MissingUsername)?;

        let request = RideRequest::from_slice(body)
            .map_err(|e| RequestUnicornError::MalformedRequest(e.to_string()))?;

        let ride_id = self.generate_ride_id();
        let unicorn = self.find_unicorn(&request.pickup_location);

        let record = RideRecord {
            ride_id,
            user: rider.to_string(),
            unicorn: *unicorn,
            request_time: self.clock.now(),
        };

        self.ride_repo.put(&record).await?;

        info!(
            ride_id = %record.ride_id,
            rider = %record.user,
            unicorn = record.unicorn.name,
            "ライドを記録"
        );

        Ok(record)
    }

    /// 128ビットの乱数からライドIDを生成
    fn generate_ride_id(&self) -> String {
        let mut bytes = [0u8; RIDE_ID_BYTES];
        self.random.fill_bytes(&mut bytes);
        encode_ride_id(&bytes)
    }

    /// 乗車位置に向かわせるユニコーンを選ぶ
    ///
    /// 位置は選択に使わず、ログに残すだけ。
    fn find_unicorn(&self, pickup_location: &PickupLocation) -> &'static Unicorn {
        let unicorn = select_unicorn(self.random.next_unit());
        debug!(
            latitude = pickup_location.latitude,
            longitude = pickup_location.longitude,
            unicorn = unicorn.name,
            "ユニコーンを選択"
        );
        unicorn
    }
}

// API Gatewayリクエストコンテキストからの情報抽出
//
// Cognitoオーソライザーが付与したクレームからライダーのユーザー名を、
// Lambdaコンテキストから相関IDを取り出す。認証そのものは上流で完了している。

use lambda_http::request::RequestContext;
use lambda_http::{Request, RequestExt};
use serde_json::Value;

/// ユーザー名を保持するCognitoクレーム名
pub const USERNAME_CLAIM: &str = "cognito:username";

/// 相関IDを特定できなかった場合の値
pub const UNKNOWN_REFERENCE: &str = "unknown";

/// 上流のオーソライザーが付与した認可コンテキスト
///
/// コンテキストが存在すること自体が「認証が実行された」ことを示す。
/// ユーザー名クレームが欠けている場合もコンテキストとしては存在する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerContext {
    username: Option<String>,
}

impl AuthorizerContext {
    /// ユーザー名を指定して作成（空文字列はユーザー名なしとして扱う）
    pub fn new(username: Option<String>) -> Self {
        Self {
            username: username.filter(|name| !name.is_empty()),
        }
    }

    /// REST API（Cognitoユーザープールオーソライザー）の`claims`オブジェクトから作成
    pub fn from_claims(claims: Option<&Value>) -> Self {
        let username = claims
            .and_then(|claims| claims.get(USERNAME_CLAIM))
            .and_then(Value::as_str)
            .map(str::to_string);
        Self::new(username)
    }

    /// 認証済みライダーのユーザー名
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// HTTPリクエストのリクエストコンテキストから認可コンテキストを抽出
    ///
    /// - HTTP API（JWTオーソライザー）: `authorizer.jwt.claims`
    /// - REST API（Cognitoオーソライザー）: `authorizer.claims`
    ///
    /// オーソライザーが何も付与していなければ`None`を返す。
    pub fn from_request(request: &Request) -> Option<Self> {
        let authorizer = request.request_context_ref()?.authorizer()?;

        if let Some(jwt) = authorizer.jwt.as_ref() {
            return Some(Self::new(jwt.claims.get(USERNAME_CLAIM).cloned()));
        }

        // REST APIでオーソライザー未設定の場合、フィールドは空になる
        if authorizer.fields.is_empty() {
            return None;
        }

        Some(Self::from_claims(authorizer.fields.get("claims")))
    }
}

/// エラーレスポンスに載せる相関IDを取得
///
/// LambdaのリクエストIDを優先し、無ければAPI GatewayのリクエストIDを使う。
pub fn correlation_id(request: &Request) -> String {
    if let Some(context) = request.lambda_context_ref() {
        return context.request_id.clone();
    }

    let gateway_request_id = match request.request_context_ref() {
        Some(RequestContext::ApiGatewayV1(context)) => context.request_id.clone(),
        Some(RequestContext::ApiGatewayV2(context)) => context.request_id.clone(),
        _ => None,
    };

    gateway_request_id.unwrap_or_else(|| UNKNOWN_REFERENCE.to_string())
}

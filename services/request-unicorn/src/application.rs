// アプリケーション層モジュール
pub mod request_context;
pub mod request_unicorn_handler;
pub mod ride_response;

// 再エクスポート
pub use request_context::{AuthorizerContext, USERNAME_CLAIM, correlation_id};
pub use request_unicorn_handler::{RequestUnicornError, RequestUnicornHandler};
pub use ride_response::{ETA, ErrorEnvelope, RideResponse, created_response, error_response};

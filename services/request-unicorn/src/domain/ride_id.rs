/// Ride identifier encoding
///
/// ライドIDは16バイト（128ビット）の乱数をURL-safe base64（パディングなし）で
/// エンコードした文字列。URLパスやDynamoDBのパーティションキーにそのまま使える。
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// ライドIDの元になる乱数のバイト数
pub const RIDE_ID_BYTES: usize = 16;

/// 乱数バイト列をライドID文字列にエンコード
///
/// `+` と `/` はそれぞれ `-` と `_` に置き換わり、`=` は付与されない。
pub fn encode_ride_id(bytes: &[u8; RIDE_ID_BYTES]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// 乱数ソース
///
/// ライドIDの生成とユニコーン選択で使う乱数を抽象化する。
/// 本番ではスレッドローカルのCSPRNG、テストではシード固定の乱数を使う。
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;

/// 乱数ソースのトレイト
///
/// 同時実行される呼び出し間で共有されるため`Send + Sync`を要求する。
pub trait RandomSource: Send + Sync {
    /// バッファを乱数バイトで埋める
    fn fill_bytes(&self, dest: &mut [u8]);

    /// [0, 1)の一様乱数を返す
    fn next_unit(&self) -> f64;
}

/// `rand::thread_rng`（OSエントロピーで再シードされるChaCha系CSPRNG）を使う乱数ソース
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::thread_rng().fill_bytes(dest);
    }

    fn next_unit(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// シード固定の乱数ソース
///
/// 同じシードからは同じ系列が得られる。
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    /// シードを指定して作成
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        // ポイズニングされても乱数状態は壊れないのでそのまま使う
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.fill_bytes(dest);
    }

    fn next_unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.r#gen::<f64>()
    }
}

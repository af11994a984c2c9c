// ユニコーンとフリート定義
//
// 配車対象となるユニコーンは起動時に確定する固定の3頭のみ。
// 実行中に追加・変更・削除されることはない。

use serde::Serialize;

/// 配車可能なユニコーン
///
/// レスポンスとDynamoDBアイテムの両方でPascalCaseのキーを使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Unicorn {
    /// ユニコーン名
    pub name: &'static str,
    /// 毛色
    pub color: &'static str,
    /// 性別
    pub gender: &'static str,
}

/// 配車可能なユニコーンの一覧（プロセス全体で共有する読み取り専用データ）
pub static FLEET: [Unicorn; 3] = [
    Unicorn {
        name: "Angel",
        color: "White",
        gender: "Female",
    },
    Unicorn {
        name: "Gil",
        color: "White",
        gender: "Male",
    },
    Unicorn {
        name: "Rocinante",
        color: "Yellow",
        gender: "Female",
    },
];

/// [0, 1)の一様乱数サンプルからユニコーンを1頭選ぶ
///
/// インデックスは `floor(sample × フリート数)`。範囲外のサンプルは
/// 両端のユニコーンに丸める（NaNは先頭扱い）。
pub fn select_unicorn(sample: f64) -> &'static Unicorn {
    let last = FLEET.len() - 1;
    // f64 -> usize のキャストは負値とNaNを0に飽和させる
    let index = ((sample * FLEET.len() as f64).floor() as usize).min(last);
    &FLEET[index]
}

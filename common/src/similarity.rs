//! タイトル類似度（編集距離ベース）
//!
//! スコアは同一の絞り込み結果内での順位付けにのみ使う。
//! 異なる絞り込みレベルや参照レコード間では比較できない。

/// 類似度スコアラー
pub trait Scorer {
    /// (0, 1] のスコアを返す。大きいほど類似。
    fn score(&self, reference: &str, candidate: &str) -> f64;
}

/// レーベンシュタイン距離によるスコアラー
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl Scorer for EditDistanceScorer {
    fn score(&self, reference: &str, candidate: &str) -> f64 {
        let distance = levenshtein_distance(&reference.to_lowercase(), &candidate.to_lowercase());
        score_from_distance(distance)
    }
}

/// 距離をスコアに変換: 1 / (1 + distance)
pub fn score_from_distance(distance: usize) -> f64 {
    1.0 / (1.0 + distance as f64)
}

/// レーベンシュタイン距離を計算（文字単位）
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // 短い方を列にして1行分のバッファで計算
    let (long, short) = if a_chars.len() >= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

use ndarray::{Array2, ArrayView1};

/// Row-wise softmax. Each row is shifted by its max before exponentiation.
pub fn softmax(logits: &Array2<f64>) -> Array2<f64> {
    let mut probs = logits.clone();
    for mut row in probs.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
        row.mapv_inplace(|x| (x - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|x| x / sum);
    }
    probs
}

pub fn sigmoid_scalar(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Elementwise logistic function.
pub fn sigmoid(logits: &Array2<f64>) -> Array2<f64> {
    logits.mapv(sigmoid_scalar)
}

/// Index of the largest value; ties resolve to the first one.
pub fn argmax(row: ArrayView1<f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &value) in row.iter().enumerate() {
        if value > best_value {
            best = i;
            best_value = value;
        }
    }
    best
}

/// 1 where `probs > threshold`, 0 otherwise.
pub fn threshold(probs: &Array2<f64>, threshold: f64) -> Array2<i64> {
    probs.mapv(|p| i64::from(p > threshold))
}

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// 每個積分法回傳結果時保留的小數位數。
pub const RESULT_DIGITS: u32 = 5;

/// 比較不同積分法結果時截斷的小數位數。
pub const COMPARISON_DIGITS: u32 = 3;

const INTEGRAL_THRESHOLD: f64 = 4503599627370496.0;

/// 四捨六入五成雙（round half to even），與 NumPy 的 `np.round` 相同。
///
/// `digits > 22` 時拆成兩次縮放，避免 `10^digits` 溢位。
pub fn round(x: f64, digits: u32) -> f64 {
    let (pow1, pow2) = if digits > 22 {
        ((10.0 as f64).powi((digits - 22) as i32), 1e22)
    } else {
        ((10.0 as f64).powi(digits as i32), 1.0)
    };

    let y = (x * pow1) * pow2;
    if !y.is_finite() {
        return x;
    }

    (y.round_ties_even() / pow2) / pow1
}

/// 以十進位精確截斷（趨近於零），不做四捨五入。
///
/// 先轉為 `Decimal` 再截斷，避免 `0.29 * 1000.0 = 289.999...` 這類二進位誤差。
/// `x` 為 NaN 或無窮大時回傳 `None`。
pub fn truncate(x: f64, digits: u32) -> Option<Decimal> {
    Decimal::from_f64(x).map(|value| value.trunc_with_scale(digits))
}

/// 以浮點數截斷（趨近於零），供超出 `Decimal` 範圍（|x| > 7.9e28）的有限值使用。
///
/// |x| ≥ 2^52 的 f64 已經沒有小數部分，直接回傳 `x`。
pub fn truncate_float(x: f64, digits: u32) -> f64 {
    if !(x.abs() < INTEGRAL_THRESHOLD) {
        return x;
    }
    let scale = (10.0 as f64).powi(digits as i32);
    (x * scale).trunc() / scale
}

use super::quadratureerror::QuadratureError;

pub const NON_INTEGER_STEP_MESSAGE: &'static str = "Stride must be an integer";
pub const NON_POSITIVE_STEP_MESSAGE: &'static str = "Step must be at least 1";
pub const SIMPSON_ODD_STEP_MESSAGE: &'static str =
    "Simpson rule is only implemented for even number of subintervals.";
pub const COMPARISON_ODD_STEP_MESSAGE: &'static str =
    "To compare methods we need Simpson, which is only implemented for even number of subintervals.";

/// 分割數 n 的來源型別。
///
/// 整數與浮點數都可以直接丟給積分法，由 `to_step` 統一驗證：
/// 必須是整數值且至少為 1，否則回傳 `QuadratureError::Step`。
pub trait StepCount: Copy {
    fn to_step(self) -> Result<usize, QuadratureError>;
}

macro_rules! impl_step_count_for_integer {
    ($($t:ty),*) => {
        $(
            impl StepCount for $t {
                fn to_step(self) -> Result<usize, QuadratureError> {
                    if self < 1 {
                        return Err(QuadratureError::Step(NON_POSITIVE_STEP_MESSAGE.to_owned()));
                    }
                    usize::try_from(self).map_err(|_| {
                        QuadratureError::Step(format!("Step {} is too large", self))
                    })
                }
            }
        )*
    };
}

impl_step_count_for_integer!(i32, i64, u32, u64, usize);

impl StepCount for f64 {
    fn to_step(self) -> Result<usize, QuadratureError> {
        validate_step(self)
    }
}

/// 驗證以浮點數表示的分割數：先檢查是否為整數，再檢查是否 >= 1。
pub fn validate_step(n: f64) -> Result<usize, QuadratureError> {
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(QuadratureError::Step(NON_INTEGER_STEP_MESSAGE.to_owned()));
    }
    if n < 1.0 {
        return Err(QuadratureError::Step(NON_POSITIVE_STEP_MESSAGE.to_owned()));
    }
    if n >= usize::MAX as f64 {
        return Err(QuadratureError::Step(format!("Step {} is too large", n)));
    }
    Ok(n as usize)
}

pub fn require_even(n: usize, message: &str) -> Result<(), QuadratureError> {
    if n % 2 == 0 {
        Ok(())
    } else {
        Err(QuadratureError::OddStep(message.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_steps() {
        assert_eq!(8i32.to_step(), Ok(8));
        assert_eq!(1usize.to_step(), Ok(1));
        assert_eq!(3u64.to_step(), Ok(3));
    }

    #[test]
    fn test_non_positive_steps() {
        for n in [0i64, -3, i64::MIN] {
            assert_eq!(
                n.to_step(),
                Err(QuadratureError::Step(NON_POSITIVE_STEP_MESSAGE.to_owned()))
            );
        }
        assert!(matches!(0u32.to_step(), Err(QuadratureError::Step(_))));
    }

    #[test]
    fn test_fractional_steps() {
        for n in [2.5, 0.5, -1.25, f64::NAN, f64::INFINITY] {
            assert_eq!(
                validate_step(n),
                Err(QuadratureError::Step(NON_INTEGER_STEP_MESSAGE.to_owned()))
            );
        }
    }

    #[test]
    fn test_whole_float_steps() {
        assert_eq!(validate_step(4.0), Ok(4));
        assert!(matches!(validate_step(0.0), Err(QuadratureError::Step(_))));
        assert!(matches!(validate_step(-3.0), Err(QuadratureError::Step(_))));
    }

    #[test]
    fn test_require_even() {
        assert_eq!(require_even(4, SIMPSON_ODD_STEP_MESSAGE), Ok(()));
        assert_eq!(
            require_even(5, SIMPSON_ODD_STEP_MESSAGE),
            Err(QuadratureError::OddStep(SIMPSON_ODD_STEP_MESSAGE.to_owned()))
        );
    }
}

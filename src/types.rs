//! 基础数值类型
//!
//! 容量、流量、残量、瓶颈值在一次计算中统一使用同一种数值类型，
//! 整数输入用 `i64` 精确计算，小数输入用 `f64`。

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// 流量数值类型
///
/// 必须是有符号类型：净流量矩阵是反对称的，反向分量为负。
pub trait FlowValue:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + FromStr
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// 零值
    const ZERO: Self;

    /// 是否为合法容量（非负且有限）
    fn is_valid_capacity(self) -> bool;

    /// 转为 f64（用于指标与日志）
    fn to_f64(self) -> f64;

    /// 加法，溢出（或 f64 结果非有限）时返回 `None`
    fn checked_add(self, other: Self) -> Option<Self>;

    /// 数值相等；f64 允许末位舍入误差
    fn approx_eq(self, other: Self) -> bool {
        self == other
    }

    /// 是否严格为正
    fn is_positive(self) -> bool {
        self > Self::ZERO
    }

    /// 取较小值
    fn min_of(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl FlowValue for i64 {
    const ZERO: Self = 0;

    fn is_valid_capacity(self) -> bool {
        self >= 0
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn checked_add(self, other: Self) -> Option<Self> {
        i64::checked_add(self, other)
    }
}

impl FlowValue for f64 {
    const ZERO: Self = 0.0;

    fn is_valid_capacity(self) -> bool {
        self.is_finite() && self >= 0.0
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn checked_add(self, other: Self) -> Option<Self> {
        let sum = self + other;
        sum.is_finite().then_some(sum)
    }

    fn approx_eq(self, other: Self) -> bool {
        let scale = self.abs().max(other.abs());
        (self - other).abs() <= scale * f64::EPSILON * 16.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_validity() {
        assert!(0i64.is_valid_capacity());
        assert!(!(-1i64).is_valid_capacity());
        assert!(2.5f64.is_valid_capacity());
        assert!(!f64::NAN.is_valid_capacity());
        assert!(!f64::INFINITY.is_valid_capacity());
        assert!(!(-0.5f64).is_valid_capacity());
    }

    #[test]
    fn test_min_of() {
        assert_eq!(3i64.min_of(7), 3);
        assert_eq!(7i64.min_of(3), 3);
        assert_eq!(1.5f64.min_of(0.5), 0.5);
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(2i64.checked_add(3), Some(5));
        assert_eq!(i64::MAX.checked_add(1), None);
        assert_eq!(1.5f64.checked_add(1.0), Some(2.5));
        assert_eq!(1e308f64.checked_add(1e308), None);
    }

    #[test]
    fn test_approx_eq() {
        assert!(0.2f64.approx_eq(0.3 - 0.1));
        assert!(!0.2f64.approx_eq(0.2001));
        assert!(0.0f64.approx_eq(0.0));
        assert!(!3i64.approx_eq(4));
    }

    #[test]
    fn test_display_matches_label_format() {
        // 整数值的 f64 不带小数点
        assert_eq!(format!("{}/{}", 5.0f64, 10.0f64), "5/10");
        assert_eq!(format!("{}/{}", 2.5f64, 10.0f64), "2.5/10");
    }
}

//! 库内错误类型。命令行入口再用 `anyhow` 包装上下文。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BwtError {
    /// 输入序列中的终止符（sentinel）数量不是恰好一个
    #[error("invalid sequence: expected exactly one sentinel '{sentinel}', found {found}")]
    InvalidSequence { sentinel: char, found: usize },

    /// 逆变换失败（BWT 损坏或格式错误）
    #[error("reconstruction failed: {0}")]
    Reconstruction(String),

    /// 输入超过配置的长度上限（朴素算法为 O(n² log n)）
    #[error("input of {len} symbols exceeds the configured limit of {max}")]
    InputTooLong { len: usize, max: usize },

    /// BWT 与后缀数组长度不一致，不是同一次变换的产物
    #[error("BWT length {bwt} does not match suffix array length {sa}")]
    Mismatch { bwt: usize, sa: usize },

    /// SA 不是 0..n 的排列（越界或重复）
    #[error("suffix array entry {entry} is out of range or repeated for length {len}")]
    NotAPermutation { entry: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, BwtError>;

//! 变换与索引：旋转排序 → BWT / 后缀数组 → FM 索引 → 逆变换。

pub mod bwt;
pub mod fm;
pub mod invert;
pub mod rotation;
pub mod sa;

use crate::error::{BwtError, Result};
use crate::util::alphabet;

/// 默认输入长度上限。旋转矩阵占 O(n²) 内存，排序为 O(n² log n)。
pub const DEFAULT_MAX_LEN: usize = 4096;

/// 构建参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwtOpt {
    /// 终止符，排序时永远最小
    pub sentinel: u8,
    /// 可接受的最大序列长度（含终止符）
    pub max_len: usize,
}

impl Default for BwtOpt {
    fn default() -> Self {
        Self { sentinel: alphabet::DEFAULT_SENTINEL, max_len: DEFAULT_MAX_LEN }
    }
}

impl BwtOpt {
    pub fn with_sentinel(sentinel: u8) -> Self {
        Self { sentinel, ..Self::default() }
    }

    pub(crate) fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_len {
            tracing::warn!(len, max = self.max_len, "input rejected: too long");
            return Err(BwtError::InputTooLong { len, max: self.max_len });
        }
        Ok(())
    }

    /// 校验输入：长度不超上限，且恰好含一个终止符。
    pub fn check_sequence(&self, seq: &[u8]) -> Result<()> {
        self.check_len(seq.len())?;
        let found = alphabet::count_sentinels(seq, self.sentinel);
        if found != 1 {
            tracing::warn!(found, sentinel = %(self.sentinel as char), "input rejected: sentinel count");
            return Err(BwtError::InvalidSequence { sentinel: self.sentinel as char, found });
        }
        Ok(())
    }
}

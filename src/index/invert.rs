use std::collections::HashMap;
use std::fmt;

use super::BwtOpt;
use crate::error::{BwtError, Result};
use crate::util::alphabet;

/// 秩标签：符号及其在所在列中从左到右的第几次出现（从 0 计）。
/// 第一列中第 k 个 c 与 BWT 列中第 k 个 c 对应同一个文本位置（LF 映射）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankTag {
    pub symbol: u8,
    pub rank: usize,
}

impl fmt::Display for RankTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol as char, self.rank)
    }
}

/// 旋转矩阵第一列：BWT 符号升序排列
pub fn first_column(bwt: &[u8], sentinel: u8) -> Vec<u8> {
    alphabet::sorted_symbols(bwt, sentinel)
}

/// 旋转矩阵最后一列，即 BWT 本身
pub fn last_column(bwt: &[u8]) -> Vec<u8> {
    bwt.to_vec()
}

/// 给一列打秩标签。计数只在本次调用内有效，每列从 0 重新开始。
pub fn rank_tags(column: &[u8]) -> Vec<RankTag> {
    let mut seen: HashMap<u8, usize> = HashMap::new();
    column
        .iter()
        .map(|&symbol| {
            let slot = seen.entry(symbol).or_insert(0);
            let tag = RankTag { symbol, rank: *slot };
            *slot += 1;
            tag
        })
        .collect()
}

/// 逆变换：从 (终止符, 0) 出发沿 LF 映射走 n 步还原原序列。
///
/// 每一步在 BWT 列中找到当前标签所在的行 i，记下其符号，
/// 再取第一列第 i 行的标签作为下一步。这样收集到的是
/// 终止符后接原序列的前 n-1 个符号，最后左旋一位把终止符放回末尾。
///
/// 终止符数量不为 1、标签缺失或行走提前回到终止符（BWT 损坏）时返回
/// [`BwtError::Reconstruction`]，不会无限循环。
pub fn invert(bwt: &[u8], opt: &BwtOpt) -> Result<Vec<u8>> {
    opt.check_len(bwt.len())?;
    let n = bwt.len();
    let found = alphabet::count_sentinels(bwt, opt.sentinel);
    if found != 1 {
        return Err(BwtError::Reconstruction(format!(
            "expected exactly one sentinel '{}', found {}",
            opt.sentinel as char, found
        )));
    }

    let first = rank_tags(&first_column(bwt, opt.sentinel));
    let last = rank_tags(&last_column(bwt));
    let row_of: HashMap<RankTag, usize> = last.iter().enumerate().map(|(i, &t)| (t, i)).collect();

    let start = RankTag { symbol: opt.sentinel, rank: 0 };
    let mut current = start;
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let i = *row_of.get(&current).ok_or_else(|| {
            BwtError::Reconstruction(format!("tag {} not found in last column", current))
        })?;
        out.push(current.symbol);
        current = first[i];
        if current == start && out.len() < n {
            return Err(BwtError::Reconstruction(format!(
                "walk closed after {} of {} symbols",
                out.len(),
                n
            )));
        }
    }

    out.rotate_left(1);
    tracing::debug!(n, "bwt inverted");
    Ok(out)
}

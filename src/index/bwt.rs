use super::rotation::{build_rotations, bwt_from_rotations, sort_rotations};
use super::sa::sort_suffixes;
use super::BwtOpt;
use crate::error::Result;

/// 一次变换的产物。BWT 与 SA 必须成对使用：
/// `bwt[i] == seq[(sa[i] + n - 1) % n]`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub bwt: Vec<u8>,
    pub sa: Vec<usize>,
}

/// 正向变换：旋转排序得到 BWT，后缀排序得到 SA。
pub fn transform(seq: &[u8], opt: &BwtOpt) -> Result<Transformed> {
    opt.check_sequence(seq)?;
    let sorted = sort_rotations(build_rotations(seq), opt.sentinel);
    let bwt = bwt_from_rotations(&sorted);
    let sa = sort_suffixes(seq, opt.sentinel);
    debug_assert_eq!(bwt, bwt_from_sa(seq, &sa));
    tracing::debug!(n = seq.len(), "transform built");
    Ok(Transformed { bwt, sa })
}

/// 由 SA 直接读出 BWT：第 i 位是后缀 SA[i] 在循环意义下的前一个符号。
pub fn bwt_from_sa(text: &[u8], sa: &[usize]) -> Vec<u8> {
    let n = text.len();
    sa.iter().map(|&i| text[(i + n - 1) % n]).collect()
}

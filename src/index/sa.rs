use super::BwtOpt;
use crate::error::Result;
use crate::util::alphabet;

/// 构建后缀数组（朴素比较排序，O(n² log n)）。
/// 输入必须恰好含一个终止符；它最小且唯一，比较总能在它处分出先后。
pub fn suffix_array(seq: &[u8], opt: &BwtOpt) -> Result<Vec<usize>> {
    opt.check_sequence(seq)?;
    Ok(sort_suffixes(seq, opt.sentinel))
}

/// 不做校验的排序本体，供 `transform` 在已校验的输入上复用。
pub(crate) fn sort_suffixes(seq: &[u8], sentinel: u8) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..seq.len()).collect();
    sa.sort_unstable_by(|&i, &j| alphabet::cmp_seqs(sentinel, &seq[i..], &seq[j..]));
    sa
}

use std::cmp::Ordering;

/// 默认终止符
pub const DEFAULT_SENTINEL: u8 = b'$';

/// 排序键：终止符永远最小，其余符号按字节序。
/// 这样即便输入里有比 `$` 更小的字节（如空格），顺序依然正确。
#[inline]
pub fn sort_key(sentinel: u8, b: u8) -> (bool, u8) {
    (b != sentinel, b)
}

#[inline]
pub fn cmp_symbols(sentinel: u8, a: u8, b: u8) -> Ordering {
    sort_key(sentinel, a).cmp(&sort_key(sentinel, b))
}

/// 逐符号比较两个序列；较短的前缀更小。
pub fn cmp_seqs(sentinel: u8, a: &[u8], b: &[u8]) -> Ordering {
    a.iter()
        .map(|&x| sort_key(sentinel, x))
        .cmp(b.iter().map(|&y| sort_key(sentinel, y)))
}

/// 升序排列后的符号（即旋转矩阵的第一列）
pub fn sorted_symbols(seq: &[u8], sentinel: u8) -> Vec<u8> {
    let mut out = seq.to_vec();
    out.sort_unstable_by(|&a, &b| cmp_symbols(sentinel, a, b));
    out
}

#[inline]
pub fn count_sentinels(seq: &[u8], sentinel: u8) -> usize {
    seq.iter().filter(|&&b| b == sentinel).count()
}

/// Printable form of a symbol sequence, non-UTF-8 bytes replaced.
pub fn display(seq: &[u8]) -> String {
    String::from_utf8_lossy(seq).into_owned()
}

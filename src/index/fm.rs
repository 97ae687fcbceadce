use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use super::bwt::{transform, Transformed};
use super::BwtOpt;
use crate::error::{BwtError, Result};
use crate::util::alphabet;

/// 计数表：对 BWT 中出现的每个符号 c，`counts[c][i]` = BWT[0..i) 中 c 的个数。
/// 每列长度 n+1，首项为 0，单调不减。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    counts: BTreeMap<u8, Vec<usize>>,
}

impl CountTable {
    pub fn build(bwt: &[u8]) -> Self {
        let n = bwt.len();
        let mut counts: BTreeMap<u8, Vec<usize>> =
            bwt.iter().map(|&c| (c, vec![0usize; n + 1])).collect();
        for (i, &ch) in bwt.iter().enumerate() {
            for col in counts.values_mut() {
                col[i + 1] = col[i];
            }
            if let Some(col) = counts.get_mut(&ch) {
                col[i + 1] += 1;
            }
        }
        Self { counts }
    }

    /// 返回 BWT[0..pos) 中 c 的出现次数；c 不在字母表中返回 None
    #[inline]
    pub fn occ(&self, c: u8, pos: usize) -> Option<usize> {
        self.counts.get(&c).and_then(|col| col.get(pos).copied())
    }

    pub fn column(&self, c: u8) -> Option<&[usize]> {
        self.counts.get(&c).map(Vec::as_slice)
    }

    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        self.counts.keys().copied()
    }
}

/// 首次出现表：符号 c 在排序后 BWT 中第一次出现的下标，
/// 即严格小于 c 的符号总数（FM 索引里的 C 表）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstOccurrence {
    first: BTreeMap<u8, usize>,
}

impl FirstOccurrence {
    pub fn build(bwt: &[u8], sentinel: u8) -> Self {
        let mut first = BTreeMap::new();
        for (i, c) in alphabet::sorted_symbols(bwt, sentinel).into_iter().enumerate() {
            first.entry(c).or_insert(i);
        }
        Self { first }
    }

    #[inline]
    pub fn get(&self, c: u8) -> Option<usize> {
        self.first.get(&c).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.first.iter().map(|(&c, &i)| (c, i))
    }
}

/// FM 索引：计数表 + 首次出现表 + 完整 SA。
/// 构建后只读，可在多个线程间共享查询。
#[derive(Debug, Clone)]
pub struct FmIndex {
    sentinel: u8,
    /// BWT 序列（与 SA 同长度）
    bwt: Vec<u8>,
    /// 完整 SA，用于把区间映射回文本位置
    sa: Vec<usize>,
    count: CountTable,
    first: FirstOccurrence,
}

impl FmIndex {
    /// 对带终止符的序列做变换并建表。
    pub fn build(seq: &[u8], opt: &BwtOpt) -> Result<Self> {
        let Transformed { bwt, sa } = transform(seq, opt)?;
        Self::from_parts(bwt, sa, opt.sentinel)
    }

    /// 由同一次变换得到的 (BWT, SA) 建表。
    pub fn from_parts(bwt: Vec<u8>, sa: Vec<usize>, sentinel: u8) -> Result<Self> {
        if bwt.len() != sa.len() {
            return Err(BwtError::Mismatch { bwt: bwt.len(), sa: sa.len() });
        }
        let found = alphabet::count_sentinels(&bwt, sentinel);
        if found != 1 {
            return Err(BwtError::InvalidSequence { sentinel: sentinel as char, found });
        }
        // SA 必须是 0..n 的排列
        let n = sa.len();
        let mut seen = vec![false; n];
        for &p in &sa {
            if p >= n || seen[p] {
                return Err(BwtError::NotAPermutation { entry: p, len: n });
            }
            seen[p] = true;
        }
        let count = CountTable::build(&bwt);
        let first = FirstOccurrence::build(&bwt, sentinel);
        tracing::debug!(n = bwt.len(), sigma = first.first.len(), "fm index built");
        Ok(Self { sentinel, bwt, sa, count, first })
    }

    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    pub fn bwt(&self) -> &[u8] {
        &self.bwt
    }

    pub fn sa(&self) -> &[usize] {
        &self.sa
    }

    pub fn count_table(&self) -> &CountTable {
        &self.count
    }

    pub fn first_occurrence(&self) -> &FirstOccurrence {
        &self.first
    }

    /// 反向搜索：从模式末尾向前逐符号收缩 SA 区间 [top, bottom]。
    /// 未知符号或区间为空时返回 None；空模式返回整个区间。
    /// 终止符只出现在文本末尾，模式中非末位的终止符不可能匹配。
    pub fn range(&self, pattern: &[u8]) -> Option<RangeInclusive<usize>> {
        let mut top = 0usize;
        let mut bottom = self.bwt.len().checked_sub(1)?;
        if pattern[..pattern.len().saturating_sub(1)].contains(&self.sentinel) {
            return None;
        }
        for &s in pattern.iter().rev() {
            let (Some(col), Some(first)) = (self.count.column(s), self.first.get(s)) else {
                return None;
            };
            // top' > bottom' 等价于 col[bottom + 1] <= col[top]
            if col[bottom + 1] <= col[top] {
                return None;
            }
            top = first + col[top];
            bottom = first + col[bottom + 1] - 1;
        }
        Some(top..=bottom)
    }

    /// 模式出现次数
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.range(pattern).map_or(0, |r| r.end() - r.start() + 1)
    }

    /// 模式在原序列中的全部起始位置，升序；无匹配返回空。
    pub fn search(&self, pattern: &[u8]) -> Vec<usize> {
        let Some(r) = self.range(pattern) else {
            return Vec::new();
        };
        let mut pos = self.sa[r].to_vec();
        pos.sort_unstable();
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FmIndex {
        FmIndex::build(b"TAGACAGAGA$", &BwtOpt::default()).unwrap()
    }

    #[test]
    fn count_table_prefix_counts() {
        let ct = CountTable::build(b"AGGGTCAAAA$");
        assert_eq!(ct.column(b'A').unwrap(), &[0, 1, 1, 1, 1, 1, 1, 2, 3, 4, 5, 5]);
        assert_eq!(ct.column(b'G').unwrap(), &[0, 0, 1, 2, 3, 3, 3, 3, 3, 3, 3, 3]);
        assert_eq!(ct.occ(b'$', 11), Some(1));
        assert_eq!(ct.occ(b'$', 10), Some(0));
        assert_eq!(ct.occ(b'X', 3), None);
        assert_eq!(ct.symbols().collect::<Vec<_>>(), b"$ACGT".to_vec());
    }

    #[test]
    fn count_table_columns_are_monotone() {
        let ct = CountTable::build(b"ANNB$AA");
        for c in ct.symbols() {
            let col = ct.column(c).unwrap();
            assert_eq!(col[0], 0);
            assert!(col.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn first_occurrence_counts_smaller_symbols() {
        let bwt = b"AGGGTCAAAA$";
        let fo = FirstOccurrence::build(bwt, b'$');
        assert_eq!(fo.get(b'$'), Some(0));
        assert_eq!(fo.get(b'A'), Some(1));
        assert_eq!(fo.get(b'C'), Some(6));
        assert_eq!(fo.get(b'G'), Some(7));
        assert_eq!(fo.get(b'T'), Some(10));
        assert_eq!(fo.get(b'X'), None);
        for (c, i) in fo.iter() {
            let smaller = bwt
                .iter()
                .filter(|&&b| alphabet::cmp_symbols(b'$', b, c).is_lt())
                .count();
            assert_eq!(i, smaller);
        }
    }

    #[test]
    fn search_sample_pattern() {
        let fm = sample();
        assert_eq!(fm.search(b"AGA"), vec![1, 5, 7]);
        assert_eq!(fm.count(b"AGA"), 3);
        assert_eq!(fm.range(b"AGA"), Some(3..=5));
    }

    #[test]
    fn search_unknown_symbols_is_empty() {
        let fm = sample();
        assert!(fm.search(b"XYZ").is_empty());
        assert!(fm.search(b"AXA").is_empty());
        assert_eq!(fm.count(b"XYZ"), 0);
    }

    #[test]
    fn search_absent_pattern_is_empty() {
        let fm = sample();
        assert!(fm.search(b"TT").is_empty());
        assert!(fm.search(b"CC").is_empty());
        assert_eq!(fm.search(b"TAGACAGAGA$"), vec![0]);
    }

    #[test]
    fn empty_pattern_matches_every_offset() {
        let fm = sample();
        assert_eq!(fm.search(b""), (0..11).collect::<Vec<_>>());
        assert_eq!(fm.count(b""), 11);
    }

    #[test]
    fn from_parts_validates_pair() {
        let t = transform(b"TAGACAGAGA$", &BwtOpt::default()).unwrap();
        let mut short_sa = t.sa.clone();
        short_sa.pop();
        assert_eq!(
            FmIndex::from_parts(t.bwt.clone(), short_sa, b'$').unwrap_err(),
            BwtError::Mismatch { bwt: 11, sa: 10 }
        );
        assert!(matches!(
            FmIndex::from_parts(Vec::new(), Vec::new(), b'$'),
            Err(BwtError::InvalidSequence { found: 0, .. })
        ));
        assert_eq!(
            FmIndex::from_parts(t.bwt.clone(), vec![999; 11], b'$').unwrap_err(),
            BwtError::NotAPermutation { entry: 999, len: 11 }
        );
        let mut repeated = t.sa.clone();
        repeated[1] = repeated[0];
        assert_eq!(
            FmIndex::from_parts(t.bwt.clone(), repeated, b'$').unwrap_err(),
            BwtError::NotAPermutation { entry: 10, len: 11 }
        );
        let fm = FmIndex::from_parts(t.bwt.clone(), t.sa.clone(), b'$').unwrap();
        assert_eq!(fm.len(), 11);
        assert!(!fm.is_empty());
        assert_eq!(fm.sentinel(), b'$');
        assert_eq!(fm.bwt(), &t.bwt[..]);
        assert_eq!(fm.sa(), &t.sa[..]);
        assert_eq!(fm.count_table(), &CountTable::build(&t.bwt));
        assert_eq!(fm.first_occurrence(), &FirstOccurrence::build(&t.bwt, b'$'));
    }

    #[test]
    fn sentinel_only_matches_at_pattern_end() {
        let fm = sample();
        assert!(fm.search(b"$T").is_empty());
        assert!(fm.search(b"A$TA").is_empty());
        assert_eq!(fm.count(b"A$T"), 0);
        assert_eq!(fm.search(b"GA$"), vec![8]);
        assert_eq!(fm.search(b"$"), vec![10]);
    }

    #[test]
    fn sentinel_wraparound_with_custom_sentinel() {
        let opt = BwtOpt::with_sentinel(b'~');
        let fm = FmIndex::build(&[0x00, b'~'], &opt).unwrap();
        assert!(fm.search(&[b'~', 0x00]).is_empty());
        assert_eq!(fm.search(&[0x00, b'~']), vec![0]);
    }

    #[test]
    fn fm_index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FmIndex>();
    }
}

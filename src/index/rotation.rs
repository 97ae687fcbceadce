use crate::util::alphabet;

/// 构建全部循环旋转。第 k 行从下标 (n-k) mod n 开始读：
/// 第 0 行是原序列，第 1 行把最后一个符号移到最前，依此类推。
pub fn build_rotations(seq: &[u8]) -> Vec<Vec<u8>> {
    let n = seq.len();
    let mut rows = Vec::with_capacity(n);
    for k in 0..n {
        let start = (n - k) % n;
        let mut row = Vec::with_capacity(n);
        row.extend_from_slice(&seq[start..]);
        row.extend_from_slice(&seq[..start]);
        rows.push(row);
    }
    rows
}

/// 按字典序升序排列旋转（终止符最小）。
/// 终止符唯一时所有旋转互不相同，不存在并列。
pub fn sort_rotations(mut rotations: Vec<Vec<u8>>, sentinel: u8) -> Vec<Vec<u8>> {
    rotations.sort_unstable_by(|a, b| alphabet::cmp_seqs(sentinel, a, b));
    rotations
}

/// 取每一行的最后一个符号，拼成 BWT。
pub fn bwt_from_rotations(sorted: &[Vec<u8>]) -> Vec<u8> {
    sorted.iter().filter_map(|row| row.last().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_shift_right_one_step_per_row() {
        let rows = build_rotations(b"ACG$");
        assert_eq!(rows, vec![b"ACG$".to_vec(), b"$ACG".to_vec(), b"G$AC".to_vec(), b"CG$A".to_vec()]);
    }

    #[test]
    fn empty_input_has_no_rotations() {
        assert!(build_rotations(&[]).is_empty());
        assert!(bwt_from_rotations(&[]).is_empty());
    }

    #[test]
    fn sorted_matrix_for_sample() {
        let sorted = sort_rotations(build_rotations(b"TAGACAGAGA$"), b'$');
        assert_eq!(sorted[0], b"$TAGACAGAGA".to_vec());
        assert_eq!(sorted[1], b"A$TAGACAGAG".to_vec());
        assert_eq!(sorted[10], b"TAGACAGAGA$".to_vec());
        assert_eq!(bwt_from_rotations(&sorted), b"AGGGTCAAAA$".to_vec());
    }

    #[test]
    fn rotations_are_distinct_with_unique_sentinel() {
        let sorted = sort_rotations(build_rotations(b"AAAA$"), b'$');
        for w in sorted.windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}

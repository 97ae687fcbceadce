//! # bwt-rust
//!
//! Burrows-Wheeler 变换（BWT）的参考实现。
//!
//! 本 crate 提供：
//!
//! - **正向变换**：循环旋转排序得到 BWT，后缀排序得到后缀数组（SA）
//! - **FM 索引**：由 BWT 推导计数表与首次出现表
//! - **反向搜索**：逐符号收缩 SA 区间，返回模式的全部出现位置
//! - **逆变换**：基于秩标签的 LF 映射还原原序列
//!
//! 输入须由调用方在末尾追加唯一的终止符（默认 `$`），库不会自动补。
//! 构建为朴素的 O(n² log n) 算法，长度受 [`BwtOpt::max_len`] 限制。
//!
//! ## 快速示例
//!
//! ```rust
//! use bwt_rust::{invert, transform, BwtOpt, FmIndex};
//!
//! let opt = BwtOpt::default();
//! let seq = b"TAGACAGAGA$";
//!
//! let t = transform(seq, &opt).unwrap();
//! assert_eq!(t.bwt, b"AGGGTCAAAA$");
//! assert_eq!(invert(&t.bwt, &opt).unwrap(), seq);
//!
//! let fm = FmIndex::from_parts(t.bwt, t.sa, opt.sentinel).unwrap();
//! assert_eq!(fm.search(b"AGA"), vec![1, 5, 7]);
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 旋转、后缀数组、BWT、FM 索引与逆变换
//! - [`util`] — 终止符与符号排序
//! - [`error`] — 错误类型

pub mod error;
pub mod index;
pub mod util;

pub use error::{BwtError, Result};
pub use index::bwt::{transform, Transformed};
pub use index::fm::FmIndex;
pub use index::invert::invert;
pub use index::sa::suffix_array;
pub use index::BwtOpt;

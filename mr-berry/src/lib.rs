#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 提供 BraTS 格式多模态脑部 MRI (及肿瘤标注) nifti
//! 文件的结构化信息和预处理算法.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 该 crate 目前主要负责处理 BraTS 2021 模式的数据, 没有对其它源的数据进行直接适配
//!   (但如果新数据按照 `根目录/受试者目录/模态文件` 模式进行组织, 也可以工作).
//! 2. 在非期望情况下 (如索引越界), 程序会直接 panic, 而不会导致内存错误.
//!   可预期的运行时失败 (文件缺失, 形状非法) 则以 [`error`] 中的类型化错误返回.
//!
//! # 功能总览
//!
//! ### 体数据加载 ✅
//!
//! nii/nii.gz 文件到内存三维数组的加载, 以及 header 元信息访问.
//!
//! 实现位于 `mr-berry/src/data`.
//!
//! ### z-score 规范化与三线性重采样 ✅
//!
//! 预处理管线的两个核心纯变换.
//!
//! 实现位于 `mr-berry/src/transform.rs`.
//!
//! ### 受试者装配与批量预处理 ✅
//!
//! 按固定模态顺序 (flair, t1, t1ce, t2) 装配四通道张量并批量持久化.
//! 单个受试者的失败不会中止整批处理.
//!
//! 实现位于 `mr-berry/src/dataset/preprocess.rs`.
//!
//! ### 肿瘤掩膜分析 ✅
//!
//! 二值掩膜切片提取, 4-连通区域划分, 最大区域包围盒与面积计算.
//!
//! 实现位于 `mr-berry/src/data/slice`.
//!
//! ### 2D 切片提取 ✅
//!
//! 中心 (或指定) 切片提取, [0, 1] 单位化缩放, 以及 2D 模型输入变换.
//!
//! 实现位于 `mr-berry/src/data/slice` 与 `mr-berry/src/transform.rs`.

/// 二维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 三维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 包围盒 `(min_row, min_col, max_row, max_col)`.
///
/// 采用半开区间约定: `max_row`/`max_col` 为区域内最大下标加一.
pub type BoundingBox = (usize, usize, usize, usize);

type Predicate = fn(u8) -> bool;

type Area2d = Vec<Idx2d>;
type Areas2d = Vec<Area2d>;

/// 3D MRI nii 文件基础数据结构.
mod data;

pub use data::{
    bounding_box_of, CompactMaskSlice, ImgWriteRaw, ImgWriteVis, MaskSlice, MaskSliceMut,
    MriData3d, MriLabel, MriScan, NiftiHeaderAttr, OwnedMaskSlice, OwnedScanSlice, ScanSlice,
    ScanSliceMut,
};

pub mod consts;

pub mod error;

pub mod transform;

pub mod dataset;
pub mod prelude;

use crate::consts::gray::*;
use crate::transform::{self, Extreme};
use crate::{Area2d, Areas2d, BoundingBox, Idx2d, Predicate};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use ndarray::iter::{Iter, IterMut};
use ndarray::{Array2, ArrayView2, ArrayViewMut2, Ix2};
use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};
use std::io::{Read, Write};
use std::ops::{Index, IndexMut};

/// 不可变、借用的二维水平肿瘤掩膜切片.
///
/// 掩膜像素为 0 (背景) 或 [`MASK_FOREGROUND`]; 防御起见,
/// 所有前景判断都按 "非零即前景" 处理.
pub struct MaskSlice<'a> {
    /// 底层数据的轻量级视图, 借用于 [`crate::MriLabel`].
    ///
    /// 这里有意把代码写死为 `ArrayView` 降低灵活性, 但使结构的意图更加明确.
    data: ArrayView2<'a, u8>,
}

impl Index<Idx2d> for MaskSlice<'_> {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

/// 可变、借用的二维水平肿瘤掩膜切片.
pub struct MaskSliceMut<'a> {
    /// 底层数据的轻量级视图, 借用于 [`crate::MriLabel`].
    ///
    /// 这里有意把代码写死为 `ArrayViewMut` 降低灵活性, 但使结构的意图更加明确.
    data: ArrayViewMut2<'a, u8>,
}

/// 可变方法集合.
impl<'a> MaskSliceMut<'a> {
    /// 获得 **底层** 数据的一份可变 shallow copy.
    #[inline]
    pub fn array_view_mut(&mut self) -> ArrayViewMut2<u8> {
        self.data.view_mut()
    }

    /// 获取可以迭代并修改掩膜像素的迭代器.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, u8, Ix2> {
        self.data.iter_mut()
    }

    /// 获取给定位置 (高, 宽) 的像素值, 并可就地修改. 越界时返回 `None`.
    #[inline]
    pub fn get_mut(&mut self, pos: Idx2d) -> Option<&mut u8> {
        self.data.get_mut(pos)
    }

    /// 将掩膜中值为 `old` 的像素全部替换为 `new`.
    ///
    /// 返回总共成功替换的个数.
    pub fn replace(&mut self, old: u8, new: u8) -> usize {
        let mut cnt = 0usize;
        self.array_view_mut()
            .iter_mut()
            .filter(|pix| **pix == old)
            .for_each(|p| {
                cnt += 1;
                *p = new;
            });
        cnt
    }
}

impl Index<Idx2d> for MaskSliceMut<'_> {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx2d> for MaskSliceMut<'_> {
    #[inline]
    fn index_mut(&mut self, index: Idx2d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// mask 不可变方法集合.
macro_rules! impl_mask_slice_immut {
    ($life: lifetime, $slice: ty, $array: ty) => {
        /// 不可变方法集合.
        impl<$life> $slice {
            /// 直接初始化.
            #[inline]
            pub(crate) fn new(data: $array) -> Self {
                Self { data }
            }

            /// 获得 **底层** 数据的一份不可变 shallow copy.
            #[inline]
            pub fn array_view(&self) -> ArrayView2<u8> {
                self.data.view()
            }

            /// 获取可以迭代掩膜像素的迭代器.
            #[inline]
            pub fn iter(&self) -> Iter<'_, u8, Ix2> {
                self.data.iter()
            }

            /// 获取给定位置 (高, 宽) 的像素值. 越界时返回 `None`.
            #[inline]
            pub fn get(&self, pos: Idx2d) -> Option<&u8> {
                self.data.get(pos)
            }

            /// 该掩膜是否为全背景?
            #[inline]
            pub fn is_background(&self) -> bool {
                self.data.iter().copied().all(is_background)
            }

            /// 掩膜的分辨率 (高, 宽).
            #[inline]
            pub fn shape(&self) -> Idx2d {
                let &[h, w] = self.data.shape() else {
                    unreachable!()
                };
                (h, w)
            }

            /// 掩膜的像素个数.
            #[inline]
            pub fn size(&self) -> usize {
                let (h, w) = self.shape();
                h * w
            }

            /// 判断一个索引是否合法 (未越界).
            #[inline]
            pub fn check(&self, (h, w): Idx2d) -> bool {
                let (h_len, w_len) = self.shape();
                h < h_len && w < w_len
            }

            /// 统计掩膜中值为 `label` 的像素总个数.
            #[inline]
            pub fn count(&self, label: u8) -> usize {
                self.data.iter().filter(|&p| *p == label).count()
            }

            /// 肿瘤面积: 掩膜中前景 (非零) 像素的总个数.
            #[inline]
            pub fn foreground_area(&self) -> usize {
                self.data.iter().filter(|&p| is_tumor(*p)).count()
            }

            /// 将掩膜转化为行优先的序列化存储.
            pub fn as_row_major_vec(&self) -> Vec<u8> {
                let mut buf = Vec::with_capacity(self.size());
                buf.extend(self.iter());
                buf
            }

            /// 获得行优先存储的序列化数据.
            /// 当原始数据本身就是行优先格式时, 可以避免一次 deepcopy.
            pub fn as_row_major_slice(&self) -> Cow<[u8]> {
                if self.data.is_standard_layout() {
                    Cow::Borrowed(self.data.as_slice().unwrap())
                } else {
                    Cow::Owned(self.as_row_major_vec())
                }
            }

            /// 判断一个索引是否位于掩膜的边缘.
            #[inline]
            pub fn is_at_border(&self, (h, w): Idx2d) -> bool {
                h == 0
                    || h.saturating_add(1) == self.height()
                    || w == 0
                    || w.saturating_add(1) == self.width()
            }

            /// 获得掩膜的高.
            #[inline]
            pub fn height(&self) -> usize {
                self.shape().0
            }

            /// 获得掩膜的宽.
            #[inline]
            pub fn width(&self) -> usize {
                self.shape().1
            }

            /// 获得 `pos` 的 4-邻域像素索引. 保证返回的索引都不越界.
            pub fn n4_positions(&self, pos: Idx2d) -> Vec<Idx2d> {
                super::neighbour4(pos)
                    .into_iter()
                    .filter(|p| self.check(*p))
                    .collect()
            }

            /// 获得 `pos` 的 8-邻域像素索引. 保证返回的索引都不越界.
            pub fn n8_positions(&self, pos: Idx2d) -> Vec<Idx2d> {
                super::neighbour8(pos)
                    .into_iter()
                    .filter(|p| self.check(*p))
                    .collect()
            }

            /// 以行优先规则, 获取能迭代掩膜所有索引的迭代器.
            #[inline]
            pub fn pos_iter(&self) -> impl Iterator<Item = Idx2d> {
                let (h, w) = self.shape();
                (0..h).flat_map(move |first| (0..w).map(move |second| (first, second)))
            }

            /// 以行优先规则, 获取能迭代掩膜所有 `(索引, 像素值)` 的迭代器.
            #[inline]
            pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx2d, &u8)> {
                self.data.indexed_iter()
            }

            /// 判断掩膜上是否有前景像素.
            #[inline]
            pub fn has_foreground(&self) -> bool {
                self.iter().any(|c| is_tumor(*c))
            }

            /// 按照 4-相邻规则获取所有区域. 两个像素 `p1` 和 `p2` 属于同一个区域,
            /// 当且仅当存在一条从 `p1` 到 `p2` 的 4-相邻路径, 且路径上的所有像素
            /// (包括 `p1` 和 `p2`) 都满足谓词 `pred`.
            ///
            /// 区域按行优先发现顺序返回, 区域内像素按 BFS 访问顺序存储.
            pub fn areas(&self, pred: Predicate) -> Areas2d {
                self.areas_from_local(self.pos_iter(), pred)
            }

            /// 按照 4-相邻原则获得掩膜中所有前景区域.
            #[inline]
            pub fn foreground_areas(&self) -> Areas2d {
                self.areas(is_tumor)
            }

            /// 按照 4-相邻规则获取所有区域, 但区域范围由 `it` 指定.
            pub fn areas_from_local<I: IntoIterator<Item = Idx2d>>(
                &self,
                it: I,
                pred: Predicate,
            ) -> Areas2d {
                let mut ans = Areas2d::with_capacity(1);
                let mut bfs_q = VecDeque::with_capacity(4);
                let mut set = HashSet::with_capacity(16);

                for pos in it.into_iter() {
                    if set.contains(&pos) || !pred(self[pos]) {
                        continue;
                    }
                    bfs_q.push_back(pos);
                    let mut this_area = Area2d::with_capacity(1);

                    // bfs
                    while let Some(cur_pos) = bfs_q.pop_front() {
                        if !set.insert(cur_pos) {
                            continue;
                        }
                        this_area.push(cur_pos);
                        bfs_q.extend(
                            self.n4_positions(cur_pos)
                                .into_iter()
                                .filter(|p| pred(self[*p]) && !set.contains(p)),
                        );
                    }
                    ans.push(this_area);
                }
                ans
            }

            /// 获取面积最大的前景区域. 面积相等时保留行优先顺序最先发现的区域,
            /// 保证每次运行产生同样的结果. 全背景时返回 `None`.
            pub fn largest_foreground_area(&self) -> Option<Area2d> {
                let mut best: Option<Area2d> = None;
                for area in self.foreground_areas() {
                    if best.as_ref().map_or(true, |b| area.len() > b.len()) {
                        best = Some(area);
                    }
                }
                best
            }

            /// 返回面积最大的 4-连通前景区域的包围盒
            /// `(min_row, min_col, max_row, max_col)`, 采用半开区间约定.
            ///
            /// 不存在前景像素时返回 `None`.
            /// 面积相等的区域之间取行优先顺序最先发现者 (结果确定).
            pub fn bounding_box(&self) -> Option<BoundingBox> {
                bounding_box_of(&self.largest_foreground_area()?)
            }

            /// 获得一份不可变的 **本体** shallow copy.
            #[inline]
            pub fn shallow_copy(&self) -> MaskSlice {
                MaskSlice { data: self.array_view() }
            }

            /// 克隆自己, 获得一个拥有所有权的切片对象.
            pub fn to_owned(&self) -> OwnedMaskSlice {
                OwnedMaskSlice {
                    data: self.data.to_owned(),
                }
            }
        }
    };
}

impl_mask_slice_immut!('a, MaskSlice<'a>, ArrayView2<'a, u8>);
impl_mask_slice_immut!('a, MaskSliceMut<'a>, ArrayViewMut2<'a, u8>);

/// 计算单个区域的包围盒 `(min_row, min_col, max_row, max_col)`, 半开区间.
///
/// 区域为空时返回 `None`.
pub fn bounding_box_of(area: &[Idx2d]) -> Option<BoundingBox> {
    let (&(h0, w0), rest) = area.split_first()?;
    let (mut min_r, mut min_c, mut max_r, mut max_c) = (h0, w0, h0, w0);
    for &(h, w) in rest {
        min_r = min_r.min(h);
        min_c = min_c.min(w);
        max_r = max_r.max(h);
        max_c = max_c.max(w);
    }
    Some((min_r, min_c, max_r + 1, max_c + 1))
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 拥有所有权的二维水平肿瘤掩膜切片.
///
/// `OwnedMaskSlice` 仅提供到 `MaskSlice` 和 `MaskSliceMut`
/// 的轻量转换和底层数据移动, 不提供任何其它方法.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct OwnedMaskSlice {
    data: Array2<u8>,
}

impl OwnedMaskSlice {
    /// 从裸二维数组直接创建.
    #[inline]
    pub fn from_raw(data: Array2<u8>) -> Self {
        Self { data }
    }

    /// 获得不可变切片引用.
    #[inline]
    pub fn as_immut(&self) -> MaskSlice<'_> {
        MaskSlice::new(self.data.view())
    }

    /// 获得可变切片引用.
    #[inline]
    pub fn as_mutable(&mut self) -> MaskSliceMut<'_> {
        MaskSliceMut::new(self.data.view_mut())
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array2<u8> {
        self.data
    }
}

impl OwnedMaskSlice {
    /// 压缩数据.
    pub fn compress(&self) -> CompactMaskSlice {
        let data = self.as_immut();
        let buf = data.as_row_major_slice();
        let mut e = ZlibEncoder::new(Vec::with_capacity(8), Compression::best());
        e.write_all(buf.as_ref()).expect("Compression error");
        let sh = data.shape();
        CompactMaskSlice {
            buf: e.finish().expect("Compression error"),
            sh,
        }
    }
}

/// 压缩存储的 `OwnedMaskSlice`; 不透明类型.
///
/// 二值掩膜大部分是背景, 压缩存储可以显著降低驻留内存.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompactMaskSlice {
    /// 压缩的不透明字节流.
    buf: Vec<u8>,

    /// 形状.
    sh: Idx2d,
}

impl CompactMaskSlice {
    /// 解压缩数据.
    pub fn decompress(self) -> OwnedMaskSlice {
        let Self { buf, sh: (h, w) } = self;
        let mut d = ZlibDecoder::new(buf.as_slice());
        let mut buf = Vec::with_capacity(h * w);
        d.read_to_end(&mut buf).expect("Decompression error");
        debug_assert_eq!(buf.len(), h * w);
        let data = Array2::<u8>::from_shape_vec((h, w), buf).unwrap();
        OwnedMaskSlice { data }
    }
}

/// 不可变、借用的二维水平 MRI 扫描切片.
pub struct ScanSlice<'a> {
    /// 底层数据的轻量级视图, 借用于 [`crate::MriScan`].
    ///
    /// 这里有意把代码写死为 `ArrayView` 降低灵活性, 但使结构的意图更加明确.
    data: ArrayView2<'a, f32>,
}

impl Index<Idx2d> for ScanSlice<'_> {
    type Output = f32;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

/// 可变、借用的二维水平 MRI 扫描切片.
pub struct ScanSliceMut<'a> {
    /// 底层数据的轻量级视图, 借用于 [`crate::MriScan`].
    ///
    /// 这里有意把代码写死为 `ArrayViewMut` 降低灵活性, 但使结构的意图更加明确.
    data: ArrayViewMut2<'a, f32>,
}

/// 可变方法集合.
impl<'a> ScanSliceMut<'a> {
    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn data_mut(&mut self) -> ArrayViewMut2<f32> {
        self.data.view_mut()
    }

    /// 获取可以迭代并修改切片像素的迭代器.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, f32, Ix2> {
        self.data.iter_mut()
    }

    /// 获取给定位置 (高, 宽) 的像素值, 并可就地修改. 越界时返回 `None`.
    #[inline]
    pub fn get_mut(&mut self, pos: Idx2d) -> Option<&mut f32> {
        self.data.get_mut(pos)
    }
}

impl Index<Idx2d> for ScanSliceMut<'_> {
    type Output = f32;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx2d> for ScanSliceMut<'_> {
    #[inline]
    fn index_mut(&mut self, index: Idx2d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// scan 不可变方法集合.
macro_rules! impl_scan_slice_immut {
    ($life: lifetime, $scan: ty, $array: ty) => {
        /// 不可变方法集合.
        impl<$life> $scan {
            /// 直接初始化.
            #[inline]
            pub(crate) fn new(data: $array) -> Self {
                Self { data }
            }

            /// 获得数据的一份不可变 shallow copy.
            #[inline]
            pub fn data(&self) -> ArrayView2<f32> {
                self.data.view()
            }

            /// 获取可以迭代切片像素的迭代器.
            #[inline]
            pub fn iter(&self) -> Iter<'_, f32, Ix2> {
                self.data.iter()
            }

            /// 获取给定位置 (高, 宽) 的像素值. 越界时返回 `None`.
            #[inline]
            pub fn get(&self, pos: Idx2d) -> Option<&f32> {
                self.data.get(pos)
            }

            /// 切片的分辨率 (高, 宽).
            #[inline]
            pub fn shape(&self) -> Idx2d {
                let &[h, w] = self.data.shape() else {
                    unreachable!()
                };
                (h, w)
            }

            /// 切片的像素个数.
            #[inline]
            pub fn size(&self) -> usize {
                let (h, w) = self.shape();
                h * w
            }

            /// 切片最小强度值. 空切片或全 NaN 时返回 `None`; NaN 像素被忽略.
            #[inline]
            pub fn min_intensity(&self) -> Option<f32> {
                transform::slice_extreme(self.data.view(), Extreme::Min)
            }

            /// 切片最大强度值. 空切片或全 NaN 时返回 `None`; NaN 像素被忽略.
            #[inline]
            pub fn max_intensity(&self) -> Option<f32> {
                transform::slice_extreme(self.data.view(), Extreme::Max)
            }

            /// 将切片线性缩放到单位区间:
            /// `(x - min) / (max - min + UNIT_EPS)`.
            ///
            /// 常量切片经保护项缩放后输出全 0.
            #[inline]
            pub fn unit_rescaled(&self) -> OwnedScanSlice {
                OwnedScanSlice {
                    data: transform::unit_rescale(self.data.view()),
                }
            }

            /// 克隆自己, 获得一个拥有所有权的切片对象.
            pub fn to_owned(&self) -> OwnedScanSlice {
                OwnedScanSlice {
                    data: self.data.to_owned(),
                }
            }

            /// 以行优先规则, 获取能迭代切片所有 `(索引, 强度值)` 的迭代器.
            #[inline]
            pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx2d, &f32)> {
                self.data.indexed_iter()
            }
        }
    };
}

impl_scan_slice_immut!('a, ScanSlice<'a>, ArrayView2<'a, f32>);
impl_scan_slice_immut!('a, ScanSliceMut<'a>, ArrayViewMut2<'a, f32>);

/// 拥有所有权的二维水平 MRI 扫描切片.
///
/// `OwnedScanSlice` 仅提供到 `ScanSlice` 和 `ScanSliceMut`
/// 的轻量转换和底层数据移动, 不提供任何其它方法.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OwnedScanSlice {
    data: Array2<f32>,
}

impl OwnedScanSlice {
    /// 从裸二维数组直接创建.
    #[inline]
    pub fn from_raw(data: Array2<f32>) -> Self {
        Self { data }
    }

    /// 获得不可变切片引用.
    #[inline]
    pub fn as_immutable(&self) -> ScanSlice<'_> {
        ScanSlice::new(self.data.view())
    }

    /// 获得可变切片引用.
    #[inline]
    pub fn as_mutable(&mut self) -> ScanSliceMut<'_> {
        ScanSliceMut::new(self.data.view_mut())
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array2<f32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn mask_from(rows: &[[u8; 6]]) -> OwnedMaskSlice {
        let v: Vec<[u8; 6]> = rows.to_vec();
        OwnedMaskSlice::from_raw(arr2(&v))
    }

    #[test]
    fn test_bounding_box_empty_mask() {
        let m = OwnedMaskSlice::from_raw(Array2::zeros((8, 8)));
        assert!(m.as_immut().bounding_box().is_none());
        assert!(m.as_immut().is_background());
        assert_eq!(m.as_immut().foreground_area(), 0);
    }

    #[test]
    fn test_bounding_box_single_square() {
        // 3x3 方块, 行 1..=3, 列 2..=4.
        let m = mask_from(&[
            [0, 0, 0, 0, 0, 0],
            [0, 0, 1, 1, 1, 0],
            [0, 0, 1, 1, 1, 0],
            [0, 0, 1, 1, 1, 0],
            [0, 0, 0, 0, 0, 0],
        ]);
        assert_eq!(m.as_immut().bounding_box(), Some((1, 2, 4, 5)));
        assert_eq!(m.as_immut().foreground_area(), 9);
    }

    #[test]
    fn test_bounding_box_picks_largest_area() {
        // 左上 1 像素孤点, 右下 2x2 方块: 应选后者.
        let m = mask_from(&[
            [1, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 1],
            [0, 0, 0, 0, 1, 1],
        ]);
        assert_eq!(m.as_immut().bounding_box(), Some((2, 4, 4, 6)));
    }

    #[test]
    fn test_bounding_box_tie_breaks_row_major() {
        // 两个面积相等的孤点: 取行优先最先发现者.
        let m = mask_from(&[
            [0, 0, 0, 0, 0, 0],
            [0, 1, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 0],
        ]);
        assert_eq!(m.as_immut().bounding_box(), Some((1, 1, 2, 2)));
    }

    #[test]
    fn test_areas_connectivity() {
        // 对角相邻不算 4-连通: 应得到 2 个区域.
        let m = mask_from(&[
            [1, 0, 0, 0, 0, 0],
            [0, 1, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0],
        ]);
        let areas = m.as_immut().foreground_areas();
        assert_eq!(areas.len(), 2);
        assert!(areas.iter().all(|a| a.len() == 1));

        // L 形区域是一个整体.
        let l = mask_from(&[
            [1, 0, 0, 0, 0, 0],
            [1, 0, 0, 0, 0, 0],
            [1, 1, 0, 0, 0, 0],
        ]);
        assert_eq!(l.as_immut().foreground_areas().len(), 1);
        assert_eq!(l.as_immut().largest_foreground_area().unwrap().len(), 4);
    }

    #[test]
    fn test_foreground_area_literal_count() {
        // 10x10 全 1 掩膜, 面积恰为 100.
        let m = OwnedMaskSlice::from_raw(Array2::from_elem((10, 10), 1u8));
        assert_eq!(m.as_immut().foreground_area(), 100);
        assert_eq!(m.as_immut().bounding_box(), Some((0, 0, 10, 10)));
    }

    #[test]
    fn test_bounding_box_of_manual_area() {
        assert_eq!(bounding_box_of(&[]), None);
        assert_eq!(bounding_box_of(&[(3, 5)]), Some((3, 5, 4, 6)));
        assert_eq!(bounding_box_of(&[(2, 7), (5, 1)]), Some((2, 1, 6, 8)));
    }

    #[test]
    fn test_compact_round_trip() {
        let m = mask_from(&[
            [0, 1, 0, 0, 0, 0],
            [0, 1, 1, 0, 0, 1],
            [0, 0, 0, 0, 0, 0],
        ]);
        let original = m.as_immut().as_row_major_vec();
        let back = m.compress().decompress();
        assert_eq!(back.as_immut().shape(), (3, 6));
        assert_eq!(back.as_immut().as_row_major_vec(), original);
    }

    #[test]
    fn test_mask_replace() {
        let mut m = mask_from(&[
            [0, 1, 0, 0, 0, 0],
            [0, 1, 0, 0, 0, 0],
        ]);
        assert_eq!(m.as_mutable().replace(1, 0), 2);
        assert!(m.as_immut().is_background());
    }

    #[test]
    fn test_scan_slice_unit_rescaled() {
        let s = OwnedScanSlice::from_raw(arr2(&[[2.0_f32, 4.0], [6.0, 10.0]]));
        let v = s.as_immutable();
        assert_eq!(v.min_intensity(), Some(2.0));
        assert_eq!(v.max_intensity(), Some(10.0));
        let u = s.as_immutable().unit_rescaled();
        let u = u.as_immutable();
        assert_eq!(u.shape(), (2, 2));
        assert!(u[(0, 0)] == 0.0);
        assert!(u.iter().all(|&x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn test_pos_iter_row_major() {
        let m = OwnedMaskSlice::from_raw(Array2::zeros((2, 3)));
        let all: Vec<_> = m.as_immut().pos_iter().collect();
        assert_eq!(all, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }
}

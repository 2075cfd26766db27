use std::ops::{Index, IndexMut};
use std::path::Path;

use ndarray::{Array3, ArrayView, ArrayViewMut, Axis, Ix3};
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};

use crate::consts::gray::*;
use crate::error::{ResampleError, VolumeError};
use crate::{transform, Idx2d, Idx3d, Predicate};

pub mod slice;

pub use slice::{
    bounding_box_of, CompactMaskSlice, ImgWriteRaw, ImgWriteVis, MaskSlice, MaskSliceMut,
    OwnedMaskSlice, OwnedScanSlice, ScanSlice, ScanSliceMut,
};

/// `NiftiHeader` 是栈上大对象, 移动该对象的开销很可观.
/// 因此我们将其分配到堆上.
type BoxedHeader = Box<NiftiHeader>;

/// 将 (W, H, z) 转换成 (z, H, W). 以后均按照该模式访问.
#[inline]
fn get_shape_from_header(h: &NiftiHeader) -> Idx3d {
    // [W, H, z]. 体素个数数组.
    let [_, w, h, z, ..] = h.dim;
    (z as usize, h as usize, w as usize)
}

/// 校验 header 声明的维数是 3, 否则返回 [`VolumeError::NotVolumetric`].
#[inline]
fn ensure_volumetric(header: &NiftiHeader, path: &Path) -> Result<(), VolumeError> {
    let ndim = header.dim[0];
    if ndim != 3 {
        return Err(VolumeError::NotVolumetric {
            path: path.to_owned(),
            ndim,
        });
    }
    Ok(())
}

/// 3D MRI nii 文件 header 的共用属性和部分通用操作.
pub trait NiftiHeaderAttr {
    /// 获取 header 部分.
    fn header(&self) -> &NiftiHeader;

    /// 获取数据形状大小, 按 (z, h, w) 格式.
    #[inline]
    fn shape(&self) -> Idx3d {
        get_shape_from_header(self.header())
    }

    /// 获取数据水平切片形状大小.
    #[inline]
    fn slice_shape(&self) -> Idx2d {
        let (_, h, w) = self.shape();
        (h, w)
    }

    /// 获取水平切片个数.
    #[inline]
    fn len_z(&self) -> usize {
        self.shape().0
    }

    /// 获取中心切片索引. 切片提取在未指定索引时使用该值.
    #[inline]
    fn center_z(&self) -> usize {
        self.len_z() / 2
    }

    /// 获取数据体素个数.
    #[inline]
    fn size(&self) -> usize {
        let (z, h, w) = self.shape();
        z * h * w
    }

    /// 检查索引是否合法.
    #[inline]
    fn check(&self, (z0, h0, w0): &Idx3d) -> bool {
        let (z, h, w) = self.shape();
        *z0 < z && *h0 < h && *w0 < w
    }

    /// 获取单个体素分辨率. 该分辨率以毫米为单位, 分别代表空间 (相邻切片方向),
    /// 高 (自然图像的垂直方向), 宽 (自然图像的水平方向).
    #[inline]
    fn pix_dim(&self) -> [f64; 3] {
        let [_, w, h, z, ..] = self.header().pixdim;
        [z as f64, h as f64, w as f64]
    }

    /// 获取 width 方向体素分辨率, 以毫米为单位.
    #[inline]
    fn width_mm(&self) -> f64 {
        self.header().pixdim[1] as f64
    }

    /// 获取 height 方向体素分辨率, 以毫米为单位.
    #[inline]
    fn height_mm(&self) -> f64 {
        self.header().pixdim[2] as f64
    }

    /// 获取空间方向 (相邻 2D 切片的方向) 体素分辨率, 以毫米为单位.
    #[inline]
    fn z_mm(&self) -> f64 {
        self.header().pixdim[3] as f64
    }

    /// 体素分辨率在三个维度上是否是各向同的?
    ///
    /// BraTS 数据经过配准后通常是 1mm 各向同性的.
    #[inline]
    fn is_isotropic(&self) -> bool {
        let [z, h, w] = self.pix_dim();
        z == h && z == w
    }

    /// 获取体素的实际体积值, 以立方毫米为单位.
    #[inline]
    fn voxel(&self) -> f64 {
        self.pix_dim().iter().product()
    }

    /// 获取水平切片方向的像素实际面积值, 以平方毫米为单位.
    #[inline]
    fn slice_pixel(&self) -> f64 {
        self.pix_dim().iter().skip(1).product()
    }
}

/// nii 格式 3D MRI 扫描, 包括 header 和强度数据. 强度值以 `f32` 保存.
///
/// 一个受试者的每个模态 (flair, t1, t1ce, t2) 对应一个独立的 `MriScan`.
#[derive(Debug, Clone)]
pub struct MriScan {
    header: BoxedHeader,
    data: Array3<f32>,
}

impl NiftiHeaderAttr for MriScan {
    #[inline]
    fn header(&self) -> &NiftiHeader {
        &self.header
    }
}

impl Index<Idx3d> for MriScan {
    type Output = f32;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx3d> for MriScan {
    #[inline]
    fn index_mut(&mut self, index: Idx3d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl MriScan {
    /// 打开 nii 文件格式的 3D MRI 扫描. `path` 为 nii 文件的本地路径.
    ///
    /// 文件不存在、无法解析或不是三维体数据时返回 `Err`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, VolumeError> {
        let obj = ReaderOptions::new().read_file(path.as_ref())?;
        let header = Box::new(obj.header().clone());
        ensure_volumetric(&header, path.as_ref())?;

        // [W, H, z] -> [z, H, W].
        // hint: 原第一维向下增长, 原第二维向右增长.
        let data = obj
            .into_volume()
            .into_ndarray::<f32>()?
            .permuted_axes([2, 1, 0].as_slice());

        // The nature of nifti data field layout.
        debug_assert!(data.is_standard_layout());

        // 该操作不会生成 `Err`, 可直接 unwrap.
        let data =
            Array3::<f32>::from_shape_vec(get_shape_from_header(&header), data.into_raw_vec())
                .unwrap();

        Ok(Self { header, data })
    }

    /// 根据裸强度数据和体素分辨率直接创建 `MriScan` 实体.
    ///
    /// # 参数
    ///
    /// 1. `data` 按照 (z, h, w) 格式组织.
    /// 2. `pix_dim` 按照 \[w, h, z\] 格式存储, 以毫米为单位.
    ///
    /// # 注意
    ///
    /// 该方法可能会创建不一致的实体, 因此你应仅将其用于实验目的.
    pub fn fake(data: Array3<f32>, pix_dim: [f32; 3]) -> Self {
        let (z, h, w) = data.dim();
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().to_owned()
        };

        let mut header = Box::<NiftiHeader>::default();
        header.dim = [3, w as u16, h as u16, z as u16, 1, 1, 1, 1];
        let [pw, ph, pz] = pix_dim;
        header.pixdim = [1.0, pw, ph, pz, 0.0, 0.0, 0.0, 0.0];
        header.intent_name[..4].copy_from_slice(b"fake");

        Self { header, data }
    }

    /// 判断该结构是否是由 `fake` 方法手动拼接的.
    pub fn is_faked(&self) -> bool {
        self.header.intent_name.starts_with(b"fake")
    }

    /// 全体素强度均值.
    #[inline]
    pub fn mean(&self) -> f64 {
        transform::volume_stats(self.data.view()).0
    }

    /// 全体素强度总体标准差.
    #[inline]
    pub fn std(&self) -> f64 {
        transform::volume_stats(self.data.view()).1
    }

    /// 返回 z-score 规范化 (裁剪到 ±[`crate::consts::ZSCORE_CLIP`])
    /// 后的新扫描. header 原样保留.
    pub fn normalized(&self) -> MriScan {
        Self {
            header: self.header.clone(),
            data: transform::normalize_zscore(self.data.view()),
        }
    }

    /// 返回按三线性插值重采样到 `target` 形状的新扫描.
    ///
    /// header 的形状和体素分辨率会同步更新, 使体数据的物理尺寸保持不变.
    pub fn resampled(&self, target: Idx3d) -> Result<MriScan, ResampleError> {
        let data = transform::resample_trilinear(self.data.view(), target)?;
        let (sz, sh, sw) = self.shape();
        let (tz, th, tw) = target;

        let mut header = self.header.clone();
        header.dim = [3, tw as u16, th as u16, tz as u16, 1, 1, 1, 1];
        header.pixdim[1] *= sw as f32 / tw as f32;
        header.pixdim[2] *= sh as f32 / th as f32;
        header.pixdim[3] *= sz as f32 / tz as f32;

        Ok(Self { header, data })
    }

    /// 提取单位化的 2D 切片: 选择给定 z 索引 (缺省为中心切片),
    /// 并线性缩放到 [0, 1].
    ///
    /// 当 `slice_index` 越界时 panic.
    pub fn unit_slice(&self, slice_index: Option<usize>) -> OwnedScanSlice {
        let z = slice_index.unwrap_or_else(|| self.center_z());
        self.slice_at(z).unit_rescaled()
    }

    /// 从 nii 文件直接加载单位化的 2D 切片. 见 [`MriScan::unit_slice`].
    pub fn open_unit_slice<P: AsRef<Path>>(
        path: P,
        slice_index: Option<usize>,
    ) -> Result<OwnedScanSlice, VolumeError> {
        Ok(Self::open(path)?.unit_slice(slice_index))
    }

    /// 获取 3D 扫描 z 空间的第 `z_index` 层切片视图.
    ///
    /// 当 `z_index` 越界时 panic.
    #[inline]
    pub fn slice_at(&self, z_index: usize) -> ScanSlice<'_> {
        ScanSlice::new(self.data.index_axis(Axis(0), z_index))
    }

    /// 获取 3D 扫描 z 空间的第 `z_index` 层可变切片视图.
    ///
    /// 当 `z_index` 越界时 panic.
    #[inline]
    pub fn slice_at_mut(&mut self, z_index: usize) -> ScanSliceMut<'_> {
        ScanSliceMut::new(self.data.index_axis_mut(Axis(0), z_index))
    }

    /// 获取能按升序迭代 3D 扫描水平不可变切片的迭代器.
    #[inline]
    pub fn slice_iter(&self) -> impl ExactSizeIterator<Item = ScanSlice> {
        self.data.axis_iter(Axis(0)).map(ScanSlice::new)
    }

    /// 获取能按升序迭代 3D 扫描水平可变切片的迭代器.
    #[inline]
    pub fn slice_iter_mut(&mut self) -> impl ExactSizeIterator<Item = ScanSliceMut> {
        self.data.axis_iter_mut(Axis(0)).map(ScanSliceMut::new)
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView<'_, f32, Ix3> {
        self.data.view()
    }

    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn data_mut(&mut self) -> ArrayViewMut<'_, f32, Ix3> {
        self.data.view_mut()
    }
}

/// nii 格式 3D 肿瘤标注, 包括 header 和分割标签. 标签值以 `u8` 保存.
///
/// BraTS 的标签取值为 0 (背景), 1 (坏死核心), 2 (水肿), 4 (增强肿瘤).
#[derive(Debug, Clone)]
pub struct MriLabel {
    header: BoxedHeader,
    data: Array3<u8>,
}

impl NiftiHeaderAttr for MriLabel {
    #[inline]
    fn header(&self) -> &NiftiHeader {
        &self.header
    }
}

impl Index<Idx3d> for MriLabel {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx3d> for MriLabel {
    #[inline]
    fn index_mut(&mut self, index: Idx3d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl MriLabel {
    /// 打开 nii 文件格式的 3D 肿瘤标注. `path` 为 nii 文件的本地路径.
    ///
    /// 文件不存在、无法解析或不是三维体数据时返回 `Err`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, VolumeError> {
        let obj = ReaderOptions::new().read_file(path.as_ref())?;
        let header = Box::new(obj.header().clone());
        ensure_volumetric(&header, path.as_ref())?;

        // [W, H, z] -> [z, H, W]
        let data = obj
            .into_volume()
            .into_ndarray::<u8>()?
            .permuted_axes([2, 1, 0].as_slice());

        // The nature of nifti data field layout.
        debug_assert!(data.is_standard_layout());

        // 该操作不会生成 `Err`, 可直接 unwrap.
        let data =
            Array3::<u8>::from_shape_vec(get_shape_from_header(&header), data.into_raw_vec())
                .unwrap();

        Ok(Self { header, data })
    }

    /// 根据裸标签数据和体素分辨率直接创建 `MriLabel` 实体.
    ///
    /// # 参数
    ///
    /// 1. `data` 按照 (z, h, w) 格式组织, 标签值应为 0, 1, 2 或 4.
    /// 2. `pix_dim` 按照 \[w, h, z\] 格式存储, 以毫米为单位.
    ///
    /// # 注意
    ///
    /// 该方法可能会创建不一致的实体, 因此你应仅将其用于实验目的.
    pub fn fake(data: Array3<u8>, pix_dim: [f32; 3]) -> Self {
        let (z, h, w) = data.dim();
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().to_owned()
        };

        let mut header = Box::<NiftiHeader>::default();
        header.dim = [3, w as u16, h as u16, z as u16, 1, 1, 1, 1];
        let [pw, ph, pz] = pix_dim;
        header.pixdim = [1.0, pw, ph, pz, 0.0, 0.0, 0.0, 0.0];
        header.intent_name[..4].copy_from_slice(b"fake");

        Self { header, data }
    }

    /// 判断该结构是否是由 `fake` 方法手动拼接的.
    pub fn is_faked(&self) -> bool {
        self.header.intent_name.starts_with(b"fake")
    }

    /// 提取二值肿瘤掩膜切片: 选择给定 z 索引 (缺省为中心切片),
    /// 非零标签视为前景并映射为 [`MASK_FOREGROUND`].
    ///
    /// 当 `slice_index` 越界时 panic.
    pub fn tumor_mask(&self, slice_index: Option<usize>) -> OwnedMaskSlice {
        let z = slice_index.unwrap_or_else(|| self.center_z());
        let bin = self
            .data
            .index_axis(Axis(0), z)
            .mapv(|p| if is_tumor(p) { MASK_FOREGROUND } else { BRATS_BACKGROUND });
        OwnedMaskSlice::from_raw(bin)
    }

    /// 从 nii 文件直接加载二值肿瘤掩膜切片. 见 [`MriLabel::tumor_mask`].
    pub fn open_tumor_mask<P: AsRef<Path>>(
        path: P,
        slice_index: Option<usize>,
    ) -> Result<OwnedMaskSlice, VolumeError> {
        Ok(Self::open(path)?.tumor_mask(slice_index))
    }

    /// 获取 3D 标注 z 空间的第 `z_index` 层不可变切片.
    ///
    /// 当 `z_index` 越界时 panic.
    #[inline]
    pub fn slice_at(&self, z_index: usize) -> MaskSlice {
        MaskSlice::new(self.data.index_axis(Axis(0), z_index))
    }

    /// 获取 3D 标注 z 空间的第 `z_index` 层可变切片.
    ///
    /// 当 `z_index` 越界时 panic.
    #[inline]
    pub fn slice_at_mut(&mut self, z_index: usize) -> MaskSliceMut {
        MaskSliceMut::new(self.data.index_axis_mut(Axis(0), z_index))
    }

    /// 获取能按升序迭代 3D 标注水平不可变切片的迭代器.
    #[inline]
    pub fn slice_iter(&self) -> impl ExactSizeIterator<Item = MaskSlice> {
        self.data.axis_iter(Axis(0)).map(MaskSlice::new)
    }

    /// 获取能按升序迭代 3D 标注水平可变切片的迭代器.
    #[inline]
    pub fn slice_iter_mut(&mut self) -> impl ExactSizeIterator<Item = MaskSliceMut> {
        self.data.axis_iter_mut(Axis(0)).map(MaskSliceMut::new)
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView<'_, u8, Ix3> {
        self.data.view()
    }

    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn data_mut(&mut self) -> ArrayViewMut<'_, u8, Ix3> {
        self.data.view_mut()
    }

    /// 获取 3D 标注中值为 `label` 的体素个数.
    #[inline]
    pub fn count(&self, label: u8) -> usize {
        self.data.iter().filter(|p| **p == label).count()
    }

    /// 获取 3D 标注中肿瘤 (任意非背景标签) 体素的总个数.
    #[inline]
    pub fn tumor_size(&self) -> usize {
        self.data.iter().filter(|p| is_tumor(**p)).count()
    }

    /// 获取肿瘤标注的基本统计信息.
    ///
    /// 统计信息格式为: \[背景体素数, 坏死体素数, 水肿体素数, 增强体素数\],
    /// 即标签值 0, 1, 2, 4. 该操作不会统计任何其他标签信息.
    pub fn numeric_statistics(&self) -> [usize; 4] {
        let mut ans = [0; 4];
        for pixel in self.data.iter() {
            match *pixel {
                BRATS_BACKGROUND => ans[0] += 1,
                BRATS_NECROTIC => ans[1] += 1,
                BRATS_EDEMA => ans[2] += 1,
                BRATS_ENHANCING => ans[3] += 1,
                _ => {}
            }
        }
        ans
    }

    /// 将 3D 标注中值为 `old` 的体素全部替换为 `new`.
    /// 常见用法是把 BraTS 的增强标签 4 重映射为连续的 3.
    ///
    /// 返回总共成功替换的个数.
    pub fn replace(&mut self, old: u8, new: u8) -> usize {
        let mut cnt = 0usize;
        self.data_mut()
            .iter_mut()
            .filter(|pix| **pix == old)
            .for_each(|p| {
                cnt += 1;
                *p = new;
            });
        cnt
    }

    /// 收集满足谓词 `pred` 的所有体素对应的下标, 结果按行优先存储.
    pub fn filter_pos(&self, pred: Predicate) -> Vec<Idx3d> {
        self.data
            .indexed_iter()
            .filter_map(|(ref pos, pixel)| pred(*pixel).then_some(*pos))
            .collect()
    }

    /// 收集所有肿瘤 (非背景) 体素对应的下标. 结果按行优先存储.
    #[inline]
    pub fn tumor_pos(&self) -> Vec<Idx3d> {
        self.filter_pos(is_tumor)
    }
}

/// nii 格式的 3D MRI 扫描与对应的肿瘤标注.
///
/// 该结构完全透明, 仅包含两个公开的 `scan` 和 `label` 子结构,
/// 用户可以直接使用它们来实现相关上层功能.
///
/// # 注意
///
/// 两个子结构的数据一致性由用户保证, 否则程序行为未定义.
#[derive(Debug, Clone)]
pub struct MriData3d {
    /// 3D MRI 扫描.
    pub scan: MriScan,

    /// 3D 肿瘤标注.
    pub label: MriLabel,
}

impl MriData3d {
    /// 分别打开 nii 文件格式的 3D MRI 扫描和对应标注. 如果任一文件打开失败, 则返回 `Err`.
    /// 若两个文件的数据文件形状不一致, 则程序 `panic`.
    pub fn open(
        scan_path: impl AsRef<Path>,
        label_path: impl AsRef<Path>,
    ) -> Result<Self, VolumeError> {
        let scan = MriScan::open(scan_path.as_ref())?;
        let label = MriLabel::open(label_path.as_ref())?;
        assert_eq!(scan.shape(), label.shape(), "MRI 扫描和标注形状不一致");
        Ok(Self { scan, label })
    }

    /// 获取水平切片个数.
    #[inline]
    pub fn len_z(&self) -> usize {
        self.label.len_z()
    }

    /// 依次获取 3D 扫描和 3D 标注 z 空间的第 `z_index` 层不可变切片.
    ///
    /// 当 `z_index` 越界时 panic.
    #[inline]
    pub fn slice_at(&self, z_index: usize) -> (ScanSlice<'_>, MaskSlice<'_>) {
        (self.scan.slice_at(z_index), self.label.slice_at(z_index))
    }

    /// 获取能按升序迭代 3D 水平 (扫描, 标注) 不可变切片的迭代器.
    #[inline]
    pub fn slice_iter(&self) -> impl ExactSizeIterator<Item = (ScanSlice, MaskSlice)> {
        self.scan.slice_iter().zip(self.label.slice_iter())
    }

    /// 获取能按行优先序迭代 3D (扫描, 标注) 体素的迭代器.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&f32, &u8)> {
        self.scan.data.iter().zip(self.label.data.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn ramp_scan() -> MriScan {
        let data = Array3::from_shape_fn((4, 3, 2), |(z, h, w)| (z * 6 + h * 2 + w) as f32);
        MriScan::fake(data, [1.0, 1.0, 1.0])
    }

    #[test]
    fn test_fake_header_attrs() {
        let scan = ramp_scan();
        assert!(scan.is_faked());
        assert_eq!(scan.shape(), (4, 3, 2));
        assert_eq!(scan.slice_shape(), (3, 2));
        assert_eq!(scan.len_z(), 4);
        assert_eq!(scan.center_z(), 2);
        assert_eq!(scan.size(), 24);
        assert!(scan.is_isotropic());
        assert!(scan.check(&(3, 2, 1)));
        assert!(!scan.check(&(4, 0, 0)));
    }

    #[test]
    fn test_scan_statistics() {
        let scan = ramp_scan();
        // 0..=23 的均值为 11.5.
        assert!((scan.mean() - 11.5).abs() < 1e-9);
        assert!(scan.std() > 0.0);
    }

    #[test]
    fn test_normalized_then_resampled() {
        let scan = ramp_scan();
        let n = scan.normalized();
        assert!((n.mean()).abs() < 1e-6);
        let r = n.resampled((5, 5, 5)).unwrap();
        assert_eq!(r.shape(), (5, 5, 5));
        // 重采样保持物理尺寸: 原 4 层 1mm 对应 5 层 0.8mm.
        assert!((r.z_mm() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_unit_slice_range() {
        let scan = ramp_scan();
        let s = scan.unit_slice(None);
        assert_eq!(s.as_immutable().shape(), (3, 2));
        assert!(s.as_immutable().iter().all(|&x| (0.0..1.0).contains(&x)));
    }

    fn center_dot_label() -> MriLabel {
        // 5 层全零, 仅中心切片 (z = 2) 有一个 2x2 的增强肿瘤块.
        let mut data = Array3::<u8>::zeros((5, 6, 6));
        for h in 2..4 {
            for w in 2..4 {
                data[[2, h, w]] = BRATS_ENHANCING;
            }
        }
        MriLabel::fake(data, [1.0, 1.0, 1.0])
    }

    #[test]
    fn test_tumor_mask_center_slice() {
        let label = center_dot_label();
        let mask = label.tumor_mask(None);
        let mask = mask.as_immut();
        assert_eq!(mask.shape(), (6, 6));
        assert_eq!(mask.foreground_area(), 4);
        // 掩膜是二值的.
        assert!(mask.iter().all(|&p| p == 0 || p == MASK_FOREGROUND));

        // 其他切片为全背景.
        let empty = label.tumor_mask(Some(0));
        assert_eq!(empty.as_immut().foreground_area(), 0);
    }

    #[test]
    fn test_label_statistics_and_replace() {
        let mut label = center_dot_label();
        assert_eq!(label.tumor_size(), 4);
        assert_eq!(label.numeric_statistics(), [176, 0, 0, 4]);
        assert_eq!(label.count(BRATS_ENHANCING), 4);

        // BraTS 常见的 4 -> 3 重映射.
        assert_eq!(label.replace(BRATS_ENHANCING, 3), 4);
        assert_eq!(label.count(BRATS_ENHANCING), 0);
        assert_eq!(label.count(3), 4);
        // 重映射后的标签仍是前景.
        assert_eq!(label.tumor_size(), 4);
    }

    #[test]
    fn test_tumor_pos_row_major() {
        let label = center_dot_label();
        let pos = label.tumor_pos();
        assert_eq!(pos, vec![(2, 2, 2), (2, 2, 3), (2, 3, 2), (2, 3, 3)]);
    }
}

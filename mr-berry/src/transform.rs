//! 纯函数体数据变换: z-score 规范化, 三线性重采样, 切片缩放.
//!
//! 本模块的函数不做任何 I/O, 也不修改输入; 所有结果都是新分配的数组.

use crate::consts::{UNIT_EPS, ZSCORE_CLIP};
use crate::error::ResampleError;
use crate::{Idx2d, Idx3d};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use ordered_float::NotNan;

/// 计算体数据的全局强度统计 (均值, 总体标准差).
///
/// 内部以 `f64` 累加, 避免大体数据下的精度损失. 空体返回 `(0.0, 0.0)`.
pub fn volume_stats(v: ArrayView3<f32>) -> (f64, f64) {
    let n = v.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = v.iter().map(|&x| x as f64).sum::<f64>() / n as f64;
    let var = v
        .iter()
        .map(|&x| {
            let d = x as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;
    (mean, var.sqrt())
}

/// 对体数据做全局 z-score 规范化, 并将结果裁剪到
/// `[-ZSCORE_CLIP, ZSCORE_CLIP]`.
///
/// 当标准差为 0 (常量体) 或非有限值时, 返回全零体:
/// 常量体被视为已经中心化, 这保证输出始终有限且落在裁剪范围内.
pub fn normalize_zscore(v: ArrayView3<f32>) -> Array3<f32> {
    let (mean, std) = volume_stats(v.view());
    if std == 0.0 || !std.is_finite() {
        return Array3::zeros(v.raw_dim());
    }
    v.mapv(|x| (((x as f64 - mean) / std) as f32).clamp(-ZSCORE_CLIP, ZSCORE_CLIP))
}

/// 端点对齐的输出→源坐标映射表. 每个输出下标给出 (下邻, 上邻, 小数权重).
///
/// 输出长度为 1 时映射到源坐标 0.
fn axis_grid(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f64)> {
    debug_assert_ne!(src_len, 0);
    let step = if dst_len > 1 {
        (src_len - 1) as f64 / (dst_len - 1) as f64
    } else {
        0.0
    };
    (0..dst_len)
        .map(|i| {
            let coord = step * i as f64;
            let lo = (coord.floor() as usize).min(src_len - 1);
            let hi = (lo + 1).min(src_len - 1);
            (lo, hi, coord - lo as f64)
        })
        .collect()
}

/// 将体数据按三线性插值 (order-1) 重采样到 `target` 形状, 按 (z, h, w) 格式.
///
/// 每轴缩放因子为 `target/source`; 采样时按端点对齐规则将输出下标 `i`
/// 映射回源坐标 `i * (src - 1) / (dst - 1)`. 上采样和下采样均支持.
/// 源形状与目标形状一致时直接克隆.
///
/// 源数据存在空轴时返回 [`ResampleError::EmptyAxis`].
pub fn resample_trilinear(
    src: ArrayView3<f32>,
    target: Idx3d,
) -> Result<Array3<f32>, ResampleError> {
    let &[sz, sh, sw] = src.shape() else {
        unreachable!()
    };
    if sz == 0 || sh == 0 || sw == 0 {
        return Err(ResampleError::EmptyAxis((sz, sh, sw)));
    }
    let (tz, th, tw) = target;
    if (sz, sh, sw) == target {
        return Ok(src.to_owned());
    }

    let gz = axis_grid(sz, tz);
    let gh = axis_grid(sh, th);
    let gw = axis_grid(sw, tw);

    let mut out = Array3::<f32>::zeros((tz, th, tw));
    for (iz, &(z0, z1, fz)) in gz.iter().enumerate() {
        for (ih, &(h0, h1, fh)) in gh.iter().enumerate() {
            for (iw, &(w0, w1, fw)) in gw.iter().enumerate() {
                // 8 个角点, 命名按 (z, h, w) 顺序.
                let c000 = src[[z0, h0, w0]] as f64;
                let c001 = src[[z0, h0, w1]] as f64;
                let c010 = src[[z0, h1, w0]] as f64;
                let c011 = src[[z0, h1, w1]] as f64;
                let c100 = src[[z1, h0, w0]] as f64;
                let c101 = src[[z1, h0, w1]] as f64;
                let c110 = src[[z1, h1, w0]] as f64;
                let c111 = src[[z1, h1, w1]] as f64;

                // 依次沿 w, h, z 收缩.
                let c00 = c000 * (1.0 - fw) + c001 * fw;
                let c01 = c010 * (1.0 - fw) + c011 * fw;
                let c10 = c100 * (1.0 - fw) + c101 * fw;
                let c11 = c110 * (1.0 - fw) + c111 * fw;
                let c0 = c00 * (1.0 - fh) + c01 * fh;
                let c1 = c10 * (1.0 - fh) + c11 * fh;
                out[[iz, ih, iw]] = (c0 * (1.0 - fz) + c1 * fz) as f32;
            }
        }
    }
    Ok(out)
}

/// 将切片线性缩放到单位区间: `(x - min) / (max - min + UNIT_EPS)`.
///
/// 常量切片经保护项缩放后输出全 0. NaN 像素在求 min/max 时被忽略.
pub fn unit_rescale(v: ArrayView2<f32>) -> Array2<f32> {
    let lo = slice_extreme(v, Extreme::Min).unwrap_or(0.0);
    let hi = slice_extreme(v, Extreme::Max).unwrap_or(0.0);
    let denom = hi - lo + UNIT_EPS;
    v.mapv(|x| (x - lo) / denom)
}

pub(crate) enum Extreme {
    Min,
    Max,
}

/// 忽略 NaN 的切片极值. 全 NaN 或空切片时返回 `None`.
pub(crate) fn slice_extreme(v: ArrayView2<f32>, which: Extreme) -> Option<f32> {
    let it = v.iter().copied().filter_map(|x| NotNan::new(x).ok());
    let ans = match which {
        Extreme::Min => it.min(),
        Extreme::Max => it.max(),
    };
    ans.map(NotNan::into_inner)
}

/// 将 2D 切片按双线性插值缩放到 `target` 形状, 按 (h, w) 格式.
///
/// 采样规则与 [`resample_trilinear`] 的端点对齐规则一致.
/// 源切片存在空轴时 panic.
pub fn resize_bilinear(src: ArrayView2<f32>, target: Idx2d) -> Array2<f32> {
    let &[sh, sw] = src.shape() else {
        unreachable!()
    };
    assert!(sh > 0 && sw > 0, "空切片无法缩放");
    let (th, tw) = target;
    if (sh, sw) == target {
        return src.to_owned();
    }

    let gh = axis_grid(sh, th);
    let gw = axis_grid(sw, tw);

    let mut out = Array2::<f32>::zeros((th, tw));
    for (ih, &(h0, h1, fh)) in gh.iter().enumerate() {
        for (iw, &(w0, w1, fw)) in gw.iter().enumerate() {
            let c00 = src[[h0, w0]] as f64;
            let c01 = src[[h0, w1]] as f64;
            let c10 = src[[h1, w0]] as f64;
            let c11 = src[[h1, w1]] as f64;
            let c0 = c00 * (1.0 - fw) + c01 * fw;
            let c1 = c10 * (1.0 - fw) + c11 * fw;
            out[[ih, iw]] = (c0 * (1.0 - fh) + c1 * fh) as f32;
        }
    }
    out
}

/// 将单位化后的 2D 切片变换为 2D 模型输入布局:
/// 双线性缩放到 `(size, size)` 后插入前导通道轴, 得到 `(1, size, size)`.
///
/// 这是纯几何变换, 不含任何可学习参数.
pub fn model_input(slice: ArrayView2<f32>, size: usize) -> Array3<f32> {
    resize_bilinear(slice, (size, size)).insert_axis(Axis(0))
}

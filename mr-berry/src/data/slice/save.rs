//! 切片的持久化存储.

use crate::consts::UNIT_EPS;
use crate::{MaskSlice, MaskSliceMut, ScanSlice, ScanSliceMut};
use image::ImageResult;
use num::ToPrimitive;
use std::path::Path;

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
///
/// `ImgWriteVis` trait 的意图是, 图像将以 "可视化友好"
/// 的方式保存, 而不是 "as is" 的方式. 这意味着, 对于 `MaskSlice`, `MaskSliceMut`
/// 这类仅存在 0, 1 像素值的二值掩膜, 在保存时会映射到肉眼较易能区分的黑白形式;
/// 对于 `ScanSlice`, `ScanSliceMut` 这类以原始强度存储的扫描,
/// 在保存时会按切片 min-max 规范化到 8-bit 灰度.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将图片保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 表明一个可以通过 **按原样** 模式持久化存储的图像对象.
///
/// `ImgWriteRaw` trait 的额外意图是, 图像将按原样保存. 这意味着,
/// 对于 `MaskSlice`, `MaskSliceMut` 这类掩膜可以直接按像素值存储,
/// 但面对 `ScanSlice`, `ScanSliceMut` 这类浮点强度扫描无能为力.
pub trait ImgWriteRaw {
    /// 按原样将图片保存到 `path` 路径.
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 使掩膜像素更有利于单通道可视化.
#[inline]
pub(crate) fn pretty(pixel: u8) -> u8 {
    use crate::consts::gray::*;
    match pixel {
        // 背景为黑色
        BRATS_BACKGROUND => BLACK,

        // 前景为白色
        MASK_FOREGROUND => WHITE,

        any_else => panic!("只允许掩膜存在 0, 1 像素, 但发现了 `{any_else}`"),
    }
}

macro_rules! impl_mask_vis {
    ($($slice: ty),+) => {
        $(
            /// 会将背景/前景像素分别映射为黑色/白色. 不允许其他像素值.
            impl ImgWriteVis for $slice {
                fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    let (height, width) = self.shape();
                    let mut buf = image::GrayImage::new(width as u32, height as u32);
                    for ((h, w), &pix) in self.indexed_iter() {
                        buf.put_pixel(w as u32, h as u32, image::Luma([pretty(pix)]));
                    }
                    buf.save(path)
                }
            }
        )+
    };
}

macro_rules! impl_mask_raw {
    ($($slice: ty),+) => {
        $(
            /// 按原样存储.
            impl ImgWriteRaw for $slice {
                fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    let (height, width) = self.shape();
                    let mut buf = image::GrayImage::new(width as u32, height as u32);
                    for ((h, w), &pix) in self.indexed_iter() {
                        buf.put_pixel(w as u32, h as u32, image::Luma([pix]));
                    }
                    buf.save(path)
                }
            }
        )+
    };
}

macro_rules! impl_scan_vis {
    ($($scan: ty),+) => {
        $(
            /// 按切片 min-max 规范化到 8-bit 灰度后存储.
            impl ImgWriteVis for $scan {
                fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    let (height, width) = self.shape();
                    let mut buf = image::GrayImage::new(width as u32, height as u32);
                    let lo = self.min_intensity().unwrap_or(0.0);
                    let hi = self.max_intensity().unwrap_or(0.0);
                    let denom = hi - lo + UNIT_EPS;
                    for ((h, w), &v) in self.indexed_iter() {
                        // 单位化值落在 [0, 1) 内, 乘 255 后可安全转为 u8.
                        let gray = ((v - lo) / denom * 255.0).to_u8().unwrap_or(u8::MIN);
                        buf.put_pixel(w as u32, h as u32, image::Luma([gray]));
                    }
                    buf.save(path)
                }
            }
        )+
    };
}

impl_mask_vis!(MaskSlice<'_>, MaskSliceMut<'_>);
impl_scan_vis!(ScanSlice<'_>, ScanSliceMut<'_>);
impl_mask_raw!(MaskSlice<'_>, MaskSliceMut<'_>);

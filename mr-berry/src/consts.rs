//! 通用常量.

use crate::Idx3d;
use std::fmt;

/// 单通道颜色与 BraTS 标注值.
pub mod gray {
    /// 原 BraTS 数据集中, 背景的标签值.
    pub const BRATS_BACKGROUND: u8 = 0;

    /// 原 BraTS 数据集中, 坏死肿瘤核心的标签值.
    pub const BRATS_NECROTIC: u8 = 1;

    /// 原 BraTS 数据集中, 瘤周水肿的标签值.
    pub const BRATS_EDEMA: u8 = 2;

    /// 原 BraTS 数据集中, 增强肿瘤的标签值.
    pub const BRATS_ENHANCING: u8 = 4;

    /// 二值掩膜中的前景像素值.
    pub const MASK_FOREGROUND: u8 = 1;

    /// 单通道黑色.
    pub const BLACK: u8 = 0b_0000_0000;

    /// 单通道白色.
    pub const WHITE: u8 = 0b_1111_1111;

    /// 像素是否是肿瘤 (任意非背景标签)?
    #[inline]
    pub const fn is_tumor(p: u8) -> bool {
        !is_background(p)
    }

    /// 像素是否是背景?
    #[inline]
    pub const fn is_background(p: u8) -> bool {
        matches!(p, BRATS_BACKGROUND)
    }

    /// 像素是否是坏死核心?
    #[inline]
    pub const fn is_necrotic(p: u8) -> bool {
        matches!(p, BRATS_NECROTIC)
    }

    /// 像素是否是水肿?
    #[inline]
    pub const fn is_edema(p: u8) -> bool {
        matches!(p, BRATS_EDEMA)
    }

    /// 像素是否是增强肿瘤?
    #[inline]
    pub const fn is_enhancing(p: u8) -> bool {
        matches!(p, BRATS_ENHANCING)
    }
}

/// MRI 采集模态. 每个受试者的每个模态对应一个独立的 3D 体数据文件.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Modality {
    /// 液体衰减反转恢复序列.
    Flair,

    /// T1 加权序列.
    T1,

    /// T1 加权对比增强序列.
    T1ce,

    /// T2 加权序列.
    T2,
}

impl Modality {
    /// 文件名中的模态 token (小写). 模态文件按 "文件名包含 token" 规则匹配.
    #[inline]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Flair => "flair",
            Self::T1 => "t1",
            Self::T1ce => "t1ce",
            Self::T2 => "t2",
        }
    }
}

impl fmt::Display for Modality {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// 模态的固定通道顺序. 受试者张量的四个通道严格按该顺序堆叠.
pub const MODALITIES: [Modality; 4] = [Modality::Flair, Modality::T1, Modality::T1ce, Modality::T2];

/// 重采样目标形状, 按 (z, h, w) 格式.
pub const TARGET_SHAPE: Idx3d = (128, 128, 128);

/// z-score 规范化后的裁剪边界. 所有体素被裁剪到 `[-ZSCORE_CLIP, ZSCORE_CLIP]`.
pub const ZSCORE_CLIP: f32 = 5.0;

/// 单位化缩放 `(x - min) / (max - min + UNIT_EPS)` 中的除零保护项.
pub const UNIT_EPS: f32 = 1e-5;

/// 2D 模型输入的默认边长.
pub const MODEL_INPUT_SIZE: usize = 224;

/// 压缩体数据文件的扩展名. 模态匹配时要求文件名以该扩展名结尾.
pub const VOLUME_EXT: &str = ".nii.gz";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_tokens() {
        assert_eq!(MODALITIES.len(), 4);
        assert_eq!(MODALITIES[0].token(), "flair");
        assert_eq!(MODALITIES[1].token(), "t1");
        assert_eq!(MODALITIES[2].token(), "t1ce");
        assert_eq!(MODALITIES[3].token(), "t2");
        assert_eq!(Modality::T1ce.to_string(), "t1ce");
    }

    #[test]
    fn test_label_predicates() {
        use gray::*;
        assert!(is_background(BRATS_BACKGROUND));
        assert!(!is_tumor(BRATS_BACKGROUND));
        // 三种肿瘤子区域都算前景.
        for p in [BRATS_NECROTIC, BRATS_EDEMA, BRATS_ENHANCING] {
            assert!(is_tumor(p));
        }
        assert!(is_enhancing(BRATS_ENHANCING));
        assert!(!is_edema(BRATS_ENHANCING));
    }
}

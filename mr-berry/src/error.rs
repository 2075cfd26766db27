//! 运行时错误.

use crate::consts::Modality;
use crate::Idx3d;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 打开 3D 体数据文件的错误.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// 文件不存在, 或无法按 nifti 格式解析.
    #[error("无法读取 nifti 文件: {0}")]
    Read(#[from] nifti::NiftiError),

    /// 文件内容不是三维体数据.
    #[error("期望三维体数据, 但 `{path}` 的维数为 {ndim}")]
    NotVolumetric {
        /// 出错文件的路径.
        path: PathBuf,

        /// 文件 header 声明的维数.
        ndim: u16,
    },
}

/// 重采样错误.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// 源数据存在空轴, 无法进行插值.
    #[error("源形状 {0:?} 存在空轴, 无法插值")]
    EmptyAxis(Idx3d),
}

/// 单个受试者预处理错误.
///
/// 在装配过程中, 任意子阶段错误都会以该类型上抛并中止该受试者;
/// 批处理层是唯一的恢复边界.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// 体数据文件加载失败.
    #[error(transparent)]
    Volume(#[from] VolumeError),

    /// 受试者目录缺少某个必需模态的文件.
    #[error("受试者 `{subject}` 缺少 {modality} 模态文件")]
    MissingModality {
        /// 缺失的模态.
        modality: Modality,

        /// 受试者目录名.
        subject: String,
    },

    /// 重采样失败.
    #[error(transparent)]
    Resample(#[from] ResampleError),

    /// 张量持久化失败.
    #[error("张量持久化失败: {0}")]
    Save(#[from] ndarray_npy::WriteNpyError),

    /// 受试者目录不可读.
    #[error("受试者目录不可读: {0}")]
    SubjectDir(#[from] io::Error),
}

impl PreprocessError {
    /// 该错误是否为模态缺失.
    #[inline]
    pub fn is_missing_modality(&self) -> bool {
        matches!(self, Self::MissingModality { .. })
    }
}

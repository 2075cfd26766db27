//! 预处理张量的持久化存储.
//!
//! 每个受试者对应一个 `{id}.npy` 文件, 内容为 (4, z, h, w) 的 `f32` 张量.

use crate::dataset::preprocess::PatientTensor;
use ndarray_npy::{read_npy, write_npy, ReadNpyError, WriteNpyError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 持久化张量文件的扩展名.
pub const TENSOR_EXT: &str = "npy";

/// `dir` 下受试者 `id` 对应的张量文件路径.
#[inline]
pub fn tensor_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.{TENSOR_EXT}"))
}

/// 将张量写入 `dir/{id}.npy`.
///
/// 已存在的文件会被整体覆盖, 因此重复运行同一批处理是幂等的.
pub fn save_tensor(dir: &Path, id: &str, tensor: &PatientTensor) -> Result<(), WriteNpyError> {
    write_npy(tensor_path(dir, id), tensor)
}

/// 读回 `dir/{id}.npy` 中的张量.
pub fn load_tensor(dir: &Path, id: &str) -> Result<PatientTensor, ReadNpyError> {
    read_npy(tensor_path(dir, id))
}

/// 枚举 `dir` 下已持久化的受试者 id 集合, 按字典序排序.
pub fn stored_ids(dir: &Path) -> io::Result<Vec<String>> {
    let suffix = format!(".{TENSOR_EXT}");
    let mut ans: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            name.strip_suffix(suffix.as_str()).map(str::to_owned)
        })
        .collect();
    ans.sort();
    Ok(ans)
}

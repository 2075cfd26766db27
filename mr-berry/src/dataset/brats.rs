//! BraTS 训练集受试者目录的发现与加载.
//!
//! 数据按 `根目录/受试者目录/模态文件` 组织, 每个模态文件的文件名
//! (大小写不敏感) 包含模态 token, 并以 [`VOLUME_EXT`] 结尾.
//! 提供迭代器风格的数据集获取模式.

use crate::consts::{Modality, VOLUME_EXT};
use crate::dataset::preprocess::{assemble_patient, PatientTensor, PreprocessConfig};
use crate::error::PreprocessError;
use itertools::Itertools;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 受试者目录名. 目录名损坏 (非 UTF-8) 时做有损转换.
#[inline]
fn subject_name(subject_dir: &Path) -> String {
    subject_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| subject_dir.display().to_string())
}

/// 在受试者目录中定位 `modality` 模态的体数据文件.
///
/// 匹配规则: 文件名 (大小写不敏感) 包含模态 token, 且以 [`VOLUME_EXT`] 结尾.
/// 存在多个匹配时取字典序最小的文件名, 与文件系统的列举顺序无关,
/// 保证跨平台、跨运行确定.
///
/// 没有匹配时返回 [`PreprocessError::MissingModality`], 错误中带有
/// 模态名和受试者目录名.
pub fn find_modality_file(
    subject_dir: &Path,
    modality: Modality,
) -> Result<PathBuf, PreprocessError> {
    let picked = fs::read_dir(subject_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| {
            name.ends_with(VOLUME_EXT) && name.to_ascii_lowercase().contains(modality.token())
        })
        .sorted()
        .next();

    match picked {
        Some(name) => Ok(subject_dir.join(name)),
        None => Err(PreprocessError::MissingModality {
            modality,
            subject: subject_name(subject_dir),
        }),
    }
}

/// 枚举 `root` 下所有直接子目录, 每个子目录视为一个受试者.
///
/// 结果按 (目录名, 路径) 组织并按目录名排序, 保证批处理顺序确定.
/// 根目录下的普通文件会被忽略.
pub fn subject_dirs<P: AsRef<Path>>(root: P) -> io::Result<Vec<(String, PathBuf)>> {
    let mut ans = Vec::new();
    for entry in fs::read_dir(root.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            ans.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    ans.sort();
    Ok(ans)
}

/// 从根目录创建 BraTS 受试者张量加载器.
/// 返回的加载器会按目录名升序迭代所有受试者, 并逐个完成装配.
///
/// # 注意
///
/// `root` 必须是可读目录, 否则返回 `Err`.
pub fn subject_loader<P: AsRef<Path>>(
    root: P,
    config: PreprocessConfig,
) -> io::Result<SubjectLoader> {
    let mut data_rev = subject_dirs(root)?;
    data_rev.reverse();

    Ok(SubjectLoader { data_rev, config })
}

/// BraTS 受试者张量加载器, 在内部自动完成模态匹配与装配.
#[derive(Debug)]
pub struct SubjectLoader {
    data_rev: Vec<(String, PathBuf)>,
    config: PreprocessConfig,
}

impl Iterator for SubjectLoader {
    type Item = (String, Result<PatientTensor, PreprocessError>);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, path) = self.data_rev.pop()?;
        let tensor = assemble_patient(&path, &self.config);
        Some((id, tensor))
    }
}

impl ExactSizeIterator for SubjectLoader {
    #[inline]
    fn len(&self) -> usize {
        self.data_rev.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_find_modality_file_basic() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        touch(p, "BraTS2021_00000_flair.nii.gz");
        touch(p, "BraTS2021_00000_t1.nii.gz");
        touch(p, "BraTS2021_00000_t1ce.nii.gz");
        touch(p, "BraTS2021_00000_t2.nii.gz");
        // 干扰项: 扩展名不符.
        touch(p, "BraTS2021_00000_seg.nii");
        touch(p, "README.md");

        for m in crate::consts::MODALITIES {
            let found = find_modality_file(p, m).unwrap();
            let name = found.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.ends_with(".nii.gz"));
        }

        // "t1" token 同时命中 t1 和 t1ce 文件, 字典序最小者是 t1 本体.
        let t1 = find_modality_file(p, Modality::T1).unwrap();
        assert_eq!(
            t1.file_name().unwrap().to_string_lossy(),
            "BraTS2021_00000_t1.nii.gz"
        );
        let t1ce = find_modality_file(p, Modality::T1ce).unwrap();
        assert_eq!(
            t1ce.file_name().unwrap().to_string_lossy(),
            "BraTS2021_00000_t1ce.nii.gz"
        );
    }

    #[test]
    fn test_find_modality_file_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        touch(p, "SUBJ_FLAIR.nii.gz");
        assert!(find_modality_file(p, Modality::Flair).is_ok());
    }

    #[test]
    fn test_find_modality_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        touch(p, "BraTS2021_00000_t1.nii.gz");

        let err = find_modality_file(p, Modality::Flair).unwrap_err();
        assert!(err.is_missing_modality());
        // 错误信息指明缺失的模态.
        assert!(err.to_string().contains("flair"));
    }

    #[test]
    fn test_subject_dirs_sorted() {
        let root = tempfile::tempdir().unwrap();
        for name in ["charlie", "alpha", "bravo"] {
            fs::create_dir(root.path().join(name)).unwrap();
        }
        // 根目录下的普通文件被忽略.
        touch(root.path(), "notes.txt");

        let dirs = subject_dirs(root.path()).unwrap();
        let names: Vec<_> = dirs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }
}

//! 受试者级装配与批量预处理.
//!
//! 数据流: 模态文件 → 加载 → z-score 规范化 → 三线性重采样 →
//! 四通道堆叠 → `.npy` 持久化. 各阶段均为一次性无状态变换.

use crate::consts::{Modality, MODALITIES, TARGET_SHAPE};
use crate::data::MriScan;
use crate::dataset::{brats, tensor_store};
use crate::error::PreprocessError;
use crate::transform::{normalize_zscore, resample_trilinear};
use crate::Idx3d;
use ndarray::{stack, Array4, Axis};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// 多模态受试者张量, 形状 (模态通道, z, h, w). 通道顺序与配置的模态顺序一致.
pub type PatientTensor = Array4<f32>;

/// 预处理管线配置.
///
/// 将模态顺序与目标形状显式化为配置项, 以支持按调用覆盖与测试;
/// 缺省值即 BraTS 管线的固定常量.
#[derive(Clone, Debug)]
pub struct PreprocessConfig {
    /// 模态通道顺序.
    pub modalities: [Modality; 4],

    /// 重采样目标形状, 按 (z, h, w) 格式.
    pub target_shape: Idx3d,
}

impl Default for PreprocessConfig {
    #[inline]
    fn default() -> Self {
        Self {
            modalities: MODALITIES,
            target_shape: TARGET_SHAPE,
        }
    }
}

/// 装配单个受试者: 对每个模态依次执行 文件匹配 → 加载 → z-score 规范化 →
/// 三线性重采样, 再按配置的模态顺序沿新的前导通道轴堆叠成四通道张量.
///
/// 任意子阶段错误都会中止该受试者的装配并原样上抛; 本函数不做任何恢复.
pub fn assemble_patient(
    subject_dir: &Path,
    config: &PreprocessConfig,
) -> Result<PatientTensor, PreprocessError> {
    let mut channels = Vec::with_capacity(config.modalities.len());
    for &modality in &config.modalities {
        let path = brats::find_modality_file(subject_dir, modality)?;
        let scan = MriScan::open(path)?;
        let normalized = normalize_zscore(scan.data());
        channels.push(resample_trilinear(normalized.view(), config.target_shape)?);
    }

    let views: Vec<_> = channels.iter().map(|c| c.view()).collect();
    // 所有通道形状已统一为 target_shape, 堆叠不会失败, 可直接 unwrap.
    Ok(stack(Axis(0), &views).unwrap())
}

/// 单个受试者的批处理结果.
#[derive(Debug)]
pub enum SubjectOutcome {
    /// 张量已写入输出目录.
    Saved,

    /// 该受试者被跳过, 携带失败原因.
    Failed(PreprocessError),
}

impl SubjectOutcome {
    /// 是否成功持久化.
    #[inline]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// 批量预处理报告. 按处理顺序记录每个受试者的结果.
#[derive(Debug, Default)]
pub struct BatchReport {
    data: Vec<(String, SubjectOutcome)>,
}

impl BatchReport {
    #[inline]
    fn push(&mut self, id: String, outcome: SubjectOutcome) {
        self.data.push((id, outcome));
    }

    /// 按处理顺序访问所有 (受试者, 结果) 条目.
    #[inline]
    pub fn outcomes(&self) -> &[(String, SubjectOutcome)] {
        &self.data
    }

    /// 成功持久化的受试者个数.
    pub fn saved(&self) -> usize {
        self.data.iter().filter(|(_, o)| o.is_saved()).count()
    }

    /// 被跳过的受试者个数.
    #[inline]
    pub fn failed(&self) -> usize {
        self.data.len() - self.saved()
    }

    /// 将报告写进 `w` 中.
    pub fn describe_into<W: Write>(&self, w: &mut W) -> io::Result<()> {
        const S4: &str = "    ";

        writeln!(
            w,
            "Preprocessed {} subjects: {} saved, {} skipped",
            self.data.len(),
            self.saved(),
            self.failed()
        )?;
        for (id, outcome) in self.data.iter() {
            match outcome {
                SubjectOutcome::Saved => writeln!(w, "{S4}{id}: ok")?,
                SubjectOutcome::Failed(e) => writeln!(w, "{S4}{id}: skipped ({e})")?,
            }
        }
        Ok(())
    }
}

/// 批量预处理: 遍历 `raw_root` 下所有受试者目录 (按目录名升序, 严格串行),
/// 逐个装配并持久化到 `save_dir`.
///
/// # 行为
///
/// 1. `save_dir` 不存在时会被创建.
/// 2. 单个受试者的失败只会记入报告并写一条 warn 日志, 不会中止批处理;
///   没有任何重试. 失败的受试者不会留下任何输出文件 (写盘仅发生在装配完全成功之后).
/// 3. 重复运行会覆盖已有输出文件, 因此批处理是幂等的,
///   中断后重跑即可恢复.
///
/// 仅当根目录或输出目录本身不可用时返回 `Err`.
pub fn preprocess_all<P, Q>(
    raw_root: P,
    save_dir: Q,
    config: &PreprocessConfig,
) -> io::Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let save_dir = save_dir.as_ref();
    fs::create_dir_all(save_dir)?;

    let mut report = BatchReport::default();
    for (id, subject_dir) in brats::subject_dirs(raw_root)? {
        let outcome = match assemble_patient(&subject_dir, config).and_then(|tensor| {
            tensor_store::save_tensor(save_dir, &id, &tensor).map_err(PreprocessError::from)
        }) {
            Ok(()) => SubjectOutcome::Saved,
            Err(e) => {
                log::warn!("跳过受试者 `{id}`: {e}");
                SubjectOutcome::Failed(e)
            }
        };
        report.push(id, outcome);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{load_tensor, stored_ids};
    use ndarray::Array3;
    use nifti::writer::WriterOptions;
    use std::path::Path;

    /// 向 `dir/name` 写一个内容为等差数列的 nii.gz 体数据文件.
    fn write_volume(dir: &Path, name: &str, shape: (usize, usize, usize), seed: f32) {
        let (_, y, z) = shape;
        let data =
            Array3::from_shape_fn(shape, |(i, j, k)| seed + (i * y * z + j * z + k) as f32);
        WriterOptions::new(dir.join(name)).write_nifti(&data).unwrap();
    }

    /// 建立一个带全部 (或部分) 模态文件的受试者目录.
    fn make_subject(root: &Path, id: &str, skip: Option<&str>) {
        let dir = root.join(id);
        std::fs::create_dir(&dir).unwrap();
        // 各模态形状故意互不相同.
        let shapes = [(10, 12, 14), (8, 8, 8), (6, 10, 6), (12, 6, 8)];
        for (m, shape) in crate::consts::MODALITIES.iter().zip(shapes) {
            if Some(m.token()) == skip {
                continue;
            }
            write_volume(&dir, &format!("{id}_{m}.nii.gz"), shape, 1.0);
        }
    }

    fn small_config() -> PreprocessConfig {
        PreprocessConfig {
            target_shape: (8, 8, 8),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_constants() {
        let config = PreprocessConfig::default();
        assert_eq!(config.target_shape, (128, 128, 128));
        assert_eq!(config.modalities, MODALITIES);
    }

    #[test]
    fn test_assemble_patient_shape() {
        let root = tempfile::tempdir().unwrap();
        make_subject(root.path(), "BraTS2021_00000", None);

        let tensor =
            assemble_patient(&root.path().join("BraTS2021_00000"), &small_config()).unwrap();
        // 输入形状各异, 输出形状固定为 (4, 8, 8, 8).
        assert_eq!(tensor.dim(), (4, 8, 8, 8));
        // 规范化加裁剪之后的值必然落在 [-5, 5].
        assert!(tensor.iter().all(|&x| (-5.0..=5.0).contains(&x)));
    }

    #[test]
    fn test_assemble_missing_modality() {
        let root = tempfile::tempdir().unwrap();
        make_subject(root.path(), "BraTS2021_00001", Some("t1ce"));

        let err =
            assemble_patient(&root.path().join("BraTS2021_00001"), &small_config()).unwrap_err();
        assert!(err.is_missing_modality());
        // 错误同时指明模态和受试者.
        let msg = err.to_string();
        assert!(msg.contains("t1ce"));
        assert!(msg.contains("BraTS2021_00001"));
    }

    #[test]
    fn test_preprocess_all_isolates_failures() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        make_subject(root.path(), "s0_good", None);
        make_subject(root.path(), "s1_bad", Some("flair"));
        make_subject(root.path(), "s2_good", None);

        let report = preprocess_all(root.path(), out.path(), &small_config()).unwrap();
        assert_eq!(report.saved(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.outcomes().len(), 3);

        // 只有成功的受试者留下输出文件.
        let ids = stored_ids(out.path()).unwrap();
        assert_eq!(ids, vec!["s0_good".to_string(), "s2_good".to_string()]);

        // 失败的受试者在报告中按名字可查.
        let (bad_id, bad) = &report.outcomes()[1];
        assert_eq!(bad_id, "s1_bad");
        assert!(!bad.is_saved());

        let mut buf = Vec::with_capacity(512);
        report.describe_into(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("2 saved"));
        assert!(text.contains("skipped"));
    }

    #[test]
    fn test_preprocess_all_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        make_subject(root.path(), "subject", None);

        let config = small_config();
        preprocess_all(root.path(), out.path(), &config).unwrap();
        let first = load_tensor(out.path(), "subject").unwrap();

        // 重跑覆盖输出, 结果逐值一致.
        preprocess_all(root.path(), out.path(), &config).unwrap();
        let second = load_tensor(out.path(), "subject").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_subject_loader_matches_batch() {
        let root = tempfile::tempdir().unwrap();
        make_subject(root.path(), "a", None);
        make_subject(root.path(), "b", Some("t2"));

        let loader = crate::dataset::brats::subject_loader(root.path(), small_config()).unwrap();
        assert_eq!(loader.len(), 2);
        let items: Vec<_> = loader.collect();
        assert_eq!(items[0].0, "a");
        assert!(items[0].1.is_ok());
        assert_eq!(items[1].0, "b");
        assert!(items[1].1.is_err());
    }
}

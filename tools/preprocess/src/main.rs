//! BraTS 训练集批量预处理入口.
//!
//! 从原始数据根目录读取所有受试者, 逐个装配四通道张量并持久化,
//! 最后打印批处理报告. 单个受试者失败不会中止整批运行.

use mr_berry::prelude::*;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// 获取 BraTS 原始训练集基本路径.
///
/// 1. 若环境变量 `$BRATS_TRAIN_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/brats/train`.
fn raw_dir_from_env_or_home() -> PathBuf {
    if let Ok(d) = env::var("BRATS_TRAIN_DIR") {
        PathBuf::from(d)
    } else {
        home_dataset_dir_with(["brats", "train"]).unwrap()
    }
}

/// 获取预处理张量输出路径.
///
/// 1. 若环境变量 `$BRATS_TENSOR_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/brats/processed`.
fn save_dir_from_env_or_home() -> PathBuf {
    if let Ok(d) = env::var("BRATS_TENSOR_DIR") {
        PathBuf::from(d)
    } else {
        home_dataset_dir_with(["brats", "processed"]).unwrap()
    }
}

/// 实际运行.
fn main() -> ExitCode {
    simple_logger::SimpleLogger::new().init().unwrap();

    let raw_dir = raw_dir_from_env_or_home();
    assert!(raw_dir.is_dir(), "原始数据根目录不存在");
    let save_dir = save_dir_from_env_or_home();

    println!("Preprocessing BraTS subjects...");
    let report = match preprocess_all(&raw_dir, &save_dir, &PreprocessConfig::default()) {
        Ok(report) => report,
        Err(e) => {
            log::error!("批处理无法启动: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = io::stdout().lock();
    report.describe_into(&mut out).expect("Report writing error");
    out.flush().expect("Stdout flushing error");

    // 全部失败视为运行失败, 便于外层脚本判断.
    if report.saved() == 0 && report.failed() > 0 {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

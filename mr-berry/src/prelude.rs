//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{BoundingBox, Idx2d, Idx3d};

pub use crate::data::slice::{
    bounding_box_of, ImgWriteRaw, ImgWriteVis, MaskSlice, MaskSliceMut, OwnedMaskSlice,
    OwnedScanSlice, ScanSlice, ScanSliceMut,
};
pub use crate::data::{MriData3d, MriLabel, MriScan, NiftiHeaderAttr};

pub use crate::consts::gray::{BRATS_BACKGROUND, BRATS_EDEMA, BRATS_ENHANCING, BRATS_NECROTIC};
pub use crate::consts::{Modality, MODALITIES, TARGET_SHAPE};

pub use crate::error::{PreprocessError, ResampleError, VolumeError};

pub use crate::transform::{normalize_zscore, resample_trilinear, unit_rescale};

pub use crate::dataset::home_dataset_dir_with;
pub use crate::dataset::preprocess::{
    assemble_patient, preprocess_all, BatchReport, PatientTensor, PreprocessConfig, SubjectOutcome,
};
pub use crate::dataset::{self, brats};

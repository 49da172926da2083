mod config;
mod error;
mod guide;
mod logger;
mod naming;
mod scan;
mod single_folder;
mod subfolder;

pub use config::{app_paths, load_config, save_config, AppConfig, AppPaths, NamingRules};
pub use error::RenameError;
pub use guide::guide_batch_id;
pub use logger::{ConsoleSink, LogSink, MemorySink};
pub use naming::{
    angle_labels, is_calendar_date, is_sample_dir_name, lowercase_extension, normalize_region_code,
    split_region_date, validate_date_code,
};
pub use single_folder::{
    build_batches, find_guide_photos, rename_single_folder_mode, Batch, GuidePhoto,
    SingleFolderOptions, SingleFolderSummary,
};
pub use subfolder::{rename_subfolder_mode, SubfolderOptions, SubfolderSummary};

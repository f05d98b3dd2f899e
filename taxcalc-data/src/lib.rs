pub mod loader;
pub mod source;

pub use loader::{
    BracketRecord, CorporateRateRecord, IndirectRateRecord, ScheduleCsv, ScheduleLoadError,
    ScheduleLoader,
};
pub use source::{
    BundledSource, DATA_DIR_ENV, DirectorySource, bundled_registry, cwd_data_dir, data_dir_from_env,
    directory_registry,
};

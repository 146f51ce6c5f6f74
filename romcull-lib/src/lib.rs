//! Filesystem side of romcull: collection configuration, clone lists,
//! scanning input directories and copying or extracting best versions to the
//! output.

pub mod bizhawk;
pub mod clonelist;
pub mod config;
pub mod error;
pub mod mover;
pub mod runner;
pub mod scanner;

pub use bizhawk::BizhawkSystem;
pub use config::{Collection, Config, default_config_path};
pub use error::{ConfigError, MoveError};
pub use mover::{
    BestEntry, CopyAction, CopyPlan, CopyProgress, CopySummary, PlacementOptions, PlannedGame,
    UnzipMode, execute_copies, plan_copies, write_best_json,
};
pub use runner::{CollectionRun, run_collection};
pub use scanner::{ScanFilter, list_files_flat};

pub mod files;
pub mod settings;
pub mod state_file;
pub mod timestamp;
pub mod worked_times;

pub use files::DataDir;
pub use settings::{load_settings, save_settings, Settings};
pub use state_file::{load_tracking_state, save_tracking_state};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use worked_times::WorkedTimesFile;

pub mod enums;
pub mod events;
pub mod filter;
pub mod interval;
pub mod store;
pub mod summary;
pub mod tracking;

pub use enums::{Focus, IdleDisposition, PrimaryAction, TrackingStatus, UiMode};
pub use events::{StoreEvent, TrackingEvent};
pub use filter::{IntervalFilter, TimeWindow};
pub use interval::{IntervalEdit, WorkedInterval};
pub use store::{IntervalBackend, WorkedTimeStore};
pub use summary::{complete, end_label, format_duration, summarize, StartFormat, Summary};
pub use tracking::TrackingState;

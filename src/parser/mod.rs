pub mod aggregate;
pub mod details;
pub mod events;
pub mod summary;
pub mod text;
pub mod value;

pub use aggregate::{aggregate, sort_events, PeriodEvents, SortOrder};
pub use details::{parse_roster, GameDetails};
pub use events::EventParser;
pub use summary::{discretize_status, SummaryNormalizer};
pub use text::TextExtractor;

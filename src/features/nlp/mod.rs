//! Natural language parsing for quick-add entries and inbox searches.
//!
//! This module understands input like:
//! - "footy drill: cone weave tomorrow 4pm"
//! - "mark reports 14/09/2025 16:00 !high"
//! - "reflection: kids loved the relay game"
//! - "Monday 4pm" (as an inbox search)

mod date;
mod inbox;
mod metadata;
mod normalize;
mod router;
mod time;
mod when;

pub use date::{day_month_order, DateStage, StageMatch};
pub use inbox::{parse_inbox_time_query, InboxQuery, InboxQueryParser};
pub use metadata::{extract_metadata, QuickAddMetadata};
pub use normalize::{
    collapse_whitespace, excise, find_relative_phrase, normalize_query, Language, PhraseMatch,
    RelativePhrase, Remaining, RELATIVE_PHRASES,
};
pub use router::{route_quick_add, NoteDraft, PrefixKind, QuickAddRoute, ReminderDraft};
pub use time::{find_time, leading_time};
pub use when::{parse_quick_when, QuickWhenParser, WhenResolution};

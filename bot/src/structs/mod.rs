pub mod correlation;
pub mod presentation;
pub mod reply;
pub mod source;

pub use correlation::{CorrelationTable, RelayedCopy};
pub use presentation::Presentation;
pub use reply::Reply;
pub use source::{AttachmentKind, SourceAttachment, SourceMessage};

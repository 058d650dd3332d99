pub mod clock;
pub mod domain;
pub mod memory;
pub mod panel;
pub mod ports;
pub mod probe;

pub use clock::{start_of_day, start_of_local_day, Clock, SystemClock};
pub use domain::{validate_draft, Comment, DraftCheck, NewComment, COMMENTS_TABLE, COMMENT_MAX_CHARS};
pub use memory::MemoryCommentStore;
pub use panel::{CommentPanel, FetchOutcome, Notice, NoticeKind, PanelSnapshot, SubmitOutcome};
pub use ports::{CommentStore, PortError, PortResult};
pub use probe::{probe_connection, ProbeStatus};

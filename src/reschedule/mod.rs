//! Drag-to-reschedule for timeline bars: layout, gesture state, and the
//! commit check that runs on release.

pub mod commit;
pub mod layout;
pub mod session;

pub use commit::{
    validate_proposal, CollectedChanges, CommitOutcome, CommitRejection, DateChange,
    TaskDatesSink,
};
pub use layout::{hit_test, layout_bars, BarLayout, RowMetrics, Span};
pub use session::{DragMode, DragSession, DragTarget, GhostPreview, Rescheduler};

pub mod dates;
pub mod project;
pub mod task;
pub mod timeline;

pub use project::{Project, ProjectRange, ProjectVisibility};
pub use task::{Deadline, Task, TaskStatus};
pub use timeline::{BarPosition, DateGrid};

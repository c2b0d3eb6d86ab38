pub mod notice;
pub mod router;
pub mod routes;
pub mod view;

pub use notice::{Notice, NoticeCategory, NoticeMailbox};
pub use router::{ToolboardState, toolboard_router};

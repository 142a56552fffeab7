pub mod auth;
pub mod clock;
pub mod dashboard;
pub mod html;
pub mod listing;
pub mod seo;
pub mod session;
pub mod slug;
pub mod upload;
pub mod validation;
pub mod workflow;

pub use auth::AdminCredentials;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::DashboardCounts;
pub use session::{ADMIN_SESSION_COOKIE, Session, SessionManager};
pub use upload::{BlobStorage, ImageUpload, LocalBlobStorage};
pub use workflow::{DEFAULT_REJECTION_REASON, ReviewWorkflow};

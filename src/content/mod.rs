pub mod cadence;
pub mod scanner;

pub use cadence::CadenceTracker;
pub use scanner::{delete_used_content, ContentScanner};

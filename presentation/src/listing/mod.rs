//! Resource listing view state

pub mod pager;
pub mod partners;

pub use pager::{DEFAULT_PAGE_SIZE, ResourceListing};
pub use partners::partner_full_name;

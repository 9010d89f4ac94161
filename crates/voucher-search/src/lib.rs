//! Search orchestration and feedback actions for VoucherFinder.
//!
//! - [`SearchOrchestrator`] turns a brand name into codes and suggestions,
//!   deciding between cached results and a fresh scrape.
//! - [`FeedbackActions`] copies codes to the clipboard and reports copy and
//!   verification feedback without blocking the user on the backend.
//!
//! Both are generic over [`voucher_data::VoucherApi`] and run on a single
//! thread; state lives in `Cell`/`RefCell` and is shared through `Rc`.

mod feedback;
mod orchestrator;

#[cfg(test)]
mod testing;

pub use feedback::{Clipboard, ClipboardError, CopyTracking, FeedbackActions};
pub use orchestrator::{Layout, SearchOrchestrator, SearchState, SEARCH_FAILED_MESSAGE};

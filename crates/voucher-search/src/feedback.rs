//! Copying codes and reporting whether suggestions worked.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, warn};
use voucher_core::{Code, SuggestionId};
use voucher_data::VoucherApi;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unavailable,

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Somewhere to put text for the user to paste.
#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Background report of a copy. Never fails; drive it or drop it.
pub type CopyTracking = LocalBoxFuture<'static, ()>;

/// Copy and verify actions shared by every card in the session.
pub struct FeedbackActions<A> {
    api: Rc<A>,
    verified: RefCell<HashSet<SuggestionId>>,
}

impl<A: VoucherApi + 'static> FeedbackActions<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self {
            api,
            verified: RefCell::new(HashSet::new()),
        }
    }

    /// Put the code's text on the clipboard.
    ///
    /// On success the returned future reports the copy to the backend. The
    /// caller spawns it; tracking failures are only logged.
    pub async fn copy_code<C: Clipboard + ?Sized>(
        &self,
        clipboard: &C,
        code: &Code,
    ) -> Result<CopyTracking, ClipboardError> {
        if let Err(error) = clipboard.write_text(&code.code).await {
            warn!(code_id = %code.id, %error, "copy to clipboard failed");
            return Err(error);
        }
        debug!(code_id = %code.id, brand = %code.brand, "code copied");

        let api = Rc::clone(&self.api);
        let code_id = code.id;
        Ok(async move {
            if let Err(error) = api.track_code_copy(code_id).await {
                warn!(%code_id, %error, "copy tracking failed");
            }
        }
        .boxed_local())
    }

    /// Report whether a suggestion worked.
    ///
    /// Returns true when the suggestion is now marked verified for this
    /// session. A "didn't work" report is sent but changes nothing locally.
    pub async fn verify(&self, suggestion_id: SuggestionId, worked: bool) -> bool {
        match self.api.verify_suggestion(suggestion_id, worked).await {
            Ok(()) if worked => {
                self.verified.borrow_mut().insert(suggestion_id);
                debug!(%suggestion_id, "suggestion verified");
                true
            }
            Ok(()) => {
                debug!(%suggestion_id, "suggestion reported as not working");
                false
            }
            Err(error) => {
                warn!(%suggestion_id, worked, %error, "verification failed");
                false
            }
        }
    }

    pub fn is_verified(&self, suggestion_id: SuggestionId) -> bool {
        self.verified.borrow().contains(&suggestion_id)
    }

    pub fn verified_ids(&self) -> Vec<SuggestionId> {
        let mut ids: Vec<_> = self.verified.borrow().iter().copied().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{code, Call, FakeApi, FakeClipboard};
    use voucher_core::CodeId;

    #[tokio::test]
    async fn test_copy_writes_exact_code_and_tracks() {
        let api = Rc::new(FakeApi::new());
        let actions = FeedbackActions::new(Rc::clone(&api));
        let clipboard = FakeClipboard::default();

        let tracking = actions
            .copy_code(&clipboard, &code(42, "Spotify", "SPOTIFY-50 "))
            .await
            .unwrap();
        assert_eq!(*clipboard.written.borrow(), vec!["SPOTIFY-50 ".to_string()]);
        assert!(api.calls().is_empty());

        tracking.await;
        assert_eq!(api.calls(), vec![Call::TrackCopy(CodeId::new(42))]);
    }

    #[tokio::test]
    async fn test_tracking_failure_does_not_undo_copy() {
        let api = Rc::new(FakeApi::new().feedback_fails());
        let actions = FeedbackActions::new(Rc::clone(&api));
        let clipboard = FakeClipboard::default();

        let tracking = actions
            .copy_code(&clipboard, &code(7, "NordVPN", "NORD70"))
            .await
            .unwrap();
        tracking.await;

        assert_eq!(clipboard.written.borrow().len(), 1);
        assert_eq!(api.calls(), vec![Call::TrackCopy(CodeId::new(7))]);
    }

    #[tokio::test]
    async fn test_clipboard_failure_skips_tracking() {
        let api = Rc::new(FakeApi::new());
        let actions = FeedbackActions::new(Rc::clone(&api));
        let clipboard = FakeClipboard {
            fail: true,
            ..FakeClipboard::default()
        };

        let result = actions
            .copy_code(&clipboard, &code(1, "Spotify", "SPOT"))
            .await;

        assert!(matches!(result, Err(ClipboardError::WriteFailed(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_verify_worked_marks_verified() {
        let api = Rc::new(FakeApi::new());
        let actions = FeedbackActions::new(Rc::clone(&api));
        let id = SuggestionId::new(3);

        assert!(!actions.is_verified(id));
        assert!(actions.verify(id, true).await);

        assert!(actions.is_verified(id));
        assert_eq!(actions.verified_ids(), vec![id]);
        assert_eq!(api.calls(), vec![Call::Verify(id, true)]);
    }

    #[tokio::test]
    async fn test_verify_not_worked_is_sent_but_not_marked() {
        let api = Rc::new(FakeApi::new());
        let actions = FeedbackActions::new(Rc::clone(&api));
        let id = SuggestionId::new(5);

        assert!(!actions.verify(id, false).await);

        assert!(!actions.is_verified(id));
        assert_eq!(api.calls(), vec![Call::Verify(id, false)]);
    }

    #[tokio::test]
    async fn test_failed_verification_stays_unverified() {
        let api = Rc::new(FakeApi::new().feedback_fails());
        let actions = FeedbackActions::new(Rc::clone(&api));
        let id = SuggestionId::new(8);

        assert!(!actions.verify(id, true).await);
        assert!(!actions.is_verified(id));
    }

    #[tokio::test]
    async fn test_verified_set_spans_suggestions() {
        let actions = FeedbackActions::new(Rc::new(FakeApi::new()));

        actions.verify(SuggestionId::new(9), true).await;
        actions.verify(SuggestionId::new(2), true).await;
        actions.verify(SuggestionId::new(9), true).await;

        assert_eq!(
            actions.verified_ids(),
            vec![SuggestionId::new(2), SuggestionId::new(9)]
        );
    }
}

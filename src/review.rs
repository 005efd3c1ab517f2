// Review submission: no validation, always accepted

use tracing::info;

use crate::notifier::Notification;
use crate::state::{ReviewForm, UiState};

pub const REVIEW_THANKS_MESSAGE: &str = "Thank you for your review! We value your feedback.";

pub fn submit_review(state: &mut UiState, form: ReviewForm) -> Notification {
    info!(
        "Review received from {:?} ({} chars)",
        form.reviewer_name,
        form.comment.len()
    );
    state.review = ReviewForm::default();
    Notification::success(REVIEW_THANKS_MESSAGE)
}

//! The message transport seam.

use std::future::Future;

use steamwatch_diff::Notification;
use steamwatch_state::MessageHandle;

use crate::error::SinkError;

/// Creates, edits, and deletes messages in one fixed channel.
///
/// `edit` and `delete` report a message that no longer exists as
/// [`SinkError::NotFound`].
pub trait MessageChannel {
    fn create(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<MessageHandle, SinkError>> + Send;

    fn edit(
        &self,
        handle: &MessageHandle,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), SinkError>> + Send;

    fn delete(&self, handle: &MessageHandle) -> impl Future<Output = Result<(), SinkError>> + Send;
}

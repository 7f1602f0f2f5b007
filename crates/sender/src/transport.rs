//! Abstract peer messaging transport.

use std::future::Future;
use std::pin::Pin;

use crate::error::SendError;

/// Abstract connection to the device messaging layer.
///
/// The embedding app implements this trait on top of the platform's
/// message client. Using a trait keeps the transfer flow decoupled from
/// the platform and testable with mocks. Sends are single-attempt: the
/// transport must not retry internally, the sender owns retry policy.
pub trait PeerTransport: Send + Sync {
    /// Returns the identifiers of currently reachable peers.
    ///
    /// May be empty; the sender treats that as a failed attempt and
    /// re-resolves on the next one.
    fn connected_peers(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, SendError>> + Send + '_>>;

    /// Sends one payload to `peer_id` on the given logical path.
    ///
    /// Resolves once the transport confirms the send, or with an error
    /// for this single attempt.
    fn send_message(
        &self,
        peer_id: String,
        path: &'static str,
        payload: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<(), SendError>> + Send + '_>>;
}

// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Pluggable providers of candidate issuer certificates.
//!
//! An [`IssuerSource`] answers "who might have issued this certificate?"
//! either immediately ([`IssuerSource::sync_issuers_of`]) or later through a
//! [`PendingRequest`]. A pending request is a stream: every item is one
//! delivered certificate and the end of the stream means the query is
//! exhausted. Dropping the request discards it, so a source whose results
//! arrive after the path builder is gone has nobody left to deliver to.
//!
//! Sources that fetch on another thread hand results back through the
//! sending half returned by [`PendingRequest::channel`]:
//!
//! ```
//! # #[cfg(feature = "std")]
//! # fn example(issuer: std::sync::Arc<certpath::Certificate>) {
//! use certpath::issuer_source::PendingRequest;
//!
//! let (sender, request) = PendingRequest::channel();
//! std::thread::spawn(move || {
//!     sender.deliver(issuer);
//!     sender.finish();
//! });
//! # drop(request);
//! # }
//! ```

pub mod static_source;

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::stream::{self, LocalBoxStream, Stream, StreamExt};

use crate::certificate::Certificate;

pub use static_source::StaticIssuerSource;

/// Provider of candidate issuers.
pub trait IssuerSource {
    /// Append every issuer candidate that is available right away.
    fn sync_issuers_of(&self, cert: &Certificate, issuers: &mut Vec<Arc<Certificate>>);

    /// Start an asynchronous query for issuers of `cert`.
    ///
    /// Returns `None` when this source has nothing to look up.
    fn async_issuers_of(&self, cert: &Arc<Certificate>) -> Option<PendingRequest> {
        let _ = cert;
        None
    }
}

// ============================================================================
// Pending request
// ============================================================================

/// One outstanding asynchronous issuer query.
pub struct PendingRequest {
    deliveries: LocalBoxStream<'static, Arc<Certificate>>,
}

impl PendingRequest {
    /// Wrap any stream of issuer certificates.
    pub fn from_stream<S>(deliveries: S) -> Self
    where
        S: Stream<Item = Arc<Certificate>> + 'static,
    {
        PendingRequest {
            deliveries: deliveries.boxed_local(),
        }
    }

    /// A request whose results are already known; they are delivered on the
    /// builder's next turn.
    pub fn ready(issuers: Vec<Arc<Certificate>>) -> Self {
        Self::from_stream(stream::iter(issuers))
    }

    /// A request fed from elsewhere, possibly another thread.
    #[cfg(feature = "std")]
    pub fn channel() -> (IssuerSender, PendingRequest) {
        let (tx, rx) = futures::channel::mpsc::unbounded();
        (IssuerSender { tx }, Self::from_stream(rx))
    }
}

impl Stream for PendingRequest {
    type Item = Arc<Certificate>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.deliveries.poll_next_unpin(cx)
    }
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest").finish_non_exhaustive()
    }
}

/// Sending half of [`PendingRequest::channel`].
///
/// Dropping every clone of the sender, or calling [`IssuerSender::finish`],
/// tells the builder that no more issuers will arrive.
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct IssuerSender {
    tx: futures::channel::mpsc::UnboundedSender<Arc<Certificate>>,
}

#[cfg(feature = "std")]
impl IssuerSender {
    /// Deliver one issuer. Returns `false` when the request was discarded,
    /// in which case the certificate is dropped.
    pub fn deliver(&self, cert: Arc<Certificate>) -> bool {
        self.tx.unbounded_send(cert).is_ok()
    }

    /// Signal that the query is exhausted.
    pub fn finish(self) {
        self.tx.close_channel();
    }

    /// Whether the receiving request has been dropped or finished.
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }
}

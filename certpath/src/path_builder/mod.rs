// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certification path building.
//!
//! A [`PathBuilder`] searches for a chain from a target certificate to a
//! trust anchor that the caller's [`Verifier`] accepts. Candidate issuers
//! come from the trust store itself and from every registered
//! [`IssuerSource`].
//!
//! The search is breadth-first over the issuer graph, so shorter paths are
//! attempted before longer ones. Synchronous issuer data is always used up
//! before any asynchronous query is made. Asynchronous queries then follow
//! the same order: nodes are fanned out one at a time, earliest discovered
//! first, and every issuer they deliver is explored breadth-first again
//! before the next node is queried. A build can run in two modes:
//!
//! - [`PathBuilder::run_sync`] never issues asynchronous queries.
//! - [`PathBuilder::run`] returns a [`BuildFuture`] that also queries
//!   asynchronous sources when synchronous data does not yield a verified
//!   path. Dropping the future abandons the build and every outstanding
//!   query with it.
//!
//! ```
//! use std::sync::Arc;
//! use certpath::prelude::*;
//!
//! # fn example(target: Arc<Certificate>, intermediates: StaticIssuerSource,
//! #            anchors: InMemoryTrustStore, time: Time) {
//! let verifier = |_path: &CertificateChain, _time: &Time| Ok::<(), VerifyError>(());
//! let mut builder = PathBuilder::new(target, &anchors, &verifier, time);
//! builder.add_issuer_source(&intermediates);
//! let result = builder.run_sync();
//! if let Some(best) = result.best() {
//!     println!("{}: {:?}", best.path, best.outcome);
//! }
//! # }
//! ```

pub mod options;
pub mod result;
mod search;

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::future::FusedFuture;
use futures::stream::{select_all, SelectAll, StreamExt};

use crate::certificate::Certificate;
use crate::error::Result;
use crate::issuer_source::{IssuerSource, PendingRequest};
use crate::time::Time;
use crate::trust_store::TrustStore;
use crate::verifier::Verifier;

pub use options::PathBuilderOptions;
pub use result::{BuildResult, CompletionStatus, ResultPath};

use search::{NodeId, Search};

// ============================================================================
// Builder
// ============================================================================

/// Single-use path builder.
pub struct PathBuilder<'a> {
    target: Arc<Certificate>,
    trust_store: &'a dyn TrustStore,
    verifier: &'a dyn Verifier,
    time: Time,
    sources: Vec<&'a dyn IssuerSource>,
    options: PathBuilderOptions,
}

impl<'a> PathBuilder<'a> {
    pub fn new(
        target: Arc<Certificate>,
        trust_store: &'a dyn TrustStore,
        verifier: &'a dyn Verifier,
        time: Time,
    ) -> Self {
        PathBuilder {
            target,
            trust_store,
            verifier,
            time,
            sources: Vec::new(),
            options: PathBuilderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PathBuilderOptions) -> Result<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    pub fn options(&self) -> &PathBuilderOptions {
        &self.options
    }

    /// Register an issuer source. Sources are queried in registration order.
    pub fn add_issuer_source(&mut self, source: &'a dyn IssuerSource) {
        self.sources.push(source);
    }

    /// Build using synchronous issuer data only.
    pub fn run_sync(self) -> BuildResult {
        let mut search = self.into_search(false);
        search.explore_frontier();
        search.into_result()
    }

    /// Build, querying asynchronous sources when synchronous data is not
    /// enough.
    pub fn run(self) -> BuildFuture<'a> {
        BuildFuture {
            search: Some(self.into_search(true)),
            waiting: None,
        }
    }

    fn into_search(self, allow_async: bool) -> Search<'a> {
        log::debug!(
            "path builder: building for {} with {} issuer sources",
            self.target.subject(),
            self.sources.len()
        );
        Search::new(
            self.target,
            self.trust_store,
            self.verifier,
            self.sources,
            self.time,
            self.options,
            allow_async,
        )
    }
}

// ============================================================================
// Asynchronous driver
// ============================================================================

/// The node whose asynchronous queries are outstanding.
struct Waiting {
    node: NodeId,
    requests: SelectAll<PendingRequest>,
}

/// Future returned by [`PathBuilder::run`].
///
/// Resolves exactly once. Polling again after it resolved panics.
#[must_use = "futures do nothing unless polled"]
pub struct BuildFuture<'a> {
    search: Option<Search<'a>>,
    waiting: Option<Waiting>,
}

impl Future for BuildFuture<'_> {
    type Output = BuildResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<BuildResult> {
        let this = self.get_mut();
        let Some(mut search) = this.search.take() else {
            panic!("BuildFuture polled after completion");
        };
        match drive(&mut search, &mut this.waiting, cx) {
            Poll::Pending => {
                this.search = Some(search);
                Poll::Pending
            }
            Poll::Ready(()) => Poll::Ready(search.into_result()),
        }
    }
}

impl FusedFuture for BuildFuture<'_> {
    fn is_terminated(&self) -> bool {
        self.search.is_none()
    }
}

fn drive(search: &mut Search<'_>, waiting: &mut Option<Waiting>, cx: &mut Context<'_>) -> Poll<()> {
    loop {
        search.explore_frontier();
        if search.is_stopped() {
            // Outstanding queries are dropped with the requests.
            *waiting = None;
            return Poll::Ready(());
        }

        if let Some(current) = waiting.as_mut() {
            let node = current.node;
            match current.requests.poll_next_unpin(cx) {
                Poll::Ready(Some(issuer)) => {
                    log::trace!(
                        "path builder: node {} received issuer {}",
                        node,
                        issuer.subject()
                    );
                    search.add_issuer(node, issuer);
                }
                Poll::Ready(None) => {
                    *waiting = None;
                    search.finish_node(node);
                }
                Poll::Pending => return Poll::Pending,
            }
            continue;
        }

        let Some(node) = search.next_async_node() else {
            return Poll::Ready(());
        };
        let requests = search.start_async(node);
        if requests.is_empty() {
            search.finish_node(node);
        } else {
            *waiting = Some(Waiting {
                node,
                requests: select_all(requests),
            });
        }
    }
}

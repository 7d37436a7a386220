// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Search engine behind [`PathBuilder`](super::PathBuilder).
//!
//! Every appended certificate becomes a node in an arena; a node only knows
//! its parent, so the candidate path ending at a node is rebuilt by walking
//! parent links. Nodes are explored in creation order. Nodes that still
//! want an asynchronous query are parked in the same order and fanned out
//! oldest first, once the synchronous frontier is empty, so shallower
//! candidates keep their precedence over deeper ones.

extern crate alloc;

use alloc::collections::{BTreeSet, VecDeque};
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::certificate::Certificate;
use crate::chain::CertificateChain;
use crate::error::PathError;
use crate::issuer_source::{IssuerSource, PendingRequest};
use crate::path_builder::options::PathBuilderOptions;
use crate::path_builder::result::{BuildResult, CompletionStatus, ResultPath};
use crate::time::Time;
use crate::trust_store::TrustStore;
use crate::verifier::Verifier;

pub(crate) type NodeId = usize;

struct SearchNode {
    cert: Arc<Certificate>,
    parent: Option<NodeId>,
    /// Certificates in the path ending here, this one included
    depth: usize,
    /// Issuers already offered as extensions of this node
    tried: BTreeSet<Arc<Certificate>>,
    children: usize,
}

impl SearchNode {
    fn new(cert: Arc<Certificate>, parent: Option<NodeId>, depth: usize) -> Self {
        SearchNode {
            cert,
            parent,
            depth,
            tried: BTreeSet::new(),
            children: 0,
        }
    }
}

pub(crate) struct Search<'a> {
    trust_store: &'a dyn TrustStore,
    verifier: &'a dyn Verifier,
    sources: Vec<&'a dyn IssuerSource>,
    time: Time,
    options: PathBuilderOptions,
    allow_async: bool,
    nodes: Vec<SearchNode>,
    frontier: VecDeque<NodeId>,
    awaiting_async: VecDeque<NodeId>,
    paths: Vec<ResultPath>,
    stopped: bool,
    issued_async: bool,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        target: Arc<Certificate>,
        trust_store: &'a dyn TrustStore,
        verifier: &'a dyn Verifier,
        sources: Vec<&'a dyn IssuerSource>,
        time: Time,
        options: PathBuilderOptions,
        allow_async: bool,
    ) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(0);
        Search {
            trust_store,
            verifier,
            sources,
            time,
            options,
            allow_async,
            nodes: alloc::vec![SearchNode::new(target, None, 1)],
            frontier,
            awaiting_async: VecDeque::new(),
            paths: Vec::new(),
            stopped: false,
            issued_async: false,
        }
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Explore queued nodes until the frontier is empty or a path verified.
    pub(crate) fn explore_frontier(&mut self) {
        while !self.stopped {
            let Some(id) = self.frontier.pop_front() else {
                break;
            };
            self.explore(id);
        }
    }

    fn explore(&mut self, id: NodeId) {
        let cert = self.nodes[id].cert.clone();
        log::trace!(
            "path builder: exploring node {} ({}) at depth {}",
            id,
            cert.subject(),
            self.nodes[id].depth
        );

        // An anchor ends the path; its own issuers are never looked at.
        if self.trust_store.anchor_match(&cert).is_match() {
            self.attempt(id);
            return;
        }

        if self.nodes[id].depth >= self.options.max_path_depth {
            log::warn!(
                "path builder: depth limit {} reached at {}",
                self.options.max_path_depth,
                cert.subject()
            );
            self.dead_end(id);
            return;
        }

        // Anchors first, then sources in registration order.
        let mut candidates = Vec::new();
        self.trust_store
            .find_anchors_by_subject(cert.issuer(), &mut candidates);
        for source in self.sources.iter() {
            source.sync_issuers_of(&cert, &mut candidates);
        }
        for issuer in candidates {
            self.add_issuer(id, issuer);
        }

        if self.allow_async {
            self.awaiting_async.push_back(id);
        } else {
            self.finish_node(id);
        }
    }

    /// Offer `issuer` as an extension of `parent`.
    pub(crate) fn add_issuer(&mut self, parent: NodeId, issuer: Arc<Certificate>) {
        if self.stopped {
            return;
        }
        if !self.nodes[parent].tried.insert(issuer.clone()) {
            log::trace!(
                "path builder: {} already offered to node {}",
                issuer.subject(),
                parent
            );
            return;
        }
        if self.path_contains(parent, &issuer) {
            log::trace!(
                "path builder: {} would repeat a certificate in the path of node {}",
                issuer.subject(),
                parent
            );
            return;
        }

        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(SearchNode::new(issuer, Some(parent), depth));
        self.nodes[parent].children += 1;
        self.frontier.push_back(id);
    }

    /// Called once no more issuers can arrive for `id`.
    pub(crate) fn finish_node(&mut self, id: NodeId) {
        if !self.stopped && self.nodes[id].children == 0 {
            self.dead_end(id);
        }
    }

    /// Next parked node to fan out, in exploration order.
    pub(crate) fn next_async_node(&mut self) -> Option<NodeId> {
        if self.stopped {
            return None;
        }
        self.awaiting_async.pop_front()
    }

    /// Query every source asynchronously for issuers of `id`.
    pub(crate) fn start_async(&mut self, id: NodeId) -> Vec<PendingRequest> {
        let cert = self.nodes[id].cert.clone();
        let requests: Vec<PendingRequest> = self
            .sources
            .iter()
            .filter_map(|source| source.async_issuers_of(&cert))
            .collect();
        if !requests.is_empty() {
            log::debug!(
                "path builder: {} asynchronous queries for {}",
                requests.len(),
                cert.subject()
            );
            self.issued_async = true;
        }
        requests
    }

    pub(crate) fn into_result(self) -> BuildResult {
        let completion = if self.issued_async {
            CompletionStatus::Asynchronous
        } else {
            CompletionStatus::Synchronous
        };
        BuildResult::new(self.paths, completion)
    }

    /// Whether `cert`, or a certificate with its name and key, is already on
    /// the path ending at `id`.
    fn path_contains(&self, id: NodeId, cert: &Certificate) -> bool {
        let mut next = Some(id);
        while let Some(current) = next {
            let node = &self.nodes[current];
            if node.cert.as_ref() == cert || node.cert.same_name_and_key(cert) {
                return true;
            }
            next = node.parent;
        }
        false
    }

    fn path_to(&self, id: NodeId) -> CertificateChain {
        let mut certificates = Vec::with_capacity(self.nodes[id].depth);
        let mut next = Some(id);
        while let Some(current) = next {
            certificates.push(self.nodes[current].cert.clone());
            next = self.nodes[current].parent;
        }
        certificates.reverse();
        CertificateChain::new(certificates)
    }

    fn attempt(&mut self, id: NodeId) {
        let path = self.path_to(id);
        let outcome = self
            .verifier
            .verify(&path, &self.time)
            .map_err(PathError::VerifierRejected);
        match &outcome {
            Ok(()) => log::debug!("path builder: verified {}", path),
            Err(e) => log::debug!("path builder: {} failed: {}", path, e),
        }
        let verified = outcome.is_ok();
        self.paths.push(ResultPath { path, outcome });

        if verified && !self.options.explore_all_paths {
            self.stopped = true;
            self.frontier.clear();
            self.awaiting_async.clear();
        }
    }

    fn dead_end(&mut self, id: NodeId) {
        let path = self.path_to(id);
        log::debug!("path builder: dead end {}", path);
        self.paths.push(ResultPath {
            path,
            outcome: Err(PathError::Exhausted),
        });
    }
}

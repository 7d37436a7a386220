// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use std::sync::Arc;

use certpath::{
    Certificate, CompletionStatus, InMemoryTrustStore, PathBuilder, PathBuilderOptions, PathError,
    VerifyError,
};
use certpath_test::common::*;

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_target_is_trust_anchor() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.a_by_b.clone());
    let mut sync_certs = CountingSyncSource::new();
    sync_certs.add_cert(graph.b_by_c.clone());
    let verifier = SigningVerifier::new();

    let mut builder = PathBuilder::new(
        graph.a_by_b.clone(),
        &trust_store,
        &verifier,
        validation_time(),
    );
    builder.add_issuer_source(&sync_certs);
    let result = run_async(builder);

    assert!(result.is_success());
    assert_eq!(attempts(&result), vec![vec!["A(B)"]]);
    assert_eq!(result.completion, CompletionStatus::Synchronous);
    assert_eq!(sync_certs.queries(), 0);
}

#[test]
fn test_target_directly_signed_by_trust_anchor() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.b_by_c.clone());
    let mut sync_certs = CountingSyncSource::new();
    sync_certs.add_cert(graph.c_by_d.clone());
    let verifier = SigningVerifier::new();

    let mut builder = PathBuilder::new(
        graph.a_by_b.clone(),
        &trust_store,
        &verifier,
        validation_time(),
    );
    builder.add_issuer_source(&sync_certs);
    let result = run_async(builder);

    assert_eq!(result.outcome(), Ok(()));
    assert_eq!(attempts(&result), vec![vec!["A(B)", "B(C)"]]);
    assert_eq!(result.completion, CompletionStatus::Synchronous);
    assert_eq!(sync_certs.queries(), 1);
}

#[test]
fn test_no_issuer_sources() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.e_by_e.clone());
    let verifier = SigningVerifier::new();

    let result =
        PathBuilder::new(graph.a_by_b.clone(), &trust_store, &verifier, validation_time())
            .run_sync();

    assert!(!result.is_success());
    assert_eq!(attempts(&result), vec![vec!["A(B)"]]);
    assert_eq!(result.paths[0].outcome, Err(PathError::Exhausted));
    assert_eq!(result.outcome(), Err(PathError::AuthorityInvalid));
    assert_eq!(verifier.calls(), 0);
}

#[test]
fn test_tries_sync_first() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.e_by_e.clone());
    let mut sync_certs = CountingSyncSource::new();
    sync_certs.add_cert(graph.b_by_f.clone());
    sync_certs.add_cert(graph.f_by_e.clone());
    let mut async_certs = AsyncStaticSource::new();
    async_certs.add_cert(graph.b_by_c.clone());
    async_certs.add_cert(graph.c_by_e.clone());
    let verifier = SigningVerifier::new();

    let mut builder = PathBuilder::new(
        graph.a_by_b.clone(),
        &trust_store,
        &verifier,
        validation_time(),
    );
    builder.add_issuer_source(&async_certs);
    builder.add_issuer_source(&sync_certs);
    let result = run_async(builder);

    assert!(result.is_success());
    assert_eq!(
        labels(&result.best().unwrap().path),
        vec!["A(B)", "B(F)", "F(E)", "E(E)"]
    );
    assert_eq!(result.completion, CompletionStatus::Synchronous);
    assert_eq!(async_certs.queries(), 0);
}

#[test]
fn test_synchronous_only_mode() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.e_by_e.clone());
    let mut sync_certs = CountingSyncSource::new();
    sync_certs.add_cert(graph.f_by_e.clone());
    let mut async_certs = AsyncStaticSource::new();
    async_certs.add_cert(graph.b_by_f.clone());
    let verifier = SigningVerifier::new();

    let mut builder = PathBuilder::new(
        graph.a_by_b.clone(),
        &trust_store,
        &verifier,
        validation_time(),
    );
    builder.add_issuer_source(&async_certs);
    builder.add_issuer_source(&sync_certs);
    let result = builder.run_sync();

    assert_eq!(result.outcome(), Err(PathError::AuthorityInvalid));
    assert_eq!(result.completion, CompletionStatus::Synchronous);
    assert_eq!(async_certs.queries(), 0);

    // The same configuration succeeds once asynchronous sources may answer.
    let mut builder = PathBuilder::new(
        graph.a_by_b.clone(),
        &trust_store,
        &verifier,
        validation_time(),
    );
    builder.add_issuer_source(&async_certs);
    builder.add_issuer_source(&sync_certs);
    let result = run_async(builder);

    assert!(result.is_success());
    assert_eq!(result.completion, CompletionStatus::Asynchronous);
    assert_eq!(async_certs.queries(), 1);
}

#[test]
fn test_backtracking_to_async_candidate() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.d_by_d.clone());
    let mut sync_certs = CountingSyncSource::new();
    sync_certs.add_cert(graph.b_by_f.clone());
    sync_certs.add_cert(graph.f_by_e.clone());
    let mut async_certs = AsyncStaticSource::new();
    async_certs.add_cert(graph.b_by_c.clone());
    async_certs.add_cert(graph.c_by_d.clone());
    let verifier = SigningVerifier::new();

    let mut builder = PathBuilder::new(
        graph.a_by_b.clone(),
        &trust_store,
        &verifier,
        validation_time(),
    );
    builder.add_issuer_source(&sync_certs);
    builder.add_issuer_source(&async_certs);
    let result = run_async(builder);

    assert_eq!(
        attempts(&result),
        vec![
            vec!["A(B)", "B(F)", "F(E)"],
            vec!["A(B)", "B(C)", "C(D)", "D(D)"],
        ]
    );
    assert_eq!(result.paths[0].outcome, Err(PathError::Exhausted));
    assert!(result.paths[1].is_success());
    assert_eq!(result.best_result_index, 1);
    assert_eq!(result.completion, CompletionStatus::Asynchronous);
    assert_eq!(verifier.calls(), 1);
}

#[test]
fn test_prefers_shortest_sufficient_path() {
    setup();
    let graph = MultiRoot::new();
    let b_by_e = make_cert("B(E)", "B", "kB", "E", "kE");
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.e_by_e.clone());
    // The intermediate of the longer path is offered first.
    let mut sync_certs = CountingSyncSource::new();
    sync_certs.add_cert(graph.b_by_f.clone());
    sync_certs.add_cert(b_by_e);
    sync_certs.add_cert(graph.f_by_e.clone());
    let verifier = SigningVerifier::new();

    let mut builder = PathBuilder::new(
        graph.a_by_b.clone(),
        &trust_store,
        &verifier,
        validation_time(),
    );
    builder.add_issuer_source(&sync_certs);
    let result = run_async(builder);

    assert!(result.is_success());
    assert_eq!(
        labels(&result.best().unwrap().path),
        vec!["A(B)", "B(E)", "E(E)"]
    );
    assert_eq!(verifier.calls(), 1);
}

#[test]
fn test_async_fan_out_prefers_shorter_paths() {
    setup();
    let anchor = make_cert("R", "R", "kR", "R", "kR");
    let target = make_cert("T", "T", "kT", "I", "kI");
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(anchor);
    let mut sync_certs = CountingSyncSource::new();
    sync_certs.add_cert(make_cert("I(J)", "I", "kI", "J", "kJ"));
    let mut async_certs = AsyncStaticSource::new();
    async_certs.add_cert(make_cert("I(R)", "I", "kI", "R", "kR"));
    async_certs.add_cert(make_cert("J(R)", "J", "kJ", "R", "kR"));
    let verifier = SigningVerifier::new();

    let mut builder = PathBuilder::new(target, &trust_store, &verifier, validation_time());
    builder.add_issuer_source(&sync_certs);
    builder.add_issuer_source(&async_certs);
    let result = run_async(builder);

    // T is queried before I(J), so the 3-certificate path wins.
    assert_eq!(attempts(&result), vec![vec!["T", "I(R)", "R"]]);
    assert!(result.is_success());
    assert_eq!(async_certs.queries(), 1);
}

#[test]
fn test_issuer_order_does_not_matter() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.d_by_d.clone());

    for reverse in [false, true] {
        let mut certs = vec![
            graph.b_by_c.clone(),
            graph.b_by_f.clone(),
            graph.f_by_e.clone(),
            graph.c_by_d.clone(),
            graph.c_by_e.clone(),
        ];
        if reverse {
            certs.reverse();
        }
        let mut sync_certs = CountingSyncSource::new();
        for cert in certs {
            sync_certs.add_cert(cert);
        }
        let verifier = SigningVerifier::new();

        let mut builder = PathBuilder::new(
            graph.a_by_b.clone(),
            &trust_store,
            &verifier,
            validation_time(),
        );
        builder.add_issuer_source(&sync_certs);
        let result = run_async(builder);

        assert!(result.is_success(), "reverse = {}", reverse);
        assert_eq!(result.completion, CompletionStatus::Synchronous);
        assert_eq!(
            labels(&result.best().unwrap().path),
            vec!["A(B)", "B(C)", "C(D)", "D(D)"],
            "reverse = {}",
            reverse
        );
    }
}

#[test]
fn test_duplicate_sync_candidates_verified_once() {
    setup();
    let graph = MultiRoot::new();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(graph.e_by_e.clone());
    // B(F) leads to E, but the verifier rejects anything through F(E).
    let mut sync_certs1 = CountingSyncSource::new();
    sync_certs1.add_cert(graph.b_by_f.clone());
    sync_certs1.add_cert(graph.f_by_e.clone());
    let mut sync_certs2 = CountingSyncSource::new();
    sync_certs2.add_cert(duplicate(&graph.b_by_f));
    sync_certs2.add_cert(duplicate(&graph.f_by_e));
    let verifier = SigningVerifier::new();
    let reject_f = |path: &certpath::CertificateChain, time: &certpath::Time| {
        if path.iter().any(|c| label(c) == "F(E)") {
            Err(VerifyError::Other("F is distrusted".into()))
        } else {
            certpath::Verifier::verify(&verifier, path, time)
        }
    };

    let mut builder =
        PathBuilder::new(graph.a_by_b.clone(), &trust_store, &reject_f, validation_time());
    builder.add_issuer_source(&sync_certs1);
    builder.add_issuer_source(&sync_certs2);
    let result = run_async(builder);

    assert_eq!(attempts(&result), vec![vec!["A(B)", "B(F)", "F(E)", "E(E)"]]);
    assert_eq!(
        result.outcome(),
        Err(PathError::VerifierRejected(VerifyError::Other(
            "F is distrusted".into()
        )))
    );
}

#[test]
fn test_long_chain_and_depth_limit() {
    setup();
    let depth = 10;
    let mut chain: Vec<Arc<Certificate>> = Vec::new();
    for i in 0..depth {
        let subject = format!("C{}", i);
        let issuer = if i + 1 == depth {
            subject.clone()
        } else {
            format!("C{}", i + 1)
        };
        chain.push(make_cert(
            &subject,
            &subject,
            &format!("k{}", subject),
            &issuer,
            &format!("k{}", issuer),
        ));
    }
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(chain[depth - 1].clone());
    let mut sync_certs = CountingSyncSource::new();
    // Reverse order so discovery does not follow insertion order.
    for cert in chain[1..depth - 1].iter().rev() {
        sync_certs.add_cert(cert.clone());
    }
    let verifier = SigningVerifier::new();

    let mut builder =
        PathBuilder::new(chain[0].clone(), &trust_store, &verifier, validation_time());
    builder.add_issuer_source(&sync_certs);
    let result = builder.run_sync();
    assert!(result.is_success());
    assert_eq!(result.best().unwrap().path.len(), depth);

    let mut builder =
        PathBuilder::new(chain[0].clone(), &trust_store, &verifier, validation_time())
            .with_options(PathBuilderOptions::new().with_max_path_depth(depth - 1))
            .unwrap();
    builder.add_issuer_source(&sync_certs);
    let result = builder.run_sync();
    assert_eq!(result.outcome(), Err(PathError::AuthorityInvalid));
    assert_eq!(result.paths.len(), 1);
    assert_eq!(result.paths[0].path.len(), depth - 1);
    assert_eq!(result.paths[0].outcome, Err(PathError::Exhausted));
}

#[test]
fn test_real_certificates() {
    setup();
    let root = Arc::new(
        Certificate::from_der(include_bytes!("../../../certpath/tests/data/root.der")).unwrap(),
    );
    let leaf = Arc::new(
        Certificate::from_der(include_bytes!("../../../certpath/tests/data/leaf.der")).unwrap(),
    );
    let intermediates = certpath::StaticIssuerSource::from_pem_bundle(include_str!(
        "../../../certpath/tests/data/bundle.pem"
    ))
    .unwrap();
    let mut trust_store = InMemoryTrustStore::new();
    trust_store.add_trusted_certificate(root.clone());
    let chained_by_name = |path: &certpath::CertificateChain, _: &certpath::Time| {
        for (depth, pair) in path.as_slice().windows(2).enumerate() {
            if pair[0].issuer() != pair[1].subject() {
                return Err(VerifyError::NameMismatch { depth });
            }
        }
        Ok(())
    };

    let mut builder =
        PathBuilder::new(leaf.clone(), &trust_store, &chained_by_name, validation_time());
    builder.add_issuer_source(&intermediates);
    let result = run_async(builder);

    let best = result.best().unwrap();
    assert!(best.is_success());
    assert_eq!(best.path.len(), 3);
    assert_eq!(best.path.leaf(), Some(&leaf));
    assert_eq!(best.path.root(), Some(&root));
}

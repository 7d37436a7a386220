// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;

use certpath::prelude::*;
use certpath::Name;

/// Serves its certificates through asynchronous queries only.
struct AsyncOnly(StaticIssuerSource);

impl IssuerSource for AsyncOnly {
    fn sync_issuers_of(&self, _cert: &Certificate, _issuers: &mut Vec<Arc<Certificate>>) {}

    fn async_issuers_of(&self, cert: &Arc<Certificate>) -> Option<PendingRequest> {
        let mut issuers = Vec::new();
        self.0.sync_issuers_of(cert, &mut issuers);
        Some(PendingRequest::ready(issuers))
    }
}

fn name(index: u8) -> Option<Name> {
    Name::from_common_name(&format!("N{}", index % 8)).ok()
}

/// Each 4-byte record is one certificate: subject, issuer, key, placement.
fn make_cert(serial: usize, record: &[u8]) -> Option<Arc<Certificate>> {
    let der = format!("{}|{:?}", serial, record).into_bytes();
    Some(Arc::new(Certificate::from_parts(
        der,
        name(record[0])?,
        name(record[1])?,
        vec![record[2] % 4],
    )))
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    let max_path_depth = (data[0] % 12) as usize + 1;
    let reject = data[1];
    let Some(target) = make_cert(0, &data[2..6]) else {
        return;
    };

    let mut trust_store = InMemoryTrustStore::new();
    let mut sync_certs = StaticIssuerSource::new();
    let mut async_certs = StaticIssuerSource::new();
    for (serial, record) in data[6..].chunks_exact(4).enumerate() {
        let Some(cert) = make_cert(serial + 1, record) else {
            return;
        };
        match record[3] % 3 {
            0 => trust_store.add_trusted_certificate(cert),
            1 => sync_certs.add_cert(cert),
            _ => async_certs.add_cert(cert),
        }
    }
    let async_certs = AsyncOnly(async_certs);

    // Rejects paths whose length matches the low bits of `reject`.
    let verifier = |path: &CertificateChain, _time: &Time| {
        if path.len() % 4 == (reject % 4) as usize {
            Err(VerifyError::Other("rejected".into()))
        } else {
            Ok(())
        }
    };
    let Ok(time) = Time::from_unix_secs(0) else {
        return;
    };
    let options = PathBuilderOptions::new().with_max_path_depth(max_path_depth);

    for allow_async in [false, true] {
        let Ok(mut builder) =
            PathBuilder::new(target.clone(), &trust_store, &verifier, time).with_options(options)
        else {
            return;
        };
        builder.add_issuer_source(&sync_certs);
        builder.add_issuer_source(&async_certs);
        let result = if allow_async {
            futures::executor::block_on(builder.run())
        } else {
            builder.run_sync()
        };

        for attempt in result.paths.iter() {
            assert_eq!(attempt.path.leaf(), Some(&target));
            assert!(attempt.path.len() <= max_path_depth);
            for (i, cert) in attempt.path.iter().enumerate() {
                assert!(!attempt.path.as_slice()[i + 1..]
                    .iter()
                    .any(|other| other == cert || other.same_name_and_key(cert)));
            }
        }
        if !result.paths.is_empty() {
            assert!(result.best_result_index < result.paths.len());
        }
        assert_eq!(result.is_success(), result.outcome().is_ok());
    }
});

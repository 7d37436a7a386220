// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use certpath::certificate::parse_pem_bundle;
use certpath::Certificate;

fuzz_target!(|data: &[u8]| {
    if let Ok(cert) = Certificate::from_der(data) {
        let _ = cert.public_key_algorithm();
        let _ = cert.is_self_issued();
        let _ = cert.subject().common_name();
        let _ = format!("{} {}", cert.subject(), cert.issuer());
    }

    if let Ok(text) = core::str::from_utf8(data) {
        let _ = Certificate::from_pem(text);
        let _ = parse_pem_bundle(text);
    }
});

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

// Must hold with and without the `tracing` feature
#![deny(unused_variables)]

#[test]
fn test_debug_macro_uses_its_arguments() {
    let emitted = 3;
    let sources = 2;

    logmerge_exec::debug!("Merged {} entries from {} sources", emitted, sources);
}

#[test]
fn test_error_and_warn_macros_accept_format_arguments() {
    let source_id = 4;

    logmerge_exec::warn!("Abandoning source {}", source_id);
    logmerge_exec::error!("Error fetching log entry from source {}: {}", source_id, "boom");
}

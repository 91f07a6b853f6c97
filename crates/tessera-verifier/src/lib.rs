// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval (Verifier)
// Licensed under the MIT License

mod challenge;

pub use challenge::{Challenge, Verifier};

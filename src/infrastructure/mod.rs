//! Infrastructure layer - external systems (JSON-RPC node, key files)

pub mod blockchain;

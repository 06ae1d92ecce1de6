// Adapters layer: concrete implementations for external systems.

pub mod pricing_http;

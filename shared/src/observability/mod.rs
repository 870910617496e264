mod configuration;
mod lambda_instrumentation;

pub use configuration::{init_otel, OtelGuard};
pub use lambda_instrumentation::TracedHandler;

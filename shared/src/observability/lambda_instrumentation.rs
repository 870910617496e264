use async_trait::async_trait;
use lambda_runtime::Context;
use serde_json::Value;
use tracing::Instrument;

use crate::core::{FunctionHandler, InstrumentationHandler};

/// Wraps a single invocation in a span carrying the FaaS attributes derived
/// from the Lambda context, then delegates to the inner function. The result
/// is returned unchanged.
pub struct TracedHandler<F> {
    function: F,
}

impl<F> TracedHandler<F> {
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

#[async_trait]
impl<F: FunctionHandler + Send + Sync> InstrumentationHandler for TracedHandler<F> {
    async fn call_wrapped(&self, event: Value, context: Context) -> Result<Value, String> {
        let span = tracing::info_span!(
            "faas.invoke",
            otel.kind = "server",
            faas.invocation_id = %context.request_id,
            cloud.resource_id = %context.invoked_function_arn,
        );

        let result = self.function.invoke(event, context).instrument(span).await;

        if let Err(message) = &result {
            tracing::error!("Handler invocation failed: {}", message);
        }

        result
    }
}

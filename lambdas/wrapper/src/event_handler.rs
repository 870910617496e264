use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use shared::core::InstrumentationHandler;

pub(crate) struct HandlerDeps<H: InstrumentationHandler> {
    pub handler: H,
}

/// The entrypoint the runtime invokes in place of the original handler: a
/// pure pass-through to the instrumentation handler.
pub(crate) async fn function_handler<H: InstrumentationHandler>(
    deps: &HandlerDeps<H>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    deps.handler
        .call_wrapped(event.payload, event.context)
        .await
        .map_err(Error::from)
}

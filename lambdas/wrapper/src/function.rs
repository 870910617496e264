use async_trait::async_trait;
use lambda_runtime::Context;
use serde_json::Value;
use shared::core::FunctionHandler;

/// Target function used when the wrapper runs standalone, with no downstream
/// handler linked in: the event payload is returned unchanged.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EchoFunction;

#[async_trait]
impl FunctionHandler for EchoFunction {
    async fn invoke(&self, event: Value, _context: Context) -> Result<Value, String> {
        Ok(event)
    }
}

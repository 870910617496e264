use async_trait::async_trait;
use lambda_runtime::Context;
use serde_json::Value;

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

/// Module-loading capability provided by the host environment: given a
/// library name, force its initialization code to run now.
#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait LibraryLoader {
    fn load_library(&mut self, name: &str) -> Result<(), String>;
}

/// The function the wrapper ultimately delegates an invocation to.
#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait FunctionHandler {
    async fn invoke(&self, event: Value, context: Context) -> Result<Value, String>;
}

/// Collaborator that wraps a single invocation with telemetry collection.
#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait InstrumentationHandler {
    async fn call_wrapped(&self, event: Value, context: Context) -> Result<Value, String>;
}

use std::sync::Arc;

use lambda_runtime::{run, service_fn, tracing, Error};
use shared::configuration::Settings;
use shared::loader::DynamicLibraryLoader;
use shared::observability::TracedHandler;
use shared::preload::{self, PreloadOutcome};
use shared::search_path::SearchPath;

mod event_handler;
mod function;

use event_handler::{function_handler, HandlerDeps};
use function::EchoFunction;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = Settings::load()?;

    // Make the layer's library directories visible in case earlier
    // environment hooks were ignored.
    let mut search_path = SearchPath::new();
    search_path.reconcile(&settings);

    // Preload the original handler's dependencies before instrumentation is
    // installed, so their initialization is still observable.
    let mut loader = DynamicLibraryLoader::new(search_path);
    let handler_id = preload::handler_id_from_env();
    let outcome = preload::preload_function_dependencies(
        &settings.task_root,
        handler_id.as_deref(),
        &mut loader,
    );

    let otel_guard =
        Arc::new(shared::observability::init_otel().expect("Failed to initialize telemetry"));

    match &outcome {
        PreloadOutcome::Loaded {
            handler_file,
            failures,
        } => {
            for (library, message) in failures {
                tracing::warn!("Could not load library {}: {}", library, message);
            }
            tracing::info!("Libraries in {} have been preloaded.", handler_file);
        }
        PreloadOutcome::HandlerNotFound => {
            tracing::warn!("Could not find the original handler file to preload libraries.");
        }
    }

    let deps = HandlerDeps {
        handler: TracedHandler::new(EchoFunction),
    };

    run(service_fn(|event| async {
        let res = function_handler(&deps, event).await;

        otel_guard.flush();

        res
    }))
    .await
}

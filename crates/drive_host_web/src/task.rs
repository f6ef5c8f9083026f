//! Background task spawning on the browser event loop.

use drive_host::{LocalTask, TaskSpawner};

#[derive(Debug, Clone, Copy, Default)]
/// Spawner backed by `wasm_bindgen_futures::spawn_local`.
///
/// Native builds have no event loop to hand the task to and drive it to completion in place.
pub struct WebTaskSpawner;

impl TaskSpawner for WebTaskSpawner {
    fn spawn_local(&self, task: LocalTask) {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            futures::executor::block_on(task);
        }
    }
}

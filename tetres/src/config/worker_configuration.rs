use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct WorkerConfiguration {
    pub n_workers: usize,
}

impl Default for WorkerConfiguration {
    fn default() -> Self {
        Self {
            n_workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

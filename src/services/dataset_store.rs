use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::{Dataset, DatasetSource, LoadedDataset};
use crate::services::sample::sample_dataset;

/// Holds the current dataset. Replacement swaps the whole `Arc`, so a reader keeps a
/// consistent snapshot for as long as it holds one.
pub struct DatasetStore {
    current: RwLock<Arc<LoadedDataset>>,
}

impl DatasetStore {
    pub fn new(initial: LoadedDataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    pub fn with_sample() -> Self {
        Self::new(LoadedDataset::new(sample_dataset(), DatasetSource::Sample))
    }

    pub fn current(&self) -> Arc<LoadedDataset> {
        self.current.read().clone()
    }

    pub fn replace(&self, dataset: Dataset, source: DatasetSource) -> Arc<LoadedDataset> {
        let loaded = Arc::new(LoadedDataset::new(dataset, source));
        tracing::info!(
            "Replacing current dataset with {:?} ({} rows)",
            loaded.source,
            loaded.dataset.len()
        );
        *self.current.write() = loaded.clone();
        loaded
    }

    pub fn reset_to_sample(&self) -> Arc<LoadedDataset> {
        self.replace(sample_dataset(), DatasetSource::Sample)
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::with_sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_survive_replacement() {
        let store = DatasetStore::with_sample();
        let before = store.current();
        store.replace(
            Dataset::default(),
            DatasetSource::Upload {
                file_name: "empty.csv".into(),
            },
        );

        assert_eq!(before.dataset.len(), 12);
        assert!(store.current().dataset.is_empty());

        let reset = store.reset_to_sample();
        assert_eq!(reset.source, DatasetSource::Sample);
        assert_eq!(store.current().dataset.len(), 12);
    }
}

use crate::store::{PostStore, StoreResult};
use crate::strategy::CandidateId;

/// Drops candidates whose id the post store already holds
///
/// Lookups go out in batches of `batch_size` ids; surviving candidates keep
/// their order.
#[derive(Debug, Clone, Copy)]
pub struct ExistingFilter {
    batch_size: usize,
}

impl ExistingFilter {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the candidates not yet present in `store`
    pub fn apply<S: PostStore + ?Sized>(
        &self,
        store: &S,
        candidates: Vec<CandidateId>,
    ) -> StoreResult<Vec<CandidateId>> {
        let mut fresh = Vec::with_capacity(candidates.len());

        for batch in candidates.chunks(self.batch_size) {
            let ids: Vec<&str> = batch.iter().map(|c| c.id.as_str()).collect();
            let existing = store.exists_batch(&ids)?;

            fresh.extend(
                batch
                    .iter()
                    .filter(|c| !existing.contains(&c.id))
                    .cloned(),
            );
        }

        let removed = candidates.len() - fresh.len();
        if removed > 0 {
            tracing::info!("Filtered {} already-stored posts, {} remain", removed, fresh.len());
        }

        Ok(fresh)
    }
}

impl Default for ExistingFilter {
    fn default() -> Self {
        Self::new(100)
    }
}

//! Fallback civilization picks for seats the bias search could not place

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::FallbackSampling;
use crate::core::types::FactionId;
use crate::engine::session::AssignmentSession;

/// Random civilization selection over the pass's civilization pool
#[derive(Debug, Clone)]
pub struct FactionFallback {
    pool: Vec<FactionId>,
    sampling: FallbackSampling,
}

impl FactionFallback {
    pub fn new(pool: Vec<FactionId>, sampling: FallbackSampling) -> Self {
        Self { pool, sampling }
    }

    /// Uniform pick among civilizations nobody holds.
    ///
    /// `restrict` narrows the candidates, e.g. to a seat's unlocked options.
    pub fn pick_unused(
        &self,
        session: &AssignmentSession,
        rng: &mut impl Rng,
        restrict: Option<&[FactionId]>,
    ) -> Option<FactionId> {
        let candidates: Vec<&FactionId> = restrict
            .unwrap_or(self.pool.as_slice())
            .iter()
            .filter(|f| !session.used_factions().contains(f))
            .collect();
        candidates.choose(rng).map(|f| (*f).clone())
    }

    /// First fallback step, sampled as configured.
    ///
    /// With `BoundedIndex` the result may already be claimed.
    pub fn true_random(
        &self,
        session: &AssignmentSession,
        rng: &mut impl Rng,
        restrict: Option<&[FactionId]>,
    ) -> Option<FactionId> {
        match self.sampling {
            FallbackSampling::Filtered => self.pick_unused(session, rng, restrict),
            FallbackSampling::BoundedIndex => {
                let list = restrict.unwrap_or(self.pool.as_slice());
                let bound = list.len().saturating_sub(session.used_factions().len());
                if bound == 0 {
                    return None;
                }
                list.get(rng.gen_range(0..bound)).cloned()
            }
        }
    }

    /// Second fallback step: any civilization in the pool, claimed or not
    pub fn non_exclusive(&self, rng: &mut impl Rng) -> Option<FactionId> {
        self.pool.choose(rng).cloned()
    }
}

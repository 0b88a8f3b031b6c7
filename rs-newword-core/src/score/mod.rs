//! Derived scores over the statistics table.
//!
//! - Cohesion: weakest-split pointwise mutual information (`cohesion`)
//! - Freedom: branching entropy and neighbor diversity (`freedom`)

pub mod cohesion;
pub mod freedom;

pub use cohesion::{attach_pmi, split_pmi};
pub use freedom::{attach_entropy, attach_nav, branching_entropy, neighbor_diversity};

//! Game rule functions.
//!
//! Pure translations from abstract cost sources (environmental damage,
//! contact hits, enemy kills) into concrete resource deltas. Nothing here
//! touches state; the evaluation layer applies the computed deltas.
mod damage;
mod kill;

pub use damage::{DamageOutcome, best_mitigation, dot_damage, hit_damage};
pub use kill::{KillOutcome, kill_cost};

//! Client-side game bookkeeping: ship score, floating popups, star backdrop.

mod popups;
mod ship;
mod stars;

pub use popups::FloatingScores;
pub use ship::ShipState;
pub use stars::Star;

mod achievement;
mod bet;
mod constants;
mod outcome;
mod snapshot;
mod state;
mod symbol;

pub use achievement::*;
pub use bet::*;
pub use constants::*;
pub use outcome::*;
pub use snapshot::*;
pub use state::*;
pub use symbol::*;

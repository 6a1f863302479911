mod distribution;
mod keygen;

pub use distribution::*;
pub use keygen::*;

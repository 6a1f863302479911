mod license;
mod platform;
mod sale;

pub use license::*;
pub use platform::*;
pub use sale::*;

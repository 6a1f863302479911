mod gumroad;

pub use gumroad::*;

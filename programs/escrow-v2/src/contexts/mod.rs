pub mod open;
pub use open::*;

pub mod cancel;
pub use cancel::*;

pub mod exchange;
pub use exchange::*;

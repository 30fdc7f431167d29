pub mod settings;
pub mod summary;
pub mod trade;

pub use settings::*;
pub use summary::*;
pub use trade::*;

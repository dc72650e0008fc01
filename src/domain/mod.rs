mod money;
mod spending;
mod summary;

pub use money::*;
pub use spending::*;
pub use summary::*;

pub mod models;
pub mod errors;
pub mod timing;
pub mod carousel;
pub mod notifications;
pub mod sequence;
pub mod story;

pub use models::*;
pub use errors::*;
pub use timing::*;
pub use carousel::*;
pub use notifications::*;
pub use sequence::*;
pub use story::*;

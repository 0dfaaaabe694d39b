pub mod bootstrap;
pub mod controller;
pub mod synchronizer;
pub mod ticker;

pub use crate::bootstrap::Origin;
pub use crate::controller::IntranetController;
pub use crate::synchronizer::CrossTabSynchronizer;
pub use crate::ticker::spawn_ticker;

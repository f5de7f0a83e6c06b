//! Services over the upstream client
//!
//! Every operation opens its own client, uses it and closes it before
//! returning. Nothing is cached between calls.

mod alert;
mod markets;
mod spread;

pub use alert::AlertService;
pub use markets::MarketService;
pub use spread::SpreadService;

pub mod models;
pub mod normalize;
pub mod session;

pub use models::{RawTransaction, ReceiptView};
pub use normalize::normalize;
pub use session::{LoadOutcome, LoadState, ReceiptSession};

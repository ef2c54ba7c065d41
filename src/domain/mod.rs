/// Domain Layer - Core Business Logic
///
/// The order book, the ticker registry and the matching algorithm. Pure
/// logic: no I/O, no randomness, no metrics.
///
/// ## Modules
/// - `order`: the order entity and its atomic lifecycle flag
/// - `orderbook`: fixed-capacity per-ticker book, split by side
/// - `registry`: fixed array of books indexed by ticker id
/// - `matching`: best-sell / first-eligible-buy settlement
/// - `validation`: quantity and price rules

pub mod matching;
pub mod order;
pub mod orderbook;
pub mod registry;
pub mod validation;

pub use order::{Order, OrderSnapshot, OrderState};
pub use orderbook::OrderBook;
pub use registry::TickerRegistry;

/// Domain Layer - OrderBook Module
///
/// Fixed-capacity, append-only order book for a single ticker.
///
/// - `slots`: one side of the book, a pre-allocated arena of order slots
///   with a monotonic high-water mark
/// - `book`: the buy and sell sides of one ticker

pub mod book;
pub mod slots;

pub use book::OrderBook;
pub use slots::OrderSlots;

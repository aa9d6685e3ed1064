//! API Request Types
//!
//! Request bodies as the web client sends them, and their conversion into
//! core operations. Conversion is where blank form fields, string numbers
//! and dates are normalized; nothing here builds SQL.

pub mod form;

// Item types
mod item;
pub use item::*;

// Listed item types
mod listed_item;
pub use listed_item::*;

// Auction session types
mod auction_session;
pub use auction_session::*;

// Auctioneer types
mod auctioneer;
pub use auctioneer::*;

// Delivery vehicle types
mod delivery_vehicle;
pub use delivery_vehicle::*;

// Report types
mod report;
pub use report::*;

pub use form::FormValue;

//! Data transfer objects exchanged with the platform.
//!
//! Plain data holders with public fields, each implementing
//! [`Taggable`](crate::serialize::Taggable) so both serializers can walk
//! them. Construction is explicit: required identity fields go through
//! `new`, everything else is set directly on the struct.

pub mod cart;
pub mod customer;
pub mod line_item;
pub mod order;
pub mod product;

pub use cart::Cart;
pub use customer::Buyer;
pub use line_item::LineItem;
pub use order::{Order, OrderStatus};
pub use product::{Availability, Product};

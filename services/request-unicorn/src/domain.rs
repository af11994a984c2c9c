// Domain layer modules
pub mod ride;
pub mod ride_id;
pub mod unicorn;

// Re-exports
pub use ride::{PickupLocation, RideRecord, RideRequest};
pub use ride_id::{RIDE_ID_BYTES, encode_ride_id};
pub use unicorn::{FLEET, Unicorn, select_unicorn};

// --- File: crates/clinic_booking/src/lib.rs ---
pub mod availability;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod schedule;
pub mod slots;
pub mod state;

pub use routes::routes;
pub use schedule::Schedule;
pub use slots::{generate_slots, Slot};
pub use state::BookingState;

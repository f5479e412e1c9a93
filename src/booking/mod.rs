mod registry;
pub mod stubs;

pub use registry::{
    format_tools_for_llm, BookingTool, ToolHandler, ToolRegistry, CHECK_ROOM_AVAILABILITY,
    MAKE_RESERVATION,
};
pub use stubs::{check_room_availability, make_reservation, ReservationRequest};

pub mod booking_widget;
pub mod calendar_service;
pub mod catalog_service;
pub mod comparison_service;
pub mod guest_counter;
pub mod pricing_service;
pub mod step_sequencer;
pub mod submission;

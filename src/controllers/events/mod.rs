pub mod pass_event;

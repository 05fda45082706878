pub mod progress_tracker;

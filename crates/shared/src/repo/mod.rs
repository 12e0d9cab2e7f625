pub mod event_directory;

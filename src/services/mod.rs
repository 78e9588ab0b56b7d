pub mod post_thread_service;

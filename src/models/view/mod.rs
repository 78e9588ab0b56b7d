pub mod comment;
pub mod post;
pub mod post_page;
pub mod toast;

//! Simulated chat assistant
//!
//! No language understanding happens here: a message is matched against
//! keyword lists and answered with a canned reply for its category.

mod category;
mod replies;

pub use category::{classify, Category};
pub use replies::{reply_pool, respond};

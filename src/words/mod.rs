//! Word-of-the-day providers.
//!
//! The session engine only sees the `WordProvider` trait. `WordList` backs
//! the server with a JSON word list; `StaticWords` pins the secret word for
//! tests.

pub mod fixed;
pub mod list;
pub mod traits;

pub use fixed::StaticWords;
pub use list::{WordList, EMBEDDED_WORDS};
pub use traits::WordProvider;

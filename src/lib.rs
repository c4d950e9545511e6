//! Client library for the library-management backend.
//!
//! The crate is organized in layers:
//! - [`api`]: canonical domain types (books, readers, borrow records)
//! - [`transport`]: the [`transport::Transport`] trait plus the HTTP
//!   implementation; pagination and auth-header handling live here
//! - [`normalize`]: lenient decoding of the backend's heterogeneous
//!   response shapes onto the canonical types
//! - [`services`]: domain operations (auth, books, readers, borrow,
//!   statistics) as async functions over `&dyn Transport`
//! - [`session`]: durable bearer-token session state
//! - [`cart`]: client-side borrow-workflow draft state
//! - [`mock`]: in-memory backend simulator for offline demos and tests
//! - [`config`]: TOML/env configuration and transport selection
//!
//! A typical setup:
//!
//! ```no_run
//! use std::sync::Arc;
//! use biblio_client::config::{ClientConfig, TransportFactory};
//!
//! # async fn run() -> biblio_client::ClientResult<()> {
//! let config = ClientConfig::from_default_location()?.with_env_overrides()?;
//! let session = Arc::new(config.session_store());
//! let transport = TransportFactory::create(&config, session.clone())?;
//! let books = biblio_client::services::books::list_books(
//!     transport.as_ref(),
//!     Default::default(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "http-client", feature = "mock-server")))]
compile_error!("at least one of the 'http-client' or 'mock-server' features must be enabled");

pub mod api;
pub mod cart;
pub mod config;
#[cfg(feature = "mock-server")]
pub mod mock;
pub mod normalize;
pub mod services;
pub mod session;
pub mod transport;

pub use api::{
    Book, BookId, BorrowConfirmation, BorrowId, BorrowRecord, BorrowStatus, OverdueBook, Page,
    PopularBook, Reader, ReaderId, ReturnOutcome, StatisticsOverview,
};
pub use cart::SelectionCart;
pub use config::{BackendKind, ClientConfig, TransportFactory};
pub use session::{SessionStore, SessionUser};
pub use transport::{ClientError, ClientResult, Transport};

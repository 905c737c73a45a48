//! Splice Machine ODBC driver.
//!
//! - [`OdbcDriver`]: catalog behavior of the ODBC driver
//! - [`OdbcConnection`]: live connection through `odbc-api` (feature `odbc`)

#[cfg(feature = "odbc")]
mod connection;
mod driver;

#[cfg(feature = "odbc")]
pub use connection::OdbcConnection;
pub use driver::OdbcDriver;

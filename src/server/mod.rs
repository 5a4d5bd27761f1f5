pub mod acceptor;
pub mod shutdown;

pub use acceptor::{bind, serve};
pub use shutdown::ShutdownSignal;

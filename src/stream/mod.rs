pub mod clock;
pub mod handler;
pub mod phase;
pub mod sink;

pub use handler::ConnectionHandler;
pub use phase::TrafficPolicy;
pub use sink::WebSocketSink;

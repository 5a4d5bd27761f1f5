pub mod generator;
pub mod record;
pub mod samples;

pub use generator::generate_packet;
#[cfg(test)]
pub use record::PacketRecord;

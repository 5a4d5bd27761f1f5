use crate::packet::record::{PacketRecord, PacketType};
use crate::packet::samples::{
    DST_PORT_RANGE, PAYLOAD_LEN_RANGE, PID_RANGE, SAMPLE_DST_IPS, SAMPLE_PROCESS_NAMES,
    SAMPLE_SRC_IPS, SRC_PORT_RANGE,
};
use chrono::Utc;
use rand::Rng;

// ランダムな模擬パケットを生成する (タイムスタンプは現在時刻)
pub fn generate_packet<R: Rng + ?Sized>(rng: &mut R) -> PacketRecord {
    let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
    generate_packet_at(rng, timestamp)
}

pub fn generate_packet_at<R: Rng + ?Sized>(rng: &mut R, timestamp: i64) -> PacketRecord {
    let mut payload = vec![0u8; rng.gen_range(PAYLOAD_LEN_RANGE)];
    rng.fill_bytes(&mut payload);

    let packet_type = if rng.gen_bool(0.5) {
        PacketType::Request
    } else {
        PacketType::Response
    };

    PacketRecord {
        timestamp,
        src_ip: pick(rng, &SAMPLE_SRC_IPS).to_string(),
        src_port: rng.gen_range(SRC_PORT_RANGE),
        dst_ip: pick(rng, &SAMPLE_DST_IPS).to_string(),
        dst_port: rng.gen_range(DST_PORT_RANGE),
        pid: rng.gen_range(PID_RANGE),
        pname: pick(rng, &SAMPLE_PROCESS_NAMES).to_string(),
        packet_type,
        length: payload.len() as u32,
        payload,
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

// 生成データをそれらしく見せるためのサンプル値
pub const SAMPLE_SRC_IPS: [&str; 4] = ["192.168.1.10", "10.0.0.5", "172.16.3.41", "223.5.5.5"];
pub const SAMPLE_DST_IPS: [&str; 4] = ["8.8.8.8", "114.114.114.114", "202.96.128.86", "52.84.124.23"];
pub const SAMPLE_PROCESS_NAMES: [&str; 5] = ["Chrome", "WeChat", "QQMusic", "sshd", "nginx"];

pub const SRC_PORT_RANGE: std::ops::Range<u32> = 1024..51024;
pub const DST_PORT_RANGE: std::ops::Range<u32> = 1..1001;
pub const PID_RANGE: std::ops::Range<i32> = 1000..31000;
pub const PAYLOAD_LEN_RANGE: std::ops::Range<usize> = 32..288;

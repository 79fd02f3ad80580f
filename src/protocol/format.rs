//! Packet display formatters
//!
//! Render a raw frame for the console, the CSV log, or a SystemVerilog
//! testbench stimulus file.

/// Format a packet as space-separated lowercase hex bytes
///
/// This is also the `Hex Packet` column format of the CSV log.
pub fn format_packet_hex(packet: &[u8]) -> String {
    packet
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a packet as space-separated 8-digit binary bytes
pub fn format_packet_binary(packet: &[u8]) -> String {
    packet
        .iter()
        .map(|byte| format!("{byte:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a packet as a SystemVerilog testbench `send_packet` stimulus
///
/// The bit width is 8x the packet length (144 for an outbound frame) and the
/// hex literal is contiguous lowercase.
pub fn format_packet_testbench(packet: &[u8]) -> String {
    format!(
        "send_packet({}'h{});\n#5_000_000;",
        packet.len() * 8,
        hex::encode(packet)
    )
}

pub const SERIAL_PORT: &str = "/dev/ttys005"; // Change this to match your serial port
pub const BAUDRATE: u32 = 115_200;
pub const SEND_INTERVAL_MS: u64 = 100;
pub const SERIAL_TIMEOUT_MS: u64 = 1000;

/// Example packet from the interface documentation, used as the emulator payload.
pub const TEST_PACKET: &str =
    "FB3E00070100BEDD01000000000000006C00AA89109CFF00650000000000000000000E53000000|Grssi-65/Gsnr6\n";

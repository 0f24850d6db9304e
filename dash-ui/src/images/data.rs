// Generated 1 bit masks, 24x24, row major, MSB first.
pub const BATT_60: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x3c, 0x00,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const BATT_80: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x3c, 0x00,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const BATT_90: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x3c, 0x00,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const BATT_FULL: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x3c, 0x00,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const BATT_UNKNOWN: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x3c, 0x00,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x81, 0x80,
    0x01, 0x80, 0x00,
    0x01, 0x80, 0x00,
    0x01, 0x80, 0xc0,
    0x01, 0x81, 0x20,
    0x01, 0x80, 0x20,
    0x01, 0x80, 0x60,
    0x01, 0x80, 0xc0,
    0x01, 0x80, 0x00,
    0x01, 0xf0, 0x80,
    0x01, 0xf0, 0xc0,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const TEMP: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x42, 0x00,
    0x00, 0x42, 0x00,
    0x00, 0x42, 0xe0,
    0x00, 0x42, 0x00,
    0x00, 0x42, 0x00,
    0x00, 0x5a, 0x00,
    0x00, 0x5a, 0xe0,
    0x00, 0x5a, 0x00,
    0x00, 0x5a, 0x00,
    0x00, 0x5a, 0x00,
    0x00, 0x5a, 0xe0,
    0x00, 0x5a, 0x00,
    0x00, 0x7e, 0x00,
    0x00, 0xdb, 0x00,
    0x00, 0xbd, 0x00,
    0x01, 0xbd, 0x80,
    0x01, 0xbd, 0x80,
    0x00, 0xbd, 0x00,
    0x00, 0xc3, 0x00,
    0x00, 0x7e, 0x00,
    0x00, 0x18, 0x00,
];

pub const POWER: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x03, 0x00,
    0x00, 0x06, 0x00,
    0x00, 0x0e, 0x00,
    0x00, 0x1e, 0x00,
    0x00, 0x1c, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x7c, 0x00,
    0x00, 0xf8, 0x00,
    0x00, 0xf8, 0x00,
    0x01, 0xff, 0xe0,
    0x03, 0xff, 0xc0,
    0x07, 0xff, 0x80,
    0x00, 0x1f, 0x00,
    0x00, 0x1f, 0x00,
    0x00, 0x3e, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x38, 0x00,
    0x00, 0x30, 0x00,
    0x00, 0x30, 0x00,
    0x00, 0x60, 0x00,
    0x00, 0x40, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const SOLAR: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x3f, 0xff, 0xfc,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x3f, 0xff, 0xfc,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x20, 0x81, 0x04,
    0x3f, 0xff, 0xfc,
    0x00, 0x18, 0x00,
    0x00, 0x18, 0x00,
    0x00, 0x18, 0x00,
    0x01, 0xff, 0x80,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const SUN: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x10, 0x00,
    0x00, 0x10, 0x00,
    0x00, 0x10, 0x00,
    0x04, 0x00, 0x20,
    0x02, 0x00, 0x40,
    0x00, 0x3c, 0x00,
    0x00, 0x7e, 0x00,
    0x00, 0xff, 0x00,
    0x01, 0xff, 0x80,
    0x01, 0xff, 0x80,
    0x39, 0xff, 0x9c,
    0x01, 0xff, 0x80,
    0x00, 0xff, 0x00,
    0x00, 0x7e, 0x00,
    0x00, 0x3c, 0x00,
    0x02, 0x00, 0x40,
    0x04, 0x00, 0x20,
    0x00, 0x08, 0x00,
    0x00, 0x08, 0x00,
    0x00, 0x08, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

pub const SETTINGS: [u8; 72] = [
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x18, 0x00,
    0x06, 0x18, 0x60,
    0x0e, 0xff, 0x70,
    0x0f, 0xff, 0xf0,
    0x03, 0xff, 0xc0,
    0x07, 0xff, 0xe0,
    0x07, 0xc3, 0xe0,
    0x27, 0x81, 0xe4,
    0x3f, 0x81, 0xfc,
    0x3f, 0x81, 0xfc,
    0x27, 0x81, 0xe4,
    0x07, 0xc3, 0xe0,
    0x07, 0xff, 0xe0,
    0x03, 0xff, 0xc0,
    0x0f, 0xff, 0xf0,
    0x0e, 0xff, 0x70,
    0x06, 0x18, 0x60,
    0x00, 0x18, 0x00,
    0x00, 0x3c, 0x00,
    0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

//! RATS report header
//!
//! The header is a fixed 7-byte, MSB-first bit stream. Its layout is an
//! external contract with ground processing:
//!
//! | Bits    | Field                         |
//! |---------|-------------------------------|
//! | 0..8    | header size in bytes (= 7)    |
//! | 8..24   | number of ECU records         |
//! | 24..40  | ECU record size in bytes      |
//! | 40      | ECU powered                   |
//! | 41..54  | 56 V rail, 0.01 V units       |
//! | 54..56  | zero padding                  |

use bitvec::prelude::*;

/// Header length in bits
pub const RATS_HEADER_SIZE_BITS: usize = 8 + 16 + 16 + 1 + 13;

/// Header length in bytes
pub const RATS_HEADER_SIZE_BYTES: usize = 7;

/// Largest value of the 13-bit rail voltage field
pub const V56_MAX_CENTIVOLTS: u16 = (1 << 13) - 1;

const _: () = assert!(RATS_HEADER_SIZE_BITS <= RATS_HEADER_SIZE_BYTES * 8);

/// Serialized header
pub type RatsReportHeaderBytes = [u8; RATS_HEADER_SIZE_BYTES];

/// Decoded header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatsReportHeader {
    pub header_size_bytes: u8,
    /// May be zero when the ECU was not powered
    pub num_ecu_records: u16,
    pub ecu_record_size_bytes: u16,
    pub ecu_powered: bool,
    /// 56 V rail in 0.01 V units (0..=8191)
    pub v56_centivolts: u16,
}

impl RatsReportHeader {
    /// Build a header, clamping the rail voltage to its field width
    pub fn new(
        num_ecu_records: u16,
        ecu_record_size_bytes: u16,
        ecu_powered: bool,
        v56_centivolts: u16,
    ) -> Self {
        Self {
            header_size_bytes: RATS_HEADER_SIZE_BYTES as u8,
            num_ecu_records,
            ecu_record_size_bytes,
            ecu_powered,
            v56_centivolts: v56_centivolts.min(V56_MAX_CENTIVOLTS),
        }
    }

    /// Pack into the on-wire layout
    pub fn to_bytes(&self) -> RatsReportHeaderBytes {
        let mut bytes = [0u8; RATS_HEADER_SIZE_BYTES];
        let bits = bytes.view_bits_mut::<Msb0>();

        bits[0..8].store_be(self.header_size_bytes);
        bits[8..24].store_be(self.num_ecu_records);
        bits[24..40].store_be(self.ecu_record_size_bytes);
        bits.set(40, self.ecu_powered);
        bits[41..54].store_be(self.v56_centivolts.min(V56_MAX_CENTIVOLTS));

        bytes
    }

    /// Unpack from the on-wire layout
    pub fn from_bytes(bytes: &RatsReportHeaderBytes) -> Self {
        let bits = bytes.view_bits::<Msb0>();

        Self {
            header_size_bytes: bits[0..8].load_be::<u8>(),
            num_ecu_records: bits[8..24].load_be::<u16>(),
            ecu_record_size_bytes: bits[24..40].load_be::<u16>(),
            ecu_powered: bits[40],
            v56_centivolts: bits[41..54].load_be::<u16>(),
        }
    }
}

/// Convert a rail reading in volts to the 13-bit centivolt field
pub fn volts_to_centivolts(volts: f32) -> u16 {
    if !(volts > 0.0) {
        return 0;
    }
    let centivolts = libm::roundf(volts * 100.0);
    if centivolts >= V56_MAX_CENTIVOLTS as f32 {
        V56_MAX_CENTIVOLTS
    } else {
        centivolts as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let header = RatsReportHeader::new(150, 40, true, 4096);
        let bytes = header.to_bytes();
        let decoded = RatsReportHeader::from_bytes(&bytes);

        assert_eq!(decoded, header);
        assert_eq!(decoded.header_size_bytes, 7);
        assert_eq!(decoded.num_ecu_records, 150);
        assert_eq!(decoded.ecu_record_size_bytes, 40);
        assert!(decoded.ecu_powered);
        assert_eq!(decoded.v56_centivolts, 4096);
    }

    #[test]
    fn test_header_exact_bytes() {
        let bytes = RatsReportHeader::new(150, 40, true, 4096).to_bytes();
        assert_eq!(bytes, [0x07, 0x00, 0x96, 0x00, 0x28, 0xC0, 0x00]);
    }

    #[test]
    fn test_voltage_field_occupies_high_bits() {
        let bytes = RatsReportHeader::new(0x0102, 0x0304, false, V56_MAX_CENTIVOLTS).to_bytes();
        assert_eq!(bytes, [0x07, 0x01, 0x02, 0x03, 0x04, 0x7F, 0xFC]);
    }

    #[test]
    fn test_voltage_clamped_to_field_width() {
        let header = RatsReportHeader::new(1, 40, true, 9000);
        assert_eq!(header.v56_centivolts, V56_MAX_CENTIVOLTS);

        let decoded = RatsReportHeader::from_bytes(&header.to_bytes());
        assert_eq!(decoded.v56_centivolts, V56_MAX_CENTIVOLTS);
        assert!(decoded.ecu_powered);
    }

    #[test]
    fn test_volts_to_centivolts() {
        assert_eq!(volts_to_centivolts(40.96), 4096);
        assert_eq!(volts_to_centivolts(55.004), 5500);
        assert_eq!(volts_to_centivolts(-1.0), 0);
        assert_eq!(volts_to_centivolts(f32::NAN), 0);
        assert_eq!(volts_to_centivolts(120.0), V56_MAX_CENTIVOLTS);
    }
}

use solana_program::pubkey::Pubkey;

/// Append-only writer backing the encode side of the codec.
///
/// Writing cannot fail: any correctly-typed value has exactly one wire
/// representation and the output buffer grows as needed.
#[derive(Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_pubkey(&mut self, pubkey: &Pubkey) {
        self.buf.extend_from_slice(pubkey.as_ref());
    }

    /// Writes a u32 length prefix followed by the UTF-8 bytes, no terminator.
    pub fn write_string(&mut self, value: &str) {
        self.write_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn write_tag(&mut self, value: bool) {
        self.buf.push(value as u8);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writes_match_reader_expectations() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x0201);
        writer.write_string("hi");
        writer.write_tag(true);
        assert_eq!(
            writer.into_vec(),
            vec![0x01, 0x02, 2, 0, 0, 0, b'h', b'i', 1]
        );
    }
}

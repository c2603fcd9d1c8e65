use crate::error::CodecError;

use solana_program::pubkey::Pubkey;

/// Position-tracked reader over a borrowed byte buffer.
///
/// All integer reads are little-endian. Reads never go past the end of the
/// buffer; running out of bytes is always a [`CodecError::BufferUnderrun`],
/// never a silent zero-fill.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::BufferUnderrun {
                needed: n - self.remaining(),
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Look at the next byte without consuming it. Used to dispatch on a
    /// discriminant before handing the full buffer to a variant decoder.
    pub fn peek_u8(&self) -> Result<u8, CodecError> {
        self.buf.get(self.pos).copied().ok_or(CodecError::BufferUnderrun {
            needed: 1,
            remaining: 0,
        })
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let mut le = [0_u8; 8];
        le.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(le))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        let mut le = [0_u8; 8];
        le.copy_from_slice(self.take(8)?);
        Ok(i64::from_le_bytes(le))
    }

    /// Reads exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.take(n)
    }

    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0_u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey, CodecError> {
        Ok(Pubkey::new_from_array(self.read_fixed::<32>()?))
    }

    /// Reads a u32 length prefix followed by that many UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Reads a single presence or bool byte that must be 0 or 1.
    pub fn read_tag(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CodecError::SchemaMismatch("tag byte is neither 0 nor 1")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn little_endian_reads() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x00, 0xff, 0xff, 0x00, 0x00]);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u16().unwrap(), 2);
        assert_eq!(reader.read_u32().unwrap(), 0xffff);
        assert_eq!(reader.position(), 7);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn underrun_is_an_error() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        assert_eq!(
            reader.read_u64(),
            Err(CodecError::BufferUnderrun {
                needed: 6,
                remaining: 2
            })
        );
        // a failed read does not advance the position
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn string_reads() {
        let mut buf = vec![3, 0, 0, 0];
        buf.extend_from_slice(b"abc");
        let mut reader = ByteReader::new(&buf);
        assert_eq!(reader.read_string().unwrap(), "abc");

        let mut reader = ByteReader::new(&[2, 0, 0, 0, 0xc3, 0x28]);
        assert_eq!(reader.read_string(), Err(CodecError::InvalidUtf8));

        // declared length longer than the buffer
        let mut reader = ByteReader::new(&[9, 0, 0, 0, b'a']);
        assert!(matches!(
            reader.read_string(),
            Err(CodecError::BufferUnderrun { .. })
        ));
    }
}

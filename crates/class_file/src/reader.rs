use std::io::Read;

use log::trace;

use crate::{error::ReadError, scalar::decode_unsigned};

type Result<T, E = ReadError> = std::result::Result<T, E>;

/// Reads exact byte counts from a byte source, retrying on short reads.
///
/// A read that returns fewer bytes than asked for is not an error by itself; only a clean end
/// of input before the count is met (`UnexpectedEof`) or an error from the source (`IOError`)
/// ends the request early.
pub struct ExactReader<R> {
    r: R,
    position: u64,
}

impl<R: Read> ExactReader<R> {
    pub fn new(r: R) -> Self {
        Self { r, position: 0 }
    }

    /// Number of bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    /// Fills the first `count` bytes of `dest`.
    pub fn read_exact_into(&mut self, dest: &mut [u8], count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        if dest.len() < count {
            return Err(ReadError::InvalidArgument {
                capacity: dest.len(),
                requested: count,
            });
        }

        let mut so_far = 0;
        while so_far < count {
            let bytes_read = match self.r.read(&mut dest[so_far..count]) {
                Ok(n) => n,
                Err(e) => {
                    self.position += so_far as u64;
                    return Err(ReadError::IOError(e));
                }
            };

            if bytes_read == 0 {
                self.position += so_far as u64;
                return Err(ReadError::UnexpectedEof {
                    obtained: so_far,
                    requested: count,
                });
            }

            so_far += bytes_read;
            if so_far < count {
                trace!("short read: {} of {} bytes so far", so_far, count);
            }
        }

        self.position += count as u64;
        Ok(())
    }

    /// Reads `count` bytes into a freshly allocated buffer owned by the caller.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(count)
            .map_err(|_| ReadError::AllocationFailure(count))?;
        bytes.resize(count, 0);

        self.read_exact_into(&mut bytes, count)?;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_unsigned::<1>()? as u8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.read_unsigned::<2>()? as u16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_unsigned::<4>()
    }

    fn read_unsigned<const N: usize>(&mut self) -> Result<u32> {
        let mut buf = [0u8; N];
        self.read_exact_into(&mut buf, N)?;
        Ok(decode_unsigned(&buf))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, ErrorKind};

    use super::*;

    /// Hands out at most one byte per `read` call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    /// Yields its bytes, then fails with the given kind.
    struct Failing {
        bytes: Vec<u8>,
        kind: ErrorKind,
    }

    impl Read for Failing {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.bytes.is_empty() {
                return Err(io::Error::new(self.kind, "device failure"));
            }
            let n = self.bytes.len().min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[..n]);
            self.bytes = self.bytes.split_off(n);
            Ok(n)
        }
    }

    #[test]
    fn test_retries_short_reads() {
        let mut r = ExactReader::new(Trickle(&[0xCA, 0xFE, 0xBA, 0xBE]));
        assert_eq!(0xCAFEBABE, r.read_u32().unwrap());
        assert_eq!(4, r.position());
    }

    #[test]
    fn test_eof_reports_bytes_obtained() {
        let mut r = ExactReader::new(Trickle(&[0x00]));
        match r.read_u16() {
            Err(ReadError::UnexpectedEof {
                obtained,
                requested,
            }) => {
                assert_eq!(1, obtained);
                assert_eq!(2, requested);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn test_eof_on_empty_source() {
        let mut r = ExactReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(
            r.read_u8(),
            Err(ReadError::UnexpectedEof {
                obtained: 0,
                requested: 1
            })
        ));
    }

    #[test]
    fn test_io_error_is_not_eof() {
        let mut r = ExactReader::new(Failing {
            bytes: vec![0x01],
            kind: ErrorKind::Other,
        });
        match r.read_u32() {
            Err(ReadError::IOError(e)) => assert_eq!(ErrorKind::Other, e.kind()),
            other => panic!("expected IOError, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupted_is_propagated() {
        let mut r = ExactReader::new(Failing {
            bytes: vec![],
            kind: ErrorKind::Interrupted,
        });
        assert!(matches!(r.read_u8(), Err(ReadError::IOError(_))));
    }

    #[test]
    fn test_zero_count_is_a_no_op() {
        let mut r = ExactReader::new(Failing {
            bytes: vec![],
            kind: ErrorKind::Other,
        });
        let mut dest = [0u8; 0];
        r.read_exact_into(&mut dest, 0).unwrap();
        assert!(r.read_bytes(0).unwrap().is_empty());
        assert_eq!(0, r.position());
    }

    #[test]
    fn test_undersized_destination() {
        let mut r = ExactReader::new(Cursor::new(vec![1, 2, 3]));
        let mut dest = [0u8; 2];
        assert!(matches!(
            r.read_exact_into(&mut dest, 3),
            Err(ReadError::InvalidArgument {
                capacity: 2,
                requested: 3
            })
        ));
        // Nothing was consumed.
        assert_eq!(0, r.position());
        assert_eq!(1, r.read_u8().unwrap());
    }

    #[test]
    fn test_read_bytes_is_unmodified() {
        let mut r = ExactReader::new(Trickle(b"hello, world"));
        assert_eq!(b"hello".to_vec(), r.read_bytes(5).unwrap());
        assert_eq!(5, r.position());
    }
}

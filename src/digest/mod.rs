//! Streaming content digests
//!
//! Every digest is computed by one streaming primitive, [`digest_with`],
//! which reads its input to exhaustion in fixed-size chunks. The other
//! entry points only pick the algorithm or stream the byte source into it.

pub mod algorithm;

pub use algorithm::DigestAlgorithm;

use crate::error::{ReslocError, ReslocResult};
use crate::resolve::{ResolvedLocation, Resolver};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bytes read from the input per step
pub const CHUNK_SIZE: usize = 4 << 10;

/// Digest a stream with the algorithm named `algorithm`
pub fn digest<R: Read>(reader: R, algorithm: &str) -> ReslocResult<Vec<u8>> {
    digest_with(reader, algorithm.parse()?)
}

/// Digest a stream with the platform default algorithm
pub fn digest_default<R: Read>(reader: R) -> ReslocResult<Vec<u8>> {
    digest_with(reader, DigestAlgorithm::platform_default())
}

/// Digest a stream, reading it to exhaustion.
///
/// The reader is consumed and dropped before this returns, on success and
/// on error alike.
pub fn digest_with<R: Read>(mut reader: R, algorithm: DigestAlgorithm) -> ReslocResult<Vec<u8>> {
    let mut hasher = algorithm.hasher();
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
                total += n as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReslocError::io("reading digest input", e)),
        }
    }

    debug!("Computed {} over {} bytes", algorithm, total);
    Ok(hasher.finalize())
}

/// Render a digest as lowercase hexadecimal
pub fn to_hex(digest: &[u8]) -> String {
    hex::encode(digest)
}

/// Digest a stream and render it as hexadecimal
pub fn digest_hex<R: Read>(reader: R, algorithm: &str) -> ReslocResult<String> {
    digest(reader, algorithm).map(|bytes| to_hex(&bytes))
}

/// Digest a stream with the platform default and render it as hexadecimal
pub fn digest_default_hex<R: Read>(reader: R) -> ReslocResult<String> {
    digest_default(reader).map(|bytes| to_hex(&bytes))
}

/// Anything whose bytes can be streamed
pub trait ByteSource {
    /// Stream a fresh view of the source's bytes through `read`
    fn with_bytes<T, F>(&self, read: F) -> ReslocResult<T>
    where
        F: FnOnce(&mut dyn Read) -> ReslocResult<T>;
}

impl ByteSource for Path {
    fn with_bytes<T, F>(&self, read: F) -> ReslocResult<T>
    where
        F: FnOnce(&mut dyn Read) -> ReslocResult<T>,
    {
        let mut file = File::open(self)
            .map_err(|e| ReslocError::io(format!("opening {}", self.display()), e))?;
        read(&mut file)
    }
}

impl ByteSource for PathBuf {
    fn with_bytes<T, F>(&self, read: F) -> ReslocResult<T>
    where
        F: FnOnce(&mut dyn Read) -> ReslocResult<T>,
    {
        self.as_path().with_bytes(read)
    }
}

impl ByteSource for ResolvedLocation {
    fn with_bytes<T, F>(&self, read: F) -> ReslocResult<T>
    where
        F: FnOnce(&mut dyn Read) -> ReslocResult<T>,
    {
        self.with_reader(read)
    }
}

/// Digest any byte source without buffering it
pub fn digest_source<S: ByteSource + ?Sized>(
    source: &S,
    algorithm: DigestAlgorithm,
) -> ReslocResult<Vec<u8>> {
    source.with_bytes(|reader| digest_with(reader, algorithm))
}

/// Resolve an identifier and digest its contents
pub fn digest_identifier(
    resolver: &Resolver,
    identifier: &str,
    algorithm: DigestAlgorithm,
) -> ReslocResult<Vec<u8>> {
    digest_source(&resolver.resolve(identifier)?, algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mount::archive::tests::write_archive;
    use crate::mount::MountRegistry;
    use crate::scheme::compose_archive_identifier;
    use sha2::{Digest, Sha256};
    use std::io::{self, Cursor};
    use std::sync::Arc;
    use tempfile::TempDir;
    use url::Url;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";
    const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";
    const EMPTY_SHA1: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    /// Reader that yields some bytes, then fails
    struct FailingReader {
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::other("device unplugged"));
            }
            self.sent = true;
            buf[0] = b'x';
            Ok(1)
        }
    }

    /// Reader that is interrupted before every chunk
    struct InterruptingReader {
        inner: Cursor<Vec<u8>>,
        interrupt: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn empty_input_matches_known_digests() {
        assert_eq!(digest_hex(io::empty(), "SHA-256").unwrap(), EMPTY_SHA256);
        assert_eq!(digest_hex(io::empty(), "SHA-512").unwrap(), EMPTY_SHA512);
        assert_eq!(digest_hex(io::empty(), "MD5").unwrap(), EMPTY_MD5);
        assert_eq!(digest_hex(io::empty(), "SHA-1").unwrap(), EMPTY_SHA1);
    }

    #[test]
    fn default_algorithm_on_empty_input() {
        let expected = match DigestAlgorithm::platform_default() {
            DigestAlgorithm::Sha512 => EMPTY_SHA512,
            _ => EMPTY_SHA256,
        };
        assert_eq!(digest_default_hex(io::empty()).unwrap(), expected);
    }

    #[test]
    fn known_vector() {
        assert_eq!(digest_hex(&b"abc"[..], "sha256").unwrap(), ABC_SHA256);
    }

    #[test]
    fn multi_chunk_input_matches_one_shot() {
        let data: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();

        let streamed = digest(Cursor::new(data.clone()), "SHA-256").unwrap();
        assert_eq!(streamed, Sha256::digest(&data).to_vec());
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let data = b"resumable".to_vec();
        let reader = InterruptingReader {
            inner: Cursor::new(data.clone()),
            interrupt: false,
        };

        assert_eq!(
            digest(reader, "SHA-256").unwrap(),
            Sha256::digest(&data).to_vec()
        );
    }

    #[test]
    fn hex_is_lowercase_and_twice_the_length() {
        for algorithm in DigestAlgorithm::all() {
            let bytes = digest_with(&b"The quick brown fox"[..], *algorithm).unwrap();
            let hex = to_hex(&bytes);

            assert_eq!(bytes.len(), algorithm.output_len());
            assert_eq!(hex.len(), 2 * bytes.len());
            assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn to_hex_pads_each_byte() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn unknown_algorithm_fails_without_fallback() {
        assert!(matches!(
            digest(io::empty(), "SHA-999"),
            Err(ReslocError::DigestUnavailable(_))
        ));
    }

    #[test]
    fn read_errors_propagate() {
        let err = digest(FailingReader { sent: false }, "SHA-256").unwrap_err();
        assert!(matches!(err, ReslocError::Io { .. }));
    }

    #[test]
    fn path_and_location_sources_agree() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.bin");
        std::fs::write(&file, b"abc").unwrap();
        let jar = dir.path().join("payload.jar");
        write_archive(&jar, &[("nested/payload.bin", b"abc")]);

        let resolver = Resolver::new(Arc::new(MountRegistry::new()));
        let jar_uri = Url::from_file_path(&jar).unwrap();
        let entry = compose_archive_identifier(jar_uri.as_str(), "/nested/payload.bin");

        let from_path = digest_source(&file, DigestAlgorithm::Sha256).unwrap();
        let from_location =
            digest_source(&resolver.resolve(file.to_str().unwrap()).unwrap(), DigestAlgorithm::Sha256)
                .unwrap();
        let from_archive = digest_identifier(&resolver, &entry, DigestAlgorithm::Sha256).unwrap();

        assert_eq!(to_hex(&from_path), ABC_SHA256);
        assert_eq!(from_path, from_location);
        assert_eq!(from_path, from_archive);
    }

    #[test]
    fn multi_chunk_archive_entry_matches_one_shot() {
        let dir = TempDir::new().unwrap();
        let data: Vec<u8> = (0..(CHUNK_SIZE * 5 + 3)).map(|i| (i % 241) as u8).collect();
        let jar = dir.path().join("large.jar");
        write_archive(&jar, &[("blob.bin", data.as_slice())]);

        let resolver = Resolver::new(Arc::new(MountRegistry::new()));
        let jar_uri = Url::from_file_path(&jar).unwrap();
        let entry = compose_archive_identifier(jar_uri.as_str(), "/blob.bin");

        assert_eq!(
            digest_identifier(&resolver, &entry, DigestAlgorithm::Sha256).unwrap(),
            Sha256::digest(&data).to_vec()
        );
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.bin");

        assert!(matches!(
            digest_source(&missing, DigestAlgorithm::Sha256),
            Err(ReslocError::Io { .. })
        ));
    }
}

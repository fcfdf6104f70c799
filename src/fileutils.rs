//! Thin `Read`/`Write`/`Seek` wrapper over a C `FILE*`, so the `cffi` surface
//! can hand the core `std::io`-based save/load paths a stream coming from a
//! C caller.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::raw::{c_int, c_void};

pub(crate) struct CFile {
    file: *mut libc::FILE,
}

/// Wrap a non-null `FILE*`. Returns `None` if `file` is null.
pub(crate) fn wrap_cfile_nonnull(file: *mut libc::FILE) -> Option<CFile> {
    if file.is_null() {
        None
    } else {
        Some(CFile { file })
    }
}

impl Read for CFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::fread(buf.as_mut_ptr() as *mut c_void, 1, buf.len(), self.file) };
        if n == 0 && unsafe { libc::ferror(self.file) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n)
    }
}

impl Write for CFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = unsafe { libc::fwrite(buf.as_ptr() as *const c_void, 1, buf.len(), self.file) };
        if n == 0 && !buf.is_empty() {
            return Err(io::Error::last_os_error());
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        let ret: c_int = unsafe { libc::fflush(self.file) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Seek for CFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => (n as i64, libc::SEEK_SET),
            SeekFrom::End(n) => (n, libc::SEEK_END),
            SeekFrom::Current(n) => (n, libc::SEEK_CUR),
        };
        let ret = unsafe { libc::fseek(self.file, offset as libc::c_long, whence) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        let pos = unsafe { libc::ftell(self.file) };
        if pos < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(pos as u64)
    }
}

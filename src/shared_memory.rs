//! Backing-file manager: create/attach the file, size it, map it, tear the
//! mapping down. Raw `libc` calls wrapped in a small owning type, rather
//! than pulled in through a crate like `memmap2`, backed by a real named
//! path instead of an anonymous `memfd` since two independent processes
//! must be able to open the same file by name: the creator truncates on
//! create, and a peer attaches only after that has happened.

use crate::sync::Backend;
use std::ffi::CString;
use std::io;
use std::marker::PhantomData;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;
use std::ptr::{self, NonNull};

pub struct Mapping<B: Backend> {
    ptr: NonNull<u8>,
    total_len: usize,
    capacity: usize,
    fd: RawFd,
    _backend: PhantomData<B>,
}

unsafe impl<B: Backend> Send for Mapping<B> {}
unsafe impl<B: Backend> Sync for Mapping<B> {}

impl<B: Backend> Mapping<B> {
    /// Truncate `path` to `header + capacity` bytes, map it, and initialize
    /// the header. Fails with an *I/O error* if the file can't be opened or
    /// sized, or a *mapping error* if `mmap` fails.
    pub fn create(path: &Path, capacity: usize) -> io::Result<Self> {
        let header_size = std::mem::size_of::<B::Header>();
        let total_len = header_size + capacity;

        let fd = open_file(path, libc::O_CREAT | libc::O_TRUNC).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!(
                    "failed to create queue file {}:\n\
                     ├─ capacity requested: {capacity}\n\
                     ╰─ error: {e}",
                    path.display()
                ),
            )
        })?;

        if unsafe { libc::ftruncate(fd, total_len as libc::off_t) } != 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(io::Error::new(
                err.kind(),
                format!(
                    "failed to size queue file {} to {total_len} bytes:\n╰─ error: {err}",
                    path.display()
                ),
            ));
        }

        let ptr = match map(fd, total_len) {
            Ok(ptr) => ptr,
            Err(err) => {
                unsafe { libc::close(fd) };
                return Err(err);
            }
        };

        // SAFETY: we just created and sized this file; no other process has
        // observed it yet.
        unsafe {
            B::init_header(ptr.as_ptr() as *mut B::Header, capacity as i32);
        }

        Ok(Self {
            ptr,
            total_len,
            capacity,
            fd,
            _backend: PhantomData,
        })
    }

    /// Open an already-initialized queue file, deriving `capacity` from its
    /// length. Does not touch the header.
    pub fn attach(path: &Path) -> io::Result<Self> {
        let fd = open_file(path, 0).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to attach to queue file {}:\n╰─ error: {e}", path.display()),
            )
        })?;
        Self::attach_fd_inner(fd)
    }

    /// Same as [`attach`](Self::attach), for a descriptor inherited across a
    /// fork rather than reopened by path.
    pub fn attach_fd(fd: RawFd) -> io::Result<Self> {
        Self::attach_fd_inner(fd)
    }

    fn attach_fd_inner(fd: RawFd) -> io::Result<Self> {
        let header_size = std::mem::size_of::<B::Header>();
        let total_len = match fd_len(fd) {
            Ok(len) => len,
            Err(err) => {
                unsafe { libc::close(fd) };
                return Err(err);
            }
        };

        if total_len <= header_size {
            unsafe { libc::close(fd) };
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "queue file is {total_len} bytes, too small to hold a {header_size} byte header"
                ),
            ));
        }

        let ptr = match map(fd, total_len) {
            Ok(ptr) => ptr,
            Err(err) => {
                unsafe { libc::close(fd) };
                return Err(err);
            }
        };

        Ok(Self {
            ptr,
            total_len,
            capacity: total_len - header_size,
            fd,
            _backend: PhantomData,
        })
    }

    pub(crate) fn header(&self) -> &B::Header {
        // SAFETY: initialized in `create`, or assumed initialized by the
        // peer in `attach`/`attach_fd`.
        unsafe { &*(self.ptr.as_ptr() as *const B::Header) }
    }

    pub(crate) fn data_ptr(&self) -> *mut u8 {
        // SAFETY: the ring's data area begins right after the header and is
        // `self.capacity` bytes long, both established at construction.
        unsafe { self.ptr.as_ptr().add(std::mem::size_of::<B::Header>()) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<B: Backend> Drop for Mapping<B> {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.total_len);
            libc::close(self.fd);
        }
    }
}

fn open_file(path: &Path, extra_flags: libc::c_int) -> io::Result<RawFd> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"))?;
    let fd = unsafe { libc::open(c_path.as_ptr(), libc::O_RDWR | extra_flags, 0o666) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(fd)
}

fn fd_len(fd: RawFd) -> io::Result<usize> {
    let mut stat: libc::stat = unsafe { std::mem::zeroed() };
    if unsafe { libc::fstat(fd, &mut stat) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(stat.st_size as usize)
}

fn map(fd: RawFd, len: usize) -> io::Result<NonNull<u8>> {
    let ptr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            len,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            fd,
            0,
        )
    };
    if ptr == libc::MAP_FAILED {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: mmap succeeded, so `ptr` is non-null.
    Ok(unsafe { NonNull::new_unchecked(ptr as *mut u8) })
}

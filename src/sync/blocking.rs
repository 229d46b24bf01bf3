//! Blocking backend: `size` guarded by a process-shared mutex/condvar pair
//! placed directly in the header, so a waiter is descheduled instead of
//! spinning.
//!
//! One condvar serves both producer and consumer. Posting broadcasts rather
//! than signals a single waiter, so a producer's post can never starve a
//! waiting consumer (or vice versa) behind a misdirected wakeup.

use super::Backend;
use crate::layout::BlockingHeader;
use std::mem::MaybeUninit;

pub struct Blocking;

impl Backend for Blocking {
    type Header = BlockingHeader;

    unsafe fn init_header(header_ptr: *mut Self::Header, capacity: i32) {
        let mut mattr = MaybeUninit::<libc::pthread_mutexattr_t>::uninit();
        libc::pthread_mutexattr_init(mattr.as_mut_ptr());
        libc::pthread_mutexattr_setpshared(mattr.as_mut_ptr(), libc::PTHREAD_PROCESS_SHARED);
        #[cfg(target_os = "linux")]
        libc::pthread_mutexattr_settype(mattr.as_mut_ptr(), libc::PTHREAD_MUTEX_ADAPTIVE_NP);
        let mut mattr = mattr.assume_init();

        let mut cattr = MaybeUninit::<libc::pthread_condattr_t>::uninit();
        libc::pthread_condattr_init(cattr.as_mut_ptr());
        libc::pthread_condattr_setpshared(cattr.as_mut_ptr(), libc::PTHREAD_PROCESS_SHARED);
        let mut cattr = cattr.assume_init();

        std::ptr::write(
            header_ptr,
            BlockingHeader {
                capacity,
                size: std::cell::UnsafeCell::new(0),
                mutex: std::cell::UnsafeCell::new(std::mem::zeroed()),
                cond: std::cell::UnsafeCell::new(std::mem::zeroed()),
            },
        );

        libc::pthread_mutex_init((*header_ptr).mutex.get(), &mattr);
        libc::pthread_cond_init((*header_ptr).cond.get(), &cattr);
        libc::pthread_mutexattr_destroy(&mut mattr);
        libc::pthread_condattr_destroy(&mut cattr);
    }

    fn wait_write(header: &Self::Header, n: usize) {
        let n = n as i32;
        unsafe {
            libc::pthread_mutex_lock(header.mutex.get());
            while header.capacity - *header.size.get() < n {
                libc::pthread_cond_wait(header.cond.get(), header.mutex.get());
            }
            libc::pthread_mutex_unlock(header.mutex.get());
        }
    }

    fn wait_read(header: &Self::Header, n: usize) -> usize {
        let n = n as i32;
        unsafe {
            libc::pthread_mutex_lock(header.mutex.get());
            while *header.size.get() < n {
                libc::pthread_cond_wait(header.cond.get(), header.mutex.get());
            }
            let observed = *header.size.get();
            libc::pthread_mutex_unlock(header.mutex.get());
            observed as usize
        }
    }

    fn inc_size(header: &Self::Header, delta: i64) {
        unsafe {
            libc::pthread_mutex_lock(header.mutex.get());
            *header.size.get() += delta as i32;
            libc::pthread_cond_broadcast(header.cond.get());
            libc::pthread_mutex_unlock(header.mutex.get());
        }
    }
}

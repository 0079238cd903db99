//! Scoped terminal mode changes
//!
//! Autowrap is switched off for the duration of a run so long values are
//! clipped instead of wrapping under the labels. It is switched back on when
//! the guard drops (normal return, early `?` return, panic unwind) and by a
//! signal handler for SIGINT, SIGTERM, SIGHUP and SIGQUIT.

use crate::escape::Escapes;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

const AUTOWRAP_ON: &[u8] = b"\x1b[?7h";

static RESTORE_ON_SIGNAL: AtomicBool = AtomicBool::new(false);

/// Writer wrapper holding autowrap off until released or dropped
pub struct AutowrapGuard<W: Write> {
    out: W,
    restore: String,
}

impl<W: Write> AutowrapGuard<W> {
    /// Disable autowrap. Nothing is written in plain mode or on terminals
    /// without DECAWM.
    pub fn acquire(esc: &Escapes, mut out: W) -> io::Result<Self> {
        let (disable, restore) = if esc.color_enabled() {
            (esc.autowrap(false), esc.autowrap(true))
        } else {
            (String::new(), String::new())
        };

        if !disable.is_empty() {
            out.write_all(disable.as_bytes())?;
            RESTORE_ON_SIGNAL.store(true, Ordering::SeqCst);
        }

        Ok(AutowrapGuard { out, restore })
    }

    /// Restore autowrap now, reporting write errors
    pub fn release(&mut self) -> io::Result<()> {
        if self.restore.is_empty() {
            return self.out.flush();
        }
        let restore = std::mem::take(&mut self.restore);
        self.out.write_all(restore.as_bytes())?;
        RESTORE_ON_SIGNAL.store(false, Ordering::SeqCst);
        self.out.flush()
    }
}

impl<W: Write> Write for AutowrapGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for AutowrapGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::debug!(%err, "failed to restore autowrap");
        }
    }
}

extern "C" fn restore_and_reraise(signal: libc::c_int) {
    if RESTORE_ON_SIGNAL.swap(false, Ordering::SeqCst) {
        // SAFETY: write(2) is async-signal-safe and the buffer is static.
        unsafe {
            libc::write(
                libc::STDOUT_FILENO,
                AUTOWRAP_ON.as_ptr() as *const libc::c_void,
                AUTOWRAP_ON.len(),
            );
        }
    }
    // SAFETY: resetting the disposition and re-raising terminates with the
    // signal's default action, preserving the exit status callers expect.
    unsafe {
        libc::signal(signal, libc::SIG_DFL);
        libc::raise(signal);
    }
}

/// Route termination signals through the autowrap restore
pub fn install_signal_restore() {
    let handler = restore_and_reraise as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for signal in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP, libc::SIGQUIT] {
        // SAFETY: the handler only touches an atomic and async-signal-safe calls.
        let previous = unsafe { libc::signal(signal, handler) };
        if previous == libc::SIG_ERR {
            tracing::debug!(signal, "could not install signal handler");
        }
    }
}
